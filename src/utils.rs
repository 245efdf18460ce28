use chrono::{NaiveDateTime, Timelike};

use crate::error::{Error, Result};

const SECONDS_PER_HOUR: f64 = 3600.0;

pub fn naive_datetime_from_unixtime(unixtime: f64) -> Result<NaiveDateTime> {
    if !unixtime.is_finite() {
        return Err(Error::InvalidUnixTime(unixtime));
    }
    let secs = unixtime.floor();
    let nanos = ((unixtime - secs) * 1e9) as u32;
    NaiveDateTime::from_timestamp_opt(secs as i64, nanos.min(999_999_999))
        .ok_or(Error::InvalidUnixTime(unixtime))
}

/// Seconds elapsed since midnight, including the fractional part.
pub fn seconds_of_day(datetime: &NaiveDateTime) -> f64 {
    datetime.num_seconds_from_midnight() as f64 + datetime.nanosecond() as f64 / 1e9
}

/// Hour of day built from whole hour/minute/second fields.
pub fn whole_second_hour(seconds_of_day: f64) -> f64 {
    seconds_of_day.floor() / SECONDS_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_naive_datetime_from_unixtime() {
        let dt = naive_datetime_from_unixtime(1357000200.).unwrap();
        let expected = NaiveDate::from_ymd_opt(2013, 1, 1)
            .unwrap()
            .and_hms_opt(0, 30, 0)
            .unwrap();
        assert_eq!(expected, dt);
        assert!(naive_datetime_from_unixtime(f64::NAN).is_err());
        assert!(naive_datetime_from_unixtime(1e20).is_err());
    }

    #[test]
    fn test_seconds_of_day() {
        let dt = NaiveDate::from_ymd_opt(2025, 3, 3)
            .unwrap()
            .and_hms_milli_opt(13, 30, 15, 500)
            .unwrap();
        assert_eq!(48615.5, seconds_of_day(&dt));
        assert_eq!(13.504166666666666, whole_second_hour(48615.5));
    }
}
