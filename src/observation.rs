//! Optional fields pulled out of a raw ASOS observation row.
//!
//! Each extractor is independent and best-effort: a field that is missing or
//! malformed comes back as `None`, which is distinct from a value of zero.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Observation {
    /// °C
    pub temperature: Option<f64>,
    /// statute miles
    pub visibility: Option<f64>,
    /// percent
    pub humidity: Option<u8>,
}

impl Observation {
    pub fn from_row(row: &str) -> Self {
        Observation {
            temperature: extract_temperature(row),
            visibility: extract_visibility(row),
            humidity: extract_humidity(row),
        }
    }
}

/// First standalone group of 4 or 5 digits ending in `00`, e.g. `2300` or
/// `-1500`. The digits ahead of the trailing zeros are hundredths of a
/// degree, so `2300` reads as 0.23.
pub fn extract_temperature(row: &str) -> Option<f64> {
    let bytes = row.as_bytes();
    digit_runs(bytes).find_map(|(start, end)| {
        let run = &row[start..end];
        if !(4..=5).contains(&run.len()) || !run.ends_with("00") {
            return None;
        }
        let value: i32 = run[..run.len() - 2].parse().ok()?;
        // a minus only counts when it is not itself glued to another number
        let negative = start > 0
            && bytes[start - 1] == b'-'
            && (start < 2 || !bytes[start - 2].is_ascii_digit());
        let value = if negative { -value } else { value };
        Some(value as f64 / 100.)
    })
}

/// First `<digits>[.<digits>]SM` group, e.g. `10SM` or `2.5SM`.
pub fn extract_visibility(row: &str) -> Option<f64> {
    let bytes = row.as_bytes();
    (0..bytes.len())
        .filter(|&i| bytes[i].is_ascii_digit())
        .find_map(|start| {
            let mut end = skip_digits(bytes, start);
            if end < bytes.len() && bytes[end] == b'.' {
                end = skip_digits(bytes, end + 1);
            }
            if bytes[end..].starts_with(b"SM") {
                row[start..end].parse().ok()
            } else {
                None
            }
        })
}

/// First standalone one- or two-digit word between 1 and 100.
pub fn extract_humidity(row: &str) -> Option<u8> {
    row.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| (1..=2).contains(&word.len()) && word.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|word| word.parse::<u8>().ok())
        .find(|value| (1..=100).contains(value))
}

// maximal runs of ASCII digits as byte ranges
fn digit_runs(bytes: &[u8]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut i = 0;
    std::iter::from_fn(move || {
        while i < bytes.len() && !bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i >= bytes.len() {
            return None;
        }
        let start = i;
        i = skip_digits(bytes, i);
        Some((start, i))
    })
}

fn skip_digits(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_temperature() {
        assert_eq!(Some(0.23), extract_temperature("KJFK 2300 10SM"));
        assert_eq!(Some(-0.15), extract_temperature("KJFK -1500 10SM"));
        assert_eq!(Some(1.23), extract_temperature("T 12300"));
        // glued to a preceding number the minus is a separator
        assert_eq!(Some(0.23), extract_temperature("12-2300"));
        assert_eq!(None, extract_temperature("KJFK 123400 2301 500"));
        assert_eq!(None, extract_temperature(""));
    }

    #[test]
    fn test_extract_visibility() {
        assert_eq!(Some(10.), extract_visibility("KJFK 10SM FEW250"));
        assert_eq!(Some(2.5), extract_visibility("KJFK 2.5SM BR"));
        assert_eq!(Some(2.), extract_visibility("KJFK 1/2SM FG"));
        assert_eq!(Some(2.3), extract_visibility("A1.2.3SM"));
        assert_eq!(None, extract_visibility("KJFK 10 SM"));
        assert_eq!(None, extract_visibility("SM"));
    }

    #[test]
    fn test_extract_humidity() {
        assert_eq!(Some(65), extract_humidity("KJFK 10SM 65 2300"));
        assert_eq!(Some(5), extract_humidity("T -5 x"));
        // zero is skipped, it is not a humidity reading
        assert_eq!(Some(7), extract_humidity("0 00 7"));
        assert_eq!(None, extract_humidity("10SM FEW250 2300"));
        assert_eq!(None, extract_humidity("a_12 12b"));
    }

    #[test]
    fn test_observation_from_row() {
        let obs = Observation::from_row("KJFK 031251Z 2300 10SM 65");
        assert_eq!(Some(0.23), obs.temperature);
        assert_eq!(Some(10.), obs.visibility);
        assert_eq!(Some(65), obs.humidity);
        assert_eq!(Observation::default(), Observation::from_row("no data"));
    }
}
