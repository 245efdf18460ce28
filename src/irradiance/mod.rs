//! Clear-sky solar irradiance at a point on the ground.
//!
//! The model follows the usual textbook chain: declination and equation of
//! time from the day of year, local solar time from the longitude offset to
//! the standard time meridian, elevation from the hour angle, then a
//! Kasten-Young air mass to attenuate the eccentricity-corrected solar
//! constant.
//!
//! Angles are in degrees at the API boundary. The zenith angle used for the
//! air mass is kept in radians.

use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::utils::{seconds_of_day, whole_second_hour};

const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.;
const RAD_TO_DEG: f64 = 180. / std::f64::consts::PI;
const DAYS_PER_YEAR: f64 = 365.;
const SECONDS_PER_DAY: f64 = 86400.;
const AXIAL_TILT: f64 = 23.45;
const SOLAR_CONSTANT: f64 = 1367.;
// beyond this a shift would overflow chrono::Duration
const MAX_SHIFT_SECONDS: f64 = 1e15;

/// How the date and hour fields of a civil timestamp are to be read.
///
/// The two readings give different intensities for the same wall-clock
/// value, so callers always pick one explicitly or accept the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeBasis {
    /// Local standard time of the zone whose meridian is
    /// `15° * floor(longitude / 15)`. No daylight saving.
    #[default]
    LocalStandard,
    /// Coordinated universal time, shifted into local standard time first.
    Utc,
}

impl FromStr for TimeBasis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "local" | "local_standard" => Ok(TimeBasis::LocalStandard),
            "utc" => Ok(TimeBasis::Utc),
            _ => Err(Error::UnknownTimeBasis(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    /// East-positive.
    pub longitude: f64,
}

impl Location {
    /// Latitude must lie in [-90, 90]. Longitude only has to be finite, it is
    /// not wrapped into [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() {
            return Err(Error::InvalidLongitude(longitude));
        }
        Ok(Location {
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarSample {
    pub time_offset_seconds: u64,
    /// W/m²
    pub intensity: f64,
}

/// Every intermediate of one intensity evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarGeometry {
    pub day_of_year: u32,
    pub declination: f64,
    /// minutes
    pub equation_of_time: f64,
    pub standard_meridian: f64,
    /// minutes
    pub time_correction: f64,
    /// fractional hour of day
    pub local_solar_time: f64,
    pub hour_angle: f64,
    pub elevation: f64,
    /// radians
    pub zenith: f64,
    pub air_mass: Option<f64>,
    /// W/m²
    pub extraterrestrial: f64,
    /// W/m²
    pub intensity: f64,
}

impl SolarGeometry {
    fn undefined() -> Self {
        SolarGeometry {
            day_of_year: 0,
            declination: f64::NAN,
            equation_of_time: f64::NAN,
            standard_meridian: f64::NAN,
            time_correction: f64::NAN,
            local_solar_time: f64::NAN,
            hour_angle: f64::NAN,
            elevation: f64::NAN,
            zenith: f64::NAN,
            air_mass: None,
            extraterrestrial: f64::NAN,
            intensity: f64::NAN,
        }
    }
}

#[derive(Builder, Clone, Debug)]
pub struct IrradianceInputs {
    pub start: NaiveDateTime,
    /// Seconds after `start`, one sample each.
    pub offsets: Vec<u64>,
    pub latitude: f64,
    pub longitude: f64,
    #[builder(default)]
    pub time_basis: TimeBasis,
    #[builder(default)]
    pub parallel_calcs: bool,
}

/// Evaluates the model at `start + offset` for every offset. Output order
/// always matches `inputs.offsets`, parallel or not.
pub fn calculate_samples(inputs: &IrradianceInputs) -> Vec<SolarSample> {
    debug!(
        samples = inputs.offsets.len(),
        latitude = inputs.latitude,
        longitude = inputs.longitude,
        parallel = inputs.parallel_calcs,
        "evaluating clear-sky intensity"
    );
    let calculate = |offset: &u64| {
        let intensity = match shift_seconds(inputs.start, *offset as f64) {
            Some(timestamp) => compute_intensity_with_basis(
                inputs.latitude,
                inputs.longitude,
                &timestamp,
                inputs.time_basis,
            ),
            None => {
                warn!(offset, "sample timestamp outside the supported date range");
                f64::NAN
            }
        };
        SolarSample {
            time_offset_seconds: *offset,
            intensity,
        }
    };
    match inputs.parallel_calcs {
        true => inputs.offsets.par_iter().map(calculate).collect(),
        false => inputs.offsets.iter().map(calculate).collect(),
    }
}

pub fn calculate_geometries(
    timestamps: &[NaiveDateTime],
    latitude: f64,
    longitude: f64,
    time_basis: TimeBasis,
    parallel_calcs: bool,
) -> Vec<SolarGeometry> {
    let calculate = |t: &NaiveDateTime| solar_geometry(latitude, longitude, t, time_basis);
    match parallel_calcs {
        true => timestamps.par_iter().map(calculate).collect(),
        false => timestamps.iter().map(calculate).collect(),
    }
}

/// Inputs sampling one calendar day from midnight every `step_seconds`.
pub fn daily_inputs(
    location: &Location,
    date: NaiveDate,
    step_seconds: u64,
    time_basis: TimeBasis,
    parallel_calcs: bool,
) -> Result<IrradianceInputs> {
    if step_seconds == 0 {
        return Err(Error::InvalidSchedule("step must be at least one second"));
    }
    let step = usize::try_from(step_seconds)
        .map_err(|_| Error::InvalidSchedule("step does not fit in usize"))?;
    let start = date
        .and_hms_opt(0, 0, 0)
        .ok_or(Error::InvalidSchedule("date has no midnight"))?;
    Ok(IrradianceInputs {
        start,
        offsets: (0..SECONDS_PER_DAY as u64).step_by(step).collect(),
        latitude: location.latitude,
        longitude: location.longitude,
        time_basis,
        parallel_calcs,
    })
}

pub fn daily_samples(
    location: &Location,
    date: NaiveDate,
    step_seconds: u64,
    time_basis: TimeBasis,
) -> Result<Vec<SolarSample>> {
    let inputs = daily_inputs(location, date, step_seconds, time_basis, false)?;
    Ok(calculate_samples(&inputs))
}

/// Clear-sky intensity in W/m², timestamp read as local standard time.
pub fn compute_intensity(latitude: f64, longitude: f64, timestamp: &NaiveDateTime) -> f64 {
    solar_geometry(latitude, longitude, timestamp, TimeBasis::LocalStandard).intensity
}

pub fn compute_intensity_with_basis(
    latitude: f64,
    longitude: f64,
    timestamp: &NaiveDateTime,
    time_basis: TimeBasis,
) -> f64 {
    solar_geometry(latitude, longitude, timestamp, time_basis).intensity
}

pub fn solar_geometry(
    latitude: f64,
    longitude: f64,
    timestamp: &NaiveDateTime,
    time_basis: TimeBasis,
) -> SolarGeometry {
    let local = match to_local_standard(timestamp, longitude, time_basis) {
        Some(local) => local,
        None => {
            warn!(longitude, "cannot shift timestamp into local standard time");
            return SolarGeometry::undefined();
        }
    };
    let doy = day_of_year(&local);
    let declination = declination_angle(doy);
    let eot = equation_of_time(doy);
    let lstm = local_standard_time_meridian(longitude);
    let tc = time_correction(longitude, lstm, eot);
    let lst = local_solar_time(&local, tc);
    let ha = hour_angle(lst);
    let elevation = elevation_angle(declination, latitude, ha);
    let zenith = zenith_from_vertical(elevation);
    let am = air_mass(zenith);
    let e0 = extraterrestrial_irradiance(doy);
    let intensity = clear_sky_intensity(zenith, e0, am);
    SolarGeometry {
        day_of_year: doy,
        declination,
        equation_of_time: eot,
        standard_meridian: lstm,
        time_correction: tc,
        local_solar_time: lst,
        hour_angle: ha,
        elevation,
        zenith,
        air_mass: am,
        extraterrestrial: e0,
        intensity,
    }
}

/// Reads `timestamp` as local standard time. For [`TimeBasis::Utc`] this
/// moves it by `LSTM / 15` hours; `None` when that leaves chrono's range.
pub fn to_local_standard(
    timestamp: &NaiveDateTime,
    longitude: f64,
    time_basis: TimeBasis,
) -> Option<NaiveDateTime> {
    match time_basis {
        TimeBasis::LocalStandard => Some(*timestamp),
        TimeBasis::Utc => {
            // 15° per hour, 3600 s per hour
            let shift = local_standard_time_meridian(longitude) * 240.;
            if shift.is_nan() {
                // NaN longitude: leave the date alone, the NaN flows through tc
                return Some(*timestamp);
            }
            shift_seconds(*timestamp, shift)
        }
    }
}

fn shift_seconds(timestamp: NaiveDateTime, seconds: f64) -> Option<NaiveDateTime> {
    if !seconds.is_finite() || seconds.abs() > MAX_SHIFT_SECONDS {
        return None;
    }
    timestamp.checked_add_signed(Duration::seconds(seconds as i64))
}

pub fn day_of_year(timestamp: &NaiveDateTime) -> u32 {
    timestamp.ordinal()
}

fn day_angle(doy: u32) -> f64 {
    2. * std::f64::consts::PI / DAYS_PER_YEAR * (doy as f64 - 81.)
}

pub fn declination_angle(doy: u32) -> f64 {
    f64::asin(f64::sin(AXIAL_TILT * DEG_TO_RAD) * f64::sin(day_angle(doy))) * RAD_TO_DEG
}

/// Minutes between apparent and mean solar time.
pub fn equation_of_time(doy: u32) -> f64 {
    let b = day_angle(doy);
    9.87 * f64::sin(2. * b) - 7.53 * f64::cos(b) - 1.5 * f64::sin(b)
}

pub fn local_standard_time_meridian(longitude: f64) -> f64 {
    15. * f64::floor(longitude / 15.)
}

/// Minutes to add to local standard time to get local solar time.
pub fn time_correction(longitude: f64, lstm: f64, eot: f64) -> f64 {
    4. * (longitude - lstm) + eot
}

/// Fractional hour of day after shifting `timestamp` by `tc` minutes.
/// Sub-second precision is dropped after the shift and the result wraps
/// across midnight.
pub fn local_solar_time(timestamp: &NaiveDateTime, tc: f64) -> f64 {
    let shifted = seconds_of_day(timestamp) + tc * 60.;
    // rem_euclid rounds a tiny negative shift up to a full day
    whole_second_hour(shifted.rem_euclid(SECONDS_PER_DAY).min(SECONDS_PER_DAY - 1.))
}

pub fn hour_angle(lst: f64) -> f64 {
    15. * (lst - 12.)
}

pub fn elevation_angle(declination: f64, latitude: f64, hour_angle: f64) -> f64 {
    let decl_rad = declination * DEG_TO_RAD;
    let lat_rad = latitude * DEG_TO_RAD;
    let ha_rad = hour_angle * DEG_TO_RAD;
    let sin_elev = f64::sin(decl_rad) * f64::sin(lat_rad)
        + f64::cos(decl_rad) * f64::cos(lat_rad) * f64::cos(ha_rad);
    // rounding can push |sin_elev| a hair past 1 when the sun is overhead
    f64::asin(sin_elev.clamp(-1., 1.)) * RAD_TO_DEG
}

/// Zenith angle in radians.
pub fn zenith_from_vertical(elevation: f64) -> f64 {
    std::f64::consts::FRAC_PI_2 - elevation * DEG_TO_RAD
}

/// Kasten-Young relative air mass, `None` with the sun at or below the horizon.
pub fn air_mass(zenith: f64) -> Option<f64> {
    if zenith < std::f64::consts::FRAC_PI_2 {
        let zenith_deg = zenith * RAD_TO_DEG;
        Some(1. / (f64::cos(zenith) + 0.50572 * f64::powf(96.07995 - zenith_deg, -1.6364)))
    } else {
        None
    }
}

/// Solar constant corrected for the Earth-Sun distance, W/m².
pub fn extraterrestrial_irradiance(doy: u32) -> f64 {
    SOLAR_CONSTANT
        * (1. + 0.033 * f64::cos(2. * std::f64::consts::PI * (doy as f64 - 3.) / DAYS_PER_YEAR))
}

pub fn clear_sky_intensity(zenith: f64, e0: f64, air_mass: Option<f64>) -> f64 {
    match air_mass {
        Some(am) => {
            let intensity = f64::cos(zenith) * e0 * f64::powf(0.7, f64::powf(am, 0.678));
            if intensity.is_nan() {
                return intensity;
            }
            intensity.max(0.)
        }
        None if zenith.is_nan() => f64::NAN,
        None => 0.,
    }
}
