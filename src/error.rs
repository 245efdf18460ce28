use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid latitude {0}° (must be finite and between -90° and +90°)")]
    InvalidLatitude(f64),

    #[error("invalid longitude {0}° (must be finite)")]
    InvalidLongitude(f64),

    #[error("sample {index} goes back in time: offset {offset}s after {previous}s")]
    OutOfOrderSample {
        index: usize,
        previous: u64,
        offset: u64,
    },

    #[error("sample {index} has invalid intensity {intensity} W/m² (must be finite and >= 0)")]
    InvalidIntensity { index: usize, intensity: f64 },

    #[error("offsets and intensities differ in length: {offsets} vs {intensities}")]
    LengthMismatch { offsets: usize, intensities: usize },

    #[error("unix time {0} is outside the supported date range")]
    InvalidUnixTime(f64),

    #[error("unknown time basis `{0}` (expected `local` or `utc`)")]
    UnknownTimeBasis(String),

    #[error("invalid sample schedule: {0}")]
    InvalidSchedule(&'static str),

    #[error("incomplete inputs: {0}")]
    IncompleteInputs(String),
}

pub type Result<T> = std::result::Result<T, Error>;
