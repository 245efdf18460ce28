//! Trapezoidal integration of intensity samples into energy.

use tracing::warn;

use crate::error::{Error, Result};
use crate::irradiance::SolarSample;

const SECONDS_PER_HOUR: f64 = 3600.;
const WH_PER_KWH: f64 = 1000.;

/// Total energy in kWh/m² over the span of `samples`.
///
/// Offsets must never decrease and every intensity must be finite and
/// non-negative; anything else is rejected rather than folded into the sum.
/// Repeated offsets are accepted and contribute nothing.
pub fn integrate(samples: &[SolarSample]) -> Result<f64> {
    validate(samples)?;
    // fold from +0.0; f64's Sum starts at -0.0
    let wh = samples
        .windows(2)
        .map(|pair| trapezoid(&pair[0], &pair[1]))
        .fold(0., |acc, wh| acc + wh);
    Ok(wh / WH_PER_KWH)
}

/// Running total in kWh/m² at each sample; the first entry is always 0.
pub fn cumulative_energy(samples: &[SolarSample]) -> Result<Vec<f64>> {
    validate(samples)?;
    let mut wh = 0.;
    let mut totals = Vec::with_capacity(samples.len());
    if !samples.is_empty() {
        totals.push(0.);
    }
    for pair in samples.windows(2) {
        wh += trapezoid(&pair[0], &pair[1]);
        totals.push(wh / WH_PER_KWH);
    }
    Ok(totals)
}

/// Pairs offsets with intensities, for callers holding two parallel columns.
pub fn zip_samples(offsets: &[u64], intensities: &[f64]) -> Result<Vec<SolarSample>> {
    if offsets.len() != intensities.len() {
        return Err(Error::LengthMismatch {
            offsets: offsets.len(),
            intensities: intensities.len(),
        });
    }
    Ok(offsets
        .iter()
        .zip(intensities)
        .map(|(&time_offset_seconds, &intensity)| SolarSample {
            time_offset_seconds,
            intensity,
        })
        .collect())
}

pub fn format_energy(kwh: f64) -> String {
    format!("Total Solar Energy: {kwh:.4} kWh/m²")
}

// Wh/m² between two samples
fn trapezoid(a: &SolarSample, b: &SolarSample) -> f64 {
    let dt_hours = (b.time_offset_seconds - a.time_offset_seconds) as f64 / SECONDS_PER_HOUR;
    let avg_intensity = (a.intensity + b.intensity) / 2.;
    dt_hours * avg_intensity
}

fn validate(samples: &[SolarSample]) -> Result<()> {
    for (index, sample) in samples.iter().enumerate() {
        if !sample.intensity.is_finite() || sample.intensity < 0. {
            warn!(index, intensity = sample.intensity, "rejecting sample");
            return Err(Error::InvalidIntensity {
                index,
                intensity: sample.intensity,
            });
        }
        if index > 0 {
            let previous = samples[index - 1].time_offset_seconds;
            if sample.time_offset_seconds < previous {
                warn!(index, previous, offset = sample.time_offset_seconds, "rejecting sample");
                return Err(Error::OutOfOrderSample {
                    index,
                    previous,
                    offset: sample.time_offset_seconds,
                });
            }
        }
    }
    Ok(())
}
