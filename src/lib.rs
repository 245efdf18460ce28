pub mod energy;
pub mod error;
pub mod irradiance;
pub mod observation;
pub mod station;
mod utils;

#[macro_use]
extern crate derive_builder;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::error::Error;
use crate::irradiance::TimeBasis;

pub use crate::energy::{cumulative_energy, format_energy, integrate};
pub use crate::error::Result;
pub use crate::irradiance::{compute_intensity, Location, SolarGeometry, SolarSample};

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[pymodule]
fn insolation(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(solar_intensity, m)?)?;
    m.add_function(wrap_pyfunction!(integrate_samples, m)?)?;
    Ok(())
}

/// Unix times are read as UTC unless `request["time_basis"]` says `"local"`.
#[pyfunction]
fn solar_intensity<'a>(
    _py: Python<'a>,
    unixtimes: Vec<f64>,
    request: &'a PyDict,
) -> PyResult<&'a PyDict> {
    let latitude: f64 = match request.get_item("lat") {
        Some(lat) => lat.extract()?,
        None => return Err(Error::IncompleteInputs("`lat` is required".into()).into()),
    };
    let longitude: f64 = match request.get_item("lon") {
        Some(lon) => lon.extract()?,
        None => return Err(Error::IncompleteInputs("`lon` is required".into()).into()),
    };
    let time_basis = match request.get_item("time_basis") {
        Some(basis) => basis.extract::<&str>()?.parse()?,
        None => TimeBasis::Utc,
    };
    let parallel_calcs = match request.get_item("parallel_calcs") {
        Some(parallel_calcs) => parallel_calcs.extract()?,
        None => false,
    };
    let timestamps = unixtimes
        .iter()
        .map(|u| utils::naive_datetime_from_unixtime(*u))
        .collect::<Result<Vec<_>>>()?;
    let results = _py.allow_threads(move || {
        irradiance::calculate_geometries(&timestamps, latitude, longitude, time_basis, parallel_calcs)
    });
    let intensity_vec: Vec<f64> = results.iter().map(|r| r.intensity).collect();
    let elevation_vec: Vec<f64> = results.iter().map(|r| r.elevation).collect();
    let air_mass_vec: Vec<f64> = results
        .iter()
        .map(|r| r.air_mass.unwrap_or(f64::NAN))
        .collect();
    let out = PyDict::new(_py);
    out.set_item("intensity", intensity_vec)?;
    out.set_item("elevation", elevation_vec)?;
    out.set_item("air_mass", air_mass_vec)?;
    Ok(out)
}

/// kWh/m² from parallel offset (s) and intensity (W/m²) columns.
#[pyfunction]
#[pyo3(name = "integrate")]
fn integrate_samples(offsets: Vec<u64>, intensities: Vec<f64>) -> PyResult<f64> {
    let samples = energy::zip_samples(&offsets, &intensities)?;
    Ok(energy::integrate(&samples)?)
}
