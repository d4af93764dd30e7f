pub mod cubic_spline;
pub mod implicit;
pub mod parameters;
pub mod piecewise;
pub mod polytropic;

use thiserror::Error;

use crate::units::UnitError;

use self::cubic_spline::SplineError;

/// Which kind of value a layer lookup is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    Density,
    Pressure,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EosError {
    #[error("Unknown nuclear model `{0}`")]
    UnknownModel(String),
    #[error("Unit conversion failed")]
    Units(#[from] UnitError),
    #[error("Could not build interpolation")]
    Spline(#[from] SplineError),
    /// A polytrope needs `k > 0` and `gamma != 1`.
    #[error("Invalid polytrope with k = {k:e} and gamma = {gamma}")]
    InvalidPolytrope { k: f64, gamma: f64 },
    /// Layer boundaries must increase strictly from the surface inwards.
    #[error("Layer boundaries of model `{model}` are not increasing at layer {layer}")]
    NonMonotonic { model: String, layer: usize },
    #[error("{variable:?} {value:e} is outside the equation of state")]
    OutOfDomain { variable: Variable, value: f64 },
}

/// Conversions between pressure, density and energy density used by the
/// stellar-structure equations.
pub trait Eos {
    fn density_from_pressure(&self, pressure: f64) -> Result<f64, EosError>;
    fn pressure_from_density(&self, density: f64) -> Result<f64, EosError>;
    fn energy_density_from_pressure(&self, pressure: f64) -> Result<f64, EosError>;
}
