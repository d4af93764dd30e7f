//! Conversion factors between geometrized, cgs and SI units.
//!
//! Geometrized units set `c = G = 1` and keep the metre as the base length, so
//! time, mass and energy are all measured in metres.

use thiserror::Error;

pub const C_SI: f64 = 299792458.0; // m/s
pub const C_CGS: f64 = C_SI * 100.0; // cm/s
pub const G_SI: f64 = 6.6743e-11; // m^3/(kg*s^2)
pub const G_CGS: f64 = G_SI * 1000.0; // cm^3/(g*s^2)
pub const MSUN_SI: f64 = 2.0e30; // kg
pub const MSUN_CGS: f64 = MSUN_SI * 1000.0; // g
pub const HBAR_SI: f64 = 1.054571817e-34; // J*s
pub const M_N_SI: f64 = 1.67492749804e-27; // kg

const C2_OVER_G: f64 = C_SI * C_SI / G_SI;
const C4_OVER_G: f64 = C_SI * C_SI * C_SI * C_SI / G_SI;

custom_derive! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash,
             EnumDisplay, EnumFromStr, IterVariants(UnitSystemVariants))]
    pub enum UnitSystem {
        Geom,
        Cgs,
        Si,
    }
}

custom_derive! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash,
             EnumDisplay, EnumFromStr, IterVariants(QuantityVariants))]
    pub enum Quantity {
        Length,
        Time,
        Mass,
        Energy,
        EnergyDensity,
        Density,
        Pressure,
    }
}

/// Target of a conversion: either a whole unit system or a named unit of one
/// quantity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    System(UnitSystem),
    Centimetre,
    Metre,
    Kilometre,
    Gram,
    Kilogram,
    SolarMass,
}

impl From<UnitSystem> for Unit {
    fn from(system: UnitSystem) -> Self {
        Unit::System(system)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum UnitError {
    #[error("No conversion from {0} {1} to {2:?}")]
    Undefined(UnitSystem, Quantity, Unit),
}

// Size of one unit of each quantity class, expressed in SI.
// Rows follow `UnitSystem`, columns follow `Quantity`.
const SI_SCALE: [[f64; 7]; 3] = [
    // geom
    [1.0, 1.0 / C_SI, C2_OVER_G, C4_OVER_G, C4_OVER_G, C2_OVER_G, C4_OVER_G],
    // cgs
    [1e-2, 1.0, 1e-3, 1e-7, 0.1, 1e3, 0.1],
    // si
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
];

fn si_scale(system: UnitSystem, quantity: Quantity) -> f64 {
    let row = match system {
        UnitSystem::Geom => 0,
        UnitSystem::Cgs => 1,
        UnitSystem::Si => 2,
    };
    let col = match quantity {
        Quantity::Length => 0,
        Quantity::Time => 1,
        Quantity::Mass => 2,
        Quantity::Energy => 3,
        Quantity::EnergyDensity => 4,
        Quantity::Density => 5,
        Quantity::Pressure => 6,
    };
    SI_SCALE[row][col]
}

fn named_scale(unit: Unit, quantity: Quantity) -> Option<f64> {
    match (unit, quantity) {
        (Unit::System(system), _) => Some(si_scale(system, quantity)),
        (Unit::Centimetre, Quantity::Length) => Some(1e-2),
        (Unit::Metre, Quantity::Length) => Some(1.0),
        (Unit::Kilometre, Quantity::Length) => Some(1e3),
        (Unit::Gram, Quantity::Mass) => Some(1e-3),
        (Unit::Kilogram, Quantity::Mass) => Some(1.0),
        (Unit::SolarMass, Quantity::Mass) => Some(MSUN_SI),
        _ => None,
    }
}

/// Multiplicative factor taking a `quantity` expressed in `from` to `to`:
/// `value_in_target = value_in_source * factor(from, quantity, to)`.
pub fn factor(
    from: UnitSystem,
    quantity: Quantity,
    to: impl Into<Unit>,
) -> Result<f64, UnitError> {
    let to = to.into();
    let target = named_scale(to, quantity).ok_or(UnitError::Undefined(from, quantity, to))?;
    Ok(si_scale(from, quantity) / target)
}

/// Shorthand for `value * factor(from, quantity, to)`.
pub fn convert(
    value: f64,
    from: UnitSystem,
    quantity: Quantity,
    to: impl Into<Unit>,
) -> Result<f64, UnitError> {
    Ok(value * factor(from, quantity, to)?)
}
