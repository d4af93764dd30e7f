//! Piecewise-polytropic fits of nuclear equations of state.
//!
//! Each model gives the log10 of the pressure (dyn/cm^2) at the nominal
//! crust/core transition density and the adiabatic indices of the three core
//! layers.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::EosError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParameters {
    pub log_p1: f64,
    pub gammas: [f64; 3],
}

const fn model(log_p1: f64, g1: f64, g2: f64, g3: f64) -> ModelParameters {
    ModelParameters {
        log_p1,
        gammas: [g1, g2, g3],
    }
}

pub static MODELS: [(&str, ModelParameters); 34] = [
    // neutrons, protons, electrons and muons
    ("PAL6", model(34.380, 2.227, 2.189, 2.159)),
    ("SLy", model(34.384, 3.005, 2.988, 2.851)),
    ("APR1", model(33.943, 2.442, 3.256, 2.908)),
    ("APR2", model(34.126, 2.643, 3.014, 2.945)),
    ("APR3", model(34.392, 3.166, 3.573, 3.281)),
    ("APR4", model(34.269, 2.830, 3.445, 3.348)),
    ("FPS", model(34.283, 2.985, 2.863, 2.600)),
    ("WFF1", model(34.031, 2.519, 3.791, 3.660)),
    ("WFF2", model(34.233, 2.888, 3.475, 3.517)),
    ("WFF3", model(34.283, 3.329, 2.952, 2.589)),
    ("BBB2", model(34.331, 3.418, 2.835, 2.832)),
    ("BPAL12", model(34.358, 2.209, 2.201, 2.176)),
    ("ENG", model(34.437, 3.514, 3.130, 3.168)),
    ("MPA1", model(34.495, 3.446, 3.572, 2.887)),
    ("MS1", model(34.858, 3.224, 3.033, 1.325)),
    ("MS2", model(34.605, 2.447, 2.184, 1.855)),
    ("MS1b", model(34.855, 3.456, 3.011, 1.425)),
    // mesons
    ("PS", model(34.671, 2.216, 1.640, 2.365)),
    ("GS1a", model(34.504, 2.350, 1.267, 2.421)),
    ("GS2a", model(34.642, 2.519, 1.571, 2.314)),
    // hyperons
    ("BGN1H1", model(34.623, 3.258, 1.472, 2.464)),
    ("GNH3", model(34.648, 2.664, 2.194, 2.304)),
    ("H1", model(34.564, 2.595, 1.845, 1.897)),
    ("H2", model(34.617, 2.775, 1.855, 1.858)),
    ("H3", model(34.646, 2.787, 1.951, 1.901)),
    ("H4", model(34.669, 2.909, 2.246, 2.144)),
    ("H5", model(34.609, 2.793, 1.974, 1.915)),
    ("H6a", model(34.593, 2.637, 2.121, 2.064)),
    ("H7", model(34.559, 2.621, 2.048, 2.006)),
    ("PCL2", model(34.507, 2.554, 1.880, 1.977)),
    // quarks
    ("ALF1", model(34.055, 2.013, 3.389, 2.033)),
    ("ALF2", model(34.616, 4.070, 2.411, 1.890)),
    ("ALF3", model(34.283, 2.883, 2.653, 1.952)),
    ("ALF4", model(34.314, 3.009, 3.438, 1.803)),
];

lazy_static! {
    static ref BY_NAME: HashMap<&'static str, ModelParameters> = MODELS.iter().copied().collect();
}

pub fn lookup(name: &str) -> Result<ModelParameters, EosError> {
    BY_NAME
        .get(name)
        .copied()
        .ok_or_else(|| EosError::UnknownModel(name.to_string()))
}

/// Model names in table order.
pub fn names() -> impl Iterator<Item = &'static str> {
    MODELS.iter().map(|(name, _)| *name)
}
