//! Seven-layer piecewise-polytropic equation of state: four fixed crust
//! layers followed by three core layers taken from a nuclear model.
//!
//! Construction goes through two stages, `build_k` then `build_piecewise`;
//! all quantities are in geometrized units (metres).

use log::{debug, trace};

use crate::units::{factor, Quantity, Unit, UnitSystem, C_CGS};

use super::{parameters, polytropic::Polytropic, Eos, EosError, Variable};

pub const LAYERS: usize = 7;
const CRUST: usize = 4;
/// Index of the first core layer.
pub const TRANSITION: usize = CRUST;

// SLy crust fit, k in cgs with lengths in metres.
const CRUST_GAMMAS: [f64; CRUST] = [1.58425, 1.28733, 0.62223, 1.35692];
const CRUST_KAPPAS: [f64; CRUST] = [6.80110e-9, 1.06186e-6, 5.32697e1, 3.99874e-8];

// Density (g/cm^3) where each layer starts. [TRANSITION] is the nominal
// crust/core transition; it is replaced by the density where the pressures of
// the two sides meet.
const NOMINAL_DENSITIES: [f64; LAYERS] = [
    1e3,
    2.44034e7,
    3.78358e11,
    2.62780e12,
    2.7e14,
    5.011872336272722e14, // 10^14.7
    1e15,
];

/// Result of locating the layer that owns a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerLookup {
    Found(usize),
    OutOfDomain,
}

/// Model parameters resolved and converted, before any polytropic constant is
/// known.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseBuilder {
    model: String,
    gammas: [f64; LAYERS],
    crust_kappas: [f64; CRUST],
    densities: [f64; LAYERS],
    transition_pressure: f64,
}

impl PiecewiseBuilder {
    pub fn new(model: &str) -> Result<Self, EosError> {
        let parameters = parameters::lookup(model)?;
        let mut gammas = [0.0f64; LAYERS];
        gammas[..CRUST].copy_from_slice(&CRUST_GAMMAS);
        gammas[CRUST..].copy_from_slice(&parameters.gammas);

        let density = factor(UnitSystem::Cgs, Quantity::Density, UnitSystem::Geom)?;
        let pressure = factor(UnitSystem::Cgs, Quantity::Pressure, UnitSystem::Geom)?;
        debug!("{model}: core indices {:?}", parameters.gammas);

        Ok(Self {
            model: model.to_string(),
            gammas,
            crust_kappas: CRUST_KAPPAS,
            densities: NOMINAL_DENSITIES.map(|d| d * density),
            transition_pressure: 10f64.powf(parameters.log_p1) * pressure,
        })
    }

    /// Converts the crust constants to geometrized units and solves the core
    /// constants from pressure continuity, starting from the model's pressure
    /// at the nominal transition density.
    pub fn build_k(self) -> Result<PiecewiseKappas, EosError> {
        let length = factor(UnitSystem::Cgs, Quantity::Length, Unit::Metre)?;
        let time = factor(UnitSystem::Cgs, Quantity::Time, UnitSystem::Geom)?;
        let mass = factor(UnitSystem::Cgs, Quantity::Mass, UnitSystem::Geom)?;

        let g = &self.gammas;
        let d = &self.densities;
        let mut kappas = [0.0f64; LAYERS];
        for (i, k) in self.crust_kappas.iter().enumerate() {
            kappas[i] = C_CGS.powi(2)
                * (k * length.powf(3.0 * g[i] - 1.0)
                    * time.powi(-2)
                    * mass.powf(1.0 - g[i]));
        }
        kappas[TRANSITION] = self.transition_pressure / d[TRANSITION].powf(g[TRANSITION]);
        for i in TRANSITION + 1..LAYERS {
            kappas[i] = kappas[i - 1] * d[i].powf(g[i - 1] - g[i]);
        }
        trace!("{}: polytropic constants {:?}", self.model, kappas);

        Ok(PiecewiseKappas {
            model: self.model,
            gammas: self.gammas,
            kappas,
            densities: self.densities,
        })
    }
}

/// Every polytropic constant known; layers not yet glued.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseKappas {
    model: String,
    gammas: [f64; LAYERS],
    kappas: [f64; LAYERS],
    densities: [f64; LAYERS],
}

impl PiecewiseKappas {
    pub fn kappas(&self) -> &[f64; LAYERS] {
        &self.kappas
    }

    pub fn gammas(&self) -> &[f64; LAYERS] {
        &self.gammas
    }

    /// Moves the crust/core transition to where both pressures agree and
    /// glues the energy density of each layer to the one above it. The
    /// outermost layer starts from vacuum.
    pub fn build_piecewise(self) -> Result<Piecewise, EosError> {
        let Self {
            model,
            gammas: g,
            kappas: k,
            mut densities,
        } = self;

        densities[TRANSITION] =
            (k[TRANSITION] / k[TRANSITION - 1]).powf(1.0 / (g[TRANSITION - 1] - g[TRANSITION]));
        densities[0] = 0.0;
        debug!("{model}: crust/core transition at {:e}", densities[TRANSITION]);

        let mut layers: Vec<Polytropic> = Vec::with_capacity(LAYERS);
        let mut pressures = [0.0f64; LAYERS];
        let mut energy_densities = [0.0f64; LAYERS];
        for i in 0..LAYERS {
            let rho = densities[i];
            let layer = Polytropic::new(k[i], g[i])?;
            let layer = match layers.last() {
                Some(prev) => layer.with_offset(prev.continuity_offset(k[i], g[i], rho)),
                None => layer,
            };
            pressures[i] = layer.pressure_from_density(rho);
            energy_densities[i] = layer.energy_density_from_density(rho);
            trace!(
                "{model}: layer {i} from rho = {rho:e}, p = {:e}, a = {:e}",
                pressures[i],
                layer.a()
            );
            layers.push(layer);
        }

        for i in 1..LAYERS {
            if !(densities[i] > densities[i - 1]) || !(pressures[i] > pressures[i - 1]) {
                return Err(EosError::NonMonotonic { model, layer: i });
            }
        }

        Ok(Piecewise {
            model,
            layers,
            densities,
            pressures,
            energy_densities,
        })
    }
}

/// The glued equation of state. Layer `i` covers densities from
/// `densities[i]` (inclusive) to `densities[i + 1]` (exclusive); the last
/// layer extends without bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Piecewise {
    model: String,
    layers: Vec<Polytropic>,
    densities: [f64; LAYERS],
    pressures: [f64; LAYERS],
    energy_densities: [f64; LAYERS],
}

impl Piecewise {
    pub fn new(model: &str) -> Result<Self, EosError> {
        PiecewiseBuilder::new(model)?.build_k()?.build_piecewise()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn layers(&self) -> &[Polytropic] {
        &self.layers
    }

    pub fn boundary_densities(&self) -> &[f64; LAYERS] {
        &self.densities
    }

    pub fn boundary_pressures(&self) -> &[f64; LAYERS] {
        &self.pressures
    }

    pub fn boundary_energy_densities(&self) -> &[f64; LAYERS] {
        &self.energy_densities
    }

    pub fn transition_density(&self) -> f64 {
        self.densities[TRANSITION]
    }

    /// Layer owning `value`, scanning from the surface inwards. Values at or
    /// above the last boundary belong to the innermost layer; negative values
    /// and NaN have no layer.
    pub fn find_layer(&self, value: f64, variable: Variable) -> LayerLookup {
        let bounds = match variable {
            Variable::Density => &self.densities,
            Variable::Pressure => &self.pressures,
        };
        if !(value >= bounds[0]) {
            return LayerLookup::OutOfDomain;
        }
        if value >= bounds[LAYERS - 1] {
            return LayerLookup::Found(LAYERS - 1);
        }
        bounds
            .windows(2)
            .position(|w| w[0] <= value && value < w[1])
            .map_or(LayerLookup::OutOfDomain, LayerLookup::Found)
    }

    fn layer(&self, value: f64, variable: Variable) -> Result<&Polytropic, EosError> {
        match self.find_layer(value, variable) {
            LayerLookup::Found(i) => Ok(&self.layers[i]),
            LayerLookup::OutOfDomain => Err(EosError::OutOfDomain { variable, value }),
        }
    }

    pub fn energy_density_from_density(&self, density: f64) -> Result<f64, EosError> {
        Ok(self
            .layer(density, Variable::Density)?
            .energy_density_from_density(density))
    }
}

impl Eos for Piecewise {
    fn density_from_pressure(&self, pressure: f64) -> Result<f64, EosError> {
        Ok(self
            .layer(pressure, Variable::Pressure)?
            .density_from_pressure(pressure))
    }

    fn pressure_from_density(&self, density: f64) -> Result<f64, EosError> {
        Ok(self
            .layer(density, Variable::Density)?
            .pressure_from_density(density))
    }

    fn energy_density_from_pressure(&self, pressure: f64) -> Result<f64, EosError> {
        Ok(self
            .layer(pressure, Variable::Pressure)?
            .energy_density_from_pressure(pressure))
    }
}
