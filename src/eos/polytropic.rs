use super::{Eos, EosError};

/// `p = k rho^gamma` with energy density `e = (1 + a) rho + n k rho^gamma`,
/// where `n = 1 / (gamma - 1)`.
///
/// `a` is zero for a lone polytrope; inside a piecewise equation of state it
/// carries the offset that keeps the energy density continuous.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polytropic {
    k: f64,
    gamma: f64,
    n: f64,
    a: f64,
}

impl Polytropic {
    pub fn new(k: f64, gamma: f64) -> Result<Self, EosError> {
        if !(k > 0.0) || gamma == 1.0 || !gamma.is_finite() || !k.is_finite() {
            return Err(EosError::InvalidPolytrope { k, gamma });
        }
        Ok(Self {
            k,
            gamma,
            n: 1.0 / (gamma - 1.0),
            a: 0.0,
        })
    }

    pub fn with_offset(self, a: f64) -> Self {
        Self { a, ..self }
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn n(&self) -> f64 {
        self.n
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn density_from_pressure(&self, pressure: f64) -> f64 {
        (pressure / self.k).powf(1.0 / self.gamma)
    }

    pub fn pressure_from_density(&self, density: f64) -> f64 {
        self.k * density.powf(self.gamma)
    }

    pub fn energy_density_from_density(&self, density: f64) -> f64 {
        (1.0 + self.a) * density + self.n * self.k * density.powf(self.gamma)
    }

    pub fn energy_density_from_pressure(&self, pressure: f64) -> f64 {
        self.energy_density_from_density(self.density_from_pressure(pressure))
    }

    /// Offset `a` of `next` that makes its energy density equal to this
    /// segment's at `density`.
    pub fn continuity_offset(&self, next_k: f64, next_gamma: f64, density: f64) -> f64 {
        self.a + self.k / (self.gamma - 1.0) * density.powf(self.gamma - 1.0)
            - next_k / (next_gamma - 1.0) * density.powf(next_gamma - 1.0)
    }
}

impl Eos for Polytropic {
    fn density_from_pressure(&self, pressure: f64) -> Result<f64, EosError> {
        Ok(Polytropic::density_from_pressure(self, pressure))
    }

    fn pressure_from_density(&self, density: f64) -> Result<f64, EosError> {
        Ok(Polytropic::pressure_from_density(self, density))
    }

    fn energy_density_from_pressure(&self, pressure: f64) -> Result<f64, EosError> {
        Ok(Polytropic::energy_density_from_pressure(self, pressure))
    }
}
