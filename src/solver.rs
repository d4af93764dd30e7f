pub mod explicit;
pub mod schemes;

use log::{debug, warn};
use nalgebra::Vector2;
use thiserror::Error;

use self::{
    explicit::explicit,
    schemes::{rk4, Scheme},
};

/// Fixed parameters of the outward integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Starting radius, kept off zero because the structure equations divide by r.
    pub initial_radius: f64,
    /// Radial step, in the length unit of the derivative function.
    pub step: f64,
    pub max_steps: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_radius: 1e-10,
            step: 10.0,
            max_steps: 1_000_000,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum IntegrationError {
    /// The surface (non-positive pressure) was not reached.
    #[error("Integration did not reach the surface after {steps} steps (r = {radius:e}, p = {pressure:e})")]
    NonConvergent {
        steps: usize,
        radius: f64,
        pressure: f64,
    },
    /// A step left the state with a NaN or infinite component.
    #[error("Integration produced a non-finite state after {steps} steps (r = {radius:e})")]
    NonFinite { steps: usize, radius: f64 },
    #[error("Invalid solver configuration: {0}")]
    InvalidConfig(&'static str),
}

/// One point of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub radius: f64,
    pub mass: f64,
    pub pressure: f64,
}

/// Radius, enclosed mass and pressure (or energy density) from the centre to
/// the first sample at or below zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    pub radius: Vec<f64>,
    pub mass: Vec<f64>,
    pub pressure: Vec<f64>,
}

impl Trajectory {
    fn with_capacity(n: usize) -> Self {
        Self {
            radius: Vec::with_capacity(n),
            mass: Vec::with_capacity(n),
            pressure: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, radius: f64, mass: f64, pressure: f64) {
        self.radius.push(radius);
        self.mass.push(mass);
        self.pressure.push(pressure);
    }

    pub fn len(&self) -> usize {
        self.radius.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radius.is_empty()
    }

    /// Number of integration steps taken.
    pub fn steps(&self) -> usize {
        self.len().saturating_sub(1)
    }

    pub fn sample(&self, i: usize) -> Option<Sample> {
        Some(Sample {
            radius: *self.radius.get(i)?,
            mass: *self.mass.get(i)?,
            pressure: *self.pressure.get(i)?,
        })
    }

    pub fn last(&self) -> Option<Sample> {
        self.sample(self.len().checked_sub(1)?)
    }

    /// The last positive sample and the terminal one. The surface lies between
    /// them; it is not refined further.
    pub fn surface(&self) -> Option<(Sample, Sample)> {
        let n = self.len();
        if n < 2 {
            return None;
        }
        Some((self.sample(n - 2)?, self.sample(n - 1)?))
    }
}

/// Integrates `fun(r, [m, p]) -> [dm/dr, dp/dr]` outward from the centre with
/// scheme `r` until `p <= 0`.
pub fn solve<const S: usize>(
    r: &Scheme<S>,
    fun: impl Fn(f64, Vector2<f64>) -> Vector2<f64>,
    central_value: f64,
    config: &SolverConfig,
) -> Result<Trajectory, IntegrationError> {
    if !(config.step > 0.0) {
        return Err(IntegrationError::InvalidConfig("step must be positive"));
    }

    let mut trajectory = Trajectory::with_capacity(1024.min(config.max_steps.saturating_add(1)));
    let mut radius = config.initial_radius;
    let mut vs = Vector2::new(0.0, central_value);
    trajectory.push(radius, vs[0], vs[1]);

    let mut steps = 0;
    while vs[1] > 0.0 {
        if steps == config.max_steps {
            warn!(
                "{} integration stopped at the cap of {} steps",
                r.name, config.max_steps
            );
            return Err(IntegrationError::NonConvergent {
                steps,
                radius,
                pressure: vs[1],
            });
        }
        vs += explicit(r, &fun, radius, config.step, vs);
        radius += config.step;
        steps += 1;
        if !vs.iter().all(|v| v.is_finite()) {
            warn!(
                "{} integration produced {:?} at r = {:e} after {} steps",
                r.name, vs, radius, steps
            );
            return Err(IntegrationError::NonFinite { steps, radius });
        }
        trajectory.push(radius, vs[0], vs[1]);
    }

    debug!(
        "{} reached the surface after {} steps at r = {:e}",
        r.name, steps, radius
    );
    Ok(trajectory)
}

/// Classical RK4 with the default configuration.
pub fn ode_solver(
    fun: impl Fn(f64, Vector2<f64>) -> Vector2<f64>,
    central_value: f64,
) -> Result<Trajectory, IntegrationError> {
    solve(&rk4(), fun, central_value, &SolverConfig::default())
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;
    use crate::eos::polytropic::Polytropic;

    #[test]
    fn stops_on_first_non_positive_pressure() {
        let traj = ode_solver(|_, _| Vector2::new(0.0, -1.0), 5.0).unwrap();
        assert_eq!(traj.steps(), 1);
        assert_eq!(traj.len(), 2);
        assert_relative_eq!(traj.pressure[1], -5.0, max_relative = 1e-12);
        assert_relative_eq!(traj.radius[1], 10.0 + 1e-10);
    }

    #[test]
    fn zero_is_already_the_surface() {
        let traj = ode_solver(|_, _| Vector2::new(0.0, -1.0), 0.0).unwrap();
        assert_eq!(traj.len(), 1);
        assert!(traj.surface().is_none());
        assert_eq!(traj.last().unwrap().pressure, 0.0);
    }

    #[test]
    fn surface_is_bracketed() {
        // dm/dr = 1, dp/dr = -1 from p = 95 with a step of 10
        let traj = ode_solver(|_, _| Vector2::new(1.0, -1.0), 95.0).unwrap();
        assert_eq!(traj.steps(), 10);
        let (inside, outside) = traj.surface().unwrap();
        assert!(inside.pressure > 0.0);
        assert!(outside.pressure <= 0.0);
        assert_relative_eq!(inside.pressure, 5.0, max_relative = 1e-12);
        assert_relative_eq!(outside.mass, 100.0, max_relative = 1e-12);
        assert_eq!(traj.mass.len(), traj.pressure.len());
    }

    #[test]
    fn non_decreasing_pressure_hits_the_cap() {
        let config = SolverConfig {
            max_steps: 50,
            ..Default::default()
        };
        let res = solve(&rk4(), |_, _| Vector2::new(1.0, 0.0), 1.0, &config);
        match res {
            Err(IntegrationError::NonConvergent { steps, pressure, .. }) => {
                assert_eq!(steps, 50);
                assert_eq!(pressure, 1.0);
            }
            other => panic!("expected a non-convergent integration, got {other:?}"),
        }
    }

    #[test]
    fn negative_pressure_in_a_stage_is_an_error() {
        // the last stages overshoot below zero and (p / k)^(1 / gamma) is NaN
        let eos = Polytropic::new(2.0 * PI * 1e6, 2.0).unwrap();
        let config = SolverConfig {
            step: 5.0,
            ..Default::default()
        };
        let res = solve(
            &rk4(),
            |r, y: Vector2<f64>| {
                let rho = eos.density_from_pressure(y[1]);
                Vector2::new(4.0 * PI * r * r * rho, -y[0] * rho / (r * r))
            },
            1e-12,
            &config,
        );
        match res {
            Err(IntegrationError::NonFinite { steps, radius }) => {
                assert!(steps > 1);
                assert!(radius.is_finite());
            }
            other => panic!("expected a non-finite state, got {other:?}"),
        }
    }

    #[test]
    fn rejects_a_non_positive_step() {
        let config = SolverConfig {
            step: 0.0,
            ..Default::default()
        };
        let res = solve(&rk4(), |_, _| Vector2::new(0.0, -1.0), 1.0, &config);
        assert!(matches!(res, Err(IntegrationError::InvalidConfig(_))));
    }
}
