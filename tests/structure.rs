use std::f64::consts::PI;

use approx::assert_relative_eq;
use nalgebra::Vector2;
use ns_eos::{
    eos::{
        piecewise::{Piecewise, PiecewiseBuilder, LAYERS, TRANSITION},
        polytropic::Polytropic,
        Eos,
    },
    solver::{ode_solver, schemes::rk4, solve, SolverConfig},
};

#[test]
fn pal6_end_to_end() {
    let eos = PiecewiseBuilder::new("PAL6")
        .unwrap()
        .build_k()
        .unwrap()
        .build_piecewise()
        .unwrap();
    assert_eq!(eos.layers().len(), LAYERS);

    let densities = eos.boundary_densities();
    let pressures = eos.boundary_pressures();
    for i in 1..LAYERS {
        assert!(densities[i] > densities[i - 1]);
        assert!(pressures[i] > pressures[i - 1]);
    }

    let rho = eos.transition_density();
    let below = eos.pressure_from_density(rho * (1.0 - 1e-6)).unwrap();
    let above = eos.pressure_from_density(rho * (1.0 + 1e-6)).unwrap();
    assert!(below < above);
    assert_relative_eq!(below, above, max_relative = 1e-5);
    assert_eq!(eos, Piecewise::new("PAL6").unwrap());
}

#[test]
fn crust_core_boundary_is_where_pressures_meet() {
    let eos = Piecewise::new("SLy").unwrap();
    let crust = eos.layers()[TRANSITION - 1];
    let core = eos.layers()[TRANSITION];
    let rho = eos.transition_density();
    assert_relative_eq!(
        crust.pressure_from_density(rho),
        core.pressure_from_density(rho),
        max_relative = 1e-12
    );
}

// dm/dr = 4 pi r^2 rho, dp/dr = -m rho / r^2 with G = 1
fn newtonian<'a>(eos: &'a impl Eos) -> impl Fn(f64, Vector2<f64>) -> Vector2<f64> + 'a {
    move |r, y| {
        let rho = eos.density_from_pressure(y[1].max(0.0)).unwrap();
        Vector2::new(4.0 * PI * r * r * rho, -y[0] * rho / (r * r))
    }
}

#[test]
fn n1_polytrope_radius_and_mass() {
    // for gamma = 2 the radius is pi sqrt(k / 2 pi), independent of the centre
    let radius = 1e4;
    let k = 2.0 * PI * (radius / PI).powi(2);
    let eos = Polytropic::new(k, 2.0).unwrap();
    let rho_c = 1e-9;

    let traj = ode_solver(newtonian(&eos), eos.pressure_from_density(rho_c)).unwrap();
    let (inside, outside) = traj.surface().unwrap();
    assert!(inside.pressure > 0.0 && outside.pressure <= 0.0);
    assert!((outside.radius - radius).abs() <= 2.0 * SolverConfig::default().step);
    assert_relative_eq!(outside.mass, 4.0 / PI * rho_c * radius.powi(3), max_relative = 1e-4);
}

#[test]
fn mass_grows_outwards() {
    let eos = Polytropic::new(2.0 * PI * 1e6, 2.0).unwrap();
    let config = SolverConfig {
        step: 5.0,
        ..Default::default()
    };
    let traj = solve(&rk4(), newtonian(&eos), 1e-12, &config).unwrap();
    assert!(traj.mass.windows(2).all(|w| w[1] >= w[0]));
    assert!(traj.radius.windows(2).all(|w| w[1] > w[0]));
    assert!(traj.pressure[..traj.len() - 1].iter().all(|&p| p > 0.0));
}
