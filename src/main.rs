use clap::{Parser, Subcommand};
use log::info;
use ns_eos::{
    eos::{implicit::Implicit, parameters, piecewise::Piecewise, polytropic::Polytropic, Eos},
    solver::{schemes::rk4, solve, SolverConfig},
    units::{factor, Quantity, Unit, UnitSystem},
};
use nalgebra::Vector2;
use std::{error::Error, f64::consts::PI};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Unit system of the printed values: Geom, Cgs or Si
    #[arg(short, long, default_value_t = UnitSystem::Cgs, value_parser = parse_units)]
    units: UnitSystem,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the tabulated nuclear models
    Models,
    /// Boundaries of the layers of a piecewise equation of state
    Layers {
        #[arg(short, long, default_value = "PAL6")]
        model: String,
    },
    /// Sample the equation of state over a log-spaced density range in g/cm^3;
    /// without a model the Fermi gas is used
    Curve {
        #[arg(short, long)]
        model: Option<String>,
        #[arg(long, default_value_t = 1e6)]
        from: f64,
        #[arg(long, default_value_t = 3e15)]
        to: f64,
        #[arg(short, long, default_value_t = 20)]
        points: usize,
    },
    /// Newtonian structure of a single polytrope, in geometrized units
    Polytrope {
        #[arg(short, long, default_value_t = 2.0)]
        gamma: f64,
        #[arg(short, long, default_value_t = 6.366e7)]
        k: f64,
        #[arg(long, default_value_t = 1e-9)]
        central_density: f64,
        #[arg(long, default_value_t = 10.0)]
        step: f64,
        #[arg(long, default_value_t = 1_000_000)]
        max_steps: usize,
    },
}

fn parse_units(s: &str) -> Result<UnitSystem, String> {
    s.parse()
        .map_err(|_| format!("unknown unit system '{s}', expected Geom, Cgs or Si"))
}

fn models() {
    println!("# model log10(p1) gamma1 gamma2 gamma3");
    for name in parameters::names() {
        if let Ok(m) = parameters::lookup(name) {
            println!(
                "{} {} {} {} {}",
                name, m.log_p1, m.gammas[0], m.gammas[1], m.gammas[2]
            );
        }
    }
}

fn layers(model: &str, units: UnitSystem) -> Result<(), Box<dyn Error>> {
    let eos = Piecewise::new(model)?;
    let rho_u = factor(UnitSystem::Geom, Quantity::Density, units)?;
    let p_u = factor(UnitSystem::Geom, Quantity::Pressure, units)?;
    let e_u = factor(UnitSystem::Geom, Quantity::EnergyDensity, units)?;

    println!("# model {} units {}", eos.model(), units);
    println!("# layer gamma k rho p e a");
    for (i, layer) in eos.layers().iter().enumerate() {
        println!(
            "{} {} {:e} {:e} {:e} {:e} {:e}",
            i,
            layer.gamma(),
            layer.k(),
            eos.boundary_densities()[i] * rho_u,
            eos.boundary_pressures()[i] * p_u,
            eos.boundary_energy_densities()[i] * e_u,
            layer.a()
        );
    }
    Ok(())
}

fn curve(
    model: Option<String>,
    from: f64,
    to: f64,
    points: usize,
    units: UnitSystem,
) -> Result<(), Box<dyn Error>> {
    if !(from > 0.0 && to > from) || points < 2 {
        return Err(format!("invalid range {from:e}..{to:e} with {points} points").into());
    }
    let (name, eos): (String, Box<dyn Eos>) = match model {
        Some(model) => (model.clone(), Box::new(Piecewise::new(&model)?)),
        None => ("FermiGas".to_string(), Box::new(Implicit::new()?)),
    };
    let to_geom = factor(UnitSystem::Cgs, Quantity::Density, UnitSystem::Geom)?;
    let rho_u = factor(UnitSystem::Geom, Quantity::Density, units)?;
    let p_u = factor(UnitSystem::Geom, Quantity::Pressure, units)?;
    let e_u = factor(UnitSystem::Geom, Quantity::EnergyDensity, units)?;

    println!("# model {} units {}", name, units);
    println!("# rho p e");
    let ratio = (to / from).ln() / (points - 1) as f64;
    for i in 0..points {
        let rho = from * (ratio * i as f64).exp() * to_geom;
        let p = eos.pressure_from_density(rho)?;
        let e = eos.energy_density_from_pressure(p)?;
        println!("{:e} {:e} {:e}", rho * rho_u, p * p_u, e * e_u);
    }
    Ok(())
}

fn polytrope(
    gamma: f64,
    k: f64,
    central_density: f64,
    config: SolverConfig,
) -> Result<(), Box<dyn Error>> {
    let eos = Polytropic::new(k, gamma)?;
    let structure = |r: f64, y: Vector2<f64>| {
        let rho = eos.density_from_pressure(y[1].max(0.0));
        Vector2::new(4.0 * PI * r * r * rho, -y[0] * rho / (r * r))
    };
    info!("integrating a gamma = {gamma} polytrope with step {}", config.step);
    let traj = solve(&rk4(), structure, eos.pressure_from_density(central_density), &config)?;
    let (_, surface) = traj
        .surface()
        .ok_or_else(|| format!("no star for central density {central_density:e}"))?;

    println!("# steps {}", traj.steps());
    println!(
        "radius {} km",
        surface.radius * factor(UnitSystem::Geom, Quantity::Length, Unit::Kilometre)?
    );
    println!(
        "mass {} Msun",
        surface.mass * factor(UnitSystem::Geom, Quantity::Mass, Unit::SolarMass)?
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Models => models(),
        Command::Layers { model } => layers(&model, cli.units)?,
        Command::Curve {
            model,
            from,
            to,
            points,
        } => curve(model, from, to, points, cli.units)?,
        Command::Polytrope {
            gamma,
            k,
            central_density,
            step,
            max_steps,
        } => {
            let config = SolverConfig {
                step,
                max_steps,
                ..Default::default()
            };
            polytrope(gamma, k, central_density, config)?
        }
    }
    Ok(())
}
