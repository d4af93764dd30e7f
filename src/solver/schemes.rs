/// Explicit Runge-Kutta table.
///
/// Row `s` of `aij` gives the weights of the stages `0..=s` used to build the
/// state at which stage `s + 1` is evaluated; the last row holds the final
/// weights of the step. The node of stage `s + 1` is the sum of row `s`.
#[derive(Debug, Clone, Copy)]
pub struct Scheme<const S: usize> {
    pub aij: [[f64; S]; S],
    pub name: &'static str,
}

impl<const S: usize> Scheme<S> {
    pub fn stages(&self) -> usize {
        S
    }
}

pub fn euler() -> Scheme<1> {
    Scheme {
        aij: [[1.0]],
        name: "Euler",
    }
}

pub fn heun() -> Scheme<2> {
    Scheme {
        aij: [[1.0, 0.0], [0.5, 0.5]],
        name: "Heun",
    }
}

pub fn rk4() -> Scheme<4> {
    Scheme {
        aij: [
            [0.5, 0.0, 0.0, 0.0],
            [0.0, 0.5, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [1.0 / 6.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 6.0],
        ],
        name: "RK4",
    }
}
