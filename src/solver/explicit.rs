use nalgebra::Vector2;

use super::schemes::{rk4, Scheme};

/// Increment of one explicit step of scheme `r` from `(t, vs)` with step `dt`.
/// The caller adds it to its running state.
pub fn explicit<const S: usize>(
    r: &Scheme<S>,
    fun: impl Fn(f64, Vector2<f64>) -> Vector2<f64>,
    t: f64,
    dt: f64,
    vs: Vector2<f64>,
) -> Vector2<f64> {
    let a = &r.aij;
    let mut k = [Vector2::zeros(); S];
    let mut vdtk = vs;
    let mut ct = t;
    let mut incr = Vector2::zeros();
    for s in 0..S {
        k[s] = fun(ct, vdtk);
        incr = Vector2::zeros();
        for s1 in 0..=s {
            incr += a[s][s1] * k[s1];
        }
        incr *= dt;
        vdtk = vs + incr;
        let c: f64 = a[s].iter().sum();
        ct = t + c * dt;
    }
    incr
}

/// One classical fourth-order Runge-Kutta step for the pair `(u, v)`.
/// Returns `(du, dv)`.
pub fn runge_kutta(
    fun: impl Fn(f64, Vector2<f64>) -> Vector2<f64>,
    t: f64,
    dt: f64,
    u: f64,
    v: f64,
) -> (f64, f64) {
    let d = explicit(&rk4(), fun, t, dt, Vector2::new(u, v));
    (d[0], d[1])
}
