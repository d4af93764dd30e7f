use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum SplineError {
    #[error("A cubic spline needs at least 3 points, got {0}")]
    TooFewPoints(usize),
    #[error("Length mismatch, {0} abscissae for {1} values")]
    LengthMismatch(usize, usize),
    /// The abscissae must be strictly increasing; the parameter is the first
    /// offending index.
    #[error("Abscissae are not strictly increasing at index {0}")]
    NotIncreasing(usize),
}

pub fn cubic(x: f64, p: &[f64; 4]) -> f64 {
    p[0] + x * (p[1] + x * (p[2] + x * p[3]))
}

pub fn cubic_diff(x: f64, p: &[f64; 4], a: f64) -> f64 {
    (p[1] + x * (2.0 * p[2] + x * 3.0 * p[3])) / a
}

/// Thomas algorithm for a tridiagonal system. Row `i` reads
/// `sub[i] x[i-1] + diag[i] x[i] + sup[i] x[i+1] = rhs[i]`; `sub[0]` and
/// `sup[n-1]` are ignored. No pivoting, so the system should be diagonally
/// dominant.
pub fn solve_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> Vec<f64> {
    let n = diag.len();
    if n == 0 {
        return Vec::new();
    }
    let mut cp = vec![0.0f64; n];
    let mut dp = vec![0.0f64; n];
    cp[0] = if n > 1 { sup[0] / diag[0] } else { 0.0 };
    dp[0] = rhs[0] / diag[0];
    for i in 1..n {
        let m = diag[i] - sub[i] * cp[i - 1];
        if i < n - 1 {
            cp[i] = sup[i] / m;
        }
        dp[i] = (rhs[i] - sub[i] * dp[i - 1]) / m;
    }

    let mut x = dp;
    for i in (0..n - 1).rev() {
        x[i] -= cp[i] * x[i + 1];
    }
    x
}

/// Natural cubic spline: second derivative zero at both ends.
///
/// Interval `i` is stored as a polynomial in `z = (x - xs[i]) / h[i]`, so
/// `z` runs over `[0, 1]` inside the interval.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    xs: Vec<f64>,
    widths: Vec<f64>,
    pols: Vec<[f64; 4]>,
}

impl CubicSpline {
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self, SplineError> {
        let n = xs.len();
        if n != ys.len() {
            return Err(SplineError::LengthMismatch(n, ys.len()));
        }
        if n < 3 {
            return Err(SplineError::TooFewPoints(n));
        }
        if let Some(i) = (1..n).find(|&i| !(xs[i] > xs[i - 1])) {
            return Err(SplineError::NotIncreasing(i));
        }

        let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();

        // second derivatives, zero at both ends
        let mut sub = vec![0.0f64; n];
        let diag = vec![2.0f64; n];
        let mut sup = vec![0.0f64; n];
        let mut rhs = vec![0.0f64; n];
        for i in 1..n - 1 {
            let hh = h[i - 1] + h[i];
            sub[i] = h[i - 1] / hh;
            sup[i] = h[i] / hh;
            rhs[i] = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]) / hh;
        }
        let m = solve_tridiagonal(&sub, &diag, &sup, &rhs);

        let pols = (0..n - 1)
            .map(|i| {
                let h2 = h[i] * h[i];
                [
                    ys[i],
                    ys[i + 1] - ys[i] - (m[i + 1] + 2.0 * m[i]) * h2 / 6.0,
                    m[i] * h2 / 2.0,
                    (m[i + 1] - m[i]) * h2 / 6.0,
                ]
            })
            .collect();

        Ok(Self {
            xs: xs.to_vec(),
            widths: h,
            pols,
        })
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn knots(&self) -> &[f64] {
        &self.xs
    }

    // A knot belongs to the interval on its right; outside the sample the
    // first or last polynomial is extended.
    fn interval(&self, x: f64) -> usize {
        let i = self.xs.partition_point(|&k| k <= x);
        i.saturating_sub(1).min(self.pols.len() - 1)
    }

    pub fn eval(&self, x: f64) -> f64 {
        let i = self.interval(x);
        cubic((x - self.xs[i]) / self.widths[i], &self.pols[i])
    }

    pub fn derivative(&self, x: f64) -> f64 {
        let i = self.interval(x);
        cubic_diff((x - self.xs[i]) / self.widths[i], &self.pols[i], self.widths[i])
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| a + (b - a) * i as f64 / (n - 1) as f64)
            .collect()
    }

    #[test]
    fn tridiagonal_matches_direct_solution() {
        // [2 1 0; 1 3 1; 0 1 2] x = [4 10 8] -> x = [1 2 3]
        let x = solve_tridiagonal(
            &[0.0, 1.0, 1.0],
            &[2.0, 3.0, 2.0],
            &[1.0, 1.0, 0.0],
            &[4.0, 10.0, 8.0],
        );
        for (xi, ei) in x.iter().zip([1.0, 2.0, 3.0]) {
            assert_relative_eq!(*xi, ei, max_relative = 1e-14);
        }
        assert!(solve_tridiagonal(&[], &[], &[], &[]).is_empty());
    }

    #[test]
    fn exact_at_knots() {
        let xs = [0.0, 0.3, 1.1, 1.5, 2.8, 4.0];
        let ys = xs.map(|x: f64| x.sin() + 0.1 * x * x);
        let s = CubicSpline::new(&xs, &ys).unwrap();
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_abs_diff_eq!(s.eval(*x), *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn reproduces_a_cubic_away_from_the_ends() {
        let xs = linspace(-2.0, 2.0, 41);
        let ys: Vec<f64> = xs.iter().map(|x| x.powi(3)).collect();
        let s = CubicSpline::new(&xs, &ys).unwrap();
        for x in [-0.55, -0.3, 0.05, 0.25, 0.71] {
            assert_abs_diff_eq!(s.eval(x), x.powi(3), epsilon = 1e-9);
            assert_abs_diff_eq!(s.derivative(x), 3.0 * x * x, epsilon = 1e-7);
        }
    }

    #[test]
    fn straight_lines_extrapolate_exactly() {
        let xs = linspace(0.0, 1.0, 5);
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x + 2.0).collect();
        let s = CubicSpline::new(&xs, &ys).unwrap();
        for x in [-1.0, 0.1, 0.5, 1.0, 7.0] {
            assert_relative_eq!(s.eval(x), 3.0 * x + 2.0, max_relative = 1e-12);
            assert_relative_eq!(s.derivative(x), 3.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn knots_select_the_following_interval() {
        let s = CubicSpline::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 0.0, 1.0]).unwrap();
        assert_eq!(s.interval(1.0), 1);
        assert_eq!(s.interval(0.999), 0);
        assert_eq!(s.interval(-4.0), 0);
        // the last knot and beyond stay on the last polynomial
        assert_eq!(s.interval(3.0), 2);
        assert_eq!(s.interval(10.0), 2);
        assert_abs_diff_eq!(s.eval(3.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn keeps_its_knots() {
        let xs = [0.0, 0.5, 2.0, 2.5];
        let s = CubicSpline::new(&xs, &[1.0, 0.0, 1.0, 0.0]).unwrap();
        assert_eq!(s.len(), 4);
        assert!(!s.is_empty());
        assert_eq!(s.knots(), &xs[..]);
    }

    #[test]
    fn rejects_bad_samples() {
        assert_eq!(
            CubicSpline::new(&[0.0, 1.0], &[0.0, 1.0]),
            Err(SplineError::TooFewPoints(2))
        );
        assert_eq!(
            CubicSpline::new(&[0.0, 1.0, 2.0], &[0.0, 1.0]),
            Err(SplineError::LengthMismatch(3, 2))
        );
        assert_eq!(
            CubicSpline::new(&[0.0, 1.0, 1.0, 2.0], &[0.0; 4]),
            Err(SplineError::NotIncreasing(2))
        );
        assert_eq!(
            CubicSpline::new(&[0.0, f64::NAN, 2.0], &[0.0; 3]),
            Err(SplineError::NotIncreasing(1))
        );
    }
}
