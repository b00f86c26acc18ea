/// A simple statistics module with numpy/scipy-equivalent helpers: the
/// arithmetic mean and cubic-spline interpolation with extrapolation.
use crate::compare_floats::min_of_2;

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Natural cubic spline through the knots `(xs[i], ys[i])`.
///
/// Evaluation outside the knot range uses the first/last segment polynomial,
/// so boundary values are extrapolated rather than clamped or left undefined.
#[derive(Clone, Debug)]
pub(crate) struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    second_derivatives: Vec<f64>,
}

impl CubicSpline {
    /// Arguments:
    /// * `xs` - knot coordinates, strictly increasing
    /// * `ys` - knot values, one per coordinate
    pub(crate) fn new(xs: &[f64], ys: &[f64]) -> Self {
        debug_assert_eq!(xs.len(), ys.len());
        Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            second_derivatives: natural_second_derivatives(xs, ys),
        }
    }

    pub(crate) fn interpolate(&self, x: f64) -> f64 {
        let n = self.xs.len();
        match n {
            1 => self.ys[0],
            _ => {
                // last knot at or before x, clamped so out-of-range
                // evaluation reuses the boundary segment
                let segment = min_of_2(
                    self.xs.partition_point(|&knot| knot <= x).saturating_sub(1),
                    n - 2,
                );
                let h = self.xs[segment + 1] - self.xs[segment];
                let (m0, m1) = (
                    self.second_derivatives[segment],
                    self.second_derivatives[segment + 1],
                );
                let slope = (self.ys[segment + 1] - self.ys[segment]) / h;
                let b = slope - h * (2. * m0 + m1) / 6.;
                let c = m0 / 2.;
                let d = (m1 - m0) / (6. * h);
                let t = x - self.xs[segment];
                self.ys[segment] + b * t + c * t * t + d * t * t * t
            }
        }
    }
}

/// Second derivatives of the natural cubic spline (zero curvature at both
/// ends), solved with the Thomas algorithm.
fn natural_second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    if n < 3 {
        return vec![0.; n];
    }

    let h: Vec<f64> = xs.windows(2).map(|pair| pair[1] - pair[0]).collect();

    // tridiagonal system for the interior knots
    let mut diagonal = vec![0.; n];
    let mut rhs = vec![0.; n];
    for i in 1..n - 1 {
        diagonal[i] = 2. * (h[i - 1] + h[i]);
        rhs[i] = 6. * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
    }

    // forward elimination
    for i in 2..n - 1 {
        let factor = h[i - 1] / diagonal[i - 1];
        diagonal[i] -= factor * h[i - 1];
        rhs[i] -= factor * rhs[i - 1];
    }

    // back substitution; the natural boundary rows stay zero
    let mut second_derivatives = vec![0.; n];
    for i in (1..n - 1).rev() {
        second_derivatives[i] =
            (rhs[i] - h[i] * second_derivatives[i + 1]) / diagonal[i];
    }

    second_derivatives
}

/// Evaluate the spline through `(xs, ys)` at every coordinate in `x_new`.
pub(crate) fn cubic_spline_interp(x_new: &[f64], xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let spline = CubicSpline::new(xs, ys);
    x_new.iter().map(|&x| spline.interpolate(x)).collect()
}
