//! Closed-form positive root of the depressed quartic `x⁴ + p·x + q = 0`.
//!
//! For `q < 0` the polynomial is negative at the origin and strictly
//! increasing-convex for `x > 0`, so exactly one positive real root exists.
//! Ferrari's method reduces it to the resolvent cubic `m³ − q·m − p²/8 = 0`,
//! which has a single positive real root solved with Cardano's formula.

use crate::NumericsError;

const NEWTON_POLISH_STEPS: usize = 2;

/// Positive real root of `x⁴ + p·x + q = 0` for `q < 0`.
pub fn depressed_quartic_positive_root(p: f64, q: f64) -> Result<f64, NumericsError> {
    if !(p.is_finite() && q.is_finite()) || q >= 0.0 {
        return Err(NumericsError::NoPositiveRoot);
    }

    let root = if p == 0.0 {
        (-q).sqrt().sqrt()
    } else {
        let m = resolvent_root(p, q);
        let s = (2.0 * m).sqrt();
        if p < 0.0 {
            let disc = -2.0 * m - s * p / m;
            0.5 * (s + disc.max(0.0).sqrt())
        } else {
            let disc = -2.0 * m + s * p / m;
            0.5 * (-s + disc.max(0.0).sqrt())
        }
    };

    let polished = polish(root, p, q);
    if polished.is_finite() && polished > 0.0 {
        Ok(polished)
    } else {
        Err(NumericsError::NoPositiveRoot)
    }
}

/// Positive root of `m³ + P·m + Q = 0` with `P = −q > 0` and `Q = −p²/8 < 0`.
fn resolvent_root(p: f64, q: f64) -> f64 {
    let big_p = -q;
    let big_q = -p * p / 8.0;
    let disc = (0.5 * big_q).powi(2) + (big_p / 3.0).powi(3);
    let u = (-0.5 * big_q + disc.sqrt()).cbrt();
    let v = -big_p / (3.0 * u);
    // m = u + v rearranged as −Q / (u² − uv + v²) to avoid cancellation when p is small.
    -big_q / (u * u - u * v + v * v)
}

fn polish(mut x: f64, p: f64, q: f64) -> f64 {
    for _ in 0..NEWTON_POLISH_STEPS {
        let f = x.powi(4) + p * x + q;
        let df = 4.0 * x.powi(3) + p;
        if df.abs() < f64::EPSILON {
            break;
        }
        x -= f / df;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn residual(x: f64, p: f64, q: f64) -> f64 {
        x.powi(4) + p * x + q
    }

    #[test]
    fn pure_quartic_has_fourth_root() {
        let x = depressed_quartic_positive_root(0.0, -16.0).expect("root");
        assert_relative_eq!(x, 2.0, max_relative = 1e-12);
    }

    #[test]
    fn solves_with_negative_linear_term() {
        // (x − 2)(x³ + 2x² + 4x + 5) = x⁴ − 3x − 10
        let x = depressed_quartic_positive_root(-3.0, -10.0).expect("root");
        assert_relative_eq!(x, 2.0, max_relative = 1e-10);
    }

    #[test]
    fn solves_with_positive_linear_term() {
        let (p, q) = (7.5, -40.0);
        let x = depressed_quartic_positive_root(p, q).expect("root");
        assert!(x > 0.0);
        assert!(residual(x, p, q).abs() < 1e-9 * 40.0);
    }

    #[test]
    fn small_linear_term_stays_accurate() {
        let (p, q) = (-1.0e-9, -81.0);
        let x = depressed_quartic_positive_root(p, q).expect("root");
        assert_relative_eq!(x, 3.0, max_relative = 1e-9);
    }

    #[test]
    fn non_negative_constant_has_no_guaranteed_root() {
        assert_eq!(
            depressed_quartic_positive_root(-1.0, 2.0),
            Err(NumericsError::NoPositiveRoot)
        );
    }
}
