//! Quadratic least-squares fitting via the normal equations.

use nalgebra::{Matrix3, Vector3};

use crate::NumericsError;

/// `y ≈ c0 + c1·x + c2·x²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticFit {
    pub c0: f64,
    pub c1: f64,
    pub c2: f64,
}

impl QuadraticFit {
    pub fn eval(&self, x: f64) -> f64 {
        self.c0 + self.c1 * x + self.c2 * x * x
    }

    /// Root-mean-square residual of the fit over the given samples.
    pub fn rms_residual(&self, xs: &[f64], ys: &[f64]) -> f64 {
        let n = xs.len().min(ys.len());
        if n == 0 {
            return 0.0;
        }
        let sum: f64 = xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| (self.eval(x) - y).powi(2))
            .sum();
        (sum / n as f64).sqrt()
    }
}

/// Fit a quadratic through `(xs[i], ys[i])` in the least-squares sense.
pub fn fit_quadratic(xs: &[f64], ys: &[f64]) -> Result<QuadraticFit, NumericsError> {
    let given = xs.len().min(ys.len());
    if given < 3 {
        return Err(NumericsError::TooFewSamples { required: 3, given });
    }

    let mut normal = Matrix3::<f64>::zeros();
    let mut rhs = Vector3::<f64>::zeros();
    for (&x, &y) in xs.iter().zip(ys) {
        let basis = Vector3::new(1.0, x, x * x);
        normal += basis * basis.transpose();
        rhs += basis * y;
    }

    let coeffs = normal.lu().solve(&rhs).ok_or(NumericsError::SingularSystem)?;
    if coeffs.iter().any(|c| !c.is_finite()) {
        return Err(NumericsError::SingularSystem);
    }
    Ok(QuadraticFit {
        c0: coeffs[0],
        c1: coeffs[1],
        c2: coeffs[2],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn recovers_exact_quadratic() {
        let xs: Vec<f64> = (0..10).map(|i| 0.5 + i as f64 * 5.5).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 60.0 - 0.6 * x - 0.008 * x * x).collect();
        let fit = fit_quadratic(&xs, &ys).expect("fit");
        assert_relative_eq!(fit.c0, 60.0, max_relative = 1e-8);
        assert_relative_eq!(fit.c1, -0.6, max_relative = 1e-8);
        assert_relative_eq!(fit.c2, -0.008, max_relative = 1e-8);
        assert!(fit.rms_residual(&xs, &ys) < 1e-8);
    }

    #[test]
    fn needs_three_samples() {
        let err = fit_quadratic(&[1.0, 2.0], &[1.0, 4.0]).unwrap_err();
        assert_eq!(err, NumericsError::TooFewSamples { required: 3, given: 2 });
    }

    #[test]
    fn repeated_abscissa_is_singular() {
        let err = fit_quadratic(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, NumericsError::SingularSystem);
    }
}
