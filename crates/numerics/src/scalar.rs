//! Bounded scalar minimization and bracketed root finding on top of argmin's
//! Brent solvers.

use argmin::core::{
    CostFunction, Error as ArgminError, Executor, State, TerminationReason, TerminationStatus,
};
use argmin::solver::brent::{BrentOpt, BrentRoot};
use mdo_core::defaults::{
    SOLVER_ABSOLUTE_TOLERANCE, SOLVER_MAX_ITERATIONS, SOLVER_RELATIVE_TOLERANCE,
};

use crate::NumericsError;

/// Cost returned in place of NaN or infinite function values so Brent's
/// parabolic steps stay finite.
const NON_FINITE_COST: f64 = 1.0e12;

/// Convergence settings shared by the scalar solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarOptions {
    /// Relative tolerance on the abscissa.
    pub relative_tolerance: f64,
    /// Absolute tolerance on the abscissa.
    pub absolute_tolerance: f64,
    pub max_iterations: u64,
}

impl Default for ScalarOptions {
    fn default() -> Self {
        Self {
            relative_tolerance: SOLVER_RELATIVE_TOLERANCE,
            absolute_tolerance: SOLVER_ABSOLUTE_TOLERANCE,
            max_iterations: SOLVER_MAX_ITERATIONS,
        }
    }
}

/// Located minimum of a scalar function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarMinimum {
    pub x: f64,
    pub value: f64,
    pub iterations: u64,
}

/// Located root of a scalar function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarRoot {
    pub x: f64,
    pub residual: f64,
    pub iterations: u64,
}

struct ScalarProblem<F> {
    f: F,
    sanitize: bool,
}

impl<F> CostFunction for ScalarProblem<F>
where
    F: Fn(f64) -> f64,
{
    type Param = f64;
    type Output = f64;

    fn cost(&self, x: &Self::Param) -> Result<Self::Output, ArgminError> {
        let value = (self.f)(*x);
        if self.sanitize && !value.is_finite() {
            return Ok(NON_FINITE_COST);
        }
        Ok(value)
    }
}

fn check_interval(lower: f64, upper: f64) -> Result<(), NumericsError> {
    if !(lower.is_finite() && upper.is_finite() && lower < upper) {
        return Err(NumericsError::InvalidInterval { lower, upper });
    }
    Ok(())
}

fn hit_iteration_cap(status: &TerminationStatus) -> bool {
    matches!(
        status,
        TerminationStatus::Terminated(TerminationReason::MaxItersReached)
    )
}

/// Minimize `f` over `[lower, upper]` with Brent's method.
///
/// Returns [`NumericsError::NotConverged`] when the iteration cap is reached
/// before the abscissa tolerance is met.
pub fn minimize_bounded<F>(
    f: F,
    lower: f64,
    upper: f64,
    options: &ScalarOptions,
) -> Result<ScalarMinimum, NumericsError>
where
    F: Fn(f64) -> f64,
{
    check_interval(lower, upper)?;
    let solver = BrentOpt::new(lower, upper)
        .set_tolerance(options.relative_tolerance, options.absolute_tolerance);
    let problem = ScalarProblem { f: &f, sanitize: true };
    let result = Executor::new(problem, solver)
        .configure(|state| state.max_iters(options.max_iterations))
        .run()
        .map_err(|e| NumericsError::Solver(e.to_string()))?;

    let state = result.state();
    let iterations = state.get_iter();
    if hit_iteration_cap(state.get_termination_status()) {
        return Err(NumericsError::NotConverged { iterations });
    }
    let x = state
        .get_best_param()
        .copied()
        .ok_or_else(|| NumericsError::Solver("minimizer returned no parameter".to_string()))?;
    Ok(ScalarMinimum {
        x,
        value: state.get_best_cost(),
        iterations,
    })
}

/// Find a root of `f` inside `[lower, upper]` with Brent's method.
///
/// The interval must bracket a sign change.
pub fn find_root<F>(
    f: F,
    lower: f64,
    upper: f64,
    options: &ScalarOptions,
) -> Result<ScalarRoot, NumericsError>
where
    F: Fn(f64) -> f64,
{
    check_interval(lower, upper)?;
    let f_lower = f(lower);
    let f_upper = f(upper);
    if f_lower == 0.0 {
        return Ok(ScalarRoot {
            x: lower,
            residual: 0.0,
            iterations: 0,
        });
    }
    if f_upper == 0.0 {
        return Ok(ScalarRoot {
            x: upper,
            residual: 0.0,
            iterations: 0,
        });
    }
    if !(f_lower.is_finite() && f_upper.is_finite()) || f_lower.signum() == f_upper.signum() {
        return Err(NumericsError::NoSignChange { lower, upper });
    }

    let solver = BrentRoot::new(lower, upper, options.absolute_tolerance);
    let problem = ScalarProblem { f: &f, sanitize: false };
    let result = Executor::new(problem, solver)
        .configure(|state| state.max_iters(options.max_iterations))
        .run()
        .map_err(|e| NumericsError::Solver(e.to_string()))?;

    let state = result.state();
    let iterations = state.get_iter();
    if hit_iteration_cap(state.get_termination_status()) {
        return Err(NumericsError::NotConverged { iterations });
    }
    // The current iterate is the root; "best" tracks the smallest signed cost.
    let x = state
        .get_param()
        .copied()
        .ok_or_else(|| NumericsError::Solver("root finder returned no parameter".to_string()))?;
    let residual = f(x);
    Ok(ScalarRoot {
        x,
        residual,
        iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn minimizes_shifted_parabola() {
        let options = ScalarOptions::default();
        let min = minimize_bounded(|x| (x - 3.0).powi(2) + 1.0, 0.0, 10.0, &options)
            .expect("minimum");
        assert_abs_diff_eq!(min.x, 3.0, epsilon = 1e-5);
        assert_abs_diff_eq!(min.value, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn minimum_on_boundary_is_found() {
        let min = minimize_bounded(|x| x, 2.0, 5.0, &ScalarOptions::default()).expect("minimum");
        assert_abs_diff_eq!(min.x, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn rejects_inverted_interval() {
        let err = minimize_bounded(|x| x * x, 1.0, -1.0, &ScalarOptions::default()).unwrap_err();
        assert!(matches!(err, NumericsError::InvalidInterval { .. }));
    }

    #[test]
    fn finds_cubic_root() {
        let root =
            find_root(|x| x * x * x - 8.0, 0.0, 5.0, &ScalarOptions::default()).expect("root");
        assert_abs_diff_eq!(root.x, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn root_requires_sign_change() {
        let err = find_root(|x| x * x + 1.0, -1.0, 1.0, &ScalarOptions::default()).unwrap_err();
        assert!(matches!(err, NumericsError::NoSignChange { .. }));
    }
}
