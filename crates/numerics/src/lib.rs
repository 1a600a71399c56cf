//! Numerical building blocks used by the performance integrators.
//!
//! - [`scalar`]: bounded one-dimensional minimization and bracketed root finding.
//! - [`quartic`]: closed-form positive root of a depressed quartic.
//! - [`euler`]: fixed-step explicit Euler integration with a stop predicate.
//! - [`fit`]: quadratic least-squares fitting.

pub mod euler;
pub mod fit;
pub mod quartic;
pub mod scalar;

pub use euler::{EulerOutcome, ForwardEuler};
pub use fit::{QuadraticFit, fit_quadratic};
pub use quartic::depressed_quartic_positive_root;
pub use scalar::{ScalarMinimum, ScalarOptions, ScalarRoot, find_root, minimize_bounded};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NumericsError {
    #[error("invalid search interval [{lower}, {upper}]")]
    InvalidInterval { lower: f64, upper: f64 },
    #[error("function values at {lower} and {upper} do not bracket a root")]
    NoSignChange { lower: f64, upper: f64 },
    #[error("solver stopped after {iterations} iterations without converging")]
    NotConverged { iterations: u64 },
    #[error("solver failed: {0}")]
    Solver(String),
    #[error("least-squares system is singular")]
    SingularSystem,
    #[error("at least {required} samples are required, got {given}")]
    TooFewSamples { required: usize, given: usize },
    #[error("polynomial has no positive real root")]
    NoPositiveRoot,
}
