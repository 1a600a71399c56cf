//! Mission crate: flight-segment integrators, the mission pipeline and design evaluation.

pub mod evaluate;
pub mod mission;

pub use facade::*;
pub use mdo_propulsion as propulsion;

mod facade;
