//! Point-mass performance and mission integration for small fixed-wing UAVs.
//!
//! The workspace crates are re-exported here so front-ends (the CLI, optimizer
//! drivers) depend on a single library.

pub use mdo_aircraft as aircraft;
pub use mdo_atmosphere as atmosphere;
pub use mdo_config as config;
pub use mdo_core as common;
pub use mdo_mission as mission;
pub use mdo_numerics as numerics;
pub use mdo_propulsion as propulsion;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
