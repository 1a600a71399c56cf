//! Thrust curves, fuel systems and propeller thrust models.

pub mod propeller;

pub use propeller::{EngineSpec, ThrustModel, dynamic_thrust, thrust_curve_from_engine};

use mdo_core::units::litres_per_hour_to_kg_s;
use mdo_numerics::NumericsError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PropulsionError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("airspeed {0} m/s is outside the propeller model range")]
    InvalidAirspeed(f64),
    #[error(transparent)]
    Numerics(#[from] NumericsError),
}

/// Maximum available thrust as a quadratic in airspeed with a linear altitude lapse.
///
/// `T_max(v, h) = (t0 + t1·v + t2·v²)·(1 + altitude_lapse_per_m·h)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrustCurve {
    /// Static thrust (N).
    pub t0: f64,
    pub t1: f64,
    pub t2: f64,
    pub altitude_lapse_per_m: f64,
}

impl ThrustCurve {
    /// A curve with no airspeed or altitude dependence.
    pub fn flat(thrust_n: f64) -> Self {
        Self {
            t0: thrust_n,
            t1: 0.0,
            t2: 0.0,
            altitude_lapse_per_m: 0.0,
        }
    }

    pub fn with_altitude_lapse(mut self, lapse_per_m: f64) -> Self {
        self.altitude_lapse_per_m = lapse_per_m;
        self
    }

    /// Maximum thrust (N) at airspeed `v` (m/s) and altitude `h` (m).
    pub fn max_thrust(&self, airspeed_m_s: f64, altitude_m: f64) -> f64 {
        let v = airspeed_m_s;
        (self.t0 + self.t1 * v + self.t2 * v * v) * self.altitude_factor(altitude_m)
    }

    pub fn altitude_factor(&self, altitude_m: f64) -> f64 {
        1.0 + self.altitude_lapse_per_m * altitude_m
    }

    pub fn validate(&self) -> Result<(), PropulsionError> {
        if !(self.t0.is_finite() && self.t0 > 0.0) {
            return Err(PropulsionError::NonPositive {
                field: "static thrust",
                value: self.t0,
            });
        }
        Ok(())
    }
}

/// Fuel-system constants: maximum volumetric consumption and fuel density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelSystem {
    pub max_consumption_l_per_h: f64,
    pub fuel_density_kg_per_l: f64,
}

impl FuelSystem {
    pub fn new(
        max_consumption_l_per_h: f64,
        fuel_density_kg_per_l: f64,
    ) -> Result<Self, PropulsionError> {
        if !(max_consumption_l_per_h.is_finite() && max_consumption_l_per_h > 0.0) {
            return Err(PropulsionError::NonPositive {
                field: "maximum fuel consumption",
                value: max_consumption_l_per_h,
            });
        }
        if !(fuel_density_kg_per_l.is_finite() && fuel_density_kg_per_l > 0.0) {
            return Err(PropulsionError::NonPositive {
                field: "fuel density",
                value: fuel_density_kg_per_l,
            });
        }
        Ok(Self {
            max_consumption_l_per_h,
            fuel_density_kg_per_l,
        })
    }

    /// Mass flow (kg/s) at full throttle.
    pub fn max_mass_flow_kg_s(&self) -> f64 {
        litres_per_hour_to_kg_s(self.max_consumption_l_per_h, self.fuel_density_kg_per_l)
    }

    /// Mass flow (kg/s) at a throttle fraction; flow scales linearly with throttle.
    pub fn mass_flow_kg_s(&self, throttle: f64) -> f64 {
        throttle * self.max_mass_flow_kg_s()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn thrust_lapses_with_altitude() {
        let curve = ThrustCurve {
            t0: 60.0,
            t1: -0.6,
            t2: -0.008,
            altitude_lapse_per_m: -2.0e-5,
        };
        let sea_level = curve.max_thrust(20.0, 0.0);
        assert_relative_eq!(sea_level, 60.0 - 12.0 - 3.2, epsilon = 1e-12);
        assert_relative_eq!(curve.max_thrust(20.0, 1_000.0), sea_level * 0.98, epsilon = 1e-12);
    }

    #[test]
    fn fuel_flow_converts_litres_per_hour() {
        let fuel = FuelSystem::new(3.6, 0.75).expect("fuel system");
        assert_relative_eq!(fuel.max_mass_flow_kg_s(), 7.5e-4, epsilon = 1e-15);
        assert_relative_eq!(fuel.mass_flow_kg_s(0.5), 3.75e-4, epsilon = 1e-15);
    }

    #[test]
    fn rejects_zero_density() {
        assert!(matches!(
            FuelSystem::new(2.0, 0.0),
            Err(PropulsionError::NonPositive { field: "fuel density", .. })
        ));
    }
}
