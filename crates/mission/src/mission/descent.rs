//! Descent segment: constant rate of descent with an idle-throttle floor.
//!
//! The descent is integrated from the landing mass upward, adding each band's
//! fuel, so its fuel burn is known before the cruise is planned.

use mdo_aircraft::Aircraft;
use mdo_atmosphere::isa;
use mdo_core::units::weight_n;
use tracing::{debug, info, warn};

use super::steady::{
    FlightCondition, ForceBalance, SpeedSolverKind, SpeedSolverSettings, solve_point,
};
use super::{Segment, SegmentError, SegmentResult, SegmentStep};

/// Fraction of maximum thrust the engine cannot be throttled below.
pub use mdo_core::defaults::IDLE_THROTTLE as DEFAULT_IDLE_THROTTLE;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescentConfig {
    pub initial_altitude_m: f64,
    pub final_altitude_m: f64,
    /// Rate of descent as a positive number (m/s).
    pub rate_m_s: f64,
    pub steps: usize,
    pub idle_throttle: f64,
    pub solver: Option<SpeedSolverKind>,
}

impl DescentConfig {
    fn validate(&self) -> Result<(), SegmentError> {
        if !(self.rate_m_s.is_finite() && self.rate_m_s > 0.0) {
            return Err(SegmentError::invalid(
                Segment::Descent,
                format!("rate of descent must be positive, got {}", self.rate_m_s),
            ));
        }
        if self.steps == 0 {
            return Err(SegmentError::invalid(Segment::Descent, "at least one step is required"));
        }
        if !(self.initial_altitude_m > self.final_altitude_m) {
            return Err(SegmentError::invalid(
                Segment::Descent,
                format!(
                    "initial altitude {} m must be above final altitude {} m",
                    self.initial_altitude_m, self.final_altitude_m
                ),
            ));
        }
        if !(0.0..1.0).contains(&self.idle_throttle) {
            return Err(SegmentError::invalid(
                Segment::Descent,
                format!("idle throttle must lie in [0, 1), got {}", self.idle_throttle),
            ));
        }
        Ok(())
    }
}

/// Integrate the descent from the bottom band upward starting at `landing_mass_kg`.
///
/// Steps are reported bottom first.
pub fn plan_descent(
    aircraft: &Aircraft,
    descent: &DescentConfig,
    landing_mass_kg: f64,
    solver: &SpeedSolverSettings,
) -> Result<SegmentResult, SegmentError> {
    descent.validate()?;
    if !(landing_mass_kg.is_finite() && landing_mass_kg > 0.0) {
        return Err(SegmentError::invalid(
            Segment::Descent,
            format!("landing mass must be positive, got {landing_mass_kg}"),
        ));
    }

    let settings = solver.with_kind(descent.solver.unwrap_or(solver.kind));
    let band_m = (descent.initial_altitude_m - descent.final_altitude_m) / descent.steps as f64;
    let step_time_s = band_m / descent.rate_m_s;
    let mut mass_kg = landing_mass_kg;
    let mut result = SegmentResult::default();

    for step in 0..descent.steps {
        let altitude_m = descent.final_altitude_m + (step as f64 + 0.5) * band_m;
        let atmosphere = isa(altitude_m)?;
        let balance = ForceBalance::new(
            aircraft,
            FlightCondition {
                altitude_m,
                density_kg_m3: atmosphere.density_kg_m3,
                weight_n: weight_n(mass_kg),
                vertical_speed_m_s: -descent.rate_m_s,
                min_throttle: descent.idle_throttle,
            },
        );
        let point = solve_point(&balance, &settings).map_err(|reason| {
            warn!(step, altitude_m, %reason, "descent speed solution failed");
            SegmentError::Infeasible {
                segment: Segment::Descent,
                step,
                altitude_m,
                reason,
            }
        })?;

        let fuel_kg = aircraft.fuel_system().mass_flow_kg_s(point.throttle) * step_time_s;
        debug!(
            step,
            altitude_m,
            airspeed_m_s = point.airspeed_m_s,
            throttle = point.throttle,
            fuel_kg,
            "descent step"
        );
        result.steps.push(SegmentStep {
            altitude_m,
            mass_kg,
            airspeed_m_s: point.airspeed_m_s,
            throttle: point.throttle,
            fuel_kg,
        });
        result.time_s += step_time_s;
        result.distance_m += point.airspeed_m_s * step_time_s;
        result.fuel_kg += fuel_kg;
        mass_kg += fuel_kg;
    }

    info!(
        time_s = result.time_s,
        distance_m = result.distance_m,
        fuel_kg = result.fuel_kg,
        "descent planned"
    );
    Ok(result)
}
