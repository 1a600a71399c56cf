//! Climb segment: constant rate of climb through an altitude band.

use mdo_aircraft::Aircraft;
use mdo_atmosphere::isa;
use mdo_core::units::weight_n;
use tracing::{debug, info, warn};

use super::steady::{
    FlightCondition, ForceBalance, SpeedSolverKind, SpeedSolverSettings, solve_point,
};
use super::{Segment, SegmentError, SegmentResult, SegmentStep};

/// Configuration for a constant-rate climb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimbConfig {
    pub initial_altitude_m: f64,
    pub final_altitude_m: f64,
    pub rate_m_s: f64,
    pub steps: usize,
    /// Overrides the run-wide speed solver for this segment.
    pub solver: Option<SpeedSolverKind>,
}

impl ClimbConfig {
    fn validate(&self) -> Result<(), SegmentError> {
        if !(self.rate_m_s.is_finite() && self.rate_m_s > 0.0) {
            return Err(SegmentError::invalid(
                Segment::Climb,
                format!("rate of climb must be positive, got {}", self.rate_m_s),
            ));
        }
        if self.steps == 0 {
            return Err(SegmentError::invalid(Segment::Climb, "at least one step is required"));
        }
        if !(self.final_altitude_m > self.initial_altitude_m) {
            return Err(SegmentError::invalid(
                Segment::Climb,
                format!(
                    "final altitude {} m must be above initial altitude {} m",
                    self.final_altitude_m, self.initial_altitude_m
                ),
            ));
        }
        Ok(())
    }
}

/// Integrate the climb step by step, burning fuel as the aircraft rises.
///
/// Each band is flown at the least-effort airspeed found at its midpoint
/// altitude with the mass left after all previous bands.
pub fn plan_climb(
    aircraft: &Aircraft,
    climb: &ClimbConfig,
    start_mass_kg: f64,
    solver: &SpeedSolverSettings,
) -> Result<SegmentResult, SegmentError> {
    climb.validate()?;
    if !(start_mass_kg.is_finite() && start_mass_kg > 0.0) {
        return Err(SegmentError::invalid(
            Segment::Climb,
            format!("start mass must be positive, got {start_mass_kg}"),
        ));
    }

    let settings = solver.with_kind(climb.solver.unwrap_or(solver.kind));
    let band_m = (climb.final_altitude_m - climb.initial_altitude_m) / climb.steps as f64;
    let step_time_s = band_m / climb.rate_m_s;
    let mut mass_kg = start_mass_kg;
    let mut result = SegmentResult::default();

    for step in 0..climb.steps {
        let altitude_m = climb.initial_altitude_m + (step as f64 + 0.5) * band_m;
        let atmosphere = isa(altitude_m)?;
        let balance = ForceBalance::new(
            aircraft,
            FlightCondition {
                altitude_m,
                density_kg_m3: atmosphere.density_kg_m3,
                weight_n: weight_n(mass_kg),
                vertical_speed_m_s: climb.rate_m_s,
                min_throttle: 0.0,
            },
        );
        let point = solve_point(&balance, &settings).map_err(|reason| {
            warn!(step, altitude_m, %reason, "climb speed solution failed");
            SegmentError::Infeasible {
                segment: Segment::Climb,
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
            "climb step"
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
        mass_kg -= fuel_kg;
    }

    info!(
        time_s = result.time_s,
        distance_m = result.distance_m,
        fuel_kg = result.fuel_kg,
        "climb planned"
    );
    Ok(result)
}
