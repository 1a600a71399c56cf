//! Cruise segment: numerical Breguet-style integration over a fuel bracket.

use mdo_aircraft::Aircraft;
use mdo_atmosphere::isa;
use mdo_core::constants::G0;
use mdo_core::units::weight_n;
use tracing::{debug, info, warn};

use super::steady::InfeasibleReason;
use super::{Segment, SegmentError, SegmentResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CruiseConfig {
    pub altitude_m: f64,
    pub steps: usize,
    /// Fixed airspeed; the minimum-drag speed of each step's mass when absent.
    pub speed_m_s: Option<f64>,
}

/// Cruise totals plus per-step diagnostic sequences.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CruisePlan {
    pub time_s: f64,
    pub distance_m: f64,
    pub fuel_kg: f64,
    pub speeds_m_s: Vec<f64>,
    pub throttles: Vec<f64>,
    pub lift_coefficients: Vec<f64>,
    pub drag_coefficients: Vec<f64>,
}

impl CruisePlan {
    pub fn totals(&self) -> SegmentResult {
        SegmentResult {
            time_s: self.time_s,
            distance_m: self.distance_m,
            fuel_kg: self.fuel_kg,
            steps: Vec::new(),
        }
    }
}

/// Burn fuel from `start_fuel_kg` down to `end_fuel_kg` at constant altitude.
pub fn plan_cruise(
    aircraft: &Aircraft,
    cruise: &CruiseConfig,
    start_fuel_kg: f64,
    end_fuel_kg: f64,
) -> Result<CruisePlan, SegmentError> {
    if cruise.steps == 0 {
        return Err(SegmentError::invalid(
            Segment::Cruise,
            "at least one step is required",
        ));
    }
    if let Some(speed) = cruise.speed_m_s {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(SegmentError::invalid(
                Segment::Cruise,
                format!("cruise speed must be positive, got {speed}"),
            ));
        }
    }
    if !(start_fuel_kg.is_finite() && end_fuel_kg.is_finite()) {
        return Err(SegmentError::invalid(Segment::Cruise, "fuel bracket is not finite"));
    }
    if start_fuel_kg < end_fuel_kg {
        return Err(SegmentError::InsufficientFuel {
            available_kg: start_fuel_kg,
            required_kg: end_fuel_kg,
        });
    }
    if start_fuel_kg == end_fuel_kg {
        return Ok(CruisePlan::default());
    }

    let atmosphere = isa(cruise.altitude_m)?;
    let rho = atmosphere.density_kg_m3;
    let area = aircraft.wing_area_m2();
    let polar = aircraft.polar();
    let empty_kg = aircraft.mass().empty_kg;
    let slice_kg = (start_fuel_kg - end_fuel_kg) / cruise.steps as f64;
    let mut plan = CruisePlan::default();

    for step in 0..cruise.steps {
        let fuel_mid_kg = start_fuel_kg - (step as f64 + 0.5) * slice_kg;
        let weight = weight_n(empty_kg + fuel_mid_kg);
        let speed = cruise
            .speed_m_s
            .unwrap_or_else(|| polar.min_drag_speed(weight, rho, area));
        let dynamic_area = 0.5 * rho * speed * speed * area;
        let cl = weight / dynamic_area;
        let cd = polar.drag_coefficient(cl);
        let drag_n = dynamic_area * cd;
        let available_n = aircraft.thrust().max_thrust(speed, cruise.altitude_m);

        let infeasible = |reason: InfeasibleReason| {
            warn!(step, %reason, "cruise trim failed");
            SegmentError::Infeasible {
                segment: Segment::Cruise,
                step,
                altitude_m: cruise.altitude_m,
                reason,
            }
        };
        let throttle = level_throttle(drag_n, available_n, speed).map_err(infeasible)?;

        let flow_kg_s = aircraft.fuel_system().mass_flow_kg_s(throttle);
        let time_s = slice_kg / flow_kg_s;
        debug!(step, airspeed_m_s = speed, cl, cd, throttle, time_s, "cruise step");

        plan.speeds_m_s.push(speed);
        plan.throttles.push(throttle);
        plan.lift_coefficients.push(cl);
        plan.drag_coefficients.push(cd);
        plan.time_s += time_s;
        plan.distance_m += speed * time_s;
        plan.fuel_kg += slice_kg;
    }

    info!(
        time_s = plan.time_s,
        distance_m = plan.distance_m,
        fuel_kg = plan.fuel_kg,
        "cruise planned"
    );
    Ok(plan)
}

/// Throttle holding level flight, inside `(0, 1]`.
fn level_throttle(
    drag_n: f64,
    available_n: f64,
    airspeed_m_s: f64,
) -> Result<f64, InfeasibleReason> {
    if available_n <= 0.0 {
        return Err(InfeasibleReason::NoThrust { airspeed_m_s });
    }
    let throttle = drag_n / available_n;
    if throttle.is_nan() || throttle <= 0.0 {
        return Err(InfeasibleReason::ThrottleNotPositive {
            throttle,
            airspeed_m_s,
        });
    }
    if throttle > 1.0 {
        return Err(InfeasibleReason::ThrottleAboveFull {
            throttle,
            airspeed_m_s,
        });
    }
    Ok(throttle)
}

/// Closed-form range (m) of a constant-CL cruise at the minimum-drag lift
/// coefficient, assuming thrust does not vary with airspeed.
///
/// Fuel flow per newton of thrust is the full-throttle flow over the static
/// thrust at altitude, so `R = (L/D)/(c·g)·sqrt(2g/(ρ·S·CL))·2(√m₁ − √m₂)`.
pub fn breguet_constant_cl_range(
    aircraft: &Aircraft,
    altitude_m: f64,
    start_mass_kg: f64,
    end_mass_kg: f64,
) -> Result<f64, SegmentError> {
    let rho = isa(altitude_m)?.density_kg_m3;
    let polar = aircraft.polar();
    let thrust = aircraft.thrust();
    let cl = polar.min_drag_lift_coefficient();
    let lift_to_drag = polar.max_lift_to_drag();
    let static_thrust_n = thrust.t0 * thrust.altitude_factor(altitude_m);
    let specific_consumption = aircraft.fuel_system().max_mass_flow_kg_s() / static_thrust_n;
    let speed_factor = (2.0 * G0 / (rho * aircraft.wing_area_m2() * cl)).sqrt();
    Ok(lift_to_drag / (specific_consumption * G0)
        * speed_factor
        * 2.0
        * (start_mass_kg.sqrt() - end_mass_kg.sqrt()))
}
