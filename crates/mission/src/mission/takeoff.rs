//! Take-off ground roll integrated with explicit Euler steps until rotation
//! speed.

use mdo_aircraft::Aircraft;
use mdo_atmosphere::isa;
use mdo_core::units::weight_n;
use mdo_numerics::{EulerOutcome, ForwardEuler};
use tracing::{info, warn};

use super::{Segment, SegmentError};

/// Ground roll reported when rotation speed is never reached.
pub const RUNWAY_TOO_LONG_M: f64 = 1.0e5;

pub use mdo_core::defaults::{
    FRICTION_COEFFICIENT as DEFAULT_FRICTION_COEFFICIENT, MAX_TAKEOFF_STEPS as DEFAULT_MAX_STEPS,
    SAFETY_FACTOR as DEFAULT_SAFETY_FACTOR, TIME_STEP_S as DEFAULT_TIME_STEP_S,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TakeoffConfig {
    pub field_altitude_m: f64,
    /// Rolling friction coefficient of the wheels.
    pub friction_coefficient: f64,
    /// Rotation speed over stall speed.
    pub safety_factor: f64,
    pub time_step_s: f64,
    /// Step budget; exhausting it reports [`TakeoffOutcome::RunwayTooLong`].
    pub max_steps: usize,
}

impl Default for TakeoffConfig {
    fn default() -> Self {
        Self {
            field_altitude_m: 0.0,
            friction_coefficient: DEFAULT_FRICTION_COEFFICIENT,
            safety_factor: DEFAULT_SAFETY_FACTOR,
            time_step_s: DEFAULT_TIME_STEP_S,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakeoffOutcome {
    Airborne,
    /// The step budget ran out before rotation; the ground roll is the sentinel.
    RunwayTooLong,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TakeoffPlan {
    pub outcome: TakeoffOutcome,
    pub ground_roll_m: f64,
    pub lift_off_speed_m_s: f64,
    pub rotation_speed_m_s: f64,
    pub stall_speed_m_s: f64,
    pub time_s: f64,
    /// Fuel burned at full throttle during the roll.
    pub fuel_kg: f64,
}

impl TakeoffPlan {
    pub fn is_airborne(&self) -> bool {
        self.outcome == TakeoffOutcome::Airborne
    }
}

fn validate(takeoff: &TakeoffConfig, mass_kg: f64) -> Result<(), SegmentError> {
    let checks = [
        ("mass", mass_kg, mass_kg > 0.0),
        ("safety factor", takeoff.safety_factor, takeoff.safety_factor > 0.0),
        ("time step", takeoff.time_step_s, takeoff.time_step_s > 0.0),
        (
            "friction coefficient",
            takeoff.friction_coefficient,
            takeoff.friction_coefficient >= 0.0,
        ),
    ];
    for (name, value, ok) in checks {
        if !(ok && value.is_finite()) {
            return Err(SegmentError::invalid(
                Segment::Takeoff,
                format!("{name} is out of range: {value}"),
            ));
        }
    }
    if takeoff.max_steps == 0 {
        return Err(SegmentError::invalid(Segment::Takeoff, "step budget must be positive"));
    }
    Ok(())
}

/// Integrate the ground roll `(x, v)` from standstill at `mass_kg`.
///
/// `dv/dt = (T(v) − μ·max(0, W − L) − D) / m` with the ground-run lift and
/// drag coefficients held constant.
pub fn plan_takeoff(
    aircraft: &Aircraft,
    takeoff: &TakeoffConfig,
    mass_kg: f64,
) -> Result<TakeoffPlan, SegmentError> {
    validate(takeoff, mass_kg)?;
    let rho = isa(takeoff.field_altitude_m)?.density_kg_m3;
    let area = aircraft.wing_area_m2();
    let weight = weight_n(mass_kg);
    let ground = aircraft.ground_run();
    let thrust = aircraft.thrust();

    let stall_speed = (2.0 * weight / (area * rho * aircraft.take_off_cl_max())).sqrt();
    if !(stall_speed.is_finite() && stall_speed > 0.0) {
        return Err(SegmentError::invalid(
            Segment::Takeoff,
            format!("stall speed is undefined: {stall_speed}"),
        ));
    }
    let rotation_speed = stall_speed * takeoff.safety_factor;

    let derivative = |_t: f64, state: &[f64; 2]| {
        let v = state[1];
        let dynamic_area = 0.5 * rho * v * v * area;
        let lift = dynamic_area * ground.lift_coefficient;
        let drag = dynamic_area * ground.drag_coefficient;
        let friction = takeoff.friction_coefficient * (weight - lift).max(0.0);
        let force = thrust.max_thrust(v, takeoff.field_altitude_m) - friction - drag;
        // Brakes off but not rolling backwards.
        let force = if v <= 0.0 { force.max(0.0) } else { force };
        [v, force / mass_kg]
    };
    let euler = ForwardEuler::new(takeoff.time_step_s, takeoff.max_steps);
    let outcome = euler.integrate_until([0.0, 0.0], derivative, |_, state| {
        state[1] >= rotation_speed
    });

    let fuel_kg = outcome.time() * aircraft.fuel_system().max_mass_flow_kg_s();
    let plan = match outcome {
        EulerOutcome::Reached { state, time, .. } => TakeoffPlan {
            outcome: TakeoffOutcome::Airborne,
            ground_roll_m: state[0],
            lift_off_speed_m_s: state[1],
            rotation_speed_m_s: rotation_speed,
            stall_speed_m_s: stall_speed,
            time_s: time,
            fuel_kg,
        },
        EulerOutcome::Exhausted { state, time, steps } => {
            warn!(
                steps,
                speed_m_s = state[1],
                rotation_speed_m_s = rotation_speed,
                "rotation speed not reached; runway too long"
            );
            TakeoffPlan {
                outcome: TakeoffOutcome::RunwayTooLong,
                ground_roll_m: RUNWAY_TOO_LONG_M,
                lift_off_speed_m_s: state[1],
                rotation_speed_m_s: rotation_speed,
                stall_speed_m_s: stall_speed,
                time_s: time,
                fuel_kg,
            }
        }
    };
    info!(
        ground_roll_m = plan.ground_roll_m,
        time_s = plan.time_s,
        fuel_kg = plan.fuel_kg,
        "take-off planned"
    );
    Ok(plan)
}
