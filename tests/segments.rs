mod support;

use approx::assert_relative_eq;
use uav_mdo::mission::{
    ClimbConfig, CruiseConfig, DescentConfig, Segment, SegmentError, SpeedSolverKind,
    SpeedSolverSettings, breguet_constant_cl_range, plan_climb, plan_cruise, plan_descent,
};

fn climb(rate_m_s: f64) -> ClimbConfig {
    ClimbConfig {
        initial_altitude_m: 0.0,
        final_altitude_m: 1_500.0,
        rate_m_s,
        steps: 20,
        solver: None,
    }
}

fn descent() -> DescentConfig {
    DescentConfig {
        initial_altitude_m: 1_500.0,
        final_altitude_m: 0.0,
        rate_m_s: 2.0,
        steps: 20,
        idle_throttle: 0.1,
        solver: None,
    }
}

#[test]
fn achievable_climb_burns_fuel_over_band_time() {
    let aircraft = support::baseline();
    let result = plan_climb(&aircraft, &climb(2.0), 16.0, &SpeedSolverSettings::default())
        .expect("climb");
    assert_relative_eq!(result.time_s, 750.0, epsilon = 1e-9);
    assert_eq!(result.steps.len(), 20);
    assert!(result.distance_m > 10_000.0 && result.distance_m < 25_000.0);
    assert!(result.fuel_kg > 0.0 && result.fuel_kg.is_finite());
    assert!(
        result
            .steps
            .windows(2)
            .all(|pair| pair[1].mass_kg < pair[0].mass_kg)
    );
    assert!(result.steps.iter().all(|step| step.throttle <= 1.0 + 1e-9));
}

#[test]
fn climb_above_envelope_is_infeasible() {
    let aircraft = support::baseline();
    let err = plan_climb(&aircraft, &climb(8.0), 16.0, &SpeedSolverSettings::default())
        .unwrap_err();
    assert!(matches!(
        err,
        SegmentError::Infeasible {
            segment: Segment::Climb,
            step: 0,
            ..
        }
    ));
}

#[test]
fn quartic_climb_costs_no_less_fuel() {
    let aircraft = support::baseline();
    let settings = SpeedSolverSettings::default();
    let minimized = plan_climb(&aircraft, &climb(2.0), 16.0, &settings).expect("minimizer");
    let quartic = plan_climb(
        &aircraft,
        &climb(2.0),
        16.0,
        &settings.with_kind(SpeedSolverKind::Quartic),
    )
    .expect("quartic");
    assert!(quartic.fuel_kg >= minimized.fuel_kg - 1e-9);
}

#[test]
fn climb_rejects_bad_configuration() {
    let aircraft = support::baseline();
    let settings = SpeedSolverSettings::default();
    let mut inverted = climb(2.0);
    inverted.final_altitude_m = -10.0;
    for config in [climb(0.0), climb(f64::NAN), inverted] {
        let err = plan_climb(&aircraft, &config, 16.0, &settings).unwrap_err();
        assert!(matches!(err, SegmentError::InvalidInput { .. }), "{err}");
    }
}

#[test]
fn idle_descent_burns_idle_fuel() {
    let aircraft = support::baseline();
    let landing_kg = aircraft.mass().landing_mass_kg();
    let result = plan_descent(&aircraft, &descent(), landing_kg, &SpeedSolverSettings::default())
        .expect("descent");
    assert_relative_eq!(result.time_s, 750.0, epsilon = 1e-9);
    let idle_fuel = 0.1 * aircraft.fuel_system().max_mass_flow_kg_s() * 750.0;
    assert_relative_eq!(result.fuel_kg, idle_fuel, max_relative = 1e-3);
    assert_relative_eq!(result.steps[0].mass_kg, landing_kg, epsilon = 1e-12);
    assert!(result.steps[0].altitude_m < result.steps[19].altitude_m);
    assert!(result.steps.iter().all(|step| step.throttle >= 0.1 - 1e-4));
}

#[test]
fn zero_cruise_bracket_flies_nothing() {
    let aircraft = support::baseline();
    let cruise = CruiseConfig {
        altitude_m: 1_500.0,
        steps: 10,
        speed_m_s: None,
    };
    let plan = plan_cruise(&aircraft, &cruise, 1.2, 1.2).expect("cruise");
    assert_eq!(plan.time_s, 0.0);
    assert_eq!(plan.distance_m, 0.0);
    assert!(plan.speeds_m_s.is_empty());
}

#[test]
fn cruise_without_fuel_is_rejected() {
    let aircraft = support::baseline();
    let cruise = CruiseConfig {
        altitude_m: 1_500.0,
        steps: 10,
        speed_m_s: None,
    };
    let err = plan_cruise(&aircraft, &cruise, 0.3, 0.5).unwrap_err();
    assert!(matches!(err, SegmentError::InsufficientFuel { .. }));
}

#[test]
fn flat_thrust_cruise_matches_breguet() {
    let aircraft = support::flat_thrust(40.0);
    let cruise = CruiseConfig {
        altitude_m: 1_500.0,
        steps: 10,
        speed_m_s: None,
    };
    let plan = plan_cruise(&aircraft, &cruise, 3.5, 0.5).expect("cruise");
    let breguet = breguet_constant_cl_range(&aircraft, 1_500.0, 15.5, 12.5).expect("breguet");
    assert_relative_eq!(plan.distance_m, breguet, max_relative = 0.01);
    let cl = aircraft.polar().min_drag_lift_coefficient();
    assert!(
        plan.lift_coefficients
            .iter()
            .all(|value| (value - cl).abs() < 1e-9)
    );
}

#[test]
fn fixed_cruise_speed_is_honoured() {
    let aircraft = support::baseline();
    let cruise = CruiseConfig {
        altitude_m: 1_500.0,
        steps: 4,
        speed_m_s: Some(22.0),
    };
    let plan = plan_cruise(&aircraft, &cruise, 2.0, 1.0).expect("cruise");
    assert!(plan.speeds_m_s.iter().all(|&v| v == 22.0));
    assert_relative_eq!(plan.fuel_kg, 1.0, epsilon = 1e-12);
    assert_relative_eq!(plan.distance_m, 22.0 * plan.time_s, max_relative = 1e-12);
}
