mod support;

use approx::assert_relative_eq;
use uav_mdo::aircraft::Aircraft;
use uav_mdo::atmosphere::isa;
use uav_mdo::common::units::weight_n;
use uav_mdo::mission::{
    FlightCondition, ForceBalance, InfeasibleReason, MinimumThrottle, QuarticStationary,
    SpeedSolver, SpeedSolverKind, SpeedSolverSettings, solve_point,
};
use uav_mdo::propulsion::ThrustCurve;

fn condition(
    altitude_m: f64,
    mass_kg: f64,
    vertical_speed_m_s: f64,
    min_throttle: f64,
) -> FlightCondition {
    FlightCondition {
        altitude_m,
        density_kg_m3: isa(altitude_m).expect("isa").density_kg_m3,
        weight_n: weight_n(mass_kg),
        vertical_speed_m_s,
        min_throttle,
    }
}

#[test]
fn level_minimum_throttle_flies_minimum_drag_speed() {
    let aircraft = support::flat_thrust(40.0);
    let flight = condition(1_000.0, 15.0, 0.0, 0.0);
    let balance = ForceBalance::new(&aircraft, flight);
    let settings = SpeedSolverSettings::default();

    let speed = MinimumThrottle.speed(&balance, &settings).expect("speed");
    let expected = aircraft
        .polar()
        .min_drag_speed(flight.weight_n, flight.density_kg_m3, aircraft.wing_area_m2());
    assert_relative_eq!(speed, expected, max_relative = 1e-3);
}

#[test]
fn quartic_agrees_with_minimizer_on_flat_thrust() {
    let aircraft = support::flat_thrust(40.0);
    let settings = SpeedSolverSettings::default();
    for vertical_speed in [0.0, 1.0, 2.5] {
        let balance = ForceBalance::new(&aircraft, condition(500.0, 16.0, vertical_speed, 0.0));
        let minimized = MinimumThrottle.speed(&balance, &settings).expect("minimizer");
        let quartic = QuarticStationary.speed(&balance, &settings).expect("quartic");
        assert_relative_eq!(quartic, minimized, max_relative = 1e-3);
    }
}

#[test]
fn quartic_never_beats_the_minimizer_on_throttle() {
    let aircraft = support::baseline();
    let settings = SpeedSolverSettings::default();
    let balance = ForceBalance::new(&aircraft, condition(750.0, 16.0, 2.0, 0.0));
    let minimized = MinimumThrottle.speed(&balance, &settings).expect("minimizer");
    let quartic = QuarticStationary.speed(&balance, &settings).expect("quartic");
    assert!(balance.throttle(quartic) >= balance.throttle(minimized) - 1e-9);
}

#[test]
fn steep_climb_exceeds_full_throttle() {
    let aircraft = support::baseline();
    let balance = ForceBalance::new(&aircraft, condition(0.0, 16.0, 8.0, 0.0));
    let err = solve_point(&balance, &SpeedSolverSettings::default()).unwrap_err();
    assert!(matches!(err, InfeasibleReason::ThrottleAboveFull { throttle, .. } if throttle > 1.0));
}

#[test]
fn descent_holds_idle_throttle() {
    let aircraft = support::baseline();
    let balance = ForceBalance::new(&aircraft, condition(750.0, 12.4, -2.0, 0.1));
    for kind in [SpeedSolverKind::Minimize, SpeedSolverKind::Quartic] {
        let settings = SpeedSolverSettings::default().with_kind(kind);
        let point = solve_point(&balance, &settings).expect("idle descent");
        assert_relative_eq!(point.throttle, 0.1, epsilon = 1e-4);
        assert!(point.airspeed_m_s > 1.0 && point.airspeed_m_s < 90.0);
    }
}

#[test]
fn speed_search_stays_below_thrust_cut_off() {
    let mut parts = support::baseline_parts();
    // Zero thrust at 30.8 m/s, well inside the default speed bounds.
    parts.thrust = ThrustCurve {
        t0: 42.22,
        t1: -1.37,
        t2: 0.0,
        altitude_lapse_per_m: 0.0,
    };
    let aircraft = Aircraft::new(parts).expect("aircraft");
    let balance = ForceBalance::new(&aircraft, condition(500.0, 14.0, 1.0, 0.0));
    let settings = SpeedSolverSettings::default();

    let cut_off = balance
        .thrust_limited_speed(settings.min_speed_m_s, settings.max_speed_m_s, &settings.options)
        .expect("thrust somewhere");
    assert!(cut_off < 42.22 / 1.37);
    assert!(balance.available_thrust_n(cut_off) > 0.0);

    let point = solve_point(&balance, &settings).expect("climb point");
    assert!(point.airspeed_m_s < cut_off);
    assert!(point.throttle < 1.0);
}

#[test]
fn no_thrust_anywhere_is_reported() {
    let mut parts = support::baseline_parts();
    parts.thrust = ThrustCurve {
        t0: 1.0e-3,
        t1: -1.0,
        t2: 0.0,
        altitude_lapse_per_m: 0.0,
    };
    let aircraft = Aircraft::new(parts).expect("aircraft");
    let balance = ForceBalance::new(&aircraft, condition(0.0, 14.0, 0.0, 0.0));
    let err = solve_point(&balance, &SpeedSolverSettings::default()).unwrap_err();
    assert!(matches!(err, InfeasibleReason::NoThrust { .. }));
}
