mod support;

use approx::assert_relative_eq;
use uav_mdo::aircraft::{
    Aircraft, AircraftError, DragPolar, Planform, PlanformStation, StallData, StripPolar, Surface,
    SurfaceStall,
};

fn station(chord_m: f64, span_m: f64, sweep_le: f64) -> PlanformStation {
    PlanformStation {
        chord_m,
        span_m,
        sweep_le,
    }
}

#[test]
fn tapered_wing_reduces_to_reference_quantities() {
    let wing = Planform {
        stations: vec![station(0.4, 0.0, 0.0), station(0.2, 1.0, 0.1)],
        symmetric: true,
    };
    let summary = wing.summarize().expect("summary");
    assert_relative_eq!(summary.area_m2, 0.6, epsilon = 1e-12);
    assert_relative_eq!(summary.span_m, 2.0, epsilon = 1e-12);
    // MAC of a trapezoid with taper 0.5: (2/3)·c_r·(1 + λ + λ²)/(1 + λ).
    assert_relative_eq!(
        summary.mean_aerodynamic_chord_m,
        2.0 / 3.0 * 0.4 * 1.75 / 1.5,
        epsilon = 1e-12
    );
    assert_relative_eq!(summary.tip_offset_m, 0.1, epsilon = 1e-12);
    assert_relative_eq!(summary.quarter_chord_sweep, 0.1 - 0.05, epsilon = 1e-12);
}

#[test]
fn degenerate_planforms_are_rejected() {
    let single = Planform {
        stations: vec![station(0.3, 0.0, 0.0)],
        symmetric: true,
    };
    assert!(matches!(single.summarize(), Err(AircraftError::Planform(_))));
    let zero_span = Planform {
        stations: vec![station(0.3, 0.0, 0.0), station(0.2, 0.0, 0.0)],
        symmetric: false,
    };
    assert!(matches!(zero_span.summarize(), Err(AircraftError::Planform(_))));
}

#[test]
fn polar_fit_recovers_parabolic_samples() {
    let truth = DragPolar::new(0.027, -0.004, 0.052);
    let cls: Vec<f64> = (0..12).map(|i| -0.2 + 0.12 * i as f64).collect();
    let cds: Vec<f64> = cls.iter().map(|&cl| truth.drag_coefficient(cl)).collect();
    let fitted = DragPolar::fit(&cls, &cds).expect("fit");
    assert_relative_eq!(fitted.cd0, truth.cd0, epsilon = 1e-9);
    assert_relative_eq!(fitted.cd1, truth.cd1, epsilon = 1e-9);
    assert_relative_eq!(fitted.k, truth.k, epsilon = 1e-9);
}

#[test]
fn wing_stall_starts_at_the_most_loaded_strip() {
    let stations = vec![0.0, 0.3, 0.6, 0.9];
    let lower = StripPolar {
        alpha_deg: 0.0,
        total_lift_coefficient: 0.3,
        strip_lift_coefficients: vec![0.30, 0.32, 0.34, 0.28],
        strip_stations_m: stations.clone(),
    };
    let upper = StripPolar {
        alpha_deg: 5.0,
        total_lift_coefficient: 0.75,
        strip_lift_coefficients: vec![0.75, 0.80, 0.84, 0.70],
        strip_stations_m: stations,
    };
    let stall = StallData::from_wing_strips(&lower, &upper, 1.4).expect("stall");
    let wing = stall.surface(Surface::Wing).expect("wing");
    // Strip 2 reaches 1.4 first: 0.34 + 0.1·α = 1.4 at α = 10.6°.
    assert_relative_eq!(wing.alpha_stall_deg, 10.6, epsilon = 1e-9);
    assert_relative_eq!(wing.stall_station_m, 0.6);
    assert_relative_eq!(stall.cl_alpha_per_deg, 0.09, epsilon = 1e-12);
    assert_relative_eq!(stall.cl_alpha0, 0.3, epsilon = 1e-12);
    assert_relative_eq!(stall.cl_max, 0.3 + 0.09 * 10.6, epsilon = 1e-9);
}

#[test]
fn mismatched_strip_polars_are_rejected() {
    let lower = StripPolar {
        alpha_deg: 2.0,
        total_lift_coefficient: 0.4,
        strip_lift_coefficients: vec![0.4, 0.4],
        strip_stations_m: vec![0.0, 0.5],
    };
    let same_alpha = lower.clone();
    assert!(matches!(
        SurfaceStall::from_strip_polars(&lower, &same_alpha, 1.3),
        Err(AircraftError::Stall(_))
    ));
    let mut short = lower.clone();
    short.alpha_deg = 6.0;
    short.strip_lift_coefficients.pop();
    assert!(matches!(
        SurfaceStall::from_strip_polars(&lower, &short, 1.3),
        Err(AircraftError::Stall(_))
    ));
}

#[test]
fn aircraft_rejects_reserve_above_fuel_load() {
    let mut parts = support::baseline_parts();
    parts.mass.reserve_fuel_kg = 5.0;
    assert!(matches!(
        Aircraft::new(parts),
        Err(AircraftError::ReserveExceedsFuel { .. })
    ));
}

#[test]
fn modified_aircraft_is_revalidated() {
    let aircraft = support::baseline();
    let heavier = aircraft
        .modified(|parts| parts.mass.empty_kg = 14.0)
        .expect("heavier");
    assert_relative_eq!(heavier.mass().take_off_mass_kg(), 18.0);
    assert!(aircraft.modified(|parts| parts.polar.k = 0.0).is_err());
}

#[test]
fn polar_with_negative_minimum_drag_is_rejected() {
    let mut parts = support::baseline_parts();
    parts.polar = DragPolar::new(0.03, -0.2, 0.045);
    assert!(matches!(
        Aircraft::new(parts),
        Err(AircraftError::NonPositive { field: "minimum drag coefficient", value }) if value < 0.0
    ));

    let truth = DragPolar::new(0.01, -0.2, 0.045);
    let cls: Vec<f64> = (0..10).map(|i| 0.1 * i as f64).collect();
    let cds: Vec<f64> = cls.iter().map(|&cl| truth.drag_coefficient(cl)).collect();
    assert!(matches!(
        DragPolar::fit(&cls, &cds),
        Err(AircraftError::NonPositive { field: "minimum drag coefficient", .. })
    ));
}

#[test]
fn flap_increment_cannot_cancel_take_off_lift() {
    let mut parts = support::baseline_parts();
    parts.ground_run = parts.ground_run.with_flap_lift_increment(-1.5);
    assert!(matches!(
        Aircraft::new(parts),
        Err(AircraftError::NonPositive { field: "take-off maximum lift coefficient", value })
            if value < 0.0
    ));
}
