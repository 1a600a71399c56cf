use approx::assert_relative_eq;
use uav_mdo::atmosphere::{
    AtmosphereError, LAYERS, geometric_altitude, isa, layer_bases,
};

#[test]
fn sea_level_matches_standard_day() {
    let state = isa(0.0).expect("sea level");
    assert_relative_eq!(state.temperature_k, 288.15, max_relative = 1e-4);
    assert_relative_eq!(state.pressure_pa, 101_325.0, max_relative = 1e-4);
    assert_relative_eq!(state.density_kg_m3, 1.225, max_relative = 1e-3);
}

#[test]
fn layers_join_continuously() {
    for layer in &LAYERS[..LAYERS.len() - 1] {
        let boundary = geometric_altitude(layer.top_geopotential_m);
        let below = isa(boundary - 1.0e-3).expect("below boundary");
        let above = isa(boundary + 1.0e-3).expect("above boundary");
        assert_relative_eq!(below.temperature_k, above.temperature_k, max_relative = 1e-6);
        assert_relative_eq!(below.pressure_pa, above.pressure_pa, max_relative = 1e-6);
    }
}

#[test]
fn tropopause_pressure_matches_tables() {
    let (temperature, pressure) = layer_bases()[1];
    assert_relative_eq!(temperature, 216.65, epsilon = 1e-9);
    assert_relative_eq!(pressure, 22_632.06, max_relative = 1e-4);
}

#[test]
fn density_falls_with_altitude() {
    let mut previous = f64::INFINITY;
    for altitude in (0..=20).map(|i| i as f64 * 2_500.0) {
        let density = isa(altitude).expect("in range").density_kg_m3;
        assert!(density < previous, "density rose at {altitude} m");
        previous = density;
    }
}

#[test]
fn out_of_range_altitudes_are_rejected() {
    assert!(matches!(isa(-1.0), Err(AtmosphereError::BelowSeaLevel { .. })));
    assert!(matches!(isa(f64::NAN), Err(AtmosphereError::NonFinite)));
    assert!(matches!(
        isa(60_000.0),
        Err(AtmosphereError::AboveModelCeiling { .. })
    ));
}
