#![allow(dead_code)]

use uav_mdo::aircraft::{
    Aircraft, AircraftParts, DragPolar, GroundRunAero, MassBreakdown, ReferenceGeometry, StallData,
};
use uav_mdo::propulsion::{FuelSystem, ThrustCurve};

pub fn baseline_parts() -> AircraftParts {
    AircraftParts {
        name: "Baseline".to_string(),
        geometry: ReferenceGeometry::new(0.8, 2.4, 0.3333),
        polar: DragPolar::new(0.03, -0.01, 0.045),
        ground_run: GroundRunAero::new(0.5, 0.06),
        stall: StallData::new(1.3, 0.3, 0.085),
        thrust: ThrustCurve {
            t0: 60.0,
            t1: -0.6,
            t2: -0.008,
            altitude_lapse_per_m: -2.0e-5,
        },
        fuel_system: FuelSystem::new(2.5, 0.74).expect("fuel system"),
        mass: MassBreakdown {
            empty_kg: 12.0,
            fuel_kg: 4.0,
            reserve_fuel_kg: 0.4,
        },
    }
}

pub fn baseline() -> Aircraft {
    Aircraft::new(baseline_parts()).expect("baseline aircraft")
}

/// Baseline airframe with airspeed- and altitude-independent thrust and no linear drag term.
pub fn flat_thrust(thrust_n: f64) -> Aircraft {
    let mut parts = baseline_parts();
    parts.thrust = ThrustCurve::flat(thrust_n);
    parts.polar = DragPolar::new(0.03, 0.0, 0.045);
    Aircraft::new(parts).expect("flat-thrust aircraft")
}
