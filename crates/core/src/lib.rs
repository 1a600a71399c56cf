//! Core constants, unit conversions, and shared primitives for the UAV MDO workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Standard gravity at Earth's surface (m/s²).
    pub const G0: f64 = 9.80665;
    /// Specific gas constant for dry air (J/(kg·K)).
    pub const R_AIR: f64 = 287.052_87;
    /// Ratio of specific heats for air.
    pub const GAMMA_AIR: f64 = 1.4;
    /// Earth radius used for the geopotential altitude conversion (m).
    pub const EARTH_RADIUS_M: f64 = 6_356_766.0;
    /// ISA sea-level temperature (K).
    pub const SEA_LEVEL_TEMPERATURE_K: f64 = 288.15;
    /// ISA sea-level pressure (Pa).
    pub const SEA_LEVEL_PRESSURE_PA: f64 = 101_325.0;
    /// ISA sea-level density (kg/m³).
    pub const SEA_LEVEL_DENSITY_KG_M3: f64 = 1.225;
    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
    /// Watts per mechanical horsepower.
    pub const WATTS_PER_HP: f64 = 745.7;
    /// Metres per inch.
    pub const METRES_PER_INCH: f64 = 0.0254;
}

/// Default values shared by the configuration layer and the segment integrators.
pub mod defaults {
    /// Rolling friction coefficient of the wheels.
    pub const FRICTION_COEFFICIENT: f64 = 0.03;
    /// Rotation speed over stall speed.
    pub const SAFETY_FACTOR: f64 = 1.1;
    /// Ground-roll Euler step (s).
    pub const TIME_STEP_S: f64 = 0.01;
    pub const MAX_TAKEOFF_STEPS: usize = 15_000;
    /// Least throttle held during the descent.
    pub const IDLE_THROTTLE: f64 = 0.1;
    pub const CL_ALPHA_PER_DEG: f64 = 0.08;
    /// Airspeed search bounds (m/s).
    pub const MIN_SPEED_M_S: f64 = 1.0;
    pub const MAX_SPEED_M_S: f64 = 90.0;
    /// `sqrt(f64::EPSILON)`.
    pub const SOLVER_RELATIVE_TOLERANCE: f64 = 1.490_116_119_384_765_6e-8;
    pub const SOLVER_ABSOLUTE_TOLERANCE: f64 = 1.0e-6;
    pub const SOLVER_MAX_ITERATIONS: u64 = 200;
    /// Score of a design whose mission cannot be flown.
    pub const PENALTY: f64 = 1.0e6;
}

/// Basic unit conversion helpers.
///
/// Mass is always carried in kilograms and force in newtons; `weight_n` and
/// `mass_kg` are the only places the two meet.
pub mod units {
    use super::constants::{G0, METRES_PER_INCH, SECONDS_PER_HOUR, WATTS_PER_HP};

    /// Weight (N) of a mass (kg) under standard gravity.
    #[inline]
    pub fn weight_n(mass_kg: f64) -> f64 {
        mass_kg * G0
    }

    /// Mass (kg) corresponding to a weight (N) under standard gravity.
    #[inline]
    pub fn mass_kg(weight_n: f64) -> f64 {
        weight_n / G0
    }

    /// Convert a volumetric flow in litres per hour into a mass flow in kg/s.
    #[inline]
    pub fn litres_per_hour_to_kg_s(flow_l_per_h: f64, density_kg_per_l: f64) -> f64 {
        flow_l_per_h * density_kg_per_l / SECONDS_PER_HOUR
    }

    /// Convert inches to metres.
    #[inline]
    pub fn inches_to_m(v: f64) -> f64 {
        v * METRES_PER_INCH
    }

    /// Convert mechanical horsepower to watts.
    #[inline]
    pub fn hp_to_watts(v: f64) -> f64 {
        v * WATTS_PER_HP
    }

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::SECONDS_PER_HOUR;

    /// Convert seconds to hours.
    #[inline]
    pub fn seconds_to_hours(seconds: f64) -> f64 {
        seconds / SECONDS_PER_HOUR
    }

    /// Split a duration into whole hours, minutes and seconds.
    pub fn split_hms(seconds: f64) -> (u64, u64, f64) {
        let total = seconds.max(0.0);
        let hours = (total / SECONDS_PER_HOUR).floor();
        let remaining = total - hours * SECONDS_PER_HOUR;
        let minutes = (remaining / 60.0).floor();
        (hours as u64, minutes as u64, remaining - minutes * 60.0)
    }
}

/// Evenly spaced samples over a closed interval.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}
