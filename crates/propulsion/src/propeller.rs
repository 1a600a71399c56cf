//! Propeller dynamic-thrust models and the quadratic thrust-curve fit built from them.

use std::f64::consts::PI;

use mdo_core::constants::SEA_LEVEL_DENSITY_KG_M3;
use mdo_core::linspace;
use mdo_core::units::{hp_to_watts, inches_to_m};
use mdo_numerics::{ScalarOptions, find_root, fit_quadratic};
use tracing::debug;

use crate::{PropulsionError, ThrustCurve};

/// Non-ideal propeller efficiency applied on top of the momentum-theory efficiency.
pub const ACTUATOR_EFFICIENCY_CORRECTION: f64 = 0.5;
/// Airspeed divisor of the empirical formula's dynamic term.
pub const EMPIRICAL_DYNAMIC_CORRECTION: f64 = 1.3;

const FIT_MIN_SPEED_M_S: f64 = 0.5;
const FIT_MAX_SPEED_M_S: f64 = 50.0;
const FIT_SAMPLES: usize = 10;

/// Engine and propeller data needed by the thrust models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSpec {
    pub propeller_diameter_in: f64,
    pub propeller_pitch_in: f64,
    pub rpm: f64,
    pub max_power_hp: f64,
}

impl EngineSpec {
    pub fn validate(&self) -> Result<(), PropulsionError> {
        for (field, value) in [
            ("propeller diameter", self.propeller_diameter_in),
            ("propeller pitch", self.propeller_pitch_in),
            ("rpm", self.rpm),
            ("maximum power", self.max_power_hp),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(PropulsionError::NonPositive { field, value });
            }
        }
        Ok(())
    }

    pub fn disk_area_m2(&self) -> f64 {
        let radius = inches_to_m(self.propeller_diameter_in) / 2.0;
        PI * radius * radius
    }

    pub fn max_power_w(&self) -> f64 {
        hp_to_watts(self.max_power_hp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThrustModel {
    /// Momentum theory: `T = P·η_ideal(T)·η_c / v`, solved for `T`.
    #[default]
    ActuatorDisk,
    /// Static/dynamic propeller thrust correlation in diameter, pitch and rpm.
    Empirical,
}

/// Maximum thrust (N) the engine produces at `airspeed_m_s`.
pub fn dynamic_thrust(
    engine: &EngineSpec,
    airspeed_m_s: f64,
    model: ThrustModel,
) -> Result<f64, PropulsionError> {
    engine.validate()?;
    match model {
        ThrustModel::ActuatorDisk => actuator_disk_thrust(engine, airspeed_m_s),
        ThrustModel::Empirical => Ok(empirical_thrust(engine, airspeed_m_s)),
    }
}

fn actuator_disk_thrust(engine: &EngineSpec, v: f64) -> Result<f64, PropulsionError> {
    if !(v.is_finite() && v > 0.0) {
        return Err(PropulsionError::InvalidAirspeed(v));
    }
    let area = engine.disk_area_m2();
    let available = engine.max_power_w() * ACTUATOR_EFFICIENCY_CORRECTION / v;
    let residual = |thrust: f64| {
        let induced = (v * v + 2.0 * thrust / (SEA_LEVEL_DENSITY_KG_M3 * area)).sqrt() - v;
        let eta_ideal = 1.0 / (induced / (2.0 * v) + 1.0);
        available * eta_ideal - thrust
    };
    // residual(0) = available > 0 and residual(available) < 0 since η_ideal < 1.
    let root = find_root(residual, 0.0, available, &ScalarOptions::default())?;
    Ok(root.x)
}

fn empirical_thrust(engine: &EngineSpec, v: f64) -> f64 {
    let rpm = engine.rpm;
    let diameter = engine.propeller_diameter_in;
    let pitch = engine.propeller_pitch_in;
    4.392_399e-8 * rpm * diameter.powf(3.5) / pitch.sqrt()
        * (4.233_33e-4 * rpm * pitch - v / EMPIRICAL_DYNAMIC_CORRECTION)
}

/// Sample a thrust model over 0.5–50 m/s and fit the quadratic thrust curve.
///
/// The returned curve has no altitude lapse; set one with
/// [`ThrustCurve::with_altitude_lapse`].
pub fn thrust_curve_from_engine(
    engine: &EngineSpec,
    model: ThrustModel,
) -> Result<ThrustCurve, PropulsionError> {
    let speeds = linspace(FIT_MIN_SPEED_M_S, FIT_MAX_SPEED_M_S, FIT_SAMPLES);
    let thrusts = speeds
        .iter()
        .map(|&v| dynamic_thrust(engine, v, model))
        .collect::<Result<Vec<_>, _>>()?;
    let fit = fit_quadratic(&speeds, &thrusts)?;
    debug!(
        ?model,
        t0 = fit.c0,
        t1 = fit.c1,
        t2 = fit.c2,
        rms = fit.rms_residual(&speeds, &thrusts),
        "fitted thrust curve"
    );
    Ok(ThrustCurve {
        t0: fit.c0,
        t1: fit.c1,
        t2: fit.c2,
        altitude_lapse_per_m: 0.0,
    })
}
