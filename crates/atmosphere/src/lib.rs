//! International Standard Atmosphere (ISA) up to the 51 km geopotential boundary.
//!
//! The model uses the five lowest ISA layers with piecewise-linear temperature
//! lapse rates. Geometric altitude is converted to geopotential altitude with
//! the Earth-radius correction before the layer lookup, and viscosity follows
//! Sutherland's law.

use mdo_core::constants::{
    EARTH_RADIUS_M, G0, GAMMA_AIR, R_AIR, SEA_LEVEL_DENSITY_KG_M3, SEA_LEVEL_PRESSURE_PA,
    SEA_LEVEL_TEMPERATURE_K,
};
use thiserror::Error;

const SUTHERLAND_BETA: f64 = 1.458e-6; // kg/(m·s·K^0.5)
const SUTHERLAND_S_K: f64 = 110.4;

/// One ISA layer described by its geopotential base altitude and lapse rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub base_geopotential_m: f64,
    pub top_geopotential_m: f64,
    /// Temperature gradient (K/m); zero for isothermal layers.
    pub lapse_k_per_m: f64,
}

/// Modelled layers, ordered from sea level upward.
pub const LAYERS: [Layer; 5] = [
    Layer {
        base_geopotential_m: 0.0,
        top_geopotential_m: 11_000.0,
        lapse_k_per_m: -0.0065,
    },
    Layer {
        base_geopotential_m: 11_000.0,
        top_geopotential_m: 20_000.0,
        lapse_k_per_m: 0.0,
    },
    Layer {
        base_geopotential_m: 20_000.0,
        top_geopotential_m: 32_000.0,
        lapse_k_per_m: 0.001,
    },
    Layer {
        base_geopotential_m: 32_000.0,
        top_geopotential_m: 47_000.0,
        lapse_k_per_m: 0.0028,
    },
    Layer {
        base_geopotential_m: 47_000.0,
        top_geopotential_m: 51_000.0,
        lapse_k_per_m: 0.0,
    },
];

/// Highest geopotential altitude covered by the model (m).
pub const CEILING_GEOPOTENTIAL_M: f64 = 51_000.0;

/// Atmospheric properties at a given geometric altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereState {
    pub altitude_m: f64,
    pub geopotential_altitude_m: f64,
    pub temperature_k: f64,
    pub pressure_pa: f64,
    pub density_kg_m3: f64,
    pub viscosity_pa_s: f64,
}

impl AtmosphereState {
    /// Speed of sound (m/s).
    pub fn speed_of_sound_m_s(&self) -> f64 {
        (GAMMA_AIR * R_AIR * self.temperature_k).sqrt()
    }

    /// Density relative to the ISA sea-level value.
    pub fn density_ratio(&self) -> f64 {
        self.density_kg_m3 / SEA_LEVEL_DENSITY_KG_M3
    }

    /// Kinematic viscosity (m²/s).
    pub fn kinematic_viscosity_m2_s(&self) -> f64 {
        self.viscosity_pa_s / self.density_kg_m3
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum AtmosphereError {
    #[error("altitude {altitude_m} m is below sea level")]
    BelowSeaLevel { altitude_m: f64 },
    #[error("altitude {altitude_m} m exceeds the model ceiling of {ceiling_m} m")]
    AboveModelCeiling { altitude_m: f64, ceiling_m: f64 },
    #[error("altitude is not a finite number")]
    NonFinite,
}

/// Convert geometric altitude (m) to geopotential altitude (m).
#[inline]
pub fn geopotential_altitude(altitude_m: f64) -> f64 {
    EARTH_RADIUS_M * altitude_m / (EARTH_RADIUS_M + altitude_m)
}

/// Convert geopotential altitude (m) back to geometric altitude (m).
#[inline]
pub fn geometric_altitude(geopotential_m: f64) -> f64 {
    EARTH_RADIUS_M * geopotential_m / (EARTH_RADIUS_M - geopotential_m)
}

/// Dynamic viscosity (Pa·s) from Sutherland's law.
#[inline]
pub fn sutherland_viscosity(temperature_k: f64) -> f64 {
    SUTHERLAND_BETA * temperature_k.powf(1.5) / (temperature_k + SUTHERLAND_S_K)
}

/// Evaluate the ISA at a geometric altitude.
pub fn isa(altitude_m: f64) -> Result<AtmosphereState, AtmosphereError> {
    if !altitude_m.is_finite() {
        return Err(AtmosphereError::NonFinite);
    }
    if altitude_m < 0.0 {
        return Err(AtmosphereError::BelowSeaLevel { altitude_m });
    }
    let h = geopotential_altitude(altitude_m);
    if h > CEILING_GEOPOTENTIAL_M {
        return Err(AtmosphereError::AboveModelCeiling {
            altitude_m,
            ceiling_m: geometric_altitude(CEILING_GEOPOTENTIAL_M),
        });
    }

    let mut base_temperature = SEA_LEVEL_TEMPERATURE_K;
    let mut base_pressure = SEA_LEVEL_PRESSURE_PA;
    for (index, layer) in LAYERS.iter().enumerate() {
        let last = index + 1 == LAYERS.len();
        if h <= layer.top_geopotential_m || last {
            let (temperature_k, pressure_pa) =
                layer_state(layer, base_temperature, base_pressure, h);
            return Ok(AtmosphereState {
                altitude_m,
                geopotential_altitude_m: h,
                temperature_k,
                pressure_pa,
                density_kg_m3: pressure_pa / (R_AIR * temperature_k),
                viscosity_pa_s: sutherland_viscosity(temperature_k),
            });
        }
        let (t_top, p_top) = layer_state(
            layer,
            base_temperature,
            base_pressure,
            layer.top_geopotential_m,
        );
        base_temperature = t_top;
        base_pressure = p_top;
    }

    // LAYERS is non-empty and the last layer always returns above.
    Err(AtmosphereError::AboveModelCeiling {
        altitude_m,
        ceiling_m: geometric_altitude(CEILING_GEOPOTENTIAL_M),
    })
}

/// Temperature and pressure inside `layer` at geopotential altitude `h`, given
/// the layer base conditions.
pub fn layer_state(
    layer: &Layer,
    base_temperature_k: f64,
    base_pressure_pa: f64,
    h: f64,
) -> (f64, f64) {
    let dh = h - layer.base_geopotential_m;
    if layer.lapse_k_per_m == 0.0 {
        let pressure = base_pressure_pa * (-G0 * dh / (R_AIR * base_temperature_k)).exp();
        (base_temperature_k, pressure)
    } else {
        let temperature = base_temperature_k + layer.lapse_k_per_m * dh;
        let exponent = -G0 / (layer.lapse_k_per_m * R_AIR);
        let pressure = base_pressure_pa * (temperature / base_temperature_k).powf(exponent);
        (temperature, pressure)
    }
}

/// Base temperature and pressure of every layer, chained from sea level.
pub fn layer_bases() -> [(f64, f64); 5] {
    let mut bases = [(0.0, 0.0); 5];
    let mut temperature = SEA_LEVEL_TEMPERATURE_K;
    let mut pressure = SEA_LEVEL_PRESSURE_PA;
    for (index, layer) in LAYERS.iter().enumerate() {
        bases[index] = (temperature, pressure);
        let (t_top, p_top) = layer_state(layer, temperature, pressure, layer.top_geopotential_m);
        temperature = t_top;
        pressure = p_top;
    }
    bases
}
