//! Aircraft state bundle consumed by the performance integrators.
//!
//! An [`Aircraft`] is assembled once from [`AircraftParts`] and validated; the
//! segment integrators only ever see a fully populated, immutable bundle.

pub mod geometry;
pub mod polar;
pub mod stall;

pub use geometry::{Planform, PlanformStation, PlanformSummary, ReferenceGeometry};
pub use polar::{DEFAULT_FLAP_LIFT_INCREMENT, DragPolar, GroundRunAero};
pub use stall::{StallData, StripPolar, Surface, SurfaceStall};

use mdo_core::units::weight_n;
use mdo_numerics::NumericsError;
use mdo_propulsion::{FuelSystem, PropulsionError, ThrustCurve};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AircraftError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} is not finite")]
    NonFinite { field: &'static str },
    #[error("reserve fuel {reserve_kg} kg exceeds the fuel load of {fuel_kg} kg")]
    ReserveExceedsFuel { reserve_kg: f64, fuel_kg: f64 },
    #[error("invalid planform: {0}")]
    Planform(String),
    #[error("invalid stall data: {0}")]
    Stall(String),
    #[error(transparent)]
    Propulsion(#[from] PropulsionError),
    #[error(transparent)]
    Numerics(#[from] NumericsError),
}

/// Mass figures (kg).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassBreakdown {
    pub empty_kg: f64,
    pub fuel_kg: f64,
    pub reserve_fuel_kg: f64,
}

impl MassBreakdown {
    pub fn take_off_mass_kg(&self) -> f64 {
        self.empty_kg + self.fuel_kg
    }

    /// Mass on landing with only the reserve left.
    pub fn landing_mass_kg(&self) -> f64 {
        self.empty_kg + self.reserve_fuel_kg
    }

    /// Fuel available to the mission above the reserve.
    pub fn usable_fuel_kg(&self) -> f64 {
        self.fuel_kg - self.reserve_fuel_kg
    }

    pub fn validate(&self) -> Result<(), AircraftError> {
        if !(self.empty_kg.is_finite() && self.empty_kg > 0.0) {
            return Err(AircraftError::NonPositive {
                field: "empty mass",
                value: self.empty_kg,
            });
        }
        if !(self.fuel_kg.is_finite() && self.fuel_kg >= 0.0) {
            return Err(AircraftError::NonPositive {
                field: "fuel mass",
                value: self.fuel_kg,
            });
        }
        if !(self.reserve_fuel_kg.is_finite() && self.reserve_fuel_kg >= 0.0) {
            return Err(AircraftError::NonPositive {
                field: "reserve fuel",
                value: self.reserve_fuel_kg,
            });
        }
        if self.reserve_fuel_kg > self.fuel_kg {
            return Err(AircraftError::ReserveExceedsFuel {
                reserve_kg: self.reserve_fuel_kg,
                fuel_kg: self.fuel_kg,
            });
        }
        Ok(())
    }
}

/// Inputs of an [`Aircraft`] before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftParts {
    pub name: String,
    pub geometry: ReferenceGeometry,
    pub polar: DragPolar,
    pub ground_run: GroundRunAero,
    pub stall: StallData,
    pub thrust: ThrustCurve,
    pub fuel_system: FuelSystem,
    pub mass: MassBreakdown,
}

/// Validated, immutable aircraft description.
#[derive(Debug, Clone, PartialEq)]
pub struct Aircraft {
    parts: AircraftParts,
}

impl Aircraft {
    pub fn new(parts: AircraftParts) -> Result<Self, AircraftError> {
        parts.geometry.validate()?;
        parts.polar.validate()?;
        parts.ground_run.validate()?;
        parts.stall.validate()?;
        let take_off_cl_max = parts.stall.cl_max + parts.ground_run.flap_lift_increment;
        if !(take_off_cl_max.is_finite() && take_off_cl_max > 0.0) {
            return Err(AircraftError::NonPositive {
                field: "take-off maximum lift coefficient",
                value: take_off_cl_max,
            });
        }
        parts.thrust.validate()?;
        // Re-run the fuel-system checks in case the struct was built literally.
        FuelSystem::new(
            parts.fuel_system.max_consumption_l_per_h,
            parts.fuel_system.fuel_density_kg_per_l,
        )?;
        parts.mass.validate()?;
        Ok(Self { parts })
    }

    pub fn name(&self) -> &str {
        &self.parts.name
    }

    pub fn geometry(&self) -> &ReferenceGeometry {
        &self.parts.geometry
    }

    pub fn wing_area_m2(&self) -> f64 {
        self.parts.geometry.wing_area_m2
    }

    pub fn polar(&self) -> &DragPolar {
        &self.parts.polar
    }

    pub fn ground_run(&self) -> &GroundRunAero {
        &self.parts.ground_run
    }

    pub fn stall(&self) -> &StallData {
        &self.parts.stall
    }

    pub fn thrust(&self) -> &ThrustCurve {
        &self.parts.thrust
    }

    pub fn fuel_system(&self) -> &FuelSystem {
        &self.parts.fuel_system
    }

    pub fn mass(&self) -> &MassBreakdown {
        &self.parts.mass
    }

    pub fn take_off_weight_n(&self) -> f64 {
        weight_n(self.parts.mass.take_off_mass_kg())
    }

    /// Take-off CLmax: clean CLmax plus the flap increment.
    pub fn take_off_cl_max(&self) -> f64 {
        self.parts.stall.cl_max + self.parts.ground_run.flap_lift_increment
    }

    pub fn parts(&self) -> &AircraftParts {
        &self.parts
    }

    /// Rebuild with modified parts, re-running validation.
    pub fn modified(&self, edit: impl FnOnce(&mut AircraftParts)) -> Result<Self, AircraftError> {
        let mut parts = self.parts.clone();
        edit(&mut parts);
        Self::new(parts)
    }
}
