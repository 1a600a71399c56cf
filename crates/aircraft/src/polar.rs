//! Drag polar and ground-run aerodynamics.

use mdo_numerics::fit_quadratic;

use crate::AircraftError;

/// Flap lift increment added to the clean CLmax for take-off.
pub const DEFAULT_FLAP_LIFT_INCREMENT: f64 = 0.4;

/// `CD = cd0 + cd1·CL + k·CL²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPolar {
    pub cd0: f64,
    pub cd1: f64,
    pub k: f64,
}

impl DragPolar {
    pub fn new(cd0: f64, cd1: f64, k: f64) -> Self {
        Self { cd0, cd1, k }
    }

    pub fn drag_coefficient(&self, cl: f64) -> f64 {
        self.cd0 + self.cd1 * cl + self.k * cl * cl
    }

    /// Lift coefficient of minimum drag at fixed weight; the linear term only
    /// contributes a constant `cd1·W` to the drag force.
    pub fn min_drag_lift_coefficient(&self) -> f64 {
        (self.cd0 / self.k).sqrt()
    }

    /// Airspeed (m/s) of minimum drag for a weight (N), density (kg/m³) and
    /// wing area (m²).
    pub fn min_drag_speed(&self, weight_n: f64, density_kg_m3: f64, wing_area_m2: f64) -> f64 {
        (2.0 * weight_n / (density_kg_m3 * wing_area_m2) * (self.k / self.cd0).sqrt()).sqrt()
    }

    /// Vertex of the parabola, `cd0 − cd1²/(4k)`.
    pub fn minimum_drag_coefficient(&self) -> f64 {
        self.cd0 - self.cd1 * self.cd1 / (4.0 * self.k)
    }

    pub fn max_lift_to_drag(&self) -> f64 {
        let cl = self.min_drag_lift_coefficient();
        cl / self.drag_coefficient(cl)
    }

    /// Least-squares polar through `(CL, CD)` samples.
    pub fn fit(
        lift_coefficients: &[f64],
        drag_coefficients: &[f64],
    ) -> Result<Self, AircraftError> {
        let fit = fit_quadratic(lift_coefficients, drag_coefficients)?;
        let polar = Self::new(fit.c0, fit.c1, fit.c2);
        polar.validate()?;
        Ok(polar)
    }

    pub fn validate(&self) -> Result<(), AircraftError> {
        if !(self.cd0.is_finite() && self.cd0 > 0.0) {
            return Err(AircraftError::NonPositive {
                field: "zero-lift drag coefficient",
                value: self.cd0,
            });
        }
        if !(self.k.is_finite() && self.k > 0.0) {
            return Err(AircraftError::NonPositive {
                field: "induced drag factor",
                value: self.k,
            });
        }
        if !self.cd1.is_finite() {
            return Err(AircraftError::NonFinite {
                field: "linear drag coefficient",
            });
        }
        let min_cd = self.minimum_drag_coefficient();
        if min_cd <= 0.0 {
            return Err(AircraftError::NonPositive {
                field: "minimum drag coefficient",
                value: min_cd,
            });
        }
        Ok(())
    }
}

/// Aerodynamic coefficients held constant during the ground roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundRunAero {
    pub lift_coefficient: f64,
    pub drag_coefficient: f64,
    pub flap_lift_increment: f64,
}

impl GroundRunAero {
    pub fn new(lift_coefficient: f64, drag_coefficient: f64) -> Self {
        Self {
            lift_coefficient,
            drag_coefficient,
            flap_lift_increment: DEFAULT_FLAP_LIFT_INCREMENT,
        }
    }

    /// Ground-run coefficients at zero angle of attack from a ground-effect polar.
    pub fn from_polar(cl_alpha0: f64, ground_polar: &DragPolar) -> Self {
        Self::new(cl_alpha0, ground_polar.drag_coefficient(cl_alpha0))
    }

    pub fn with_flap_lift_increment(mut self, increment: f64) -> Self {
        self.flap_lift_increment = increment;
        self
    }

    pub fn validate(&self) -> Result<(), AircraftError> {
        if !(self.drag_coefficient.is_finite() && self.drag_coefficient >= 0.0) {
            return Err(AircraftError::NonPositive {
                field: "ground-run drag coefficient",
                value: self.drag_coefficient,
            });
        }
        if !(self.lift_coefficient.is_finite() && self.flap_lift_increment.is_finite()) {
            return Err(AircraftError::NonFinite {
                field: "ground-run lift coefficient",
            });
        }
        Ok(())
    }
}
