//! Stall data per lifting surface, derived from spanwise strip loads.

use std::collections::BTreeMap;
use std::fmt;

use crate::AircraftError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Surface {
    Wing,
    Horizontal,
    Vertical,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Surface::Wing => "wing",
            Surface::Horizontal => "horizontal tail",
            Surface::Vertical => "vertical tail",
        };
        f.write_str(name)
    }
}

/// Spanwise strip loading of one surface at one angle of attack, paired with
/// the whole-aircraft lift coefficient at that angle.
#[derive(Debug, Clone, PartialEq)]
pub struct StripPolar {
    pub alpha_deg: f64,
    pub total_lift_coefficient: f64,
    pub strip_lift_coefficients: Vec<f64>,
    /// Spanwise leading-edge station of each strip (m).
    pub strip_stations_m: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceStall {
    /// Angle of attack at which the first strip reaches the airfoil CLmax.
    pub alpha_stall_deg: f64,
    /// Spanwise station of that strip (m).
    pub stall_station_m: f64,
    pub cl_max_airfoil: f64,
    pub strip_stall_angles_deg: Vec<f64>,
}

impl SurfaceStall {
    /// Extrapolate each strip's lift line from two polars to the airfoil CLmax.
    pub fn from_strip_polars(
        lower: &StripPolar,
        upper: &StripPolar,
        cl_max_airfoil: f64,
    ) -> Result<Self, AircraftError> {
        let d_alpha = upper.alpha_deg - lower.alpha_deg;
        if !(d_alpha.is_finite() && d_alpha != 0.0) {
            return Err(AircraftError::Stall(
                "strip polars must be at distinct angles of attack".to_string(),
            ));
        }
        let strips = lower.strip_lift_coefficients.len();
        if strips == 0
            || upper.strip_lift_coefficients.len() != strips
            || lower.strip_stations_m.len() != strips
        {
            return Err(AircraftError::Stall(format!(
                "strip counts differ or are empty ({} vs {})",
                strips,
                upper.strip_lift_coefficients.len()
            )));
        }

        let strip_stall_angles_deg: Vec<f64> = lower
            .strip_lift_coefficients
            .iter()
            .zip(&upper.strip_lift_coefficients)
            .map(|(&cl_low, &cl_high)| {
                let slope = (cl_high - cl_low) / d_alpha;
                lower.alpha_deg + (cl_max_airfoil - cl_low) / slope
            })
            .collect();

        let (index, alpha_stall_deg) = strip_stall_angles_deg
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, alpha)| alpha.is_finite())
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| AircraftError::Stall("no strip has a finite lift slope".to_string()))?;

        Ok(Self {
            alpha_stall_deg,
            stall_station_m: lower.strip_stations_m[index],
            cl_max_airfoil,
            strip_stall_angles_deg,
        })
    }
}

/// Whole-aircraft lift line and per-surface stall data.
#[derive(Debug, Clone, PartialEq)]
pub struct StallData {
    pub cl_max: f64,
    pub cl_alpha0: f64,
    /// Lift-curve slope (1/deg).
    pub cl_alpha_per_deg: f64,
    pub surfaces: BTreeMap<Surface, SurfaceStall>,
}

impl StallData {
    pub fn new(cl_max: f64, cl_alpha0: f64, cl_alpha_per_deg: f64) -> Self {
        Self {
            cl_max,
            cl_alpha0,
            cl_alpha_per_deg,
            surfaces: BTreeMap::new(),
        }
    }

    /// Wing stall from strip loads; the aircraft CLmax is read off the total
    /// lift line at the wing stall angle.
    pub fn from_wing_strips(
        lower: &StripPolar,
        upper: &StripPolar,
        cl_max_airfoil: f64,
    ) -> Result<Self, AircraftError> {
        let wing = SurfaceStall::from_strip_polars(lower, upper, cl_max_airfoil)?;
        let slope = (upper.total_lift_coefficient - lower.total_lift_coefficient)
            / (upper.alpha_deg - lower.alpha_deg);
        let cl_at = |alpha: f64| lower.total_lift_coefficient + slope * (alpha - lower.alpha_deg);
        let mut data = Self::new(cl_at(wing.alpha_stall_deg), cl_at(0.0), slope);
        data.surfaces.insert(Surface::Wing, wing);
        data.validate()?;
        Ok(data)
    }

    pub fn with_surface(mut self, surface: Surface, stall: SurfaceStall) -> Self {
        self.surfaces.insert(surface, stall);
        self
    }

    pub fn surface(&self, surface: Surface) -> Option<&SurfaceStall> {
        self.surfaces.get(&surface)
    }

    pub fn validate(&self) -> Result<(), AircraftError> {
        if !(self.cl_max.is_finite() && self.cl_max > 0.0) {
            return Err(AircraftError::NonPositive {
                field: "maximum lift coefficient",
                value: self.cl_max,
            });
        }
        if !(self.cl_alpha0.is_finite() && self.cl_alpha_per_deg.is_finite()) {
            return Err(AircraftError::NonFinite {
                field: "lift curve",
            });
        }
        Ok(())
    }
}
