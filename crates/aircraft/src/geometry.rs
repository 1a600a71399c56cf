//! Reference geometry and sectioned planform reduction.

use crate::AircraftError;

/// Wing reference quantities used by the performance model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceGeometry {
    pub wing_area_m2: f64,
    pub wing_span_m: f64,
    pub mean_chord_m: f64,
    pub horizontal_tail_area_m2: Option<f64>,
    pub vertical_tail_area_m2: Option<f64>,
}

impl ReferenceGeometry {
    pub fn new(wing_area_m2: f64, wing_span_m: f64, mean_chord_m: f64) -> Self {
        Self {
            wing_area_m2,
            wing_span_m,
            mean_chord_m,
            horizontal_tail_area_m2: None,
            vertical_tail_area_m2: None,
        }
    }

    /// Wing geometry taken from a reduced planform.
    pub fn from_wing(wing: &PlanformSummary) -> Self {
        Self::new(wing.area_m2, wing.span_m, wing.mean_aerodynamic_chord_m)
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.wing_span_m * self.wing_span_m / self.wing_area_m2
    }

    pub fn validate(&self) -> Result<(), AircraftError> {
        for (field, value) in [
            ("wing area", self.wing_area_m2),
            ("wing span", self.wing_span_m),
            ("mean chord", self.mean_chord_m),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(AircraftError::NonPositive { field, value });
            }
        }
        Ok(())
    }
}

/// One spanwise station of a lifting surface. `span_m` is the distance from the
/// previous station; it is ignored for the root station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanformStation {
    pub chord_m: f64,
    pub span_m: f64,
    /// Leading-edge sweep expressed as chordwise offset per unit span.
    pub sweep_le: f64,
}

/// A lifting surface described root to tip by its stations.
#[derive(Debug, Clone, PartialEq)]
pub struct Planform {
    pub stations: Vec<PlanformStation>,
    /// Mirrored about the centreline (wings, horizontal tails).
    pub symmetric: bool,
}

/// Area, mean aerodynamic chord and span of a [`Planform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanformSummary {
    pub area_m2: f64,
    pub mean_aerodynamic_chord_m: f64,
    pub span_m: f64,
    /// Quarter-chord sweep as chordwise offset per unit (half) span.
    pub quarter_chord_sweep: f64,
    /// Chordwise position of the tip leading edge relative to the root.
    pub tip_offset_m: f64,
}

impl Planform {
    /// Reduce the stations to reference quantities using trapezoidal sections.
    pub fn summarize(&self) -> Result<PlanformSummary, AircraftError> {
        if self.stations.len() < 2 {
            return Err(AircraftError::Planform(format!(
                "at least two stations are required, got {}",
                self.stations.len()
            )));
        }

        let mut area = 0.0;
        let mut mac_moment = 0.0;
        let mut span = 0.0;
        let mut tip_offset = 0.0;
        for pair in self.stations.windows(2) {
            let (root, tip) = (pair[0], pair[1]);
            if !(root.chord_m > 0.0 && tip.chord_m > 0.0 && tip.span_m > 0.0) {
                return Err(AircraftError::Planform(format!(
                    "section chords and spans must be positive (chords {} and {}, span {})",
                    root.chord_m, tip.chord_m, tip.span_m
                )));
            }
            let section_area = tip.span_m * (root.chord_m + tip.chord_m) / 2.0;
            let taper = tip.chord_m / root.chord_m;
            let section_mac =
                2.0 / 3.0 * root.chord_m * (1.0 + taper + taper * taper) / (1.0 + taper);
            area += section_area;
            mac_moment += section_area * section_mac;
            span += tip.span_m;
            tip_offset += tip.sweep_le * tip.span_m;
        }

        let root_chord = self.stations[0].chord_m;
        let tip_chord = self.stations[self.stations.len() - 1].chord_m;
        let quarter_chord_sweep = (tip_offset + (tip_chord - root_chord) / 4.0) / span;
        let mirror = if self.symmetric { 2.0 } else { 1.0 };
        Ok(PlanformSummary {
            area_m2: mirror * area,
            mean_aerodynamic_chord_m: mac_moment / area,
            span_m: mirror * span,
            quarter_chord_sweep,
            tip_offset_m: tip_offset,
        })
    }
}
