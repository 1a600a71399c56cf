//! Design evaluation at the optimizer boundary.
//!
//! This is the only place a failed mission becomes a penalty score; every
//! integrator below it reports failures as typed errors.

use mdo_aircraft::{Aircraft, AircraftError};
use mdo_config::AircraftConfig;
use tracing::{info, warn};

use crate::facade::aircraft::build;
use crate::mission::steady::SpeedSolverSettings;
use crate::mission::{MissionConfig, MissionError, MissionProfile, plan_mission};

pub use mdo_core::defaults::PENALTY as DEFAULT_PENALTY;

/// Quantity an optimizer minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Objective {
    /// Maximize range; scored as `−range_m`.
    #[default]
    Range,
    /// Minimize the take-off ground roll; the runway-too-long sentinel counts as-is.
    Runway,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationSettings {
    pub objective: Objective,
    pub penalty: f64,
    pub solver: SpeedSolverSettings,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            objective: Objective::default(),
            penalty: DEFAULT_PENALTY,
            solver: SpeedSolverSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DesignEvaluation {
    Feasible {
        score: f64,
        profile: Box<MissionProfile>,
    },
    Infeasible {
        score: f64,
        reason: MissionError,
    },
    /// The catalog record did not describe a valid aircraft.
    Rejected {
        score: f64,
        reason: AircraftError,
    },
}

impl DesignEvaluation {
    pub fn score(&self) -> f64 {
        match self {
            DesignEvaluation::Feasible { score, .. }
            | DesignEvaluation::Infeasible { score, .. }
            | DesignEvaluation::Rejected { score, .. } => *score,
        }
    }

    pub fn is_feasible(&self) -> bool {
        matches!(self, DesignEvaluation::Feasible { .. })
    }

    pub fn profile(&self) -> Option<&MissionProfile> {
        match self {
            DesignEvaluation::Feasible { profile, .. } => Some(profile),
            DesignEvaluation::Infeasible { .. } | DesignEvaluation::Rejected { .. } => None,
        }
    }
}

/// Score one design, substituting the penalty for any mission failure.
pub fn evaluate_design(
    aircraft: &Aircraft,
    mission: &MissionConfig,
    settings: &EvaluationSettings,
) -> DesignEvaluation {
    match plan_mission(aircraft, mission, &settings.solver) {
        Ok(profile) => {
            let score = match settings.objective {
                Objective::Range => -profile.range_m(),
                Objective::Runway => profile.takeoff.ground_roll_m,
            };
            DesignEvaluation::Feasible {
                score,
                profile: Box::new(profile),
            }
        }
        Err(reason) => {
            warn!(aircraft = aircraft.name(), %reason, "design infeasible; applying penalty");
            DesignEvaluation::Infeasible {
                score: settings.penalty,
                reason,
            }
        }
    }
}

/// Evaluate designs in sequence; an infeasible design never stops the batch.
pub fn evaluate_catalog<'a, I>(
    designs: I,
    mission: &MissionConfig,
    settings: &EvaluationSettings,
) -> Vec<(String, DesignEvaluation)>
where
    I: IntoIterator<Item = &'a Aircraft>,
{
    let results: Vec<_> = designs
        .into_iter()
        .map(|aircraft| {
            (
                aircraft.name().to_string(),
                evaluate_design(aircraft, mission, settings),
            )
        })
        .collect();
    log_summary(&results);
    results
}

/// Evaluate catalog records in order. A record that does not convert into a
/// valid aircraft is scored with the penalty and the batch carries on.
pub fn evaluate_configs(
    configs: &[AircraftConfig],
    mission: &MissionConfig,
    settings: &EvaluationSettings,
) -> Vec<(String, DesignEvaluation)> {
    let results: Vec<_> = configs
        .iter()
        .map(|config| {
            let evaluation = match build(config) {
                Ok(aircraft) => evaluate_design(&aircraft, mission, settings),
                Err(reason) => {
                    warn!(aircraft = %config.name, %reason, "invalid design; applying penalty");
                    DesignEvaluation::Rejected {
                        score: settings.penalty,
                        reason,
                    }
                }
            };
            (config.name.clone(), evaluation)
        })
        .collect();
    log_summary(&results);
    results
}

fn log_summary(results: &[(String, DesignEvaluation)]) {
    let feasible = results.iter().filter(|(_, eval)| eval.is_feasible()).count();
    info!(designs = results.len(), feasible, "catalog evaluated");
}
