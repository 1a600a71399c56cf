//! Re-exported APIs and configuration conversions for consumers of the mission crate.

pub use crate::evaluate::{
    DEFAULT_PENALTY, DesignEvaluation, EvaluationSettings, Objective, evaluate_catalog,
    evaluate_configs, evaluate_design,
};
pub use crate::mission::climb::{ClimbConfig, plan_climb};
pub use crate::mission::cruise::{
    CruiseConfig, CruisePlan, breguet_constant_cl_range, plan_cruise,
};
pub use crate::mission::descent::{DEFAULT_IDLE_THROTTLE, DescentConfig, plan_descent};
pub use crate::mission::steady::{
    FlightCondition, ForceBalance, InfeasibleReason, MinimumThrottle, PointSolution,
    QuarticStationary, SpeedSolver, SpeedSolverKind, SpeedSolverSettings, solve_point,
};
pub use crate::mission::takeoff::{
    RUNWAY_TOO_LONG_M, TakeoffConfig, TakeoffOutcome, TakeoffPlan, plan_takeoff,
};
pub use crate::mission::{
    MissionConfig, MissionError, MissionProfile, Segment, SegmentError, SegmentResult,
    SegmentStep, plan_mission,
};

pub mod aircraft {
    use mdo_aircraft::{
        Aircraft, AircraftError, AircraftParts, DragPolar, GroundRunAero, MassBreakdown, Planform,
        PlanformStation, ReferenceGeometry, StallData,
    };
    use mdo_config::{
        AircraftConfig, GeometryConfig, PolarConfig, SurfacePlanformConfig, ThrustConfig,
        ThrustModelConfig,
    };
    use mdo_propulsion::{
        EngineSpec, FuelSystem, PropulsionError, ThrustCurve, ThrustModel,
        thrust_curve_from_engine,
    };
    use thiserror::Error;

    /// Errors surfaced when selecting or converting aircraft.
    #[derive(Debug, Error)]
    pub enum AircraftConfigError {
        #[error("aircraft '{0}' not found in catalog")]
        NotFound(String),
        #[error("aircraft catalog is empty")]
        EmptyCatalog,
        #[error("aircraft '{name}' is invalid: {source}")]
        Invalid {
            name: String,
            #[source]
            source: AircraftError,
        },
    }

    fn invalid(name: &str) -> impl FnOnce(AircraftError) -> AircraftConfigError + '_ {
        move |source| AircraftConfigError::Invalid {
            name: name.to_string(),
            source,
        }
    }

    /// Convert an `AircraftConfig` into a validated [`Aircraft`].
    pub fn from_config(config: &AircraftConfig) -> Result<Aircraft, AircraftConfigError> {
        build(config).map_err(invalid(&config.name))
    }

    pub(crate) fn build(config: &AircraftConfig) -> Result<Aircraft, AircraftError> {
        let geometry = geometry_from_config(&config.geometry)?;
        let polar = polar_from_config(&config.polar);

        let ground = &config.ground_run;
        let stall = StallData::new(
            config.stall.cl_max,
            config.stall.cl_alpha0,
            config.stall.cl_alpha_per_deg,
        );
        let mut ground_run = match (ground.cl_run, ground.cd_run) {
            (Some(cl), Some(cd)) => GroundRunAero::new(cl, cd),
            (cl, _) => {
                let cl = cl.unwrap_or(stall.cl_alpha0);
                let ground_polar = ground.polar.as_ref().map(polar_from_config).unwrap_or(polar);
                GroundRunAero::from_polar(cl, &ground_polar)
            }
        };
        if let Some(increment) = ground.flap_lift_increment {
            ground_run = ground_run.with_flap_lift_increment(increment);
        }

        let thrust = thrust_from_config(&config.thrust)?;
        let fuel_system = FuelSystem::new(
            config.fuel_system.max_consumption_l_per_h,
            config.fuel_system.fuel_density_kg_per_l,
        )?;

        Aircraft::new(AircraftParts {
            name: config.name.clone(),
            geometry,
            polar,
            ground_run,
            stall,
            thrust,
            fuel_system,
            mass: MassBreakdown {
                empty_kg: config.mass.empty_kg,
                fuel_kg: config.mass.fuel_kg,
                reserve_fuel_kg: config.mass.reserve_fuel_kg,
            },
        })
    }

    /// Select an aircraft from the catalog by optional name, defaulting to the
    /// first entry.
    pub fn select(
        configs: &[AircraftConfig],
        requested: Option<&str>,
    ) -> Result<Aircraft, AircraftConfigError> {
        let first = configs.first().ok_or(AircraftConfigError::EmptyCatalog)?;
        let chosen = match requested {
            Some(name) => {
                let upper = name.to_uppercase();
                configs
                    .iter()
                    .find(|cfg| cfg.name.to_uppercase() == upper)
                    .ok_or_else(|| AircraftConfigError::NotFound(name.to_string()))?
            }
            None => first,
        };
        from_config(chosen)
    }

    fn polar_from_config(config: &PolarConfig) -> DragPolar {
        DragPolar::new(config.cd0, config.cd1, config.k)
    }

    fn planform_from_config(config: &SurfacePlanformConfig) -> Planform {
        Planform {
            stations: config
                .sections
                .iter()
                .map(|section| PlanformStation {
                    chord_m: section.chord_m,
                    span_m: section.span_m,
                    sweep_le: section.sweep_le,
                })
                .collect(),
            symmetric: config.symmetric,
        }
    }

    fn geometry_from_config(config: &GeometryConfig) -> Result<ReferenceGeometry, AircraftError> {
        match config {
            GeometryConfig::Reference {
                wing_area_m2,
                wing_span_m,
                mean_chord_m,
                horizontal_tail_area_m2,
                vertical_tail_area_m2,
            } => Ok(ReferenceGeometry {
                wing_area_m2: *wing_area_m2,
                wing_span_m: *wing_span_m,
                mean_chord_m: *mean_chord_m,
                horizontal_tail_area_m2: *horizontal_tail_area_m2,
                vertical_tail_area_m2: *vertical_tail_area_m2,
            }),
            GeometryConfig::Planform {
                wing,
                horizontal,
                vertical,
            } => {
                let mut geometry =
                    ReferenceGeometry::from_wing(&planform_from_config(wing).summarize()?);
                if let Some(tail) = horizontal {
                    geometry.horizontal_tail_area_m2 =
                        Some(planform_from_config(tail).summarize()?.area_m2);
                }
                if let Some(fin) = vertical {
                    geometry.vertical_tail_area_m2 =
                        Some(planform_from_config(fin).summarize()?.area_m2);
                }
                Ok(geometry)
            }
        }
    }

    fn thrust_from_config(config: &ThrustConfig) -> Result<ThrustCurve, PropulsionError> {
        match config {
            ThrustConfig::Curve {
                t0,
                t1,
                t2,
                altitude_lapse_per_m,
            } => Ok(ThrustCurve {
                t0: *t0,
                t1: *t1,
                t2: *t2,
                altitude_lapse_per_m: *altitude_lapse_per_m,
            }),
            ThrustConfig::Engine {
                propeller_diameter_in,
                propeller_pitch_in,
                rpm,
                max_power_hp,
                model,
                altitude_lapse_per_m,
            } => {
                let engine = EngineSpec {
                    propeller_diameter_in: *propeller_diameter_in,
                    propeller_pitch_in: *propeller_pitch_in,
                    rpm: *rpm,
                    max_power_hp: *max_power_hp,
                };
                let model = match model {
                    ThrustModelConfig::ActuatorDisk => ThrustModel::ActuatorDisk,
                    ThrustModelConfig::Empirical => ThrustModel::Empirical,
                };
                Ok(thrust_curve_from_engine(&engine, model)?
                    .with_altitude_lapse(*altitude_lapse_per_m))
            }
        }
    }
}

pub mod settings {
    use mdo_config::{
        MissionProfileConfig, ObjectiveConfig, RunSettings, SolverSettings, SpeedSolverConfig,
    };
    use mdo_numerics::ScalarOptions;

    use crate::evaluate::{EvaluationSettings, Objective};
    use crate::mission::MissionConfig;
    use crate::mission::climb::ClimbConfig;
    use crate::mission::cruise::CruiseConfig;
    use crate::mission::descent::DescentConfig;
    use crate::mission::steady::{SpeedSolverKind, SpeedSolverSettings};
    use crate::mission::takeoff::TakeoffConfig;

    fn solver_kind(config: SpeedSolverConfig) -> SpeedSolverKind {
        match config {
            SpeedSolverConfig::Minimize => SpeedSolverKind::Minimize,
            SpeedSolverConfig::Quartic => SpeedSolverKind::Quartic,
        }
    }

    /// Convert a parsed mission profile into segment configurations.
    pub fn mission_from_config(config: &MissionProfileConfig) -> MissionConfig {
        let takeoff = &config.takeoff;
        let climb = &config.climb;
        let cruise = &config.cruise;
        let descent = &config.descent;
        MissionConfig {
            takeoff: TakeoffConfig {
                field_altitude_m: takeoff.field_altitude_m,
                friction_coefficient: takeoff.friction_coefficient,
                safety_factor: takeoff.safety_factor,
                time_step_s: takeoff.time_step_s,
                max_steps: takeoff.max_steps,
            },
            climb: ClimbConfig {
                initial_altitude_m: climb.initial_altitude_m,
                final_altitude_m: climb.final_altitude_m,
                rate_m_s: climb.rate_m_s,
                steps: climb.steps,
                solver: climb.solver.map(solver_kind),
            },
            cruise: CruiseConfig {
                altitude_m: cruise.altitude_m,
                steps: cruise.steps,
                speed_m_s: cruise.speed_m_s,
            },
            descent: DescentConfig {
                initial_altitude_m: descent.initial_altitude_m,
                final_altitude_m: descent.final_altitude_m,
                rate_m_s: descent.rate_m_s,
                steps: descent.steps,
                idle_throttle: descent.idle_throttle,
                solver: descent.solver.map(solver_kind),
            },
        }
    }

    pub fn solver_from_config(config: &SolverSettings) -> SpeedSolverSettings {
        SpeedSolverSettings {
            kind: solver_kind(config.method),
            min_speed_m_s: config.min_speed_m_s,
            max_speed_m_s: config.max_speed_m_s,
            options: ScalarOptions {
                relative_tolerance: config.relative_tolerance,
                absolute_tolerance: config.absolute_tolerance,
                max_iterations: config.max_iterations,
            },
        }
    }

    pub fn evaluation_from_config(settings: &RunSettings) -> EvaluationSettings {
        EvaluationSettings {
            objective: match settings.evaluation.objective {
                ObjectiveConfig::Range => Objective::Range,
                ObjectiveConfig::Runway => Objective::Runway,
            },
            penalty: settings.evaluation.penalty,
            solver: solver_from_config(&settings.solver),
        }
    }
}
