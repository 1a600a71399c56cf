//! Mission pipeline that sequences take-off, climb, descent and cruise.
//!
//! Each segment returns its result by value. The descent is planned backward
//! from the landing mass before the cruise so the cruise fuel bracket can end
//! at reserve plus descent fuel.

pub mod climb;
pub mod cruise;
pub mod descent;
pub mod steady;
pub mod takeoff;

use std::fmt;

use mdo_aircraft::Aircraft;
use mdo_atmosphere::AtmosphereError;
use tracing::info;

use self::climb::ClimbConfig;
use self::cruise::{CruiseConfig, CruisePlan};
use self::descent::DescentConfig;
use self::steady::{InfeasibleReason, SpeedSolverSettings};
use self::takeoff::{TakeoffConfig, TakeoffPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Takeoff,
    Climb,
    Cruise,
    Descent,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Segment::Takeoff => "take-off",
            Segment::Climb => "climb",
            Segment::Cruise => "cruise",
            Segment::Descent => "descent",
        };
        f.write_str(name)
    }
}

/// State recorded at one climb or descent step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStep {
    pub altitude_m: f64,
    pub mass_kg: f64,
    pub airspeed_m_s: f64,
    pub throttle: f64,
    pub fuel_kg: f64,
}

/// Elapsed time, horizontal distance and fuel of one segment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentResult {
    pub time_s: f64,
    pub distance_m: f64,
    pub fuel_kg: f64,
    pub steps: Vec<SegmentStep>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SegmentError {
    #[error("{segment} infeasible at step {step} ({altitude_m:.0} m): {reason}")]
    Infeasible {
        segment: Segment,
        step: usize,
        altitude_m: f64,
        reason: InfeasibleReason,
    },
    #[error("invalid {segment} input: {message}")]
    InvalidInput { segment: Segment, message: String },
    #[error("insufficient fuel: {required_kg:.3} kg needed, {available_kg:.3} kg available")]
    InsufficientFuel { available_kg: f64, required_kg: f64 },
    #[error("atmosphere lookup failed: {0}")]
    Atmosphere(#[from] AtmosphereError),
}

impl SegmentError {
    pub(crate) fn invalid(segment: Segment, message: impl Into<String>) -> Self {
        SegmentError::InvalidInput {
            segment,
            message: message.into(),
        }
    }
}

/// Top-level mission planning error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MissionError {
    #[error("take-off planning failed: {0}")]
    Takeoff(#[source] SegmentError),
    #[error("climb planning failed: {0}")]
    Climb(#[source] SegmentError),
    #[error("descent planning failed: {0}")]
    Descent(#[source] SegmentError),
    #[error("cruise planning failed: {0}")]
    Cruise(#[source] SegmentError),
}

impl MissionError {
    pub fn segment_error(&self) -> &SegmentError {
        match self {
            MissionError::Takeoff(err)
            | MissionError::Climb(err)
            | MissionError::Descent(err)
            | MissionError::Cruise(err) => err,
        }
    }
}

/// Inputs of an end-to-end mission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionConfig {
    pub takeoff: TakeoffConfig,
    pub climb: ClimbConfig,
    pub cruise: CruiseConfig,
    pub descent: DescentConfig,
}

/// Aggregated mission profile describing the four sequential segments.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionProfile {
    pub takeoff: TakeoffPlan,
    pub climb: SegmentResult,
    pub cruise: CruisePlan,
    pub descent: SegmentResult,
    pub fuel_load_kg: f64,
    pub reserve_fuel_kg: f64,
}

impl MissionProfile {
    /// Airborne horizontal distance: climb, cruise and descent.
    pub fn range_m(&self) -> f64 {
        self.climb.distance_m + self.cruise.distance_m + self.descent.distance_m
    }

    pub fn flight_time_s(&self) -> f64 {
        self.climb.time_s + self.cruise.time_s + self.descent.time_s
    }

    pub fn fuel_burned_kg(&self) -> f64 {
        self.takeoff.fuel_kg + self.climb.fuel_kg + self.cruise.fuel_kg + self.descent.fuel_kg
    }

    /// Fuel left on landing; never less than the reserve for a planned mission.
    pub fn remaining_fuel_kg(&self) -> f64 {
        self.fuel_load_kg - self.fuel_burned_kg()
    }
}

/// Run the full mission: take-off, climb, descent (backward from landing), then cruise.
pub fn plan_mission(
    aircraft: &Aircraft,
    config: &MissionConfig,
    solver: &SpeedSolverSettings,
) -> Result<MissionProfile, MissionError> {
    let mass = aircraft.mass();

    let takeoff = takeoff::plan_takeoff(aircraft, &config.takeoff, mass.take_off_mass_kg())
        .map_err(MissionError::Takeoff)?;

    let climb_start_kg = mass.take_off_mass_kg() - takeoff.fuel_kg;
    let climb = climb::plan_climb(aircraft, &config.climb, climb_start_kg, solver)
        .map_err(MissionError::Climb)?;

    let descent = descent::plan_descent(aircraft, &config.descent, mass.landing_mass_kg(), solver)
        .map_err(MissionError::Descent)?;

    let top_of_climb_fuel_kg = mass.fuel_kg - takeoff.fuel_kg - climb.fuel_kg;
    let top_of_descent_fuel_kg = mass.reserve_fuel_kg + descent.fuel_kg;
    let cruise = cruise::plan_cruise(
        aircraft,
        &config.cruise,
        top_of_climb_fuel_kg,
        top_of_descent_fuel_kg,
    )
    .map_err(MissionError::Cruise)?;

    let profile = MissionProfile {
        takeoff,
        climb,
        cruise,
        descent,
        fuel_load_kg: mass.fuel_kg,
        reserve_fuel_kg: mass.reserve_fuel_kg,
    };
    info!(
        aircraft = aircraft.name(),
        range_km = profile.range_m() / 1_000.0,
        flight_time_h = profile.flight_time_s() / 3_600.0,
        fuel_burned_kg = profile.fuel_burned_kg(),
        "mission planned"
    );
    Ok(profile)
}
