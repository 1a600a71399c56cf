//! Configuration models and loaders for aircraft catalogs, mission profiles and
//! run settings.

use std::fs::File;
use std::path::{Path, PathBuf};

use mdo_core::defaults;
use serde::Deserialize;
use thiserror::Error;

/// Aircraft record parsed from catalog files.
#[derive(Debug, Deserialize, Clone)]
pub struct AircraftConfig {
    pub name: String,
    pub geometry: GeometryConfig,
    pub polar: PolarConfig,
    #[serde(default)]
    pub ground_run: GroundRunConfig,
    pub stall: StallConfig,
    pub thrust: ThrustConfig,
    pub fuel_system: FuelSystemConfig,
    pub mass: MassConfig,
}

/// Wing reference geometry, either given directly or reduced from planform sections.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type")]
pub enum GeometryConfig {
    #[serde(rename = "reference")]
    Reference {
        wing_area_m2: f64,
        wing_span_m: f64,
        mean_chord_m: f64,
        #[serde(default)]
        horizontal_tail_area_m2: Option<f64>,
        #[serde(default)]
        vertical_tail_area_m2: Option<f64>,
    },
    #[serde(rename = "planform")]
    Planform {
        wing: SurfacePlanformConfig,
        #[serde(default)]
        horizontal: Option<SurfacePlanformConfig>,
        #[serde(default)]
        vertical: Option<SurfacePlanformConfig>,
    },
}

/// Lifting-surface stations from root to tip.
#[derive(Debug, Deserialize, Clone)]
pub struct SurfacePlanformConfig {
    pub sections: Vec<SectionConfig>,
    #[serde(default = "default_true")]
    pub symmetric: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SectionConfig {
    pub chord_m: f64,
    /// Span from the previous station; zero for the root.
    #[serde(default)]
    pub span_m: f64,
    #[serde(default)]
    pub sweep_le: f64,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PolarConfig {
    pub cd0: f64,
    #[serde(default)]
    pub cd1: f64,
    pub k: f64,
}

/// Ground-roll aerodynamics. Explicit `cl_run`/`cd_run` win over the polar,
/// which is evaluated at the zero-alpha lift coefficient.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GroundRunConfig {
    #[serde(default)]
    pub cl_run: Option<f64>,
    #[serde(default)]
    pub cd_run: Option<f64>,
    #[serde(default)]
    pub polar: Option<PolarConfig>,
    #[serde(default)]
    pub flap_lift_increment: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct StallConfig {
    pub cl_max: f64,
    #[serde(default)]
    pub cl_alpha0: f64,
    #[serde(default = "default_cl_alpha_per_deg")]
    pub cl_alpha_per_deg: f64,
}

/// Thrust source: a fitted quadratic curve or an engine/propeller to fit one from.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type")]
pub enum ThrustConfig {
    #[serde(rename = "curve")]
    Curve {
        t0: f64,
        #[serde(default)]
        t1: f64,
        #[serde(default)]
        t2: f64,
        #[serde(default)]
        altitude_lapse_per_m: f64,
    },
    #[serde(rename = "engine")]
    Engine {
        propeller_diameter_in: f64,
        propeller_pitch_in: f64,
        rpm: f64,
        max_power_hp: f64,
        #[serde(default)]
        model: ThrustModelConfig,
        #[serde(default)]
        altitude_lapse_per_m: f64,
    },
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ThrustModelConfig {
    #[default]
    ActuatorDisk,
    Empirical,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct FuelSystemConfig {
    pub max_consumption_l_per_h: f64,
    pub fuel_density_kg_per_l: f64,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct MassConfig {
    pub empty_kg: f64,
    pub fuel_kg: f64,
    #[serde(default)]
    pub reserve_fuel_kg: f64,
}

/// Mission profile parsed from YAML.
#[derive(Debug, Deserialize, Clone)]
pub struct MissionProfileConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub takeoff: TakeoffConfig,
    pub climb: ClimbConfig,
    pub cruise: CruiseConfig,
    pub descent: DescentConfig,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct TakeoffConfig {
    #[serde(default)]
    pub field_altitude_m: f64,
    #[serde(default = "default_friction_coefficient")]
    pub friction_coefficient: f64,
    #[serde(default = "default_safety_factor")]
    pub safety_factor: f64,
    #[serde(default = "default_time_step_s")]
    pub time_step_s: f64,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

impl Default for TakeoffConfig {
    fn default() -> Self {
        Self {
            field_altitude_m: 0.0,
            friction_coefficient: default_friction_coefficient(),
            safety_factor: default_safety_factor(),
            time_step_s: default_time_step_s(),
            max_steps: default_max_steps(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ClimbConfig {
    pub initial_altitude_m: f64,
    pub final_altitude_m: f64,
    pub rate_m_s: f64,
    pub steps: usize,
    #[serde(default)]
    pub solver: Option<SpeedSolverConfig>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct CruiseConfig {
    pub altitude_m: f64,
    pub steps: usize,
    /// Fixed cruise airspeed; the minimum-drag speed is used when absent.
    #[serde(default)]
    pub speed_m_s: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct DescentConfig {
    pub initial_altitude_m: f64,
    pub final_altitude_m: f64,
    pub rate_m_s: f64,
    pub steps: usize,
    #[serde(default = "default_idle_throttle")]
    pub idle_throttle: f64,
    #[serde(default)]
    pub solver: Option<SpeedSolverConfig>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SpeedSolverConfig {
    #[default]
    Minimize,
    Quartic,
}

/// Run-wide settings parsed from TOML.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RunSettings {
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub solver: SolverSettings,
    #[serde(default)]
    pub evaluation: EvaluationSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_true")]
    pub print_summary: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            print_summary: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct SolverSettings {
    #[serde(default)]
    pub method: SpeedSolverConfig,
    #[serde(default = "default_min_speed")]
    pub min_speed_m_s: f64,
    #[serde(default = "default_max_speed")]
    pub max_speed_m_s: f64,
    #[serde(default = "default_relative_tolerance")]
    pub relative_tolerance: f64,
    #[serde(default = "default_absolute_tolerance")]
    pub absolute_tolerance: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            method: SpeedSolverConfig::default(),
            min_speed_m_s: default_min_speed(),
            max_speed_m_s: default_max_speed(),
            relative_tolerance: default_relative_tolerance(),
            absolute_tolerance: default_absolute_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct EvaluationSettings {
    #[serde(default)]
    pub objective: ObjectiveConfig,
    #[serde(default = "default_penalty")]
    pub penalty: f64,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            objective: ObjectiveConfig::default(),
            penalty: default_penalty(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveConfig {
    #[default]
    Range,
    Runway,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("no records found in {0}")]
    Empty(PathBuf),
}

/// Load aircraft records from a YAML list, a single TOML file, or a directory
/// of TOML files.
pub fn load_aircraft_configs<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<AircraftConfig>, ConfigError> {
    let path = path.as_ref();
    let records: Vec<AircraftConfig> = load_records(path)?;
    if records.is_empty() {
        return Err(ConfigError::Empty(path.to_path_buf()));
    }
    Ok(records)
}

/// Load a mission profile from a YAML file.
pub fn load_mission_profile<P: AsRef<Path>>(
    path: P,
) -> Result<MissionProfileConfig, ConfigError> {
    let reader = File::open(path)?;
    Ok(serde_yaml::from_reader(reader)?)
}

/// Load run settings from a TOML file.
pub fn load_run_settings<P: AsRef<Path>>(path: P) -> Result<RunSettings, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

fn default_true() -> bool {
    true
}

fn default_cl_alpha_per_deg() -> f64 {
    defaults::CL_ALPHA_PER_DEG
}

fn default_friction_coefficient() -> f64 {
    defaults::FRICTION_COEFFICIENT
}

fn default_safety_factor() -> f64 {
    defaults::SAFETY_FACTOR
}

fn default_time_step_s() -> f64 {
    defaults::TIME_STEP_S
}

fn default_max_steps() -> usize {
    defaults::MAX_TAKEOFF_STEPS
}

fn default_idle_throttle() -> f64 {
    defaults::IDLE_THROTTLE
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_min_speed() -> f64 {
    defaults::MIN_SPEED_M_S
}

fn default_max_speed() -> f64 {
    defaults::MAX_SPEED_M_S
}

fn default_relative_tolerance() -> f64 {
    defaults::SOLVER_RELATIVE_TOLERANCE
}

fn default_absolute_tolerance() -> f64 {
    defaults::SOLVER_ABSOLUTE_TOLERANCE
}

fn default_max_iterations() -> u64 {
    defaults::SOLVER_MAX_ITERATIONS
}

fn default_penalty() -> f64 {
    defaults::PENALTY
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVE_AIRCRAFT: &str = r#"
name = "Glider"

[geometry]
type = "reference"
wing_area_m2 = 0.5
wing_span_m = 2.0
mean_chord_m = 0.25

[polar]
cd0 = 0.02
k = 0.04

[stall]
cl_max = 1.1

[thrust]
type = "curve"
t0 = 20.0

[fuel_system]
max_consumption_l_per_h = 1.0
fuel_density_kg_per_l = 0.74

[mass]
empty_kg = 5.0
fuel_kg = 1.0
"#;

    #[test]
    fn directory_records_load_in_file_name_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("b.toml"), CURVE_AIRCRAFT.replace("Glider", "Second"))
            .expect("write");
        std::fs::write(dir.path().join("a.toml"), CURVE_AIRCRAFT).expect("write");
        std::fs::write(dir.path().join("notes.txt"), "ignored").expect("write");

        let records = load_aircraft_configs(dir.path()).expect("records");
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Glider", "Second"]);
        assert!(matches!(records[0].thrust, ThrustConfig::Curve { t1, .. } if t1 == 0.0));
        assert_eq!(records[0].mass.reserve_fuel_kg, 0.0);
        assert_eq!(records[0].stall.cl_alpha_per_deg, 0.08);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            load_aircraft_configs(dir.path()),
            Err(ConfigError::Empty(_))
        ));
    }

    #[test]
    fn run_settings_fall_back_to_defaults() {
        let settings: RunSettings =
            toml::from_str("[solver]\nmethod = \"quartic\"\n").expect("toml");
        assert_eq!(settings.solver.method, SpeedSolverConfig::Quartic);
        assert_eq!(settings.solver.max_speed_m_s, 90.0);
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.evaluation.objective, ObjectiveConfig::Range);
    }
}
