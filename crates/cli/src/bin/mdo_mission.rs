use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mdo_cli::{evaluation_json, evaluation_line, init_logging, profile_json, profile_report};
use uav_mdo::config::{
    RunSettings, load_aircraft_configs, load_mission_profile, load_run_settings,
};
use uav_mdo::mission::aircraft::select;
use uav_mdo::mission::settings::{evaluation_from_config, mission_from_config};
use uav_mdo::mission::{evaluate_configs, plan_mission};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Fly a take-off, climb, cruise and descent mission for catalogued UAVs"
)]
struct Cli {
    /// Aircraft catalog: a YAML list, a TOML file, or a directory of TOML files
    #[arg(long, default_value = "configs/aircraft")]
    aircraft: PathBuf,

    /// Aircraft name (case-insensitive; defaults to the first catalog entry)
    #[arg(long)]
    name: Option<String>,

    /// Mission profile YAML
    #[arg(long, default_value = "configs/missions/baseline.yaml")]
    mission: PathBuf,

    /// Run settings TOML (defaults apply when omitted)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Evaluate every aircraft in the catalog and report optimizer scores
    #[arg(long, default_value_t = false)]
    all: bool,

    /// Print JSON instead of the text summary
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Override the log level from the run settings
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = match &cli.settings {
        Some(path) => load_run_settings(path)
            .with_context(|| format!("loading run settings from {}", path.display()))?,
        None => RunSettings::default(),
    };
    init_logging(cli.log_level.as_deref().unwrap_or(&settings.logging.level))?;

    let catalog = load_aircraft_configs(&cli.aircraft)
        .with_context(|| format!("loading aircraft from {}", cli.aircraft.display()))?;
    let profile = load_mission_profile(&cli.mission)
        .with_context(|| format!("loading mission from {}", cli.mission.display()))?;
    let mission = mission_from_config(&profile);
    let evaluation = evaluation_from_config(&settings);

    if cli.all {
        let results = evaluate_configs(&catalog, &mission, &evaluation);
        if cli.json {
            let values: Vec<_> = results
                .iter()
                .map(|(name, eval)| evaluation_json(name, eval))
                .collect();
            println!("{}", serde_json::to_string_pretty(&values)?);
        } else {
            for (name, eval) in &results {
                println!("{}", evaluation_line(name, eval));
            }
        }
        return Ok(());
    }

    let aircraft = select(&catalog, cli.name.as_deref())?;
    let flown = plan_mission(&aircraft, &mission, &evaluation.solver)
        .with_context(|| format!("mission infeasible for '{}'", aircraft.name()))?;
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&profile_json(aircraft.name(), &flown))?
        );
    } else {
        println!(
            "{}",
            profile_report(aircraft.name(), &flown, settings.logging.print_summary)
        );
    }
    Ok(())
}
