use clap::{Parser, ValueEnum};
use mdo_cli::init_logging;
use serde_json::json;
use uav_mdo::common::linspace;
use uav_mdo::propulsion::{EngineSpec, ThrustModel, dynamic_thrust, thrust_curve_from_engine};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Fit the quadratic thrust curve of a propeller and engine"
)]
struct Cli {
    /// Propeller diameter (in)
    #[arg(long)]
    diameter: f64,

    /// Propeller pitch (in)
    #[arg(long)]
    pitch: f64,

    /// Propeller speed (rpm)
    #[arg(long)]
    rpm: f64,

    /// Maximum shaft power (hp)
    #[arg(long)]
    power_hp: f64,

    #[arg(long, value_enum, default_value_t = ModelArg::ActuatorDisk)]
    model: ModelArg,

    /// Number of airspeeds tabulated against the fit
    #[arg(long, default_value_t = 6)]
    samples: usize,

    #[arg(long, default_value_t = false)]
    json: bool,

    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum ModelArg {
    ActuatorDisk,
    Empirical,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let engine = EngineSpec {
        propeller_diameter_in: cli.diameter,
        propeller_pitch_in: cli.pitch,
        rpm: cli.rpm,
        max_power_hp: cli.power_hp,
    };
    let model = match cli.model {
        ModelArg::ActuatorDisk => ThrustModel::ActuatorDisk,
        ModelArg::Empirical => ThrustModel::Empirical,
    };
    let curve = thrust_curve_from_engine(&engine, model)?;

    let mut samples = Vec::with_capacity(cli.samples);
    for v in linspace(0.5, 50.0, cli.samples) {
        samples.push((v, dynamic_thrust(&engine, v, model)?, curve.max_thrust(v, 0.0)));
    }

    if cli.json {
        let table: Vec<_> = samples
            .iter()
            .map(|(v, model_n, fit_n)| {
                json!({ "airspeed_m_s": v, "model_n": model_n, "fit_n": fit_n })
            })
            .collect();
        let report = json!({
            "model": format!("{model:?}"),
            "t0": curve.t0,
            "t1": curve.t1,
            "t2": curve.t2,
            "samples": table,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Thrust curve ({model:?}): T(v) = {:.4} + {:.4}·v + {:.6}·v² N",
        curve.t0, curve.t1, curve.t2
    );
    println!("{:>10} {:>12} {:>12}", "v (m/s)", "model (N)", "fit (N)");
    for (v, model_n, fit_n) in samples {
        println!("{v:>10.2} {model_n:>12.3} {fit_n:>12.3}");
    }
    Ok(())
}
