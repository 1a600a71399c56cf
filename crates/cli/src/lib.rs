//! Shared plumbing for the command-line front-ends: logging setup and report formatting.

use anyhow::Context;
use serde_json::{Value, json};
use tracing_subscriber::filter::LevelFilter;
use uav_mdo::common::time::split_hms;
use uav_mdo::common::units::m_to_km;
use uav_mdo::mission::{DesignEvaluation, MissionProfile, SegmentResult};

/// Install the fmt subscriber on stderr at `level` (`off`, `error` … `trace`).
///
/// Calling it twice is harmless; the first subscriber stays installed.
pub fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter: LevelFilter = level
        .parse()
        .with_context(|| format!("invalid log level '{level}'"))?;
    let _ = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}

pub fn format_duration(seconds: f64) -> String {
    let (h, m, s) = split_hms(seconds);
    format!("{h}h {m:02}m {s:04.1}s")
}

fn segment_line(label: &str, segment: &SegmentResult) -> String {
    format!(
        "{label:<10}: distance = {:.2} km, time = {}, fuel = {:.4} kg",
        m_to_km(segment.distance_m),
        format_duration(segment.time_s),
        segment.fuel_kg
    )
}

/// Human-readable mission report. `detailed` adds the per-segment breakdown.
pub fn profile_report(name: &str, profile: &MissionProfile, detailed: bool) -> String {
    let mut lines = vec![format!("=== Mission Profile: {name} ===")];
    if detailed {
        let takeoff = &profile.takeoff;
        let note = if takeoff.is_airborne() {
            ""
        } else {
            " (runway too long)"
        };
        lines.push(format!(
            "Take-off  : ground roll = {:.1} m{note}, lift-off = {:.2} m/s, time = {:.2} s, \
             fuel = {:.4} kg",
            takeoff.ground_roll_m, takeoff.lift_off_speed_m_s, takeoff.time_s, takeoff.fuel_kg
        ));
        lines.push(segment_line("Climb", &profile.climb));
        lines.push(segment_line("Cruise", &profile.cruise.totals()));
        lines.push(segment_line("Descent", &profile.descent));
    }
    lines.push(format!("Range     : {:.2} km", m_to_km(profile.range_m())));
    lines.push(format!(
        "Endurance : {}",
        format_duration(profile.flight_time_s())
    ));
    lines.push(format!(
        "Fuel      : burned = {:.3} kg, remaining = {:.3} kg (reserve {:.3} kg)",
        profile.fuel_burned_kg(),
        profile.remaining_fuel_kg(),
        profile.reserve_fuel_kg
    ));
    lines.join("\n")
}

fn segment_json(segment: &SegmentResult) -> Value {
    json!({
        "time_s": segment.time_s,
        "distance_m": segment.distance_m,
        "fuel_kg": segment.fuel_kg,
    })
}

pub fn profile_json(name: &str, profile: &MissionProfile) -> Value {
    let takeoff = &profile.takeoff;
    let cruise = &profile.cruise;
    json!({
        "aircraft": name,
        "range_m": profile.range_m(),
        "flight_time_s": profile.flight_time_s(),
        "fuel_burned_kg": profile.fuel_burned_kg(),
        "remaining_fuel_kg": profile.remaining_fuel_kg(),
        "takeoff": {
            "airborne": takeoff.is_airborne(),
            "ground_roll_m": takeoff.ground_roll_m,
            "lift_off_speed_m_s": takeoff.lift_off_speed_m_s,
            "rotation_speed_m_s": takeoff.rotation_speed_m_s,
            "stall_speed_m_s": takeoff.stall_speed_m_s,
            "time_s": takeoff.time_s,
            "fuel_kg": takeoff.fuel_kg,
        },
        "climb": segment_json(&profile.climb),
        "cruise": {
            "time_s": cruise.time_s,
            "distance_m": cruise.distance_m,
            "fuel_kg": cruise.fuel_kg,
            "speeds_m_s": cruise.speeds_m_s,
            "lift_coefficients": cruise.lift_coefficients,
            "drag_coefficients": cruise.drag_coefficients,
        },
        "descent": segment_json(&profile.descent),
    })
}

pub fn evaluation_json(name: &str, evaluation: &DesignEvaluation) -> Value {
    match evaluation {
        DesignEvaluation::Feasible { score, profile } => json!({
            "aircraft": name,
            "feasible": true,
            "score": score,
            "profile": profile_json(name, profile),
        }),
        DesignEvaluation::Infeasible { score, reason } => json!({
            "aircraft": name,
            "feasible": false,
            "score": score,
            "reason": reason.to_string(),
        }),
        DesignEvaluation::Rejected { score, reason } => json!({
            "aircraft": name,
            "feasible": false,
            "valid": false,
            "score": score,
            "reason": reason.to_string(),
        }),
    }
}

pub fn evaluation_line(name: &str, evaluation: &DesignEvaluation) -> String {
    match evaluation {
        DesignEvaluation::Feasible { score, profile } => format!(
            "{name:<24} range = {:>9.2} km  score = {score:.4e}",
            m_to_km(profile.range_m())
        ),
        DesignEvaluation::Infeasible { score, reason } => {
            format!("{name:<24} INFEASIBLE ({reason})  score = {score:.4e}")
        }
        DesignEvaluation::Rejected { score, reason } => {
            format!("{name:<24} INVALID ({reason})  score = {score:.4e}")
        }
    }
}
