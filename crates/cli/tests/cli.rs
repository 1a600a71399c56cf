use assert_cmd::Command;
use predicates::prelude::*;

const AIRCRAFT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../configs/aircraft");
const MISSION: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../configs/missions/baseline.yaml"
);
const SETTINGS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../configs/settings.toml");

fn mission_cmd() -> Command {
    let mut cmd = Command::cargo_bin("mdo_mission").expect("mdo_mission bin");
    cmd.args(["--aircraft", AIRCRAFT, "--mission", MISSION, "--log-level", "off"]);
    cmd
}

#[test]
fn mission_summary_reports_every_segment() {
    mission_cmd()
        .args(["--name", "baseline", "--settings", SETTINGS])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Mission Profile: Baseline ==="))
        .stdout(predicate::str::contains("Take-off"))
        .stdout(predicate::str::contains("Cruise"))
        .stdout(predicate::str::contains("Range     :"));
}

#[test]
fn mission_json_is_machine_readable() {
    let output = mission_cmd()
        .args(["--name", "Trainer", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("json stdout");
    assert_eq!(value["aircraft"], "Trainer");
    assert!(value["range_m"].as_f64().expect("range") > 0.0);
    assert_eq!(value["takeoff"]["airborne"], true);
}

#[test]
fn catalog_evaluation_lists_all_designs() {
    mission_cmd()
        .arg("--all")
        .assert()
        .success()
        .stdout(predicate::str::contains("Baseline"))
        .stdout(predicate::str::contains("Trainer"))
        .stdout(predicate::str::contains("score ="));
}

#[test]
fn catalog_evaluation_penalizes_invalid_records() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::copy(
        format!("{AIRCRAFT}/baseline.toml"),
        dir.path().join("a_baseline.toml"),
    )
    .expect("copy baseline");
    let baseline = std::fs::read_to_string(format!("{AIRCRAFT}/baseline.toml")).expect("read");
    let broken = baseline
        .replace("name = \"Baseline\"", "name = \"Overfuelled\"")
        .replace("reserve_fuel_kg = 0.4", "reserve_fuel_kg = 9.0");
    assert!(broken.contains("Overfuelled") && broken.contains("reserve_fuel_kg = 9.0"));
    std::fs::write(dir.path().join("b_broken.toml"), broken).expect("write broken");

    let output = Command::cargo_bin("mdo_mission")
        .expect("mdo_mission bin")
        .arg("--aircraft")
        .arg(dir.path())
        .args(["--mission", MISSION, "--log-level", "off", "--all"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).expect("utf8 stdout");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Baseline") && lines[0].contains("range ="));
    assert!(lines[1].starts_with("Overfuelled") && lines[1].contains("INVALID"));
    assert!(lines[1].contains("score = 1.0000e6"));
}

#[test]
fn unknown_aircraft_fails() {
    mission_cmd()
        .args(["--name", "Concorde"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Concorde"));
}

#[test]
fn infeasible_climb_is_reported_as_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mission = dir.path().join("steep.yaml");
    std::fs::write(
        &mission,
        "climb:\n  initial_altitude_m: 0.0\n  final_altitude_m: 1500.0\n\
         \x20 rate_m_s: 8.0\n  steps: 20\n\
         cruise:\n  altitude_m: 1500.0\n  steps: 10\n\
         descent:\n  initial_altitude_m: 1500.0\n  final_altitude_m: 0.0\n\
         \x20 rate_m_s: 2.0\n  steps: 20\n",
    )
    .expect("write mission");
    Command::cargo_bin("mdo_mission")
        .expect("mdo_mission bin")
        .args(["--aircraft", AIRCRAFT, "--name", "Baseline", "--log-level", "off"])
        .arg("--mission")
        .arg(&mission)
        .assert()
        .failure()
        .stderr(predicate::str::contains("mission infeasible"));
}

#[test]
fn thrust_curve_prints_fit_and_samples() {
    Command::cargo_bin("mdo_thrust_curve")
        .expect("mdo_thrust_curve bin")
        .args([
            "--diameter", "16", "--pitch", "8", "--rpm", "7000", "--power-hp", "1.2", "--model",
            "empirical",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Thrust curve (Empirical)"))
        .stdout(predicate::str::contains("fit (N)"));
}
