//! Runs the `cruise` binary end to end.

use cruise_cli::Report;
use cruise_core::{CostModel, CostModelSpec};
use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cruise-cli-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn cruise() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cruise"));
    for key in [
        "CRUISE_BACKOFF",
        "CRUISE_PARETO_MAX",
        "CRUISE_W0",
        "CRUISE_T0",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn random_model_writes_report_and_model() {
    let dir = scratch_dir("random");
    let report_path = dir.join("report.json");
    let model_path = dir.join("model.json");

    let output = cruise()
        .args(["--n-d", "12", "--n-h", "3", "--n-s", "3", "--seed", "4"])
        .args(["--backoff", "2", "--pareto-max", "4"])
        .arg("--out")
        .arg(&report_path)
        .arg("--dump-model")
        .arg(&model_path)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Pareto front"));

    let report = Report::load(&report_path).unwrap();
    assert!(report.feasible);
    assert_eq!((report.n_d, report.n_h, report.n_s), (12, 3, 3));
    assert_eq!(report.parameters.pareto_max, 4);
    let front = report.front.unwrap();
    assert_eq!(front.energy.len(), report.trajectory_count);

    let model = CostModel::from_json(&fs::read_to_string(&model_path).unwrap()).unwrap();
    assert_eq!(model.n_d(), 12);

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn json_model_and_infeasible_budget() {
    let dir = scratch_dir("json");
    let model_path = dir.join("model.json");
    let report_path = dir.join("report.json");
    let spec = CostModelSpec {
        timings: vec![1.0],
        speed_cost: vec![0.0],
        cruise_cost: vec![vec![10.0]],
        climb_cost: vec![vec![0.0]],
        descend_gain: vec![vec![0.0]],
        height_gain: 0.0,
        weight_cost: 0.0,
        n_h: None,
    };
    fs::write(&model_path, serde_json::to_string(&spec).unwrap()).unwrap();

    let output = cruise()
        .arg("--model")
        .arg(&model_path)
        .args(["--w0", "5", "--t0", "100"])
        .arg("--out")
        .arg(&report_path)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No feasible trajectory"));
    let report = Report::load(&report_path).unwrap();
    assert!(!report.feasible);

    let output = cruise()
        .arg("--model")
        .arg(&model_path)
        .args(["--w0", "100", "--t0", "100", "--overwrite"])
        .arg("--out")
        .arg(&report_path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let report = Report::load(&report_path).unwrap();
    assert!(report.feasible);
    assert_eq!(report.front.unwrap().energy, vec![90.0]);

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn rust_log_enables_per_waypoint_events() {
    let args = ["--n-d", "3", "--n-h", "2", "--n-s", "2", "--seed", "1"];
    let logs = |rust_log: Option<&str>| {
        let mut cmd = cruise();
        if let Some(value) = rust_log {
            cmd.env("RUST_LOG", value);
        }
        let output = cmd.args(args).output().unwrap();
        assert!(output.status.success());
        format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    };

    let quiet = logs(None);
    assert!(quiet.contains("sweep complete"));
    assert!(!quiet.contains("layer finalized"));

    let verbose = logs(Some("cruise_core=debug"));
    assert_eq!(verbose.matches("layer finalized").count(), 3);
}

#[test]
fn invalid_model_fails() {
    let dir = scratch_dir("invalid");
    let model_path = dir.join("model.json");
    fs::write(
        &model_path,
        r#"{"timings":[],"speed_cost":[],"cruise_cost":[[1.0]],"climb_cost":[[1.0]],"descend_gain":[[1.0]],"height_gain":0.0,"weight_cost":0.0}"#,
    )
    .unwrap();
    let output = cruise().arg("--model").arg(&model_path).output().unwrap();
    assert!(!output.status.success());
    fs::remove_dir_all(dir).unwrap();
}
