//! End-to-end checks of the `edgenet-sim` binary.

use std::process::{Command, Output};

fn edgenet_sim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_edgenet-sim"))
        .args(args)
        .output()
        .expect("failed to launch edgenet-sim")
}

#[test]
fn test_json_summary_is_the_only_stdout() {
    let output = edgenet_sim(&[
        "--json", "--generations", "3", "-S", "step", "--width", "24", "--height", "20",
    ]);
    assert!(matches!(output.status.code(), Some(0) | Some(1)), "{:?}", output.status);

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!("stdout is not JSON ({}): {}", e, String::from_utf8_lossy(&output.stdout))
    });
    assert_eq!(summary["total"], 1);
    assert_eq!(summary["results"][0]["scenario"], "step");
    assert_eq!(summary["results"][0]["generations"], 3);
}

#[test]
fn test_verbose_logs_stay_off_stdout() {
    let output = edgenet_sim(&[
        "--json", "--verbose", "--generations", "2", "-S", "uniform", "--width", "16", "--height", "12",
    ]);
    assert_eq!(output.status.code(), Some(0));

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["passed"], 1);
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_unknown_scenario_exits_with_usage_code() {
    let output = edgenet_sim(&["-S", "stripes"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("stripes"));
}
