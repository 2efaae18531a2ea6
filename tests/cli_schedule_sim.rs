use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "schedsim-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

fn segment_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| line.starts_with("segment "))
        .map(str::to_string)
        .collect()
}

const TWO_PROCS: &str = r#"
{
    "schema_version": 1,
    "processes": [
        { "id": 1, "arrival_time": 0, "burst_time": 2 },
        { "id": 2, "arrival_time": 0, "burst_time": 2 }
    ]
}
"#;

#[test]
fn schedule_sim_prints_fcfs_timeline_by_default() {
    let dir = unique_temp_dir("schedule-fcfs");
    let workload = write_file(&dir, "workload.json", TWO_PROCS);

    let output = Command::new(env!("CARGO_BIN_EXE_schedule_sim"))
        .args(["--workload", workload.to_str().unwrap()])
        .output()
        .expect("run schedule_sim");
    assert!(
        output.status.success(),
        "schedule_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        segment_lines(&stdout),
        vec![
            "segment pid=P1 start=0 end=2".to_string(),
            "segment pid=P2 start=2 end=4".to_string(),
        ]
    );
    assert!(stdout.contains("avg waiting=1.00 response=1.00 turnaround=3.00"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn schedule_sim_overrides_algorithm_and_writes_json() {
    let dir = unique_temp_dir("schedule-rr-json");
    let workload = write_file(&dir, "workload.json", TWO_PROCS);
    let out_json = dir.join("result.json");

    let output = Command::new(env!("CARGO_BIN_EXE_schedule_sim"))
        .args([
            "--workload",
            workload.to_str().unwrap(),
            "--algorithm",
            "rr",
            "--quantum",
            "1",
            "--json-out",
            out_json.to_str().unwrap(),
        ])
        .output()
        .expect("run schedule_sim");
    assert!(
        output.status.success(),
        "schedule_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let raw = fs::read_to_string(&out_json).expect("read result.json");
    let v: Value = serde_json::from_str(&raw).expect("parse result.json");
    let timeline = v["result"]["timeline"]
        .as_array()
        .expect("timeline must be an array");
    let pids: Vec<u64> = timeline
        .iter()
        .map(|s| s["pid"].as_u64().expect("pid"))
        .collect();
    assert_eq!(pids, vec![1, 2, 1, 2]);
    assert_eq!(v["result"]["averages"]["waiting_time"].as_f64(), Some(1.5));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn schedule_sim_runs_multi_level_queues_with_origins() {
    let dir = unique_temp_dir("schedule-mlq");
    let workload = write_file(
        &dir,
        "workload.json",
        r#"
{
    "schema_version": 1,
    "queues": [
        { "id": 1, "algorithm": "fcfs", "processes": [ { "id": 1, "arrival_time": 0, "burst_time": 2 } ] },
        { "id": 2, "algorithm": "sjf_preemptive", "processes": [ { "id": 1, "arrival_time": 0, "burst_time": 1 } ] }
    ]
}
        "#,
    );

    let output = Command::new(env!("CARGO_BIN_EXE_schedule_sim"))
        .args(["--workload", workload.to_str().unwrap()])
        .output()
        .expect("run schedule_sim");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        segment_lines(&stdout),
        vec![
            "segment pid=P1 start=0 end=2".to_string(),
            "segment pid=P2 start=2 end=3".to_string(),
        ]
    );
    assert!(stdout.contains("origin pid=P2 queue=2 local=P1"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn schedule_sim_fails_on_round_robin_without_quantum() {
    let dir = unique_temp_dir("schedule-rr-missing");
    let workload = write_file(&dir, "workload.json", TWO_PROCS);

    let output = Command::new(env!("CARGO_BIN_EXE_schedule_sim"))
        .args(["--workload", workload.to_str().unwrap(), "--algorithm", "rr"])
        .output()
        .expect("run schedule_sim");
    assert!(!output.status.success(), "missing quantum must fail");
    assert!(segment_lines(&String::from_utf8_lossy(&output.stdout)).is_empty());

    let _ = fs::remove_dir_all(&dir);
}
