use clap::Parser;
use schedsim_rs::sched::{ComposedSchedule, PriorityOrder};
use schedsim_rs::sim::{AlgorithmKind, AlgorithmSpec, ScheduleWorkload, WorkloadError};
use std::fs;
use std::path::PathBuf;
use tracing::error;

#[derive(Debug, Parser)]
#[command(
    name = "schedule-sim",
    about = "Run a CPU scheduling workload.json and print the timeline and metrics"
)]
struct Args {
    /// Path to workload.json
    #[arg(long)]
    workload: PathBuf,

    /// Override algorithm: fcfs, sjf_non_preemptive, sjf_preemptive,
    /// priority_non_preemptive, priority_preemptive, round_robin, multi_level_queue
    #[arg(long)]
    algorithm: Option<String>,

    /// Override round-robin quantum
    #[arg(long)]
    quantum: Option<u64>,

    /// Override priority order: asc (lower value first) or desc
    #[arg(long)]
    order: Option<String>,

    /// Write the full result as JSON
    #[arg(long)]
    json_out: Option<PathBuf>,
}

fn parse_kind(raw: &str) -> Option<AlgorithmKind> {
    match raw {
        "fcfs" => Some(AlgorithmKind::Fcfs),
        "sjf_non_preemptive" | "sjfn" => Some(AlgorithmKind::SjfNonPreemptive),
        "sjf_preemptive" | "sjfp" => Some(AlgorithmKind::SjfPreemptive),
        "priority_non_preemptive" | "pn" => Some(AlgorithmKind::PriorityNonPreemptive),
        "priority_preemptive" | "pp" => Some(AlgorithmKind::PriorityPreemptive),
        "round_robin" | "rr" => Some(AlgorithmKind::RoundRobin),
        "multi_level_queue" | "mlq" => Some(AlgorithmKind::MultiLevelQueue),
        _ => None,
    }
}

fn parse_order(raw: &str) -> Option<PriorityOrder> {
    match raw {
        "asc" | "lower_first" => Some(PriorityOrder::LowerFirst),
        "desc" | "higher_first" => Some(PriorityOrder::HigherFirst),
        _ => None,
    }
}

/// Merge command-line overrides into the workload's algorithm spec.
fn apply_overrides(workload: &mut ScheduleWorkload, args: &Args) {
    let mut spec = workload.algorithm.clone().unwrap_or(AlgorithmSpec {
        kind: workload.kind(),
        quantum: None,
        order: None,
    });
    if let Some(kind) = args.algorithm.as_deref() {
        match parse_kind(kind) {
            Some(kind) => spec.kind = kind,
            None => error!(algorithm = kind, "unknown algorithm override, ignoring"),
        }
    }
    if args.quantum.is_some() {
        spec.quantum = args.quantum;
    }
    if let Some(order) = args.order.as_deref() {
        match parse_order(order) {
            Some(order) => spec.order = Some(order),
            None => error!(order, "unknown priority order override, ignoring"),
        }
    }
    workload.algorithm = Some(spec);
}

fn print_report(label: &str, composed: &ComposedSchedule) {
    let result = &composed.result;
    println!(
        "algorithm={label} processes={} segments={}",
        result.metrics.len(),
        result.timeline.len()
    );
    for seg in result.timeline.segments() {
        println!("segment pid={} start={} end={}", seg.pid, seg.start, seg.end);
    }
    for m in result.metrics.values() {
        println!(
            "metrics pid={} waiting={} response={} turnaround={}",
            m.pid, m.waiting_time, m.response_time, m.turnaround_time
        );
    }
    for o in &composed.origins {
        println!(
            "origin pid={} queue={} local={}",
            o.global, o.queue_id, o.local
        );
    }
    println!(
        "avg waiting={:.2} response={:.2} turnaround={:.2}",
        result.averages.waiting_time, result.averages.response_time, result.averages.turnaround_time
    );
}

fn run(args: Args) -> Result<(), WorkloadError> {
    let mut workload = ScheduleWorkload::from_path(&args.workload)?;
    apply_overrides(&mut workload, &args);
    let plan = workload.plan()?;
    let composed = plan.run()?;

    let label = match workload.algorithm.as_ref() {
        Some(spec) => format!("{:?}", spec.kind),
        None => "fcfs".to_string(),
    };
    print_report(&label, &composed);

    if let Some(path) = args.json_out {
        let json = serde_json::to_string_pretty(&composed)?;
        fs::write(&path, json)?;
        eprintln!("wrote schedule result to {}", path.display());
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!(error = %e, "schedule-sim failed");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kind_accepts_long_and_short_names() {
        assert_eq!(parse_kind("rr"), Some(AlgorithmKind::RoundRobin));
        assert_eq!(parse_kind("round_robin"), Some(AlgorithmKind::RoundRobin));
        assert_eq!(parse_kind("mlq"), Some(AlgorithmKind::MultiLevelQueue));
        assert_eq!(parse_kind("lottery"), None);
    }

    #[test]
    fn parse_order_maps_asc_desc() {
        assert_eq!(parse_order("asc"), Some(PriorityOrder::LowerFirst));
        assert_eq!(parse_order("desc"), Some(PriorityOrder::HigherFirst));
        assert_eq!(parse_order("up"), None);
    }

    #[test]
    fn overrides_replace_kind_and_quantum() {
        let mut workload: ScheduleWorkload = serde_json::from_str(
            r#"{ "schema_version": 1, "processes": [ { "id": 1, "arrival_time": 0, "burst_time": 3 } ] }"#,
        )
        .expect("parse workload");
        let args = Args {
            workload: PathBuf::from("unused.json"),
            algorithm: Some("rr".to_string()),
            quantum: Some(2),
            order: None,
            json_out: None,
        };
        apply_overrides(&mut workload, &args);
        let spec = workload.algorithm.expect("spec");
        assert_eq!(spec.kind, AlgorithmKind::RoundRobin);
        assert_eq!(spec.quantum, Some(2));
    }
}
