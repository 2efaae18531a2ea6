use clap::Parser;
use schedsim_rs::safety::{SafetyResult, SafetyStep, check_safety, evaluate_request};
use schedsim_rs::sim::{Pid, ResourceWorkload, WorkloadError};
use std::fs;
use std::path::PathBuf;
use tracing::error;

#[derive(Debug, Parser)]
#[command(
    name = "banker-sim",
    about = "Run the Banker's safety check (and optionally a resource request) on a resource workload"
)]
struct Args {
    /// Path to resources.json
    #[arg(long)]
    workload: PathBuf,

    /// Evaluate a request from this process (overrides the workload's request)
    #[arg(long)]
    request_pid: Option<u32>,

    /// Comma-separated request vector, e.g. 1,0,2
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    request: Option<Vec<i64>>,

    /// Write the full result as JSON
    #[arg(long)]
    json_out: Option<PathBuf>,
}

fn print_trace(trace: &[SafetyStep]) {
    for s in trace {
        let pid = s.pid.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "step={} pid={} work={:?} finish={:?} msg={}",
            s.step, pid, s.work, s.finish, s.message
        );
    }
}

fn print_result(result: &SafetyResult) {
    print_trace(&result.trace);
    let seq = result
        .safe_sequence
        .iter()
        .map(Pid::to_string)
        .collect::<Vec<_>>()
        .join(",");
    println!(
        "verdict={:?} safe={} sequence=[{seq}] available={:?}",
        result.outcome,
        result.is_safe(),
        result.available
    );
    println!("{}", result.message);
}

fn run(args: Args) -> Result<(), WorkloadError> {
    let workload = ResourceWorkload::from_path(&args.workload)?;
    let state = workload.banker_state()?;

    let request = match (args.request_pid, args.request) {
        (Some(pid), Some(resources)) => Some((Pid(pid), resources)),
        _ => workload
            .request
            .as_ref()
            .map(|r| (r.pid, r.resources.clone())),
    };

    let result = match request {
        Some((pid, resources)) => evaluate_request(&state, pid, &resources)?,
        None => check_safety(&state)?,
    };
    print_result(&result);

    if let Some(path) = args.json_out {
        let json = serde_json::to_string_pretty(&result)?;
        fs::write(&path, json)?;
        eprintln!("wrote safety result to {}", path.display());
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
        error!(error = %e, "banker-sim failed");
        std::process::exit(1);
    }
}
