use clap::Parser;
use schedsim_rs::safety::detect_deadlock;
use schedsim_rs::sim::{Pid, ResourceWorkload, WorkloadError};
use std::fs;
use std::path::PathBuf;
use tracing::error;

#[derive(Debug, Parser)]
#[command(
    name = "deadlock-sim",
    about = "Run deadlock detection on an allocation/request resource workload"
)]
struct Args {
    /// Path to resources.json
    #[arg(long)]
    workload: PathBuf,

    /// Write the full result as JSON
    #[arg(long)]
    json_out: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), WorkloadError> {
    let workload = ResourceWorkload::from_path(&args.workload)?;
    let state = workload.detection_state()?;
    let result = detect_deadlock(&state)?;

    for s in &result.trace {
        let pid = s.pid.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "step={} pid={} work={:?} finish={:?} msg={}",
            s.step, pid, s.work, s.finish, s.message
        );
    }
    let deadlocked = result
        .deadlocked
        .iter()
        .map(Pid::to_string)
        .collect::<Vec<_>>()
        .join(",");
    println!(
        "verdict={:?} deadlock={} deadlocked=[{deadlocked}]",
        result.outcome,
        result.has_deadlock()
    );
    println!("{}", result.message);

    if let Some(path) = args.json_out {
        let json = serde_json::to_string_pretty(&result)?;
        fs::write(&path, json)?;
        eprintln!("wrote detection result to {}", path.display());
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
        error!(error = %e, "deadlock-sim failed");
        std::process::exit(1);
    }
}
