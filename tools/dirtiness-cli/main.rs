use clap::Parser;
use dirtiness::prelude::*;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Reports which executed nodes of a workflow state dump have gone stale
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow state JSON file
    state_path: String,

    /// Print the dirtiness map as JSON instead of a report
    #[arg(long)]
    json: bool,

    /// Only spread dirtiness from sub-nodes to their hosts, not along main connections
    #[arg(long)]
    no_downstream: bool,

    /// Evaluate even if the dumped partial execution settings disable dirtiness
    #[arg(short, long)]
    force_enabled: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli);
}

fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. Loading ---
    let load_start = Instant::now();
    let state = WorkflowState::from_file(&cli.state_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load workflow state '{}': {}",
            &cli.state_path, e
        ))
    });

    let mut config = state.config();
    if cli.force_enabled {
        config.enabled = true;
    }
    config = config.with_downstream_propagation(!cli.no_downstream);

    let node_count = state.nodes.len();
    let history_count = state.history.len();
    let snapshot = state
        .into_snapshot()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid workflow state: {}", e)));
    let load_duration = load_start.elapsed();
    info!(nodes = node_count, history = history_count, "workflow state loaded");

    // --- 2. Evaluation ---
    let eval_start = Instant::now();
    let dirtiness = Evaluator::new(config).evaluate(&snapshot);
    let eval_duration = eval_start.elapsed();

    // --- 3. Output ---
    if cli.json {
        let json = serde_json::to_string_pretty(&dirtiness)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize result: {}", e)));
        println!("{}", json);
        return;
    }

    if !config.enabled {
        println!("Dirtiness is disabled by the partial execution settings (use --force-enabled).");
    }
    println!("{}", ReportFormatter::format_report(&dirtiness));
    println!("\n{}", ReportFormatter::format_summary(&dirtiness));

    println!("\n--- Performance Summary ---");
    println!("Nodes:                {}", node_count);
    println!("History Entries:      {}", history_count);
    println!("State Loading:        {:?}", load_duration);
    println!("Evaluation:           {:?}", eval_duration);
    println!("-----------------------------");
    println!("Total Execution:      {:?}", total_start.elapsed());
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
