use clap::Parser;
use dirtiness::data::TaskRun;
use dirtiness::prelude::*;
use rand::Rng;
use rand::rngs::ThreadRng;
use std::fs;

const RUN_AT: Timestamp = 1_700_000_000_000;
const EDITED_AT: Timestamp = RUN_AT + 60_000;

/// A CLI tool to generate random workflow states for the dirtiness CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_state.json")]
    output: String,

    /// Number of main-flow nodes (at least 2)
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(2..))]
    nodes: u64,

    /// Number of sub-nodes attached to random hosts through auxiliary connections
    #[arg(long, default_value_t = 10)]
    sub_nodes: usize,

    /// Number of edits recorded after the run
    #[arg(long, default_value_t = 5)]
    edits: usize,

    /// Add a back edge so the main flow contains a cycle
    #[arg(long)]
    cycle: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    println!(
        "Generating workflow state ({} nodes, {} sub-nodes, {} edits)...",
        cli.nodes, cli.sub_nodes, cli.edits
    );

    let mut state = WorkflowState::default();
    state.settings.partial_execution = PartialExecutionSettings {
        version: PartialExecutionSettings::DIRTINESS_VERSION,
        enforce: true,
    };

    let main_nodes = generate_main_flow(&mut rng, &mut state, cli.nodes as usize, cli.cycle);
    let sub_nodes = generate_sub_nodes(&mut rng, &mut state, &main_nodes, cli.sub_nodes);
    generate_run_data(&mut rng, &mut state, &main_nodes, &sub_nodes);
    generate_edits(&mut rng, &mut state, &main_nodes, &sub_nodes, cli.edits);

    let json_output = serde_json::to_string_pretty(&state)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved workflow state to '{}'",
        cli.output
    );

    Ok(())
}

/// A chain with a few forward branches, so every node is reachable from the trigger.
fn generate_main_flow(
    rng: &mut ThreadRng,
    state: &mut WorkflowState,
    count: usize,
    cycle: bool,
) -> Vec<String> {
    let names: Vec<String> = (1..=count).map(|i| format!("Node {}", i)).collect();
    for name in &names {
        state
            .nodes
            .push(NodeDefinition::new(name.clone()).disabled(rng.random_bool(0.05)));
    }

    for pair in names.windows(2) {
        state.connect(&ConnectionDefinition::main(&pair[0], &pair[1]));
    }
    for _ in 0..count / 5 {
        let from = rng.random_range(0..count - 1);
        let to = rng.random_range(from + 1..count);
        state.connect(&ConnectionDefinition::main(&names[from], &names[to]));
    }
    if cycle && count > 2 {
        let to = rng.random_range(1..count - 1);
        state.connect(&ConnectionDefinition::main(&names[count - 1], &names[to]));
    }

    println!("-> Generated main flow.");
    names
}

fn generate_sub_nodes(
    rng: &mut ThreadRng,
    state: &mut WorkflowState,
    hosts: &[String],
    count: usize,
) -> Vec<String> {
    let kinds = ["ai_tool", "ai_languageModel", "ai_memory"];
    let mut names = Vec::with_capacity(count);

    for i in 1..=count {
        let name = format!("Tool {}", i);
        let host = &hosts[rng.random_range(0..hosts.len())];
        let kind = kinds[rng.random_range(0..kinds.len())];
        state.nodes.push(NodeDefinition::new(name.clone()));
        state.connect(&ConnectionDefinition::auxiliary(&name, kind, host));
        names.push(name);
    }

    println!("-> Generated sub-nodes.");
    names
}

fn generate_run_data(
    rng: &mut ThreadRng,
    state: &mut WorkflowState,
    main_nodes: &[String],
    sub_nodes: &[String],
) {
    let mut runs: Vec<&String> = Vec::new();
    runs.extend(main_nodes.iter().filter(|_| rng.random_bool(0.8)));
    runs.extend(sub_nodes.iter().filter(|_| rng.random_bool(0.3)));

    for name in runs {
        let run = TaskRun {
            start_time: RUN_AT + rng.random_range(0..1_000),
            execution_time: rng.random_range(1..500),
            execution_status: Some("success".to_string()),
        };
        state.run_data.insert(name.clone(), vec![run]);
    }
    println!("-> Generated run data.");
}

fn generate_edits(
    rng: &mut ThreadRng,
    state: &mut WorkflowState,
    main_nodes: &[String],
    sub_nodes: &[String],
    count: usize,
) {
    let all: Vec<&String> = main_nodes.iter().chain(sub_nodes).collect();

    for i in 0..count {
        let at = EDITED_AT + i as Timestamp * 1_000;
        let node = all[rng.random_range(0..all.len())].clone();
        let other = main_nodes[rng.random_range(0..main_nodes.len())].clone();

        match rng.random_range(0..5) {
            0 => state
                .node_metadata
                .entry(node)
                .or_default()
                .record_parameters_update(at),
            1 => {
                let event = if rng.random_bool(0.5) {
                    PinnedDataEvent::Updated
                } else {
                    PinnedDataEvent::Removed
                };
                state
                    .node_metadata
                    .entry(node)
                    .or_default()
                    .record_pinned_data(event, at);
            }
            2 => {
                state.connect(&ConnectionDefinition::main(&node, &other));
                state
                    .history
                    .push(HistoryEntry::add_connection(at, node, other));
            }
            3 => state.history.push(HistoryEntry::toggle_disabled(at, node)),
            _ => {
                let added = format!("Inserted {}", i);
                state.nodes.push(NodeDefinition::new(added.clone()));
                state.connect(&ConnectionDefinition::main(&added, &other));
                state.history.push(HistoryEntry::bulk(
                    at,
                    vec![
                        HistoryEntry::add_node(at, added.clone()),
                        HistoryEntry::add_connection(at, added, other),
                    ],
                ));
            }
        }
    }
    println!("-> Generated edits.");
}
