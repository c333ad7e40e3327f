//! `speedrun`: find a chain of links between two pages of a fixture graph.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use speedrun_harness::fixture::{load_fixture, load_policy};
use speedrun_harness::report::RunSummary;
use speedrun_harness::runner::FixtureRunner;
use speedrun_search::policy::{ExpansionMode, SearchPolicy};

#[derive(Parser)]
#[command(name = "speedrun", about = "Beam-limited best-first link search")]
struct Cli {
    /// Link graph fixture (JSON).
    #[arg(long)]
    fixture: PathBuf,
    /// Start page title.
    #[arg(long)]
    start: String,
    /// End page title.
    #[arg(long)]
    end: String,
    /// Search policy (JSON). Flags below override its fields.
    #[arg(long)]
    policy: Option<PathBuf>,
    /// Upper cap on the per-depth beam width.
    #[arg(long)]
    beam_k: Option<usize>,
    /// Wall-clock limit in seconds.
    #[arg(long)]
    time_limit: Option<f64>,
    /// Deepest node that may still be expanded.
    #[arg(long)]
    max_depth: Option<u32>,
    #[arg(long, value_enum)]
    expansion: Option<Expansion>,
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Expansion {
    Eager,
    Lazy,
}

impl From<Expansion> for ExpansionMode {
    fn from(value: Expansion) -> Self {
        match value {
            Expansion::Eager => Self::Eager,
            Expansion::Lazy => Self::Lazy,
        }
    }
}

impl Cli {
    fn policy(&self) -> anyhow::Result<SearchPolicy> {
        let mut policy = match &self.policy {
            Some(path) => load_policy(path)?,
            None => SearchPolicy::default(),
        };
        if let Some(beam_k) = self.beam_k {
            policy.beam_k = beam_k;
        }
        if let Some(secs) = self.time_limit {
            policy.time_limit = Duration::try_from_secs_f64(secs)
                .with_context(|| format!("invalid --time-limit {secs}"))?;
        }
        if let Some(max_depth) = self.max_depth {
            policy.max_depth = max_depth;
        }
        if let Some(expansion) = self.expansion {
            policy.expansion = expansion.into();
        }
        Ok(policy)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let policy = cli.policy()?;
    let graph = load_fixture(&cli.fixture)?.into_graph();
    tracing::info!(pages = graph.page_count(), fixture = %cli.fixture.display(), "fixture loaded");

    let runner = FixtureRunner::new(graph);
    let report = runner
        .run(&cli.start, &cli.end, &policy)
        .context("search did not start")?;
    let summary = RunSummary::from_report(&report);

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
