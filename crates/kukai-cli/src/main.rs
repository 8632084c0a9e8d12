mod display;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use kukai_core::{RoundSnapshot, RuleSet};
use kukai_results::{Placement, UnmatchedCategory};
use kukai_verse::{LayoutStyle, compose, parse, render_grid};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kukai", version, about = "Haiku round verse rendering and results")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse verse markup and print it vertically
    Render {
        /// Verse text; read from stdin when omitted
        text: Option<String>,
        /// Print parsed tokens and layout as JSON instead
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Validate a rule-set JSON file
    Rules {
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print the anonymised voting sheet for a round snapshot
    Entries { snapshot: PathBuf },
    /// Aggregate votes and print the published results
    Results {
        snapshot: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        #[command(flatten)]
        layout: LayoutArgs,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Clone, Debug)]
struct LayoutArgs {
    /// Characters per vertical line before wrapping
    #[arg(long, default_value_t = 20, env = "KUKAI_ROWS")]
    rows: usize,
    /// Body font size reported in JSON layouts
    #[arg(long, default_value_t = 18.0, env = "KUKAI_FONT_SIZE")]
    font_size: f32,
    /// Preface font size reported in JSON layouts
    #[arg(long, default_value_t = 14.0, env = "KUKAI_PREFACE_FONT_SIZE")]
    preface_font_size: f32,
}

impl LayoutArgs {
    fn style(&self) -> LayoutStyle {
        LayoutStyle {
            font_size: self.font_size,
            preface_font_size: self.preface_font_size,
            ..LayoutStyle::default()
        }
    }
}

#[derive(Serialize)]
struct ResultsJson<'a> {
    title: &'a str,
    status: &'a str,
    unmatched_categories: Vec<UnmatchedCategory>,
    placements: Vec<Placement>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    debug!("kukai v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Render { text, json, layout } => render(text, json, &layout),
        Command::Rules { path, json } => rules(&path, json),
        Command::Entries { snapshot } => {
            let snapshot = load_snapshot(&snapshot)?;
            print!("{}", display::voting_sheet(&snapshot));
            Ok(())
        }
        Command::Results {
            snapshot,
            format,
            layout,
        } => results(&snapshot, format, &layout),
    }
}

fn render(text: Option<String>, json: bool, layout: &LayoutArgs) -> anyhow::Result<()> {
    let raw = match text {
        Some(t) => t,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading verse from stdin")?;
            buf.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let parsed = parse(&raw);
    let vertical = compose(&parsed, &layout.style());
    if json {
        let doc = serde_json::json!({ "parsed": parsed, "layout": vertical });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("{}", render_grid(&vertical, layout.rows));
    }
    Ok(())
}

fn rules(path: &Path, json: bool) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading rule set {}", path.display()))?;
    let set = RuleSet::from_json(&raw)
        .with_context(|| format!("validating rule set {}", path.display()))?;
    info!(count = set.as_slice().len(), total_picks = set.total_picks(), "rule set is valid");
    if json {
        println!("{}", serde_json::to_string_pretty(&set)?);
    } else {
        println!("{}", display::rule_table(set.as_slice()));
    }
    Ok(())
}

fn results(path: &Path, format: OutputFormat, layout: &LayoutArgs) -> anyhow::Result<()> {
    let snapshot = load_snapshot(path)?;
    if snapshot.rules.is_empty() {
        warn!("snapshot has no voting rules, every entry scores zero");
    }
    let placements = kukai_results::publish(&snapshot.entries, &snapshot.votes, &snapshot.rules);

    match format {
        OutputFormat::Text => {
            let report =
                display::results_report(&snapshot, &placements, &layout.style(), layout.rows);
            print!("{report}");
        }
        OutputFormat::Json => {
            let doc = ResultsJson {
                title: &snapshot.title,
                status: &snapshot.status,
                unmatched_categories: kukai_results::unmatched_categories(
                    &snapshot.votes,
                    &snapshot.rules,
                ),
                placements,
            };
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(())
}

fn load_snapshot(path: &Path) -> anyhow::Result<RoundSnapshot> {
    RoundSnapshot::load(path).with_context(|| format!("loading snapshot {}", path.display()))
}
