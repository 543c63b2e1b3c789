mod script;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use blockdrop::{DragReport, EditorConfig, EditorSession};
use blockdrop_api::Document;

use script::DragScript;

#[derive(Parser)]
#[command(
    name = "blockdrop",
    version,
    about = "Replay a block drag gesture against a layout document"
)]
struct Cli {
    /// Layout document (JSON object of block id -> block)
    #[arg(short, long)]
    document: PathBuf,

    /// Drag script (YAML list of pointer events)
    #[arg(short, long)]
    script: PathBuf,

    /// Editor configuration (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EditorConfig::load_from_file(path)?,
        None => EditorConfig::default(),
    };

    // Logs go to stderr so stdout stays a clean JSON document.
    // Default comes from the config, RUST_LOG overrides it.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .init();

    let json = std::fs::read_to_string(&cli.document)
        .with_context(|| format!("Failed to read document {}", cli.document.display()))?;
    let document = Document::from_json_str(&json)
        .with_context(|| format!("Failed to parse document {}", cli.document.display()))?;
    for issue in document.integrity_issues() {
        warn!("{}: {}", cli.document.display(), issue);
    }

    let script = DragScript::load_from_file(&cli.script)?;
    let (mut session, sinks) = EditorSession::with_channels(document, config);

    for (step, event) in script.events.iter().enumerate() {
        let report = session
            .handle(event)
            .with_context(|| format!("Step {} ({:?}) failed", step + 1, event))?;
        match &report {
            DragReport::Aborted { id } => warn!("Step {}: {} is gone, move dropped", step + 1, id),
            other => info!("Step {}: {:?}", step + 1, other),
        }
    }

    println!("{}", sinks.current_document().to_json_string_pretty()?);
    if let Some(selected) = sinks.selected() {
        eprintln!("selected: {}", selected);
    }

    Ok(())
}
