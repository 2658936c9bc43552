// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  certdefaults — certificate intent defaulting
//
//  Input:   YAML/JSON intents document (file or stdin)
//  Config:  YAML file + CERTDEFAULTS_* env overrides
//  Output:  enriched records on stdout, logs on stderr
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use anyhow::Context;
use certdefaults_core::config::{OutputFormat, PipelineConfig};
use certdefaults_core::document::parse_intents;
use certdefaults_filter::builtin::append_cert_defaults;
use certdefaults_filter::filter::FilterArgs;
use certdefaults_filter::registry::FilterRegistry;
use clap::{Parser, ValueEnum};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "certdefaults", version, about = "Derive issuer-ready certificate records from intents")]
struct Cli {
    /// Intents document (YAML or JSON). `-` or absent reads stdin.
    input: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, default_value = "certdefaults.yaml")]
    config: PathBuf,

    /// Override the configured base path
    #[arg(long)]
    base_path: Option<String>,

    /// Filter to run
    #[arg(long, default_value = append_cert_defaults::NAME)]
    filter: String,

    /// Output format (defaults to the configured one)
    #[arg(short, long, value_enum)]
    output: Option<Format>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print registered filters and exit
    #[arg(long)]
    list_filters: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Json => OutputFormat::Json,
            Format::Yaml => OutputFormat::Yaml,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Tracing ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    print!("{}", run(cli)?);
    Ok(())
}

/// Execute one invocation and return the text destined for stdout.
fn run(cli: Cli) -> anyhow::Result<String> {
    // ── Filter registry ──
    let mut registry = FilterRegistry::new();
    certdefaults_filter::register_all(&mut registry);

    if cli.list_filters {
        let mut listing = String::new();
        for name in registry.list() {
            let description = registry.get(name).map(|f| f.description()).unwrap_or_default();
            listing.push_str(&format!("{name}\t{description}\n"));
        }
        return Ok(listing);
    }

    // ── Config ──
    let mut config = if cli.config.exists() {
        info!(path = %cli.config.display(), "Loading config file");
        PipelineConfig::load(&cli.config)?
    } else {
        info!("No config file found, using defaults");
        PipelineConfig::default()
    };
    if let Some(base_path) = cli.base_path {
        config.base_path = base_path;
    }
    let format = cli.output.map(OutputFormat::from).unwrap_or(config.output);

    // ── Run ──
    let text = read_input(cli.input.as_deref())?;
    let input = parse_intents(&text)?;
    let args = FilterArgs::new(config.base_path, config.ca);
    let output = registry
        .apply(&cli.filter, &input, &args)
        .with_context(|| format!("filter '{}' failed", cli.filter))?;

    render(&output, format)
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn render(value: &Value, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => {
            let mut s = serde_json::to_string_pretty(value)?;
            s.push('\n');
            s
        }
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    })
}
