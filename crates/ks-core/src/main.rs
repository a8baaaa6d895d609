//! Keystroke sanitizer CLI.
//!
//! Thin surrounding application for the sanitization core: loads
//! recorded session logs and a plaintext secret list, runs the
//! sanitizer, and writes records that are safe to persist. Payload
//! output goes to stdout, logs to stderr.

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use ks_common::{error::format_error_human, Error, OutputFormat, Result, SanitizeConfig};
use ks_core::logging::{init_logging, LogLevel};
use ks_core::session::{session_files_in, write_events_jsonl};
use ks_core::{load_secrets, SanitizedSession, Sanitizer, SessionLog};
use std::path::{Path, PathBuf};

/// Keystroke sanitizer - detect and redact secrets in recorded keystroke sessions
#[derive(Parser)]
#[command(name = "ks-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to a sanitizer config file (JSON)
    #[arg(long, global = true, env = "KS_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Override the fuzzy similarity threshold (0.0-1.0]
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// Override the fuzzy window tolerance, in characters
    #[arg(long, global = true)]
    tolerance: Option<usize>,

    /// Compare secrets case-insensitively
    #[arg(long, global = true)]
    case_insensitive: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sanitize a session log (or a directory of logs) against a secret list
    Sanitize(SanitizeArgs),

    /// Report match counts without writing anything
    Scan(ScanArgs),

    /// Reconstruct and print the raw text of a session log (unsanitized!)
    Extract(ExtractArgs),
}

#[derive(Args)]
struct SanitizeArgs {
    /// Session log file, or directory of `.json` session logs
    input: PathBuf,

    /// Plaintext secret list (newline-delimited or JSON array)
    #[arg(long, short = 's')]
    secrets: PathBuf,

    /// Output file (single input) or directory (directory input);
    /// defaults to stdout for a single input
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Overwrite each input file with its sanitized record
    #[arg(long, conflicts_with = "output")]
    in_place: bool,
}

#[derive(Args)]
struct ScanArgs {
    /// Session log file, or directory of `.json` session logs
    input: PathBuf,

    /// Plaintext secret list (newline-delimited or JSON array)
    #[arg(long, short = 's')]
    secrets: PathBuf,
}

#[derive(Args)]
struct ExtractArgs {
    /// Session log file
    input: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_logging(
        LogLevel::from_flags(cli.global.verbose, cli.global.quiet),
        cli.global.no_color,
    );

    if let Err(err) = run(&cli) {
        eprintln!("{}", format_error_human(&err, !cli.global.no_color));
        std::process::exit(err.exit_code());
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(&cli.global)?;
    match &cli.command {
        Commands::Sanitize(args) => cmd_sanitize(config, &cli.global, args),
        Commands::Scan(args) => cmd_scan(config, &cli.global, args),
        Commands::Extract(args) => cmd_extract(args),
    }
}

/// Config file (if any) with CLI overrides applied on top.
fn resolve_config(global: &GlobalOpts) -> Result<SanitizeConfig> {
    let mut config = match &global.config {
        Some(path) => SanitizeConfig::load(path)?,
        None => SanitizeConfig::default(),
    };
    if let Some(threshold) = global.threshold {
        config.fuzzy_threshold = threshold;
    }
    if let Some(tolerance) = global.tolerance {
        config.fuzzy_tolerance = tolerance;
    }
    if global.case_insensitive {
        config.case_sensitive = false;
    }
    config.validate()?;
    Ok(config)
}

fn cmd_sanitize(config: SanitizeConfig, global: &GlobalOpts, args: &SanitizeArgs) -> Result<()> {
    let sanitizer = Sanitizer::new(config)?;
    let secrets = load_secrets(&args.secrets)?;

    if args.input.is_dir() {
        return sanitize_dir(&sanitizer, &secrets, args);
    }

    let log = SessionLog::load(&args.input)?;
    let event_count = log.events.len();
    let outcome = sanitizer.sanitize(&log.events, &secrets);
    let redacted = outcome.redacted_count();
    let record = SanitizedSession::from_outcome(outcome, Utc::now());

    let destination = if args.in_place {
        Some(args.input.clone())
    } else {
        args.output.clone()
    };

    match destination {
        Some(path) => {
            record.save(&path)?;
            tracing::info!(path = %path.display(), redacted, "sanitized session written");
        }
        None => emit_record(global.format, &record, event_count)?,
    }
    Ok(())
}

fn sanitize_dir(sanitizer: &Sanitizer, secrets: &[String], args: &SanitizeArgs) -> Result<()> {
    let output_dir = match (&args.output, args.in_place) {
        (Some(dir), _) => Some(dir.clone()),
        (None, true) => None,
        (None, false) => {
            return Err(Error::Config(
                "directory input requires --output <dir> or --in-place".to_string(),
            ))
        }
    };
    if let Some(dir) = &output_dir {
        std::fs::create_dir_all(dir)?;
    }

    for path in session_files_in(&args.input)? {
        let log = SessionLog::load(&path)?;
        let outcome = sanitizer.sanitize(&log.events, secrets);
        let redacted = outcome.redacted_count();
        let matches = outcome.report.total();
        let record = SanitizedSession::from_outcome(outcome, Utc::now());

        let destination = match (&output_dir, path.file_name()) {
            (Some(dir), Some(name)) => dir.join(name),
            _ => path.clone(),
        };
        record.save(&destination)?;
        println!(
            "{}: {} matches, {} events redacted",
            file_name_of(&path),
            matches,
            redacted
        );
    }
    Ok(())
}

fn cmd_scan(config: SanitizeConfig, global: &GlobalOpts, args: &ScanArgs) -> Result<()> {
    let sanitizer = Sanitizer::new(config)?;
    let secrets = load_secrets(&args.secrets)?;

    let files = if args.input.is_dir() {
        session_files_in(&args.input)?
    } else {
        vec![args.input.clone()]
    };

    let mut report = serde_json::Map::new();
    for path in &files {
        let log = SessionLog::load(path)?;
        let outcome = sanitizer.sanitize(&log.events, &secrets);
        let summary = serde_json::json!({
            "final_text": outcome.report.final_text.len(),
            "snapshots": outcome.report.snapshots.len(),
            "redacted_events": outcome.redacted_count(),
        });
        if global.format == OutputFormat::Summary {
            println!(
                "{}: {} matches, {} events would be redacted",
                file_name_of(path),
                outcome.report.total(),
                outcome.redacted_count()
            );
        }
        report.insert(file_name_of(path), summary);
    }

    if global.format != OutputFormat::Summary {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::Value::Object(report))?
        );
    }
    Ok(())
}

fn cmd_extract(args: &ExtractArgs) -> Result<()> {
    let log = SessionLog::load(&args.input)?;
    let buffer = ks_buffer::TextBuffer::replay(&log.events);
    tracing::warn!("extracted text is unsanitized and may contain secrets");
    println!("{}", buffer.text());
    Ok(())
}

fn emit_record(
    format: OutputFormat,
    record: &SanitizedSession,
    event_count: usize,
) -> Result<()> {
    match format {
        OutputFormat::Json => record.write_json(std::io::stdout().lock())?,
        OutputFormat::Jsonl => write_events_jsonl(std::io::stdout().lock(), &record.events)?,
        OutputFormat::Summary => println!(
            "{} events, {} redacted, {} final-text matches, {} snapshot matches",
            event_count,
            record.matches.redacted_events,
            record.matches.final_text,
            record.matches.snapshots
        ),
    }
    Ok(())
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
