//! `underlay` - place lyric syllables under the notes of notation lines.
//!
//! Usage: underlay [INPUT.json] [--format json|lilypond] [--unterminated extend|close|reject]
//!
//! Reads a line document (one line object or an array of them) from INPUT,
//! `UNDERLAY_INPUT`, or stdin, and prints the syllable assignments.

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;

use underlay::config::{Config, OutputFormat};
use underlay::document::{load_lines, read_lines, render, distribute_document};
use underlay::lyrics::UnterminatedPolicy;

const USAGE: &str =
    "usage: underlay [INPUT.json] [--format json|lilypond] [--unterminated extend|close|reject]";

fn main() -> anyhow::Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;
    init_logging(&config);

    let args = parse_args(std::env::args().skip(1))?;
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(policy) = args.unterminated {
        config.unterminated = policy;
    }
    if let Some(path) = args.input {
        config.input = Some(path);
    }

    tracing::debug!(
        "{} {} (format: {}, unterminated: {})",
        config.app_name(),
        config.app_version(),
        config.format,
        config.unterminated
    );

    let lines = match &config.input {
        Some(path) => load_lines(path)?,
        None => read_lines(io::stdin().lock()).context("Failed to read line document from stdin")?,
    };

    let results = distribute_document(&lines, config.unterminated)?;
    println!("{}", render(&results, config.format)?);

    Ok(())
}

/// Install the fmt subscriber, filtered by `UNDERLAY_LOG` then `RUST_LOG`.
fn init_logging(config: &Config) {
    let filter = config
        .log_filter
        .as_deref()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Command-line overrides.
#[derive(Debug, Default)]
struct Args {
    format: Option<OutputFormat>,
    unterminated: Option<UnterminatedPolicy>,
    input: Option<PathBuf>,
}

/// Parse command-line arguments, rejecting anything unrecognized.
fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--format" => parsed.format = Some(flag_value(&arg, args.next())?.parse()?),
            "--unterminated" => {
                parsed.unterminated = Some(flag_value(&arg, args.next())?.parse()?);
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                if let Some((name, _)) = flag.split_once('=') {
                    bail!("unsupported argument `{flag}`; write `{name} VALUE` instead");
                }
                bail!("unknown flag `{flag}`\n{USAGE}");
            }
            path => {
                if let Some(previous) = &parsed.input {
                    bail!("unexpected argument `{path}`: input already given as {}", previous.display());
                }
                parsed.input = Some(PathBuf::from(path));
            }
        }
    }

    Ok(parsed)
}

/// The value following `flag`, which must be present.
fn flag_value(flag: &str, value: Option<String>) -> anyhow::Result<String> {
    value.with_context(|| format!("{flag} requires a value\n{USAGE}"))
}
