use clap::Parser;
use main_error::MainError;
use quake_log_parser::{parse_report, Report};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::{self, File};
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parse a Quake 3 Arena server log and print the statistics of each game as JSON
#[derive(Parser, Debug)]
#[command(name = "quake-log-parser")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path of the server log
    #[arg(short = 'f', long)]
    log_file: PathBuf,

    /// Include the number of deaths per cause in each game
    #[arg(short = 'm', long)]
    mean_of_death: bool,

    /// Write the report to this file instead of stdout
    #[arg(short = 'o', long)]
    output_file: Option<PathBuf>,
}

fn main() -> Result<(), MainError> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    // server logs aren't guaranteed to be valid utf8
    let content = fs::read(&args.log_file)?;
    let content = String::from_utf8_lossy(&content);

    let report = parse_report(&content, args.mean_of_death)?;
    info!(games = report.len(), "parsed log");

    match &args.output_file {
        Some(path) => write_report(BufWriter::new(File::create(path)?), &report)?,
        None => write_report(stdout().lock(), &report)?,
    }

    Ok(())
}

fn write_report<W: Write>(mut writer: W, report: &Report) -> Result<(), MainError> {
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"\t"));
    report.serialize(&mut serializer)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
