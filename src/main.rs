//! Command-line front end: split a file into parts or merge parts back

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

use file_splitter_lib::{
    FileMerger, FileSplitter, MergeConfig, SplitConfig, SplitMode, DEFAULT_PARTS_DIR,
    DEFAULT_PARTS_SIZE,
};

/// Split a file into parts, or merge the parts back into the original file
#[derive(Parser, Debug)]
#[command(name = "file-splitter")]
#[command(version, about, long_about = None)]
struct Args {
    /// Split the file into parts (default when neither mode is given)
    #[arg(long, conflicts_with = "merge")]
    split: bool,

    /// Merge the parts back into the original file
    #[arg(long)]
    merge: bool,

    /// Source file to split, or destination file to merge into
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Directory holding the parts
    #[arg(short = 'd', long = "dir", default_value = DEFAULT_PARTS_DIR)]
    parts_dir: PathBuf,

    /// Size of the parts in bytes; zero or negative means the default
    #[arg(short = 'b', long = "bytes", default_value_t = DEFAULT_PARTS_SIZE as i64, allow_negative_numbers = true)]
    parts_size: i64,

    /// Split mode: binary (bin) or newline (nl)
    #[arg(short = 'm', long = "mode", default_value = "binary", value_parser = parse_split_mode)]
    mode: SplitMode,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_split_mode(value: &str) -> std::result::Result<SplitMode, String> {
    value.parse::<SplitMode>().map_err(|e| e.to_string())
}

fn setup_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    Ok(())
}

fn run_split(args: &Args) -> Result<()> {
    let config = SplitConfig {
        parts_size: args.parts_size,
        parts_dir: args.parts_dir.clone(),
        file_path: args.file.clone().unwrap_or_default(),
        mode: args.mode,
    };
    debug!("Split configuration: {:?}", config);

    let outcome = FileSplitter::with_config(config)
        .run()
        .context("Split failed")?;

    println!("File split successfully into {} parts", outcome.part_count);
    Ok(())
}

fn run_merge(args: &Args) -> Result<()> {
    let config = MergeConfig {
        parts_dir: args.parts_dir.clone(),
        file_path: args.file.clone(),
    };
    debug!("Merge configuration: {:?}", config);

    let outcome = FileMerger::with_config(config)
        .merge()
        .context("Merge failed")?;

    println!(
        "File merged successfully into {} from {} parts",
        outcome.destination.display(),
        outcome.parts_merged
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = setup_logging(&args.log_level) {
        eprintln!("ERROR: {e:#}");
        return ExitCode::from(2);
    }

    // clap rejects --split together with --merge; neither means split
    let result = match (args.split, args.merge) {
        (_, true) => run_merge(&args),
        (_, false) => run_split(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            ExitCode::from(2)
        }
    }
}
