// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{crate_version, Parser, Subcommand};
use log::{debug, info};
use overlay_format::{CoverageParser, FileReport, IstanbulParser};

const DEFAULT_CHUNK_SIZE: u64 = 4096;

#[derive(Parser, Debug)]
#[command(about = "Turn coverage reports into colored source overlays")]
struct Opt {
    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the per-file overlay of a coverage report as JSON.
    Report(ReportOpt),

    /// Print the label and statistics of each file in a coverage report.
    Summary(SummaryOpt),

    /// Check whether a file looks like an istanbul report.
    Sniff(SniffOpt),

    Version,
}

#[derive(clap::Args, Debug)]
struct ReportOpt {
    coverage_path: PathBuf,

    /// Base for relative source paths. Defaults to the report's directory.
    #[arg(short, long)]
    folder: Option<PathBuf>,

    #[arg(short, long)]
    pretty: bool,
}

#[derive(clap::Args, Debug)]
struct SummaryOpt {
    coverage_path: PathBuf,

    #[arg(short, long)]
    folder: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct SniffOpt {
    path: PathBuf,

    /// Number of leading bytes handed to the format test.
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    let default_filter = if opt.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match opt.command {
        Command::Report(opts) => report(opts).await?,
        Command::Summary(opts) => summary(opts).await?,
        Command::Sniff(opts) => sniff(opts)?,
        Command::Version => version(),
    };

    Ok(())
}

fn version() {
    println!("{}", crate_version!());
}

async fn report(opts: ReportOpt) -> Result<()> {
    let reports = load(&opts.coverage_path, opts.folder.as_deref()).await?;

    let text = if opts.pretty {
        serde_json::to_string_pretty(&reports)?
    } else {
        serde_json::to_string(&reports)?
    };
    println!("{text}");

    Ok(())
}

async fn summary(opts: SummaryOpt) -> Result<()> {
    let reports = load(&opts.coverage_path, opts.folder.as_deref()).await?;

    for report in &reports {
        println!("{} {}", report.file_path.display(), report.label);

        for line in report.tooltip.lines() {
            println!("    {line}");
        }
    }

    Ok(())
}

fn sniff(opts: SniffOpt) -> Result<()> {
    let ext = opts
        .path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let file = File::open(&opts.path)
        .with_context(|| format!("unable to open {}", opts.path.display()))?;
    let mut chunk = vec![];
    file.take(opts.chunk_size).read_to_end(&mut chunk)?;
    let chunk = String::from_utf8_lossy(&chunk);

    if IstanbulParser::test_format(&ext, &chunk) {
        println!("{}", IstanbulParser::INFO.name);
    } else {
        println!("unknown");
    }

    Ok(())
}

async fn load(coverage_path: &Path, folder: Option<&Path>) -> Result<Vec<FileReport>> {
    let content = fs::read_to_string(coverage_path)
        .with_context(|| format!("unable to read coverage report: {}", coverage_path.display()))?;

    let folder = match folder {
        Some(folder) => folder.to_owned(),
        None => coverage_path
            .parent()
            .map(Path::to_owned)
            .unwrap_or_default(),
    };
    let folder = absolute(&folder)?;
    debug!("resolving source paths against {}", folder.display());

    let parser = IstanbulParser::new(content, &folder);
    let reports = parser
        .report()
        .await
        .with_context(|| format!("unable to parse {}", coverage_path.display()))?;

    info!("{} files in {}", reports.len(), coverage_path.display());

    Ok(reports)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let cwd = std::env::current_dir().context("unable to get current directory")?;
    Ok(cwd.join(path))
}
