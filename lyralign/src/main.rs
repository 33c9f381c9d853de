//! lyralign - lyric-to-audio alignment tool
//!
//! Reads lyrics embedded in MP3 tags, aligns each line to the audio using a
//! speech-recognition transcript (or a duration-proportional fallback when
//! no usable transcript exists), and embeds the timestamped result into an
//! output copy of the file.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lyralign::services::{
    is_backend_available, Transcriber, TrackScanner, WhisperModel, WhisperTranscriber,
};
use lyralign::workflow::{AlignmentReport, TrackProcessor};
use lyralign_common::config::{default_models_dir, TomlConfig};

/// Command-line arguments for lyralign
#[derive(Parser, Debug)]
#[command(name = "lyralign")]
#[command(about = "Aligns lyrics embedded in MP3 files to the audio, line by line")]
#[command(version)]
struct Args {
    /// MP3 file, or directory of MP3 files, to process
    path: PathBuf,

    /// Output file path (default: <name>_aligned.mp3 next to the source)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Whisper model size
    #[arg(short, long, value_enum, env = "LYRALIGN_MODEL")]
    model: Option<WhisperModel>,

    /// Directory holding whisper model files
    #[arg(long, env = "LYRALIGN_MODELS_DIR")]
    models_dir: Option<PathBuf>,

    /// Language hint for transcription (e.g. "en"); auto-detect when unset
    #[arg(long, env = "LYRALIGN_LANGUAGE")]
    language: Option<String>,

    /// Compute and print alignments without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Print each alignment report as JSON instead of timestamped text
    #[arg(long)]
    json: bool,

    /// Descend into subdirectories when processing a directory
    #[arg(long)]
    recursive: bool,
}

/// Effective settings after merging CLI and environment over the config file.
#[derive(Debug)]
struct Settings {
    model: WhisperModel,
    models_dir: PathBuf,
    language: Option<String>,
}

impl Settings {
    fn resolve(args: &Args, config: &TomlConfig) -> Result<Self> {
        let model = match args.model {
            Some(model) => model,
            None => config
                .model
                .parse::<WhisperModel>()
                .with_context(|| format!("invalid model name in config: {}", config.model))?,
        };
        let models_dir = args
            .models_dir
            .clone()
            .or_else(|| config.models_dir.clone())
            .unwrap_or_else(default_models_dir);
        let language = args.language.clone().or_else(|| config.language.clone());
        Ok(Self {
            model,
            models_dir,
            language,
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = TomlConfig::load()?;
    init_tracing(&config)?;

    info!(
        "Starting lyralign v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let settings = Settings::resolve(&args, &config)?;
    let model_path = settings.model.path_in(&settings.models_dir);
    info!(
        model = %settings.model,
        model_path = %model_path.display(),
        language = ?settings.language,
        "transcription settings"
    );

    if !is_backend_available() {
        warn!("transcription backend not compiled in; alignment will use the duration fallback");
    } else if !model_path.exists() {
        warn!(
            model_path = %model_path.display(),
            "model file not found; alignment will use the duration fallback"
        );
    }

    let transcriber = WhisperTranscriber::new(model_path, settings.language.clone());
    let processor = TrackProcessor::new(transcriber);

    if args.path.is_dir() {
        if args.output.is_some() {
            bail!("--output cannot be used with a directory; outputs are written next to each source");
        }
        run_batch(&processor, &args)
    } else {
        run_single(&processor, &args)
    }
}

/// Install the console subscriber, plus a file layer when configured.
fn init_tracing(config: &TomlConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.as_str().into());

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    match &config.logging.file {
        Some(path) => {
            let file = File::options()
                .append(true)
                .create(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => registry.init(),
    }
    Ok(())
}

fn run_single<T: Transcriber>(processor: &TrackProcessor<T>, args: &Args) -> Result<()> {
    let report = processor
        .process(&args.path, args.output.as_deref(), args.dry_run)
        .with_context(|| format!("failed to process {}", args.path.display()))?;
    emit_report(&report, args.json)
}

fn run_batch<T: Transcriber>(processor: &TrackProcessor<T>, args: &Args) -> Result<()> {
    let files = TrackScanner::new().scan(&args.path, args.recursive)?;
    if files.is_empty() {
        warn!(dir = %args.path.display(), "no MP3 files to process");
        return Ok(());
    }

    info!(count = files.len(), "starting batch run");
    let mut processed = 0usize;
    let mut failed = 0usize;

    for file in &files {
        match processor.process(file, None, args.dry_run) {
            Ok(report) => {
                processed += 1;
                emit_report(&report, args.json)?;
            }
            Err(e) => {
                failed += 1;
                error!(file = %file.display(), error = %e, "failed to process track");
            }
        }
    }

    info!(processed = processed, failed = failed, "batch run complete");
    if failed > 0 {
        bail!("{} of {} tracks failed", failed, files.len());
    }
    Ok(())
}

/// Print one track's result to stdout in the selected format.
fn emit_report(report: &AlignmentReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report.formatted);
        if let Some(output) = &report.output {
            info!(output = %output.display(), "aligned lyrics embedded");
        }
    }
    Ok(())
}
