//! handsynth - play a synthesizer with your hands
//!
//! Run with: cargo run -- --replay session.jsonl
//! Without `--replay` a synthetic performer plays the instrument.

mod app;
mod detector;
mod ui;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::Handsynth;
use handsynth::{config::HandsynthConfig, dsp::Waveform};

/// Hand-controlled synthesizer: left hand picks the note, right hand sets
/// the volume, pinch for wah.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long, env = "HANDSYNTH_CONFIG")]
    config: Option<PathBuf>,

    /// Scale to start with (overrides the config file)
    #[arg(short, long)]
    scale: Option<String>,

    /// Oscillator waveform: sine, square, sawtooth or triangle
    #[arg(short, long)]
    waveform: Option<Waveform>,

    /// Replay recorded hand landmarks (JSON lines) instead of the demo performer
    #[arg(short, long)]
    replay: Option<PathBuf>,

    /// Control frames per second
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log file; the terminal belongs to the UI
    #[arg(long, default_value = "handsynth.log")]
    log_file: PathBuf,

    /// Print the available scales and exit
    #[arg(long)]
    list_scales: bool,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => HandsynthConfig::load(path)
            .wrap_err_with(|| format!("failed to load config {}", path.display()))?,
        None => HandsynthConfig::default(),
    };
    if let Some(scale) = args.scale {
        config.scale = scale;
    }
    if let Some(waveform) = args.waveform {
        config.waveform = waveform;
    }
    config.validate().wrap_err("invalid configuration")?;

    if args.list_scales {
        for name in config.scale_book().names() {
            println!("{name}");
        }
        return Ok(());
    }

    let _guard = init_logging(&args.log_level, &args.log_file)?;

    Handsynth::new(config)
        .fps(args.fps)
        .replay(args.replay)
        .run()
}

fn init_logging(level: &str, file: &Path) -> EyreResult<WorkerGuard> {
    let directory = match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = file
        .file_name()
        .ok_or_else(|| color_eyre::eyre::eyre!("log file path has no file name: {}", file.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Ok(guard)
}
