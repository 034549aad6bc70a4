use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use handsign_lib::{GestureConfig, JsonLinesSource, OutputFormat, StateUpdatePolicy};
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about = "Classify hand poses and motion gestures from tracked hand frames")]
struct Args {
    /// JSON-lines frame file; "-" reads from stdin
    #[arg(short, long, default_value = "-")]
    input: String,
    /// Configuration file. Defaults to ~/.handsign/config/settings.json
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// State update policy: cascade or every-frame
    #[arg(short, long)]
    policy: Option<String>,
    /// Emit JSON events instead of text lines
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "handsign=info,handsign_lib=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GestureConfig::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => GestureConfig::load().context("Failed to load configuration")?,
    };
    if let Some(policy) = &args.policy {
        config.motion.update_policy = StateUpdatePolicy::from_string(policy)?;
    }

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let summary = if args.input == "-" {
        let mut source = JsonLinesSource::stdin();
        handsign_lib::run(&mut source, &config, format, &mut out)?
    } else {
        let path = PathBuf::from(&args.input);
        let mut source = JsonLinesSource::open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        handsign_lib::run(&mut source, &config, format, &mut out)?
    };
    out.flush()?;

    info!(
        "Done: {} frames, {} skipped",
        summary.frames_processed, summary.frames_skipped
    );
    Ok(())
}
