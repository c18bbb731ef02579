use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photo_enhance::{OutputFormat, PresetId};
use rawtone::models::{AppConfig, PresetSummary};
use rawtone::services::{EnhanceOptions, EnhancePipeline};

#[derive(Parser)]
#[command(name = "rawtone")]
#[command(about = "Adaptive, preset-driven enhancement for developed RAW photos")]
struct Cli {
    /// Config file (default: $RAWTONE_CONFIG, then ./rawtone.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enhance an image with a preset
    Enhance {
        /// Input image (PNG, JPEG, TIFF, ...)
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Preset name, e.g. "night" or "black_and_white"
        #[arg(short, long)]
        preset: Option<PresetId>,

        /// Output format: "jpg" or "png" (default: from the output extension)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Keep the full resolution instead of fitting the delivery box
        #[arg(long)]
        no_resize: bool,
    },
    /// Print the measured characteristics of an image
    Analyze {
        input: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the parameters a preset would use on an image
    Plan {
        input: PathBuf,

        #[arg(short, long)]
        preset: Option<PresetId>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the available presets
    Presets {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write an unenhanced JPEG preview (longest side 1080)
    Preview {
        input: PathBuf,

        /// Output JPEG path
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rawtone=info,photo_enhance=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Presets { json } => run_presets_command(json),
        command => {
            let config = AppConfig::load(cli.config.as_deref())?;
            let pipeline = EnhancePipeline::new(config);
            run_image_command(&pipeline, command)
        }
    }
}

fn run_image_command(pipeline: &EnhancePipeline, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Enhance {
            input,
            output,
            preset,
            format,
            no_resize,
        } => {
            let options = EnhanceOptions {
                preset,
                format,
                keep_size: no_resize,
            };
            let result = pipeline
                .enhance_file(&input, &output, options)
                .map_err(|e| with_path(e, &input))?;
            let quality = result
                .jpeg_quality
                .map(|q| format!(", quality {q}"))
                .unwrap_or_default();
            println!(
                "{} -> {} ({}, {}x{}, {}{quality}, {} bytes)",
                input.display(),
                output.display(),
                result.preset,
                result.width,
                result.height,
                result.format,
                result.bytes.len()
            );
        }
        Commands::Analyze { input, json } => {
            let report = pipeline
                .analyze_file(&input)
                .map_err(|e| with_path(e, &input))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
            }
        }
        Commands::Plan {
            input,
            preset,
            json,
        } => {
            let report = pipeline
                .plan_file(&input, preset)
                .map_err(|e| with_path(e, &input))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
            }
        }
        Commands::Preview { input, output } => {
            let (width, height) = pipeline
                .preview_file(&input, &output)
                .map_err(|e| with_path(e, &input))?;
            println!("{} -> {} ({width}x{height})", input.display(), output.display());
        }
        Commands::Presets { json } => run_presets_command(json)?,
    }
    Ok(())
}

fn run_presets_command(json: bool) -> anyhow::Result<()> {
    let presets = PresetSummary::all();
    if json {
        println!("{}", serde_json::to_string_pretty(&presets)?);
        return Ok(());
    }
    for preset in presets {
        println!("{:<16} {}", preset.name, preset.description);
    }
    Ok(())
}

fn with_path(error: rawtone::AppError, path: &Path) -> anyhow::Error {
    anyhow::Error::new(error).context(format!("processing {}", path.display()))
}
