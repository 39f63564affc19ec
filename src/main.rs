use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hue_sort::image_loader::supported_extensions;
use hue_sort::{
    analyze_image, ColorClassifier, ColorConverter, ColorResult, Organizer, PipelineConfig,
};

#[derive(Parser)]
#[command(name = "hue-sort")]
#[command(about = "Sort photos into folders by their dominant color")]
#[command(version)]
struct Cli {
    /// JSON configuration file (missing fields use defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Show per-image extraction details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy every image into a folder named after its color category
    Organize {
        /// Directory of photos (defaults to the configured input path)
        source: Option<PathBuf>,

        /// Output directory (defaults to the configured output path)
        destination: Option<PathBuf>,

        /// Show where files would go without copying anything
        #[arg(long)]
        dry_run: bool,

        /// Number of k-means clusters
        #[arg(long)]
        colors: Option<usize>,

        /// Seed for reproducible file names
        #[arg(long)]
        seed: Option<u64>,

        /// Let dark, muted oranges classify as Brown
        #[arg(long)]
        brown_override: bool,
    },
    /// Print the analysis of each image as JSON
    Inspect {
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },
    /// Classify a single hex color such as "#8B4513"
    Classify { hex: String },
    /// Write the default configuration to a JSON file
    InitConfig { path: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "hue_sort=debug"
    } else {
        "hue_sort=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Organize {
            source,
            destination,
            dry_run,
            colors,
            seed,
            brown_override,
        } => {
            let mut config = config;
            if let Some(colors) = colors {
                config.extraction.n_colors = colors;
            }
            if seed.is_some() {
                config.naming.seed = seed;
            }
            config.classification.brown_override |= brown_override;
            let source = source.unwrap_or_else(|| config.input_path.clone());
            let destination = destination.unwrap_or_else(|| config.output_path.clone());
            run_organize(&config, &source, &destination, dry_run)
        }
        Commands::Inspect { images } => run_inspect(&config, &images),
        Commands::Classify { hex } => run_classify(&config, &hex),
        Commands::InitConfig { path } => {
            PipelineConfig::default().to_json_file(&path)?;
            println!("Wrote default configuration to {}", path.display());
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    match path {
        Some(path) => {
            let config = PipelineConfig::from_json_file(path)?;
            tracing::debug!(path = %path.display(), "loaded configuration");
            Ok(config)
        }
        None => Ok(PipelineConfig::default()),
    }
}

fn run_organize(
    config: &PipelineConfig,
    source: &Path,
    destination: &Path,
    dry_run: bool,
) -> anyhow::Result<()> {
    let mut organizer = Organizer::new(config)?.dry_run(dry_run);
    let report = organizer.organize(source, destination)?;

    if report.total == 0 {
        println!(
            "No images found in {} (looking for: {})",
            source.display(),
            supported_extensions().join(", ")
        );
        return Ok(());
    }

    println!();
    if dry_run {
        println!("Dry run, nothing was copied.");
    }
    println!(
        "Organized {} of {} images into {}",
        report.placed.len(),
        report.total,
        destination.display()
    );
    for (category, count) in report.category_counts() {
        println!("  {:<14} {}", category, count);
    }
    if !report.skipped.is_empty() {
        println!("Skipped {} images:", report.skipped.len());
        for skipped in &report.skipped {
            println!("  {}: {}", skipped.source.display(), skipped.reason);
        }
    }

    Ok(())
}

fn run_inspect(config: &PipelineConfig, images: &[PathBuf]) -> anyhow::Result<()> {
    for image in images {
        match analyze_image(image, config) {
            Ok(result) => {
                let json = serde_json::to_string_pretty(&InspectLine {
                    path: image,
                    result: &result,
                })?;
                println!("{}", json);
            }
            Err(e) if e.is_recoverable() => {
                eprintln!("{}: {}", image.display(), e.user_message());
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

#[derive(serde::Serialize)]
struct InspectLine<'a> {
    path: &'a Path,
    #[serde(flatten)]
    result: &'a ColorResult,
}

fn run_classify(config: &PipelineConfig, hex: &str) -> anyhow::Result<()> {
    let converter = ColorConverter::new();
    let rgb = converter.hex_to_rgb(hex)?;
    let hsv = converter.rgb_to_hsv(rgb);
    let category = ColorClassifier::new(&config.classification).classify(rgb);

    println!(
        "{} → {} (hue {:.1}°, saturation {:.2}, brightness {:.0})",
        rgb,
        category,
        hsv.hue,
        hsv.saturation,
        hsv.brightness()
    );
    Ok(())
}
