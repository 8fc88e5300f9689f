use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use oxiclust::{Cure, CureConfig};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "CURE clustering over a KD-Tree index", long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Cluster the points of a JSON file (an array of coordinate arrays)
    Cure {
        /// Input JSON file
        #[clap(short, long)]
        input: PathBuf,

        /// Number of clusters to produce
        #[clap(short = 'k', long)]
        clusters: Option<usize>,

        /// Representative points per cluster
        #[clap(short, long)]
        represent: Option<usize>,

        /// Shrink factor for representative points
        #[clap(short = 'z', long)]
        compression: Option<f64>,

        /// TOML file with default parameters; flags override its values
        #[clap(short = 'c', long)]
        config: Option<PathBuf>,

        /// Write the result here instead of stdout
        #[clap(short, long)]
        output: Option<PathBuf>,

        /// Emit one cluster label per point instead of the full result
        #[clap(short, long)]
        labels: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    // The fmt subscriber also forwards the library's `log` records.
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();
}

fn run_cure(
    input: PathBuf,
    clusters: Option<usize>,
    represent: Option<usize>,
    compression: Option<f64>,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    labels: bool,
) -> Result<()> {
    let mut config = CureConfig::load_or_default(config_path.as_deref())
        .context("Failed to load CURE configuration")?;
    if let Some(number_cluster) = clusters {
        config.number_cluster = number_cluster;
    }
    if let Some(number_represent_points) = represent {
        config.number_represent_points = number_represent_points;
    }
    if let Some(compression) = compression {
        config.compression = compression;
    }

    let contents = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read input file '{}'", input.display()))?;
    let data: Vec<Vec<f64>> = serde_json::from_str(&contents)
        .with_context(|| format!("Input file '{}' is not a JSON array of points", input.display()))?;
    info!("Loaded {} points from '{}'", data.len(), input.display());

    let mut cure = Cure::with_config(data, config).context("Invalid CURE parameters")?;
    cure.process().context("CURE clustering failed")?;

    let rendered = if labels {
        serde_json::to_string_pretty(&cure.labels()?)?
    } else {
        serde_json::to_string_pretty(cure.result())?
    };

    match output {
        Some(path) => {
            fs::write(&path, rendered)
                .with_context(|| format!("Failed to write result to '{}'", path.display()))?;
            info!("Result written to '{}'", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", rendered).context("Failed to write result to stdout")?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Cure { input, clusters, represent, compression, config, output, labels } => {
            run_cure(input, clusters, represent, compression, config, output, labels)
        }
    }
}
