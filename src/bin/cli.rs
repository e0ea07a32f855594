//! mhdash CLI
//!
//! Offline tooling for the dashboard's data:
//! - Summarize the loaded dataset
//! - Render one chart's figure to JSON
//! - Generate a default config file

use clap::{Parser, Subcommand};
use mhdash::bindings::{BindingRegistry, InputValues};
use mhdash::config::{generate_default_config, Config};
use mhdash::dataset::Dataset;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mhdash-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect the mental-health dashboard dataset")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show row counts, year ranges and countries
    Summary,

    /// List charts and the controls they depend on
    Bindings,

    /// Print the figure a chart would show for the given control values
    Figure {
        /// Chart id (geo_scatter, scatter-graph, bar-graph, line-graph)
        output: String,
        /// Control values in id=value format
        #[arg(short, long)]
        input: Vec<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mhdash=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary => {
            let dataset = load_dataset(cli.config.as_ref())?;
            let years = |range: Option<(i32, i32)>| {
                range
                    .map(|(min, max)| format!("{}-{}", min, max))
                    .unwrap_or_else(|| "none".to_string())
            };

            println!("Metrics rows:   {}", dataset.metrics().len());
            println!("Joined rows:    {}", dataset.joined().len());
            println!("Years:          {}", years(dataset.year_range()));
            println!("Geo years:      {}", years(dataset.joined_year_range()));

            let countries = dataset.countries();
            println!("Countries:      {}", countries.len());
            for country in countries {
                println!("  {}", country);
            }
        }

        Commands::Bindings => {
            for binding in BindingRegistry::standard().bindings() {
                println!("{:<15} <- {}", binding.output, binding.inputs.join(", "));
            }
        }

        Commands::Figure { output, input } => {
            let inputs = parse_inputs(&input)?;
            let dataset = load_dataset(cli.config.as_ref())?;
            let figure = BindingRegistry::standard().dispatch(&dataset, &output, &inputs)?;
            println!("{}", serde_json::to_string_pretty(&figure)?);
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn load_dataset(config_path: Option<&PathBuf>) -> anyhow::Result<Dataset> {
    let config = match config_path {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    Ok(Dataset::load(
        &config.data.metrics_path,
        &config.data.coordinates_path,
    )?)
}

/// Parse `id=value` pairs. Whole numbers become JSON numbers so year
/// sliders accept them; everything else stays a string.
fn parse_inputs(pairs: &[String]) -> anyhow::Result<InputValues> {
    pairs.iter().try_fold(InputValues::new(), |inputs, pair| {
        let (id, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Invalid input '{}', expected id=value", pair))?;
        Ok(match value.parse::<i64>() {
            Ok(n) => inputs.with(id, n),
            Err(_) => inputs.with(id, value),
        })
    })
}
