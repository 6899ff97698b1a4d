use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for vaxmap
#[derive(Debug, Parser)]
#[command(
    name = "vaxmap",
    version,
    about = "Build the Italian regional vaccination table and export map layers"
)]
pub struct CliArgs {
    /// Optional TOML configuration (sources, field names, fetch timeout)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Region boundaries GeoJSON (path or URL), overrides the config
    #[arg(long, global = true)]
    pub boundaries: Option<String>,

    /// Vaccination summary CSV (path or URL), overrides the config
    #[arg(long, global = true)]
    pub vaccinations: Option<String>,

    /// Population CSV (path or URL), overrides the config
    #[arg(long, global = true)]
    pub population: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show build statistics and the headline summary
    Stats,

    /// List all joined regions
    Regions,

    /// Show every column for one region
    Region {
        /// Region name (accents and case are ignored)
        name: String,
    },

    /// List the columns a map can be colored by
    Columns,

    /// Export one choropleth layer as JSON
    Map {
        /// Column used as color key (e.g. totale, perc_vac, densita)
        #[arg(long, default_value = "totale")]
        column: String,

        #[command(flatten)]
        range: RangeArgs,

        /// Write to a file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Export both dashboard maps, sliders and summary as JSON
    Dashboard {
        #[arg(long, default_value = "totale")]
        left: String,

        #[arg(long, default_value = "prima_dose")]
        right: String,

        /// Upper area bound in km^2 (default: slider maximum)
        #[arg(long)]
        max_area: Option<f64>,

        /// Upper density bound in ab/km^2 (default: slider maximum)
        #[arg(long)]
        max_density: Option<f64>,

        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
}

/// Inclusive area and density bounds; a missing bound is open.
#[derive(Debug, Args)]
pub struct RangeArgs {
    #[arg(long)]
    pub min_area: Option<f64>,

    #[arg(long)]
    pub max_area: Option<f64>,

    #[arg(long)]
    pub min_density: Option<f64>,

    #[arg(long)]
    pub max_density: Option<f64>,
}
