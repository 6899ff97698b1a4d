//! vaxmap: command-line interface for vaxmap-core
//!
//! Builds the regional vaccination table once, then prints statistics,
//! looks up regions, or exports choropleth layers as JSON.
//!
//! Usage examples
//! --------------
//!
//! - Show build statistics and the headline numbers
//!   $ vaxmap stats
//!
//! - Use local snapshots instead of the published URLs
//!   $ vaxmap --boundaries regions.geojson --vaccinations vax.csv stats
//!
//! - Show every column of one region (accents and case ignored)
//!   $ vaxmap region "emilia romagna"
//!
//! - Export a layer colored by first-dose share, small regions only
//!   $ vaxmap map --column perc_vac_prima_dose --max-area 10000 -o map.json
//!
//! - Export both dashboard maps with their sliders
//!   $ vaxmap dashboard --left totale --right seconda_dose
//!
//! Logging goes to stderr and follows `RUST_LOG` (default `info`).
mod args;

use crate::args::{CliArgs, Commands, RangeArgs};
use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use vaxmap_core::view::{render, render_dashboard, DashboardState, Summary};
use vaxmap_core::{Bounds, ColumnId, PipelineConfig, RangeFilter, RegionTable, Source, VaccinationMetric};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = pipeline_config(&args)?;

    // Selectors are checked before any download.
    let selected = match &args.command {
        Commands::Map { column, .. } => vec![parse_column(column)?],
        Commands::Dashboard { left, right, .. } => vec![parse_column(left)?, parse_column(right)?],
        _ => Vec::new(),
    };

    let table = RegionTable::load(&config).context("failed to build region table")?;
    table
        .validate_columns(&selected)
        .context("selected column cannot color the map")?;

    match args.command {
        Commands::Stats => {
            let stats = table.stats();
            let summary = Summary::of(&table);
            println!("Table statistics:");
            println!("  Boundary regions: {}", stats.boundary_regions);
            println!("  Vaccination rows: {}", stats.vaccination_rows);
            println!("  Vaccination regions: {}", stats.vaccination_regions);
            println!("  Population regions: {}", stats.population_regions);
            println!("  Joined regions: {}", stats.joined);
            if !stats.excluded_codes.is_empty() {
                println!("  Excluded codes: {:?}", stats.excluded_codes);
            }
            println!("Summary:");
            println!(
                "  Vaccinated: {} ({})",
                summary.total_vaccinated_label, summary.total_vaccinated
            );
            println!("  Population: {}", summary.total_population);
            match summary.percent_vaccinated {
                Some(p) => println!("  Vaccinated share: {p}%"),
                None => println!("  Vaccinated share: n/a"),
            }
            match summary.last_update {
                Some(d) => println!("  Last update: {d}"),
                None => println!("  Last update: unknown"),
            }
        }

        Commands::Regions => {
            for r in table.regions() {
                println!(
                    "{:<32} {:>3}  area {:>8}  density {:>6}  vaccinated {}%",
                    r.name(),
                    r.code(),
                    r.area(),
                    fmt_opt(r.density()),
                    fmt_opt(r.percent_vaccinated(VaccinationMetric::Total)),
                );
            }
        }

        Commands::Region { name } => match table.find_by_name(&name) {
            Some(r) => {
                println!("Region: {} ({})", r.name(), r.code());
                for col in ColumnId::all() {
                    println!("  {:<52} {}", col.to_string(), fmt_opt(col.value(r)));
                }
                for a in r.anomalies() {
                    println!("  ! {a}");
                }
            }
            None => eprintln!("No region found for: {name}"),
        },

        Commands::Columns => {
            for col in ColumnId::all() {
                println!("{:<52} {}", col.to_string(), col.label());
            }
        }

        Commands::Map { range, output, .. } => {
            let layer = render(&table, &range_filter(&range), selected[0]);
            tracing::info!(column = %layer.column, regions = layer.len(), "layer rendered");
            emit(&layer, output.as_deref())?;
        }

        Commands::Dashboard {
            max_area,
            max_density,
            output,
            ..
        } => {
            let mut state = DashboardState::initial(&table);
            state.left = selected[0];
            state.right = selected[1];
            if let Some(max) = max_area {
                state.filter.area = Bounds::up_to(max);
            }
            if let Some(max) = max_density {
                state.filter.density = Bounds::up_to(max);
            }
            let dashboard = render_dashboard(&table, &state);
            emit(&dashboard, output.as_deref())?;
        }
    }

    Ok(())
}

fn pipeline_config(args: &CliArgs) -> anyhow::Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::load_from_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(s) = &args.boundaries {
        config.sources.boundaries = Source::from(s.as_str());
    }
    if let Some(s) = &args.vaccinations {
        config.sources.vaccinations = Source::from(s.as_str());
    }
    if let Some(s) = &args.population {
        config.sources.population = Source::from(s.as_str());
    }
    Ok(config)
}

fn parse_column(name: &str) -> anyhow::Result<ColumnId> {
    name.parse::<ColumnId>()
        .with_context(|| "run `vaxmap columns` to list valid names")
}

fn range_filter(range: &RangeArgs) -> RangeFilter {
    let bounds = |min: Option<f64>, max: Option<f64>| {
        Bounds::new(min.unwrap_or(f64::NEG_INFINITY), max.unwrap_or(f64::INFINITY))
    };
    RangeFilter::new(
        bounds(range.min_area, range.max_area),
        bounds(range.min_density, range.max_density),
    )
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn emit<T: Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
