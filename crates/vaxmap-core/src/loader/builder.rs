// crates/vaxmap-core/src/loader/builder.rs
use super::common_io;
use super::{aggregate_vaccinations, read_boundaries, read_population, Source};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::model::RegionTable;
use std::time::Instant;
use tracing::info;

// -----------------------------------------------------------------------------
// STARTUP BUILD
// -----------------------------------------------------------------------------

impl RegionTable {
    /// **Startup Load:** fetch the three snapshots, join, derive.
    ///
    /// Runs sequentially and stops at the first source that cannot be
    /// retrieved or parsed, so a partial table is never returned.
    pub fn load(config: &PipelineConfig) -> Result<Self> {
        let started = Instant::now();
        let sources = &config.sources;

        info!(source = %sources.boundaries, "loading region boundaries");
        let reader = open(&sources.boundaries, config)?;
        let boundaries = read_boundaries(reader, &config.boundary_fields)?;
        info!(regions = boundaries.len(), "boundaries loaded");

        info!(source = %sources.vaccinations, "loading vaccination records");
        let reader = open(&sources.vaccinations, config)?;
        let vaccinations = aggregate_vaccinations(reader, &config.vaccination_fields)?;
        info!(
            rows = vaccinations.rows,
            regions = vaccinations.regions.len(),
            last_update = ?vaccinations.last_update,
            "vaccinations aggregated"
        );

        info!(source = %sources.population, "loading population");
        let reader = open(&sources.population, config)?;
        let population = read_population(reader, &config.population_fields)?;
        info!(regions = population.len(), "population loaded");

        let table = RegionTable::from_sources(boundaries, &vaccinations, &population)?;
        info!(
            regions = table.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "region table ready"
        );
        Ok(table)
    }
}

fn open(source: &Source, config: &PipelineConfig) -> Result<Box<dyn std::io::Read>> {
    common_io::open_stream(source, &config.fetch)
}
