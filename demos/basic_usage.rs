//! Basic usage example for vaxmap-rs
//!
//! This example demonstrates how to:
//! - Build the region table from local snapshots
//! - Look up regions and read derived columns
//! - Filter by area and density
//! - Render a choropleth layer as JSON
//!
//! Run with `cargo run --example basic_usage`. Pass three paths (boundaries,
//! vaccinations, population) to use other snapshots.

use vaxmap_core::view::{render, Summary};
use vaxmap_core::{ColumnId, PipelineConfig, RangeFilter, RegionTable, Result, Source, VaccinationMetric};

fn main() -> Result<()> {
    println!("=== vaxmap-rs Basic Usage Example ===\n");

    let fixtures = concat!(env!("CARGO_MANIFEST_DIR"), "/crates/vaxmap-core/tests/fixtures");
    let mut paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.len() != 3 {
        paths = ["regions.geojson", "vaccinations.csv", "population.csv"]
            .iter()
            .map(|f| format!("{fixtures}/{f}"))
            .collect();
    }

    let mut config = PipelineConfig::default();
    config.sources.boundaries = Source::from(paths[0].as_str());
    config.sources.vaccinations = Source::from(paths[1].as_str());
    config.sources.population = Source::from(paths[2].as_str());

    println!("Building region table...");
    let table = RegionTable::load(&config)?;
    println!("✓ {} regions joined\n", table.len());

    // Example 1: All rows
    println!("--- Example 1: Regions ---");
    for r in table.regions() {
        println!(
            "- {} ({}) area {} density {:?} vaccinated {:?}%",
            r.name(),
            r.code(),
            r.area(),
            r.density(),
            r.percent_vaccinated(VaccinationMetric::Total)
        );
    }
    println!();

    // Example 2: Accent-insensitive lookup
    println!("--- Example 2: Find a region by name ---");
    if let Some(r) = table.find_by_name("vallee d'aoste") {
        println!("Found: {}", r.name());
        for m in [VaccinationMetric::FirstDose, VaccinationMetric::SecondDose] {
            println!("  {}: {:?}%", m.label(), r.percent_vaccinated(m));
        }
    }
    println!();

    // Example 3: Area filter
    println!("--- Example 3: Regions up to 10K km^2 ---");
    let small = table.filter(&RangeFilter::up_to(10_000.0, f64::INFINITY));
    println!("{:?}\n", small.names());

    // Example 4: Headline numbers and one layer
    println!("--- Example 4: Summary and layer ---");
    let summary = Summary::of(&table);
    println!(
        "Vaccinated {} of {} ({:?}%)",
        summary.total_vaccinated_label, summary.total_population, summary.percent_vaccinated
    );
    let column: ColumnId = "perc_vac".parse()?;
    let layer = render(&table, &RangeFilter::all(), column);
    println!("Layer '{}' with {} features, color range {:?}", layer.label, layer.len(), layer.color_range);

    Ok(())
}
