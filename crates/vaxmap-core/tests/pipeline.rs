//! End-to-end build over the fixture snapshots in `tests/fixtures`.

use std::path::PathBuf;
use vaxmap_core::loader::{aggregate_vaccinations, read_boundaries, read_population};
use vaxmap_core::{
    Bounds, ColumnId, DemographicSplit, PipelineConfig, RangeFilter, RegionTable, Source,
    VaccinationMetric, VaxError,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_config() -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.sources.boundaries = Source::from(fixture("regions.geojson"));
    config.sources.vaccinations = Source::from(fixture("vaccinations.csv"));
    config.sources.population = Source::from(fixture("population.csv"));
    config
}

fn load() -> RegionTable {
    RegionTable::load(&fixture_config()).expect("fixture table")
}

#[test]
fn joins_only_codes_present_everywhere() {
    let table = load();
    let names: Vec<&str> = table.regions().iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["Piemonte", "Valle d'Aosta/Vallée d'Aoste"]);

    let stats = table.stats();
    assert_eq!(stats.boundary_regions, 3);
    assert_eq!(stats.vaccination_rows, 5);
    assert_eq!(stats.vaccination_regions, 4);
    assert_eq!(stats.population_regions, 3);
    assert_eq!(stats.joined, 2);
    // Lombardia has no population, Trentino has no boundary.
    assert_eq!(stats.excluded_codes, vec![3, 4]);
}

#[test]
fn derived_columns_match_the_sources() {
    let table = load();

    let piemonte = table.get("Piemonte").unwrap();
    assert_eq!(piemonte.code(), 1);
    assert_eq!(piemonte.vaccinated(VaccinationMetric::Total), 2_150_000);
    assert_eq!(piemonte.vaccinated(VaccinationMetric::Over80), 550_000);
    assert_eq!(piemonte.total_population(), 4_300_000);
    assert_eq!(piemonte.area(), 30_000.0);
    assert_eq!(piemonte.density(), Some(143.0));
    assert_eq!(piemonte.percent_vaccinated(VaccinationMetric::Total), Some(50.0));
    assert_eq!(piemonte.percent_vaccinated(VaccinationMetric::FirstDose), Some(34.88));
    assert_eq!(piemonte.percent_vaccinated(VaccinationMetric::Male), Some(49.05));
    assert_eq!(piemonte.percent_vaccinated(VaccinationMetric::Female), Some(50.91));
    assert_eq!(piemonte.percent_vaccinated(VaccinationMetric::Over80), Some(12.79));
    assert!(!piemonte.has_anomalies());

    let vda = table.find_by_code(2).unwrap();
    assert_eq!(vda.area(), 2_500.0);
    assert_eq!(vda.density(), Some(50.0));
    assert_eq!(vda.percent_vaccinated(VaccinationMetric::Total), Some(40.0));
    assert_eq!(vda.population().get(DemographicSplit::Female), Some(64_000));

    assert_eq!(table.last_update().unwrap().to_string(), "2021-03-03");
}

#[test]
fn building_twice_gives_identical_columns() {
    let a = load();
    let b = load();
    assert_eq!(a.len(), b.len());
    for (x, y) in a.regions().iter().zip(b.regions()) {
        for col in ColumnId::all() {
            assert_eq!(col.value(x), col.value(y), "{col} differs for {}", x.name());
        }
    }
}

#[test]
fn range_filter_over_loaded_table() {
    let table = load();

    let small = table.filter(&RangeFilter::up_to(10_000.0, f64::INFINITY));
    assert_eq!(small.names(), vec!["Valle d'Aosta/Vallée d'Aoste"]);

    let dense = table.filter(&RangeFilter::new(Bounds::UNBOUNDED, Bounds::new(100.0, 200.0)));
    assert_eq!(dense.names(), vec!["Piemonte"]);

    // Bounds are inclusive on both ends.
    let exact = table.filter(&RangeFilter::new(Bounds::new(2_500.0, 2_500.0), Bounds::UNBOUNDED));
    assert_eq!(exact.len(), 1);

    let none = table.filter(&RangeFilter::up_to(100.0, 10.0));
    assert!(none.is_empty());
    assert_eq!(table.len(), 2);
}

#[test]
fn fuzzy_region_lookup() {
    let table = load();
    assert_eq!(table.find_by_name("valle d'aosta").unwrap().code(), 2);
    assert_eq!(table.find_by_name("PIEMONTE").unwrap().code(), 1);
    assert!(table.find_by_name("Sicilia").is_none());
}

#[test]
fn two_region_example() {
    let boundaries = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"reg_istat_code_num":1,"reg_name":"A"},
         "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,1],[0,0]]]}},
        {"type":"Feature","properties":{"reg_istat_code_num":2,"reg_name":"B"},
         "geometry":{"type":"Polygon","coordinates":[[[2,0],[3,0],[3,1],[2,1],[2,0]]]}}
    ]}"#;
    let mut header = vec!["codice_regione_ISTAT", "nome_area"];
    header.extend(VaccinationMetric::ALL.iter().map(|m| m.column()));
    let zeros = vec!["0"; VaccinationMetric::COUNT - 1].join(",");
    let vaccinations = format!("{}\n1,A,100,{zeros}\n2,B,200,{zeros}\n", header.join(","));
    let population = "codice_regione_ISTAT,sesso,totale_abitanti\n1,totale,1000\n2,totale,2000\n";

    let config = PipelineConfig::default();
    let table = RegionTable::from_sources(
        read_boundaries(boundaries.as_bytes(), &config.boundary_fields).unwrap(),
        &aggregate_vaccinations(vaccinations.as_bytes(), &config.vaccination_fields).unwrap(),
        &read_population(population.as_bytes(), &config.population_fields).unwrap(),
    )
    .unwrap();

    let pct: Vec<_> = table
        .regions()
        .iter()
        .map(|r| r.percent_vaccinated(VaccinationMetric::Total))
        .collect();
    assert_eq!(pct, vec![Some(10.0), Some(10.0)]);
    // No male/female population rows, so split percentages are undefined.
    assert_eq!(table.regions()[0].percent_vaccinated(VaccinationMetric::Male), None);
    assert!(table.regions()[0].has_anomalies());
}

#[test]
fn config_file_points_at_local_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vaxmap.toml");
    let toml = format!(
        "[sources]\nboundaries = {:?}\nvaccinations = {:?}\npopulation = {:?}\n\n[fetch]\ntimeout_secs = 5\n",
        fixture("regions.geojson").display().to_string(),
        fixture("vaccinations.csv").display().to_string(),
        fixture("population.csv").display().to_string(),
    );
    std::fs::write(&path, toml).unwrap();

    let config = PipelineConfig::load_from_file(&path).unwrap();
    assert_eq!(config.fetch.timeout_secs, 5);
    assert!(!config.sources.boundaries.is_remote());

    let table = RegionTable::load(&config).unwrap();
    assert_eq!(table.len(), 2);
}

#[test]
fn missing_source_is_fatal() {
    let mut config = fixture_config();
    config.sources.population = Source::from(fixture("does-not-exist.csv"));
    let err = RegionTable::load(&config).unwrap_err();
    assert!(matches!(err, VaxError::Io(_) | VaxError::NotFound(_)), "{err:?}");
}

#[test]
fn population_without_count_column_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("population.csv");
    std::fs::write(&path, "codice_regione_ISTAT,sesso,abitanti\n1,totale,10\n").unwrap();

    let mut config = fixture_config();
    config.sources.population = Source::from(path);
    let err = RegionTable::load(&config).unwrap_err();
    assert!(
        matches!(err, VaxError::MissingColumn { dataset: "population", ref column } if column == "totale_abitanti"),
        "{err:?}"
    );
}

#[cfg(feature = "compact")]
#[test]
fn gzipped_snapshot_is_read_transparently() {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vaccinations.csv.gz");
    let raw = std::fs::read(fixture("vaccinations.csv")).unwrap();
    let mut enc = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
    enc.write_all(&raw).unwrap();
    enc.finish().unwrap();

    let mut config = fixture_config();
    config.sources.vaccinations = Source::from(path);
    let table = RegionTable::load(&config).unwrap();
    assert_eq!(table.get("Piemonte").unwrap().vaccinated(VaccinationMetric::Total), 2_150_000);
}
