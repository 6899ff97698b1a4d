// crates/vaxmap-core/src/config.rs
use crate::error::Result;
use crate::loader::Source;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const BOUNDARIES_URL: &str = "https://raw.githubusercontent.com/openpolis/geojson-italy/master/geojson/limits_IT_regions.geojson";
pub const VACCINATIONS_URL: &str = "https://raw.githubusercontent.com/italia/covid19-opendata-vaccini/master/dati/somministrazioni-vaccini-summary-latest.csv";
pub const POPULATION_FILE: &str = "italian_population.csv";

/// Everything the startup build needs to know. Every field has a default, so
/// an empty TOML document is a valid configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PipelineConfig {
    pub sources: SourcesConfig,
    pub boundary_fields: BoundaryFields,
    pub vaccination_fields: VaccinationFields,
    pub population_fields: PopulationFields,
    pub fetch: FetchConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SourcesConfig {
    pub boundaries: Source,
    pub vaccinations: Source,
    pub population: Source,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            boundaries: Source::from(BOUNDARIES_URL),
            vaccinations: Source::from(VACCINATIONS_URL),
            population: Source::from(POPULATION_FILE),
        }
    }
}

/// Property names read from each boundary feature.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BoundaryFields {
    pub code: String,
    pub name: String,
}

impl Default for BoundaryFields {
    fn default() -> Self {
        Self {
            code: "reg_istat_code_num".into(),
            name: "reg_name".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct VaccinationFields {
    pub code: String,
    pub name: String,
    pub date: String,
}

impl Default for VaccinationFields {
    fn default() -> Self {
        Self {
            code: "codice_regione_ISTAT".into(),
            name: "nome_area".into(),
            date: "data_somministrazione".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PopulationFields {
    pub code: String,
    pub split: String,
    pub count: String,
}

impl Default for PopulationFields {
    fn default() -> Self {
        Self {
            code: "codice_regione_ISTAT".into(),
            split: "sesso".into(),
            count: "totale_abitanti".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FetchConfig {
    /// Upper bound for each URL download; the build fails when exceeded.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl PipelineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
