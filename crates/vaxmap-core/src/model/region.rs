// crates/vaxmap-core/src/model/region.rs
use crate::metric::{DemographicSplit, PopulationCounts, VaccinationMetric, VaccinationTotals};
use crate::traits::NameMatch;
use geo::MultiPolygon;
use serde::Serialize;
use std::fmt;

/// Share of each population split that received a given counter, in percent.
///
/// `None` means undefined: the matching population is absent or zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PercentVaccinated([Option<f64>; VaccinationMetric::COUNT]);

impl PercentVaccinated {
    pub fn get(&self, metric: VaccinationMetric) -> Option<f64> {
        self.0[metric as usize]
    }

    pub(crate) fn set(&mut self, metric: VaccinationMetric, value: Option<f64>) {
        self.0[metric as usize] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (VaccinationMetric, Option<f64>)> + '_ {
        VaccinationMetric::ALL.into_iter().map(|m| (m, self.get(m)))
    }
}

/// A derived value that looks wrong but is kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "metric", rename_all = "snake_case")]
pub enum Anomaly {
    /// Geometry rounds to zero area, so density is undefined.
    ZeroArea,
    /// The population split used as denominator is absent or zero.
    UndefinedPercentage(VaccinationMetric),
    /// More administrations than inhabitants in the matching split.
    PercentageAbove100(VaccinationMetric),
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::ZeroArea => f.write_str("area rounds to zero"),
            Anomaly::UndefinedPercentage(m) => {
                write!(f, "no {} population for {}", m.population_split(), m)
            }
            Anomaly::PercentageAbove100(m) => write!(f, "{m} exceeds 100%"),
        }
    }
}

/// One row of the finished table: a region present in all three sources,
/// with its derived columns.
#[derive(Debug, Clone)]
pub struct Region {
    pub(crate) code: u32,
    pub(crate) name: String,
    pub(crate) geometry: MultiPolygon<f64>,
    pub(crate) vaccinations: VaccinationTotals,
    pub(crate) population: PopulationCounts,
    pub(crate) area: f64,
    pub(crate) density: Option<f64>,
    pub(crate) percent: PercentVaccinated,
    pub(crate) anomalies: Vec<Anomaly>,
}

impl Region {
    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    pub fn vaccinations(&self) -> &VaccinationTotals {
        &self.vaccinations
    }

    pub fn vaccinated(&self, metric: VaccinationMetric) -> u64 {
        self.vaccinations.get(metric)
    }

    pub fn population(&self) -> &PopulationCounts {
        &self.population
    }

    /// Total population; always present on a joined row.
    pub fn total_population(&self) -> u64 {
        self.population.get(DemographicSplit::Total).unwrap_or(0)
    }

    /// Area in the table's unit (see [`crate::model::derive::AREA_SCALE`]).
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Inhabitants per area unit; `None` when the area is zero.
    pub fn density(&self) -> Option<f64> {
        self.density
    }

    pub fn percent_vaccinated(&self, metric: VaccinationMetric) -> Option<f64> {
        self.percent.get(metric)
    }

    pub fn percentages(&self) -> &PercentVaccinated {
        &self.percent
    }

    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }
}

impl NameMatch for Region {
    fn name_str(&self) -> &str {
        &self.name
    }
}
