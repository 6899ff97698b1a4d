// crates/vaxmap-core/src/column.rs

//! Closed set of table columns a map layer can be colored by.
//!
//! Column names follow the source datasets (`totale`, `densita`,
//! `perc_vac`, ...), so a selector read from a URL, a config file or the
//! command line parses into a [`ColumnId`] once, up front, and every later
//! lookup is a plain `match`.

use crate::error::VaxError;
use crate::metric::{DemographicSplit, VaccinationMetric};
use crate::model::Region;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const PERCENT_PREFIX: &str = "perc_vac";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnId {
    /// Raw summed counter.
    Vaccinated(VaccinationMetric),
    /// Counter as a share of its population split.
    Percent(VaccinationMetric),
    Population(DemographicSplit),
    Area,
    Density,
}

impl ColumnId {
    pub const AREA: &'static str = "area";
    pub const DENSITY: &'static str = "densita";

    /// Every selectable column, in display order.
    pub fn all() -> Vec<ColumnId> {
        let mut out: Vec<ColumnId> = VaccinationMetric::ALL
            .into_iter()
            .map(ColumnId::Vaccinated)
            .collect();
        out.extend(VaccinationMetric::ALL.into_iter().map(ColumnId::Percent));
        out.extend(DemographicSplit::ALL.into_iter().map(ColumnId::Population));
        out.push(ColumnId::Area);
        out.push(ColumnId::Density);
        out
    }

    /// Human label used as legend and hover title.
    pub fn label(&self) -> String {
        match self {
            ColumnId::Vaccinated(m) => m.label().to_string(),
            ColumnId::Percent(VaccinationMetric::Total) => "Percentuale vaccinati".to_string(),
            ColumnId::Percent(m) => format!("Percentuale vaccinati ({})", m.label()),
            ColumnId::Population(DemographicSplit::Total) => "Abitanti".to_string(),
            ColumnId::Population(DemographicSplit::Male) => "Abitanti maschi".to_string(),
            ColumnId::Population(DemographicSplit::Female) => "Abitanti femmine".to_string(),
            ColumnId::Area => "Area".to_string(),
            ColumnId::Density => "Densità".to_string(),
        }
    }

    /// The column's value on one row; `None` where it is undefined.
    pub fn value(&self, region: &Region) -> Option<f64> {
        match *self {
            ColumnId::Vaccinated(m) => Some(region.vaccinated(m) as f64),
            ColumnId::Percent(m) => region.percent_vaccinated(m),
            ColumnId::Population(s) => region.population().get(s).map(|v| v as f64),
            ColumnId::Area => Some(region.area()),
            ColumnId::Density => region.density(),
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnId::Vaccinated(m) => f.write_str(m.column()),
            ColumnId::Percent(VaccinationMetric::Total) => f.write_str(PERCENT_PREFIX),
            ColumnId::Percent(m) => write!(f, "{PERCENT_PREFIX}_{}", m.column()),
            ColumnId::Population(s) => f.write_str(s.column()),
            ColumnId::Area => f.write_str(Self::AREA),
            ColumnId::Density => f.write_str(Self::DENSITY),
        }
    }
}

impl FromStr for ColumnId {
    type Err = VaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == Self::AREA {
            return Ok(ColumnId::Area);
        }
        if s == Self::DENSITY {
            return Ok(ColumnId::Density);
        }
        if s == PERCENT_PREFIX {
            return Ok(ColumnId::Percent(VaccinationMetric::Total));
        }
        if let Some(metric) = s
            .strip_prefix(PERCENT_PREFIX)
            .and_then(|rest| rest.strip_prefix('_'))
            .and_then(VaccinationMetric::from_column)
        {
            return Ok(ColumnId::Percent(metric));
        }
        if let Some(metric) = VaccinationMetric::from_column(s) {
            return Ok(ColumnId::Vaccinated(metric));
        }
        if let Some(split) = DemographicSplit::ALL.into_iter().find(|d| d.column() == s) {
            return Ok(ColumnId::Population(split));
        }
        Err(VaxError::UnknownColumn(s.to_string()))
    }
}

impl Serialize for ColumnId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
