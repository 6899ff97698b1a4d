// crates/vaxmap-core/src/model/table.rs
use super::derive::derive;
use super::join::inner_join;
use super::region::Region;
use crate::column::ColumnId;
use crate::common::TableStats;
use crate::error::{Result, VaxError};
use crate::filter::{RangeFilter, TableView};
use crate::loader::{Boundary, PopulationByRegion, VaccinationSummary};
use crate::traits::NameMatch;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{info, warn};

/// The analytical table behind the dashboard.
///
/// One [`Region`] per code present in all three sources, with area, density
/// and percentages already computed. Built once, never mutated afterwards:
/// every query borrows it and returns a fresh [`TableView`].
#[derive(Debug, Clone)]
pub struct RegionTable {
    regions: Vec<Region>,
    by_name: HashMap<String, usize>,
    stats: TableStats,
    last_update: Option<NaiveDate>,
}

impl RegionTable {
    /// Join-then-derive over already parsed sources.
    ///
    /// Fails if two joined regions share a display name.
    pub fn from_sources(
        boundaries: Vec<Boundary>,
        vaccinations: &VaccinationSummary,
        population: &PopulationByRegion,
    ) -> Result<Self> {
        let (joined, stats) = inner_join(boundaries, vaccinations, population);

        let mut regions = Vec::with_capacity(joined.len());
        let mut by_name = HashMap::with_capacity(joined.len());
        for row in joined {
            if by_name.insert(row.name.clone(), regions.len()).is_some() {
                return Err(VaxError::DuplicateRegionName(row.name));
            }
            regions.push(derive(row));
        }

        for r in regions.iter().filter(|r| r.has_anomalies()) {
            for a in r.anomalies() {
                warn!(region = %r.name(), code = r.code(), anomaly = %a, "derived metric anomaly");
            }
        }
        if !stats.excluded_codes.is_empty() {
            info!(codes = ?stats.excluded_codes, "region codes not present in every source were left out");
        }

        Ok(Self {
            regions,
            by_name,
            stats,
            last_update: vaccinations.last_update,
        })
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn stats(&self) -> &TableStats {
        &self.stats
    }

    /// Latest administration date in the vaccination source.
    pub fn last_update(&self) -> Option<NaiveDate> {
        self.last_update
    }

    /// Exact lookup by display name (the table's index).
    pub fn get(&self, name: &str) -> Option<&Region> {
        self.by_name.get(name).map(|&i| &self.regions[i])
    }

    pub fn find_by_code(&self, code: u32) -> Option<&Region> {
        self.regions.iter().find(|r| r.code() == code)
    }

    /// Exact name first, then accent/case-insensitive equality, then the
    /// first folded substring match.
    pub fn find_by_name(&self, query: &str) -> Option<&Region> {
        self.get(query)
            .or_else(|| self.regions.iter().find(|r| r.is_named(query)))
            .or_else(|| self.regions.iter().find(|r| r.name_contains(query)))
    }

    /// Every row, in table order.
    pub fn view(&self) -> TableView<'_> {
        TableView::new(self.regions.iter().collect())
    }

    /// Rows inside both inclusive ranges. Pure: the table is untouched.
    pub fn filter(&self, filter: &RangeFilter) -> TableView<'_> {
        TableView::new(self.regions.iter().filter(|r| filter.matches(r)).collect())
    }

    /// Checks that each selector has at least one defined value, so an
    /// unusable color key is reported at startup instead of as an empty map.
    pub fn validate_columns(&self, columns: &[ColumnId]) -> Result<()> {
        if self.regions.is_empty() {
            return Ok(());
        }
        for col in columns {
            if !self.regions.iter().any(|r| col.value(r).is_some()) {
                return Err(VaxError::EmptyColumn(col.to_string()));
            }
        }
        Ok(())
    }
}
