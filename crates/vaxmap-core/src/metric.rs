// crates/vaxmap-core/src/metric.rs

//! The closed set of vaccination counters and population splits.
//!
//! Every counter knows its CSV column, its display label and the population
//! split it is measured against, so no code path ever has to look a metric up
//! by an arbitrary string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// A population sub-count used as the denominator of a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemographicSplit {
    Total,
    Male,
    Female,
}

impl DemographicSplit {
    pub const ALL: [DemographicSplit; 3] = [Self::Total, Self::Male, Self::Female];

    /// Label used by the population source (`sesso` column).
    pub fn source_label(self) -> &'static str {
        match self {
            Self::Total => "totale",
            Self::Male => "maschi",
            Self::Female => "femmine",
        }
    }

    /// Recognizes a population label, ignoring case and surrounding blanks.
    pub fn from_source_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.source_label().eq_ignore_ascii_case(label))
    }

    /// Table column holding this split's population.
    pub fn column(self) -> &'static str {
        match self {
            Self::Total => "totale_abitanti",
            Self::Male => "abitanti_maschi",
            Self::Female => "abitanti_femmine",
        }
    }
}

impl fmt::Display for DemographicSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_label())
    }
}

/// One of the summed counters of the vaccination source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VaccinationMetric {
    Total,
    FirstDose,
    SecondDose,
    Male,
    Female,
    HealthWorkers,
    NonHealthStaff,
    CareHomeGuests,
    SchoolStaff,
    Age60To69,
    Age70To79,
    Over80,
    Vulnerable,
    ArmedForces,
    Other,
}

impl VaccinationMetric {
    pub const COUNT: usize = 15;

    /// Source column order; also the order of the dashboard dropdown.
    pub const ALL: [VaccinationMetric; Self::COUNT] = [
        Self::Total,
        Self::FirstDose,
        Self::SecondDose,
        Self::Male,
        Self::Female,
        Self::HealthWorkers,
        Self::NonHealthStaff,
        Self::CareHomeGuests,
        Self::SchoolStaff,
        Self::Age60To69,
        Self::Age70To79,
        Self::Over80,
        Self::Vulnerable,
        Self::ArmedForces,
        Self::Other,
    ];

    /// Column name in the vaccination CSV (and in the derived table).
    pub fn column(self) -> &'static str {
        match self {
            Self::Total => "totale",
            Self::FirstDose => "prima_dose",
            Self::SecondDose => "seconda_dose",
            Self::Male => "sesso_maschile",
            Self::Female => "sesso_femminile",
            Self::HealthWorkers => "categoria_operatori_sanitari_sociosanitari",
            Self::NonHealthStaff => "categoria_personale_non_sanitario",
            Self::CareHomeGuests => "categoria_ospiti_rsa",
            Self::SchoolStaff => "categoria_personale_scolastico",
            Self::Age60To69 => "categoria_60_69",
            Self::Age70To79 => "categoria_70_79",
            Self::Over80 => "categoria_over80",
            Self::Vulnerable => "categoria_soggetti_fragili",
            Self::ArmedForces => "categoria_forze_armate",
            Self::Other => "categoria_altro",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Total => "Totale",
            Self::FirstDose => "Prima Dose",
            Self::SecondDose => "Seconda Dose",
            Self::Male => "Sesso Maschile",
            Self::Female => "Sesso Femminile",
            Self::HealthWorkers => "Categoria Operatori Sanitari",
            Self::NonHealthStaff => "Categoria Personale non Sanitario",
            Self::CareHomeGuests => "Categoria Ospiti RSA",
            Self::SchoolStaff => "Categoria Personale Scolastico",
            Self::Age60To69 => "Categoria 60/69",
            Self::Age70To79 => "Categoria 70/79",
            Self::Over80 => "Categoria Over 80",
            Self::Vulnerable => "Categoria Soggetti Fragili",
            Self::ArmedForces => "Categoria Forze Armate",
            Self::Other => "Categoria Altro",
        }
    }

    /// Population split this counter is a share of.
    pub fn population_split(self) -> DemographicSplit {
        match self {
            Self::Male => DemographicSplit::Male,
            Self::Female => DemographicSplit::Female,
            _ => DemographicSplit::Total,
        }
    }

    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.column() == column)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for VaccinationMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Summed counters for one region, indexed by [`VaccinationMetric`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccinationTotals([u64; VaccinationMetric::COUNT]);

impl VaccinationTotals {
    pub fn get(&self, metric: VaccinationMetric) -> u64 {
        self.0[metric.index()]
    }

    /// Adds `value` to `metric` and returns the new sum, or `None` (leaving
    /// the counter unchanged) when it would overflow.
    pub fn checked_add(&mut self, metric: VaccinationMetric, value: u64) -> Option<u64> {
        let slot = &mut self.0[metric.index()];
        *slot = slot.checked_add(value)?;
        Some(*slot)
    }

    /// `(metric, count)` pairs in source column order.
    pub fn iter(&self) -> impl Iterator<Item = (VaccinationMetric, u64)> + '_ {
        VaccinationMetric::ALL.into_iter().map(|m| (m, self.get(m)))
    }
}

impl Index<VaccinationMetric> for VaccinationTotals {
    type Output = u64;

    fn index(&self, metric: VaccinationMetric) -> &u64 {
        &self.0[metric.index()]
    }
}

impl IndexMut<VaccinationMetric> for VaccinationTotals {
    fn index_mut(&mut self, metric: VaccinationMetric) -> &mut u64 {
        &mut self.0[metric.index()]
    }
}

/// Population counts for one region. `total` is required by the join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub total: Option<u64>,
    pub male: Option<u64>,
    pub female: Option<u64>,
}

impl PopulationCounts {
    pub fn get(&self, split: DemographicSplit) -> Option<u64> {
        match split {
            DemographicSplit::Total => self.total,
            DemographicSplit::Male => self.male,
            DemographicSplit::Female => self.female,
        }
    }

    pub(crate) fn slot_mut(&mut self, split: DemographicSplit) -> &mut Option<u64> {
        match split {
            DemographicSplit::Total => &mut self.total,
            DemographicSplit::Male => &mut self.male,
            DemographicSplit::Female => &mut self.female,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_order_matches_discriminants() {
        for (i, m) in VaccinationMetric::ALL.iter().enumerate() {
            assert_eq!(m.index(), i, "{m:?} out of place");
        }
    }

    #[test]
    fn sex_metrics_use_their_own_split() {
        assert_eq!(VaccinationMetric::Male.population_split(), DemographicSplit::Male);
        assert_eq!(VaccinationMetric::Female.population_split(), DemographicSplit::Female);
        assert_eq!(VaccinationMetric::Over80.population_split(), DemographicSplit::Total);
    }

    #[test]
    fn split_labels_are_case_insensitive() {
        assert_eq!(DemographicSplit::from_source_label(" Totale "), Some(DemographicSplit::Total));
        assert_eq!(DemographicSplit::from_source_label("FEMMINE"), Some(DemographicSplit::Female));
        assert_eq!(DemographicSplit::from_source_label("altro"), None);
    }

    #[test]
    fn totals_accumulate_per_metric() {
        let mut t = VaccinationTotals::default();
        assert_eq!(t.checked_add(VaccinationMetric::FirstDose, 4), Some(4));
        t[VaccinationMetric::FirstDose] += 1;
        assert_eq!(t.get(VaccinationMetric::FirstDose), 5);
        assert_eq!(t[VaccinationMetric::Total], 0);
    }

    #[test]
    fn overflowing_add_leaves_the_counter_alone() {
        let mut t = VaccinationTotals::default();
        t.checked_add(VaccinationMetric::Total, u64::MAX - 1);
        assert_eq!(t.checked_add(VaccinationMetric::Total, 2), None);
        assert_eq!(t[VaccinationMetric::Total], u64::MAX - 1);
        assert_eq!(t.checked_add(VaccinationMetric::Total, 1), Some(u64::MAX));
    }

    #[test]
    fn column_lookup_round_trips() {
        assert_eq!(
            VaccinationMetric::from_column("categoria_over80"),
            Some(VaccinationMetric::Over80)
        );
        assert_eq!(VaccinationMetric::from_column("nope"), None);
    }
}
