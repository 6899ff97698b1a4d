// crates/vaxmap-core/src/model/join.rs
use crate::common::TableStats;
use crate::loader::{Boundary, PopulationByRegion, VaccinationSummary};
use crate::metric::{PopulationCounts, VaccinationTotals};
use geo::MultiPolygon;
use std::collections::BTreeSet;
use tracing::debug;

/// A region present in all three sources, before any derived column exists.
#[derive(Debug, Clone)]
pub struct JoinedRegion {
    pub code: u32,
    pub name: String,
    pub geometry: MultiPolygon<f64>,
    pub vaccinations: VaccinationTotals,
    pub population: PopulationCounts,
}

/// **Inner Join:** Boundaries ⋈ Vaccinations ⋈ Population on region code.
///
/// Keeps boundary order. A code missing from any source, or whose population
/// has no total, is left out and recorded in the returned stats.
pub fn inner_join(
    boundaries: Vec<Boundary>,
    vaccinations: &VaccinationSummary,
    population: &PopulationByRegion,
) -> (Vec<JoinedRegion>, TableStats) {
    let mut stats = TableStats {
        boundary_regions: boundaries.len(),
        vaccination_regions: vaccinations.regions.len(),
        vaccination_rows: vaccinations.rows,
        population_regions: population.len(),
        ..TableStats::default()
    };

    let mut all_codes: BTreeSet<u32> = boundaries.iter().map(|b| b.code).collect();
    all_codes.extend(vaccinations.regions.keys().copied());
    all_codes.extend(population.keys().copied());

    let mut joined = Vec::with_capacity(boundaries.len());
    for b in boundaries {
        let vax = vaccinations.regions.get(&b.code);
        let pop = population.get(&b.code).filter(|p| p.total.is_some());

        if let (Some(vax), Some(pop)) = (vax, pop) {
            all_codes.remove(&b.code);
            joined.push(JoinedRegion {
                code: b.code,
                name: b.name,
                geometry: b.geometry,
                vaccinations: vax.totals,
                population: *pop,
            });
        }
    }

    stats.joined = joined.len();
    stats.excluded_codes = all_codes.into_iter().collect();
    debug!(
        joined = stats.joined,
        excluded = ?stats.excluded_codes,
        "sources joined"
    );
    (joined, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::RegionVaccinations;
    use crate::metric::VaccinationMetric;
    use geo::{polygon, MultiPolygon};

    fn boundary(code: u32, name: &str) -> Boundary {
        let p = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 0.0)];
        Boundary {
            code,
            name: name.into(),
            geometry: MultiPolygon::new(vec![p]),
        }
    }

    fn vaccinations(codes: &[u32]) -> VaccinationSummary {
        let mut s = VaccinationSummary::default();
        for &c in codes {
            let mut totals = VaccinationTotals::default();
            totals.checked_add(VaccinationMetric::Total, c as u64 * 10);
            s.regions.insert(
                c,
                RegionVaccinations {
                    name: format!("r{c}"),
                    totals,
                },
            );
        }
        s
    }

    fn population(codes: &[u32]) -> PopulationByRegion {
        codes
            .iter()
            .map(|&c| {
                (
                    c,
                    PopulationCounts {
                        total: Some(1000),
                        ..Default::default()
                    },
                )
            })
            .collect()
    }

    #[test]
    fn keeps_only_codes_present_everywhere() {
        let (rows, stats) = inner_join(
            vec![boundary(1, "A"), boundary(2, "B"), boundary(3, "C")],
            &vaccinations(&[1, 2, 4]),
            &population(&[1, 3, 4]),
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code, 1);
        assert_eq!(rows[0].vaccinations[VaccinationMetric::Total], 10);
        assert_eq!(stats.joined, 1);
        assert_eq!(stats.excluded_codes, vec![2, 3, 4]);
    }

    #[test]
    fn population_without_total_does_not_join() {
        let mut pop = population(&[1]);
        pop.insert(
            2,
            PopulationCounts {
                male: Some(5),
                ..Default::default()
            },
        );
        let (rows, _) = inner_join(
            vec![boundary(1, "A"), boundary(2, "B")],
            &vaccinations(&[1, 2]),
            &pop,
        );
        assert_eq!(rows.iter().map(|r| r.code).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn boundary_order_is_preserved() {
        let (rows, _) = inner_join(
            vec![boundary(9, "Z"), boundary(1, "A"), boundary(5, "M")],
            &vaccinations(&[1, 5, 9]),
            &population(&[1, 5, 9]),
        );
        let codes: Vec<_> = rows.iter().map(|r| r.code).collect();
        assert_eq!(codes, vec![9, 1, 5]);
    }
}
