// crates/vaxmap-core/src/model/derive.rs
use super::join::JoinedRegion;
use super::region::{Anomaly, PercentVaccinated, Region};
use crate::metric::VaccinationMetric;
use geo::Area;

/// Converts the planar area of lon/lat geometry (square degrees) into the
/// dashboard's area unit. Every density and area filter depends on it.
pub const AREA_SCALE: f64 = 10_000.0;

/// Decimals kept for area and density.
pub const AREA_DECIMALS: i32 = 0;

/// Decimals kept for percentages.
pub const PERCENT_DECIMALS: i32 = 2;

/// Rounds half away from zero to `decimals` places.
///
/// Ties differ from pandas' `round`, which goes to the even neighbour: a
/// density of exactly 2.5 becomes 3 here and 2 there.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `round(100 * count / population, 2)`, undefined for a zero or absent
/// population.
pub fn percent(count: u64, population: Option<u64>) -> Option<f64> {
    match population {
        Some(p) if p > 0 => Some(round_to(100.0 * count as f64 / p as f64, PERCENT_DECIMALS)),
        _ => None,
    }
}

/// `round(population / area)`, undefined for a zero area.
pub fn density(population: u64, area: f64) -> Option<f64> {
    if area > 0.0 {
        Some(round_to(population as f64 / area, AREA_DECIMALS))
    } else {
        None
    }
}

pub fn scaled_area(region: &JoinedRegion) -> f64 {
    round_to(region.geometry.unsigned_area() * AREA_SCALE, AREA_DECIMALS)
}

/// Attaches area, density and every percentage to a joined region.
pub fn derive(joined: JoinedRegion) -> Region {
    let mut anomalies = Vec::new();

    let area = scaled_area(&joined);
    let total = joined.population.total.unwrap_or(0);
    let density = density(total, area);
    if density.is_none() {
        anomalies.push(Anomaly::ZeroArea);
    }

    let mut pct = PercentVaccinated::default();
    for metric in VaccinationMetric::ALL {
        let value = percent(
            joined.vaccinations.get(metric),
            joined.population.get(metric.population_split()),
        );
        match value {
            None => anomalies.push(Anomaly::UndefinedPercentage(metric)),
            Some(v) if v > 100.0 => anomalies.push(Anomaly::PercentageAbove100(metric)),
            Some(_) => {}
        }
        pct.set(metric, value);
    }

    Region {
        code: joined.code,
        name: joined.name,
        geometry: joined.geometry,
        vaccinations: joined.vaccinations,
        population: joined.population,
        area,
        density,
        percent: pct,
        anomalies,
    }
}
