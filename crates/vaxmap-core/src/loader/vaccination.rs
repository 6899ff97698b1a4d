// crates/vaxmap-core/src/loader/vaccination.rs
use super::{column_index, line_of, parse_code, parse_count};
use crate::config::VaccinationFields;
use crate::error::{Result, VaxError};
use crate::metric::{VaccinationMetric, VaccinationTotals};
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use std::collections::BTreeMap;
use std::io::Read;
use tracing::{debug, warn};

const DATASET: &str = "vaccination";

/// Summed administrations for a single region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionVaccinations {
    /// Name carried by the first row seen for this code.
    pub name: String,
    pub totals: VaccinationTotals,
}

/// Output of the aggregator: one entry per distinct region code.
#[derive(Debug, Clone, Default)]
pub struct VaccinationSummary {
    pub regions: BTreeMap<u32, RegionVaccinations>,
    /// Latest administration date in the whole source, for display only.
    pub last_update: Option<NaiveDate>,
    pub rows: usize,
}

/// Groups administration rows by region code and sums every metric column.
pub fn aggregate_vaccinations<R: Read>(
    reader: R,
    fields: &VaccinationFields,
) -> Result<VaccinationSummary> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let code_idx = column_index(&headers, DATASET, &fields.code)?;
    let name_idx = column_index(&headers, DATASET, &fields.name)?;
    let date_idx = headers.iter().position(|h| h == fields.date);
    if date_idx.is_none() {
        warn!(column = %fields.date, "vaccination source has no date column; last update unknown");
    }

    let metric_idx = VaccinationMetric::ALL
        .iter()
        .map(|m| column_index(&headers, DATASET, m.column()).map(|i| (*m, i)))
        .collect::<Result<Vec<_>>>()?;

    let mut summary = VaccinationSummary::default();

    for result in rdr.records() {
        let record = result?;
        summary.rows += 1;

        // Every row counts towards the last update, with or without a code.
        if let Some(raw_date) = date_idx.and_then(|i| record.get(i)) {
            match parse_date(raw_date) {
                Some(date) => {
                    summary.last_update = summary.last_update.max(Some(date));
                }
                None => debug!(line = line_of(&record), raw_date, "unparsable administration date"),
            }
        }

        let raw_code = record.get(code_idx).unwrap_or("");
        if raw_code.is_empty() {
            debug!(line = line_of(&record), "vaccination row without region code, skipping");
            continue;
        }
        let code = parse_code(raw_code).ok_or_else(|| {
            VaxError::InvalidData(format!(
                "line {}: region code '{}' is not a non-negative integer",
                line_of(&record),
                raw_code
            ))
        })?;
        let name = record.get(name_idx).unwrap_or("");

        let entry = summary
            .regions
            .entry(code)
            .or_insert_with(|| RegionVaccinations {
                name: name.to_string(),
                totals: VaccinationTotals::default(),
            });
        if entry.name != name {
            warn!(code, first = %entry.name, other = %name, "region code carries more than one name");
        }

        for &(metric, idx) in &metric_idx {
            let raw = record.get(idx).unwrap_or("");
            let value = parse_count(raw).ok_or_else(|| {
                VaxError::InvalidData(format!(
                    "line {}: column '{}' has non-count value '{}'",
                    line_of(&record),
                    metric.column(),
                    raw
                ))
            })?;
            entry.totals.checked_add(metric, value).ok_or_else(|| {
                VaxError::InvalidData(format!(
                    "line {}: sum of '{}' for region {} overflows",
                    line_of(&record),
                    metric.column(),
                    code
                ))
            })?;
        }
    }

    debug!(
        rows = summary.rows,
        regions = summary.regions.len(),
        "vaccination rows aggregated"
    );
    Ok(summary)
}

/// Accepts `2021-03-14` and the `2021-03-14T00:00:00` form some exports use.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
