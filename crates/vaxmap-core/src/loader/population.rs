// crates/vaxmap-core/src/loader/population.rs
use super::{column_index, line_of, parse_code, parse_count};
use crate::config::PopulationFields;
use crate::error::{Result, VaxError};
use crate::metric::{DemographicSplit, PopulationCounts};
use csv::{ReaderBuilder, Trim};
use std::collections::BTreeMap;
use std::io::Read;
use tracing::debug;

const DATASET: &str = "population";

pub type PopulationByRegion = BTreeMap<u32, PopulationCounts>;

/// Reshapes `(code, split, count)` rows into one [`PopulationCounts`] per code.
///
/// Each split is picked out independently, so a region may carry a total and
/// optionally a male and a female count. Unrecognized split labels are skipped.
pub fn read_population<R: Read>(reader: R, fields: &PopulationFields) -> Result<PopulationByRegion> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let code_idx = column_index(&headers, DATASET, &fields.code)?;
    let split_idx = column_index(&headers, DATASET, &fields.split)?;
    let count_idx = column_index(&headers, DATASET, &fields.count)?;

    let mut out = PopulationByRegion::new();

    for result in rdr.records() {
        let record = result?;
        let line = line_of(&record);

        let label = record.get(split_idx).unwrap_or("");
        let Some(split) = DemographicSplit::from_source_label(label) else {
            debug!(line, label, "unrecognized population split, skipping");
            continue;
        };

        let raw_code = record.get(code_idx).unwrap_or("");
        if raw_code.is_empty() {
            debug!(line, "population row without region code, skipping");
            continue;
        }
        let code = parse_code(raw_code).ok_or_else(|| {
            VaxError::InvalidData(format!(
                "line {line}: region code '{raw_code}' is not a non-negative integer"
            ))
        })?;

        let raw_count = record.get(count_idx).unwrap_or("");
        let count = parse_count(raw_count).ok_or_else(|| {
            VaxError::InvalidData(format!(
                "line {line}: population '{raw_count}' is not a count"
            ))
        })?;

        let slot = out.entry(code).or_default().slot_mut(split);
        if slot.is_some() {
            return Err(VaxError::InvalidData(format!(
                "line {line}: region {code} has more than one '{split}' population row"
            )));
        }
        *slot = Some(count);
    }

    debug!(regions = out.len(), "population rows read");
    Ok(out)
}
