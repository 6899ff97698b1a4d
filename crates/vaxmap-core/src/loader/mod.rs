// crates/vaxmap-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the Physical Layer (files, URLs, decompression) and delegates to
//! the three source parsers (boundaries, vaccinations, population). The
//! build entry point, [`crate::RegionTable::load`], lives in `builder.rs`.

use crate::error::{Result, VaxError};
use csv::StringRecord;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

pub mod boundary;
mod builder;
mod common_io;
pub mod population;
pub mod vaccination;

pub use boundary::{read_boundaries, Boundary};
pub use population::{read_population, PopulationByRegion};
pub use vaccination::{aggregate_vaccinations, RegionVaccinations, VaccinationSummary};

/// Where a snapshot comes from: a local file or an `http(s)://` URL.
///
/// Deserializes from a plain string, so a TOML config can say
/// `population = "data/italian_population.csv"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    pub fn is_remote(&self) -> bool {
        matches!(self, Source::Url(_))
    }

    /// True when the snapshot name ends in `.gz`. For URLs the query and
    /// fragment are ignored.
    pub fn is_gzipped(&self) -> bool {
        match self {
            Source::Path(p) => p.extension().is_some_and(|e| e.eq_ignore_ascii_case("gz")),
            Source::Url(u) => {
                let path = u.split(['?', '#']).next().unwrap_or(u);
                path.to_ascii_lowercase().ends_with(".gz")
            }
        }
    }
}

impl From<&str> for Source {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(trimmed.to_string())
        } else {
            Source::Path(PathBuf::from(trimmed))
        }
    }
}

impl From<String> for Source {
    fn from(s: String) -> Self {
        Source::from(s.as_str())
    }
}

impl From<PathBuf> for Source {
    fn from(p: PathBuf) -> Self {
        Source::Path(p)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(p) => write!(f, "{}", p.display()),
            Source::Url(u) => f.write_str(u),
        }
    }
}

// -----------------------------------------------------------------------
// SHARED CSV HELPERS
// -----------------------------------------------------------------------

pub(crate) fn column_index(
    headers: &StringRecord,
    dataset: &'static str,
    column: &str,
) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| VaxError::MissingColumn {
            dataset,
            column: column.to_string(),
        })
}

/// Coerces a region code cell: `"12"`, `" 12 "` and `"12.0"` all give `12`.
pub(crate) fn parse_code(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(code) = raw.parse::<u32>() {
        return Some(code);
    }
    let f = raw.parse::<f64>().ok()?;
    if f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64 {
        Some(f as u32)
    } else {
        None
    }
}

/// Parses a non-negative count; empty cells count as zero.
pub(crate) fn parse_count(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    if let Ok(v) = raw.parse::<u64>() {
        return Some(v);
    }
    let f = raw.parse::<f64>().ok()?;
    if f.fract() == 0.0 && f >= 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

pub(crate) fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_from_string_detects_urls() {
        assert!(Source::from("https://example.org/a.csv").is_remote());
        assert!(Source::from("HTTP://example.org/a.csv").is_remote());
        assert_eq!(Source::from(" data/a.csv "), Source::Path("data/a.csv".into()));
    }

    #[test]
    fn gzip_detection_uses_the_extension() {
        assert!(Source::from("data/a.csv.gz").is_gzipped());
        assert!(Source::from("https://x.org/a.GZ").is_gzipped());
        assert!(!Source::from("data/a.csv").is_gzipped());
    }

    #[test]
    fn gzip_detection_ignores_url_query() {
        assert!(Source::from("https://x.org/a.csv.gz?raw=true").is_gzipped());
        assert!(Source::from("https://x.org/a.csv.gz#top").is_gzipped());
        assert!(!Source::from("https://x.org/a.csv?name=b.gz").is_gzipped());
    }

    #[test]
    fn codes_accept_integral_floats() {
        assert_eq!(parse_code("7"), Some(7));
        assert_eq!(parse_code(" 7.0 "), Some(7));
        assert_eq!(parse_code("7.5"), None);
        assert_eq!(parse_code("-1"), None);
        assert_eq!(parse_code("abc"), None);
    }

    #[test]
    fn empty_counts_are_zero() {
        assert_eq!(parse_count(""), Some(0));
        assert_eq!(parse_count(" 42 "), Some(42));
        assert_eq!(parse_count("3.0"), Some(3));
        assert_eq!(parse_count("n/a"), None);
    }

    #[test]
    fn missing_column_names_the_dataset() {
        let headers = StringRecord::from(vec!["a", "b"]);
        assert_eq!(column_index(&headers, "population", "b").unwrap(), 1);
        match column_index(&headers, "population", "c") {
            Err(VaxError::MissingColumn { dataset, column }) => {
                assert_eq!(dataset, "population");
                assert_eq!(column, "c");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
