// crates/vaxmap-core/src/filter.rs
use crate::column::ColumnId;
use crate::model::Region;
use serde::{Deserialize, Serialize};

/// Inclusive numeric range. Infinite ends mean "no bound".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const UNBOUNDED: Bounds = Bounds {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Everything up to and including `max`, as the dashboard sliders do.
    pub fn up_to(max: f64) -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min == f64::NEG_INFINITY && self.max == f64::INFINITY
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// An undefined value only passes a range that bounds nothing.
    pub fn admits(&self, value: Option<f64>) -> bool {
        match value {
            Some(v) => self.contains(v),
            None => self.is_unbounded(),
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Area × density window applied to the table before rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeFilter {
    pub area: Bounds,
    pub density: Bounds,
}

impl RangeFilter {
    pub fn new(area: Bounds, density: Bounds) -> Self {
        Self { area, density }
    }

    /// Keeps every row.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn up_to(max_area: f64, max_density: f64) -> Self {
        Self {
            area: Bounds::up_to(max_area),
            density: Bounds::up_to(max_density),
        }
    }

    pub fn matches(&self, region: &Region) -> bool {
        self.area.contains(region.area()) && self.density.admits(region.density())
    }
}

/// A filtered, read-only selection of table rows, in table order.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    rows: Vec<&'a Region>,
}

impl<'a> TableView<'a> {
    pub(crate) fn new(rows: Vec<&'a Region>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[&'a Region] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Region> + '_ {
        self.rows.iter().copied()
    }

    pub fn names(&self) -> Vec<&'a str> {
        self.rows.iter().map(|r| r.name()).collect()
    }

    /// Smallest and largest defined value of `column` over the view.
    pub fn column_range(&self, column: ColumnId) -> Option<(f64, f64)> {
        self.iter()
            .filter_map(|r| column.value(r))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

impl<'a> IntoIterator for TableView<'a> {
    type Item = &'a Region;
    type IntoIter = std::vec::IntoIter<&'a Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
