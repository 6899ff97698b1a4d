// crates/vaxmap-core/src/view.rs

//! # JSON Views
//!
//! Pure functions turning the region table into what a map front-end needs:
//! slider bounds, the headline numbers and choropleth layers as GeoJSON.
//! Nothing here keeps state; call again with new inputs to re-render.

use crate::column::ColumnId;
use crate::filter::{RangeFilter, TableView};
use crate::metric::VaccinationMetric;
use crate::model::derive::round_to;
use crate::model::{Region, RegionTable, PERCENT_DECIMALS};
use chrono::NaiveDate;
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde::Serialize;
use std::collections::BTreeMap;

pub const AREA_UNIT: &str = "km^2";
pub const DENSITY_UNIT: &str = "ab/km^2";

/// Where and how the map is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapStyle {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
    pub opacity: f64,
    pub color_scale: &'static str,
    pub basemap: &'static str,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            center_lat: 41.8719,
            center_lon: 12.5694,
            zoom: 4,
            opacity: 0.5,
            color_scale: "GnBu",
            basemap: "carto-positron",
        }
    }
}

/// Humanizes a count the way the dashboard gauges do.
///
/// ```rust
/// use vaxmap_core::view::numerize;
///
/// assert_eq!(numerize(999.0), "999");
/// assert_eq!(numerize(1000.0), "1K");
/// assert_eq!(numerize(1_234_567.0), "1.23M");
/// assert_eq!(numerize(2_500_000_000.0), "2.5B");
/// ```
pub fn numerize(value: f64) -> String {
    const SUFFIXES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    for (scale, suffix) in SUFFIXES {
        if value.abs() >= scale {
            return format!("{}{suffix}", trim_decimals(value / scale));
        }
    }
    trim_decimals(value)
}

fn trim_decimals(value: f64) -> String {
    let s = format!("{:.2}", round_to(value, 2));
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

// -----------------------------------------------------------------------------
// SLIDERS
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    pub value: i64,
    pub label: String,
}

/// Range control for one numeric column: its extremes, two labelled marks,
/// and the initial value (the maximum, so nothing starts filtered out).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderBounds {
    pub column: ColumnId,
    pub min: i64,
    pub max: i64,
    pub value: i64,
    pub marks: Vec<SliderMark>,
}

impl SliderBounds {
    /// `None` when the column has no defined value in the table.
    pub fn for_column(table: &RegionTable, column: ColumnId, unit: &str) -> Option<Self> {
        let (lo, hi) = table.view().column_range(column)?;
        let (min, max) = (lo as i64, hi as i64);
        let mark = |v: i64| SliderMark {
            value: v,
            label: format!("{} {unit}", numerize(v as f64)),
        };
        Some(Self {
            column,
            min,
            max,
            value: max,
            marks: vec![mark(min), mark(max)],
        })
    }

    pub fn area(table: &RegionTable) -> Option<Self> {
        Self::for_column(table, ColumnId::Area, AREA_UNIT)
    }

    pub fn density(table: &RegionTable) -> Option<Self> {
        Self::for_column(table, ColumnId::Density, DENSITY_UNIT)
    }
}

// -----------------------------------------------------------------------------
// SUMMARY
// -----------------------------------------------------------------------------

/// Headline figures shown under the maps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub regions: usize,
    pub total_vaccinated: u128,
    pub total_vaccinated_label: String,
    pub total_population: u128,
    /// `round(100 * Σ vaccinated / Σ population, 2)` over the whole table.
    pub percent_vaccinated: Option<f64>,
    pub last_update: Option<NaiveDate>,
}

impl Summary {
    pub fn of(table: &RegionTable) -> Self {
        // Per-region counts are u64; their sum over the table needs u128.
        let total_vaccinated: u128 = table
            .regions()
            .iter()
            .map(|r| u128::from(r.vaccinated(VaccinationMetric::Total)))
            .sum();
        let total_population: u128 = table
            .regions()
            .iter()
            .map(|r| u128::from(r.total_population()))
            .sum();
        let percent_vaccinated = (total_population > 0).then(|| {
            round_to(
                100.0 * total_vaccinated as f64 / total_population as f64,
                PERCENT_DECIMALS,
            )
        });
        Self {
            regions: table.len(),
            total_vaccinated,
            total_vaccinated_label: numerize(total_vaccinated as f64),
            total_population,
            percent_vaccinated,
            last_update: table.last_update(),
        }
    }
}

// -----------------------------------------------------------------------------
// CHOROPLETH
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorRange {
    pub min: f64,
    pub max: f64,
}

/// One colored map layer: the filtered regions as GeoJSON plus everything a
/// renderer needs to color them by `column`.
#[derive(Debug, Clone, Serialize)]
pub struct Choropleth {
    pub column: ColumnId,
    pub label: String,
    /// `None` when no visible region has a defined value.
    pub color_range: Option<ColorRange>,
    pub style: MapStyle,
    /// Hover property name -> human label.
    pub labels: BTreeMap<String, String>,
    pub features: FeatureCollection,
}

impl Choropleth {
    pub fn len(&self) -> usize {
        self.features.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.features.is_empty()
    }
}

/// Columns shown on hover besides the selected one.
fn hover_columns(selected: ColumnId) -> Vec<ColumnId> {
    let mut cols = vec![
        ColumnId::Area,
        ColumnId::Vaccinated(VaccinationMetric::Total),
        ColumnId::Density,
        ColumnId::Percent(VaccinationMetric::Total),
    ];
    if !cols.contains(&selected) {
        cols.push(selected);
    }
    cols
}

/// Filters the table and builds the layer for `column`.
pub fn render(table: &RegionTable, filter: &RangeFilter, column: ColumnId) -> Choropleth {
    render_view(&table.filter(filter), column)
}

/// Builds a layer from an already filtered view.
pub fn render_view(view: &TableView<'_>, column: ColumnId) -> Choropleth {
    let hover = hover_columns(column);

    let features = view.iter().map(|r| region_feature(r, &hover)).collect();

    let labels = hover
        .iter()
        .map(|c| (c.to_string(), c.label()))
        .chain(std::iter::once(("name".to_string(), "Nome regione".to_string())))
        .collect();

    Choropleth {
        column,
        label: column.label(),
        color_range: view
            .column_range(column)
            .map(|(min, max)| ColorRange { min, max }),
        style: MapStyle::default(),
        labels,
        features,
    }
}

fn region_feature(region: &Region, hover: &[ColumnId]) -> Feature {
    let mut feature = Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(region.geometry()))),
        id: Some(Id::String(region.name().to_string())),
        properties: None,
        foreign_members: None,
    };
    feature.set_property("name", region.name());
    feature.set_property("code", region.code());
    for col in hover {
        feature.set_property(col.to_string(), col.value(region));
    }
    if region.has_anomalies() {
        let notes: Vec<String> = region.anomalies().iter().map(|a| a.to_string()).collect();
        feature.set_property("anomalies", notes);
    }
    feature
}

// -----------------------------------------------------------------------------
// DASHBOARD
// -----------------------------------------------------------------------------

/// The user's current choices: one column per map and a shared filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardState {
    pub left: ColumnId,
    pub right: ColumnId,
    pub filter: RangeFilter,
}

impl DashboardState {
    /// First two dropdown entries, sliders at their maximum.
    pub fn initial(table: &RegionTable) -> Self {
        let max_area = SliderBounds::area(table).map_or(f64::INFINITY, |s| s.max as f64);
        let max_density = SliderBounds::density(table).map_or(f64::INFINITY, |s| s.max as f64);
        Self {
            left: ColumnId::Vaccinated(VaccinationMetric::Total),
            right: ColumnId::Vaccinated(VaccinationMetric::FirstDose),
            filter: RangeFilter::up_to(max_area, max_density),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub left: Choropleth,
    pub right: Choropleth,
    pub area_slider: Option<SliderBounds>,
    pub density_slider: Option<SliderBounds>,
    pub summary: Summary,
}

pub fn render_dashboard(table: &RegionTable, state: &DashboardState) -> Dashboard {
    let view = table.filter(&state.filter);
    Dashboard {
        left: render_view(&view, state.left),
        right: render_view(&view, state.right),
        area_slider: SliderBounds::area(table),
        density_slider: SliderBounds::density(table),
        summary: Summary::of(table),
    }
}
