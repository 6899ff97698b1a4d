// crates/vaxmap-core/src/lib.rs

pub mod column; // Closed set of color-key columns
pub mod common;
pub mod config;
pub mod error;
pub mod filter; // Area/density ranges and table views
pub mod loader; // The three source readers + startup build
pub mod metric;
pub mod model; // Join, derive, table
pub mod text;
pub mod traits;
pub mod view; // JSON views for the map front-end

// Re-exports
pub use crate::error::{Result, VaxError};
pub use column::ColumnId;
pub use common::TableStats;
pub use config::PipelineConfig;
pub use filter::{Bounds, RangeFilter, TableView};
pub use loader::Source;
pub use metric::{DemographicSplit, PopulationCounts, VaccinationMetric, VaccinationTotals};
pub use model::{Anomaly, Region, RegionTable};
pub use view::{render, render_dashboard, Choropleth, Dashboard, DashboardState, SliderBounds, Summary};
// Export the lookup trait (needed to call `is_named` on rows)
pub use crate::traits::NameMatch;
