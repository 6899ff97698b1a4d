// crates/vaxmap-core/src/model/mod.rs

//! # Region Model
//!
//! The joined and derived table. `join` combines the three parsed sources,
//! `derive` attaches area, density and percentages, and `table` owns the
//! finished rows and answers read-only queries.

pub mod derive;
pub mod join;
pub mod region;
pub mod table;

pub use derive::{AREA_DECIMALS, AREA_SCALE, PERCENT_DECIMALS};
pub use region::{Anomaly, PercentVaccinated, Region};
pub use table::RegionTable;
