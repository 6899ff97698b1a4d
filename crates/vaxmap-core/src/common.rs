use serde::{Deserialize, Serialize};

/// Build statistics for the region table.
///
/// Returned by [`RegionTable::stats`](crate::RegionTable::stats), these counts
/// describe each source and how many region codes survived the inner join.
/// Codes that fell out of the join are listed so a caller can see what was
/// silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStats {
    pub boundary_regions: usize,
    pub vaccination_regions: usize,
    pub vaccination_rows: usize,
    pub population_regions: usize,
    pub joined: usize,
    /// Codes seen in at least one source but not in all three, ascending.
    pub excluded_codes: Vec<u32>,
}
