//! Collaborator interfaces for candidate lookup and boundary geometry,
//! plus the in-memory implementations.

pub mod country_levels;
pub mod fetcher;
pub mod index;
pub mod table;

pub use country_levels::CountryLevels;
pub use fetcher::MirrorFetcher;
pub use index::MemoryRegionIndex;
pub use table::{load_regions, TableError};

use anyhow::Result;

use crate::models::{AdminLevel, BoundingBox, Region, RegionGeometry, RegionPoint};

/// Most candidates a bounding-box query returns.
pub const CANDIDATE_LIMIT: usize = 10;

/// Most rows the broader diagnostic scan returns.
pub const POSSIBLE_LIMIT: usize = 15;

/// Spatial candidate lookup over the region grid.
///
/// Implementations must return candidates in a deterministic order; the
/// resolution cascade uses that order as a tie-break.
#[allow(async_fn_in_trait)]
pub trait CandidateSource {
    /// Regions at exactly `level` whose bounding box contains the point,
    /// capped at [`CANDIDATE_LIMIT`].
    async fn query_by_level(&self, lon: f64, lat: f64, level: AdminLevel) -> Result<Vec<Region>>;

    /// Regions at the deepest level available for the point, capped at
    /// [`CANDIDATE_LIMIT`]. With a country hint the deepest level recorded
    /// for that country is queried directly; otherwise a descending-level
    /// bounding-box scan is trimmed to its top level.
    async fn query_lowest_level(
        &self,
        lon: f64,
        lat: f64,
        country_code: Option<&str>,
    ) -> Result<Vec<Region>>;

    /// Broader scan around the point for diagnostics, capped at
    /// [`POSSIBLE_LIMIT`].
    async fn query_possible_matches(&self, lon: f64, lat: f64) -> Result<Vec<Region>>;

    /// Regions more specific than admin1 whose stored center point lies
    /// strictly inside the window.
    async fn query_centerpoints(&self, window: &BoundingBox) -> Result<Vec<RegionPoint>>;

    /// Full region record, ancestor names included.
    async fn region_by_id(&self, grid_id: i64) -> Result<Option<Region>>;
}

/// Boundary geometry lookup for a region.
#[allow(async_fn_in_trait)]
pub trait BoundarySource {
    /// Fetch the region's boundary geometries. `None` means the boundary is
    /// unavailable, which callers treat as "no testable polygon", never as
    /// an error.
    async fn fetch(&self, grid_id: i64) -> Option<Vec<RegionGeometry>>;
}
