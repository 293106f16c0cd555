//! In-memory candidate source backed by an R-tree of region bounding boxes.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use anyhow::Result;
use rstar::{RTree, RTreeObject, AABB};
use tracing::info;

use crate::models::{AdminLevel, BoundingBox, Region, RegionPoint};
use crate::source::{CandidateSource, CountryLevels, CANDIDATE_LIMIT, POSSIBLE_LIMIT};

/// Wrapper for R-tree indexing of regions
#[derive(Clone)]
pub struct IndexedRegion {
    region: Arc<Region>,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedRegion {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedRegion {
    fn new(region: Region) -> Self {
        let envelope = AABB::from_corners(
            [region.bbox.west, region.bbox.south],
            [region.bbox.east, region.bbox.north],
        );
        Self {
            region: Arc::new(region),
            envelope,
        }
    }
}

/// Candidate source holding the whole region grid in memory.
///
/// Bounding-box queries go through an R-tree; the country-level map is
/// built lazily on the first country-hinted query.
pub struct MemoryRegionIndex {
    tree: RTree<IndexedRegion>,
    by_id: HashMap<i64, Arc<Region>>,
    country_levels: OnceLock<CountryLevels>,
}

impl MemoryRegionIndex {
    pub fn build(regions: Vec<Region>) -> Self {
        info!("Building region index for {} regions...", regions.len());

        let indexed: Vec<IndexedRegion> = regions.into_iter().map(IndexedRegion::new).collect();

        let by_id: HashMap<i64, Arc<Region>> = indexed
            .iter()
            .map(|ir| (ir.region.grid_id, Arc::clone(&ir.region)))
            .collect();

        let tree = RTree::bulk_load(indexed);

        info!("Region index built with {} entries", tree.size());

        Self {
            tree,
            by_id,
            country_levels: OnceLock::new(),
        }
    }

    /// All regions whose bounding box contains the point, deepest level
    /// first. Grid id keeps the order stable within a level.
    fn bbox_hits(&self, lon: f64, lat: f64) -> Vec<Arc<Region>> {
        let query_envelope = AABB::from_point([lon, lat]);

        let mut hits: Vec<Arc<Region>> = self
            .tree
            .locate_in_envelope_intersecting(&query_envelope)
            .filter(|ir| ir.region.bbox.contains(lon, lat))
            .map(|ir| Arc::clone(&ir.region))
            .collect();

        hits.sort_by(|a, b| b.level.cmp(&a.level).then(a.grid_id.cmp(&b.grid_id)));
        hits
    }

    fn country_levels(&self) -> &CountryLevels {
        self.country_levels
            .get_or_init(|| CountryLevels::from_regions(self.by_id.values().map(Arc::as_ref)))
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl CandidateSource for MemoryRegionIndex {
    async fn query_by_level(&self, lon: f64, lat: f64, level: AdminLevel) -> Result<Vec<Region>> {
        let candidates = self
            .bbox_hits(lon, lat)
            .into_iter()
            .filter(|r| r.level == level.ordinal())
            .take(CANDIDATE_LIMIT)
            .map(|r| Region::clone(&r))
            .collect();
        Ok(candidates)
    }

    async fn query_lowest_level(
        &self,
        lon: f64,
        lat: f64,
        country_code: Option<&str>,
    ) -> Result<Vec<Region>> {
        match country_code {
            // The country-indexed path skips the scan entirely and is
            // roughly twice as fast on a real grid.
            Some(code) => {
                let level = self.country_levels().deepest(code).unwrap_or(0);
                let candidates = self
                    .bbox_hits(lon, lat)
                    .into_iter()
                    .filter(|r| r.level == level)
                    .take(CANDIDATE_LIMIT)
                    .map(|r| Region::clone(&r))
                    .collect();
                Ok(candidates)
            }
            None => {
                let hits: Vec<Arc<Region>> = self
                    .bbox_hits(lon, lat)
                    .into_iter()
                    .take(CANDIDATE_LIMIT)
                    .collect();

                // Keep only the deepest level present; ties at that level
                // all stay in.
                let Some(top) = hits.first().map(|r| r.level) else {
                    return Ok(Vec::new());
                };
                Ok(hits
                    .into_iter()
                    .filter(|r| r.level == top)
                    .map(|r| Region::clone(&r))
                    .collect())
            }
        }
    }

    async fn query_possible_matches(&self, lon: f64, lat: f64) -> Result<Vec<Region>> {
        Ok(self
            .bbox_hits(lon, lat)
            .into_iter()
            .take(POSSIBLE_LIMIT)
            .map(|r| Region::clone(&r))
            .collect())
    }

    async fn query_centerpoints(&self, window: &BoundingBox) -> Result<Vec<RegionPoint>> {
        let mut points: Vec<RegionPoint> = self
            .by_id
            .values()
            .filter(|r| r.level > 1 && window.contains_strict(r.center.lon, r.center.lat))
            .map(|r| RegionPoint {
                grid_id: r.grid_id,
                center: r.center,
            })
            .collect();

        points.sort_by_key(|p| p.grid_id);
        Ok(points)
    }

    async fn region_by_id(&self, grid_id: i64) -> Result<Option<Region>> {
        Ok(self.by_id.get(&grid_id).map(|r| Region::clone(r)))
    }
}
