//! Four-test resolution cascade for longitude/latitude lookups.
//!
//! Each test is an escape hatch for the failure mode of the previous one:
//! bounding-box ambiguity falls through to polygon containment, coastal
//! rounding error to the nearest boundary vertex, and uncharted points to
//! the nearest stored center point. The first test that succeeds decides
//! the result; there is no scoring.

mod distance;
mod nearest;
mod raycast;

pub use distance::distance_miles;
pub use raycast::{geometry_contains, ring_contains};

use std::collections::HashMap;

use anyhow::{ensure, Result};
use tracing::debug;

use crate::models::{AdminLevel, BoundingBox, Region, RegionGeometry};
use crate::source::{BoundarySource, CandidateSource};

/// Resolves coordinates to the most specific region containing them.
///
/// Stateless across calls; boundary geometry fetched while testing one
/// point is cached only for the span of that call.
pub struct GridResolver<C, B> {
    candidates: C,
    boundaries: B,
}

impl<C: CandidateSource, B: BoundarySource> GridResolver<C, B> {
    pub fn new(candidates: C, boundaries: B) -> Self {
        Self {
            candidates,
            boundaries,
        }
    }

    /// Find the region containing the point, or `None` when the grid has
    /// nothing for it (open ocean, unmapped areas).
    ///
    /// `country_code` and `level` narrow the candidate query; neither
    /// bypasses the polygon tests.
    pub async fn resolve(
        &self,
        lon: f64,
        lat: f64,
        country_code: Option<&str>,
        level: Option<AdminLevel>,
    ) -> Result<Option<Region>> {
        ensure!(
            lon.is_finite() && lat.is_finite(),
            "non-finite query point ({}, {})",
            lon,
            lat
        );

        let results = match level {
            Some(level) => self.candidates.query_by_level(lon, lat, level).await?,
            None => {
                self.candidates
                    .query_lowest_level(lon, lat, country_code)
                    .await?
            }
        };

        // Test 1: a single bounding-box match needs no polygon confirmation.
        if results.len() == 1 {
            debug!("resolved ({}, {}) by unambiguous bounding box", lon, lat);
            return Ok(Some(results[0].clone()));
        }

        // Test 2: point-in-polygon over the ambiguous candidates, in
        // candidate order. A candidate whose boundary cannot be fetched is
        // skipped; fetched geometry is kept for Test 3.
        let mut fetched: HashMap<i64, Vec<RegionGeometry>> = HashMap::new();
        if results.len() > 1 {
            for region in &results {
                let Some(geometries) = self.boundaries.fetch(region.grid_id).await else {
                    continue;
                };

                let contained = geometries
                    .iter()
                    .any(|geometry| raycast::geometry_contains(geometry, lon, lat));
                fetched.insert(region.grid_id, geometries);

                if contained {
                    debug!(
                        "resolved ({}, {}) by point-in-polygon: {}",
                        lon, lat, region.grid_id
                    );
                    return Ok(Some(region.clone()));
                }
            }
        }

        // Test 3: no polygon contained the point, so take the candidate
        // with the nearest boundary vertex. Catches coastal points that
        // fall just outside every polygon line.
        if !fetched.is_empty() {
            let pairs = results.iter().filter_map(|region| {
                fetched
                    .get(&region.grid_id)
                    .map(|geometries| (region.grid_id, geometries.as_slice()))
            });

            if let Some(grid_id) = nearest::nearest_by_boundary(pairs, lon, lat) {
                if let Some(region) = results.iter().find(|r| r.grid_id == grid_id) {
                    debug!(
                        "resolved ({}, {}) by nearest boundary vertex: {}",
                        lon, lat, grid_id
                    );
                    return Ok(Some(region.clone()));
                }
            }
        }

        // Test 4: no bounding box claimed the point at all. Often islands
        // or points just offshore; fall back to the nearest stored center
        // point inside a widened window, re-fetched by id so the returned
        // record carries ancestor names.
        let window = search_window(lon, lat);
        let points = self.candidates.query_centerpoints(&window).await?;
        if let Some(grid_id) = nearest::nearest_by_centerpoint(&points, lon, lat) {
            debug!(
                "resolved ({}, {}) by nearest center point: {}",
                lon, lat, grid_id
            );
            return self.candidates.region_by_id(grid_id).await;
        }

        debug!("no region found for ({}, {})", lon, lat);
        Ok(None)
    }

    /// Broader candidate scan around the point, for diagnostics and
    /// exploration. Not part of the cascade.
    pub async fn possible_matches(&self, lon: f64, lat: f64) -> Result<Vec<Region>> {
        ensure!(
            lon.is_finite() && lat.is_finite(),
            "non-finite query point ({}, {})",
            lon,
            lat
        );

        let matches = self.candidates.query_possible_matches(lon, lat).await?;
        debug!("{} possible matches for ({}, {})", matches.len(), lon, lat);
        Ok(matches)
    }
}

/// Window for the center-point fallback: the enclosing whole-degree cell
/// padded by one degree on every side.
fn search_window(lon: f64, lat: f64) -> BoundingBox {
    BoundingBox {
        north: lat.ceil() + 1.0,
        south: lat.floor() - 1.0,
        west: lon.floor() - 1.0,
        east: lon.ceil() + 1.0,
    }
}
