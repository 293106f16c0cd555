//! Boundary geometry fetch with a local folder and a remote mirror.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::models::{parse_feature_collection, RegionGeometry};
use crate::source::BoundarySource;

/// Fetches region boundary GeoJSON, trying a local geometry folder first
/// and falling back to the remote mirror (`{base}/low/{grid_id}.geojson`).
///
/// Both sources failing yields `None`; the cascade then treats the region
/// as having no testable polygon.
pub struct MirrorFetcher {
    client: Client,
    geometry_dir: Option<PathBuf>,
    mirror_url: String,
}

impl MirrorFetcher {
    pub fn new(mirror_url: impl Into<String>, geometry_dir: Option<PathBuf>) -> Self {
        let mirror_url: String = mirror_url.into();
        Self {
            client: Client::builder()
                .user_agent("location-grid/0.1 (geocoder)")
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            geometry_dir,
            mirror_url: mirror_url.trim_end_matches('/').to_string(),
        }
    }

    async fn read_local(&self, grid_id: i64) -> Option<String> {
        let dir = self.geometry_dir.as_ref()?;
        let path = dir.join(format!("{}.geojson", grid_id));
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Some(raw),
            Err(err) => {
                debug!("no local geometry for {}: {}", grid_id, err);
                None
            }
        }
    }

    async fn read_mirror(&self, grid_id: i64) -> Option<String> {
        let url = format!("{}/low/{}.geojson", self.mirror_url, grid_id);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(err) => {
                warn!("boundary mirror request for {} failed: {}", grid_id, err);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(
                "boundary mirror returned {} for {}",
                response.status(),
                grid_id
            );
            return None;
        }

        response.text().await.ok()
    }
}

impl BoundarySource for MirrorFetcher {
    async fn fetch(&self, grid_id: i64) -> Option<Vec<RegionGeometry>> {
        let raw = match self.read_local(grid_id).await {
            Some(raw) => raw,
            None => self.read_mirror(grid_id).await?,
        };

        match parse_feature_collection(&raw) {
            Ok(geometries) => Some(geometries),
            Err(err) => {
                warn!("unusable boundary document for {}: {}", grid_id, err);
                None
            }
        }
    }
}
