//! Boundary geometry parsed from GeoJSON feature collections.

use anyhow::{Context, Result};
use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use tracing::debug;

/// Boundary of a single region, as published on the geometry mirror.
#[derive(Debug, Clone)]
pub enum RegionGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl RegionGeometry {
    /// Every linear ring of the geometry, outer and inner alike.
    ///
    /// Inner rings are not treated as holes anywhere downstream: a point
    /// inside a hole still tests as contained.
    pub fn rings(&self) -> Vec<&LineString<f64>> {
        match self {
            RegionGeometry::Polygon(polygon) => polygon_rings(polygon),
            RegionGeometry::MultiPolygon(multi) => {
                multi.0.iter().flat_map(polygon_rings).collect()
            }
        }
    }
}

fn polygon_rings(polygon: &Polygon<f64>) -> Vec<&LineString<f64>> {
    let mut rings = vec![polygon.exterior()];
    rings.extend(polygon.interiors());
    rings
}

#[derive(Debug, Deserialize)]
struct RawFeatureCollection {
    #[serde(default)]
    features: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<[f64; 2]>>> },
}

fn ring(coords: Vec<[f64; 2]>) -> LineString<f64> {
    LineString::new(coords.iter().map(|c| Coord { x: c[0], y: c[1] }).collect())
}

fn polygon(mut rings: Vec<Vec<[f64; 2]>>) -> Option<Polygon<f64>> {
    if rings.is_empty() {
        return None;
    }
    let exterior = ring(rings.remove(0));
    let interiors = rings.into_iter().map(ring).collect();
    Some(Polygon::new(exterior, interiors))
}

/// Parse the boundary geometries out of a GeoJSON feature collection.
///
/// Features with a missing or malformed geometry, or with a geometry type
/// other than Polygon/MultiPolygon, are skipped rather than failing the
/// whole document.
pub fn parse_feature_collection(raw: &str) -> Result<Vec<RegionGeometry>> {
    let doc: RawFeatureCollection =
        serde_json::from_str(raw).context("not a GeoJSON feature collection")?;

    let mut geometries = Vec::new();

    for feature in doc.features {
        let Some(geometry) = feature.get("geometry") else {
            continue;
        };

        match serde_json::from_value::<RawGeometry>(geometry.clone()) {
            Ok(RawGeometry::Polygon { coordinates }) => {
                if let Some(p) = polygon(coordinates) {
                    geometries.push(RegionGeometry::Polygon(p));
                }
            }
            Ok(RawGeometry::MultiPolygon { coordinates }) => {
                let polygons: Vec<Polygon<f64>> =
                    coordinates.into_iter().filter_map(polygon).collect();
                if !polygons.is_empty() {
                    geometries.push(RegionGeometry::MultiPolygon(MultiPolygon::new(polygons)));
                }
            }
            Err(err) => {
                debug!("skipping feature with unusable geometry: {}", err);
            }
        }
    }

    Ok(geometries)
}
