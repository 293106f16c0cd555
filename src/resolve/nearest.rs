//! Fallback selection by nearest boundary vertex or nearest center point.

use crate::models::{RegionGeometry, RegionPoint};

use super::distance::distance_miles;

/// Pick the candidate whose boundary is nearest the point.
///
/// Each region is reduced to a single comparison vertex: the last vertex
/// seen while walking every ring of every polygon. Earlier vertices are
/// overwritten, so only the final vertex of the final ring survives. A
/// true-nearest variant would collect all vertices and take the minimum;
/// this keeps the single-slot behavior for result compatibility.
///
/// Ties keep the earlier candidate, so the caller's candidate order is a
/// deterministic tie-break.
pub fn nearest_by_boundary<'a, I>(candidates: I, lon: f64, lat: f64) -> Option<i64>
where
    I: IntoIterator<Item = (i64, &'a [RegionGeometry])>,
{
    let mut best: Option<(i64, f64)> = None;

    for (grid_id, geometries) in candidates {
        let mut vertex = None;
        for geometry in geometries {
            for ring in geometry.rings() {
                if let Some(last) = ring.0.last() {
                    vertex = Some(*last);
                }
            }
        }

        let Some(vertex) = vertex else {
            continue;
        };

        let d = distance_miles(vertex.x, vertex.y, lon, lat);
        match best {
            Some((_, min)) if d >= min => {}
            _ => best = Some((grid_id, d)),
        }
    }

    best.map(|(grid_id, _)| grid_id)
}

/// Pick the region whose stored center point is nearest the point.
pub fn nearest_by_centerpoint(points: &[RegionPoint], lon: f64, lat: f64) -> Option<i64> {
    let mut best: Option<(i64, f64)> = None;

    for point in points {
        let d = distance_miles(point.center.lon, point.center.lat, lon, lat);
        match best {
            Some((_, min)) if d >= min => {}
            _ => best = Some((point.grid_id, d)),
        }
    }

    best.map(|(grid_id, _)| grid_id)
}
