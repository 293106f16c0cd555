//! Even-odd ray-cast containment test.

use geo_types::LineString;

use crate::models::RegionGeometry;

/// Whether the point lies inside a single linear ring.
///
/// Standard even-odd crossing test: walk the vertices pairwise with the
/// previous index wrapping to the end, toggling on every edge the horizontal
/// ray at `lat` crosses. The ring is treated as closed whether or not the
/// first vertex is repeated at the end.
pub fn ring_contains(ring: &LineString<f64>, lon: f64, lat: f64) -> bool {
    let vertices = &ring.0;
    let n = vertices.len();
    if n == 0 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (vertices[i].x, vertices[i].y);
        let (xj, yj) = (vertices[j].x, vertices[j].y);

        if (yi > lat) != (yj > lat) && lon < (xj - xi) * (lat - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Whether any ring of the geometry contains the point.
///
/// Rings are tested independently, inner rings included, so a point inside
/// a hole reports as contained.
pub fn geometry_contains(geometry: &RegionGeometry, lon: f64, lat: f64) -> bool {
    geometry
        .rings()
        .into_iter()
        .any(|ring| ring_contains(ring, lon, lat))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{Coord, Polygon};

    fn closed_square(west: f64, south: f64, east: f64, north: f64) -> LineString<f64> {
        LineString::new(vec![
            Coord { x: west, y: south },
            Coord { x: east, y: south },
            Coord { x: east, y: north },
            Coord { x: west, y: north },
            Coord { x: west, y: south },
        ])
    }

    #[test]
    fn test_inside_simple_square() {
        let ring = closed_square(0.0, 0.0, 1.0, 1.0);
        assert!(ring_contains(&ring, 0.5, 0.5));
        assert!(ring_contains(&ring, 0.01, 0.99));
    }

    #[test]
    fn test_outside_simple_square() {
        let ring = closed_square(0.0, 0.0, 1.0, 1.0);
        assert!(!ring_contains(&ring, 1.5, 0.5));
        assert!(!ring_contains(&ring, 0.5, -0.5));
        assert!(!ring_contains(&ring, -10.0, 20.0));
    }

    #[test]
    fn test_implicitly_closed_ring() {
        // Same square without the repeated closing vertex.
        let ring = LineString::new(vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
            Coord { x: 0.0, y: 1.0 },
        ]);
        assert!(ring_contains(&ring, 0.5, 0.5));
        assert!(!ring_contains(&ring, 1.5, 0.5));
    }

    #[test]
    fn test_empty_ring() {
        let ring = LineString::new(vec![]);
        assert!(!ring_contains(&ring, 0.0, 0.0));
    }

    #[test]
    fn test_point_in_hole_reports_contained() {
        // Inner rings are tested like outer rings, so the hole does not
        // exclude the point.
        let polygon = Polygon::new(
            closed_square(0.0, 0.0, 4.0, 4.0),
            vec![closed_square(1.0, 1.0, 3.0, 3.0)],
        );
        let geometry = RegionGeometry::Polygon(polygon);
        assert!(geometry_contains(&geometry, 2.0, 2.0));
        assert!(geometry_contains(&geometry, 0.5, 0.5));
        assert!(!geometry_contains(&geometry, 5.0, 5.0));
    }

    #[test]
    fn test_multi_polygon_any_part() {
        let multi = geo_types::MultiPolygon::new(vec![
            Polygon::new(closed_square(0.0, 0.0, 1.0, 1.0), vec![]),
            Polygon::new(closed_square(10.0, 10.0, 11.0, 11.0), vec![]),
        ]);
        let geometry = RegionGeometry::MultiPolygon(multi);
        assert!(geometry_contains(&geometry, 0.5, 0.5));
        assert!(geometry_contains(&geometry, 10.5, 10.5));
        assert!(!geometry_contains(&geometry, 5.0, 5.0));
    }
}
