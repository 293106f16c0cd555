//! Great-circle distance via the spherical law of cosines.

/// Distance between two lon/lat points in statute miles.
///
/// The cosine argument is clamped to [-1, 1]: for identical or antipodal
/// points floating-point error can push it just outside the acos domain,
/// and the resulting NaN would poison every min comparison downstream.
pub fn distance_miles(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let theta = lon1 - lon2;
    let cos_angle = lat1.to_radians().sin() * lat2.to_radians().sin()
        + lat1.to_radians().cos() * lat2.to_radians().cos() * theta.to_radians().cos();

    cos_angle.clamp(-1.0, 1.0).acos().to_degrees() * 60.0 * 1.1515
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_for_identical_points() {
        assert_eq!(distance_miles(-122.4194, 37.7749, -122.4194, 37.7749), 0.0);
        assert_eq!(distance_miles(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let ab = distance_miles(-122.4194, 37.7749, -118.2437, 34.0522);
        let ba = distance_miles(-118.2437, 34.0522, -122.4194, 37.7749);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_known_magnitude() {
        // San Francisco to Los Angeles is roughly 350 statute miles.
        let d = distance_miles(-122.4194, 37.7749, -118.2437, 34.0522);
        assert!((d - 347.0).abs() < 5.0, "got {}", d);
    }

    #[test]
    fn test_antipodal_points_stay_finite() {
        let d = distance_miles(0.0, 90.0, 0.0, -90.0);
        assert!(d.is_finite());
        // Half the circumference: 180 degrees of arc.
        assert!((d - 180.0 * 60.0 * 1.1515).abs() < 1e-6);
    }
}
