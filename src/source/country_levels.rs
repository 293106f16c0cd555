//! Country code to deepest-admin-level map.

use std::collections::HashMap;

use crate::models::Region;

/// Deepest admin level recorded per country.
///
/// A country hint lets the candidate query go straight to the level the
/// grid actually bottoms out at for that country, instead of scanning
/// downward. Grid rows at level 10 and above are synthetic aggregates and
/// are excluded.
#[derive(Debug, Default)]
pub struct CountryLevels {
    levels: HashMap<String, u8>,
}

impl CountryLevels {
    pub fn from_regions<'a, I>(regions: I) -> Self
    where
        I: IntoIterator<Item = &'a Region>,
    {
        let mut levels: HashMap<String, u8> = HashMap::new();

        for region in regions {
            if region.level >= 10 {
                continue;
            }
            let Some(code) = &region.country_code else {
                continue;
            };

            let entry = levels.entry(code.to_uppercase()).or_insert(region.level);
            if region.level > *entry {
                *entry = region.level;
            }
        }

        Self { levels }
    }

    /// Deepest level for a country code, case-insensitive.
    pub fn deepest(&self, country_code: &str) -> Option<u8> {
        self.levels.get(&country_code.to_uppercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ancestry, BoundingBox, GeoPoint};

    fn region(grid_id: i64, level: u8, country_code: Option<&str>) -> Region {
        Region {
            grid_id,
            level,
            name: format!("region {}", grid_id),
            country_code: country_code.map(str::to_string),
            bbox: BoundingBox {
                north: 1.0,
                south: 0.0,
                east: 1.0,
                west: 0.0,
            },
            center: GeoPoint { lon: 0.5, lat: 0.5 },
            ancestry: Ancestry::default(),
        }
    }

    #[test]
    fn test_keeps_deepest_level_per_country() {
        let regions = vec![
            region(1, 0, Some("us")),
            region(2, 2, Some("US")),
            region(3, 1, Some("US")),
            region(4, 3, Some("FR")),
        ];
        let levels = CountryLevels::from_regions(regions.iter());

        assert_eq!(levels.deepest("US"), Some(2));
        assert_eq!(levels.deepest("us"), Some(2));
        assert_eq!(levels.deepest("FR"), Some(3));
        assert_eq!(levels.deepest("DE"), None);
        assert_eq!(levels.len(), 2);
    }

    #[test]
    fn test_excludes_synthetic_levels_and_missing_codes() {
        let regions = vec![
            region(1, 1, Some("US")),
            region(2, 10, Some("US")),
            region(3, 12, Some("US")),
            region(4, 4, None),
        ];
        let levels = CountryLevels::from_regions(regions.iter());

        assert_eq!(levels.deepest("US"), Some(1));
        assert_eq!(levels.len(), 1);
    }
}
