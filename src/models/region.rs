//! Region records and the administrative level hierarchy.

use serde::{Deserialize, Serialize};

/// Administrative specificity, admin0 (country) through admin5.
///
/// Region records carry a raw numeric level (the grid data also holds
/// synthetic rows above level 9); this enum is the request-hint form used
/// to ask for one exact level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminLevel {
    /// Country
    Admin0,
    /// State / province
    Admin1,
    /// County / district
    Admin2,
    Admin3,
    Admin4,
    Admin5,
}

impl AdminLevel {
    /// Numeric level as stored on region records.
    pub fn ordinal(&self) -> u8 {
        match self {
            AdminLevel::Admin0 => 0,
            AdminLevel::Admin1 => 1,
            AdminLevel::Admin2 => 2,
            AdminLevel::Admin3 => 3,
            AdminLevel::Admin4 => 4,
            AdminLevel::Admin5 => 5,
        }
    }

    pub fn from_ordinal(level: u8) -> Option<Self> {
        match level {
            0 => Some(AdminLevel::Admin0),
            1 => Some(AdminLevel::Admin1),
            2 => Some(AdminLevel::Admin2),
            3 => Some(AdminLevel::Admin3),
            4 => Some(AdminLevel::Admin4),
            5 => Some(AdminLevel::Admin5),
            _ => None,
        }
    }

    /// All levels in hierarchical order (country first)
    pub fn all() -> &'static [AdminLevel] {
        &[
            AdminLevel::Admin0,
            AdminLevel::Admin1,
            AdminLevel::Admin2,
            AdminLevel::Admin3,
            AdminLevel::Admin4,
            AdminLevel::Admin5,
        ]
    }
}

impl std::str::FromStr for AdminLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin0" => Ok(AdminLevel::Admin0),
            "admin1" => Ok(AdminLevel::Admin1),
            "admin2" => Ok(AdminLevel::Admin2),
            "admin3" => Ok(AdminLevel::Admin3),
            "admin4" => Ok(AdminLevel::Admin4),
            "admin5" => Ok(AdminLevel::Admin5),
            other => Err(format!("unknown admin level '{}'", other)),
        }
    }
}

/// Geographic point (lon/lat in degrees)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

/// Bounding box in degrees.
///
/// A region's box must contain its own polygon; candidate queries test the
/// query point against these boxes before any polygon is fetched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Inclusive containment, used by the candidate queries.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lat <= self.north && lat >= self.south && lon >= self.west && lon <= self.east
    }

    /// Strict containment, used by the center-point search window.
    pub fn contains_strict(&self, lon: f64, lat: f64) -> bool {
        lat < self.north && lat > self.south && lon > self.west && lon < self.east
    }
}

/// Reference to an ancestor region. The name is resolved from the region
/// table and may be missing for dangling ancestor ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ancestor {
    pub grid_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Ancestor chain for a region, one optional entry per admin level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ancestry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin0: Option<Ancestor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin1: Option<Ancestor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin2: Option<Ancestor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin3: Option<Ancestor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin4: Option<Ancestor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin5: Option<Ancestor>,
}

impl Ancestry {
    /// Set the ancestor for a given level
    pub fn set(&mut self, level: AdminLevel, ancestor: Ancestor) {
        match level {
            AdminLevel::Admin0 => self.admin0 = Some(ancestor),
            AdminLevel::Admin1 => self.admin1 = Some(ancestor),
            AdminLevel::Admin2 => self.admin2 = Some(ancestor),
            AdminLevel::Admin3 => self.admin3 = Some(ancestor),
            AdminLevel::Admin4 => self.admin4 = Some(ancestor),
            AdminLevel::Admin5 => self.admin5 = Some(ancestor),
        }
    }

    /// Get the ancestor for a given level
    pub fn get(&self, level: AdminLevel) -> Option<&Ancestor> {
        match level {
            AdminLevel::Admin0 => self.admin0.as_ref(),
            AdminLevel::Admin1 => self.admin1.as_ref(),
            AdminLevel::Admin2 => self.admin2.as_ref(),
            AdminLevel::Admin3 => self.admin3.as_ref(),
            AdminLevel::Admin4 => self.admin4.as_ref(),
            AdminLevel::Admin5 => self.admin5.as_ref(),
        }
    }
}

/// A single administrative region from the location grid.
///
/// This is the one record shape every candidate query returns, resolved
/// lookups included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Stable grid identifier
    pub grid_id: i64,

    /// Raw numeric level (0 = country, higher = more specific)
    pub level: u8,

    pub name: String,

    /// ISO country code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,

    pub bbox: BoundingBox,

    /// Stored center point, used by the last-resort fallback
    pub center: GeoPoint,

    pub ancestry: Ancestry,
}

/// Lightweight row for the center-point window query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegionPoint {
    pub grid_id: i64,
    pub center: GeoPoint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_round_trip() {
        for level in AdminLevel::all() {
            assert_eq!(AdminLevel::from_ordinal(level.ordinal()), Some(*level));
        }
        assert_eq!(AdminLevel::from_ordinal(6), None);
        assert_eq!("admin3".parse::<AdminLevel>(), Ok(AdminLevel::Admin3));
        assert!("admin6".parse::<AdminLevel>().is_err());
    }

    #[test]
    fn test_bbox_containment() {
        let bbox = BoundingBox {
            north: 1.0,
            south: -1.0,
            east: 2.0,
            west: -2.0,
        };
        assert!(bbox.contains(0.0, 0.0));
        assert!(bbox.contains(2.0, 1.0));
        assert!(!bbox.contains(2.1, 0.0));
        assert!(!bbox.contains(0.0, -1.1));

        assert!(bbox.contains_strict(0.0, 0.0));
        assert!(!bbox.contains_strict(2.0, 0.0));
        assert!(!bbox.contains_strict(0.0, 1.0));
    }

    #[test]
    fn test_ancestry_set_get() {
        let mut ancestry = Ancestry::default();
        ancestry.set(
            AdminLevel::Admin1,
            Ancestor {
                grid_id: 42,
                name: Some("California".to_string()),
            },
        );
        assert_eq!(ancestry.get(AdminLevel::Admin1).unwrap().grid_id, 42);
        assert!(ancestry.get(AdminLevel::Admin0).is_none());
    }
}
