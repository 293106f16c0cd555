//! Region table loading from a CSV export of the location grid.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::models::{AdminLevel, Ancestor, Ancestry, BoundingBox, GeoPoint, Region};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read region table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse region table: {0}")]
    Csv(#[from] csv::Error),
}

/// One row of the grid export. Column names follow the upstream table.
#[derive(Debug, Deserialize)]
struct RegionRow {
    grid_id: i64,
    level: u8,
    name: String,
    #[serde(default)]
    country_code: Option<String>,
    north_latitude: f64,
    south_latitude: f64,
    east_longitude: f64,
    west_longitude: f64,
    longitude: f64,
    latitude: f64,
    #[serde(default)]
    admin0_grid_id: Option<i64>,
    #[serde(default)]
    admin1_grid_id: Option<i64>,
    #[serde(default)]
    admin2_grid_id: Option<i64>,
    #[serde(default)]
    admin3_grid_id: Option<i64>,
    #[serde(default)]
    admin4_grid_id: Option<i64>,
    #[serde(default)]
    admin5_grid_id: Option<i64>,
}

impl RegionRow {
    fn ancestor_ids(&self) -> [Option<i64>; 6] {
        [
            self.admin0_grid_id,
            self.admin1_grid_id,
            self.admin2_grid_id,
            self.admin3_grid_id,
            self.admin4_grid_id,
            self.admin5_grid_id,
        ]
    }
}

/// Load regions from a CSV file.
///
/// Ancestor names are resolved from the table itself in a second pass, so
/// every returned record carries the names the resolver's last-resort
/// fallback reports.
pub fn load_regions<P: AsRef<Path>>(path: P) -> Result<Vec<Region>, TableError> {
    let raw = fs::read_to_string(path)?;
    let mut reader = csv::Reader::from_reader(raw.as_bytes());

    let mut rows = Vec::new();
    for row in reader.deserialize::<RegionRow>() {
        rows.push(row?);
    }

    let names: HashMap<i64, String> = rows
        .iter()
        .map(|row| (row.grid_id, row.name.clone()))
        .collect();

    let regions: Vec<Region> = rows
        .into_iter()
        .map(|row| region_from_row(row, &names))
        .collect();

    info!("Loaded {} regions from table", regions.len());
    Ok(regions)
}

fn region_from_row(row: RegionRow, names: &HashMap<i64, String>) -> Region {
    let mut ancestry = Ancestry::default();
    for (level, ancestor_id) in AdminLevel::all().iter().zip(row.ancestor_ids()) {
        if let Some(grid_id) = ancestor_id {
            ancestry.set(
                *level,
                Ancestor {
                    grid_id,
                    name: names.get(&grid_id).cloned(),
                },
            );
        }
    }

    Region {
        grid_id: row.grid_id,
        level: row.level,
        name: row.name,
        country_code: row.country_code,
        bbox: BoundingBox {
            north: row.north_latitude,
            south: row.south_latitude,
            east: row.east_longitude,
            west: row.west_longitude,
        },
        center: GeoPoint {
            lon: row.longitude,
            lat: row.latitude,
        },
        ancestry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "grid_id,level,name,country_code,north_latitude,south_latitude,east_longitude,west_longitude,longitude,latitude,admin0_grid_id,admin1_grid_id,admin2_grid_id,admin3_grid_id,admin4_grid_id,admin5_grid_id";

    #[test]
    fn test_load_regions_with_ancestor_names() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(
            file,
            "100,0,United States,US,49.0,24.0,-66.0,-125.0,-98.0,39.0,100,,,,,"
        )
        .unwrap();
        writeln!(
            file,
            "200,1,California,US,42.0,32.5,-114.0,-124.5,-119.5,37.0,100,200,,,,"
        )
        .unwrap();
        writeln!(
            file,
            "300,2,San Francisco,US,37.9,37.6,-122.3,-122.6,-122.44,37.76,100,200,300,,,"
        )
        .unwrap();

        let regions = load_regions(file.path()).unwrap();
        assert_eq!(regions.len(), 3);

        let sf = regions.iter().find(|r| r.grid_id == 300).unwrap();
        assert_eq!(sf.level, 2);
        assert_eq!(sf.country_code.as_deref(), Some("US"));
        assert_eq!(sf.bbox.north, 37.9);
        assert_eq!(sf.center.lon, -122.44);

        let admin1 = sf.ancestry.get(AdminLevel::Admin1).unwrap();
        assert_eq!(admin1.grid_id, 200);
        assert_eq!(admin1.name.as_deref(), Some("California"));
        assert!(sf.ancestry.get(AdminLevel::Admin3).is_none());
    }

    #[test]
    fn test_empty_country_code_is_none() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "1,3,Somewhere,,1.0,0.0,1.0,0.0,0.5,0.5,,,,,,").unwrap();

        let regions = load_regions(file.path()).unwrap();
        assert!(regions[0].country_code.is_none());
    }

    #[test]
    fn test_dangling_ancestor_keeps_id_without_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "1,1,Province,XX,1.0,0.0,1.0,0.0,0.5,0.5,999,,,,,").unwrap();

        let regions = load_regions(file.path()).unwrap();
        let admin0 = regions[0].ancestry.get(AdminLevel::Admin0).unwrap();
        assert_eq!(admin0.grid_id, 999);
        assert!(admin0.name.is_none());
    }

    #[test]
    fn test_bad_row_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "not-a-number,0,X,,1,0,1,0,0.5,0.5,,,,,,").unwrap();

        assert!(matches!(
            load_regions(file.path()),
            Err(TableError::Csv(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            load_regions("/nonexistent/location_grid.csv"),
            Err(TableError::Io(_))
        ));
    }
}
