//! Core data models for the location grid.

pub mod geometry;
pub mod region;

pub use geometry::{parse_feature_collection, RegionGeometry};
pub use region::{AdminLevel, Ancestor, Ancestry, BoundingBox, GeoPoint, Region, RegionPoint};
