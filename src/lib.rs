//! Location Grid - point-in-polygon geocoding over an administrative region grid
//!
//! Resolves a longitude/latitude to the most specific administrative region
//! containing it, using a four-test cascade: unambiguous bounding-box match,
//! point-in-polygon over the ambiguous candidates, nearest boundary vertex,
//! and nearest stored center point. Boundary polygons are fetched lazily
//! from a local folder or a remote mirror.

pub mod models;
pub mod resolve;
pub mod source;

pub use models::{AdminLevel, BoundingBox, GeoPoint, Region, RegionGeometry};
pub use resolve::GridResolver;
pub use source::{BoundarySource, CandidateSource};
