//! Route-relative projection for hiking GPS tracks.
//!
//! The core converts a path of longitude/latitude samples into a local
//! planar frame ([`projection`]), measures distance along it ([`distance`])
//! and maps a distance back onto the path ([`locator`]). [`Route`] bundles
//! the three. The remaining modules read and write the hike data artifact
//! and implement the `trail-snap` commands on top of that core.

pub mod cli;
pub mod distance;
pub mod elevation;
pub mod error;
pub mod hike_data;
pub mod io;
pub mod locator;
pub mod overrides;
pub mod parsers;
pub mod projection;
pub mod report;
pub mod route;
pub mod snap;
pub mod units;

pub use error::{Error, Result};
pub use locator::Projection;
pub use projection::{GeoPoint, Projector};
pub use route::{Route, RoutePosition};

/// Runtime artifact read by the map.
pub const CANONICAL_PATH: &str = "public/data/hike_data.json";
/// Copy kept for tooling that still reads the old location.
pub const MIRROR_PATH: &str = "src/hike_data.json";
