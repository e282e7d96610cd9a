// src/math/geometry/mod.rs

pub mod projection;

pub use self::projection::{Hemisphere, LatLon, UtmProjection};
