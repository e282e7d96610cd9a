// src/debug/visualization/mod.rs

pub mod svg;

pub use self::svg::{create_voronoi_svg, voronoi_map_document};
