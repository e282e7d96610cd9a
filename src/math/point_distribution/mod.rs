// src/math/point_distribution/mod.rs

pub mod voronoi;

pub use self::voronoi::{
    ClippedRegion, FiniteRegions, FiniteVoronoiBuilder, Landmark, VoronoiDiagram,
    VoronoiExtractor, VoronoiMap, VoronoiMapBuilder, VoronoiMapConfig,
};
