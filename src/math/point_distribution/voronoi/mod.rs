// src/math/point_distribution/voronoi/mod.rs

// Voronoi-Zerlegung: Extraktion, Schließen offener Regionen, Clipping, Pipeline
pub mod builder;
pub mod clipping;
pub mod config;
pub mod finite;
pub mod voronoi_diagram;

pub use self::builder::{Landmark, VoronoiMap, VoronoiMapBuilder, kyoto_landmarks};
pub use self::clipping::{ClippedRegion, RegionClipper, radius_covers_bounds, required_radius};
pub use self::config::VoronoiMapConfig;
pub use self::finite::{FiniteRegion, FiniteRegions, FiniteVoronoiBuilder, build_finite_regions};
pub use self::voronoi_diagram::{Ridge, VertexRef, VoronoiDiagram, VoronoiExtractor};
