pub mod error;
pub mod geometry;
pub mod point_distribution;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{MathError, MathResult};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        error::{MathError, MathResult},
        geometry::projection::{Hemisphere, LatLon, UtmProjection},
        point_distribution::voronoi::{
            ClippedRegion, FiniteRegion, FiniteRegions, FiniteVoronoiBuilder, Landmark,
            RegionClipper, VertexRef, VoronoiDiagram, VoronoiExtractor, VoronoiMap,
            VoronoiMapBuilder, VoronoiMapConfig, build_finite_regions,
        },
        types::*,
    };
}
