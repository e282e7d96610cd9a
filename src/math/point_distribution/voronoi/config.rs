// src/math/point_distribution/voronoi/config.rs

use crate::math::{
    error::{MathError, MathResult},
    geometry::projection::UtmProjection,
    point_distribution::voronoi::clipping::{DEFAULT_FALLBACK_RADIUS, DEFAULT_FALLBACK_SEGMENTS},
};

/// EPSG-Code der UTM-Zone 53N (Kansai).
pub const DEFAULT_PROJECTION_EPSG: u32 = 32653;

/// Konfiguration für die Erzeugung einer Voronoi-Karte aus geografischen Punkten.
#[derive(Debug, Clone)]
pub struct VoronoiMapConfig {
    /// EPSG-Code der metrischen Zielprojektion (WGS84 / UTM).
    pub projection_epsg: u32,
    /// Wie weit die Clip-Box über die Bounding Box der Sites hinausgeht (Meter).
    pub clip_margin_m: f64,
    /// Abstand der Fernpunkte. `None` = doppelte maximale Spannweite der Sites.
    /// Muss mindestens so groß sein wie der größte Abstand Site -> Ecke der Clip-Box,
    /// sonst werden Randzellen abgeschnitten.
    pub far_point_radius: Option<f64>,
    /// Radius der Ersatzscheibe, wenn eine Zelle nach dem Clipping leer ist (Meter).
    pub fallback_radius_m: f64,
    pub fallback_segments: usize,
}

impl Default for VoronoiMapConfig {
    fn default() -> Self {
        Self {
            projection_epsg: DEFAULT_PROJECTION_EPSG,
            clip_margin_m: 2000.0,
            far_point_radius: None,
            fallback_radius_m: DEFAULT_FALLBACK_RADIUS,
            fallback_segments: DEFAULT_FALLBACK_SEGMENTS,
        }
    }
}

impl VoronoiMapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projection_epsg(mut self, epsg: u32) -> Self {
        self.projection_epsg = epsg;
        self
    }

    pub fn with_clip_margin(mut self, margin_m: f64) -> Self {
        self.clip_margin_m = margin_m;
        self
    }

    pub fn with_far_point_radius(mut self, radius: f64) -> Self {
        self.far_point_radius = Some(radius);
        self
    }

    pub fn with_fallback(mut self, radius_m: f64, segments: usize) -> Self {
        self.fallback_radius_m = radius_m;
        self.fallback_segments = segments;
        self
    }

    pub fn projection(&self) -> MathResult<UtmProjection> {
        UtmProjection::from_epsg(self.projection_epsg)
    }

    pub fn validate(&self) -> MathResult<()> {
        self.projection()?;
        if !self.clip_margin_m.is_finite() || self.clip_margin_m < 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "Clip margin must be finite and non-negative, got {}",
                    self.clip_margin_m
                ),
            });
        }
        if let Some(radius) = self.far_point_radius {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(MathError::InvalidConfiguration {
                    message: format!("Far point radius must be positive, got {}", radius),
                });
            }
        }
        if !self.fallback_radius_m.is_finite() || self.fallback_radius_m <= 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: "Fallback disk radius must be positive.".to_string(),
            });
        }
        if self.fallback_segments < 3 {
            return Err(MathError::InvalidConfiguration {
                message: "Fallback disk needs at least 3 segments.".to_string(),
            });
        }
        Ok(())
    }
}
