// src/math/point_distribution/voronoi/builder.rs

use crate::math::{
    error::{MathError, MathResult},
    geometry::projection::{LatLon, UtmProjection},
    point_distribution::voronoi::{
        clipping::{ClippedRegion, RegionClipper, required_radius},
        config::VoronoiMapConfig,
        finite::FiniteVoronoiBuilder,
        voronoi_diagram::VoronoiExtractor,
    },
    types::{Bounds2D, Point2D},
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Ein benannter geografischer Punkt (WGS84, Grad).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Landmark {
    pub fn new(label: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            label: Some(label.into()),
        }
    }

    pub fn unlabeled(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            label: None,
        }
    }

    pub fn lat_lon(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}

/// Ergebnis von [`VoronoiMapBuilder::generate`]: eine beschnittene Zelle pro Landmark.
#[derive(Debug, Clone)]
pub struct VoronoiMap {
    pub labels: Vec<String>,
    /// Projizierte Sites (Meter).
    pub sites: Vec<Point2D>,
    /// Gleiche Reihenfolge wie `labels` und `sites`.
    pub cells: Vec<ClippedRegion>,
    pub bounds: Bounds2D,
    pub projection: UtmProjection,
    pub far_point_radius: f64,
}

impl VoronoiMap {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn label(&self, site: usize) -> Option<&str> {
        self.labels.get(site).map(String::as_str)
    }

    pub fn fallback_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.used_fallback).count()
    }
}

/// Erzeugt aus geografischen Punkten eine beschnittene Voronoi-Karte.
/// Orchestriert die Schritte: Projektion, Voronoi-Extraktion, Schließen offener
/// Regionen, Bestimmung der Clip-Box und Clipping.
pub struct VoronoiMapBuilder {
    config: VoronoiMapConfig,
    projection: UtmProjection,
}

impl VoronoiMapBuilder {
    pub fn new(config: VoronoiMapConfig) -> MathResult<Self> {
        config.validate()?;
        let projection = config.projection()?;
        Ok(Self { config, projection })
    }

    pub fn config(&self) -> &VoronoiMapConfig {
        &self.config
    }

    pub fn generate(&self, landmarks: &[Landmark]) -> MathResult<VoronoiMap> {
        let step_description =
            |step_name: &str| format!("VoronoiMapBuilder::generate - Step: {}", step_name);

        if landmarks.len() < 3 {
            return Err(MathError::InsufficientPoints {
                expected: 3,
                actual: landmarks.len(),
            });
        }

        // 1. Projektion in metrische Koordinaten
        let step_name = "Projection";
        let sites = landmarks
            .iter()
            .map(|landmark| self.projection.project(landmark.lat_lon()))
            .collect::<MathResult<Vec<Point2D>>>()?;
        let labels: Vec<String> = landmarks
            .iter()
            .enumerate()
            .map(|(i, landmark)| landmark.label.clone().unwrap_or_else(|| format!("P{}", i + 1)))
            .collect();
        debug!(
            "{:?}: Projected {} landmarks to EPSG:{}",
            step_description(step_name),
            sites.len(),
            self.projection.epsg()
        );

        // 2. Voronoi-Diagramm
        let step_name = "VoronoiExtraction";
        let diagram = VoronoiExtractor::from_sites(&sites)?;
        debug!(
            "{:?}: {} Voronoi vertices, {} ridges",
            step_description(step_name),
            diagram.vertices.len(),
            diagram.ridges.len()
        );

        // 3. Offene Regionen schließen
        let step_name = "FiniteRegions";
        let regions = FiniteVoronoiBuilder::new()
            .with_optional_radius(self.config.far_point_radius)
            .build(&sites, &diagram)
            .map_err(|e| match e {
                MathError::InconsistentDiagram { .. } | MathError::UnclosableRegion { .. } => e,
                other => MathError::GeometricFailure {
                    operation: format!("{} - {}", step_description(step_name), other),
                },
            })?;
        debug!(
            "{:?}: radius {:.1}, {} far points",
            step_description(step_name),
            regions.radius,
            regions.far_point_count
        );

        // 4. Clip-Box und Radius-Prüfung
        let step_name = "Bounds";
        let bounds = Bounds2D::around_sites(&sites, self.config.clip_margin_m)?;
        let needed = required_radius(&sites, &bounds);
        if regions.radius < needed {
            warn!(
                "{:?}: far point radius {:.1} is smaller than the distance {:.1} from a site to the clip box corner; border cells will be truncated.",
                step_description(step_name),
                regions.radius,
                needed
            );
        }

        // 5. Clipping
        let cells = RegionClipper::new(bounds)
            .with_fallback(self.config.fallback_radius_m, self.config.fallback_segments)
            .clip(&regions, &sites)?;

        let map = VoronoiMap {
            labels,
            sites,
            cells,
            bounds,
            projection: self.projection,
            far_point_radius: regions.radius,
        };
        info!(
            "VoronoiMapBuilder: {} cells within {} ({} fallbacks)",
            map.len(),
            map.bounds,
            map.fallback_count()
        );
        Ok(map)
    }
}

/// Die fünf Kyoto-Sehenswürdigkeiten, mit denen die Kommandozeile ohne Eingabedatei arbeitet.
pub fn kyoto_landmarks() -> Vec<Landmark> {
    vec![
        Landmark::new("Kiyomizu-dera", 34.9949, 135.7850),
        Landmark::new("Kinkaku-ji", 35.0394, 135.7292),
        Landmark::new("Arashiyama", 35.0094, 135.6667),
        Landmark::new("Gion", 35.0037, 135.7788),
        Landmark::new("Kyoto Station", 34.9858, 135.7588),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Area, BoundingRect, Intersects, Point};

    #[test]
    fn test_kyoto_map() {
        let builder = VoronoiMapBuilder::new(VoronoiMapConfig::default()).unwrap();
        let map = builder.generate(&kyoto_landmarks()).unwrap();

        assert_eq!(map.len(), 5);
        assert_eq!(map.fallback_count(), 0);
        assert_eq!(map.label(4), Some("Kyoto Station"));
        assert!(map.far_point_radius >= required_radius(&map.sites, &map.bounds));

        // Das Overlay rundet, Zellen dürfen minimal über die Box hinausragen
        let tolerance = 1e-6 * map.bounds.width().max(map.bounds.height());
        let mut total_area = 0.0;
        for (i, cell) in map.cells.iter().enumerate() {
            assert_eq!(cell.site, i);
            let rect = cell.geometry.bounding_rect().unwrap();
            assert!(rect.min().x >= map.bounds.min.x - tolerance);
            assert!(rect.min().y >= map.bounds.min.y - tolerance);
            assert!(rect.max().x <= map.bounds.max.x + tolerance);
            assert!(rect.max().y <= map.bounds.max.y + tolerance);
            let site = map.sites[i];
            assert!(map.bounds.contains_point(site));
            assert!(cell.geometry.intersects(&Point::new(site.x, site.y)));
            total_area += cell.geometry.unsigned_area();
        }
        let box_area = map.bounds.width() * map.bounds.height();
        assert!((total_area - box_area).abs() / box_area < 1e-6);
    }

    #[test]
    fn test_missing_labels_are_numbered() {
        let mut landmarks = kyoto_landmarks();
        landmarks[1].label = None;
        landmarks[3] = Landmark::unlabeled(landmarks[3].lat, landmarks[3].lon);

        let map = VoronoiMapBuilder::new(VoronoiMapConfig::default())
            .unwrap()
            .generate(&landmarks)
            .unwrap();
        assert_eq!(map.labels[1], "P2");
        assert_eq!(map.labels[3], "P4");
        assert_eq!(map.labels[0], "Kiyomizu-dera");
    }

    #[test]
    fn test_small_radius_still_produces_cells() {
        let config = VoronoiMapConfig::default().with_far_point_radius(100.0);
        let map = VoronoiMapBuilder::new(config)
            .unwrap()
            .generate(&kyoto_landmarks())
            .unwrap();
        assert_eq!(map.len(), 5);
        let box_area = map.bounds.width() * map.bounds.height();
        let total: f64 = map.cells.iter().map(|c| c.area()).sum();
        assert!(total < box_area);
    }

    #[test]
    fn test_errors() {
        assert!(VoronoiMapBuilder::new(VoronoiMapConfig::default().with_clip_margin(-5.0)).is_err());

        let builder = VoronoiMapBuilder::new(VoronoiMapConfig::default()).unwrap();
        assert!(matches!(
            builder.generate(&kyoto_landmarks()[..2]),
            Err(MathError::InsufficientPoints { expected: 3, actual: 2 })
        ));

        let mut duplicated = kyoto_landmarks();
        duplicated.push(duplicated[0].clone());
        assert!(matches!(
            builder.generate(&duplicated),
            Err(MathError::DuplicateSite { .. })
        ));

        let mut invalid = kyoto_landmarks();
        invalid[2].lat = 120.0;
        assert!(matches!(
            builder.generate(&invalid),
            Err(MathError::Projection { .. })
        ));
    }
}
