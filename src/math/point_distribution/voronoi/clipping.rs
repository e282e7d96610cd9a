// src/math/point_distribution/voronoi/clipping.rs

use crate::math::{
    error::{MathError, MathResult},
    point_distribution::voronoi::finite::FiniteRegions,
    types::{Bounds2D, Point2D, to_geo_polygon},
    utils::{constants, simple_geometry},
};
use geo::{Area, BooleanOps, MultiPolygon};
use log::{debug, warn};

/// Standard-Radius der Ersatzscheibe (in Einheiten der Sites, bei UTM also Meter).
pub const DEFAULT_FALLBACK_RADIUS: f64 = 10.0;
/// Ecken der Ersatzscheibe.
pub const DEFAULT_FALLBACK_SEGMENTS: usize = 64;

/// Eine auf die Bounding Box beschnittene Zelle.
#[derive(Debug, Clone, PartialEq)]
pub struct ClippedRegion {
    pub site: usize,
    pub geometry: MultiPolygon<f64>,
    /// `true`, wenn der Schnitt leer oder entartet war und die Ersatzscheibe verwendet wurde.
    pub used_fallback: bool,
}

impl ClippedRegion {
    pub fn area(&self) -> f64 {
        self.geometry.unsigned_area()
    }
}

/// Schneidet endliche Voronoi-Zellen mit einer achsenparallelen Box.
///
/// Das Overlay von `geo` rundet Schnittpunkte; eine beschnittene Zelle kann daher minimal
/// außerhalb der Box liegen (bei UTM-Koordinaten etwa 1e-5 m).
#[derive(Debug, Clone)]
pub struct RegionClipper {
    bounds: Bounds2D,
    fallback_radius: f64,
    fallback_segments: usize,
}

impl RegionClipper {
    pub fn new(bounds: Bounds2D) -> Self {
        Self {
            bounds,
            fallback_radius: DEFAULT_FALLBACK_RADIUS,
            fallback_segments: DEFAULT_FALLBACK_SEGMENTS,
        }
    }

    pub fn with_fallback(mut self, radius: f64, segments: usize) -> Self {
        self.fallback_radius = radius;
        self.fallback_segments = segments.max(3);
        self
    }

    pub fn bounds(&self) -> &Bounds2D {
        &self.bounds
    }

    /// Eine Ausgabe pro Region, gleiche Reihenfolge wie `regions`.
    /// `sites` muss dieselbe Punktmenge sein, aus der `regions` gebaut wurde.
    pub fn clip(
        &self,
        regions: &FiniteRegions,
        sites: &[Point2D],
    ) -> MathResult<Vec<ClippedRegion>> {
        if sites.len() != regions.len() {
            return Err(MathError::InconsistentDiagram {
                reason: format!(
                    "{} regions cannot be clipped with {} sites",
                    regions.len(),
                    sites.len()
                ),
            });
        }
        let clip_polygon = self.bounds.to_geo_rect().to_polygon();
        let mut fallback_count = 0;

        let clipped = regions
            .iter()
            .map(|region| {
                let site = sites.get(region.site).copied().ok_or_else(|| {
                    MathError::InconsistentDiagram {
                        reason: format!("region references unknown site #{}", region.site),
                    }
                })?;
                let cell = to_geo_polygon(&region.vertices);
                let intersection = cell.intersection(&clip_polygon);
                let clipped = if is_usable(&intersection) {
                    ClippedRegion {
                        site: region.site,
                        geometry: intersection,
                        used_fallback: false,
                    }
                } else {
                    fallback_count += 1;
                    warn!(
                        "RegionClipper: cell of site #{} is empty after clipping to {}, using a disk of radius {}.",
                        region.site, self.bounds, self.fallback_radius
                    );
                    ClippedRegion {
                        site: region.site,
                        geometry: self.fallback_disk(site),
                        used_fallback: true,
                    }
                };
                Ok(clipped)
            })
            .collect::<MathResult<Vec<ClippedRegion>>>()?;

        debug!(
            "RegionClipper: clipped {} regions to {}, {} fallbacks.",
            clipped.len(),
            self.bounds,
            fallback_count
        );
        Ok(clipped)
    }

    fn fallback_disk(&self, site: Point2D) -> MultiPolygon<f64> {
        let ring =
            simple_geometry::regular_polygon(site, self.fallback_radius, self.fallback_segments);
        MultiPolygon::new(vec![to_geo_polygon(&ring)])
    }
}

fn is_usable(geometry: &MultiPolygon<f64>) -> bool {
    !geometry.0.is_empty()
        && geometry.unsigned_area() > constants::EPSILON
        && geometry
            .0
            .iter()
            .flat_map(|polygon| polygon.exterior().coords())
            .all(|c| c.x.is_finite() && c.y.is_finite())
}

/// Mindestradius der Fernpunkte, damit keine Zelle innerhalb von `bounds` abgeschnitten wird:
/// der größte Abstand einer Site zu einer Ecke der Box.
pub fn required_radius(sites: &[Point2D], bounds: &Bounds2D) -> f64 {
    sites
        .iter()
        .map(|&site| bounds.max_corner_distance(site))
        .fold(0.0, f64::max)
}

/// Prüft `radius >= required_radius(sites, bounds)`. Wird nicht automatisch korrigiert.
pub fn radius_covers_bounds(radius: f64, sites: &[Point2D], bounds: &Bounds2D) -> bool {
    radius >= required_radius(sites, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point_distribution::voronoi::{
        finite::FiniteVoronoiBuilder, voronoi_diagram::VoronoiExtractor,
    };
    use approx::assert_relative_eq;
    use geo::{BoundingRect, Intersects, Point};

    fn five_sites() -> Vec<Point2D> {
        vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(0.0, 10.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(5.0, 5.0),
        ]
    }

    #[test]
    fn test_clipped_cells_stay_inside_bounds() {
        let sites = five_sites();
        let diagram = VoronoiExtractor::from_sites(&sites).unwrap();
        let regions = FiniteVoronoiBuilder::new().build(&sites, &diagram).unwrap();
        let bounds = Bounds2D::around_sites(&sites, 2.0).unwrap();

        let clipped = RegionClipper::new(bounds).clip(&regions, &sites).unwrap();
        // Das Overlay rundet, Toleranz relativ zur Boxgröße
        let tolerance = 1e-6 * bounds.width().max(bounds.height());

        assert_eq!(clipped.len(), sites.len());
        let mut total_area = 0.0;
        for cell in &clipped {
            assert!(!cell.used_fallback);
            let rect = cell.geometry.bounding_rect().unwrap();
            assert!(rect.min().x >= bounds.min.x - tolerance);
            assert!(rect.min().y >= bounds.min.y - tolerance);
            assert!(rect.max().x <= bounds.max.x + tolerance);
            assert!(rect.max().y <= bounds.max.y + tolerance);
            let site = sites[cell.site];
            assert!(cell.geometry.intersects(&Point::new(site.x, site.y)));
            total_area += cell.area();
        }
        // Die Zellen überdecken die Box lückenlos
        assert_relative_eq!(total_area, 14.0 * 14.0, epsilon = 1e-6);
    }

    #[test]
    fn test_empty_intersection_uses_fallback_disk() {
        let sites = five_sites();
        let diagram = VoronoiExtractor::from_sites(&sites).unwrap();
        let regions = FiniteVoronoiBuilder::new().build(&sites, &diagram).unwrap();
        // Box, die nur die Zelle oben rechts schneidet
        let bounds = Bounds2D::from_points(Point2D::new(8.0, 8.0), Point2D::new(20.0, 20.0));

        let clipped = RegionClipper::new(bounds)
            .with_fallback(1.5, 16)
            .clip(&regions, &sites)
            .unwrap();

        let center_cell = &clipped[4];
        assert!(center_cell.used_fallback);
        assert_eq!(center_cell.geometry.0.len(), 1);
        // 16 Ecken + schließende Ecke
        assert_eq!(center_cell.geometry.0[0].exterior().0.len(), 17);
        for coord in center_cell.geometry.0[0].exterior().coords() {
            let d = Point2D::new(coord.x, coord.y).distance(sites[4]);
            assert_relative_eq!(d, 1.5, epsilon = 1e-9);
        }
        assert!(!clipped[3].used_fallback);
        for site in [0, 1, 2] {
            assert!(clipped[site].used_fallback);
        }
    }

    #[test]
    fn test_required_radius() {
        let sites = vec![Point2D::new(0.0, 0.0), Point2D::new(4.0, 0.0)];
        let bounds = Bounds2D::from_points(Point2D::new(-3.0, -4.0), Point2D::new(4.0, 4.0));
        // Site (0,0) zur Ecke (4,4) bzw. (4,-4): sqrt(32); Site (4,0) zur Ecke (-3,±4): sqrt(65)
        assert_relative_eq!(required_radius(&sites, &bounds), 65f64.sqrt());
        assert!(radius_covers_bounds(9.0, &sites, &bounds));
        assert!(!radius_covers_bounds(8.0, &sites, &bounds));
    }

    /// Zu kleiner Radius: die Zelle erreicht den Rand der Box nicht.
    #[test]
    fn test_too_small_radius_truncates_cells() {
        let sites = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(0.0, 10.0),
        ];
        let diagram = VoronoiExtractor::from_sites(&sites).unwrap();
        let bounds = Bounds2D::around_sites(&sites, 50.0).unwrap();
        let radius = 1.0;
        assert!(!radius_covers_bounds(radius, &sites, &bounds));

        let regions = FiniteVoronoiBuilder::new()
            .with_radius(radius)
            .build(&sites, &diagram)
            .unwrap();
        let clipped = RegionClipper::new(bounds).clip(&regions, &sites).unwrap();

        // Zelle von (0,0) müsste bis an den linken und unteren Rand reichen
        let rect = clipped[0].geometry.bounding_rect().unwrap();
        assert!(rect.min().x > bounds.min.x + 1.0);
        assert!(rect.min().y > bounds.min.y + 1.0);
        // Mit 1.0 schließt die Zelle von (0,0) die eigene Site nicht mehr ein
        assert!(!clipped[0].geometry.intersects(&Point::new(0.0, 0.0)));

        // Mit ausreichendem Radius erreicht sie den Rand
        let safe_radius = required_radius(&sites, &bounds);
        let regions = FiniteVoronoiBuilder::new()
            .with_radius(safe_radius)
            .build(&sites, &diagram)
            .unwrap();
        let clipped = RegionClipper::new(bounds).clip(&regions, &sites).unwrap();
        let rect = clipped[0].geometry.bounding_rect().unwrap();
        let tolerance = 1e-6 * bounds.width().max(bounds.height());
        assert_relative_eq!(rect.min().x, bounds.min.x, epsilon = tolerance);
        assert_relative_eq!(rect.min().y, bounds.min.y, epsilon = tolerance);
    }

    #[test]
    fn test_site_count_must_match_regions() {
        let sites = five_sites();
        let diagram = VoronoiExtractor::from_sites(&sites).unwrap();
        let regions = FiniteVoronoiBuilder::new().build(&sites, &diagram).unwrap();
        let clipper = RegionClipper::new(Bounds2D::around_sites(&sites, 2.0).unwrap());

        assert!(matches!(
            clipper.clip(&regions, &sites[..3]),
            Err(MathError::InconsistentDiagram { .. })
        ));
        assert!(matches!(
            clipper.clip(&regions, &[]),
            Err(MathError::InconsistentDiagram { .. })
        ));
    }
}
