// src/math/point_distribution/voronoi/finite.rs

use crate::math::{
    error::{MathError, MathResult},
    point_distribution::voronoi::voronoi_diagram::{VertexRef, VoronoiDiagram},
    types::{Bounds2D, Point2D},
    utils::{constants, simple_geometry},
};
use log::{debug, trace};
use std::collections::{BTreeMap, BTreeSet};

/// Eine Ridge aus Sicht einer ihrer beiden Sites.
#[derive(Debug, Clone, Copy)]
struct IncidentRidge {
    neighbor: usize,
    vertices: [VertexRef; 2],
}

/// Eckentabelle eines einzelnen Aufrufs: Kopie der Diagramm-Ecken plus synthetische
/// Fernpunkte mit fortlaufenden IDs. Wird am Ende des Aufrufs verworfen.
struct ExtendedVertexTable {
    vertices: Vec<Point2D>,
    base_len: usize,
}

impl ExtendedVertexTable {
    fn new(base: &[Point2D]) -> Self {
        Self {
            vertices: base.to_vec(),
            base_len: base.len(),
        }
    }

    fn push_far_point(&mut self, point: Point2D) -> usize {
        self.vertices.push(point);
        self.vertices.len() - 1
    }

    fn get(&self, id: usize) -> Point2D {
        self.vertices[id]
    }

    fn far_point_count(&self) -> usize {
        self.vertices.len() - self.base_len
    }
}

/// Geschlossenes Polygon einer Site.
#[derive(Debug, Clone, PartialEq)]
pub struct FiniteRegion {
    /// Index der Site in der Eingabe.
    pub site: usize,
    /// Offener Ring (erste Ecke wird nicht wiederholt).
    pub vertices: Vec<Point2D>,
    /// `true`, wenn die Region im Diagramm unbeschränkt war und mit Fernpunkten geschlossen wurde.
    pub was_unbounded: bool,
}

/// Ergebnis von [`FiniteVoronoiBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct FiniteRegions {
    pub regions: Vec<FiniteRegion>,
    /// Schwerpunkt der Sites, Referenz für die Ausrichtung der Fernpunkte.
    pub center: Point2D,
    /// Abstand der Fernpunkte von ihren Ankern.
    pub radius: f64,
    pub far_point_count: usize,
}

impl FiniteRegions {
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FiniteRegion> {
        self.regions.iter()
    }

    pub fn polygons(&self) -> Vec<Vec<Point2D>> {
        self.regions.iter().map(|r| r.vertices.clone()).collect()
    }
}

/// Schließt die offenen Zellen eines Voronoi-Diagramms zu endlichen Polygonen.
///
/// Jede Ridge mit genau einem Ende im Unendlichen bekommt einen Fernpunkt
/// `anker + radius * n`, wobei `n` senkrecht auf `p2 - p1` steht und vom Schwerpunkt
/// der Sites weg zeigt. Der Radius muss größer sein als jede spätere Clip-Region,
/// sonst werden Zellen stillschweigend abgeschnitten (siehe
/// [`radius_covers_bounds`](super::clipping::radius_covers_bounds)).
#[derive(Debug, Clone, Default)]
pub struct FiniteVoronoiBuilder {
    radius: Option<f64>,
}

impl FiniteVoronoiBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fester Radius statt `2 * max(Spannweite x, Spannweite y)`.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_optional_radius(mut self, radius: Option<f64>) -> Self {
        self.radius = radius;
        self
    }

    /// Standardradius: doppelte maximale Koordinatenspannweite der Sites.
    pub fn default_radius(sites: &[Point2D]) -> f64 {
        Bounds2D::from_points_iter(sites.iter().copied())
            .map(|bounds| 2.0 * bounds.width().max(bounds.height()))
            .unwrap_or(0.0)
    }

    pub fn build(&self, sites: &[Point2D], diagram: &VoronoiDiagram) -> MathResult<FiniteRegions> {
        let step_description =
            |step_name: &str| format!("FiniteVoronoiBuilder::build - Step: {}", step_name);

        if sites.len() < 2 {
            return Err(MathError::InsufficientPoints {
                expected: 2,
                actual: sites.len(),
            });
        }
        if diagram.sites.len() != sites.len() {
            return Err(MathError::InconsistentDiagram {
                reason: format!(
                    "diagram was built for {} sites, got {}",
                    diagram.sites.len(),
                    sites.len()
                ),
            });
        }
        diagram.validate()?;

        // 1. Zentrum und Radius
        let center = simple_geometry::centroid(sites).unwrap_or(Point2D::ZERO);
        let radius = self.radius.unwrap_or_else(|| Self::default_radius(sites));
        if !radius.is_finite() || radius <= 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!("Far point radius must be finite and positive, got {}", radius),
            });
        }
        debug!(
            "{}: center {:?}, radius {}",
            step_description("CenterAndRadius"),
            center,
            radius
        );

        // 2. Adjazenz: Site -> alle angrenzenden Ridges
        let mut incident: BTreeMap<usize, Vec<IncidentRidge>> = BTreeMap::new();
        for ridge in &diagram.ridges {
            let [p1, p2] = ridge.sites;
            incident.entry(p1).or_default().push(IncidentRidge {
                neighbor: p2,
                vertices: ridge.vertices,
            });
            incident.entry(p2).or_default().push(IncidentRidge {
                neighbor: p1,
                vertices: ridge.vertices,
            });
        }

        // 3. Regionen schließen
        let mut table = ExtendedVertexTable::new(&diagram.vertices);
        let mut regions = Vec::with_capacity(sites.len());
        for (site, region) in diagram.regions.iter().enumerate() {
            let is_open = region.iter().any(|v| v.is_at_infinity());
            if !is_open {
                if region.len() < 3 {
                    return Err(MathError::UnclosableRegion {
                        site,
                        vertex_count: region.len(),
                    });
                }
                let vertices = region
                    .iter()
                    .filter_map(|v| v.finite())
                    .map(|id| table.get(id))
                    .collect();
                regions.push(FiniteRegion {
                    site,
                    vertices,
                    was_unbounded: false,
                });
                continue;
            }

            let mut vertex_ids: BTreeSet<usize> =
                region.iter().filter_map(|v| v.finite()).collect();
            let ridges = incident.get(&site).map(Vec::as_slice).unwrap_or(&[]);
            for ridge in ridges {
                let anchor = match ridge.vertices {
                    [VertexRef::Finite(_), VertexRef::Finite(_)] => continue,
                    [VertexRef::AtInfinity, VertexRef::AtInfinity] => continue,
                    [VertexRef::Finite(a), VertexRef::AtInfinity]
                    | [VertexRef::AtInfinity, VertexRef::Finite(a)] => a,
                };
                let direction =
                    outward_normal(sites[site], sites[ridge.neighbor], center).ok_or_else(
                        || MathError::GeometricFailure {
                            operation: format!(
                                "{}: sites #{} and #{} coincide, ridge has no direction",
                                step_description("FarPoints"),
                                site,
                                ridge.neighbor
                            ),
                        },
                    )?;
                let far_point = table.get(anchor) + direction * radius;
                let far_id = table.push_far_point(far_point);
                trace!(
                    "{}: site #{} anchor {} -> far point {} at {:?}",
                    step_description("FarPoints"),
                    site,
                    anchor,
                    far_id,
                    far_point
                );
                vertex_ids.insert(anchor);
                vertex_ids.insert(far_id);
            }

            if vertex_ids.len() < 3 {
                return Err(MathError::UnclosableRegion {
                    site,
                    vertex_count: vertex_ids.len(),
                });
            }

            let mut vertices: Vec<Point2D> = vertex_ids.into_iter().map(|id| table.get(id)).collect();
            sort_by_angle_around_centroid(&mut vertices);
            regions.push(FiniteRegion {
                site,
                vertices,
                was_unbounded: true,
            });
        }

        debug!(
            "{}: {} regions, {} synthetic far points",
            step_description("Done"),
            regions.len(),
            table.far_point_count()
        );
        Ok(FiniteRegions {
            regions,
            center,
            radius,
            far_point_count: table.far_point_count(),
        })
    }
}

/// Einheitsnormale der Ridge zwischen `p1` und `p2`, vom Zentrum weg orientiert.
fn outward_normal(p1: Point2D, p2: Point2D, center: Point2D) -> Option<Point2D> {
    let tangent = p2 - p1;
    if tangent.length_squared() < constants::EPSILON_SQUARED {
        return None;
    }
    let tangent = tangent.normalize();
    let normal = tangent.perp();
    let midpoint = (p1 + p2) * 0.5;
    if (midpoint - center).dot(normal) < 0.0 {
        Some(-normal)
    } else {
        Some(normal)
    }
}

/// Sortiert aufsteigend nach atan2 um den Schwerpunkt der Ecken (CCW).
fn sort_by_angle_around_centroid(vertices: &mut [Point2D]) {
    let Some(centroid) = simple_geometry::centroid(vertices) else {
        return;
    };
    vertices.sort_by(|a, b| {
        simple_geometry::compare_by_angle(centroid, *a, *b)
            .then_with(|| a.x.total_cmp(&b.x))
            .then_with(|| a.y.total_cmp(&b.y))
    });
}

/// Kurzform von `FiniteVoronoiBuilder::new().build(..)`, liefert nur die Polygone.
pub fn build_finite_regions(
    sites: &[Point2D],
    diagram: &VoronoiDiagram,
) -> MathResult<Vec<Vec<Point2D>>> {
    FiniteVoronoiBuilder::new()
        .build(sites, diagram)
        .map(|regions| regions.polygons())
}
