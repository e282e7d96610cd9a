// src/math/point_distribution/voronoi/voronoi_diagram.rs

use crate::math::{
    error::{MathError, MathResult},
    types::{Point2D, SpadePoint, from_spade_point, to_spade_point},
    utils::{constants, simple_geometry},
};
use log::{debug, trace};
use spade::{DelaunayTriangulation, Triangulation};
use std::collections::HashMap;

/// Verweis auf eine Voronoi-Ecke. Ersetzt den Index `-1` für "im Unendlichen".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexRef {
    /// Index in die Eckentabelle des Diagramms.
    Finite(usize),
    /// Ende eines Strahls, der ins Unendliche läuft.
    AtInfinity,
}

impl VertexRef {
    pub fn finite(self) -> Option<usize> {
        match self {
            VertexRef::Finite(index) => Some(index),
            VertexRef::AtInfinity => None,
        }
    }

    pub fn is_at_infinity(self) -> bool {
        matches!(self, VertexRef::AtInfinity)
    }
}

/// Gemeinsame Kante zweier benachbarter Zellen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ridge {
    /// Die beiden Sites, deren Zellen sich diese Kante teilen.
    pub sites: [usize; 2],
    /// Endpunkte der Kante, einer oder beide können im Unendlichen liegen.
    pub vertices: [VertexRef; 2],
}

impl Ridge {
    pub fn new(site_a: usize, site_b: usize, v1: VertexRef, v2: VertexRef) -> Self {
        Self {
            sites: [site_a, site_b],
            vertices: [v1, v2],
        }
    }
}

/// Ein (möglicherweise offenes) planares Voronoi-Diagramm.
///
/// `regions[i]` gehört zu `sites[i]`. Offene Regionen enthalten mindestens ein
/// [`VertexRef::AtInfinity`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoronoiDiagram {
    pub sites: Vec<Point2D>,
    pub vertices: Vec<Point2D>,
    pub regions: Vec<Vec<VertexRef>>,
    pub ridges: Vec<Ridge>,
}

impl VoronoiDiagram {
    pub fn new(
        sites: Vec<Point2D>,
        vertices: Vec<Point2D>,
        regions: Vec<Vec<VertexRef>>,
        ridges: Vec<Ridge>,
    ) -> Self {
        Self {
            sites,
            vertices,
            regions,
            ridges,
        }
    }

    pub fn region(&self, site: usize) -> Option<&[VertexRef]> {
        self.regions.get(site).map(Vec::as_slice)
    }

    /// Alle Ridges, an denen `site` beteiligt ist.
    pub fn ridges_of(&self, site: usize) -> impl Iterator<Item = &Ridge> + '_ {
        self.ridges
            .iter()
            .filter(move |ridge| ridge.sites.contains(&site))
    }

    pub fn is_region_closed(&self, site: usize) -> bool {
        self.region(site)
            .is_some_and(|region| !region.is_empty() && !region.iter().any(|v| v.is_at_infinity()))
    }

    /// Prüft, dass alle Indizes in Regionen und Ridges gültig sind.
    pub fn validate(&self) -> MathResult<()> {
        if self.regions.len() != self.sites.len() {
            return Err(MathError::InconsistentDiagram {
                reason: format!(
                    "{} regions for {} sites",
                    self.regions.len(),
                    self.sites.len()
                ),
            });
        }
        let check_vertex = |vertex: VertexRef, context: &str| -> MathResult<()> {
            match vertex {
                VertexRef::Finite(index) if index >= self.vertices.len() => {
                    Err(MathError::InconsistentDiagram {
                        reason: format!(
                            "{} references vertex {} but only {} vertices exist",
                            context,
                            index,
                            self.vertices.len()
                        ),
                    })
                }
                _ => Ok(()),
            }
        };
        for (site, region) in self.regions.iter().enumerate() {
            for &vertex in region {
                check_vertex(vertex, &format!("region of site #{}", site))?;
            }
        }
        for (idx, ridge) in self.ridges.iter().enumerate() {
            if ridge.sites.iter().any(|&s| s >= self.sites.len()) || ridge.sites[0] == ridge.sites[1]
            {
                return Err(MathError::InconsistentDiagram {
                    reason: format!("ridge #{} has invalid sites {:?}", idx, ridge.sites),
                });
            }
            for &vertex in &ridge.vertices {
                check_vertex(vertex, &format!("ridge #{}", idx))?;
            }
        }
        Ok(())
    }
}

/// Erzeugt ein offenes Voronoi-Diagramm aus einer Delaunay-Triangulation (Spade).
pub struct VoronoiExtractor;

impl VoronoiExtractor {
    /// Trianguliert die Sites und liest daraus Ecken, Regionen und Ridges ab.
    ///
    /// Die Umkreismittelpunkte der inneren Dreiecke sind die Voronoi-Ecken. Fallen
    /// mehrere zusammen (kozirkuläre Punkte), werden sie zu einer Ecke verschmolzen.
    pub fn from_sites(sites: &[Point2D]) -> MathResult<VoronoiDiagram> {
        if sites.len() < 2 {
            return Err(MathError::InsufficientPoints {
                expected: 2,
                actual: sites.len(),
            });
        }

        let mut triangulation: DelaunayTriangulation<SpadePoint> = DelaunayTriangulation::new();
        for (index, site) in sites.iter().enumerate() {
            let handle = triangulation
                .insert(to_spade_point(*site))
                .map_err(|e| MathError::TriangulationFailed {
                    reason: format!("Spade rejected site #{} at {:?}: {:?}", index, site, e),
                })?;
            // Spade vergibt Indizes fortlaufend; ein kleinerer Index heißt Duplikat.
            if handle.index() != index {
                return Err(MathError::DuplicateSite {
                    index,
                    existing: handle.index(),
                    x: site.x,
                    y: site.y,
                });
            }
        }
        debug!(
            "VoronoiExtractor: Delaunay triangulation with {} vertices and {} inner faces.",
            triangulation.num_vertices(),
            triangulation.num_inner_faces()
        );

        // Umkreismittelpunkte -> Voronoi-Ecken (mit Verschmelzung)
        let mut vertices: Vec<Point2D> = Vec::with_capacity(triangulation.num_inner_faces());
        let mut vertex_by_key: HashMap<(i64, i64), usize> = HashMap::new();
        let mut vertex_by_face: HashMap<usize, usize> = HashMap::new();
        for face in triangulation.inner_faces() {
            let circumcenter = from_spade_point(face.circumcenter());
            let key = quantize(circumcenter);
            let vertex_id = *vertex_by_key.entry(key).or_insert_with(|| {
                vertices.push(circumcenter);
                vertices.len() - 1
            });
            vertex_by_face.insert(face.fix().index(), vertex_id);
        }
        if vertices.len() < triangulation.num_inner_faces() {
            trace!(
                "VoronoiExtractor: merged {} co-circular circumcenters.",
                triangulation.num_inner_faces() - vertices.len()
            );
        }

        // Erwartet den Index eines inneren Dreiecks, `None` steht für das äußere Face.
        let vertex_of_face = |inner_face: Option<usize>| -> VertexRef {
            inner_face
                .and_then(|index| vertex_by_face.get(&index).copied())
                .map_or(VertexRef::AtInfinity, VertexRef::Finite)
        };

        // Ridges: eine pro Delaunay-Kante
        let mut ridges = Vec::with_capacity(triangulation.num_undirected_edges());
        for edge in triangulation.undirected_edges() {
            let [a, b] = edge.vertices();
            let directed = edge.as_directed();
            let v1 = vertex_of_face(directed.face().as_inner().map(|f| f.fix().index()));
            let v2 = vertex_of_face(directed.rev().face().as_inner().map(|f| f.fix().index()));
            if let (VertexRef::Finite(i), VertexRef::Finite(j)) = (v1, v2) {
                if i == j {
                    // Kante der Länge Null, die Zellen berühren sich nur in einem Punkt
                    continue;
                }
            }
            ridges.push(Ridge::new(a.fix().index(), b.fix().index(), v1, v2));
        }

        // Regionen: Ecken der angrenzenden Dreiecke, nach Winkel um die Site sortiert
        let mut regions = Vec::with_capacity(sites.len());
        for vertex in triangulation.vertices() {
            let site = from_spade_point(vertex.position());
            let mut is_open = false;
            let mut finite: Vec<usize> = Vec::new();
            for out_edge in vertex.out_edges() {
                match vertex_of_face(out_edge.face().as_inner().map(|f| f.fix().index())) {
                    VertexRef::Finite(id) => {
                        if !finite.contains(&id) {
                            finite.push(id);
                        }
                    }
                    VertexRef::AtInfinity => is_open = true,
                }
            }
            finite.sort_by(|&a, &b| {
                simple_geometry::compare_by_angle(site, vertices[a], vertices[b])
            });

            let mut region = Vec::with_capacity(finite.len() + 1);
            if is_open {
                region.push(VertexRef::AtInfinity);
            }
            region.extend(finite.into_iter().map(VertexRef::Finite));
            regions.push(region);
        }

        let diagram = VoronoiDiagram::new(sites.to_vec(), vertices, regions, ridges);
        debug!(
            "VoronoiExtractor: {} sites, {} vertices, {} ridges.",
            diagram.sites.len(),
            diagram.vertices.len(),
            diagram.ridges.len()
        );
        Ok(diagram)
    }
}

fn quantize(point: Point2D) -> (i64, i64) {
    (
        (point.x * constants::VERTEX_QUANTIZATION).round() as i64,
        (point.y * constants::VERTEX_QUANTIZATION).round() as i64,
    )
}
