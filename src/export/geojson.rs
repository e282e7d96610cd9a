// src/export/geojson.rs

use crate::export::{ExportError, ExportResult};
use crate::math::{
    error::MathResult, geometry::projection::UtmProjection,
    point_distribution::voronoi::VoronoiMap, types::Point2D,
};
use geo::{LineString, Polygon};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Position im GeoJSON-Format: `[lon, lat]`.
pub type Position = [f64; 2];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn to_json(&self) -> ExportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to_path(&self, path: impl AsRef<Path>) -> ExportResult<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ExportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!(
            "GeoJSON '{}' written with {} features.",
            path.display(),
            self.features.len()
        );
        Ok(())
    }
}

/// Wandelt jede Zelle der Karte in ein Feature mit geografischen Koordinaten um.
pub fn to_feature_collection(map: &VoronoiMap) -> ExportResult<FeatureCollection> {
    if map.is_empty() {
        return Err(ExportError::EmptyMap);
    }

    let features = map
        .cells
        .iter()
        .map(|cell| {
            let mut polygons = cell
                .geometry
                .0
                .iter()
                .map(|polygon| polygon_rings(polygon, &map.projection))
                .collect::<MathResult<Vec<_>>>()?;

            let geometry = if polygons.len() == 1 {
                Geometry::Polygon(polygons.remove(0))
            } else {
                Geometry::MultiPolygon(polygons)
            };
            let label = map
                .label(cell.site)
                .map(str::to_string)
                .unwrap_or_else(|| format!("P{}", cell.site + 1));

            Ok(Feature {
                properties: FeatureProperties { label },
                geometry,
            })
        })
        .collect::<ExportResult<Vec<_>>>()?;

    Ok(FeatureCollection { features })
}

fn polygon_rings(polygon: &Polygon<f64>, projection: &UtmProjection) -> MathResult<Vec<Vec<Position>>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| ring_positions(ring, projection))
        .collect()
}

/// Geschlossener Ring: erste und letzte Position sind identisch.
fn ring_positions(ring: &LineString<f64>, projection: &UtmProjection) -> MathResult<Vec<Position>> {
    let mut positions = ring
        .coords()
        .map(|c| {
            let coords = projection.unproject(Point2D::new(c.x, c.y))?;
            Ok([coords.lon, coords.lat])
        })
        .collect::<MathResult<Vec<Position>>>()?;
    if let (Some(&first), Some(&last)) = (positions.first(), positions.last()) {
        if first != last {
            positions.push(first);
        }
    }
    Ok(positions)
}
