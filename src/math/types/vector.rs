// src/math/types/vector.rs

use super::{Point2D, SpadePoint};
use geo::{Coord, LineString, Polygon as GeoPolygon};

// --- Konvertierungsfunktionen ---

/// Konvertiert einen Punkt in einen Spade Point.
pub fn to_spade_point(point: Point2D) -> SpadePoint {
    SpadePoint::new(point.x, point.y)
}

/// Konvertiert einen Spade Point zurück.
pub fn from_spade_point(point: SpadePoint) -> Point2D {
    Point2D::new(point.x, point.y)
}

/// Baut aus einem offenen Ring (erste Ecke nicht wiederholt) ein `geo::Polygon`.
/// `geo` schließt den Ring selbst.
pub fn to_geo_polygon(ring: &[Point2D]) -> GeoPolygon<f64> {
    let exterior: LineString<f64> = ring.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    GeoPolygon::new(exterior, Vec::new())
}

/// Liefert die Koordinaten eines `geo`-Rings (geschlossen, letzte Ecke = erste Ecke).
pub fn from_geo_ring(ring: &LineString<f64>) -> Vec<Point2D> {
    ring.coords().map(|c| Point2D::new(c.x, c.y)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_polygon_is_closed() {
        let ring = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(0.0, 1.0),
        ];
        let polygon = to_geo_polygon(&ring);
        let coords = from_geo_ring(polygon.exterior());
        assert_eq!(coords.len(), 4);
        assert_eq!(coords.first(), coords.last());
    }

    #[test]
    fn test_spade_conversion() {
        let point = Point2D::new(1.5, -2.0);
        assert_eq!(from_spade_point(to_spade_point(point)), point);
    }
}
