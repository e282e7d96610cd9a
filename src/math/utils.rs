// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON: f64 = 1e-10;
    pub const EPSILON_SQUARED: f64 = EPSILON * EPSILON; // Für Vergleiche mit Längen
    /// Raster für das Zusammenführen nahezu identischer Voronoi-Ecken (1e-6 Einheiten).
    pub const VERTEX_QUANTIZATION: f64 = 1e6;
    pub const TAU: f64 = std::f64::consts::TAU;
}

/// Vergleichsfunktionen mit Toleranz
pub mod comparison {
    /// Prüft ob zwei Floats mit custom Toleranz gleich sind
    pub fn nearly_equal_eps(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }
}

/// Geometrische Hilfsfunktionen (einfach, ohne komplexe Strukturen)
pub mod simple_geometry {
    use glam::DVec2;
    use std::cmp::Ordering;

    /// Arithmetisches Mittel einer Punktmenge. `None` für leere Eingaben.
    pub fn centroid(points: &[DVec2]) -> Option<DVec2> {
        if points.is_empty() {
            return None;
        }
        let sum = points.iter().fold(DVec2::ZERO, |acc, p| acc + *p);
        Some(sum / points.len() as f64)
    }

    /// Berechnet das Kreuzprodukt zweier 2D-Vektoren (Skalar)
    pub fn cross_product_2d(a: DVec2, b: DVec2) -> f64 {
        a.x * b.y - a.y * b.x
    }

    /// Berechnet den Winkel eines 2D-Vektors
    pub fn vector_angle(v: DVec2) -> f64 {
        v.y.atan2(v.x)
    }

    /// Vorzeichenbehaftete Fläche (Shoelace). Positiv bei CCW-Reihenfolge.
    pub fn signed_area(vertices: &[DVec2]) -> f64 {
        if vertices.len() < 3 {
            return 0.0;
        }
        let mut area_sum = 0.0;
        for i in 0..vertices.len() {
            let p1 = vertices[i];
            let p2 = vertices[(i + 1) % vertices.len()];
            area_sum += cross_product_2d(p1, p2);
        }
        0.5 * area_sum
    }

    /// Vergleicht zwei Punkte nach ihrem Winkel um `origin`.
    pub fn compare_by_angle(origin: DVec2, a: DVec2, b: DVec2) -> Ordering {
        let angle_a = vector_angle(a - origin);
        let angle_b = vector_angle(b - origin);
        angle_a.total_cmp(&angle_b)
    }

    /// Punkt-in-Polygon inklusive Rand (Kreuzprodukt-Test, nur für konvexe Polygone).
    pub fn convex_polygon_contains(vertices: &[DVec2], point: DVec2, tolerance: f64) -> bool {
        if vertices.len() < 3 {
            return false;
        }
        let orientation = signed_area(vertices).signum();
        vertices.iter().enumerate().all(|(i, &a)| {
            let b = vertices[(i + 1) % vertices.len()];
            let edge = b - a;
            let side = cross_product_2d(edge, point - a) * orientation;
            side >= -tolerance * edge.length().max(1.0)
        })
    }

    /// Regelmäßiges n-Eck um `center` als Näherung einer Kreisscheibe (CCW).
    pub fn regular_polygon(center: DVec2, radius: f64, segments: usize) -> Vec<DVec2> {
        let segments = segments.max(3);
        (0..segments)
            .map(|i| {
                let angle = super::constants::TAU * i as f64 / segments as f64;
                center + DVec2::new(angle.cos(), angle.sin()) * radius
            })
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::simple_geometry::*;
    use glam::DVec2;
    use std::cmp::Ordering;

    #[test]
    fn test_signed_area_orientation() {
        let ccw = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(2.0, 2.0),
            DVec2::new(0.0, 2.0),
        ];
        assert_eq!(signed_area(&ccw), 4.0);

        let cw: Vec<DVec2> = ccw.iter().rev().copied().collect();
        assert_eq!(signed_area(&cw), -4.0);
    }

    #[test]
    fn test_compare_by_angle() {
        let origin = DVec2::ZERO;
        assert_eq!(
            compare_by_angle(origin, DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0)),
            Ordering::Less
        );
        // atan2 liefert (-π, π], also liegt -y vor +x
        assert_eq!(
            compare_by_angle(origin, DVec2::new(1.0, 0.0), DVec2::new(0.0, -1.0)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_convex_polygon_contains() {
        let triangle = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(0.0, 4.0),
        ];
        assert!(convex_polygon_contains(&triangle, DVec2::new(1.0, 1.0), 1e-9));
        assert!(convex_polygon_contains(&triangle, DVec2::new(2.0, 0.0), 1e-9));
        assert!(!convex_polygon_contains(&triangle, DVec2::new(3.0, 3.0), 1e-9));
    }

    #[test]
    fn test_regular_polygon() {
        let disk = regular_polygon(DVec2::new(5.0, 5.0), 10.0, 64);
        assert_eq!(disk.len(), 64);
        for p in &disk {
            approx::assert_relative_eq!(p.distance(DVec2::new(5.0, 5.0)), 10.0, epsilon = 1e-9);
        }
        assert!(signed_area(&disk) > 0.0);
    }
}
