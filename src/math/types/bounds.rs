// src/math/types/bounds.rs

use crate::math::{error::*, types::*};
use geo::{Coord, Rect};
use std::fmt;

/// 2D Bounding Box (Axis-Aligned Bounding Box)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    pub min: Point2D,
    pub max: Point2D,
}

impl Bounds2D {
    /// Erstellt eine Bounding Box aus zwei beliebigen Punkten
    pub fn from_points(p1: Point2D, p2: Point2D) -> Self {
        Self {
            min: p1.min(p2),
            max: p1.max(p2),
        }
    }

    /// Erstellt eine Bounding Box die alle Punkte umschließt
    pub fn from_points_iter<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2D>,
    {
        let mut points_iter = points.into_iter();
        let first_point = points_iter.next()?;

        let mut bounds = Self {
            min: first_point,
            max: first_point,
        };
        for point in points_iter {
            bounds.expand_to_include_point(point);
        }

        Some(bounds)
    }

    /// Bounding Box der Sites, um `margin` in alle Richtungen erweitert.
    pub fn around_sites(sites: &[Point2D], margin: f64) -> MathResult<Self> {
        let bounds = Self::from_points_iter(sites.iter().copied()).ok_or(
            MathError::InsufficientPoints {
                expected: 1,
                actual: 0,
            },
        )?;
        if !margin.is_finite() || margin < 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!("Clip margin must be finite and non-negative, got {}", margin),
            });
        }
        let bounds = bounds.expand(margin);
        if !bounds.is_valid() {
            return Err(MathError::InvalidConfiguration {
                message: format!("Site coordinates must be finite, got {}", bounds),
            });
        }
        Ok(bounds)
    }

    /// Prüft ob die Bounding Box gültig ist
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x
            && self.min.y <= self.max.y
            && self.min.is_finite()
            && self.max.is_finite()
    }

    /// Breite der Bounding Box
    pub fn width(&self) -> f64 {
        (self.max.x - self.min.x).max(0.0)
    }

    /// Höhe der Bounding Box
    pub fn height(&self) -> f64 {
        (self.max.y - self.min.y).max(0.0)
    }

    /// Prüft ob ein Punkt in der Bounding Box liegt
    pub fn contains_point(&self, point: Point2D) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Erweitert die Bounding Box um einen Punkt
    pub fn expand_to_include_point(&mut self, point: Point2D) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Erweitert die Bounding Box um einen Margin
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min: self.min - Point2D::splat(margin),
            max: self.max + Point2D::splat(margin),
        }
    }

    /// Erzeugt die vier Eckpunkte der Bounding Box
    pub fn corners(&self) -> [Point2D; 4] {
        [
            self.min,                             // unten links
            Point2D::new(self.max.x, self.min.y), // unten rechts
            self.max,                             // oben rechts
            Point2D::new(self.min.x, self.max.y), // oben links
        ]
    }

    /// Größter Abstand von `point` zu einer der Ecken.
    pub fn max_corner_distance(&self, point: Point2D) -> f64 {
        self.corners()
            .iter()
            .map(|corner| corner.distance(point))
            .fold(0.0, f64::max)
    }

    /// Als `geo::Rect` für Boolesche Operationen.
    pub fn to_geo_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.min.x,
                y: self.min.y,
            },
            Coord {
                x: self.max.x,
                y: self.max.y,
            },
        )
    }
}

impl fmt::Display for Bounds2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bounds2D({:?} to {:?})", self.min, self.max)
    }
}
