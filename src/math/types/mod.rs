// src/math/types/mod.rs
pub mod bounds;
pub mod vector;

pub use bounds::*;
pub use vector::*;

// Re-export häufig verwendete externe Typen
pub use glam::DVec2;
pub use spade::Point2;

// Einheitliche Typen für das gesamte Modul.
// Planare metrische Koordinaten (z.B. UTM) brauchen f64, Nordwerte liegen bei ~4e6.
pub type Point2D = DVec2;
pub type SpadePoint = Point2<f64>;
