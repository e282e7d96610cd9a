// src/math/geometry/projection.rs

use crate::math::{
    error::{MathError, MathResult},
    types::Point2D,
};

// WGS84-Ellipsoid
const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
const FLATTENING: f64 = 1.0 / 298.257_223_563;
const SCALE_FACTOR: f64 = 0.9996;
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Halbkugel einer UTM-Zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
}

/// Geografische Koordinate in Grad (WGS84).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Transversale Mercator-Projektion einer UTM-Zone (USGS-Reihenentwicklung nach Snyder).
///
/// Liefert (Rechtswert, Hochwert) in Metern. Innerhalb der Zone liegt der Fehler im
/// Millimeterbereich, außerhalb wächst er schnell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmProjection {
    zone: u8,
    hemisphere: Hemisphere,
}

impl UtmProjection {
    pub fn new(zone: u8, hemisphere: Hemisphere) -> MathResult<Self> {
        if !(1..=60).contains(&zone) {
            return Err(MathError::Projection {
                message: format!("UTM zone must be in 1..=60, got {}", zone),
            });
        }
        Ok(Self { zone, hemisphere })
    }

    /// WGS84 / UTM EPSG-Codes: 326xx (Nord) und 327xx (Süd).
    pub fn from_epsg(code: u32) -> MathResult<Self> {
        let (hemisphere, zone) = match code {
            32601..=32660 => (Hemisphere::North, code - 32600),
            32701..=32760 => (Hemisphere::South, code - 32700),
            _ => {
                return Err(MathError::Projection {
                    message: format!("EPSG:{} is not a WGS84 / UTM projection", code),
                });
            }
        };
        Self::new(zone as u8, hemisphere)
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    pub fn epsg(&self) -> u32 {
        match self.hemisphere {
            Hemisphere::North => 32600 + self.zone as u32,
            Hemisphere::South => 32700 + self.zone as u32,
        }
    }

    /// Mittelmeridian der Zone in Radiant
    fn central_meridian(&self) -> f64 {
        ((self.zone as f64 - 1.0) * 6.0 - 180.0 + 3.0).to_radians()
    }

    fn false_northing(&self) -> f64 {
        match self.hemisphere {
            Hemisphere::North => 0.0,
            Hemisphere::South => FALSE_NORTHING_SOUTH,
        }
    }

    /// WGS84 (Grad) -> UTM (Meter)
    pub fn project(&self, coords: LatLon) -> MathResult<Point2D> {
        if !coords.lat.is_finite() || !coords.lon.is_finite() || coords.lat.abs() > 90.0 {
            return Err(MathError::Projection {
                message: format!("Invalid geographic coordinate {:?}", coords),
            });
        }
        let e2 = eccentricity_squared();
        let ep2 = e2 / (1.0 - e2);

        let phi = coords.lat.to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();
        let tan_phi = phi.tan();

        let n = SEMI_MAJOR_AXIS / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        let t = tan_phi * tan_phi;
        let c = ep2 * cos_phi * cos_phi;
        let a = cos_phi * (coords.lon.to_radians() - self.central_meridian());
        let m = meridian_arc(phi);

        let easting = SCALE_FACTOR
            * n
            * (a + (1.0 - t + c) * a.powi(3) / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a.powi(5) / 120.0)
            + FALSE_EASTING;
        let northing = SCALE_FACTOR
            * (m + n
                * tan_phi
                * (a * a / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * a.powi(4) / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a.powi(6) / 720.0))
            + self.false_northing();

        Ok(Point2D::new(easting, northing))
    }

    /// UTM (Meter) -> WGS84 (Grad)
    pub fn unproject(&self, point: Point2D) -> MathResult<LatLon> {
        if !point.is_finite() {
            return Err(MathError::Projection {
                message: format!("Invalid planar coordinate {:?}", point),
            });
        }
        let e2 = eccentricity_squared();
        let ep2 = e2 / (1.0 - e2);
        let e4 = e2 * e2;
        let e6 = e4 * e2;

        let m = (point.y - self.false_northing()) / SCALE_FACTOR;
        let mu = m / (SEMI_MAJOR_AXIS * (1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));
        let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());

        // Breite des Fußpunkts
        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

        let (sin_phi1, cos_phi1) = phi1.sin_cos();
        let tan_phi1 = phi1.tan();
        let denom = 1.0 - e2 * sin_phi1 * sin_phi1;
        let n1 = SEMI_MAJOR_AXIS / denom.sqrt();
        let r1 = SEMI_MAJOR_AXIS * (1.0 - e2) / denom.powf(1.5);
        let t1 = tan_phi1 * tan_phi1;
        let c1 = ep2 * cos_phi1 * cos_phi1;
        let d = (point.x - FALSE_EASTING) / (n1 * SCALE_FACTOR);

        let phi = phi1
            - (n1 * tan_phi1 / r1)
                * (d * d / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d.powi(4) / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2
                        - 3.0 * c1 * c1)
                        * d.powi(6)
                        / 720.0);
        let lambda = self.central_meridian()
            + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
                + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1)
                    * d.powi(5)
                    / 120.0)
                / cos_phi1;

        Ok(LatLon::new(phi.to_degrees(), lambda.to_degrees()))
    }
}

fn eccentricity_squared() -> f64 {
    FLATTENING * (2.0 - FLATTENING)
}

/// Meridianbogenlänge vom Äquator bis `phi`
fn meridian_arc(phi: f64) -> f64 {
    let e2 = eccentricity_squared();
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    SEMI_MAJOR_AXIS
        * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
}
