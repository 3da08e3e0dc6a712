//! Reference ellipsoids.

/// A biaxial reference ellipsoid, described by its semi-major and semi-minor
/// axes in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis a
    pub a: f64,
    /// Semi-minor axis b
    pub b: f64,
}

impl Ellipsoid {
    /// Flattening `(a - b) / a`
    pub fn flattening(&self) -> f64 {
        (self.a - self.b) / self.a
    }

    /// First eccentricity squared, `1 - b²/a²`.
    ///
    /// ```
    /// use gridconvert::ellipsoid::WGS84;
    ///
    /// let f = WGS84.flattening();
    /// assert!((WGS84.e2() - f * (2. - f)).abs() < 1e-15);
    /// ```
    pub fn e2(&self) -> f64 {
        1. - self.b.powi(2) / self.a.powi(2)
    }

    /// Second eccentricity squared, `e² / (1 - e²)`.
    pub fn second_e2(&self) -> f64 {
        let e2 = self.e2();
        e2 / (1. - e2)
    }

    /// Third flattening `(a - b) / (a + b)`.
    pub fn n(&self) -> f64 {
        (self.a - self.b) / (self.a + self.b)
    }
}

// Semi-major axis a
const WGS84_A: f64 = 6_378_137.;
// Flattening
#[allow(clippy::unreadable_literal)]
const WGS84_F: f64 = 1.0 / 298.257223563;

/// World Geodetic System 1984
pub const WGS84: Ellipsoid = Ellipsoid {
    a: WGS84_A,
    b: WGS84_A * (1. - WGS84_F),
};

/// Airy 1830, the ellipsoid of the OSGB36 datum
pub const AIRY_1830: Ellipsoid = Ellipsoid {
    a: 6_377_563.396,
    b: 6_356_256.909,
};
