use crate::{latlon::LatLon, utility::polyval, ThisOrThat, constants::{UtmGrid, UTM}};

// ================================
// Footpoint latitude series
// ================================

// Rectifying radius factor, polynomial in e2 of order 3
const MU_COEFF: [f64; 4] = [-5. / 256., -3. / 64., -1. / 4., 1.];

// Coefficients of sin(2k mu) for k = 1..=4, each a polynomial in e1
const PHI_SIN2_COEFF: [f64; 4] = [-27. / 32., 0., 3. / 2., 0.];
const PHI_SIN4_COEFF: [f64; 5] = [-55. / 32., 0., 21. / 16., 0., 0.];
const PHI_SIN6_COEFF: [f64; 4] = [151. / 96., 0., 0., 0.];
const PHI_SIN8_COEFF: [f64; 5] = [1097. / 512., 0., 0., 0., 0.];

/// Inverse Transverse Mercator using the closed-form series of
/// Snyder, *Map Projections: A Working Manual* (1987), eqs. 3-26, 8-17 to 8-25.
pub(crate) struct TransverseMercator {
    grid: UtmGrid,
    a: f64,
    k0: f64,
    e2: f64,
    ep2: f64,
    // a * (1 - e2/4 - 3e4/64 - 5e6/256)
    mu_scale: f64,
    // Footpoint series coefficients for sin(2mu), sin(4mu), sin(6mu), sin(8mu)
    phi: [f64; 4],
}

impl TransverseMercator {
    pub fn utm() -> TransverseMercator {
        Self::new(UTM)
    }

    pub fn new(grid: UtmGrid) -> TransverseMercator {
        let a = grid.ellipsoid.a;
        let e2 = grid.ellipsoid.e2();

        let root = (1. - e2).sqrt();
        let e1 = (1. - root) / (1. + root);

        Self {
            grid,
            a,
            k0: grid.scale_factor,
            e2,
            ep2: grid.ellipsoid.second_e2(),
            mu_scale: a * polyval(&MU_COEFF, e2),
            phi: [
                polyval(&PHI_SIN2_COEFF, e1),
                polyval(&PHI_SIN4_COEFF, e1),
                polyval(&PHI_SIN6_COEFF, e1),
                polyval(&PHI_SIN8_COEFF, e1),
            ],
        }
    }

    /// Latitude whose meridional arc equals `y`, in radians.
    fn footpoint_latitude(&self, y: f64) -> f64 {
        let mu = y / self.k0 / self.mu_scale;

        self.phi
            .iter()
            .zip(1_u8..)
            .fold(mu, |acc, (coeff, k)| acc + coeff * (2. * f64::from(k) * mu).sin())
    }

    pub fn to_latlon(&self, easting: f64, northing: f64, zone: i32, northp: bool) -> LatLon {
        let x = easting - self.grid.false_easting;
        let y = northp.ternary_lazy(|| northing, || northing - self.grid.false_northing_south);

        let phi1 = self.footpoint_latitude(y);
        let (sin1, cos1) = phi1.sin_cos();
        let tan1 = phi1.tan();

        let w = 1. - self.e2 * sin1.powi(2);
        // Prime vertical and meridional radii of curvature
        let n1 = self.a / w.sqrt();
        let r1 = self.a * (1. - self.e2) / w.powf(1.5);
        let t1 = tan1.powi(2);
        let c1 = self.ep2 * cos1.powi(2);

        let d = x / (n1 * self.k0);

        let lat_d4 = (5. + 3. * t1 + 10. * c1 - 4. * c1.powi(2) - 9. * self.ep2) / 24.;
        let lat_d6 = (61. + 90. * t1 + 298. * c1 + 45. * t1.powi(2) - 252. * self.ep2 - 3. * c1.powi(2)) / 720.;
        let lat = phi1 - (n1 * tan1 / r1) * polyval(&[lat_d6, 0., -lat_d4, 0., 0.5, 0., 0.], d);

        let lon_d3 = (1. + 2. * t1 + c1) / 6.;
        let lon_d5 = (5. - 2. * c1 + 28. * t1 - 3. * c1.powi(2) + 8. * self.ep2 + 24. * t1.powi(2)) / 120.;
        let lon = polyval(&[lon_d5, 0., -lon_d3, 0., 1., 0.], d) / cos1;

        LatLon::new(
            lat.to_degrees(),
            lon.to_degrees() + self.grid.central_meridian(zone),
        )
    }
}
