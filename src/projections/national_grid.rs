use tracing::{debug, trace, warn};

use crate::{latlon::LatLon, utility::polyval, Error, constants::{NationalGrid, NATIONAL_GRID}};

/// Largest gap, in meters, between the target northing and the meridional
/// arc at which the latitude is considered solved.
const ARC_TOLERANCE: f64 = 1e-5;

/// Upper bound on latitude refinement steps. Valid grid coordinates settle in
/// about four.
pub(crate) const MAX_ITERATIONS: usize = 100;

// ================================
// Meridional arc coefficients
// ================================

// Each a polynomial in n, highest order first
const MA_COEFF: [f64; 4] = [5. / 4., 5. / 4., 1., 1.];
const MB_COEFF: [f64; 4] = [21. / 8., 3., 3., 0.];
const MC_COEFF: [f64; 4] = [15. / 8., 15. / 8., 0., 0.];
const MD_COEFF: [f64; 4] = [35. / 24., 0., 0., 0.];

/// Inverse Transverse Mercator for a national grid, following the Ordnance
/// Survey's *A Guide to Coordinate Systems in Great Britain*, annex C.
pub(crate) struct NationalGridProjection {
    grid: NationalGrid,
    a_f0: f64,
    b_f0: f64,
    e2: f64,
    lat0: f64,
    lon0: f64,
    // Ma, Mb, Mc, Md factors
    arc: [f64; 4],
}

impl NationalGridProjection {
    pub fn osgb36() -> NationalGridProjection {
        Self::new(NATIONAL_GRID)
    }

    pub fn new(grid: NationalGrid) -> NationalGridProjection {
        let ellipsoid = grid.ellipsoid;
        let n = ellipsoid.n();

        Self {
            grid,
            a_f0: ellipsoid.a * grid.scale_factor,
            b_f0: ellipsoid.b * grid.scale_factor,
            e2: ellipsoid.e2(),
            lat0: grid.origin_lat.to_radians(),
            lon0: grid.origin_lon.to_radians(),
            arc: [
                polyval(&MA_COEFF, n),
                polyval(&MB_COEFF, n),
                polyval(&MC_COEFF, n),
                polyval(&MD_COEFF, n),
            ],
        }
    }

    /// Scaled meridional arc from the true origin latitude to `lat`.
    fn meridional_arc(&self, lat: f64) -> f64 {
        let diff = lat - self.lat0;
        let sum = lat + self.lat0;
        let [ma, mb, mc, md] = self.arc;

        self.b_f0 * (
            ma * diff
            - mb * diff.sin() * sum.cos()
            + mc * (2. * diff).sin() * (2. * sum).cos()
            - md * (3. * diff).sin() * (3. * sum).cos()
        )
    }

    /// Solves for the latitude (radians) whose meridional arc matches
    /// `northing`. Returns the latitude along with the number of refinement
    /// steps taken.
    pub(crate) fn footpoint_latitude(&self, northing: f64) -> Result<(f64, usize), Error> {
        let target = northing - self.grid.false_northing;

        let mut lat = self.lat0;
        let mut arc = 0.;
        let mut iterations = 0;

        loop {
            let residual = target - arc;
            if residual.abs() < ARC_TOLERANCE {
                debug!(iterations, lat = lat.to_degrees(), "National Grid latitude converged");
                return Ok((lat, iterations));
            }

            if iterations == MAX_ITERATIONS || !residual.is_finite() {
                warn!(iterations, residual, northing, "National Grid latitude did not converge");
                return Err(Error::NonConvergence { iterations, residual });
            }

            lat += residual / self.a_f0;
            arc = self.meridional_arc(lat);
            iterations += 1;

            trace!(iterations, lat = lat.to_degrees(), residual, "refining latitude");
        }
    }

    pub fn to_latlon(&self, easting: f64, northing: f64) -> Result<LatLon, Error> {
        let (lat, _) = self.footpoint_latitude(northing)?;

        let (sin_lat, cos_lat) = lat.sin_cos();
        let tan_lat = lat.tan();
        let sec_lat = cos_lat.recip();

        let w = 1. - self.e2 * sin_lat.powi(2);
        let nu = self.a_f0 / w.sqrt();
        let rho = self.a_f0 * (1. - self.e2) / w.powf(1.5);
        let eta2 = nu / rho - 1.;

        let t2 = tan_lat.powi(2);
        let t4 = tan_lat.powi(4);

        let vii = tan_lat / (2. * rho * nu);
        let viii = tan_lat / (24. * rho * nu.powi(3)) * (5. + 3. * t2 + eta2 - 9. * t2 * eta2);
        let ix = tan_lat / (720. * rho * nu.powi(5)) * (61. + 90. * t2 + 45. * t4);

        let x = sec_lat / nu;
        let xi = sec_lat / (6. * nu.powi(3)) * (nu / rho + 2. * t2);
        let xii = sec_lat / (120. * nu.powi(5)) * (5. + 28. * t2 + 24. * t4);

        let de = easting - self.grid.false_easting;

        let lat = lat + polyval(&[-ix, 0., viii, 0., -vii, 0., 0.], de);
        let lon = self.lon0 + polyval(&[xii, 0., -xi, 0., x, 0.], de);

        Ok(LatLon::new(lat.to_degrees(), lon.to_degrees()))
    }
}
