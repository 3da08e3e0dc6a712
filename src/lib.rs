//! Inverse projections from grid coordinates to latitude/longitude.
//!
//! Two grids are supported:
//! * [UTM](https://en.wikipedia.org/wiki/Universal_Transverse_Mercator_coordinate_system)
//!   on the WGS84 ellipsoid, see [`Utm`] and [`convert_utm_to_latlon`].
//! * The [British National Grid](https://en.wikipedia.org/wiki/Ordnance_Survey_National_Grid)
//!   on the OSGB36 (Airy 1830) ellipsoid, see [`Bng`] and [`convert_bng_to_latlon`].
//!
//! National Grid results are latitude/longitude on the OSGB36 ellipsoid. No
//! datum shift to WGS84 is applied.

#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

use thiserror::Error;

pub mod bng;
pub mod constants;
pub mod ellipsoid;
pub mod latlon;
pub mod utm;
pub(crate) mod utility;

pub use bng::Bng;
pub use latlon::LatLon;
pub use utm::Utm;

pub(crate) mod projections {
    pub mod national_grid;
    pub mod transverse_mercator;
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("Latitude did not converge after {iterations} iterations (residual {residual}m)")]
    NonConvergence {
        iterations: usize,
        residual: f64,
    },
    #[error("Zone {0} not in range [1, 60]")]
    InvalidZone(i32),
    #[error("Coordinate parameters are not valid: {0}")]
    InvalidCoord(String),
    #[error("UTM string is invalid: {0}")]
    InvalidUtm(String),
    #[error("National Grid reference is invalid: {0}")]
    InvalidGridRef(String),
}

pub trait ParseCoord {
    /// Parses a coordinate from its textual form.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] describing why the text could not be parsed.
    fn parse_coord(value: &str) -> Result<Self, Error>
    where Self: Sized;
}

/// Parses any [`ParseCoord`] coordinate from a string.
///
/// # Errors
///
/// Returns the error produced by the target type's parser.
///
/// # Usage
///
/// ```
/// use gridconvert::{Bng, Utm};
///
/// let utm: Utm = gridconvert::from_str("18N 585664.121 4511315.422").unwrap();
/// assert_eq!(utm.zone(), 18);
///
/// let bng: Bng = gridconvert::from_str("TG 51409 13177").unwrap();
/// assert_eq!(bng.easting(), 651409.0);
/// ```
pub fn from_str<S, T>(value: S) -> Result<T, Error>
where
    S: AsRef<str>,
    T: ParseCoord
{
    T::parse_coord(value.as_ref())
}

/// Converts a WGS84 UTM easting/northing to latitude/longitude in degrees.
///
/// The zone number is not validated here; use [`Utm::create`] for a checked
/// conversion. Inputs far outside a zone produce non-finite or meaningless
/// values rather than an error.
///
/// # Usage
///
/// ```
/// let coord = gridconvert::convert_utm_to_latlon(585664.121, 4511315.422, 18, true);
///
/// assert!((coord.latitude() - 40.748333).abs() < 1e-6);
/// assert!((coord.longitude() - -73.985278).abs() < 1e-6);
/// ```
pub fn convert_utm_to_latlon(easting: f64, northing: f64, zone_number: i32, is_northern: bool) -> LatLon {
    projections::transverse_mercator::TransverseMercator::utm()
        .to_latlon(easting, northing, zone_number, is_northern)
}

/// Converts a British National Grid easting/northing to latitude/longitude in
/// degrees on the OSGB36 ellipsoid.
///
/// # Errors
///
/// Returns [`Error::NonConvergence`] if the latitude iteration does not settle.
///
/// # Usage
///
/// ```
/// let coord = gridconvert::convert_bng_to_latlon(651409.903, 313177.270).unwrap();
///
/// assert!((coord.latitude() - 52.657570).abs() < 1e-6);
/// assert!((coord.longitude() - 1.717922).abs() < 1e-6);
/// ```
pub fn convert_bng_to_latlon(easting: f64, northing: f64) -> Result<LatLon, Error> {
    projections::national_grid::NationalGridProjection::osgb36()
        .to_latlon(easting, northing)
}

trait ThisOrThat {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T;
    fn ternary_lazy<F, E, T>(&self, r#true: F, r#false: E) -> T
    where
        F: Fn() -> T,
        E: Fn() -> T;
}

impl ThisOrThat for bool {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T {
        if *self { r#true } else { r#false }
    }

    fn ternary_lazy<F, E, T>(&self, r#true: F, r#false: E) -> T
    where
        F: Fn() -> T,
        E: Fn() -> T,
    {
        if *self { r#true() } else { r#false() }
    }
}
