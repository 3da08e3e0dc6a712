//! Grid parameter groups for the supported projections.

use crate::ellipsoid::{Ellipsoid, AIRY_1830, WGS84};

/// Parameters shared by every UTM zone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UtmGrid {
    pub ellipsoid: Ellipsoid,
    /// Central meridian scale factor k0
    pub scale_factor: f64,
    pub false_easting: f64,
    /// False northing applied to southern hemisphere coordinates
    pub false_northing_south: f64,
    /// Zone width in degrees
    pub zone_width: f64,
}

impl UtmGrid {
    /// Longitude of the central meridian of `zone`, in degrees.
    ///
    /// ```
    /// use gridconvert::constants::UTM;
    ///
    /// assert_eq!(UTM.central_meridian(30), -3.0);
    /// assert_eq!(UTM.central_meridian(31), 3.0);
    /// ```
    pub fn central_meridian(&self, zone: i32) -> f64 {
        f64::from(zone - 1) * self.zone_width - 180. + self.zone_width / 2.
    }
}

/// Parameters of a single Transverse Mercator national grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NationalGrid {
    pub ellipsoid: Ellipsoid,
    /// Central meridian scale factor F0
    pub scale_factor: f64,
    /// Latitude of true origin, degrees
    pub origin_lat: f64,
    /// Longitude of true origin, degrees
    pub origin_lon: f64,
    /// Easting of true origin E0
    pub false_easting: f64,
    /// Northing of true origin N0
    pub false_northing: f64,
}

pub const UTM: UtmGrid = UtmGrid {
    ellipsoid: WGS84,
    scale_factor: 9996.0 / 10_000.,
    false_easting: 500_000.,
    false_northing_south: 10_000_000.,
    zone_width: 6.,
};

/// Ordnance Survey National Grid (OSGB36)
#[allow(clippy::unreadable_literal)]
pub const NATIONAL_GRID: NationalGrid = NationalGrid {
    ellipsoid: AIRY_1830,
    scale_factor: 0.9996012717,
    origin_lat: 49.,
    origin_lon: -2.,
    false_easting: 400_000.,
    false_northing: -100_000.,
};
