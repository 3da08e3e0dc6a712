use crate::{
    constants::UTM,
    latlon::LatLon,
    projections::transverse_mercator::TransverseMercator,
    utility::{format_float, parse_finite},
    Error, ParseCoord, ThisOrThat,
};

pub(crate) mod zonespec {
    pub(crate) const MINUTMZONE: i32 = 1;
    pub(crate) const MAXUTMZONE: i32 = 60;
}

/// Representation of a WGS84
/// [UTM](https://en.wikipedia.org/wiki/Universal_Transverse_Mercator_coordinate_system)
/// point: zone, hemisphere, and easting/northing in meters including the
/// false easting/northing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Utm {
    pub(crate) zone: i32,
    #[cfg_attr(feature = "serde", serde(alias = "north", alias = "is_north"))]
    pub(crate) northp: bool,
    pub(crate) easting: f64,
    pub(crate) northing: f64,
}

impl Utm {
    /// Internal-only constructor that doesn't check the coordinate
    pub(crate) fn new(zone: i32, northp: bool, easting: f64, northing: f64) -> Utm {
        Self {
            zone,
            northp,
            easting,
            northing,
        }
    }

    /// Tries to create a UTM point from its constituent parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZone`] if the zone is outside the range `[1, 60]`.
    /// Returns [`Error::InvalidCoord`] if the easting or northing is not a finite number.
    ///
    /// # Usage
    ///
    /// ```
    /// use gridconvert::Utm;
    ///
    /// let coord = Utm::create(18, true, 585664.121, 4511315.422);
    ///
    /// assert!(coord.is_ok());
    ///
    /// let coord = coord.unwrap();
    ///
    /// assert_eq!(coord.zone(), 18);
    /// assert_eq!(coord.is_north(), true);
    ///
    /// let invalid_coord_zone_neg = Utm::create(0, true, 585664.121, 4511315.422);
    /// assert!(invalid_coord_zone_neg.is_err());
    ///
    /// let invalid_coord_zone_too_big = Utm::create(61, true, 585664.121, 4511315.422);
    /// assert!(invalid_coord_zone_too_big.is_err());
    /// ```
    pub fn create(zone: i32, northp: bool, easting: f64, northing: f64) -> Result<Utm, Error> {
        if !(zonespec::MINUTMZONE..=zonespec::MAXUTMZONE).contains(&zone) {
            return Err(Error::InvalidZone(zone));
        }

        if !easting.is_finite() || !northing.is_finite() {
            return Err(Error::InvalidCoord(
                format!("Easting {easting} and northing {northing} must be finite")
            ));
        }

        Ok(Utm::new(zone, northp, easting, northing))
    }

    /// Parses a UTM string of the form `<zone><N|S> <easting> <northing>`,
    /// e.g. `30N 651409.903 313177.270`. The hemisphere letter may also be
    /// separated from the zone, and commas may separate the fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUtm`] if the string is malformed, or the
    /// errors of [`Utm::create`] if the parsed values are out of range.
    ///
    /// # Usage
    ///
    /// ```
    /// use gridconvert::Utm;
    ///
    /// let coord = Utm::parse_str("18N 585664.121 4511315.422").unwrap();
    ///
    /// assert_eq!(coord.zone(), 18);
    /// assert!(coord.is_north());
    /// assert_eq!(coord.easting(), 585664.121);
    /// assert_eq!(coord.northing(), 4511315.422);
    ///
    /// assert!(Utm::parse_str("18X 585664.121 4511315.422").is_err());
    /// ```
    pub fn parse_str(value: &str) -> Result<Utm, Error> {
        let mut parts = value
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty());

        let zone_part = parts
            .next()
            .ok_or_else(|| Error::InvalidUtm("UTM string is empty".to_string()))?;

        let digits = zone_part
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(zone_part.len());
        let (zone_str, hemisphere) = zone_part.split_at(digits);

        let zone = zone_str
            .parse::<i32>()
            .map_err(|_| Error::InvalidUtm(format!("Zone \"{zone_part}\" is not a number")))?;

        let hemisphere = if hemisphere.is_empty() {
            parts
                .next()
                .ok_or_else(|| Error::InvalidUtm("Missing hemisphere".to_string()))?
        } else {
            hemisphere
        };

        let northp = parse_hemisphere(hemisphere)?;

        let easting = parts
            .next()
            .ok_or_else(|| Error::InvalidUtm("Missing easting".to_string()))
            .and_then(|e| parse_finite(e, "Easting").map_err(Error::InvalidUtm))?;
        let northing = parts
            .next()
            .ok_or_else(|| Error::InvalidUtm("Missing northing".to_string()))
            .and_then(|n| parse_finite(n, "Northing").map_err(Error::InvalidUtm))?;

        if let Some(extra) = parts.next() {
            return Err(Error::InvalidUtm(format!("Unexpected trailing value \"{extra}\"")));
        }

        Utm::create(zone, northp, easting, northing)
    }

    /// Returns the UTM zone.
    pub fn zone(&self) -> i32 {
        self.zone
    }

    /// Returns whether the coordinate is in the northern hemisphere.
    pub fn is_north(&self) -> bool {
        self.northp
    }

    /// Returns the UTM easting.
    pub fn easting(&self) -> f64 {
        self.easting
    }

    /// Returns the UTM northing.
    pub fn northing(&self) -> f64 {
        self.northing
    }

    /// Longitude of the zone's central meridian in degrees.
    ///
    /// ```
    /// use gridconvert::Utm;
    ///
    /// let coord = Utm::create(18, true, 585664.121, 4511315.422).unwrap();
    /// assert_eq!(coord.central_meridian(), -75.0);
    /// ```
    pub fn central_meridian(&self) -> f64 {
        UTM.central_meridian(self.zone)
    }

    /// Converts from [`Utm`] to [`LatLon`]
    ///
    /// # Usage
    ///
    /// ```
    /// use gridconvert::Utm;
    ///
    /// let coord_utm = Utm::create(18, true, 585664.121, 4511315.422).unwrap();
    ///
    /// let converted = coord_utm.to_latlon();
    ///
    /// // Check if the converted coordinate is accurate to 6 decimals (same as reference)
    /// assert!((converted.latitude() - 40.748333).abs() < 1e-6);
    /// assert!((converted.longitude() - -73.985278).abs() < 1e-6);
    /// ```
    pub fn to_latlon(&self) -> LatLon {
        TransverseMercator::utm().to_latlon(self.easting, self.northing, self.zone, self.northp)
    }
}

fn parse_hemisphere(value: &str) -> Result<bool, Error> {
    match value.to_ascii_uppercase().as_str() {
        "N" | "NORTH" => Ok(true),
        "S" | "SOUTH" => Ok(false),
        _ => Err(Error::InvalidUtm(format!("Hemisphere \"{value}\" must be N or S"))),
    }
}

impl ParseCoord for Utm {
    fn parse_coord(value: &str) -> Result<Utm, Error> {
        Utm::parse_str(value)
    }
}

impl std::fmt::Display for Utm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{} {} {}",
            self.zone,
            self.northp.ternary("N", "S"),
            format_float(self.easting),
            format_float(self.northing),
        )
    }
}
