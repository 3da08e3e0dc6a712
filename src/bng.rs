use crate::{
    latlon::LatLon,
    projections::national_grid::NationalGridProjection,
    utility::{format_float, parse_finite},
    Error, ParseCoord,
};

// Grid letters omit I
const LETTERS: &str = "ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// Side of a 100km grid square, in meters
pub const TILE: i32 = 100_000;
/// Digits per axis of a full 1m grid reference
pub const MAX_PRECISION: usize = 5;
/// 100km squares covered by the grid, west to east
pub const EASTING_SQUARES: i32 = 7;
/// 100km squares covered by the grid, south to north
pub const NORTHING_SQUARES: i32 = 13;

fn in_grid(e100k: i32, n100k: i32) -> bool {
    (0..EASTING_SQUARES).contains(&e100k) && (0..NORTHING_SQUARES).contains(&n100k)
}

/// Representation of an Ordnance Survey
/// [National Grid](https://en.wikipedia.org/wiki/Ordnance_Survey_National_Grid)
/// (OSGB36) point: easting/northing in meters from the false origin.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bng {
    pub(crate) easting: f64,
    pub(crate) northing: f64,
}

impl Bng {
    /// Tries to create a National Grid point from an easting/northing pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] if either value is not a finite number.
    ///
    /// # Usage
    ///
    /// ```
    /// use gridconvert::Bng;
    ///
    /// let coord = Bng::create(651409.903, 313177.270).unwrap();
    ///
    /// assert_eq!(coord.easting(), 651409.903);
    /// assert_eq!(coord.northing(), 313177.270);
    ///
    /// assert!(Bng::create(f64::NAN, 0.0).is_err());
    /// ```
    pub fn create(easting: f64, northing: f64) -> Result<Bng, Error> {
        if easting.is_finite() && northing.is_finite() {
            Ok(Self { easting, northing })
        } else {
            Err(Error::InvalidCoord(
                format!("Easting {easting} and northing {northing} must be finite")
            ))
        }
    }

    /// Parses either a numeric `easting northing` pair (whitespace or comma
    /// separated) or a lettered grid reference such as `TG 51409 13177`,
    /// `TG5140913177` or `TG`.
    ///
    /// Lettered references give the south-west corner of the square they
    /// describe.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGridRef`] if the string is malformed.
    ///
    /// # Usage
    ///
    /// ```
    /// use gridconvert::Bng;
    ///
    /// let coord = Bng::parse_str("651409.903, 313177.270").unwrap();
    /// assert_eq!(coord.easting(), 651409.903);
    ///
    /// let coord = Bng::parse_str("TG 514 131").unwrap();
    /// assert_eq!(coord.easting(), 651400.0);
    /// assert_eq!(coord.northing(), 313100.0);
    ///
    /// assert!(Bng::parse_str("TG 5140 131").is_err());
    /// ```
    pub fn parse_str(value: &str) -> Result<Bng, Error> {
        let value = value.trim();

        if value.starts_with(|c: char| c.is_ascii_alphabetic()) {
            parse_grid_ref(value)
        } else {
            parse_numeric(value)
        }
    }

    /// Returns the easting.
    pub fn easting(&self) -> f64 {
        self.easting
    }

    /// Returns the northing.
    pub fn northing(&self) -> f64 {
        self.northing
    }

    /// Converts to latitude/longitude on the OSGB36 ellipsoid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonConvergence`] if the latitude iteration does not settle.
    ///
    /// # Usage
    ///
    /// ```
    /// use gridconvert::Bng;
    ///
    /// let coord = Bng::create(400000.0, -100000.0).unwrap();
    /// let converted = coord.to_latlon().unwrap();
    ///
    /// assert_eq!(converted.latitude(), 49.0);
    /// assert_eq!(converted.longitude(), -2.0);
    /// ```
    pub fn to_latlon(&self) -> Result<LatLon, Error> {
        NationalGridProjection::osgb36().to_latlon(self.easting, self.northing)
    }

    /// Renders the lettered grid reference using `digits` digits in total
    /// (split evenly between easting and northing), truncating towards the
    /// south-west corner.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGridRef`] if `digits` is odd or larger than 10,
    /// or the point lies outside the lettered squares.
    ///
    /// # Usage
    ///
    /// ```
    /// use gridconvert::Bng;
    ///
    /// let coord = Bng::create(651409.903, 313177.270).unwrap();
    ///
    /// assert_eq!(coord.to_grid_ref(10).unwrap(), "TG 51409 13177");
    /// assert_eq!(coord.to_grid_ref(6).unwrap(), "TG 514 131");
    /// assert_eq!(coord.to_grid_ref(0).unwrap(), "TG");
    /// ```
    pub fn to_grid_ref(&self, digits: usize) -> Result<String, Error> {
        if digits % 2 != 0 || digits > 2 * MAX_PRECISION {
            return Err(Error::InvalidGridRef(
                format!("Grid reference precision {digits} must be an even number of digits up to 10")
            ));
        }

        let tile = f64::from(TILE);
        let e100k = (self.easting / tile).floor();
        let n100k = (self.northing / tile).floor();

        let out_of_grid = || Error::InvalidGridRef(
            format!("Coordinate {} lies outside the lettered grid squares", self)
        );

        if !(0.0..f64::from(EASTING_SQUARES)).contains(&e100k)
            || !(0.0..f64::from(NORTHING_SQUARES)).contains(&n100k) {
            return Err(out_of_grid());
        }

        #[allow(clippy::cast_possible_truncation)]
        let (e100k, n100k) = (e100k as i32, n100k as i32);

        let l1 = (19 - n100k) - (19 - n100k) % 5 + (e100k + 10) / 5;
        let l2 = ((19 - n100k) * 5) % 25 + e100k % 5;

        let (Some(first), Some(second)) = (index_letter(l1), index_letter(l2)) else {
            return Err(out_of_grid());
        };

        let mut grid_ref = format!("{first}{second}");

        let per_axis = digits / 2;
        if per_axis > 0 {
            let scale = 10_f64.powi(i32::try_from(MAX_PRECISION - per_axis).unwrap_or(0));
            let e = ((self.easting - f64::from(e100k * TILE)) / scale).floor();
            let n = ((self.northing - f64::from(n100k * TILE)) / scale).floor();
            grid_ref.push_str(&format!(" {e:0per_axis$} {n:0per_axis$}"));
        }

        Ok(grid_ref)
    }
}

/// Index of a grid letter in the 5x5 letter square.
fn letter_index(c: char) -> Option<i32> {
    LETTERS
        .find(c.to_ascii_uppercase())
        .and_then(|idx| i32::try_from(idx).ok())
}

fn index_letter(idx: i32) -> Option<char> {
    usize::try_from(idx)
        .ok()
        .and_then(|idx| LETTERS.chars().nth(idx))
}

fn parse_grid_ref(value: &str) -> Result<Bng, Error> {
    let mut chars = value.chars();
    let (Some(c1), Some(c2)) = (chars.next(), chars.next()) else {
        return Err(Error::InvalidGridRef(format!("\"{value}\" needs two grid square letters")));
    };

    let (Some(l1), Some(l2)) = (letter_index(c1), letter_index(c2)) else {
        return Err(Error::InvalidGridRef(format!("\"{c1}{c2}\" is not a grid square")));
    };

    // 500km square from the first letter, 100km square within it from the second
    let e100k = ((l1 + 3) % 5) * 5 + l2 % 5;
    let n100k = (19 - (l1 / 5) * 5) - l2 / 5;

    if !in_grid(e100k, n100k) {
        return Err(Error::InvalidGridRef(format!("\"{c1}{c2}\" lies outside the National Grid")));
    }

    let digits = chars
        .filter(|c| !c.is_whitespace())
        .collect::<String>();

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidGridRef(format!("\"{digits}\" must contain only digits")));
    }

    if digits.len() % 2 != 0 || digits.len() > 2 * MAX_PRECISION {
        return Err(Error::InvalidGridRef(format!(
            "\"{digits}\" must have an even number of digits, at most {}",
            2 * MAX_PRECISION,
        )));
    }

    let per_axis = digits.len() / 2;
    let (e_digits, n_digits) = digits.split_at(per_axis);
    let scale = 10_f64.powi(i32::try_from(MAX_PRECISION - per_axis).unwrap_or(0));

    let offset = |part: &str| -> f64 {
        part.parse::<u32>().map_or(0., |v| f64::from(v) * scale)
    };

    Ok(Bng {
        easting: f64::from(e100k * TILE) + offset(e_digits),
        northing: f64::from(n100k * TILE) + offset(n_digits),
    })
}

fn parse_numeric(value: &str) -> Result<Bng, Error> {
    let mut parts = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty());

    let easting = parts
        .next()
        .ok_or_else(|| Error::InvalidGridRef("Missing easting".to_string()))
        .and_then(|e| parse_finite(e, "Easting").map_err(Error::InvalidGridRef))?;
    let northing = parts
        .next()
        .ok_or_else(|| Error::InvalidGridRef("Missing northing".to_string()))
        .and_then(|n| parse_finite(n, "Northing").map_err(Error::InvalidGridRef))?;

    if let Some(extra) = parts.next() {
        return Err(Error::InvalidGridRef(format!("Unexpected trailing value \"{extra}\"")));
    }

    Ok(Bng { easting, northing })
}

impl ParseCoord for Bng {
    fn parse_coord(value: &str) -> Result<Bng, Error> {
        Bng::parse_str(value)
    }
}

impl std::fmt::Display for Bng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            format_float(self.easting),
            format_float(self.northing),
        )
    }
}
