use std::{fmt::Display, str::FromStr};

use tracing::debug;

use crate::{
    constants::{MAX_PRECISION, ONEHT},
    grid::GridCodec,
    latlon::LatLon,
    letters::{is_excluded, letter_index, GridLetters},
    projections::{Projector, Wgs84Projector},
    utm::{zonespec::{self, MAXUTMZONE, MINUTMZONE}, UtmUps, ZoneDescriptor},
    Error, ParseCoord,
};

/// Digit fields saturate here instead of rounding up into the next square
const MAX_DIGIT_FIELD: f64 = 99_999.;

/// An MGRS grid reference: zone (`0` for UPS), grid square letters, and the
/// easting/northing digits within the square as written, at `precision`
/// digits per axis.
///
/// `18SUJ2338308450` has zone 18, letters `SUJ`, easting `23383`, northing
/// `08450` and precision 5. `18SUJ233084` has easting `233`, northing `84`
/// and precision 3.
///
/// With the `serde` feature it serializes as its string form and is parsed
/// back through [`ParseCoord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Mgrs {
    pub(crate) zone: u8,
    pub(crate) letters: GridLetters,
    pub(crate) easting: u32,
    pub(crate) northing: u32,
    pub(crate) precision: u8,
}

impl Mgrs {
    /// Builds a reference from a full easting and northing in meters.
    /// Each is reduced to its offset inside the 100km square, cut to the
    /// meter, then cut again to `precision` digits.
    pub(crate) fn from_grid(
        zone: u8,
        letters: GridLetters,
        easting: f64,
        northing: f64,
        precision: u8,
    ) -> Result<Mgrs, Error> {
        check_precision(precision)?;

        let divisor = 10_u32.pow(u32::from(MAX_PRECISION - precision));

        Ok(Self {
            zone,
            letters,
            easting: digit_field(easting) / divisor,
            northing: digit_field(northing) / divisor,
            precision,
        })
    }

    /// Shortcut for [`Mgrs::from_str`], matching the other coordinate types.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedMgrs`] if the string is not a valid MGRS reference.
    pub fn parse_str(value: &str) -> Result<Mgrs, Error> {
        Self::parse_coord(value)
    }

    /// UTM zone in `[1, 60]`, or `0` for UPS.
    pub fn zone(&self) -> u8 {
        self.zone
    }

    pub fn letters(&self) -> GridLetters {
        self.letters
    }

    /// Easting digits as written, e.g. `233` in `18SUJ233084`.
    pub fn easting(&self) -> u32 {
        self.easting
    }

    /// Northing digits as written, e.g. `84` in `18SUJ233084`.
    pub fn northing(&self) -> u32 {
        self.northing
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    pub fn is_utm(&self) -> bool {
        self.zone != zonespec::UPS
    }

    /// Easting and northing of the reference within its 100km square, in meters.
    pub fn offset_meters(&self) -> (f64, f64) {
        let scale = f64::from(10_u32.pow(u32::from(MAX_PRECISION - self.precision)));

        (f64::from(self.easting) * scale, f64::from(self.northing) * scale)
    }

    /// Converts a point to MGRS with the built-in [`Wgs84Projector`].
    ///
    /// # Errors
    ///
    /// See [`Mgrs::from_latlon_with`].
    ///
    /// # Usage
    ///
    /// ```
    /// use mgrsconvert::{LatLon, Mgrs};
    ///
    /// let coord = LatLon::create(38.9072, -77.0369).unwrap();
    /// let mgrs = Mgrs::from_latlon(&coord, 5).unwrap();
    ///
    /// assert_eq!(mgrs.to_string(), "18SUJ2338308450");
    /// assert_eq!(Mgrs::from_latlon(&coord, 2).unwrap().to_string(), "18SUJ2308");
    /// ```
    pub fn from_latlon(value: &LatLon, precision: u8) -> Result<Mgrs, Error> {
        Self::from_latlon_with(&Wgs84Projector, value, precision)
    }

    /// Projects `value` with `projector` and encodes it at `precision`
    /// digits per axis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `precision` is above 5 or the
    /// coordinate is out of range, [`Error::CoordinateOutOfRange`] if the
    /// projected point falls outside the MGRS grid, or the projector's error.
    pub fn from_latlon_with<P>(projector: &P, value: &LatLon, precision: u8) -> Result<Mgrs, Error>
    where
        P: Projector + ?Sized,
    {
        check_precision(precision)?;

        let point = UtmUps::from_latlon_with(projector, value)?;
        let zone = point.zone();

        let (letters, easting, northing) = GridCodec::for_zone(zone.zone()).encode(value.latitude, &point)?;
        let mgrs = Mgrs::from_grid(zone.zone(), letters, easting, northing, precision)?;

        debug!(
            latitude = value.latitude,
            longitude = value.longitude,
            zone = zone.zone(),
            system_id = zone.system_id(),
            easting = point.easting(),
            northing = point.northing(),
            %mgrs,
            "converted to MGRS"
        );

        Ok(mgrs)
    }

    /// Full UTM/UPS coordinates of the reference: the south-west corner of
    /// the grid square plus the digit offsets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedMgrs`] if the letters are not valid for the zone.
    pub fn to_utmups(&self) -> Result<UtmUps, Error> {
        let (square_easting, square_northing, hemisphere) = GridCodec::for_zone(self.zone).decode(self.letters)?;
        let (easting, northing) = self.offset_meters();

        Ok(UtmUps::new(
            ZoneDescriptor::new(self.zone, hemisphere)?,
            square_easting + easting,
            square_northing + northing,
        ))
    }

    /// # Errors
    ///
    /// See [`Mgrs::to_latlon_with`].
    ///
    /// # Usage
    ///
    /// ```
    /// use mgrsconvert::Mgrs;
    ///
    /// let coord = Mgrs::parse_str("18SUJ2338308450").unwrap().to_latlon().unwrap();
    ///
    /// assert!((coord.latitude() - 38.907193).abs() < 1e-6);
    /// assert!((coord.longitude() + 77.036902).abs() < 1e-6);
    /// ```
    pub fn to_latlon(&self) -> Result<LatLon, Error> {
        self.to_latlon_with(&Wgs84Projector)
    }

    /// # Errors
    ///
    /// Returns [`Error::MalformedMgrs`] if the letters are not valid for the
    /// zone, or the projector's error.
    pub fn to_latlon_with<P>(&self, projector: &P) -> Result<LatLon, Error>
    where
        P: Projector + ?Sized,
    {
        let point = self.to_utmups()?;
        let coord = point.to_latlon_with(projector)?;

        debug!(
            mgrs = %self,
            system_id = point.zone().system_id(),
            easting = point.easting(),
            northing = point.northing(),
            latitude = coord.latitude,
            longitude = coord.longitude,
            "converted from MGRS"
        );

        Ok(coord)
    }
}

fn check_precision(precision: u8) -> Result<(), Error> {
    if precision > MAX_PRECISION {
        return Err(Error::InvalidArgument(format!("Precision {precision} not in [0, {MAX_PRECISION}]")));
    }

    Ok(())
}

/// Meters into the 100km square, cut to the meter
fn digit_field(value: f64) -> u32 {
    let value = value.rem_euclid(ONEHT);
    let value = if value >= MAX_DIGIT_FIELD + 0.5 { MAX_DIGIT_FIELD } else { value };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let value = value.floor() as u32;
    value
}

/// Renders an MGRS string from a zone (`0` for UPS), grid square letters,
/// and full easting/northing in meters.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `precision` is above 5.
pub fn format_mgrs(
    zone: u8,
    letters: GridLetters,
    easting: f64,
    northing: f64,
    precision: u8,
) -> Result<String, Error> {
    Ok(Mgrs::from_grid(zone, letters, easting, northing, precision)?.to_string())
}

/// Whether an MGRS string names a UTM zone (`true`) or is a polar UPS
/// reference (`false`). Only the leading zone digits are inspected.
///
/// # Errors
///
/// Returns [`Error::MalformedMgrs`] if the string starts with more than two digits.
///
/// # Usage
///
/// ```
/// use mgrsconvert::mgrs::is_utm_string;
///
/// assert!(is_utm_string("18SUJ2338308450").unwrap());
/// assert!(!is_utm_string("  YYL4939146492").unwrap());
/// assert!(is_utm_string("181SUJ2338308450").is_err());
/// ```
pub fn is_utm_string(value: &str) -> Result<bool, Error> {
    Ok(zone_digits(value.trim_start())? > 0)
}

fn zone_digits(value: &str) -> Result<usize, Error> {
    let count = value.bytes().take_while(u8::is_ascii_digit).count();
    if count > 2 {
        return Err(Error::MalformedMgrs(format!("More than 2 digits at start of MGRS {}", &value[..count])));
    }

    Ok(count)
}

impl ParseCoord for Mgrs {
    fn parse_coord(value: &str) -> Result<Self, Error> {
        let value = value.trim_start();

        let p = zone_digits(value)?;
        let zone = if p > 0 {
            let zone = value[..p]
                .parse::<u8>()
                .map_err(|e| Error::MalformedMgrs(format!("Zone {} unreadable: {e}", &value[..p])))?;
            if !(MINUTMZONE..=MAXUTMZONE).contains(&zone) {
                return Err(Error::MalformedMgrs(format!("Zone {zone} not in [1,60]")));
            }
            zone
        } else {
            zonespec::UPS
        };

        let rest = &value[p..];
        let letter_count = rest.bytes().take_while(u8::is_ascii_alphabetic).count();
        if letter_count != 3 {
            return Err(Error::MalformedMgrs(format!("Expected 3 letters after the zone in {value}")));
        }

        let mut letters = [0_u8; 3];
        for (slot, c) in letters.iter_mut().zip(rest[..3].chars()) {
            *slot = letter_index(c)
                .filter(|&index| !is_excluded(index))
                .ok_or_else(|| Error::MalformedMgrs(format!("Letter {c} is not a valid MGRS letter")))?;
        }

        let digits = &rest[3..];
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::MalformedMgrs(format!("Encountered a non-digit in {digits}")));
        }
        if digits.len() % 2 == 1 {
            return Err(Error::MalformedMgrs(format!("Not an even number of digits in {digits}")));
        }
        if digits.len() > 2 * usize::from(MAX_PRECISION) {
            return Err(Error::MalformedMgrs(format!(
                "More than {} digits in {digits}",
                2 * MAX_PRECISION
            )));
        }

        // Even length checked above
        let (easting, northing) = digits.split_at(digits.len() / 2);
        let precision = u8::try_from(easting.len())
            .map_err(|_| Error::MalformedMgrs(format!("Too many digits in {digits}")))?;

        Ok(Self {
            zone,
            letters: GridLetters::new(letters[0], letters[1], letters[2]),
            easting: parse_digits(easting)?,
            northing: parse_digits(northing)?,
            precision,
        })
    }
}

fn parse_digits(digits: &str) -> Result<u32, Error> {
    if digits.is_empty() {
        return Ok(0);
    }

    digits
        .parse()
        .map_err(|e| Error::MalformedMgrs(format!("Digits {digits} unreadable: {e}")))
}

impl FromStr for Mgrs {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_coord(s)
    }
}

impl TryFrom<String> for Mgrs {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_coord(&value)
    }
}

impl From<Mgrs> for String {
    fn from(value: Mgrs) -> Self {
        value.to_string()
    }
}

impl Display for Mgrs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_utm() {
            write!(f, "{}", self.zone)?;
        } else {
            write!(f, "  ")?;
        }

        write!(f, "{}", self.letters)?;

        if self.precision > 0 {
            let width = usize::from(self.precision);
            write!(f, "{:0width$}{:0width$}", self.easting, self.northing)?;
        }

        Ok(())
    }
}
