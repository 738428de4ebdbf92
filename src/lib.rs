#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

//! Conversion between WGS84 latitude/longitude and
//! [MGRS](https://en.wikipedia.org/wiki/Military_Grid_Reference_System)
//! grid references, through UTM and UPS.
//!
//! ```
//! let mgrs = mgrsconvert::to_mgrs(38.9072, -77.0369, 5).unwrap();
//! assert_eq!(mgrs, "18SUJ2338308450");
//!
//! let coord = mgrsconvert::to_geodetic("18SUJ2338308450").unwrap();
//! assert!((coord.latitude() - 38.9072).abs() < 1e-5);
//! ```

use thiserror::Error;

pub mod latlon;
pub mod mgrs;
pub mod projections;
pub mod utm;

pub(crate) mod bands;
pub(crate) mod constants;
pub(crate) mod grid;
pub(crate) mod letters;
pub(crate) mod utility;

pub use constants::{DEFAULT_PRECISION, MAX_PRECISION};
pub use latlon::LatLon;
pub use letters::GridLetters;
pub use mgrs::Mgrs;
pub use projections::{Projector, Wgs84Projector};
pub use utm::UtmUps;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Argument is not valid: {0}")]
    InvalidArgument(String),
    #[error("Coordinate is outside the grid: {0}")]
    CoordinateOutOfRange(String),
    #[error("MGRS String is invalid: {0}")]
    MalformedMgrs(String),
    #[error("Projection failed: {0}")]
    Projection(String),
}

pub trait ParseCoord {
    fn parse_coord(value: &str) -> Result<Self, Error>
    where Self: Sized;
}

pub fn from_str<S, T>(value: S) -> Result<T, Error>
where
    S: AsRef<str>,
    T: ParseCoord
{
    T::parse_coord(value.as_ref())
}

/// Converts a latitude/longitude to an MGRS string at `precision` digits
/// per axis (`0` for the 100km square alone, `5` for 1m).
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the latitude is outside `[-90, 90]`,
/// the longitude outside `[-180, 360]` or the precision above 5.
/// Returns [`Error::CoordinateOutOfRange`] if the projected point has no
/// grid square.
///
/// # Usage
///
/// ```
/// use mgrsconvert::to_mgrs;
///
/// assert_eq!(to_mgrs(0.0, 0.0, 5).unwrap(), "31NAA6602100000");
/// assert_eq!(to_mgrs(-90.0, 0.0, 5).unwrap(), "  BAN0000000000");
/// assert_eq!(to_mgrs(60.0, 5.0, 1).unwrap(), "32VKM75");
/// assert!(to_mgrs(91.0, 0.0, 5).is_err());
/// ```
pub fn to_mgrs(latitude: f64, longitude: f64, precision: u8) -> Result<String, Error> {
    to_mgrs_with(&Wgs84Projector, latitude, longitude, precision)
}

/// [`to_mgrs`] with a caller-supplied [`Projector`].
///
/// # Errors
///
/// See [`to_mgrs`]. Projector failures are passed through.
pub fn to_mgrs_with<P>(projector: &P, latitude: f64, longitude: f64, precision: u8) -> Result<String, Error>
where
    P: Projector + ?Sized,
{
    let coord = LatLon::create(latitude, longitude)?;

    Ok(Mgrs::from_latlon_with(projector, &coord, precision)?.to_string())
}

/// Converts an MGRS string to latitude/longitude. Leading whitespace and
/// lower-case letters are accepted. The point returned is the south-west
/// corner of the cell the string names.
///
/// # Errors
///
/// Returns [`Error::MalformedMgrs`] if the string cannot be parsed or its
/// letters are not valid for its zone.
///
/// # Usage
///
/// ```
/// use mgrsconvert::to_geodetic;
///
/// let coord = to_geodetic("  BAN0000000000").unwrap();
/// assert!((coord.latitude() + 90.0).abs() < 1e-9);
///
/// assert!(to_geodetic("18SUI2338308450").is_err());
/// ```
pub fn to_geodetic(mgrs: &str) -> Result<LatLon, Error> {
    to_geodetic_with(&Wgs84Projector, mgrs)
}

/// [`to_geodetic`] with a caller-supplied [`Projector`].
///
/// # Errors
///
/// See [`to_geodetic`]. Projector failures are passed through.
pub fn to_geodetic_with<P>(projector: &P, mgrs: &str) -> Result<LatLon, Error>
where
    P: Projector + ?Sized,
{
    mgrs.parse::<Mgrs>()?.to_latlon_with(projector)
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
