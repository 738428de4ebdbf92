use std::fmt::Display;

use crate::{mgrs::Mgrs, Error};

/// Mean earth radius used for great-circle distances
const EARTH_MEAN_RADIUS_M: f64 = 6_371_008.8;

/// A WGS84 geodetic point in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLon {
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
}

impl LatLon {
    /// Internal-only constructor that doesn't check the bounds of lat/lon
    pub(crate) fn new(lat: f64, lon: f64) -> LatLon {
        Self {
            latitude: lat,
            longitude: lon,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Tries to create a `LatLon` point from a lat/lon pair. First checks if the
    /// values are valid:
    /// * Latitude must be in range [-90, 90]
    /// * Longitude must be in range [-180, 360]
    ///
    /// Longitudes past 180 are kept as given and folded only when projected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if either latitude or longitude are invalid.
    ///
    /// # Usage
    ///
    /// ```
    /// use mgrsconvert::LatLon;
    ///
    /// let coord = LatLon::create(40.748333, -73.985278);
    ///
    /// assert!(coord.is_ok());
    ///
    /// let coord = coord.unwrap();
    ///
    /// assert_eq!(coord.latitude(), 40.748333);
    /// assert_eq!(coord.longitude(), -73.985278);
    ///
    /// let invalid_coord_lat = LatLon::create(100.0, 0.0);
    /// assert!(invalid_coord_lat.is_err());
    ///
    /// let invalid_coord_lon = LatLon::create(0.0, -200.0);
    /// assert!(invalid_coord_lon.is_err());
    ///
    /// assert!(LatLon::create(0.0, 359.0).is_ok());
    /// ```
    pub fn create(lat: f64, lon: f64) -> Result<LatLon, Error> {
        if !(-90_f64..=90_f64).contains(&lat) {
            Err(Error::InvalidArgument(format!("Latitude {lat} outside of valid range [-90, 90].")))
        } else if !(-180_f64..=360_f64).contains(&lon) {
            Err(Error::InvalidArgument(format!("Longitude {lon} outside of valid range [-180, 360].")))
        } else {
            Ok(LatLon::new(lat, lon))
        }
    }

    pub fn is_north(&self) -> bool {
        self.latitude.is_sign_positive()
    }

    /// Encodes the point as MGRS at `precision` digits per axis.
    ///
    /// # Errors
    ///
    /// See [`Mgrs::from_latlon_with`].
    pub fn to_mgrs(&self, precision: u8) -> Result<Mgrs, Error> {
        Mgrs::from_latlon(self, precision)
    }

    /// # Errors
    ///
    /// See [`Mgrs::to_latlon_with`].
    pub fn from_mgrs(value: &Mgrs) -> Result<LatLon, Error> {
        value.to_latlon()
    }

    /// Great-circle distance in meters on a sphere of the earth's mean radius.
    ///
    /// # Usage
    ///
    /// ```
    /// use mgrsconvert::LatLon;
    ///
    /// let a = LatLon::create(0.0, 0.0).unwrap();
    /// let b = LatLon::create(0.0, 1.0).unwrap();
    ///
    /// assert!((a.haversine(&b) - 111_195.08).abs() < 0.01);
    /// ```
    pub fn haversine(&self, other: &LatLon) -> f64 {
        let lat1_r = self.latitude.to_radians();
        let lat2_r = other.latitude.to_radians();

        2.0 * EARTH_MEAN_RADIUS_M * (
            ((other.latitude - self.latitude).to_radians() / 2.0).sin().powi(2) +
            lat1_r.cos() * lat2_r.cos() *
            ((other.longitude - self.longitude).to_radians() / 2.0).sin().powi(2)
        ).sqrt().asin()
    }
}

impl TryFrom<Mgrs> for LatLon {
    type Error = Error;

    fn try_from(value: Mgrs) -> Result<Self, Self::Error> {
        value.to_latlon()
    }
}

impl Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let lat = buf.format(self.latitude);
        let mut buf = ryu::Buffer::new();
        let lon = buf.format(self.longitude);

        write!(f, "{lat} {lon}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_shortest_round_trip() {
        let coord = LatLon::create(38.9072, -77.0369).unwrap();
        assert_eq!(coord.to_string(), "38.9072 -77.0369");

        let coord = LatLon::create(0.0, 10.0).unwrap();
        assert_eq!(coord.to_string(), "0.0 10.0");
    }

    #[test]
    fn create_bounds() {
        assert!(LatLon::create(90.0, 360.0).is_ok());
        assert!(LatLon::create(-90.0, -180.0).is_ok());
        assert!(matches!(LatLon::create(-90.1, 0.0), Err(Error::InvalidArgument(_))));
        assert!(matches!(LatLon::create(0.0, 360.1), Err(Error::InvalidArgument(_))));
        assert!(LatLon::create(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn mgrs_conversions() {
        let coord = LatLon::create(0.0, 0.0).unwrap();
        assert_eq!(coord.to_mgrs(5).unwrap().to_string(), "31NAA6602100000");

        let mgrs = Mgrs::parse_str("  BAN0000000000").unwrap();
        let pole = LatLon::from_mgrs(&mgrs).unwrap();
        assert!((pole.latitude() + 90.0).abs() < 1e-9);

        let back = LatLon::try_from(coord.to_mgrs(5).unwrap()).unwrap();
        assert!(coord.haversine(&back) < 1.5);
    }
}
