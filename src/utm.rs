use std::fmt::Display;

use crate::{
    constants::{MAX_EAST_NORTH, MIN_EAST_NORTH, UPS_NORTH_CUTOFF, UPS_SOUTH_CUTOFF},
    latlon::LatLon,
    projections::{Projector, Wgs84Projector},
    utility::GeoMath,
    Error, ThisOrThat,
};

pub mod zonespec {
    /// Zone number used for UPS
    pub const UPS: u8 = 0;
    pub const MINUTMZONE: u8 = 1;
    pub const MAXUTMZONE: u8 = 60;
    /// Zone number UPS takes inside a coordinate system id
    pub const UPS_SYSTEM_ZONE: u8 = 61;
}

// EPSG numbering of WGS84 UTM/UPS systems: 326zz north, 327zz south
const SYSTEM_BASE: u32 = 32_000;
const SYSTEM_NORTH: u32 = 600;
const SYSTEM_SOUTH: u32 = 700;

// Easting/northing window accepted for UTM points
const UTM_MIN_EASTING: f64 = 100_000.;
const UTM_MAX_EASTING: f64 = 900_000.;
const UTM_MIN_NORTHING: f64 = 0.;
const UTM_MAX_NORTHING: f64 = 10_000_000.;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// The equator belongs to the northern hemisphere.
    pub fn from_latitude(lat: f64) -> Hemisphere {
        (lat >= 0.).ternary(Hemisphere::North, Hemisphere::South)
    }

    pub fn is_north(self) -> bool {
        self == Hemisphere::North
    }

    pub fn letter(self) -> char {
        self.is_north().ternary('N', 'S')
    }
}

impl TryFrom<char> for Hemisphere {
    type Error = Error;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_uppercase() {
            'N' => Ok(Hemisphere::North),
            'S' => Ok(Hemisphere::South),
            other => Err(Error::InvalidArgument(format!("Hemisphere {other} is not N or S"))),
        }
    }
}

impl Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Hemisphere and zone of a projected point, together with the id of the
/// projected coordinate system a [`Projector`] should use for it. Zone `0`
/// designates UPS.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneDescriptor {
    hemisphere: Hemisphere,
    zone: u8,
    system_id: u32,
}

impl ZoneDescriptor {
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the zone is outside `[0, 60]`.
    pub fn new(zone: u8, hemisphere: Hemisphere) -> Result<ZoneDescriptor, Error> {
        Ok(Self {
            hemisphere,
            zone,
            system_id: system_id(zone, hemisphere)?,
        })
    }

    /// Recovers the zone from an id produced by [`system_id`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for ids outside 32601-32661 and 32701-32761.
    pub fn from_system_id(id: u32) -> Result<ZoneDescriptor, Error> {
        let invalid = || Error::InvalidArgument(format!("Coordinate system {id} is not a WGS84 UTM/UPS system"));

        let offset = id.checked_sub(SYSTEM_BASE).ok_or_else(invalid)?;
        let hemisphere = match offset / 100 * 100 {
            SYSTEM_NORTH => Hemisphere::North,
            SYSTEM_SOUTH => Hemisphere::South,
            _ => return Err(invalid()),
        };

        let zone = u8::try_from(offset % 100).map_err(|_| invalid())?;
        let zone = match zone {
            zonespec::UPS_SYSTEM_ZONE => zonespec::UPS,
            zonespec::MINUTMZONE..=zonespec::MAXUTMZONE => zone,
            _ => return Err(invalid()),
        };

        Ok(Self { hemisphere, zone, system_id: id })
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// UTM zone in `[1, 60]`, or `0` for UPS.
    pub fn zone(&self) -> u8 {
        self.zone
    }

    pub fn system_id(&self) -> u32 {
        self.system_id
    }

    pub fn is_ups(&self) -> bool {
        self.zone == zonespec::UPS
    }
}

/// Determines the hemisphere, UTM/UPS zone and coordinate system id of a
/// latitude/longitude point. Latitudes at or beyond -80 and 84 are UPS;
/// elsewhere the standard 6° zones apply, including the Norway and
/// Svalbard exceptions.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the latitude is outside `[-90, 90]` or
/// the longitude outside `[-180, 180]`.
///
/// # Usage
///
/// ```
/// use mgrsconvert::utm::{resolve_zone, Hemisphere};
///
/// let zone = resolve_zone(60.0, 5.0).unwrap();
///
/// assert_eq!(zone.zone(), 32);
/// assert_eq!(zone.hemisphere(), Hemisphere::North);
/// assert_eq!(zone.system_id(), 32632);
///
/// let polar = resolve_zone(-85.0, 10.0).unwrap();
/// assert!(polar.is_ups());
/// assert_eq!(polar.system_id(), 32761);
/// ```
pub fn resolve_zone(lat: f64, lon: f64) -> Result<ZoneDescriptor, Error> {
    if !(-90_f64..=90_f64).contains(&lat) {
        return Err(Error::InvalidArgument(format!("Latitude {lat} outside of valid range [-90, 90].")));
    }
    if !(-180_f64..=180_f64).contains(&lon) {
        return Err(Error::InvalidArgument(format!("Longitude {lon} outside of valid range [-180, 180].")));
    }

    let hemisphere = Hemisphere::from_latitude(lat);

    if lat <= UPS_SOUTH_CUTOFF || lat >= UPS_NORTH_CUTOFF {
        return ZoneDescriptor::new(zonespec::UPS, hemisphere);
    }

    let base = if lon < 180. { 31. + lon / 6. } else { lon / 6. - 29. };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut zone = base.floor() as u8;
    if zone > zonespec::MAXUTMZONE {
        zone = zonespec::MINUTMZONE;
    }

    ZoneDescriptor::new(special_zone(lat, lon).unwrap_or(zone), hemisphere)
}

/// Zone overrides around Norway (band V) and Svalbard (band X). The boxes
/// are tried in order and the first match wins. Zone 31 in Norway starts
/// at 56°N inclusive; every other bound is strict.
fn special_zone(lat: f64, lon: f64) -> Option<u8> {
    let svalbard = lat > 71.;
    let boxes: [(bool, f64, f64, u8); 6] = [
        ((56_f64..64.).contains(&lat), -1., 3., 31),
        (lat > 55. && lat < 63., 2., 12., 32),
        (svalbard, -1., 9., 31),
        (svalbard, 8., 21., 33),
        (svalbard, 20., 33., 35),
        (svalbard, 32., 42., 37),
    ];

    boxes
        .iter()
        .find(|(in_rows, west, east, _)| *in_rows && lon > *west && lon < *east)
        .map(|(_, _, _, zone)| *zone)
}

/// Id of the projected coordinate system for a zone: `32600 + zone` in the
/// north, `32700 + zone` in the south, with UPS (zone `0`) numbered 61.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the zone is outside `[0, 60]`.
///
/// # Usage
///
/// ```
/// use mgrsconvert::utm::{system_id, Hemisphere};
///
/// assert_eq!(system_id(31, Hemisphere::South).unwrap(), 32731);
/// assert_eq!(system_id(0, Hemisphere::North).unwrap(), 32661);
/// assert!(system_id(62, Hemisphere::South).is_err());
/// ```
pub fn system_id(zone: u8, hemisphere: Hemisphere) -> Result<u32, Error> {
    if zone > zonespec::MAXUTMZONE {
        return Err(Error::InvalidArgument(format!("Zone {zone} not in range [0, 60]")));
    }

    let zone = (zone == zonespec::UPS).ternary(zonespec::UPS_SYSTEM_ZONE, zone);

    Ok(SYSTEM_BASE + hemisphere.is_north().ternary(SYSTEM_NORTH, SYSTEM_SOUTH) + u32::from(zone))
}

/// Longitude of the central meridian of a UTM zone.
pub fn central_meridian(zone: u8) -> f64 {
    6.0 * f64::from(zone) - 183.
}

/// Representation of a WGS84
/// [UTM](https://en.wikipedia.org/wiki/Universal_Transverse_Mercator_coordinate_system)
/// /
/// [UPS](https://en.wikipedia.org/wiki/Universal_polar_stereographic_coordinate_system)
/// point: easting and northing in meters, false origin included, within the
/// zone described by its [`ZoneDescriptor`].
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UtmUps {
    pub(crate) zone: ZoneDescriptor,
    pub(crate) easting: f64,
    pub(crate) northing: f64,
}

impl UtmUps {
    /// Internal-only constructor that doesn't check the coordinate
    pub(crate) fn new(zone: ZoneDescriptor, easting: f64, northing: f64) -> UtmUps {
        Self {
            zone,
            easting,
            northing,
        }
    }

    /// Tries to create a UTM or UPS point from its constituent parts. Zone
    /// of `0` designates UPS, otherwise it is UTM.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the zone is outside `[0, 60]`.
    /// Returns [`Error::CoordinateOutOfRange`] if the easting or northing is
    /// outside `[0, 4000km]` for UPS, or outside `[100km, 900km]` /
    /// `[0, 10000km]` for UTM.
    ///
    /// # Usage
    ///
    /// ```
    /// use mgrsconvert::{UtmUps, utm::Hemisphere};
    ///
    /// let coord = UtmUps::create(18, Hemisphere::North, 323383.154, 4308450.758);
    /// assert!(coord.is_ok());
    ///
    /// let coord = coord.unwrap();
    /// assert_eq!(coord.zone().zone(), 18);
    /// assert!(coord.is_north());
    ///
    /// assert!(UtmUps::create(70, Hemisphere::North, 500000.0, 0.0).is_err());
    /// assert!(UtmUps::create(0, Hemisphere::South, 4500000.0, 2000000.0).is_err());
    /// ```
    pub fn create(zone: u8, hemisphere: Hemisphere, easting: f64, northing: f64) -> Result<UtmUps, Error> {
        let zone = ZoneDescriptor::new(zone, hemisphere)?;

        check_coords(&zone, easting, northing)?;

        Ok(UtmUps::new(zone, easting, northing))
    }

    pub fn zone(&self) -> ZoneDescriptor {
        self.zone
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.zone.hemisphere
    }

    pub fn is_north(&self) -> bool {
        self.zone.hemisphere.is_north()
    }

    pub fn easting(&self) -> f64 {
        self.easting
    }

    pub fn northing(&self) -> f64 {
        self.northing
    }

    /// Projects a point with the built-in [`Wgs84Projector`].
    ///
    /// # Errors
    ///
    /// See [`UtmUps::from_latlon_with`].
    pub fn from_latlon(value: &LatLon) -> Result<UtmUps, Error> {
        Self::from_latlon_with(&Wgs84Projector, value)
    }

    /// Resolves the zone of `value` and projects it with `projector`.
    /// Longitudes past 180° are folded back into `[-180, 180]` first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an out-of-range coordinate, or
    /// whatever error the projector reports.
    pub fn from_latlon_with<P>(projector: &P, value: &LatLon) -> Result<UtmUps, Error>
    where
        P: Projector + ?Sized,
    {
        let lat = value.latitude;
        let lon = (value.longitude > 180.).ternary_lazy(|| value.longitude.ang_normalize(), || value.longitude);

        let zone = resolve_zone(lat, lon)?;
        let (easting, northing) = projector.forward(lat, lon, zone.system_id)?;

        Ok(UtmUps::new(zone, easting, northing))
    }

    /// # Errors
    ///
    /// See [`UtmUps::to_latlon_with`].
    pub fn to_latlon(&self) -> Result<LatLon, Error> {
        self.to_latlon_with(&Wgs84Projector)
    }

    /// # Errors
    ///
    /// Returns whatever error the projector reports.
    pub fn to_latlon_with<P>(&self, projector: &P) -> Result<LatLon, Error>
    where
        P: Projector + ?Sized,
    {
        let (lat, lon) = projector.inverse(self.easting, self.northing, self.zone.system_id)?;

        Ok(LatLon::new(lat, lon))
    }
}

impl Display for UtmUps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let easting = buf.format(self.easting);
        let mut buf = ryu::Buffer::new();
        let northing = buf.format(self.northing);
        write!(
            f,
            "{}{} {easting} {northing}",
            self.zone.zone,
            self.zone.hemisphere,
        )
    }
}

pub(crate) fn check_coords(zone: &ZoneDescriptor, x: f64, y: f64) -> Result<(), Error> {
    let ups = zone.is_ups();
    let (min_x, max_x, min_y, max_y) = ups.ternary(
        (MIN_EAST_NORTH, MAX_EAST_NORTH, MIN_EAST_NORTH, MAX_EAST_NORTH),
        (UTM_MIN_EASTING, UTM_MAX_EASTING, UTM_MIN_NORTHING, UTM_MAX_NORTHING),
    );

    if !(min_x..=max_x).contains(&x) {
        return Err(Error::CoordinateOutOfRange(
            format!(
                "Easting {:.2}km not in {} range for {} hemisphere [{:.2}km, {:.2}km]",
                x / 1000.0,
                ups.ternary("UPS", "UTM"),
                zone.hemisphere,
                min_x / 1000.0,
                max_x / 1000.0,
            )
        ));
    }

    if !(min_y..=max_y).contains(&y) {
        return Err(Error::CoordinateOutOfRange(
            format!(
                "Northing {:.2}km not in {} range for {} hemisphere [{:.2}km, {:.2}km]",
                y / 1000.0,
                ups.ternary("UPS", "UTM"),
                zone.hemisphere,
                min_y / 1000.0,
                max_y / 1000.0,
            )
        ));
    }

    Ok(())
}
