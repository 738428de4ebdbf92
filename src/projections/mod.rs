//! Map projections between WGS84 latitude/longitude and UTM/UPS meters.

mod polar_stereographic;
mod transverse_mercator;

use lazy_static::lazy_static;
use tracing::trace;

use crate::{
    constants::{UPS_FALSE_ORIGIN, UTM_FALSE_EASTING, UTM_FALSE_NORTHING_S},
    utm::{central_meridian, ZoneDescriptor},
    Error, ThisOrThat,
};

use self::{polar_stereographic::PolarStereographic, transverse_mercator::TransverseMercator};

lazy_static! {
    static ref UTM: TransverseMercator = TransverseMercator::utm();
    static ref UPS: PolarStereographic = PolarStereographic::ups();
}

/// Converts between geodetic coordinates and the projected coordinate system
/// named by an EPSG-style id (`326zz` / `327zz`, zone 61 meaning UPS).
///
/// Projected coordinates include false easting and northing, so UTM eastings
/// are centered on 500km and UPS coordinates on 2000km.
pub trait Projector {
    /// Returns `(easting, northing)` in meters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Projection`] if the system is not supported or the
    /// point cannot be projected.
    fn forward(&self, latitude: f64, longitude: f64, system_id: u32) -> Result<(f64, f64), Error>;

    /// Returns `(latitude, longitude)` in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Projection`] if the system is not supported or the
    /// point cannot be unprojected.
    fn inverse(&self, easting: f64, northing: f64, system_id: u32) -> Result<(f64, f64), Error>;
}

/// WGS84 UTM and UPS projections computed in-crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct Wgs84Projector;

fn zone_for(system_id: u32) -> Result<ZoneDescriptor, Error> {
    ZoneDescriptor::from_system_id(system_id)
        .map_err(|_| Error::Projection(format!("Unsupported coordinate system {system_id}")))
}

fn check_finite(what: &str, a: f64, b: f64) -> Result<(f64, f64), Error> {
    if a.is_finite() && b.is_finite() {
        Ok((a, b))
    } else {
        Err(Error::Projection(format!("{what} produced a non-finite result ({a}, {b})")))
    }
}

impl Projector for Wgs84Projector {
    fn forward(&self, latitude: f64, longitude: f64, system_id: u32) -> Result<(f64, f64), Error> {
        let zone = zone_for(system_id)?;
        let northp = zone.hemisphere().is_north();

        let (x, y) = if zone.is_ups() {
            let (x, y) = UPS.from_latlon(northp, latitude, longitude);
            (x + UPS_FALSE_ORIGIN, y + UPS_FALSE_ORIGIN)
        } else {
            let (x, y) = UTM.from_latlon(central_meridian(zone.zone()), latitude, longitude);
            (x + UTM_FALSE_EASTING, y + northp.ternary(0., UTM_FALSE_NORTHING_S))
        };

        trace!(latitude, longitude, system_id, x, y, "forward projection");

        check_finite("Forward projection", x, y)
    }

    fn inverse(&self, easting: f64, northing: f64, system_id: u32) -> Result<(f64, f64), Error> {
        let zone = zone_for(system_id)?;
        let northp = zone.hemisphere().is_north();

        let (lat, lon) = if zone.is_ups() {
            UPS.to_latlon(northp, easting - UPS_FALSE_ORIGIN, northing - UPS_FALSE_ORIGIN)
        } else {
            UTM.to_latlon(
                central_meridian(zone.zone()),
                easting - UTM_FALSE_EASTING,
                northing - northp.ternary(0., UTM_FALSE_NORTHING_S),
            )
        };

        trace!(easting, northing, system_id, lat, lon, "inverse projection");

        check_finite("Inverse projection", lat, lon)
    }
}
