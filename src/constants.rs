// Semi-major axis a
pub(crate) const WGS84_A: f64 = 6_378_137.;
// Flattening
#[allow(clippy::unreadable_literal)]
pub(crate) const WGS84_F: f64 = 1.0 / 298.257223563;

// UTM central scale factor
pub(crate) const UTM_K0: f64 = 9996.0 / 10_000.;
// UPS central scale factor
pub(crate) const UPS_K0: f64 = 994.0 / 1000.;

// UTM false easting, and false northing in the southern hemisphere
pub(crate) const UTM_FALSE_EASTING: f64 = 500_000.;
pub(crate) const UTM_FALSE_NORTHING_S: f64 = 10_000_000.;
// UPS false easting/northing (both axes)
pub(crate) const UPS_FALSE_ORIGIN: f64 = 2_000_000.;

/// Side of one grid square, 100km
pub(crate) const ONEHT: f64 = 100_000.;
/// Period of the UTM row letters, 2000km
pub(crate) const TWOMIL: f64 = 2_000_000.;

/// Highest number of digits per axis, 1m resolution
pub const MAX_PRECISION: u8 = 5;
/// Precision used when the caller has no preference
pub const DEFAULT_PRECISION: u8 = MAX_PRECISION;

// UPS easting/northing bounds
pub(crate) const MIN_EAST_NORTH: f64 = 0.;
pub(crate) const MAX_EAST_NORTH: f64 = 4_000_000.;

// Latitudes past which UPS is used instead of UTM
pub(crate) const UPS_SOUTH_CUTOFF: f64 = -80.;
pub(crate) const UPS_NORTH_CUTOFF: f64 = 84.;
