//! 100km grid square letters for UTM and UPS points.
//!
//! UTM columns cycle through three sets of eight letters by zone, and rows
//! cycle through twenty letters every 2000km, shifted by 500km in even
//! zones. UPS squares are lettered per polar quadrant.

use tracing::trace;

use crate::{
    bands::{band_for_letter, latitude_band_letter, ups_quadrant_for_letter, UPS_QUADRANTS},
    constants::{MAX_EAST_NORTH, MIN_EAST_NORTH, ONEHT, TWOMIL, UTM_FALSE_EASTING, UTM_FALSE_NORTHING_S},
    letters::{
        grid_ordinal, is_excluded, letter_char, skip_excluded_letters, skip_letters, unskip_letters, GridLetters,
        LETTER_A, LETTER_D, LETTER_E, LETTER_H, LETTER_J, LETTER_M, LETTER_N, LETTER_R, LETTER_S, LETTER_V,
        LETTER_W, LETTER_X, LETTER_Y, LETTER_Z,
    },
    utm::{zonespec, Hemisphere, UtmUps},
    utility::GeoMath,
    Error, ThisOrThat,
};

/// Row pattern shift applied in even-numbered zones
const EVEN_ZONE_ROW_SHIFT: f64 = 500_000.;

/// Zones where band X is split and never issued
const SVALBARD_GAP_ZONES: [u8; 3] = [32, 34, 36];

/// Column letters never used in the polar quadrants
const UPS_FORBIDDEN_COLUMNS: [u8; 6] = [LETTER_D, LETTER_E, LETTER_M, LETTER_N, LETTER_V, LETTER_W];

/// Encoder/decoder of grid letters, chosen by zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GridCodec {
    Utm { zone: u8 },
    Ups,
}

impl GridCodec {
    pub fn for_zone(zone: u8) -> GridCodec {
        (zone == zonespec::UPS).ternary(GridCodec::Ups, GridCodec::Utm { zone })
    }

    /// Letters of the square containing `point`, along with the easting and
    /// northing the digit fields are taken from.
    pub fn encode(self, lat: f64, point: &UtmUps) -> Result<(GridLetters, f64, f64), Error> {
        match self {
            GridCodec::Utm { zone } => utm_grid_letters(zone, lat, point.easting, point.northing),
            GridCodec::Ups => {
                let letters = ups_grid_letters(point.hemisphere(), point.easting, point.northing)?;
                Ok((letters, point.easting, point.northing))
            }
        }
    }

    /// Easting and northing of the south-west corner of the square, with
    /// false origin, and the hemisphere the letters place it in.
    pub fn decode(self, letters: GridLetters) -> Result<(f64, f64, Hemisphere), Error> {
        match self {
            GridCodec::Utm { zone } => utm_grid_letters_inverse(zone, letters),
            GridCodec::Ups => ups_grid_letters_inverse(letters),
        }
    }
}

/// Column letter range and row shift of a UTM zone's letter set
fn grid_values(zone: u8) -> (u8, u8, f64) {
    let (low, high) = match zone % 6 {
        1 | 4 => (LETTER_A, LETTER_H),
        2 | 5 => (LETTER_J, LETTER_R),
        _ => (LETTER_S, LETTER_Z),
    };

    (low, high, (zone % 2 == 0).ternary(EVEN_ZONE_ROW_SHIFT, 0.))
}

fn square_index(value: f64) -> Option<u8> {
    let index = (value / ONEHT).floor();
    (0. ..24.).contains(&index).then(|| {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = index as u8;
        index
    })
}

pub(crate) fn utm_grid_letters(zone: u8, lat: f64, easting: f64, northing: f64) -> Result<(GridLetters, f64, f64), Error> {
    let (mut lat, mut northing) = (lat, northing);
    // A southern point landing on the equator is re-labelled as northern
    if lat <= 0. && northing.eps_eq(UTM_FALSE_NORTHING_S) {
        lat = 0.;
        northing = 0.;
    }

    let (column_low, column_high, pattern_offset) = grid_values(zone);
    let band = latitude_band_letter(lat)?;

    let mut grid_northing = northing.rem_euclid(TWOMIL) + pattern_offset;
    if grid_northing >= TWOMIL {
        grid_northing -= TWOMIL;
    }
    let row = square_index(grid_northing)
        .filter(|&ordinal| ordinal < 20)
        .map(skip_excluded_letters)
        .ok_or_else(|| Error::CoordinateOutOfRange(format!("Northing {northing} has no grid row")))?;

    let mut grid_easting = easting;
    if band == LETTER_V && zone == 31 && grid_easting.eps_eq(UTM_FALSE_EASTING) {
        grid_easting -= 1.;
    }
    let column = square_index(grid_easting)
        .and_then(|square| square.checked_sub(1))
        .map(|offset| skip_excluded_letters(grid_ordinal(column_low) + offset))
        .filter(|&column| column <= column_high)
        .ok_or_else(|| Error::CoordinateOutOfRange(format!("Easting {easting} outside zone {zone} columns")))?;

    let letters = GridLetters::new(band, column, row);
    trace!(zone, lat, easting, northing, %letters, "utm grid letters");

    Ok((letters, easting, northing))
}

pub(crate) fn utm_grid_letters_inverse(zone: u8, letters: GridLetters) -> Result<(f64, f64, Hemisphere), Error> {
    if letters.band == LETTER_X && SVALBARD_GAP_ZONES.contains(&zone) {
        return Err(Error::MalformedMgrs(format!("Zone {zone} has no band X")));
    }

    let band = band_for_letter(letters.band)
        .ok_or_else(|| Error::MalformedMgrs(format!("Band letter {} not a UTM latitude band", letters.band())))?;

    let (column_low, column_high, pattern_offset) = grid_values(zone);
    if letters.column < column_low || letters.column > column_high || is_excluded(letters.column) {
        return Err(Error::MalformedMgrs(format!(
            "Column letter {} not in zone {zone} set {}-{}",
            letters.column(),
            letter_char(column_low),
            letter_char(column_high),
        )));
    }
    if letters.row > LETTER_V || is_excluded(letters.row) {
        return Err(Error::MalformedMgrs(format!("Row letter {} not in UTM set A-V", letters.row())));
    }

    let easting = f64::from(grid_ordinal(letters.column) - grid_ordinal(column_low) + 1) * ONEHT;

    let mut northing = f64::from(grid_ordinal(letters.row)) * ONEHT - pattern_offset;
    if northing < 0. {
        northing += TWOMIL;
    }
    northing += band.northing_offset;
    while northing < band.min_northing {
        northing += TWOMIL;
    }

    let hemisphere = (letters.band < LETTER_N).ternary(Hemisphere::South, Hemisphere::North);
    trace!(
        zone,
        %letters,
        easting,
        northing,
        band_south = band.south,
        band_north = band.north,
        "utm grid square"
    );

    Ok((easting, northing, hemisphere))
}

pub(crate) fn ups_grid_letters(hemisphere: Hemisphere, easting: f64, northing: f64) -> Result<GridLetters, Error> {
    for (name, value) in [("Easting", easting), ("Northing", northing)] {
        if !(MIN_EAST_NORTH..=MAX_EAST_NORTH).contains(&value) {
            return Err(Error::CoordinateOutOfRange(format!(
                "{name} {value} not in UPS range [{MIN_EAST_NORTH}, {MAX_EAST_NORTH}]"
            )));
        }
    }

    let eastp = easting >= TWOMIL;
    let quadrant = &UPS_QUADRANTS[usize::from(hemisphere.is_north()) * 2 + usize::from(eastp)];

    let row = square_index(northing - quadrant.false_northing)
        .map(skip_excluded_letters)
        .filter(|&row| row <= quadrant.row_high);
    let column = square_index(easting - quadrant.false_easting)
        .map(|offset| skip_letters(quadrant.column_low + offset, quadrant.column_skips))
        .filter(|&column| column <= quadrant.column_high);

    let (Some(column), Some(row)) = (column, row) else {
        return Err(Error::CoordinateOutOfRange(format!(
            "({easting}, {northing}) outside UPS quadrant {}",
            letter_char(quadrant.letter)
        )));
    };

    let letters = GridLetters::new(quadrant.letter, column, row);
    trace!(%hemisphere, easting, northing, %letters, "ups grid letters");

    Ok(letters)
}

pub(crate) fn ups_grid_letters_inverse(letters: GridLetters) -> Result<(f64, f64, Hemisphere), Error> {
    let quadrant = ups_quadrant_for_letter(letters.band)
        .ok_or_else(|| Error::MalformedMgrs(format!("Band letter {} not a UPS quadrant", letters.band())))?;

    if letters.column < quadrant.column_low
        || letters.column > quadrant.column_high
        || UPS_FORBIDDEN_COLUMNS.contains(&letters.column)
        || is_excluded(letters.column)
    {
        return Err(Error::MalformedMgrs(format!(
            "Column letter {} not in UPS quadrant {}",
            letters.column(),
            letters.band(),
        )));
    }
    if letters.row > quadrant.row_high || is_excluded(letters.row) {
        return Err(Error::MalformedMgrs(format!(
            "Row letter {} not in UPS quadrant {}",
            letters.row(),
            letters.band(),
        )));
    }

    let column = unskip_letters(letters.column, quadrant.column_skips);
    let easting = f64::from(column - quadrant.column_low) * ONEHT + quadrant.false_easting;
    let northing = f64::from(grid_ordinal(letters.row)) * ONEHT + quadrant.false_northing;

    let hemisphere = (letters.band >= LETTER_Y).ternary(Hemisphere::North, Hemisphere::South);
    trace!(%letters, easting, northing, "ups grid square");

    Ok((easting, northing, hemisphere))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::{LETTER_B, LETTER_L};

    fn letters(s: &str) -> GridLetters {
        let b = s.as_bytes();
        GridLetters::new(b[0] - b'A', b[1] - b'A', b[2] - b'A')
    }

    #[test]
    fn zone_letter_sets() {
        assert_eq!(grid_values(1), (LETTER_A, LETTER_H, 0.));
        assert_eq!(grid_values(2), (LETTER_J, LETTER_R, 500_000.));
        assert_eq!(grid_values(3), (LETTER_S, LETTER_Z, 0.));
        assert_eq!(grid_values(4), (LETTER_A, LETTER_H, 500_000.));
        assert_eq!(grid_values(5), (LETTER_J, LETTER_R, 0.));
        assert_eq!(grid_values(6), (LETTER_S, LETTER_Z, 500_000.));
        assert_eq!(grid_values(60), (LETTER_S, LETTER_Z, 500_000.));
    }

    #[test]
    fn utm_encode() {
        let (l, _, _) = utm_grid_letters(18, 38.9072, 323_383.154, 4_308_450.758).unwrap();
        assert_eq!(l.to_string(), "SUJ");

        let (l, _, _) = utm_grid_letters(38, 37.6539, 412_337.5, 4_167_880.2).unwrap();
        assert_eq!(l.to_string(), "SMG");

        let (l, _, _) = utm_grid_letters(15, 42., 500_000., 4_649_776.22).unwrap();
        assert_eq!(l.to_string(), "TWG");
    }

    #[test]
    fn equator_reset() {
        let (l, easting, northing) = utm_grid_letters(31, -0., 166_021.4, 10_000_000.).unwrap();
        assert_eq!(l.band, LETTER_N);
        assert_eq!(l.row, LETTER_A);
        assert_eq!(easting, 166_021.4);
        assert_eq!(northing, 0.);
    }

    #[test]
    fn zone_31v_central_column() {
        let (l, _, _) = utm_grid_letters(31, 60., 500_000., 6_651_411.).unwrap();
        assert_eq!(l.column, LETTER_D);

        let (l, _, _) = utm_grid_letters(31, 50., 500_000., 5_538_630.).unwrap();
        assert_eq!(l.column, LETTER_E);
    }

    #[test]
    fn utm_encode_out_of_range() {
        assert!(matches!(
            utm_grid_letters(18, 38.9, 50_000., 4_308_450.),
            Err(Error::CoordinateOutOfRange(_))
        ));
        assert!(matches!(
            utm_grid_letters(18, 85., 323_383., 4_308_450.),
            Err(Error::CoordinateOutOfRange(_))
        ));
    }

    #[test]
    fn utm_decode() {
        assert_eq!(
            utm_grid_letters_inverse(18, letters("SUJ")).unwrap(),
            (300_000., 4_300_000., Hemisphere::North)
        );
        assert_eq!(
            utm_grid_letters_inverse(38, letters("SMG")).unwrap(),
            (400_000., 4_100_000., Hemisphere::North)
        );
        assert_eq!(
            utm_grid_letters_inverse(15, letters("TVG")).unwrap(),
            (400_000., 4_600_000., Hemisphere::North)
        );
        let (_, northing, hemisphere) = utm_grid_letters_inverse(21, letters("GTL")).unwrap();
        assert_eq!(northing, 5_000_000.);
        assert_eq!(hemisphere, Hemisphere::South);
    }

    #[test]
    fn utm_decode_rejects() {
        assert!(utm_grid_letters_inverse(32, letters("XMG")).is_err());
        assert!(utm_grid_letters_inverse(33, letters("XWG")).is_ok());
        assert!(utm_grid_letters_inverse(18, letters("AUJ")).is_err());
        assert!(utm_grid_letters_inverse(18, letters("SAJ")).is_err());
        assert!(utm_grid_letters_inverse(18, letters("SUW")).is_err());
    }

    #[test]
    fn utm_encode_decode_agree() {
        for zone in [1, 2, 3, 4, 5, 6, 17, 18] {
            for (lat, northing) in [(38.9, 4_308_450.), (-33.8, 6_252_000.), (1.0, 110_000.)] {
                let (l, _, _) = utm_grid_letters(zone, lat, 455_000., northing).unwrap();
                let (easting, grid_northing, _) = utm_grid_letters_inverse(zone, l).unwrap();

                assert_eq!(easting, 400_000.);
                assert_eq!(grid_northing, (northing / ONEHT).floor() * ONEHT);
            }
        }
    }

    #[test]
    fn ups_encode() {
        assert_eq!(
            ups_grid_letters(Hemisphere::South, 2_000_000., 2_000_000.).unwrap(),
            GridLetters::new(LETTER_B, LETTER_A, LETTER_N)
        );
        assert_eq!(
            ups_grid_letters(Hemisphere::North, 1_849_391.13, 2_346_492.45).unwrap(),
            GridLetters::new(LETTER_Y, LETTER_Y, LETTER_L)
        );
        assert_eq!(
            ups_grid_letters(Hemisphere::North, 2_000_000., 2_000_000.).unwrap().to_string(),
            "ZAH"
        );
        assert!(ups_grid_letters(Hemisphere::North, 4_000_001., 2_000_000.).is_err());
        assert!(ups_grid_letters(Hemisphere::South, 2_000_000., -1.).is_err());
    }

    #[test]
    fn ups_decode() {
        assert_eq!(
            ups_grid_letters_inverse(letters("BAN")).unwrap(),
            (2_000_000., 2_000_000., Hemisphere::South)
        );
        assert_eq!(
            ups_grid_letters_inverse(letters("YYL")).unwrap(),
            (1_800_000., 2_300_000., Hemisphere::North)
        );
        assert_eq!(
            ups_grid_letters_inverse(letters("AYN")).unwrap(),
            (1_800_000., 2_000_000., Hemisphere::South)
        );
        assert_eq!(
            ups_grid_letters_inverse(letters("BFK")).unwrap().0,
            2_300_000.
        );
    }

    #[test]
    fn ups_decode_rejects() {
        // not a quadrant
        assert!(ups_grid_letters_inverse(letters("CAA")).is_err());
        // forbidden or out of range columns
        assert!(ups_grid_letters_inverse(letters("BDA")).is_err());
        assert!(ups_grid_letters_inverse(letters("AMA")).is_err());
        assert!(ups_grid_letters_inverse(letters("AVA")).is_err());
        assert!(ups_grid_letters_inverse(letters("AHA")).is_err());
        assert!(ups_grid_letters_inverse(letters("BSA")).is_err());
        assert!(ups_grid_letters_inverse(letters("ZKA")).is_err());
        // rows past P in the north
        assert!(ups_grid_letters_inverse(letters("YJQ")).is_err());
        assert!(ups_grid_letters_inverse(letters("ZAP")).is_ok());
    }

    #[test]
    fn ups_columns_round_trip() {
        for quadrant in &UPS_QUADRANTS {
            let mut column = quadrant.column_low;
            while column <= quadrant.column_high {
                if !UPS_FORBIDDEN_COLUMNS.contains(&column) && !is_excluded(column) {
                    let l = GridLetters::new(quadrant.letter, column, LETTER_A);
                    let (easting, northing, hemisphere) = ups_grid_letters_inverse(l).unwrap();
                    let back = ups_grid_letters(hemisphere, easting + 1., northing + 1.).unwrap();
                    assert_eq!(back, l);
                }
                column += 1;
            }
        }
    }
}
