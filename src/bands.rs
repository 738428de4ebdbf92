//! Static zone tables: UTM latitude bands and UPS polar quadrants.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    letters::{
        LETTER_A, LETTER_B, LETTER_C, LETTER_D, LETTER_E, LETTER_F, LETTER_G, LETTER_H,
        LETTER_J, LETTER_K, LETTER_L, LETTER_M, LETTER_N, LETTER_P, LETTER_Q, LETTER_R,
        LETTER_S, LETTER_T, LETTER_U, LETTER_V, LETTER_W, LETTER_X, LETTER_Y, LETTER_Z,
    },
    Error,
};

/// One 8° UTM latitude band.
#[derive(Debug)]
pub(crate) struct LatitudeBand {
    pub letter: u8,
    /// Lowest northing reached anywhere in the band
    pub min_northing: f64,
    pub north: f64,
    pub south: f64,
    /// Multiple of 2000km just below the band, used to resolve the row period
    pub northing_offset: f64,
}

const fn band(letter: u8, min_northing: f64, north: f64, south: f64, northing_offset: f64) -> LatitudeBand {
    LatitudeBand { letter, min_northing, north, south, northing_offset }
}

pub(crate) static LATITUDE_BANDS: [LatitudeBand; 20] = [
    band(LETTER_C, 1_100_000., -72., -80.5, 0.),
    band(LETTER_D, 2_000_000., -64., -72., 2_000_000.),
    band(LETTER_E, 2_800_000., -56., -64., 2_000_000.),
    band(LETTER_F, 3_700_000., -48., -56., 2_000_000.),
    band(LETTER_G, 4_600_000., -40., -48., 4_000_000.),
    band(LETTER_H, 5_500_000., -32., -40., 4_000_000.),
    band(LETTER_J, 6_400_000., -24., -32., 6_000_000.),
    band(LETTER_K, 7_300_000., -16., -24., 6_000_000.),
    band(LETTER_L, 8_200_000., -8., -16., 8_000_000.),
    band(LETTER_M, 9_100_000., 0., -8., 8_000_000.),
    band(LETTER_N, 0., 8., 0., 0.),
    band(LETTER_P, 800_000., 16., 8., 0.),
    band(LETTER_Q, 1_700_000., 24., 16., 0.),
    band(LETTER_R, 2_600_000., 32., 24., 2_000_000.),
    band(LETTER_S, 3_500_000., 40., 32., 2_000_000.),
    band(LETTER_T, 4_400_000., 48., 40., 4_000_000.),
    band(LETTER_U, 5_300_000., 56., 48., 4_000_000.),
    band(LETTER_V, 6_200_000., 64., 56., 6_000_000.),
    band(LETTER_W, 7_000_000., 72., 64., 6_000_000.),
    band(LETTER_X, 7_900_000., 84.5, 72., 6_000_000.),
];

/// One quarter of a polar cap, split at the pole meridian by easting.
#[derive(Debug)]
pub(crate) struct UpsQuadrant {
    pub letter: u8,
    pub column_low: u8,
    pub column_high: u8,
    pub row_high: u8,
    pub false_easting: f64,
    pub false_northing: f64,
    /// Letters stepped over when assigning columns, see [`crate::letters::skip_letters`]
    pub column_skips: &'static [(u8, u8)],
}

// West quadrants drop M, N, O and V, W; east quadrants drop D, E, I and M, N, O.
const WEST_SKIPS: &[(u8, u8)] = &[(LETTER_L, 3), (LETTER_U, 2)];
const EAST_SKIPS: &[(u8, u8)] = &[(LETTER_C, 2), (LETTER_H, 1), (LETTER_L, 3)];

pub(crate) static UPS_QUADRANTS: [UpsQuadrant; 4] = [
    UpsQuadrant {
        letter: LETTER_A,
        column_low: LETTER_J,
        column_high: LETTER_Z,
        row_high: LETTER_Z,
        false_easting: 800_000.,
        false_northing: 800_000.,
        column_skips: WEST_SKIPS,
    },
    UpsQuadrant {
        letter: LETTER_B,
        column_low: LETTER_A,
        column_high: LETTER_R,
        row_high: LETTER_Z,
        false_easting: 2_000_000.,
        false_northing: 800_000.,
        column_skips: EAST_SKIPS,
    },
    UpsQuadrant {
        letter: LETTER_Y,
        column_low: LETTER_J,
        column_high: LETTER_Z,
        row_high: LETTER_P,
        false_easting: 800_000.,
        false_northing: 1_300_000.,
        column_skips: WEST_SKIPS,
    },
    UpsQuadrant {
        letter: LETTER_Z,
        column_low: LETTER_A,
        column_high: LETTER_J,
        row_high: LETTER_P,
        false_easting: 2_000_000.,
        false_northing: 1_300_000.,
        column_skips: EAST_SKIPS,
    },
];

lazy_static! {
    static ref BAND_BY_LETTER: HashMap<u8, &'static LatitudeBand> = LATITUDE_BANDS
        .iter()
        .map(|band| (band.letter, band))
        .collect();
}

/// Band letter for a latitude in the UTM domain.
///
/// # Errors
///
/// Returns [`Error::CoordinateOutOfRange`] outside `(-80.5, 84.5)`.
pub(crate) fn latitude_band_letter(lat: f64) -> Result<u8, Error> {
    if (72.0..84.5).contains(&lat) {
        Ok(LETTER_X)
    } else if lat > -80.5 && lat < 72.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let idx = ((lat + 80.0) / 8.0 + 1.0e-12) as usize;
        Ok(LATITUDE_BANDS[idx].letter)
    } else {
        Err(Error::CoordinateOutOfRange(format!("Latitude {lat} has no UTM latitude band")))
    }
}

pub(crate) fn band_for_letter(letter: u8) -> Option<&'static LatitudeBand> {
    BAND_BY_LETTER.get(&letter).copied()
}

pub(crate) fn ups_quadrant_for_letter(letter: u8) -> Option<&'static UpsQuadrant> {
    UPS_QUADRANTS.iter().find(|quadrant| quadrant.letter == letter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::letter_char;

    #[test]
    fn band_letters_skip_i_and_o() {
        let letters: String = LATITUDE_BANDS.iter().map(|b| letter_char(b.letter)).collect();
        assert_eq!(letters, "CDEFGHJKLMNPQRSTUVWX");
    }

    #[test]
    fn bands_are_contiguous() {
        for pair in LATITUDE_BANDS.windows(2) {
            assert!((pair[0].north - pair[1].south).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn latitude_band_lookup() {
        assert_eq!(latitude_band_letter(0.0).unwrap(), LETTER_N);
        assert_eq!(latitude_band_letter(-0.1).unwrap(), LETTER_M);
        assert_eq!(latitude_band_letter(38.9).unwrap(), LETTER_S);
        assert_eq!(latitude_band_letter(-80.0).unwrap(), LETTER_C);
        assert_eq!(latitude_band_letter(71.99).unwrap(), LETTER_W);
        assert_eq!(latitude_band_letter(72.0).unwrap(), LETTER_X);
        assert_eq!(latitude_band_letter(84.4).unwrap(), LETTER_X);
        assert!(latitude_band_letter(84.5).is_err());
        assert!(latitude_band_letter(-80.5).is_err());
    }

    #[test]
    fn band_and_quadrant_lookup() {
        assert_eq!(band_for_letter(LETTER_S).unwrap().min_northing, 3_500_000.);
        assert!(band_for_letter(LETTER_A).is_none());
        assert!(band_for_letter(LETTER_D).is_some());
        assert!(band_for_letter(LETTER_E).is_some());

        assert_eq!(ups_quadrant_for_letter(LETTER_Y).unwrap().false_northing, 1_300_000.);
        assert!(ups_quadrant_for_letter(LETTER_C).is_none());
    }
}
