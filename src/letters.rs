//! Grid letter table.
//!
//! Letters are carried as their position in the Latin alphabet, `A` = 0
//! through `Z` = 25. `I` and `O` are never valid MGRS letters, so the grid
//! alphabet proper has 24 letters; a position in that shorter alphabet is
//! called an *ordinal* below.

use std::fmt::Display;

pub(crate) const LETTER_A: u8 = 0;
pub(crate) const LETTER_B: u8 = 1;
pub(crate) const LETTER_C: u8 = 2;
pub(crate) const LETTER_D: u8 = 3;
pub(crate) const LETTER_E: u8 = 4;
pub(crate) const LETTER_F: u8 = 5;
pub(crate) const LETTER_G: u8 = 6;
pub(crate) const LETTER_H: u8 = 7;
pub(crate) const LETTER_I: u8 = 8;
pub(crate) const LETTER_J: u8 = 9;
pub(crate) const LETTER_K: u8 = 10;
pub(crate) const LETTER_L: u8 = 11;
pub(crate) const LETTER_M: u8 = 12;
pub(crate) const LETTER_N: u8 = 13;
pub(crate) const LETTER_O: u8 = 14;
pub(crate) const LETTER_P: u8 = 15;
pub(crate) const LETTER_Q: u8 = 16;
pub(crate) const LETTER_R: u8 = 17;
pub(crate) const LETTER_S: u8 = 18;
pub(crate) const LETTER_T: u8 = 19;
pub(crate) const LETTER_U: u8 = 20;
pub(crate) const LETTER_V: u8 = 21;
pub(crate) const LETTER_W: u8 = 22;
pub(crate) const LETTER_X: u8 = 23;
pub(crate) const LETTER_Y: u8 = 24;
pub(crate) const LETTER_Z: u8 = 25;

/// `I` and `O` fall after `H` and after `N` once `I` is gone.
const EXCLUDED_SKIPS: [(u8, u8); 2] = [(LETTER_H, 1), (LETTER_N, 1)];

/// Maps an ASCII letter (either case) to its index.
pub(crate) fn letter_index(c: char) -> Option<u8> {
    c.is_ascii_alphabetic()
        .then(|| c.to_ascii_uppercase() as u8 - b'A')
}

pub(crate) fn letter_char(index: u8) -> char {
    char::from(b'A' + index)
}

pub(crate) fn is_excluded(index: u8) -> bool {
    index == LETTER_I || index == LETTER_O
}

/// Walks `index` forward past skipped letters. Each `(threshold, step)` pair
/// adds `step` when the running value has passed `threshold`, in order.
pub(crate) fn skip_letters(index: u8, skips: &[(u8, u8)]) -> u8 {
    skips
        .iter()
        .fold(index, |idx, &(threshold, step)| if idx > threshold { idx + step } else { idx })
}

/// Undoes [`skip_letters`] for a letter that was produced by it.
pub(crate) fn unskip_letters(index: u8, skips: &[(u8, u8)]) -> u8 {
    skips
        .iter()
        .rev()
        .fold(index, |idx, &(threshold, step)| if idx > threshold + step { idx - step } else { idx })
}

/// Letter index of the `ordinal`-th grid letter, stepping over `I` and `O`.
pub(crate) fn skip_excluded_letters(ordinal: u8) -> u8 {
    skip_letters(ordinal, &EXCLUDED_SKIPS)
}

/// Position of a grid letter among the 24 valid letters.
pub(crate) fn grid_ordinal(index: u8) -> u8 {
    unskip_letters(index, &EXCLUDED_SKIPS)
}

/// The three letters of an MGRS reference: latitude band (UTM) or polar
/// quadrant (UPS), then the column and row of the 100km grid square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GridLetters {
    pub(crate) band: u8,
    pub(crate) column: u8,
    pub(crate) row: u8,
}

impl GridLetters {
    pub(crate) fn new(band: u8, column: u8, row: u8) -> GridLetters {
        Self { band, column, row }
    }

    /// Band letter for UTM, quadrant letter (`A`, `B`, `Y`, `Z`) for UPS.
    pub fn band(&self) -> char {
        letter_char(self.band)
    }

    pub fn column(&self) -> char {
        letter_char(self.column)
    }

    pub fn row(&self) -> char {
        letter_char(self.row)
    }

    /// Letter indices (`A` = 0) in string order.
    pub fn indices(&self) -> [u8; 3] {
        [self.band, self.column, self.row]
    }
}

impl Display for GridLetters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.band(), self.column(), self.row())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipping_never_lands_on_i_or_o() {
        let letters: String = (0..24)
            .map(skip_excluded_letters)
            .map(letter_char)
            .collect();

        assert_eq!(letters, "ABCDEFGHJKLMNPQRSTUVWXYZ");
    }

    #[test]
    fn ordinal_inverts_skip() {
        for ordinal in 0..24 {
            assert_eq!(grid_ordinal(skip_excluded_letters(ordinal)), ordinal);
        }
    }

    #[test]
    fn multi_step_skips_round_trip() {
        // East polar quadrant columns: skip D/E, I and M/N/O
        let skips = [(LETTER_C, 2), (LETTER_H, 1), (LETTER_L, 3)];
        let letters: String = (0..12)
            .map(|i| skip_letters(i, &skips))
            .map(letter_char)
            .collect();
        assert_eq!(letters, "ABCFGHJKLPQR");

        for i in 0..12 {
            assert_eq!(unskip_letters(skip_letters(i, &skips), &skips), i);
        }
    }

    #[test]
    fn letter_lookup() {
        assert_eq!(letter_index('a'), Some(LETTER_A));
        assert_eq!(letter_index('Z'), Some(LETTER_Z));
        assert_eq!(letter_index('5'), None);
        assert!(is_excluded(letter_index('i').unwrap()));
        assert!(!is_excluded(LETTER_P));
    }

    #[test]
    fn grid_letters_display() {
        let letters = GridLetters::new(LETTER_S, LETTER_U, LETTER_J);
        assert_eq!(letters.to_string(), "SUJ");
        assert_eq!(letters.indices(), [18, 20, 9]);
    }
}
