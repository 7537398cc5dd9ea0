//! Pitch-name to staff-position table.
//!
//! Positions are diatonic steps relative to the treble reference, middle C
//! (C4) at −5. Every letter appears plain, sharp and flat for octaves 0–10;
//! accidentals do not move a note off its letter's line or space.

use std::collections::HashMap;

use once_cell::sync::Lazy;

pub const LETTERS: [char; 7] = ['C', 'D', 'E', 'F', 'G', 'A', 'B'];
pub const ACCIDENTAL_MARKS: [&str; 3] = ["", "#", "b"];
pub const MIN_OCTAVE: i32 = 0;
pub const MAX_OCTAVE: i32 = 10;

const MIDDLE_C_POSITION: i32 = -5;
const MIDDLE_C_OCTAVE: i32 = 4;

pub static PITCH_TABLE: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    let mut table = HashMap::with_capacity(LETTERS.len() * ACCIDENTAL_MARKS.len() * 11);
    for octave in MIN_OCTAVE..=MAX_OCTAVE {
        for (step, letter) in LETTERS.iter().enumerate() {
            let position = MIDDLE_C_POSITION + (octave - MIDDLE_C_OCTAVE) * 7 + step as i32;
            for mark in ACCIDENTAL_MARKS {
                table.insert(format!("{letter}{mark}{octave}"), position);
            }
        }
    }
    table
});

/// Treble-referenced staff position of a pitch name, if the table knows it.
pub fn canonical_staff_position(name: &str) -> Option<i32> {
    PITCH_TABLE.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_eleven_octaves() {
        assert_eq!(PITCH_TABLE.len(), 7 * 3 * 11);
        assert_eq!(canonical_staff_position("C0"), Some(-33));
        assert_eq!(canonical_staff_position("B10"), Some(43));
    }

    #[test]
    fn middle_c_and_neighbours() {
        assert_eq!(canonical_staff_position("C4"), Some(-5));
        assert_eq!(canonical_staff_position("C#4"), Some(-5));
        assert_eq!(canonical_staff_position("Db4"), Some(-4));
        assert_eq!(canonical_staff_position("B3"), Some(-6));
        assert_eq!(canonical_staff_position("C5"), Some(2));
    }

    #[test]
    fn unknown_names_are_absent() {
        assert_eq!(canonical_staff_position("H4"), None);
        assert_eq!(canonical_staff_position("C11"), None);
        assert_eq!(canonical_staff_position("c4"), None);
        assert_eq!(canonical_staff_position(""), None);
    }
}
