//! The 15 canonical key signatures and the circle-of-fifths accidental
//! placement tables.

use crate::pitch::Accidental;

/// Order in which sharps are added to a key signature.
pub const SHARP_ORDER: [char; 7] = ['F', 'C', 'G', 'D', 'A', 'E', 'B'];

/// Order in which flats are added to a key signature.
pub const FLAT_ORDER: [char; 7] = ['B', 'E', 'A', 'D', 'G', 'C', 'F'];

/// Treble staff positions of the key-signature sharps (F5 C5 G5 D5 A4 E5 B4).
pub const SHARP_POSITIONS: [i32; 7] = [5, 2, 6, 3, 0, 4, 1];

/// Treble staff positions of the key-signature flats (B4 E5 A4 D5 G4 C5 F4).
pub const FLAT_POSITIONS: [i32; 7] = [1, 4, 0, 3, -1, 2, -2];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySignature {
    pub id: &'static str,
    pub name: &'static str,
    pub root: &'static str,
    pub major: &'static str,
    pub minor: &'static str,
    pub sharps: u8,
    pub flats: u8,
    /// Letters carrying the key's accidental, in placement order
    pub letters: &'static [char],
}

impl KeySignature {
    /// The accidental this key applies to its letters.
    pub fn accidental(&self) -> Accidental {
        if self.sharps > 0 {
            Accidental::Sharp
        } else if self.flats > 0 {
            Accidental::Flat
        } else {
            Accidental::Natural
        }
    }

    /// Whether the key already implies `accidental` on `letter`.
    pub fn implies(&self, letter: char, accidental: Accidental) -> bool {
        accidental != Accidental::Natural
            && self.accidental() == accidental
            && self.letters.contains(&letter.to_ascii_uppercase())
    }

    /// Number of accidental glyphs drawn for this key.
    pub fn glyph_count(&self) -> usize {
        self.sharps.max(self.flats) as usize
    }
}

macro_rules! key {
    ($id:literal, $name:literal, $root:literal, $major:literal, $minor:literal, $sharps:literal, $flats:literal, $letters:expr) => {
        KeySignature {
            id: $id,
            name: $name,
            root: $root,
            major: $major,
            minor: $minor,
            sharps: $sharps,
            flats: $flats,
            letters: $letters,
        }
    };
}

pub const KEY_SIGNATURES: [KeySignature; 15] = [
    key!("c_major_a_minor", "C major / A minor", "C", "C", "A", 0, 0, &[]),
    key!("g_major_e_minor", "G major / E minor", "G", "G", "E", 1, 0, &['F']),
    key!("d_major_b_minor", "D major / B minor", "D", "D", "B", 2, 0, &['F', 'C']),
    key!("a_major_f_sharp_minor", "A major / F# minor", "A", "A", "F#", 3, 0, &['F', 'C', 'G']),
    key!("e_major_c_sharp_minor", "E major / C# minor", "E", "E", "C#", 4, 0, &['F', 'C', 'G', 'D']),
    key!("b_major_g_sharp_minor", "B major / G# minor", "B", "B", "G#", 5, 0, &['F', 'C', 'G', 'D', 'A']),
    key!("f_sharp_major_d_sharp_minor", "F# major / D# minor", "F#", "F#", "D#", 6, 0, &['F', 'C', 'G', 'D', 'A', 'E']),
    key!("c_sharp_major_a_sharp_minor", "C# major / A# minor", "C#", "C#", "A#", 7, 0, &['F', 'C', 'G', 'D', 'A', 'E', 'B']),
    key!("f_major_d_minor", "F major / D minor", "F", "F", "D", 0, 1, &['B']),
    key!("b_flat_major_g_minor", "Bb major / G minor", "Bb", "Bb", "G", 0, 2, &['B', 'E']),
    key!("e_flat_major_c_minor", "Eb major / C minor", "Eb", "Eb", "C", 0, 3, &['B', 'E', 'A']),
    key!("a_flat_major_f_minor", "Ab major / F minor", "Ab", "Ab", "F", 0, 4, &['B', 'E', 'A', 'D']),
    key!("d_flat_major_b_flat_minor", "Db major / Bb minor", "Db", "Db", "Bb", 0, 5, &['B', 'E', 'A', 'D', 'G']),
    key!("g_flat_major_e_flat_minor", "Gb major / Eb minor", "Gb", "Gb", "Eb", 0, 6, &['B', 'E', 'A', 'D', 'G', 'C']),
    key!("c_flat_major_a_flat_minor", "Cb major / Ab minor", "Cb", "Cb", "Ab", 0, 7, &['B', 'E', 'A', 'D', 'G', 'C', 'F']),
];

pub const KEY_SIGNATURE_IDS: [&str; 15] = [
    "c_major_a_minor",
    "g_major_e_minor",
    "d_major_b_minor",
    "a_major_f_sharp_minor",
    "e_major_c_sharp_minor",
    "b_major_g_sharp_minor",
    "f_sharp_major_d_sharp_minor",
    "c_sharp_major_a_sharp_minor",
    "f_major_d_minor",
    "b_flat_major_g_minor",
    "e_flat_major_c_minor",
    "a_flat_major_f_minor",
    "d_flat_major_b_flat_minor",
    "g_flat_major_e_flat_minor",
    "c_flat_major_a_flat_minor",
];

/// Look up a key signature by id.
pub fn key_signature(id: &str) -> Option<&'static KeySignature> {
    KEY_SIGNATURES.iter().find(|k| k.id == id)
}
