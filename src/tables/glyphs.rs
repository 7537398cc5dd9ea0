//! SMuFL glyph codes for notes, rests, accidentals and augmentation dots.
//!
//! Codes are kept in their `U+XXXX` form and decoded at draw time.

use crate::model::{DurationClass, StemDirection};
use crate::pitch::Accidental;

pub const ACCIDENTAL_SHARP: &str = "U+E262";
pub const ACCIDENTAL_FLAT: &str = "U+E260";
pub const ACCIDENTAL_NATURAL: &str = "U+E261";
pub const AUGMENTATION_DOT: &str = "U+E1E7";

/// Per-duration glyphs and length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationInfo {
    pub name: &'static str,
    pub description: &'static str,
    /// Length in quarter notes (undotted)
    pub beats: f64,
    pub up_code: &'static str,
    pub down_code: &'static str,
    pub rest_code: &'static str,
}

const DOUBLE: DurationInfo = DurationInfo {
    name: "Breve",
    description: "Double Note",
    beats: 8.0,
    up_code: "U+ECA0",
    down_code: "U+ECA0",
    rest_code: "U+E4E2",
};

const WHOLE: DurationInfo = DurationInfo {
    name: "Semibreve",
    description: "Whole Note",
    beats: 4.0,
    up_code: "U+ECA2",
    down_code: "U+ECA2",
    rest_code: "U+E4E3",
};

const HALF: DurationInfo = DurationInfo {
    name: "Minim",
    description: "Half Note",
    beats: 2.0,
    up_code: "U+ECA3",
    down_code: "U+ECA4",
    rest_code: "U+E4E4",
};

const QUARTER: DurationInfo = DurationInfo {
    name: "Crotchet",
    description: "Quarter Note",
    beats: 1.0,
    up_code: "U+ECA5",
    down_code: "U+ECA6",
    rest_code: "U+E4E5",
};

const EIGHTH: DurationInfo = DurationInfo {
    name: "Quaver",
    description: "Eighth Note",
    beats: 0.5,
    up_code: "U+ECA7",
    down_code: "U+ECA8",
    rest_code: "U+E4E6",
};

const SIXTEENTH: DurationInfo = DurationInfo {
    name: "Semiquaver",
    description: "Sixteenth Note",
    beats: 0.25,
    up_code: "U+E1D9",
    down_code: "U+E1DA",
    rest_code: "U+E4E7",
};

pub fn duration_info(class: DurationClass) -> &'static DurationInfo {
    match class {
        DurationClass::Double => &DOUBLE,
        DurationClass::Whole => &WHOLE,
        DurationClass::Half => &HALF,
        DurationClass::Quarter => &QUARTER,
        DurationClass::Eighth => &EIGHTH,
        DurationClass::Sixteenth => &SIXTEENTH,
    }
}

/// Note glyph for a stem direction and duration class.
pub fn note_code(direction: StemDirection, class: DurationClass) -> &'static str {
    let info = duration_info(class);
    match direction {
        StemDirection::Up => info.up_code,
        StemDirection::Down => info.down_code,
    }
}

pub fn rest_code(class: DurationClass) -> &'static str {
    duration_info(class).rest_code
}

pub fn accidental_code(accidental: Accidental) -> &'static str {
    match accidental {
        Accidental::Sharp => ACCIDENTAL_SHARP,
        Accidental::Flat => ACCIDENTAL_FLAT,
        Accidental::Natural => ACCIDENTAL_NATURAL,
    }
}

/// Decode a `U+XXXX` code into the glyph it names.
///
/// Malformed codes decode to an empty string so the glyph renders as nothing.
pub fn decode_glyph(code: &str) -> String {
    code.trim()
        .strip_prefix("U+")
        .and_then(|hex| u32::from_str_radix(hex, 16).ok())
        .and_then(char::from_u32)
        .map(String::from)
        .unwrap_or_default()
}
