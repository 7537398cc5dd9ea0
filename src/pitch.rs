//! Pitch and accidental resolution.
//!
//! Raw pitch strings are resolved leniently (unknown names sit on position 0)
//! because they come straight from editor documents. [`PitchName`] is the
//! strict form used when note records cross into the crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tables::clef::Clef;
use crate::tables::key::KeySignature;
use crate::tables::pitch::{canonical_staff_position, MAX_OCTAVE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    Sharp,
    Flat,
    Natural,
}

impl Accidental {
    fn from_mark(c: char) -> Option<Self> {
        match c {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            _ => None,
        }
    }

    pub fn mark(self) -> &'static str {
        match self {
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
            Accidental::Natural => "",
        }
    }
}

/// Staff position of `pitch` under `clef`.
///
/// Looks the name up in the treble-referenced table and adds the clef
/// offset. Names missing from the table fall back to position 0 before the
/// clef adjustment; no error is raised.
pub fn resolve_staff_position(pitch: &str, clef: &Clef) -> i32 {
    let base = canonical_staff_position(pitch).unwrap_or_else(|| {
        log::warn!("unknown pitch '{pitch}', placing on staff position 0");
        0
    });
    base + clef.offset
}

/// Accidental class of a raw pitch string.
///
/// Only `#` and `b` are significant. If more than one marker is present
/// the first one wins; [`PitchName`] rejects such names outright.
pub fn classify_accidental(pitch: &str) -> Accidental {
    pitch
        .chars()
        .find_map(Accidental::from_mark)
        .unwrap_or(Accidental::Natural)
}

/// Whether a note needs its own accidental glyph under `key`.
///
/// Each note is judged against the key signature alone; accidentals stated
/// earlier in the bar are not remembered.
pub fn should_render_accidental(pitch: &str, key: &KeySignature) -> bool {
    let accidental = classify_accidental(pitch);
    if accidental == Accidental::Natural {
        return false;
    }
    let letter = pitch.chars().next().unwrap_or(' ');
    !key.implies(letter, accidental)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid pitch name '{0}': expected a letter A-G, an optional '#' or 'b' and an octave 0-10")]
pub struct InvalidPitchName(pub String);

/// A validated pitch name such as `F#4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PitchName {
    pub letter: char,
    pub accidental: Accidental,
    pub octave: u8,
}

impl PitchName {
    pub fn new(letter: char, accidental: Accidental, octave: u8) -> Self {
        Self {
            letter,
            accidental,
            octave,
        }
    }

    /// Staff position under `clef`.
    pub fn staff_position(&self, clef: &Clef) -> i32 {
        resolve_staff_position(&self.to_string(), clef)
    }
}

impl FromStr for PitchName {
    type Err = InvalidPitchName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidPitchName(s.to_string());
        let mut chars = s.chars();

        let letter = chars.next().filter(|c| ('A'..='G').contains(c)).ok_or_else(invalid)?;
        let rest = chars.as_str();

        let (accidental, digits) = match rest.chars().next().and_then(Accidental::from_mark) {
            Some(acc) => (acc, &rest[1..]),
            None => (Accidental::Natural, rest),
        };

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) || digits.len() > 2 {
            return Err(invalid());
        }
        let octave: u8 = digits.parse().map_err(|_| invalid())?;
        if octave as i32 > MAX_OCTAVE || (digits.len() == 2 && digits.starts_with('0')) {
            return Err(invalid());
        }

        Ok(PitchName::new(letter, accidental, octave))
    }
}

impl fmt::Display for PitchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.letter, self.accidental.mark(), self.octave)
    }
}

impl Serialize for PitchName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PitchName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
