//! Note model.
//!
//! [`NoteRecord`] is the loose JSON shape editor documents, the importer and
//! the suggestion provider exchange. [`Note`] is the validated form the
//! layout engine works on; conversion happens once, at the boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::NoteDefaults;
use crate::error::{Result, ScoreError};
use crate::pitch::PitchName;
use crate::tables::glyphs::duration_info;

/// Undotted duration class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationClass {
    Double,
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
}

impl DurationClass {
    pub const ALL: [DurationClass; 6] = [
        DurationClass::Double,
        DurationClass::Whole,
        DurationClass::Half,
        DurationClass::Quarter,
        DurationClass::Eighth,
        DurationClass::Sixteenth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DurationClass::Double => "double",
            DurationClass::Whole => "whole",
            DurationClass::Half => "half",
            DurationClass::Quarter => "quarter",
            DurationClass::Eighth => "eighth",
            DurationClass::Sixteenth => "sixteenth",
        }
    }
}

/// A duration class, optionally dotted. Serialized as `quarter`,
/// `dotted_quarter` and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Duration {
    pub class: DurationClass,
    pub dotted: bool,
}

impl Duration {
    pub const QUARTER: Duration = Duration::plain(DurationClass::Quarter);

    pub const fn plain(class: DurationClass) -> Self {
        Self { class, dotted: false }
    }

    pub const fn dotted(class: DurationClass) -> Self {
        Self { class, dotted: true }
    }

    /// Length in quarter notes, including the augmentation dot.
    pub fn beats(&self) -> f64 {
        let beats = duration_info(self.class).beats;
        if self.dotted {
            beats * 1.5
        } else {
            beats
        }
    }

    /// Length in whole notes.
    pub fn whole_notes(&self) -> f64 {
        self.beats() / 4.0
    }

    /// All twelve duration keys.
    pub fn all() -> impl Iterator<Item = Duration> {
        DurationClass::ALL
            .into_iter()
            .flat_map(|c| [Duration::plain(c), Duration::dotted(c)])
    }
}

impl Default for Duration {
    fn default() -> Self {
        Duration::QUARTER
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dotted {
            write!(f, "dotted_{}", self.class.as_str())
        } else {
            f.write_str(self.class.as_str())
        }
    }
}

impl FromStr for Duration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (dotted, base) = match s.strip_prefix("dotted_").or_else(|| s.strip_prefix("dotted-")) {
            Some(base) => (true, base),
            None => (false, s),
        };
        DurationClass::ALL
            .into_iter()
            .find(|c| c.as_str() == base)
            .map(|class| Duration { class, dotted })
            .ok_or_else(|| format!("unknown duration '{s}'"))
    }
}

impl TryFrom<String> for Duration {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Duration> for String {
    fn from(value: Duration) -> Self {
        value.to_string()
    }
}

/// Stem direction; only selects the glyph variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemDirection {
    Up,
    #[default]
    Down,
}

impl FromStr for StemDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "up" => Ok(StemDirection::Up),
            "down" => Ok(StemDirection::Down),
            other => Err(format!("unknown stem direction '{other}'")),
        }
    }
}

/// Who wrote a note. Carried through, never rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Ai,
}

/// What a note sounds like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEvent {
    Rest {
        duration: Duration,
    },
    Pitched {
        pitch: PitchName,
        duration: Duration,
        direction: StemDirection,
    },
}

impl NoteEvent {
    pub fn duration(&self) -> Duration {
        match *self {
            NoteEvent::Rest { duration } | NoteEvent::Pitched { duration, .. } => duration,
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, NoteEvent::Rest { .. })
    }

    pub fn pitch(&self) -> Option<PitchName> {
        match *self {
            NoteEvent::Pitched { pitch, .. } => Some(pitch),
            NoteEvent::Rest { .. } => None,
        }
    }
}

/// A validated note in a score.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Stable identity; notes sharing an index sound together
    pub index: u32,
    pub event: NoteEvent,
    pub bar_index: Option<usize>,
    /// Horizontal placement within the bar, 0..=1
    pub position: Option<f64>,
    pub start_time: Option<f64>,
    pub origin: Option<Origin>,
}

impl Note {
    pub fn rest(index: u32, duration: Duration) -> Self {
        Self::from_event(index, NoteEvent::Rest { duration })
    }

    pub fn pitched(index: u32, pitch: PitchName, duration: Duration) -> Self {
        Self::from_event(
            index,
            NoteEvent::Pitched {
                pitch,
                duration,
                direction: StemDirection::default(),
            },
        )
    }

    fn from_event(index: u32, event: NoteEvent) -> Self {
        Self {
            index,
            event,
            bar_index: None,
            position: None,
            start_time: None,
            origin: None,
        }
    }

    pub fn in_bar(mut self, bar_index: usize, position: f64) -> Self {
        self.bar_index = Some(bar_index);
        self.position = Some(position);
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn duration(&self) -> Duration {
        self.event.duration()
    }

    /// Validate a wire record.
    ///
    /// A rest's pitch is ignored. Missing duration and direction take the
    /// values in `defaults`; a missing position stays unset so the layout
    /// can choose it.
    pub fn from_record(record: &NoteRecord, defaults: &NoteDefaults) -> Result<Self> {
        let index = record.note_index;
        let invalid = |reason: String| ScoreError::invalid_note(index, reason);

        let duration = match record.duration.as_deref() {
            Some(d) => d.parse::<Duration>().map_err(invalid)?,
            None => defaults.duration,
        };

        let event = if record.rest.unwrap_or(false) {
            NoteEvent::Rest { duration }
        } else {
            let pitch = record
                .note
                .as_deref()
                .unwrap_or("")
                .parse::<PitchName>()
                .map_err(|e| invalid(e.to_string()))?;
            let direction = match record.direction.as_deref() {
                Some(d) => d.parse::<StemDirection>().map_err(invalid)?,
                None => defaults.direction,
            };
            NoteEvent::Pitched {
                pitch,
                duration,
                direction,
            }
        };

        if let Some(p) = record.position {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(format!("position {p} outside 0..=1")));
            }
        }

        Ok(Note {
            index,
            event,
            bar_index: record.bar_index.map(|b| b as usize),
            position: record.position,
            start_time: record.start_time,
            origin: record.origin,
        })
    }

    pub fn to_record(&self) -> NoteRecord {
        let (note, direction) = match self.event {
            NoteEvent::Pitched {
                pitch, direction, ..
            } => (Some(pitch.to_string()), Some(direction)),
            NoteEvent::Rest { .. } => (Some(String::new()), None),
        };
        NoteRecord {
            note_index: self.index,
            note,
            duration: Some(self.duration().to_string()),
            bar_index: self.bar_index.map(|b| b as u32),
            direction: direction.map(|d| match d {
                StemDirection::Up => "up".to_string(),
                StemDirection::Down => "down".to_string(),
            }),
            rest: Some(self.event.is_rest()),
            position: self.position,
            start_time: self.start_time,
            origin: self.origin,
        }
    }
}

/// The JSON note shape used by editor documents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub note_index: u32,
    #[serde(default, alias = "pitch", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
}

/// Validate a list of records, failing on the first bad one.
pub fn notes_from_records(records: &[NoteRecord], defaults: &NoteDefaults) -> Result<Vec<Note>> {
    records
        .iter()
        .map(|r| Note::from_record(r, defaults))
        .collect()
}

pub fn notes_to_records(notes: &[Note]) -> Vec<NoteRecord> {
    notes.iter().map(Note::to_record).collect()
}
