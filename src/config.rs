//! Render configuration with named defaults.
//!
//! Every field has a default so callers can send partial JSON; nothing in
//! the engine falls back on absent values by itself.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoreError};
use crate::model::{Duration, StemDirection};
use crate::tables::{clef, key_signature, time_signature, Clef, KeySignature, TimeSignature};

pub const DEFAULT_RADIUS: f64 = 10.0;
pub const DEFAULT_VERTICAL_PADDING: f64 = 40.0;
pub const DEFAULT_SYSTEM_MARGIN: f64 = 60.0;
pub const DEFAULT_START_PADDING: f64 = 20.0;
pub const DEFAULT_END_PADDING: f64 = 20.0;
pub const DEFAULT_FIRST_BAR_WIDTH: f64 = 200.0;
pub const DEFAULT_REGULAR_BAR_WIDTH: f64 = 160.0;
pub const DEFAULT_FONT_SCALE: f64 = 1.0;
pub const DEFAULT_CANVAS_WIDTH: f64 = 820.0;
pub const DEFAULT_MAX_BARS: usize = 1024;

/// How bars are distributed over systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SystemPolicy {
    /// As many bars per system as fit the canvas width
    #[default]
    FitWidth,
    /// A fixed number of bars per system
    BarsPerSystem(usize),
}

/// Geometry parameters for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Staff line spacing; the base unit of every other offset
    pub radius: f64,
    pub vertical_padding: f64,
    /// Vertical space one system takes; the staff itself is `4·radius` tall
    pub staff_height: f64,
    pub system_margin: f64,
    pub start_padding: f64,
    pub end_padding: f64,
    pub first_bar_width: f64,
    pub regular_bar_width: f64,
    pub font_scale: f64,
    pub canvas_width: f64,
    pub system_policy: SystemPolicy,
    /// Scores reaching past this many bars are refused
    pub max_bars: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            vertical_padding: DEFAULT_VERTICAL_PADDING,
            staff_height: DEFAULT_RADIUS * 4.0,
            system_margin: DEFAULT_SYSTEM_MARGIN,
            start_padding: DEFAULT_START_PADDING,
            end_padding: DEFAULT_END_PADDING,
            first_bar_width: DEFAULT_FIRST_BAR_WIDTH,
            regular_bar_width: DEFAULT_REGULAR_BAR_WIDTH,
            font_scale: DEFAULT_FONT_SCALE,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            system_policy: SystemPolicy::FitWidth,
            max_bars: DEFAULT_MAX_BARS,
        }
    }
}

impl LayoutConfig {
    /// Glyph font size. A SMuFL em spans the four staff spaces.
    pub fn font_size(&self) -> f64 {
        self.radius * 4.0 * self.font_scale
    }
}

/// Clef, key and time signature selection by table id, plus the values
/// notes fall back on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreSettings {
    pub clef: String,
    pub key_signature: String,
    pub time_signature: String,
    pub note_defaults: NoteDefaults,
}

impl Default for ScoreSettings {
    fn default() -> Self {
        Self {
            clef: "treble".into(),
            key_signature: "c_major_a_minor".into(),
            time_signature: "4_4_common_time".into(),
            note_defaults: NoteDefaults::default(),
        }
    }
}

impl ScoreSettings {
    pub fn new(clef: &str, key_signature: &str, time_signature: &str) -> Self {
        Self {
            clef: clef.into(),
            key_signature: key_signature.into(),
            time_signature: time_signature.into(),
            note_defaults: NoteDefaults::default(),
        }
    }

    /// Look the three ids up in the reference tables.
    pub fn resolve(&self) -> Result<Signatures> {
        Ok(Signatures {
            clef: clef(&self.clef).ok_or_else(|| ScoreError::UnknownClef(self.clef.clone()))?,
            key: key_signature(&self.key_signature)
                .ok_or_else(|| ScoreError::UnknownKeySignature(self.key_signature.clone()))?,
            time: time_signature(&self.time_signature)
                .ok_or_else(|| ScoreError::UnknownTimeSignature(self.time_signature.clone()))?,
        })
    }
}

/// Resolved table entries for one render pass.
#[derive(Debug, Clone, Copy)]
pub struct Signatures {
    pub clef: &'static Clef,
    pub key: &'static KeySignature,
    pub time: &'static TimeSignature,
}

/// Values applied when a note leaves a field out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NoteDefaults {
    /// Bar-relative placement for notes with a bar but no position
    pub position: f64,
    pub duration: Duration,
    pub direction: StemDirection,
}

impl Default for NoteDefaults {
    fn default() -> Self {
        Self {
            position: 0.5,
            duration: Duration::QUARTER,
            direction: StemDirection::Down,
        }
    }
}
