//! Draw commands: the engine's output, independent of any surface.

use serde::Serialize;

/// What a draw command depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawClass {
    StaffLine,
    BarLine,
    Clef,
    KeySignature,
    TimeSignatureNumerator,
    TimeSignatureDenominator,
    Note,
    Rest,
    Accidental,
    AugmentationDot,
}

impl DrawClass {
    pub fn as_str(self) -> &'static str {
        match self {
            DrawClass::StaffLine => "staff-line",
            DrawClass::BarLine => "bar-line",
            DrawClass::Clef => "clef",
            DrawClass::KeySignature => "key-signature",
            DrawClass::TimeSignatureNumerator => "time-signature-numerator",
            DrawClass::TimeSignatureDenominator => "time-signature-denominator",
            DrawClass::Note => "note",
            DrawClass::Rest => "rest",
            DrawClass::Accidental => "accidental",
            DrawClass::AugmentationDot => "augmentation-dot",
        }
    }
}

/// A primitive positioned in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DrawCommand {
    #[serde(rename_all = "camelCase")]
    Line {
        class: DrawClass,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke_width: f64,
    },
    /// A single SMuFL glyph, horizontally centred on `x`, baseline at `y`.
    /// `text` is empty when the glyph code could not be resolved.
    #[serde(rename_all = "camelCase")]
    Glyph {
        class: DrawClass,
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
    },
}

impl DrawCommand {
    pub fn class(&self) -> DrawClass {
        match self {
            DrawCommand::Line { class, .. } | DrawCommand::Glyph { class, .. } => *class,
        }
    }
}

/// A glyph relative to an anchor: `dx` from the anchor x, `y` from the top
/// line of the system.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphPlacement {
    pub glyph: String,
    pub dx: f64,
    pub y: f64,
}

impl GlyphPlacement {
    pub(super) fn at(&self, class: DrawClass, x: f64, system_y: f64, font_size: f64) -> DrawCommand {
        DrawCommand::Glyph {
            class,
            x: x + self.dx,
            y: system_y + self.y,
            text: self.glyph.clone(),
            font_size,
        }
    }
}
