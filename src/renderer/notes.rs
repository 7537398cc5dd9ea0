//! Note rendering: head or rest glyph plus its accidental and
//! augmentation dot.

use crate::model::{Note, NoteEvent};
use crate::pitch::{classify_accidental, resolve_staff_position, should_render_accidental};
use crate::tables::glyphs::{accidental_code, AUGMENTATION_DOT};
use crate::tables::{decode_glyph, note_code, rest_code, Clef, KeySignature};
use super::constants::*;
use super::draw::{DrawClass, DrawCommand, GlyphPlacement};
use super::layout::vertical_position;

/// The glyphs of one note, relative to the note's x and its system's top
/// line. All three share the same y.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteGlyphs {
    pub head: GlyphPlacement,
    pub is_rest: bool,
    pub accidental: Option<GlyphPlacement>,
    pub dot: Option<GlyphPlacement>,
}

impl NoteGlyphs {
    pub(super) fn commands(&self, x: f64, system_y: f64, font_size: f64) -> Vec<DrawCommand> {
        let head_class = if self.is_rest { DrawClass::Rest } else { DrawClass::Note };
        let mut commands = vec![self.head.at(head_class, x, system_y, font_size)];
        if let Some(acc) = &self.accidental {
            commands.push(acc.at(DrawClass::Accidental, x, system_y, font_size));
        }
        if let Some(dot) = &self.dot {
            commands.push(dot.at(DrawClass::AugmentationDot, x, system_y, font_size));
        }
        commands
    }
}

/// Lay out one note under `clef` and `key`.
///
/// Rests sit on the middle line and never carry an accidental. A pitched
/// note gets an accidental glyph only when the key does not already imply
/// it; the glyph moves further left when the note is also dotted.
pub fn render_note(note: &Note, clef: &Clef, key: &KeySignature, radius: f64) -> NoteGlyphs {
    let duration = note.duration();

    let (head, y, accidental) = match note.event {
        NoteEvent::Rest { .. } => (rest_code(duration.class), vertical_position(0, radius), None),
        NoteEvent::Pitched { pitch, direction, .. } => {
            let name = pitch.to_string();
            let y = vertical_position(resolve_staff_position(&name, clef), radius);
            let accidental = should_render_accidental(&name, key).then(|| {
                let offset = if duration.dotted { DOTTED_ACCIDENTAL_OFFSET } else { ACCIDENTAL_OFFSET };
                GlyphPlacement {
                    glyph: decode_glyph(accidental_code(classify_accidental(&name))),
                    dx: -radius * offset,
                    y,
                }
            });
            (note_code(direction, duration.class), y, accidental)
        }
    };

    let dot = duration.dotted.then(|| GlyphPlacement {
        glyph: decode_glyph(AUGMENTATION_DOT),
        dx: -radius * DOT_OFFSET,
        y,
    });

    NoteGlyphs {
        head: GlyphPlacement {
            glyph: decode_glyph(head),
            dx: 0.0,
            y,
        },
        is_rest: note.event.is_rest(),
        accidental,
        dot,
    }
}
