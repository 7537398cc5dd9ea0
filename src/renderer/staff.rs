//! Staff rendering: staff lines, bar lines, clef, key signature and time
//! signature for one system.

use crate::tables::{decode_glyph, Clef, KeySignature, TimeSignature, FLAT_POSITIONS, SHARP_POSITIONS};
use crate::pitch::Accidental;
use crate::tables::glyphs::accidental_code;
use super::constants::*;
use super::draw::{DrawClass, DrawCommand, GlyphPlacement};
use super::layout::{bar_x, key_signature_x, time_signature_x, vertical_position, BarGeometry, SystemLayout};

/// Key signature glyphs, left to right.
///
/// `dx` is measured from the first glyph; each glyph sits one radius
/// further right. Sharps and flats follow their fixed treble positions,
/// shifted by the clef offset.
pub fn render_key_signature(key: &KeySignature, clef: &Clef, radius: f64) -> Vec<GlyphPlacement> {
    let accidental = key.accidental();
    let positions: &[i32] = match accidental {
        Accidental::Sharp => &SHARP_POSITIONS,
        Accidental::Flat => &FLAT_POSITIONS,
        Accidental::Natural => &[],
    };
    let glyph = decode_glyph(accidental_code(accidental));

    positions
        .iter()
        .take(key.glyph_count())
        .enumerate()
        .map(|(i, &pos)| GlyphPlacement {
            glyph: glyph.clone(),
            dx: i as f64 * radius * KEY_SIG_STEP,
            y: vertical_position(pos + clef.offset, radius),
        })
        .collect()
}

/// Numerator and denominator glyphs, stacked on a shared x.
pub fn render_time_signature(time: &TimeSignature, radius: f64) -> [GlyphPlacement; 2] {
    [
        GlyphPlacement {
            glyph: decode_glyph(time.numerator_code),
            dx: 0.0,
            y: radius * TIME_SIG_NUMERATOR_Y,
        },
        GlyphPlacement {
            glyph: decode_glyph(time.denominator_code),
            dx: 0.0,
            y: radius * TIME_SIG_DENOMINATOR_Y,
        },
    ]
}

pub fn render_clef(clef: &Clef, radius: f64) -> GlyphPlacement {
    GlyphPlacement {
        glyph: decode_glyph(clef.code),
        dx: 0.0,
        y: vertical_position(clef.anchor, radius),
    }
}

/// The five staff lines of a system, spanning its bars plus end padding.
pub(super) fn staff_lines(system: &SystemLayout, geometry: &BarGeometry, radius: f64) -> Vec<DrawCommand> {
    let x1 = geometry.start_padding;
    let x2 = geometry.staff_end(system.bar_count);
    (0..STAFF_LINES)
        .map(|i| {
            let y = system.y + i as f64 * radius;
            DrawCommand::Line {
                class: DrawClass::StaffLine,
                x1,
                y1: y,
                x2,
                y2: y,
                stroke_width: STAFF_LINE_WIDTH,
            }
        })
        .collect()
}

/// Bar lines at the left of every bar plus the closing one, spanning the
/// five staff lines.
pub(super) fn bar_lines(system: &SystemLayout, geometry: &BarGeometry, radius: f64) -> Vec<DrawCommand> {
    let height = (STAFF_LINES - 1) as f64 * radius;
    (0..=system.bar_count)
        .map(|k| {
            let x = bar_x(k, geometry);
            let boundary = k == 0 || k == system.bar_count;
            DrawCommand::Line {
                class: DrawClass::BarLine,
                x1: x,
                y1: system.y,
                x2: x,
                y2: system.y + height,
                stroke_width: if boundary { SYSTEM_BARLINE_WIDTH } else { BARLINE_WIDTH },
            }
        })
        .collect()
}

/// Clef and key signature on every system; time signature on the first.
pub(super) fn system_prefix(
    system: &SystemLayout,
    clef: &Clef,
    key: &KeySignature,
    time: &TimeSignature,
    start_padding: f64,
    radius: f64,
    font_size: f64,
) -> Vec<DrawCommand> {
    let mut commands = Vec::new();

    commands.push(render_clef(clef, radius).at(
        DrawClass::Clef,
        start_padding + radius * CLEF_X,
        system.y,
        font_size,
    ));

    let key_x = key_signature_x(start_padding, radius);
    commands.extend(
        render_key_signature(key, clef, radius)
            .iter()
            .map(|g| g.at(DrawClass::KeySignature, key_x, system.y, font_size)),
    );

    if system.index == 0 {
        let time_x = time_signature_x(start_padding, key, radius);
        let [numerator, denominator] = render_time_signature(time, radius);
        commands.push(numerator.at(DrawClass::TimeSignatureNumerator, time_x, system.y, font_size));
        commands.push(denominator.at(DrawClass::TimeSignatureDenominator, time_x, system.y, font_size));
    }

    commands
}
