//! Staff renderer: turns a note list into positioned draw commands and,
//! from those, a self-contained SVG string.
//!
//! A render pass is a pure fold over the notes. It resolves the clef, key
//! and time signature once, assigns every note a bar, breaks the bars into
//! systems and then emits staff furniture followed by note glyphs.

mod constants;
mod draw;
mod layout;
mod notes;
mod staff;
mod svg_builder;

pub use draw::{DrawClass, DrawCommand, GlyphPlacement};
pub use layout::{
    bar_x, bars_per_system, canvas_height, layout_systems, note_x, place_notes, system_origin,
    vertical_position, BarGeometry, PlacedNote, SystemLayout,
};
pub use notes::{render_note, NoteGlyphs};
pub use staff::{render_clef, render_key_signature, render_time_signature};

use serde::Serialize;

use crate::config::{LayoutConfig, ScoreSettings};
use crate::error::{Result, ScoreError};
use crate::model::Note;
use svg_builder::{empty_svg, SvgBuilder};

/// The output of a render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedScore {
    pub width: f64,
    pub height: f64,
    pub systems: usize,
    pub commands: Vec<DrawCommand>,
}

/// Lay out `notes` on a staff.
///
/// Fails when a settings id is not in the reference tables or the notes
/// reach past `config.max_bars`. Notes are drawn in input order after the
/// staff furniture of every system.
pub fn render_score(notes: &[Note], config: &LayoutConfig, settings: &ScoreSettings) -> Result<RenderedScore> {
    let sigs = settings.resolve()?;
    let radius = config.radius;
    let font_size = config.font_size();
    let geometry = BarGeometry::new(config, sigs.key);

    let placed = place_notes(notes, sigs.time, &settings.note_defaults);
    let total_bars = placed.iter().map(|p| p.bar.saturating_add(1)).max().unwrap_or(1);
    if total_bars > config.max_bars {
        return Err(ScoreError::TooManyBars {
            bars: total_bars,
            limit: config.max_bars,
        });
    }
    let systems = layout_systems(total_bars, config);

    let mut commands = Vec::new();
    for system in &systems {
        commands.extend(staff::staff_lines(system, &geometry, radius));
        commands.extend(staff::bar_lines(system, &geometry, radius));
        commands.extend(staff::system_prefix(
            system,
            sigs.clef,
            sigs.key,
            sigs.time,
            config.start_padding,
            radius,
            font_size,
        ));
    }

    for p in &placed {
        let Some(system) = systems.iter().find(|s| s.contains_bar(p.bar)) else {
            continue;
        };
        let local_bar = p.bar - system.first_bar;
        let x = note_x(p.position, local_bar, &geometry);
        log::debug!(
            "rendering note {} in bar {} at position {:.3} (x = {:.1})",
            p.note.index,
            p.bar,
            p.position,
            x
        );
        let glyphs = render_note(p.note, sigs.clef, sigs.key, radius);
        commands.extend(glyphs.commands(x, system.y, font_size));
    }

    Ok(RenderedScore {
        width: config.canvas_width,
        height: canvas_height(systems.len(), config),
        systems: systems.len(),
        commands,
    })
}

/// Render `notes` into a complete SVG string.
pub fn render_score_to_svg(notes: &[Note], config: &LayoutConfig, settings: &ScoreSettings) -> Result<String> {
    if config.radius <= 0.0 || config.canvas_width <= 0.0 {
        log::warn!("layout has no drawable area (radius {}, width {})", config.radius, config.canvas_width);
        return Ok(empty_svg("Invalid layout"));
    }

    let rendered = render_score(notes, config, settings)?;
    Ok(rendered_to_svg(&rendered))
}

/// Serialise already computed draw commands.
pub fn rendered_to_svg(rendered: &RenderedScore) -> String {
    let mut svg = SvgBuilder::new(rendered.width, rendered.height);
    svg.rect(0.0, 0.0, rendered.width, rendered.height, "white");
    for command in &rendered.commands {
        svg.command(command);
    }
    svg.build()
}
