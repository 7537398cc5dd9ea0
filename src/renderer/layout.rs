//! Layout computation: the pure geometry that maps staff positions, bars
//! and systems to canvas coordinates, and the assignment of notes to bars.

use std::collections::HashMap;

use crate::config::{LayoutConfig, NoteDefaults, SystemPolicy};
use crate::model::Note;
use crate::tables::{KeySignature, TimeSignature};
use super::constants::*;

// ═══════════════════════════════════════════════════════════════════════
// Vertical geometry
// ═══════════════════════════════════════════════════════════════════════

/// Y of a staff position, relative to the top line of its system.
///
/// Position 0 sits on the middle line (`2·radius`); each step up moves half
/// a radius towards the top of the page.
pub fn vertical_position(staff_position: i32, radius: f64) -> f64 {
    2.0 * radius - (staff_position as f64 * radius) / 2.0
}

/// Y of the top line of system `system_index`.
pub fn system_origin(
    system_index: usize,
    staff_height: f64,
    system_margin: f64,
    vertical_padding: f64,
) -> f64 {
    vertical_padding + system_index as f64 * (staff_height + system_margin)
}

/// Total canvas height for `system_count` systems.
pub fn canvas_height(system_count: usize, config: &LayoutConfig) -> f64 {
    let n = system_count.max(1) as f64;
    2.0 * config.vertical_padding + n * config.staff_height + (n - 1.0) * config.system_margin
}

// ═══════════════════════════════════════════════════════════════════════
// Horizontal geometry
// ═══════════════════════════════════════════════════════════════════════

/// Horizontal parameters shared by every system of a render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub start_padding: f64,
    pub first_bar_width: f64,
    pub regular_bar_width: f64,
    pub end_padding: f64,
    pub canvas_width: f64,
    /// Gap kept free next to each bar line
    pub bar_padding: f64,
    /// Extra leading space of the first bar, taken by clef, key and time
    pub lead_in: f64,
}

impl BarGeometry {
    pub fn new(config: &LayoutConfig, key: &KeySignature) -> Self {
        let r = config.radius;
        let time_x = time_signature_x(config.start_padding, key, r);
        Self {
            start_padding: config.start_padding,
            first_bar_width: config.first_bar_width,
            regular_bar_width: config.regular_bar_width,
            end_padding: config.end_padding,
            canvas_width: config.canvas_width,
            bar_padding: r * BAR_PADDING,
            lead_in: time_x - config.start_padding + r * TIME_SIG_HALF_WIDTH,
        }
    }

    pub fn bar_width(&self, bar_index: usize) -> f64 {
        if bar_index == 0 {
            self.first_bar_width
        } else {
            self.regular_bar_width
        }
    }

    /// Right edge of the staff for a system of `bars` bars.
    pub fn staff_end(&self, bars: usize) -> f64 {
        match bars {
            0 => self.start_padding,
            n => self.start_padding + self.first_bar_width + (n - 1) as f64 * self.regular_bar_width + self.end_padding,
        }
    }
}

/// X of the left bar line of bar `bar_index` within a system.
///
/// Bar 0 starts at the start padding and is `first_bar_width` wide; later
/// bars are `regular_bar_width` wide. Never exceeds `canvas_width - end_padding`.
pub fn bar_x(bar_index: usize, geometry: &BarGeometry) -> f64 {
    let x = match bar_index {
        0 => geometry.start_padding,
        k => geometry.start_padding + geometry.first_bar_width + (k - 1) as f64 * geometry.regular_bar_width,
    };
    x.min(geometry.canvas_width - geometry.end_padding)
}

/// X of a note placed at `position` (0..=1) inside bar `bar_index`.
///
/// Straight interpolation over the usable bar width; notes at close
/// positions may overlap.
pub fn note_x(position: f64, bar_index: usize, geometry: &BarGeometry) -> f64 {
    let lead = if bar_index == 0 { geometry.lead_in } else { 0.0 };
    let usable = (geometry.bar_width(bar_index) - 2.0 * geometry.bar_padding - lead).max(0.0);
    bar_x(bar_index, geometry) + lead + geometry.bar_padding + position * usable
}

/// Width taken by the key signature, including its trailing gap.
pub fn key_signature_width(key: &KeySignature, radius: f64) -> f64 {
    let width = key.glyph_count() as f64 * radius * KEY_SIG_STEP;
    if width > 0.0 {
        width + radius
    } else {
        0.0
    }
}

pub fn key_signature_x(start_padding: f64, radius: f64) -> f64 {
    start_padding + radius * KEY_SIG_X
}

/// X of the time signature glyphs: right after the key signature.
pub fn time_signature_x(start_padding: f64, key: &KeySignature, radius: f64) -> f64 {
    key_signature_x(start_padding, radius) + key_signature_width(key, radius)
}

// ═══════════════════════════════════════════════════════════════════════
// Systems
// ═══════════════════════════════════════════════════════════════════════

pub fn bars_per_system(config: &LayoutConfig) -> usize {
    match config.system_policy {
        SystemPolicy::BarsPerSystem(n) => n.max(1),
        SystemPolicy::FitWidth => {
            let available = config.canvas_width
                - config.start_padding
                - config.end_padding
                - config.first_bar_width;
            if available <= 0.0 || config.regular_bar_width <= 0.0 {
                1
            } else {
                1 + (available / config.regular_bar_width).floor() as usize
            }
        }
    }
}

/// One line of staff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemLayout {
    pub index: usize,
    /// Y of the top staff line
    pub y: f64,
    /// Global index of the system's first bar
    pub first_bar: usize,
    pub bar_count: usize,
}

impl SystemLayout {
    pub fn contains_bar(&self, bar: usize) -> bool {
        bar >= self.first_bar && bar < self.first_bar + self.bar_count
    }
}

/// Break `total_bars` bars into systems stacked top to bottom.
pub fn layout_systems(total_bars: usize, config: &LayoutConfig) -> Vec<SystemLayout> {
    let per_system = bars_per_system(config);
    let total_bars = total_bars.max(1);
    (0..total_bars.div_ceil(per_system))
        .map(|index| {
            let first_bar = index * per_system;
            SystemLayout {
                index,
                y: system_origin(index, config.staff_height, config.system_margin, config.vertical_padding),
                first_bar,
                bar_count: per_system.min(total_bars - first_bar),
            }
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Bar assignment
// ═══════════════════════════════════════════════════════════════════════

const EPSILON: f64 = 1e-6;

/// A note with its resolved bar and bar-relative position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedNote<'a> {
    pub note: &'a Note,
    pub bar: usize,
    pub position: f64,
}

/// Assign every note a bar and a position.
///
/// Notes with a `bar_index` keep it and take `defaults.position` when they
/// have no position. Notes without one flow through the score: durations
/// accumulate against the time signature's bar length, a note that would
/// cross a bar line starts the next bar, and the note is centred on its
/// own time span. A note repeating an earlier flowed index is a chord
/// member and shares that note's bar and position.
pub fn place_notes<'a>(
    notes: &'a [Note],
    time: &TimeSignature,
    defaults: &NoteDefaults,
) -> Vec<PlacedNote<'a>> {
    let bar_length = time.bar_duration();
    let mut cursor = 0.0;
    let mut flowed: HashMap<u32, (usize, f64)> = HashMap::new();
    let mut placed = Vec::with_capacity(notes.len());

    for note in notes {
        if let Some(bar) = note.bar_index {
            placed.push(PlacedNote {
                note,
                bar,
                position: note.position.unwrap_or(defaults.position),
            });
            continue;
        }

        if let Some(&(bar, position)) = flowed.get(&note.index) {
            placed.push(PlacedNote {
                note,
                bar,
                position: note.position.unwrap_or(position),
            });
            continue;
        }

        let length = note.duration().whole_notes();
        let mut bar = (cursor / bar_length + EPSILON).floor() as usize;
        let mut onset = (cursor - bar as f64 * bar_length).max(0.0);
        if onset > EPSILON && onset + length > bar_length + EPSILON {
            bar += 1;
            onset = 0.0;
            cursor = bar as f64 * bar_length;
        }

        let centre = ((onset + length / 2.0) / bar_length).clamp(0.0, 1.0);
        let position = note.position.unwrap_or(centre);
        flowed.insert(note.index, (bar, position));
        cursor += length;

        placed.push(PlacedNote { note, bar, position });
    }

    placed
}
