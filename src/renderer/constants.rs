//! Shared constants for the staff renderer.
//!
//! Offsets are multiples of the layout radius (staff line spacing) unless
//! noted; colors and stroke widths are in SVG user units.

// ── Staff ───────────────────────────────────────────────────────────
pub(super) const STAFF_LINES: usize = 5;
pub(super) const STAFF_LINE_WIDTH: f64 = 1.0;
pub(super) const BARLINE_WIDTH: f64 = 1.5;
pub(super) const SYSTEM_BARLINE_WIDTH: f64 = 2.0; // opening and closing bar line of a system

// ── Bar interior ────────────────────────────────────────────────────
pub(super) const BAR_PADDING: f64 = 0.5; // gap between a bar line and the first/last note

// ── Prefix (clef, key, time) ────────────────────────────────────────
pub(super) const CLEF_X: f64 = 2.0;
pub(super) const KEY_SIG_X: f64 = 5.0;
pub(super) const KEY_SIG_STEP: f64 = 1.0;
pub(super) const TIME_SIG_NUMERATOR_Y: f64 = 0.5;
pub(super) const TIME_SIG_DENOMINATOR_Y: f64 = 2.5;
pub(super) const TIME_SIG_HALF_WIDTH: f64 = 1.5;

// ── Note satellites (to the left of the head) ───────────────────────
pub(super) const ACCIDENTAL_OFFSET: f64 = 1.5;
pub(super) const DOTTED_ACCIDENTAL_OFFSET: f64 = 2.5;
pub(super) const DOT_OFFSET: f64 = 1.0;

// ── SVG ─────────────────────────────────────────────────────────────
pub(super) const SMUFL_FONT_FAMILY: &str = "Bravura, 'Bravura Text', serif";
pub(super) const NOTE_COLOR: &str = "#1a1a1a";
pub(super) const STAFF_COLOR: &str = "#555555";
pub(super) const BARLINE_COLOR: &str = "#000000";
