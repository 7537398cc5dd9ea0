//! Process-wide reference tables: clefs, key and time signatures, SMuFL
//! glyph codes and the pitch-name to staff-position table.
//!
//! The sets are closed (4 clefs, 15 keys, 6 time signatures, 12 duration
//! classes) so everything here is immutable data looked up by string id.

pub mod clef;
pub mod glyphs;
pub mod key;
pub mod pitch;
pub mod time;

pub use clef::{clef, Clef, CLEFS, CLEF_IDS};
pub use glyphs::{decode_glyph, note_code, rest_code, DurationInfo};
pub use key::{key_signature, KeySignature, FLAT_POSITIONS, KEY_SIGNATURES, KEY_SIGNATURE_IDS, SHARP_POSITIONS};
pub use pitch::{canonical_staff_position, PITCH_TABLE};
pub use time::{time_signature, TimeSignature, TIME_SIGNATURES, TIME_SIGNATURE_IDS};
