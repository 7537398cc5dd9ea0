//! Clef definitions.

/// One of the four supported clefs.
///
/// `offset` re-anchors treble-referenced staff positions for this clef;
/// `anchor` is the staff position the clef glyph is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Root pitch letter the clef names (G, F or C)
    pub root: char,
    /// SMuFL code point, `U+XXXX` form
    pub code: &'static str,
    pub offset: i32,
    pub anchor: i32,
}

pub const TREBLE: Clef = Clef {
    id: "treble",
    name: "Treble",
    description: "G clef",
    root: 'G',
    code: "U+E050",
    offset: 0,
    anchor: -2,
};

pub const BASS: Clef = Clef {
    id: "bass",
    name: "Bass",
    description: "F clef",
    root: 'F',
    code: "U+E062",
    offset: -2,
    anchor: 2,
};

pub const ALTO: Clef = Clef {
    id: "alto",
    name: "Alto",
    description: "C clef",
    root: 'C',
    code: "U+E05C",
    offset: -1,
    anchor: 0,
};

pub const TENOR: Clef = Clef {
    id: "tenor",
    name: "Tenor",
    description: "C clef",
    root: 'C',
    code: "U+E05C",
    offset: 1,
    anchor: 2,
};

pub const CLEFS: [Clef; 4] = [TREBLE, BASS, ALTO, TENOR];

pub const CLEF_IDS: [&str; 4] = ["treble", "bass", "alto", "tenor"];

/// Look up a clef by id.
pub fn clef(id: &str) -> Option<&'static Clef> {
    CLEFS.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_resolves() {
        for id in CLEF_IDS {
            assert_eq!(clef(id).map(|c| c.id), Some(id));
        }
        assert!(clef("soprano").is_none());
    }

    #[test]
    fn only_treble_has_zero_offset() {
        for c in &CLEFS {
            assert_eq!(c.offset == 0, c.id == "treble", "clef {}", c.id);
        }
        assert_eq!(BASS.offset, -2);
    }
}
