//! The six canonical time signatures.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignature {
    pub id: &'static str,
    pub description: &'static str,
    pub numerator: u8,
    pub denominator: u8,
    pub beats_per_bar: u8,
    pub beat_unit: u8,
    pub numerator_code: &'static str,
    pub denominator_code: &'static str,
}

impl TimeSignature {
    /// Length of one bar in whole notes (3/4 → 0.75).
    pub fn bar_duration(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

pub const TIME_SIGNATURES: [TimeSignature; 6] = [
    TimeSignature {
        id: "4_4_common_time",
        description: "Common time",
        numerator: 4,
        denominator: 4,
        beats_per_bar: 4,
        beat_unit: 4,
        numerator_code: "U+E084",
        denominator_code: "U+E084",
    },
    TimeSignature {
        id: "3_4_waltz_time",
        description: "Waltz time",
        numerator: 3,
        denominator: 4,
        beats_per_bar: 3,
        beat_unit: 4,
        numerator_code: "U+E083",
        denominator_code: "U+E084",
    },
    TimeSignature {
        id: "2_4_simple_duple",
        description: "Simple duple",
        numerator: 2,
        denominator: 4,
        beats_per_bar: 2,
        beat_unit: 4,
        numerator_code: "U+E082",
        denominator_code: "U+E084",
    },
    TimeSignature {
        id: "6_8_compound_duple",
        description: "Compound duple",
        numerator: 6,
        denominator: 8,
        beats_per_bar: 6,
        beat_unit: 8,
        numerator_code: "U+E086",
        denominator_code: "U+E088",
    },
    TimeSignature {
        id: "2_2_cut_time",
        description: "Cut time",
        numerator: 2,
        denominator: 2,
        beats_per_bar: 2,
        beat_unit: 2,
        numerator_code: "U+E082",
        denominator_code: "U+E082",
    },
    TimeSignature {
        id: "9_8_compound_triple",
        description: "Compound triple",
        numerator: 9,
        denominator: 8,
        beats_per_bar: 9,
        beat_unit: 8,
        numerator_code: "U+E089",
        denominator_code: "U+E088",
    },
];

pub const TIME_SIGNATURE_IDS: [&str; 6] = [
    "4_4_common_time",
    "3_4_waltz_time",
    "2_4_simple_duple",
    "6_8_compound_duple",
    "2_2_cut_time",
    "9_8_compound_triple",
];

/// Look up a time signature by id.
pub fn time_signature(id: &str) -> Option<&'static TimeSignature> {
    TIME_SIGNATURES.iter().find(|t| t.id == id)
}
