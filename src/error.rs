//! Error type shared by the importers, the render entry points and the
//! suggestion client.
//!
//! The geometry engine itself is lenient (unknown pitches fall back to
//! position 0, missing glyphs render as nothing) and never produces these.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoreError>;

#[derive(Debug, Error)]
pub enum ScoreError {
    /// XML is not well-formed
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The .mxl container could not be opened or read
    #[error("MXL archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Neither container.xml nor a top-level .xml entry led to a score
    #[error("no valid score file found")]
    NoScoreFile,

    #[error("invalid UTF-8 in score file: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A note record failed validation at the boundary
    #[error("invalid note {index}: {reason}")]
    InvalidNote { index: u32, reason: String },

    #[error("unknown clef '{0}'")]
    UnknownClef(String),

    #[error("unknown key signature '{0}'")]
    UnknownKeySignature(String),

    #[error("unknown time signature '{0}'")]
    UnknownTimeSignature(String),

    /// The notes reach a bar beyond the layout's bar limit
    #[error("score needs {bars} bars, more than the limit of {limit}")]
    TooManyBars { bars: usize, limit: usize },

    /// The suggestion provider answered with something that is not a note list
    #[error("suggestion rejected: {0}")]
    InvalidSuggestion(String),

    /// The suggestion provider itself failed
    #[error("suggestion provider error: {0}")]
    Provider(String),

    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ScoreError {
    pub(crate) fn invalid_note(index: u32, reason: impl Into<String>) -> Self {
        ScoreError::InvalidNote {
            index,
            reason: reason.into(),
        }
    }
}
