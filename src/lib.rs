//! stafflib: staff notation layout and rendering for note-list editors.
//!
//! Turns a list of notes (pitch, duration, optional bar placement) into
//! positioned SMuFL glyphs and an SVG string, imports MusicXML (.musicxml)
//! and compressed MXL (.mxl) files into that list, and talks to an AI
//! completion service for note suggestions.
//!
//! # Example
//! ```no_run
//! use stafflib::{import_file, render_score_to_svg, LayoutConfig, ScoreSettings};
//!
//! let notes = import_file("path/to/score.mxl").unwrap();
//! let svg = render_score_to_svg(&notes, &LayoutConfig::default(), &ScoreSettings::default()).unwrap();
//! println!("{} notes, {} bytes of SVG", notes.len(), svg.len());
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod mxl;
pub mod parser;
pub mod pitch;
pub mod renderer;
pub mod suggest;
pub mod tables;

#[cfg(target_os = "android")]
pub mod android;

use std::path::Path;

use serde::Deserialize;

pub use config::{LayoutConfig, NoteDefaults, ScoreSettings, SystemPolicy};
pub use error::{Result, ScoreError};
pub use model::*;
pub use mxl::parse_mxl;
pub use parser::parse_musicxml;
pub use pitch::{classify_accidental, resolve_staff_position, should_render_accidental, Accidental, PitchName};
pub use renderer::{render_score, render_score_to_svg, DrawClass, DrawCommand, RenderedScore};
pub use suggest::{SuggestOutcome, SuggestionClient, SuggestionProvider};

/// Lowercased text after the last `.` of `filename`; empty when there is none.
pub fn file_extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Import notes from a MusicXML or MXL file.
/// The format follows the file extension:
/// - `.musicxml` or `.xml` → uncompressed MusicXML
/// - `.mxl` → compressed MXL (ZIP archive)
pub fn import_file<P: AsRef<Path>>(path: P) -> Result<Vec<Note>> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let ext = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(file_extension)
        .filter(|e| !e.is_empty());

    import_bytes(&data, ext.as_deref())
}

/// Import notes from raw bytes with an optional format hint.
/// If `extension` is None, tries to auto-detect the format.
pub fn import_bytes(data: &[u8], extension: Option<&str>) -> Result<Vec<Note>> {
    match extension.map(str::to_ascii_lowercase).as_deref() {
        Some("mxl") => parse_mxl(data),
        Some("musicxml") | Some("xml") => parse_musicxml(std::str::from_utf8(data)?),
        _ => {
            // Auto-detect: XML text first, then MXL
            if let Ok(xml) = std::str::from_utf8(data) {
                if xml.trim_start().starts_with('<') {
                    return parse_musicxml(xml);
                }
            }
            parse_mxl(data)
        }
    }
}

/// Serialize notes to the camelCase note-record JSON.
pub fn notes_to_json(notes: &[Note]) -> Result<String> {
    Ok(serde_json::to_string(&notes_to_records(notes))?)
}

/// JSON payload of [`render_json_to_svg`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RenderRequest {
    pub notes: Vec<NoteRecord>,
    pub layout: LayoutConfig,
    pub settings: ScoreSettings,
}

impl RenderRequest {
    pub fn notes(&self) -> Result<Vec<Note>> {
        notes_from_records(&self.notes, &self.settings.note_defaults)
    }
}

/// Validate a JSON [`RenderRequest`] and render it to SVG.
pub fn render_json_to_svg(json: &str) -> Result<String> {
    let request: RenderRequest = serde_json::from_str(json)?;
    let notes = request.notes()?;
    render_score_to_svg(&notes, &request.layout, &request.settings)
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

fn into_c_string(result: Result<String>) -> *mut c_char {
    match result {
        Ok(s) => match CString::new(s) {
            Ok(c) => c.into_raw(),
            Err(e) => {
                log::warn!("stafflib result has an interior NUL at byte {}", e.nul_position());
                std::ptr::null_mut()
            }
        },
        Err(e) => {
            log::warn!("stafflib call failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Render a JSON render request and return SVG as a C string.
/// The caller must free the returned string with `stafflib_free_string`.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn stafflib_render_json(json: *const c_char) -> *mut c_char {
    if json.is_null() {
        return std::ptr::null_mut();
    }
    let c_str = unsafe { CStr::from_ptr(json) };
    let json = match c_str.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };

    into_c_string(render_json_to_svg(json))
}

/// Import MusicXML or MXL bytes and return the notes as a JSON C string.
/// The caller must free the returned string with `stafflib_free_string`.
///
/// # Safety
/// `data` must point to `len` valid bytes. `extension` may be null.
#[no_mangle]
pub unsafe extern "C" fn stafflib_import_bytes(
    data: *const u8,
    len: usize,
    extension: *const c_char,
) -> *mut c_char {
    if data.is_null() || len == 0 {
        return std::ptr::null_mut();
    }
    let bytes = unsafe { std::slice::from_raw_parts(data, len) };
    let ext = if extension.is_null() {
        None
    } else {
        unsafe { CStr::from_ptr(extension) }.to_str().ok()
    };

    into_c_string(import_bytes(bytes, ext).and_then(|notes| notes_to_json(&notes)))
}

/// Free a string previously returned by stafflib functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a stafflib function, or null.
#[no_mangle]
pub unsafe extern "C" fn stafflib_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
