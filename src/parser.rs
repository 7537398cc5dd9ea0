//! MusicXML parser: converts MusicXML text into the note list.
//!
//! Only what the staff renderer draws is read: every `<note>` becomes one
//! [`Note`] in document order, whatever part, voice or measure it is in.

use roxmltree::{Document, Node};

use crate::config::NoteDefaults;
use crate::error::{Result, ScoreError};
use crate::model::{Duration, DurationClass, Note, NoteEvent, StemDirection};
use crate::pitch::PitchName;

/// Parse a MusicXML string into notes numbered from 0.
pub fn parse_musicxml(xml: &str) -> Result<Vec<Note>> {
    parse_musicxml_with(xml, &NoteDefaults::default())
}

/// Same as [`parse_musicxml`] with explicit fallbacks for absent
/// `<type>` and `<stem>`.
pub fn parse_musicxml_with(xml: &str, defaults: &NoteDefaults) -> Result<Vec<Note>> {
    // MusicXML files include a DOCTYPE declaration, so we must allow DTDs
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let doc = Document::parse_with_options(xml, options)?;

    let notes = doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "note")
        .enumerate()
        .map(|(i, node)| parse_note(&node, i as u32, defaults))
        .collect::<Result<Vec<_>>>()?;

    log::debug!("imported {} notes from MusicXML", notes.len());
    Ok(notes)
}

// ─── Note ────────────────────────────────────────────────────────────

fn parse_note(node: &Node, index: u32, defaults: &NoteDefaults) -> Result<Note> {
    let class = child(node, "type")
        .and_then(|n| n.text())
        .map(|t| duration_class(t.trim(), index))
        .unwrap_or(defaults.duration.class);
    let duration = Duration {
        class,
        dotted: child(node, "dot").is_some(),
    };

    let pitch = if child(node, "rest").is_some() {
        None
    } else if let Some(p) = child(node, "pitch") {
        Some(pitch_name(&p))
    } else if let Some(name) = child(node, "unpitched").and_then(|u| display_name(&u)) {
        Some(name)
    } else {
        log::warn!("note {index} has no drawable pitch, importing it as a rest");
        None
    };

    let event = match pitch {
        None => NoteEvent::Rest { duration },
        Some(pitch) => {
            let pitch = pitch
                .parse::<PitchName>()
                .map_err(|e| ScoreError::invalid_note(index, e.to_string()))?;
            let direction = child(node, "stem")
                .and_then(|n| n.text())
                .and_then(|t| t.trim().parse::<StemDirection>().ok())
                .unwrap_or(defaults.direction);
            NoteEvent::Pitched {
                pitch,
                duration,
                direction,
            }
        }
    };

    Ok(Note {
        index,
        event,
        bar_index: None,
        position: None,
        start_time: None,
        origin: None,
    })
}

/// Step letter + accidental marker + octave, e.g. `F#4`.
fn pitch_name(pitch: &Node) -> String {
    let step = text_of(pitch, "step").unwrap_or_default();
    let alter = text_of(pitch, "alter").map(parse_i32).unwrap_or(0);
    let octave = text_of(pitch, "octave").unwrap_or_default();
    let mark = match alter {
        1 => "#",
        -1 => "b",
        0 => "",
        other => {
            log::warn!("alter {other} on {step}{octave} is not drawable, reading it as natural");
            ""
        }
    };
    format!("{step}{mark}{octave}")
}

/// Staff placement of an `<unpitched>` note, e.g. a drum hit.
fn display_name(unpitched: &Node) -> Option<String> {
    let step = text_of(unpitched, "display-step")?;
    let octave = text_of(unpitched, "display-octave")?;
    Some(format!("{step}{octave}"))
}

/// Map a MusicXML `<type>` value to the closest drawable class.
fn duration_class(type_name: &str, index: u32) -> DurationClass {
    match type_name {
        "breve" => DurationClass::Double,
        "whole" => DurationClass::Whole,
        "half" => DurationClass::Half,
        "quarter" => DurationClass::Quarter,
        "eighth" => DurationClass::Eighth,
        "16th" => DurationClass::Sixteenth,
        "long" | "maxima" => {
            log::warn!("note {index}: '{type_name}' drawn as a double whole note");
            DurationClass::Double
        }
        other => {
            log::warn!("note {index}: '{other}' drawn as a sixteenth");
            DurationClass::Sixteenth
        }
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────

fn child<'a, 'input>(node: &Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn text_of<'a>(node: &Node<'a, '_>, name: &str) -> Option<&'a str> {
    child(node, name).and_then(|n| n.text()).map(str::trim)
}

fn parse_i32(s: &str) -> i32 {
    s.trim()
        .parse::<f64>()
        .map(|v| v.round() as i32)
        .unwrap_or(0)
}
