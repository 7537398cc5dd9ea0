//! Rendering tests: lay out small scores and render them to SVG.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use stafflib::renderer::{system_origin, vertical_position};
use stafflib::{
    render_json_to_svg, render_score, render_score_to_svg, DrawClass, DrawCommand, Duration, DurationClass,
    LayoutConfig, Note, ScoreSettings, SystemPolicy,
};

fn output_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("test_output");
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn scale(names: &[&str]) -> Vec<Note> {
    names
        .iter()
        .enumerate()
        .map(|(i, n)| Note::pitched(i as u32, n.parse().unwrap(), Duration::QUARTER))
        .collect()
}

fn glyphs(commands: &[DrawCommand], class: DrawClass) -> Vec<(f64, f64, String)> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Glyph { class: k, x, y, text, .. } if *k == class => Some((*x, *y, text.clone())),
            _ => None,
        })
        .collect()
}

#[test]
fn render_c_major_scale_svg() {
    let notes = scale(&["C4", "D4", "E4", "F4", "G4", "A4", "B4", "C5"]);
    let svg = render_score_to_svg(&notes, &LayoutConfig::default(), &ScoreSettings::default())
        .expect("Failed to render scale");

    assert!(svg.starts_with("<svg"), "Output should be SVG");
    assert!(svg.contains("</svg>"), "SVG should be closed");
    assert_eq!(svg.matches(r#"class="staff-line""#).count(), 5);
    assert_eq!(svg.matches(r#"class="note""#).count(), 8);
    assert_eq!(svg.matches(r#"class="accidental""#).count(), 0);

    let out = output_dir().join("c-major-scale.svg");
    std::fs::write(&out, &svg).expect("Failed to write SVG");
    println!("✓ Rendered c-major-scale.svg ({} bytes)", svg.len());
}

#[test]
fn scale_steps_up_half_a_radius_per_note() {
    let config = LayoutConfig::default();
    let notes = scale(&["C4", "D4", "E4", "F4"]);
    let score = render_score(&notes, &config, &ScoreSettings::default()).unwrap();

    let heads = glyphs(&score.commands, DrawClass::Note);
    let ys: Vec<f64> = heads.iter().map(|g| g.1).collect();
    let y0 = config.vertical_padding;
    assert_eq!(ys, vec![y0 + 45.0, y0 + 40.0, y0 + 35.0, y0 + 30.0]);

    let xs: Vec<f64> = heads.iter().map(|g| g.0).collect();
    assert!(xs.windows(2).all(|w| w[0] < w[1]), "notes should advance left to right: {xs:?}");
}

#[test]
fn bass_clef_shifts_every_note() {
    let config = LayoutConfig::default();
    let notes = scale(&["C3", "G3"]);
    let treble = render_score(&notes, &config, &ScoreSettings::default()).unwrap();
    let bass = render_score(&notes, &config, &ScoreSettings::new("bass", "c_major_a_minor", "4_4_common_time")).unwrap();

    let t: Vec<f64> = glyphs(&treble.commands, DrawClass::Note).iter().map(|g| g.1).collect();
    let b: Vec<f64> = glyphs(&bass.commands, DrawClass::Note).iter().map(|g| g.1).collect();
    // two staff steps lower in bass
    assert_eq!(b, t.iter().map(|y| y + config.radius).collect::<Vec<_>>());
}

#[test]
fn key_signature_suppresses_implied_accidentals() {
    let notes = scale(&["F#4", "C#5", "Bb4", "G4"]);
    let score = render_score(
        &notes,
        &LayoutConfig::default(),
        &ScoreSettings::new("treble", "d_major_b_minor", "4_4_common_time"),
    )
    .unwrap();

    let accidentals = glyphs(&score.commands, DrawClass::Accidental);
    assert_eq!(accidentals.len(), 1);
    assert_eq!(accidentals[0].2, "\u{E260}");
    assert_eq!(glyphs(&score.commands, DrawClass::KeySignature).len(), 2);
}

#[test]
fn dotted_notes_get_augmentation_dots() {
    let notes = vec![
        Note::pitched(0, "E4".parse().unwrap(), Duration::dotted(DurationClass::Half)),
        Note::pitched(1, "E4".parse().unwrap(), Duration::QUARTER),
        Note::rest(2, Duration::dotted(DurationClass::Quarter)),
    ];
    let score = render_score(&notes, &LayoutConfig::default(), &ScoreSettings::default()).unwrap();
    let dots = glyphs(&score.commands, DrawClass::AugmentationDot);
    assert_eq!(dots.len(), 2);
    let heads = glyphs(&score.commands, DrawClass::Note);
    assert_eq!(dots[0].0, heads[0].0 - LayoutConfig::default().radius);
    assert_eq!(dots[0].1, heads[0].1);
}

#[test]
fn long_scores_wrap_into_systems() {
    let config = LayoutConfig {
        system_policy: SystemPolicy::BarsPerSystem(2),
        ..LayoutConfig::default()
    };
    let names = ["C4"; 20];
    let notes = scale(&names);
    let score = render_score(&notes, &config, &ScoreSettings::default()).unwrap();

    // 20 quarters in 4/4 is five bars
    assert_eq!(score.systems, 3);
    assert_eq!(glyphs(&score.commands, DrawClass::Clef).len(), 3);
    assert_eq!(glyphs(&score.commands, DrawClass::TimeSignatureNumerator).len(), 1);

    let last = glyphs(&score.commands, DrawClass::Note).pop().unwrap();
    let y2 = system_origin(2, config.staff_height, config.system_margin, config.vertical_padding);
    assert_eq!(last.1, y2 + vertical_position(-5, config.radius));
}

#[test]
fn explicit_bars_are_respected() {
    let notes = vec![
        Note::pitched(0, "A4".parse().unwrap(), Duration::QUARTER).in_bar(0, 0.0),
        Note::pitched(1, "A4".parse().unwrap(), Duration::QUARTER).in_bar(3, 1.0),
    ];
    let config = LayoutConfig {
        system_policy: SystemPolicy::BarsPerSystem(8),
        canvas_width: 2000.0,
        ..LayoutConfig::default()
    };
    let score = render_score(&notes, &config, &ScoreSettings::default()).unwrap();
    assert_eq!(score.systems, 1);
    let bar_lines = score.commands.iter().filter(|c| c.class() == DrawClass::BarLine).count();
    assert_eq!(bar_lines, 5);
}

#[test]
fn draw_commands_serialize_for_other_surfaces() {
    let score = render_score(&scale(&["G4"]), &LayoutConfig::default(), &ScoreSettings::default()).unwrap();
    let json = serde_json::to_value(&score).unwrap();
    let first = &json["commands"][0];
    assert_eq!(first["type"], "line");
    assert_eq!(first["class"], "staff-line");
    assert!(first.get("strokeWidth").is_some());
}

#[test]
fn render_json_request() {
    let svg = render_json_to_svg(
        r#"{
            "notes": [
                {"noteIndex": 0, "note": "C4", "duration": "quarter", "barIndex": 0, "position": 0.25},
                {"noteIndex": 0, "note": "E4", "duration": "quarter", "barIndex": 0, "position": 0.25},
                {"noteIndex": 1, "pitch": "G4", "duration": "dotted_half", "direction": "up", "origin": "ai"}
            ],
            "settings": {"keySignature": "g_major_e_minor", "timeSignature": "3_4_waltz_time"}
        }"#,
    )
    .expect("Failed to render JSON request");
    assert_eq!(svg.matches(r#"class="note""#).count(), 3);
    assert_eq!(svg.matches(r#"class="augmentation-dot""#).count(), 1);

    let out = output_dir().join("json-request.svg");
    std::fs::write(&out, &svg).expect("Failed to write SVG");
}
