//! SVG builder: accumulates SVG elements and produces the final string.

use super::constants::*;
use super::draw::{DrawClass, DrawCommand};

pub(super) struct SvgBuilder {
    pub(super) elements: Vec<String>,
    width: f64,
    height: f64,
}

impl SvgBuilder {
    pub(super) fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
        }
    }

    pub(super) fn build(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}" style="font-family: {};">"#,
            self.width, self.height, self.width, self.height, SMUFL_FONT_FAMILY
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    pub(super) fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        self.elements.push(format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            x, y, w, h, fill
        ));
    }

    pub(super) fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64, class: &str) {
        self.elements.push(format!(
            r#"<line class="{}" x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}"/>"#,
            class, x1, y1, x2, y2, color, width
        ));
    }

    /// A single SMuFL glyph centred on `x` with its baseline at `y`.
    pub(super) fn glyph(&mut self, x: f64, y: f64, text: &str, size: f64, class: &str) {
        if text.is_empty() {
            return;
        }
        self.elements.push(format!(
            r#"<text class="{}" x="{:.1}" y="{:.1}" font-size="{:.0}" fill="{}" text-anchor="middle">{}</text>"#,
            class, x, y, size, NOTE_COLOR, escape(text)
        ));
    }

    pub(super) fn command(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Line { class, x1, y1, x2, y2, stroke_width } => {
                let color = match class {
                    DrawClass::StaffLine => STAFF_COLOR,
                    _ => BARLINE_COLOR,
                };
                self.line(*x1, *y1, *x2, *y2, color, *stroke_width, class.as_str());
            }
            DrawCommand::Glyph { class, x, y, text, font_size } => {
                self.glyph(*x, *y, text, *font_size, class.as_str());
            }
        }
    }
}

fn escape(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub(super) fn empty_svg(message: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 400 100\">\
         <text x=\"200\" y=\"50\" text-anchor=\"middle\" font-size=\"14\" fill=\"gray\">{}</text>\
         </svg>",
        escape(message)
    )
}
