//! SVG-backed drawing surface.

use std::fmt::Write as _;

use crate::surface::{DrawingSurface, Point, Rgba, Stroke, TextAlign, TextStyle};

/// Accumulates drawing operations as SVG elements.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    elements: Vec<String>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, elements: Vec::new() }
    }

    /// Change the surface size. Existing content is kept.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Complete SVG document for the current content.
    pub fn to_svg(&self) -> String {
        let w = self.width.max(0.0);
        let h = self.height.max(0.0);
        let mut out = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        for el in &self.elements {
            out.push_str(el);
        }
        out.push_str("</svg>");
        out
    }
}

fn fmt_stroke(stroke: &Stroke) -> String {
    format!(r#"stroke="{}" stroke-width="{}""#, stroke.color, stroke.width)
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

impl DrawingSurface for SvgSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.elements.clear();
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.elements.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
            from.x, from.y, to.x, to.y, fmt_stroke(&stroke)
        ));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, fill: Rgba) {
        self.elements.push(format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            center.x, center.y, radius, fill
        ));
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke) {
        self.elements.push(format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="none" {}/>"#,
            center.x, center.y, radius, fmt_stroke(&stroke)
        ));
    }

    fn stroke_polyline(&mut self, points: &[Point], stroke: Stroke) {
        if points.is_empty() {
            return;
        }
        let mut coords = String::new();
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                coords.push(' ');
            }
            let _ = write!(coords, "{},{}", p.x, p.y);
        }
        self.elements.push(format!(
            r#"<polyline points="{}" fill="none" {}/>"#,
            coords, fmt_stroke(&stroke)
        ));
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        let anchor = match style.align {
            TextAlign::Start  => "start",
            TextAlign::Center => "middle",
        };
        self.elements.push(format!(
            r#"<text x="{}" y="{}" fill="{}" font-family="Arial" font-size="{}" text-anchor="{}">{}</text>"#,
            at.x, at.y, style.color, style.size_px, anchor, escape_text(text)
        ));
    }
}
