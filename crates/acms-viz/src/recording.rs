//! Surface that records operations instead of rasterizing them.

use crate::surface::{DrawingSurface, Point, Rgba, Stroke, TextStyle};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Line { from: Point, to: Point, stroke: Stroke },
    FillCircle { center: Point, radius: f64, fill: Rgba },
    StrokeCircle { center: Point, radius: f64, stroke: Stroke },
    Polyline { points: Vec<Point>, stroke: Stroke },
    Text { text: String, at: Point, style: TextStyle },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ops: Vec::new() }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn lines(&self) -> impl Iterator<Item = (&Point, &Point, &Stroke)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Line { from, to, stroke } => Some((from, to, stroke)),
            _ => None,
        })
    }

    pub fn filled_circles(&self) -> impl Iterator<Item = (&Point, &Rgba)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillCircle { center, fill, .. } => Some((center, fill)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, &Point)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, at, .. } => Some((text.as_str(), at)),
            _ => None,
        })
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.ops.push(DrawOp::Line { from, to, stroke });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, fill: Rgba) {
        self.ops.push(DrawOp::FillCircle { center, radius, fill });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke) {
        self.ops.push(DrawOp::StrokeCircle { center, radius, stroke });
    }

    fn stroke_polyline(&mut self, points: &[Point], stroke: Stroke) {
        self.ops.push(DrawOp::Polyline { points: points.to_vec(), stroke });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.ops.push(DrawOp::Text { text: text.to_string(), at, style: *style });
    }
}
