//! The 2D drawing surface abstraction.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 8-bit RGB with a floating alpha, formatted as CSS `rgba(...)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

pub const ACCENT: Rgba = Rgba::rgb(255, 107, 53);
pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: Rgba, width: f64) -> Self {
        Self { color, width }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    Start,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub color: Rgba,
    pub size_px: f64,
    pub align: TextAlign,
}

/// Caption font used by both renderers: white, 12 px.
pub const CAPTION: TextStyle = TextStyle { color: WHITE, size_px: 12.0, align: TextAlign::Start };

/// An addressable 2D raster target.
pub trait DrawingSurface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn clear(&mut self);
    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke);
    fn fill_circle(&mut self, center: Point, radius: f64, fill: Rgba);
    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke);
    fn stroke_polyline(&mut self, points: &[Point], stroke: Stroke);
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);

    /// True when either dimension is zero, negative or NaN.
    /// Renderers perform no operations on a degenerate surface.
    fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }
}
