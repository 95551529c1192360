//! Layered node/edge diagram of the recurrence "network".
//!
//! Five fixed layers, fully connected between neighbours. Edge opacity and
//! node intensity are re-sampled on every render so the picture looks
//! active; nothing is carried between calls.

use rand::Rng;
use tracing::debug;

use crate::surface::{DrawingSurface, Point, Stroke, TextAlign, TextStyle, ACCENT, CAPTION};

pub const LAYER_SIZES: [usize; 5] = [8, 12, 8, 4, 1];
pub const LAYER_LABELS: [&str; 5] = ["Input", "LSTM 1", "LSTM 2", "Dense", "Output"];

pub const NODE_RADIUS: f64 = 8.0;
const NODE_OUTLINE_WIDTH: f64 = 2.0;
const EDGE_WIDTH: f64 = 1.0;
/// Captions sit this far above the bottom edge.
const CAPTION_INSET: f64 = 10.0;

/// Edge opacity is drawn from `[0.1, 0.4)`.
const EDGE_ALPHA_BASE: f64 = 0.1;
const EDGE_ALPHA_SPAN: f64 = 0.3;
/// Node intensity is drawn from `[0.3, 1.0)`.
const NODE_ALPHA_BASE: f64 = 0.3;
const NODE_ALPHA_SPAN: f64 = 0.7;

/// Column position and node centres for one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerLayout {
    pub x: f64,
    pub label: &'static str,
    pub nodes: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkLayout {
    pub layers: Vec<LayerLayout>,
    pub caption_y: f64,
}

impl NetworkLayout {
    pub fn node_count(&self) -> usize {
        self.layers.iter().map(|l| l.nodes.len()).sum()
    }

    pub fn edge_count(&self) -> usize {
        self.layers
            .windows(2)
            .map(|pair| pair[0].nodes.len() * pair[1].nodes.len())
            .sum()
    }
}

/// Renders the fixed 8-12-8-4-1 diagram.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkDiagram;

impl NetworkDiagram {
    pub fn new() -> Self {
        Self
    }

    /// Evenly spaced layers and nodes with half-step margins at both ends.
    /// Returns `None` for a degenerate surface.
    pub fn layout(&self, width: f64, height: f64) -> Option<NetworkLayout> {
        if !(width > 0.0 && height > 0.0) {
            return None;
        }

        let layer_spacing = width / (LAYER_SIZES.len() + 1) as f64;
        let layers = LAYER_SIZES
            .iter()
            .zip(LAYER_LABELS)
            .enumerate()
            .map(|(l, (&size, label))| {
                let x = (l + 1) as f64 * layer_spacing;
                let node_spacing = height / (size + 1) as f64;
                let nodes = (0..size)
                    .map(|n| Point::new(x, (n + 1) as f64 * node_spacing))
                    .collect();
                LayerLayout { x, label, nodes }
            })
            .collect();

        Some(NetworkLayout { layers, caption_y: height - CAPTION_INSET })
    }

    /// Clear the surface and draw edges, nodes and captions.
    /// Returns `false` without touching the surface if it is degenerate.
    pub fn render<S, R>(&self, surface: &mut S, rng: &mut R) -> bool
    where
        S: DrawingSurface + ?Sized,
        R: Rng + ?Sized,
    {
        if surface.is_degenerate() {
            return false;
        }
        let Some(layout) = self.layout(surface.width(), surface.height()) else {
            return false;
        };

        surface.clear();

        let outline = Stroke::new(ACCENT, NODE_OUTLINE_WIDTH);
        for (l, layer) in layout.layers.iter().enumerate() {
            let next = layout.layers.get(l + 1);
            for &node in &layer.nodes {
                if let Some(next) = next {
                    for &target in &next.nodes {
                        let alpha = EDGE_ALPHA_BASE + rng.gen::<f64>() * EDGE_ALPHA_SPAN;
                        surface.stroke_line(node, target, Stroke::new(ACCENT.with_alpha(alpha), EDGE_WIDTH));
                    }
                }

                let intensity = NODE_ALPHA_BASE + rng.gen::<f64>() * NODE_ALPHA_SPAN;
                surface.fill_circle(node, NODE_RADIUS, ACCENT.with_alpha(intensity));
                surface.stroke_circle(node, NODE_RADIUS, outline);
            }
        }

        let caption = TextStyle { align: TextAlign::Center, ..CAPTION };
        for layer in &layout.layers {
            surface.fill_text(layer.label, Point::new(layer.x, layout.caption_y), &caption);
        }

        debug!(
            nodes = layout.node_count(),
            edges = layout.edge_count(),
            "network diagram redrawn"
        );
        true
    }
}
