//! Noisy sinusoid line chart with a faint grid.

use rand::Rng;
use tracing::debug;

use crate::surface::{DrawingSurface, Point, Rgba, Stroke, ACCENT, CAPTION};

pub const SAMPLE_COUNT: usize = 50;
pub const GRID_DIVISIONS: usize = 10;

const SERIES_WIDTH: f64 = 2.0;
const GRID: Stroke = Stroke::new(Rgba::new(255, 255, 255, 0.1), 1.0);

pub const TITLE: &str = "Time Series Weather Data";
pub const FOOTER: &str = "Risk Level Over Time";

/// `y[i] = sin(i·0.1)·50 + U[0,20) + height/2` for `i` in `0..50`.
pub fn generate_series<R: Rng + ?Sized>(height: f64, rng: &mut R) -> Vec<f64> {
    (0..SAMPLE_COUNT)
        .map(|i| (i as f64 * 0.1).sin() * 50.0 + rng.gen::<f64>() * 20.0 + height / 2.0)
        .collect()
}

/// Plot positions: even spacing across the full width, y inverted.
pub fn plot_points(series: &[f64], width: f64, height: f64) -> Vec<Point> {
    let last = series.len().saturating_sub(1).max(1) as f64;
    series
        .iter()
        .enumerate()
        .map(|(i, &y)| Point::new(i as f64 / last * width, height - y))
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSeriesChart;

impl TimeSeriesChart {
    pub fn new() -> Self {
        Self
    }

    /// Clear the surface and draw grid, a freshly generated series and the
    /// two captions. Returns `false` without touching a degenerate surface.
    pub fn render<S, R>(&self, surface: &mut S, rng: &mut R) -> bool
    where
        S: DrawingSurface + ?Sized,
        R: Rng + ?Sized,
    {
        if surface.is_degenerate() {
            return false;
        }
        let width = surface.width();
        let height = surface.height();

        surface.clear();

        for i in 0..=GRID_DIVISIONS {
            let y = i as f64 / GRID_DIVISIONS as f64 * height;
            surface.stroke_line(Point::new(0.0, y), Point::new(width, y), GRID);
        }
        for i in 0..=GRID_DIVISIONS {
            let x = i as f64 / GRID_DIVISIONS as f64 * width;
            surface.stroke_line(Point::new(x, 0.0), Point::new(x, height), GRID);
        }

        let series = generate_series(height, rng);
        let points = plot_points(&series, width, height);
        surface.stroke_polyline(&points, Stroke::new(ACCENT, SERIES_WIDTH));

        surface.fill_text(TITLE, Point::new(10.0, 20.0), &CAPTION);
        surface.fill_text(FOOTER, Point::new(10.0, height - 10.0), &CAPTION);

        debug!(samples = points.len(), "time series chart redrawn");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawOp, RecordingSurface};
    use acms_test_utils::seeded_rng;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_series_envelope() {
        let mut rng = seeded_rng(1);
        let series = generate_series(300.0, &mut rng);
        assert_eq!(series.len(), SAMPLE_COUNT);
        for (i, y) in series.iter().enumerate() {
            let base = (i as f64 * 0.1).sin() * 50.0 + 150.0;
            assert!(*y >= base && *y < base + 20.0, "sample {i} = {y}");
        }
    }

    #[test]
    fn test_plot_points_span_width_and_invert() {
        let points = plot_points(&[10.0, 20.0, 30.0], 200.0, 100.0);
        assert_eq!(
            points,
            vec![Point::new(0.0, 90.0), Point::new(100.0, 80.0), Point::new(200.0, 70.0)]
        );
    }

    #[test]
    fn test_render_structure() {
        let mut surface = RecordingSurface::new(500.0, 300.0);
        assert!(TimeSeriesChart::new().render(&mut surface, &mut seeded_rng(2)));

        let ops = surface.ops();
        assert_eq!(ops[0], DrawOp::Clear);
        assert_eq!(surface.lines().count(), 2 * (GRID_DIVISIONS + 1));

        // Grid first, series after it.
        let series_at = ops.iter().position(|op| matches!(op, DrawOp::Polyline { .. })).unwrap();
        let last_grid = ops.iter().rposition(|op| matches!(op, DrawOp::Line { .. })).unwrap();
        assert!(last_grid < series_at);

        match &ops[series_at] {
            DrawOp::Polyline { points, stroke } => {
                assert_eq!(points.len(), SAMPLE_COUNT);
                assert_eq!(points[0].x, 0.0);
                assert_eq!(points[SAMPLE_COUNT - 1].x, 500.0);
                assert_eq!(stroke.width, 2.0);
            }
            other => panic!("unexpected op {other:?}"),
        }

        let captions: Vec<(&str, &Point)> = surface.texts().collect();
        assert_eq!(captions.len(), 2);
        assert_eq!(captions[0], (TITLE, &Point::new(10.0, 20.0)));
        assert_eq!(captions[1], (FOOTER, &Point::new(10.0, 290.0)));
    }

    #[test]
    fn test_series_regenerated_each_call() {
        let chart = TimeSeriesChart::new();
        let mut rng = seeded_rng(3);
        let mut a = RecordingSurface::new(400.0, 200.0);
        let mut b = RecordingSurface::new(400.0, 200.0);
        chart.render(&mut a, &mut rng);
        chart.render(&mut b, &mut rng);
        assert_ne!(a.ops(), b.ops());
    }

    #[test]
    fn test_degenerate_surface_is_noop() {
        for (w, h) in [(0.0, 0.0), (0.0, 300.0), (400.0, -1.0)] {
            let mut surface = RecordingSurface::new(w, h);
            assert!(!TimeSeriesChart::new().render(&mut surface, &mut seeded_rng(4)));
            assert!(surface.ops().is_empty());
        }
    }

    #[test]
    fn test_one_by_one_surface() {
        let mut surface = RecordingSurface::new(1.0, 1.0);
        assert!(TimeSeriesChart::new().render(&mut surface, &mut seeded_rng(5)));
    }
}
