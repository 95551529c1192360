//! acms-viz — Drawing surfaces and the two demo renderers.
//!
//! Renderers draw onto anything implementing [`DrawingSurface`]:
//!   - [`SvgSurface`] produces an SVG document for the web dashboard
//!   - [`RecordingSurface`] captures every operation for inspection in tests
//!
//! Both renderers are stateless and pull fresh randomness on every call.

pub mod surface;
pub mod svg;
pub mod recording;
pub mod network;
pub mod timeseries;

pub use surface::{DrawingSurface, Point, Rgba, Stroke, TextAlign, TextStyle};
pub use svg::SvgSurface;
pub use recording::{DrawOp, RecordingSurface};
pub use network::{NetworkDiagram, NetworkLayout};
pub use timeseries::TimeSeriesChart;
