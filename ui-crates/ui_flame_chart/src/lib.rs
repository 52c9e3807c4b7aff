//! Flame Chart
//!
//! Layout and rendering of trace profiles as a flame chart: one section of
//! stacked blocks per thread, followed by counter time series, all under a
//! pinned timestamp header.
//!
//! Geometry is driven by [`FlameChartStyle`], whose defaults are the values
//! in [`style_constants`].
//!
//! ```rust
//! use ui_flame_chart::{FlameChart, FlameChartStyle};
//!
//! let profile = profiling::parse_profile(r#"[
//!     {"name": "build", "ph": "X", "ts": 0, "dur": 2000000, "pid": 1, "tid": 1}
//! ]"#).unwrap();
//!
//! let mut chart = FlameChart::from_profile(&profile, FlameChartStyle::default(), 800.0, 400.0);
//! chart.zoom_at(100.0, 2.0);
//! let svg = chart.render_svg();
//! assert!(svg.contains("build"));
//! ```

pub mod style_constants;

// Core modules
mod style;
mod colors;
mod model;
mod layout;
mod viewport;
mod ruler;
mod lod;
mod time_series;
mod stylesheet;

// Chart and rendering
mod chart;
mod svg;

pub use chart::{FlameChart, ChartData};
pub use style::{FlameChartStyle, StyleError};
pub use colors::{Hsla, color_for_label, get_palette};
pub use model::{Block, BlockSection, DataPoint, TimeSeriesTrack, TimeSeriesSection, FlameChartModel};
pub use layout::{ChartLayout, SectionLayout, SectionKind};
pub use viewport::Viewport;
pub use ruler::{Tick, format_time, tick_interval};
pub use lod::{MergedBlock, visible_blocks};
pub use time_series::{PlottedPoint, plot_track, value_to_y};
pub use hit_test::{Hit, hit_test};
pub use stylesheet::{StylesheetError, FLAME_CHART_CSS, check_scrollbar_sync, scrollbar_width_from_css};
pub use svg::render_svg;
