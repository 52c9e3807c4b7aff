//! Chart state tying the model, layout and viewport together

use std::sync::Arc;
use parking_lot::RwLock;
use profiling::Profile;
use crate::hit_test::{hit_test, Hit};
use crate::layout::ChartLayout;
use crate::lod::{visible_blocks, MergedBlock};
use crate::model::FlameChartModel;
use crate::ruler::{ticks, Tick};
use crate::style::FlameChartStyle;
use crate::style_constants::MIN_BLOCK_WIDTH;
use crate::svg;
use crate::viewport::Viewport;

/// An interactive flame chart
///
/// The model is behind an `Arc` so a [`ChartData`] snapshot can be shown
/// without cloning the blocks.
pub struct FlameChart {
    model: Arc<FlameChartModel>,
    layout: ChartLayout,
    style: FlameChartStyle,
    viewport: Viewport,
}

impl FlameChart {
    pub fn new(model: impl Into<Arc<FlameChartModel>>, style: FlameChartStyle, width: f32, height: f32) -> Self {
        let viewport = Viewport::new(width, height, &style);
        let mut chart = Self {
            model: Arc::new(FlameChartModel::default()),
            layout: ChartLayout::compute(&FlameChartModel::default(), &style),
            style,
            viewport,
        };
        chart.set_model(model);
        chart
    }

    pub fn from_profile(profile: &Profile, style: FlameChartStyle, width: f32, height: f32) -> Self {
        Self::new(FlameChartModel::build(profile), style, width, height)
    }

    /// Swap in a new model and fit the viewport to it
    pub fn set_model(&mut self, model: impl Into<Arc<FlameChartModel>>) {
        self.model = model.into();
        self.layout = ChartLayout::compute(&self.model, &self.style);
        self.viewport.fit(self.model.end_time);
        self.viewport.clamp_scroll(self.layout.content_height());
    }

    pub fn set_profile(&mut self, profile: &Profile) {
        self.set_model(FlameChartModel::build(profile));
    }

    pub fn model(&self) -> &FlameChartModel {
        &self.model
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn style(&self) -> &FlameChartStyle {
        &self.style
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn zoom_at(&mut self, x: f32, factor: f64) {
        self.viewport.zoom_at(x, factor);
    }

    pub fn pan_by(&mut self, dx: f32) {
        self.viewport.pan_by(dx);
    }

    pub fn scroll_by(&mut self, dy: f32) {
        self.viewport.scroll_by(dy, self.layout.content_height());
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
        self.viewport.clamp_scroll(self.layout.content_height());
    }

    pub fn hit_test(&self, x: f32, y: f32) -> Option<Hit> {
        hit_test(&self.layout, &self.model, &self.viewport, &self.style, x, y)
    }

    pub fn ticks(&self) -> Vec<Tick> {
        ticks(&self.viewport, &self.style)
    }

    /// Visible blocks of one block section
    pub fn visible_blocks(&self, section: usize) -> Vec<MergedBlock> {
        self.model
            .block_sections
            .get(section)
            .map(|s| visible_blocks(s, &self.viewport, MIN_BLOCK_WIDTH))
            .unwrap_or_default()
    }

    pub fn render_svg(&self) -> String {
        svg::render_svg(self)
    }
}

/// Shared, swappable chart model for concurrent readers
#[derive(Clone)]
pub struct ChartData {
    inner: Arc<RwLock<Arc<FlameChartModel>>>,
}

impl ChartData {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(FlameChartModel::default()))),
        }
    }

    pub fn from_profile(profile: &Profile) -> Self {
        let data = Self::new();
        data.set_profile(profile);
        data
    }

    pub fn set_model(&self, model: FlameChartModel) {
        *self.inner.write() = Arc::new(model);
    }

    pub fn set_profile(&self, profile: &Profile) {
        self.set_model(FlameChartModel::build(profile));
    }

    pub fn get_model(&self) -> Arc<FlameChartModel> {
        Arc::clone(&self.inner.read())
    }

    pub fn clear(&self) {
        *self.inner.write() = Arc::new(FlameChartModel::default());
    }
}

impl Default for ChartData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profiling::TraceEvent;
    use crate::style_constants::*;

    fn profile(seconds: f64) -> Profile {
        Profile::new(vec![
            TraceEvent::complete("root", 0.0, seconds * 1e6, 1, 1),
            TraceEvent::complete("child", 0.0, seconds * 5e5, 1, 1),
        ])
    }

    #[test]
    fn test_fits_profile() {
        let chart = FlameChart::from_profile(&profile(4.0), FlameChartStyle::default(), 500.0, 300.0);
        assert_eq!(chart.viewport().visible_time_range(), 0.0..4.0);
        assert_eq!(chart.layout().sections.len(), 1);
    }

    #[test]
    fn test_short_profile_uses_initial_end() {
        let chart = FlameChart::from_profile(&profile(0.2), FlameChartStyle::default(), 500.0, 300.0);
        assert_eq!(chart.viewport().end_time, INITIAL_END_TIME_SECONDS);
    }

    #[test]
    fn test_set_profile_resets_viewport() {
        let mut chart = FlameChart::from_profile(&profile(4.0), FlameChartStyle::default(), 500.0, 300.0);
        chart.zoom_at(100.0, 4.0);
        assert!(chart.viewport().duration() < 4.0);

        chart.set_profile(&profile(8.0));
        assert_eq!(chart.viewport().visible_time_range(), 0.0..8.0);
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let mut chart = FlameChart::from_profile(&profile(1.0), FlameChartStyle::default(), 500.0, 50.0);
        chart.scroll_by(1000.0);
        assert_eq!(chart.viewport().scroll_y, chart.layout().content_height() - 50.0);

        chart.resize(500.0, 1000.0);
        assert_eq!(chart.viewport().scroll_y, 0.0);
    }

    #[test]
    fn test_nan_scroll_does_not_stick() {
        let mut chart = FlameChart::from_profile(&profile(1.0), FlameChartStyle::default(), 500.0, 50.0);
        chart.scroll_by(f32::NAN);
        assert_eq!(chart.viewport().scroll_y, 0.0);

        chart.scroll_by(10.0);
        assert!(chart.viewport().scroll_y.is_finite());
        assert!(chart.viewport().scroll_y > 0.0);
        assert!(!chart.render_svg().contains("NaN"));
    }

    #[test]
    fn test_visible_blocks() {
        let chart = FlameChart::from_profile(&profile(1.0), FlameChartStyle::default(), 500.0, 300.0);
        assert_eq!(chart.visible_blocks(0).len(), 2);
        assert!(chart.visible_blocks(5).is_empty());
    }

    #[test]
    fn test_chart_data_swaps_snapshots() {
        let data = ChartData::new();
        let before = data.get_model();
        assert!(before.is_empty());

        data.set_profile(&profile(1.0));
        assert!(before.is_empty());
        assert_eq!(data.get_model().block_count(), 2);

        let handle = data.clone();
        handle.clear();
        assert!(data.get_model().is_empty());
    }

    #[test]
    fn test_chart_data_across_threads() {
        let data = ChartData::from_profile(&profile(1.0));
        let reader = data.clone();
        let count = std::thread::spawn(move || reader.get_model().block_count())
            .join()
            .unwrap();
        assert_eq!(count, 2);
    }
}
