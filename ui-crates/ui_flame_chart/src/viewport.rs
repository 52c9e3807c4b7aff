//! Viewport state and coordinate transforms for pan, zoom and scroll

use std::ops::Range;
use crate::style::FlameChartStyle;
use crate::style_constants::MIN_VISIBLE_DURATION_SECONDS;

/// Visible window onto the chart
///
/// Horizontally the viewport covers `start_time..end_time` seconds spread
/// over the plot area, which is the full width minus the vertical scrollbar.
/// Vertically it shows content rows `scroll_y..scroll_y + height`.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub start_time: f64,
    pub end_time: f64,
    pub width: f32,
    pub height: f32,
    pub scroll_y: f32,
    scrollbar_width: f32,
    initial_end_time: f64,
}

impl Viewport {
    pub fn new(width: f32, height: f32, style: &FlameChartStyle) -> Self {
        Self {
            start_time: 0.0,
            end_time: style.initial_end_time_seconds,
            width: width.max(0.0),
            height: height.max(0.0),
            scroll_y: 0.0,
            scrollbar_width: style.vertical_scrollbar_width,
            initial_end_time: style.initial_end_time_seconds,
        }
    }

    /// Show the whole profile, never less than the initial time span
    pub fn fit(&mut self, end_time: f64) {
        self.start_time = 0.0;
        self.end_time = if end_time.is_finite() {
            end_time.max(self.initial_end_time)
        } else {
            self.initial_end_time
        };
    }

    /// Width available for blocks, excluding the scrollbar
    pub fn plot_width(&self) -> f32 {
        (self.width - self.scrollbar_width).max(0.0)
    }

    pub fn scrollbar_x(&self) -> f32 {
        self.plot_width()
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn seconds_per_pixel(&self) -> f64 {
        let plot_width = self.plot_width() as f64;
        if plot_width <= 0.0 {
            return self.duration();
        }
        self.duration() / plot_width
    }

    pub fn time_to_x(&self, time: f64) -> f32 {
        ((time - self.start_time) / self.seconds_per_pixel()) as f32
    }

    pub fn x_to_time(&self, x: f32) -> f64 {
        self.start_time + x as f64 * self.seconds_per_pixel()
    }

    pub fn visible_time_range(&self) -> Range<f64> {
        self.start_time..self.end_time
    }

    /// Content-space rows currently on screen
    pub fn visible_content_range(&self) -> Range<f32> {
        self.scroll_y..self.scroll_y + self.height
    }

    /// Zoom by `factor` (> 1 zooms in) keeping the time under `x` in place
    pub fn zoom_at(&mut self, x: f32, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            tracing::warn!("[VIEWPORT] ignoring invalid zoom factor {}", factor);
            return;
        }
        if !x.is_finite() {
            tracing::warn!("[VIEWPORT] ignoring invalid zoom anchor {}", x);
            return;
        }

        let plot_width = self.plot_width();
        let ratio = if plot_width > 0.0 {
            (x / plot_width).clamp(0.0, 1.0) as f64
        } else {
            0.0
        };
        let anchor = self.start_time + ratio * self.duration();
        let duration = (self.duration() / factor).max(MIN_VISIBLE_DURATION_SECONDS);

        self.start_time = (anchor - ratio * duration).max(0.0);
        self.end_time = self.start_time + duration;
    }

    /// Drag the chart horizontally; positive `dx` reveals earlier times
    pub fn pan_by(&mut self, dx: f32) {
        if !dx.is_finite() {
            tracing::warn!("[VIEWPORT] ignoring invalid pan offset {}", dx);
            return;
        }
        let duration = self.duration();
        self.start_time = (self.start_time - dx as f64 * self.seconds_per_pixel()).max(0.0);
        self.end_time = self.start_time + duration;
    }

    /// Largest valid `scroll_y` for the given content height
    pub fn max_scroll(&self, content_height: f32) -> f32 {
        (content_height - self.height).max(0.0)
    }

    pub fn scroll_by(&mut self, dy: f32, content_height: f32) {
        if !dy.is_finite() {
            tracing::warn!("[VIEWPORT] ignoring invalid scroll offset {}", dy);
            return;
        }
        self.scroll_y = (self.scroll_y + dy).clamp(0.0, self.max_scroll(content_height));
    }

    pub fn clamp_scroll(&mut self, content_height: f32) {
        self.scroll_by(0.0, content_height);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style_constants::*;

    fn viewport() -> Viewport {
        // 100px plot area once the scrollbar is taken out
        Viewport::new(100.0 + VERTICAL_SCROLLBAR_WIDTH, 200.0, &FlameChartStyle::default())
    }

    #[test]
    fn test_initial_range() {
        let vp = viewport();
        assert_eq!(vp.visible_time_range(), 0.0..INITIAL_END_TIME_SECONDS);
        assert_eq!(vp.plot_width(), 100.0);
        assert_eq!(vp.scrollbar_x(), 100.0);
    }

    #[test]
    fn test_fit_never_shrinks_below_initial_end() {
        let mut vp = viewport();
        vp.fit(0.25);
        assert_eq!(vp.end_time, INITIAL_END_TIME_SECONDS);
        vp.fit(12.0);
        assert_eq!(vp.end_time, 12.0);
        vp.fit(f64::NAN);
        assert_eq!(vp.end_time, INITIAL_END_TIME_SECONDS);
    }

    #[test]
    fn test_time_x_round_trip() {
        let mut vp = viewport();
        vp.fit(10.0);
        assert_eq!(vp.time_to_x(5.0), 50.0);
        assert_eq!(vp.x_to_time(25.0), 2.5);
        assert_eq!(vp.seconds_per_pixel(), 0.1);
    }

    #[test]
    fn test_zoom_keeps_anchor() {
        let mut vp = viewport();
        vp.fit(10.0);
        let before = vp.x_to_time(40.0);
        vp.zoom_at(40.0, 2.0);
        assert!((vp.x_to_time(40.0) - before).abs() < 1e-9);
        assert!((vp.duration() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut vp = viewport();
        vp.zoom_at(50.0, 1e12);
        assert!((vp.duration() - MIN_VISIBLE_DURATION_SECONDS).abs() < 1e-15);

        let before = vp.clone();
        vp.zoom_at(50.0, 0.0);
        vp.zoom_at(50.0, f64::INFINITY);
        assert_eq!(vp, before);
    }

    #[test]
    fn test_zoom_out_does_not_go_negative() {
        let mut vp = viewport();
        vp.zoom_at(100.0, 0.5);
        assert_eq!(vp.start_time, 0.0);
        assert_eq!(vp.end_time, 2.0);
    }

    #[test]
    fn test_pan() {
        let mut vp = viewport();
        vp.fit(10.0);
        vp.pan_by(-20.0);
        assert!((vp.start_time - 2.0).abs() < 1e-9);
        assert!((vp.duration() - 10.0).abs() < 1e-9);

        vp.pan_by(1000.0);
        assert_eq!(vp.start_time, 0.0);
        assert!((vp.duration() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_scroll_clamping() {
        let mut vp = viewport();
        vp.scroll_by(50.0, 500.0);
        assert_eq!(vp.scroll_y, 50.0);
        vp.scroll_by(1000.0, 500.0);
        assert_eq!(vp.scroll_y, 300.0);
        vp.scroll_by(-1000.0, 500.0);
        assert_eq!(vp.scroll_y, 0.0);

        // Content shorter than the viewport cannot scroll
        vp.scroll_by(10.0, 100.0);
        assert_eq!(vp.scroll_y, 0.0);
    }

    #[test]
    fn test_non_finite_offsets_are_ignored() {
        let mut vp = viewport();
        vp.fit(10.0);
        vp.scroll_by(20.0, 500.0);
        let before = vp.clone();

        vp.scroll_by(f32::NAN, 500.0);
        vp.scroll_by(f32::INFINITY, 500.0);
        vp.pan_by(f32::NAN);
        vp.pan_by(f32::NEG_INFINITY);
        vp.zoom_at(f32::NAN, 2.0);
        assert_eq!(vp, before);

        vp.scroll_by(10.0, 500.0);
        assert_eq!(vp.scroll_y, 30.0);
    }

    #[test]
    fn test_resize_then_clamp() {
        let mut vp = viewport();
        vp.scroll_by(300.0, 500.0);
        vp.resize(114.0, 450.0);
        vp.clamp_scroll(500.0);
        assert_eq!(vp.scroll_y, 50.0);
        assert_eq!(vp.visible_content_range(), 50.0..500.0);
    }

    #[test]
    fn test_degenerate_width() {
        let vp = Viewport::new(5.0, 10.0, &FlameChartStyle::default());
        assert_eq!(vp.plot_width(), 0.0);
        assert_eq!(vp.seconds_per_pixel(), INITIAL_END_TIME_SECONDS);
    }
}
