//! Layout and visual constants for the flame chart
//!
//! Sizes are in pixels, times in seconds.

pub const TIMESTAMP_HEADER_SIZE: f32 = 16.0;
pub const TIMESTAMP_FONT_SIZE: f32 = 12.0;

pub const SECTION_LABEL_HEIGHT: f32 = 20.0;
pub const SECTION_PADDING_TOP: f32 = 8.0;
pub const SECTION_PADDING_BOTTOM: f32 = 8.0;

pub const BLOCK_VERTICAL_GAP: f32 = 1.0;
pub const TIME_SERIES_VERTICAL_GAP: f32 = 1.0;

pub const INITIAL_END_TIME_SECONDS: f64 = 1.0;
pub const BLOCK_HEIGHT: f32 = 16.0;
pub const TIME_SERIES_HEIGHT: f32 = 48.0;
pub const POINT_RADIUS: f32 = 2.0;

/// Keep in sync with the scrollbar width in `assets/flame_chart.css`
pub const VERTICAL_SCROLLBAR_WIDTH: f32 = 14.0;

/// Distance between the tops of two consecutive block rows
pub const BLOCK_ROW_PITCH: f32 = BLOCK_HEIGHT + BLOCK_VERTICAL_GAP;
/// Distance between the tops of two consecutive time series tracks
pub const TIME_SERIES_ROW_PITCH: f32 = TIME_SERIES_HEIGHT + TIME_SERIES_VERTICAL_GAP;

// Rendering thresholds
pub const MIN_BLOCK_WIDTH: f32 = 1.0;
pub const MIN_LABELED_BLOCK_WIDTH: f32 = 40.0;
pub const MIN_VISIBLE_DURATION_SECONDS: f64 = 1e-6;
