//! Timestamp header: tick placement and labels

use crate::style::FlameChartStyle;
use crate::viewport::Viewport;

/// Average glyph advance as a fraction of the font size
const CHAR_WIDTH_RATIO: f32 = 0.6;
/// Longest label we plan room for, e.g. `1234.56s`
const LABEL_CHARS: f32 = 8.0;
/// Upper bound on ticks per header; guards against degenerate viewports
const MAX_TICKS: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub x: f32,
    pub time: f64,
    pub label: String,
}

/// Minimum distance between two ticks so their labels don't collide
pub fn min_tick_spacing(style: &FlameChartStyle) -> f32 {
    style.timestamp_font_size * CHAR_WIDTH_RATIO * LABEL_CHARS + style.timestamp_font_size
}

/// Y of the label baseline, vertically centered in the header
pub fn label_baseline(style: &FlameChartStyle) -> f32 {
    (style.timestamp_header_size + style.timestamp_font_size) / 2.0
}

/// Smallest `{1, 2, 5} * 10^k` second interval at least `min_spacing_px` wide
pub fn tick_interval(seconds_per_pixel: f64, min_spacing_px: f64) -> f64 {
    let min_interval = seconds_per_pixel * min_spacing_px;
    if !min_interval.is_finite() || min_interval <= 0.0 {
        return 1.0;
    }

    let magnitude = 10f64.powi(min_interval.log10().floor() as i32);
    for multiplier in [1.0, 2.0, 5.0, 10.0] {
        let candidate = multiplier * magnitude;
        // Tolerate rounding in log10
        if candidate >= min_interval * (1.0 - 1e-9) {
            return candidate;
        }
    }
    10.0 * magnitude
}

/// Format `time` with just enough precision for ticks `interval` apart
pub fn format_time(time: f64, interval: f64) -> String {
    let (value, unit, step) = if interval < 1e-3 {
        (time * 1e3, "ms", interval * 1e3)
    } else {
        (time, "s", interval)
    };

    let decimals = (-step.log10() - 1e-6).ceil().max(0.0) as usize;
    let mut text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        text = text.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    if text == "-0" {
        text = "0".to_string();
    }
    format!("{}{}", text, unit)
}

/// Ticks for the visible time range
pub fn ticks(viewport: &Viewport, style: &FlameChartStyle) -> Vec<Tick> {
    let interval = tick_interval(viewport.seconds_per_pixel(), min_tick_spacing(style) as f64);
    let range = viewport.visible_time_range();

    let first = (range.start / interval - 1e-9).ceil() as i64;
    let last = (range.end / interval + 1e-9).floor() as i64;
    if last < first {
        return Vec::new();
    }

    (first..=last)
        .take(MAX_TICKS)
        .map(|i| {
            let time = i as f64 * interval;
            Tick {
                x: viewport.time_to_x(time),
                time,
                label: format_time(time, interval),
            }
        })
        .collect()
}
