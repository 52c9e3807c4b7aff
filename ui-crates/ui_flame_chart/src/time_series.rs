//! Placement of time series points inside their track

use crate::model::TimeSeriesTrack;
use crate::style::FlameChartStyle;
use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlottedPoint {
    /// Index into the track's points
    pub index: usize,
    pub x: f32,
    /// Content-space y of the point center
    pub y: f32,
    pub radius: f32,
}

/// Y of a value within a track whose top is at `track_y`.
///
/// `0` sits on the bottom edge and `max_value` on the top edge, both inset by
/// the point radius so the circles stay inside the track.
pub fn value_to_y(value: f64, max_value: f64, track_y: f32, style: &FlameChartStyle) -> f32 {
    let radius = style.point_radius;
    let usable = (style.time_series_height - 2.0 * radius).max(0.0);
    let ratio = if max_value > 0.0 {
        (value / max_value).clamp(0.0, 1.0) as f32
    } else {
        0.0
    };
    track_y + radius + (1.0 - ratio) * usable
}

/// Visible points of `track`, plus one neighbour past each edge so a line
/// drawn through them reaches the border of the plot.
pub fn plot_track(
    track: &TimeSeriesTrack,
    track_y: f32,
    viewport: &Viewport,
    style: &FlameChartStyle,
) -> Vec<PlottedPoint> {
    let range = viewport.visible_time_range();
    let first = track
        .points
        .partition_point(|p| p.time < range.start)
        .saturating_sub(1);
    let last = (track.points.partition_point(|p| p.time <= range.end) + 1).min(track.points.len());
    if first >= last {
        return Vec::new();
    }

    track.points[first..last]
        .iter()
        .enumerate()
        .map(|(offset, point)| PlottedPoint {
            index: first + offset,
            x: viewport.time_to_x(point.time),
            y: value_to_y(point.value, track.max_value, track_y, style),
            radius: style.point_radius,
        })
        .collect()
}
