//! Flame chart model: blocks packed into rows per thread, plus counter tracks

use std::collections::BTreeMap;
use profiling::{Profile, TraceEvent, MICROS_PER_SECOND};
use crate::colors::{color_for_label, series_color, Hsla};

/// A single time interval drawn as a rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub label: String,
    pub category: Option<String>,
    /// Seconds since the start of the profile
    pub start: f64,
    pub duration: f64,
    pub color: Hsla,
}

impl Block {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// One thread of the profile. `rows[n]` holds the blocks drawn on row `n`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSection {
    pub name: String,
    pub pid: u64,
    pub tid: u64,
    pub rows: Vec<Vec<Block>>,
}

impl BlockSection {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn block_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub time: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTrack {
    pub label: String,
    pub points: Vec<DataPoint>,
    pub max_value: f64,
    pub color: Hsla,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesSection {
    pub name: String,
    pub tracks: Vec<TimeSeriesTrack>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlameChartModel {
    pub block_sections: Vec<BlockSection>,
    pub time_series_sections: Vec<TimeSeriesSection>,
    /// Seconds from the first to the last timestamp of the profile
    pub end_time: f64,
}

impl FlameChartModel {
    pub fn build(profile: &Profile) -> Self {
        let build_start = std::time::Instant::now();

        let timelines = profile.thread_timelines();
        let counters = profile.counter_series();
        let Some((origin, last)) = profiling::time_bounds(&timelines, &counters) else {
            return Self::default();
        };

        let block_sections: Vec<BlockSection> = timelines
            .into_iter()
            .map(|thread| BlockSection {
                rows: pack_rows(&thread.events, origin),
                name: thread.name,
                pid: thread.pid,
                tid: thread.tid,
            })
            .collect();

        let mut grouped: BTreeMap<String, Vec<TimeSeriesTrack>> = BTreeMap::new();
        for (index, series) in counters.into_iter().enumerate() {
            let points: Vec<DataPoint> = series
                .points
                .iter()
                .map(|&(ts, value)| DataPoint {
                    time: (ts - origin) / MICROS_PER_SECOND,
                    value,
                })
                .collect();
            let max_value = points.iter().map(|p| p.value).fold(0.0, f64::max);
            grouped.entry(series.name).or_default().push(TimeSeriesTrack {
                label: series.key,
                points,
                max_value,
                color: series_color(index),
            });
        }
        let time_series_sections = grouped
            .into_iter()
            .map(|(name, tracks)| TimeSeriesSection { name, tracks })
            .collect();

        let model = Self {
            block_sections,
            time_series_sections,
            end_time: (last - origin) / MICROS_PER_SECOND,
        };

        tracing::debug!(
            "[MODEL] built {} block sections ({} blocks), {} time series sections in {:?}",
            model.block_sections.len(),
            model.block_count(),
            model.time_series_sections.len(),
            build_start.elapsed()
        );

        model
    }

    pub fn is_empty(&self) -> bool {
        self.block_sections.is_empty() && self.time_series_sections.is_empty()
    }

    pub fn block_count(&self) -> usize {
        self.block_sections.iter().map(BlockSection::block_count).sum()
    }
}

/// Assign each event to a row so no two blocks in a row overlap.
///
/// `events` must be sorted by start ascending, then duration descending, as
/// produced by [`profiling::ThreadTimeline`]. A block starts one row below the
/// deepest block still open at its start time, then moves down until it finds
/// a row that is free. A block is never drawn above a block that contains it.
pub fn pack_rows(events: &[TraceEvent], origin_micros: f64) -> Vec<Vec<Block>> {
    let mut rows: Vec<Vec<Block>> = Vec::new();
    // (end, row) of blocks still open at the current start time
    let mut open: Vec<(f64, usize)> = Vec::new();

    for event in events {
        let start = (event.ts - origin_micros) / MICROS_PER_SECOND;
        let duration = event.duration() / MICROS_PER_SECOND;
        let end = start + duration;

        open.retain(|&(open_end, _)| open_end > start);

        let mut row = open.iter().map(|&(_, r)| r + 1).max().unwrap_or(0);
        while rows
            .get(row)
            .and_then(|r| r.last())
            .is_some_and(|last| last.end() > start)
        {
            row += 1;
        }
        if row == rows.len() {
            rows.push(Vec::new());
        }

        rows[row].push(Block {
            label: event.name.clone(),
            category: event.cat.clone(),
            start,
            duration,
            color: color_for_label(&event.name),
        });
        open.push((end, row));
    }

    rows
}
