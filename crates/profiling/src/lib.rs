//! Trace profile loading for the flame chart
//!
//! Profiles use the Chrome trace event format, which is what Bazel writes for
//! `--profile` and what most tracing tools can export. The loader accepts both
//! the object form (`{"traceEvents": [...]}`) and a bare array of events.
//!
//! # Usage
//!
//! ```rust
//! let profile = profiling::parse_profile(r#"{"traceEvents": [
//!     {"name": "build", "ph": "X", "ts": 0, "dur": 1000, "pid": 1, "tid": 1}
//! ]}"#).unwrap();
//!
//! let threads = profile.thread_timelines();
//! assert_eq!(threads[0].events[0].name, "build");
//! ```

use std::path::Path;
use serde::{Serialize, Deserialize};

mod error;
mod event;
mod timeline;
mod counters;

pub use error::ProfileError;
pub use event::{Phase, TraceEvent};
pub use timeline::ThreadTimeline;
pub use counters::{CounterSeries, numeric_arg};

/// Microseconds per second; trace timestamps are in microseconds
pub const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// A parsed trace profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "traceEvents", default)]
    pub trace_events: Vec<TraceEvent>,
    #[serde(rename = "otherData", default, skip_serializing_if = "Option::is_none")]
    pub other_data: Option<serde_json::Value>,
}

/// Both on-disk shapes a trace file can take
#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileFile {
    // Must stay first: a struct also deserializes from a sequence.
    Events(Vec<TraceEvent>),
    Object(Profile),
}

impl Profile {
    pub fn new(trace_events: Vec<TraceEvent>) -> Self {
        Self {
            trace_events,
            other_data: None,
        }
    }

    /// Earliest start and latest end (in microseconds) over every event that
    /// ends up on the chart
    ///
    /// Unmatched begin/end events and non-numeric counters are left out, as
    /// they are by [`Profile::thread_timelines`] and [`Profile::counter_series`].
    pub fn time_bounds(&self) -> Option<(f64, f64)> {
        time_bounds(&self.thread_timelines(), &self.counter_series())
    }

    /// Group the profile into one timeline per `(pid, tid)` thread
    pub fn thread_timelines(&self) -> Vec<ThreadTimeline> {
        timeline::group_by_thread(&self.trace_events)
    }

    /// Extract every counter track in the profile
    pub fn counter_series(&self) -> Vec<CounterSeries> {
        counters::collect(&self.trace_events)
    }
}

/// Earliest start and latest end (in microseconds) over already grouped
/// timelines and counter tracks
pub fn time_bounds(timelines: &[ThreadTimeline], counters: &[CounterSeries]) -> Option<(f64, f64)> {
    let blocks = timelines
        .iter()
        .flat_map(|t| &t.events)
        .map(|e| (e.ts, e.end()));
    let points = counters
        .iter()
        .flat_map(|s| &s.points)
        .map(|&(ts, _)| (ts, ts));

    blocks
        .chain(points)
        .filter(|(start, end)| start.is_finite() && end.is_finite())
        .reduce(|(min, max), (start, end)| (min.min(start), max.max(end)))
}

/// Parse a profile from JSON text
pub fn parse_profile(json: &str) -> Result<Profile, ProfileError> {
    if json.trim().is_empty() {
        return Err(ProfileError::Empty);
    }

    let profile = match serde_json::from_str::<ProfileFile>(json)? {
        ProfileFile::Events(events) => Profile::new(events),
        ProfileFile::Object(profile) => profile,
    };

    tracing::debug!("[PROFILE] parsed {} trace events", profile.trace_events.len());
    Ok(profile)
}

/// Read and parse a profile JSON file from disk
pub fn read_profile(path: impl AsRef<Path>) -> Result<Profile, ProfileError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_profile(&contents)
}
