//! Counter (`"ph": "C"`) tracks such as CPU and memory usage

use std::collections::BTreeMap;
use crate::event::{Phase, TraceEvent};

/// One counter track: a single arg of a named counter event
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSeries {
    pub name: String,
    pub key: String,
    /// `(timestamp_micros, value)` in time order
    pub points: Vec<(f64, f64)>,
}

/// Read a counter value; Bazel writes them as strings, other tools as numbers
pub fn numeric_arg(value: &serde_json::Value) -> Option<f64> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

pub(crate) fn collect(events: &[TraceEvent]) -> Vec<CounterSeries> {
    let mut series: BTreeMap<(String, String), Vec<(f64, f64)>> = BTreeMap::new();

    for event in events.iter().filter(|e| e.phase() == Phase::Counter) {
        let Some(args) = &event.args else {
            continue;
        };
        for (key, value) in args {
            match numeric_arg(value) {
                Some(number) => series
                    .entry((event.name.clone(), key.clone()))
                    .or_default()
                    .push((event.ts, number)),
                None => tracing::debug!(
                    "[PROFILE] skipping non-numeric counter arg {}.{}", event.name, key
                ),
            }
        }
    }

    series
        .into_iter()
        .map(|((name, key), mut points)| {
            points.sort_by(|a, b| a.0.total_cmp(&b.0));
            CounterSeries { name, key, points }
        })
        .collect()
}
