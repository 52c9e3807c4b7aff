//! Per-thread grouping of timed events

use std::collections::{BTreeMap, HashMap};
use crate::event::{Phase, TraceEvent};

/// All complete events recorded on one thread
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadTimeline {
    pub pid: u64,
    pub tid: u64,
    pub name: String,
    pub sort_index: i64,
    /// Complete events sorted by start ascending, then duration descending
    pub events: Vec<TraceEvent>,
}

type ThreadKey = (u64, u64);

pub(crate) fn group_by_thread(events: &[TraceEvent]) -> Vec<ThreadTimeline> {
    let mut names: HashMap<ThreadKey, String> = HashMap::new();
    let mut sort_indices: HashMap<ThreadKey, i64> = HashMap::new();
    let mut completed: BTreeMap<ThreadKey, Vec<TraceEvent>> = BTreeMap::new();
    let mut open: HashMap<ThreadKey, Vec<&TraceEvent>> = HashMap::new();

    for event in events {
        let key = (event.pid, event.tid);
        match event.phase() {
            Phase::Metadata => match event.name.as_str() {
                "thread_name" => {
                    if let Some(name) = event.arg_str("name") {
                        names.insert(key, name.to_string());
                    }
                }
                "thread_sort_index" => {
                    if let Some(index) = event.arg_i64("sort_index") {
                        sort_indices.insert(key, index);
                    }
                }
                _ => {}
            },
            Phase::Complete => completed.entry(key).or_default().push(event.clone()),
            Phase::Instant => {
                let mut instant = event.clone();
                instant.ph = "X".to_string();
                instant.dur = Some(0.0);
                completed.entry(key).or_default().push(instant);
            }
            Phase::Begin => open.entry(key).or_default().push(event),
            Phase::End => {
                let Some(begin) = open.get_mut(&key).and_then(|stack| stack.pop()) else {
                    tracing::warn!("[PROFILE] unmatched end event `{}` on thread {:?}", event.name, key);
                    continue;
                };
                let mut matched = begin.clone();
                if matched.name.is_empty() {
                    matched.name = event.name.clone();
                }
                matched.ph = "X".to_string();
                matched.dur = Some((event.ts - begin.ts).max(0.0));
                completed.entry(key).or_default().push(matched);
            }
            Phase::Counter | Phase::Other => {}
        }
    }

    let unmatched: usize = open.values().map(Vec::len).sum();
    if unmatched > 0 {
        tracing::warn!("[PROFILE] dropping {} begin events without a matching end", unmatched);
    }

    let mut timelines: Vec<ThreadTimeline> = completed
        .into_iter()
        .map(|(key, mut events)| {
            events.sort_by(|a, b| {
                a.ts.total_cmp(&b.ts)
                    .then_with(|| b.duration().total_cmp(&a.duration()))
            });
            let (pid, tid) = key;
            ThreadTimeline {
                pid,
                tid,
                name: names
                    .remove(&key)
                    .unwrap_or_else(|| format!("Thread {}", tid)),
                sort_index: sort_indices.get(&key).copied().unwrap_or(tid as i64),
                events,
            }
        })
        .collect();

    timelines.sort_by_key(|t| (t.sort_index, t.pid, t.tid));
    timelines
}
