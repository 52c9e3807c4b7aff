//! A single record of the trace event format

use serde::{Serialize, Deserialize};

/// A trace event as written to the profile file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Event name (action, function or counter name)
    #[serde(default)]
    pub name: String,
    /// Comma separated categories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cat: Option<String>,
    /// Phase code, see [`Phase`]
    #[serde(default)]
    pub ph: String,
    /// Start timestamp in microseconds
    #[serde(default)]
    pub ts: f64,
    /// Duration in microseconds, only present on complete events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dur: Option<f64>,
    #[serde(default)]
    pub pid: u64,
    #[serde(default)]
    pub tid: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<serde_json::Map<String, serde_json::Value>>,
}

/// The phases the flame chart understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Complete,
    Begin,
    End,
    Instant,
    Counter,
    Metadata,
    Other,
}

impl TraceEvent {
    pub fn phase(&self) -> Phase {
        match self.ph.as_str() {
            "X" => Phase::Complete,
            "B" => Phase::Begin,
            "E" => Phase::End,
            "i" | "I" | "n" => Phase::Instant,
            "C" => Phase::Counter,
            "M" => Phase::Metadata,
            _ => Phase::Other,
        }
    }

    /// Duration in microseconds; missing or negative durations count as zero
    pub fn duration(&self) -> f64 {
        match self.dur {
            Some(dur) if dur.is_finite() && dur > 0.0 => dur,
            _ => 0.0,
        }
    }

    pub fn end(&self) -> f64 {
        self.ts + self.duration()
    }

    /// Look up a string argument
    pub fn arg_str(&self, key: &str) -> Option<&str> {
        self.args.as_ref()?.get(key)?.as_str()
    }

    /// Look up an integer argument
    pub fn arg_i64(&self, key: &str) -> Option<i64> {
        self.args.as_ref()?.get(key)?.as_i64()
    }

    /// Build a complete event, mostly useful for tests and synthetic traces
    pub fn complete(name: impl Into<String>, ts: f64, dur: f64, pid: u64, tid: u64) -> Self {
        Self {
            name: name.into(),
            cat: None,
            ph: "X".to_string(),
            ts,
            dur: Some(dur),
            pid,
            tid,
            args: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_codes() {
        let mut event = TraceEvent::complete("a", 0.0, 1.0, 0, 0);
        assert_eq!(event.phase(), Phase::Complete);

        event.ph = "C".to_string();
        assert_eq!(event.phase(), Phase::Counter);

        event.ph = "I".to_string();
        assert_eq!(event.phase(), Phase::Instant);

        event.ph = "s".to_string();
        assert_eq!(event.phase(), Phase::Other);
    }

    #[test]
    fn test_negative_duration_is_zero() {
        let event = TraceEvent::complete("a", 10.0, -5.0, 0, 0);
        assert_eq!(event.duration(), 0.0);
        assert_eq!(event.end(), 10.0);
    }

    #[test]
    fn test_args_lookup() {
        let event: TraceEvent = serde_json::from_str(
            r#"{"name": "thread_sort_index", "ph": "M", "args": {"sort_index": 3, "name": "x"}}"#,
        )
        .unwrap();
        assert_eq!(event.arg_i64("sort_index"), Some(3));
        assert_eq!(event.arg_str("name"), Some("x"));
        assert_eq!(event.arg_str("missing"), None);
    }
}
