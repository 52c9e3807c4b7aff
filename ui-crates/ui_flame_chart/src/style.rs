//! Runtime style configuration
//!
//! The compiled-in constants are the defaults; a TOML file can override any
//! subset of them.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::style_constants::*;

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("Failed to read style file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed style TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize style: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Sizes used by layout and rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlameChartStyle {
    pub timestamp_header_size: f32,
    pub timestamp_font_size: f32,

    pub section_label_height: f32,
    pub section_padding_top: f32,
    pub section_padding_bottom: f32,

    pub block_vertical_gap: f32,
    pub time_series_vertical_gap: f32,

    pub initial_end_time_seconds: f64,
    pub block_height: f32,
    pub time_series_height: f32,
    pub point_radius: f32,

    pub vertical_scrollbar_width: f32,
}

impl Default for FlameChartStyle {
    fn default() -> Self {
        Self {
            timestamp_header_size: TIMESTAMP_HEADER_SIZE,
            timestamp_font_size: TIMESTAMP_FONT_SIZE,
            section_label_height: SECTION_LABEL_HEIGHT,
            section_padding_top: SECTION_PADDING_TOP,
            section_padding_bottom: SECTION_PADDING_BOTTOM,
            block_vertical_gap: BLOCK_VERTICAL_GAP,
            time_series_vertical_gap: TIME_SERIES_VERTICAL_GAP,
            initial_end_time_seconds: INITIAL_END_TIME_SECONDS,
            block_height: BLOCK_HEIGHT,
            time_series_height: TIME_SERIES_HEIGHT,
            point_radius: POINT_RADIUS,
            vertical_scrollbar_width: VERTICAL_SCROLLBAR_WIDTH,
        }
    }
}

impl FlameChartStyle {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, StyleError> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn to_toml_string(&self) -> Result<String, StyleError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load and validate a style file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StyleError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| StyleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let style = Self::from_toml_str(&contents)?;
        style.validate()?;
        tracing::debug!("[STYLE] loaded style overrides from {}", path.display());
        Ok(style)
    }

    pub fn block_row_pitch(&self) -> f32 {
        self.block_height + self.block_vertical_gap
    }

    pub fn time_series_row_pitch(&self) -> f32 {
        self.time_series_height + self.time_series_vertical_gap
    }

    fn sizes(&self) -> [(&'static str, f64); 12] {
        [
            ("timestamp_header_size", self.timestamp_header_size as f64),
            ("timestamp_font_size", self.timestamp_font_size as f64),
            ("section_label_height", self.section_label_height as f64),
            ("section_padding_top", self.section_padding_top as f64),
            ("section_padding_bottom", self.section_padding_bottom as f64),
            ("block_vertical_gap", self.block_vertical_gap as f64),
            ("time_series_vertical_gap", self.time_series_vertical_gap as f64),
            ("initial_end_time_seconds", self.initial_end_time_seconds),
            ("block_height", self.block_height as f64),
            ("time_series_height", self.time_series_height as f64),
            ("point_radius", self.point_radius as f64),
            ("vertical_scrollbar_width", self.vertical_scrollbar_width as f64),
        ]
    }

    pub fn validate(&self) -> Result<(), StyleError> {
        for (field, value) in self.sizes() {
            if !value.is_finite() || value < 0.0 {
                return Err(StyleError::Invalid {
                    field,
                    reason: format!("{} must be a finite non-negative number", value),
                });
            }
        }

        for (field, value) in [
            ("block_height", self.block_height as f64),
            ("time_series_height", self.time_series_height as f64),
            ("initial_end_time_seconds", self.initial_end_time_seconds),
        ] {
            if value == 0.0 {
                return Err(StyleError::Invalid {
                    field,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        if self.point_radius * 2.0 > self.time_series_height {
            return Err(StyleError::Invalid {
                field: "point_radius",
                reason: format!(
                    "diameter {} does not fit in time_series_height {}",
                    self.point_radius * 2.0,
                    self.time_series_height
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let style = FlameChartStyle::default();
        assert_eq!(style.block_height, BLOCK_HEIGHT);
        assert_eq!(style.vertical_scrollbar_width, VERTICAL_SCROLLBAR_WIDTH);
        assert_eq!(style.initial_end_time_seconds, INITIAL_END_TIME_SECONDS);
        assert_eq!(style.block_row_pitch(), BLOCK_ROW_PITCH);
        assert_eq!(style.time_series_row_pitch(), TIME_SERIES_ROW_PITCH);
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let style = FlameChartStyle::from_toml_str("block_height = 20.0\n").unwrap();
        assert_eq!(style.block_height, 20.0);
        assert_eq!(style.block_vertical_gap, BLOCK_VERTICAL_GAP);
        assert_eq!(style.block_row_pitch(), 21.0);
    }

    #[test]
    fn test_misspelled_key_is_rejected() {
        let err = FlameChartStyle::from_toml_str("block_heigth = 30.0\n").unwrap_err();
        assert!(matches!(err, StyleError::Parse(_)));
        assert!(err.to_string().contains("block_heigth"));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut style = FlameChartStyle::default();
        style.point_radius = 3.0;
        let text = style.to_toml_string().unwrap();
        assert_eq!(FlameChartStyle::from_toml_str(&text).unwrap(), style);
    }

    #[test]
    fn test_rejects_negative() {
        let mut style = FlameChartStyle::default();
        style.section_padding_top = -1.0;
        match style.validate() {
            Err(StyleError::Invalid { field, .. }) => assert_eq!(field, "section_padding_top"),
            other => panic!("expected invalid style, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_zero_block_height() {
        let mut style = FlameChartStyle::default();
        style.block_height = 0.0;
        assert!(matches!(
            style.validate(),
            Err(StyleError::Invalid { field: "block_height", .. })
        ));
    }

    #[test]
    fn test_zero_gap_is_allowed() {
        let mut style = FlameChartStyle::default();
        style.block_vertical_gap = 0.0;
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_rejects_oversized_points() {
        let mut style = FlameChartStyle::default();
        style.point_radius = 30.0;
        assert!(matches!(
            style.validate(),
            Err(StyleError::Invalid { field: "point_radius", .. })
        ));
    }

    #[test]
    fn test_load_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.toml");
        std::fs::write(&path, "time_series_height = -4.0\n").unwrap();
        assert!(matches!(FlameChartStyle::load(&path), Err(StyleError::Invalid { .. })));

        std::fs::write(&path, "time_series_height = 64.0\n").unwrap();
        assert_eq!(FlameChartStyle::load(&path).unwrap().time_series_height, 64.0);
    }
}
