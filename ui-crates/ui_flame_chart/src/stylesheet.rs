//! Consistency check between the style constants and the shipped stylesheet
//!
//! The chart reserves `VERTICAL_SCROLLBAR_WIDTH` pixels on the right for the
//! native scrollbar, whose real width comes from CSS. If the two drift apart
//! the scrollbar overlaps the plot or leaves a gap next to it.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// The stylesheet served alongside the chart
pub const FLAME_CHART_CSS: &str = include_str!("../assets/flame_chart.css");

const SCROLLBAR_SELECTOR_SUFFIX: &str = "::-webkit-scrollbar";
const SCROLLBAR_WIDTH_PROPERTY: &str = "--vertical-scrollbar-width";

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^{}]+)\{([^{}]*)\}").unwrap());

#[derive(Debug, Error, PartialEq)]
pub enum StylesheetError {
    #[error("No scrollbar width declared in stylesheet")]
    NotFound,

    #[error("Cannot parse `{property}: {value}` as a pixel length")]
    InvalidValue { property: String, value: String },

    #[error("Scrollbar width out of sync: constant is {expected}px, stylesheet says {found}px")]
    OutOfSync { expected: f32, found: f32 },
}

/// Scrollbar width declared by `css`.
///
/// The `width` of the first `::-webkit-scrollbar` rule wins; otherwise the
/// `--vertical-scrollbar-width` custom property is used.
pub fn scrollbar_width_from_css(css: &str) -> Result<f32, StylesheetError> {
    let css = COMMENT.replace_all(css, "");
    let mut custom_property = None;

    for rule in RULE.captures_iter(&css) {
        let selectors = &rule[1];
        let body = &rule[2];

        let is_scrollbar_rule = selectors
            .split(',')
            .any(|s| s.trim().ends_with(SCROLLBAR_SELECTOR_SUFFIX));

        for (property, value) in declarations(body) {
            if is_scrollbar_rule && property == "width" {
                return parse_px(property, value);
            }
            if property == SCROLLBAR_WIDTH_PROPERTY && custom_property.is_none() {
                custom_property = Some(parse_px(property, value));
            }
        }
    }

    custom_property.unwrap_or(Err(StylesheetError::NotFound))
}

/// Verify that `expected` (normally `VERTICAL_SCROLLBAR_WIDTH`) matches `css`
pub fn check_scrollbar_sync(expected: f32, css: &str) -> Result<(), StylesheetError> {
    let found = scrollbar_width_from_css(css)?;
    if (found - expected).abs() > f32::EPSILON {
        tracing::warn!("[STYLESHEET] scrollbar width {}px != {}px", found, expected);
        return Err(StylesheetError::OutOfSync { expected, found });
    }
    Ok(())
}

fn declarations(body: &str) -> impl Iterator<Item = (&str, &str)> {
    body.split(';').filter_map(|decl| {
        let (property, value) = decl.split_once(':')?;
        Some((property.trim(), value.trim()))
    })
}

fn parse_px(property: &str, value: &str) -> Result<f32, StylesheetError> {
    let number = value.trim_end_matches("!important").trim();
    let number = number.strip_suffix("px").unwrap_or(number).trim();
    match number.parse::<f32>() {
        Ok(px) if px.is_finite() && px >= 0.0 => Ok(px),
        _ => Err(StylesheetError::InvalidValue {
            property: property.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style_constants::VERTICAL_SCROLLBAR_WIDTH;

    #[test]
    fn test_shipped_stylesheet_matches_constant() {
        assert_eq!(check_scrollbar_sync(VERTICAL_SCROLLBAR_WIDTH, FLAME_CHART_CSS), Ok(()));
    }

    #[test]
    fn test_scrollbar_rule_width() {
        let css = ".a { width: 100px; }\n.chart::-webkit-scrollbar { height: 3px; width: 9px }";
        assert_eq!(scrollbar_width_from_css(css), Ok(9.0));
    }

    #[test]
    fn test_thumb_rule_is_ignored() {
        let css = "::-webkit-scrollbar-thumb { width: 4px; }\n::-webkit-scrollbar { width: 12px; }";
        assert_eq!(scrollbar_width_from_css(css), Ok(12.0));
    }

    #[test]
    fn test_selector_list() {
        let css = ".x::-webkit-scrollbar-thumb, .y::-webkit-scrollbar { width: 11px; }";
        assert_eq!(scrollbar_width_from_css(css), Ok(11.0));
    }

    #[test]
    fn test_custom_property_fallback() {
        let css = ":root { --vertical-scrollbar-width: 16px; }";
        assert_eq!(scrollbar_width_from_css(css), Ok(16.0));
    }

    #[test]
    fn test_scrollbar_rule_beats_custom_property() {
        let css = ":root { --vertical-scrollbar-width: 16px; }\n::-webkit-scrollbar { width: 14px; }";
        assert_eq!(scrollbar_width_from_css(css), Ok(14.0));
    }

    #[test]
    fn test_comments_are_ignored() {
        let css = "/* ::-webkit-scrollbar { width: 99px; } */\n::-webkit-scrollbar { width: 14 !important; }";
        assert_eq!(scrollbar_width_from_css(css), Ok(14.0));
    }

    #[test]
    fn test_missing_width() {
        assert_eq!(scrollbar_width_from_css(".a { color: red; }"), Err(StylesheetError::NotFound));
    }

    #[test]
    fn test_invalid_width() {
        let err = scrollbar_width_from_css("::-webkit-scrollbar { width: 1em; }").unwrap_err();
        assert!(matches!(err, StylesheetError::InvalidValue { .. }));
    }

    #[test]
    fn test_out_of_sync() {
        let css = "::-webkit-scrollbar { width: 15px; }";
        assert_eq!(
            check_scrollbar_sync(14.0, css),
            Err(StylesheetError::OutOfSync { expected: 14.0, found: 15.0 })
        );
    }
}
