use serde::Serialize;
use url::Url;

use crate::logging::LogLevel;

pub const DEFAULT_TYPING_INTERVAL_MS: u32 = 100;
pub const DEFAULT_RAIN_INTERVAL_MS: u32 = 50;
pub const DEFAULT_RAIN_COLUMN_WIDTH: u32 = 20;
pub const DEFAULT_RAIN_RESET_PROBABILITY: f64 = 0.025;
pub const DEFAULT_RAIN_RESIZE_POLICY: ResizePolicy = ResizePolicy::KeepColumns;
pub const DEFAULT_SECTION_THRESHOLD: f64 = 0.3;
pub const DEFAULT_CURSOR_FOLLOW_MS: u32 = 300;
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const TYPING_INTERVAL_MS_BOUNDS: (u32, u32) = (10, 2_000);
const RAIN_INTERVAL_MS_BOUNDS: (u32, u32) = (10, 1_000);
const RAIN_COLUMN_WIDTH_BOUNDS: (u32, u32) = (8, 64);
const RAIN_RESET_PROBABILITY_BOUNDS: (f64, f64) = (0.0, 1.0);
const SECTION_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);
const CURSOR_FOLLOW_MS_BOUNDS: (u32, u32) = (0, 2_000);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    KeepColumns,
    Reflow,
}

impl ResizePolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "keep" | "keep_columns" => Some(Self::KeepColumns),
            "reflow" => Some(Self::Reflow),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EffectConfig {
    pub typing_interval_ms: u32,
    pub rain_interval_ms: u32,
    pub rain_column_width: u32,
    pub rain_reset_probability: f64,
    pub rain_resize: ResizePolicy,
    pub section_threshold: f64,
    pub cursor_follow_ms: u32,
    pub log_level: LogLevel,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            typing_interval_ms: DEFAULT_TYPING_INTERVAL_MS,
            rain_interval_ms: DEFAULT_RAIN_INTERVAL_MS,
            rain_column_width: DEFAULT_RAIN_COLUMN_WIDTH,
            rain_reset_probability: DEFAULT_RAIN_RESET_PROBABILITY,
            rain_resize: DEFAULT_RAIN_RESIZE_POLICY,
            section_threshold: DEFAULT_SECTION_THRESHOLD,
            cursor_follow_ms: DEFAULT_CURSOR_FOLLOW_MS,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl EffectConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            typing_interval_ms: parse_u32_with_bounds(
                non_empty("typing_interval_ms"),
                DEFAULT_TYPING_INTERVAL_MS,
                TYPING_INTERVAL_MS_BOUNDS,
            ),
            rain_interval_ms: parse_u32_with_bounds(
                non_empty("rain_interval_ms"),
                DEFAULT_RAIN_INTERVAL_MS,
                RAIN_INTERVAL_MS_BOUNDS,
            ),
            rain_column_width: parse_u32_with_bounds(
                non_empty("rain_column_width"),
                DEFAULT_RAIN_COLUMN_WIDTH,
                RAIN_COLUMN_WIDTH_BOUNDS,
            ),
            rain_reset_probability: parse_f64_with_bounds(
                non_empty("rain_reset_probability"),
                DEFAULT_RAIN_RESET_PROBABILITY,
                RAIN_RESET_PROBABILITY_BOUNDS,
            ),
            rain_resize: non_empty("rain_resize")
                .and_then(|value| ResizePolicy::parse(&value))
                .unwrap_or(DEFAULT_RAIN_RESIZE_POLICY),
            section_threshold: parse_f64_with_bounds(
                non_empty("section_threshold"),
                DEFAULT_SECTION_THRESHOLD,
                SECTION_THRESHOLD_BOUNDS,
            ),
            cursor_follow_ms: parse_u32_with_bounds(
                non_empty("cursor_follow_ms"),
                DEFAULT_CURSOR_FOLLOW_MS,
                CURSOR_FOLLOW_MS_BOUNDS,
            ),
            log_level: non_empty("log_level")
                .and_then(|value| LogLevel::parse(&value))
                .unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }

    pub fn from_page_url(href: &str) -> Self {
        let Ok(url) = Url::parse(href) else {
            return Self::default();
        };

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        Self::from_lookup(|name| {
            pairs
                .iter()
                .rev()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        })
    }
}

fn parse_u32_with_bounds(value: Option<String>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_f64_with_bounds(value: Option<String>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_query() {
        let config = EffectConfig::from_page_url("https://example.com/");
        assert_eq!(config, EffectConfig::default());
        assert_eq!(config.typing_interval_ms, 100);
        assert_eq!(config.rain_interval_ms, 50);
        assert_eq!(config.rain_resize, ResizePolicy::KeepColumns);
    }

    #[test]
    fn query_overrides_are_applied() {
        let config = EffectConfig::from_page_url(
            "https://example.com/?rain_interval_ms=80&rain_resize=reflow&log_level=DEBUG&rain_reset_probability=0.5",
        );
        assert_eq!(config.rain_interval_ms, 80);
        assert_eq!(config.rain_resize, ResizePolicy::Reflow);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.rain_reset_probability, 0.5);
    }

    #[test]
    fn out_of_bounds_and_malformed_values_fall_back() {
        let config = EffectConfig::from_page_url(
            "https://example.com/?typing_interval_ms=1&rain_column_width=abc&section_threshold=1.5&rain_resize=sideways",
        );
        assert_eq!(config.typing_interval_ms, DEFAULT_TYPING_INTERVAL_MS);
        assert_eq!(config.rain_column_width, DEFAULT_RAIN_COLUMN_WIDTH);
        assert_eq!(config.section_threshold, DEFAULT_SECTION_THRESHOLD);
        assert_eq!(config.rain_resize, DEFAULT_RAIN_RESIZE_POLICY);
    }

    #[test]
    fn last_duplicate_key_wins() {
        let config =
            EffectConfig::from_page_url("https://example.com/?cursor_follow_ms=100&cursor_follow_ms=250");
        assert_eq!(config.cursor_follow_ms, 250);
    }

    #[test]
    fn invalid_url_yields_defaults() {
        assert_eq!(EffectConfig::from_page_url("not a url"), EffectConfig::default());
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = EffectConfig::from_lookup(|name| {
            (name == "rain_interval_ms").then(|| "   ".to_string())
        });
        assert_eq!(config.rain_interval_ms, DEFAULT_RAIN_INTERVAL_MS);
    }
}
