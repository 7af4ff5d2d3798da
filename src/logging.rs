use serde::Serialize;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Logger {
    min_level: LogLevel,
}

impl Logger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn info(&self, event: &str, fields: serde_json::Value) {
        self.log(LogLevel::Info, event, fields);
    }

    pub fn debug(&self, event: &str, fields: serde_json::Value) {
        self.log(LogLevel::Debug, event, fields);
    }

    pub fn log(&self, level: LogLevel, event: &str, fields: serde_json::Value) {
        if let Some(line) = self.render(level, event, fields) {
            emit(&line);
        }
    }

    fn render(&self, level: LogLevel, event: &str, fields: serde_json::Value) -> Option<String> {
        if !self.enabled(level) {
            return None;
        }

        let mut payload = serde_json::Map::new();
        payload.insert(
            "ts".to_string(),
            serde_json::Value::Number(serde_json::Number::from(now_unix_millis())),
        );
        payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
        payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

        if let serde_json::Value::Object(extra) = fields {
            for (key, value) in extra {
                payload.insert(key, value);
            }
        }

        Some(serde_json::Value::Object(payload).to_string())
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(line));
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &str) {
    println!("{line}");
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn debug_events_are_filtered_at_info() {
        let logger = Logger::new(LogLevel::Info);
        assert!(logger.render(LogLevel::Debug, "noisy", json!({})).is_none());
        assert!(logger.render(LogLevel::Info, "kept", json!({})).is_some());
    }

    #[test]
    fn rendered_line_carries_event_and_fields() {
        let logger = Logger::new(LogLevel::Debug);
        let line = logger
            .render(LogLevel::Debug, "theme_changed", json!({ "theme": "light" }))
            .expect("debug is enabled");
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid JSON line");

        assert_eq!(parsed["event"], "theme_changed");
        assert_eq!(parsed["level"], "debug");
        assert_eq!(parsed["theme"], "light");
        assert!(parsed["ts"].is_u64());
    }

    #[test]
    fn level_ordering_and_parsing() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert_eq!(LogLevel::parse(" Info "), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("trace"), None);
    }
}
