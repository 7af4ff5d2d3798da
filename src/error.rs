use thiserror::Error;

#[derive(Debug, Error)]
pub enum MountError {
    #[error("browser window is unavailable")]
    MissingWindow,

    #[error("document is unavailable")]
    MissingDocument,

    #[error("element `{0}` not found")]
    MissingElement(&'static str),

    #[error("2d drawing context is unavailable")]
    MissingContext,

    #[error("browser call failed: {0}")]
    Js(String),
}

impl MountError {
    pub fn js(msg: impl Into<String>) -> Self {
        Self::Js(msg.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingWindow => "missing_window",
            Self::MissingDocument => "missing_document",
            Self::MissingElement(_) => "missing_element",
            Self::MissingContext => "missing_context",
            Self::Js(_) => "js",
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for MountError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        assert_eq!(
            MountError::MissingElement("code-rain").to_string(),
            "element `code-rain` not found"
        );
        assert!(MountError::js("boom").to_string().contains("boom"));
        assert_eq!(MountError::MissingContext.kind(), "missing_context");
    }
}
