use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    pub fn menu_label(self) -> &'static str {
        match self {
            Self::Dark => "Light Mode",
            Self::Light => "Dark Mode",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Dark => "☀",
            Self::Light => "☾",
        }
    }

    pub fn page_class(self) -> &'static str {
        match self {
            Self::Dark => "theme-dark",
            Self::Light => "theme-light",
        }
    }

    pub fn rain_palette(self) -> RainPalette {
        match self {
            Self::Dark => RainPalette {
                trail: "rgba(0, 0, 0, 0.05)",
                glyph: "#22d3ee",
            },
            Self::Light => RainPalette {
                trail: "rgba(255, 255, 255, 0.05)",
                glyph: "#0891b2",
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RainPalette {
    pub trail: &'static str,
    pub glyph: &'static str,
}

pub trait ThemeSink {
    fn apply(&self, mode: ThemeMode);
}

pub struct ThemeController<S: ThemeSink> {
    current: ThemeMode,
    sink: S,
}

impl<S: ThemeSink> ThemeController<S> {
    pub fn mount(sink: S) -> Self {
        let initial = ThemeMode::default();
        sink.apply(initial);
        Self {
            current: initial,
            sink,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.current
    }

    pub fn toggle(&mut self) -> ThemeMode {
        self.current = self.current.toggled();
        self.sink.apply(self.current);
        self.current
    }
}
