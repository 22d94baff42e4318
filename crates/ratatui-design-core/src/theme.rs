use crate::error::Error;
use crate::error::Result;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use serde::Deserialize;
use serde::Serialize;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(Error::UnknownThemeMode(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Compact,
    #[default]
    Comfortable,
    Spacious,
}

impl FromStr for Density {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "comfortable" => Ok(Self::Comfortable),
            "spacious" => Ok(Self::Spacious),
            _ => Err(Error::UnknownDensity(s.to_string())),
        }
    }
}

/// Spacing tokens in terminal cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spacing {
    pub padding_x: u16,
    pub padding_y: u16,
    pub gap: u16,
}

impl From<Density> for Spacing {
    fn from(density: Density) -> Self {
        match density {
            Density::Compact => Self {
                padding_x: 1,
                padding_y: 0,
                gap: 0,
            },
            Density::Comfortable => Self {
                padding_x: 2,
                padding_y: 1,
                gap: 1,
            },
            Density::Spacious => Self {
                padding_x: 3,
                padding_y: 1,
                gap: 2,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub mode: ThemeMode,
    pub density: Density,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub mode: ThemeMode,
    pub spacing: Spacing,
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub danger: Style,
    pub surface: Style,
    /// Backdrop drawn behind modal panels.
    pub overlay: Style,
    pub border: Style,
    pub focused: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(ThemeConfig::default())
    }
}

impl Theme {
    pub fn from_config(config: ThemeConfig) -> Self {
        let spacing = Spacing::from(config.density);
        match config.mode {
            ThemeMode::Dark => Self {
                mode: config.mode,
                spacing,
                text_primary: Style::default().fg(Color::Gray),
                text_muted: Style::default().fg(Color::DarkGray),
                accent: Style::default().fg(Color::Cyan),
                danger: Style::default().fg(Color::Red),
                surface: Style::default().fg(Color::Gray).bg(Color::Black),
                overlay: Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM),
                border: Style::default().fg(Color::Cyan),
                focused: Style::default().fg(Color::Black).bg(Color::Cyan),
            },
            ThemeMode::Light => Self {
                mode: config.mode,
                spacing,
                text_primary: Style::default().fg(Color::Black),
                text_muted: Style::default().fg(Color::DarkGray),
                accent: Style::default().fg(Color::Blue),
                danger: Style::default().fg(Color::Red),
                surface: Style::default().fg(Color::Black).bg(Color::White),
                overlay: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
                border: Style::default().fg(Color::Blue),
                focused: Style::default().fg(Color::White).bg(Color::Blue),
            },
        }
    }
}

/// Holds the active theme configuration and the styles derived from it.
#[derive(Clone, Debug, Default)]
pub struct ThemeProvider {
    config: ThemeConfig,
    theme: Theme,
}

impl ThemeProvider {
    pub fn new(config: ThemeConfig) -> Self {
        Self {
            config,
            theme: Theme::from_config(config),
        }
    }

    pub fn config(&self) -> ThemeConfig {
        self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_config(&mut self, config: ThemeConfig) {
        if config == self.config {
            return;
        }
        tracing::debug!(?config, "theme changed");
        self.config = config;
        self.theme = Theme::from_config(config);
    }

    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.set_config(ThemeConfig {
            mode,
            ..self.config
        });
    }

    pub fn set_density(&mut self, density: Density) {
        self.set_config(ThemeConfig {
            density,
            ..self.config
        });
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.config.mode.toggled());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_deserializes_from_lowercase_names() {
        let cfg: ThemeConfig =
            serde_json::from_str(r#"{"mode":"light","density":"compact"}"#).unwrap();
        assert_eq!(cfg.mode, ThemeMode::Light);
        assert_eq!(cfg.density, Density::Compact);

        let partial: ThemeConfig = serde_json::from_str(r#"{"mode":"light"}"#).unwrap();
        assert_eq!(partial.density, Density::Comfortable);

        assert!(serde_json::from_str::<ThemeConfig>(r#"{"mode":"sepia"}"#).is_err());
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!("Dark".parse::<ThemeMode>(), Ok(ThemeMode::Dark));
        assert_eq!(
            "sepia".parse::<ThemeMode>(),
            Err(Error::UnknownThemeMode("sepia".into()))
        );
        assert_eq!("spacious".parse::<Density>(), Ok(Density::Spacious));
        assert!("roomy".parse::<Density>().is_err());
    }

    #[test]
    fn provider_rebuilds_on_toggle() {
        let mut p = ThemeProvider::default();
        assert_eq!(p.theme().mode, ThemeMode::Dark);
        p.toggle_mode();
        assert_eq!(p.theme().mode, ThemeMode::Light);
        assert_eq!(p.theme().focused.bg, Some(Color::Blue));

        p.set_density(Density::Compact);
        assert_eq!(p.theme().spacing.padding_y, 0);
        assert_eq!(p.config().mode, ThemeMode::Light);
    }
}
