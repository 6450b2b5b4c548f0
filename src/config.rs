//! Engine configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::geom::Rect;

pub const DEFAULT_WINDOW_WIDTH: f64 = 800.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 600.0;
pub const DEFAULT_PANEL_WIDTH: f64 = 200.0;
pub const DEFAULT_ROW_HEIGHT: f64 = 30.0;
pub const DEFAULT_SCROLLBAR_WIDTH: f64 = 20.0;
pub const DEFAULT_WHEEL_STEP: f64 = 10.0;
pub const DEFAULT_SEED_LABELS: &[&str] = &["Fire", "Water", "Earth", "Air"];

/// Errors produced while building an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A geometry value is zero, negative, or not finite.
    #[error("invalid {key}: {value} (must be a positive number)")]
    NonPositive { key: &'static str, value: f64 },

    /// The side panel would not leave any canvas.
    #[error("panel width {panel} must be smaller than window width {window}")]
    PanelTooWide { panel: f64, window: f64 },

    /// The template catalogue would start empty.
    #[error("ALCHEMY_SEED_LABELS must name at least one label")]
    NoSeedLabels,
}

/// Window and panel geometry, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub window_width: f64,
    pub window_height: f64,
    pub panel_width: f64,
    pub row_height: f64,
    pub scrollbar_width: f64,
    /// Pixels scrolled per wheel notch.
    pub wheel_step: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            panel_width: DEFAULT_PANEL_WIDTH,
            row_height: DEFAULT_ROW_HEIGHT,
            scrollbar_width: DEFAULT_SCROLLBAR_WIDTH,
            wheel_step: DEFAULT_WHEEL_STEP,
        }
    }
}

impl LayoutConfig {
    /// The side panel occupies the full-height strip on the right of the window.
    #[must_use]
    pub fn panel_rect(&self) -> Rect {
        Rect::new(self.window_width - self.panel_width, 0.0, self.panel_width, self.window_height)
    }

    /// Width of the free canvas to the left of the panel.
    #[must_use]
    pub fn canvas_width(&self) -> f64 {
        self.window_width - self.panel_width
    }

    /// Check that every dimension is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a dimension is not positive or the panel
    /// leaves no room for the canvas.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("ALCHEMY_WINDOW_WIDTH", self.window_width),
            ("ALCHEMY_WINDOW_HEIGHT", self.window_height),
            ("ALCHEMY_PANEL_WIDTH", self.panel_width),
            ("ALCHEMY_ROW_HEIGHT", self.row_height),
            ("ALCHEMY_SCROLLBAR_WIDTH", self.scrollbar_width),
            ("ALCHEMY_WHEEL_STEP", self.wheel_step),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { key, value });
            }
        }
        if self.panel_width >= self.window_width {
            return Err(ConfigError::PanelTooWide { panel: self.panel_width, window: self.window_width });
        }
        Ok(())
    }
}

/// Everything the engine needs at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub layout: LayoutConfig,
    /// Labels the panel catalogue starts with.
    pub seed_labels: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { layout: LayoutConfig::default(), seed_labels: DEFAULT_SEED_LABELS.iter().map(|s| (*s).to_owned()).collect() }
    }
}

impl EngineConfig {
    /// Build typed engine config from environment variables.
    ///
    /// Optional (defaults in parentheses):
    /// - `ALCHEMY_WINDOW_WIDTH` (800), `ALCHEMY_WINDOW_HEIGHT` (600)
    /// - `ALCHEMY_PANEL_WIDTH` (200), `ALCHEMY_ROW_HEIGHT` (30)
    /// - `ALCHEMY_SCROLLBAR_WIDTH` (20), `ALCHEMY_WHEEL_STEP` (10)
    /// - `ALCHEMY_SEED_LABELS`: comma-separated (`Fire,Water,Earth,Air`)
    ///
    /// Unparseable numbers fall back to their default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the resulting layout is unusable or the seed
    /// list is empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let layout = LayoutConfig {
            window_width: env_parse("ALCHEMY_WINDOW_WIDTH", DEFAULT_WINDOW_WIDTH),
            window_height: env_parse("ALCHEMY_WINDOW_HEIGHT", DEFAULT_WINDOW_HEIGHT),
            panel_width: env_parse("ALCHEMY_PANEL_WIDTH", DEFAULT_PANEL_WIDTH),
            row_height: env_parse("ALCHEMY_ROW_HEIGHT", DEFAULT_ROW_HEIGHT),
            scrollbar_width: env_parse("ALCHEMY_SCROLLBAR_WIDTH", DEFAULT_SCROLLBAR_WIDTH),
            wheel_step: env_parse("ALCHEMY_WHEEL_STEP", DEFAULT_WHEEL_STEP),
        };
        layout.validate()?;

        let seed_labels = match std::env::var("ALCHEMY_SEED_LABELS") {
            Ok(raw) => parse_labels(&raw),
            Err(_) => DEFAULT_SEED_LABELS.iter().map(|s| (*s).to_owned()).collect(),
        };
        if seed_labels.is_empty() {
            return Err(ConfigError::NoSeedLabels);
        }

        Ok(Self { layout, seed_labels })
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

fn parse_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
