//! Layout configuration loaded from TOML.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Base math style a formula starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseStyle {
    #[default]
    Display,
    Text,
    Script,
    ScriptScript,
}

/// Horizontal alignment of a formula inside its target width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// Rendering and line-wrapping settings.
///
/// Lengths are kept as strings (`"300pt"`, `"2ex"`) and resolved by the
/// layout engine, because most units depend on the selected font.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Point size of the rendered formula.
    pub text_size: f32,
    pub style: BaseStyle,
    /// Target line width. `None` means unbounded (no wrapping).
    pub text_width: Option<String>,
    /// Space between wrapped lines. Wrapping needs both this and a width.
    pub line_space: Option<String>,
    pub align: Align,
    /// Pad the result to exactly `text_width` instead of its natural width.
    pub fill_width: bool,
    /// Foreground color, as a name or color literal.
    pub foreground: Option<String>,
    /// Output resolution used to convert pixels to points.
    pub dpi: f32,
    /// Register a break opportunity between every pair of atoms.
    pub break_everywhere: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            text_size: 20.0,
            style: BaseStyle::Display,
            text_width: None,
            line_space: None,
            align: Align::Center,
            fill_width: false,
            foreground: None,
            dpi: 72.0,
            break_everywhere: false,
        }
    }
}

impl LayoutConfig {
    /// Parse a config from TOML source. Missing keys keep their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(src)?;
        log::debug!(
            "layout config: size={} style={:?} width={:?}",
            cfg.text_size,
            cfg.style,
            cfg.text_width
        );
        Ok(cfg)
    }

    /// Load a config file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let src = std::fs::read_to_string(path)?;
        Self::from_toml_str(&src)
    }

    /// Whether the config asks for line wrapping.
    pub fn wraps(&self) -> bool {
        self.text_width.is_some() && self.line_space.is_some()
    }
}
