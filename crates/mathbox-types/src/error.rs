//! Error types for mathbox.

use std::io;

/// Errors produced by the mathbox crates.
///
/// Layout itself never fails: malformed input degrades to odd-looking but
/// well-formed boxes. These errors cover the surfaces around layout (font
/// tables, configuration, registries, and rendering backends).
#[derive(Debug, thiserror::Error)]
pub enum MathBoxError {
    #[error("font error: {0}")]
    Font(String),

    #[error("unknown symbol: {0}")]
    Symbol(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("registry error: {0}")]
    Registry(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("unit error: {0}")]
    Unit(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, MathBoxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_error_display() {
        let e = MathBoxError::Font("missing glyph table".into());
        assert_eq!(format!("{e}"), "font error: missing glyph table");
    }

    #[test]
    fn symbol_error_display() {
        let e = MathBoxError::Symbol("lbrak".into());
        assert_eq!(format!("{e}"), "unknown symbol: lbrak");
    }

    #[test]
    fn config_error_display() {
        let e = MathBoxError::Config("bad width".into());
        assert_eq!(format!("{e}"), "config error: bad width");
    }

    #[test]
    fn registry_error_display() {
        let e = MathBoxError::Registry("not initialised".into());
        assert_eq!(format!("{e}"), "registry error: not initialised");
    }

    #[test]
    fn render_error_display() {
        let e = MathBoxError::Render("text size required".into());
        assert_eq!(format!("{e}"), "render error: text size required");
    }

    #[test]
    fn backend_error_display() {
        let e = MathBoxError::Backend("surface lost".into());
        assert_eq!(format!("{e}"), "backend error: surface lost");
    }

    #[test]
    fn unit_error_display() {
        let e = MathBoxError::Unit("furlong".into());
        assert_eq!(format!("{e}"), "unit error: furlong");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: MathBoxError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let bad_toml = "this is [[[not valid toml";
        let toml_err = toml::from_str::<toml::Value>(bad_toml).unwrap_err();
        let e: MathBoxError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: MathBoxError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(MathBoxError::Unit("oops".into()));
        assert!(r.is_err());
    }
}
