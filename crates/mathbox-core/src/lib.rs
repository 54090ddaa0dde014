//! TeX math layout for mathbox.
//!
//! Turns a tree of [`atom::Atom`]s into nested [`boxes::MathBox`]es measured
//! in font design units, following TeX's appendix G rules with OpenType
//! MATH constants. The font is a collaborator ([`font::MathFont`]); drawing
//! goes through [`mathbox_types::backend::Graphics2D`]. Over-wide formulas
//! can be wrapped by [`split::split`], and [`render::RenderBuilder`] bundles
//! layout, wrapping and pixel scaling.

// Re-exports from mathbox-types.
pub use mathbox_types::backend;
pub use mathbox_types::color;
pub use mathbox_types::config;
pub use mathbox_types::error;
pub use mathbox_types::font_style;

pub mod atom;
pub mod boxes;
pub mod delim;
pub mod env;
pub mod font;
pub mod glue;
pub mod registry;
pub mod render;
pub mod split;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use atom::Atom;
pub use boxes::MathBox;
pub use env::{Environment, TexStyle};
pub use render::{Render, RenderBuilder};
