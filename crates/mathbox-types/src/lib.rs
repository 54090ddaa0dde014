//! Foundation types and traits for mathbox.
//!
//! This crate contains the backend-agnostic types shared by the layout
//! engine and by rendering backends: colors, font style flags, the
//! [`backend::Graphics2D`] drawing trait, layout configuration, and error
//! types.

pub mod backend;
pub mod color;
pub mod config;
pub mod error;
pub mod font_style;
