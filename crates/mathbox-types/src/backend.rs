//! Rendering backend trait.
//!
//! The layout engine never talks to a concrete graphics library. Boxes draw
//! themselves through [`Graphics2D`], which every platform implements. The
//! context must support translation, scaling and rotation; all coordinates
//! are in the current (transformed) user space with y growing downwards.

use crate::color::Color;
use crate::error::Result;
use crate::font_style::FontStyle;

/// Opaque handle to a font known to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontId(pub u32);

/// Line cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cap {
    Butt,
    #[default]
    Round,
    Square,
}

/// Line join style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Join {
    Bevel,
    Miter,
    #[default]
    Round,
}

/// Stroke parameters for line and outline drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub miter_limit: f32,
    pub cap: Cap,
    pub join: Join,
}

impl Stroke {
    pub const fn new(width: f32, cap: Cap, join: Join) -> Self {
        Self {
            width,
            miter_limit: 0.0,
            cap,
            join,
        }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new(1.0, Cap::Round, Join::Round)
    }
}

/// Two-dimensional drawing context.
///
/// # State
///
/// Color, stroke, dash and font are context state. Boxes save and restore
/// whatever they change, so a backend only needs plain setters/getters.
///
/// # Primitives
///
/// `draw_glyph` and `draw_text` are baseline aligned. Rectangles take their
/// top-left corner. Paths are always bracketed by `begin_path`/`fill_path`.
pub trait Graphics2D {
    // -----------------------------------------------------------------------
    // State
    // -----------------------------------------------------------------------

    fn set_color(&mut self, color: Color);

    fn color(&self) -> Color;

    fn set_stroke(&mut self, stroke: Stroke);

    fn stroke(&self) -> Stroke;

    fn set_stroke_width(&mut self, width: f32);

    /// Set the dash pattern; an empty slice disables dashing.
    fn set_dash(&mut self, dash: &[f32]);

    fn dash(&self) -> Vec<f32>;

    fn set_font(&mut self, font: FontId);

    fn set_font_size(&mut self, size: f32);

    fn font_size(&self) -> f32;

    // -----------------------------------------------------------------------
    // Transformations
    // -----------------------------------------------------------------------

    fn translate(&mut self, dx: f32, dy: f32);

    fn scale(&mut self, sx: f32, sy: f32);

    /// Rotate by `angle` radians around the pivot `(px, py)`.
    fn rotate(&mut self, angle: f32, px: f32, py: f32);

    fn reset(&mut self);

    /// Current scale factor in x.
    fn sx(&self) -> f32;

    /// Current scale factor in y.
    fn sy(&self) -> f32;

    // -----------------------------------------------------------------------
    // Glyphs and text
    // -----------------------------------------------------------------------

    /// Draw a glyph of the current font with its baseline at `y`.
    fn draw_glyph(&mut self, glyph: u16, x: f32, y: f32) -> Result<()>;

    /// Draw a text run that the math font could not map to glyphs.
    fn draw_text(&mut self, text: &str, style: FontStyle, size: f32, x: f32, y: f32)
    -> Result<()>;

    // -----------------------------------------------------------------------
    // Paths
    // -----------------------------------------------------------------------

    /// Begin a path. Returns `true` when the backend already cached the
    /// path with this id, in which case the following path commands may be
    /// skipped. Ids below zero are never cached.
    fn begin_path(&mut self, id: i32) -> bool;

    fn move_to(&mut self, x: f32, y: f32);

    fn line_to(&mut self, x: f32, y: f32);

    fn cubic_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32);

    fn quad_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);

    fn close_path(&mut self);

    fn fill_path(&mut self, id: i32) -> Result<()>;

    // -----------------------------------------------------------------------
    // Shapes
    // -----------------------------------------------------------------------

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<()>;

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> Result<()>;

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> Result<()>;

    /// Outline a rounded rectangle. The default approximates it with a
    /// plain rectangle for backends without curve support.
    #[allow(clippy::too_many_arguments)]
    fn draw_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, rx: f32, ry: f32) -> Result<()> {
        let _ = (rx, ry);
        self.draw_rect(x, y, w, h)
    }

    /// Fill a rounded rectangle. Defaults to a plain filled rectangle.
    #[allow(clippy::too_many_arguments)]
    fn fill_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, rx: f32, ry: f32) -> Result<()> {
        let _ = (rx, ry);
        self.fill_rect(x, y, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stroke_is_round_unit_width() {
        let s = Stroke::default();
        assert_eq!(s.width, 1.0);
        assert_eq!(s.cap, Cap::Round);
        assert_eq!(s.join, Join::Round);
        assert_eq!(s.miter_limit, 0.0);
    }

    #[test]
    fn font_id_is_plain_newtype() {
        assert_eq!(FontId(3), FontId(3));
        assert_ne!(FontId(3), FontId::default());
    }
}
