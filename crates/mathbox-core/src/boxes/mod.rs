//! Box model.
//!
//! A [`MathBox`] is a measured rectangle with baseline semantics: `height`
//! is the extent above the baseline, `depth` the extent below, and `shift`
//! moves the box's baseline relative to its parent's (down in an HBox,
//! right in a VBox). Every box variant shares the same struct and differs
//! only in its [`BoxKind`]; composite and decorator kinds keep their
//! content in `children` (decorators hold exactly one child).
//!
//! Construction computes metrics once. `MathBox::draw` walks the
//! tree with the baseline at `y`.

mod decor;
mod draw;
mod group;

use mathbox_types::backend::FontId;
use mathbox_types::color::Color;
use mathbox_types::font_style::FontStyle;

use crate::font::Char;
use crate::types::AtomType;

pub use decor::{FrameShape, RotateOrigin};

/// Discriminant and per-kind data of a [`MathBox`].
#[derive(Debug, Clone, PartialEq)]
pub enum BoxKind {
    /// Invisible spacing with explicit metrics.
    Strut,
    /// Inter-atom glue; only the natural width takes part in layout.
    Glue { stretch: f32, shrink: f32 },
    /// A single glyph.
    Char { chr: Char, italic: f32 },
    /// A text run drawn by the backend's text engine.
    Text {
        text: String,
        style: FontStyle,
        size: f32,
    },
    /// A filled rectangle. `rise` raises the ink without affecting metrics.
    Rule { color: Option<Color>, rise: f32 },
    /// Stroked segments `[x1, y1, x2, y2]` relative to the top-left corner.
    Line { segments: Vec<[f32; 4]>, thickness: f32 },
    /// Horizontal list with candidate line-break positions.
    HBox { break_positions: Vec<usize> },
    /// Vertical list. `leftmost`/`rightmost` track the shifted extents.
    VBox { leftmost: f32, rightmost: f32 },
    Color { fg: Option<Color>, bg: Option<Color> },
    Scale { sx: f32, sy: f32 },
    Reflect,
    Rotate {
        angle: f32,
        shift_x: f32,
        shift_y: f32,
        xmin: f32,
    },
    Framed {
        thickness: f32,
        space: f32,
        shape: FrameShape,
        line: Option<Color>,
        bg: Option<Color>,
    },
    /// Positions its child at `left` inside a fixed-size cell.
    Wrapper {
        left: f32,
        fg: Option<Color>,
        bg: Option<Color>,
    },
    /// Draws its child offset vertically without changing metrics.
    Shift { offset: f32 },
}

/// A measured, drawable rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct MathBox {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub shift: f32,
    /// Role tag read by matrix post-processing (hline, multi-row ...).
    pub role: AtomType,
    pub kind: BoxKind,
    pub children: Vec<MathBox>,
}

impl Default for MathBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl MathBox {
    fn leaf(kind: BoxKind, width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
            shift: 0.0,
            role: AtomType::None,
            kind,
            children: Vec::new(),
        }
    }

    /// A zero-size strut.
    pub fn empty() -> Self {
        Self::strut(0.0, 0.0, 0.0, 0.0)
    }

    pub fn strut(width: f32, height: f32, depth: f32, shift: f32) -> Self {
        let mut b = Self::leaf(BoxKind::Strut, width, height, depth);
        b.shift = shift;
        b
    }

    /// A strut with the same metrics as `other`.
    pub fn strut_like(other: &MathBox) -> Self {
        Self::strut(other.width, other.height, other.depth, other.shift)
    }

    pub fn glue(space: f32, stretch: f32, shrink: f32) -> Self {
        Self::leaf(BoxKind::Glue { stretch, shrink }, space, 0.0, 0.0)
    }

    pub fn char_box(chr: Char) -> Self {
        Self::leaf(
            BoxKind::Char {
                chr,
                italic: chr.italic(),
            },
            chr.width(),
            chr.height(),
            chr.depth(),
        )
    }

    pub fn text(
        text: impl Into<String>,
        style: FontStyle,
        size: f32,
        width: f32,
        ascent: f32,
        descent: f32,
    ) -> Self {
        Self::leaf(
            BoxKind::Text {
                text: text.into(),
                style,
                size,
            },
            width,
            ascent,
            descent,
        )
    }

    /// A solid rule of the given thickness sitting on the baseline.
    pub fn rule(thickness: f32, width: f32, shift: f32) -> Self {
        let mut b = Self::leaf(
            BoxKind::Rule {
                color: None,
                rise: 0.0,
            },
            width,
            thickness,
            0.0,
        );
        b.shift = shift;
        b
    }

    /// A rule whose ink is raised by `rise` while its metrics stay on the
    /// baseline.
    pub fn raised_rule(thickness: f32, width: f32, rise: f32, color: Option<Color>) -> Self {
        Self::leaf(BoxKind::Rule { color, rise }, width, thickness, 0.0)
    }

    pub fn lines(
        segments: Vec<[f32; 4]>,
        thickness: f32,
        width: f32,
        height: f32,
        depth: f32,
    ) -> Self {
        Self::leaf(BoxKind::Line { segments, thickness }, width, height, depth)
    }

    // -- Queries ------------------------------------------------------------

    /// Total vertical extent.
    pub fn vlen(&self) -> f32 {
        self.height + self.depth
    }

    /// Strut and glue boxes draw nothing.
    pub fn is_space(&self) -> bool {
        matches!(self.kind, BoxKind::Strut | BoxKind::Glue { .. })
    }

    pub fn is_glue(&self) -> bool {
        matches!(self.kind, BoxKind::Glue { .. })
    }

    pub fn is_hbox(&self) -> bool {
        matches!(self.kind, BoxKind::HBox { .. })
    }

    pub fn is_vbox(&self) -> bool {
        matches!(self.kind, BoxKind::VBox { .. })
    }

    pub fn is_char(&self) -> bool {
        matches!(self.kind, BoxKind::Char { .. })
    }

    /// Italic correction of a char box, zero for everything else.
    pub fn italic(&self) -> f32 {
        match self.kind {
            BoxKind::Char { italic, .. } => italic,
            _ => 0.0,
        }
    }

    /// Fold the italic correction of a char box into its width.
    pub fn add_italic_correction_to_width(&mut self) {
        if let BoxKind::Char { italic, .. } = &mut self.kind {
            self.width += *italic;
            *italic = 0.0;
        }
    }

    /// Font of the last glyph drawn by this box, if any.
    pub fn last_font_id(&self) -> Option<FontId> {
        match &self.kind {
            BoxKind::Char { chr, .. } => Some(chr.font),
            BoxKind::Rule { .. } => None,
            _ => self.children.iter().rev().find_map(|c| c.last_font_id()),
        }
    }

    pub fn neg_width(&mut self) {
        self.width = -self.width;
    }

    pub fn with_role(mut self, role: AtomType) -> Self {
        self.role = role;
        self
    }

    pub fn with_shift(mut self, shift: f32) -> Self {
        self.shift = shift;
        self
    }

    /// Copy width, height and depth from another box.
    pub fn copy_metrics(&mut self, other: &MathBox) {
        self.width = other.width;
        self.height = other.height;
        self.depth = other.depth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_env;

    #[test]
    fn char_box_takes_scaled_metrics() {
        let env = test_env();
        let c = env.get_char('f', true);
        let b = MathBox::char_box(c);
        assert_eq!(b.width, c.width());
        assert_eq!(b.height, c.height());
        assert_eq!(b.italic(), c.italic());
        assert_eq!(b.last_font_id(), Some(c.font));
    }

    #[test]
    fn italic_correction_folds_once() {
        let env = test_env();
        let c = env.get_char('f', true);
        let mut b = MathBox::char_box(c);
        b.add_italic_correction_to_width();
        b.add_italic_correction_to_width();
        assert!((b.width - (c.width() + c.italic())).abs() < 1e-5);
        assert_eq!(b.italic(), 0.0);
    }

    #[test]
    fn spaces_draw_nothing() {
        assert!(MathBox::strut(1.0, 2.0, 3.0, 0.0).is_space());
        assert!(MathBox::glue(1.0, 0.0, 0.0).is_space());
        assert!(!MathBox::rule(1.0, 2.0, 0.0).is_space());
    }

    #[test]
    fn rule_sits_on_baseline() {
        let r = MathBox::rule(4.0, 10.0, 0.0);
        assert_eq!((r.width, r.height, r.depth), (10.0, 4.0, 0.0));
        assert_eq!(r.last_font_id(), None);
    }
}
