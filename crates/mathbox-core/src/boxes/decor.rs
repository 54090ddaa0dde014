//! Decorator boxes: one child, geometry recomputed at construction.

use mathbox_types::color::Color;

use super::{BoxKind, MathBox};
use crate::types::Alignment;

/// Outline drawn by a framed box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameShape {
    Rect,
    /// Rounded corners. A non-zero `diameter` wins; otherwise the radius
    /// is `multiplier` times the smaller side.
    Oval { multiplier: f32, diameter: f32 },
    /// Drop shadow of width `rule` to the bottom right.
    Shadow { rule: f32 },
}

/// Pivot of a rotation, relative to the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotateOrigin {
    /// Bottom edge (below the baseline by the depth).
    BottomLeft,
    BottomCenter,
    BottomRight,
    TopLeft,
    TopCenter,
    TopRight,
    /// On the baseline.
    #[default]
    BaselineLeft,
    BaselineCenter,
    BaselineRight,
    CenterLeft,
    CenterCenter,
    CenterRight,
}

impl RotateOrigin {
    /// Parse a two-letter origin option (`"bl"`, `"cc"`, `"Br"` ...). The
    /// letters may come in either order; a single letter is paired with
    /// `c`. Anything unrecognised is the baseline left corner.
    pub fn parse(option: &str) -> Self {
        let mut opt = option.to_string();
        if opt.chars().count() == 1 {
            opt.push('c');
        }
        match opt.as_str() {
            "bl" | "lb" => Self::BottomLeft,
            "bc" | "cb" => Self::BottomCenter,
            "br" | "rb" => Self::BottomRight,
            "cl" | "lc" => Self::CenterLeft,
            "cc" => Self::CenterCenter,
            "cr" | "rc" => Self::CenterRight,
            "tl" | "lt" => Self::TopLeft,
            "tc" | "ct" => Self::TopCenter,
            "tr" | "rt" => Self::TopRight,
            "Bl" | "lB" => Self::BaselineLeft,
            "Bc" | "cB" => Self::BaselineCenter,
            "Br" | "rB" => Self::BaselineRight,
            _ => Self::BaselineLeft,
        }
    }

    /// Pivot point `(x, y)` for `b`, with y measured up from the baseline.
    pub fn pivot(self, b: &MathBox) -> (f32, f32) {
        let mid = (b.height - b.depth) / 2.0;
        match self {
            Self::BottomLeft => (0.0, -b.depth),
            Self::BottomCenter => (b.width / 2.0, -b.depth),
            Self::BottomRight => (b.width, -b.depth),
            Self::TopLeft => (0.0, b.height),
            Self::TopCenter => (b.width / 2.0, b.height),
            Self::TopRight => (b.width, b.height),
            Self::BaselineLeft => (0.0, 0.0),
            Self::BaselineCenter => (b.width / 2.0, 0.0),
            Self::BaselineRight => (b.width, 0.0),
            Self::CenterLeft => (0.0, mid),
            Self::CenterCenter => (b.width / 2.0, mid),
            Self::CenterRight => (b.width, mid),
        }
    }
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() { v } else { 1.0 }
}

impl MathBox {
    fn decorate(kind: BoxKind, child: MathBox) -> Self {
        Self {
            width: child.width,
            height: child.height,
            depth: child.depth,
            shift: child.shift,
            role: child.role,
            kind,
            children: vec![child],
        }
    }

    /// The single child of a decorator box.
    pub fn child(&self) -> Option<&MathBox> {
        self.children.first()
    }

    /// Paint `b` in `fg`, optionally over a `bg` background. The role of
    /// `b` is kept.
    pub fn colored(b: MathBox, fg: Option<Color>, bg: Option<Color>) -> Self {
        let mut c = Self::decorate(BoxKind::Color { fg, bg }, b);
        c.shift = 0.0;
        c
    }

    /// Scale `b` by `(sx, sy)`. Non-finite factors are treated as 1.
    pub fn scaled(b: MathBox, sx: f32, sy: f32) -> Self {
        let sx = sanitize(sx);
        let sy = sanitize(sy);
        let width = b.width * sx.abs();
        let height = if sy > 0.0 { b.height * sy } else { -b.depth * sy };
        let depth = if sy > 0.0 { b.depth * sy } else { -b.height * sy };
        let shift = b.shift * sy;
        let mut s = Self::decorate(BoxKind::Scale { sx, sy }, b);
        s.width = width;
        s.height = height;
        s.depth = depth;
        s.shift = shift;
        s
    }

    /// Mirror `b` horizontally.
    pub fn reflected(b: MathBox) -> Self {
        Self::decorate(BoxKind::Reflect, b)
    }

    /// Rotate `b` counter-clockwise by `degrees` around `origin`.
    pub fn rotated(b: MathBox, degrees: f32, origin: RotateOrigin) -> Self {
        let (px, py) = origin.pivot(&b);
        Self::rotated_about(b, degrees, px, py)
    }

    /// Rotate `b` around the point `(px, py)`, y measured up from the
    /// baseline.
    pub fn rotated_about(b: MathBox, degrees: f32, px: f32, py: f32) -> Self {
        let angle = degrees.to_radians();
        let (s, c) = angle.sin_cos();
        let (w, h, d) = (b.width, b.height, b.depth);
        let shift_x = px * (1.0 - c) + py * s;
        let shift_y = py * (1.0 - c) - px * s;

        let xs = [-h * s, d * s, w * c + d * s, w * c - h * s];
        let ys = [h * c, -d * c, w * s - d * c, w * s + h * c];
        let fold = |v: &[f32], f: fn(f32, f32) -> f32, init: f32| v.iter().copied().fold(init, f);
        let xmax = fold(&xs, f32::max, f32::NEG_INFINITY) + shift_x;
        let xmin = fold(&xs, f32::min, f32::INFINITY) + shift_x;
        let ymax = fold(&ys, f32::max, f32::NEG_INFINITY);
        let ymin = fold(&ys, f32::min, f32::INFINITY);

        let mut r = Self::decorate(
            BoxKind::Rotate {
                angle,
                shift_x,
                shift_y,
                xmin,
            },
            b,
        );
        r.shift = 0.0;
        r.width = xmax - xmin;
        r.height = ymax + shift_y;
        r.depth = -ymin - shift_y;
        r
    }

    /// Surround `b` with a frame of `thickness` at distance `space`.
    pub fn framed(b: MathBox, thickness: f32, space: f32, shape: FrameShape) -> Self {
        let pad = thickness + space;
        let (extra_w, extra_d) = match shape {
            FrameShape::Shadow { rule } => (rule, rule),
            _ => (0.0, 0.0),
        };
        let mut f = Self::decorate(
            BoxKind::Framed {
                thickness,
                space,
                shape,
                line: None,
                bg: None,
            },
            b,
        );
        f.width += 2.0 * pad + extra_w;
        f.height += pad;
        f.depth += pad + extra_d;
        f
    }

    /// Set the outline and background colors of a framed box.
    pub fn with_frame_colors(mut self, line_color: Option<Color>, bg_color: Option<Color>) -> Self {
        if let BoxKind::Framed { line, bg, .. } = &mut self.kind {
            *line = line_color;
            *bg = bg_color;
        }
        self
    }

    /// A cell of its child's size.
    pub fn wrapped(b: MathBox) -> Self {
        let mut w = Self::decorate(
            BoxKind::Wrapper {
                left: 0.0,
                fg: None,
                bg: None,
            },
            b,
        );
        w.shift = 0.0;
        w
    }

    /// A cell of the given size with `b` aligned horizontally inside it.
    pub fn wrapped_in(b: MathBox, width: f32, height: f32, depth: f32, align: Alignment) -> Self {
        let left = match align {
            Alignment::Right => width - b.width,
            Alignment::Center => (width - b.width) / 2.0,
            _ => 0.0,
        };
        let mut cell_width = width;
        if b.width < 0.0 {
            cell_width += b.width;
        }
        let mut w = Self::wrapped(b);
        if let BoxKind::Wrapper { left: l, .. } = &mut w.kind {
            *l = left;
        }
        w.width = cell_width;
        w.height = height;
        w.depth = depth;
        w
    }

    /// Grow a wrapper cell by the given insets.
    pub fn add_insets(&mut self, l: f32, t: f32, r: f32, b: f32) {
        if let BoxKind::Wrapper { left, .. } = &mut self.kind {
            *left += l;
            self.width += l + r;
            self.height += t;
            self.depth += b;
        }
    }

    /// Set the colors of a wrapper cell.
    pub fn set_wrapper_colors(&mut self, fg_color: Option<Color>, bg_color: Option<Color>) {
        if let BoxKind::Wrapper { fg, bg, .. } = &mut self.kind {
            *fg = fg_color;
            *bg = bg_color;
        }
    }

    /// Draw `b` moved down by `offset` without changing its metrics.
    pub fn shifted(b: MathBox, offset: f32) -> Self {
        let mut s = Self::decorate(BoxKind::Shift { offset }, b);
        s.shift = 0.0;
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn b() -> MathBox {
        MathBox::strut(10.0, 6.0, 2.0, 0.0)
    }

    #[test]
    fn negative_scale_flips_extents() {
        let s = MathBox::scaled(b(), 2.0, -1.0);
        assert_eq!(s.width, 20.0);
        assert_eq!(s.height, 2.0);
        assert_eq!(s.depth, 6.0);
    }

    #[test]
    fn non_finite_scale_clamps_to_one() {
        let s = MathBox::scaled(b(), f32::NAN, f32::INFINITY);
        assert_eq!((s.width, s.height, s.depth), (10.0, 6.0, 2.0));
        assert_eq!(s.kind, BoxKind::Scale { sx: 1.0, sy: 1.0 });
    }

    #[test]
    fn rotate_by_zero_is_identity() {
        let r = MathBox::rotated(b(), 0.0, RotateOrigin::BaselineLeft);
        assert!((r.width - 10.0).abs() < 1e-4);
        assert!((r.height - 6.0).abs() < 1e-4);
        assert!((r.depth - 2.0).abs() < 1e-4);
    }

    #[test]
    fn rotate_quarter_turn_swaps_axes() {
        let r = MathBox::rotated(b(), 90.0, RotateOrigin::BaselineLeft);
        assert!((r.width - 8.0).abs() < 1e-3);
        assert!((r.vlen() - 10.0).abs() < 1e-3);
    }

    #[test]
    fn origin_parsing() {
        assert_eq!(RotateOrigin::parse("lt"), RotateOrigin::TopLeft);
        assert_eq!(RotateOrigin::parse("c"), RotateOrigin::CenterCenter);
        assert_eq!(RotateOrigin::parse("t"), RotateOrigin::TopCenter);
        assert_eq!(RotateOrigin::parse("rB"), RotateOrigin::BaselineRight);
        assert_eq!(RotateOrigin::parse(""), RotateOrigin::BaselineLeft);
        assert_eq!(RotateOrigin::parse("zz"), RotateOrigin::BaselineLeft);
    }

    #[test]
    fn frame_adds_thickness_and_space() {
        let f = MathBox::framed(b(), 1.0, 2.0, FrameShape::Rect);
        assert_eq!((f.width, f.height, f.depth), (16.0, 9.0, 5.0));
        let s = MathBox::framed(b(), 1.0, 2.0, FrameShape::Shadow { rule: 3.0 });
        assert_eq!((s.width, s.depth), (19.0, 8.0));
    }

    #[test]
    fn wrapper_alignment_offsets() {
        let w = MathBox::wrapped_in(b(), 30.0, 7.0, 3.0, Alignment::Center);
        assert_eq!(w.kind, BoxKind::Wrapper { left: 10.0, fg: None, bg: None });
        assert_eq!((w.width, w.height, w.depth), (30.0, 7.0, 3.0));
        let mut r = MathBox::wrapped_in(b(), 30.0, 7.0, 3.0, Alignment::Right);
        r.add_insets(1.0, 2.0, 3.0, 4.0);
        assert_eq!(r.kind, BoxKind::Wrapper { left: 21.0, fg: None, bg: None });
        assert_eq!((r.width, r.height, r.depth), (34.0, 9.0, 7.0));
    }

    #[test]
    fn color_keeps_role() {
        let inner = b().with_role(crate::types::AtomType::Hline);
        let c = MathBox::colored(inner, Some(Color::RED), None);
        assert_eq!(c.role, crate::types::AtomType::Hline);
    }

    proptest! {
        #[test]
        fn scale_metrics_are_non_negative(sx in -4.0f32..4.0, sy in -4.0f32..4.0) {
            let s = MathBox::scaled(b(), sx, sy);
            prop_assert!(s.width >= 0.0);
            prop_assert!(s.height >= -1e-6);
            prop_assert!(s.depth >= -1e-6);
            prop_assert!((s.vlen() - 8.0 * sy.abs()).abs() < 1e-3);
        }
    }
}
