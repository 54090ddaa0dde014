//! Drawing boxes through a [`Graphics2D`] backend.
//!
//! The baseline of the box being drawn is at `y`, its left edge at `x`.
//! Every box restores whatever context state it changes.

use mathbox_types::backend::{Cap, Graphics2D, Join, Stroke};
use mathbox_types::error::Result;

use super::{BoxKind, FrameShape, MathBox};

impl MathBox {
    pub fn draw(&self, g: &mut dyn Graphics2D, x: f32, y: f32) -> Result<()> {
        match &self.kind {
            BoxKind::Strut | BoxKind::Glue { .. } => Ok(()),
            BoxKind::Char { chr, .. } => {
                let Some(glyph) = chr.glyph else {
                    return Ok(());
                };
                g.translate(x, y);
                let scaled = chr.scale != 1.0 && chr.scale != 0.0;
                if scaled {
                    g.scale(chr.scale, chr.scale);
                }
                g.set_font(chr.font);
                let res = g.draw_glyph(glyph, 0.0, 0.0);
                if scaled {
                    g.scale(1.0 / chr.scale, 1.0 / chr.scale);
                }
                g.translate(-x, -y);
                res
            },
            BoxKind::Text { text, style, size } => g.draw_text(text, *style, *size, x, y),
            BoxKind::Rule { color, rise } => {
                let prev = g.color();
                if let Some(c) = color {
                    g.set_color(*c);
                }
                let res = g.fill_rect(x, y - self.height - rise, self.width, self.vlen());
                g.set_color(prev);
                res
            },
            BoxKind::Line {
                segments,
                thickness,
            } => {
                let prev = g.stroke();
                g.set_stroke_width(*thickness);
                let top = y - self.height;
                let mut res = Ok(());
                for [x1, y1, x2, y2] in segments {
                    res = g.draw_line(x + x1, top + y1, x + x2, top + y2);
                    if res.is_err() {
                        break;
                    }
                }
                g.set_stroke(prev);
                res
            },
            BoxKind::HBox { .. } => {
                let mut xpos = x;
                for c in &self.children {
                    c.draw(g, xpos, y + c.shift)?;
                    xpos += c.width;
                }
                Ok(())
            },
            BoxKind::VBox { .. } => {
                let left = self.leftmost();
                let mut ypos = y - self.height;
                for c in &self.children {
                    ypos += c.height;
                    c.draw(g, x + c.shift - left, ypos)?;
                    ypos += c.depth;
                }
                Ok(())
            },
            BoxKind::Color { fg, bg } => {
                let prev = g.color();
                if let Some(bg) = bg {
                    g.set_color(*bg);
                    g.fill_rect(x, y - self.height, self.width, self.vlen())?;
                }
                g.set_color(fg.unwrap_or(prev));
                let res = self.draw_child(g, x, y);
                g.set_color(prev);
                res
            },
            BoxKind::Scale { sx, sy } => {
                if *sx == 0.0 || *sy == 0.0 {
                    return Ok(());
                }
                let dec = if *sx < 0.0 { self.width } else { 0.0 };
                g.translate(x + dec, y);
                g.scale(*sx, *sy);
                let res = self.draw_child(g, 0.0, 0.0);
                g.scale(1.0 / sx, 1.0 / sy);
                g.translate(-x - dec, -y);
                res
            },
            BoxKind::Reflect => {
                g.translate(x, y);
                g.scale(-1.0, 1.0);
                let res = self.draw_child(g, -self.width, 0.0);
                g.scale(-1.0, 1.0);
                g.translate(-x, -y);
                res
            },
            BoxKind::Rotate {
                angle,
                shift_x,
                shift_y,
                xmin,
            } => {
                let y = y - shift_y;
                let x = x + shift_x - xmin;
                g.rotate(-angle, x, y);
                let res = self.draw_child(g, x, y);
                g.rotate(*angle, x, y);
                res
            },
            BoxKind::Framed { .. } => self.draw_frame(g, x, y),
            BoxKind::Wrapper { left, fg, bg } => {
                let prev = g.color();
                if let Some(bg) = bg {
                    g.set_color(*bg);
                    g.fill_rect(x, y - self.height, self.width, self.vlen())?;
                }
                g.set_color(fg.unwrap_or(prev));
                let res = match self.child() {
                    Some(c) => c.draw(g, x + left, y + c.shift),
                    None => Ok(()),
                };
                g.set_color(prev);
                res
            },
            BoxKind::Shift { offset } => self.draw_child(g, x, y + offset),
        }
    }

    fn draw_child(&self, g: &mut dyn Graphics2D, x: f32, y: f32) -> Result<()> {
        match self.child() {
            Some(c) => c.draw(g, x, y),
            None => Ok(()),
        }
    }

    fn draw_frame(&self, g: &mut dyn Graphics2D, x: f32, y: f32) -> Result<()> {
        let BoxKind::Framed {
            thickness, space, ..
        } = self.kind
        else {
            return Ok(());
        };
        let prev_stroke = g.stroke();
        let prev_color = g.color();
        g.set_stroke(Stroke::new(thickness, Cap::Butt, Join::Miter));
        let res = self.draw_outline(g, x, y);
        g.set_stroke(prev_stroke);
        g.set_color(prev_color);
        res?;
        self.draw_child(g, x + space + thickness, y)
    }

    fn draw_outline(&self, g: &mut dyn Graphics2D, x: f32, y: f32) -> Result<()> {
        let BoxKind::Framed {
            thickness,
            shape,
            line,
            bg,
            ..
        } = self.kind
        else {
            return Ok(());
        };
        let th = thickness / 2.0;
        let top = y - self.height + th;
        let inner_w = self.width - thickness;
        let inner_h = self.vlen() - thickness;
        let prev = g.color();

        if let (FrameShape::Rect, Some(bg)) = (shape, bg) {
            g.set_color(bg);
            g.fill_rect(x + th, top, inner_w, inner_h)?;
        }
        g.set_color(line.unwrap_or(prev));
        match shape {
            FrameShape::Rect => g.draw_rect(x + th, top, inner_w, inner_h),
            FrameShape::Oval {
                multiplier,
                diameter,
            } => {
                let r = if diameter != 0.0 {
                    diameter
                } else {
                    multiplier * inner_w.min(inner_h)
                };
                g.draw_round_rect(x + th, top, inner_w, inner_h, r, r)
            },
            FrameShape::Shadow { rule } => {
                g.draw_rect(x + th, top, inner_w - rule, inner_h - rule)?;
                let sx = g.sx();
                let pen = if sx != 0.0 { (1.0 / sx).abs() } else { 0.0 };
                g.set_stroke(Stroke::new(pen, Cap::Butt, Join::Miter));
                g.fill_rect(
                    x + rule - pen,
                    y + self.depth - rule - pen,
                    self.width - rule,
                    rule,
                )?;
                g.fill_rect(
                    x + self.width - rule - pen,
                    top + rule,
                    rule,
                    self.vlen() - 2.0 * rule - th,
                )
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{DrawCall, MockGraphics, test_env};
    use crate::boxes::RotateOrigin;
    use mathbox_types::color::Color;

    #[test]
    fn hbox_draws_children_left_to_right() {
        let env = test_env();
        let a = MathBox::char_box(env.get_char('x', true));
        let b = MathBox::char_box(env.get_char('y', true)).with_shift(5.0);
        let wa = a.width;
        let hb = MathBox::hbox_of([a, b]);
        let mut g = MockGraphics::new();
        hb.draw(&mut g, 10.0, 100.0).unwrap();
        let glyphs = g.glyph_positions();
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0], (10.0, 100.0));
        assert!((glyphs[1].0 - (10.0 + wa)).abs() < 1e-4);
        assert!((glyphs[1].1 - 105.0).abs() < 1e-4);
    }

    #[test]
    fn vbox_stacks_from_top() {
        let r1 = MathBox::rule(2.0, 10.0, 0.0);
        let r2 = MathBox::rule(3.0, 10.0, 0.0);
        let vb = MathBox::vbox_of([r1, r2]);
        let mut g = MockGraphics::new();
        vb.draw(&mut g, 0.0, 50.0).unwrap();
        let rects = g.filled_rects();
        assert_eq!(rects.len(), 2);
        // First rule's baseline is the box baseline.
        assert!((rects[0].1 - 48.0).abs() < 1e-4);
        // The second sits below it.
        assert!((rects[1].1 - 50.0).abs() < 1e-4);
    }

    #[test]
    fn color_box_restores_color() {
        let inner = MathBox::rule(1.0, 1.0, 0.0);
        let c = MathBox::colored(inner, Some(Color::RED), Some(Color::BLUE));
        let mut g = MockGraphics::new();
        g.set_color(Color::GREEN);
        c.draw(&mut g, 0.0, 0.0).unwrap();
        assert_eq!(g.color(), Color::GREEN);
        assert_eq!(g.filled_rects().len(), 2);
    }

    #[test]
    fn transforms_are_balanced() {
        let env = test_env();
        let chr = MathBox::char_box(env.sub_style().get_char('x', true));
        let tree = MathBox::rotated(
            MathBox::reflected(MathBox::scaled(chr, -2.0, 0.5)),
            30.0,
            RotateOrigin::CenterCenter,
        );
        let mut g = MockGraphics::new();
        tree.draw(&mut g, 3.0, 4.0).unwrap();
        assert!(g.transform_is_identity());
    }

    #[test]
    fn frame_strokes_outline_then_child() {
        let f = MathBox::framed(MathBox::rule(1.0, 4.0, 0.0), 0.5, 1.0, FrameShape::Rect);
        let mut g = MockGraphics::new();
        f.draw(&mut g, 0.0, 10.0).unwrap();
        assert!(matches!(g.calls[0], DrawCall::Rect { .. }));
        assert_eq!(g.stroke(), Stroke::default());
    }

    #[test]
    fn line_segments_are_offset_from_top_left() {
        let l = MathBox::lines(vec![[0.0, 0.0, 4.0, 6.0]], 0.5, 4.0, 4.0, 2.0);
        let mut g = MockGraphics::new();
        l.draw(&mut g, 1.0, 10.0).unwrap();
        assert_eq!(
            g.calls,
            vec![DrawCall::Line {
                x1: 1.0,
                y1: 6.0,
                x2: 5.0,
                y2: 12.0
            }]
        );
    }
}
