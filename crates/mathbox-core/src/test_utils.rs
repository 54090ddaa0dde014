//! Shared test utilities for the layout engine.
//!
//! Provides a [`MockGraphics`] that records every drawing primitive (in
//! device coordinates) for assertions, and a synthetic [`TableFont`] with
//! Latin Modern-like proportions: Latin letters, digits, operators,
//! stretchy delimiters with variants and assemblies, big operators,
//! accents and a couple of ligatures.

use std::sync::Arc;

use mathbox_types::backend::{FontId, Graphics2D, Stroke};
use mathbox_types::color::Color;
use mathbox_types::error::Result;
use mathbox_types::font_style::FontStyle;

use crate::env::{Environment, TexStyle};
use crate::font::{
    FontContext, GlyphAssembly, GlyphId, GlyphMetrics, GlyphPart, MathConsts, MathFont, TableFont,
};

// ---------------------------------------------------------------------------
// MockGraphics
// ---------------------------------------------------------------------------

/// A recorded drawing call. Points are transformed to device space; sizes
/// are as passed.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum DrawCall {
    Glyph {
        font: FontId,
        glyph: u16,
        x: f32,
        y: f32,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
    },
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
    RoundRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        r: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    FillPath,
}

/// A backend that records calls and tracks an affine transform.
pub struct MockGraphics {
    pub calls: Vec<DrawCall>,
    color: Color,
    stroke: Stroke,
    dash: Vec<f32>,
    font: FontId,
    font_size: f32,
    // [a, b, c, d, e, f]: x' = a x + c y + e, y' = b x + d y + f
    m: [f32; 6],
}

impl MockGraphics {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            color: Color::BLACK,
            stroke: Stroke::default(),
            dash: Vec::new(),
            font: FontId::default(),
            font_size: 1.0,
            m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, c, d, e, f] = self.m;
        (a * x + c * y + e, b * x + d * y + f)
    }

    /// Device positions of all drawn glyphs.
    pub fn glyph_positions(&self) -> Vec<(f32, f32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Glyph { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    /// `(x, y, w, h)` of all filled rectangles.
    pub fn filled_rects(&self) -> Vec<(f32, f32, f32, f32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::FillRect { x, y, w, h, .. } => Some((*x, *y, *w, *h)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Whether every transform pushed while drawing was undone.
    pub fn transform_is_identity(&self) -> bool {
        let id = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
        self.m.iter().zip(id).all(|(v, e)| (v - e).abs() < 1e-3)
    }
}

impl Graphics2D for MockGraphics {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_stroke(&mut self, stroke: Stroke) {
        self.stroke = stroke;
    }

    fn stroke(&self) -> Stroke {
        self.stroke
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.stroke.width = width;
    }

    fn set_dash(&mut self, dash: &[f32]) {
        self.dash = dash.to_vec();
    }

    fn dash(&self) -> Vec<f32> {
        self.dash.clone()
    }

    fn set_font(&mut self, font: FontId) {
        self.font = font;
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    fn font_size(&self) -> f32 {
        self.font_size
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        let [a, b, c, d, _, _] = self.m;
        self.m[4] += a * dx + c * dy;
        self.m[5] += b * dx + d * dy;
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.m[0] *= sx;
        self.m[1] *= sx;
        self.m[2] *= sy;
        self.m[3] *= sy;
    }

    fn rotate(&mut self, angle: f32, px: f32, py: f32) {
        self.translate(px, py);
        let (s, c) = angle.sin_cos();
        let [a, b, cc, d, _, _] = self.m;
        self.m[0] = a * c + cc * s;
        self.m[1] = b * c + d * s;
        self.m[2] = -a * s + cc * c;
        self.m[3] = -b * s + d * c;
        self.translate(-px, -py);
    }

    fn reset(&mut self) {
        self.m = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
    }

    fn sx(&self) -> f32 {
        self.m[0]
    }

    fn sy(&self) -> f32 {
        self.m[3]
    }

    fn draw_glyph(&mut self, glyph: u16, x: f32, y: f32) -> Result<()> {
        let (x, y) = self.map(x, y);
        self.calls.push(DrawCall::Glyph {
            font: self.font,
            glyph,
            x,
            y,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, _style: FontStyle, _size: f32, x: f32, y: f32) -> Result<()> {
        let (x, y) = self.map(x, y);
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
        });
        Ok(())
    }

    fn begin_path(&mut self, _id: i32) -> bool {
        false
    }

    fn move_to(&mut self, _x: f32, _y: f32) {}

    fn line_to(&mut self, _x: f32, _y: f32) {}

    fn cubic_to(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32, _x3: f32, _y3: f32) {}

    fn quad_to(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32) {}

    fn close_path(&mut self) {}

    fn fill_path(&mut self, _id: i32) -> Result<()> {
        self.calls.push(DrawCall::FillPath);
        Ok(())
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<()> {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        self.calls.push(DrawCall::Line { x1, y1, x2, y2 });
        Ok(())
    }

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> Result<()> {
        let (x, y) = self.map(x, y);
        self.calls.push(DrawCall::Rect { x, y, w, h });
        Ok(())
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> Result<()> {
        let (x, y) = self.map(x, y);
        self.calls.push(DrawCall::FillRect {
            x,
            y,
            w,
            h,
            color: self.color,
        });
        Ok(())
    }

    fn draw_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, rx: f32, _ry: f32) -> Result<()> {
        let (x, y) = self.map(x, y);
        self.calls.push(DrawCall::RoundRect { x, y, w, h, r: rx });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixture font
// ---------------------------------------------------------------------------

fn m(width: f32, height: f32, depth: f32) -> GlyphMetrics {
    GlyphMetrics {
        width,
        height,
        depth,
        ..GlyphMetrics::default()
    }
}

fn part(glyph: GlyphId, len: f32, extender: bool) -> GlyphPart {
    GlyphPart {
        glyph,
        start_connector: if extender { len } else { 100.0 },
        end_connector: if extender { len } else { 100.0 },
        full_advance: len,
        extender,
    }
}

/// A vertical delimiter: base of extent 1000 plus variants of 1200, 1800
/// and 2400, and (optionally) a bottom/extender/top assembly.
fn vertical_delim(f: &mut TableFont, code: char, width: f32, assembly: bool) -> GlyphId {
    let base = f.add_glyph(code, m(width, 750.0, 250.0));
    let mut variants = vec![base];
    for len in [1200.0, 1800.0, 2400.0] {
        variants.push(f.add_unmapped(m(width * 1.1, len * 0.75, len * 0.25)));
    }
    f.set_v_variants(base, variants);
    if assembly {
        let bottom = f.add_unmapped(m(width, 800.0, 0.0));
        let ext = f.add_unmapped(m(width, 500.0, 0.0));
        let top = f.add_unmapped(m(width, 800.0, 0.0));
        f.set_v_assembly(
            base,
            GlyphAssembly {
                italic: 0.0,
                parts: vec![part(bottom, 800.0, false), part(ext, 500.0, true), part(top, 800.0, false)],
            },
        );
    }
    base
}

/// A horizontal stretchy glyph: variants of 1.5x and 2.5x the base width
/// and a left/extender/middle/extender/right assembly.
fn horizontal_delim(f: &mut TableFont, code: char, width: f32, height: f32) -> GlyphId {
    let base = f.add_glyph(code, m(width, height, 0.0));
    let v1 = f.add_unmapped(m(width * 1.5, height, 0.0));
    let v2 = f.add_unmapped(m(width * 2.5, height, 0.0));
    f.set_h_variants(base, vec![base, v1, v2]);
    let left = f.add_unmapped(m(400.0, height, 0.0));
    let ext = f.add_unmapped(m(300.0, height, 0.0));
    let mid = f.add_unmapped(m(600.0, height, 0.0));
    let right = f.add_unmapped(m(400.0, height, 0.0));
    f.set_h_assembly(
        base,
        GlyphAssembly {
            italic: 0.0,
            parts: vec![
                part(left, 400.0, false),
                part(ext, 300.0, true),
                part(mid, 600.0, false),
                part(ext, 300.0, true),
                part(right, 400.0, false),
            ],
        },
    );
    base
}

/// The fixture font, em 1000, Latin Modern Math constants.
pub fn test_font() -> TableFont {
    let mut f = TableFont::new("fixture", 1000.0, MathConsts::default());

    for c in 'a'..='z' {
        let h = if "bdfhklt".contains(c) { 700.0 } else { 450.0 };
        let d = if "gjpqy".contains(c) { 200.0 } else { 0.0 };
        let mut gm = m(500.0, h, d);
        if c == 'f' {
            gm.italic = 50.0;
        }
        f.add_glyph(c, gm);
    }
    for c in 'A'..='Z' {
        f.add_glyph(c, m(650.0, 680.0, 0.0));
    }
    for c in '0'..='9' {
        f.add_glyph(c, m(500.0, 650.0, 0.0));
    }
    f.add_styled_glyph('x', FontStyle::BF, m(600.0, 450.0, 0.0));
    f.add_styled_glyph('R', FontStyle::BB, m(700.0, 680.0, 0.0));

    // Operators and punctuation.
    for c in ['+', '\u{2212}', '\u{00d7}', '\u{00b1}', '\u{2213}', '\u{00f7}'] {
        f.add_glyph(c, m(778.0, 580.0, 80.0));
    }
    for c in ['=', '<', '>', '\u{2264}', '\u{2265}', '\u{2260}'] {
        f.add_glyph(c, m(778.0, 370.0, 0.0));
    }
    f.add_glyph('\u{22c5}', m(278.0, 310.0, 0.0));
    f.add_glyph(',', m(278.0, 100.0, 200.0));
    f.add_glyph(';', m(278.0, 430.0, 200.0));
    f.add_glyph(':', m(278.0, 430.0, 0.0));
    f.add_glyph('.', m(278.0, 100.0, 0.0));
    f.add_glyph('/', m(500.0, 750.0, 250.0));
    f.add_glyph('\'', m(275.0, 560.0, 0.0));
    f.add_glyph('\u{2026}', m(1000.0, 100.0, 0.0));
    f.add_glyph('\u{22ef}', m(1000.0, 310.0, 0.0));
    f.add_glyph('\u{22ee}', m(278.0, 750.0, 30.0));
    f.add_glyph('\u{22f1}', m(1000.0, 750.0, 30.0));

    // Stretchy delimiters.
    for c in ['(', ')', '[', ']', '{', '}', '\u{27e8}', '\u{27e9}', '|', '\u{230a}', '\u{230b}', '\u{2308}', '\u{2309}'] {
        vertical_delim(&mut f, c, 389.0, true);
    }
    vertical_delim(&mut f, '\u{2016}', 500.0, false);

    // Radical.
    let sqrt = f.add_glyph('\u{221a}', m(833.0, 800.0, 200.0));
    let mut sqrt_vars = vec![sqrt];
    for len in [1200.0, 1800.0, 2400.0] {
        sqrt_vars.push(f.add_unmapped(m(1000.0, len * 0.8, len * 0.2)));
    }
    f.set_v_variants(sqrt, sqrt_vars);
    let sqrt_bottom = f.add_unmapped(m(1056.0, 1000.0, 0.0));
    let sqrt_ext = f.add_unmapped(m(1056.0, 500.0, 0.0));
    let sqrt_top = f.add_unmapped(m(1056.0, 400.0, 0.0));
    f.set_v_assembly(
        sqrt,
        GlyphAssembly {
            italic: 0.0,
            parts: vec![
                part(sqrt_bottom, 1000.0, false),
                part(sqrt_ext, 500.0, true),
                part(sqrt_top, 400.0, false),
            ],
        },
    );

    // Big operators: one display-size variant each.
    for (c, w, italic) in [('\u{2211}', 944.0, 0.0), ('\u{220f}', 944.0, 0.0), ('\u{222b}', 556.0, 200.0)] {
        let mut base_m = m(w, 750.0, 250.0);
        base_m.italic = italic;
        let base = f.add_glyph(c, base_m);
        let mut big_m = m(w * 1.5, 1050.0, 550.0);
        big_m.italic = italic * 1.5;
        let big = f.add_unmapped(big_m);
        f.set_v_variants(base, vec![base, big]);
    }

    // Horizontal stretchies.
    for c in ['\u{23de}', '\u{23df}', '\u{23dc}', '\u{23dd}', '\u{23b4}', '\u{23b5}'] {
        horizontal_delim(&mut f, c, 900.0, 200.0);
    }
    for c in ['\u{2192}', '\u{2190}', '\u{2194}', '\u{21d2}', '\u{21d0}', '\u{21d4}'] {
        horizontal_delim(&mut f, c, 1000.0, 510.0);
    }
    for c in ['\u{2191}', '\u{2193}', '\u{2195}', '\u{21d1}', '\u{21d3}'] {
        f.add_glyph(c, m(500.0, 700.0, 200.0));
    }

    // Accents: marks inked just above the x-height, with wider variants.
    for c in ['\u{0302}', '\u{0303}', '\u{0304}', '\u{0306}', '\u{0307}', '\u{0308}', '\u{030c}', '\u{0300}', '\u{0301}', '\u{20d7}'] {
        let base = f.add_glyph(c, m(300.0, 600.0, 0.0));
        let wide = f.add_unmapped(m(600.0, 610.0, 0.0));
        let wider = f.add_unmapped(m(1000.0, 620.0, 0.0));
        f.set_h_variants(base, vec![base, wide, wider]);
    }

    // Ligatures and kerning.
    let glyph = |f: &TableFont, c: char| f.glyph_for(c, FontStyle::NONE);
    let (ff, fi) = (
        f.add_unmapped(m(580.0, 700.0, 0.0)),
        f.add_unmapped(m(560.0, 700.0, 0.0)),
    );
    if let (Some(gf), Some(gi)) = (glyph(&f, 'f'), glyph(&f, 'i')) {
        f.add_ligature(&[gf, gf], ff);
        f.add_ligature(&[gf, gi], fi);
    }
    if let (Some(v), Some(a)) = (glyph(&f, 'V'), glyph(&f, 'A')) {
        f.add_kern(v, a, -80.0);
    }
    f
}

pub fn test_fonts() -> Arc<FontContext> {
    Arc::new(FontContext::new(Arc::new(test_font())))
}

/// Display style, text size 20 px, 72 dpi.
pub fn test_env() -> Environment {
    Environment::new(TexStyle::Display, test_fonts(), 20.0)
}
