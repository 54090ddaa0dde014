//! Font-metrics collaborator.
//!
//! Layout only ever asks fonts for numbers: glyph metrics, size variants,
//! extensible assemblies, kerning and ligatures. [`MathFont`] is the trait a
//! font source implements; [`FontContext`] holds the selected fonts and
//! resolves code points to scaled [`Char`]s.

pub mod consts;
pub mod symbols;
pub mod table;
pub mod text;

use std::fmt;
use std::sync::Arc;

use mathbox_types::backend::FontId;
use mathbox_types::font_style::FontStyle;
use serde::{Deserialize, Serialize};

pub use consts::MathConsts;
pub use table::TableFont;
pub use text::{SimpleTextMeasurer, TextBounds, TextMeasurer};

/// Glyph index inside one font.
pub type GlyphId = u16;

/// Unscaled glyph metrics in font design units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphMetrics {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub italic: f32,
    /// Horizontal accent attachment point; `None` means the glyph center.
    pub top_accent: Option<f32>,
}

/// One piece of an extensible glyph assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphPart {
    pub glyph: GlyphId,
    pub start_connector: f32,
    pub end_connector: f32,
    pub full_advance: f32,
    /// Extenders may be repeated any number of times, including zero.
    pub extender: bool,
}

/// An extensible glyph built from parts, listed bottom-to-top for vertical
/// assemblies and left-to-right for horizontal ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphAssembly {
    pub italic: f32,
    pub parts: Vec<GlyphPart>,
}

impl GlyphAssembly {
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Result of probing the ligature table with a glyph sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LigatureStep {
    /// No ligature starts with this sequence.
    Dead,
    /// The sequence is a proper prefix of at least one ligature.
    Partial,
    /// The sequence is a complete ligature (it may still be a prefix of a
    /// longer one).
    Complete(GlyphId),
}

/// A font the layout engine can query.
///
/// All lengths are in design units; [`FontContext`] applies the style
/// scale. Only `units_per_em`, `math_consts`, `glyph_for` and `metrics`
/// are required; the rest default to "the font has none".
pub trait MathFont: Send + Sync + fmt::Debug {
    fn units_per_em(&self) -> f32;

    fn math_consts(&self) -> &MathConsts;

    /// Map a code point under a style to a glyph.
    fn glyph_for(&self, code: char, style: FontStyle) -> Option<GlyphId>;

    fn metrics(&self, glyph: GlyphId) -> GlyphMetrics;

    fn x_height(&self) -> f32 {
        self.units_per_em() * 0.43
    }

    /// Width of an interword space.
    fn space(&self) -> f32 {
        self.units_per_em() / 3.0
    }

    /// Successively larger vertical variants, smallest first.
    fn v_variants(&self, _glyph: GlyphId) -> &[GlyphId] {
        &[]
    }

    fn h_variants(&self, _glyph: GlyphId) -> &[GlyphId] {
        &[]
    }

    /// Script-size variants (`ssty`), index 0 for script, 1 for scriptscript.
    fn script_variants(&self, _glyph: GlyphId) -> &[GlyphId] {
        &[]
    }

    fn v_assembly(&self, _glyph: GlyphId) -> Option<&GlyphAssembly> {
        None
    }

    fn h_assembly(&self, _glyph: GlyphId) -> Option<&GlyphAssembly> {
        None
    }

    /// Pair kerning between two glyphs.
    fn kern(&self, _left: GlyphId, _right: GlyphId) -> f32 {
        0.0
    }

    /// Class-based kerning, consulted when pair kerning is zero.
    fn class_kern(&self, _left: GlyphId, _right: GlyphId) -> f32 {
        0.0
    }

    fn ligature(&self, _seq: &[GlyphId]) -> LigatureStep {
        LigatureStep::Dead
    }
}

// ---------------------------------------------------------------------------
// Char
// ---------------------------------------------------------------------------

/// A resolved, scaled character.
///
/// `glyph == None` marks an invalid char: the font has no glyph for the code
/// point, and callers degrade to a text box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Char {
    pub code: char,
    pub font: FontId,
    pub glyph: Option<GlyphId>,
    pub scale: f32,
    pub metrics: GlyphMetrics,
}

impl Char {
    /// A char that refers to a glyph directly (ligatures, variants, parts).
    pub fn only_glyph(font: FontId, glyph: GlyphId, metrics: GlyphMetrics, scale: f32) -> Self {
        Self {
            code: '\0',
            font,
            glyph: Some(glyph),
            scale,
            metrics,
        }
    }

    pub fn invalid(code: char, font: FontId, scale: f32) -> Self {
        Self {
            code,
            font,
            glyph: None,
            scale,
            metrics: GlyphMetrics::default(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.glyph.is_some()
    }

    pub fn width(&self) -> f32 {
        self.metrics.width * self.scale
    }

    pub fn height(&self) -> f32 {
        self.metrics.height * self.scale
    }

    pub fn depth(&self) -> f32 {
        self.metrics.depth * self.scale
    }

    pub fn italic(&self) -> f32 {
        self.metrics.italic * self.scale
    }

    pub fn top_accent_attachment(&self) -> f32 {
        self.metrics
            .top_accent
            .map_or(self.width() / 2.0, |a| a * self.scale)
    }
}

// ---------------------------------------------------------------------------
// FontContext
// ---------------------------------------------------------------------------

/// The fonts selected for one layout pass.
///
/// Index 0 is always the math font. An optional main font at index 1
/// serves text-mode characters.
#[derive(Debug, Clone)]
pub struct FontContext {
    fonts: Vec<Arc<dyn MathFont>>,
}

impl FontContext {
    pub const MATH_FONT: FontId = FontId(0);
    pub const MAIN_FONT: FontId = FontId(1);

    pub fn new(math: Arc<dyn MathFont>) -> Self {
        Self { fonts: vec![math] }
    }

    /// Attach a main (text) font.
    pub fn with_main_font(mut self, main: Arc<dyn MathFont>) -> Self {
        self.fonts.truncate(1);
        self.fonts.push(main);
        self
    }

    pub fn math_font(&self) -> &dyn MathFont {
        self.fonts[0].as_ref()
    }

    /// Look up a font by id, falling back to the math font.
    pub fn font(&self, id: FontId) -> &dyn MathFont {
        self.fonts
            .get(id.0 as usize)
            .unwrap_or(&self.fonts[0])
            .as_ref()
    }

    pub fn has_main_font(&self) -> bool {
        self.fonts.len() > 1
    }

    /// Resolve a code point. Text-mode characters prefer the main font.
    pub fn get_char(&self, code: char, style: FontStyle, math_mode: bool, scale: f32) -> Char {
        let id = if !math_mode && self.has_main_font() {
            Self::MAIN_FONT
        } else {
            Self::MATH_FONT
        };
        let font = self.font(id);
        let glyph = font
            .glyph_for(code, style)
            .or_else(|| font.glyph_for(code, style.closest()))
            .or_else(|| font.glyph_for(code, FontStyle::NONE));
        match glyph {
            Some(g) => Char {
                code,
                font: id,
                glyph: Some(g),
                scale,
                metrics: font.metrics(g),
            },
            None => Char::invalid(code, id, scale),
        }
    }

    fn derive(&self, chr: &Char, glyph: GlyphId) -> Char {
        let metrics = self.font(chr.font).metrics(glyph);
        Char {
            code: chr.code,
            font: chr.font,
            glyph: Some(glyph),
            scale: chr.scale,
            metrics,
        }
    }

    pub fn v_larger_count(&self, chr: &Char) -> usize {
        chr.glyph
            .map_or(0, |g| self.font(chr.font).v_variants(g).len())
    }

    pub fn h_larger_count(&self, chr: &Char) -> usize {
        chr.glyph
            .map_or(0, |g| self.font(chr.font).h_variants(g).len())
    }

    /// The `index`-th vertical variant, clamped to the largest; the char
    /// itself when it has none.
    pub fn v_larger(&self, chr: &Char, index: usize) -> Char {
        let Some(g) = chr.glyph else { return *chr };
        let variants = self.font(chr.font).v_variants(g);
        match variants.get(index).or(variants.last()) {
            Some(&v) => self.derive(chr, v),
            None => *chr,
        }
    }

    pub fn h_larger(&self, chr: &Char, index: usize) -> Char {
        let Some(g) = chr.glyph else { return *chr };
        let variants = self.font(chr.font).h_variants(g);
        match variants.get(index).or(variants.last()) {
            Some(&v) => self.derive(chr, v),
            None => *chr,
        }
    }

    /// Script-size form of a char, or the char itself.
    pub fn script(&self, chr: &Char, index: usize) -> Char {
        let Some(g) = chr.glyph else { return *chr };
        match self.font(chr.font).script_variants(g).get(index) {
            Some(&v) => self.derive(chr, v),
            None => *chr,
        }
    }

    pub fn v_assembly(&self, chr: &Char) -> Option<&GlyphAssembly> {
        let g = chr.glyph?;
        self.font(chr.font).v_assembly(g).filter(|a| !a.is_empty())
    }

    pub fn h_assembly(&self, chr: &Char) -> Option<&GlyphAssembly> {
        let g = chr.glyph?;
        self.font(chr.font).h_assembly(g).filter(|a| !a.is_empty())
    }

    /// A char for one part of an assembly.
    pub fn assembly_part(&self, chr: &Char, glyph: GlyphId) -> Char {
        self.derive(chr, glyph)
    }

    /// Scaled kerning between `chr` and a following glyph of the same font.
    pub fn kern(&self, chr: &Char, next: GlyphId) -> f32 {
        let Some(g) = chr.glyph else { return 0.0 };
        let font = self.font(chr.font);
        let mut k = font.kern(g, next);
        if k == 0.0 {
            k = font.class_kern(g, next);
        }
        k * chr.scale
    }
}
