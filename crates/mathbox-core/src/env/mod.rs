//! Layout environment: style, scale, line width and font state.
//!
//! An [`Environment`] is threaded through every `create_box` call. Atoms
//! never mutate the environment they were handed; they derive a copy for
//! each child (numerator, subscript, cramped body) through the `*_style`
//! methods so siblings keep seeing the parent context.

pub mod units;

use std::sync::Arc;

use mathbox_types::backend::FontId;
use mathbox_types::font_style::FontStyle;

use crate::font::symbols::{self, Symbol};
use crate::font::{Char, FontContext, MathConsts, SimpleTextMeasurer, TextBounds, TextMeasurer};

pub use units::{Dimen, UnitType};

// ---------------------------------------------------------------------------
// TexStyle
// ---------------------------------------------------------------------------

/// One of TeX's eight math styles. Odd indices are cramped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum TexStyle {
    #[default]
    Display = 0,
    DisplayCramped = 1,
    Text = 2,
    TextCramped = 3,
    Script = 4,
    ScriptCramped = 5,
    ScriptScript = 6,
    ScriptScriptCramped = 7,
}

const ALL_STYLES: [TexStyle; 8] = [
    TexStyle::Display,
    TexStyle::DisplayCramped,
    TexStyle::Text,
    TexStyle::TextCramped,
    TexStyle::Script,
    TexStyle::ScriptCramped,
    TexStyle::ScriptScript,
    TexStyle::ScriptScriptCramped,
];

// Transition tables, indexed by the current style.
const CRAMP: [u8; 8] = [1, 1, 3, 3, 5, 5, 7, 7];
const NUM: [u8; 8] = [2, 3, 4, 5, 6, 7, 6, 7];
const DNOM: [u8; 8] = [3, 3, 5, 5, 7, 7, 7, 7];
const SUP: [u8; 8] = [4, 5, 4, 5, 6, 7, 6, 7];
const SUB: [u8; 8] = [5, 5, 5, 5, 7, 7, 7, 7];

impl TexStyle {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Style for an index, clamped to the last style.
    pub fn from_index(i: usize) -> Self {
        ALL_STYLES[i.min(7)]
    }

    pub fn is_cramped(self) -> bool {
        self.index() % 2 == 1
    }

    /// Display or text, cramped or not.
    pub fn is_display_or_text(self) -> bool {
        self < TexStyle::Script
    }

    pub fn is_display(self) -> bool {
        self < TexStyle::Text
    }

    pub fn cramp(self) -> Self {
        Self::from_index(CRAMP[self.index()] as usize)
    }

    pub fn num(self) -> Self {
        Self::from_index(NUM[self.index()] as usize)
    }

    pub fn dnom(self) -> Self {
        Self::from_index(DNOM[self.index()] as usize)
    }

    pub fn sup(self) -> Self {
        Self::from_index(SUP[self.index()] as usize)
    }

    pub fn sub(self) -> Self {
        Self::from_index(SUB[self.index()] as usize)
    }

    pub fn root(self) -> Self {
        TexStyle::ScriptScript
    }
}

impl From<mathbox_types::config::BaseStyle> for TexStyle {
    fn from(s: mathbox_types::config::BaseStyle) -> Self {
        use mathbox_types::config::BaseStyle;
        match s {
            BaseStyle::Display => TexStyle::Display,
            BaseStyle::Text => TexStyle::Text,
            BaseStyle::Script => TexStyle::Script,
            BaseStyle::ScriptScript => TexStyle::ScriptScript,
        }
    }
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Context for one layout pass.
///
/// Cheap to clone: fonts and the text measurer are shared.
#[derive(Clone)]
pub struct Environment {
    style: TexStyle,
    fonts: Arc<FontContext>,
    measurer: Arc<dyn TextMeasurer>,
    /// Pixels per em at scale 1.
    text_size: f32,
    pixels_per_point: f32,
    text_width: f32,
    line_space: f32,
    last_font: FontId,
    math_style: FontStyle,
    text_style: FontStyle,
    small_cap: bool,
    break_everywhere: bool,
    middle_height: Option<f32>,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("style", &self.style)
            .field("text_size", &self.text_size)
            .field("text_width", &self.text_width)
            .field("line_space", &self.line_space)
            .field("math_style", &self.math_style)
            .field("text_style", &self.text_style)
            .finish_non_exhaustive()
    }
}

impl Environment {
    pub fn new(style: TexStyle, fonts: Arc<FontContext>, text_size: f32) -> Self {
        Self {
            style,
            fonts,
            measurer: Arc::new(SimpleTextMeasurer),
            text_size: if text_size > 0.0 { text_size } else { 1.0 },
            pixels_per_point: 1.0,
            text_width: f32::INFINITY,
            line_space: 1.0,
            last_font: FontContext::MATH_FONT,
            math_style: FontStyle::NONE,
            text_style: FontStyle::NONE,
            small_cap: false,
            break_everywhere: false,
            middle_height: None,
        }
    }

    pub fn with_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    /// Set the output resolution; 72 dpi makes one point one pixel.
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        if dpi > 0.0 {
            self.pixels_per_point = dpi / 72.0;
        }
        self
    }

    // -- Style transitions --------------------------------------------------

    pub fn style(&self) -> TexStyle {
        self.style
    }

    pub fn with_style(&self, style: TexStyle) -> Self {
        let mut env = self.clone();
        env.style = style;
        env
    }

    pub fn set_style(&mut self, style: TexStyle) {
        self.style = style;
    }

    pub fn cramp_style(&self) -> Self {
        self.with_style(self.style.cramp())
    }

    pub fn num_style(&self) -> Self {
        self.with_style(self.style.num())
    }

    pub fn dnom_style(&self) -> Self {
        self.with_style(self.style.dnom())
    }

    pub fn sup_style(&self) -> Self {
        self.with_style(self.style.sup())
    }

    pub fn sub_style(&self) -> Self {
        self.with_style(self.style.sub())
    }

    pub fn root_style(&self) -> Self {
        self.with_style(self.style.root())
    }

    // -- Metrics ------------------------------------------------------------

    pub fn fonts(&self) -> &FontContext {
        &self.fonts
    }

    pub fn math_consts(&self) -> &MathConsts {
        self.fonts.math_font().math_consts()
    }

    /// Scale factor of the current style relative to text size.
    pub fn scale(&self) -> f32 {
        self.scale_of(self.style)
    }

    pub fn scale_of(&self, style: TexStyle) -> f32 {
        if style.is_display_or_text() {
            return 1.0;
        }
        let consts = self.math_consts();
        let percent = if style < TexStyle::ScriptScript {
            consts.script_percent_scale_down
        } else {
            consts.script_script_percent_scale_down
        };
        percent as f32 / 100.0
    }

    pub fn upem(&self) -> f32 {
        self.fonts.math_font().units_per_em()
    }

    pub fn em(&self) -> f32 {
        self.upem() * self.scale()
    }

    pub fn x_height(&self) -> f32 {
        self.fonts.font(self.last_font).x_height() * self.scale()
    }

    pub fn space(&self) -> f32 {
        self.fonts.math_font().space() * self.scale()
    }

    pub fn rule_thickness(&self) -> f32 {
        self.math_consts().fraction_rule_thickness as f32 * self.scale()
    }

    pub fn axis_height(&self) -> f32 {
        self.math_consts().axis_height as f32 * self.scale()
    }

    /// Scale a math constant by the current style.
    pub fn constant(&self, value: i16) -> f32 {
        value as f32 * self.scale()
    }

    pub fn text_size(&self) -> f32 {
        self.text_size
    }

    pub fn pixels_per_point(&self) -> f32 {
        self.pixels_per_point
    }

    // -- Line state ---------------------------------------------------------

    pub fn text_width(&self) -> f32 {
        self.text_width
    }

    pub fn set_text_width(&mut self, dimen: Dimen) {
        self.text_width = dimen.to_units(self);
    }

    pub fn line_space(&self) -> f32 {
        self.line_space
    }

    pub fn set_line_space(&mut self, dimen: Dimen) {
        self.line_space = dimen.to_units(self);
    }

    pub fn last_font_id(&self) -> FontId {
        self.last_font
    }

    pub fn set_last_font_id(&mut self, id: Option<FontId>) {
        if let Some(id) = id {
            self.last_font = id;
        }
    }

    /// Whether rows record a break position before every atom.
    pub fn break_everywhere(&self) -> bool {
        self.break_everywhere
    }

    pub fn with_break_everywhere(mut self, on: bool) -> Self {
        self.break_everywhere = on;
        self
    }

    /// Length of `\middle` delimiters inside the enclosing fence, if known.
    pub fn middle_height(&self) -> Option<f32> {
        self.middle_height
    }

    pub fn with_middle_height(&self, len: Option<f32>) -> Self {
        let mut env = self.clone();
        env.middle_height = len;
        env
    }

    // -- Font style ---------------------------------------------------------

    pub fn math_font_style(&self) -> FontStyle {
        self.math_style
    }

    pub fn text_font_style(&self) -> FontStyle {
        self.text_style
    }

    /// Copy with a style added to the math or text font style.
    pub fn with_font_style(&self, style: FontStyle, math_mode: bool) -> Self {
        let mut env = self.clone();
        if math_mode {
            env.math_style = env.math_style.union(style);
        } else {
            env.text_style = env.text_style.union(style);
        }
        env
    }

    /// Copy with the font style replaced outright.
    pub fn with_font_style_set(&self, style: FontStyle, math_mode: bool) -> Self {
        let mut env = self.clone();
        if math_mode {
            env.math_style = style;
        } else {
            env.text_style = style;
        }
        env
    }

    pub fn small_cap(&self) -> bool {
        self.small_cap
    }

    pub fn with_small_cap(&self, on: bool) -> Self {
        let mut env = self.clone();
        env.small_cap = on;
        env
    }

    // -- Characters ---------------------------------------------------------

    /// Resolve a code point in the current style; the returned char carries
    /// the current scale.
    pub fn get_char(&self, code: char, math_mode: bool) -> Char {
        let style = if math_mode {
            self.math_style
        } else {
            self.text_style
        };
        self.get_char_styled(code, math_mode, style)
    }

    pub fn get_char_styled(&self, code: char, math_mode: bool, style: FontStyle) -> Char {
        self.fonts.get_char(code, style, math_mode, self.scale())
    }

    /// Resolve a named symbol from the math font, ignoring font style.
    pub fn get_symbol(&self, name: &str) -> Option<(Char, &'static Symbol)> {
        let sym = symbols::get(name)?;
        let chr = self
            .fonts
            .get_char(sym.code, FontStyle::NONE, true, self.scale());
        Some((chr, sym))
    }

    /// Measure a text-mode run at the current em size.
    pub fn measure_text(&self, text: &str, style: FontStyle) -> TextBounds {
        self.measurer.measure(text, style, self.em())
    }
}
