//! Character atoms: code points, named symbols and text runs.

use log::warn;
use mathbox_types::font_style::FontStyle;

use crate::boxes::MathBox;
use crate::env::{Environment, TexStyle};
use crate::font::Char;
use crate::font::symbols::Symbol;
use crate::types::AtomType;

/// Size of small capitals relative to capitals.
const SMALL_CAP_SCALE: f32 = 0.8;

/// A single code point, in math or text mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharAtom {
    pub code: char,
    pub math_mode: bool,
    /// Overrides the environment's font style.
    pub font_style: Option<FontStyle>,
}

impl CharAtom {
    pub fn new(code: char, math_mode: bool) -> Self {
        Self {
            code,
            math_mode,
            font_style: None,
        }
    }

    pub fn with_font_style(mut self, style: FontStyle) -> Self {
        self.font_style = Some(style);
        self
    }

    fn style(&self, env: &Environment) -> FontStyle {
        match self.font_style {
            Some(s) => s,
            None if self.math_mode => env.math_font_style(),
            None => env.text_font_style(),
        }
    }

    pub fn get_char(&self, env: &Environment) -> Char {
        let style = self.style(env);
        if !self.math_mode && env.small_cap() && self.code.is_lowercase() {
            let upper = self.code.to_uppercase().next().unwrap_or(self.code);
            let mut chr = env.get_char_styled(upper, false, style);
            if chr.is_valid() {
                chr.scale *= SMALL_CAP_SCALE;
                return chr;
            }
        }
        let chr = env.get_char_styled(self.code, self.math_mode, style);
        if self.math_mode && env.style() >= TexStyle::Script && chr.is_valid() {
            return env.fonts().script(&chr, 0);
        }
        chr
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let chr = self.get_char(env);
        if chr.is_valid() {
            return MathBox::char_box(chr);
        }
        warn!("no glyph for {:?}, falling back to text", self.code);
        text_box(&self.code.to_string(), self.style(env), env)
    }
}

/// A named symbol from the symbol table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolAtom {
    pub symbol: &'static Symbol,
}

impl SymbolAtom {
    pub fn new(symbol: &'static Symbol) -> Self {
        Self { symbol }
    }

    pub fn get_char(&self, env: &Environment) -> Char {
        let chr = env
            .fonts()
            .get_char(self.symbol.code, FontStyle::NONE, true, env.scale());
        if env.style() >= TexStyle::Script {
            return env.fonts().script(&chr, 0);
        }
        if self.symbol.atom_type == AtomType::BigOperator && env.style().is_display() {
            return env.fonts().v_larger(&chr, 1);
        }
        chr
    }

    /// Big operators are centered on the math axis.
    pub fn create_box(&self, env: &Environment) -> MathBox {
        let chr = self.get_char(env);
        if !chr.is_valid() {
            warn!("no glyph for symbol {}", self.symbol.name);
            return text_box(&self.symbol.code.to_string(), FontStyle::NONE, env);
        }
        let b = MathBox::char_box(chr);
        if self.symbol.atom_type != AtomType::BigOperator {
            return b;
        }
        let shift = (b.height - b.depth) / 2.0 - env.axis_height();
        MathBox::hbox_of([b.with_shift(shift)])
    }
}

/// A run of code points laid out by the text measurer: text-mode strings
/// and characters the math font cannot map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextAtom {
    pub text: String,
    pub math_mode: bool,
}

impl TextAtom {
    pub fn new(text: impl Into<String>, math_mode: bool) -> Self {
        Self {
            text: text.into(),
            math_mode,
        }
    }

    pub fn push(&mut self, code: char) {
        self.text.push(code);
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let style = if self.math_mode {
            env.math_font_style()
        } else {
            env.text_font_style()
        };
        text_box(&self.text, style, env)
    }
}

fn text_box(text: &str, style: FontStyle, env: &Environment) -> MathBox {
    let bounds = env.measure_text(text, style);
    MathBox::text(
        text,
        style,
        env.em(),
        bounds.width,
        bounds.ascent,
        bounds.descent,
    )
}

// ---------------------------------------------------------------------------
// Continued code points
// ---------------------------------------------------------------------------

const ZWJ: char = '\u{200d}';

/// Code points that attach to the previous one: combining marks, variation
/// selectors, emoji modifiers and the zero-width joiner.
pub(crate) fn is_continuation(code: char) -> bool {
    matches!(code,
        '\u{0300}'..='\u{036f}'
        | '\u{1ab0}'..='\u{1aff}'
        | '\u{1dc0}'..='\u{1dff}'
        | '\u{20d0}'..='\u{20ff}'
        | '\u{fe00}'..='\u{fe0f}'
        | '\u{fe20}'..='\u{fe2f}'
        | '\u{1f3fb}'..='\u{1f3ff}'
        | '\u{e0100}'..='\u{e01ef}'
        | ZWJ
    )
}

/// Length of the cluster at the start of `codes`: the first code point,
/// the marks attached to it, and whatever a zero-width joiner glues on.
pub(crate) fn cluster_len(mut codes: impl Iterator<Item = char>) -> usize {
    let Some(mut last) = codes.next() else {
        return 0;
    };
    let mut n = 1;
    for c in codes {
        if !is_continuation(c) && last != ZWJ {
            break;
        }
        n += 1;
        last = c;
    }
    n
}
