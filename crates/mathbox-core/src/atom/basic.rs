//! Wrapper atoms that change the environment or the metrics of one child.

use mathbox_types::color::Color;
use mathbox_types::font_style::FontStyle;

use super::{Atom, RowAtom};
use crate::boxes::MathBox;
use crate::delim;
use crate::env::{Dimen, Environment, TexStyle, UnitType};
use crate::font::symbols::Symbol;
use crate::types::AtomType;

/// An invisible box of fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaceholderAtom {
    pub width: Dimen,
    pub height: Dimen,
    pub depth: Dimen,
    /// Italic correction reported to scripts attached to it.
    pub italic: Dimen,
}

impl PlaceholderAtom {
    pub fn new(width: Dimen, height: Dimen, depth: Dimen) -> Self {
        Self {
            width,
            height,
            depth,
            italic: Dimen::ZERO,
        }
    }

    /// A placeholder with the metrics of an already laid-out box.
    pub(crate) fn sized(b: &MathBox, italic: f32) -> Self {
        let raw = |v: f32| Dimen::new(v, UnitType::None);
        Self {
            width: raw(b.width),
            height: raw(b.height),
            depth: raw(b.depth),
            italic: raw(italic),
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        MathBox::strut(
            self.width.to_units(env),
            self.height.to_units(env),
            self.depth.to_units(env),
            0.0,
        )
    }
}

/// Forces a style (`\displaystyle`, `\scriptstyle` ...).
#[derive(Debug, Clone)]
pub struct StyleAtom {
    pub style: TexStyle,
    pub base: Box<Atom>,
}

impl StyleAtom {
    pub fn new(style: TexStyle, base: Atom) -> Self {
        Self {
            style,
            base: Box::new(base),
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        self.base.create_box(&env.with_style(self.style))
    }
}

/// The style a structural role would get from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleRole {
    Num,
    Dnom,
    Sub,
    Sup,
}

/// Lays its child out in the style of a structural role relative to the
/// current style (`\numstyle`, `\substyle` ...).
#[derive(Debug, Clone)]
pub struct AStyleAtom {
    pub role: StyleRole,
    pub base: Box<Atom>,
}

impl AStyleAtom {
    pub fn new(role: StyleRole, base: Atom) -> Self {
        Self {
            role,
            base: Box::new(base),
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let env = match self.role {
            StyleRole::Num => env.num_style(),
            StyleRole::Dnom => env.dnom_style(),
            StyleRole::Sub => env.sub_style(),
            StyleRole::Sup => env.sup_style(),
        };
        self.base.create_box(&env)
    }
}

/// Inline or display math embedded in text. A parent already set smaller
/// keeps its style.
#[derive(Debug, Clone)]
pub struct MathAtom {
    pub style: TexStyle,
    pub base: Box<Atom>,
}

impl MathAtom {
    pub fn new(style: TexStyle, base: Atom) -> Self {
        Self {
            style,
            base: Box::new(base),
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let style = self.style.max(env.style());
        self.base.create_box(&env.with_style(style))
    }
}

/// Zeroes the height and/or depth of its child (`\smash`).
#[derive(Debug, Clone)]
pub struct SmashedAtom {
    pub base: Box<Atom>,
    pub height: bool,
    pub depth: bool,
}

impl SmashedAtom {
    /// `option` is `t` (height only), `b` (depth only) or anything else for
    /// both.
    pub fn new(base: Atom, option: &str) -> Self {
        let (height, depth) = match option {
            "t" => (true, false),
            "b" => (false, true),
            _ => (true, true),
        };
        Self {
            base: Box::new(base),
            height,
            depth,
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let mut b = MathBox::hbox_of([self.base.create_box(env)]);
        if self.height {
            b.height = 0.0;
        }
        if self.depth {
            b.depth = 0.0;
        }
        b
    }
}

#[derive(Debug, Clone)]
pub struct ScaleAtom {
    pub base: Box<Atom>,
    pub sx: f32,
    pub sy: f32,
}

impl ScaleAtom {
    pub fn new(base: Atom, sx: f32, sy: f32) -> Self {
        Self {
            base: Box::new(base),
            sx,
            sy,
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        MathBox::scaled(self.base.create_box(env), self.sx, self.sy)
    }
}

/// A horizontal rule across a matrix. The matrix supplies the width when it
/// assembles the rows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HlineAtom {
    pub color: Option<Color>,
}

impl HlineAtom {
    pub fn create_box(&self, env: &Environment) -> MathBox {
        self.create_box_sized(env, 0.0, 0.0)
    }

    pub(crate) fn create_box_sized(&self, env: &Environment, width: f32, shift: f32) -> MathBox {
        let rule = MathBox::raised_rule(env.rule_thickness(), width, 0.0, self.color);
        MathBox::vbox_of([rule.with_shift(shift)]).with_role(AtomType::Hline)
    }
}

/// Paints its content in a foreground and/or background color.
#[derive(Debug, Clone)]
pub struct ColorAtom {
    pub base: RowAtom,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl ColorAtom {
    pub fn new(base: Atom, fg: Option<Color>, bg: Option<Color>) -> Self {
        Self {
            base: RowAtom::from_atom(base),
            fg,
            bg,
        }
    }

    pub fn create_box(&self, env: &Environment, prev: Option<AtomType>) -> MathBox {
        MathBox::colored(self.base.layout(env, prev), self.fg, self.bg)
    }
}

/// Takes the space of its content without drawing it (`\phantom`,
/// `\hphantom`, `\vphantom`).
#[derive(Debug, Clone)]
pub struct PhantomAtom {
    pub base: RowAtom,
    pub width: bool,
    pub height: bool,
    pub depth: bool,
}

impl PhantomAtom {
    pub fn new(base: Atom) -> Self {
        Self::partial(base, true, true, true)
    }

    pub fn partial(base: Atom, width: bool, height: bool, depth: bool) -> Self {
        Self {
            base: RowAtom::from_atom(base),
            width,
            height,
            depth,
        }
    }

    pub fn create_box(&self, env: &Environment, prev: Option<AtomType>) -> MathBox {
        let b = self.base.layout(env, prev);
        let pick = |keep: bool, v: f32| if keep { v } else { 0.0 };
        MathBox::strut(
            pick(self.width, b.width),
            pick(self.height, b.height),
            pick(self.depth, b.depth),
            b.shift,
        )
    }
}

/// Overrides the spacing class of its child (`\mathrel`, `\mathop` ...).
#[derive(Debug, Clone)]
pub struct TypedAtom {
    pub left: AtomType,
    pub right: AtomType,
    pub base: Box<Atom>,
}

impl TypedAtom {
    pub fn new(left: AtomType, right: AtomType, base: Atom) -> Self {
        Self {
            left,
            right,
            base: Box::new(base),
        }
    }
}

/// A stretchy glyph of an explicit length, such as the arrow under
/// `\xrightarrow`.
#[derive(Debug, Clone, Copy)]
pub struct ExtensibleAtom {
    pub symbol: &'static Symbol,
    pub len: Dimen,
    pub vertical: bool,
}

impl ExtensibleAtom {
    pub fn new(symbol: &'static Symbol, len: Dimen, vertical: bool) -> Self {
        Self {
            symbol,
            len,
            vertical,
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let len = self.len.to_units(env);
        if self.vertical {
            delim::create_v(self.symbol, env, len, false)
        } else {
            delim::create_h(self.symbol, env, len, false)
        }
    }
}

/// Switches the math or text font style (`\mathbf`, `\textit` ...).
/// Nested styles add to the current one; otherwise they replace it.
#[derive(Debug, Clone)]
pub struct FontStyleAtom {
    pub style: FontStyle,
    pub math_mode: bool,
    pub nested: bool,
    pub base: Box<Atom>,
}

impl FontStyleAtom {
    pub fn new(style: FontStyle, math_mode: bool, base: Atom) -> Self {
        Self {
            style,
            math_mode,
            nested: false,
            base: Box::new(base),
        }
    }

    pub fn nested(mut self) -> Self {
        self.nested = true;
        self
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let env = if self.nested {
            env.with_font_style(self.style, self.math_mode)
        } else {
            env.with_font_style_set(self.style, self.math_mode)
        };
        self.base.create_box(&env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_env;

    #[test]
    fn style_atom_forces_script_size() {
        let env = test_env();
        let b = StyleAtom::new(TexStyle::Script, Atom::char('x')).create_box(&env);
        assert!((b.width - 350.0).abs() < 1e-3);
    }

    #[test]
    fn astyle_follows_the_current_style() {
        let env = test_env().with_style(TexStyle::Text);
        let b = AStyleAtom::new(StyleRole::Num, Atom::char('x')).create_box(&env);
        assert!((b.width - 350.0).abs() < 1e-3);
    }

    #[test]
    fn math_atom_never_grows_past_parent() {
        let env = test_env().with_style(TexStyle::Script);
        let b = MathAtom::new(TexStyle::Display, Atom::char('x')).create_box(&env);
        assert!((b.width - 350.0).abs() < 1e-3);
    }

    #[test]
    fn smash_variants() {
        let env = test_env();
        let both = SmashedAtom::new(Atom::char('y'), "").create_box(&env);
        assert_eq!((both.height, both.depth), (0.0, 0.0));
        let top = SmashedAtom::new(Atom::char('y'), "t").create_box(&env);
        assert_eq!(top.height, 0.0);
        assert_eq!(top.depth, 200.0);
        let bottom = SmashedAtom::new(Atom::char('y'), "b").create_box(&env);
        assert_eq!(bottom.height, 450.0);
        assert_eq!(bottom.depth, 0.0);
    }

    #[test]
    fn phantom_keeps_selected_dimensions() {
        let env = test_env();
        let v = PhantomAtom::partial(Atom::char('y'), false, true, true).create_box(&env, None);
        assert!(v.is_space());
        assert_eq!((v.width, v.height, v.depth), (0.0, 450.0, 200.0));
    }

    #[test]
    fn hline_is_tagged() {
        let env = test_env();
        let b = HlineAtom::default().create_box_sized(&env, 300.0, 0.0);
        assert_eq!(b.role, AtomType::Hline);
        assert_eq!(b.width, 300.0);
        assert_eq!(b.height, env.rule_thickness());
    }

    #[test]
    fn font_style_set_and_nested() {
        let env = test_env();
        let bold = FontStyleAtom::new(FontStyle::BF, true, Atom::char('x'));
        assert_eq!(bold.create_box(&env).width, 600.0);
        let nested = FontStyleAtom::new(FontStyle::BF, true, Atom::char('x')).nested();
        assert_eq!(nested.create_box(&env).width, 600.0);
    }

    #[test]
    fn extensible_reaches_requested_length() {
        let env = test_env();
        let arrow = crate::font::symbols::get("rightarrow").unwrap();
        let b = ExtensibleAtom::new(arrow, Dimen::em(4.0), false).create_box(&env);
        assert!(b.width >= 4000.0 - 1e-2);
    }

    #[test]
    fn color_wraps_content() {
        let env = test_env();
        let b = ColorAtom::new(Atom::char('x'), Some(Color::RED), None).create_box(&env, None);
        assert!(matches!(b.kind, crate::boxes::BoxKind::Color { .. }));
        assert_eq!(b.width, 500.0);
    }
}
