//! Atoms: the nodes of a formula tree.
//!
//! The parser builds an [`Atom`] tree once; layout walks it top-down with
//! [`Atom::create_box`], handing each child a derived [`Environment`]. An
//! atom never changes during layout, so a tree can be laid out any number
//! of times and from several threads.
//!
//! Every variant carries a payload struct defined in the submodule that
//! owns its layout rule. The spacing classification consumed by the glue
//! table comes from [`Atom::left_type`] and [`Atom::right_type`].

mod accent;
mod basic;
mod character;
mod decor;
mod fence;
mod frac;
mod framed;
pub mod matrix;
mod misc;
mod operator;
mod root;
mod row;
mod scripts;
mod sideset;
mod space;
mod stack;
mod vrow;
mod zstack;

use mathbox_types::error::Result;

use crate::boxes::MathBox;
use crate::delim;
use crate::env::Environment;
use crate::font::Char;
use crate::types::{AtomType, LimitsType};

pub use accent::AccentedAtom;
pub use basic::{
    AStyleAtom, ColorAtom, ExtensibleAtom, FontStyleAtom, HlineAtom, MathAtom, PhantomAtom,
    PlaceholderAtom, ScaleAtom, SmashedAtom, StyleAtom, StyleRole, TypedAtom,
};
pub use character::{CharAtom, SymbolAtom, TextAtom};
pub use decor::{OverUnderBarAtom, OverUnderDelimiterAtom};
pub use fence::{FencedAtom, MiddleAtom};
pub use frac::FracAtom;
pub use framed::{FrameStyle, FramedAtom};
pub use matrix::{
    CellStyle, ColumnItem, HdotsforAtom, MatrixAtom, MatrixType, MultiRowAtom, MulticolumnAtom,
    MultlineAtom, MultlineType,
};
pub use misc::{
    BigDelimiterAtom, CancelAtom, CancelType, LapType, LapedAtom, LongDivAtom, RaiseAtom,
    ReflectAtom, ResizeAtom, RotateAtom, RotatePivot, RuleAtom, StrikeThroughAtom, VCenterAtom,
};
pub use operator::OperatorAtom;
pub use root::RootAtom;
pub use row::RowAtom;
pub use scripts::{CumulativeScriptsAtom, ScriptsAtom};
pub use sideset::SideSetsAtom;
pub use space::SpaceAtom;
pub use stack::{StackArgs, StackAtom};
pub use vrow::VRowAtom;
pub use zstack::{ZStackArgs, ZStackAtom};

// ---------------------------------------------------------------------------
// Atom
// ---------------------------------------------------------------------------

/// A node of the formula tree.
#[derive(Debug, Clone, Default)]
pub enum Atom {
    /// Lays out as a zero-size strut.
    #[default]
    Empty,
    /// A permitted line break inside a row.
    BreakMark,
    Space(SpaceAtom),
    Char(CharAtom),
    Symbol(SymbolAtom),
    /// A glyph chosen directly (ligatures).
    FixedChar(Char),
    Text(TextAtom),
    Row(RowAtom),
    Placeholder(PlaceholderAtom),
    Style(StyleAtom),
    AStyle(AStyleAtom),
    Math(MathAtom),
    Smashed(SmashedAtom),
    Scale(ScaleAtom),
    Hline(HlineAtom),
    CumulativeScripts(CumulativeScriptsAtom),
    Color(ColorAtom),
    Phantom(PhantomAtom),
    Typed(TypedAtom),
    Extensible(ExtensibleAtom),
    FontStyle(FontStyleAtom),
    Frac(FracAtom),
    Root(RootAtom),
    Scripts(ScriptsAtom),
    Stack(StackAtom),
    BigOperator(OperatorAtom),
    Fenced(FencedAtom),
    Middle(MiddleAtom),
    Accented(AccentedAtom),
    OverUnderBar(OverUnderBarAtom),
    OverUnderDelimiter(OverUnderDelimiterAtom),
    BigDelimiter(BigDelimiterAtom),
    Laped(LapedAtom),
    Raise(RaiseAtom),
    Reflect(ReflectAtom),
    Resize(ResizeAtom),
    Rotate(RotateAtom),
    Rule(RuleAtom),
    StrikeThrough(StrikeThroughAtom),
    VCenter(VCenterAtom),
    Cancel(CancelAtom),
    LongDiv(LongDivAtom),
    Framed(FramedAtom),
    ZStack(ZStackAtom),
    SideSets(SideSetsAtom),
    VRow(VRowAtom),
    Matrix(MatrixAtom),
    Multline(MultlineAtom),
    Multicolumn(MulticolumnAtom),
    Hdotsfor(HdotsforAtom),
    MultiRow(MultiRowAtom),
}

impl Atom {
    // -- Constructors -------------------------------------------------------

    /// A math-mode character in the current font style.
    pub fn char(code: char) -> Self {
        Atom::Char(CharAtom::new(code, true))
    }

    /// A text-mode character.
    pub fn text_char(code: char) -> Self {
        Atom::Char(CharAtom::new(code, false))
    }

    /// A named symbol (`sum`, `rightarrow`, `(` ...).
    pub fn symbol(name: &str) -> Result<Self> {
        Ok(Atom::Symbol(SymbolAtom::new(delim::symbol(name)?)))
    }

    /// A math-mode row of characters, one atom per code point.
    pub fn chars(s: &str) -> Self {
        Atom::Row(RowAtom::new(s.chars().map(Atom::char).collect()))
    }

    pub fn row(elements: impl IntoIterator<Item = Atom>) -> Self {
        Atom::Row(RowAtom::new(elements.into_iter().collect()))
    }

    pub fn boxed(self) -> Box<Atom> {
        Box::new(self)
    }

    // -- Classification -----------------------------------------------------

    /// Spacing class seen by the atom to the left.
    pub fn left_type(&self) -> AtomType {
        match self {
            Atom::Symbol(a) => a.symbol.atom_type,
            Atom::Space(_) | Atom::BreakMark => AtomType::Ordinary,
            Atom::Row(a) => a.left_type(),
            Atom::Style(a) => a.base.left_type(),
            Atom::AStyle(a) => a.base.left_type(),
            Atom::Math(a) => a.base.left_type(),
            Atom::Smashed(a) => a.base.left_type(),
            Atom::Scale(a) => a.base.left_type(),
            Atom::Hline(_) => AtomType::Hline,
            Atom::Color(a) => a.base.left_type(),
            Atom::Phantom(a) => a.base.left_type(),
            Atom::Typed(a) => a.left,
            Atom::FontStyle(a) => a.base.left_type(),
            Atom::Frac(_) | Atom::Fenced(_) | Atom::OverUnderDelimiter(_) => AtomType::Inner,
            Atom::Scripts(a) => a.base.as_ref().map_or(AtomType::Ordinary, |b| b.left_type()),
            Atom::CumulativeScripts(a) => a.base.left_type(),
            Atom::Stack(a) => a.base.as_ref().map_or(AtomType::Ordinary, |b| b.left_type()),
            Atom::BigOperator(a) => a.base.left_type(),
            Atom::Accented(a) => a.base.left_type(),
            Atom::BigDelimiter(a) => a.delim.atom_type,
            Atom::Raise(a) => a.base.left_type(),
            Atom::Reflect(a) => a.base.left_type(),
            Atom::Resize(a) => a.base.left_type(),
            Atom::VCenter(a) => a.base.left_type(),
            Atom::ZStack(a) => a.anchor.left_type(),
            Atom::SideSets(_) => AtomType::BigOperator,
            Atom::MultiRow(_) => AtomType::MultiRow,
            Atom::Multicolumn(_) | Atom::Hdotsfor(_) => AtomType::MultiColumn,
            _ => AtomType::Ordinary,
        }
    }

    /// Spacing class seen by the atom to the right.
    pub fn right_type(&self) -> AtomType {
        match self {
            Atom::Row(a) => a.right_type(),
            Atom::Style(a) => a.base.right_type(),
            Atom::AStyle(a) => a.base.right_type(),
            Atom::Math(a) => a.base.right_type(),
            Atom::Smashed(a) => a.base.right_type(),
            Atom::Scale(a) => a.base.right_type(),
            Atom::Color(a) => a.base.right_type(),
            Atom::Phantom(a) => a.base.right_type(),
            Atom::Typed(a) => a.right,
            Atom::FontStyle(a) => a.base.right_type(),
            Atom::Scripts(a) => a.base.as_ref().map_or(AtomType::Ordinary, |b| b.right_type()),
            Atom::CumulativeScripts(a) => a.base.right_type(),
            Atom::Stack(a) => a.base.as_ref().map_or(AtomType::Ordinary, |b| b.right_type()),
            Atom::BigOperator(a) => a.base.right_type(),
            Atom::Accented(a) => a.base.right_type(),
            Atom::Raise(a) => a.base.right_type(),
            Atom::Reflect(a) => a.base.right_type(),
            Atom::Resize(a) => a.base.right_type(),
            Atom::VCenter(a) => a.base.right_type(),
            Atom::ZStack(a) => a.anchor.right_type(),
            _ => self.left_type(),
        }
    }

    /// How scripts attach when this atom is the base of a script.
    pub fn limits(&self) -> LimitsType {
        match self {
            Atom::Symbol(a) => a.symbol.limits,
            Atom::BigOperator(a) => a.limits,
            Atom::Typed(a) => a.base.limits(),
            Atom::OverUnderDelimiter(_) => LimitsType::Limits,
            _ => LimitsType::NoLimits,
        }
    }

    /// Whether the atom is a single glyph the row may kern or ligate.
    pub fn is_char(&self) -> bool {
        matches!(self, Atom::Char(_) | Atom::Symbol(_) | Atom::FixedChar(_))
    }

    /// Whether the atom is explicit spacing, which suppresses glue.
    pub fn is_kern(&self) -> bool {
        matches!(self, Atom::Space(_))
    }

    /// The resolved glyph of a character atom.
    pub fn get_char(&self, env: &Environment) -> Option<Char> {
        match self {
            Atom::Char(a) => Some(a.get_char(env)),
            Atom::Symbol(a) => Some(a.get_char(env)),
            Atom::FixedChar(c) => Some(*c),
            _ => None,
        }
    }

    /// Italic correction a script should skip over when this atom is the
    /// base.
    pub(crate) fn italic(&self, env: &Environment) -> f32 {
        match self {
            Atom::Placeholder(p) => p.italic.to_units(env),
            Atom::Typed(a) => a.base.italic(env),
            _ => self.get_char(env).map_or(0.0, |c| c.italic()),
        }
    }

    // -- Layout -------------------------------------------------------------

    /// Lay the atom out in `env`.
    pub fn create_box(&self, env: &Environment) -> MathBox {
        self.create_box_after(env, None)
    }

    /// Lay the atom out as an element of a row whose previous atom had the
    /// right type `prev`. Only row-like atoms care.
    pub(crate) fn create_box_after(&self, env: &Environment, prev: Option<AtomType>) -> MathBox {
        match self {
            Atom::Empty | Atom::BreakMark => MathBox::empty(),
            Atom::Space(a) => a.create_box(env),
            Atom::Char(a) => a.create_box(env),
            Atom::Symbol(a) => a.create_box(env),
            Atom::FixedChar(c) => MathBox::char_box(*c),
            Atom::Text(a) => a.create_box(env),
            Atom::Row(a) => a.layout(env, prev),
            Atom::Placeholder(a) => a.create_box(env),
            Atom::Style(a) => a.create_box(env),
            Atom::AStyle(a) => a.create_box(env),
            Atom::Math(a) => a.create_box(env),
            Atom::Smashed(a) => a.create_box(env),
            Atom::Scale(a) => a.create_box(env),
            Atom::Hline(a) => a.create_box(env),
            Atom::CumulativeScripts(a) => a.create_box(env),
            Atom::Color(a) => a.create_box(env, prev),
            Atom::Phantom(a) => a.create_box(env, prev),
            Atom::Typed(a) => a.base.create_box(env),
            Atom::Extensible(a) => a.create_box(env),
            Atom::FontStyle(a) => a.create_box(env),
            Atom::Frac(a) => a.create_box(env),
            Atom::Root(a) => a.create_box(env),
            Atom::Scripts(a) => a.create_box(env),
            Atom::Stack(a) => a.create_box(env),
            Atom::BigOperator(a) => a.create_box(env),
            Atom::Fenced(a) => a.create_box(env),
            Atom::Middle(a) => a.create_box(env),
            Atom::Accented(a) => a.create_box(env),
            Atom::OverUnderBar(a) => a.create_box(env),
            Atom::OverUnderDelimiter(a) => a.create_box(env),
            Atom::BigDelimiter(a) => a.create_box(env),
            Atom::Laped(a) => a.create_box(env),
            Atom::Raise(a) => a.create_box(env),
            Atom::Reflect(a) => a.create_box(env),
            Atom::Resize(a) => a.create_box(env),
            Atom::Rotate(a) => a.create_box(env),
            Atom::Rule(a) => a.create_box(env),
            Atom::StrikeThrough(a) => a.create_box(env),
            Atom::VCenter(a) => a.create_box(env),
            Atom::Cancel(a) => a.create_box(env),
            Atom::LongDiv(a) => a.create_box(env),
            Atom::Framed(a) => a.create_box(env),
            Atom::ZStack(a) => a.create_box(env),
            Atom::SideSets(a) => a.create_box(env),
            Atom::VRow(a) => a.create_box(env),
            Atom::Matrix(a) => a.create_box(env),
            Atom::Multline(a) => a.create_box(env),
            Atom::Multicolumn(a) => a.create_box(env),
            Atom::Hdotsfor(a) => a.create_box(env),
            Atom::MultiRow(a) => a.create_box(env),
        }
    }
}

/// Lay out an optional child, empty when absent.
pub(crate) fn create_opt(atom: Option<&Atom>, env: &Environment) -> MathBox {
    atom.map_or_else(MathBox::empty, |a| a.create_box(env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_env;

    #[test]
    fn symbol_takes_its_class() {
        let plus = Atom::symbol("+").unwrap();
        assert_eq!(plus.left_type(), AtomType::BinaryOperator);
        let sum = Atom::symbol("sum").unwrap();
        assert_eq!(sum.limits(), LimitsType::Normal);
        assert!(Atom::symbol("nosuchsymbol").is_err());
    }

    #[test]
    fn typed_overrides_both_sides() {
        let t = Atom::Typed(TypedAtom::new(
            AtomType::Relation,
            AtomType::Opening,
            Atom::char('x'),
        ));
        assert_eq!(t.left_type(), AtomType::Relation);
        assert_eq!(t.right_type(), AtomType::Opening);
    }

    #[test]
    fn row_types_come_from_the_ends() {
        let r = Atom::row([
            Atom::symbol("(").unwrap(),
            Atom::char('x'),
            Atom::symbol("=").unwrap(),
        ]);
        assert_eq!(r.left_type(), AtomType::Opening);
        assert_eq!(r.right_type(), AtomType::Relation);
        assert_eq!(Atom::row([]).left_type(), AtomType::Ordinary);
    }

    #[test]
    fn empty_and_break_mark_are_invisible() {
        let env = test_env();
        for a in [Atom::Empty, Atom::BreakMark] {
            let b = a.create_box(&env);
            assert_eq!((b.width, b.height, b.depth), (0.0, 0.0, 0.0));
        }
    }

    #[test]
    fn char_atoms_expose_their_glyph() {
        let env = test_env();
        let c = Atom::char('f');
        assert!(c.is_char());
        assert!(c.get_char(&env).is_some_and(|c| c.is_valid()));
        assert!(c.italic(&env) > 0.0);
        assert!(Atom::chars("ab").get_char(&env).is_none());
    }
}
