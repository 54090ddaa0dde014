//! Scripts on all four corners of a big operator (`\sideset`).

use super::scripts::{ScriptParts, create_scripts};
use super::zstack::{ZStackArgs, overlay};
use super::{Atom, PlaceholderAtom, StackArgs, StackAtom};
use crate::boxes::MathBox;
use crate::env::{Dimen, Environment, UnitType};
use crate::types::Alignment;

const PREC: f32 = 1e-4;

#[derive(Debug, Clone)]
pub struct SideSetsAtom {
    pub base: Box<Atom>,
    /// Prescripts: a base-less script atom, or anything laid out as is.
    pub left: Box<Atom>,
    /// Postscripts, same convention.
    pub right: Box<Atom>,
}

/// One side: either bare scripts attached to the base, or a plain box.
enum Side {
    Scripts(ScriptParts),
    Plain(MathBox),
}

impl SideSetsAtom {
    pub fn new(base: Atom, left: Atom, right: Atom) -> Self {
        Self {
            base: base.boxed(),
            left: left.boxed(),
            right: right.boxed(),
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        self.create_box_with_limits(env, None, None)
    }

    /// Lay out, with optional limits stacked above and below the base.
    pub(crate) fn create_box_with_limits(
        &self,
        env: &Environment,
        under: Option<&Atom>,
        over: Option<&Atom>,
    ) -> MathBox {
        let mut middle = None;
        let mut italic = 0.0;
        let mut placeholder = None;

        let right = match &*self.right {
            Atom::Scripts(s) if s.base.is_none() => {
                let parts = create_scripts(&self.base, s.sub.as_deref(), s.sup.as_deref(), true, env);
                if !self.base.is_char() {
                    placeholder = Some(Atom::Placeholder(PlaceholderAtom::sized(
                        &parts.base,
                        parts.italic,
                    )));
                }
                italic = parts.italic;
                middle = Some(parts.base.clone());
                Side::Scripts(parts)
            },
            other => Side::Plain(other.create_box(env)),
        };

        let left = match &*self.left {
            Atom::Scripts(s) if s.base.is_none() => {
                let base = placeholder.as_ref().unwrap_or(&*self.base);
                let parts = create_scripts(base, s.sub.as_deref(), s.sup.as_deref(), false, env);
                if middle.is_none() {
                    middle = Some(parts.base.clone());
                }
                italic = parts.italic;
                Side::Scripts(parts)
            },
            other => Side::Plain(other.create_box(env)),
        };

        let m = middle.unwrap_or_else(|| self.base.create_box(env));
        let m_width = m.width;

        let mut hbox = MathBox::hbox();
        match left {
            Side::Plain(b) => hbox.add(b),
            Side::Scripts(p) => {
                hbox.add(MathBox::strut(p.space, 0.0, 0.0, 0.0));
                hbox.add(p.scripts);
                let d = p.kern + p.width_reduce;
                if d.abs() > PREC {
                    hbox.add(MathBox::strut(d, 0.0, 0.0, 0.0));
                }
            },
        }
        let ml = hbox.width;
        hbox.add(m);
        match right {
            Side::Plain(b) => hbox.add(b),
            Side::Scripts(p) => {
                let d = p.kern + p.width_reduce;
                if d.abs() > PREC {
                    hbox.add(MathBox::strut(d, 0.0, 0.0, 0.0));
                }
                hbox.add(p.scripts);
                hbox.add(MathBox::strut(p.space, 0.0, 0.0, 0.0));
            },
        }

        if under.is_none() && over.is_none() {
            return hbox;
        }

        let mut kernel = PlaceholderAtom::sized(&hbox, italic);
        kernel.width = Dimen::new(m_width, UnitType::None);
        let (limits, shift) = StackAtom::new(
            Some(Atom::Placeholder(kernel)),
            over.cloned().map(StackArgs::auto_space),
            under.cloned().map(StackArgs::auto_space),
        )
        .create_stack(env);

        let hargs = ZStackArgs::new(Alignment::Left, Dimen::new(ml - shift, UnitType::None));
        overlay(hbox, limits, hargs, ZStackArgs::default(), env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::ScriptsAtom;
    use crate::test_utils::test_env;

    fn bare(sub: char, sup: char) -> Atom {
        Atom::Scripts(ScriptsAtom::new(None, Some(Atom::char(sub)), Some(Atom::char(sup))))
    }

    #[test]
    fn scripts_on_both_sides() {
        let env = test_env();
        let sum = Atom::symbol("sum").unwrap();
        let plain = sum.create_box(&env);
        let b = SideSetsAtom::new(sum, bare('a', 'b'), bare('c', 'd')).create_box(&env);
        assert!(b.width > plain.width);
        // The operator sits between the script columns.
        let vboxes = b.children.iter().filter(|c| c.is_vbox()).count();
        assert_eq!(vboxes, 2);
    }

    #[test]
    fn plain_sides_are_concatenated() {
        let env = test_env();
        let b = SideSetsAtom::new(Atom::char('x'), Atom::Empty, Atom::char('y')).create_box(&env);
        assert_eq!(b.children.len(), 3);
        assert_eq!(b.width, 1000.0);
    }

    #[test]
    fn limits_stack_over_the_middle() {
        let env = test_env();
        let sum = Atom::symbol("sum").unwrap();
        let ss = SideSetsAtom::new(sum, bare('a', 'b'), bare('c', 'd'));
        let plain = ss.create_box(&env);
        let limited = ss.create_box_with_limits(&env, Some(&Atom::char('i')), Some(&Atom::char('n')));
        assert!(limited.height > plain.height);
        assert!(limited.depth > plain.depth);
        assert!((limited.width - plain.width).abs() < 1e-3);
    }
}
