//! Radicals (`\sqrt`, `\sqrt[n]`).

use super::{Atom, create_opt};
use crate::boxes::MathBox;
use crate::delim;
use crate::env::Environment;
use crate::font::symbols::Symbol;
use crate::types::{AtomType, LimitsType};

/// The radical sign.
static RADICAL: Symbol = Symbol {
    name: "sqrt",
    code: '\u{221a}',
    atom_type: AtomType::Ordinary,
    limits: LimitsType::NoLimits,
};

#[derive(Debug, Clone, Default)]
pub struct RootAtom {
    pub base: Option<Box<Atom>>,
    /// The degree (`n` in `\sqrt[n]{x}`).
    pub degree: Option<Box<Atom>>,
}

impl RootAtom {
    pub fn new(base: Atom) -> Self {
        Self {
            base: Some(base.boxed()),
            degree: None,
        }
    }

    pub fn with_degree(mut self, degree: Atom) -> Self {
        self.degree = Some(degree.boxed());
        self
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let consts = env.math_consts();
        let base = create_opt(self.base.as_deref(), &env.cramp_style());

        let gap = env.constant(if env.style().is_display() {
            consts.radical_display_style_vertical_gap
        } else {
            consts.radical_vertical_gap
        });
        let theta = env.constant(consts.radical_rule_thickness);
        let asc = env.constant(consts.radical_extra_ascender);

        let request = base.vlen() + gap + theta;
        let mut radical = delim::create_v(&RADICAL, env, request, false);
        // A taller glyph than asked for splits the excess between the gaps.
        let delta = (radical.vlen() - request).max(0.0) / 2.0;

        let base_depth = base.depth;
        let base_width = base.width;
        let mut vbox = MathBox::vbox_of([
            MathBox::strut(0.0, asc, 0.0, 0.0),
            MathBox::rule(theta, base_width, 0.0),
            MathBox::strut(0.0, gap + delta, 0.0, 0.0),
            base,
        ]);
        let total = vbox.vlen();
        vbox.height = total - base_depth;
        vbox.depth = base_depth;

        radical.shift = radical.height - vbox.height + asc;
        let mut hbox = MathBox::hbox_of([radical, vbox]);

        let Some(degree) = self.degree.as_deref() else {
            return hbox;
        };
        let degree = degree.create_box(&env.root_style());
        let before = env.constant(consts.radical_kern_before_degree);
        let after = env.constant(consts.radical_kern_after_degree);
        let raise = consts.radical_degree_bottom_raise_percent as f32 / 100.0 * hbox.vlen();

        let degree_depth = degree.depth;
        let mut hd = MathBox::hbox_of([MathBox::strut(before, 0.0, 0.0, 0.0), degree]);
        hd.shift = hbox.depth - degree_depth - raise;
        hbox.insert(0, hd);
        hbox.insert(1, MathBox::strut(after, 0.0, 0.0, 0.0));
        hbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::FracAtom;
    use crate::test_utils::test_env;

    fn radical_request(env: &Environment, base: &MathBox) -> f32 {
        let consts = env.math_consts();
        base.vlen()
            + env.constant(consts.radical_display_style_vertical_gap)
            + env.constant(consts.radical_rule_thickness)
    }

    #[test]
    fn radical_covers_the_body() {
        let env = test_env();
        let b = RootAtom::new(Atom::char('x')).create_box(&env);
        let base = Atom::char('x').create_box(&env.cramp_style());
        assert!(b.children[0].vlen() >= radical_request(&env, &base) - 1e-3);
        // The body keeps its baseline.
        let body = &b.children[1];
        assert_eq!((body.shift, body.depth), (0.0, 0.0));
    }

    #[test]
    fn root_of_a_fraction_requests_full_extent() {
        let env = test_env();
        let frac = FracAtom::new(Atom::char('1'), Atom::char('2'));
        let inner = Atom::Frac(frac.clone()).create_box(&env.cramp_style());
        let b = RootAtom::new(Atom::Frac(frac)).create_box(&env);
        let radical = &b.children[0];
        assert!(radical.vlen() >= radical_request(&env, &inner) - 1e-3);
        assert!(radical.vlen() > inner.height + 1.0);
    }

    #[test]
    fn rule_spans_the_body() {
        let env = test_env();
        let b = RootAtom::new(Atom::chars("ab")).create_box(&env);
        let vbox = &b.children[1];
        assert_eq!(vbox.children[1].width, 1000.0);
    }

    #[test]
    fn degree_is_kerned_into_the_hook() {
        let env = test_env();
        let plain = RootAtom::new(Atom::char('x')).create_box(&env);
        let b = RootAtom::new(Atom::char('x'))
            .with_degree(Atom::char('3'))
            .create_box(&env);
        assert_eq!(b.children.len(), 4);
        let after = b.children[1].width;
        assert!(after < 0.0);
        // Degree sits above the bottom of the radical.
        let hd = &b.children[0];
        assert!(hd.shift + hd.depth < plain.depth);
    }
}
