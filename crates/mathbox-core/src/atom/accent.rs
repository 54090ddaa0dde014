//! Accents over a base (`\hat x`, `\widetilde{xyz}`).
//!
//! The accent is centered on the base's top accent attachment and lowered
//! by the base height, capped at the accent base height (TeXbook appendix
//! G, rule 12). Marks with depth, like a combining overlay, are aligned on
//! the baseline instead.

use mathbox_types::error::{MathBoxError, Result};

use super::{Atom, SymbolAtom};
use crate::boxes::MathBox;
use crate::delim;
use crate::env::{Dimen, Environment};
use crate::font::Char;
use crate::font::symbols::Symbol;
use crate::types::AtomType;

const PREC: f32 = 1e-4;

#[derive(Debug, Clone)]
pub struct AccentedAtom {
    pub accent: &'static Symbol,
    /// The accentee.
    pub base: Box<Atom>,
    /// Pick the widest accent variant that still fits the base.
    pub fit_size: bool,
    /// A non-accent symbol used as one, set in script size.
    pub fake: bool,
}

impl AccentedAtom {
    pub fn new(base: Atom, name: &str) -> Result<Self> {
        Self::with_options(base, name, false, false)
    }

    /// A wide accent (`\widehat`) sized to the base.
    pub fn fitted(base: Atom, name: &str) -> Result<Self> {
        Self::with_options(base, name, true, false)
    }

    /// Fails unless `name` is an accent or `fake` is set.
    pub fn with_options(base: Atom, name: &str, fit_size: bool, fake: bool) -> Result<Self> {
        let accent = delim::symbol(name)?;
        let fake = if accent.atom_type == AtomType::Accent {
            false
        } else if fake {
            true
        } else {
            return Err(MathBoxError::Symbol(format!("{name} (not an accent)")));
        };
        Ok(Self {
            accent,
            base: base.boxed(),
            fit_size,
            fake,
        })
    }

    /// The base under all nested accents.
    pub fn innermost(&self) -> &Atom {
        match &*self.base {
            Atom::Accented(a) => a.innermost(),
            b => b,
        }
    }

    fn accent_char(&self, base_width: f32, env: &Environment) -> Char {
        let chr = SymbolAtom::new(self.accent).get_char(env);
        if !self.fit_size {
            return chr;
        }
        let fonts = env.fonts();
        let count = fonts.h_larger_count(&chr);
        let mut i = 1;
        while i < count && fonts.h_larger(&chr, i).width() <= base_width {
            i += 1;
        }
        fonts.h_larger(&chr, i - 1)
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let mut accentee = self.base.create_box(&env.cramp_style());

        let inner = self.innermost();
        let top = match inner.get_char(env) {
            Some(c) if inner.is_char() => c.top_accent_attachment(),
            _ => accentee.width / 2.0,
        };

        let mut accenter = if self.fake {
            let b = SymbolAtom::new(self.accent).create_box(&env.sub_style());
            let shift = top - b.width / 2.0;
            b.with_shift(shift)
        } else {
            let chr = self.accent_char(accentee.width, env);
            let pos = chr.top_accent_attachment();
            MathBox::char_box(chr).with_shift(top - pos)
        };

        let mut sigma = 0.0;
        let delta = if self.fake {
            Dimen::mu(1.0).to_units(env)
        } else if accenter.depth <= 0.0 {
            let base_height = env.constant(env.math_consts().accent_base_height);
            -accentee.height.min(base_height)
        } else {
            // Marks with depth share the baseline with the accentee.
            if accentee.height > accenter.height {
                std::mem::swap(&mut accentee, &mut accenter);
            }
            sigma = (accenter.depth - accentee.depth).max(0.0);
            -(accentee.height + accenter.depth)
        };

        let accentee_depth = accentee.depth;
        let mut vbox = MathBox::vbox();
        vbox.add(accenter);
        vbox.add(MathBox::strut(0.0, delta, 0.0, 0.0));
        vbox.add(accentee);
        vbox.height = vbox.vlen() - accentee_depth;
        vbox.depth = accentee_depth;
        if sigma > PREC {
            vbox.add(MathBox::strut(0.0, sigma, 0.0, 0.0));
        }
        vbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_env;

    #[test]
    fn accent_is_centered_over_the_base() {
        let env = test_env();
        let b = AccentedAtom::new(Atom::char('x'), "hat").unwrap().create_box(&env);
        assert!(b.is_vbox());
        assert_eq!(b.width, 500.0);
        assert!((b.children[0].shift - 100.0).abs() < 1e-3);
        // 600 accent, lowered by the full x-height of the base.
        assert!((b.height - 600.0).abs() < 1e-3);
        assert_eq!(b.depth, 0.0);
    }

    #[test]
    fn drop_is_capped_at_accent_base_height() {
        let env = test_env();
        let cap = env.math_consts().accent_base_height as f32;
        let b = AccentedAtom::new(Atom::char('b'), "tilde").unwrap().create_box(&env);
        assert!((b.height - (600.0 + 700.0 - cap)).abs() < 1e-3);
    }

    #[test]
    fn fitted_accent_picks_the_widest_that_fits() {
        let env = test_env();
        let widths = ["x", "ab", "abc"].map(|s| {
            let b = AccentedAtom::fitted(Atom::chars(s), "widehat").unwrap().create_box(&env);
            b.children[0].width
        });
        assert_eq!(widths, [300.0, 1000.0, 1000.0]);
        let plain = AccentedAtom::new(Atom::chars("abc"), "widehat").unwrap().create_box(&env);
        assert_eq!(plain.children[0].width, 300.0);
    }

    #[test]
    fn only_accents_unless_fake() {
        assert!(AccentedAtom::new(Atom::char('x'), "plus").is_err());
        assert!(AccentedAtom::new(Atom::char('x'), "nosuch").is_err());
        let fake = AccentedAtom::with_options(Atom::char('x'), "plus", false, true).unwrap();
        assert!(fake.fake);
        let env = test_env();
        let b = fake.create_box(&env);
        // Set in script size.
        assert!(b.children[0].width < 778.0);
    }

    #[test]
    fn nested_accents_see_the_innermost_base() {
        let inner = AccentedAtom::new(Atom::char('x'), "hat").unwrap();
        let outer = AccentedAtom::new(Atom::Accented(inner), "bar").unwrap();
        assert!(matches!(outer.innermost(), Atom::Char(c) if c.code == 'x'));
        let env = test_env();
        let b = outer.create_box(&env);
        assert!(b.height > 600.0);
    }
}
