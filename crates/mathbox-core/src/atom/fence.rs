//! `\left ... \middle ... \right`.
//!
//! The delimiters are sized from the body (TeXbook appendix G, rule 19):
//! with δ the larger of the body's extents above and below the axis, they
//! cover at least `max(2δ · 901/1000, 2δ - 5pt)` and are centered on the
//! axis. `\middle` delimiters inside the body get the same length; the
//! body is laid out once to measure it and once more with the length known.

use mathbox_types::error::Result;

use super::Atom;
use crate::boxes::MathBox;
use crate::delim;
use crate::env::{Dimen, Environment, UnitType};
use crate::font::symbols::Symbol;
use crate::glue;
use crate::types::AtomType;

/// `\delimiterfactor`, per mille.
const DELIMITER_FACTOR: f32 = 901.0;
/// `\delimitershortfall`.
const DELIMITER_SHORTFALL: Dimen = Dimen::new(5.0, UnitType::Pt);

/// Shift `b` so that its vertical center sits on the math axis.
fn center_on_axis(b: &mut MathBox, env: &Environment) {
    b.shift = b.height - b.vlen() / 2.0 - env.axis_height();
}

#[derive(Debug, Clone)]
pub struct FencedAtom {
    pub base: Box<Atom>,
    /// `None` for the null delimiter `.`.
    pub left: Option<&'static Symbol>,
    pub right: Option<&'static Symbol>,
}

impl FencedAtom {
    /// A fenced body. A row body is never broken across lines.
    pub fn new(base: Atom, left: Option<&'static Symbol>, right: Option<&'static Symbol>) -> Self {
        let base = match base {
            Atom::Row(mut r) => {
                r.breakable = false;
                Atom::Row(r)
            },
            a => a,
        };
        Self {
            base: base.boxed(),
            left,
            right,
        }
    }

    /// Fence from delimiter names; `.` and the empty string are null
    /// delimiters.
    pub fn from_names(base: Atom, left: &str, right: &str) -> Result<Self> {
        let lookup = |name: &str| match name {
            "" | "." => Ok(None),
            n => delim::symbol(n).map(Some),
        };
        Ok(Self::new(base, lookup(left)?, lookup(right)?))
    }

    /// Length of the delimiters around a body of the given metrics.
    fn delimiter_length(height: f32, depth: f32, env: &Environment) -> f32 {
        let axis = env.axis_height();
        let delta = (height - axis).max(depth + axis);
        let shortfall = DELIMITER_SHORTFALL.to_units(env);
        (delta * DELIMITER_FACTOR / 500.0).max(2.0 * delta - shortfall)
    }

    fn delimiter(sym: &Symbol, len: f32, env: &Environment) -> MathBox {
        let mut b = delim::create_v(sym, env, len, true);
        center_on_axis(&mut b, env);
        b
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let measure = env.with_middle_height(None);
        let mut base = self.base.create_box(&measure);
        let len = Self::delimiter_length(base.height, base.depth, env);
        if contains_middle(&self.base) {
            base = self.base.create_box(&env.with_middle_height(Some(len)));
        }

        let mut hbox = MathBox::hbox();
        let spaced = !base.is_space();
        if let Some(l) = self.left {
            hbox.add(Self::delimiter(l, len, env));
            if spaced {
                hbox.add(glue::get(AtomType::Opening, self.base.left_type(), env));
            }
        }
        hbox.add(base);
        if let Some(r) = self.right {
            if spaced {
                hbox.add(glue::get(self.base.right_type(), AtomType::Closing, env));
            }
            hbox.add(Self::delimiter(r, len, env));
        }
        hbox
    }
}

/// Whether a `\middle` belongs to this fence: nested fences size their own.
fn contains_middle(atom: &Atom) -> bool {
    match atom {
        Atom::Middle(_) => true,
        Atom::Row(r) => r.elements.iter().any(contains_middle),
        Atom::Typed(t) => contains_middle(&t.base),
        Atom::Color(c) => c.base.elements.iter().any(contains_middle),
        _ => false,
    }
}

/// A delimiter stretched to the height of its enclosing fence.
#[derive(Debug, Clone)]
pub struct MiddleAtom {
    pub delim: &'static Symbol,
}

impl MiddleAtom {
    pub fn new(delim: &'static Symbol) -> Self {
        Self { delim }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        match env.middle_height() {
            Some(len) => FencedAtom::delimiter(self.delim, len, env),
            None => MathBox::empty(),
        }
    }
}
