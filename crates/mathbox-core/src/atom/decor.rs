//! Bars and stretched delimiters over or under a base (`\overline`,
//! `\underline`, `\overbrace`, `\underbrace`).

use mathbox_types::error::Result;

use super::Atom;
use crate::boxes::MathBox;
use crate::delim;
use crate::env::Environment;
use crate::font::symbols::Symbol;

/// Finish a VBox so that the base keeps its baseline. `over` puts the base
/// last, otherwise first.
fn keep_baseline(vbox: &mut MathBox, base_height: f32, base_depth: f32, over: bool) {
    let total = vbox.vlen();
    if over {
        vbox.depth = base_depth;
        vbox.height = total - base_depth;
    } else {
        vbox.height = base_height;
        vbox.depth = total - base_height;
    }
}

#[derive(Debug, Clone)]
pub struct OverUnderBarAtom {
    pub base: Box<Atom>,
    pub over: bool,
}

impl OverUnderBarAtom {
    pub fn over(base: Atom) -> Self {
        Self {
            base: base.boxed(),
            over: true,
        }
    }

    pub fn under(base: Atom) -> Self {
        Self {
            base: base.boxed(),
            over: false,
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let consts = env.math_consts();
        let base = self.base.create_box(env);
        let (h, d, w) = (base.height, base.depth, base.width);
        let mut vbox = MathBox::vbox();
        if self.over {
            let asc = env.constant(consts.overbar_extra_ascender);
            let t = env.constant(consts.overbar_rule_thickness);
            let gap = env.constant(consts.overbar_vertical_gap);
            vbox.add(MathBox::strut(0.0, asc, 0.0, 0.0));
            vbox.add(MathBox::rule(t, w, 0.0));
            vbox.add(MathBox::strut(0.0, gap, 0.0, 0.0));
            vbox.add(base);
        } else {
            let gap = env.constant(consts.underbar_vertical_gap);
            let t = env.constant(consts.underbar_rule_thickness);
            let dsc = env.constant(consts.underbar_extra_descender);
            vbox.add(base);
            vbox.add(MathBox::strut(0.0, gap, 0.0, 0.0));
            vbox.add(MathBox::rule(t, w, 0.0));
            vbox.add(MathBox::strut(0.0, dsc, 0.0, 0.0));
        }
        keep_baseline(&mut vbox, h, d, self.over);
        vbox
    }
}

/// A horizontal delimiter stretched over or under a base. Scripts on it
/// are stacked as limits.
#[derive(Debug, Clone)]
pub struct OverUnderDelimiterAtom {
    pub base: Box<Atom>,
    pub delim: &'static Symbol,
    pub over: bool,
}

impl OverUnderDelimiterAtom {
    pub fn new(base: Atom, delim: &'static Symbol, over: bool) -> Self {
        Self {
            base: base.boxed(),
            delim,
            over,
        }
    }

    /// `\overbrace`-style constructor from the delimiter's name.
    pub fn named(base: Atom, name: &str, over: bool) -> Result<Self> {
        Ok(Self::new(base, delim::symbol(name)?, over))
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let consts = env.math_consts();
        let mut base = self.base.create_box(env);
        let mut delim = delim::create_h(self.delim, env, base.width, false);
        // Center the narrower of the two.
        let diff = delim.width - base.width;
        if diff >= 0.0 {
            base.shift = diff / 2.0;
        } else {
            delim.shift = -diff / 2.0;
        }

        let (h, d) = (base.height, base.depth);
        let mut vbox = MathBox::vbox();
        if self.over {
            let gap = env.constant(consts.stretch_stack_gap_below_min);
            vbox.add(delim);
            vbox.add(MathBox::strut(0.0, gap, 0.0, 0.0));
            vbox.add(base);
        } else {
            let gap = env.constant(consts.stretch_stack_gap_above_min);
            vbox.add(base);
            vbox.add(MathBox::strut(0.0, gap, 0.0, 0.0));
            vbox.add(delim);
        }
        keep_baseline(&mut vbox, h, d, self.over);
        vbox
    }
}
