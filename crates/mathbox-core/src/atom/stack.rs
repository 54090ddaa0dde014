//! Material stacked directly above and/or below a base: limits, `\overset`,
//! `\underset`, extensible arrows with labels.
//!
//! The base keeps its baseline: the VBox height is measured from the top
//! down to the base's baseline, everything under it goes into the depth.

use super::Atom;
use crate::boxes::MathBox;
use crate::env::{Dimen, Environment};

/// What goes above or below the base, and how far from it.
#[derive(Debug, Clone)]
pub struct StackArgs {
    pub atom: Box<Atom>,
    /// Explicit gap to the base; the limit constants when absent.
    pub space: Option<Dimen>,
    /// Lay the atom out in superscript (over) or subscript (under) style.
    pub is_script: bool,
}

impl StackArgs {
    /// A script-style limit with automatic spacing.
    pub fn auto_space(atom: Atom) -> Self {
        Self {
            atom: atom.boxed(),
            space: None,
            is_script: true,
        }
    }

    pub fn spaced(atom: Atom, space: Dimen, is_script: bool) -> Self {
        Self {
            atom: atom.boxed(),
            space: Some(space),
            is_script,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StackAtom {
    pub base: Option<Box<Atom>>,
    pub over: Option<StackArgs>,
    pub under: Option<StackArgs>,
    /// Pull the material below up by the accent base height (under
    /// accents).
    pub adjust_bottom: bool,
}

impl StackAtom {
    pub fn new(base: Option<Atom>, over: Option<StackArgs>, under: Option<StackArgs>) -> Self {
        Self {
            base: base.map(Atom::boxed),
            over,
            under,
            adjust_bottom: false,
        }
    }

    pub fn over(base: Atom, over: StackArgs) -> Self {
        Self::new(Some(base), Some(over), None)
    }

    pub fn under(base: Atom, under: StackArgs) -> Self {
        Self::new(Some(base), None, Some(under))
    }

    pub fn with_adjust_bottom(mut self, adjust: bool) -> Self {
        self.adjust_bottom = adjust;
        self
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        self.create_stack(env).0
    }

    /// The stacked box, plus the horizontal offset of the base inside it.
    pub(crate) fn create_stack(&self, env: &Environment) -> (MathBox, f32) {
        let consts = env.math_consts();
        let script = |args: &StackArgs, styled: Environment| {
            if args.is_script {
                args.atom.create_box(&styled)
            } else {
                args.atom.create_box(env)
            }
        };
        let over = self.over.as_ref().map(|a| script(a, env.sup_style()));
        let under = self.under.as_ref().map(|a| script(a, env.sub_style()));
        let base = self
            .base
            .as_deref()
            .map_or_else(MathBox::empty, |b| b.create_box(env));

        let max_width = [over.as_ref(), under.as_ref(), Some(&base)]
            .into_iter()
            .flatten()
            .fold(0.0f32, |w, b| w.max(b.width));
        let delta = self.base.as_deref().map_or(0.0, |b| b.italic(env));
        let centered = |mut b: MathBox, bias: f32| {
            b.shift = (max_width - b.width) / 2.0 + bias;
            b
        };

        let mut vbox = MathBox::vbox();
        if let (Some(o), Some(args)) = (over, &self.over) {
            if !o.is_space() {
                let space = match args.space {
                    Some(s) => s.to_units(env),
                    None => {
                        let rise = env.constant(consts.upper_limit_baseline_rise_min);
                        (rise - o.depth).max(env.constant(consts.upper_limit_gap_min))
                    },
                };
                vbox.add(centered(o, delta / 2.0));
                vbox.add(MathBox::strut(0.0, space, 0.0, delta / 2.0));
            }
        }

        let center = centered(base, 0.0);
        let center_shift = center.shift;
        let center_depth = center.depth;
        vbox.add(center);
        let h = vbox.vlen() - center_depth;

        if let (Some(u), Some(args)) = (under, &self.under) {
            if !u.is_space() {
                let space = match args.space {
                    Some(s) => s.to_units(env),
                    None => {
                        let drop = env.constant(consts.lower_limit_baseline_drop_min);
                        (drop - u.height).max(env.constant(consts.lower_limit_gap_min))
                    },
                };
                vbox.add(MathBox::strut(0.0, space, 0.0, delta / 2.0));
                vbox.add(centered(u, -delta / 2.0));
            }
        }

        vbox.depth = vbox.vlen() - h;
        vbox.height = h;

        if self.adjust_bottom {
            let lift = env.constant(consts.accent_base_height);
            vbox.add(MathBox::strut(0.0, -lift, 0.0, 0.0));
        }

        let kernel_shift = center_shift - vbox.leftmost();
        (vbox, kernel_shift)
    }
}
