//! Sub- and superscripts.
//!
//! Scripts sit beside the base (TeXbook appendix G, rules 18a-18f) unless
//! the base asks for limits, in which case they are stacked above and below
//! it. Either way the base's baseline does not move.

use mathbox_types::font_style::FontStyle;

use super::{Atom, CharAtom, PhantomAtom, RowAtom, StackArgs, StackAtom};
use crate::boxes::MathBox;
use crate::env::{Environment, TexStyle};
use crate::types::{AtomType, LimitsType};

const PREC: f32 = 1e-4;

/// The pieces of a laid-out script attachment, assembled by the caller.
#[derive(Debug, Clone)]
pub(crate) struct ScriptParts {
    pub base: MathBox,
    pub scripts: MathBox,
    /// Space after the scripts.
    pub space: f32,
    /// Kern between base and scripts.
    pub kern: f32,
    /// Negative italic correction of a big operator.
    pub width_reduce: f32,
    pub italic: f32,
}

#[derive(Debug, Clone, Default)]
pub struct ScriptsAtom {
    /// A phantom `M` holds the place when absent.
    pub base: Option<Box<Atom>>,
    pub sub: Option<Box<Atom>>,
    pub sup: Option<Box<Atom>>,
    /// Scripts go right of the base; left for `\sideset` prescripts.
    pub on_right: bool,
}

impl ScriptsAtom {
    pub fn new(base: Option<Atom>, sub: Option<Atom>, sup: Option<Atom>) -> Self {
        Self {
            base: base.map(Atom::boxed),
            sub: sub.map(Atom::boxed),
            sup: sup.map(Atom::boxed),
            on_right: true,
        }
    }

    pub fn on_left(mut self) -> Self {
        self.on_right = false;
        self
    }

    fn base_or_phantom(&self) -> Atom {
        match &self.base {
            Some(b) => (**b).clone(),
            None => {
                let m = CharAtom::new('M', false).with_font_style(FontStyle::RM);
                Atom::Phantom(PhantomAtom::partial(Atom::Char(m), false, true, true))
            },
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let base = self.base_or_phantom();
        if self.sub.is_none() && self.sup.is_none() {
            return base.create_box(env);
        }

        let limits = base.limits();
        if limits == LimitsType::Limits
            || (limits == LimitsType::Normal && env.style() == TexStyle::Display)
        {
            let over = self.sup.as_deref().cloned().map(StackArgs::auto_space);
            let under = self.sub.as_deref().cloned().map(StackArgs::auto_space);
            return StackAtom::new(Some(base), over, under).create_box(env);
        }

        self.create_beside(&base, env)
    }

    /// Attach the scripts beside `base`, whatever its limits say.
    pub(crate) fn create_beside(&self, base: &Atom, env: &Environment) -> MathBox {
        let parts = create_scripts(base, self.sub.as_deref(), self.sup.as_deref(), self.on_right, env);
        let shim = parts.width_reduce + parts.kern;
        let mut hbox = MathBox::hbox();
        if self.on_right {
            hbox.add(parts.base);
            if shim.abs() > PREC {
                hbox.add(MathBox::strut(shim, 0.0, 0.0, 0.0));
            }
            hbox.add(parts.scripts);
            hbox.add(MathBox::strut(parts.space, 0.0, 0.0, 0.0));
        } else {
            hbox.add(MathBox::strut(parts.space, 0.0, 0.0, 0.0));
            hbox.add(parts.scripts);
            if shim.abs() > PREC {
                hbox.add(MathBox::strut(shim, 0.0, 0.0, 0.0));
            }
            hbox.add(parts.base);
        }
        hbox
    }
}

/// Lay out the scripts of `base` without assembling them. At least one of
/// `sub` and `sup` is present.
pub(crate) fn create_scripts(
    base: &Atom,
    sub: Option<&Atom>,
    sup: Option<&Atom>,
    on_right: bool,
    env: &Environment,
) -> ScriptParts {
    let consts = env.math_consts();

    // Accents attach their scripts to the accentee: the kernel measures
    // the drop, the accented box is what gets drawn.
    let (probe, kernel, base_box) = match base {
        Atom::Accented(a) => {
            let cramped = env.cramp_style();
            let kernel = a.base.create_box(&cramped);
            (&*a.base, kernel, base.create_box(env))
        },
        _ => {
            let b = base.create_box(env);
            (base, b.clone(), b)
        },
    };

    let mut delta = 0.0;
    let mut char_base = false;
    let mut operator = false;
    if probe.is_char() {
        let text_mode = matches!(probe, Atom::Char(c) if !c.math_mode);
        if !text_mode {
            delta = probe.get_char(env).map_or(0.0, |c| c.italic());
        }
        operator = probe.left_type() == AtomType::BigOperator;
        char_base = !operator;
    } else if let Atom::Placeholder(p) = probe {
        delta = p.italic.to_units(env);
    }

    let (mut u, mut v) = if char_base {
        (0.0, 0.0)
    } else {
        (
            kernel.height - env.constant(consts.superscript_baseline_drop_max),
            kernel.depth + env.constant(consts.subscript_baseline_drop_min),
        )
    };

    let compose = |scripts: MathBox, extra: f32| ScriptParts {
        kern: kernel.width - base_box.width + extra,
        width_reduce: if operator && delta > PREC { -delta } else { 0.0 },
        space: env.constant(consts.space_after_script),
        italic: delta,
        base: base_box.clone(),
        scripts,
    };

    let Some(sup) = sup else {
        // Subscript only.
        let mut x = sub.map_or_else(MathBox::empty, |s| s.create_box(&env.sub_style()));
        x.shift = v
            .max(env.constant(consts.subscript_shift_down))
            .max(x.height - env.constant(consts.subscript_top_max));
        return compose(x, 0.0);
    };

    let mut x = sup.create_box(&env.sup_style());
    let shift_up = if env.style().is_cramped() {
        consts.superscript_shift_up_cramped
    } else {
        consts.superscript_shift_up
    };
    u = u
        .max(env.constant(shift_up))
        .max(x.depth + env.constant(consts.superscript_bottom_min));

    let Some(sub) = sub else {
        // Superscript only.
        x.shift = -u;
        return compose(x, delta);
    };

    // Both.
    let mut y = sub.create_box(&env.sub_style());
    v = v.max(env.constant(consts.subscript_shift_down));
    let theta = env.constant(consts.sub_superscript_gap_min);
    let mut sigma = (u - x.depth) - (y.height - v);
    if sigma < theta {
        v = theta + y.height + x.depth - u;
        let psi = env.constant(consts.superscript_bottom_max_with_subscript) - (u - x.depth);
        if psi > 0.0 && v - psi + y.depth > kernel.depth {
            u += psi;
            v -= psi;
        }
        sigma = theta;
    }

    let (top_kern, bottom_kern) = if on_right {
        (delta, 0.0)
    } else {
        (
            (y.width - x.width).max(0.0) + delta,
            (x.width - y.width).max(0.0),
        )
    };
    let kern = if on_right { top_kern.min(bottom_kern) } else { 0.0 };

    let (x_height, y_depth) = (x.height, y.depth);
    x.shift = top_kern - kern;
    y.shift = bottom_kern - kern;
    let mut vbox = MathBox::vbox();
    vbox.add_spaced(x, sigma);
    vbox.add_spaced(y, sigma);
    vbox.height = x_height + u;
    vbox.depth = y_depth + v;
    compose(vbox, kern)
}

/// Scripts collected across several `_`/`^` groups on one base
/// (`x_1^2_3`), laid out as a single script pair.
#[derive(Debug, Clone)]
pub struct CumulativeScriptsAtom {
    pub base: Box<Atom>,
    pub sub: RowAtom,
    pub sup: RowAtom,
}

impl CumulativeScriptsAtom {
    /// Attach `sub`/`sup` to `base`, merging with scripts already on it.
    pub fn new(base: Atom, sub: Option<Atom>, sup: Option<Atom>) -> Self {
        let mut this = match base {
            Atom::CumulativeScripts(c) => c,
            Atom::Scripts(s) => Self {
                base: s.base.unwrap_or_default(),
                sub: s.sub.map_or_else(RowAtom::default, |a| RowAtom::new(vec![*a])),
                sup: s.sup.map_or_else(RowAtom::default, |a| RowAtom::new(vec![*a])),
            },
            base => Self {
                base: base.boxed(),
                sub: RowAtom::default(),
                sup: RowAtom::default(),
            },
        };
        if let Some(a) = sub {
            this.add_subscript(a);
        }
        if let Some(a) = sup {
            this.add_superscript(a);
        }
        this
    }

    pub fn add_subscript(&mut self, sub: Atom) {
        self.sub.push(sub);
    }

    pub fn add_superscript(&mut self, sup: Atom) {
        self.sup.push(sup);
    }

    /// The equivalent single script atom.
    pub fn scripts_atom(&self) -> ScriptsAtom {
        let non_empty = |r: &RowAtom| (!r.is_empty()).then(|| Atom::Row(r.clone()));
        ScriptsAtom::new(
            Some((*self.base).clone()),
            non_empty(&self.sub),
            non_empty(&self.sup),
        )
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        self.scripts_atom().create_box(env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_env;

    fn scripts(base: Atom, sub: Option<Atom>, sup: Option<Atom>) -> ScriptsAtom {
        ScriptsAtom::new(Some(base), sub, sup)
    }

    #[test]
    fn no_scripts_is_the_base() {
        let env = test_env();
        let b = scripts(Atom::char('x'), None, None).create_box(&env);
        assert!(b.is_char());
    }

    #[test]
    fn superscript_rises_by_shift_up() {
        let env = test_env().with_style(TexStyle::Text);
        let b = scripts(Atom::char('x'), None, Some(Atom::char('2'))).create_box(&env);
        let sup = &b.children[1];
        let consts = env.math_consts();
        assert!((-sup.shift - consts.superscript_shift_up as f32).abs() < 1e-3);
        // Base stays put.
        assert_eq!(b.children[0].shift, 0.0);
    }

    #[test]
    fn italic_correction_before_superscript() {
        let env = test_env().with_style(TexStyle::Text);
        let b = scripts(Atom::char('f'), None, Some(Atom::char('2'))).create_box(&env);
        // base, italic kern, script, space after
        assert_eq!(b.children.len(), 4);
        assert!((b.children[1].width - 50.0).abs() < 1e-3);
    }

    #[test]
    fn subscript_drops_at_least_shift_down() {
        let env = test_env().with_style(TexStyle::Text);
        let b = scripts(Atom::char('x'), Some(Atom::char('i')), None).create_box(&env);
        let sub = &b.children[1];
        assert!(sub.shift >= env.math_consts().subscript_shift_down as f32 - 1e-3);
    }

    #[test]
    fn both_scripts_keep_the_gap() {
        let env = test_env().with_style(TexStyle::Text);
        let b = scripts(Atom::char('x'), Some(Atom::char('b')), Some(Atom::char('y'))).create_box(&env);
        let vbox = &b.children[1];
        assert!(vbox.is_vbox());
        let gap = vbox.children[1].height;
        assert!(gap >= env.math_consts().sub_superscript_gap_min as f32 - 1e-3);
    }

    #[test]
    fn display_operator_takes_limits() {
        let env = test_env();
        let sum = Atom::symbol("sum").unwrap();
        let b = scripts(sum.clone(), Some(Atom::char('i')), Some(Atom::char('n'))).create_box(&env);
        assert!(b.is_vbox());
        let inline = scripts(sum, Some(Atom::char('i')), Some(Atom::char('n')))
            .create_box(&env.with_style(TexStyle::Text));
        assert!(inline.is_hbox());
    }

    #[test]
    fn missing_base_uses_a_phantom() {
        let env = test_env().with_style(TexStyle::Text);
        let b = ScriptsAtom::new(None, None, Some(Atom::char('2'))).create_box(&env);
        assert_eq!(b.children[0].width, 0.0);
        assert_eq!(b.children[0].height, 680.0);
    }

    #[test]
    fn prescripts_go_left() {
        let env = test_env().with_style(TexStyle::Text);
        let b = scripts(Atom::char('x'), None, Some(Atom::char('2')))
            .on_left()
            .create_box(&env);
        assert!(b.children.last().is_some_and(MathBox::is_char));
    }

    #[test]
    fn cumulative_scripts_merge() {
        let env = test_env().with_style(TexStyle::Text);
        let first = Atom::Scripts(scripts(Atom::char('x'), Some(Atom::char('1')), None));
        let mut c = CumulativeScriptsAtom::new(first, Some(Atom::char('2')), Some(Atom::char('3')));
        c.add_superscript(Atom::char('4'));
        assert_eq!(c.sub.len(), 2);
        assert_eq!(c.sup.len(), 2);
        let b = c.create_box(&env);
        assert!(b.children[1].is_vbox());
    }
}
