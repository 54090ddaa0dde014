//! Fractions and ruleless stacks (`\frac`, `\binom`, `\atop`).

use super::{Atom, create_opt};
use crate::boxes::MathBox;
use crate::env::{Dimen, Environment};
use crate::types::Alignment;

/// Horizontal padding on both sides of a fraction, in em.
const SIDE_PADDING: f32 = 0.12;

#[derive(Debug, Clone)]
pub struct FracAtom {
    pub num: Option<Box<Atom>>,
    pub den: Option<Box<Atom>>,
    /// Draw the fraction bar.
    pub rule: bool,
    /// Bar thickness; the font's default when absent.
    pub thickness: Option<Dimen>,
    pub num_align: Alignment,
    pub den_align: Alignment,
}

impl FracAtom {
    pub fn new(num: Atom, den: Atom) -> Self {
        Self {
            num: Some(num.boxed()),
            den: Some(den.boxed()),
            rule: true,
            thickness: None,
            num_align: Alignment::Center,
            den_align: Alignment::Center,
        }
    }

    /// A fraction without a bar.
    pub fn ruleless(num: Atom, den: Atom) -> Self {
        Self {
            rule: false,
            ..Self::new(num, den)
        }
    }

    pub fn with_thickness(mut self, thickness: Dimen) -> Self {
        self.thickness = Some(thickness);
        self
    }

    /// Only left, right and center make sense; anything else centers.
    pub fn with_align(mut self, num: Alignment, den: Alignment) -> Self {
        self.num_align = check_align(num);
        self.den_align = check_align(den);
        self
    }

    fn theta(&self, env: &Environment) -> f32 {
        match self.thickness {
            _ if !self.rule => 0.0,
            Some(t) => t.to_units(env).max(0.0),
            None => env.rule_thickness(),
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let consts = env.math_consts();
        let theta = self.theta(env);
        let default_theta = env.rule_thickness();
        let display = env.style().is_display();

        let mut x = create_opt(self.num.as_deref(), &env.num_style());
        let mut z = create_opt(self.den.as_deref(), &env.dnom_style());
        let w = x.width.max(z.width);

        let (u, v) = match (theta > 0.0, display) {
            (true, true) => (
                consts.fraction_numerator_display_style_shift_up,
                consts.fraction_denominator_display_style_shift_down,
            ),
            (true, false) => (
                consts.fraction_numerator_shift_up,
                consts.fraction_denominator_shift_down,
            ),
            (false, true) => (
                consts.stack_top_display_style_shift_up,
                consts.stack_bottom_display_style_shift_down,
            ),
            (false, false) => (consts.stack_top_shift_up, consts.stack_bottom_shift_down),
        };
        let (mut u, mut v) = (env.constant(u), env.constant(v));
        let axis = env.axis_height();

        if theta > 0.0 {
            let phi = if display { 3.0 * theta } else { theta };
            let num_gap = (u - x.depth) - (axis + theta / 2.0);
            if num_gap < phi {
                u += phi - num_gap;
            }
            let den_gap = (axis - theta / 2.0) - (z.height - v);
            if den_gap < phi {
                v += phi - den_gap;
            }
        } else {
            let phi = if display { 7.0 } else { 3.0 } * default_theta;
            let psi = (u - x.depth) - (z.height - v);
            if psi < phi {
                u += (phi - psi) / 2.0;
                v += (phi - psi) / 2.0;
            }
        }

        x.shift = offset(w - x.width, self.num_align);
        z.shift = offset(w - z.width, self.den_align);

        let height = x.height + u;
        let depth = z.depth + v;
        let kern = height + depth - x.vlen() - z.vlen() - theta;
        let mut vbox = MathBox::vbox();
        let x_vlen = x.vlen();
        vbox.add(x);
        if theta > 0.0 {
            let above = height - axis - theta / 2.0 - x_vlen;
            vbox.add(MathBox::strut(0.0, above, 0.0, 0.0));
            vbox.add(MathBox::rule(theta, w, 0.0));
            vbox.add(MathBox::strut(0.0, kern - above, 0.0, 0.0));
        } else {
            vbox.add(MathBox::strut(0.0, kern, 0.0, 0.0));
        }
        vbox.add(z);
        vbox.height = height;
        vbox.depth = depth;

        let pad = MathBox::strut(SIDE_PADDING * env.em(), 0.0, 0.0, 0.0);
        MathBox::hbox_of([pad.clone(), vbox, pad])
    }
}

fn check_align(align: Alignment) -> Alignment {
    match align {
        Alignment::Left | Alignment::Right => align,
        _ => Alignment::Center,
    }
}

fn offset(rest: f32, align: Alignment) -> f32 {
    match align {
        Alignment::Left => 0.0,
        Alignment::Right => rest,
        _ => rest / 2.0,
    }
}
