//! Geometric odds and ends: `\big` delimiters, laps, raising, reflection,
//! resizing, rotation, rules, strike-throughs, `\vcenter`, `\cancel` and
//! long division.

use mathbox_types::error::Result;

use super::{Atom, OverUnderBarAtom, SpaceAtom, VRowAtom};
use crate::boxes::{MathBox, RotateOrigin};
use crate::delim;
use crate::env::{Dimen, Environment, UnitType};
use crate::font::symbols::Symbol;
use crate::glue::SpaceType;
use crate::types::{Alignment, AtomType, LimitsType};

/// Vertically center `b` on the math axis.
fn center_on_axis(mut b: MathBox, env: &Environment) -> MathBox {
    b.shift = b.height - b.vlen() / 2.0 - env.axis_height();
    b
}

// ---------------------------------------------------------------------------
// Delimiters and rules
// ---------------------------------------------------------------------------

/// A delimiter at one of the fixed `\big` sizes (1 to 4).
#[derive(Debug, Clone)]
pub struct BigDelimiterAtom {
    pub delim: &'static Symbol,
    pub size: usize,
}

impl BigDelimiterAtom {
    pub fn new(delim: &'static Symbol, size: usize) -> Self {
        Self { delim, size }
    }

    pub fn named(name: &str, size: usize) -> Result<Self> {
        Ok(Self::new(delim::symbol(name)?, size))
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let b = delim::v_larger(self.delim, env, self.size);
        MathBox::hbox_of([center_on_axis(b, env)])
    }
}

/// `\rule[raise]{width}{height}`.
#[derive(Debug, Clone, Copy)]
pub struct RuleAtom {
    pub width: Dimen,
    pub height: Dimen,
    pub raise: Dimen,
}

impl RuleAtom {
    pub fn new(width: Dimen, height: Dimen, raise: Dimen) -> Self {
        Self {
            width,
            height,
            raise,
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        MathBox::rule(
            self.height.to_units(env),
            self.width.to_units(env),
            -self.raise.to_units(env),
        )
    }
}

/// A rule through the math axis over the whole base.
#[derive(Debug, Clone)]
pub struct StrikeThroughAtom {
    pub base: Box<Atom>,
}

impl StrikeThroughAtom {
    pub fn new(base: Atom) -> Self {
        Self { base: base.boxed() }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let consts = env.math_consts();
        let t = env.constant(consts.overbar_rule_thickness);
        let b = self.base.create_box(env);
        let w = b.width;
        let mut hbox = MathBox::hbox_of([b]);
        hbox.add(MathBox::strut(-w, 0.0, 0.0, 0.0));
        hbox.add(MathBox::rule(t, w, t - env.axis_height()));
        hbox
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelType {
    /// `\cancel`: bottom left to top right.
    Slash,
    /// `\bcancel`: top left to bottom right.
    Backslash,
    /// `\xcancel`: both.
    Cross,
}

/// Strokes drawn across the base.
#[derive(Debug, Clone)]
pub struct CancelAtom {
    pub base: Box<Atom>,
    pub kind: CancelType,
}

impl CancelAtom {
    pub fn new(base: Atom, kind: CancelType) -> Self {
        Self {
            base: base.boxed(),
            kind,
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let b = self.base.create_box(env);
        let (w, h, d) = (b.width, b.height, b.depth);
        let v = h + d;
        // Segments run from the top left corner, y pointing down.
        let slash = [0.0, v, w, 0.0];
        let backslash = [0.0, 0.0, w, v];
        let segments = match self.kind {
            CancelType::Slash => vec![slash],
            CancelType::Backslash => vec![backslash],
            CancelType::Cross => vec![slash, backslash],
        };
        let lines = MathBox::lines(segments, env.rule_thickness(), w, h, d);
        let mut hbox = MathBox::hbox_of([b]);
        hbox.add(MathBox::strut(-w, 0.0, 0.0, 0.0));
        hbox.add(lines);
        hbox
    }
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LapType {
    /// `\llap`: sticks out to the left.
    Left,
    /// `\rlap`: sticks out to the right.
    Right,
    /// `\clap`.
    Center,
}

/// A base that takes no horizontal room.
#[derive(Debug, Clone)]
pub struct LapedAtom {
    pub base: Box<Atom>,
    pub kind: LapType,
}

impl LapedAtom {
    pub fn new(base: Atom, kind: LapType) -> Self {
        Self {
            base: base.boxed(),
            kind,
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let mut b = self.base.create_box(env);
        b.shift = match self.kind {
            LapType::Left => -b.width,
            LapType::Right => 0.0,
            LapType::Center => -b.width / 2.0,
        };
        let mut vbox = MathBox::vbox_of([b]);
        vbox.width = 0.0;
        vbox
    }
}

/// `\raisebox`: move the base vertically and optionally override the
/// reported height and depth.
#[derive(Debug, Clone)]
pub struct RaiseAtom {
    pub base: Box<Atom>,
    pub raise: Option<Dimen>,
    pub height: Option<Dimen>,
    pub depth: Option<Dimen>,
}

impl RaiseAtom {
    pub fn new(base: Atom, raise: Dimen) -> Self {
        Self {
            base: base.boxed(),
            raise: Some(raise),
            height: None,
            depth: None,
        }
    }

    pub fn with_extent(mut self, height: Option<Dimen>, depth: Option<Dimen>) -> Self {
        self.height = height;
        self.depth = depth;
        self
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let mut base = self.base.create_box(env);
        if let Some(r) = self.raise {
            base.shift = -r.to_units(env);
        }
        let mut hbox = MathBox::hbox_of([base]);
        if let Some(h) = self.height {
            hbox.height = h.to_units(env);
        }
        if let Some(d) = self.depth {
            hbox.depth = d.to_units(env);
        }
        hbox
    }
}

/// `\vcenter`: center the base on the math axis.
#[derive(Debug, Clone)]
pub struct VCenterAtom {
    pub base: Box<Atom>,
}

impl VCenterAtom {
    pub fn new(base: Atom) -> Self {
        Self { base: base.boxed() }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let b = self.base.create_box(env);
        let total = b.vlen();
        let mut hbox = MathBox::hbox_of([b]);
        hbox.height = total / 2.0 + env.axis_height();
        hbox.depth = total - hbox.height;
        hbox
    }
}

// ---------------------------------------------------------------------------
// Transforms
// ---------------------------------------------------------------------------

/// Mirror image of the base.
#[derive(Debug, Clone)]
pub struct ReflectAtom {
    pub base: Box<Atom>,
}

impl ReflectAtom {
    pub fn new(base: Atom) -> Self {
        Self { base: base.boxed() }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        MathBox::reflected(self.base.create_box(env))
    }
}

/// `\resizebox`: scale the base to a width and/or total height.
#[derive(Debug, Clone)]
pub struct ResizeAtom {
    pub base: Box<Atom>,
    pub width: Option<Dimen>,
    pub height: Option<Dimen>,
    /// With both dimensions, use the smaller factor for both axes.
    pub keep_aspect_ratio: bool,
}

impl ResizeAtom {
    pub fn new(base: Atom, width: Option<Dimen>, height: Option<Dimen>, keep_aspect_ratio: bool) -> Self {
        Self {
            base: base.boxed(),
            width,
            height,
            keep_aspect_ratio,
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let b = self.base.create_box(env);
        let sx = self.width.map(|w| w.to_units(env) / b.width);
        let sy = self.height.map(|h| h.to_units(env) / b.vlen());
        let (sx, sy) = match (sx, sy) {
            (None, None) => return b,
            (Some(x), None) => (x, x),
            (None, Some(y)) => (y, y),
            (Some(x), Some(y)) if self.keep_aspect_ratio => {
                let s = x.min(y);
                (s, s)
            },
            (Some(x), Some(y)) => (x, y),
        };
        MathBox::scaled(b, sx, sy)
    }
}

/// Where a rotation pivots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotatePivot {
    Origin(RotateOrigin),
    /// A point given as offsets from the baseline left corner.
    Point(Dimen, Dimen),
}

/// `\rotatebox`.
#[derive(Debug, Clone)]
pub struct RotateAtom {
    pub base: Box<Atom>,
    /// Counter-clockwise, in degrees.
    pub angle: f32,
    pub pivot: RotatePivot,
}

impl RotateAtom {
    pub fn new(base: Atom, angle: f32, origin: RotateOrigin) -> Self {
        Self {
            base: base.boxed(),
            angle,
            pivot: RotatePivot::Origin(origin),
        }
    }

    /// Parse a `key=value` option list: `origin=tr`, or `x=...,y=...`.
    pub fn with_options(base: Atom, angle: f32, options: &str) -> Self {
        let mut origin = None;
        let (mut x, mut y) = (Dimen::ZERO, Dimen::ZERO);
        for opt in options.split(',') {
            let Some((key, value)) = opt.split_once('=') else {
                continue;
            };
            match key.trim() {
                "origin" => origin = Some(RotateOrigin::parse(value.trim())),
                "x" => x = Dimen::parse(value.trim()),
                "y" => y = Dimen::parse(value.trim()),
                _ => {},
            }
        }
        let pivot = origin.map_or(RotatePivot::Point(x, y), RotatePivot::Origin);
        Self {
            base: base.boxed(),
            angle,
            pivot,
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let b = self.base.create_box(env);
        match self.pivot {
            RotatePivot::Origin(o) => MathBox::rotated(b, self.angle, o),
            RotatePivot::Point(x, y) => {
                MathBox::rotated_about(b, self.angle, x.to_units(env), y.to_units(env))
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Long division
// ---------------------------------------------------------------------------

/// The schoolbook layout of `dividend / divisor`: quotient on top, the
/// divisor left of the bracketed dividend, then one product and remainder
/// per quotient digit.
#[derive(Debug, Clone, Copy)]
pub struct LongDivAtom {
    pub divisor: u64,
    pub dividend: u64,
}

impl LongDivAtom {
    pub fn new(divisor: u64, dividend: u64) -> Self {
        Self { divisor, dividend }
    }

    /// Quotient, dividend, then product and remainder per quotient digit.
    /// A zero divisor yields a zero quotient.
    pub fn steps(&self) -> Vec<u64> {
        let quotient = self.dividend.checked_div(self.divisor).unwrap_or(0);
        let digits = quotient.to_string();
        let mut out = vec![quotient, self.dividend];
        let mut remaining = self.dividend;
        for (i, d) in digits.bytes().enumerate() {
            let place = 10u64.pow((digits.len() - i - 1) as u32);
            let product = u64::from(d - b'0') * place * self.divisor;
            remaining = remaining.saturating_sub(product);
            out.push(product);
            out.push(remaining);
        }
        out
    }

    /// The rows as a right-aligned vertical list hanging from the quotient.
    pub fn to_vrow(&self) -> VRowAtom {
        // Zero-width strut giving every row the same extent.
        let strut = || {
            Atom::Rule(RuleAtom::new(
                Dimen::ZERO,
                Dimen::new(2.5, UnitType::Ex),
                Dimen::new(-0.3, UnitType::Ex),
            ))
        };
        let digits = |n: u64| Atom::chars(&n.to_string());

        let mut vrow = VRowAtom::new(Vec::new())
            .with_halign(Alignment::Right)
            .with_valign(Alignment::Top);
        for (i, n) in self.steps().into_iter().enumerate() {
            let row = match i {
                0 => Atom::row([digits(n), strut()]),
                1 => {
                    let bracket = BigDelimiterAtom {
                        delim: &CLOSING_PAREN,
                        size: 1,
                    };
                    let raised = RaiseAtom::new(
                        Atom::BigDelimiter(bracket),
                        Dimen::new(1.0, UnitType::Tt),
                    )
                    .with_extent(Some(Dimen::ZERO), Some(Dimen::ZERO));
                    let under_bar = Atom::row([Atom::Raise(raised), digits(n)]);
                    Atom::row([
                        digits(self.divisor),
                        Atom::Space(SpaceAtom::Named(SpaceType::Thin)),
                        Atom::OverUnderBar(OverUnderBarAtom::over(under_bar)),
                    ])
                },
                i if i % 2 == 0 => Atom::OverUnderBar(OverUnderBarAtom::under(Atom::row([
                    digits(n),
                    strut(),
                ]))),
                _ => Atom::row([digits(n), strut()]),
            };
            vrow.append(row);
        }
        vrow
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        self.to_vrow().create_box(env)
    }
}

static CLOSING_PAREN: Symbol = Symbol {
    name: "rbrack",
    code: ')',
    atom_type: AtomType::Closing,
    limits: LimitsType::NoLimits,
};
