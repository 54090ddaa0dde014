//! Overlaying one atom on another without changing the anchor's metrics
//! (`\mathrlap`-style overprinting, label placement).

use super::Atom;
use crate::boxes::MathBox;
use crate::env::{Dimen, Environment};
use crate::types::Alignment;

/// Placement along one axis: an alignment plus an extra offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZStackArgs {
    pub align: Alignment,
    pub offset: Dimen,
}

impl ZStackArgs {
    pub fn new(align: Alignment, offset: Dimen) -> Self {
        Self { align, offset }
    }

    pub fn aligned(align: Alignment) -> Self {
        Self::new(align, Dimen::ZERO)
    }
}

#[derive(Debug, Clone)]
pub struct ZStackAtom {
    /// Horizontal placement: left, center or right edge of the anchor.
    pub hargs: ZStackArgs,
    /// Vertical placement: top, center, bottom or (anything else) baseline.
    pub vargs: ZStackArgs,
    pub atom: Box<Atom>,
    pub anchor: Box<Atom>,
}

impl ZStackAtom {
    pub fn new(hargs: ZStackArgs, vargs: ZStackArgs, atom: Atom, anchor: Atom) -> Self {
        Self {
            hargs,
            vargs,
            atom: atom.boxed(),
            anchor: anchor.boxed(),
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let anchor = self.anchor.create_box(env);
        let b = self.atom.create_box(env);
        overlay(anchor, b, self.hargs, self.vargs, env)
    }
}

/// Draw `b` over `anchor`. The result is at least as wide as the anchor
/// (plus any room needed on the left).
pub(crate) fn overlay(
    anchor: MathBox,
    mut b: MathBox,
    hargs: ZStackArgs,
    vargs: ZStackArgs,
    env: &Environment,
) -> MathBox {
    let offset = hargs.offset.to_units(env);
    let left = match hargs.align {
        Alignment::Left => offset,
        Alignment::Center => (anchor.width - b.width) / 2.0 + offset,
        Alignment::Right => anchor.width - b.width + offset,
        _ => 0.0,
    };

    let anchor_width = anchor.width;
    let (anchor_height, anchor_depth, anchor_vlen) = (anchor.height, anchor.depth, anchor.vlen());
    let mut hbox = MathBox::hbox();
    if left < 0.0 {
        hbox.add(MathBox::strut(-left, 0.0, 0.0, 0.0));
    }
    hbox.add(anchor);
    let min_width = hbox.width;

    let kern = if left < 0.0 { -hbox.width } else { left - anchor_width };
    if kern != 0.0 {
        hbox.add(MathBox::strut(kern, 0.0, 0.0, 0.0));
    }

    let voffset = vargs.offset.to_units(env);
    b.shift = match vargs.align {
        Alignment::Top => voffset + b.height - anchor_height,
        Alignment::Bottom => anchor_depth - b.depth - voffset,
        Alignment::Center => {
            let x = anchor_depth - b.depth;
            let y = (anchor_vlen - b.vlen()) / 2.0;
            x - y - voffset
        },
        _ => voffset,
    };
    hbox.add(b);

    if hbox.width < min_width {
        hbox.add(MathBox::strut(min_width - hbox.width, 0.0, 0.0, 0.0));
    }
    hbox
}
