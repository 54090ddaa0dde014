//! A vertical list of atoms (`\vbox`-like stacks, `\substack`, long
//! division).

use super::Atom;
use crate::boxes::MathBox;
use crate::env::{Dimen, Environment};
use crate::types::Alignment;

#[derive(Debug, Clone)]
pub struct VRowAtom {
    pub elements: Vec<Atom>,
    /// Raised by this much; negative lowers.
    pub raise: Dimen,
    /// Put the environment's line space between elements.
    pub add_interline: bool,
    /// `Top` hangs the list from its first baseline, `Center` centers it on
    /// the axis, anything else sits on the last baseline.
    pub valign: Alignment,
    /// `None` leaves each element at its natural width.
    pub halign: Alignment,
}

impl Default for VRowAtom {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl VRowAtom {
    pub fn new(elements: Vec<Atom>) -> Self {
        Self {
            elements,
            raise: Dimen::ZERO,
            add_interline: false,
            valign: Alignment::Center,
            halign: Alignment::None,
        }
    }

    /// Wrap an atom; a vertical row contributes its elements.
    pub fn from_atom(atom: Atom) -> Self {
        match atom {
            Atom::VRow(v) => Self::new(v.elements),
            a => Self::new(vec![a]),
        }
    }

    pub fn append(&mut self, atom: Atom) {
        self.elements.push(atom);
    }

    pub fn prepend(&mut self, atom: Atom) {
        self.elements.insert(0, atom);
    }

    pub fn pop(&mut self) -> Option<Atom> {
        self.elements.pop()
    }

    pub fn with_halign(mut self, align: Alignment) -> Self {
        self.halign = align;
        self
    }

    pub fn with_valign(mut self, align: Alignment) -> Self {
        self.valign = align;
        self
    }

    pub fn with_interline(mut self, on: bool) -> Self {
        self.add_interline = on;
        self
    }

    pub fn with_raise(mut self, raise: Dimen) -> Self {
        self.raise = raise;
        self
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let mut boxes: Vec<MathBox> = self.elements.iter().map(|a| a.create_box(env)).collect();
        if self.halign != Alignment::None {
            let max_width = boxes.iter().fold(f32::MIN, |w, b| w.max(b.width));
            boxes = boxes
                .into_iter()
                .map(|b| MathBox::hbox_aligned(b, max_width, self.halign))
                .collect();
        }

        let first_height = boxes.first().map_or(0.0, |b| b.height);
        let last_depth = boxes.last().map_or(0.0, |b| b.depth);
        let n = boxes.len();
        let mut vbox = MathBox::vbox();
        for (i, b) in boxes.into_iter().enumerate() {
            vbox.add(b);
            if self.add_interline && i + 1 < n {
                vbox.add(MathBox::strut(0.0, env.line_space(), 0.0, 0.0));
            }
        }

        vbox.shift = -self.raise.to_units(env);
        let total = vbox.vlen();
        match self.valign {
            Alignment::Top => {
                vbox.height = first_height;
                vbox.depth = total - first_height;
            },
            Alignment::Center => {
                let axis = env.axis_height();
                vbox.height = total / 2.0 + axis;
                vbox.depth = total / 2.0 - axis;
            },
            _ => {
                vbox.height = total - last_depth;
                vbox.depth = last_depth;
            },
        }
        vbox
    }
}
