//! `multline`, `gather` and `gathered`: one equation per line, aligned
//! across the text width.

use super::{MatrixAtom, MatrixType};
use crate::atom::Atom;
use crate::boxes::MathBox;
use crate::env::{Dimen, Environment, UnitType};
use crate::types::Alignment;

const LINE_SEP: Dimen = Dimen::new(1.0, UnitType::Ex);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultlineType {
    /// First line flush left, last flush right, the rest centered.
    #[default]
    Multline,
    /// Every line centered.
    Gather,
    /// A centered column sized to its content.
    Gathered,
}

#[derive(Debug, Clone, Default)]
pub struct MultlineAtom {
    pub kind: MultlineType,
    /// Lines with an alignment override; `Alignment::None` keeps the
    /// default for the line's position.
    pub lines: Vec<(Atom, Alignment)>,
}

impl MultlineAtom {
    pub fn new(kind: MultlineType, lines: impl IntoIterator<Item = Atom>) -> Self {
        Self {
            kind,
            lines: lines.into_iter().map(|a| (a, Alignment::None)).collect(),
        }
    }

    /// Override the alignment of line `i` (`\shoveleft`, `\shoveright`).
    pub fn with_line_alignment(mut self, i: usize, align: Alignment) -> Self {
        if let Some(line) = self.lines.get_mut(i) {
            line.1 = align;
        }
        self
    }

    fn default_alignment(&self, i: usize) -> Alignment {
        let last = self.lines.len() - 1;
        match self.kind {
            MultlineType::Multline if i == 0 && last > 0 => Alignment::Left,
            MultlineType::Multline if i == last && last > 0 => Alignment::Right,
            // A single multline line sits at the left.
            MultlineType::Multline if last == 0 => Alignment::Left,
            _ => Alignment::Center,
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        if self.lines.is_empty() {
            return MathBox::empty();
        }
        let width = env.text_width();
        if !width.is_finite() || self.kind == MultlineType::Gathered {
            let rows = self.lines.iter().map(|(a, _)| vec![Some(a.clone())]).collect();
            return MatrixAtom::new(MatrixType::Matrix, rows).create_box(env);
        }

        let sep = LINE_SEP.to_units(env);
        let mut vbox = MathBox::vbox();
        for (i, (atom, align)) in self.lines.iter().enumerate() {
            let align = match align {
                Alignment::None => self.default_alignment(i),
                a => *a,
            };
            if i > 0 {
                vbox.add(MathBox::strut(0.0, sep, 0.0, 0.0));
            }
            vbox.add(MathBox::hbox_aligned(atom.create_box(env), width, align));
        }
        let total = vbox.vlen();
        vbox.height = total / 2.0;
        vbox.depth = total / 2.0;
        vbox
    }
}
