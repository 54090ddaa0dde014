//! The row sequencer.
//!
//! A row turns its atoms into one HBox, left to right. Per atom it:
//!
//! 1. skips break marks, remembering that a break is allowed here;
//! 2. merges combining-mark clusters and runs of unmapped characters into
//!    one text atom;
//! 3. demotes a binary operator to ordinary when it has no left operand or
//!    is followed by a relation, closing or punctuation;
//! 4. replaces a ligature by its glyph, or kerns against the next glyph;
//! 5. inserts inter-atom glue (TeXbook p. 170) unless either side is an
//!    explicit space;
//! 6. records break positions (everywhere, after break marks, before
//!    digits).

use std::borrow::Cow;

use super::character::{TextAtom, cluster_len};
use super::Atom;
use crate::boxes::MathBox;
use crate::env::Environment;
use crate::font::{Char, LigatureStep};
use crate::glue;
use crate::types::AtomType;

/// Glue and kerns smaller than this are dropped.
const PREC: f32 = 1e-4;

/// An ordered list of atoms laid out horizontally.
#[derive(Debug, Clone)]
pub struct RowAtom {
    pub elements: Vec<Atom>,
    /// Whether break positions are recorded for the splitter.
    pub breakable: bool,
}

impl Default for RowAtom {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl RowAtom {
    pub fn new(elements: Vec<Atom>) -> Self {
        Self {
            elements,
            breakable: true,
        }
    }

    /// Wrap an atom in a row; a row is taken as is.
    pub fn from_atom(atom: Atom) -> Self {
        match atom {
            Atom::Row(r) => r,
            a => Self::new(vec![a]),
        }
    }

    pub fn push(&mut self, atom: Atom) {
        self.elements.push(atom);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn left_type(&self) -> AtomType {
        self.elements
            .first()
            .map_or(AtomType::Ordinary, Atom::left_type)
    }

    pub fn right_type(&self) -> AtomType {
        self.elements
            .last()
            .map_or(AtomType::Ordinary, Atom::right_type)
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        self.layout(env, None)
    }

    /// Lay the row out after an atom whose right type is `prev`.
    pub(crate) fn layout(&self, env: &Environment, mut prev: Option<AtomType>) -> MathBox {
        let mut env = env.clone();
        let mut hbox = MathBox::hbox();
        let n = self.elements.len();
        let mut i = 0;

        while i < n {
            // 1. Break marks.
            let mut has_break = false;
            while i < n && matches!(self.elements[i], Atom::BreakMark) {
                has_break = true;
                i += 1;
            }
            if i == n {
                break;
            }
            let start = i;
            let raw = &self.elements[i];

            // 2. Clusters and unmapped characters.
            let (mut cur, last) = self.coalesce(i, &env);
            i = last;

            // 3. Binary operators without operands are ordinary.
            let next = self.elements.get(i + 1);
            let (mut left, mut right) = (cur.left_type(), cur.right_type());
            if demote_bin(left, right, prev, next) {
                left = AtomType::Ordinary;
                right = AtomType::Ordinary;
            }

            // 4. Ligatures and kerning.
            let mut kern = 0.0;
            if next.is_some() && right == AtomType::Ordinary && cur.is_char() {
                if let Some(chr) = cur.get_char(&env).filter(Char::is_valid) {
                    match self.ligature(&chr, i, &env) {
                        Some((lig, end)) => {
                            cur = Cow::Owned(Atom::FixedChar(lig));
                            i = end;
                        },
                        None => kern = self.kern(&chr, i, &env),
                    }
                }
            }

            // 5. Glue.
            if start != 0 && !cur.is_kern() {
                if let Some(p) = prev {
                    let g = glue::get(p, left, &env);
                    if g.width.abs() > PREC {
                        hbox.add(g);
                    }
                }
            }

            // 6. Break positions.
            let digit = matches!(raw, Atom::Char(c) if c.code.is_numeric());
            if self.breakable
                && !hbox.children.is_empty()
                && (env.break_everywhere() || has_break || digit)
            {
                hbox.add_break_position(hbox.children.len());
            }

            let b = cur.create_box_after(&env, prev);
            env.set_last_font_id(b.last_font_id());
            hbox.add(b);
            if kern.abs() > PREC {
                hbox.add(MathBox::strut(kern, 0.0, 0.0, 0.0));
            }

            if !cur.is_kern() {
                prev = Some(right);
            }
            i += 1;
        }
        hbox
    }

    /// The atom starting at `i`, with clusters and unmapped characters
    /// merged into a text atom, and the index of the last element used.
    fn coalesce(&self, i: usize, env: &Environment) -> (Cow<'_, Atom>, usize) {
        let Atom::Char(first) = &self.elements[i] else {
            return (Cow::Borrowed(&self.elements[i]), i);
        };
        let mode = first.math_mode;
        let run = self.elements[i..].iter().map_while(|a| match a {
            Atom::Char(c) if c.math_mode == mode => Some(c),
            _ => None,
        });

        let cluster = cluster_len(run.clone().map(|c| c.code));
        let mut text = String::new();
        let mut len = 0;
        if cluster > 1 {
            text.extend(run.clone().take(cluster).map(|c| c.code));
            len = cluster;
        }
        for c in run.skip(len) {
            if c.get_char(env).is_valid() {
                break;
            }
            text.push(c.code);
            len += 1;
        }

        if len == 0 {
            return (Cow::Borrowed(&self.elements[i]), i);
        }
        (Cow::Owned(Atom::Text(TextAtom::new(text, mode))), i + len - 1)
    }

    /// Probe the font's ligature table with the glyphs from `i` on. Returns
    /// the ligature glyph and the index of the last atom it replaces.
    fn ligature(&self, chr: &Char, i: usize, env: &Environment) -> Option<(Char, usize)> {
        let font = env.fonts().font(chr.font);
        let mut seq = vec![chr.glyph?];
        let mut found = None;
        for (j, next) in self.elements.iter().enumerate().skip(i + 1) {
            let Some(glyph) = lig_kern_char(next, env)
                .filter(|c| c.font == chr.font)
                .and_then(|c| c.glyph)
            else {
                break;
            };
            seq.push(glyph);
            match font.ligature(&seq) {
                LigatureStep::Dead => break,
                LigatureStep::Partial => {},
                LigatureStep::Complete(g) => found = Some((g, j)),
            }
        }
        found.map(|(g, j)| (Char::only_glyph(chr.font, g, font.metrics(g), chr.scale), j))
    }

    fn kern(&self, chr: &Char, i: usize, env: &Environment) -> f32 {
        self.elements
            .get(i + 1)
            .and_then(|next| lig_kern_char(next, env))
            .filter(|c| c.font == chr.font)
            .and_then(|c| c.glyph)
            .map_or(0.0, |g| env.fonts().kern(chr, g))
    }
}

/// The glyph of an atom that may take part in a ligature or kern.
fn lig_kern_char(atom: &Atom, env: &Environment) -> Option<Char> {
    use AtomType::{
        BigOperator, BinaryOperator, Closing, Opening, Ordinary, Punctuation, Relation,
    };
    if !matches!(
        atom.left_type(),
        Ordinary | BigOperator | BinaryOperator | Relation | Opening | Closing | Punctuation
    ) {
        return None;
    }
    atom.get_char(env).filter(Char::is_valid)
}

fn demote_bin(left: AtomType, right: AtomType, prev: Option<AtomType>, next: Option<&Atom>) -> bool {
    use AtomType::{BigOperator, BinaryOperator, Closing, Opening, Punctuation, Relation};
    if left == BinaryOperator {
        let no_left_operand = prev.is_none_or(|p| {
            matches!(p, BinaryOperator | BigOperator | Relation | Opening | Punctuation)
        });
        if no_left_operand || next.is_none() {
            return true;
        }
    }
    right == BinaryOperator
        && next.is_some_and(|n| matches!(n.left_type(), Relation | Closing | Punctuation))
}
