//! Matrix cells spanning several columns or rows.

use crate::atom::Atom;
use crate::boxes::MathBox;
use crate::env::Environment;
use crate::glue::{self, SpaceType};
use crate::types::{Alignment, AtomType};

/// `\multicolumn{n}{align}{body}`.
#[derive(Debug, Clone)]
pub struct MulticolumnAtom {
    /// Number of columns covered, at least one.
    pub n: usize,
    pub align: Alignment,
    pub before_vlines: usize,
    pub after_vlines: usize,
    pub base: Box<Atom>,
}

impl MulticolumnAtom {
    /// `align` is a one-column preamble such as `c`, `|l` or `r||`.
    pub fn new(n: usize, align: &str, base: Atom) -> Self {
        let mut atom = Self {
            n: n.max(1),
            align: Alignment::Center,
            before_vlines: 0,
            after_vlines: 0,
            base: base.boxed(),
        };
        let mut seen_letter = false;
        for c in align.chars() {
            match c {
                'l' | 'r' | 'c' => {
                    atom.align = match c {
                        'l' => Alignment::Left,
                        'r' => Alignment::Right,
                        _ => Alignment::Center,
                    };
                    seen_letter = true;
                },
                '|' if seen_letter => atom.after_vlines += 1,
                '|' => atom.before_vlines += 1,
                _ => {},
            }
        }
        atom
    }

    pub fn has_right_vline(&self) -> bool {
        self.after_vlines != 0
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        self.create_box_width(env, 0.0)
    }

    /// Lay out across `width`; zero keeps the natural width.
    pub(crate) fn create_box_width(&self, env: &Environment, width: f32) -> MathBox {
        let b = self.base.create_box(env);
        let b = if width == 0.0 {
            b
        } else {
            MathBox::hbox_aligned(b, width, self.align)
        };
        b.with_role(AtomType::MultiColumn)
    }
}

/// `\hdotsfor[coeff]{n}`: dots filling the columns it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HdotsforAtom {
    pub n: usize,
    /// Spacing between dots in units of two thin spaces.
    pub coeff: f32,
}

impl HdotsforAtom {
    pub fn new(n: usize, coeff: f32) -> Self {
        Self { n: n.max(1), coeff }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        self.create_box_width(env, 0.0)
    }

    pub(crate) fn create_box_width(&self, env: &Environment, width: f32) -> MathBox {
        let dot = Atom::char('.').create_box(env);
        let mut space = glue::named_space(SpaceType::Thin, env) * self.coeff * 2.0;
        if width == 0.0 {
            return Self::pad(space, dot);
        }

        let x = (width - dot.width) / (space + dot.width);
        let count = x.floor().max(0.0) as usize;
        if count == 0 {
            return Self::pad(space, MathBox::hbox_aligned(dot, width, Alignment::Center));
        }

        // Stretch the gaps to use up the remainder.
        space += (x - count as f32) * space / count as f32;
        let mut dots = MathBox::hbox();
        for _ in 0..count {
            dots.add(dot.clone());
            dots.add(MathBox::strut(space, 0.0, 0.0, 0.0));
        }
        dots.add(dot);
        Self::pad(space, MathBox::hbox_aligned(dots, width, Alignment::Center))
    }

    fn pad(space: f32, b: MathBox) -> MathBox {
        let strut = MathBox::strut(0.0, space, 0.0, 0.0);
        MathBox::vbox_of([strut.clone(), b, strut]).with_role(AtomType::MultiColumn)
    }
}

/// `\multirow{n}{..}{body}`. A negative `n` spans upwards.
#[derive(Debug, Clone)]
pub struct MultiRowAtom {
    pub n: i32,
    pub base: Box<Atom>,
}

impl MultiRowAtom {
    pub fn new(n: i32, base: Atom) -> Self {
        Self {
            n: if n == 0 { 1 } else { n },
            base: base.boxed(),
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        self.base.create_box(env).with_role(AtomType::MultiRow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_env;

    #[test]
    fn multicolumn_preamble() {
        let m = MulticolumnAtom::new(2, "||r|", Atom::char('x'));
        assert_eq!(m.align, Alignment::Right);
        assert_eq!((m.before_vlines, m.after_vlines), (2, 1));
        assert!(m.has_right_vline());
        assert_eq!(MulticolumnAtom::new(0, "", Atom::Empty).n, 1);
    }

    #[test]
    fn multicolumn_widens_to_request() {
        let env = test_env();
        let m = MulticolumnAtom::new(2, "l", Atom::char('x'));
        assert_eq!(m.create_box(&env).width, 500.0);
        let b = m.create_box_width(&env, 2000.0);
        assert_eq!(b.width, 2000.0);
        assert_eq!(b.role, AtomType::MultiColumn);
    }

    #[test]
    fn hdots_fill_the_width() {
        let env = test_env();
        let one = HdotsforAtom::new(2, 1.0).create_box(&env);
        assert_eq!(one.role, AtomType::MultiColumn);
        let dot = Atom::char('.').create_box(&env).width;
        assert_eq!(one.width, dot);

        let filled = HdotsforAtom::new(2, 1.0).create_box_width(&env, 5000.0);
        assert!((filled.width - 5000.0).abs() < 1e-2);
        fn count(b: &MathBox) -> usize {
            usize::from(b.is_char()) + b.children.iter().map(count).sum::<usize>()
        }
        // (5000 - 278) / (278 + 2 thin spaces) dots after the first
        assert!(count(&filled) > 3);
    }

    #[test]
    fn multirow_is_tagged() {
        let env = test_env();
        let m = MultiRowAtom::new(0, Atom::char('x'));
        assert_eq!(m.n, 1);
        assert_eq!(m.create_box(&env).role, AtomType::MultiRow);
    }
}
