//! Inter-atom glue.
//!
//! TeXbook chapter 18 (p. 170): the space between two adjacent atoms
//! depends only on their types and the current style.
//!
//! ```text
//!        ORD   OP    BIN   REL   OPEN  CLOSE PUNCT INNER
//! ORD     0     1    (2)   (3)    0     0     0    (1)
//! OP      1     1     *    (3)    0     0     0    (1)
//! BIN    (2)   (2)    *     *    (2)    *     *    (2)
//! REL    (3)   (3)    *     0    (3)    0     0    (3)
//! OPEN    0     0     *     0     0     0     0     0
//! CLOSE   0     1    (2)   (3)    0     0     0    (1)
//! PUNCT  (1)   (1)    *    (1)   (1)   (1)   (1)   (1)
//! INNER  (1)    1    (2)   (3)   (1)    0    (1)   (1)
//! ```
//!
//! 1 is a thin space, 2 medium, 3 thick. Parenthesized entries apply only
//! in display and text styles.

use crate::boxes::MathBox;
use crate::env::Environment;
use crate::types::AtomType;

/// Magnitudes in mu: `(space, stretch, shrink)`.
const GLUE_TYPES: [(f32, f32, f32); 4] = [
    (0.0, 0.0, 0.0),
    (3.0, 0.0, 0.0),
    (4.0, 4.0, 2.0),
    (5.0, 0.0, 5.0),
];

// [left][right][style / 2]
#[rustfmt::skip]
const TABLE: [[[u8; 4]; 8]; 8] = [
    [[0, 0, 0, 0], [1, 1, 1, 1], [2, 2, 0, 0], [3, 3, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 0, 0]],
    [[1, 1, 1, 1], [1, 1, 1, 1], [0, 0, 0, 0], [3, 3, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 0, 0]],
    [[2, 2, 0, 0], [2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [2, 2, 0, 0]],
    [[3, 3, 0, 0], [3, 3, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [3, 3, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [3, 3, 0, 0]],
    [[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 1], [2, 2, 0, 0], [3, 3, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 0, 0]],
    [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [1, 1, 0, 0], [1, 1, 0, 0], [1, 1, 0, 0], [1, 1, 0, 0], [1, 1, 0, 0]],
    [[1, 1, 0, 0], [1, 1, 1, 1], [2, 2, 0, 0], [3, 3, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [1, 1, 0, 0], [1, 1, 0, 0]],
];

/// Named math spaces; the negative kinds are `\!`-style negative skips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceType {
    None,
    Thin,
    Med,
    Thick,
    NegThin,
    NegMed,
    NegThick,
}

impl SpaceType {
    fn index(self) -> (usize, bool) {
        match self {
            SpaceType::None => (0, false),
            SpaceType::Thin => (1, false),
            SpaceType::Med => (2, false),
            SpaceType::Thick => (3, false),
            SpaceType::NegThin => (1, true),
            SpaceType::NegMed => (2, true),
            SpaceType::NegThick => (3, true),
        }
    }
}

fn mu(env: &Environment) -> f32 {
    env.em() / 18.0
}

fn index_of(left: AtomType, right: AtomType, env: &Environment) -> usize {
    let (Some(l), Some(r)) = (left.glue_index(), right.glue_index()) else {
        return 0;
    };
    TABLE[l][r][env.style().index() / 2] as usize
}

/// Width of the glue between `left` and `right` in the current style.
pub fn space(left: AtomType, right: AtomType, env: &Environment) -> f32 {
    GLUE_TYPES[index_of(left, right, env)].0 * mu(env)
}

/// The glue box between `left` and `right`.
pub fn get(left: AtomType, right: AtomType, env: &Environment) -> MathBox {
    let (w, st, sh) = GLUE_TYPES[index_of(left, right, env)];
    let f = mu(env);
    MathBox::glue(w * f, st * f, sh * f)
}

/// Width of a named space, negative for the negative kinds.
pub fn named_space(kind: SpaceType, env: &Environment) -> f32 {
    let (i, neg) = kind.index();
    let w = GLUE_TYPES[i].0 * mu(env);
    if neg { -w } else { w }
}

/// A glue box for a named space.
pub fn named(kind: SpaceType, env: &Environment) -> MathBox {
    let (i, neg) = kind.index();
    let (w, st, sh) = GLUE_TYPES[i];
    let f = mu(env);
    let mut b = MathBox::glue(w * f, st * f, sh * f);
    if neg {
        b.neg_width();
    }
    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::TexStyle;
    use crate::test_utils::test_env;
    use AtomType::*;

    #[test]
    fn ord_rel_is_thick_in_text_only() {
        let env = test_env();
        let m = env.em() / 18.0;
        assert!((space(Ordinary, Relation, &env) - 5.0 * m).abs() < 1e-4);
        let script = env.with_style(TexStyle::Script);
        assert_eq!(space(Ordinary, Relation, &script), 0.0);
    }

    #[test]
    fn op_op_is_thin_everywhere() {
        let env = test_env().with_style(TexStyle::ScriptScriptCramped);
        assert!(space(BigOperator, BigOperator, &env) > 0.0);
    }

    #[test]
    fn open_never_gets_space() {
        let env = test_env();
        for r in [Ordinary, BigOperator, Relation, Opening, Inner] {
            assert_eq!(space(Opening, r, &env), 0.0);
        }
    }

    #[test]
    fn roles_space_like_ordinary() {
        let env = test_env();
        assert_eq!(space(Accent, Relation, &env), space(Ordinary, Relation, &env));
        assert_eq!(space(None, Relation, &env), 0.0);
    }

    #[test]
    fn medium_glue_carries_stretch() {
        let env = test_env();
        let b = get(Ordinary, BinaryOperator, &env);
        match b.kind {
            crate::boxes::BoxKind::Glue { stretch, shrink } => {
                assert!((stretch - b.width).abs() < 1e-4);
                assert!((shrink - b.width / 2.0).abs() < 1e-4);
            },
            _ => panic!("expected glue"),
        }
    }

    #[test]
    fn negative_named_space() {
        let env = test_env();
        let thin = named_space(SpaceType::Thin, &env);
        assert!((named_space(SpaceType::NegThin, &env) + thin).abs() < 1e-6);
        assert!(named(SpaceType::NegThick, &env).width < 0.0);
    }
}
