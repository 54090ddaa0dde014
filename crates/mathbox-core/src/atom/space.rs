//! Explicit spacing.

use crate::boxes::MathBox;
use crate::env::{Dimen, Environment};
use crate::glue::{self, SpaceType};

/// Whitespace the author asked for. Rows insert no glue next to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpaceAtom {
    /// An interword space of the current font.
    Blank,
    /// One of the math skips (`\,`, `\:`, `\;`, `\!` ...).
    Named(SpaceType),
    /// A kern or strut with explicit dimensions.
    Explicit {
        width: Dimen,
        height: Dimen,
        depth: Dimen,
    },
}

impl SpaceAtom {
    /// A horizontal kern.
    pub fn kern(width: Dimen) -> Self {
        Self::Explicit {
            width,
            height: Dimen::ZERO,
            depth: Dimen::ZERO,
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        match *self {
            Self::Blank => MathBox::strut(env.space(), 0.0, 0.0, 0.0),
            Self::Named(SpaceType::None) => MathBox::strut(env.space(), 0.0, 0.0, 0.0),
            Self::Named(kind) => glue::named(kind, env),
            Self::Explicit {
                width,
                height,
                depth,
            } => MathBox::strut(
                width.to_units(env),
                height.to_units(env),
                depth.to_units(env),
                0.0,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::TexStyle;
    use crate::test_utils::test_env;

    #[test]
    fn explicit_dimensions_follow_the_style() {
        let env = test_env();
        let s = SpaceAtom::Explicit {
            width: Dimen::em(1.0),
            height: Dimen::em(0.5),
            depth: Dimen::ZERO,
        };
        let b = s.create_box(&env);
        assert_eq!((b.width, b.height, b.depth), (1000.0, 500.0, 0.0));
        let small = s.create_box(&env.with_style(TexStyle::Script));
        assert!((small.width - 700.0).abs() < 1e-3);
    }

    #[test]
    fn named_skips_are_mu_based() {
        let env = test_env();
        let thin = SpaceAtom::Named(SpaceType::Thin).create_box(&env);
        assert!((thin.width - 3.0 * env.em() / 18.0).abs() < 1e-3);
        let neg = SpaceAtom::Named(SpaceType::NegThin).create_box(&env);
        assert!((neg.width + thin.width).abs() < 1e-3);
    }

    #[test]
    fn blank_is_the_font_space() {
        let env = test_env();
        assert_eq!(SpaceAtom::Blank.create_box(&env).width, env.space());
    }
}
