//! Frames around a base: `\fbox`, `\doublebox`, `\shadowbox`, `\ovalbox`,
//! `\colorbox`.

use mathbox_types::color::Color;

use super::Atom;
use crate::boxes::{FrameShape, MathBox};
use crate::env::{Dimen, Environment, UnitType};

/// Gap between the base and the frame.
const FRAME_SPACE: Dimen = Dimen::em(0.5);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FrameStyle {
    #[default]
    FBox,
    /// A thin frame inside a thick one.
    DoubleFramed,
    /// A frame with a drop shadow three rules wide.
    Shadow,
    /// Rounded corners; see [`FrameShape::Oval`].
    Oval { multiplier: f32, diameter: f32 },
}

impl FrameStyle {
    pub const OVAL: FrameStyle = FrameStyle::Oval {
        multiplier: 0.5,
        diameter: 0.0,
    };
}

#[derive(Debug, Clone)]
pub struct FramedAtom {
    pub base: Box<Atom>,
    pub style: FrameStyle,
    /// Outline color; the current foreground when absent.
    pub line: Option<Color>,
    pub bg: Option<Color>,
}

impl FramedAtom {
    pub fn new(base: Atom, style: FrameStyle) -> Self {
        Self {
            base: base.boxed(),
            style,
            line: None,
            bg: None,
        }
    }

    /// `\fcolorbox`: a plain frame with colored outline and background.
    pub fn colored(base: Atom, line: Option<Color>, bg: Option<Color>) -> Self {
        Self {
            line,
            bg,
            ..Self::new(base, FrameStyle::FBox)
        }
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let base = self.base.create_box(env);
        let t = env.rule_thickness();
        let space = FRAME_SPACE.to_units(env);
        let framed = match self.style {
            FrameStyle::FBox => MathBox::framed(base, t, space, FrameShape::Rect),
            FrameStyle::DoubleFramed => {
                let outer_space = 1.5 * t + Dimen::new(1.0, UnitType::Pt).to_units(env);
                let inner = MathBox::framed(base, 0.75 * t, space, FrameShape::Rect);
                MathBox::framed(inner, 1.5 * t, outer_space, FrameShape::Rect)
            },
            FrameStyle::Shadow => {
                MathBox::framed(base, t, space, FrameShape::Shadow { rule: 3.0 * t })
            },
            FrameStyle::Oval {
                multiplier,
                diameter,
            } => MathBox::framed(
                base,
                t,
                space,
                FrameShape::Oval {
                    multiplier,
                    diameter,
                },
            ),
        };
        if self.line.is_none() && self.bg.is_none() {
            return framed;
        }
        framed.with_frame_colors(self.line, self.bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::BoxKind;
    use crate::test_utils::test_env;

    #[test]
    fn fbox_pads_all_sides() {
        let env = test_env();
        let t = env.rule_thickness();
        let b = FramedAtom::new(Atom::char('x'), FrameStyle::FBox).create_box(&env);
        let pad = t + 500.0;
        assert!((b.width - (500.0 + 2.0 * pad)).abs() < 1e-3);
        assert!((b.height - (450.0 + pad)).abs() < 1e-3);
        assert!((b.depth - pad).abs() < 1e-3);
    }

    #[test]
    fn shadow_extends_right_and_down() {
        let env = test_env();
        let plain = FramedAtom::new(Atom::char('x'), FrameStyle::FBox).create_box(&env);
        let shadow = FramedAtom::new(Atom::char('x'), FrameStyle::Shadow).create_box(&env);
        let rule = 3.0 * env.rule_thickness();
        assert!((shadow.width - plain.width - rule).abs() < 1e-3);
        assert!((shadow.depth - plain.depth - rule).abs() < 1e-3);
        assert_eq!(shadow.height, plain.height);
    }

    #[test]
    fn double_frame_nests() {
        let env = test_env();
        let b = FramedAtom::new(Atom::char('x'), FrameStyle::DoubleFramed).create_box(&env);
        assert!(matches!(b.kind, BoxKind::Framed { .. }));
        assert!(matches!(b.children[0].kind, BoxKind::Framed { .. }));
    }

    #[test]
    fn colors_reach_the_frame() {
        let env = test_env();
        let red = Color::rgb(255, 0, 0);
        let b = FramedAtom::colored(Atom::char('x'), Some(red), None).create_box(&env);
        match b.kind {
            BoxKind::Framed { line, bg, .. } => {
                assert_eq!(line, Some(red));
                assert_eq!(bg, None);
            },
            k => panic!("expected a frame, got {k:?}"),
        }
        let oval = FramedAtom::new(Atom::char('x'), FrameStyle::OVAL).create_box(&env);
        assert!(matches!(oval.kind, BoxKind::Framed { shape: FrameShape::Oval { .. }, .. }));
    }
}
