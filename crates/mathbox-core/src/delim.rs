//! Stretchy delimiters.
//!
//! A delimiter of a requested length is taken from the font's size
//! variants when one is long enough, and otherwise assembled from glyph
//! parts: fixed pieces (ends, middle) plus extenders repeated as often as
//! needed, overlapping at the connectors.

use log::{debug, warn};
use mathbox_types::error::{MathBoxError, Result};
use mathbox_types::font_style::FontStyle;

use crate::boxes::MathBox;
use crate::env::Environment;
use crate::font::Char;
use crate::font::symbols::{self, Symbol};

/// Variants within this many design units of the request are accepted
/// when rounding.
const ROUND_TOL: f32 = 10.0;

/// Resolve a delimiter name (or single-character alias).
pub fn symbol(name: &str) -> Result<&'static Symbol> {
    symbols::get(name).ok_or_else(|| MathBoxError::Symbol(name.to_string()))
}

fn delim_char(sym: &Symbol, env: &Environment) -> Char {
    env.fonts()
        .get_char(sym.code, FontStyle::NONE, true, env.scale())
}

/// The `size`-th vertical variant of a delimiter (`\big`, `\Big` ...).
pub fn v_larger(sym: &Symbol, env: &Environment, size: usize) -> MathBox {
    let chr = delim_char(sym, env);
    MathBox::char_box(env.fonts().v_larger(&chr, size))
}

/// The `size`-th horizontal variant of a delimiter.
pub fn h_larger(sym: &Symbol, env: &Environment, size: usize) -> MathBox {
    let chr = delim_char(sym, env);
    MathBox::char_box(env.fonts().h_larger(&chr, size))
}

/// A vertical delimiter covering at least `height + depth == len`.
pub fn create_v(sym: &Symbol, env: &Environment, len: f32, round: bool) -> MathBox {
    create(&delim_char(sym, env), env, len, true, round)
}

/// A horizontal delimiter at least `len` wide.
pub fn create_h(sym: &Symbol, env: &Environment, len: f32, round: bool) -> MathBox {
    create(&delim_char(sym, env), env, len, false, round)
}

/// Build a delimiter of length `len` from `chr`.
pub fn create(chr: &Char, env: &Environment, len: f32, vertical: bool, round: bool) -> MathBox {
    let fonts = env.fonts();
    let extent = |c: &Char| {
        if vertical {
            c.height() + c.depth()
        } else {
            c.width()
        }
    };

    // 1. Size variants.
    let count = if vertical {
        fonts.v_larger_count(chr)
    } else {
        fonts.h_larger_count(chr)
    };
    let tolerance = ROUND_TOL * env.scale();
    let mut fallback = None;
    for i in 0..count {
        let v = if vertical {
            fonts.v_larger(chr, i)
        } else {
            fonts.h_larger(chr, i)
        };
        let l = extent(&v);
        if l >= len || (round && len - l <= tolerance) {
            return MathBox::char_box(v);
        }
        fallback = Some(v);
    }

    // 2. Assembly.
    let assembly = if vertical {
        fonts.v_assembly(chr)
    } else {
        fonts.h_assembly(chr)
    };
    let Some(assembly) = assembly else {
        return MathBox::char_box(fallback.unwrap_or(*chr));
    };

    // Fixed parts remember how many extenders precede them.
    let mut fixed: Vec<(usize, MathBox)> = Vec::new();
    let mut repeats: Vec<MathBox> = Vec::new();
    let (mut fl, mut rl) = (0.0f32, 0.0f32);
    let mut max_overlap = f32::MAX;

    // Vertical assemblies are listed bottom-up; VBoxes stack top-down.
    let parts: Vec<_> = if vertical {
        assembly.parts.iter().rev().collect()
    } else {
        assembly.parts.iter().collect()
    };
    for part in parts {
        let b = MathBox::char_box(fonts.assembly_part(chr, part.glyph));
        let l = if vertical { b.vlen() } else { b.width };
        for conn in [part.start_connector, part.end_connector] {
            if conn != 0.0 {
                max_overlap = max_overlap.min(conn * chr.scale);
            }
        }
        if part.extender {
            rl += l;
            repeats.push(b);
        } else {
            fl += l;
            fixed.push((repeats.len(), b));
        }
    }

    let m = env.constant(env.math_consts().min_connector_overlap);
    let nf = fixed.len() as f32;
    let nr = repeats.len() as f32;
    // len <= cnt * rl + fl - (nr * cnt + nf - 1) * m
    let denom = rl - nr * m;
    let cnt = if repeats.is_empty() {
        0
    } else if denom <= 0.0 {
        warn!("degenerate delimiter assembly for {:?}", chr.code);
        1
    } else {
        ((len - fl + (nf - 1.0) * m) / denom).ceil().max(0.0) as usize
    };
    let p = repeats.len() * cnt + fixed.len();
    let p = p.saturating_sub(1);
    let e = if p == 0 {
        0.0
    } else {
        (cnt as f32 * rl + fl - p as f32 * m - len) / p as f32
    };
    let s = (m + e).min(max_overlap);
    debug!(
        "assembled delimiter {:?}: len {len}, repeats {cnt}, overlap {s}",
        chr.code
    );

    let mut seq: Vec<MathBox> = Vec::with_capacity(p + 1);
    let mut fixed = fixed.into_iter().peekable();
    for (i, r) in repeats.iter().enumerate() {
        while let Some((_, b)) = fixed.next_if(|(k, _)| *k == i) {
            seq.push(b);
        }
        seq.extend(std::iter::repeat_n(r, cnt).cloned());
    }
    seq.extend(fixed.map(|(_, b)| b));

    let mut group = if vertical {
        MathBox::vbox()
    } else {
        MathBox::hbox()
    };
    for (i, b) in seq.into_iter().enumerate() {
        if i > 0 {
            if vertical {
                group.add(MathBox::strut(0.0, -s, 0.0, 0.0));
            } else {
                group.add(MathBox::strut(-s, 0.0, 0.0, 0.0));
            }
        }
        group.add(b);
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_env;

    #[test]
    fn small_request_uses_base_variant() {
        let env = test_env();
        let paren = symbol("(").unwrap();
        let b = create_v(paren, &env, 10.0, false);
        assert!(b.is_char());
        assert!(b.vlen() >= 10.0);
    }

    #[test]
    fn variant_is_first_long_enough() {
        let env = test_env();
        let paren = symbol("lbrack").unwrap();
        let b = create_v(paren, &env, 1500.0, false);
        assert!(b.is_char());
        assert!(b.vlen() >= 1500.0);
        assert!(b.vlen() < 2500.0);
    }

    #[test]
    fn rounding_accepts_near_miss() {
        let env = test_env();
        let paren = symbol("(").unwrap();
        let exact = create_v(paren, &env, 1200.0, false);
        let near = create_v(paren, &env, exact.vlen() + 5.0, true);
        assert!(near.is_char());
        assert_eq!(near.vlen(), exact.vlen());
    }

    #[test]
    fn assembly_covers_requested_length() {
        let env = test_env();
        let paren = symbol("(").unwrap();
        for len in [4000.0, 6000.0, 12345.0] {
            let b = create_v(paren, &env, len, false);
            assert!(b.is_vbox());
            assert!(b.vlen() >= len - 1e-2, "{} < {len}", b.vlen());
        }
    }

    #[test]
    fn horizontal_assembly_is_hbox() {
        let env = test_env();
        let brace = symbol("overbrace").unwrap();
        let b = create_h(brace, &env, 5000.0, false);
        assert!(b.is_hbox());
        assert!(b.width >= 5000.0 - 1e-2);
    }

    #[test]
    fn no_assembly_falls_back_to_largest_variant() {
        let env = test_env();
        let vert = symbol("Vert").unwrap();
        let b = create_v(vert, &env, 1e6, false);
        assert!(b.is_char());
    }

    #[test]
    fn unknown_delimiter_is_an_error() {
        assert!(matches!(symbol("lbrak"), Err(MathBoxError::Symbol(_))));
    }
}
