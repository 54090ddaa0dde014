//! Line breaking of a laid-out formula.
//!
//! [`split`] cuts an over-wide HBox at its recorded break positions into a
//! VBox of lines. Each cut takes the latest break position whose prefix
//! still fits; when the child that overflows is itself an HBox that can be
//! cut to fit, the cut goes inside it instead. The glue in front of a
//! break is consumed by the cut.

use log::debug;

use crate::boxes::MathBox;

/// Where to cut: a path of child indices down to the HBox that is cut, and
/// the break position inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Cut {
    path: Vec<usize>,
    index: usize,
}

/// Wrap `b` to `width` with `line_space` between lines. Returns the result
/// and whether a cut was made; a box that fits, is not an HBox, or offers
/// no break position comes back unchanged.
pub fn split(b: MathBox, width: f32, line_space: f32) -> (MathBox, bool) {
    if !b.is_hbox() || !width.is_finite() || width <= 0.0 || b.width <= width {
        return (b, false);
    }

    let mut lines = MathBox::vbox();
    let mut rest = b;
    let mut count = 0;
    while rest.width > width {
        let Some((cut, _)) = find_cut(&rest, width) else {
            break;
        };
        let (first, second) = apply_cut(&rest, &cut.path, cut.index);
        lines.add_spaced(first, line_space);
        rest = second;
        count += 1;
    }

    if count == 0 {
        debug!("no break position fits {width}, keeping one line of {}", rest.width);
        return (rest, false);
    }
    lines.add_spaced(rest, line_space);
    debug!("split into {} lines at width {width}", count + 1);
    (lines, true)
}

/// The latest break position at or before child `i`.
fn break_before(hb: &MathBox, i: usize) -> Option<usize> {
    hb.break_positions().iter().rev().copied().find(|&p| p > 0 && p <= i)
}

/// Find a cut making the first line of `hb` at most `width` wide where
/// possible. Returns the cut and the width of the first line.
fn find_cut(hb: &MathBox, width: f32) -> Option<(Cut, f32)> {
    let mut cumulative = Vec::with_capacity(hb.children.len() + 1);
    cumulative.push(0.0f32);
    for (i, child) in hb.children.iter().enumerate() {
        let before = cumulative[i];
        cumulative.push(before + child.width);
        if before + child.width <= width {
            continue;
        }

        let pos = break_before(hb, i);
        if child.is_hbox() {
            if let Some((sub, w)) = find_cut(child, width - before) {
                if before + w <= width || pos.is_none() {
                    let mut path = vec![i];
                    path.extend(sub.path);
                    return Some((Cut { path, index: sub.index }, before + w));
                }
            }
        }
        if let Some(p) = pos {
            return Some((
                Cut {
                    path: Vec::new(),
                    index: p,
                },
                cumulative[p],
            ));
        }
    }
    None
}

/// Cut `hb` along `path` before child `index` of the innermost box.
fn apply_cut(hb: &MathBox, path: &[usize], index: usize) -> (MathBox, MathBox) {
    let Some((&i, inner_path)) = path.split_first() else {
        let glue_before = index >= 2 && hb.children.get(index - 1).is_some_and(MathBox::is_glue);
        return if glue_before {
            hb.split(index - 2, 2)
        } else {
            hb.split(index - 1, 1)
        };
    };

    let (inner_first, inner_second) = apply_cut(&hb.children[i], inner_path, index);
    let mut first = MathBox::hbox().with_shift(hb.shift);
    let mut second = MathBox::hbox().with_shift(hb.shift);
    for c in &hb.children[..i] {
        first.add(c.clone());
    }
    first.add(inner_first);
    second.add(inner_second);
    for c in &hb.children[i + 1..] {
        second.add(c.clone());
    }
    for &bp in hb.break_positions() {
        if bp < i {
            first.add_break_position(bp);
        } else if bp > i {
            second.add_break_position(bp - i);
        }
    }
    (first, second)
}
