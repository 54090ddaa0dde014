//! Matrix layout.

use std::collections::BTreeMap;

use log::debug;

use super::columns::{self, MatrixType};
use super::MatrixAtom;
use crate::atom::{Atom, HlineAtom};
use crate::boxes::MathBox;
use crate::env::{Dimen, Environment, TexStyle, UnitType};
use crate::glue::{self, SpaceType};
use crate::types::{Alignment, AtomType};

/// Fixed inter-column glue.
const COLUMN_SEP: Dimen = Dimen::em(1.0);
/// Vertical glue between rows, split above and below each row.
const ROW_SEP: Dimen = Dimen::new(1.0, UnitType::Ex);

/// A multi-row cell being resolved: its top row, column and row count.
#[derive(Debug, Clone, Copy)]
struct RowSpan {
    row: usize,
    col: usize,
    n: i32,
}

/// Per-row and per-column extents of the grid.
struct Metrics {
    heights: Vec<f32>,
    depths: Vec<f32>,
    widths: Vec<f32>,
}

impl MatrixAtom {
    pub fn create_box(&self, env: &Environment) -> MathBox {
        if self.rows.is_empty() {
            return MathBox::empty();
        }
        let rule = env.rule_thickness();
        let small;
        let env = if self.kind == MatrixType::SmallMatrix {
            small = env.with_style(TexStyle::Script);
            &small
        } else {
            env
        };

        let cells = self.cells();
        let rows = cells.len();
        let cols = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
        let positions: Vec<Alignment> = (0..cols).map(|j| self.position(j)).collect();

        // Box every cell; spanning cells stay out of the row and column
        // extents.
        let mut boxes: Vec<Vec<MathBox>> = Vec::with_capacity(rows);
        let mut m = Metrics {
            heights: vec![0.0; rows],
            depths: vec![0.0; rows],
            widths: vec![0.0; cols],
        };
        let mut multi_cols: Vec<(usize, usize, usize)> = Vec::new();
        let mut multi_rows: Vec<RowSpan> = Vec::new();
        for (i, row) in cells.iter().enumerate() {
            let mut line = Vec::with_capacity(cols);
            for j in 0..cols {
                let atom = row.get(j).copied().flatten();
                let mut b = atom.map_or_else(MathBox::empty, |a| a.create_box(env));
                if self.inter_text.contains(&i) && j == 0 {
                    b.role = AtomType::InterText;
                }
                if let Some(Atom::MultiRow(mr)) = atom {
                    multi_rows.push(RowSpan { row: i, col: j, n: mr.n });
                } else {
                    m.heights[i] = m.heights[i].max(b.height);
                    m.depths[i] = m.depths[i].max(b.depth);
                }
                match atom {
                    Some(Atom::Multicolumn(mc)) => multi_cols.push((i, j, mc.n.min(cols - j))),
                    Some(Atom::Hdotsfor(hd)) => multi_cols.push((i, j, hd.n.min(cols - j))),
                    _ if b.role == AtomType::InterText => {},
                    _ => m.widths[j] = m.widths[j].max(b.width),
                }
                line.push(b);
            }
            boxes.push(line);
        }

        let column_sep = COLUMN_SEP.to_units(env);
        let align_sep = glue::named_space(SpaceType::Med, env);
        let mut mat_width: f32 = m.widths.iter().sum();
        let seps = columns::separators(
            self.kind,
            &positions,
            self.space_around,
            mat_width,
            column_sep,
            align_sep,
            env.text_width(),
        );

        // Widen the covered columns under an oversized multi-column cell.
        for &(r, c, n) in &multi_cols {
            let covered: f32 = (c..c + n - 1).map(|k| m.widths[k] + seps[k + 1]).sum::<f32>() + m.widths[c + n - 1];
            let w = boxes[r][c].width;
            if w > covered {
                mat_width += w - covered;
                let extra = (w - covered) / n as f32;
                for width in &mut m.widths[c..c + n] {
                    *width += extra;
                }
            }
        }

        for (j, sep) in seps.iter().enumerate() {
            mat_width += sep + self.vlines_width(j, env);
        }

        let vsep = ROW_SEP.to_units(env);
        let vspace = vsep / 2.0;
        let offsets = resolve_multi_rows(&mut boxes, &multi_rows, &mut m, rule, vsep);

        let mut vbox = MathBox::vbox();
        for (i, line) in boxes.into_iter().enumerate() {
            let (h, d) = (m.heights[i], m.depths[i]);
            let rule_row = line.first().is_some_and(|b| b.role == AtomType::Hline);
            let mut hb = MathBox::hbox();
            let mut line = line.into_iter().enumerate();
            while let Some((j, b)) = line.next() {
                match b.role {
                    AtomType::InterText => {
                        let w = env.text_width();
                        let w = if w.is_finite() { w } else { mat_width };
                        hb = MathBox::hbox_aligned(b, w, Alignment::Left);
                        break;
                    },
                    AtomType::Hline => {
                        if i > 0 && self.is_rule_row(i - 1) {
                            hb.add(MathBox::strut(0.0, 2.0 * rule, 0.0, 0.0));
                        }
                        let hline = match cells[i].first().copied().flatten() {
                            Some(Atom::Hline(a)) => *a,
                            _ => HlineAtom::default(),
                        };
                        hb.add(hline.create_box_sized(env, mat_width, 0.0));
                        break;
                    },
                    _ => {},
                }

                if j == 0 {
                    self.add_vlines(&mut hb, 0, h, d, vsep, env);
                }
                let first = j;
                let mut last = j;
                let mut right_vline = true;
                let atom = cells[i].get(j).copied().flatten();
                let mut cell = match atom {
                    Some(Atom::Multicolumn(mc)) => {
                        let n = mc.n.min(cols - j);
                        last = j + n - 1;
                        right_vline = mc.has_right_vline();
                        let w = self.spanned_width(&m.widths, &seps, j, n, env);
                        let b = if b.width >= w {
                            b
                        } else {
                            MathBox::hbox_aligned(b, w, mc.align)
                        };
                        let width = b.width;
                        MathBox::wrapped_in(b, width, h, d, Alignment::Left)
                    },
                    Some(Atom::Hdotsfor(hd)) => {
                        let n = hd.n.min(cols - j);
                        last = j + n - 1;
                        let w = self.spanned_width(&m.widths, &seps, j, n, env);
                        let b = hd.create_box_width(env, w);
                        let width = b.width;
                        MathBox::wrapped_in(b, width, h, d, Alignment::Left)
                    },
                    _ => {
                        let b = match offsets.get(&(i, j)) {
                            Some(offset) => MathBox::shifted(b, *offset),
                            None => b,
                        };
                        MathBox::wrapped_in(b, m.widths[j], h, d, positions[j])
                    },
                };
                for _ in first..last {
                    line.next();
                }

                let l = if first == 0 { seps[0] } else { seps[first] / 2.0 };
                let r = if last == cols - 1 {
                    seps[last + 1]
                } else {
                    seps[last + 1] / 2.0
                };
                cell.add_insets(l, vspace, r, vspace);
                for style in self.styles_for(i, first) {
                    style.apply(&mut cell);
                }
                hb.add(cell);
                if right_vline {
                    self.add_vlines(&mut hb, last + 1, h, d, vsep, env);
                }
            }

            if !rule_row {
                hb.height = h + vspace;
                hb.depth = d + vspace;
            }
            vbox.add(hb);
        }

        let total = vbox.vlen();
        let axis = env.axis_height();
        vbox.height = total / 2.0 + axis;
        vbox.depth = total / 2.0 - axis;
        debug!("matrix {rows}x{cols}: width {mat_width}, {} multi-row cells", multi_rows.len());
        vbox
    }

    fn vlines_width(&self, boundary: usize, env: &Environment) -> f32 {
        self.vlines.get(&boundary).map_or(0.0, |n| columns::vlines_width(*n, env))
    }

    fn add_vlines(&self, hb: &mut MathBox, boundary: usize, h: f32, d: f32, vsep: f32, env: &Environment) {
        if let Some(n) = self.vlines.get(&boundary).filter(|n| **n > 0) {
            hb.add(columns::vlines_box(*n, h + d + vsep, d + vsep / 2.0, env));
        }
    }

    /// Width of `n` columns from `first` with the gaps and rules between.
    fn spanned_width(&self, widths: &[f32], seps: &[f32], first: usize, n: usize, env: &Environment) -> f32 {
        let last = first + n - 1;
        let inner: f32 = (first..last)
            .map(|k| widths[k] + seps[k + 1] + self.vlines_width(k + 1, env))
            .sum();
        inner + widths[last]
    }
}

/// Fit multi-row cells to the rows they cover. Rows shorter than the cell
/// share its excess evenly; rule rows count one rule thickness and do not
/// take part in the count. Upward spans move their cell to the top row.
///
/// Returns the vertical draw offset that centers each cell in its span,
/// keyed by the cell's final position.
fn resolve_multi_rows(
    boxes: &mut [Vec<MathBox>],
    spans: &[RowSpan],
    m: &mut Metrics,
    rule: f32,
    vsep: f32,
) -> BTreeMap<(usize, usize), f32> {
    let rows = boxes.len();
    let is_rule = |boxes: &[Vec<MathBox>], j: usize| boxes[j].first().is_some_and(|b| b.role == AtomType::Hline);
    let mut offsets = BTreeMap::new();

    for span in spans {
        let (r, c) = (span.row, span.col);
        let mut n = span.n;
        let mut skipped = 0usize;
        let mut extent = 0.0;
        let (top, end) = if n < 0 {
            let mut j = r as i64;
            while j >= 0 && j > r as i64 + n as i64 {
                let row = j as usize;
                if is_rule(boxes, row) {
                    if row == 0 {
                        break;
                    }
                    extent += rule;
                    n -= 1;
                } else {
                    skipped += 1;
                    extent += m.heights[row] + m.depths[row] + vsep;
                }
                j -= 1;
            }
            let top = (j + 1) as usize;
            if top != r {
                let moved = std::mem::take(&mut boxes[r][c]);
                let displaced = std::mem::replace(&mut boxes[top][c], moved);
                boxes[r][c] = displaced;
            }
            (top, r + 1)
        } else {
            let mut j = r;
            while j < rows && (j as i64) < r as i64 + n as i64 {
                if is_rule(boxes, j) {
                    if j == rows - 1 {
                        break;
                    }
                    extent += rule;
                    n += 1;
                } else {
                    skipped += 1;
                    extent += m.heights[j] + m.depths[j] + vsep;
                }
                j += 1;
            }
            (r, j)
        };

        let needed = boxes[top][c].vlen() + vsep;
        if extent < needed && skipped > 0 {
            let excess = (needed - extent) / skipped as f32 / 2.0;
            for j in top..end {
                if !is_rule(boxes, j) {
                    m.heights[j] += excess;
                    m.depths[j] += excess;
                }
            }
        }

        let span_total: f32 = (top..end)
            .map(|j| {
                if is_rule(boxes, j) {
                    rule
                } else {
                    m.heights[j] + m.depths[j] + vsep
                }
            })
            .sum();
        let b = &mut boxes[top][c];
        b.role = AtomType::None;
        let offset = (span_total - b.vlen()) / 2.0 + b.height - m.heights[top] - vsep / 2.0;
        offsets.insert((top, c), offset);
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::{HdotsforAtom, MultiRowAtom, MulticolumnAtom};
    use crate::boxes::BoxKind;
    use crate::test_utils::test_env;
    use mathbox_types::color::Color;

    fn grid(n: usize) -> Vec<Vec<Atom>> {
        (0..n).map(|_| (0..n).map(|_| Atom::char('x')).collect()).collect()
    }

    fn row_widths(b: &MathBox) -> Vec<f32> {
        b.children.iter().map(|r| r.width).collect()
    }

    #[test]
    fn plain_matrix_width_is_columns_plus_gaps() {
        let env = test_env();
        let s = COLUMN_SEP.to_units(&env);
        let b = MatrixAtom::from_cells(MatrixType::Array, grid(3)).create_box(&env);
        // Three 500-wide columns and two inner gaps.
        assert!((b.width - (3.0 * 500.0 + 2.0 * s)).abs() < 1e-2);
        assert!(row_widths(&b).iter().all(|w| (*w - b.width).abs() < 1e-2));

        let spaced = MatrixAtom::from_cells(MatrixType::Array, grid(3))
            .with_space_around(true)
            .create_box(&env);
        assert!((spaced.width - (3.0 * 500.0 + 3.0 * s)).abs() < 1e-2);
    }

    #[test]
    fn width_counts_vertical_rules() {
        let env = test_env();
        let s = COLUMN_SEP.to_units(&env);
        let t = env.rule_thickness();
        let rows = grid(2).into_iter().map(|r| r.into_iter().map(Some).collect()).collect();
        let b = MatrixAtom::array(rows, "|c||c|").create_box(&env);
        let rules = t + 4.0 * t + t;
        assert!((b.width - (1000.0 + s + rules)).abs() < 1e-2);
    }

    #[test]
    fn centered_on_the_axis() {
        let env = test_env();
        let b = MatrixAtom::from_cells(MatrixType::Matrix, grid(2)).create_box(&env);
        let axis = env.axis_height();
        assert!((b.height - b.depth - 2.0 * axis).abs() < 1e-2);
        // Each row: x-height plus a row gap.
        let vsep = ROW_SEP.to_units(&env);
        assert!((b.vlen() - 2.0 * (450.0 + vsep)).abs() < 1e-2);
    }

    #[test]
    fn short_rows_are_padded() {
        let env = test_env();
        let rows = vec![vec![Atom::char('a'), Atom::char('b')], vec![Atom::char('c')]];
        let b = MatrixAtom::from_cells(MatrixType::Matrix, rows).create_box(&env);
        assert_eq!(b.children[0].children.len(), 2);
        assert_eq!(b.children[1].children.len(), 2);
        assert!((b.children[0].width - b.children[1].width).abs() < 1e-2);
    }

    #[test]
    fn small_matrix_uses_script_size() {
        let env = test_env();
        let normal = MatrixAtom::from_cells(MatrixType::Matrix, grid(2)).create_box(&env);
        let small = MatrixAtom::from_cells(MatrixType::SmallMatrix, grid(2)).create_box(&env);
        assert!(small.width < normal.width);
        assert!(small.vlen() < normal.vlen());
    }

    #[test]
    fn narrow_align_never_goes_negative() {
        let mut env = test_env();
        env.set_text_width(Dimen::new(1.0, UnitType::Pt));
        let rows = vec![vec![Atom::chars("xxxx"), Atom::chars("xxxx")]];
        let b = MatrixAtom::from_cells(MatrixType::Align, rows).create_box(&env);
        let s = COLUMN_SEP.to_units(&env);
        let med = glue::named_space(SpaceType::Med, &env);
        assert!((b.width - (4000.0 + 2.0 * s + med)).abs() < 1e-2);
    }

    #[test]
    fn oversized_multicolumn_widens_its_columns() {
        let env = test_env();
        let s = COLUMN_SEP.to_units(&env);
        let wide = Atom::chars("xxxxxxxx");
        let rows = vec![
            vec![Some(Atom::Multicolumn(MulticolumnAtom::new(2, "c", wide))), None],
            vec![Some(Atom::char('a')), Some(Atom::char('b'))],
        ];
        let b = MatrixAtom::new(MatrixType::Matrix, rows).create_box(&env);
        // The spanning cell sets the width: 4000 across two columns.
        assert!((b.width - 4000.0).abs() < 1e-2);
        assert!((b.children[1].children[0].width - 2000.0).abs() < 1e-2);
        assert_eq!(b.children[0].children.len(), 1);
    }

    #[test]
    fn hdots_span_their_columns() {
        let env = test_env();
        let rows = vec![
            vec![Some(Atom::chars("xx")), Some(Atom::chars("xx")), Some(Atom::chars("xx"))],
            vec![Some(Atom::Hdotsfor(HdotsforAtom::new(3, 1.0))), None, None],
        ];
        let b = MatrixAtom::new(MatrixType::Matrix, rows).create_box(&env);
        assert!((b.children[1].width - b.children[0].width).abs() < 1e-2);
    }

    #[test]
    fn multirow_grows_short_rows() {
        let env = test_env();
        let tall = Atom::VRow(crate::atom::VRowAtom::new(vec![
            Atom::char('x'),
            Atom::char('x'),
            Atom::char('x'),
            Atom::char('x'),
        ]));
        let rows = vec![
            vec![Some(Atom::MultiRow(MultiRowAtom::new(2, tall))), Some(Atom::char('a'))],
            vec![None, Some(Atom::char('c'))],
        ];
        let b = MatrixAtom::new(MatrixType::Matrix, rows).create_box(&env);
        let vsep = ROW_SEP.to_units(&env);
        // The two rows together hold the 1800-high cell.
        assert!(b.vlen() + 1e-2 >= 1800.0 + vsep);
        let cell = &b.children[0].children[0];
        assert!(matches!(cell.kind, BoxKind::Wrapper { .. }));
        assert!(matches!(cell.children[0].kind, BoxKind::Shift { .. }));
    }

    #[test]
    fn upward_multirow_moves_to_the_top_row() {
        let env = test_env();
        let rows = vec![
            vec![None, Some(Atom::char('a'))],
            vec![Some(Atom::MultiRow(MultiRowAtom::new(-2, Atom::char('x')))), Some(Atom::char('b'))],
        ];
        let b = MatrixAtom::new(MatrixType::Matrix, rows).create_box(&env);
        let top_cell = &b.children[0].children[0];
        assert!(matches!(top_cell.children[0].kind, BoxKind::Shift { .. }));
    }

    #[test]
    fn upward_multirow_stops_at_the_first_row() {
        let env = test_env();
        let tall = || {
            Atom::VRow(crate::atom::VRowAtom::new(vec![Atom::char('x'); 4]))
        };
        let build = |cell: Option<Atom>| {
            let rows = (0..4)
                .map(|i| {
                    let first = if i == 1 { cell.clone() } else { None };
                    vec![first, Some(Atom::char('a'))]
                })
                .collect();
            MatrixAtom::new(MatrixType::Matrix, rows).create_box(&env)
        };
        let plain = build(None);
        let over = build(Some(Atom::MultiRow(MultiRowAtom::new(-5, tall()))));
        let exact = build(Some(Atom::MultiRow(MultiRowAtom::new(-2, tall()))));
        // Rows below the cell keep their natural extent.
        for i in 2..4 {
            assert!((over.children[i].vlen() - plain.children[i].vlen()).abs() < 1e-3);
        }
        // Spanning past the first row covers the same rows as an exact span.
        for i in 0..4 {
            assert!((over.children[i].vlen() - exact.children[i].vlen()).abs() < 1e-3);
        }
        assert!(over.children[0].vlen() > plain.children[0].vlen());
    }

    #[test]
    fn hlines_span_the_matrix() {
        let env = test_env();
        let mut m = MatrixAtom::from_cells(MatrixType::Array, grid(2));
        m.push_hline(HlineAtom::default());
        m.push_hline(HlineAtom::default());
        let b = m.create_box(&env);
        let rule_row = &b.children[2];
        assert!((rule_row.width - b.width).abs() < 1e-2);
        // A second rule is set off by two rule thicknesses.
        let double = &b.children[3];
        assert_eq!(double.children.len(), 2);
        assert!((double.height - 2.0 * env.rule_thickness()).abs() < 1e-3);
    }

    #[test]
    fn inter_text_and_cell_colors() {
        let env = test_env();
        let mut m = MatrixAtom::from_cells(MatrixType::Align, grid(2));
        m.push_inter_text(Atom::chars("abcdefgh"));
        m.style_cell(0, 1, vec![crate::atom::CellStyle::Background(Color::RED)]);
        let b = m.create_box(&env);
        assert!((b.children[2].width - 4000.0).abs() < 1e-2);
        match &b.children[0].children[1].kind {
            BoxKind::Wrapper { bg, .. } => assert_eq!(*bg, Some(Color::RED)),
            k => panic!("expected a cell, got {k:?}"),
        }
    }

    #[test]
    fn unbounded_inter_text_spans_the_matrix() {
        let env = test_env();
        let mut m = MatrixAtom::from_cells(MatrixType::Align, grid(2));
        m.push_inter_text(Atom::char('a'));
        let b = m.create_box(&env);
        let row = b.children[0].width;
        assert!(row > 500.0);
        assert!((b.children[2].width - row).abs() < 1e-2);
    }
}
