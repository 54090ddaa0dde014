//! Arrays, matrices and the `align` family.
//!
//! A [`MatrixAtom`] is a grid of optional cells. Layout boxes every cell,
//! sizes rows and columns from the non-spanning cells, computes the
//! inter-column gaps for its [`MatrixType`], widens columns under
//! oversized `\multicolumn` cells, resolves `\multirow` spans and finally
//! stacks one HBox per row, centered on the math axis.

mod columns;
mod layout;
mod multline;
mod span;

use std::collections::{BTreeMap, BTreeSet};

use super::{Atom, HlineAtom};
use crate::types::Alignment;

pub use columns::{CellStyle, ColumnItem, MatrixType, parse as parse_columns};
pub use multline::{MultlineAtom, MultlineType};
pub use span::{HdotsforAtom, MultiRowAtom, MulticolumnAtom};

#[derive(Debug, Clone, Default)]
pub struct MatrixAtom {
    pub kind: MatrixType,
    /// Cells by row. Rows may be shorter than the widest one.
    pub rows: Vec<Vec<Option<Atom>>>,
    /// Explicit column alignments; missing columns fall back to the kind's
    /// default. `Alignment::None` marks a literal `@{...}` column.
    pub positions: Vec<Alignment>,
    /// Number of vertical rules at each column boundary.
    pub vlines: BTreeMap<usize, usize>,
    /// Literal columns spliced into every row, in insertion order.
    pub inserts: Vec<(usize, Atom)>,
    pub column_styles: BTreeMap<usize, Vec<CellStyle>>,
    pub row_styles: BTreeMap<usize, Vec<CellStyle>>,
    pub cell_styles: BTreeMap<(usize, usize), Vec<CellStyle>>,
    /// Rows holding `\intertext`, set across the text width.
    pub inter_text: BTreeSet<usize>,
    /// Half a column gap on the outer edges of an array.
    pub space_around: bool,
}

impl MatrixAtom {
    pub fn new(kind: MatrixType, rows: Vec<Vec<Option<Atom>>>) -> Self {
        Self {
            kind,
            rows,
            ..Self::default()
        }
    }

    /// An `array` with the given preamble.
    pub fn array(rows: Vec<Vec<Option<Atom>>>, preamble: &str) -> Self {
        Self::new(MatrixType::Array, rows).with_columns(parse_columns(preamble))
    }

    /// Convenience for a grid without empty cells.
    pub fn from_cells(kind: MatrixType, rows: Vec<Vec<Atom>>) -> Self {
        let rows = rows.into_iter().map(|r| r.into_iter().map(Some).collect()).collect();
        Self::new(kind, rows)
    }

    pub fn with_space_around(mut self, on: bool) -> Self {
        self.space_around = on;
        self
    }

    /// Apply a parsed preamble.
    pub fn with_columns(mut self, items: impl IntoIterator<Item = ColumnItem>) -> Self {
        self.positions.clear();
        for item in items {
            let col = self.positions.len();
            match item {
                ColumnItem::Align(a) => self.positions.push(a),
                ColumnItem::Vlines(n) => {
                    *self.vlines.entry(col).or_default() += n;
                },
                ColumnItem::Insert(atom) => {
                    self.inserts.push((col, atom));
                    self.positions.push(Alignment::None);
                },
                ColumnItem::Style(styles) => {
                    self.column_styles.entry(col).or_default().extend(styles);
                },
            }
        }
        self
    }

    pub fn push_row(&mut self, cells: Vec<Option<Atom>>) {
        self.rows.push(cells);
    }

    /// A horizontal rule across the whole matrix.
    pub fn push_hline(&mut self, hline: HlineAtom) {
        self.rows.push(vec![Some(Atom::Hline(hline))]);
    }

    /// A line of text between rows, outside the column grid.
    pub fn push_inter_text(&mut self, atom: Atom) {
        self.inter_text.insert(self.rows.len());
        self.rows.push(vec![Some(atom)]);
    }

    pub fn style_row(&mut self, row: usize, styles: Vec<CellStyle>) {
        self.row_styles.entry(row).or_default().extend(styles);
    }

    pub fn style_cell(&mut self, row: usize, col: usize, styles: Vec<CellStyle>) {
        self.cell_styles.entry((row, col)).or_default().extend(styles);
    }

    fn is_rule_row(&self, row: usize) -> bool {
        matches!(self.rows.get(row).and_then(|r| r.first()), Some(Some(Atom::Hline(_))))
    }

    /// Rows with the literal columns spliced in.
    fn cells(&self) -> Vec<Vec<Option<&Atom>>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut cells: Vec<Option<&Atom>> = row.iter().map(Option::as_ref).collect();
                if !self.is_rule_row(i) && !self.inter_text.contains(&i) {
                    for (col, atom) in &self.inserts {
                        if cells.len() < *col {
                            cells.resize(*col, None);
                        }
                        cells.insert(*col, Some(atom));
                    }
                }
                cells
            })
            .collect()
    }

    /// Alignment of column `j`.
    pub fn position(&self, j: usize) -> Alignment {
        if let Some(a) = self.positions.get(j) {
            return *a;
        }
        match self.kind {
            MatrixType::Array | MatrixType::Matrix | MatrixType::SmallMatrix => Alignment::Center,
            // Equation pairs: right-aligned left halves, left-aligned right
            // halves.
            _ if j % 2 == 0 => Alignment::Right,
            _ => Alignment::Left,
        }
    }

    /// Styles for the cell at `(i, j)`: column, then row, then cell.
    fn styles_for(&self, i: usize, j: usize) -> impl Iterator<Item = &CellStyle> {
        let empty: &[CellStyle] = &[];
        let column = self.column_styles.get(&j).map_or(empty, Vec::as_slice);
        let row = self.row_styles.get(&i).map_or(empty, Vec::as_slice);
        let cell = self.cell_styles.get(&(i, j)).map_or(empty, Vec::as_slice);
        column.iter().chain(row).chain(cell)
    }
}
