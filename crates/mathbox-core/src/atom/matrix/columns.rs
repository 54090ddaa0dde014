//! Column specifications (`{l|cc@{\,}r}`) and inter-column separators.

use mathbox_types::color::Color;

use crate::atom::Atom;
use crate::boxes::{BoxKind, MathBox};
use crate::env::Environment;
use crate::registry;
use crate::types::Alignment;

/// Repeats and aliases expanded per preamble.
pub const MAX_EXPANSIONS: usize = 64;
/// Upper bound on the expanded preamble, in chars.
pub const MAX_PREAMBLE_LEN: usize = 4096;

/// A decoration applied to the wrapper cell of a matrix entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Background(Color),
    Foreground(Color),
}

impl CellStyle {
    pub(crate) fn apply(self, cell: &mut MathBox) {
        if let BoxKind::Wrapper { fg, bg, .. } = &mut cell.kind {
            match self {
                CellStyle::Background(c) => *bg = Some(c),
                CellStyle::Foreground(c) => *fg = Some(c),
            }
        }
    }

    /// Read `\cellcolor{..}`, `\columncolor{..}`, `\rowcolor{..}` and
    /// `\color{..}` directives. Unknown colors are skipped.
    pub fn parse_list(src: &str) -> Vec<CellStyle> {
        let chars: Vec<char> = src.chars().collect();
        let mut styles = Vec::new();
        let mut pos = 0;
        while pos < chars.len() {
            if chars[pos] != '\\' {
                pos += 1;
                continue;
            }
            let start = pos + 1;
            let mut end = start;
            while end < chars.len() && chars[end].is_ascii_alphabetic() {
                end += 1;
            }
            let command: String = chars[start..end].iter().collect();
            let Some((arg, next)) = brace_group(&chars, end) else {
                pos = end.max(start);
                continue;
            };
            pos = next;
            let Some(color) = registry::color(arg.trim()) else {
                log::warn!("unknown cell color: {arg}");
                continue;
            };
            match command.as_str() {
                "cellcolor" | "columncolor" | "rowcolor" => styles.push(CellStyle::Background(color)),
                "color" => styles.push(CellStyle::Foreground(color)),
                _ => {},
            }
        }
        styles
    }
}

/// One directive of a column specification.
#[derive(Debug, Clone)]
pub enum ColumnItem {
    Align(Alignment),
    /// `n` vertical rules before the next column.
    Vlines(usize),
    /// A literal column repeated on every row (`@{...}`).
    Insert(Atom),
    /// Styles for every cell of the next column (`>{...}`).
    Style(Vec<CellStyle>),
}

/// Read the brace group starting at `pos`, skipping leading blanks.
/// Returns its content and the index just past the closing brace.
fn brace_group(chars: &[char], mut pos: usize) -> Option<(String, usize)> {
    while pos < chars.len() && chars[pos].is_whitespace() {
        pos += 1;
    }
    if chars.get(pos) != Some(&'{') {
        // A single token stands for itself.
        return chars.get(pos).map(|c| (c.to_string(), pos + 1));
    }
    let mut depth = 0usize;
    for (i, &c) in chars.iter().enumerate().skip(pos) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((chars[pos + 1..i].iter().collect(), i + 1));
                }
            },
            _ => {},
        }
    }
    None
}

/// Parse an array preamble. `*{n}{..}` repeats are expanded in place and
/// names registered with [`registry::define_column_type`] are replaced by
/// their definitions; any other unknown letter is a centered column.
///
/// At most [`MAX_EXPANSIONS`] repeats and aliases are expanded and the
/// expanded preamble is kept under [`MAX_PREAMBLE_LEN`] chars, so a
/// self-referencing `\newcolumntype` still terminates.
pub fn parse(spec: &str) -> Vec<ColumnItem> {
    let mut chars: Vec<char> = spec.chars().collect();
    let mut items = Vec::new();
    let mut pos = 0;
    let mut expansions = 0;
    while pos < chars.len() {
        match chars[pos] {
            'l' => items.push(ColumnItem::Align(Alignment::Left)),
            'r' => items.push(ColumnItem::Align(Alignment::Right)),
            'c' => items.push(ColumnItem::Align(Alignment::Center)),
            '|' => {
                let mut n = 1;
                while chars.get(pos + 1) == Some(&'|') {
                    n += 1;
                    pos += 1;
                }
                items.push(ColumnItem::Vlines(n));
            },
            '@' => {
                if let Some((content, next)) = brace_group(&chars, pos + 1) {
                    items.push(ColumnItem::Insert(Atom::chars(&content)));
                    pos = next;
                    continue;
                }
            },
            '>' => {
                if let Some((content, next)) = brace_group(&chars, pos + 1) {
                    items.push(ColumnItem::Style(CellStyle::parse_list(&content)));
                    pos = next;
                    continue;
                }
            },
            '*' => {
                let Some((count, next)) = brace_group(&chars, pos + 1) else {
                    break;
                };
                let Some((body, next)) = brace_group(&chars, next) else {
                    break;
                };
                let n: usize = count.trim().parse().unwrap_or(0);
                let len = body.chars().count().checked_mul(n);
                let fits = len.is_some_and(|l| chars.len() - (next - pos) + l <= MAX_PREAMBLE_LEN);
                if expansions >= MAX_EXPANSIONS || !fits {
                    log::warn!("column repeat *{{{n}}} too large, dropped");
                    chars.drain(pos..next);
                    continue;
                }
                expansions += 1;
                let expanded: Vec<char> = body.repeat(n).chars().collect();
                chars.splice(pos..next, expanded);
                continue;
            },
            c if c.is_whitespace() => {},
            _ => {
                let rest: String = chars[pos..].iter().collect();
                match longest_alias(&rest) {
                    Some((len, replacement))
                        if expansions < MAX_EXPANSIONS
                            && chars.len() - len + replacement.chars().count() <= MAX_PREAMBLE_LEN =>
                    {
                        expansions += 1;
                        chars.splice(pos..pos + len, replacement.chars());
                        continue;
                    },
                    Some((len, _)) => {
                        let name: String = rest.chars().take(len).collect();
                        log::warn!("column type {name} expands too deeply, using a centered column");
                        items.push(ColumnItem::Align(Alignment::Center));
                        pos += len;
                        continue;
                    },
                    None => items.push(ColumnItem::Align(Alignment::Center)),
                }
            },
        }
        pos += 1;
    }
    items
}

/// The longest registered column type that prefixes `rest`, by char count.
fn longest_alias(rest: &str) -> Option<(usize, String)> {
    let ends: Vec<usize> = rest.char_indices().map(|(i, c)| i + c.len_utf8()).collect();
    ends.iter()
        .enumerate()
        .rev()
        .find_map(|(n, &end)| registry::column_type(&rest[..end]).map(|r| (n + 1, r)))
}

// ---------------------------------------------------------------------------
// Separators
// ---------------------------------------------------------------------------

/// Which gap formula a matrix uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixType {
    #[default]
    Array,
    Matrix,
    SmallMatrix,
    Align,
    AlignAt,
    FlAlign,
    Aligned,
    AlignedAt,
}

/// Gaps between columns, `cols + 1` entries with the outer edges first and
/// last. `content` is the summed column width and `column_sep` the fixed
/// inter-column glue; `align_sep` separates the halves of an equation pair.
pub(crate) fn separators(
    kind: MatrixType,
    positions: &[Alignment],
    space_around: bool,
    content: f32,
    column_sep: f32,
    align_sep: f32,
    text_width: f32,
) -> Vec<f32> {
    let cols = positions.len();
    let mut arr = vec![0.0; cols + 1];
    let width = match kind {
        MatrixType::Aligned | MatrixType::AlignedAt => f32::INFINITY,
        _ => text_width,
    };
    let pairs = (cols / 2) as f32;

    match kind {
        MatrixType::Array => {
            for gap in arr.iter_mut().take(cols).skip(1) {
                *gap = column_sep;
            }
            // Literal columns sit flush against their neighbours.
            for (i, pos) in positions.iter().enumerate() {
                if *pos == Alignment::None {
                    arr[i] = 0.0;
                    arr[i + 1] = 0.0;
                }
            }
            if space_around {
                if positions.first().is_some_and(|p| *p != Alignment::None) {
                    arr[0] = column_sep / 2.0;
                }
                if positions.last().is_some_and(|p| *p != Alignment::None) {
                    arr[cols] = column_sep / 2.0;
                }
            }
            return arr;
        },
        MatrixType::Matrix | MatrixType::SmallMatrix => {
            for gap in arr.iter_mut().take(cols).skip(1) {
                *gap = column_sep;
            }
            return arr;
        },
        MatrixType::Align | MatrixType::Aligned => {
            let sep = spread(width, content, pairs * align_sep, ((cols + 3) / 2) as f32, column_sep);
            for (i, gap) in arr.iter_mut().enumerate().take(cols) {
                *gap = if i % 2 == 0 { sep } else { align_sep };
            }
            arr[cols] = sep;
        },
        MatrixType::AlignAt | MatrixType::AlignedAt => {
            let edge = if width.is_finite() {
                ((width - content) / 2.0).max(0.0)
            } else {
                0.0
            };
            for (i, gap) in arr.iter_mut().enumerate().take(cols).skip(1) {
                *gap = if i % 2 == 0 { 0.0 } else { align_sep };
            }
            arr[0] = edge;
            arr[cols] = edge;
        },
        MatrixType::FlAlign => {
            let sep = spread(width, content, pairs * align_sep, (cols.saturating_sub(1) / 2) as f32, column_sep);
            for (i, gap) in arr.iter_mut().enumerate().take(cols).skip(1) {
                *gap = if i % 2 == 0 { sep } else { align_sep };
            }
        },
    }

    if !width.is_finite() {
        arr[0] = 0.0;
        arr[cols] = 0.0;
    }
    arr
}

/// Share the room left on a line between `slots` gaps. Falls back to
/// `fallback` when the line is unbounded or already full.
fn spread(width: f32, content: f32, fixed: f32, slots: f32, fallback: f32) -> f32 {
    if !width.is_finite() || slots <= 0.0 {
        return fallback;
    }
    let gap = (width - content - fixed) / slots;
    if gap > 0.0 { gap } else { fallback }
}

/// Width of `n` vertical rules: rules of the default thickness two rules
/// apart.
pub(crate) fn vlines_width(n: usize, env: &Environment) -> f32 {
    if n == 0 {
        return 0.0;
    }
    env.rule_thickness() * (3 * n - 2) as f32
}

/// `n` vertical rules spanning a row of the given extent.
pub(crate) fn vlines_box(n: usize, height: f32, shift: f32, env: &Environment) -> MathBox {
    let t = env.rule_thickness();
    let mut hb = MathBox::hbox();
    for i in 0..n {
        if i > 0 {
            hb.add(MathBox::strut(2.0 * t, 0.0, 0.0, 0.0));
        }
        hb.add(MathBox::rule(height, t, shift));
    }
    hb
}
