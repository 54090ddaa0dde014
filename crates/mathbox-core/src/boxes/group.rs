//! Horizontal and vertical lists.

use super::{BoxKind, MathBox};
use crate::types::{Alignment, AtomType};

impl MathBox {
    // -----------------------------------------------------------------------
    // HBox
    // -----------------------------------------------------------------------

    /// An empty horizontal list.
    pub fn hbox() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            depth: 0.0,
            shift: 0.0,
            role: AtomType::None,
            kind: BoxKind::HBox {
                break_positions: Vec::new(),
            },
            children: Vec::new(),
        }
    }

    pub fn hbox_of(children: impl IntoIterator<Item = MathBox>) -> Self {
        let mut hb = Self::hbox();
        for c in children {
            hb.add(c);
        }
        hb
    }

    /// Wrap `b` in an HBox of at least `width`, padding with struts on the
    /// side(s) given by `align`. Never shrinks.
    pub fn hbox_aligned(b: MathBox, width: f32, align: Alignment) -> Self {
        let rest = width - b.width;
        if !width.is_finite() || rest <= 0.0 {
            return Self::hbox_of([b]);
        }
        match align {
            Alignment::Center | Alignment::None => {
                let s = Self::strut(rest / 2.0, 0.0, 0.0, 0.0);
                Self::hbox_of([s.clone(), b, s])
            },
            Alignment::Left => Self::hbox_of([b, Self::strut(rest, 0.0, 0.0, 0.0)]),
            Alignment::Right => Self::hbox_of([Self::strut(rest, 0.0, 0.0, 0.0), b]),
            _ => Self::hbox_of([b]),
        }
    }

    fn recalc_h(&mut self, b: &MathBox) {
        let first = self.children.is_empty();
        self.width += b.width;
        let h = if first { f32::NEG_INFINITY } else { self.height };
        self.height = h.max(b.height - b.shift);
        let d = if first { f32::NEG_INFINITY } else { self.depth };
        self.depth = d.max(b.depth + b.shift);
    }

    // -----------------------------------------------------------------------
    // VBox
    // -----------------------------------------------------------------------

    /// An empty vertical list.
    pub fn vbox() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            depth: 0.0,
            shift: 0.0,
            role: AtomType::None,
            kind: BoxKind::VBox {
                leftmost: f32::MAX,
                rightmost: f32::MIN,
            },
            children: Vec::new(),
        }
    }

    pub fn vbox_of(children: impl IntoIterator<Item = MathBox>) -> Self {
        let mut vb = Self::vbox();
        for c in children {
            vb.add(c);
        }
        vb
    }

    /// Wrap `b` in a VBox with `rest` extra vertical space distributed by
    /// `align` (top puts the space below, bottom above).
    pub fn vbox_aligned(b: MathBox, rest: f32, align: Alignment) -> Self {
        let mut vb = Self::vbox_of([b]);
        match align {
            Alignment::Center => {
                let s = Self::strut(0.0, rest / 2.0, 0.0, 0.0);
                vb.children.insert(0, s.clone());
                vb.children.push(s);
                vb.height += rest / 2.0;
                vb.depth += rest / 2.0;
            },
            Alignment::Top => {
                vb.depth += rest;
                vb.children.push(Self::strut(0.0, rest, 0.0, 0.0));
            },
            Alignment::Bottom => {
                vb.height += rest;
                vb.children.insert(0, Self::strut(0.0, rest, 0.0, 0.0));
            },
            _ => {},
        }
        vb
    }

    fn recalc_v_width(&mut self, b: &MathBox) {
        if let BoxKind::VBox {
            leftmost,
            rightmost,
        } = &mut self.kind
        {
            *leftmost = leftmost.min(b.shift);
            *rightmost = rightmost.max(b.shift + b.width.max(0.0));
            self.width = *rightmost - *leftmost;
        }
    }

    /// Offset of the leftmost child in a VBox.
    pub fn leftmost(&self) -> f32 {
        match self.kind {
            BoxKind::VBox { leftmost, .. } if !self.children.is_empty() => leftmost,
            _ => 0.0,
        }
    }

    /// Append to a VBox, inserting an `interline` strut before every child
    /// but the first.
    pub fn add_spaced(&mut self, b: MathBox, interline: f32) {
        if !self.children.is_empty() {
            self.add(Self::strut(0.0, interline, 0.0, 0.0));
        }
        self.add(b);
    }

    /// A rule above `b` separated by `kern`, with `thickness` of clearance
    /// on top.
    pub fn over_bar(b: MathBox, kern: f32, thickness: f32) -> Self {
        let width = b.width;
        Self::vbox_of([
            Self::strut(0.0, thickness, 0.0, 0.0),
            Self::rule(thickness, width, 0.0),
            Self::strut(0.0, kern, 0.0, 0.0),
            b,
        ])
    }

    // -----------------------------------------------------------------------
    // Shared list operations
    // -----------------------------------------------------------------------

    /// Append a child, updating the list's metrics.
    ///
    /// Any non-VBox receiver is treated as a horizontal list.
    pub fn add(&mut self, b: MathBox) {
        if self.is_vbox() {
            if self.children.is_empty() {
                self.height = b.height;
                self.depth = b.depth;
            } else {
                self.depth += b.height + b.depth;
            }
            self.recalc_v_width(&b);
        } else {
            self.recalc_h(&b);
        }
        self.children.push(b);
    }

    /// Insert a child at `pos`. In a VBox, inserting at 0 moves the
    /// baseline to the new first child.
    pub fn insert(&mut self, pos: usize, b: MathBox) {
        let pos = pos.min(self.children.len());
        if self.is_vbox() {
            if pos == 0 {
                self.depth += b.depth + self.height;
                self.height = b.height;
            } else {
                self.depth += b.height + b.depth;
            }
            self.recalc_v_width(&b);
        } else {
            self.recalc_h(&b);
        }
        self.children.insert(pos, b);
    }

    pub fn add_break_position(&mut self, pos: usize) {
        if let BoxKind::HBox { break_positions } = &mut self.kind {
            break_positions.push(pos);
        }
    }

    pub fn break_positions(&self) -> &[usize] {
        match &self.kind {
            BoxKind::HBox { break_positions } => break_positions,
            _ => &[],
        }
    }

    /// Split an HBox after `pos`: the first part holds `children[..=pos]`,
    /// the second `children[pos + shift..]`. Children in between are
    /// dropped. Break positions inside the second part (other than its
    /// very start) are rebased onto it.
    pub fn split(&self, pos: usize, shift: usize) -> (MathBox, MathBox) {
        let mut first = Self::hbox().with_shift(self.shift);
        let mut second = Self::hbox().with_shift(self.shift);
        let n = self.children.len();
        for c in &self.children[..(pos + 1).min(n)] {
            first.add(c.clone());
        }
        for c in &self.children[(pos + shift).min(n)..] {
            second.add(c.clone());
        }
        for &bp in self.break_positions() {
            if bp > pos + shift {
                second.add_break_position(bp - pos - shift);
            }
        }
        (first, second)
    }

    /// Split after `pos`, dropping the child right after the cut.
    pub fn split_remove(&self, pos: usize) -> (MathBox, MathBox) {
        self.split(pos, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn s(w: f32, h: f32, d: f32, shift: f32) -> MathBox {
        MathBox::strut(w, h, d, shift)
    }

    #[test]
    fn empty_hbox_is_zero() {
        let hb = MathBox::hbox();
        assert_eq!((hb.width, hb.height, hb.depth), (0.0, 0.0, 0.0));
    }

    #[test]
    fn hbox_shift_moves_extents() {
        let hb = MathBox::hbox_of([s(1.0, 5.0, 1.0, 0.0), s(2.0, 3.0, 1.0, 2.0)]);
        assert_eq!(hb.width, 3.0);
        assert_eq!(hb.height, 5.0);
        assert_eq!(hb.depth, 3.0);
    }

    #[test]
    fn aligned_hbox_pads_but_never_shrinks() {
        let b = s(10.0, 1.0, 0.0, 0.0);
        let c = MathBox::hbox_aligned(b.clone(), 30.0, Alignment::Center);
        assert_eq!(c.width, 30.0);
        assert_eq!(c.children.len(), 3);
        assert_eq!(c.children[0].width, 10.0);

        let l = MathBox::hbox_aligned(b.clone(), 30.0, Alignment::Left);
        assert_eq!(l.children[1].width, 20.0);
        let r = MathBox::hbox_aligned(b.clone(), 30.0, Alignment::Right);
        assert_eq!(r.children[0].width, 20.0);

        let narrow = MathBox::hbox_aligned(b.clone(), 5.0, Alignment::Center);
        assert_eq!(narrow.width, 10.0);
        let inf = MathBox::hbox_aligned(b, f32::INFINITY, Alignment::Center);
        assert_eq!(inf.children.len(), 1);
    }

    #[test]
    fn vbox_baseline_is_first_child() {
        let mut vb = MathBox::vbox();
        vb.add(s(4.0, 3.0, 1.0, 0.0));
        vb.add_spaced(s(6.0, 2.0, 2.0, 0.0), 5.0);
        assert_eq!(vb.height, 3.0);
        assert_eq!(vb.depth, 1.0 + 5.0 + 4.0);
        assert_eq!(vb.width, 6.0);
        assert_eq!(vb.children.len(), 3);
    }

    #[test]
    fn vbox_width_spans_shifted_children() {
        let vb = MathBox::vbox_of([s(4.0, 1.0, 0.0, -2.0), s(3.0, 1.0, 0.0, 3.0)]);
        assert_eq!(vb.leftmost(), -2.0);
        assert_eq!(vb.width, 8.0);
    }

    #[test]
    fn vbox_insert_at_front_moves_baseline() {
        let mut vb = MathBox::vbox_of([s(1.0, 3.0, 1.0, 0.0)]);
        vb.insert(0, s(1.0, 2.0, 0.5, 0.0));
        assert_eq!(vb.height, 2.0);
        assert_eq!(vb.depth, 0.5 + 3.0 + 1.0);
    }

    #[test]
    fn vbox_aligned_center_splits_rest() {
        let vb = MathBox::vbox_aligned(s(1.0, 2.0, 1.0, 0.0), 4.0, Alignment::Center);
        assert_eq!(vb.height, 4.0);
        assert_eq!(vb.depth, 3.0);
        assert_eq!(vb.children.len(), 3);
    }

    #[test]
    fn over_bar_stacks_rule_and_kern() {
        let b = MathBox::over_bar(s(10.0, 5.0, 2.0, 0.0), 3.0, 1.0);
        assert_eq!(b.height, 1.0);
        assert!((b.vlen() - (1.0 + 1.0 + 3.0 + 7.0)).abs() < 1e-6);
        assert_eq!(b.width, 10.0);
    }

    #[test]
    fn split_rebases_break_positions() {
        let mut hb = MathBox::hbox_of((0..6).map(|i| s(i as f32 + 1.0, 1.0, 0.0, 0.0)));
        hb.add_break_position(2);
        hb.add_break_position(4);
        let (a, b) = hb.split(1, 1);
        assert_eq!(a.children.len(), 2);
        assert_eq!(b.children.len(), 4);
        assert_eq!(b.break_positions(), &[2]);

        let (a, b) = hb.split_remove(1);
        assert_eq!(a.width, 3.0);
        assert_eq!(b.children.len(), 3);
        assert_eq!(b.children[0].width, 4.0);
        assert_eq!(b.break_positions(), &[1]);
    }

    fn strut_strategy() -> impl Strategy<Value = MathBox> {
        (0.0f32..100.0, 0.0f32..50.0, 0.0f32..50.0, -20.0f32..20.0)
            .prop_map(|(w, h, d, sh)| MathBox::strut(w, h, d, sh))
    }

    proptest! {
        #[test]
        fn hbox_metrics_are_sum_and_max(children in prop::collection::vec(strut_strategy(), 1..12)) {
            let hb = MathBox::hbox_of(children.clone());
            let w: f32 = children.iter().map(|c| c.width).sum();
            let h = children.iter().map(|c| c.height - c.shift).fold(f32::NEG_INFINITY, f32::max);
            let d = children.iter().map(|c| c.depth + c.shift).fold(f32::NEG_INFINITY, f32::max);
            prop_assert!((hb.width - w).abs() < 1e-3);
            prop_assert!((hb.height - h).abs() < 1e-4);
            prop_assert!((hb.depth - d).abs() < 1e-4);
        }

        #[test]
        fn vbox_extent_is_sum_of_children(
            children in prop::collection::vec(strut_strategy(), 1..10),
            interline in 0.0f32..10.0,
        ) {
            let mut vb = MathBox::vbox();
            for c in children.clone() {
                vb.add_spaced(c, interline);
            }
            let total: f32 = children.iter().map(|c| c.vlen()).sum::<f32>()
                + interline * (children.len() - 1) as f32;
            prop_assert!((vb.vlen() - total).abs() < 1e-2);
            prop_assert_eq!(vb.height, children[0].height);
        }
    }
}
