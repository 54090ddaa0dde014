//! Small enums shared by atoms, boxes and the glue table.

/// Classification of an atom for spacing purposes.
///
/// The first eight variants index the glue table. The rest are roles used
/// by matrix post-processing and count as ordinary for spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AtomType {
    #[default]
    Ordinary,
    BigOperator,
    BinaryOperator,
    Relation,
    Opening,
    Closing,
    Punctuation,
    Inner,
    Accent,
    OverUnder,
    InterText,
    MultiColumn,
    Hline,
    MultiRow,
    None,
}

impl AtomType {
    /// Row index into the glue table; anything past `Inner` is ordinary.
    pub fn glue_index(self) -> Option<usize> {
        match self {
            AtomType::None => None,
            AtomType::Ordinary => Some(0),
            AtomType::BigOperator => Some(1),
            AtomType::BinaryOperator => Some(2),
            AtomType::Relation => Some(3),
            AtomType::Opening => Some(4),
            AtomType::Closing => Some(5),
            AtomType::Punctuation => Some(6),
            AtomType::Inner => Some(7),
            _ => Some(0),
        }
    }
}

/// Placement of scripts on big operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LimitsType {
    /// Limits in display style, scripts otherwise.
    #[default]
    Normal,
    NoLimits,
    Limits,
}

/// Horizontal or vertical alignment of a box inside extra space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    Left,
    Right,
    Center,
    Top,
    Bottom,
    #[default]
    None,
}

impl From<mathbox_types::config::Align> for Alignment {
    fn from(a: mathbox_types::config::Align) -> Self {
        match a {
            mathbox_types::config::Align::Left => Alignment::Left,
            mathbox_types::config::Align::Center => Alignment::Center,
            mathbox_types::config::Align::Right => Alignment::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_count_as_ordinary() {
        assert_eq!(AtomType::Accent.glue_index(), Some(0));
        assert_eq!(AtomType::Hline.glue_index(), Some(0));
        assert_eq!(AtomType::Inner.glue_index(), Some(7));
        assert_eq!(AtomType::None.glue_index(), None);
    }
}
