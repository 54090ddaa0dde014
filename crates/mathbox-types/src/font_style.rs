//! Font style flags shared by the layout engine and rendering backends.

/// A set of font style flags (roman, bold, italic, ...).
///
/// Styles compose: `BF | IT` is bold italic. An empty set means "not
/// specified", letting the font pick its default face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontStyle(u16);

impl FontStyle {
    pub const NONE: Self = Self(0);
    pub const RM: Self = Self(0x0001);
    pub const BF: Self = Self(0x0002);
    pub const IT: Self = Self(0x0004);
    pub const SF: Self = Self(0x0008);
    pub const TT: Self = Self(0x0010);
    pub const CAL: Self = Self(0x0020);
    pub const FRAK: Self = Self(0x0040);
    pub const BB: Self = Self(0x0080);
    pub const SC: Self = Self(0x0100);

    pub const BFIT: Self = Self(Self::BF.0 | Self::IT.0);
    pub const BFCAL: Self = Self(Self::BF.0 | Self::CAL.0);
    pub const BFFRAK: Self = Self(Self::BF.0 | Self::FRAK.0);
    pub const SFBF: Self = Self(Self::SF.0 | Self::BF.0);
    pub const SFIT: Self = Self(Self::SF.0 | Self::IT.0);
    pub const SFBFIT: Self = Self(Self::SF.0 | Self::BF.0 | Self::IT.0);

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn is_bold(self) -> bool {
        self.contains(Self::BF)
    }

    pub const fn is_italic(self) -> bool {
        self.contains(Self::IT)
    }

    /// Reduce a composed style to the closest style a font is likely to
    /// provide: a single flag, or the best-matching composed style.
    pub fn closest(self) -> Self {
        let mut x = self.0;
        if x <= 1 {
            return self;
        }
        // roman combined with anything else is just the other style
        x &= !Self::RM.0;
        if x & (x - 1) == 0 {
            return Self(x);
        }
        const COMPOSED: [FontStyle; 6] = [
            FontStyle::BFIT,
            FontStyle::BFCAL,
            FontStyle::BFFRAK,
            FontStyle::SFBF,
            FontStyle::SFIT,
            FontStyle::SFBFIT,
        ];
        let mut best = Self::NONE;
        let mut similarity = 0;
        for style in COMPOSED {
            let n = (x & style.0).count_ones();
            if n > similarity {
                best = style;
                similarity = n;
            }
        }
        best
    }
}

impl std::ops::BitOr for FontStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_and_contains() {
        let s = FontStyle::BF | FontStyle::IT;
        assert_eq!(s, FontStyle::BFIT);
        assert!(s.is_bold());
        assert!(s.is_italic());
        assert!(!s.contains(FontStyle::SF));
    }

    #[test]
    fn empty_never_contains() {
        assert!(!FontStyle::NONE.contains(FontStyle::NONE));
        assert!(FontStyle::NONE.is_empty());
    }

    #[test]
    fn closest_drops_roman() {
        assert_eq!((FontStyle::RM | FontStyle::BF).closest(), FontStyle::BF);
        assert_eq!(FontStyle::RM.closest(), FontStyle::RM);
    }

    #[test]
    fn closest_picks_composed() {
        let s = FontStyle::SF | FontStyle::BF | FontStyle::IT;
        assert_eq!(s.closest(), FontStyle::SFBFIT);
        let s = FontStyle::BF | FontStyle::CAL;
        assert_eq!(s.closest(), FontStyle::BFCAL);
    }
}
