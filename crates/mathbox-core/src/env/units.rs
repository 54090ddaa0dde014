//! Length units and their conversion to layout units.
//!
//! Layout units are font design units at the current style scale, so
//! `em` converts to `upem * scale`. Physical units go through the text
//! size: one point is `upem / text_size` units at 72 dpi.

use std::fmt;

use super::Environment;

/// A TeX length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnitType {
    /// Already in layout units.
    #[default]
    None,
    Em,
    Ex,
    Pixel,
    /// PostScript (big) point, `bp`.
    Point,
    Pica,
    Mu,
    Cm,
    Mm,
    In,
    Sp,
    /// Printer's point, `pt`.
    Pt,
    Dd,
    Cc,
    /// Default rule thickness.
    Tt,
}

// Sorted by name for binary search.
const UNIT_NAMES: [(&str, UnitType); 16] = [
    ("bp", UnitType::Point),
    ("cc", UnitType::Cc),
    ("cm", UnitType::Cm),
    ("dd", UnitType::Dd),
    ("em", UnitType::Em),
    ("ex", UnitType::Ex),
    ("in", UnitType::In),
    ("mm", UnitType::Mm),
    ("mu", UnitType::Mu),
    ("pc", UnitType::Pica),
    ("pica", UnitType::Pica),
    ("pix", UnitType::Pixel),
    ("pixel", UnitType::Pixel),
    ("pt", UnitType::Pt),
    ("px", UnitType::Pixel),
    ("sp", UnitType::Sp),
];

impl UnitType {
    /// Look up a unit by (lowercase) name. Unknown names are pixels.
    pub fn from_name(name: &str) -> Self {
        UNIT_NAMES
            .binary_search_by(|(n, _)| n.cmp(&name))
            .map_or(UnitType::Pixel, |i| UNIT_NAMES[i].1)
    }

    /// How many layout units one of this unit is worth in `env`.
    pub fn factor(self, env: &Environment) -> f32 {
        let pt = env.pixels_per_point() * env.upem() / env.text_size();
        match self {
            UnitType::None => 1.0,
            UnitType::Em => env.em(),
            UnitType::Ex => env.x_height(),
            UnitType::Pixel => pt / env.pixels_per_point(),
            UnitType::Point => pt,
            UnitType::Pica => 12.0 * pt,
            UnitType::Mu => env.em() / 18.0,
            UnitType::Cm => 28.346_457 * pt,
            UnitType::Mm => 2.834_645_7 * pt,
            UnitType::In => 72.0 * pt,
            UnitType::Sp => 65536.0 * pt,
            UnitType::Pt => 0.996_264 * pt,
            UnitType::Dd => 1.066_035 * pt,
            UnitType::Cc => 12.792_419 * pt,
            UnitType::Tt => env.rule_thickness(),
        }
    }
}

/// A length with a unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimen {
    pub value: f32,
    pub unit: UnitType,
}

impl Dimen {
    pub const ZERO: Dimen = Dimen {
        value: 0.0,
        unit: UnitType::None,
    };

    pub const fn new(value: f32, unit: UnitType) -> Self {
        Self { value, unit }
    }

    pub const fn em(value: f32) -> Self {
        Self::new(value, UnitType::Em)
    }

    pub const fn mu(value: f32) -> Self {
        Self::new(value, UnitType::Mu)
    }

    /// Parse a length such as `"2.5em"`, `"-3 mu"` or `"12"`.
    ///
    /// The numeric prefix is everything up to the first letter; a missing
    /// unit means pixels, an unknown unit too. An empty string is zero.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return Self::ZERO;
        }
        let split = s
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let value = s[..split].trim().parse::<f32>().unwrap_or(0.0);
        let unit = if split == s.len() {
            UnitType::Pixel
        } else {
            UnitType::from_name(&s[split..].trim().to_ascii_lowercase())
        };
        Self { value, unit }
    }

    pub fn to_units(self, env: &Environment) -> f32 {
        if self.unit == UnitType::None {
            return self.value;
        }
        self.value * self.unit.factor(env)
    }

    pub fn negated(self) -> Self {
        Self::new(-self.value, self.unit)
    }
}

impl fmt::Display for Dimen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = UNIT_NAMES
            .iter()
            .find(|(_, u)| *u == self.unit)
            .map_or("", |(n, _)| n);
        write!(f, "{}{}", self.value, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_env;

    #[test]
    fn names_are_sorted() {
        for w in UNIT_NAMES.windows(2) {
            assert!(w[0].0 < w[1].0);
        }
    }

    #[test]
    fn parse_value_and_unit() {
        assert_eq!(Dimen::parse("2.5em"), Dimen::new(2.5, UnitType::Em));
        assert_eq!(Dimen::parse("-3 MU"), Dimen::new(-3.0, UnitType::Mu));
        assert_eq!(Dimen::parse("12"), Dimen::new(12.0, UnitType::Pixel));
        assert_eq!(Dimen::parse("1furlong").unit, UnitType::Pixel);
        assert_eq!(Dimen::parse(""), Dimen::ZERO);
        assert_eq!(Dimen::parse("1bp").unit, UnitType::Point);
        assert_eq!(Dimen::parse("1pt").unit, UnitType::Pt);
    }

    #[test]
    fn em_and_mu() {
        let env = test_env();
        let em = Dimen::em(1.0).to_units(&env);
        assert!((em - env.em()).abs() < 1e-4);
        assert!((Dimen::mu(18.0).to_units(&env) - em).abs() < 1e-3);
    }

    #[test]
    fn physical_units_follow_text_size() {
        // test_env uses upem 1000 and text size 20 at 72 dpi.
        let env = test_env();
        assert!((Dimen::parse("1px").to_units(&env) - 50.0).abs() < 1e-3);
        assert!((Dimen::parse("1in").to_units(&env) - 3600.0).abs() < 1e-2);
        assert!((Dimen::parse("1pc").to_units(&env) - 600.0).abs() < 1e-3);
    }

    #[test]
    fn none_unit_is_raw() {
        let env = test_env();
        assert_eq!(Dimen::new(7.0, UnitType::None).to_units(&env), 7.0);
    }
}
