//! Measuring text runs that bypass the math font.

use mathbox_types::font_style::FontStyle;

/// Bounds of a laid-out text run, baseline relative.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextBounds {
    pub width: f32,
    /// Extent above the baseline.
    pub ascent: f32,
    /// Extent below the baseline.
    pub descent: f32,
}

/// Measures text for the fallback text boxes.
///
/// Rendering backends usually implement this on top of their own text
/// shaping; `size` is the font size in the same units as box metrics.
pub trait TextMeasurer: Send + Sync {
    fn measure(&self, text: &str, style: FontStyle, size: f32) -> TextBounds;
}

/// Fixed-advance approximation: every character is `0.5 em` wide, bold
/// adds ten percent, ascent is `0.75 em` and descent `0.25 em`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTextMeasurer;

impl TextMeasurer for SimpleTextMeasurer {
    fn measure(&self, text: &str, style: FontStyle, size: f32) -> TextBounds {
        let n = text.chars().count() as f32;
        let advance = if style.is_bold() { 0.55 } else { 0.5 };
        TextBounds {
            width: n * advance * size,
            ascent: 0.75 * size,
            descent: 0.25 * size,
        }
    }
}
