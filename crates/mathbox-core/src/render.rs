//! Turning an atom tree into something a backend can draw.
//!
//! [`RenderBuilder`] holds the output settings, lays out the root atom,
//! wraps it to the target width when asked to and hands back a [`Render`]
//! measured in pixels.

use std::sync::Arc;

use log::debug;
use mathbox_types::backend::Graphics2D;
use mathbox_types::color::Color;
use mathbox_types::config::LayoutConfig;
use mathbox_types::error::{MathBoxError, Result};

use crate::atom::Atom;
use crate::boxes::MathBox;
use crate::env::{Dimen, Environment, TexStyle};
use crate::font::{FontContext, TextMeasurer};
use crate::split;
use crate::types::Alignment;

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

/// A laid-out formula at a given text size.
#[derive(Debug, Clone)]
pub struct Render {
    root: MathBox,
    text_size: f32,
    /// Pixels per layout unit.
    scale: f32,
    upem: f32,
    foreground: Option<Color>,
    split: bool,
}

impl Render {
    fn new(root: MathBox, text_size: f32, upem: f32) -> Self {
        Self {
            root,
            text_size,
            scale: text_size / upem,
            upem,
            foreground: None,
            split: false,
        }
    }

    pub fn root(&self) -> &MathBox {
        &self.root
    }

    pub fn text_size(&self) -> f32 {
        self.text_size
    }

    pub fn set_text_size(&mut self, size: f32) {
        if size > 0.0 {
            self.text_size = size;
            self.scale = size / self.upem;
        }
    }

    pub fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    pub fn set_foreground(&mut self, color: Color) {
        self.foreground = Some(color);
    }

    /// Whether the box splitter broke the formula into lines.
    pub fn is_split(&self) -> bool {
        self.split
    }

    pub fn width(&self) -> f32 {
        self.root.width * self.scale
    }

    /// Total height including depth.
    pub fn height(&self) -> f32 {
        self.root.vlen() * self.scale
    }

    pub fn depth(&self) -> f32 {
        self.root.depth * self.scale
    }

    /// Baseline position as a fraction of the total height from the top.
    pub fn baseline(&self) -> f32 {
        let total = self.root.vlen();
        if total == 0.0 {
            return 0.0;
        }
        self.root.height / total
    }

    /// Widen to at least `width` pixels; never shrinks.
    pub fn set_width(&mut self, width: f32, align: Alignment) {
        if width > self.width() {
            let root = std::mem::take(&mut self.root);
            self.root = MathBox::hbox_aligned(root, width / self.scale, align);
        }
    }

    /// Grow to at least `height` pixels; never shrinks.
    pub fn set_height(&mut self, height: f32, align: Alignment) {
        let diff = height - self.height();
        if diff > 0.0 {
            let root = std::mem::take(&mut self.root);
            self.root = MathBox::vbox_aligned(root, diff / self.scale, align);
        }
    }

    /// Draw with the top-left corner at `(x, y)` in pixels.
    pub fn draw(&self, g: &mut dyn Graphics2D, x: f32, y: f32) -> Result<()> {
        let prev = g.color();
        g.set_color(self.foreground.unwrap_or(Color::BLACK));
        g.translate(x, y);
        g.scale(self.scale, self.scale);
        let res = self.root.draw(g, 0.0, self.root.height);
        g.scale(1.0 / self.scale, 1.0 / self.scale);
        g.translate(-x, -y);
        g.set_color(prev);
        res
    }
}

// ---------------------------------------------------------------------------
// RenderBuilder
// ---------------------------------------------------------------------------

/// Output settings for [`Render`].
#[derive(Clone)]
pub struct RenderBuilder {
    text_size: Option<f32>,
    style: TexStyle,
    text_width: Option<Dimen>,
    line_space: Option<Dimen>,
    align: Alignment,
    fill_width: bool,
    foreground: Option<Color>,
    dpi: f32,
    break_everywhere: bool,
    fonts: Option<Arc<FontContext>>,
    measurer: Option<Arc<dyn TextMeasurer>>,
}

impl Default for RenderBuilder {
    fn default() -> Self {
        Self {
            text_size: None,
            style: TexStyle::Display,
            text_width: None,
            line_space: None,
            align: Alignment::Center,
            fill_width: false,
            foreground: None,
            dpi: 72.0,
            break_everywhere: false,
            fonts: None,
            measurer: None,
        }
    }
}

impl std::fmt::Debug for RenderBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderBuilder")
            .field("text_size", &self.text_size)
            .field("style", &self.style)
            .field("text_width", &self.text_width)
            .field("line_space", &self.line_space)
            .field("align", &self.align)
            .field("fill_width", &self.fill_width)
            .finish_non_exhaustive()
    }
}

impl RenderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings from a config file. Fonts still have to be supplied.
    pub fn from_config(cfg: &LayoutConfig) -> Result<Self> {
        let foreground = match cfg.foreground.as_deref() {
            Some(name) => Some(crate::registry::color(name).ok_or_else(|| {
                MathBoxError::Config(format!("unknown foreground color: {name}"))
            })?),
            None => None,
        };
        Ok(Self {
            text_size: Some(cfg.text_size),
            style: cfg.style.into(),
            text_width: cfg.text_width.as_deref().map(Dimen::parse),
            line_space: cfg.line_space.as_deref().map(Dimen::parse),
            align: cfg.align.into(),
            fill_width: cfg.fill_width,
            foreground,
            dpi: cfg.dpi,
            break_everywhere: cfg.break_everywhere,
            ..Self::default()
        })
    }

    pub fn text_size(mut self, size: f32) -> Self {
        self.text_size = Some(size);
        self
    }

    pub fn style(mut self, style: TexStyle) -> Self {
        self.style = style;
        self
    }

    /// Target line width. A zero width means unbounded.
    pub fn text_width(mut self, width: Dimen) -> Self {
        self.text_width = Some(width);
        self
    }

    /// Space between wrapped lines. Wrapping needs a width too.
    pub fn line_space(mut self, space: Dimen) -> Self {
        self.line_space = Some(space);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Pad the result to the full text width instead of its natural width.
    pub fn fill_width(mut self, on: bool) -> Self {
        self.fill_width = on;
        self
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn break_everywhere(mut self, on: bool) -> Self {
        self.break_everywhere = on;
        self
    }

    pub fn fonts(mut self, fonts: Arc<FontContext>) -> Self {
        self.fonts = Some(fonts);
        self
    }

    pub fn measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = Some(measurer);
        self
    }

    fn environment(&self) -> Result<Environment> {
        let size = self
            .text_size
            .filter(|s| *s > 0.0)
            .ok_or_else(|| MathBoxError::Render("a positive text size is required".into()))?;
        let fonts = self
            .fonts
            .clone()
            .ok_or_else(|| MathBoxError::Render("a math font is required".into()))?;
        let mut env = Environment::new(self.style, fonts, size)
            .with_dpi(self.dpi)
            .with_break_everywhere(self.break_everywhere);
        if let Some(m) = &self.measurer {
            env = env.with_measurer(Arc::clone(m));
        }
        if let Some(w) = self.text_width.filter(|w| w.value != 0.0) {
            env.set_text_width(w);
        }
        if let Some(s) = self.line_space {
            env.set_line_space(s);
        }
        Ok(env)
    }

    /// Lay out `atom`.
    pub fn build(&self, atom: &Atom) -> Result<Render> {
        let env = self.environment()?;
        let upem = env.upem();
        let root = atom.create_box(&env);

        let width = env.text_width();
        if !width.is_finite() {
            let mut render = Render::new(root, env.text_size(), upem);
            render.foreground = self.foreground;
            return Ok(render);
        }

        let line_space = self.line_space.map_or(0.0, |s| s.to_units(&env));
        let (root, split_done) = if line_space != 0.0 {
            split::split(root, width, line_space)
        } else {
            (root, false)
        };
        let target = if self.fill_width { width } else { root.width };
        debug!(
            "render: width {} of {width}, split={split_done}",
            root.width
        );
        let mut render = Render::new(
            MathBox::hbox_aligned(root, target, self.align),
            env.text_size(),
            upem,
        );
        render.foreground = self.foreground;
        render.split = split_done;
        Ok(render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{DrawCall, MockGraphics, test_fonts};
    use crate::env::UnitType;

    fn builder() -> RenderBuilder {
        RenderBuilder::new().text_size(20.0).fonts(test_fonts())
    }

    #[test]
    fn missing_settings_are_errors() {
        let atom = Atom::char('x');
        let err = RenderBuilder::new().fonts(test_fonts()).build(&atom).unwrap_err();
        assert!(matches!(err, MathBoxError::Render(_)));
        let err = RenderBuilder::new().text_size(20.0).build(&atom).unwrap_err();
        assert!(matches!(err, MathBoxError::Render(_)));
    }

    #[test]
    fn pixel_metrics_scale_from_font_units() {
        let r = builder().build(&Atom::char('x')).unwrap();
        // 500 units at 20 px per 1000-unit em.
        assert!((r.width() - 10.0).abs() < 1e-4);
        assert!((r.height() - 9.0).abs() < 1e-4);
        assert_eq!(r.depth(), 0.0);
        assert!((r.baseline() - 1.0).abs() < 1e-6);
        assert!(!r.is_split());
    }

    #[test]
    fn fill_width_pads_to_text_width() {
        let natural = builder()
            .text_width(Dimen::new(100.0, UnitType::Pixel))
            .build(&Atom::char('x'))
            .unwrap();
        assert!((natural.width() - 10.0).abs() < 1e-3);

        let filled = builder()
            .text_width(Dimen::new(100.0, UnitType::Pixel))
            .fill_width(true)
            .build(&Atom::char('x'))
            .unwrap();
        assert!((filled.width() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn wraps_with_width_and_line_space() {
        let atom = Atom::chars("abcabcabca");
        let r = builder()
            .text_width(Dimen::new(40.0, UnitType::Pixel))
            .line_space(Dimen::new(2.0, UnitType::Pixel))
            .break_everywhere(true)
            .build(&atom)
            .unwrap();
        assert!(r.is_split());
        assert!(r.width() <= 40.0 + 1e-3);

        let unwrapped = builder()
            .text_width(Dimen::new(40.0, UnitType::Pixel))
            .break_everywhere(true)
            .build(&atom)
            .unwrap();
        assert!(!unwrapped.is_split());
        assert!((unwrapped.width() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn set_width_never_shrinks() {
        let mut r = builder().build(&Atom::char('x')).unwrap();
        r.set_width(5.0, Alignment::Left);
        assert!((r.width() - 10.0).abs() < 1e-4);
        r.set_width(30.0, Alignment::Left);
        assert!((r.width() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn draw_applies_foreground_and_restores() {
        let r = builder().foreground(Color::RED).build(&Atom::char('x')).unwrap();
        let mut g = MockGraphics::new();
        g.set_color(Color::GREEN);
        r.draw(&mut g, 5.0, 7.0).unwrap();
        assert_eq!(g.color(), Color::GREEN);
        assert!(g.transform_is_identity());
        assert_eq!(g.count(|c| matches!(c, DrawCall::Glyph { .. })), 1);
        // Baseline at the top plus the box height, in pixels.
        let (gx, gy) = g.glyph_positions()[0];
        assert!((gx - 5.0).abs() < 1e-3);
        assert!((gy - 16.0).abs() < 1e-3);
    }

    #[test]
    fn config_feeds_the_builder() {
        let cfg = LayoutConfig::from_toml_str(
            r#"
            text_size = 10.0
            text_width = "50px"
            line_space = "1px"
            fill_width = true
            foreground = "blue"
            "#,
        )
        .unwrap();
        let b = RenderBuilder::from_config(&cfg).unwrap().fonts(test_fonts());
        let r = b.build(&Atom::char('x')).unwrap();
        assert_eq!(r.foreground(), Some(Color::BLUE));
        assert!((r.width() - 50.0).abs() < 1e-3);

        let bad = LayoutConfig::from_toml_str("foreground = \"nosuchcolor\"").unwrap();
        assert!(matches!(
            RenderBuilder::from_config(&bad),
            Err(MathBoxError::Config(_))
        ));
    }
}
