//! In-memory math font built from plain tables.
//!
//! [`TableFont`] lets callers without an OpenType parser feed metrics to
//! the layout engine, either programmatically or from a JSON/TOML
//! description.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use mathbox_types::error::{MathBoxError, Result};
use mathbox_types::font_style::FontStyle;
use serde::{Deserialize, Serialize};

use super::{GlyphAssembly, GlyphId, GlyphMetrics, LigatureStep, MathConsts, MathFont};

/// One glyph entry of a font description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphDef {
    /// Code point this glyph is mapped from, if any.
    pub code: Option<char>,
    /// Style bits the mapping applies to (0 for the default face).
    pub style: u16,
    #[serde(flatten)]
    pub metrics: GlyphMetrics,
    pub v_variants: Vec<GlyphId>,
    pub h_variants: Vec<GlyphId>,
    pub script_variants: Vec<GlyphId>,
    pub v_assembly: Option<GlyphAssembly>,
    pub h_assembly: Option<GlyphAssembly>,
}

/// Serializable description of a whole font. Glyph ids are indices into
/// `glyphs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontDef {
    pub name: String,
    pub units_per_em: f32,
    pub x_height: f32,
    pub space: f32,
    pub consts: MathConsts,
    pub glyphs: Vec<GlyphDef>,
    /// `(left, right, value)` pair kerning.
    pub kerns: Vec<(GlyphId, GlyphId, f32)>,
    /// Glyph sequence and the glyph it ligates into.
    pub ligatures: Vec<(Vec<GlyphId>, GlyphId)>,
}

impl Default for FontDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            units_per_em: 1000.0,
            x_height: 431.0,
            space: 333.0,
            consts: MathConsts::default(),
            glyphs: Vec::new(),
            kerns: Vec::new(),
            ligatures: Vec::new(),
        }
    }
}

/// A [`MathFont`] backed by hash tables.
#[derive(Debug, Clone, Default)]
pub struct TableFont {
    def: FontDef,
    cmap: HashMap<(char, u16), GlyphId>,
    kerns: HashMap<(GlyphId, GlyphId), f32>,
    ligatures: HashMap<Vec<GlyphId>, GlyphId>,
    ligature_prefixes: HashSet<Vec<GlyphId>>,
}

impl TableFont {
    /// An empty font with the given em size and constants.
    pub fn new(name: &str, units_per_em: f32, consts: MathConsts) -> Self {
        Self::from_def(FontDef {
            name: name.to_string(),
            units_per_em,
            x_height: units_per_em * 0.431,
            space: units_per_em / 3.0,
            consts,
            ..FontDef::default()
        })
    }

    /// Index a font description.
    pub fn from_def(def: FontDef) -> Self {
        let mut font = Self {
            def: FontDef {
                glyphs: Vec::new(),
                kerns: Vec::new(),
                ligatures: Vec::new(),
                ..def.clone()
            },
            ..Self::default()
        };
        for g in def.glyphs {
            font.push_glyph(g);
        }
        for (l, r, v) in def.kerns {
            font.add_kern(l, r, v);
        }
        for (seq, g) in def.ligatures {
            font.add_ligature(&seq, g);
        }
        font
    }

    pub fn from_json_str(src: &str) -> Result<Self> {
        let def: FontDef = serde_json::from_str(src)?;
        Self::checked(def)
    }

    pub fn from_toml_str(src: &str) -> Result<Self> {
        let def: FontDef = toml::from_str(src)?;
        Self::checked(def)
    }

    /// Load a `.json` or `.toml` description, chosen by file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&src),
            Some("toml") => Self::from_toml_str(&src),
            other => Err(MathBoxError::Font(format!(
                "unsupported font description format: {other:?}"
            ))),
        }
    }

    fn checked(def: FontDef) -> Result<Self> {
        if def.units_per_em <= 0.0 {
            return Err(MathBoxError::Font(format!(
                "{}: units_per_em must be positive",
                def.name
            )));
        }
        let n = def.glyphs.len();
        let out_of_range = |g: &GlyphId| *g as usize >= n;
        for (i, g) in def.glyphs.iter().enumerate() {
            let parts = g
                .v_assembly
                .iter()
                .chain(g.h_assembly.iter())
                .flat_map(|a| a.parts.iter().map(|p| p.glyph));
            let bad = g
                .v_variants
                .iter()
                .chain(&g.h_variants)
                .chain(&g.script_variants)
                .copied()
                .chain(parts)
                .any(|v| out_of_range(&v));
            if bad {
                return Err(MathBoxError::Font(format!(
                    "{}: glyph {i} refers to a missing glyph",
                    def.name
                )));
            }
        }
        let font = Self::from_def(def);
        log::debug!(
            "loaded table font '{}' with {} glyphs",
            font.def.name,
            font.def.glyphs.len()
        );
        Ok(font)
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn glyph_count(&self) -> usize {
        self.def.glyphs.len()
    }

    fn push_glyph(&mut self, g: GlyphDef) -> GlyphId {
        let id = self.def.glyphs.len() as GlyphId;
        if let Some(code) = g.code {
            self.cmap.entry((code, g.style)).or_insert(id);
        }
        self.def.glyphs.push(g);
        id
    }

    /// Add a glyph mapped from `code` in the default face.
    pub fn add_glyph(&mut self, code: char, metrics: GlyphMetrics) -> GlyphId {
        self.push_glyph(GlyphDef {
            code: Some(code),
            metrics,
            ..GlyphDef::default()
        })
    }

    /// Add a glyph mapped from `code` under a specific style.
    pub fn add_styled_glyph(&mut self, code: char, style: FontStyle, metrics: GlyphMetrics) -> GlyphId {
        self.push_glyph(GlyphDef {
            code: Some(code),
            style: style.bits(),
            metrics,
            ..GlyphDef::default()
        })
    }

    /// Add an unmapped glyph (variants, assembly parts, ligatures).
    pub fn add_unmapped(&mut self, metrics: GlyphMetrics) -> GlyphId {
        self.push_glyph(GlyphDef {
            metrics,
            ..GlyphDef::default()
        })
    }

    fn glyph_mut(&mut self, glyph: GlyphId) -> Option<&mut GlyphDef> {
        self.def.glyphs.get_mut(glyph as usize)
    }

    pub fn set_v_variants(&mut self, glyph: GlyphId, variants: Vec<GlyphId>) {
        if let Some(g) = self.glyph_mut(glyph) {
            g.v_variants = variants;
        }
    }

    pub fn set_h_variants(&mut self, glyph: GlyphId, variants: Vec<GlyphId>) {
        if let Some(g) = self.glyph_mut(glyph) {
            g.h_variants = variants;
        }
    }

    pub fn set_script_variants(&mut self, glyph: GlyphId, variants: Vec<GlyphId>) {
        if let Some(g) = self.glyph_mut(glyph) {
            g.script_variants = variants;
        }
    }

    pub fn set_v_assembly(&mut self, glyph: GlyphId, assembly: GlyphAssembly) {
        if let Some(g) = self.glyph_mut(glyph) {
            g.v_assembly = Some(assembly);
        }
    }

    pub fn set_h_assembly(&mut self, glyph: GlyphId, assembly: GlyphAssembly) {
        if let Some(g) = self.glyph_mut(glyph) {
            g.h_assembly = Some(assembly);
        }
    }

    pub fn add_kern(&mut self, left: GlyphId, right: GlyphId, value: f32) {
        self.kerns.insert((left, right), value);
    }

    pub fn add_ligature(&mut self, seq: &[GlyphId], glyph: GlyphId) {
        for i in 1..seq.len() {
            self.ligature_prefixes.insert(seq[..i].to_vec());
        }
        self.ligatures.insert(seq.to_vec(), glyph);
    }

    /// Serializable description of the current contents.
    pub fn to_def(&self) -> FontDef {
        let mut def = self.def.clone();
        def.kerns = self.kerns.iter().map(|(&(l, r), &v)| (l, r, v)).collect();
        def.kerns.sort_by_key(|&(l, r, _)| (l, r));
        def.ligatures = self.ligatures.iter().map(|(s, &g)| (s.clone(), g)).collect();
        def.ligatures.sort();
        def
    }
}

impl MathFont for TableFont {
    fn units_per_em(&self) -> f32 {
        self.def.units_per_em
    }

    fn math_consts(&self) -> &MathConsts {
        &self.def.consts
    }

    fn glyph_for(&self, code: char, style: FontStyle) -> Option<GlyphId> {
        self.cmap.get(&(code, style.bits())).copied()
    }

    fn metrics(&self, glyph: GlyphId) -> GlyphMetrics {
        self.def
            .glyphs
            .get(glyph as usize)
            .map(|g| g.metrics)
            .unwrap_or_default()
    }

    fn x_height(&self) -> f32 {
        self.def.x_height
    }

    fn space(&self) -> f32 {
        self.def.space
    }

    fn v_variants(&self, glyph: GlyphId) -> &[GlyphId] {
        self.def
            .glyphs
            .get(glyph as usize)
            .map_or(&[][..], |g| g.v_variants.as_slice())
    }

    fn h_variants(&self, glyph: GlyphId) -> &[GlyphId] {
        self.def
            .glyphs
            .get(glyph as usize)
            .map_or(&[][..], |g| g.h_variants.as_slice())
    }

    fn script_variants(&self, glyph: GlyphId) -> &[GlyphId] {
        self.def
            .glyphs
            .get(glyph as usize)
            .map_or(&[][..], |g| g.script_variants.as_slice())
    }

    fn v_assembly(&self, glyph: GlyphId) -> Option<&GlyphAssembly> {
        self.def.glyphs.get(glyph as usize)?.v_assembly.as_ref()
    }

    fn h_assembly(&self, glyph: GlyphId) -> Option<&GlyphAssembly> {
        self.def.glyphs.get(glyph as usize)?.h_assembly.as_ref()
    }

    fn kern(&self, left: GlyphId, right: GlyphId) -> f32 {
        self.kerns.get(&(left, right)).copied().unwrap_or(0.0)
    }

    fn ligature(&self, seq: &[GlyphId]) -> LigatureStep {
        if let Some(&g) = self.ligatures.get(seq) {
            LigatureStep::Complete(g)
        } else if self.ligature_prefixes.contains(seq) {
            LigatureStep::Partial
        } else {
            LigatureStep::Dead
        }
    }
}
