//! RGBA colors and color-string decoding.

/// A color in RGBA format (0-255 per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Build an opaque color from channel fractions in `0.0..=1.0`.
    pub fn rgb_f32(r: f32, g: f32, b: f32) -> Self {
        Self::rgb(channel(r), channel(g), channel(b))
    }

    /// Convert a CMYK color (components in `0.0..=1.0`) to RGB.
    pub fn cmyk(c: f32, m: f32, y: f32, k: f32) -> Self {
        let kk = 1.0 - k;
        Self::rgb_f32(kk * (1.0 - c), kk * (1.0 - m), kk * (1.0 - y))
    }

    /// Return the same color with a different alpha value.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Packed `0xAARRGGBB` value.
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub const fn from_argb(v: u32) -> Self {
        Self::rgba((v >> 16) as u8, (v >> 8) as u8, v as u8, (v >> 24) as u8)
    }

    /// A fully transparent color means "inherit" wherever a box carries
    /// an optional foreground or background.
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
}

fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Decode `#RRGGBB` or `#AARRGGBB`.
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    let v = u32::from_str_radix(hex, 16).ok()?;
    if hex.len() == 6 {
        Some(Color::from_argb(0xff00_0000 | v))
    } else {
        Some(Color::from_argb(v))
    }
}

/// Decode a color literal that is not a registered name.
///
/// Accepted forms:
/// - `#RRGGBB` / `#AARRGGBB`
/// - bare hex digits (`ff8800`)
/// - a single fraction (`0.5`) for a gray level
/// - three comma- or semicolon-separated components, either integers in
///   `0..=255` or fractions in `0.0..=1.0`
/// - four components as CMYK fractions
pub fn parse_color_literal(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s.starts_with('#') {
        return parse_hex_color(s);
    }
    if !s.contains([',', ';']) {
        if !s.contains('.') {
            return parse_hex_color(&format!("#{s}"));
        }
        let g: f32 = s.parse().ok()?;
        return Some(Color::rgb_f32(g, g, g));
    }

    let parts: Vec<&str> = s.split([',', ';']).map(str::trim).collect();
    match parts.len() {
        3 => {
            let is_int = parts.iter().all(|p| !p.contains('.'));
            if is_int {
                let mut ch = [0u8; 3];
                for (slot, p) in ch.iter_mut().zip(&parts) {
                    *slot = p.parse::<u32>().ok()?.min(255) as u8;
                }
                Some(Color::rgb(ch[0], ch[1], ch[2]))
            } else {
                let mut ch = [0f32; 3];
                for (slot, p) in ch.iter_mut().zip(&parts) {
                    *slot = p.parse().ok()?;
                }
                Some(Color::rgb_f32(ch[0], ch[1], ch[2]))
            }
        },
        4 => {
            let mut ch = [0f32; 4];
            for (slot, p) in ch.iter_mut().zip(&parts) {
                *slot = p.parse().ok()?;
            }
            Some(Color::cmyk(ch[0], ch[1], ch[2], ch[3]))
        },
        _ => None,
    }
}
