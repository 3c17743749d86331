//! Colors and colormaps used to tell datasets apart.
//!
//! Listed maps (`tab10`, `office`) cycle through a fixed palette by dataset index.
//! Continuous maps (`viridis`, `plasma`) are sampled evenly across the datasets.
//! Any name may carry a `_r` suffix to reverse the map.

use crate::error::{PlotError, Result};
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque 8-bit RGB color. Serialized as `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Linear interpolation between two colors, `t` in `[0, 1]`.
    pub fn lerp(self, other: Rgb8, t: f64) -> Rgb8 {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb8::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl From<Rgb8> for RGBColor {
    fn from(c: Rgb8) -> Self {
        RGBColor(c.r, c.g, c.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb8 {
    type Err = PlotError;

    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and a handful of basic color names.
    fn from_str(s: &str) -> Result<Self> {
        let t = s.trim();
        let named = match t.to_ascii_lowercase().as_str() {
            "black" | "k" => Some(Rgb8::BLACK),
            "white" | "w" => Some(Rgb8::WHITE),
            "red" | "r" => Some(Rgb8::new(255, 0, 0)),
            "green" | "g" => Some(Rgb8::new(0, 128, 0)),
            "blue" | "b" => Some(Rgb8::new(0, 0, 255)),
            "gray" | "grey" => Some(Rgb8::new(128, 128, 128)),
            "orange" => Some(Rgb8::new(255, 165, 0)),
            _ => None,
        };
        if let Some(c) = named {
            return Ok(c);
        }

        let digits = t.strip_prefix('#').unwrap_or(t);
        let bad = || PlotError::InvalidColor(s.to_string());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let channel =
            |i: usize, len: usize| u8::from_str_radix(&digits[i..i + len], 16).map_err(|_| bad());
        match digits.len() {
            6 => Ok(Rgb8::new(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
            3 => {
                let (r, g, b) = (channel(0, 1)?, channel(1, 1)?, channel(2, 1)?);
                Ok(Rgb8::new(r * 17, g * 17, b * 17))
            }
            _ => Err(bad()),
        }
    }
}

impl TryFrom<String> for Rgb8 {
    type Error = PlotError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Rgb8> for String {
    fn from(c: Rgb8) -> Self {
        c.to_hex()
    }
}

const fn hex(v: u32) -> Rgb8 {
    Rgb8::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

/// The default categorical palette.
const TAB10: [Rgb8; 10] = [
    hex(0x1F77B4), // blue
    hex(0xFF7F0E), // orange
    hex(0x2CA02C), // green
    hex(0xD62728), // red
    hex(0x9467BD), // purple
    hex(0x8C564B), // brown
    hex(0xE377C2), // pink
    hex(0x7F7F7F), // gray
    hex(0xBCBD22), // olive
    hex(0x17BECF), // cyan
];

/// Microsoft Office (2013+) chart series palette.
const OFFICE10: [Rgb8; 10] = [
    hex(0x4472C4), // blue
    hex(0xED7D31), // orange
    hex(0xA5A5A5), // gray
    hex(0xFFC000), // gold
    hex(0x5B9BD5), // light blue
    hex(0x70AD47), // green
    hex(0x264478), // dark blue
    hex(0x9E480E), // dark orange
    hex(0x636363), // dark gray
    hex(0x997300), // brownish gold
];

const VIRIDIS: [Rgb8; 10] = [
    hex(0x440154),
    hex(0x482878),
    hex(0x3E4989),
    hex(0x31688E),
    hex(0x26828E),
    hex(0x1F9E89),
    hex(0x35B779),
    hex(0x6ECE58),
    hex(0xB5DE2B),
    hex(0xFDE725),
];

const PLASMA: [Rgb8; 10] = [
    hex(0x0D0887),
    hex(0x46039F),
    hex(0x7201A8),
    hex(0x9C179E),
    hex(0xBD3786),
    hex(0xD8576B),
    hex(0xED7953),
    hex(0xFB9F3A),
    hex(0xFDCA26),
    hex(0xF0F921),
];

/// How a colormap is specified in a configuration: by name or as explicit colors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColormapSpec {
    Name(String),
    Colors(Vec<Rgb8>),
}

impl Default for ColormapSpec {
    fn default() -> Self {
        ColormapSpec::Name("tab10".into())
    }
}

/// A resolved colormap.
#[derive(Clone, Debug, PartialEq)]
pub enum Colormap {
    /// Discrete palette, cycled by index.
    Listed(Vec<Rgb8>),
    /// Stops of a continuous map, interpolated linearly.
    Continuous(Vec<Rgb8>),
}

impl Colormap {
    pub fn from_spec(spec: &ColormapSpec) -> Result<Self> {
        match spec {
            ColormapSpec::Name(name) => Self::from_name(name),
            ColormapSpec::Colors(colors) if colors.is_empty() => {
                Err(PlotError::UnknownColormap("empty color list".into()))
            }
            ColormapSpec::Colors(colors) => Ok(Colormap::Listed(colors.clone())),
        }
    }

    /// Resolve a colormap by (case-insensitive) name.
    pub fn from_name(name: &str) -> Result<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let (base, reversed) = match lower.strip_suffix("_r") {
            Some(b) => (b, true),
            None => (lower.as_str(), false),
        };
        let map = match base {
            "tab10" => Colormap::Listed(TAB10.to_vec()),
            "office" | "office10" => Colormap::Listed(OFFICE10.to_vec()),
            "viridis" => Colormap::Continuous(VIRIDIS.to_vec()),
            "plasma" => Colormap::Continuous(PLASMA.to_vec()),
            _ => return Err(PlotError::UnknownColormap(name.to_string())),
        };
        Ok(if reversed { map.reversed() } else { map })
    }

    pub fn reversed(self) -> Self {
        match self {
            Colormap::Listed(mut c) => {
                c.reverse();
                Colormap::Listed(c)
            }
            Colormap::Continuous(mut c) => {
                c.reverse();
                Colormap::Continuous(c)
            }
        }
    }

    /// The palette of a listed map.
    pub fn colors(&self) -> Option<&[Rgb8]> {
        match self {
            Colormap::Listed(c) => Some(c),
            Colormap::Continuous(_) => None,
        }
    }

    /// Sample a continuous map at `t` in `[0, 1]`; listed maps pick the nearest entry.
    pub fn sample(&self, t: f64) -> Rgb8 {
        let stops = match self {
            Colormap::Listed(c) | Colormap::Continuous(c) => c,
        };
        if stops.len() == 1 {
            return stops[0];
        }
        let pos = t.clamp(0.0, 1.0) * (stops.len() - 1) as f64;
        match self {
            Colormap::Listed(_) => stops[pos.round() as usize],
            Colormap::Continuous(_) => {
                let i = (pos.floor() as usize).min(stops.len() - 2);
                stops[i].lerp(stops[i + 1], pos - i as f64)
            }
        }
    }

    /// Color of the `idx`-th of `count` datasets.
    pub fn color(&self, idx: usize, count: usize) -> Rgb8 {
        match self {
            Colormap::Listed(c) => c[idx % c.len()],
            Colormap::Continuous(_) => {
                let t = if count <= 1 {
                    0.0
                } else {
                    idx as f64 / (count - 1) as f64
                };
                self.sample(t)
            }
        }
    }
}
