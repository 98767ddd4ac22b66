// shared/src/color.rs
//
// Stable colours per driver and per driver-year.
//  - base colour: categorical palette slot by selection order
//  - later selected years: brighter shade of the same base colour
//  - unknown codes: gray sentinel + warning, never a panic

use serde::{Deserialize, Serialize};

use crate::driver::{DriverCode, split_driver_year};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h_deg: f64,
    pub s: f64,
    pub l: f64,
}

/// Neutral fallback returned for colour lookup misses.
pub const GRAY_SENTINEL: Rgb = Rgb::new(128, 128, 128);

/// d3 "Tableau10" categorical scheme.
pub const TABLEAU10: [Rgb; 10] = [
    Rgb::new(0x4e, 0x79, 0xa7),
    Rgb::new(0xf2, 0x8e, 0x2c),
    Rgb::new(0xe1, 0x57, 0x59),
    Rgb::new(0x76, 0xb7, 0xb2),
    Rgb::new(0x59, 0xa1, 0x4f),
    Rgb::new(0xed, 0xc9, 0x49),
    Rgb::new(0xaf, 0x7a, 0xa1),
    Rgb::new(0xff, 0x9d, 0xa7),
    Rgb::new(0x9c, 0x75, 0x5f),
    Rgb::new(0xba, 0xb0, 0xab),
];

const BRIGHTER: f64 = 1.0 / 0.7;
const YEAR_BRIGHTEN_STEP: f64 = 1.1;

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches('#');
        if s.len() != 6 || !s.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Scale all channels by `(1/0.7)^k`, clamped to 0..=255.
    pub fn brighter(self, k: f64) -> Self {
        let f = BRIGHTER.powf(k);
        Self {
            r: scale_channel(self.r, f),
            g: scale_channel(self.g, f),
            b: scale_channel(self.b, f),
        }
    }

    /// `rgb(r,g,b)` without spaces.
    pub fn to_css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_hsl(&self) -> Hsl {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;

        if d.abs() < f64::EPSILON {
            return Hsl { h_deg: 0.0, s: 0.0, l };
        }

        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == r {
            ((g - b) / d).rem_euclid(6.0)
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl { h_deg: h * 60.0, s, l }
    }

    pub fn from_hsl(hsl: Hsl) -> Self {
        let h = hsl.h_deg.rem_euclid(360.0) / 360.0;
        let s = hsl.s.clamp(0.0, 1.0);
        let l = hsl.l.clamp(0.0, 1.0);

        if s == 0.0 {
            let v = (l * 255.0).round() as u8;
            return Self { r: v, g: v, b: v };
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            }
        }

        let to_u8 = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        Self {
            r: to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            g: to_u8(hue_to_rgb(p, q, h)),
            b: to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        }
    }
}

fn scale_channel(v: u8, f: f64) -> u8 {
    (v as f64 * f).round().clamp(0.0, 255.0) as u8
}

/// Colour of the `index`-th category, cycling through the palette.
pub fn category_color(index: usize) -> Rgb {
    TABLEAU10[index % TABLEAU10.len()]
}

/// Base colour per selected driver, assigned in selection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverPalette {
    entries: Vec<(DriverCode, Rgb)>,
}

impl DriverPalette {
    pub fn assign<I>(codes: I) -> Self
    where
        I: IntoIterator<Item = DriverCode>,
    {
        let mut entries: Vec<(DriverCode, Rgb)> = Vec::new();
        for code in codes {
            if entries.iter().any(|(c, _)| *c == code) {
                continue;
            }
            let color = category_color(entries.len());
            entries.push((code, color));
        }
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &DriverCode> {
        self.entries.iter().map(|(c, _)| c)
    }

    pub fn base_color(&self, code: &str) -> Option<Rgb> {
        self.entries
            .iter()
            .find(|(c, _)| c.as_str() == code)
            .map(|(_, rgb)| *rgb)
    }

    /// Colour for `code` in `year`.
    ///
    /// The first selected year keeps the base colour, every later year is
    /// brightened one more step. A year missing from `years` keeps the base.
    pub fn year_color(&self, code: &str, year: &str, years: &[String]) -> Rgb {
        let Some(base) = self.base_color(code) else {
            log::warn!("no colour assigned for driver code {code:?}");
            return GRAY_SENTINEL;
        };

        match years.iter().position(|y| y == year) {
            Some(idx) if idx > 0 => base.brighter(YEAR_BRIGHTEN_STEP * idx as f64),
            _ => base,
        }
    }

    /// Colour for a `CODE_YEAR` / `YEAR_CODE` key. A bare code gets its base colour.
    pub fn key_color(&self, key: &str, years: &[String]) -> Rgb {
        match split_driver_year(key) {
            Some((code, year)) => self.year_color(code, year, years),
            None => self.year_color(key, "", years),
        }
    }
}

/// HSL shade of `base` for the `idx`-th of `count` years of one driver.
///
/// Saturation runs 0.8 -> 1.0 and lightness 0.5 -> 0.7 across the years; a
/// single year sits in the middle of both ranges.
pub fn year_shade(base: Rgb, idx: usize, count: usize) -> Rgb {
    let t = if count > 1 {
        idx.min(count - 1) as f64 / (count - 1) as f64
    } else {
        0.5
    };
    let mut hsl = base.to_hsl();
    hsl.s = (0.8 + 0.2 * t).clamp(0.0, 1.0);
    hsl.l = (0.5 + 0.2 * t).clamp(0.0, 1.0);
    Rgb::from_hsl(hsl)
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub key: String,
    pub label: String,
    pub color: Rgb,
}

/// One legend block per (driver, year), drivers outermost, labelled `VER 23`.
pub fn legend_entries(palette: &DriverPalette, years: &[String]) -> Vec<LegendEntry> {
    palette
        .codes()
        .flat_map(|code| {
            years.iter().map(move |year| {
                let short: String = year.chars().skip(2).collect();
                LegendEntry {
                    key: crate::driver::driver_year_key(code.as_str(), year),
                    label: format!("{code} {short}"),
                    color: palette.year_color(code.as_str(), year, years),
                }
            })
        })
        .collect()
}
