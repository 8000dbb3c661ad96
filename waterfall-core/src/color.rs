//! Palettes: normalized power → RGB.
//!
//! Every palette is five anchor colours joined by straight lines, giving four
//! quartile bands. Within a band each channel moves linearly, so channels
//! never reverse inside a band and the function is continuous at band edges.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ParseError;

pub type Rgb = [u8; 3];

/// A colour with opacity, as handed to a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Color {
    pub const fn opaque(rgb: Rgb) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    pub const fn with_alpha(rgb: Rgb, alpha: f32) -> Self {
        Self { rgb, alpha }
    }

    /// CSS colour string for canvas fill/stroke styles.
    pub fn css(&self) -> String {
        let [r, g, b] = self.rgb;
        if self.alpha >= 1.0 {
            format!("rgb({r},{g},{b})")
        } else {
            format!("rgba({r},{g},{b},{:.2})", self.alpha)
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// Blue → cyan → green → yellow → red.
    #[default]
    Classic,
    Viridis,
    /// Black → dark red → orange → yellow → white.
    Hot,
    Grayscale,
    /// Black → navy → blue → cyan → white.
    Ocean,
}

impl Palette {
    pub const ALL: [Palette; 5] = [
        Palette::Classic,
        Palette::Viridis,
        Palette::Hot,
        Palette::Grayscale,
        Palette::Ocean,
    ];

    /// Selector value.
    pub fn as_str(self) -> &'static str {
        match self {
            Palette::Classic => "classic",
            Palette::Viridis => "viridis",
            Palette::Hot => "hot",
            Palette::Grayscale => "grayscale",
            Palette::Ocean => "ocean",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Palette::Classic => "Classic",
            Palette::Viridis => "Viridis",
            Palette::Hot => "Hot",
            Palette::Grayscale => "Grayscale",
            Palette::Ocean => "Ocean",
        }
    }

    /// Colours at 0, 0.25, 0.5, 0.75 and 1.
    pub fn anchors(self) -> [Rgb; 5] {
        match self {
            Palette::Classic => [[0, 0, 255], [0, 255, 255], [0, 255, 0], [255, 255, 0], [255, 0, 0]],
            Palette::Viridis => [[68, 1, 84], [59, 82, 139], [33, 145, 140], [94, 201, 98], [253, 231, 37]],
            Palette::Hot => [[0, 0, 0], [128, 0, 0], [255, 64, 0], [255, 200, 0], [255, 255, 255]],
            Palette::Grayscale => [[0, 0, 0], [64, 64, 64], [128, 128, 128], [191, 191, 191], [255, 255, 255]],
            Palette::Ocean => [[0, 0, 0], [0, 0, 96], [0, 64, 192], [0, 200, 255], [255, 255, 255]],
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Palette {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Palette::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParseError::Palette(s.to_string()))
    }
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8
}

/// Colour for a normalized power value. Out-of-range input is clamped,
/// NaN maps to the low endpoint.
pub fn color_for(normalized: f64, palette: Palette) -> Rgb {
    let p = if normalized.is_nan() { 0.0 } else { normalized.clamp(0.0, 1.0) };
    let anchors = palette.anchors();
    let scaled = p * 4.0;
    let band = (scaled.floor() as usize).min(3);
    let t = scaled - band as f64;
    let (lo, hi) = (anchors[band], anchors[band + 1]);
    [
        lerp_channel(lo[0], hi[0], t),
        lerp_channel(lo[1], hi[1], t),
        lerp_channel(lo[2], hi[2], t),
    ]
}

/// One stop of a legend gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient, 0 = low power.
    pub offset: f64,
    pub color: Rgb,
}

/// Sample a palette at `steps + 1` evenly spaced points.
pub fn generate_gradient(palette: Palette, steps: usize) -> Vec<GradientStop> {
    if steps == 0 {
        return vec![GradientStop { offset: 0.0, color: color_for(0.0, palette) }];
    }
    (0..=steps)
        .map(|i| {
            let offset = i as f64 / steps as f64;
            GradientStop { offset, color: color_for(offset, palette) }
        })
        .collect()
}
