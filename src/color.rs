use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            hsl_to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Continuous ramps for heat grids
// ---------------------------------------------------------------------------

/// Sequential ramp for non-negative magnitudes: light → saturated blue,
/// `t` clamped to [0, 1].
pub fn sequential(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    hsl_to_color32(Hsl::new(220.0, 0.35 + 0.45 * t, 0.95 - 0.55 * t))
}

/// Diverging ramp for correlations: blue at −1, near-white at 0, red at +1.
pub fn diverging(t: f32) -> Color32 {
    let t = t.clamp(-1.0, 1.0);
    let hue = if t < 0.0 { 220.0 } else { 5.0 };
    let strength = t.abs();
    hsl_to_color32(Hsl::new(hue, 0.70 * strength + 0.05, 0.95 - 0.45 * strength))
}

/// Text colour that stays readable on top of `background`.
pub fn contrast_text(background: Color32) -> Color32 {
    let luminance = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luminance < 140.0 {
        Color32::WHITE
    } else {
        Color32::from_gray(30)
    }
}

// ---------------------------------------------------------------------------
// Country → Color32 mapping
// ---------------------------------------------------------------------------

/// Maps each country to a stable, distinct colour.
#[derive(Debug, Clone)]
pub struct CountryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CountryColors {
    /// Build the map from the dataset's sorted country set.
    pub fn new(countries: &BTreeSet<String>) -> Self {
        let palette = generate_palette(countries.len());
        let mapping: BTreeMap<String, Color32> = countries
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();

        CountryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a country.
    pub fn color_for(&self, country: &str) -> Color32 {
        self.mapping
            .get(country)
            .copied()
            .unwrap_or(self.default_color)
    }
}
