use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::CellValue;

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
            let hue = (i as f32 / n as f32) * 300.0;
            let hsl = Hsl::new(hue, 0.75, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Year → Color32
// ---------------------------------------------------------------------------

/// Maps each installation year to a distinct marker colour.
#[derive(Debug, Clone, Default)]
pub struct YearColors {
    mapping: BTreeMap<CellValue, Color32>,
}

impl YearColors {
    pub fn new(years: &[CellValue]) -> Self {
        let mapping = years
            .iter()
            .cloned()
            .zip(generate_palette(years.len()))
            .collect();
        YearColors { mapping }
    }

    /// Marker colour for a year; grey for years not seen at load time.
    pub fn color_for(&self, year: &CellValue) -> Color32 {
        self.mapping.get(year).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let palette = generate_palette(4);
        assert_eq!(palette.len(), 4);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_year_is_grey() {
        let colors = YearColors::new(&[CellValue::Integer(113), CellValue::Integer(114)]);
        assert_ne!(colors.color_for(&CellValue::Integer(113)), Color32::GRAY);
        assert_eq!(colors.color_for(&CellValue::Integer(999)), Color32::GRAY);
    }
}
