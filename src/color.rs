use std::collections::BTreeMap;

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
            let hsl = Hsl::new(hue, 0.75, 0.55);
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
// Category colours
// ---------------------------------------------------------------------------

/// Fill colour per category for the rollup bar chart.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    /// One distinct palette colour per category.
    pub fn distinct<'a>(categories: impl IntoIterator<Item = &'a str>) -> Self {
        let names: Vec<&str> = categories.into_iter().collect();
        let mapping = names
            .iter()
            .zip(generate_palette(names.len()))
            .map(|(name, c)| (name.to_string(), c))
            .collect();
        Self {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// The same colour for every category.
    pub fn uniform(rgb: [u8; 3]) -> Self {
        Self {
            mapping: BTreeMap::new(),
            default_color: Color32::from_rgb(rgb[0], rgb[1], rgb[2]),
        }
    }

    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colors = generate_palette(3);
        assert_eq!(colors.len(), 3);
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn uniform_colour_applies_everywhere() {
        let colors = CategoryColors::uniform([0, 0x44, 0xff]);
        assert_eq!(colors.color_for("Furniture"), Color32::from_rgb(0, 0x44, 0xff));
        assert_eq!(colors.color_for("anything"), Color32::from_rgb(0, 0x44, 0xff));
    }

    #[test]
    fn unknown_category_falls_back_to_grey() {
        let colors = CategoryColors::distinct(["Furniture", "Technology"]);
        assert_ne!(colors.color_for("Furniture"), Color32::GRAY);
        assert_eq!(colors.color_for("Garden"), Color32::GRAY);
    }
}
