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
            let hsl = Hsl::new(hue, 0.7, 0.5);
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
// Rating colors: predicted rating → Color32
// ---------------------------------------------------------------------------

/// Maps the model's rating classes to distinct colours, for the prediction
/// column, the legend, and the distribution chart.
#[derive(Debug, Clone)]
pub struct RatingPalette {
    mapping: BTreeMap<i64, Color32>,
    default_color: Color32,
}

impl RatingPalette {
    /// Build a palette over the rating classes, sorted ascending so the
    /// same class always gets the same colour.
    pub fn new(classes: &[i64]) -> Self {
        let mut sorted: Vec<i64> = classes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let palette = generate_palette(sorted.len());
        let mapping = sorted.into_iter().zip(palette).collect();

        RatingPalette {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, rating: i64) -> Color32 {
        self.mapping
            .get(&rating)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries (rating → colour), ascending.
    pub fn legend_entries(&self) -> Vec<(i64, Color32)> {
        self.mapping.iter().map(|(r, c)| (*r, *c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_get_stable_distinct_colors() {
        let a = RatingPalette::new(&[4, 2, 3]);
        let b = RatingPalette::new(&[2, 3, 4]);

        assert_eq!(a.color_for(3), b.color_for(3));
        assert_ne!(a.color_for(2), a.color_for(4));
        assert_eq!(a.legend_entries().len(), 3);
    }

    #[test]
    fn unknown_rating_falls_back_to_default() {
        let palette = RatingPalette::new(&[2, 3, 4]);
        assert_eq!(palette.color_for(9), Color32::GRAY);
    }
}
