use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

/// Sequential green scale: `t = 0` is the palest, `t = 1` the darkest.
pub fn green_scale(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    to_color32(Hsl::new(125.0, 0.5, 0.88 - 0.62 * t))
}

/// Sequential blue scale for the income panel's distributions.
pub fn blue_scale(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    to_color32(Hsl::new(212.0, 0.65, 0.78 - 0.48 * t))
}

// ---------------------------------------------------------------------------
// Color mapping: group label → Color32
// ---------------------------------------------------------------------------

/// Maps chart group labels (regions, response codes) to distinct colours so a
/// group keeps its colour while the selection around it changes.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from every label a chart may show.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let labels: Vec<String> = labels.into_iter().map(|l| l.to_string()).collect();
        let palette = generate_palette(labels.len());
        let mapping: BTreeMap<String, Color32> = labels.into_iter().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colors = generate_palette(6);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_label_falls_back_to_gray() {
        let map = ColorMap::new(["East Asia & Pacific", "South Asia"]);
        assert_ne!(map.color_for("South Asia"), Color32::GRAY);
        assert_eq!(map.color_for("Antarctica"), Color32::GRAY);
    }

    #[test]
    fn green_scale_darkens() {
        let pale = green_scale(0.0);
        let dark = green_scale(1.0);
        assert!(pale.g() > dark.g());
    }
}
