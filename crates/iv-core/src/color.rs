use std::collections::HashMap;

use crate::image::{Image, ImageView, Rgb8};
use crate::point::Point;

/// Normalized RGBA color, channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::opaque(0.0, 0.0, 0.0);

    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn from_rgb8(rgb: Rgb8) -> Self {
        Self::opaque(
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
        )
    }

    /// Rounds back to 8-bit channels, clamping out-of-range values.
    pub fn to_rgb8(self) -> Rgb8 {
        let q = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// `#rrggbb`, as used by SVG fills and strokes.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Palette label for a stroke color.
///
/// Only clear red, green or blue strokes get their own label; everything
/// else is drawn in the primary ink color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SemanticColor {
    #[default]
    Primary,
    Red,
    Green,
    Blue,
}

const PALETTE: [(SemanticColor, [f32; 3]); 3] = [
    (SemanticColor::Red, [1.0, 0.0, 0.0]),
    (SemanticColor::Green, [0.0, 1.0, 0.0]),
    (SemanticColor::Blue, [0.0, 0.0, 1.0]),
];

// Largest per-channel distance to the palette entry that still counts.
const PALETTE_TOLERANCE: f32 = 0.3;

impl SemanticColor {
    /// Picks the palette entry with the largest dot product against `color`
    /// (earlier entries win ties) and keeps it only when every channel is
    /// within `0.3` of it. Alpha is ignored.
    pub fn from_color(color: Color) -> Self {
        let rgb = [color.r, color.g, color.b];
        let mut best: Option<(SemanticColor, [f32; 3], f32)> = None;
        for (label, reference) in PALETTE {
            let dot: f32 = rgb.iter().zip(reference).map(|(a, b)| a * b).sum();
            if best.is_none_or(|(_, _, d)| dot > d) {
                best = Some((label, reference, dot));
            }
        }

        match best {
            Some((label, reference, _))
                if rgb
                    .iter()
                    .zip(reference)
                    .all(|(a, b)| (a - b).abs() < PALETTE_TOLERANCE) =>
            {
                label
            }
            _ => SemanticColor::Primary,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SemanticColor::Primary => "primary",
            SemanticColor::Red => "red",
            SemanticColor::Green => "green",
            SemanticColor::Blue => "blue",
        }
    }
}

/// Source of pixel colors for sampling.
///
/// Points without backing pixel data return `None`; callers treat that as a
/// missing sample, never as an error.
pub trait ColorLookup {
    fn color_at(&self, p: Point) -> Option<Rgb8>;
}

impl ColorLookup for ImageView<'_, Rgb8> {
    fn color_at(&self, p: Point) -> Option<Rgb8> {
        self.at(p).copied()
    }
}

impl ColorLookup for Image<Rgb8> {
    fn color_at(&self, p: Point) -> Option<Rgb8> {
        self.as_view().at(p).copied()
    }
}

impl ColorLookup for HashMap<Point, Rgb8> {
    fn color_at(&self, p: Point) -> Option<Rgb8> {
        self.get(&p).copied()
    }
}

impl<F> ColorLookup for F
where
    F: Fn(Point) -> Option<Rgb8>,
{
    fn color_at(&self, p: Point) -> Option<Rgb8> {
        self(p)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{Color, ColorLookup, SemanticColor};
    use crate::image::Image;
    use crate::point::Point;

    #[test]
    fn rgb8_round_trip_and_hex() {
        let c = Color::from_rgb8([255, 128, 0]);
        assert!((c.r - 1.0).abs() < 1e-6);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
        assert_eq!(c.to_rgb8(), [255, 128, 0]);
        assert_eq!(c.to_hex(), "#ff8000");
        assert_eq!(Color::default().to_hex(), "#000000");
    }

    #[test]
    fn lookups_report_missing_points() {
        let img = Image::from_vec(2, 1, vec![[1u8, 2, 3], [4, 5, 6]]).expect("valid image");
        assert_eq!(img.color_at(Point::new(1, 0)), Some([4, 5, 6]));
        assert_eq!(img.color_at(Point::new(2, 0)), None);
        assert_eq!(img.as_view().color_at(Point::new(0, -1)), None);

        let mut map = HashMap::new();
        map.insert(Point::new(-3, 7), [9u8, 9, 9]);
        assert_eq!(map.color_at(Point::new(-3, 7)), Some([9, 9, 9]));
        assert_eq!(map.color_at(Point::new(0, 0)), None);

        let constant = |_: Point| Some([7u8, 7, 7]);
        assert_eq!(constant.color_at(Point::new(100, 100)), Some([7, 7, 7]));
    }

    #[test]
    fn semantic_color_snaps_to_palette() {
        assert_eq!(SemanticColor::from_color(Color::opaque(1.0, 0.0, 0.0)), SemanticColor::Red);
        assert_eq!(SemanticColor::from_color(Color::opaque(0.9, 0.2, 0.1)), SemanticColor::Red);
        assert_eq!(SemanticColor::from_color(Color::opaque(0.1, 0.8, 0.2)), SemanticColor::Green);
        assert_eq!(SemanticColor::from_color(Color::opaque(0.1, 0.1, 0.95)), SemanticColor::Blue);

        // Closest entry, but one channel is 0.3 or more away.
        assert_eq!(SemanticColor::from_color(Color::opaque(0.75, 0.0, 0.0)), SemanticColor::Red);
        assert_eq!(SemanticColor::from_color(Color::opaque(0.65, 0.0, 0.0)), SemanticColor::Primary);
        assert_eq!(SemanticColor::from_color(Color::opaque(0.9, 0.35, 0.0)), SemanticColor::Primary);

        // Neutral tones never match.
        assert_eq!(SemanticColor::from_color(Color::opaque(0.5, 0.5, 0.5)), SemanticColor::Primary);
        assert_eq!(SemanticColor::from_color(Color::BLACK), SemanticColor::Primary);
        assert_eq!(SemanticColor::from_color(Color::opaque(1.0, 1.0, 1.0)), SemanticColor::Primary);
        assert_eq!(SemanticColor::Primary.name(), "primary");
    }
}
