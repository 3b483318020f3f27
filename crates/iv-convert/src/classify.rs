use iv_core::{ImageView, PixelSet, Point, Rgb8};

/// Decides which pixels of a source image belong to strokes.
///
/// Implementations must be deterministic: the same image always yields the
/// same set.
pub trait StrokeClassifier {
    fn classify(&self, image: &ImageView<'_, Rgb8>) -> PixelSet;
}

/// Marks pixels by Rec. 601 luma against a fixed threshold.
///
/// By default dark ink on light paper is a stroke; `invert` flips that for
/// light strokes on a dark background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumaThresholdClassifier {
    pub threshold: u8,
    pub invert: bool,
}

impl Default for LumaThresholdClassifier {
    fn default() -> Self {
        Self {
            threshold: 128,
            invert: false,
        }
    }
}

impl LumaThresholdClassifier {
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    fn is_stroke(&self, rgb: Rgb8) -> bool {
        let dark = luma(rgb) < self.threshold;
        dark != self.invert
    }
}

impl StrokeClassifier for LumaThresholdClassifier {
    fn classify(&self, image: &ImageView<'_, Rgb8>) -> PixelSet {
        let mut out = PixelSet::new();
        for y in 0..image.height() {
            for (x, &rgb) in image.row(y).iter().enumerate() {
                if self.is_stroke(rgb) {
                    out.insert(Point::new(x as i32, y as i32));
                }
            }
        }
        log::trace!(
            "luma threshold {}: {} stroke pixels in {}x{}",
            self.threshold,
            out.len(),
            image.width(),
            image.height()
        );
        out
    }
}

pub fn luma(rgb: Rgb8) -> u8 {
    let [r, g, b] = rgb.map(u32::from);
    ((299 * r + 587 * g + 114 * b + 500) / 1000) as u8
}
