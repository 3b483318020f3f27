use iv_core::{Color, ColorLookup, ImageView, PixelSet, Rgb8, SemanticColor};
use iv_curve::{FitConfig, VectorPath, fit_path};
use iv_morph::{group_components, skeletonize};
use iv_trace::{StrokePath, trace_skeleton};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::classify::StrokeClassifier;
use crate::pool::{parallel_map, resolve_workers};
use crate::sample::{DEFAULT_COLOR_SAMPLES, sample_color};

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertConfig {
    pub fit: FitConfig,
    /// Random pixels averaged per path for its color.
    pub color_samples: usize,
    /// Base seed for color sampling; `None` draws a fresh one per call.
    pub seed: Option<u64>,
    /// Worker threads; `0` uses every CPU.
    pub workers: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            fit: FitConfig::default(),
            color_samples: DEFAULT_COLOR_SAMPLES,
            seed: None,
            workers: 0,
        }
    }
}

/// One output stroke: fitted geometry plus its sampled color.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorStroke {
    pub path: VectorPath,
    pub color: Color,
    /// `color` snapped to the stroke palette.
    pub semantic: SemanticColor,
}

/// Converts a stroke mask into colored vector strokes.
///
/// The mask is split into 4-connected components, each component is thinned
/// and traced, and every traced path is fitted and colored. Output has one
/// entry per traced path, ordered by component (row-major first pixel) and
/// then by trace order. With a fixed `seed` the result does not depend on
/// the worker count.
pub fn convert_to_paths<C>(mask: &PixelSet, colors: &C, cfg: &ConvertConfig) -> Vec<VectorStroke>
where
    C: ColorLookup + Sync + ?Sized,
{
    if mask.is_empty() {
        return Vec::new();
    }

    let workers = resolve_workers(cfg.workers);
    let groups = group_components(mask);
    let traced: Vec<Vec<StrokePath>> = parallel_map(&groups, workers, |_, group| {
        trace_skeleton(&skeletonize(group))
    });
    let paths: Vec<StrokePath> = traced.into_iter().flatten().collect();

    let base_seed = cfg.seed.unwrap_or_else(rand::random);
    let strokes = parallel_map(&paths, workers, |i, path| {
        let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
        let color = sample_color(path.points(), colors, &mut rng, cfg.color_samples);
        VectorStroke {
            path: fit_path(path.points(), &cfg.fit),
            color,
            semantic: SemanticColor::from_color(color),
        }
    });

    log::debug!(
        "converted {} stroke pixels: {} components, {} paths, {} workers",
        mask.len(),
        groups.len(),
        strokes.len(),
        workers
    );
    strokes
}

/// Classifier and conversion settings bundled for whole-image use.
#[derive(Debug, Clone, Default)]
pub struct Vectorizer<K> {
    pub classifier: K,
    pub config: ConvertConfig,
}

impl<K: StrokeClassifier> Vectorizer<K> {
    pub fn new(classifier: K, config: ConvertConfig) -> Self {
        Self { classifier, config }
    }

    /// Classifies `image` and converts the resulting mask, sampling stroke
    /// colors from the same image.
    pub fn vectorize(&self, image: &ImageView<'_, Rgb8>) -> Vec<VectorStroke> {
        let mask = self.classifier.classify(image);
        convert_to_paths(&mask, image, &self.config)
    }
}
