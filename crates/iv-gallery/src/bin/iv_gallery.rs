use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::GrayImage;
use ink_vectorize::{
    ConvertConfig, FitConfig, FitMode, Image, LumaThresholdClassifier, PixelSet, Rgb8,
    StrokeClassifier, VectorStroke, convert_to_paths, group_components, resolve_workers,
    skeletonize, trace_skeleton,
};
use kurbo::{Affine, PathSeg, Vec2};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "iv_gallery")]
#[command(about = "Vectorize stroke images and dump intermediate artifacts")]
struct Cli {
    /// Log pipeline summaries to stderr (repeat for per-component detail).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stroke mask and thinned skeleton as PNGs.
    #[command(name = "skeleton")]
    Skeleton(CommonArgs),
    /// Traced centerlines as JSON point lists.
    #[command(name = "trace")]
    Trace(CommonArgs),
    /// Full conversion to colored vector paths (JSON + SVG).
    #[command(name = "convert")]
    Convert(ConvertArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out")]
    out: PathBuf,
    /// Pixels with luma below this are strokes.
    #[arg(long, default_value_t = 128)]
    threshold: u8,
    /// Treat light pixels as strokes instead.
    #[arg(long, default_value_t = false)]
    invert: bool,
}

#[derive(Args, Debug, Clone)]
struct ConvertArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Fit cubic Beziers instead of polylines.
    #[arg(long, default_value_t = false)]
    bezier: bool,
    #[arg(long, default_value_t = 7.0)]
    error_threshold: f64,
    #[arg(long, default_value_t = 10)]
    color_samples: usize,
    #[arg(long)]
    seed: Option<u64>,
    /// Worker threads, 0 for one per CPU.
    #[arg(long, default_value_t = 0)]
    workers: usize,
    /// Scale the drawing to fit a square of this size; 0 keeps pixel units.
    #[arg(long, default_value_t = 400.0)]
    fit_size: f64,
}

#[derive(Debug, Clone, Serialize)]
struct MetaSkeleton {
    width: usize,
    height: usize,
    threshold: u8,
    invert: bool,
    stroke_pixels: usize,
    components: usize,
    skeleton_pixels: usize,
    connectivity: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct CenterlineDto {
    component: usize,
    points: Vec<[i32; 2]>,
}

#[derive(Debug, Clone, Serialize)]
struct MetaTrace {
    width: usize,
    height: usize,
    components: usize,
    paths: usize,
    single_pixel_paths: usize,
}

#[derive(Debug, Clone, Serialize)]
struct SegmentDto {
    kind: &'static str,
    points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize)]
struct ColorDto {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
    hex: String,
}

#[derive(Debug, Clone, Serialize)]
struct StrokeDto {
    color: ColorDto,
    semantic: &'static str,
    svg: String,
    segments: Vec<SegmentDto>,
}

#[derive(Debug, Clone, Serialize)]
struct MetaConvert {
    width: usize,
    height: usize,
    fit_mode: &'static str,
    error_threshold: f64,
    color_samples: usize,
    seed: Option<u64>,
    workers: usize,
    strokes: usize,
    empty_strokes: usize,
    fit_size: f64,
    scale: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.cmd {
        Command::Skeleton(args) => run_skeleton(args),
        Command::Trace(args) => run_trace(args),
        Command::Convert(args) => run_convert(args),
    }
}

fn run_skeleton(args: CommonArgs) -> Result<()> {
    let out_dir = prepare_out(&args, "skeleton")?;
    let img = load_input_rgb(&args.input)?;
    let mask = classifier(&args).classify(&img.as_view());

    let mut skeleton = PixelSet::new();
    let groups = group_components(&mask);
    for g in &groups {
        skeleton.extend(skeletonize(g).iter().copied());
    }

    save_mask(out_dir.join("mask.png"), img.width(), img.height(), &mask)?;
    save_mask(out_dir.join("skeleton.png"), img.width(), img.height(), &skeleton)?;

    write_json(
        out_dir.join("meta.json"),
        &MetaSkeleton {
            width: img.width(),
            height: img.height(),
            threshold: args.threshold,
            invert: args.invert,
            stroke_pixels: mask.len(),
            components: groups.len(),
            skeleton_pixels: skeleton.len(),
            connectivity: "components C4, skeleton C8",
        },
    )
}

fn run_trace(args: CommonArgs) -> Result<()> {
    let out_dir = prepare_out(&args, "trace")?;
    let img = load_input_rgb(&args.input)?;
    let mask = classifier(&args).classify(&img.as_view());

    let groups = group_components(&mask);
    let mut lines = Vec::new();
    for (component, g) in groups.iter().enumerate() {
        for path in trace_skeleton(&skeletonize(g)) {
            lines.push(CenterlineDto {
                component,
                points: path.points().iter().map(|p| [p.x, p.y]).collect(),
            });
        }
    }

    write_json(out_dir.join("centerlines.json"), &lines)?;
    write_json(
        out_dir.join("meta.json"),
        &MetaTrace {
            width: img.width(),
            height: img.height(),
            components: groups.len(),
            paths: lines.len(),
            single_pixel_paths: lines.iter().filter(|l| l.points.len() == 1).count(),
        },
    )
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    if !(args.error_threshold > 0.0) {
        bail!(
            "error threshold must be positive, got {}.",
            args.error_threshold
        );
    }
    if args.fit_size < 0.0 {
        bail!("fit size must not be negative, got {}.", args.fit_size);
    }

    let out_dir = prepare_out(&args.common, "convert")?;
    let img = load_input_rgb(&args.common.input)?;
    let mask = classifier(&args.common).classify(&img.as_view());

    let cfg = ConvertConfig {
        fit: FitConfig {
            mode: if args.bezier {
                FitMode::Bezier
            } else {
                FitMode::Polyline
            },
            error_threshold: args.error_threshold,
            ..Default::default()
        },
        color_samples: args.color_samples,
        seed: args.seed,
        workers: args.workers,
    };
    let strokes = convert_to_paths(&mask, &img, &cfg);

    let placement = fit_placement(&strokes, args.fit_size);
    let dtos: Vec<StrokeDto> = strokes
        .iter()
        .filter(|s| !s.path.is_empty())
        .map(|s| stroke_dto(s, placement))
        .collect();

    let (svg_w, svg_h) = if args.fit_size > 0.0 {
        (args.fit_size, args.fit_size)
    } else {
        (img.width() as f64, img.height() as f64)
    };
    write_json(out_dir.join("paths.json"), &dtos)?;
    write_text(out_dir.join("paths.svg"), &render_svg(&dtos, svg_w, svg_h))?;

    write_json(
        out_dir.join("meta.json"),
        &MetaConvert {
            width: img.width(),
            height: img.height(),
            fit_mode: if args.bezier { "bezier" } else { "polyline" },
            error_threshold: args.error_threshold,
            color_samples: args.color_samples,
            seed: args.seed,
            workers: resolve_workers(args.workers),
            strokes: strokes.len(),
            empty_strokes: strokes.len() - dtos.len(),
            fit_size: args.fit_size,
            scale: placement.as_coeffs()[0],
        },
    )
}

fn classifier(args: &CommonArgs) -> LumaThresholdClassifier {
    LumaThresholdClassifier {
        threshold: args.threshold,
        invert: args.invert,
    }
}

/// Uniform scale plus translation that puts the drawing's bounds into a
/// `size x size` square, centered. Identity when `size` is 0 or nothing was
/// drawn.
fn fit_placement(strokes: &[VectorStroke], size: f64) -> Affine {
    if size <= 0.0 {
        return Affine::IDENTITY;
    }

    let Some(bounds) = strokes
        .iter()
        .filter_map(|s| s.path.bounding_box())
        .reduce(|a, b| a.union(b))
    else {
        return Affine::IDENTITY;
    };

    let extent = bounds.width().max(bounds.height());
    let scale = if extent > 0.0 { size / extent } else { 1.0 };
    let offset = Vec2::new(
        size - bounds.width() * scale,
        size - bounds.height() * scale,
    ) * 0.5;

    Affine::translate(offset) * Affine::scale(scale) * Affine::translate(-bounds.origin().to_vec2())
}

fn stroke_dto(stroke: &VectorStroke, placement: Affine) -> StrokeDto {
    let c = stroke.color;
    let segments = stroke
        .path
        .segments()
        .iter()
        .map(|seg| {
            let (kind, pts) = match placement * *seg {
                PathSeg::Line(l) => ("line", vec![l.p0, l.p1]),
                PathSeg::Quad(q) => ("quad", vec![q.p0, q.p1, q.p2]),
                PathSeg::Cubic(b) => ("cubic", vec![b.p0, b.p1, b.p2, b.p3]),
            };
            SegmentDto {
                kind,
                points: pts.into_iter().map(|p| [p.x, p.y]).collect(),
            }
        })
        .collect();

    StrokeDto {
        color: ColorDto {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
            hex: c.to_hex(),
        },
        semantic: stroke.semantic.name(),
        svg: (placement * stroke.path.to_bez_path()).to_svg(),
        segments,
    }
}

fn render_svg(strokes: &[StrokeDto], width: f64, height: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    for s in strokes {
        let _ = writeln!(
            out,
            r#"  <path d="{}" fill="none" stroke="{}" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/>"#,
            s.svg, s.color.hex
        );
    }
    out.push_str("</svg>\n");
    out
}

fn prepare_out(common: &CommonArgs, case_name: &str) -> Result<PathBuf> {
    ensure_file_exists(&common.input, "input")?;

    let out_dir = common.out.join(case_name);
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    Ok(out_dir)
}

fn load_input_rgb(path: &Path) -> Result<Image<Rgb8>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let rgb = dyn_img.to_rgb8();
    let (w, h) = rgb.dimensions();

    Image::from_interleaved(w as usize, h as usize, 3, rgb.as_raw())
        .with_context(|| format!("constructing rgb image from {}", path.display()))
}

/// Black strokes on white, clipped to the image rectangle.
fn save_mask(path: PathBuf, width: usize, height: usize, pixels: &PixelSet) -> Result<()> {
    let mut data = vec![255u8; width * height];
    for p in pixels {
        if p.x < 0 || p.y < 0 {
            continue;
        }
        let (x, y) = (p.x as usize, p.y as usize);
        if x < width && y < height {
            data[y * width + x] = 0;
        }
    }

    let gray = GrayImage::from_raw(width as u32, height as u32, data)
        .context("constructing GrayImage from raw bytes")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn write_text(path: PathBuf, text: &str) -> Result<()> {
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;
static INIT: Once = Once::new();

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(level);
    });
}
