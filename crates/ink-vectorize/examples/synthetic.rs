//! Example: vectorize a synthetic drawing without touching the filesystem
//! for input.
//!
//! Paints a red ring, a blue cross and a dark diagonal stroke onto a white
//! canvas, runs the full `Vectorizer` pipeline on it and prints one line per
//! stroke. The strokes are also written as JSON, with their SVG path data.
//!
//! Run from the workspace root:
//!   cargo run -p ink-vectorize --example synthetic -- --help
//!   cargo run -p ink-vectorize --example synthetic -- --bezier

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use ink_vectorize::{
    ConvertConfig, FitConfig, Image, LumaThresholdClassifier, Point, Rgb8, Vectorizer,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(about = "Vectorize a generated test drawing")]
struct Args {
    /// Fit cubic Beziers instead of polylines
    #[arg(long, default_value_t = false)]
    bezier: bool,

    /// Seed for color sampling
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Output JSON path
    #[arg(long, default_value = "synthetic_strokes.json")]
    out: String,
}

#[derive(Serialize)]
struct StrokeDto {
    semantic: &'static str,
    hex: String,
    segments: usize,
    svg: String,
}

const WHITE: Rgb8 = [255, 255, 255];
const RED: Rgb8 = [220, 20, 30];
const BLUE: Rgb8 = [20, 40, 230];
const INK: Rgb8 = [30, 30, 30];

fn paint(img: &mut Image<Rgb8>, inside: impl Fn(i32, i32) -> bool, color: Rgb8) {
    for y in 0..img.height() as i32 {
        for x in 0..img.width() as i32 {
            if inside(x, y) {
                img.put(Point::new(x, y), color);
            }
        }
    }
}

fn canvas() -> Image<Rgb8> {
    let mut img = Image::new_fill(160, 120, WHITE);

    // Ring of radius 25 around (45, 50), about three pixels thick.
    paint(
        &mut img,
        |x, y| {
            let d = (((x - 45).pow(2) + (y - 50).pow(2)) as f64).sqrt();
            (23.5..=26.5).contains(&d)
        },
        RED,
    );
    // Cross centered on (115, 45).
    paint(
        &mut img,
        |x, y| {
            let bar = (y - 45).abs() <= 1 && (x - 115).abs() <= 20;
            let post = (x - 115).abs() <= 1 && (y - 45).abs() <= 20;
            bar || post
        },
        BLUE,
    );
    // Diagonal stroke along the bottom.
    paint(
        &mut img,
        |x, y| (20..140).contains(&x) && (y - (90 + (x - 20) / 6)).abs() <= 1,
        INK,
    );
    img
}

fn main() -> Result<()> {
    let args = Args::parse();

    let img = canvas();
    let config = ConvertConfig {
        fit: if args.bezier {
            FitConfig::bezier()
        } else {
            FitConfig::default()
        },
        seed: Some(args.seed),
        ..ConvertConfig::default()
    };
    let vectorizer = Vectorizer::new(LumaThresholdClassifier::default(), config);

    let t0 = Instant::now();
    let strokes = vectorizer.vectorize(&img.as_view());
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    println!(
        "{}x{} canvas -> {} strokes ({elapsed_ms:.2} ms)",
        img.width(),
        img.height(),
        strokes.len()
    );

    let dtos: Vec<StrokeDto> = strokes
        .iter()
        .filter(|s| !s.path.is_empty())
        .map(|s| StrokeDto {
            semantic: s.semantic.name(),
            hex: s.color.to_hex(),
            segments: s.path.num_segments(),
            svg: s.path.to_bez_path().to_svg(),
        })
        .collect();
    for (i, d) in dtos.iter().enumerate() {
        println!("  stroke {i}: {} {} ({} segments)", d.semantic, d.hex, d.segments);
    }

    let out_file =
        std::fs::File::create(&args.out).with_context(|| format!("creating {}", args.out))?;
    serde_json::to_writer_pretty(out_file, &dtos)
        .with_context(|| format!("writing JSON to {}", args.out))?;

    println!("strokes written to {}", args.out);
    Ok(())
}
