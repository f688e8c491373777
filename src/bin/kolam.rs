use clap::{ArgGroup, Parser};
use image::{ImageFormat, RgbImage};
use log::{error, info, warn};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use kolam_principles::annotate::{annotate_contours, annotate_dots};
use kolam_principles::contours::detect_contours;
use kolam_principles::dots::detect_dots;
use kolam_principles::pipeline::AnalysisOutcome;
use kolam_principles::plot_grid::render_grid_plot;
use kolam_principles::principles::analyze_principles;
use kolam_principles::recreate::recreate_kolam;
use kolam_principles::synthetic::demo_kolam;
use kolam_principles::KolamConfig;

#[derive(Parser, Debug)]
#[command(
    name = "kolam",
    about = "Extract dot grid, symmetry and loops from kolam photographs and redraw them",
    version,
    group(
        ArgGroup::new("source")
            .required(true)
            .args(["input", "demo"])
    ),
    group(
        ArgGroup::new("action")
            .required(true)
            .multiple(true)
            .args(["analyze", "recreate", "overlay", "plot"])
    )
)]
struct Cli {
    /// Image file, or directory containing images
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Render a synthetic 5x5 kolam into the output directory and process it
    #[arg(long = "demo")]
    demo: bool,

    /// Directory for generated files
    #[arg(short = 'o', long = "out-dir", default_value = ".")]
    out_dir: PathBuf,

    /// JSON file overriding detection thresholds
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Write design principles JSON
    #[arg(long = "analyze", short = 'a')]
    analyze: bool,

    /// Write the recreated design PNG
    #[arg(long = "recreate", short = 'r')]
    recreate: bool,

    /// Write dot and contour overlays on the source image
    #[arg(long = "overlay")]
    overlay: bool,

    /// Write a plot of detected dots with inferred row/column lines
    #[arg(long = "plot", short = 'p')]
    plot: bool,
}

/// True for files whose extension names a format the `image` crate knows.
fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(ImageFormat::from_extension)
        .is_some()
}

fn collect_images(input: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(format!("Not a file or directory: {}", input.display()).into());
    }
    let mut images: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_image_file(p))
        .collect();
    images.sort();
    Ok(images)
}

fn save_png(image: &RgbImage, path: &Path) {
    if let Err(e) = image.save(path) {
        error!("Failed to save {}: {e}", path.display());
    }
}

fn process(i: usize, image_path: &Path, cli: &Cli, config: &KolamConfig) {
    let bytes = match fs::read(image_path) {
        Ok(v) => v,
        Err(e) => {
            error!("Failed to read {}: {e}", image_path.display());
            return;
        }
    };
    let img = match kolam_principles::pipeline::decode_image(&bytes) {
        Ok(v) => v,
        Err(e) => {
            error!("{}: {e}", image_path.display());
            return;
        }
    };
    let (width, height) = img.dimensions();

    let contours = match detect_contours(&img, &config.contours) {
        Ok(v) => v,
        Err(e) => {
            error!("Contour detection failed for {}: {e}", image_path.display());
            return;
        }
    };

    let needs_dots = cli.analyze || cli.overlay || cli.plot;
    let dots = if needs_dots {
        match detect_dots(&img, &config.dots) {
            Ok(v) => v,
            Err(e) => {
                error!("Dot detection failed for {}: {e}", image_path.display());
                return;
            }
        }
    } else {
        Vec::new()
    };

    if cli.analyze {
        let outcome: AnalysisOutcome =
            analyze_principles(&dots, Some(contours.as_slice()), (height, width), config).into();
        if outcome.is_error() {
            warn!("Analysis of {} produced no principles", image_path.display());
        }
        let out = cli.out_dir.join(format!("kolam_{i}_principles.json"));
        match serde_json::to_string_pretty(&outcome) {
            Ok(s) => {
                if let Err(e) = fs::write(&out, s) {
                    error!("Failed to write {}: {e}", out.display());
                }
            }
            Err(e) => error!("Failed to serialise principles for {}: {e}", image_path.display()),
        }
    }

    if cli.recreate {
        let recreated = recreate_kolam(&contours, width, height, &config.recreate);
        save_png(&recreated, &cli.out_dir.join(format!("kolam_{i}_recreated.png")));
    }

    if cli.overlay {
        save_png(&annotate_dots(&img, &dots), &cli.out_dir.join(format!("kolam_{i}_dots.png")));
        save_png(
            &annotate_contours(&img, &contours),
            &cli.out_dir.join(format!("kolam_{i}_contours.png")),
        );
    }

    if cli.plot {
        match render_grid_plot(width, height, &dots, &config.grid) {
            Ok(plot) => save_png(&plot, &cli.out_dir.join(format!("kolam_{i}_plot.png"))),
            Err(e) => error!("Failed to render plot for {}: {e}", image_path.display()),
        }
    }

    info!("Processed {}", image_path.display());
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => KolamConfig::from_json_file(path)?,
        None => KolamConfig::default(),
    };

    fs::create_dir_all(&cli.out_dir)?;

    let images = if cli.demo {
        let demo_path = cli.out_dir.join("kolam_demo.png");
        demo_kolam().save(&demo_path)?;
        info!("Wrote synthetic kolam to {}", demo_path.display());
        vec![demo_path]
    } else if let Some(input) = &cli.input {
        collect_images(input)?
    } else {
        Vec::new()
    };

    if images.is_empty() {
        warn!("No images found");
        return Ok(());
    }

    for (i, image_path) in images.iter().enumerate() {
        process(i, image_path, &cli, &config);
    }

    Ok(())
}
