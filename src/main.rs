// src/main.rs
use anyhow::{bail, Context, Result};
use clap::Parser;
use colorful::Colorful;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use mediacheckr::cli::print_report;
use mediacheckr::{MediaAnalyzer, MediaReport, SampleBuffer};

#[derive(Parser, Debug)]
#[command(name = "mediacheckr")]
#[command(about = "Detect deepfakes, AI-generated content, and digital edits in images")]
struct Args {
    /// Input image file or directory
    #[arg(short, long)]
    input: PathBuf,

    /// Treat a directory's images as the ordered frames of one video clip
    #[arg(short, long)]
    frames: bool,

    /// Emit the full report as JSON instead of the text summary
    #[arg(short, long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let image_files = collect_image_files(&args.input)?;
    if image_files.is_empty() {
        println!("{}", "No image files found!".red());
        return Ok(());
    }

    let analyzer = MediaAnalyzer::new();

    if args.frames {
        // One clip: every file is a sampled frame, in path order
        let buffers = decode_all(&image_files)?;
        let report = analyzer.analyze_video(&buffers);
        emit(&report, &args, &format!("{} frame(s)", buffers.len()));
        return Ok(());
    }

    println!("Found {} image file(s)\n", image_files.len());

    let progress = if image_files.len() > 1 && !args.json {
        let bar = ProgressBar::new(image_files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .expect("static progress template"),
        );
        Some(bar)
    } else {
        None
    };

    for file_path in &image_files {
        if let Some(bar) = &progress {
            bar.set_message(file_path.display().to_string());
        }

        let buffer = decode_image(file_path)?;
        let report = analyzer.analyze_image(&buffer);
        emit(&report, &args, &file_path.display().to_string());

        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    Ok(())
}

fn emit(report: &MediaReport, args: &Args, label: &str) {
    if args.json {
        match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("failed to serialize report: {e}"),
        }
    } else {
        println!("Analyzing: {}", label.to_string().cyan());
        print_report(report, args.verbose);
        println!();
    }
}

fn collect_image_files(path: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let image_extensions = ["jpg", "jpeg", "png", "bmp", "gif", "webp", "tiff", "tif"];

    if path.is_file() {
        if has_extension(path, &image_extensions) {
            files.push(path.to_path_buf());
        }
    } else if path.is_dir() {
        for entry in WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && has_extension(path, &image_extensions) {
                files.push(path.to_path_buf());
            }
        }
        files.sort();
    } else {
        bail!("input path does not exist: {}", path.display());
    }

    Ok(files)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn decode_image(path: &Path) -> Result<SampleBuffer> {
    let image = image::open(path)
        .with_context(|| format!("failed to decode {}", path.display()))?
        .to_rgb8();

    SampleBuffer::from_rgb(
        image.width() as usize,
        image.height() as usize,
        image.into_raw(),
    )
    .with_context(|| format!("unusable image data in {}", path.display()))
}

fn decode_all(paths: &[PathBuf]) -> Result<Vec<SampleBuffer>> {
    paths.iter().map(|p| decode_image(p)).collect()
}
