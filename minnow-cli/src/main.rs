//! Minnow layout CLI
//!
//! Loads an HTML document, lays it out at a fixed wrap width, and prints
//! the resulting line boxes - a headless stand-in for a scrolling window.

use anyhow::{Context, Result};
use clap::Parser;
use minnow_browser::{FontTextMeasurer, load_document};
use minnow_layout::{ApproximateTextMeasurer, Layout, TextMeasurer, View, WordMetricsCache};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

/// Font files tried in order when no `--font` is given.
const FONT_SEARCH_PATHS: [&str; 4] = [
    "/usr/share/fonts/TTF/DejaVuSerif.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
];

#[derive(Parser)]
#[command(name = "minnow", about = "Lay out an HTML document into wrapped line boxes")]
struct Args {
    /// File path or http(s) URL of the document
    source: String,

    /// Wrap width in pixels (doubles as the viewport width)
    #[arg(long, default_value_t = 500)]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 500)]
    height: u32,

    /// Font file to measure with (fatal if it cannot be loaded)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Character size in pixels
    #[arg(long, default_value_t = 14.0)]
    char_size: f32,

    /// Dump the box list as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let doc =
        load_document(&args.source).with_context(|| format!("loading '{}'", args.source))?;
    let measurer = build_measurer(args.font.as_deref(), args.char_size)?;

    let cache = WordMetricsCache::shared(measurer);
    let mut layout = Layout::new(cache);
    layout.set_width(args.width);
    layout.set_view(View::new(
        args.width as f32 / 2.0,
        args.height as f32 / 2.0,
        args.width as f32,
        args.height as f32,
    ));
    layout.construct_from_document(&doc);
    layout.update();

    if args.json {
        println!("{}", serde_json::to_string_pretty(layout.boxes())?);
        return Ok(());
    }

    print_report(&layout);
    Ok(())
}

/// Pick the measurement backend.
///
/// An explicit `--font` must load or the run aborts; otherwise the
/// search list is tried and approximate fixed-ratio metrics are the
/// last resort.
fn build_measurer(font: Option<&Path>, char_size: f32) -> Result<Box<dyn TextMeasurer + Send>> {
    if let Some(path) = font {
        let measurer = FontTextMeasurer::from_path(path, char_size)
            .with_context(|| format!("loading font '{}'", path.display()))?;
        return Ok(Box::new(measurer));
    }

    for candidate in FONT_SEARCH_PATHS {
        if let Ok(measurer) = FontTextMeasurer::from_path(Path::new(candidate), char_size) {
            return Ok(Box::new(measurer));
        }
    }

    eprintln!(
        "{}",
        "[minnow cli] warning: no usable font found, using approximate metrics".yellow()
    );
    Ok(Box::new(ApproximateTextMeasurer { char_size }))
}

fn print_report(layout: &Layout) {
    let boxes = layout.boxes();
    let visible = boxes.iter().filter(|b| b.is_visible()).count();

    println!(
        "{} boxes ({} visible), content {}x{}",
        boxes.len(),
        visible,
        layout.max_width().unwrap_or(0),
        layout.max_height().unwrap_or(0),
    );

    for (index, line) in boxes.iter().enumerate() {
        let (x, y) = line.origin();
        let header = format!(
            "#{index:<3} ({x:>4},{y:>4}) {:>4}x{:<3}",
            line.width(),
            line.height()
        );
        let words = line.words().join(" ");

        if line.is_visible() {
            println!("{} {}", header.green(), words);
        } else {
            println!("{} {}", header.dimmed(), words.dimmed());
        }
    }
}
