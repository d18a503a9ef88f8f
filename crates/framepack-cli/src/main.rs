use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{ArgAction, Parser};
use framepack_core::{AtlasBuilder, PackConfig, SortKey, to_json};
use image::{ImageReader, RgbaImage};
use tracing::{error, info};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "framepack",
    about = "Pack images into a texture atlas",
    version,
    author,
    arg_required_else_help = true
)]
struct Cli {
    // Input/Output
    /// Input image files or directories (searched recursively)
    #[arg(required = true, help_heading = "Input/Output")]
    inputs: Vec<PathBuf>,
    /// Output base name (writes <name>.png and <name>.json)
    #[arg(short, long, default_value = "output", help_heading = "Input/Output")]
    output: String,

    // Packing
    /// Padding reserved to the right of and below each frame (px)
    #[arg(short, long, default_value_t = 1, help_heading = "Packing")]
    padding: u32,
    /// Fixed canvas size WxH (e.g. 1024x1024); grows on demand when unset
    #[arg(short, long, value_parser = parse_size, help_heading = "Packing")]
    size: Option<(u32, u32)>,
    /// Disable 90 degree rotation
    #[arg(short = 't', long, default_value_t = false, help_heading = "Packing")]
    no_rotate: bool,
    /// Do not round the canvas up to powers of two
    #[arg(short = 'w', long, default_value_t = false, help_heading = "Packing")]
    no_pow2: bool,
    /// Do not trim transparent borders
    #[arg(short = 'm', long, default_value_t = false, help_heading = "Packing")]
    no_trim: bool,
    /// Packing order: area | max-side | perimeter
    #[arg(long, default_value = "area", help_heading = "Packing")]
    sort: String,

    // Logging/UX
    /// Disable the loading progress bar
    #[arg(long, default_value_t = false, help_heading = "Logging/UX")]
    no_progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(short, long, default_value_t = false, help_heading = "Logging/UX")]
    quiet: bool,
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got `{s}`"))?;
    let w = w
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("bad width: {e}"))?;
    let h = h
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("bad height: {e}"))?;
    Ok((w, h))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let sort: SortKey = cli.sort.parse().map_err(|_| {
        anyhow::anyhow!(
            "unknown sort key: {} (expected area | max-side | perimeter)",
            cli.sort
        )
    })?;

    let mut cfg = PackConfig::builder()
        .padding(cli.padding)
        .allow_rotate(!cli.no_rotate)
        .pow2(!cli.no_pow2)
        .alpha_trim(!cli.no_trim)
        .sort(sort);
    if let Some((w, h)) = cli.size {
        cfg = cfg.fixed_size(w, h);
    }
    let cfg = cfg.build();

    let paths = gather_paths(&cli.inputs);
    if paths.is_empty() {
        anyhow::bail!("no image files found under the given inputs");
    }

    let start = Instant::now();
    let inputs = load_images_with_progress(&paths, !cli.no_progress && !cli.quiet)?;
    info!(
        count = inputs.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "loaded input images"
    );
    if inputs.is_empty() {
        anyhow::bail!("none of the inputs could be decoded");
    }

    let mut builder = AtlasBuilder::new();
    for (key, img) in inputs {
        builder.add(key, img);
    }

    let start = Instant::now();
    let out = builder.pack(&cfg)?;
    let stats = out.stats();
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "{}",
        stats.summary()
    );

    let placed: Vec<_> = out.atlas.placed().collect();
    println!("Packed {}:", placed.len());
    for (name, p) in &placed {
        println!(
            "  {} [{}, {}] - [{}, {}]",
            name,
            p.frame.x,
            p.frame.y,
            p.frame.x + p.frame.w,
            p.frame.y + p.frame.h
        );
    }
    let failed: Vec<_> = out.atlas.failed().collect();
    if !failed.is_empty() {
        println!("Failed {}:", failed.len());
        for (name, _) in &failed {
            println!("  {}", name);
        }
    }

    let tex_path = format!("{}.png", cli.output);
    out.image
        .save(&tex_path)
        .with_context(|| format!("write {}", tex_path))?;
    println!("Texture written: {}.", tex_path);

    let image_name = Path::new(&tex_path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(&tex_path);
    let meta_path = format!("{}.json", cli.output);
    let json = serde_json::to_string_pretty(&to_json(&out.atlas, image_name))?;
    fs::write(&meta_path, json).with_context(|| format!("write {}", meta_path))?;
    println!("Meta data written: {}.", meta_path);

    Ok(())
}

fn gather_paths(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut list: Vec<PathBuf> = Vec::new();
    for input in inputs {
        if input.is_file() {
            if is_image(input) {
                list.push(input.clone());
            }
        } else {
            for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
                let p = entry.path();
                if p.is_file() && is_image(p) {
                    list.push(p.to_path_buf());
                }
            }
        }
    }
    list
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "bmp" | "tga" | "gif")
    )
}

fn load_images_with_progress(
    paths: &[PathBuf],
    progress: bool,
) -> anyhow::Result<Vec<(String, RgbaImage)>> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        b.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}",
            )
            .unwrap(),
        );
        Some(b)
    } else {
        None
    };
    let mut list = Vec::with_capacity(paths.len());
    for p in paths {
        let msg = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(b) = &bar {
            b.set_message(msg.to_string());
        }
        match load_image(p) {
            Ok(img) => {
                let key = p.to_string_lossy().replace('\\', "/");
                list.push((key, img));
            }
            Err(e) => {
                error!(?p, error = %e, "skip image");
            }
        }
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(list)
}

fn load_image(p: &Path) -> anyhow::Result<RgbaImage> {
    let img = ImageReader::open(p)?.with_guessed_format()?.decode()?;
    Ok(img.to_rgba8())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}
