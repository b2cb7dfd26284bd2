//! Command-line interface implementation

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::export::bmp::BmpHeader;
use crate::export::bytes::{code_listing, PackOrder};
use crate::export::{export_sprite_bmps, write_file};
use crate::gif::export_sprite_gif;
use crate::import::{sprite_from_gif, sprite_from_images, sprites_from_images, ImportError, Threshold};
use crate::settings::{load_settings, Settings};
use crate::sprite::Sprite;

const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// spritemaker - convert pixel art to 1-bit BMPs, byte arrays, and GIFs
#[derive(Parser)]
#[command(name = "smk")]
#[command(about = "spritemaker - convert pixel art to 1-bit BMPs, byte arrays, and GIFs")]
#[command(version)]
pub struct Cli {
    /// Path to a spritemaker.toml settings file (default: discovered)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert input images to 1-bit BMP files, one per frame
    Convert {
        /// Input image files (a single animated GIF expands to its frames)
        inputs: Vec<PathBuf>,

        /// Output directory (default: alongside the first input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write BITMAPV4HEADER files with an alpha channel mask
        #[arg(long)]
        v4: bool,

        /// Threshold on brightness instead of alpha
        #[arg(long)]
        luminance: bool,

        /// Downscale inputs so the largest dimension fits this size
        #[arg(long)]
        max_size: Option<u32>,

        /// Make one sprite per input file instead of one frame per file
        #[arg(long)]
        split: bool,
    },

    /// Emit a packed C byte-array listing for the input images
    Bytes {
        /// Input image files (a single animated GIF expands to its frames)
        inputs: Vec<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pack row-major, 8 pixels per byte, instead of 8-row pages
        #[arg(long)]
        horizontal: bool,

        /// Threshold on brightness instead of alpha
        #[arg(long)]
        luminance: bool,

        /// Downscale inputs so the largest dimension fits this size
        #[arg(long)]
        max_size: Option<u32>,
    },

    /// Render input images as frames of an animated GIF
    Gif {
        /// Input image files, one frame each, in order
        inputs: Vec<PathBuf>,

        /// Output file (default: {first input stem}.gif)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Delay per frame in milliseconds (default: from settings)
        #[arg(long)]
        delay: Option<u32>,

        /// Integer upscale factor (default: from settings)
        #[arg(long)]
        scale: Option<u32>,

        /// Play once instead of looping
        #[arg(long)]
        no_loop: bool,

        /// Threshold on brightness instead of alpha
        #[arg(long)]
        luminance: bool,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    match cli.command {
        Commands::Convert { inputs, output, v4, luminance, max_size, split } => {
            run_convert(&settings, &inputs, output.as_deref(), v4, luminance, max_size, split)
        }
        Commands::Bytes { inputs, output, horizontal, luminance, max_size } => {
            run_bytes(&settings, &inputs, output.as_deref(), horizontal, luminance, max_size)
        }
        Commands::Gif { inputs, output, delay, scale, no_loop, luminance } => {
            run_gif(&settings, &inputs, output.as_deref(), delay, scale, no_loop, luminance)
        }
    }
}

/// Load the inputs as one sprite. A single animated GIF becomes one frame
/// per GIF frame; anything else becomes one frame per file.
fn load_sprite(
    inputs: &[PathBuf],
    threshold: Threshold,
    max_size: Option<u32>,
) -> Result<Sprite, ImportError> {
    match inputs {
        [only] if is_gif(only) => sprite_from_gif(only, threshold),
        _ => sprite_from_images(inputs, threshold, max_size),
    }
}

fn is_gif(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"))
}

/// The `--luminance` flag overrides settings; otherwise the settings file
/// picks the threshold mode.
fn threshold_for(settings: &Settings, luminance: bool) -> Threshold {
    if luminance || !settings.use_alpha_channel {
        Threshold::Luminance
    } else {
        Threshold::Alpha
    }
}

fn run_convert(
    settings: &Settings,
    inputs: &[PathBuf],
    output: Option<&Path>,
    v4: bool,
    luminance: bool,
    max_size: Option<u32>,
    split: bool,
) -> ExitCode {
    if inputs.is_empty() {
        eprintln!("Error: no input files");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let max_size = max_size.or(settings.import_max_size);
    let threshold = threshold_for(settings, luminance);
    let sprites = if split || settings.split_files {
        match sprites_from_images(inputs, threshold, max_size) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        match load_sprite(inputs, threshold, max_size) {
            Ok(s) => vec![s],
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    };

    let palette = match settings.palette() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let dir = match output {
        Some(d) => d.to_path_buf(),
        None => inputs[0].parent().unwrap_or(Path::new(".")).to_path_buf(),
    };
    let header = if v4 { BmpHeader::V4 } else { BmpHeader::Info };

    for sprite in &sprites {
        match export_sprite_bmps(sprite, &palette, header, &dir) {
            Ok(paths) => {
                for path in paths {
                    println!("{}", path.display());
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn run_bytes(
    settings: &Settings,
    inputs: &[PathBuf],
    output: Option<&Path>,
    horizontal: bool,
    luminance: bool,
    max_size: Option<u32>,
) -> ExitCode {
    if inputs.is_empty() {
        eprintln!("Error: no input files");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let max_size = max_size.or(settings.import_max_size);
    let sprite = match load_sprite(inputs, threshold_for(settings, luminance), max_size) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let order = if horizontal {
        PackOrder::Horizontal
    } else {
        settings.pack_order
    };
    let listing = code_listing(&sprite, order);

    match output {
        Some(path) => match write_file(path, listing.as_bytes()) {
            Ok(()) => ExitCode::from(EXIT_SUCCESS),
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        },
        None => {
            print!("{}", listing);
            ExitCode::from(EXIT_SUCCESS)
        }
    }
}

fn run_gif(
    settings: &Settings,
    inputs: &[PathBuf],
    output: Option<&Path>,
    delay: Option<u32>,
    scale: Option<u32>,
    no_loop: bool,
    luminance: bool,
) -> ExitCode {
    if inputs.is_empty() {
        eprintln!("Error: no input files");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let sprite = match load_sprite(inputs, threshold_for(settings, luminance), None) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let palette = match settings.palette() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let path = match output {
        Some(p) => p.to_path_buf(),
        None => inputs[0].with_extension("gif"),
    };
    let delay_ms = delay.unwrap_or(settings.frame_delay_ms);
    let scale = scale.unwrap_or(settings.canvas_scale);

    match export_sprite_gif(&sprite, &palette, scale, delay_ms, !no_loop, &path) {
        Ok(()) => {
            println!("{}", path.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
