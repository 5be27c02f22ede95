//! sch-clip CLI
//!
//! Usage:
//!   sch-clip [OPTIONS] <FILE>
//!
//! Reads a .kicad_sch file, finds its labeled text boxes, renders the
//! schematic without them via `kicad-cli`, and rasterizes one cropped image
//! per text box via `cairosvg`, named after the box's label.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use clap::Parser;

use sch_clip::{analyze, plan_crops, ClipError, CropConfig, RasterRequest, SvgImage};

#[derive(Parser)]
#[command(name = "sch-clip")]
#[command(about = "Export labeled schematic regions as cropped images")]
struct Cli {
    /// Path to the .kicad_sch file
    input: PathBuf,

    /// Directory for the output images (defaults to <name>_pngs)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep intermediate files for inspection
    #[arg(long)]
    keep_temp: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), ClipError> {
    let config = match &cli.config {
        Some(path) => CropConfig::from_file(path)?,
        None => CropConfig::default(),
    };

    let source = fs::read_to_string(&cli.input)?;
    println!("Analyzing {}...", cli.input.display());

    let analysis = match analyze(&source) {
        Ok(analysis) => analysis,
        Err(ClipError::Parse(e)) => {
            eprintln!("{}", e.format(&source, &cli.input.display().to_string()));
            std::process::exit(1);
        }
        Err(e) => return Err(e),
    };
    println!("   Found {} text boxes.", analysis.regions.len());

    if analysis.regions.is_empty() {
        println!("No text boxes found. Exiting.");
        return Ok(());
    }

    let base = cli
        .input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "schematic".to_string());
    let output_dir = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{base}_pngs")));

    let mut scratch = Scratch::new(cli.keep_temp);
    let clean_path = scratch.track(cli.input.with_file_name(format!("{base}_clean_temp.kicad_sch")));
    fs::write(&clean_path, &analysis.cleaned)?;

    let temp_dir = scratch.track(PathBuf::from(format!("temp_sch_export_{base}")));
    let svg_path = render_schematic(&clean_path, &temp_dir)?;

    println!("Generating images");
    let image = SvgImage::parse(&fs::read_to_string(&svg_path)?)?;
    let scale = image.scale();
    let requests = plan_crops(&image, &analysis.regions, scale, &config);

    fs::create_dir_all(&output_dir)?;
    for request in &requests {
        let path = output_dir.join(format!("{}.{}", request.label, config.extension));
        rasterize(request, &path)?;
        println!("Generated image: {}", path.display());
    }
    println!("   Success! Images saved to: {}/", output_dir.display());
    Ok(())
}

/// Render the cleaned schematic to SVG with kicad-cli, returning the path of
/// the produced file.
fn render_schematic(clean_path: &Path, temp_dir: &Path) -> Result<PathBuf, ClipError> {
    fs::create_dir_all(temp_dir)?;
    let output = Command::new("kicad-cli")
        .args(["sch", "export", "svg", "-n", "--output"])
        .arg(temp_dir)
        .arg(clean_path)
        .output()
        .map_err(|e| ClipError::Tool(format!("failed to launch kicad-cli: {e}")))?;
    if !output.status.success() {
        return Err(ClipError::Tool(format!(
            "kicad-cli exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let mut svgs: Vec<PathBuf> = fs::read_dir(temp_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "svg"))
        .collect();
    svgs.sort();
    svgs.into_iter()
        .next()
        .ok_or_else(|| ClipError::Tool("kicad-cli produced no SVG file".to_string()))
}

/// Rasterize one cropped page with cairosvg, fed over stdin.
fn rasterize(request: &RasterRequest, path: &Path) -> Result<(), ClipError> {
    let mut child = Command::new("cairosvg")
        .arg("-")
        .arg("-o")
        .arg(path)
        .arg("-s")
        .arg(request.zoom.to_string())
        .stdin(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ClipError::Tool(format!("failed to launch cairosvg: {e}")))?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(request.svg.as_bytes())?;
    }
    let output = child
        .wait_with_output()
        .map_err(|e| ClipError::Tool(format!("cairosvg did not finish: {e}")))?;
    if !output.status.success() {
        return Err(ClipError::Tool(format!(
            "cairosvg exited with {} for '{}': {}",
            output.status,
            request.label,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}

/// Temporary paths removed on every exit path, success or failure.
struct Scratch {
    paths: Vec<PathBuf>,
    keep: bool,
}

impl Scratch {
    fn new(keep: bool) -> Self {
        Self {
            paths: Vec::new(),
            keep,
        }
    }

    fn track(&mut self, path: PathBuf) -> PathBuf {
        self.paths.push(path.clone());
        path
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        for path in &self.paths {
            if path.is_dir() {
                let _ = fs::remove_dir_all(path);
            } else if path.exists() {
                let _ = fs::remove_file(path);
            }
        }
    }
}
