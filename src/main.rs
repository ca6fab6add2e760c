use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use pyro_tools::engrave::{EngraveOptions, RasterEngraver};
use pyro_tools::output::write_gcode;

/// Convert a raster image to a pyrography G-code toolpath.
///
/// Darker pixels are engraved slower (more burn), lighter pixels
/// faster; pure white travels at the fast no-burn rate.
#[derive(Parser)]
#[command(name = "pyro-tools")]
struct Cli {
    /// Input raster image (BMP, PNG, JPEG)
    input: PathBuf,

    /// Output G-code file (default: input with extension replaced by .nc)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip the descriptive comment block at the top of the output
    #[arg(long)]
    no_header: bool,
}

const PROGRESS_BAR_WIDTH: usize = 25;

/// Redraw the progress bar in place; terminate the line at 100%.
fn draw_progress(fraction: f32) {
    let filled = ((fraction * PROGRESS_BAR_WIDTH as f32).round() as usize).min(PROGRESS_BAR_WIDTH);
    print!(
        "\r[{}{}] {:3.0}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled),
        fraction * 100.0
    );
    let _ = io::stdout().flush();
    if fraction >= 1.0 {
        println!();
    }
}

fn main() {
    // Instruction-level traces are suppressed unless RUST_LOG asks for them.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let output_path = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("nc"));

    let options = EngraveOptions {
        emit_header: !cli.no_header,
        ..Default::default()
    };

    let engraver = match RasterEngraver::from_file(&cli.input, options) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    let instructions = engraver.generate_with_progress(draw_progress);

    if let Err(e) = write_gcode(&output_path, &instructions) {
        eprintln!("Error: {}", e);
        process::exit(3);
    }

    println!(
        "Wrote {} instructions to '{}'",
        instructions.len(),
        output_path.display()
    );
}
