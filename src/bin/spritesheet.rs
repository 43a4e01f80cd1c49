use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "SPRITE STITCHER\nUsage: spritesheet --out file.png in1.{gif,png} in2.png ...";

#[derive(Parser, Debug)]
#[command(name = "spritesheet", version, about = "Stitch PNG and GIF frames into one sprite sheet")]
struct Cli {
    /// PNG file to write the sprite sheet to.
    #[arg(long, default_value = "out.png")]
    out: PathBuf,

    /// Input images (`.gif` or `.png`), packed in the order given.
    inputs: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if cli.inputs.is_empty() {
        println!("{USAGE}");
        std::process::exit(1);
    }

    let sheet = spritesheet::build_sheet(&cli.inputs, spritesheet::SheetOpts::default())
        .context("build sprite sheet")?;

    let cell = sheet.layout.cell;
    println!(
        "WIDTH {} HEIGHT {} SHEET {}x{}",
        cell.width, cell.height, sheet.canvas.width, sheet.canvas.height
    );

    spritesheet::write_png(&sheet.canvas, &cli.out)
        .with_context(|| format!("write png '{}'", cli.out.display()))?;

    eprintln!("wrote {}", cli.out.display());
    Ok(())
}
