mod source;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use mpx_core::encode::{assemble, FrameSpec};
use mpx_core::format::Tempo;
use mpx_core::serialize;

use crate::source::ImageSource;

#[derive(Parser)]
#[command(name = "mpx-convert", about = "Convert raster frames to an MPX animation")]
struct Cli {
    /// Input image files, one per frame, in animation order. All
    /// frames must share one width and height.
    #[arg(required = true)]
    frames: Vec<PathBuf>,

    /// Output path (default: first frame with the extension swapped)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Tempo for every frame, in 10 ms units (1-255)
    #[arg(long, default_value = "30")]
    tempo: u8,

    /// Per-frame tempos, comma separated; overrides --tempo and must
    /// list one value per frame
    #[arg(long, value_delimiter = ',')]
    tempos: Option<Vec<u8>>,

    /// Emit a C source array with this name instead of an MPX binary
    #[arg(long, value_name = "NAME")]
    c_array: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let tempos = frame_tempos(&cli)?;

    let output_path = cli.output.clone().unwrap_or_else(|| {
        let mut p = cli.frames[0].clone();
        p.set_extension(if cli.c_array.is_some() { "c" } else { "mpx" });
        p
    });

    let mut frames = Vec::with_capacity(cli.frames.len());
    for (path, tempo) in cli.frames.iter().zip(tempos) {
        let source = ImageSource::open(path)?;
        eprintln!(
            "{} ---> tempo {}",
            path.display(),
            tempo.as_byte()
        );
        frames.push(FrameSpec::new(source, tempo));
    }

    let container = assemble(&frames).context("assembly failed")?;
    eprintln!(
        "{} colors, {} frames, {} bytes",
        container.non_reserved_colors(),
        container.frame_count(),
        container.len()
    );

    if let Some(ref name) = cli.c_array {
        let text = serialize::to_source_text(&container, name);
        fs::write(&output_path, text)
            .with_context(|| format!("failed to write {}", output_path.display()))?;
    } else {
        fs::write(&output_path, serialize::to_binary(&container))
            .with_context(|| format!("failed to write {}", output_path.display()))?;
    }
    eprintln!("Wrote {}", output_path.display());

    Ok(())
}

/// One validated tempo per frame, from --tempos if given, otherwise
/// the global --tempo repeated.
fn frame_tempos(cli: &Cli) -> anyhow::Result<Vec<Tempo>> {
    match &cli.tempos {
        Some(values) => {
            if values.len() != cli.frames.len() {
                bail!(
                    "--tempos lists {} values for {} frames",
                    values.len(),
                    cli.frames.len()
                );
            }
            values
                .iter()
                .map(|&v| Tempo::new(v).map_err(Into::into))
                .collect()
        }
        None => {
            let tempo = Tempo::new(cli.tempo)?;
            Ok(vec![tempo; cli.frames.len()])
        }
    }
}
