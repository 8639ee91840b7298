//! Command-line front end: text in, WAV out.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use tonefall::{synthesize_to_file, SynthesisOptions, WavEncoding};

#[derive(Parser)]
#[command(name = "tonefall", about = "Deterministic text-to-tone WAV generator")]
struct Args {
    /// Text to render. Mutually exclusive with --text-file.
    text: Option<String>,

    /// Read the text from a file instead.
    #[arg(long, conflicts_with = "text")]
    text_file: Option<PathBuf>,

    /// Output WAV path.
    #[arg(short, long, default_value = "speech.wav")]
    output: PathBuf,

    /// Explicit duration in seconds (default: derived from text length).
    #[arg(short, long)]
    duration: Option<f64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let text = match (&args.text, &args.text_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("cannot read text file: {}", path.display()))?,
        (None, None) => bail!("no input: pass TEXT or --text-file"),
    };

    let options = SynthesisOptions { duration_hint: args.duration, ..Default::default() };
    let encoding = synthesize_to_file(&text, &options, &args.output)
        .with_context(|| format!("synthesis failed for {}", args.output.display()))?;

    if encoding == WavEncoding::Pcm16 {
        eprintln!("float32 writer unavailable, wrote 16-bit PCM instead");
    }
    println!("Saved {}", args.output.display());
    Ok(())
}
