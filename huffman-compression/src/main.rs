use std::{fs, path::PathBuf, process};

use anyhow::{bail, Context};
use clap::Parser;
use huffman_compression::{compress_file, decompress_file};

fn main() {
    env_logger::init();

    let args = Args::parse();

    match run(args) {
        Ok(written) => println!("{}", written.display()),
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(1);
        }
    }
}

/// Validates the arguments, then compresses or decompresses and returns the
/// path that was written.
fn run(args: Args) -> anyhow::Result<PathBuf> {
    let input_file = args.file.context("Please specify the file to compress")?;
    if !input_file.is_file() {
        bail!("File {} does not exist", input_file.display());
    }

    if args.compress && args.decompress {
        bail!("Choose either compress or decompress");
    }

    let output_file = args.output.context("Please specify the output file")?;

    if args.decompress {
        decompress_file(&input_file, &output_file)?;
        return Ok(output_file);
    }

    let input_length = fs::metadata(&input_file)
        .with_context(|| format!("Failed to read {}", input_file.display()))?
        .len();
    if input_length == 0 {
        bail!("File {} is empty, nothing to compress", input_file.display());
    }

    compress_file(&input_file, &output_file)
}

/// Compress files with Huffman coding, or restore them.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File to compress, or to decompress with `-d`
    file: Option<PathBuf>,
    /// Output file; compressing appends `.compressed` to it
    output: Option<PathBuf>,
    /// Compress the file (default)
    #[arg(short, long)]
    compress: bool,
    /// Decompress the file
    #[arg(short, long)]
    decompress: bool,
}
