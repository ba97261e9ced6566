use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::{debug, info};

use crate::{
    artifact::Artifact,
    bit_packing::{pack, unpack},
    error::CodecError,
    frequency::FrequencyTable,
    tree::Tree,
};

pub const COMPRESSED_EXTENSION: &str = "compressed";

pub fn compress(content: &[u8]) -> Result<Vec<u8>, CodecError> {
    if content.is_empty() {
        return Err(CodecError::EmptyInput);
    }

    let frequencies = FrequencyTable::from_bytes(content);
    let tree = Tree::new(&frequencies)?;
    let codes = tree.generate_codes();
    debug!(
        "derived {} codes, longest is {} bits",
        codes.len(),
        codes.values().map(Vec::len).max().unwrap_or_default()
    );

    let packed = pack(&codes, content)?;
    let artifact = Artifact {
        frequencies,
        bit_count: packed.bit_count,
        packed: packed.bytes,
    };

    Ok(artifact.serialize())
}

pub fn decompress(content: &[u8]) -> Result<Vec<u8>, CodecError> {
    let artifact = Artifact::parse(content)?;
    debug!(
        "artifact holds {} symbols and {} bits",
        artifact.frequencies.len(),
        artifact.bit_count
    );

    let tree = Tree::new(&artifact.frequencies)?;
    let bits = unpack(&artifact.packed, artifact.bit_count)?;
    let decoded = tree.decode(&bits)?;

    let expected_length = artifact.frequencies.total();
    if decoded.len() as u64 != expected_length {
        return Err(CodecError::malformed(format!(
            "decoded {} bytes but the frequency table accounts for {expected_length}",
            decoded.len()
        )));
    }

    Ok(decoded)
}

/// `output` with the compressed artifact extension appended,
/// e.g. `notes.txt` becomes `notes.txt.compressed`.
pub fn compressed_path(output: impl AsRef<Path>) -> PathBuf {
    let mut path = output.as_ref().as_os_str().to_owned();
    path.push(".");
    path.push(COMPRESSED_EXTENSION);
    PathBuf::from(path)
}

/// Compresses `input_file` into `<output_file>.compressed` and returns the
/// path that was written.
pub fn compress_file(
    input_file: impl AsRef<Path>,
    output_file: impl AsRef<Path>,
) -> anyhow::Result<PathBuf> {
    let input_file = input_file.as_ref();
    let content = fs::read(input_file)
        .with_context(|| format!("Failed to read {}", input_file.display()))?;

    let compressed = compress(&content)
        .with_context(|| format!("Failed to compress {}", input_file.display()))?;

    let output_file = compressed_path(output_file);
    fs::write(&output_file, &compressed)
        .with_context(|| format!("Failed to write {}", output_file.display()))?;

    info!(
        "compressed {} bytes into {} bytes ({:.1}%) with {} distinct symbols",
        content.len(),
        compressed.len(),
        ratio(compressed.len(), content.len()),
        FrequencyTable::from_bytes(&content).len()
    );

    Ok(output_file)
}

pub fn decompress_file(
    input_file: impl AsRef<Path>,
    output_file: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let input_file = input_file.as_ref();
    let output_file = output_file.as_ref();
    let content = fs::read(input_file)
        .with_context(|| format!("Failed to read {}", input_file.display()))?;

    let decompressed = decompress(&content)
        .with_context(|| format!("Failed to decompress {}", input_file.display()))?;

    fs::write(output_file, &decompressed)
        .with_context(|| format!("Failed to write {}", output_file.display()))?;

    info!(
        "decompressed {} bytes into {} bytes",
        content.len(),
        decompressed.len()
    );

    Ok(())
}

fn ratio(part: usize, whole: usize) -> f64 {
    part as f64 * 100.0 / whole as f64
}
