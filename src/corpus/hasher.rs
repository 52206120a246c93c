use anyhow::{Context, Result};
use std::path::Path;

/// Fingerprint file contents with BLAKE3, streaming through a buffered
/// reader so arbitrarily large templates never load fully into memory.
/// Stored as payload metadata for change detection.
pub fn fingerprint_file(path: &Path) -> Result<String> {
    let mut hasher = blake3::Hasher::new();
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {} for fingerprinting", path.display()))?;
    let mut reader = std::io::BufReader::with_capacity(64 * 1024, file);
    std::io::copy(&mut reader, &mut hasher)?;
    Ok(hasher.finalize().to_hex().to_string())
}
