use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;

/// Memory-map a file for read-only access.
///
/// # Safety
/// The mapping is read-only. Callers must not concurrently truncate or replace
/// the underlying file while the `Mmap` is live.
fn mmap_file(path: &Path) -> Result<Mmap> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    // SAFETY: We only read from this mapping; no concurrent modification of these files.
    unsafe {
        Mmap::map(&file).with_context(|| format!("Failed to memory-map file: {}", path.display()))
    }
}

/// Load a document and normalize it for matching.
///
/// Empty files are returned as an empty buffer without mapping, since mapping
/// zero bytes fails on some platforms.
pub fn load_document(path: &Path) -> Result<Vec<u8>> {
    let len = std::fs::metadata(path)
        .with_context(|| format!("Failed to stat file: {}", path.display()))?
        .len();
    if len == 0 {
        return Ok(Vec::new());
    }
    let mmap = mmap_file(path)?;
    Ok(normalize(&mmap))
}

/// Normalize a document in one pass: lowercase every ASCII letter, collapse
/// each whitespace run into a single space, and drop leading and trailing
/// whitespace.
pub fn normalize(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    for &byte in input {
        if byte.is_ascii_whitespace() {
            if out.last().is_some_and(|&prev| prev != b' ') {
                out.push(b' ');
            }
        } else {
            out.push(byte.to_ascii_lowercase());
        }
    }
    if out.last() == Some(&b' ') {
        out.pop();
    }
    out
}
