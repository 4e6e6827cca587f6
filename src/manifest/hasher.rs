//! Content hash computation using BLAKE3

use crate::types::Hash;
use blake3::Hasher;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

const READ_BUF_LEN: usize = 64 * 1024;

/// Compute the content hash of a file by streaming it through BLAKE3.
///
/// The file is read sequentially with a fixed-size buffer, so arbitrarily
/// large documents hash in constant memory. Any read error (including the
/// file disappearing between walk and hash) is returned to the caller,
/// which records it as a `HashFailure` diagnostic and skips the entry.
pub fn hash_file(path: &Path) -> io::Result<Hash> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Hasher::new();
    let mut buf = [0u8; READ_BUF_LEN];

    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(*hasher.finalize().as_bytes())
}

/// Compute the content hash of an in-memory byte slice.
///
/// Produces the same digest as [`hash_file`] over a file with identical
/// content; also used for the manifest digest shown by `folio status`.
pub fn hash_bytes(content: &[u8]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(content);
    *hasher.finalize().as_bytes()
}
