//! Archive manifest model and line format
//!
//! A manifest is an ordered sequence of document entries, sorted by relative
//! path (byte-wise ascending) with no duplicates. The serialized form is one
//! entry per line, `path\tsize\thash`, UTF-8, no header: identical input
//! trees always produce byte-identical manifests.

pub mod builder;
pub mod hasher;
pub mod writer;

use crate::error::ArchiveError;
use crate::types::{Hash, HASH_HEX_LEN};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Identity and integrity metadata for one archived document.
///
/// Immutable once computed; regenerated on the next scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    /// Root-relative path, `/`-separated, NFC-normalized.
    pub relative_path: String,
    pub size_bytes: u64,
    pub content_hash: Hash,
}

impl DocumentEntry {
    /// Content hash as 64-char lowercase hex.
    pub fn hash_hex(&self) -> String {
        hex::encode(self.content_hash)
    }
}

/// Ordered, duplicate-free sequence of document entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<DocumentEntry>,
}

impl Manifest {
    /// Build a manifest from entries, sorting by relative path.
    ///
    /// Callers are responsible for deduplication (the builder resolves
    /// duplicates into diagnostics before this point).
    pub fn from_entries(mut entries: Vec<DocumentEntry>) -> Self {
        entries.sort_by(|a, b| a.relative_path.as_bytes().cmp(b.relative_path.as_bytes()));
        Self { entries }
    }

    pub fn entries(&self) -> &[DocumentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry sizes.
    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.size_bytes).sum()
    }

    /// Look up an entry by its relative path.
    pub fn get(&self, relative_path: &str) -> Option<&DocumentEntry> {
        self.entries
            .binary_search_by(|e| e.relative_path.as_bytes().cmp(relative_path.as_bytes()))
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Serialize to the line format: `path\tsize\thash\n` per entry.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = String::new();
        for entry in &self.entries {
            // Infallible for String writer.
            let _ = writeln!(
                out,
                "{}\t{}\t{}",
                entry.relative_path,
                entry.size_bytes,
                entry.hash_hex()
            );
        }
        out.into_bytes()
    }

    /// BLAKE3 digest of the serialized manifest, for `folio status`.
    pub fn digest(&self) -> Hash {
        hasher::hash_bytes(&self.to_bytes())
    }

    /// Parse the line format back into a manifest.
    ///
    /// Errors carry 1-based line numbers. Duplicate paths are rejected;
    /// entries in any order are accepted and re-sorted, so a hand-edited
    /// manifest still loads.
    pub fn parse(text: &str) -> Result<Self, ArchiveError> {
        let mut entries = Vec::new();
        let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split('\t');
            let (path, size, hash) = match (fields.next(), fields.next(), fields.next(), fields.next()) {
                (Some(p), Some(s), Some(h), None) => (p, s, h),
                _ => {
                    return Err(ArchiveError::ManifestParse {
                        line: line_no,
                        reason: "expected three tab-separated fields: path, size, hash".to_string(),
                    })
                }
            };

            if path.is_empty() {
                return Err(ArchiveError::ManifestParse {
                    line: line_no,
                    reason: "empty path".to_string(),
                });
            }

            let size_bytes: u64 = size.parse().map_err(|_| ArchiveError::ManifestParse {
                line: line_no,
                reason: format!("invalid size: {}", size),
            })?;

            if hash.len() != HASH_HEX_LEN {
                return Err(ArchiveError::ManifestParse {
                    line: line_no,
                    reason: format!("hash must be {} hex characters", HASH_HEX_LEN),
                });
            }
            let decoded = hex::decode(hash).map_err(|_| ArchiveError::ManifestParse {
                line: line_no,
                reason: format!("invalid hex in hash: {}", hash),
            })?;
            let mut content_hash: Hash = [0u8; 32];
            content_hash.copy_from_slice(&decoded);

            if !seen.insert(path.to_string()) {
                return Err(ArchiveError::ManifestParse {
                    line: line_no,
                    reason: format!("duplicate path: {}", path),
                });
            }

            entries.push(DocumentEntry {
                relative_path: path.to_string(),
                size_bytes,
                content_hash,
            });
        }

        Ok(Manifest::from_entries(entries))
    }

    /// Load and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, ArchiveError> {
        if !path.is_file() {
            return Err(ArchiveError::ManifestNotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }
}
