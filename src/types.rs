//! Core type aliases shared across the scan and manifest layers.

/// BLAKE3 content digest, 32 raw bytes. Rendered as 64-char lowercase hex
/// at the manifest and CLI boundaries.
pub type Hash = [u8; 32];

/// Length of a hex-encoded [`Hash`].
pub const HASH_HEX_LEN: usize = 64;
