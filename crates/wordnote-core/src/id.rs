use std::fmt::Write;

use sha2::{Digest, Sha256};

use crate::date::DateKey;

/// Encoded fields longer than this are cut and tagged with a digest
const MAX_FIELD_LEN: usize = 120;
const DIGEST_HEX_LEN: usize = 16;

/// Joins the id fields; never emitted by `encode_field`
const FIELD_SEPARATOR: char = '|';
/// Marks a truncated field; never emitted by `encode_field`
const DIGEST_MARKER: char = '~';

/// Deterministic entry id: `dateKey|source|translated`, each text field percent-encoded
pub fn compute_id(date_key: DateKey, source: &str, translated: &str) -> String {
    format!(
        "{date_key}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
        bounded_field(source),
        bounded_field(translated)
    )
}

fn bounded_field(text: &str) -> String {
    let encoded = encode_field(text);
    if encoded.len() <= MAX_FIELD_LEN {
        return encoded;
    }

    let digest = format!("{:x}", Sha256::digest(text.as_bytes()));
    // encoded output is pure ASCII, so any byte index is a char boundary
    format!(
        "{}{DIGEST_MARKER}{}",
        &encoded[..MAX_FIELD_LEN],
        &digest[..DIGEST_HEX_LEN]
    )
}

fn encode_field(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.') {
            out.push(byte as char);
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}
