//! Store-safe encoding of registry URLs.
//!
//! Registry URLs contain `:` and `/`, which would be read as path structure by
//! the secret store. The helper therefore addresses each secret by the base64
//! form of the URL Docker sent, so that the same URL always maps to the same
//! store path and the original bytes can be recovered from the key.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Mount under which registry credentials are stored.
pub const SECRET_MOUNT: &str = "secret";

/// Strip the surrounding whitespace Docker adds to the URL it writes on stdin.
///
/// Whitespace is Unicode `White_Space`, so a vertical tab, NEL or no-break
/// space at either end is dropped too. Input that is not UTF-8 is trimmed of
/// ASCII whitespace only.
pub fn normalize(raw: &[u8]) -> &[u8] {
    match std::str::from_utf8(raw) {
        Ok(text) => text.trim().as_bytes(),
        Err(_) => trim_ascii_space(raw),
    }
}

fn trim_ascii_space(raw: &[u8]) -> &[u8] {
    let is_space = |b: &u8| b.is_ascii_whitespace() || *b == 0x0B;
    let start = raw.iter().position(|b| !is_space(b)).unwrap_or(raw.len());
    let end = raw.iter().rposition(|b| !is_space(b)).map_or(start, |i| i + 1);
    &raw[start..end]
}

/// Encoded registry URL used as the last segment of the secret path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey(String);

impl LookupKey {
    /// Encode already-normalized input bytes with padded standard base64.
    pub fn encode(input: &[u8]) -> Self {
        Self(STANDARD.encode(input))
    }

    /// Normalize raw stdin bytes and encode them.
    pub fn from_raw(raw: &[u8]) -> Self {
        Self::encode(normalize(raw))
    }

    /// Recover the bytes the key was built from.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path passed to the secret store read, e.g. `secret/cmVnaXN0cnk=`.
    pub fn store_path(&self) -> String {
        format!("{SECRET_MOUNT}/{}", self.0)
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
