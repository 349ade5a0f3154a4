//! Identity tokens: the key that correlates a component with its rendered subtree.

use std::fmt;

use rand::RngCore;

/// A globally unique, immutable component identity.
///
/// Generated tokens are random version-4 UUID strings (122 random bits), e.g.
/// `3f2b8c1e-9a4d-4e6f-8b2a-1c0d9e8f7a6b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityToken(String);

impl IdentityToken {
    /// Generate a fresh random token.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        // Version 4, RFC 4122 variant.
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;

        let mut out = String::with_capacity(36);
        for (i, byte) in bytes.iter().enumerate() {
            if matches!(i, 4 | 6 | 8 | 10) {
                out.push('-');
            }
            out.push_str(&format!("{byte:02x}"));
        }
        Self(out)
    }

    /// Wrap a caller-supplied token. Returns `None` for empty or
    /// whitespace-only input.
    pub fn from_string(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Conventional id of a named sub-element: `"<token>-<name>"`.
    pub fn ref_id(&self, name: &str) -> String {
        format!("{}-{}", self.0, name)
    }
}

impl fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IdentityToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
