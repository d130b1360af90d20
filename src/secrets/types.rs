//! Host-facing secret value wrapper.
//!
//! Every secret value that leaves this crate, and every credential that enters
//! it, travels as a [`SecretString`]. The wrapper keeps plaintext out of logs,
//! debug output and serialized responses; callers must ask for the value
//! explicitly with [`SecretString::expose_secret`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Placeholder written wherever a secret value would otherwise appear.
pub const REDACTED: &str = "[REDACTED]";

/// An opaque secret value.
///
/// - `Debug` prints `SecretString([REDACTED])`, `Display` prints `[REDACTED]`
/// - serializing always writes `"[REDACTED]"`; deserializing accepts the real value,
///   which is how values arrive from the Infisical API
/// - the buffer is zeroed on drop
///
/// ```rust,ignore
/// use infisical_secrets::SecretString;
///
/// let value = SecretString::new("postgres://user:pw@db/app");
/// tracing::info!(value = %value, "fetched");   // logs [REDACTED]
/// let url = value.expose_secret();             // explicit opt-in
/// ```
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    /// Wraps a plaintext value.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Returns the plaintext. Never log the result.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the plaintext.
    pub fn into_inner(mut self) -> String {
        std::mem::take(&mut self.0)
    }

    /// Length in bytes, without exposing the value.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(REDACTED)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretString)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString({})", REDACTED)
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
