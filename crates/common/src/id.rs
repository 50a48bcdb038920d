//! ID generation utilities.

use serde::{Deserialize, Deserializer};
use ulid::Ulid;

/// ID generator for entities.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a new ULID-based ID.
    ///
    /// ULIDs are:
    /// - Lexicographically sortable
    /// - Monotonically increasing within the same millisecond
    /// - Shorter than UUIDs when represented as strings
    #[must_use]
    pub fn generate(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }

    /// Generate an ID carrying a readable prefix, e.g. `post_01j...`.
    #[must_use]
    pub fn generate_prefixed(&self, prefix: &str) -> String {
        format!("{prefix}_{}", self.generate())
    }
}

/// Deserialize an optional id sent either as a JSON string or a JSON integer.
///
/// Integers become their decimal string, so `{"id": 5}` and `{"id": "5"}`
/// address the same row.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(
        Option::<RawId>::deserialize(deserializer)?.and_then(|raw| {
            let id = match raw {
                RawId::Text(s) => s.trim().to_string(),
                RawId::Unsigned(n) => n.to_string(),
                RawId::Signed(n) => n.to_string(),
            };
            (!id.is_empty()).then_some(id)
        }),
    )
}
