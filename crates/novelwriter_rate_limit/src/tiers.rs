//! Credential tiers and keys.
//!
//! Credentials come in two pools. The primary pool holds free-tier keys and is
//! used first; the secondary pool holds paid keys and takes over once every
//! primary key is exhausted.

use serde::{Deserialize, Serialize};

/// Which pool a credential belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Free keys, tried first
    Primary,
    /// Paid keys, used once the free pool runs dry
    Secondary,
}

impl Tier {
    /// Billing label used in logs.
    pub fn billing_label(self) -> &'static str {
        match self {
            Tier::Primary => "free",
            Tier::Secondary => "paid",
        }
    }
}

/// An API key that never prints its secret.
///
/// `Debug` and `Display` show only the last eight characters.
///
/// # Examples
///
/// ```
/// use novelwriter_rate_limit::ApiKey;
///
/// let key = ApiKey::new("sk-or-v1-0123456789abcdef");
/// assert_eq!(key.fingerprint(), "...89abcdef");
/// assert_eq!(format!("{}", key), "...89abcdef");
/// assert_eq!(key.expose(), "sk-or-v1-0123456789abcdef");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw secret, for request headers only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Last eight characters, prefixed with an ellipsis.
    pub fn fingerprint(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        let start = chars.len().saturating_sub(8);
        format!("...{}", chars[start..].iter().collect::<String>())
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKey").field(&self.fingerprint()).finish()
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.fingerprint())
    }
}
