//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Chat role of a message sender.
///
/// # Examples
///
/// ```
/// use novelwriter_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::System), "system");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System messages provide context and instructions
    #[display("system")]
    System,
    /// User messages carry the prompt
    #[display("user")]
    User,
    /// Assistant messages are model replies
    #[display("assistant")]
    Assistant,
}
