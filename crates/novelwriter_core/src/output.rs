//! Output types from generation replies.

use serde::{Deserialize, Serialize};

/// One piece of a generation reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),
    /// The model declined to answer.
    Refusal(String),
}
