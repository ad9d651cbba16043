//! Credential rotation, quota recovery and configuration.
//!
//! Every outbound generation request borrows a credential from the
//! [`CredentialManager`]. Free-tier keys are tried first; once all of them are
//! exhausted the manager moves to the paid pool for the rest of the run.
//! [`with_rotation`] wraps a request in a bounded retry loop that rotates keys
//! on quota failures.
//!
//! ```
//! use novelwriter_rate_limit::{CredentialManager, CredentialPools, Tier};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pools = CredentialPools::default();
//! pools.add_primary("free-1");
//! pools.add_primary("free-2");
//! pools.add_secondary("paid-1");
//! let mut manager = CredentialManager::new(pools)?;
//!
//! for _ in 0..2 {
//!     let (key, _) = manager.acquire();
//!     manager.report_exhausted(&key);
//! }
//! assert_eq!(manager.acquire().1, Tier::Secondary);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod manager;
mod retry;
mod tiers;

pub use config::{GenreEntry, NovelwriterConfig, ProviderSettings, WorkflowSettings};
pub use manager::{CredentialManager, CredentialPools};
pub use retry::{
    DEFAULT_MAX_ATTEMPTS, is_quota_error, is_quota_message, is_transport_error, with_rotation,
};
pub use tiers::{ApiKey, Tier};
