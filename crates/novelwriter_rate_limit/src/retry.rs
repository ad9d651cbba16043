//! Bounded retry with credential rotation.

use crate::{ApiKey, CredentialManager, Tier};
use novelwriter_error::{
    CredentialError, CredentialErrorKind, NovelwriterError, NovelwriterErrorKind,
    NovelwriterResult,
};
use std::future::Future;
use std::sync::Mutex;
use tokio_retry2::strategy::FixedInterval;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, instrument, warn};

/// Attempts made per request when nothing else is configured.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

const QUOTA_MARKERS: [&str; 3] = ["rate limit", "quota", "capacity"];

/// Whether an error message reads like a rate limit, quota or capacity refusal.
///
/// # Examples
///
/// ```
/// use novelwriter_rate_limit::is_quota_message;
///
/// assert!(is_quota_message("429: Rate limit exceeded for free tier"));
/// assert!(is_quota_message("Daily QUOTA reached"));
/// assert!(!is_quota_message("invalid request body"));
/// ```
pub fn is_quota_message(message: &str) -> bool {
    let lowered = message.to_lowercase();
    QUOTA_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Whether an error should exhaust the credential and trigger a retry.
///
/// Throttling statuses and rate-limit errors from the provider qualify by
/// kind; anything else only when its message reads like a quota refusal.
pub fn is_quota_error(error: &NovelwriterError) -> bool {
    match error.kind() {
        NovelwriterErrorKind::Provider(e) if e.kind.is_throttled() => true,
        _ => is_quota_message(&error.to_string()),
    }
}

/// Whether an error is a transport failure rather than a provider answer.
pub fn is_transport_error(error: &NovelwriterError) -> bool {
    matches!(error.kind(), NovelwriterErrorKind::Http(_))
}

/// Run `op` with a rotating credential, retrying quota failures.
///
/// Each attempt acquires a fresh credential. A quota-like failure marks the
/// credential exhausted and is retried at once; any other failure is
/// permanent. Transport failures are recorded against the credential before
/// they propagate. When every attempt hits a quota, the last error is
/// returned.
///
/// The manager lock is held only while acquiring or reporting, never across
/// the awaited operation.
///
/// # Errors
///
/// Returns the operation's error, or a credential error if `max_attempts` is
/// zero or the lock is poisoned.
///
/// # Examples
///
/// ```
/// use novelwriter_rate_limit::{with_rotation, CredentialManager, CredentialPools};
/// use std::sync::Mutex;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut pools = CredentialPools::default();
/// pools.add_primary("free-key");
/// let manager = Mutex::new(CredentialManager::new(pools)?);
///
/// let reply = with_rotation(&manager, 3, |key, tier| async move {
///     Ok::<_, novelwriter_error::NovelwriterError>(format!("{} via {}", key, tier))
/// })
/// .await?;
/// assert_eq!(reply, "...free-key via primary");
/// # Ok(())
/// # }
/// ```
#[instrument(skip(manager, op))]
pub async fn with_rotation<T, F, Fut>(
    manager: &Mutex<CredentialManager>,
    max_attempts: u32,
    mut op: F,
) -> NovelwriterResult<T>
where
    F: FnMut(ApiKey, Tier) -> Fut,
    Fut: Future<Output = NovelwriterResult<T>>,
{
    if max_attempts == 0 {
        return Err(CredentialError::new(CredentialErrorKind::ZeroAttempts).into());
    }

    // Rotation replaces backoff: the next attempt goes out at once on a new key.
    let strategy = FixedInterval::from_millis(0).take(max_attempts as usize - 1);
    let mut attempt = 0u32;

    Retry::spawn(strategy, || {
        attempt += 1;
        let attempt = attempt;
        let pending = lock(manager).map(|mut guard| guard.acquire()).map(|(key, tier)| {
            debug!(attempt, tier = %tier, key = %key, "Sending request");
            let call = op(key.clone(), tier);
            (key, tier, call)
        });

        async move {
            let (key, tier, call) = match pending {
                Ok(pending) => pending,
                Err(error) => return Err(RetryError::Permanent(error)),
            };
            match call.await {
                Ok(value) => Ok(value),
                Err(error) if is_quota_error(&error) => {
                    warn!(
                        attempt,
                        max_attempts,
                        tier = %tier,
                        key = %key,
                        error = %error,
                        "Quota reached, rotating credential"
                    );
                    match report(manager, |guard| guard.report_exhausted(&key)) {
                        Ok(()) => Err(RetryError::Transient {
                            err: error,
                            retry_after: None,
                        }),
                        Err(poisoned) => Err(RetryError::Permanent(poisoned)),
                    }
                }
                Err(error) => {
                    if is_transport_error(&error) {
                        if let Err(poisoned) =
                            report(manager, |guard| guard.report_transient_failure(&key))
                        {
                            return Err(RetryError::Permanent(poisoned));
                        }
                    }
                    Err(RetryError::Permanent(error))
                }
            }
        }
    })
    .await
}

fn lock(
    manager: &Mutex<CredentialManager>,
) -> NovelwriterResult<std::sync::MutexGuard<'_, CredentialManager>> {
    manager
        .lock()
        .map_err(|_| CredentialError::new(CredentialErrorKind::LockPoisoned).into())
}

fn report(
    manager: &Mutex<CredentialManager>,
    update: impl FnOnce(&mut CredentialManager),
) -> NovelwriterResult<()> {
    update(&mut *lock(manager)?);
    Ok(())
}
