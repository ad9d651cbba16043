//! Round-robin credential rotation across the primary and secondary pools.

use crate::{ApiKey, Tier};
use novelwriter_error::{CredentialError, CredentialErrorKind, NovelwriterResult};
use tracing::{debug, info, instrument, warn};

/// Credentials collected at startup, before the manager takes ownership.
///
/// Blank and duplicate keys are skipped.
///
/// # Examples
///
/// ```
/// use novelwriter_rate_limit::CredentialPools;
///
/// let mut pools = CredentialPools::default();
/// assert!(pools.add_primary("free-key-1"));
/// assert!(!pools.add_primary("free-key-1"));
/// assert!(pools.add_secondary("paid-key-1"));
/// assert_eq!(pools.primary().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CredentialPools {
    primary: Vec<ApiKey>,
    secondary: Vec<ApiKey>,
    source_hint: Option<String>,
}

impl CredentialPools {
    /// Read both pools from environment variables.
    ///
    /// Each variable may hold one key or a comma-separated list.
    #[instrument(skip_all, fields(primary_var = %primary_var, secondary_var = %secondary_var))]
    pub fn from_env(primary_var: &str, secondary_var: &str) -> Self {
        let mut pools = Self {
            source_hint: Some(format!("set {} or {}", primary_var, secondary_var)),
            ..Self::default()
        };
        if let Ok(value) = std::env::var(primary_var) {
            for key in split_keys(&value) {
                pools.add_primary(key);
            }
        }
        if let Ok(value) = std::env::var(secondary_var) {
            for key in split_keys(&value) {
                pools.add_secondary(key);
            }
        }
        debug!(
            primary = pools.primary.len(),
            secondary = pools.secondary.len(),
            "Loaded credentials from environment"
        );
        pools
    }

    /// Add a free-tier key. Returns false if it was blank or already present.
    pub fn add_primary(&mut self, secret: impl Into<String>) -> bool {
        Self::push_unique(&mut self.primary, secret.into(), Tier::Primary)
    }

    /// Add a paid-tier key. Returns false if it was blank or already present.
    pub fn add_secondary(&mut self, secret: impl Into<String>) -> bool {
        Self::push_unique(&mut self.secondary, secret.into(), Tier::Secondary)
    }

    /// Primary keys in insertion order.
    pub fn primary(&self) -> &[ApiKey] {
        &self.primary
    }

    /// Secondary keys in insertion order.
    pub fn secondary(&self) -> &[ApiKey] {
        &self.secondary
    }

    /// True when neither pool has a key.
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }

    fn push_unique(pool: &mut Vec<ApiKey>, secret: String, tier: Tier) -> bool {
        let secret = secret.trim();
        if secret.is_empty() {
            return false;
        }
        let key = ApiKey::new(secret);
        if pool.contains(&key) {
            debug!(tier = %tier, key = %key, "Ignoring duplicate API key");
            return false;
        }
        debug!(tier = %tier, key = %key, "Added API key");
        pool.push(key);
        true
    }
}

fn split_keys(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|key| !key.is_empty())
}

#[derive(Debug, Clone)]
struct PooledKey {
    key: ApiKey,
    exhausted: bool,
    transient_failures: u32,
}

impl PooledKey {
    fn new(key: ApiKey) -> Self {
        Self {
            key,
            exhausted: false,
            transient_failures: 0,
        }
    }
}

/// Hands out credentials and tracks which ones are exhausted.
///
/// The manager starts on the primary pool and moves to the secondary pool,
/// for good, once every primary key is exhausted. When the active pool is
/// entirely exhausted its flags are cleared and rotation continues, since
/// exhaustion is often a time-windowed rate limit.
///
/// The bookkeeping is per run and not meant to be shared between concurrent
/// workflow runs.
///
/// # Examples
///
/// ```
/// use novelwriter_rate_limit::{CredentialManager, CredentialPools, Tier};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut pools = CredentialPools::default();
/// pools.add_primary("free-aaaaaaaa");
/// pools.add_secondary("paid-bbbbbbbb");
/// let mut manager = CredentialManager::new(pools)?;
///
/// let (key, tier) = manager.acquire();
/// assert_eq!(tier, Tier::Primary);
/// manager.report_exhausted(&key);
///
/// let (_, tier) = manager.acquire();
/// assert_eq!(tier, Tier::Secondary);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CredentialManager {
    primary: Vec<PooledKey>,
    secondary: Vec<PooledKey>,
    active: Tier,
    cursor: usize,
}

impl CredentialManager {
    /// Take ownership of the configured pools.
    ///
    /// # Errors
    ///
    /// Fails when neither pool holds a key.
    pub fn new(pools: CredentialPools) -> NovelwriterResult<Self> {
        if pools.is_empty() {
            let hint = pools
                .source_hint
                .unwrap_or_else(|| "no primary or secondary keys supplied".to_string());
            return Err(CredentialError::new(CredentialErrorKind::NoCredentials(hint)).into());
        }
        let active = if pools.primary.is_empty() {
            Tier::Secondary
        } else {
            Tier::Primary
        };
        info!(
            primary = pools.primary.len(),
            secondary = pools.secondary.len(),
            active = %active,
            "Credential manager ready"
        );
        Ok(Self {
            primary: pools.primary.into_iter().map(PooledKey::new).collect(),
            secondary: pools.secondary.into_iter().map(PooledKey::new).collect(),
            active,
            cursor: 0,
        })
    }

    /// Next usable credential from the active pool.
    pub fn acquire(&mut self) -> (ApiKey, Tier) {
        if self.active == Tier::Primary
            && !self.secondary.is_empty()
            && self.primary.iter().all(|slot| slot.exhausted)
        {
            info!("All primary credentials exhausted, switching to secondary pool");
            self.active = Tier::Secondary;
            self.cursor = 0;
        }

        let tier = self.active;
        let cursor = self.cursor;
        let pool = self.pool_mut(tier);

        if pool.iter().all(|slot| slot.exhausted) {
            info!(tier = %tier, "Every credential in pool exhausted, resetting");
            for slot in pool.iter_mut() {
                slot.exhausted = false;
            }
        }

        let len = pool.len();
        let start = cursor % len;
        let index = (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&i| !pool[i].exhausted)
            .unwrap_or(start);
        let key = pool[index].key.clone();

        self.cursor = (index + 1) % len;
        debug!(tier = %tier, key = %key, index, "Acquired credential");
        (key, tier)
    }

    /// Mark a credential exhausted and move the cursor past it.
    #[instrument(skip(self), fields(key = %key))]
    pub fn report_exhausted(&mut self, key: &ApiKey) {
        let Some((tier, index)) = self.locate(key) else {
            warn!("Exhausted credential is not managed here");
            return;
        };
        info!(tier = %tier, "Marking API key as exhausted");
        let pool = self.pool_mut(tier);
        pool[index].exhausted = true;
        let len = pool.len();
        if tier == self.active {
            self.cursor = (index + 1) % len;
        }
    }

    /// Record a non-quota failure without exhausting the credential.
    ///
    /// The cursor still moves past the key so the next request tries another
    /// one when the pool has more than one.
    #[instrument(skip(self), fields(key = %key))]
    pub fn report_transient_failure(&mut self, key: &ApiKey) {
        let Some((tier, index)) = self.locate(key) else {
            warn!("Failed credential is not managed here");
            return;
        };
        let pool = self.pool_mut(tier);
        pool[index].transient_failures += 1;
        let failures = pool[index].transient_failures;
        let len = pool.len();
        warn!(tier = %tier, failures, "Transient failure on API key");
        if tier == self.active {
            self.cursor = (index + 1) % len;
        }
    }

    /// Pool currently handing out credentials.
    pub fn active_tier(&self) -> Tier {
        self.active
    }

    /// Whether a credential is currently flagged exhausted.
    pub fn is_exhausted(&self, key: &ApiKey) -> bool {
        self.locate(key)
            .map(|(tier, index)| self.pool(tier)[index].exhausted)
            .unwrap_or(false)
    }

    /// Transient failures recorded against a credential.
    pub fn transient_failures(&self, key: &ApiKey) -> u32 {
        self.locate(key)
            .map(|(tier, index)| self.pool(tier)[index].transient_failures)
            .unwrap_or(0)
    }

    /// Number of credentials in a pool.
    pub fn pool_size(&self, tier: Tier) -> usize {
        self.pool(tier).len()
    }

    fn locate(&self, key: &ApiKey) -> Option<(Tier, usize)> {
        [self.active, other(self.active)].into_iter().find_map(|tier| {
            self.pool(tier)
                .iter()
                .position(|slot| &slot.key == key)
                .map(|index| (tier, index))
        })
    }

    fn pool(&self, tier: Tier) -> &[PooledKey] {
        match tier {
            Tier::Primary => &self.primary,
            Tier::Secondary => &self.secondary,
        }
    }

    fn pool_mut(&mut self, tier: Tier) -> &mut Vec<PooledKey> {
        match tier {
            Tier::Primary => &mut self.primary,
            Tier::Secondary => &mut self.secondary,
        }
    }
}

fn other(tier: Tier) -> Tier {
    match tier {
        Tier::Primary => Tier::Secondary,
        Tier::Secondary => Tier::Primary,
    }
}
