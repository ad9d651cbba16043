//! Tests for credential rotation and tier failover.

use novelwriter_rate_limit::{ApiKey, CredentialManager, CredentialPools, Tier};

fn pools(primary: &[&str], secondary: &[&str]) -> CredentialPools {
    let mut pools = CredentialPools::default();
    for key in primary {
        pools.add_primary(*key);
    }
    for key in secondary {
        pools.add_secondary(*key);
    }
    pools
}

#[test]
fn test_failover_to_secondary_then_reset() {
    let mut manager = CredentialManager::new(pools(&["free-a", "free-b"], &["paid-a"])).unwrap();

    let (first, tier) = manager.acquire();
    assert_eq!(tier, Tier::Primary);
    manager.report_exhausted(&first);

    let (second, tier) = manager.acquire();
    assert_eq!(tier, Tier::Primary);
    assert_ne!(first, second);
    manager.report_exhausted(&second);

    let (paid, tier) = manager.acquire();
    assert_eq!(tier, Tier::Secondary);
    assert_eq!(paid.expose(), "paid-a");
    assert_eq!(manager.active_tier(), Tier::Secondary);

    manager.report_exhausted(&paid);
    let (again, tier) = manager.acquire();
    assert_eq!(tier, Tier::Secondary);
    assert_eq!(again, paid);
    assert!(!manager.is_exhausted(&again));
}

#[test]
fn test_primary_keys_stay_exhausted_after_switch() {
    let mut manager = CredentialManager::new(pools(&["free-a"], &["paid-a", "paid-b"])).unwrap();
    let (free, _) = manager.acquire();
    manager.report_exhausted(&free);

    let tiers: Vec<Tier> = (0..4).map(|_| manager.acquire().1).collect();
    assert!(tiers.iter().all(|tier| *tier == Tier::Secondary));
    assert!(manager.is_exhausted(&free));
}

#[test]
fn test_round_robin_covers_secondary_pool() {
    let mut manager = CredentialManager::new(pools(&[], &["paid-a", "paid-b"])).unwrap();
    let keys: Vec<String> = (0..4)
        .map(|_| manager.acquire().0.expose().to_string())
        .collect();
    assert_eq!(keys, vec!["paid-a", "paid-b", "paid-a", "paid-b"]);
}

#[test]
fn test_no_credentials_is_fatal() {
    let err = CredentialManager::new(CredentialPools::default()).unwrap_err();
    assert!(err.to_string().contains("No API credentials configured"));
}

#[test]
fn test_pools_skip_blank_and_duplicate_keys() {
    let mut pools = CredentialPools::default();
    assert!(pools.add_primary("free-a"));
    assert!(!pools.add_primary("  "));
    assert!(!pools.add_primary(" free-a "));
    assert!(pools.add_secondary("free-a"));
    assert_eq!(pools.primary().len(), 1);
    assert_eq!(pools.secondary().len(), 1);
}

#[test]
fn test_pools_from_env_split_commas() {
    // Variable names are unique to this test so parallel tests cannot collide.
    unsafe {
        std::env::set_var("NW_TEST_FREE_KEYS", "free-a, free-b,,free-a");
        std::env::remove_var("NW_TEST_PAID_KEYS");
    }
    let pools = CredentialPools::from_env("NW_TEST_FREE_KEYS", "NW_TEST_PAID_KEYS");
    let keys: Vec<&str> = pools.primary().iter().map(ApiKey::expose).collect();
    assert_eq!(keys, vec!["free-a", "free-b"]);
    assert!(pools.secondary().is_empty());
}

#[test]
fn test_empty_env_error_names_variables() {
    let pools = CredentialPools::from_env("NW_TEST_UNSET_FREE", "NW_TEST_UNSET_PAID");
    let err = CredentialManager::new(pools).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("NW_TEST_UNSET_FREE"));
    assert!(message.contains("NW_TEST_UNSET_PAID"));
}

#[test]
fn test_api_key_never_prints_secret() {
    let key = ApiKey::new("sk-or-v1-supersecretvalue");
    assert_eq!(key.fingerprint(), "...retvalue");
    assert!(!format!("{:?}", key).contains("supersecret"));
    assert!(!format!("{}", key).contains("supersecret"));
}

#[test]
fn test_short_key_fingerprint() {
    assert_eq!(ApiKey::new("abc").fingerprint(), "...abc");
}
