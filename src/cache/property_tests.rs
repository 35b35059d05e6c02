//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the expiring cache against a simple reference model.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{ExpiringCache, ManualClock};

// == Test Configuration ==
const TEST_DEFAULT_TTL_MS: u64 = 300;
const START_MS: u64 = 1_000_000;

// == Strategies ==
/// Generates cache keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-d]{1,2}".prop_map(|s| s)
}

/// Generates cache values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,32}".prop_map(|s| s)
}

/// A single step against the cache, time moves only through `Advance`
#[derive(Debug, Clone)]
enum CacheOp {
    Set {
        key: String,
        value: String,
        ttl_ms: Option<u64>,
    },
    Get { key: String },
    Contains { key: String },
    Delete { key: String },
    Advance { ms: u64 },
    Cleanup,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (
            key_strategy(),
            value_strategy(),
            prop::option::of(0u64..1_000)
        )
            .prop_map(|(key, value, ttl_ms)| CacheOp::Set { key, value, ttl_ms }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Contains { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
        (0u64..600).prop_map(|ms| CacheOp::Advance { ms }),
        Just(CacheOp::Cleanup),
    ]
}

fn manual_cache() -> (ExpiringCache<String>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(START_MS));
    let cache = ExpiringCache::with_clock(
        Duration::from_millis(TEST_DEFAULT_TTL_MS),
        clock.clone(),
    );
    (cache, clock)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // For any sequence of operations, reads agree with a map of
    // (value, expires_at) that drops entries once now > expires_at.
    #[test]
    fn prop_matches_reference_model(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let (cache, clock) = manual_cache();
        let mut model: HashMap<String, (String, u64)> = HashMap::new();
        let mut now = START_MS;

        for op in ops {
            match op {
                CacheOp::Set { key, value, ttl_ms } => {
                    let ttl = ttl_ms.unwrap_or(TEST_DEFAULT_TTL_MS);
                    cache.set(key.clone(), value.clone(), ttl_ms.map(Duration::from_millis));
                    model.insert(key, (value, now + ttl));
                }
                CacheOp::Get { key } => {
                    let expected = match model.get(&key) {
                        Some((value, expires_at)) if now <= *expires_at => Some(value.clone()),
                        _ => None,
                    };
                    prop_assert_eq!(cache.get(&key), expected);
                }
                CacheOp::Contains { key } => {
                    let expected = matches!(model.get(&key), Some((_, expires_at)) if now <= *expires_at);
                    prop_assert_eq!(cache.contains(&key), expected);
                }
                CacheOp::Delete { key } => {
                    let _ = cache.delete(&key);
                    model.remove(&key);
                }
                CacheOp::Advance { ms } => {
                    clock.advance(Duration::from_millis(ms));
                    now += ms;
                }
                CacheOp::Cleanup => {
                    cache.cleanup();
                    model.retain(|_, (_, expires_at)| now <= *expires_at);
                    prop_assert_eq!(cache.len(), model.len(), "Sweep leaves only live entries");
                }
            }

            // Unswept expired entries may still be counted, never the reverse
            let live = model.values().filter(|(_, expires_at)| now <= *expires_at).count();
            prop_assert!(cache.len() >= live, "len {} below live count {}", cache.len(), live);
        }
    }

    // Storing then immediately reading returns the exact value.
    #[test]
    fn prop_roundtrip_storage(
        key in key_strategy(),
        value in value_strategy(),
        ttl_ms in 1u64..100_000
    ) {
        let (cache, _) = manual_cache();

        cache.set(key.clone(), value.clone(), Some(Duration::from_millis(ttl_ms)));

        prop_assert_eq!(cache.get(&key), Some(value));
    }

    // After ttl + epsilon, the entry is gone and is no longer counted once
    // either read or swept.
    #[test]
    fn prop_ttl_expiration_behavior(
        key in key_strategy(),
        value in value_strategy(),
        ttl_ms in 0u64..10_000,
        epsilon in 1u64..1_000,
        sweep in any::<bool>()
    ) {
        let (cache, clock) = manual_cache();

        cache.set(key.clone(), value, Some(Duration::from_millis(ttl_ms)));
        clock.advance(Duration::from_millis(ttl_ms + epsilon));

        if sweep {
            prop_assert_eq!(cache.cleanup(), 1);
            prop_assert_eq!(cache.len(), 0);
            prop_assert!(cache.get(&key).is_none());
        } else {
            prop_assert!(cache.get(&key).is_none());
            prop_assert_eq!(cache.len(), 0);
        }
    }

    // A second delete observes nothing left to remove.
    #[test]
    fn prop_delete_idempotent(key in key_strategy(), value in value_strategy()) {
        let (cache, _) = manual_cache();

        cache.set(key.clone(), value, None);
        prop_assert!(cache.delete(&key));
        let len_after_first = cache.len();

        prop_assert!(!cache.delete(&key));
        prop_assert_eq!(cache.len(), len_after_first);
        prop_assert!(cache.get(&key).is_none());
    }

    // Storing V1 then V2 under the same key returns V2 and keeps one entry.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let (cache, _) = manual_cache();

        cache.set(key.clone(), value1, None);
        cache.set(key.clone(), value2.clone(), None);

        prop_assert_eq!(cache.get(&key), Some(value2));
        prop_assert_eq!(cache.len(), 1);
    }
}

// == Property Test for Concurrent Operation Correctness ==
// Exercises shared access to the cache from many tasks at once

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // Concurrent readers see either a complete value that was written for
    // that key or nothing at all.
    #[test]
    fn prop_concurrent_operation_correctness(
        operations in prop::collection::vec((key_strategy(), value_strategy()), 10..60)
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();

        rt.block_on(async {
            let cache = Arc::new(ExpiringCache::new(Duration::from_secs(300)));
            let written: HashMap<String, Vec<String>> =
                operations.iter().fold(HashMap::new(), |mut acc, (k, v)| {
                    acc.entry(k.clone()).or_default().push(v.clone());
                    acc
                });

            let mut handles = vec![];
            for (key, value) in operations {
                let cache = Arc::clone(&cache);
                handles.push(tokio::spawn(async move {
                    cache.set(key.clone(), value, None);
                    cache.get(&key).map(|v| (key, v))
                }));
            }

            for handle in handles {
                let read = handle.await.expect("Task should not panic");
                if let Some((key, value)) = read {
                    prop_assert!(
                        written[&key].contains(&value),
                        "Read '{}' for '{}' which was never written", value, key
                    );
                }
            }

            prop_assert_eq!(cache.len(), written.len());
            Ok(())
        })?;
    }
}
