//! Shared data conformance: CAS chains, stale rejection, creation wins.

use crate::test_utils::quiet_env;
use plughost::Error;

// ============================================================================
// Reads
// ============================================================================

#[test]
fn get_never_written_key_fails_not_found() {
    let env = quiet_env();
    assert_eq!(
        env.shared_data("never"),
        Err(Error::KeyNotFound { key: "never".into() })
    );
}

#[test]
fn get_returns_payload_and_cas_as_one_pair() {
    let env = quiet_env();
    env.set_shared_data("k", b"payload".to_vec(), 0).unwrap();
    let entry = env.shared_data("k").unwrap();
    assert_eq!(entry.data, b"payload");
    assert_eq!(entry.cas, 1);
}

// ============================================================================
// Scenario B: create, update, stale write
// ============================================================================

#[test]
fn scenario_create_update_stale() {
    let env = quiet_env();

    env.set_shared_data("k", b"v1".to_vec(), 0).unwrap();
    assert_eq!(env.shared_data("k").unwrap().cas, 1);

    env.set_shared_data("k", b"v2".to_vec(), 1).unwrap();
    assert_eq!(env.shared_data("k").unwrap().cas, 2);

    assert_eq!(
        env.set_shared_data("k", b"v3".to_vec(), 1),
        Err(Error::CasMismatch {
            key: "k".into(),
            supplied: 1,
            current: 2,
        })
    );
    let entry = env.shared_data("k").unwrap();
    assert_eq!(entry.data, b"v2");
    assert_eq!(entry.cas, 2);
}

// ============================================================================
// First-write semantics
// ============================================================================

#[test]
fn first_write_succeeds_with_any_supplied_cas() {
    let env = quiet_env();

    // Creation always wins; the supplied counter seeds the chain.
    env.set_shared_data("a", b"v".to_vec(), 0).unwrap();
    env.set_shared_data("b", b"v".to_vec(), 41).unwrap();
    env.set_shared_data("c", b"v".to_vec(), u32::MAX).unwrap();

    assert_eq!(env.shared_data("a").unwrap().cas, 1);
    assert_eq!(env.shared_data("b").unwrap().cas, 42);
    assert_eq!(env.shared_data("c").unwrap().cas, 0);
}

// ============================================================================
// Chains
// ============================================================================

#[test]
fn each_accepted_write_increments_cas_by_one() {
    let env = quiet_env();
    env.set_shared_data("k", vec![0], 0).unwrap();
    for expected in 1..20u32 {
        assert_eq!(env.shared_data("k").unwrap().cas, expected);
        env.set_shared_data("k", vec![expected as u8], expected)
            .unwrap();
    }
    assert_eq!(env.shared_data("k").unwrap().cas, 20);
}

#[test]
fn read_modify_write_loop_converges_after_conflict() {
    let env = quiet_env();
    env.set_shared_data("counter", vec![0], 0).unwrap();

    // Two writers read the same snapshot; one wins.
    let snapshot = env.shared_data("counter").unwrap();
    env.set_shared_data("counter", vec![snapshot.data[0] + 1], snapshot.cas)
        .unwrap();

    // The loser retries from a fresh read, as the contract intends.
    let stale = env.set_shared_data("counter", vec![99], snapshot.cas);
    assert!(matches!(stale, Err(Error::CasMismatch { .. })));

    let fresh = env.shared_data("counter").unwrap();
    env.set_shared_data("counter", vec![fresh.data[0] + 1], fresh.cas)
        .unwrap();
    assert_eq!(env.shared_data("counter").unwrap().data, vec![2]);
}
