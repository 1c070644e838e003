//! Property-based laws: FIFO order, CAS chains, wraparound sums.

use crate::test_utils::quiet_env;
use plughost::{Error, MetricKind};
use proptest::collection::vec;
use proptest::prelude::*;

proptest! {
    // For any sequence of enqueues followed by dequeues, the dequeues
    // yield the payloads in enqueue order, then Empty forever.
    #[test]
    fn fifo_law(payloads in vec(vec(any::<u8>(), 0..16), 0..32)) {
        let env = quiet_env();
        let id = env.register_queue("q");

        for payload in &payloads {
            env.enqueue(id, payload.clone()).unwrap();
        }
        prop_assert_eq!(env.queue_len(id), payloads.len());

        for payload in &payloads {
            prop_assert_eq!(&env.dequeue(id).unwrap(), payload);
        }
        prop_assert_eq!(env.dequeue(id), Err(Error::QueueEmpty { id }));
    }

    // Any sequence of distinct names yields ids 0..N-1 in call order,
    // and repeating the whole sequence yields the same ids.
    #[test]
    fn registration_ids_are_call_ordered(mut names in vec("[a-z]{1,12}", 1..16)) {
        names.sort();
        names.dedup();

        let env = quiet_env();
        let first_pass: Vec<u32> = names.iter().map(|n| env.register_queue(n).as_u32()).collect();
        let second_pass: Vec<u32> = names.iter().map(|n| env.register_queue(n).as_u32()).collect();

        let expected: Vec<u32> = (0..names.len() as u32).collect();
        prop_assert_eq!(&first_pass, &expected);
        prop_assert_eq!(&second_pass, &expected);
    }

    // A chain of accepted writes increments the stored CAS by exactly 1
    // each time; an interleaved stale write never changes anything.
    #[test]
    fn cas_chain_is_strict(seed in any::<u32>(), writes in vec(vec(any::<u8>(), 0..8), 1..20)) {
        let env = quiet_env();
        let mut expected_cas = seed;

        for payload in &writes {
            env.set_shared_data("k", payload.clone(), expected_cas).unwrap();
            expected_cas = expected_cas.wrapping_add(1);

            let entry = env.shared_data("k").unwrap();
            prop_assert_eq!(entry.cas, expected_cas);
            prop_assert_eq!(&entry.data, payload);

            // A stale writer reusing the counter it just consumed is
            // rejected without effect.
            let stale = env.set_shared_data("k", b"stale".to_vec(), expected_cas.wrapping_sub(1));
            prop_assert!(stale.is_err());
            prop_assert_eq!(&env.shared_data("k").unwrap().data, payload);
        }
    }

    // increment-then-get reflects the exact sum modulo 2^64.
    #[test]
    fn increment_sums_wrap_modulo_u64(deltas in vec(any::<i64>(), 0..64)) {
        let env = quiet_env();
        let id = env.define_metric("m", MetricKind::Counter);

        let mut expected = 0u64;
        for delta in &deltas {
            env.increment_metric(id, *delta).unwrap();
            expected = expected.wrapping_add(*delta as u64);
        }
        prop_assert_eq!(env.metric_value(id).unwrap(), expected);
    }

    // record is an absolute overwrite from any prior state.
    #[test]
    fn record_is_absolute(prior in any::<i64>(), value in any::<u64>()) {
        let env = quiet_env();
        let id = env.define_metric("m", MetricKind::Gauge);
        env.increment_metric(id, prior).unwrap();
        env.record_metric(id, value).unwrap();
        prop_assert_eq!(env.metric_value(id).unwrap(), value);
    }
}
