//! Concurrent callers against one environment.
//!
//! Multiple caller contexts (emulating concurrently scheduled plugin
//! instances) hammer one `Arc<HostEnvironment>`; the single environment
//! lock must serialize every call and keep all invariants intact.

use crate::test_utils::quiet_env;
use plughost::{Error, HostEnvironment, LogLevel, MetricKind};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const OPS_PER_THREAD: usize = 200;

fn spawn_all<F>(env: &Arc<HostEnvironment>, f: F)
where
    F: Fn(Arc<HostEnvironment>, usize) + Send + Sync + Copy + 'static,
{
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let env = Arc::clone(env);
            thread::spawn(move || f(env, t))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn concurrent_enqueues_all_arrive() {
    let env = Arc::new(quiet_env());
    let id = env.register_queue("stress");

    spawn_all(&env, move |env, t| {
        for i in 0..OPS_PER_THREAD {
            env.enqueue(id, vec![t as u8, i as u8]).unwrap();
        }
    });

    assert_eq!(env.queue_len(id), THREADS * OPS_PER_THREAD);

    // Per-thread subsequences stay in FIFO order even though the global
    // interleaving is arbitrary.
    let mut last_seen = [None::<u8>; THREADS];
    while let Ok(payload) = env.dequeue(id) {
        let (t, i) = (payload[0] as usize, payload[1]);
        if let Some(prev) = last_seen[t] {
            assert!(i > prev, "thread {t} payloads out of order");
        }
        last_seen[t] = Some(i);
    }
}

#[test]
fn concurrent_registration_is_idempotent() {
    let env = Arc::new(quiet_env());

    spawn_all(&env, |env, _| {
        for _ in 0..OPS_PER_THREAD {
            env.register_queue("shared-name");
        }
    });

    // Exactly one queue exists; every thread saw the same id.
    assert_eq!(env.queue_id("shared-name").unwrap().as_u32(), 0);
    assert_eq!(env.register_queue("next").as_u32(), 1);
}

#[test]
fn cas_retry_loops_lose_no_increments() {
    let env = Arc::new(quiet_env());
    env.set_shared_data("counter", 0u64.to_le_bytes().to_vec(), 0)
        .unwrap();

    spawn_all(&env, |env, _| {
        for _ in 0..OPS_PER_THREAD {
            loop {
                let entry = env.shared_data("counter").unwrap();
                let current = u64::from_le_bytes(entry.data.try_into().unwrap());
                let next = (current + 1).to_le_bytes().to_vec();
                match env.set_shared_data("counter", next, entry.cas) {
                    Ok(()) => break,
                    Err(Error::CasMismatch { .. }) => continue,
                    Err(err) => panic!("unexpected error: {err}"),
                }
            }
        }
    });

    let entry = env.shared_data("counter").unwrap();
    let total = u64::from_le_bytes(entry.data.try_into().unwrap());
    assert_eq!(total, (THREADS * OPS_PER_THREAD) as u64);
    // One accepted write per increment, plus the seed write.
    assert_eq!(entry.cas, (THREADS * OPS_PER_THREAD) as u32 + 1);
}

#[test]
fn concurrent_metric_increments_sum_exactly() {
    let env = Arc::new(quiet_env());
    let id = env.define_metric("hits", MetricKind::Counter);

    spawn_all(&env, move |env, _| {
        for _ in 0..OPS_PER_THREAD {
            env.increment_metric(id, 1).unwrap();
        }
    });

    assert_eq!(
        env.metric_value(id).unwrap(),
        (THREADS * OPS_PER_THREAD) as u64
    );
}

#[test]
fn mixed_traffic_keeps_services_consistent() {
    let env = Arc::new(quiet_env());
    let q = env.register_queue("mixed");
    let m = env.define_metric("mixed", MetricKind::Counter);

    spawn_all(&env, move |env, t| {
        for i in 0..OPS_PER_THREAD {
            match i % 4 {
                0 => env.enqueue(q, vec![t as u8]).unwrap(),
                1 => env.increment_metric(m, 1).unwrap(),
                2 => env.log(LogLevel::Info, "tick"),
                _ => {
                    let _ = env.dequeue(q);
                }
            }
        }
    });

    // Every service saw exactly its own traffic.
    assert_eq!(
        env.metric_value(m).unwrap(),
        (THREADS * OPS_PER_THREAD / 4) as u64
    );
    assert_eq!(
        env.logs(LogLevel::Info.as_raw()).len(),
        THREADS * OPS_PER_THREAD / 4
    );
    assert!(env.queue_len(q) <= THREADS * OPS_PER_THREAD / 4);
}
