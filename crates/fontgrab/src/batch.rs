//! Fixed-window batched concurrency.
//!
//! Items are cut into consecutive chunks of `limit`. Chunks run one after
//! another; every item inside a chunk runs concurrently on the calling task.
//! At most `limit` operations are ever in flight, and the next chunk never
//! starts until the current one has fully settled.

use std::future::Future;

use futures::future::join_all;

/// Run `op` over `items` in sequential batches of `limit`.
///
/// Returns one result per item, in input order. `op` yields an `R`, not a
/// fallible future: per-item failures are expected to be folded into `R`
/// (e.g. `R = Result<_, _>` or an outcome struct) so that no item can cancel
/// its siblings. A `limit` of 0 is treated as 1.
pub async fn run_batched<I, T, R, F, Fut>(items: I, limit: usize, op: F) -> Vec<R>
where
    I: IntoIterator<Item = T>,
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let limit = limit.max(1);
    let mut items = items.into_iter().peekable();
    let mut results = Vec::new();
    let mut batch_index = 0usize;

    while items.peek().is_some() {
        let batch: Vec<Fut> = items.by_ref().take(limit).map(&op).collect();
        tracing::debug!(batch = batch_index, size = batch.len(), "running batch");
        results.extend(join_all(batch).await);
        batch_index += 1;
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_preserves_order_and_length() {
        let items: Vec<u64> = (1..=10).collect();
        // Later items finish first inside each batch.
        let out = run_batched(items, 3, |n| async move {
            tokio::time::sleep(Duration::from_millis(20 - n)).await;
            n * 10
        })
        .await;
        assert_eq!(out, (1..=10).map(|n| n * 10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_never_exceeds_limit() {
        let in_flight = &AtomicUsize::new(0);
        let peak = &AtomicUsize::new(0);

        let out = run_batched(1..=10u32, 3, move |n| async move {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
            n
        })
        .await;

        assert_eq!(out.len(), 10);
        assert_eq!(peak.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_failure_is_a_result_not_a_cancellation() {
        let out: Vec<Result<u32, String>> = run_batched(1..=10u32, 3, |n| async move {
            if n == 5 {
                Err(format!("item {n} failed"))
            } else {
                tokio::time::sleep(Duration::from_millis(2)).await;
                Ok(n)
            }
        })
        .await;

        assert_eq!(out.len(), 10);
        assert_eq!(out[4], Err("item 5 failed".to_string()));
        // Siblings in the same batch (4 and 6) still complete.
        assert_eq!(out[3], Ok(4));
        assert_eq!(out[5], Ok(6));
        assert_eq!(out.iter().filter(|r| r.is_ok()).count(), 9);
    }

    #[tokio::test]
    async fn test_batches_run_strictly_in_sequence() {
        let log: RefCell<Vec<(char, u32)>> = RefCell::new(Vec::new());
        let log_ref = &log;

        run_batched(0..7u32, 3, move |n| async move {
            log_ref.borrow_mut().push(('s', n));
            tokio::time::sleep(Duration::from_millis(u64::from(7 - n))).await;
            log_ref.borrow_mut().push(('e', n));
        })
        .await;

        let log = log.into_inner();
        for (pos, (kind, n)) in log.iter().enumerate() {
            if *kind != 's' {
                continue;
            }
            let batch = n / 3;
            // Every item from earlier batches ended before this one started.
            for earlier in 0..batch * 3 {
                let ended = log[..pos].contains(&('e', earlier));
                assert!(ended, "item {n} started before item {earlier} ended");
            }
        }
    }

    #[tokio::test]
    async fn test_zero_limit_runs_one_at_a_time() {
        let in_flight = &AtomicUsize::new(0);
        let peak = &AtomicUsize::new(0);

        let out = run_batched(vec!["a", "b", "c"], 0, move |s| async move {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::task::yield_now().await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
            s.to_uppercase()
        })
        .await;

        assert_eq!(out, vec!["A", "B", "C"]);
        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let out: Vec<u8> = run_batched(Vec::<u8>::new(), 4, |n| async move { n }).await;
        assert!(out.is_empty());
    }
}
