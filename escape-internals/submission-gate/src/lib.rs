//! Escape Submission Gate
//! Copyright (c) 2026 Mamy Ratsimbazafy
//! Licensed and distributed under either of
//!   * MIT license (license terms at the root of the package or at http://opensource.org/licenses/MIT).
//!   * Apache v2 license (license terms at the root of the package or at http://www.apache.org/licenses/LICENSE-2.0).
//! at your option. This file may not be copied, modified, or distributed except according to those terms.

//! escape-internals/submission-gate
//! Admission control for outbound form submissions: a concurrency cap, an optional
//! per-second budget and a whole-call deadline. Work that fails is never retried here.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::{Mutex, Notify, Semaphore};
use tokio::time;

/// Why the gate refused or abandoned a unit of work
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("submission did not complete within {0:?}")]
    DeadlineExceeded(Duration),
    #[error("gate is closed")]
    Closed,
}

/// Token bucket refilled once per interval, capped at `capacity`
#[derive(Debug)]
struct TokenBucket {
    capacity: u64,
    tokens: AtomicU64,
    last_refill: Mutex<Instant>,
    interval: Duration,
    refilled: Notify,
}

impl TokenBucket {
    fn per_second(capacity: u64) -> Self {
        Self {
            capacity,
            tokens: AtomicU64::new(capacity),
            last_refill: Mutex::new(Instant::now()),
            interval: Duration::from_secs(1),
            refilled: Notify::new(),
        }
    }

    async fn refill(&self) {
        let mut last = self.last_refill.lock().await;
        let elapsed = last.elapsed();
        if elapsed < self.interval {
            return;
        }
        let earned =
            (elapsed.as_secs_f64() / self.interval.as_secs_f64() * self.capacity as f64) as u64;
        if earned > 0 {
            let _ = self
                .tokens
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                    Some(current.saturating_add(earned).min(self.capacity))
                });
            self.refilled.notify_waiters();
        }
        *last = Instant::now();
    }

    async fn take(&self) {
        loop {
            self.refill().await;
            let available = self.tokens.load(Ordering::SeqCst);
            if available == 0 {
                let _ = time::timeout(Duration::from_millis(100), self.refilled.notified()).await;
                continue;
            }
            if self
                .tokens
                .compare_exchange(available, available - 1, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return;
            }
        }
    }
}

/// Shared admission gate in front of a remote booking site.
///
/// Cloning is cheap: clones share permits and the per-second budget.
///
/// # Examples
///
/// ```ignore
/// let gate = SubmissionGate::with_concurrency_limit(4).deadline(Duration::from_secs(30));
/// let body = gate.run(async { fetch().await }).await?;
/// ```
#[derive(Clone, Debug)]
pub struct SubmissionGate {
    permits: Arc<Semaphore>,
    bucket: Option<Arc<TokenBucket>>,
    deadline: Option<Duration>,
}

impl Default for SubmissionGate {
    fn default() -> Self {
        Self::with_concurrency_limit(4)
    }
}

impl SubmissionGate {
    /// At most `max_concurrent` units of work in flight (minimum 1)
    pub fn with_concurrency_limit(max_concurrent: u64) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent as usize)),
            bucket: None,
            deadline: None,
        }
    }

    /// At most `per_second` units of work started per second, and as many in flight
    pub fn with_qps_limit(per_second: u64) -> Self {
        let per_second = per_second.max(1);
        Self {
            bucket: Some(Arc::new(TokenBucket::per_second(per_second))),
            ..Self::with_concurrency_limit(per_second)
        }
    }

    /// Add a per-second start budget on top of the current concurrency limit
    pub fn qps(mut self, per_second: u64) -> Self {
        self.bucket = Some(Arc::new(TokenBucket::per_second(per_second.max(1))));
        self
    }

    /// Bound every unit of work, queueing included, by `limit`
    pub fn deadline(mut self, limit: Duration) -> Self {
        self.deadline = Some(limit);
        self
    }

    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// Refuse all future work. Work already admitted runs to completion.
    pub fn close(&self) {
        self.permits.close();
    }

    /// Run `work` once admitted.
    ///
    /// The output of `work` is returned untouched, errors included: the gate only
    /// reports its own refusals (closed, deadline).
    pub async fn run<T, Fut>(&self, work: Fut) -> Result<T, GateError>
    where
        Fut: Future<Output = T>,
    {
        let admitted = async {
            let _permit = self.permits.acquire().await.map_err(|_| GateError::Closed)?;
            if let Some(bucket) = &self.bucket {
                bucket.take().await;
            }
            Ok::<T, GateError>(work.await)
        };

        match self.deadline {
            Some(limit) => time::timeout(limit, admitted)
                .await
                .map_err(|_| GateError::DeadlineExceeded(limit))?,
            None => admitted.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test]
    async fn returns_work_output_untouched() {
        let gate = SubmissionGate::default();
        let out: Result<u32, &str> = gate.run(async { Err("rejected") }).await.unwrap();
        assert_eq!(out, Err("rejected"));
    }

    #[tokio::test]
    async fn caps_work_in_flight() {
        let gate = SubmissionGate::with_concurrency_limit(2);
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..6 {
            let gate = gate.clone();
            let in_flight = in_flight.clone();
            let peak = peak.clone();
            handles.push(tokio::spawn(async move {
                gate.run(async {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    time::sleep(Duration::from_millis(30)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                })
                .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert!(peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(gate.available_permits(), 2);
    }

    #[tokio::test]
    async fn deadline_abandons_slow_work() {
        let gate = SubmissionGate::with_concurrency_limit(1).deadline(Duration::from_millis(50));
        let result = gate
            .run(async {
                time::sleep(Duration::from_secs(5)).await;
                1
            })
            .await;
        assert_eq!(
            result,
            Err(GateError::DeadlineExceeded(Duration::from_millis(50)))
        );
    }

    #[tokio::test]
    async fn closed_gate_refuses_work() {
        let gate = SubmissionGate::with_concurrency_limit(1);
        gate.close();
        assert_eq!(gate.run(async { 1 }).await, Err(GateError::Closed));
    }

    #[tokio::test]
    async fn qps_budget_delays_excess_work() {
        let gate = SubmissionGate::with_qps_limit(2);
        let start = Instant::now();
        for _ in 0..3 {
            gate.run(async {}).await.unwrap();
        }
        assert!(
            start.elapsed() >= Duration::from_millis(900),
            "third start should wait for a refill, took {:?}",
            start.elapsed()
        );
    }

    #[tokio::test]
    async fn qps_stacks_on_concurrency_limit() {
        let gate = SubmissionGate::with_concurrency_limit(8).qps(1);
        assert_eq!(gate.available_permits(), 8);
        let start = Instant::now();
        gate.run(async {}).await.unwrap();
        gate.run(async {}).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(900));
    }
}
