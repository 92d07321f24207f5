//! Sliding-window rate limiting for external collaborators

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// One limiter shared by every service calling the same collaborator
pub type SharedRateLimiter = Arc<Mutex<RateLimiter>>;

/// Grants at most `quota` permits within any `window`.
///
/// One per external collaborator, shared by every service that calls it.
/// `try_acquire` is used where an exhausted quota should fail the call,
/// `acquire` where the caller should wait.
#[derive(Debug)]
pub struct RateLimiter {
    quota: usize,
    window: Duration,
    granted: VecDeque<Instant>,
}

impl RateLimiter {
    pub fn new(quota: usize, window: Duration) -> Self {
        Self {
            quota: quota.max(1),
            window,
            granted: VecDeque::new(),
        }
    }

    fn evict_expired(&mut self, now: Instant) {
        while let Some(&oldest) = self.granted.front() {
            if now.duration_since(oldest) >= self.window {
                self.granted.pop_front();
            } else {
                break;
            }
        }
    }

    /// Time until a permit frees up, or `None` if one is available now
    pub fn wait_time(&mut self) -> Option<Duration> {
        let now = Instant::now();
        self.evict_expired(now);
        if self.granted.len() < self.quota {
            return None;
        }
        self.granted
            .front()
            .map(|&oldest| self.window.saturating_sub(now.duration_since(oldest)))
    }

    /// Take a permit if one is available
    pub fn try_acquire(&mut self) -> bool {
        if self.wait_time().is_some() {
            return false;
        }
        self.granted.push_back(Instant::now());
        true
    }

    /// Wait until a permit is available, then take it
    pub async fn acquire(&mut self) {
        while let Some(wait) = self.wait_time() {
            tracing::trace!(wait_ms = wait.as_millis(), "Rate limit reached, waiting");
            tokio::time::sleep(wait).await;
        }
        self.granted.push_back(Instant::now());
    }

    /// Permits left in the current window
    pub fn remaining(&mut self) -> usize {
        self.evict_expired(Instant::now());
        self.quota - self.granted.len()
    }
}
