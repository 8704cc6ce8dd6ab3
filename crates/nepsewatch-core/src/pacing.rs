use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Jitter, Quota, RateLimiter};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Paces page navigations so back-to-back loads never hammer the site.
///
/// One cell becomes available per minimum interval; [`pause`](Self::pause)
/// waits for the next cell plus a random jitter slice so repeated batches
/// do not land on a fixed cadence.
#[derive(Clone)]
pub struct NavigationPacer {
    limiter: Arc<DirectRateLimiter>,
    jitter: Jitter,
}

impl NavigationPacer {
    pub fn new(min_interval: Duration, max_jitter: Duration) -> Self {
        // Sub-millisecond settings collapse to 1ms; Quota and Jitter both
        // reject zero durations.
        let period = min_interval.max(Duration::from_millis(1));
        let quota = Quota::with_period(period)
            .expect("period is always greater than zero")
            .allow_burst(NonZeroU32::new(1).expect("burst of one is non-zero"));
        Self {
            limiter: Arc::new(RateLimiter::direct(quota)),
            jitter: Jitter::up_to(max_jitter.max(Duration::from_millis(1))),
        }
    }

    /// Waits until the next navigation is allowed.
    ///
    /// The first call after construction returns immediately; every later
    /// call waits out the remainder of the minimum interval.
    pub async fn pause(&self) {
        self.limiter.until_ready_with_jitter(self.jitter).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn second_navigation_waits_out_the_interval() {
        let pacer = NavigationPacer::new(Duration::from_millis(80), Duration::from_millis(1));

        pacer.pause().await;
        let started = Instant::now();
        pacer.pause().await;

        assert!(started.elapsed() >= Duration::from_millis(60));
    }

    #[tokio::test]
    async fn zero_settings_are_clamped_instead_of_panicking() {
        let pacer = NavigationPacer::new(Duration::ZERO, Duration::ZERO);
        pacer.pause().await;
        pacer.pause().await;
    }
}
