//! Request pacing for the exchange endpoints.
//!
//! Both exchanges block clients that hit them in quick succession. Every
//! adapter calls [`Throttle::acquire`] right before it sends a request.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// How requests are spaced out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThrottlePolicy {
    /// Sleep this long before every request, the first one included.
    FixedDelay(Duration),
    /// Keep at least this much time between the starts of two requests. The
    /// first request goes out immediately.
    MinInterval(Duration),
}

impl ThrottlePolicy {
    pub fn delay(&self) -> Duration {
        match self {
            ThrottlePolicy::FixedDelay(d) | ThrottlePolicy::MinInterval(d) => *d,
        }
    }
}

/// Default spacing between exchange requests.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(5);

impl Default for ThrottlePolicy {
    fn default() -> Self {
        ThrottlePolicy::MinInterval(DEFAULT_REQUEST_DELAY)
    }
}

/// Waits at least this long are logged at `warn` level.
pub const LONG_WAIT: Duration = Duration::from_secs(10);

fn is_long_wait(wait: Duration) -> bool {
    wait >= LONG_WAIT
}

/// Paces requests according to a [`ThrottlePolicy`].
pub struct Throttle {
    policy: ThrottlePolicy,
    /// Tracks when the last request was let through.
    last_request: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(policy: ThrottlePolicy) -> Self {
        Self {
            policy,
            last_request: Mutex::new(None),
        }
    }

    /// A throttle that never waits. Used by tests.
    pub fn disabled() -> Self {
        Self::new(ThrottlePolicy::MinInterval(Duration::ZERO))
    }

    /// Waits until the next request may be sent, then records it.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let wait = match self.policy {
            ThrottlePolicy::FixedDelay(delay) => delay,
            ThrottlePolicy::MinInterval(interval) => match *last {
                Some(last_time) => interval.saturating_sub(last_time.elapsed()),
                None => Duration::ZERO,
            },
        };
        if is_long_wait(wait) {
            tracing::warn!("Throttling next request for {:.1}s", wait.as_secs_f64());
        } else if !wait.is_zero() {
            tracing::debug!("Throttling next request for {:.1}s", wait.as_secs_f64());
        }
        if !wait.is_zero() {
            sleep(wait).await;
        }
        *last = Some(Instant::now());
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(ThrottlePolicy::default())
    }
}
