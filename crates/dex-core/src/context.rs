//! Per-request deadline threaded through every blocking call.
//!
//! A context either has no deadline ([`RequestContext::background`]) or a
//! fixed instant after which the external fetch and every storage operation
//! give up. Cancellation by the caller is plain future cancellation: dropping
//! the request future drops whatever fetch or query is in flight.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, error::Elapsed};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    deadline: Option<Instant>,
}

impl RequestContext {
    /// A context with no deadline. Callees fall back to their own defaults.
    #[must_use]
    pub const fn background() -> Self {
        Self { deadline: None }
    }

    /// A context that expires `timeout` from now.
    ///
    /// A timeout too large to represent is treated as no deadline.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(timeout),
        }
    }

    #[must_use]
    pub const fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, `Duration::ZERO` once it has passed.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining().is_some_and(|left| left.is_zero())
    }

    /// Run `fut` under this context's deadline.
    ///
    /// # Errors
    ///
    /// Returns [`Elapsed`] if the deadline passes before `fut` completes.
    pub async fn scope<F: Future>(&self, fut: F) -> Result<F::Output, Elapsed> {
        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, fut).await,
            None => Ok(fut.await),
        }
    }
}
