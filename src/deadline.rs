//! Deadline/cancellation gate for in-flight stream operations.
//!
//! The gate races an operation against an optional wall-clock budget. Whichever
//! finishes first decides the outcome; the other is discarded. On expiry the
//! gate cancels the operation's [`CancellationToken`] and drops its future, so a
//! late response can never reach the caller.
//!
//! Expiry is a client-side observation only. The remote side effect may still
//! have happened.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Outcome of running an operation through the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome<T> {
    /// The operation finished within its budget.
    Completed(T),
    /// The budget elapsed first.
    Expired,
}

impl<T> GateOutcome<T> {
    pub fn is_expired(&self) -> bool {
        matches!(self, GateOutcome::Expired)
    }
}

/// Optional wall-clock budget for a single operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    budget: Option<Duration>,
}

impl Deadline {
    /// No budget: the operation runs until it completes.
    pub const fn unbounded() -> Self {
        Self { budget: None }
    }

    pub const fn after(budget: Duration) -> Self {
        Self {
            budget: Some(budget),
        }
    }

    pub fn budget(&self) -> Option<Duration> {
        self.budget
    }

    /// A zero budget is expired before the operation is issued.
    pub fn is_expired_on_arrival(&self) -> bool {
        self.budget.is_some_and(|budget| budget.is_zero())
    }

    /// Run `operation` under this deadline.
    ///
    /// The operation receives a token that is cancelled when the budget elapses.
    /// A zero budget short-circuits: the operation is never invoked.
    pub async fn run<T, F, Fut>(&self, operation: F) -> GateOutcome<T>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = T>,
    {
        let token = CancellationToken::new();

        let Some(budget) = self.budget() else {
            return GateOutcome::Completed(operation(token).await);
        };

        if self.is_expired_on_arrival() {
            debug!("Deadline already expired, operation not issued");
            return GateOutcome::Expired;
        }

        // Counting starts before the operation is issued. A budget past the
        // clock's range never elapses.
        let Some(expires_at) = Instant::now().checked_add(budget) else {
            debug!(budget = ?budget, "Deadline beyond clock range, running unbounded");
            return GateOutcome::Completed(operation(token).await);
        };
        let in_flight = operation(token.clone());

        tokio::select! {
            biased;
            output = in_flight => GateOutcome::Completed(output),
            _ = tokio::time::sleep_until(expires_at) => {
                token.cancel();
                warn!(budget = ?budget, "Operation deadline exceeded");
                GateOutcome::Expired
            }
        }
    }
}

impl From<Option<Duration>> for Deadline {
    fn from(budget: Option<Duration>) -> Self {
        Self { budget }
    }
}

/// Run `operation` with an optional budget. See [`Deadline::run`].
pub async fn run_with_deadline<T, F, Fut>(budget: Option<Duration>, operation: F) -> GateOutcome<T>
where
    F: FnOnce(CancellationToken) -> Fut,
    Fut: Future<Output = T>,
{
    Deadline::from(budget).run(operation).await
}
