//! Operation deadlines
//!
//! Every remote round-trip performed by a backend is bounded by the
//! `Deadline` handed to the operation, so a hung network call cannot wedge
//! the invocation.

use crate::error::{CloudError, Result};
use std::future::Future;
use std::time::{Duration, Instant};

/// Deadline threaded through backend operations
///
/// Wraps an optional expiry instant. `Deadline::none()` never expires;
/// `Deadline::after(d)` expires `d` from now. Backends call [`Deadline::bound`]
/// around each remote call.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    expires_at: Option<Instant>,
}

impl Deadline {
    /// An unbounded deadline.
    pub fn none() -> Self {
        Self { expires_at: None }
    }

    /// A deadline expiring `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self {
            expires_at: Some(Instant::now() + timeout),
        }
    }

    /// Time left before expiry; `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    pub fn expired(&self) -> bool {
        matches!(self.remaining(), Some(d) if d.is_zero())
    }

    /// Run a future, failing with [`CloudError::DeadlineExceeded`] once the
    /// deadline passes.
    pub async fn bound<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = T>,
    {
        match self.remaining() {
            None => Ok(fut.await),
            Some(remaining) => tokio::time::timeout(remaining, fut)
                .await
                .map_err(|_| CloudError::DeadlineExceeded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_never_expires() {
        let deadline = Deadline::none();
        assert!(!deadline.expired());
        assert_eq!(deadline.remaining(), None);
    }

    #[test]
    fn test_after_zero_is_expired() {
        let deadline = Deadline::after(Duration::ZERO);
        assert!(deadline.expired());
    }

    #[tokio::test]
    async fn test_bound_passes_result_through() {
        let deadline = Deadline::after(Duration::from_secs(5));
        let value = deadline.bound(async { 42 }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_bound_times_out() {
        let deadline = Deadline::after(Duration::from_millis(10));
        let result = deadline
            .bound(tokio::time::sleep(Duration::from_secs(60)))
            .await;
        assert!(matches!(result, Err(CloudError::DeadlineExceeded)));
    }
}
