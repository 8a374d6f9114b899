pub mod auth;
pub mod exam;
pub mod question;

use std::time::Duration;

/// Result of a create or update submission.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome<R> {
    Saved(i32),
    Rejected(R),
    NotFound,
}

/// Artificial delay applied to accepted submissions before they are persisted.
///
/// The sleep lives inside the request future, so a request dropped mid-wait
/// (client gone, server shutting down) never reaches the write.
#[derive(Clone, Copy, Debug, Default)]
pub struct Latency(Duration);

impl Latency {
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }

    pub async fn wait(self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}
