//! Bounded retry accounting.
//!
//! A [`RetrySession`] lives for one logical operation and counts attempts
//! against a budget. It decides, it does not act: the caller performs the
//! reconnect when told to retry, so the session stays free of connection
//! state and is trivial to test.

use crate::error::ClientError;

/// Default attempt budget for retried operations.
pub const DEFAULT_MAX_TRIES: u32 = 3;

/// What to do after a failed attempt.
#[derive(Debug)]
pub enum RetryDecision {
    /// Budget remains: reconnect and try again. Carries the failure for
    /// logging.
    Retry(ClientError),
    /// Stop with this error: the failure is terminal or the budget is spent.
    Fail(ClientError),
}

/// Attempt counter for one logical operation.
#[derive(Debug)]
pub struct RetrySession {
    max_tries: u32,
    attempts: u32,
}

impl RetrySession {
    /// Creates a session with the given attempt budget (at least 1).
    pub fn new(max_tries: u32) -> Self {
        Self {
            max_tries: max_tries.max(1),
            attempts: 0,
        }
    }

    /// Attempts recorded so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The attempt budget.
    pub fn max_tries(&self) -> u32 {
        self.max_tries
    }

    /// Records a failed attempt and decides whether to retry.
    ///
    /// Terminal errors fail immediately. Retryable errors fail as
    /// [`ClientError::RetryExhausted`] once the budget is used up, keeping
    /// the last cause as the source.
    pub fn failed(&mut self, err: ClientError) -> RetryDecision {
        self.attempts += 1;
        if !err.is_retryable() {
            return RetryDecision::Fail(err);
        }
        if self.attempts >= self.max_tries {
            return RetryDecision::Fail(ClientError::RetryExhausted {
                attempts: self.attempts,
                source: Box::new(err),
            });
        }
        RetryDecision::Retry(err)
    }
}
