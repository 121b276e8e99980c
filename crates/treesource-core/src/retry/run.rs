//! Transport decorator that retries per `RetryPolicy`.

use super::classify::classify_outcome;
use super::policy::{RetryDecision, RetryPolicy};
use crate::http::{Request, Response, Transport, TransportError};

pub struct RetryingTransport<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T: Transport> RetryingTransport<T> {
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl<T: Transport> Transport for RetryingTransport<T> {
    /// Returns the first final outcome, or the last outcome once the policy
    /// gives up (a failure status stays a `Response`).
    fn execute(&self, request: &Request) -> Result<Response, TransportError> {
        let mut attempt = 1u32;
        loop {
            let outcome = self.inner.execute(request);
            let Some(kind) = classify_outcome(&outcome) else {
                return outcome;
            };
            match self.policy.decide(attempt, kind) {
                RetryDecision::NoRetry => return outcome,
                RetryDecision::RetryAfter(d) => {
                    tracing::warn!(url = %request.url, attempt, ?kind, "retrying in {:?}", d);
                    std::thread::sleep(d);
                    attempt += 1;
                }
            }
        }
    }
}
