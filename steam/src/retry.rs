use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

const DEFAULT_DELAY_SECS: u64 = 10;

/// Outcome of a single request attempt
pub(crate) enum Attempt<T> {
    Done(T),
    RateLimited,
}

/// How to react to `429 Too Many Requests`.
///
/// The default retries forever with a fixed delay. Setting `max_attempts`
/// turns exhaustion into [`Error::RateLimited`] instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(DEFAULT_DELAY_SECS),
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    pub(crate) async fn run<T, F, Fut>(&self, endpoint: Endpoint, mut attempt: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Attempt<T>>>,
    {
        let mut attempts = 0;

        loop {
            attempts += 1;

            match attempt().await? {
                Attempt::Done(value) => return Ok(value),
                Attempt::RateLimited => {
                    if self.max_attempts.is_some_and(|max| attempts >= max) {
                        return Err(Error::RateLimited { endpoint, attempts });
                    }

                    log::warn!(
                        "Rate limited on {endpoint} (attempt {attempts}). Retrying in {:?}",
                        self.delay
                    );
                    sleep(self.delay).await;
                }
            }
        }
    }
}
