use crate::error::BackendError;
use queue_provider_util::{Backoff, BackoffConfig};
use std::future::Future;
use tracing::warn;

/// Retries a backend call against transient server faults, using a bounded
/// exponential backoff. Used around every ordinary remote call the provider
/// issues (get/put/delete/list/...).
///
/// A non-transient error, or a transient error once `max_attempts` has been
/// reached, is returned to the caller as-is.
pub(crate) struct TransientServerErrorBackoff {
    backoff: Backoff,
    max_attempts: u32,
}

impl TransientServerErrorBackoff {
    pub(crate) fn new(config: BackoffConfig, max_attempts: u32) -> Self {
        Self {
            backoff: Backoff::new(config),
            max_attempts: max_attempts.max(1),
        }
    }

    pub(crate) async fn retry<F, Fut, T, E>(&self, mut action: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: BackendError,
    {
        self.backoff.reset();

        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            match action().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transient() && attempt < self.max_attempts => {
                    warn!(
                        alert = true,
                        attempt,
                        max_attempts = self.max_attempts,
                        ?error,
                        error_message = %error,
                        "Retrying a queue provider backend call after a transient fault",
                    );

                    self.backoff.sleep_next().await;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

/// Patiently retries a backend call against a not-found condition that is
/// expected to clear up on its own, such as a queue that was just created and
/// has not yet propagated to every partition of the backend.
///
/// Unlike [`TransientServerErrorBackoff`], this policy has no fixed attempt
/// count: it keeps retrying until the underlying [`Backoff`] runs out of
/// elapsed-time budget (governed by
/// [`BackoffConfig::max_elapsed_time`]), at which point the last error is
/// returned.
pub(crate) struct SlowInstantiation {
    backoff: Backoff,
}

impl SlowInstantiation {
    pub(crate) fn new(config: BackoffConfig) -> Self {
        Self {
            backoff: Backoff::new(config),
        }
    }

    pub(crate) async fn retry<F, Fut, T, E>(&self, mut action: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: BackendError,
    {
        self.backoff.reset();

        loop {
            match action().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_not_found() => match self.backoff.next() {
                    Some(delay) => tokio::time::sleep(delay).await,
                    None => return Err(error),
                },
                Err(error) => return Err(error),
            }
        }
    }
}
