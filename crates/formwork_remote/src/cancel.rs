//! Cancellable requests.
//!
//! A field keeps at most one live [`CancelHandle`]. Cancelling it makes the
//! wrapped future resolve to [`RemoteError::Cancelled`] whatever the
//! underlying request does, so a late response can never reach the field.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::{RemoteError, RemoteResult};

#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that is also cancelled when this one is.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive `future` unless cancelled first.
    ///
    /// The request is dropped as soon as the handle is cancelled, and a
    /// result that races with cancellation is discarded as well.
    pub async fn run<F, T>(&self, future: F) -> RemoteResult<T>
    where
        F: Future<Output = RemoteResult<T>>,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(RemoteError::Cancelled),
            result = future => {
                if self.is_cancelled() {
                    Err(RemoteError::Cancelled)
                } else {
                    result
                }
            }
        }
    }
}

/// Wrap `future` so it can be cancelled through the returned handle.
pub fn with_cancel<F, T>(future: F) -> (CancelHandle, impl Future<Output = RemoteResult<T>>)
where
    F: Future<Output = RemoteResult<T>>,
{
    let handle = CancelHandle::new();
    let guard = handle.clone();
    (handle, async move { guard.run(future).await })
}
