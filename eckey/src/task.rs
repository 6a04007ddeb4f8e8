//! Background execution of blocking cryptographic work.
//!
//! Work is handed to the blocking thread pool of the ambient Tokio runtime.
//! The caller gets a [`Background`] handle back immediately and awaits it on
//! its own task, which is where the result is delivered. Submitted work runs
//! to completion exactly once; dropping the handle detaches it but does not
//! cancel it.

use crate::{Error, Result};
use core::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::{runtime::Handle, task::JoinHandle};

/// Handle to a unit of work running on the background pool.
///
/// Resolves to the work's own result, or to the error chosen at submission
/// if the work panicked.
#[must_use = "background work is detached unless its handle is awaited"]
#[derive(Debug)]
pub struct Background<T> {
    label: &'static str,
    failure: Error,
    handle: JoinHandle<Result<T>>,
}

impl<T: Send + 'static> Background<T> {
    /// Submit `work` to the blocking pool of the current Tokio runtime.
    ///
    /// Fails synchronously with [`Error::Executor`] when called outside a
    /// runtime. `failure` is reported if `work` panics.
    pub(crate) fn spawn<F>(label: &'static str, failure: Error, work: F) -> Result<Self>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let runtime = Handle::try_current()
            .map_err(|_| Error::Executor("no Tokio runtime available to run background work"))?;

        tracing::debug!(task = label, "submitting background work");
        let handle = runtime.spawn_blocking(move || {
            let result = work();
            tracing::debug!(task = label, ok = result.is_ok(), "background work finished");
            result
        });

        Ok(Self {
            label,
            failure,
            handle,
        })
    }
}

impl<T> Future for Background<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let label = self.label;
        let failure = self.failure.clone();
        Pin::new(&mut self.handle).poll(cx).map(|joined| {
            joined.unwrap_or_else(|err| {
                tracing::warn!(task = label, error = %err, "background work did not complete");
                Err(failure)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_result() {
        let task = Background::spawn("test", Error::Derivation, || Ok(7u32)).unwrap();
        assert_eq!(task.await, Ok(7));
    }

    #[tokio::test]
    async fn delivers_error() {
        let task = Background::<()>::spawn("test", Error::Signing, || Err(Error::Derivation)).unwrap();
        assert_eq!(task.await, Err(Error::Derivation));
    }

    #[tokio::test]
    async fn panic_becomes_failure_error() {
        let task =
            Background::<()>::spawn("test", Error::VerificationIndeterminate, || panic!("boom"))
                .unwrap();
        assert_eq!(task.await, Err(Error::VerificationIndeterminate));
    }

    #[test]
    fn spawn_outside_runtime_fails() {
        let err = Background::spawn("test", Error::Derivation, || Ok(())).unwrap_err();
        assert!(matches!(err, Error::Executor(_)));
    }
}
