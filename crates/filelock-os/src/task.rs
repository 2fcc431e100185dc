//! Running lock calls on tokio's blocking pool.
//!
//! Blocking acquisitions park the calling thread inside the OS and cannot
//! be interrupted, so async callers hand them to a blocking worker. A
//! timeout abandons the wait, not the OS call: the worker keeps waiting
//! and, if it eventually wins the lock, releases it again.

use std::sync::Arc;
use std::time::Duration;

use filelock_core::{FileHandle, LockError, LockResult, LockType};
use tokio::sync::oneshot;
use tokio::task;
use tracing::{debug, instrument, warn};

use crate::lock;

/// Acquires `file` on a blocking worker thread.
pub async fn acquire_async<F>(file: Arc<F>, lock_type: LockType) -> LockResult<()>
where
    F: FileHandle + Send + Sync + ?Sized + 'static,
{
    task::spawn_blocking(move || lock::acquire(&*file, lock_type))
        .await
        .map_err(|_| LockError::Cancelled)?
}

/// Acquires `file`, giving up after `timeout`.
///
/// Non-blocking modes ignore the timeout.
///
/// # Returns
///
/// * `Ok(())` - Lock acquired
/// * `Err(LockError::Timeout)` - Still unavailable when the timeout expired
/// * `Err(LockError::Cancelled)` - The worker thread died
#[instrument(skip(file), fields(file = %file.name(), timeout = ?timeout))]
pub async fn acquire_timeout<F>(
    file: Arc<F>,
    lock_type: LockType,
    timeout: Duration,
) -> LockResult<()>
where
    F: FileHandle + Send + Sync + ?Sized + 'static,
{
    if !lock_type.is_blocking() {
        return acquire_async(file, lock_type).await;
    }

    let (tx, mut rx) = oneshot::channel();
    task::spawn_blocking(move || {
        let result = lock::acquire(&*file, lock_type);
        if let Err(Ok(())) = tx.send(result) {
            // The caller timed out; nobody owns this lock.
            debug!(file = %file.name(), "releasing lock acquired after timeout");
            if let Err(e) = lock::unlock(&*file) {
                warn!(file = %file.name(), error = %e, "failed to release abandoned lock");
            }
        }
    });

    match tokio::time::timeout(timeout, &mut rx).await {
        Ok(Ok(result)) => result,
        Ok(Err(_)) => Err(LockError::Cancelled),
        Err(_) => {
            // Closing first means the worker either already delivered its
            // result (taken below) or will see the send fail and unlock.
            rx.close();
            match rx.try_recv() {
                Ok(result) => result,
                Err(_) => Err(LockError::Timeout(timeout)),
            }
        }
    }
}
