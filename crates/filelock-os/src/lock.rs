//! Whole-file advisory lock operations.
//!
//! Every function here is a thin call into the backend compiled for the
//! target. The kernel's lock table is the state, so these calls are safe
//! from any thread. Inode-scoped backends also record which descriptor
//! owns each inode, because the kernel cannot tell two opens in one
//! process apart.

use filelock_core::{FileHandle, LockBackend, LockResult, LockScope, LockType};
use tracing::{Span, debug, field, instrument};

use crate::sys::Platform;

/// Name of the OS call backing the locks on this target.
pub const BACKEND_NAME: &str = <Platform as LockBackend>::NAME;

/// Whether locks on this target belong to descriptors or to inodes.
pub const LOCK_SCOPE: LockScope = <Platform as LockBackend>::SCOPE;

/// Acquires a whole-file lock in the given mode.
///
/// # Returns
///
/// * `Ok(())` - Lock acquired
/// * `Err(LockError::WouldBlock)` - Non-blocking mode and the lock is held elsewhere
/// * `Err(LockError::NotSupported)` - No advisory locking here
/// * `Err(LockError::Os { .. })` - Any other OS failure
#[instrument(
    level = "debug",
    skip(file),
    fields(file = %file.name(), backend = BACKEND_NAME, acquired = field::Empty)
)]
pub fn acquire<F: FileHandle + ?Sized>(file: &F, lock_type: LockType) -> LockResult<()> {
    let result = Platform::lock(file, lock_type);
    Span::current().record("acquired", result.is_ok());
    if let Err(e) = &result {
        if !e.is_would_block() {
            debug!(error = %e, "lock call failed");
        }
    }
    result
}

/// Acquires an exclusive lock, waiting until it is available.
pub fn lock<F: FileHandle + ?Sized>(file: &F) -> LockResult<()> {
    acquire(file, LockType::WriteBlocking)
}

/// Acquires an exclusive lock or fails with `LockError::WouldBlock`.
pub fn try_lock<F: FileHandle + ?Sized>(file: &F) -> LockResult<()> {
    acquire(file, LockType::WriteNonBlocking)
}

/// Acquires a shared lock, waiting until it is available.
pub fn rlock<F: FileHandle + ?Sized>(file: &F) -> LockResult<()> {
    acquire(file, LockType::ReadBlocking)
}

/// Acquires a shared lock or fails with `LockError::WouldBlock`.
pub fn try_rlock<F: FileHandle + ?Sized>(file: &F) -> LockResult<()> {
    acquire(file, LockType::ReadNonBlocking)
}

/// Releases the lock held through `file`.
///
/// Releasing a file that holds no lock succeeds on every platform.
#[instrument(level = "debug", skip(file), fields(file = %file.name(), backend = BACKEND_NAME))]
pub fn unlock<F: FileHandle + ?Sized>(file: &F) -> LockResult<()> {
    let result = Platform::unlock(file);
    if let Err(e) = &result {
        debug!(error = %e, "unlock call failed");
    }
    result
}
