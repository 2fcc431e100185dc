//! Scoped lock guard.

use filelock_core::{FileHandle, LockError, LockResult, LockType};
use tracing::{debug, warn};

use crate::lock;

/// A lock held through `F`, released when the guard is dropped.
///
/// Dropping this guard calls [`unlock`](crate::unlock) and logs any
/// failure. Call [`release`](LockGuard::release) to handle the error
/// instead.
///
/// # Example
///
/// ```rust,no_run
/// use filelock_core::LockType;
/// use filelock_os::{LockGuard, NamedFile};
///
/// let file = NamedFile::create("/tmp/app.lock")?;
/// let guard = LockGuard::acquire(&file, LockType::WriteBlocking)?;
/// // exclusive section
/// guard.release()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct LockGuard<F: FileHandle> {
    file: F,
    lock_type: LockType,
    held: bool,
}

impl<F: FileHandle> LockGuard<F> {
    /// Acquires `file` in the given mode.
    pub fn acquire(file: F, lock_type: LockType) -> LockResult<Self> {
        lock::acquire(&file, lock_type)?;
        Ok(Self {
            file,
            lock_type,
            held: true,
        })
    }

    /// Attempts to acquire `file` without waiting.
    ///
    /// The mode is always tried non-blocking, whatever `lock_type` says.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(guard))` - Lock acquired
    /// * `Ok(None)` - Lock is held elsewhere
    /// * `Err(...)` - Locking failed or is not supported
    pub fn try_acquire(file: F, lock_type: LockType) -> LockResult<Option<Self>> {
        let lock_type = lock_type.non_blocking();
        match lock::acquire(&file, lock_type) {
            Ok(()) => Ok(Some(Self {
                file,
                lock_type,
                held: true,
            })),
            Err(LockError::WouldBlock) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// The mode this guard was acquired with.
    pub fn lock_type(&self) -> LockType {
        self.lock_type
    }

    /// The handle the lock is held through.
    pub fn file(&self) -> &F {
        &self.file
    }

    /// Releases the lock, reporting any OS failure.
    pub fn release(mut self) -> LockResult<()> {
        self.held = false;
        lock::unlock(&self.file)
    }
}

impl<F: FileHandle> Drop for LockGuard<F> {
    fn drop(&mut self) {
        if !self.held {
            return;
        }
        match lock::unlock(&self.file) {
            Ok(()) => debug!(file = %self.file.name(), "lock released on drop"),
            Err(e) => warn!(file = %self.file.name(), error = %e, "failed to release lock on drop"),
        }
    }
}

#[cfg(all(test, any(unix, windows)))]
mod tests {
    use super::*;
    use crate::named::NamedFile;
    use filelock_core::LockScope;
    use tempfile::NamedTempFile;

    #[test]
    fn test_guard_releases_on_drop() {
        let temp = NamedTempFile::new().unwrap();
        let first = NamedFile::open(temp.path()).unwrap();
        let second = NamedFile::open(temp.path()).unwrap();

        {
            let guard = LockGuard::acquire(&first, LockType::WriteBlocking).unwrap();
            assert_eq!(guard.lock_type(), LockType::WriteBlocking);
            assert!(LockGuard::try_acquire(&second, LockType::WriteBlocking)
                .unwrap()
                .is_none());
        }

        let guard = LockGuard::try_acquire(&second, LockType::WriteBlocking)
            .unwrap()
            .expect("lock should be free after drop");
        assert_eq!(guard.lock_type(), LockType::WriteNonBlocking);
        guard.release().unwrap();
    }

    #[test]
    fn test_shared_guards() {
        let temp = NamedTempFile::new().unwrap();
        let first = NamedFile::open(temp.path()).unwrap();
        let second = NamedFile::open(temp.path()).unwrap();
        let third = NamedFile::open(temp.path()).unwrap();

        let a = LockGuard::acquire(&first, LockType::ReadBlocking).unwrap();
        let b = LockGuard::try_acquire(&second, LockType::ReadBlocking).unwrap();
        match lock::LOCK_SCOPE {
            LockScope::Descriptor => assert!(b.is_some(), "shared locks should coexist"),
            LockScope::Inode => assert!(b.is_none(), "one open per process may hold the inode"),
        }
        assert!(LockGuard::try_acquire(&third, LockType::WriteNonBlocking)
            .unwrap()
            .is_none());

        a.release().unwrap();
        drop(b);
        LockGuard::try_acquire(&third, LockType::WriteNonBlocking)
            .unwrap()
            .expect("exclusive lock should be free");
    }
}
