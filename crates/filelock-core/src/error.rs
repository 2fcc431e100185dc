//! Error types for file lock operations.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during lock operations.
///
/// Backends translate platform error codes before returning, so callers
/// match on these variants and never on raw OS codes.
#[derive(Error, Debug)]
pub enum LockError {
    /// The lock is held incompatibly elsewhere. Only returned by
    /// non-blocking acquisitions.
    #[error("lock would block")]
    WouldBlock,

    /// The platform or file system cannot perform advisory locking.
    #[error("file locking is not supported on this platform or file system")]
    NotSupported,

    /// Unexpected OS failure.
    #[error("{op} {path}: {source}")]
    Os {
        /// Operation name (`Lock`, `TryRLock`, `Unlock`, ...).
        op: &'static str,
        /// Display name of the file.
        path: String,
        /// The error the OS reported.
        #[source]
        source: io::Error,
    },

    /// Lock acquisition timed out.
    #[error("lock acquisition timed out after {0:?}")]
    Timeout(Duration),

    /// The worker running a blocking acquisition went away.
    #[error("lock operation was cancelled")]
    Cancelled,
}

/// Result type for lock operations.
pub type LockResult<T> = Result<T, LockError>;

/// Platform-independent classification of a [`LockError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockErrorKind {
    /// A non-blocking call found a conflicting lock.
    WouldBlock,
    /// The target or filesystem has no advisory locking.
    NotSupported,
    /// A bounded wait ran out.
    Timeout,
    /// The waiting task went away before the lock was taken.
    Cancelled,
    /// Any other OS failure.
    Other,
}

impl LockError {
    /// Wraps an OS error with the operation and file it came from.
    pub fn os(op: &'static str, path: impl Into<String>, source: io::Error) -> Self {
        LockError::Os {
            op,
            path: path.into(),
            source,
        }
    }

    /// Classifies the error without its payload.
    pub fn kind(&self) -> LockErrorKind {
        match self {
            LockError::WouldBlock => LockErrorKind::WouldBlock,
            LockError::NotSupported => LockErrorKind::NotSupported,
            LockError::Timeout(_) => LockErrorKind::Timeout,
            LockError::Cancelled => LockErrorKind::Cancelled,
            LockError::Os { .. } => LockErrorKind::Other,
        }
    }

    /// Returns true if a non-blocking call found the lock taken.
    pub fn is_would_block(&self) -> bool {
        self.kind() == LockErrorKind::WouldBlock
    }

    /// Returns true if locking is unavailable here and callers should
    /// proceed without it rather than retry.
    pub fn is_not_supported(&self) -> bool {
        self.kind() == LockErrorKind::NotSupported
    }

    /// The underlying OS error code, for wrapped OS failures.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            LockError::Os { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}

impl From<LockError> for io::Error {
    fn from(err: LockError) -> Self {
        let kind = match &err {
            LockError::WouldBlock => io::ErrorKind::WouldBlock,
            LockError::NotSupported => io::ErrorKind::Unsupported,
            LockError::Timeout(_) => io::ErrorKind::TimedOut,
            LockError::Cancelled => io::ErrorKind::Interrupted,
            LockError::Os { source, .. } => source.kind(),
        };
        io::Error::new(kind, err)
    }
}
