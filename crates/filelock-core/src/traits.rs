//! Core traits for advisory file locks.

use std::borrow::Cow;
use std::sync::Arc;

use crate::error::LockResult;
use crate::lock_type::LockType;

#[cfg(windows)]
pub type RawHandle = std::os::windows::io::RawHandle;

#[cfg(any(unix, target_os = "wasi"))]
pub type RawHandle = std::os::fd::RawFd;

#[cfg(not(any(unix, windows, target_os = "wasi")))]
pub type RawHandle = i32;

// ============================================================================
// File Handle Trait
// ============================================================================

/// An open file that can be locked.
///
/// The caller owns the file. Locking never closes or duplicates it.
///
/// # Example
///
/// ```rust,ignore
/// struct Journal {
///     file: std::fs::File,
///     path: std::path::PathBuf,
/// }
///
/// impl FileHandle for Journal {
///     fn raw_handle(&self) -> RawHandle {
///         self.file.as_raw_fd()
///     }
///
///     fn name(&self) -> Cow<'_, str> {
///         self.path.to_string_lossy()
///     }
/// }
/// ```
pub trait FileHandle {
    /// The OS descriptor or handle the lock call operates on.
    fn raw_handle(&self) -> RawHandle;

    /// Display name used in error messages and logs.
    fn name(&self) -> Cow<'_, str>;
}

impl<T: FileHandle + ?Sized> FileHandle for &T {
    fn raw_handle(&self) -> RawHandle {
        (**self).raw_handle()
    }

    fn name(&self) -> Cow<'_, str> {
        (**self).name()
    }
}

impl<T: FileHandle + ?Sized> FileHandle for &mut T {
    fn raw_handle(&self) -> RawHandle {
        (**self).raw_handle()
    }

    fn name(&self) -> Cow<'_, str> {
        (**self).name()
    }
}

impl<T: FileHandle + ?Sized> FileHandle for Box<T> {
    fn raw_handle(&self) -> RawHandle {
        (**self).raw_handle()
    }

    fn name(&self) -> Cow<'_, str> {
        (**self).name()
    }
}

impl<T: FileHandle + ?Sized> FileHandle for Arc<T> {
    fn raw_handle(&self) -> RawHandle {
        (**self).raw_handle()
    }

    fn name(&self) -> Cow<'_, str> {
        (**self).name()
    }
}

// ============================================================================
// Lock Backend Trait
// ============================================================================

/// What the kernel associates a lock with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockScope {
    /// The open file description (`flock`, OFD `fcntl`, `LockFileEx`).
    ///
    /// Two independent opens of one file conflict with each other, even
    /// inside one process. Duplicated descriptors share the lock.
    Descriptor,
    /// The (process, inode) pair (classic POSIX `fcntl`).
    ///
    /// Only one descriptor per process can hold a lock on a file at a
    /// time, so a second shared lock through another open waits like an
    /// exclusive one. Closing *any* descriptor for the inode drops every
    /// lock the process holds on it.
    Inode,
}

/// Platform lock primitive.
///
/// Exactly one implementation is compiled for each target; there is no
/// runtime selection. Implementations translate every platform error into
/// [`LockError`](crate::LockError) before returning.
pub trait LockBackend {
    /// Short name of the underlying OS call, for diagnostics.
    const NAME: &'static str;

    /// Lock association of this backend.
    const SCOPE: LockScope;

    /// Acquires a whole-file lock in the given mode.
    ///
    /// Blocking modes wait inside the OS call. Non-blocking modes return
    /// `LockError::WouldBlock` when the lock is held incompatibly.
    fn lock<F: FileHandle + ?Sized>(file: &F, lock_type: LockType) -> LockResult<()>;

    /// Releases whatever lock `file` holds. Succeeds if none is held.
    fn unlock<F: FileHandle + ?Sized>(file: &F) -> LockResult<()>;
}
