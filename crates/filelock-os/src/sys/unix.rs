//! Error handling shared by the unix backends.

use std::io;

use filelock_core::{FileHandle, LockError};

pub(super) fn is_not_supported(code: i32) -> bool {
    code == libc::ENOSYS || code == libc::ENOTSUP || code == libc::EOPNOTSUPP
}

/// Runs a lock syscall, restarting it when a signal interrupts the wait.
pub(super) fn cvt_eintr(mut call: impl FnMut() -> libc::c_int) -> io::Result<()> {
    loop {
        if call() != -1 {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

/// Maps an errno from a lock call onto the lock error taxonomy.
pub(super) fn translate<F: FileHandle + ?Sized>(
    op: &'static str,
    file: &F,
    err: io::Error,
    would_block: fn(i32) -> bool,
) -> LockError {
    match err.raw_os_error() {
        Some(code) if would_block(code) => LockError::WouldBlock,
        Some(code) if is_not_supported(code) => LockError::NotSupported,
        _ => LockError::os(op, file.name(), err),
    }
}
