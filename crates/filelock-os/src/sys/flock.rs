//! BSD `flock(2)` backend.
//!
//! Locks belong to the open file description: descriptors produced by
//! `dup` or inherited across `fork`/`exec` share one lock, and closing one
//! of them does not release it while another stays open. Separate `open`
//! calls get separate lock state and conflict with each other even inside
//! one process.

use filelock_core::{FileHandle, LockBackend, LockResult, LockScope, LockType};

use super::unix;

pub(crate) struct Flock;

fn operation(lock_type: LockType) -> libc::c_int {
    match lock_type {
        LockType::ReadBlocking => libc::LOCK_SH,
        LockType::ReadNonBlocking => libc::LOCK_SH | libc::LOCK_NB,
        LockType::WriteBlocking => libc::LOCK_EX,
        LockType::WriteNonBlocking => libc::LOCK_EX | libc::LOCK_NB,
    }
}

fn is_would_block(code: i32) -> bool {
    code == libc::EWOULDBLOCK || code == libc::EAGAIN
}

impl LockBackend for Flock {
    const NAME: &'static str = "flock";
    const SCOPE: LockScope = LockScope::Descriptor;

    fn lock<F: FileHandle + ?Sized>(file: &F, lock_type: LockType) -> LockResult<()> {
        let fd = file.raw_handle();
        let operation = operation(lock_type);
        // SAFETY: flock only takes the descriptor number; a stale one
        // fails with EBADF.
        unix::cvt_eintr(|| unsafe { libc::flock(fd, operation) })
            .map_err(|e| unix::translate(lock_type.as_str(), file, e, is_would_block))
    }

    fn unlock<F: FileHandle + ?Sized>(file: &F) -> LockResult<()> {
        let fd = file.raw_handle();
        // SAFETY: as above.
        unix::cvt_eintr(|| unsafe { libc::flock(fd, libc::LOCK_UN) })
            .map_err(|e| unix::translate("Unlock", file, e, is_would_block))
    }
}
