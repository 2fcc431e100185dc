//! POSIX `fcntl(2)` record-lock backend.
//!
//! Classic record locks (`F_SETLK`) belong to the (process, inode) pair:
//! the kernel never makes one descriptor of a process wait for another,
//! and closing *any* descriptor for the inode silently drops every lock the
//! process holds on it. Within the process, [`inodes`](super::inodes) lets
//! one descriptor at a time own the inode, so a second descriptor waits or
//! gets `WouldBlock` as it would against another process. A duplicate
//! closed by a child after `fork` does not affect the parent, since the
//! child is a different process.
//!
//! On Linux with the `ofd-locks` feature the open-file-description
//! variants (`F_OFD_SETLK`) are used instead, which behave like `flock`
//! and need no in-process table.

use std::mem;

use filelock_core::{FileHandle, LockBackend, LockError, LockResult, LockScope, LockType};

use super::inodes::{self, Claim};
use super::unix;

cfg_if::cfg_if! {
    if #[cfg(all(target_os = "linux", feature = "ofd-locks"))] {
        const SET_LOCK: libc::c_int = libc::F_OFD_SETLK;
        const SET_LOCK_WAIT: libc::c_int = libc::F_OFD_SETLKW;
        const BACKEND_NAME: &str = "fcntl(F_OFD_SETLK)";
        const BACKEND_SCOPE: LockScope = LockScope::Descriptor;
    } else {
        const SET_LOCK: libc::c_int = libc::F_SETLK;
        const SET_LOCK_WAIT: libc::c_int = libc::F_SETLKW;
        const BACKEND_NAME: &str = "fcntl(F_SETLK)";
        const BACKEND_SCOPE: LockScope = LockScope::Inode;
    }
}

/// Whether descriptors of one process must be kept apart in-process.
const TRACK_INODES: bool = matches!(BACKEND_SCOPE, LockScope::Inode);

pub(crate) struct Fcntl;

/// `(l_type, cmd)` for a lock mode.
fn command(lock_type: LockType) -> (libc::c_short, libc::c_int) {
    match lock_type {
        LockType::ReadBlocking => (libc::F_RDLCK as libc::c_short, SET_LOCK_WAIT),
        LockType::ReadNonBlocking => (libc::F_RDLCK as libc::c_short, SET_LOCK),
        LockType::WriteBlocking => (libc::F_WRLCK as libc::c_short, SET_LOCK_WAIT),
        LockType::WriteNonBlocking => (libc::F_WRLCK as libc::c_short, SET_LOCK),
    }
}

/// A lock record spanning the whole file, including future growth.
fn whole_file(l_type: libc::c_short) -> libc::flock {
    // SAFETY: libc::flock is plain old data; all-zero is valid and leaves
    // l_pid at 0 as OFD locks require.
    let mut record: libc::flock = unsafe { mem::zeroed() };
    record.l_type = l_type;
    record.l_whence = libc::SEEK_SET as libc::c_short;
    record.l_start = 0;
    record.l_len = 0;
    record
}

fn is_would_block(code: i32) -> bool {
    code == libc::EAGAIN || code == libc::EACCES
}

impl LockBackend for Fcntl {
    const NAME: &'static str = BACKEND_NAME;
    const SCOPE: LockScope = BACKEND_SCOPE;

    fn lock<F: FileHandle + ?Sized>(file: &F, lock_type: LockType) -> LockResult<()> {
        let fd = file.raw_handle();
        let op = lock_type.as_str();

        let mut claimed = None;
        if TRACK_INODES {
            let inode = inodes::inode_of(fd)
                .map_err(|e| unix::translate(op, file, e, is_would_block))?;
            match inodes::claim(inode, fd, lock_type.is_blocking()) {
                Claim::New => claimed = Some(inode),
                Claim::Held => {}
                Claim::Busy => return Err(LockError::WouldBlock),
            }
        }

        let (l_type, cmd) = command(lock_type);
        let record = whole_file(l_type);
        // SAFETY: record outlives the call and fcntl only reads it.
        let result =
            unix::cvt_eintr(|| unsafe { libc::fcntl(fd, cmd, &record as *const libc::flock) })
                .map_err(|e| unix::translate(op, file, e, is_would_block));

        if let (Err(_), Some(inode)) = (&result, claimed) {
            inodes::release(inode, fd);
        }
        result
    }

    fn unlock<F: FileHandle + ?Sized>(file: &F) -> LockResult<()> {
        let fd = file.raw_handle();
        let inode = if TRACK_INODES {
            let inode = inodes::inode_of(fd)
                .map_err(|e| unix::translate("Unlock", file, e, is_would_block))?;
            Some(inode)
        } else {
            None
        };

        let record = whole_file(libc::F_UNLCK as libc::c_short);
        // SAFETY: as above.
        unix::cvt_eintr(|| unsafe { libc::fcntl(fd, SET_LOCK, &record as *const libc::flock) })
            .map_err(|e| unix::translate("Unlock", file, e, is_would_block))?;

        if let Some(inode) = inode {
            inodes::release(inode, fd);
        }
        Ok(())
    }
}
