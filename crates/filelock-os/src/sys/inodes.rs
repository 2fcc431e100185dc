//! In-process arbitration for inode-scoped record locks.
//!
//! Classic `fcntl` locks belong to the process, so the kernel never makes
//! one descriptor wait for another descriptor of the same process. This
//! table lets at most one descriptor per process own a lock on an inode;
//! other descriptors wait here, or get `WouldBlock` from non-blocking calls, before
//! the kernel is asked. Between processes the kernel still decides.
//!
//! Claims are keyed by descriptor number: unlock before closing.

use std::collections::BTreeMap;
use std::io;
use std::mem;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use filelock_core::RawHandle;

/// `(st_dev, st_ino)` of a file.
pub(super) type Inode = (u64, u64);

static OWNERS: Mutex<BTreeMap<Inode, RawHandle>> = Mutex::new(BTreeMap::new());
static RELEASED: Condvar = Condvar::new();

/// Result of asking the table for an inode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Claim {
    /// The descriptor now owns the inode.
    New,
    /// The descriptor already owned it (relock or conversion).
    Held,
    /// Another descriptor owns it and the caller would not wait.
    Busy,
}

pub(super) fn inode_of(fd: RawHandle) -> io::Result<Inode> {
    // SAFETY: libc::stat is plain old data and fstat fills it in.
    let mut stat: libc::stat = unsafe { mem::zeroed() };
    // SAFETY: stat outlives the call; a stale descriptor fails with EBADF.
    if unsafe { libc::fstat(fd, &mut stat) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok((stat.st_dev as u64, stat.st_ino as u64))
}

fn owners() -> MutexGuard<'static, BTreeMap<Inode, RawHandle>> {
    OWNERS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Makes `fd` the owner of `inode`, waiting for the current owner to
/// release it when `wait` is set.
pub(super) fn claim(inode: Inode, fd: RawHandle, wait: bool) -> Claim {
    let mut owners = owners();
    loop {
        match owners.get(&inode).copied() {
            None => {
                owners.insert(inode, fd);
                return Claim::New;
            }
            Some(owner) if owner == fd => return Claim::Held,
            Some(_) if !wait => return Claim::Busy,
            Some(_) => {
                owners = RELEASED
                    .wait(owners)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        }
    }
}

/// Drops `fd`'s claim on `inode` and wakes waiters. No-op for non-owners.
pub(super) fn release(inode: Inode, fd: RawHandle) {
    let mut owners = owners();
    if owners.get(&inode) == Some(&fd) {
        owners.remove(&inode);
        RELEASED.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    // Keys far from any real (dev, ino) so parallel tests don't collide.
    const INODE: Inode = (u64::MAX, 1);
    const OTHER_INODE: Inode = (u64::MAX, 2);

    #[test]
    fn test_claim_and_release() {
        assert_eq!(claim(INODE, 10, false), Claim::New);
        assert_eq!(claim(INODE, 10, false), Claim::Held);
        assert_eq!(claim(INODE, 11, false), Claim::Busy);

        // Only the owner can release.
        release(INODE, 11);
        assert_eq!(claim(INODE, 11, false), Claim::Busy);

        release(INODE, 10);
        assert_eq!(claim(INODE, 11, false), Claim::New);
        release(INODE, 11);
    }

    #[test]
    fn test_waiter_wakes_on_release() {
        assert_eq!(claim(OTHER_INODE, 20, false), Claim::New);

        let (tx, rx) = mpsc::channel();
        let waiter = thread::spawn(move || {
            let _ = tx.send(claim(OTHER_INODE, 21, true));
        });
        assert!(rx.recv_timeout(Duration::from_millis(10)).is_err());

        release(OTHER_INODE, 20);
        assert_eq!(rx.recv_timeout(Duration::from_secs(10)).unwrap(), Claim::New);
        waiter.join().unwrap();
        release(OTHER_INODE, 21);
    }

    #[test]
    fn test_inode_of_bad_descriptor() {
        let err = inode_of(-1).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::EBADF));
    }
}
