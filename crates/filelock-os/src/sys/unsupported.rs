//! Backend for targets without advisory file locks.

use filelock_core::{FileHandle, LockBackend, LockError, LockResult, LockScope, LockType};

pub(crate) struct Unsupported;

impl LockBackend for Unsupported {
    const NAME: &'static str = "unsupported";
    const SCOPE: LockScope = LockScope::Descriptor;

    fn lock<F: FileHandle + ?Sized>(_file: &F, _lock_type: LockType) -> LockResult<()> {
        Err(LockError::NotSupported)
    }

    fn unlock<F: FileHandle + ?Sized>(_file: &F) -> LockResult<()> {
        Err(LockError::NotSupported)
    }
}
