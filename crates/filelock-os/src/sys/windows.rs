//! Windows `LockFileEx` backend.
//!
//! Windows only has byte-range locks, so the whole file is modelled as the
//! largest possible range starting at offset 0, which also covers bytes
//! appended later. Locks belong to the handle they were taken through.
//!
//! The kernel32 entry points are bound through import libraries, so they
//! are resolved once by the loader and stay fixed for the process.

use std::io;
use std::mem;

use filelock_core::{FileHandle, LockBackend, LockError, LockResult, LockScope, LockType};
use windows_sys::Win32::Foundation::{
    ERROR_CALL_NOT_IMPLEMENTED, ERROR_IO_PENDING, ERROR_LOCK_VIOLATION, ERROR_NOT_LOCKED,
    ERROR_NOT_SUPPORTED, HANDLE,
};
use windows_sys::Win32::Storage::FileSystem::{
    LOCKFILE_EXCLUSIVE_LOCK, LOCKFILE_FAIL_IMMEDIATELY, LockFileEx, UnlockFileEx,
};
use windows_sys::Win32::System::IO::OVERLAPPED;

const RESERVED: u32 = 0;
const ALL_BYTES: u32 = u32::MAX;

pub(crate) struct WindowsLock;

fn flags(lock_type: LockType) -> u32 {
    match lock_type {
        LockType::ReadBlocking => 0,
        LockType::ReadNonBlocking => LOCKFILE_FAIL_IMMEDIATELY,
        LockType::WriteBlocking => LOCKFILE_EXCLUSIVE_LOCK,
        LockType::WriteNonBlocking => LOCKFILE_EXCLUSIVE_LOCK | LOCKFILE_FAIL_IMMEDIATELY,
    }
}

fn is_would_block(code: u32) -> bool {
    code == ERROR_LOCK_VIOLATION || code == ERROR_IO_PENDING
}

fn is_not_supported(code: u32) -> bool {
    code == ERROR_NOT_SUPPORTED || code == ERROR_CALL_NOT_IMPLEMENTED
}

fn translate<F: FileHandle + ?Sized>(op: &'static str, file: &F, err: io::Error) -> LockError {
    match err.raw_os_error().map(|code| code as u32) {
        Some(code) if is_would_block(code) => LockError::WouldBlock,
        Some(code) if is_not_supported(code) => LockError::NotSupported,
        _ => LockError::os(op, file.name(), err),
    }
}

impl LockBackend for WindowsLock {
    const NAME: &'static str = "LockFileEx";
    const SCOPE: LockScope = LockScope::Descriptor;

    fn lock<F: FileHandle + ?Sized>(file: &F, lock_type: LockType) -> LockResult<()> {
        let handle = file.raw_handle() as HANDLE;
        // LockFileEx wants an OVERLAPPED even for synchronous handles; its
        // offset fields give the start of the range, which stays at 0.
        // SAFETY: OVERLAPPED is plain old data and all-zero is valid.
        let mut overlapped: OVERLAPPED = unsafe { mem::zeroed() };
        // SAFETY: overlapped lives across the call; a bad handle fails with
        // ERROR_INVALID_HANDLE.
        let ok = unsafe {
            LockFileEx(
                handle,
                flags(lock_type),
                RESERVED,
                ALL_BYTES,
                ALL_BYTES,
                &mut overlapped,
            )
        };
        if ok == 0 {
            return Err(translate(lock_type.as_str(), file, io::Error::last_os_error()));
        }
        Ok(())
    }

    fn unlock<F: FileHandle + ?Sized>(file: &F) -> LockResult<()> {
        let handle = file.raw_handle() as HANDLE;
        // SAFETY: as above.
        let mut overlapped: OVERLAPPED = unsafe { mem::zeroed() };
        // SAFETY: as above.
        let ok = unsafe { UnlockFileEx(handle, RESERVED, ALL_BYTES, ALL_BYTES, &mut overlapped) };
        if ok == 0 {
            let err = io::Error::last_os_error();
            // POSIX unlock of an unlocked file succeeds; match it.
            if err.raw_os_error().map(|code| code as u32) == Some(ERROR_NOT_LOCKED) {
                return Ok(());
            }
            return Err(translate("Unlock", file, err));
        }
        Ok(())
    }
}
