//! The four acquisition modes.

use std::fmt;

/// How a lock is acquired: shared or exclusive, waiting or not.
///
/// The set is closed. Each backend maps it onto its own flag encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockType {
    /// Shared lock, waits until available.
    ReadBlocking,
    /// Shared lock, fails with [`LockError::WouldBlock`](crate::LockError::WouldBlock) if unavailable.
    ReadNonBlocking,
    /// Exclusive lock, waits until available.
    WriteBlocking,
    /// Exclusive lock, fails with [`LockError::WouldBlock`](crate::LockError::WouldBlock) if unavailable.
    WriteNonBlocking,
}

impl LockType {
    /// Every mode, shared ones first.
    pub const ALL: [LockType; 4] = [
        LockType::ReadBlocking,
        LockType::ReadNonBlocking,
        LockType::WriteBlocking,
        LockType::WriteNonBlocking,
    ];

    /// Builds a mode from its two axes.
    pub const fn from_parts(exclusive: bool, blocking: bool) -> Self {
        match (exclusive, blocking) {
            (false, true) => LockType::ReadBlocking,
            (false, false) => LockType::ReadNonBlocking,
            (true, true) => LockType::WriteBlocking,
            (true, false) => LockType::WriteNonBlocking,
        }
    }

    /// Returns true for the write modes.
    pub const fn is_exclusive(self) -> bool {
        matches!(self, LockType::WriteBlocking | LockType::WriteNonBlocking)
    }

    /// Returns true for the modes that wait.
    pub const fn is_blocking(self) -> bool {
        matches!(self, LockType::ReadBlocking | LockType::WriteBlocking)
    }

    /// The non-blocking variant of the same mode.
    pub const fn non_blocking(self) -> Self {
        Self::from_parts(self.is_exclusive(), false)
    }

    /// Name of the public operation that acquires this mode.
    ///
    /// Used as the operation label in wrapped OS errors.
    pub const fn as_str(self) -> &'static str {
        match self {
            LockType::ReadBlocking => "RLock",
            LockType::ReadNonBlocking => "TryRLock",
            LockType::WriteBlocking => "Lock",
            LockType::WriteNonBlocking => "TryLock",
        }
    }
}

impl fmt::Display for LockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
