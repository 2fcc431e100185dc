//! Convenience prelude for file lock types.

pub use crate::error::{LockError, LockErrorKind, LockResult};
pub use crate::lock_type::LockType;
pub use crate::traits::{FileHandle, LockBackend, LockScope, RawHandle};
