//! Core types and traits for advisory whole-file locks.

pub mod error;
pub mod lock_type;
pub mod prelude;
pub mod traits;

pub use error::{LockError, LockErrorKind, LockResult};
pub use lock_type::LockType;
pub use prelude::*;
