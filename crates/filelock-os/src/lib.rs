//! OS advisory whole-file locks.
//!
//! Exclusive and shared locks, blocking or not, over `flock` on most unix
//! systems, `fcntl` record locks on AIX and Solaris-derived systems (or on
//! any unix with the `fcntl-locks` feature, and as OFD locks on Linux with
//! `ofd-locks`), and `LockFileEx` on Windows. The
//! backend is chosen at compile time; other targets report
//! [`LockError::NotSupported`](filelock_core::LockError::NotSupported).
//!
//! # Example
//!
//! ```rust,no_run
//! use filelock_os::{NamedFile, lock, try_lock, unlock};
//!
//! let file = NamedFile::create("/tmp/app.lock")?;
//! let other = NamedFile::open("/tmp/app.lock")?;
//!
//! lock(&file)?;
//! assert!(try_lock(&other).unwrap_err().is_would_block());
//! unlock(&file)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod guard;
pub mod lock;
pub mod named;
mod sys;
#[cfg(feature = "async")]
pub mod task;

pub use guard::LockGuard;
pub use lock::{BACKEND_NAME, LOCK_SCOPE, acquire, lock, rlock, try_lock, try_rlock, unlock};
pub use named::NamedFile;
#[cfg(feature = "async")]
pub use task::{acquire_async, acquire_timeout};
