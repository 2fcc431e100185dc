//! Cross-platform advisory whole-file locking.
//!
//! Four acquisition modes (exclusive or shared, blocking or not) plus
//! unlock, over the lock call native to each OS, with one error taxonomy
//! everywhere.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use filelock::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let file = NamedFile::create("/tmp/app.lock")?;
//!
//!     match try_lock(&file) {
//!         Ok(()) => {
//!             println!("Doing exclusive work...");
//!             unlock(&file)?;
//!         }
//!         Err(e) if e.is_would_block() => println!("Another process holds the lock"),
//!         Err(e) if e.is_not_supported() => println!("No locking here; carrying on"),
//!         Err(e) => return Err(e.into()),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Backends
//!
//! | Target                      | Call                    | Scope      |
//! |-----------------------------|-------------------------|------------|
//! | Linux, macOS, BSDs          | `flock`                 | descriptor |
//! | Linux + `ofd-locks` feature | `fcntl(F_OFD_SETLK)`    | descriptor |
//! | AIX, Solaris, illumos       | `fcntl(F_SETLK)`        | inode      |
//! | unix + `fcntl-locks`        | `fcntl(F_SETLK)`        | inode      |
//! | Windows                     | `LockFileEx`            | descriptor |
//! | anything else               | none (`NotSupported`)   | -          |
//!
//! With inode-scoped locks only one open of a file per process holds a
//! lock at a time; a second open waits (or gets `WouldBlock`) even for a
//! shared lock. Closing any descriptor for the file drops the process's
//! lock as seen by other processes, so unlock before closing.
//! Open a file at most once per process on those systems.
//!
//! # Crate Organization
//!
//! This is a facade that re-exports types from:
//! - `filelock-core`: lock types, errors and traits
//! - `filelock-os`: platform backends and the lock operations

pub use filelock_core::*;
pub use filelock_os::*;
