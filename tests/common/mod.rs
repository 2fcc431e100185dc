//! Shared helpers for the lock integration tests.

#![allow(dead_code)]

use std::env;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use filelock::{LockError, LockType, NamedFile};
use tempfile::NamedTempFile;

/// How long a blocking call must stay pending before we call it blocked.
pub const QUIESCENT: Duration = Duration::from_millis(10);

/// How long a released waiter may take before we call it hung.
pub const PROBABLY_STILL_BLOCKED: Duration = Duration::from_secs(10);

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn temp_file() -> (NamedTempFile, Arc<NamedFile>) {
    let temp = NamedTempFile::new().unwrap();
    let file = reopen(&temp);
    tracing::info!(file = %temp.path().display(), "created temp file");
    (temp, file)
}

pub fn reopen(temp: &NamedTempFile) -> Arc<NamedFile> {
    Arc::new(NamedFile::open(temp.path()).unwrap())
}

pub fn do_acquire(file: &NamedFile, lock_type: LockType) -> Result<(), LockError> {
    let result = match lock_type {
        LockType::WriteBlocking => filelock::lock(file),
        LockType::WriteNonBlocking => filelock::try_lock(file),
        LockType::ReadBlocking => filelock::rlock(file),
        LockType::ReadNonBlocking => filelock::try_rlock(file),
    };
    tracing::info!(%lock_type, file = %file.path().display(), ?result);
    result
}

/// Tries `lock_type` without waiting and expects `WouldBlock`.
pub fn must_would_block(file: &NamedFile, lock_type: LockType) {
    let err = do_acquire(file, lock_type.non_blocking()).unwrap_err();
    assert!(matches!(err, LockError::WouldBlock), "{err:?}");
}

pub fn must_acquire(file: &NamedFile, lock_type: LockType) {
    do_acquire(file, lock_type).unwrap();
}

pub fn must_unlock(file: &NamedFile) {
    filelock::unlock(file).unwrap();
}

/// A blocking call observed pending on another thread.
pub struct Blocked {
    desc: String,
    done: mpsc::Receiver<Result<(), LockError>>,
}

impl Blocked {
    /// Waits for the call to finish once the conflicting lock is gone.
    pub fn wait(self) {
        match self.done.recv_timeout(PROBABLY_STILL_BLOCKED) {
            Ok(result) => result.unwrap_or_else(|e| panic!("{} failed: {e}", self.desc)),
            Err(RecvTimeoutError::Timeout) => {
                panic!("{} is unexpectedly still blocked", self.desc)
            }
            Err(RecvTimeoutError::Disconnected) => panic!("{} panicked", self.desc),
        }
    }
}

/// Starts `lock_type` on another thread and asserts it is still pending
/// after [`QUIESCENT`].
pub fn must_block(lock_type: LockType, file: &Arc<NamedFile>) -> Blocked {
    let desc = format!("{lock_type}({})", file.path().display());
    let (tx, done) = mpsc::channel();
    let file = Arc::clone(file);
    thread::spawn(move || {
        let _ = tx.send(do_acquire(&file, lock_type));
    });

    match done.recv_timeout(QUIESCENT) {
        Ok(result) => panic!("{desc} unexpectedly did not block: {result:?}"),
        Err(RecvTimeoutError::Disconnected) => panic!("{desc} panicked"),
        Err(RecvTimeoutError::Timeout) => {
            tracing::info!("{desc} is blocked (as expected)");
            Blocked { desc, done }
        }
    }
}

/// Name of the test each binary defines to run [`run_child_try_lock`].
pub const CHILD_TEST: &str = "child_try_lock";

const CHILD_PATH_VAR: &str = "FILELOCK_CHILD_PATH";
const CHILD_EXPECT_VAR: &str = "FILELOCK_CHILD_EXPECT";

/// What a `TryLock` from another process should see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOutcome {
    Acquired,
    WouldBlock,
}

impl ChildOutcome {
    fn as_str(self) -> &'static str {
        match self {
            ChildOutcome::Acquired => "acquired",
            ChildOutcome::WouldBlock => "would-block",
        }
    }
}

/// Re-runs this test binary as a separate process that opens `path` and
/// calls `TryLock` on it, and asserts the outcome.
pub fn try_lock_from_child(path: &Path, expect: ChildOutcome) {
    let status = Command::new(env::current_exe().unwrap())
        .args(["--exact", CHILD_TEST, "--test-threads=1"])
        .env(CHILD_PATH_VAR, path)
        .env(CHILD_EXPECT_VAR, expect.as_str())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .unwrap();
    assert!(
        status.success(),
        "TryLock({}) from another process did not see {expect:?}: {status}",
        path.display()
    );
}

/// Child side of [`try_lock_from_child`]. Does nothing in a normal run.
pub fn run_child_try_lock() {
    let Some(path) = env::var_os(CHILD_PATH_VAR) else {
        return;
    };
    let expect = env::var(CHILD_EXPECT_VAR).unwrap();
    let file = NamedFile::open(path).unwrap();
    let result = filelock::try_lock(&file);

    if expect == ChildOutcome::Acquired.as_str() {
        result.unwrap();
        filelock::unlock(&file).unwrap();
    } else if expect == ChildOutcome::WouldBlock.as_str() {
        assert!(matches!(result, Err(LockError::WouldBlock)), "{result:?}");
    } else {
        panic!("unknown {CHILD_EXPECT_VAR}: {expect}");
    }
}
