//! Locks must survive running a child process.

mod common;

use std::process::{Command, Stdio};

use common::*;
use filelock::LockType;

#[test]
fn child_try_lock() {
    common::run_child_try_lock();
}

#[test]
fn test_lock_not_dropped_by_exec_command() {
    init_tracing();
    let (temp, f) = temp_file();
    must_acquire(&f, LockType::WriteBlocking);

    let other = reopen(&temp);

    // Nothing the child inherits or closes on exit may release the lock
    // held here.
    let status = Command::new(std::env::current_exe().unwrap())
        .arg("--list")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .unwrap();
    assert!(status.success(), "child exited with {status}");

    try_lock_from_child(temp.path(), ChildOutcome::WouldBlock);
    must_would_block(&other, LockType::WriteNonBlocking);
    let lock_other = must_block(LockType::WriteBlocking, &other);
    must_unlock(&f);
    lock_other.wait();
    must_unlock(&other);

    try_lock_from_child(temp.path(), ChildOutcome::Acquired);
}
