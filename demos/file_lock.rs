//! Example: Using advisory file locks
//!
//! Run with: `cargo run --example file_lock`
//!
//! Start two copies at once to watch the second one wait.

use std::time::Duration;

use filelock::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join("filelock-example.lock");
    let file = NamedFile::create(&path)?;
    println!(
        "Opened {} (backend: {BACKEND_NAME}, scope: {LOCK_SCOPE:?})",
        file.path().display()
    );

    // Try first so we can tell the user why we are waiting
    match try_lock(&file) {
        Ok(()) => println!("Lock acquired immediately"),
        Err(e) if e.is_would_block() => {
            println!("Lock is held by another process, waiting...");
            lock(&file)?;
            println!("Lock acquired");
        }
        Err(e) if e.is_not_supported() => {
            println!("Advisory locks are not available here; running unlocked");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    // Do some work while holding the lock
    std::thread::sleep(Duration::from_secs(2));
    println!("Work completed");

    unlock(&file)?;
    println!("Lock released");

    // Shared lock released automatically by the guard
    {
        let _guard = LockGuard::acquire(&file, LockType::ReadBlocking)?;
        println!("Holding a shared lock");
    }
    println!("Shared lock released (via drop)");

    Ok(())
}
