//! A file paired with the path it was opened from.

use std::borrow::Cow;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use filelock_core::{FileHandle, RawHandle};

/// An open file that remembers its path, so lock errors can name it.
///
/// Opening and closing is this type's job; locking goes through
/// [`crate::lock`] and never closes or duplicates the file.
#[derive(Debug)]
pub struct NamedFile {
    file: File,
    path: PathBuf,
}

impl NamedFile {
    /// Opens an existing file for reading and writing.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().read(true).write(true).open(&path)?;
        Ok(Self { file, path })
    }

    /// Opens a file for reading and writing, creating it if missing.
    ///
    /// Existing contents are kept: a process waiting for the lock must not
    /// truncate a file another process is holding.
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        Ok(Self { file, path })
    }

    /// Wraps an already open file.
    pub fn from_parts(file: File, path: impl Into<PathBuf>) -> Self {
        Self {
            file,
            path: path.into(),
        }
    }

    /// The path the file was opened with.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The underlying file.
    pub fn as_file(&self) -> &File {
        &self.file
    }

    /// Duplicates the underlying descriptor.
    ///
    /// The duplicate shares lock state with `self` on descriptor-scoped
    /// backends.
    pub fn try_clone(&self) -> io::Result<Self> {
        Ok(Self {
            file: self.file.try_clone()?,
            path: self.path.clone(),
        })
    }

    /// Unwraps the file. Any lock it holds stays held.
    pub fn into_file(self) -> File {
        self.file
    }
}

impl FileHandle for NamedFile {
    #[cfg(windows)]
    fn raw_handle(&self) -> RawHandle {
        use std::os::windows::io::AsRawHandle;
        self.file.as_raw_handle()
    }

    #[cfg(any(unix, target_os = "wasi"))]
    fn raw_handle(&self) -> RawHandle {
        use std::os::fd::AsRawFd;
        self.file.as_raw_fd()
    }

    #[cfg(not(any(unix, windows, target_os = "wasi")))]
    fn raw_handle(&self) -> RawHandle {
        -1
    }

    fn name(&self) -> Cow<'_, str> {
        self.path.to_string_lossy()
    }
}

impl Read for NamedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for NamedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Seek for NamedFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}
