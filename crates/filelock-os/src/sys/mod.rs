//! Platform lock primitives.
//!
//! One backend is compiled per target and exported as `Platform`.

cfg_if::cfg_if! {
    if #[cfg(windows)] {
        mod windows;
        pub(crate) use self::windows::WindowsLock as Platform;
    } else if #[cfg(any(
        target_os = "aix",
        target_os = "solaris",
        target_os = "illumos",
        all(unix, feature = "fcntl-locks"),
        all(target_os = "linux", feature = "ofd-locks"),
    ))] {
        // AIX and Solaris-derived systems get record locks; flock there is
        // either missing or emulated on top of fcntl.
        mod fcntl;
        mod inodes;
        mod unix;
        pub(crate) use self::fcntl::Fcntl as Platform;
    } else if #[cfg(unix)] {
        mod flock;
        mod unix;
        pub(crate) use self::flock::Flock as Platform;
    } else {
        mod unsupported;
        pub(crate) use self::unsupported::Unsupported as Platform;
    }
}
