cfg_if::cfg_if! {
    if #[cfg(target_os = "windows")] {
        mod win32;
        pub(crate) use win32::Enumerator;
        pub use win32::InterfaceExt;
    } else if #[cfg(target_os = "linux")] {
        mod linux;
        pub(crate) use linux::Enumerator;
    } else if #[cfg(target_os = "macos")] {
        mod darwin;
        pub(crate) use darwin::Enumerator;
    }
}

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        pub(crate) mod posix;
    }
}
