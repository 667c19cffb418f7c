use std::error::Error as StdError;
use std::io;
use thiserror::Error as ThisError;
#[cfg(target_os = "windows")]
use widestring::error::Utf16Error;

#[non_exhaustive]
#[derive(Debug, ThisError)]
pub enum Error {
    /// The queried name or index does not resolve to an interface.
    #[error("interface not found")]
    InterfaceNotFound,
    /// A name is not representable on this platform (too long, NUL bytes).
    #[error("invalid interface name")]
    InvalidName,
    /// The OS returned interface data this crate cannot interpret.
    #[error("unexpected interface metadata")]
    UnexpectedMetadata,
    #[error("unknown error: {0}")]
    Unknown(Box<dyn StdError>),
    #[error("I/O error: {0}")]
    Io(io::Error),
}

#[cfg(target_os = "macos")]
impl From<nix::Error> for Error {
    fn from(e: nix::Error) -> Self {
        Error::Unknown(Box::new(e))
    }
}

#[cfg(target_os = "windows")]
impl From<windows::core::Error> for Error {
    fn from(e: windows::core::Error) -> Self {
        Self::Unknown(Box::new(e))
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(target_os = "windows")]
impl From<Utf16Error> for Error {
    fn from(_: Utf16Error) -> Self {
        Self::UnexpectedMetadata
    }
}
