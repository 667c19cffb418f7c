use delegate::delegate;
use std::ffi::{CStr, CString};
use std::iter::zip;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IfNameError {
    #[error("interface name does not fit in IFNAMSIZ bytes: {0:?}")]
    TooLong(String),
    #[error("interface name contains a NUL byte: {0:?}")]
    EmbeddedNul(String),
    #[error("interface name buffer is not NUL-terminated")]
    NotTerminated,
    #[error("interface name is not valid UTF-8")]
    NotUnicode,
}

/// Fixed-size interface name buffer as the C interfaces expect it,
/// NUL-terminated inside `IFNAMSIZ` bytes.
#[repr(transparent)]
#[derive(Copy, Clone, Debug)]
pub struct IfName([libc::c_char; libc::IFNAMSIZ as _]);

impl Default for IfName {
    fn default() -> Self {
        Self(unsafe { std::mem::zeroed() })
    }
}

impl TryFrom<&str> for IfName {
    type Error = IfNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.len() >= libc::IFNAMSIZ as _ {
            return Err(IfNameError::TooLong(value.to_string()));
        }
        let cname =
            CString::new(value).map_err(|_| IfNameError::EmbeddedNul(value.to_string()))?;

        let mut result = Self::default();
        for (dst, src) in zip(result.0.iter_mut(), cname.as_bytes_with_nul().iter()) {
            *dst = *src as libc::c_char;
        }
        Ok(result)
    }
}

impl TryFrom<&IfName> for String {
    type Error = IfNameError;

    fn try_from(value: &IfName) -> Result<Self, Self::Error> {
        if value.0[libc::IFNAMSIZ as usize - 1] != 0 {
            return Err(IfNameError::NotTerminated);
        }
        Ok(unsafe { CStr::from_ptr(value.as_ptr()) }
            .to_str()
            .map_err(|_| IfNameError::NotUnicode)?
            .to_string())
    }
}

impl IfName {
    delegate! {
        to self.0 {
            pub fn as_ptr(&self) -> *const libc::c_char;
            pub fn as_mut_ptr(&mut self) -> *mut libc::c_char;
        }
    }
}
