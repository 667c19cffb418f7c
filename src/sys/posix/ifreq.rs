#![allow(non_camel_case_types)]
#![allow(dead_code)]

use super::IfName;
use std::mem;

// Mirrors the Darwin struct ifreq. The size matters: the generated ioctl
// request numbers encode it, so the union must stay 16 bytes.
#[repr(C)]
#[derive(Copy, Clone, Default)]
pub struct ifreq {
    pub ifr_name: IfName,
    pub ifr_ifru: ifreq_ifru,
}

#[repr(C)]
#[derive(Copy, Clone)]
pub union ifreq_ifru {
    pub ifru_addr: libc::sockaddr,
    pub ifru_flags: libc::c_short,
    pub ifru_mtu: libc::c_int,
}

impl Default for ifreq_ifru {
    fn default() -> Self {
        unsafe { mem::zeroed() }
    }
}

impl ifreq {
    pub fn new(name: IfName) -> Self {
        ifreq {
            ifr_name: name,
            ..Default::default()
        }
    }
}
