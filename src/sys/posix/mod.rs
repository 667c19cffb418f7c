mod ifname;
pub use ifname::IfName;

use crate::Error;

cfg_if::cfg_if! {
    if #[cfg(target_os = "macos")] {
        pub mod ifreq;

        mod ioctls {
            nix::ioctl_readwrite!(siocgifmtu, b'i', 51, super::ifreq::ifreq);
        }

        pub(crate) fn if_mtu(name: &str) -> Result<u32, Error> {
            use std::os::unix::io::AsRawFd;

            let name = IfName::try_from(name).map_err(|_| Error::InvalidName)?;
            let mut req = ifreq::ifreq::new(name);
            let socket = make_dummy_socket()?;

            unsafe { ioctls::siocgifmtu(socket.as_raw_fd(), &mut req) }?;
            Ok(unsafe { req.ifr_ifru.ifru_mtu } as u32)
        }

        fn make_dummy_socket() -> Result<std::net::UdpSocket, Error> {
            Ok(std::net::UdpSocket::bind("[::1]:0")?)
        }
    }
}

pub(crate) fn if_indextoname(index: u32) -> Result<String, Error> {
    let mut buf = IfName::default();
    let ret = unsafe { libc::if_indextoname(index, buf.as_mut_ptr()) };

    if ret.is_null() {
        return Err(Error::InterfaceNotFound);
    }

    String::try_from(&buf).map_err(|_| Error::UnexpectedMetadata)
}

pub(crate) fn if_nametoindex(name: &str) -> Result<u32, Error> {
    let name = IfName::try_from(name).map_err(|_| Error::InvalidName)?;

    match unsafe { libc::if_nametoindex(name.as_ptr()) } {
        0 => Err(Error::InterfaceNotFound),
        n => Ok(n),
    }
}
