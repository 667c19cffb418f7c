use bitflags::bitflags;

bitflags! {
    /// Capability and status bits of a network interface.
    ///
    /// The exact set an interface reports depends on the platform; every
    /// backend maps its native representation onto these six bits.
    pub struct InterfaceFlags: u32 {
        /// Interface is administratively enabled.
        const UP = 0x01;
        /// Interface has an operational link.
        const RUNNING = 0x02;
        /// Interface can send datagrams to a broadcast address.
        const BROADCAST = 0x04;
        /// Interface is the loopback device.
        const LOOPBACK = 0x08;
        /// Interface is a point-to-point link (tunnel, PPP).
        const POINT_TO_POINT = 0x10;
        /// Interface supports multicast.
        const MULTICAST = 0x20;
    }
}

impl Default for InterfaceFlags {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(unix)]
impl InterfaceFlags {
    /// Maps a raw `ifi_flags`/`ifa_flags` word onto the portable set.
    pub(crate) fn from_iff(bits: u32) -> Self {
        let mut flags = Self::empty();
        if bits & libc::IFF_UP as u32 != 0 {
            flags |= Self::UP;
        }
        if bits & libc::IFF_RUNNING as u32 != 0 {
            flags |= Self::RUNNING;
        }
        if bits & libc::IFF_BROADCAST as u32 != 0 {
            flags |= Self::BROADCAST;
        }
        if bits & libc::IFF_LOOPBACK as u32 != 0 {
            flags |= Self::LOOPBACK;
        }
        if bits & libc::IFF_POINTOPOINT as u32 != 0 {
            flags |= Self::POINT_TO_POINT;
        }
        if bits & libc::IFF_MULTICAST as u32 != 0 {
            flags |= Self::MULTICAST;
        }
        flags
    }
}
