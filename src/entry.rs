use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// One IP address assigned to an interface, together with its netmask and
/// (for IPv4 on broadcast-capable links) the broadcast address.
///
/// The netmask and the prefix length are two views of the same datum: the
/// prefix length is stored, keyed to the family of [`ip`](Self::ip), and the
/// netmask is derived on read. Setting either keeps the two consistent;
/// a mask of the wrong family or with non-contiguous bits simply clears the
/// stored length instead of failing — entries hold whatever the caller or
/// the OS put in them, validation is not their job.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct AddressEntry {
    ip: Option<IpAddr>,
    prefix_len: Option<u8>,
    broadcast: Option<IpAddr>,
}

fn family_max(ip: IpAddr) -> u8 {
    match ip {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

impl AddressEntry {
    /// An empty entry with no address, netmask or broadcast.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ip(&self) -> Option<IpAddr> {
        self.ip
    }

    /// Sets the address. A stored prefix length that the new family cannot
    /// carry (e.g. /64 on an IPv4 address) is dropped.
    pub fn set_ip(&mut self, ip: IpAddr) {
        if matches!(self.prefix_len, Some(len) if len > family_max(ip)) {
            self.prefix_len = None;
        }
        self.ip = Some(ip);
    }

    /// The netmask in the same family as [`ip`](Self::ip), derived from the
    /// prefix length. `None` while either the address or the length is
    /// unknown.
    pub fn netmask(&self) -> Option<IpAddr> {
        let len = self.prefix_len?;
        match self.ip? {
            IpAddr::V4(_) => Ipv4Net::new(Ipv4Addr::UNSPECIFIED, len)
                .ok()
                .map(|net| IpAddr::V4(net.netmask())),
            IpAddr::V6(_) => Ipv6Net::new(Ipv6Addr::UNSPECIFIED, len)
                .ok()
                .map(|net| IpAddr::V6(net.netmask())),
        }
    }

    /// Stores the prefix length equivalent to `netmask`. Clears it when the
    /// mask does not match the address family or is not a contiguous mask.
    pub fn set_netmask(&mut self, netmask: IpAddr) {
        self.prefix_len = match self.ip {
            Some(ip) if ip.is_ipv4() == netmask.is_ipv4() => {
                ipnet::ip_mask_to_prefix(netmask).ok()
            }
            _ => None,
        };
    }

    pub fn prefix_len(&self) -> Option<u8> {
        self.prefix_len
    }

    /// Stores the prefix length. Clears it when the address is unset or the
    /// value exceeds the family maximum (32 for IPv4, 128 for IPv6).
    pub fn set_prefix_len(&mut self, len: u8) {
        self.prefix_len = match self.ip {
            Some(ip) if len <= family_max(ip) => Some(len),
            _ => None,
        };
    }

    pub fn broadcast(&self) -> Option<IpAddr> {
        self.broadcast
    }

    /// Stores a broadcast address as-is. Only IPv4 entries on
    /// broadcast-capable interfaces normally carry one.
    pub fn set_broadcast(&mut self, broadcast: IpAddr) {
        self.broadcast = Some(broadcast);
    }

    /// The entry as an address-with-prefix network value, when both parts
    /// are known.
    pub fn network(&self) -> Option<IpNet> {
        IpNet::new(self.ip?, self.prefix_len?).ok()
    }
}

impl fmt::Debug for AddressEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressEntry")
            .field("ip", &self.ip)
            .field("netmask", &self.netmask())
            .field("prefix_len", &self.prefix_len)
            .field("broadcast", &self.broadcast)
            .finish()
    }
}
