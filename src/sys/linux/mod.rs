mod rtnetlink;

use crate::entry::AddressEntry;
use crate::flags::InterfaceFlags;
use crate::interface::InterfaceData;
use crate::sys::posix::{if_indextoname, if_nametoindex};
use crate::traits::EnumeratorCommonT;
use crate::{Error, Interface};
use hwaddr::MacAddr6;
use libc::{AF_INET, AF_INET6};
use log::{debug, warn};
use netlink_packet_route::address::Nla as AddressNla;
use netlink_packet_route::link::nlas::Nla as LinkNla;
use std::collections::HashMap;
use std::net::IpAddr;

pub(crate) struct Enumerator;

impl EnumeratorCommonT for Enumerator {
    fn list_interfaces() -> Result<Vec<Interface>, Error> {
        let mut interfaces: Vec<Interface> = vec![];
        let mut slot_by_index: HashMap<u32, usize> = HashMap::new();

        for link in rtnetlink::dump_links()? {
            let mut data = InterfaceData {
                index: link.header.index,
                flags: InterfaceFlags::from_iff(link.header.flags),
                ..InterfaceData::default()
            };

            for nla in link.nlas {
                match nla {
                    LinkNla::IfName(name) => data.name = name,
                    LinkNla::IfAlias(alias) => data.friendly_name = alias,
                    LinkNla::Address(bytes) => data.hardware_address = mac_from_bytes(&bytes),
                    LinkNla::Mtu(mtu) => data.mtu = mtu,
                    _ => {}
                }
            }

            if data.friendly_name.is_empty() {
                data.friendly_name = data.name.clone();
            }

            debug!("link {}: {:?}", data.index, data.name);
            slot_by_index.insert(data.index, interfaces.len());
            interfaces.push(Interface::from_data(data));
        }

        for address in rtnetlink::dump_addresses()? {
            let Some(&slot) = slot_by_index.get(&address.header.index) else {
                warn!("address message for unknown link {}", address.header.index);
                continue;
            };

            let family = address.header.family as i32;
            let prefix_len = address.header.prefix_len;

            let mut address_nla = None;
            let mut local = None;
            let mut broadcast = None;
            for nla in address.nlas {
                match nla {
                    AddressNla::Address(bytes) => address_nla = ip_from_bytes(family, &bytes),
                    AddressNla::Local(bytes) => local = ip_from_bytes(family, &bytes),
                    AddressNla::Broadcast(bytes) => broadcast = ip_from_bytes(family, &bytes),
                    _ => {}
                }
            }

            // IFA_LOCAL holds the interface address for IPv4; IFA_ADDRESS is
            // the peer on point-to-point links. IPv6 only sets IFA_ADDRESS.
            let mut entry = AddressEntry::new();
            match local.or(address_nla) {
                Some(ip) => entry.set_ip(ip),
                None => continue,
            }
            entry.set_prefix_len(prefix_len);
            if let Some(broadcast) = broadcast {
                entry.set_broadcast(broadcast);
            }

            interfaces[slot].data_mut().entries.push(entry);
        }

        Ok(interfaces)
    }

    fn index_from_name(name: &str) -> Result<u32, Error> {
        if_nametoindex(name)
    }

    fn name_from_index(index: u32) -> Result<String, Error> {
        if_indextoname(index)
    }
}

fn mac_from_bytes(bytes: &[u8]) -> Option<MacAddr6> {
    // Non-Ethernet links report other widths, loopback an all-zero address.
    let mac = MacAddr6::try_from(bytes).ok()?;
    (!mac.is_nil()).then_some(mac)
}

fn ip_from_bytes(family: i32, bytes: &[u8]) -> Option<IpAddr> {
    match family {
        AF_INET => <[u8; 4]>::try_from(bytes).ok().map(IpAddr::from),
        AF_INET6 => <[u8; 16]>::try_from(bytes).ok().map(IpAddr::from),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::{ip_from_bytes, mac_from_bytes};
    use libc::{AF_INET, AF_INET6};
    use std::net::IpAddr;

    #[test]
    fn v4_address_bytes() {
        assert_eq!(
            ip_from_bytes(AF_INET, &[127, 0, 0, 1]),
            Some("127.0.0.1".parse::<IpAddr>().unwrap())
        );
    }

    #[test]
    fn v6_address_bytes() {
        let mut bytes = [0u8; 16];
        bytes[15] = 1;
        assert_eq!(
            ip_from_bytes(AF_INET6, &bytes),
            Some("::1".parse::<IpAddr>().unwrap())
        );
    }

    #[test]
    fn mismatched_bytes_are_skipped() {
        assert_eq!(ip_from_bytes(AF_INET, &[0u8; 16]), None);
        assert_eq!(ip_from_bytes(AF_INET6, &[0u8; 4]), None);
        assert_eq!(ip_from_bytes(libc::AF_PACKET, &[0u8; 4]), None);
    }

    #[test]
    fn hardware_address_bytes() {
        assert_eq!(mac_from_bytes(&[0u8; 6]), None);
        assert_eq!(mac_from_bytes(&[0u8; 20]), None);
        assert_eq!(
            mac_from_bytes(&[2, 0, 0, 0, 0, 1]),
            Some([2, 0, 0, 0, 0, 1].into())
        );
    }
}
