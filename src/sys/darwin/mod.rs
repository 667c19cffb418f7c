mod scinterface;

use crate::entry::AddressEntry;
use crate::interface::InterfaceData;
use crate::sys::posix::{if_indextoname, if_mtu, if_nametoindex};
use crate::traits::EnumeratorCommonT;
use crate::{Error, Interface};
use hwaddr::MacAddr6;
use log::warn;
use nix::ifaddrs::{getifaddrs, InterfaceAddress};
use nix::net::if_::InterfaceFlags;
use nix::sys::socket::AddressFamily::{Inet, Inet6, Link};
use nix::sys::socket::SockaddrLike;
use std::collections::HashMap;
use std::net::IpAddr;

pub(crate) struct Enumerator;

impl EnumeratorCommonT for Enumerator {
    fn list_interfaces() -> Result<Vec<Interface>, Error> {
        let display_names = scinterface::display_names();

        // getifaddrs yields one row per address, AF_LINK rows included.
        // Interfaces appear in first-seen order, addresses in walk order.
        let mut interfaces: Vec<InterfaceData> = vec![];
        let mut slot_by_name: HashMap<String, usize> = HashMap::new();

        for ifaddr in getifaddrs()? {
            let slot = match slot_by_name.get(&ifaddr.interface_name) {
                Some(&slot) => slot,
                None => match new_slot(&ifaddr, &display_names, &mut interfaces) {
                    Some(slot) => {
                        slot_by_name.insert(ifaddr.interface_name.clone(), slot);
                        slot
                    }
                    None => continue,
                },
            };

            fill_from_row(&mut interfaces[slot], ifaddr);
        }

        Ok(interfaces.into_iter().map(Interface::from_data).collect())
    }

    fn index_from_name(name: &str) -> Result<u32, Error> {
        if_nametoindex(name)
    }

    fn name_from_index(index: u32) -> Result<String, Error> {
        if_indextoname(index)
    }
}

fn new_slot(
    ifaddr: &InterfaceAddress,
    display_names: &HashMap<String, String>,
    interfaces: &mut Vec<InterfaceData>,
) -> Option<usize> {
    let name = ifaddr.interface_name.clone();

    let index = match if_nametoindex(&name) {
        Ok(index) => index,
        Err(_) => {
            warn!("interface {:?} vanished during the walk", name);
            return None;
        }
    };

    let mtu = match if_mtu(&name) {
        Ok(mtu) => mtu,
        Err(e) => {
            warn!("SIOCGIFMTU failed on {:?}: {}", name, e);
            0
        }
    };

    let friendly_name = display_names
        .get(&name)
        .cloned()
        .unwrap_or_else(|| name.clone());

    interfaces.push(InterfaceData {
        index,
        friendly_name,
        flags: crate::InterfaceFlags::from_iff(ifaddr.flags.bits() as u32),
        mtu,
        name,
        ..InterfaceData::default()
    });
    Some(interfaces.len() - 1)
}

fn fill_from_row(data: &mut InterfaceData, ifaddr: InterfaceAddress) {
    let Some(address) = ifaddr.address else { return; };

    match address.family() {
        Some(Link) => {
            let Some(octets) = address.as_link_addr().and_then(|link| link.addr()) else {
                return;
            };
            let mac = MacAddr6::from(octets);
            if !mac.is_nil() {
                data.hardware_address = Some(mac);
            }
        }
        Some(Inet) => {
            let Some(sin) = address.as_sockaddr_in() else { return; };

            let mut entry = AddressEntry::new();
            entry.set_ip(IpAddr::V4(sin.ip().into()));

            if let Some(mask) = ifaddr.netmask.as_ref().and_then(|m| m.as_sockaddr_in()) {
                if let Ok(prefix) = ipnetwork::ipv4_mask_to_prefix(mask.ip().into()) {
                    entry.set_prefix_len(prefix);
                }
            }

            if ifaddr.flags.contains(InterfaceFlags::IFF_BROADCAST) {
                if let Some(brd) = ifaddr.broadcast.as_ref().and_then(|b| b.as_sockaddr_in()) {
                    entry.set_broadcast(IpAddr::V4(brd.ip().into()));
                }
            }

            data.entries.push(entry);
        }
        Some(Inet6) => {
            let Some(sin6) = address.as_sockaddr_in6() else { return; };

            let mut entry = AddressEntry::new();
            entry.set_ip(IpAddr::V6(sin6.ip()));

            if let Some(mask) = ifaddr.netmask.as_ref().and_then(|m| m.as_sockaddr_in6()) {
                if let Ok(prefix) = ipnetwork::ipv6_mask_to_prefix(mask.ip()) {
                    entry.set_prefix_len(prefix);
                }
            }

            data.entries.push(entry);
        }
        _ => {}
    }
}
