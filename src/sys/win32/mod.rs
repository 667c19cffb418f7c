mod mib_table;

use crate::entry::AddressEntry;
use crate::flags::InterfaceFlags;
use crate::interface::InterfaceData;
use crate::traits::EnumeratorCommonT;
use crate::{Error, Interface};
use hwaddr::MacAddr6;
use ipnet::Ipv4Net;
use log::warn;
use mib_table::MibTable;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use widestring::U16CString;
use windows::core::{Error as WinError, HRESULT, HSTRING};
use windows::Win32::NetworkManagement::IpHelper::{
    ConvertInterfaceIndexToLuid, ConvertInterfaceLuidToIndex, ConvertInterfaceLuidToNameW,
    ConvertInterfaceNameToLuidW, GetIfEntry2, MIB_IF_ROW2,
};
use windows::Win32::NetworkManagement::Ndis::{
    IfOperStatusUp, IF_MAX_STRING_SIZE, NET_IF_ACCESS_BROADCAST, NET_IF_ACCESS_LOOPBACK,
    NET_IF_ACCESS_POINT_TO_POINT, NET_LUID_LH,
};
use windows::Win32::Networking::WinSock::{
    ADDRESS_FAMILY, AF_INET, AF_INET6, AF_UNSPEC, SOCKADDR_INET,
};

const ERROR_FILE_NOT_FOUND: HRESULT = windows::Win32::Foundation::ERROR_FILE_NOT_FOUND.to_hresult();
const ERROR_INVALID_NAME: HRESULT = windows::Win32::Foundation::ERROR_INVALID_NAME.to_hresult();
const ERROR_INVALID_PARAMETER: HRESULT =
    windows::Win32::Foundation::ERROR_INVALID_PARAMETER.to_hresult();

/// Windows-only extras of [`Interface`].
pub trait InterfaceExt {
    /// Driver-reported description of the adapter.
    fn description(&self) -> &str;
}

impl InterfaceExt for Interface {
    fn description(&self) -> &str {
        &self.data().description
    }
}

pub(crate) struct Enumerator;

impl EnumeratorCommonT for Enumerator {
    fn list_interfaces() -> Result<Vec<Interface>, Error> {
        let if_table = MibTable::ip_interface_table(AF_UNSPEC)?;

        let mut interfaces: Vec<InterfaceData> = vec![];
        let mut slot_by_index: HashMap<u32, usize> = HashMap::new();

        // One MIB_IPINTERFACE_ROW per (family, interface); fold families.
        for row in if_table.as_slice() {
            if slot_by_index.contains_key(&row.InterfaceIndex) {
                continue;
            }

            let data = match interface_data(row.InterfaceIndex) {
                Ok(data) => data,
                Err(Error::InterfaceNotFound) => {
                    warn!("interface {} vanished during the walk", row.InterfaceIndex);
                    continue;
                }
                Err(e) => return Err(e),
            };

            slot_by_index.insert(data.index, interfaces.len());
            interfaces.push(data);
        }

        let addr_table = MibTable::unicast_address_table(AF_UNSPEC)?;
        for row in addr_table.as_slice() {
            let Some(&slot) = slot_by_index.get(&row.InterfaceIndex) else {
                continue;
            };
            let data = &mut interfaces[slot];

            let Some(ip) = convert_sockaddr(row.Address).map(|sa| sa.ip()) else {
                warn!(
                    "unicast address row with unsupported family on interface {}",
                    row.InterfaceIndex
                );
                continue;
            };

            let mut entry = AddressEntry::new();
            entry.set_ip(ip);
            entry.set_prefix_len(row.OnLinkPrefixLength);

            // The MIB tables carry no broadcast column; reconstruct it for
            // IPv4 on broadcast-capable interfaces.
            if data.flags.contains(InterfaceFlags::BROADCAST) {
                if let IpAddr::V4(v4) = ip {
                    if let Ok(net) = Ipv4Net::new(v4, row.OnLinkPrefixLength) {
                        entry.set_broadcast(IpAddr::V4(net.broadcast()));
                    }
                }
            }

            data.entries.push(entry);
        }

        Ok(interfaces.into_iter().map(Interface::from_data).collect())
    }

    fn index_from_name(name: &str) -> Result<u32, Error> {
        let mut luid = NET_LUID_LH::default();
        let name = HSTRING::from(name);
        let code = unsafe { ConvertInterfaceNameToLuidW(&name, &mut luid) };
        match code.map_err(HRESULT::from) {
            Ok(_) => {
                let mut index = 0;
                unsafe { ConvertInterfaceLuidToIndex(&luid, &mut index)? };
                Ok(index)
            }
            Err(ERROR_FILE_NOT_FOUND) | Err(ERROR_INVALID_NAME) => Err(Error::InterfaceNotFound),
            Err(ERROR_INVALID_PARAMETER) => Err(Error::InvalidName),
            Err(e) => Err(WinError::from(e).into()),
        }
    }

    fn name_from_index(index: u32) -> Result<String, Error> {
        let mut luid = NET_LUID_LH::default();
        let code = unsafe { ConvertInterfaceIndexToLuid(index, &mut luid) };
        match code.map_err(HRESULT::from) {
            Ok(_) => name_from_luid(&luid),
            Err(ERROR_FILE_NOT_FOUND) => Err(Error::InterfaceNotFound),
            Err(e) => Err(WinError::from(e).into()),
        }
    }
}

fn interface_data(index: u32) -> Result<InterfaceData, Error> {
    let row = mib_if_row2(index)?;

    Ok(InterfaceData {
        index,
        name: name_from_luid(&row.InterfaceLuid)?,
        friendly_name: wide_to_string(&row.Alias)?,
        flags: flags_from_row(&row),
        hardware_address: physical_address(&row),
        entries: vec![],
        mtu: row.Mtu,
        description: wide_to_string(&row.Description)?,
    })
}

fn mib_if_row2(index: u32) -> Result<MIB_IF_ROW2, Error> {
    let mut row = MIB_IF_ROW2 {
        InterfaceIndex: index,
        ..Default::default()
    };
    unsafe {
        GetIfEntry2(&mut row).map_err(|_| Error::InterfaceNotFound)?;
    }
    Ok(row)
}

fn name_from_luid(luid: &NET_LUID_LH) -> Result<String, Error> {
    let mut name_buf = vec![0u16; (IF_MAX_STRING_SIZE + 1) as _];
    let code = unsafe { ConvertInterfaceLuidToNameW(luid, &mut name_buf) };

    match code.map_err(HRESULT::from) {
        Ok(_) => Ok(U16CString::from_vec_truncate(name_buf).to_string()?),
        Err(ERROR_FILE_NOT_FOUND) => Err(Error::InterfaceNotFound),
        Err(e) => Err(WinError::from(e).into()),
    }
}

fn wide_to_string(buf: &[u16]) -> Result<String, Error> {
    Ok(U16CString::from_vec_truncate(buf.to_vec()).to_string()?)
}

fn flags_from_row(row: &MIB_IF_ROW2) -> InterfaceFlags {
    let mut flags = InterfaceFlags::empty();

    if row.OperStatus == IfOperStatusUp {
        flags |= InterfaceFlags::UP | InterfaceFlags::RUNNING;
    }

    match row.AccessType {
        NET_IF_ACCESS_BROADCAST => {
            flags |= InterfaceFlags::BROADCAST | InterfaceFlags::MULTICAST;
        }
        NET_IF_ACCESS_LOOPBACK => {
            flags |= InterfaceFlags::LOOPBACK | InterfaceFlags::MULTICAST;
        }
        NET_IF_ACCESS_POINT_TO_POINT => {
            flags |= InterfaceFlags::POINT_TO_POINT;
        }
        _ => {}
    }

    flags
}

fn physical_address(row: &MIB_IF_ROW2) -> Option<MacAddr6> {
    if row.PhysicalAddressLength as usize != 6 {
        return None;
    }
    let mac = MacAddr6::try_from(&row.PhysicalAddress[..6]).ok()?;
    (!mac.is_nil()).then_some(mac)
}

fn convert_sockaddr(sa: SOCKADDR_INET) -> Option<SocketAddr> {
    unsafe {
        match ADDRESS_FAMILY(sa.si_family as _) {
            AF_INET => Some(SocketAddr::new(
                Ipv4Addr::from(sa.Ipv4.sin_addr).into(),
                u16::from_be(sa.Ipv4.sin_port),
            )),
            AF_INET6 => Some(SocketAddr::new(
                Ipv6Addr::from(sa.Ipv6.sin6_addr).into(),
                u16::from_be(sa.Ipv6.sin6_port),
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{flags_from_row, physical_address};
    use windows::Win32::NetworkManagement::IpHelper::MIB_IF_ROW2;

    #[test]
    fn zeroed_row_has_no_flags_and_no_mac() {
        let row = MIB_IF_ROW2::default();
        assert!(flags_from_row(&row).is_empty());
        assert_eq!(physical_address(&row), None);
    }

    #[test]
    fn six_byte_physical_address() {
        let mut row = MIB_IF_ROW2::default();
        row.PhysicalAddressLength = 6;
        row.PhysicalAddress[..6].copy_from_slice(&[2, 0, 0, 0, 0, 1]);
        assert_eq!(physical_address(&row), Some([2, 0, 0, 0, 0, 1].into()));

        row.PhysicalAddress[..6].copy_from_slice(&[0; 6]);
        assert_eq!(physical_address(&row), None);
    }
}
