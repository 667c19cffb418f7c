mod entry;
mod error;
mod flags;
mod interface;
mod traits;
pub mod sys;

pub use entry::AddressEntry;
pub use error::Error;
pub use flags::InterfaceFlags;
pub use hwaddr::MacAddr6;
pub use interface::Interface;
pub use ipnet;

use std::net::IpAddr;
use traits::EnumeratorCommonT;

/// Takes a snapshot of every interface known to the OS.
pub fn list_interfaces() -> Result<Vec<Interface>, Error> {
    sys::Enumerator::list_interfaces()
}

/// All IP addresses assigned to the host, in interface order.
///
/// This is the concatenation of the entries of [`list_interfaces`]: an
/// address assigned to several interfaces appears once per assignment.
pub fn list_addresses() -> Result<Vec<IpAddr>, Error> {
    let interfaces = list_interfaces()?;

    Ok(interfaces
        .iter()
        .flat_map(|iface| iface.entries())
        .filter_map(AddressEntry::ip)
        .collect())
}

#[cfg(test)]
mod test {
    use super::*;

    fn loopback() -> Interface {
        list_interfaces()
            .unwrap()
            .into_iter()
            .find(Interface::is_loopback)
            .expect("host has a loopback interface")
    }

    #[test]
    fn loopback_is_valid_and_up() {
        let lo = loopback();
        assert!(lo.is_valid());
        assert!(lo.is_up());
        assert!(lo.index() > 0);
        assert!(!lo.name().is_empty());
        assert!(!lo.is_broadcast());
        assert_eq!(lo.hardware_address(), None);
        #[cfg(target_os = "linux")]
        assert!(lo.mtu() > 0);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn loopback_v4_entry() {
        let lo = loopback();
        assert_eq!(lo.name(), "lo");
        assert_eq!(lo.friendly_name(), "lo");

        let entry = lo
            .entries()
            .iter()
            .find(|entry| entry.ip() == Some("127.0.0.1".parse().unwrap()))
            .expect("loopback carries 127.0.0.1");
        assert_eq!(entry.prefix_len(), Some(8));
        assert_eq!(entry.netmask(), Some("255.0.0.0".parse().unwrap()));
    }

    #[test]
    fn name_and_index_lookups_agree() {
        for iface in list_interfaces().unwrap() {
            assert_eq!(
                Interface::index_from_name(iface.name()).unwrap(),
                iface.index()
            );
            assert_eq!(
                Interface::name_from_index(iface.index()).unwrap(),
                iface.name()
            );
            assert_eq!(
                Interface::try_from_index(iface.index()).unwrap().name(),
                iface.name()
            );
            assert_eq!(
                Interface::try_from_name(iface.name()).unwrap().index(),
                iface.index()
            );
            let index = Interface::index_from_name(iface.name()).unwrap();
            assert_eq!(
                Interface::try_from_index(index).unwrap(),
                Interface::try_from_name(iface.name()).unwrap()
            );
        }
    }

    #[test]
    fn listed_addresses_match_interface_entries() {
        let expected: Vec<IpAddr> = list_interfaces()
            .unwrap()
            .iter()
            .flat_map(|iface| iface.entries())
            .filter_map(AddressEntry::ip)
            .collect();
        assert_eq!(list_addresses().unwrap(), expected);
    }

    #[test]
    fn loopback_address_is_listed() {
        let listed = list_addresses().unwrap();
        assert!(
            listed.contains(&"127.0.0.1".parse().unwrap())
                || listed.contains(&"::1".parse().unwrap())
        );
    }

    #[test]
    fn unknown_name_is_not_found() {
        assert!(matches!(
            Interface::try_from_name("nonesuch0"),
            Err(Error::InterfaceNotFound)
        ));
        assert!(matches!(
            Interface::index_from_name("nonesuch0"),
            Err(Error::InterfaceNotFound)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn oversized_name_is_invalid() {
        let name = "x".repeat(64);
        assert!(matches!(
            Interface::index_from_name(&name),
            Err(Error::InvalidName)
        ));
    }

    #[test]
    fn index_zero_is_not_found() {
        assert!(matches!(
            Interface::try_from_index(0),
            Err(Error::InterfaceNotFound)
        ));
        assert!(matches!(
            Interface::name_from_index(0),
            Err(Error::InterfaceNotFound)
        ));
    }
}
