use crate::entry::AddressEntry;
use crate::flags::InterfaceFlags;
use crate::traits::EnumeratorCommonT;
use crate::{sys, Error};
use delegate::delegate;
use hwaddr::MacAddr6;
use std::fmt;
use std::sync::Arc;

/// Snapshot of one network interface.
///
/// Values are captured when the interface is listed or looked up and do not
/// track later OS changes. Cloning is cheap: clones share one heap allocation
/// until a crate-internal write detaches them, so snapshots can be passed
/// between threads freely.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Interface {
    data: Arc<InterfaceData>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct InterfaceData {
    pub(crate) index: u32,
    pub(crate) name: String,
    pub(crate) friendly_name: String,
    pub(crate) flags: InterfaceFlags,
    pub(crate) hardware_address: Option<MacAddr6>,
    pub(crate) entries: Vec<AddressEntry>,
    pub(crate) mtu: u32,
    #[cfg(windows)]
    pub(crate) description: String,
}

impl InterfaceData {
    fn index(&self) -> u32 {
        self.index
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn friendly_name(&self) -> &str {
        &self.friendly_name
    }

    fn flags(&self) -> InterfaceFlags {
        self.flags
    }

    fn hardware_address(&self) -> Option<MacAddr6> {
        self.hardware_address
    }

    fn entries(&self) -> &[AddressEntry] {
        &self.entries
    }

    fn mtu(&self) -> u32 {
        self.mtu
    }
}

impl Interface {
    delegate! {
        to self.data {
            /// OS interface index. Greater than zero on any real interface.
            pub fn index(&self) -> u32;
            /// System name, e.g. `eth0` or `{GUID}` on Windows.
            pub fn name(&self) -> &str;
            /// Human-readable name where the OS keeps one, otherwise the
            /// system name again.
            pub fn friendly_name(&self) -> &str;
            pub fn flags(&self) -> InterfaceFlags;
            /// Hardware (MAC) address. `None` for interfaces without one,
            /// such as loopback or tunnels.
            pub fn hardware_address(&self) -> Option<MacAddr6>;
            /// Addresses assigned to the interface, one entry per address.
            pub fn entries(&self) -> &[AddressEntry];
            /// Maximum transmission unit, 0 when unknown.
            pub fn mtu(&self) -> u32;
        }
    }

    /// Whether this value describes a real interface. Default-constructed
    /// snapshots and snapshots of since-removed interfaces are invalid.
    pub fn is_valid(&self) -> bool {
        self.data.index > 0 && !self.data.name.is_empty()
    }

    pub fn is_up(&self) -> bool {
        self.data.flags.contains(InterfaceFlags::UP)
    }

    pub fn is_running(&self) -> bool {
        self.data.flags.contains(InterfaceFlags::RUNNING)
    }

    pub fn is_loopback(&self) -> bool {
        self.data.flags.contains(InterfaceFlags::LOOPBACK)
    }

    pub fn is_broadcast(&self) -> bool {
        self.data.flags.contains(InterfaceFlags::BROADCAST)
    }

    pub fn is_point_to_point(&self) -> bool {
        self.data.flags.contains(InterfaceFlags::POINT_TO_POINT)
    }

    pub fn is_multicast(&self) -> bool {
        self.data.flags.contains(InterfaceFlags::MULTICAST)
    }

    /// Looks up one interface by its system name.
    pub fn try_from_name(name: &str) -> Result<Interface, Error> {
        sys::Enumerator::interface_from_name(name)
    }

    /// Looks up one interface by its OS index.
    pub fn try_from_index(index: u32) -> Result<Interface, Error> {
        sys::Enumerator::interface_from_index(index)
    }

    /// Resolves a system name to an index without building a full snapshot.
    pub fn index_from_name(name: &str) -> Result<u32, Error> {
        sys::Enumerator::index_from_name(name)
    }

    /// Resolves an index to a system name without building a full snapshot.
    pub fn name_from_index(index: u32) -> Result<String, Error> {
        sys::Enumerator::name_from_index(index)
    }

    pub(crate) fn from_data(data: InterfaceData) -> Self {
        Interface {
            data: Arc::new(data),
        }
    }

    pub(crate) fn data(&self) -> &InterfaceData {
        &self.data
    }

    /// Detaches from any clones sharing the allocation, then hands out the
    /// payload for mutation.
    pub(crate) fn data_mut(&mut self) -> &mut InterfaceData {
        Arc::make_mut(&mut self.data)
    }
}

impl fmt::Debug for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Interface");
        s.field("index", &self.data.index)
            .field("name", &self.data.name)
            .field("friendly_name", &self.data.friendly_name)
            .field("flags", &self.data.flags)
            .field("hardware_address", &self.data.hardware_address)
            .field("entries", &self.data.entries)
            .field("mtu", &self.data.mtu);
        #[cfg(windows)]
        s.field("description", &self.data.description);
        s.finish()
    }
}

#[cfg(test)]
mod test {
    use super::{Interface, InterfaceData};
    use crate::entry::AddressEntry;
    use crate::flags::InterfaceFlags;
    use std::sync::Arc;

    fn sample() -> Interface {
        let mut entry = AddressEntry::new();
        entry.set_ip("10.0.0.1".parse().unwrap());
        entry.set_prefix_len(24);
        Interface::from_data(InterfaceData {
            index: 2,
            name: "eth0".to_string(),
            friendly_name: "eth0".to_string(),
            flags: InterfaceFlags::UP | InterfaceFlags::RUNNING | InterfaceFlags::BROADCAST,
            hardware_address: Some([0x02, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e].into()),
            entries: vec![entry],
            mtu: 1500,
            ..InterfaceData::default()
        })
    }

    #[test]
    fn default_is_invalid() {
        let iface = Interface::default();
        assert!(!iface.is_valid());
        assert_eq!(iface.index(), 0);
        assert_eq!(iface.name(), "");
        assert_eq!(iface.hardware_address(), None);
        assert!(iface.entries().is_empty());
        assert_eq!(iface.flags(), InterfaceFlags::default());
        assert_eq!(iface.mtu(), 0);
    }

    #[test]
    fn accessors_see_payload() {
        let iface = sample();
        assert!(iface.is_valid());
        assert_eq!(iface.index(), 2);
        assert_eq!(iface.name(), "eth0");
        assert!(iface.is_up());
        assert!(iface.is_running());
        assert!(iface.is_broadcast());
        assert!(!iface.is_loopback());
        assert_eq!(iface.mtu(), 1500);
        assert_eq!(iface.entries().len(), 1);
        assert_eq!(
            iface.entries()[0].netmask(),
            Some("255.255.255.0".parse().unwrap())
        );
    }

    #[test]
    fn clones_share_allocation() {
        let iface = sample();
        let copy = iface.clone();
        assert_eq!(iface, copy);
        assert!(Arc::ptr_eq(&iface.data, &copy.data));
    }

    #[test]
    fn write_detaches_clones() {
        let iface = sample();
        let mut copy = iface.clone();
        copy.data_mut().name = "eth1".to_string();
        assert!(!Arc::ptr_eq(&iface.data, &copy.data));
        assert_eq!(iface.name(), "eth0");
        assert_eq!(copy.name(), "eth1");
        assert_ne!(iface, copy);
    }

    #[test]
    fn snapshots_cross_threads() {
        let iface = sample();
        let copy = iface.clone();
        let name = std::thread::spawn(move || copy.name().to_string())
            .join()
            .unwrap();
        assert_eq!(name, iface.name());
    }
}
