use crate::{Error, Interface};

/// Contract every platform backend fulfils. Lookups that are not cheaper
/// natively fall back to scanning a fresh snapshot.
pub(crate) trait EnumeratorCommonT {
    fn list_interfaces() -> Result<Vec<Interface>, Error>;

    fn index_from_name(name: &str) -> Result<u32, Error>;

    fn name_from_index(index: u32) -> Result<String, Error>;

    fn interface_from_name(name: &str) -> Result<Interface, Error> {
        Self::list_interfaces()?
            .into_iter()
            .find(|iface| iface.name() == name)
            .ok_or(Error::InterfaceNotFound)
    }

    fn interface_from_index(index: u32) -> Result<Interface, Error> {
        Self::list_interfaces()?
            .into_iter()
            .find(|iface| iface.index() == index)
            .ok_or(Error::InterfaceNotFound)
    }
}
