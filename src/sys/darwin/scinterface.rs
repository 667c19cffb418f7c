use core_foundation::impl_TCFType;
use core_foundation::{array::CFArray, base::TCFType, string::CFString};
use std::collections::HashMap;
use system_configuration_sys::network_configuration::{
    SCNetworkInterfaceCopyAll, SCNetworkInterfaceGetBSDName,
    SCNetworkInterfaceGetLocalizedDisplayName, SCNetworkInterfaceGetTypeID, SCNetworkInterfaceRef,
};

core_foundation::declare_TCFType!(SCNetworkInterface, SCNetworkInterfaceRef);
core_foundation::impl_TCFType!(
    SCNetworkInterface,
    SCNetworkInterfaceRef,
    SCNetworkInterfaceGetTypeID
);

impl SCNetworkInterface {
    fn bsd_name(&self) -> Option<String> {
        let ptr = unsafe { SCNetworkInterfaceGetBSDName(self.0) };
        if ptr.is_null() {
            None
        } else {
            unsafe { Some(CFString::wrap_under_get_rule(ptr).to_string()) }
        }
    }

    fn display_name(&self) -> Option<String> {
        let ptr = unsafe { SCNetworkInterfaceGetLocalizedDisplayName(self.0) };
        if ptr.is_null() {
            None
        } else {
            unsafe { Some(CFString::wrap_under_get_rule(ptr).to_string()) }
        }
    }
}

/// Localized display names of every configured service, keyed by BSD name.
/// Interfaces the configuration framework does not know about (e.g. utun)
/// are simply absent.
pub(super) fn display_names() -> HashMap<String, String> {
    let interfaces = unsafe {
        CFArray::<SCNetworkInterface>::wrap_under_create_rule(SCNetworkInterfaceCopyAll())
    };

    let mut names = HashMap::new();
    for interface in interfaces.iter() {
        if let (Some(bsd_name), Some(display_name)) =
            (interface.bsd_name(), interface.display_name())
        {
            names.insert(bsd_name, display_name);
        }
    }
    names
}
