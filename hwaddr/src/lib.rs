use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use thiserror::Error as ThisError;

/// EUI-48 hardware (MAC) address.
///
/// Formats as six uppercase hex octets separated by colons
/// (`00:11:22:AA:BB:CC`). Parsing accepts colon-separated,
/// hyphen-separated and bare 12-digit hex forms.
#[repr(transparent)]
#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct MacAddr6([u8; 6]);

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("mac address is invalid")]
    InvalidMac,
}

impl MacAddr6 {
    /// The all-zero address, used by some OS tables for interfaces
    /// without a hardware address (loopback, tunnels).
    pub const NIL: MacAddr6 = MacAddr6([0; 6]);

    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// True for the all-zero address.
    pub fn is_nil(&self) -> bool {
        self.0 == [0; 6]
    }

    /// Locally administered bit (U/L) of the first octet.
    pub const fn is_local(&self) -> bool {
        (self.0[0] & 0b0000_0010) != 0
    }

    /// Group bit (I/G) of the first octet.
    pub const fn is_multicast(&self) -> bool {
        (self.0[0] & 0b0000_0001) != 0
    }

    pub const fn is_unicast(&self) -> bool {
        !self.is_multicast()
    }

    fn write_delimited(&self, sep: &str) -> String {
        format!(
            "{:02X}{sep}{:02X}{sep}{:02X}{sep}{:02X}{sep}{:02X}{sep}{:02X}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl Display for MacAddr6 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.write_delimited(":"))
    }
}

impl Debug for MacAddr6 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.write_delimited(":"))
    }
}

impl From<[u8; 6]> for MacAddr6 {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

impl From<MacAddr6> for [u8; 6] {
    fn from(mac: MacAddr6) -> Self {
        mac.0
    }
}

impl TryFrom<&[u8]> for MacAddr6 {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self(value.try_into().map_err(|_| Error::InvalidMac)?))
    }
}

impl FromStr for MacAddr6 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref MAC_COLON_RE: Regex = Regex::new(r#"^([[:xdigit:]]{2}):([[:xdigit:]]{2}):([[:xdigit:]]{2}):([[:xdigit:]]{2}):([[:xdigit:]]{2}):([[:xdigit:]]{2})$"#).unwrap();
            static ref MAC_HYPHEN_RE: Regex = Regex::new(r#"^([[:xdigit:]]{2})-([[:xdigit:]]{2})-([[:xdigit:]]{2})-([[:xdigit:]]{2})-([[:xdigit:]]{2})-([[:xdigit:]]{2})$"#).unwrap();
        }

        let mut mac_hex = s.to_string();
        mac_hex = MAC_COLON_RE.replace(&mac_hex, "$1$2$3$4$5$6").into();
        mac_hex = MAC_HYPHEN_RE.replace(&mac_hex, "$1$2$3$4$5$6").into();

        if mac_hex.len() != 12 {
            return Err(Error::InvalidMac);
        }

        Ok(Self(
            hex::decode(mac_hex)
                .map_err(|_| Error::InvalidMac)?
                .try_into()
                .map_err(|_| Error::InvalidMac)?,
        ))
    }
}

impl Serialize for MacAddr6 {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_string().serialize(s)
    }
}

impl<'de> Deserialize<'de> for MacAddr6 {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        MacAddr6::from_str(&String::deserialize(d)?).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use crate::MacAddr6;
    use serde::{Deserialize, Serialize};

    #[test]
    fn test_format() {
        let mac = MacAddr6::new([0x11, 0x22, 0x03, 0x00, 0x50, 0x6A]);
        assert_eq!(mac.to_string(), "11:22:03:00:50:6A")
    }

    #[test]
    fn test_parse() {
        let mac = MacAddr6::new([0x11, 0x22, 0x03, 0x00, 0x50, 0x6A]);
        assert_eq!(mac, "11:22:03:00:50:6A".parse().unwrap());
        assert_eq!(mac, "11-22-03-00-50-6A".parse().unwrap());
        assert_eq!(mac, "11220300506A".parse().unwrap());
        assert_eq!(mac, "11:22:03:00:50:6a".parse().unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<MacAddr6>().is_err());
        assert!("11:22:03:00:50".parse::<MacAddr6>().is_err());
        assert!("11:22:03:00:50:6A:FF".parse::<MacAddr6>().is_err());
        assert!("zz:22:03:00:50:6A".parse::<MacAddr6>().is_err());
        assert!("11-22-03:00-50-6A".parse::<MacAddr6>().is_err());
    }

    #[test]
    fn test_slice_conversion() {
        let mac = MacAddr6::try_from(&[0x11u8, 0x22, 0x03, 0x00, 0x50, 0x6A][..]).unwrap();
        assert_eq!(mac.octets(), [0x11, 0x22, 0x03, 0x00, 0x50, 0x6A]);
        assert!(MacAddr6::try_from(&[0x11u8, 0x22][..]).is_err());
        assert!(MacAddr6::try_from(&[0u8; 8][..]).is_err());
    }

    #[test]
    fn test_nil() {
        assert!(MacAddr6::NIL.is_nil());
        assert!(MacAddr6::default().is_nil());
        assert!(!MacAddr6::new([0, 0, 0, 0, 0, 1]).is_nil());
    }

    #[test]
    fn test_bit_predicates() {
        let universal = MacAddr6::new([0x00, 0x50, 0x56, 0x01, 0x02, 0x03]);
        assert!(!universal.is_local());
        assert!(!universal.is_multicast());
        assert!(universal.is_unicast());

        let local = MacAddr6::new([0x02, 0x50, 0x56, 0x01, 0x02, 0x03]);
        assert!(local.is_local());
        assert!(local.is_unicast());

        let group = MacAddr6::new([0x01, 0x00, 0x5E, 0x00, 0x00, 0x01]);
        assert!(group.is_multicast());
        assert!(!group.is_unicast());
    }

    #[test]
    fn test_serde() {
        #[derive(Serialize, Deserialize, Eq, PartialEq, Debug)]
        struct S {
            pub mac: MacAddr6,
        }
        let s = S {
            mac: MacAddr6::new([0x11, 0x22, 0x03, 0x00, 0x50, 0x6A]),
        };
        let serialized = serde_json::to_string(&s).unwrap();
        assert_eq!(serialized, r#"{"mac":"11:22:03:00:50:6A"}"#);
        let parsed: S = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, s);
    }
}
