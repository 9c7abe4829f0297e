//! Device selectors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// USB device selector: `(vendor-id, product-id)` pair
///
/// Parses from the conventional `vid:pid` hex notation:
///
/// ```
/// use rfpad_types::DeviceSelector;
///
/// let sel: DeviceSelector = "0ab1:0002".parse().unwrap();
/// assert_eq!(sel.vendor_id, 0x0AB1);
/// assert_eq!(sel.product_id, 0x0002);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceSelector {
    pub vendor_id: u16,
    pub product_id: u16,
}

impl DeviceSelector {
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
        }
    }
}

impl Default for DeviceSelector {
    /// The proximity pad this stack was written against
    fn default() -> Self {
        Self::new(0x0AB1, 0x0002)
    }
}

impl FromStr for DeviceSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (vid, pid) = s
            .split_once(':')
            .ok_or_else(|| Error::Parse(format!("expected vid:pid, got {:?}", s)))?;

        let vendor_id = u16::from_str_radix(vid, 16)
            .map_err(|e| Error::Parse(format!("invalid vendor id {:?}: {}", vid, e)))?;
        let product_id = u16::from_str_radix(pid, 16)
            .map_err(|e| Error::Parse(format!("invalid product id {:?}: {}", pid, e)))?;

        Ok(Self::new(vendor_id, product_id))
    }
}

impl fmt::Display for DeviceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vendor_id, self.product_id)
    }
}
