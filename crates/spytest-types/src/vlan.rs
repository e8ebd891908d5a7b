//! VLAN ID and VLAN range types with validation.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// IEEE 802.1Q VLAN identifier (1-4094).
///
/// VLAN 0 is reserved (priority tagged frames), VLAN 4095 is reserved.
///
/// # Examples
///
/// ```
/// use spytest_types::VlanId;
///
/// let vlan = VlanId::new(100).unwrap();
/// assert_eq!(vlan.as_u16(), 100);
///
/// assert!(VlanId::new(0).is_err());
/// assert!(VlanId::new(4095).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct VlanId(u16);

impl VlanId {
    /// Minimum valid VLAN ID.
    pub const MIN: u16 = 1;

    /// Maximum valid VLAN ID.
    pub const MAX: u16 = 4094;

    /// Creates a new VLAN ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the VLAN ID is not in the valid range (1-4094).
    pub const fn new(id: u16) -> Result<Self, ParseError> {
        if id >= Self::MIN && id <= Self::MAX {
            Ok(VlanId(id))
        } else {
            Err(ParseError::InvalidVlanId(id))
        }
    }

    /// Returns the VLAN ID as a u16.
    pub const fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for VlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VlanId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Handle "Vlan100" format
        let id_str = if s.to_lowercase().starts_with("vlan") {
            &s[4..]
        } else {
            s
        };

        let id: u16 = id_str.parse().map_err(|_| ParseError::InvalidVlanId(0))?;

        VlanId::new(id)
    }
}

impl TryFrom<u16> for VlanId {
    type Error = ParseError;

    fn try_from(id: u16) -> Result<Self, Self::Error> {
        VlanId::new(id)
    }
}

impl From<VlanId> for u16 {
    fn from(vlan: VlanId) -> u16 {
        vlan.0
    }
}

/// Inclusive VLAN ID range with order-normalized endpoints.
///
/// Construction swaps the endpoints so the smaller always comes first;
/// `[15, 10]` and `[10, 15]` denote the same range. A range with equal
/// endpoints collapses to a single ID.
///
/// # Examples
///
/// ```
/// use spytest_types::VlanRange;
///
/// let range = VlanRange::new(15, 10).unwrap();
/// assert_eq!(range.lo().as_u16(), 10);
/// assert_eq!(range.hi().as_u16(), 15);
/// assert_eq!(range.ids().count(), 6);
/// assert_eq!(range.to_string(), "10-15");
///
/// assert!(VlanRange::new(7, 7).unwrap().is_single());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VlanRange {
    lo: VlanId,
    hi: VlanId,
}

impl VlanRange {
    /// Creates a range from two endpoints in either order.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is not a valid VLAN ID.
    pub fn new(a: u16, b: u16) -> Result<Self, ParseError> {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo = match VlanId::new(lo) {
            Ok(id) => id,
            Err(e) => return Err(e),
        };
        let hi = match VlanId::new(hi) {
            Ok(id) => id,
            Err(e) => return Err(e),
        };
        Ok(VlanRange { lo, hi })
    }

    /// Smaller endpoint.
    pub const fn lo(&self) -> VlanId {
        self.lo
    }

    /// Larger endpoint.
    pub const fn hi(&self) -> VlanId {
        self.hi
    }

    /// Returns true if both endpoints are the same ID.
    pub const fn is_single(&self) -> bool {
        self.lo.as_u16() == self.hi.as_u16()
    }

    /// Iterates the IDs in the range, smallest first.
    pub fn ids(&self) -> impl Iterator<Item = u16> {
        self.lo.as_u16()..=self.hi.as_u16()
    }
}

impl fmt::Display for VlanRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_vlan_ids() {
        assert!(VlanId::new(1).is_ok());
        assert!(VlanId::new(100).is_ok());
        assert!(VlanId::new(4094).is_ok());
    }

    #[test]
    fn test_invalid_vlan_ids() {
        assert!(VlanId::new(0).is_err());
        assert!(VlanId::new(4095).is_err());
    }

    #[test]
    fn test_vlan_id_parse() {
        assert_eq!("100".parse::<VlanId>().unwrap().as_u16(), 100);
        assert_eq!("Vlan200".parse::<VlanId>().unwrap().as_u16(), 200);
        assert!("Vlan".parse::<VlanId>().is_err());
    }

    #[test]
    fn test_range_normalizes_endpoints() {
        let forward = VlanRange::new(10, 15).unwrap();
        let reversed = VlanRange::new(15, 10).unwrap();
        assert_eq!(forward, reversed);
        assert_eq!(forward.lo().as_u16(), 10);
        assert_eq!(forward.hi().as_u16(), 15);
    }

    #[test]
    fn test_range_ids() {
        let range = VlanRange::new(10, 15).unwrap();
        let ids: Vec<u16> = range.ids().collect();
        assert_eq!(ids, vec![10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn test_range_single() {
        let range = VlanRange::new(7, 7).unwrap();
        assert!(range.is_single());
        assert_eq!(range.ids().count(), 1);
    }

    #[test]
    fn test_range_rejects_invalid_endpoint() {
        assert!(VlanRange::new(0, 100).is_err());
        assert!(VlanRange::new(100, 4095).is_err());
    }

    #[test]
    fn test_range_display() {
        assert_eq!(VlanRange::new(20, 12).unwrap().to_string(), "12-20");
    }
}
