use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Namespace for location identities. Changing it orphans every stored photo.
const LOCATION_NAMESPACE: Uuid = Uuid::from_u128(0x6c1d_2f4e_8a3b_5c7d_9e0f_1a2b_3c4d_5e6f);

/// Separator between name and address in the identity key
const KEY_SEPARATOR: char = '\u{1f}';

/// Stable identifier for a searched place
///
/// Derived as a UUID v5 over the display name and full address, so the same
/// place found by two separate searches (or two separate runs) maps to the
/// same photo, metadata and map snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(Uuid);

impl LocationId {
    /// Derive the identity of a name/address pair
    pub fn derive(name: &str, address: &str) -> Self {
        let mut key = String::with_capacity(name.len() + address.len() + 1);
        key.push_str(name);
        key.push(KEY_SEPARATOR);
        key.push_str(address);
        Self(Uuid::new_v5(&LOCATION_NAMESPACE, key.as_bytes()))
    }

    /// File stem used for every artifact keyed by this identity
    pub fn file_stem(&self) -> String {
        self.0.simple().to_string()
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for LocationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// WGS 84 coordinate pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True for the (0, 0) null-island pair
    pub fn is_origin(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A point of interest returned by the geocoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuntLocation {
    /// Identity derived from name and address
    pub id: LocationId,

    /// Short display name (first component of the geocoder's display name)
    pub name: String,

    /// Full address string
    pub address: String,

    pub latitude: f64,
    pub longitude: f64,
}

impl HuntLocation {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        let name = name.into();
        let address = address.into();
        Self {
            id: LocationId::derive(&name, &address),
            name,
            address,
            latitude,
            longitude,
        }
    }

    /// Build a location from a geocoder display name such as
    /// `"Balzac's Coffee, 55 Mill Street, Toronto, Ontario, Canada"`.
    pub fn from_display_name(display_name: &str, latitude: f64, longitude: f64) -> Self {
        let name = display_name
            .split(',')
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown");
        Self::new(name, display_name, latitude, longitude)
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_deterministic() {
        let a = LocationId::derive("Art Gallery", "12 King St, Toronto, Canada");
        let b = LocationId::derive("Art Gallery", "12 King St, Toronto, Canada");
        assert_eq!(a, b);
    }

    #[test]
    fn test_same_name_different_address() {
        let a = LocationId::derive("Tim Hortons", "1 Front St, Toronto");
        let b = LocationId::derive("Tim Hortons", "2 Queen St, Toronto");
        assert_ne!(a, b);
    }

    #[test]
    fn test_separator_prevents_concatenation_collisions() {
        let a = LocationId::derive("ab", "c");
        let b = LocationId::derive("a", "bc");
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_round_trip() {
        let id = LocationId::derive("Cafe", "Cafe, Ottawa");
        let parsed: LocationId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert_eq!(id.file_stem().len(), 32);
    }

    #[test]
    fn test_from_display_name() {
        let display = "Balzac's Coffee, 55 Mill Street, Toronto";
        let loc = HuntLocation::from_display_name(display, 43.65, -79.36);
        assert_eq!(loc.name, "Balzac's Coffee");
        assert_eq!(loc.address, display);
        assert_eq!(loc.id, LocationId::derive("Balzac's Coffee", display));
    }

    #[test]
    fn test_from_display_name_empty_first_component() {
        let loc = HuntLocation::from_display_name(", Somewhere", 1.0, 1.0);
        assert_eq!(loc.name, "Unknown");
    }

    #[test]
    fn test_identity_serializes_as_string_key() {
        let id = LocationId::derive("a", "b");
        let mut map = std::collections::BTreeMap::new();
        map.insert(id, 1);
        let json = serde_json::to_string(&map).unwrap();
        let back: std::collections::BTreeMap<LocationId, i32> =
            serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(&id), Some(&1));
    }
}
