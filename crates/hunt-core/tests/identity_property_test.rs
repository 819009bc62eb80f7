//! Property tests for location identities

use hunt_core::layout::StorageLayout;
use hunt_core::models::{HuntLocation, LocationId};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_identity_is_deterministic(name in ".{0,40}", address in ".{0,80}") {
        let first = LocationId::derive(&name, &address);
        prop_assert_eq!(first, LocationId::derive(&name, &address));
    }

    #[test]
    fn prop_distinct_pairs_have_distinct_identities(
        name_a in "[a-zA-Z ]{1,20}",
        address_a in "[a-zA-Z0-9 ,]{1,40}",
        name_b in "[a-zA-Z ]{1,20}",
        address_b in "[a-zA-Z0-9 ,]{1,40}",
    ) {
        prop_assume!((&name_a, &address_a) != (&name_b, &address_b));
        prop_assert_ne!(
            LocationId::derive(&name_a, &address_a),
            LocationId::derive(&name_b, &address_b)
        );
    }

    #[test]
    fn prop_repeated_search_mapping_is_stable(
        display in "[a-zA-Z]{1,10}(, [a-zA-Z0-9 ]{1,15}){0,4}",
    ) {
        let first = HuntLocation::from_display_name(&display, 45.0, -75.0);
        let second = HuntLocation::from_display_name(&display, 45.0, -75.0);
        prop_assert_eq!(first.id, second.id);
        prop_assert_eq!(
            StorageLayout::photo_filename(&first.id),
            StorageLayout::photo_filename(&second.id)
        );
    }

    #[test]
    fn prop_identity_does_not_depend_on_coordinates(
        lat in -89.0f64..89.0,
        lon in -179.0f64..179.0,
    ) {
        let a = HuntLocation::new("Library", "1 Main St", lat, lon);
        let b = HuntLocation::new("Library", "1 Main St", 45.0, -75.0);
        prop_assert_eq!(a.id, b.id);
    }
}
