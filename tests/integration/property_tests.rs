//! Property tests for profile decoding.

use asset_profile::{AllowedClasses, Profile, ResolvingDecoder};
use proptest::prelude::*;

/// Printable strings, biased towards values YAML would misread unquoted.
fn word() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[ -~]{0,16}",
        1 => prop_oneof![
            Just("~"),
            Just("null"),
            Just("true"),
            Just("no"),
            Just("0x1F"),
            Just("1e3"),
            Just("a: b"),
            Just("- item"),
            Just("#note"),
            Just("  leading"),
            Just("trailing "),
            Just("!acme.Tag"),
            Just("'quoted'"),
        ]
        .prop_map(str::to_string),
    ]
}

prop_compose! {
    fn profile()(
        label in word(),
        prefix in word(),
        primary_role in word(),
        secondary_role in word(),
        pool in word(),
        contact in proptest::option::of(word()),
        contact_notes in proptest::option::of(word()),
        classes in proptest::collection::vec(word(), 0..4),
        flags in any::<[bool; 4]>(),
    ) -> Profile {
        Profile::builder()
            .label(label)
            .prefix(prefix)
            .primary_role(primary_role)
            .secondary_role(secondary_role)
            .pool(pool)
            .maybe_contact(contact)
            .maybe_contact_notes(contact_notes)
            .allowed_classes(classes.into_iter().collect::<AllowedClasses>())
            .allow_suffix(flags[0])
            .requires_primary_role(flags[1])
            .requires_secondary_role(flags[2])
            .requires_pool(flags[3])
            .build()
    }
}

proptest! {
    /// A profile written out by this crate always decodes strictly.
    #[test]
    fn test_written_profile_decodes_strictly(profile in profile()) {
        let yaml = serde_yaml::to_string(&profile).unwrap();
        let decoder = ResolvingDecoder::<Profile>::new().unwrap();
        prop_assert_eq!(decoder.decode_str(&yaml).unwrap(), profile);
    }

    #[test]
    fn test_allowed_classes_are_unique(classes in proptest::collection::vec("[A-C]", 0..8)) {
        let allowed: AllowedClasses = classes.iter().cloned().collect();
        let mut seen = std::collections::HashSet::new();
        prop_assert!(allowed.iter().all(|c| seen.insert(c.to_string())));
        prop_assert!(classes.iter().all(|c| allowed.permits(c)));
    }
}
