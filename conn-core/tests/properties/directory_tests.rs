//! Property-based tests for the server directory

use conn_core::{DEFAULT_SSH_PORT, ServerDirectory};
use proptest::prelude::*;

// ========== Strategies ==========

/// Strategy for server names as they appear as YAML keys. The leading `s`
/// keeps keys clear of YAML keywords such as `null` or `no`.
fn arb_name() -> impl Strategy<Value = String> {
    "s[a-z0-9_-]{0,15}"
}

/// Strategy for addresses: dotted quads or host names
fn arb_address() -> impl Strategy<Value = String> {
    prop_oneof![
        (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>())
            .prop_map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}")),
        "[a-z]{1,10}\\.internal",
    ]
}

/// Strategy for login names
fn arb_user() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,11}"
}

fn render(entries: &[(String, String, String, Option<u16>)]) -> String {
    let mut yaml = String::new();
    for (name, address, user, port) in entries {
        yaml.push_str(&format!("{name}:\n  ip: \"{address}\"\n  user: \"{user}\"\n"));
        if let Some(port) = port {
            yaml.push_str(&format!("  port: {port}\n"));
        }
    }
    yaml
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every parsed entry keeps its address and user, and an absent or zero
    /// port resolves to 22
    #[test]
    fn parsed_entries_keep_their_values(
        entries in prop::collection::btree_map(
            arb_name(),
            (arb_address(), arb_user(), prop::option::of(any::<u16>())),
            0..8,
        )
    ) {
        let flat: Vec<_> = entries
            .iter()
            .map(|(name, (address, user, port))| (name.clone(), address.clone(), user.clone(), *port))
            .collect();

        let directory = ServerDirectory::from_yaml(&render(&flat)).unwrap();
        prop_assert_eq!(directory.len(), flat.len());

        for (name, address, user, port) in &flat {
            let entry = directory.get(name).unwrap();
            prop_assert_eq!(entry.address(), address.as_str());
            prop_assert_eq!(entry.username(), user.as_str());
            let expected = match port {
                Some(0) | None => DEFAULT_SSH_PORT,
                Some(port) => *port,
            };
            prop_assert_eq!(entry.port(), expected);
        }
    }

    /// Names are listed in lexicographic order regardless of file order
    #[test]
    fn names_are_sorted(
        names in prop::collection::hash_set(arb_name(), 0..12)
    ) {
        let flat: Vec<_> = names
            .iter()
            .map(|name| (name.clone(), "10.0.0.1".to_string(), "root".to_string(), None))
            .collect();

        let directory = ServerDirectory::from_yaml(&render(&flat)).unwrap();
        let listed: Vec<&str> = directory.names().collect();

        let mut expected: Vec<&str> = names.iter().map(String::as_str).collect();
        expected.sort_unstable();
        prop_assert_eq!(listed, expected);
    }

    /// Lookup of a name not in the directory always misses
    #[test]
    fn unknown_names_miss(
        names in prop::collection::hash_set(arb_name(), 1..6),
        probe in "[A-Z]{1,8}"
    ) {
        let flat: Vec<_> = names
            .iter()
            .map(|name| (name.clone(), "10.0.0.1".to_string(), "root".to_string(), Some(22)))
            .collect();

        let directory = ServerDirectory::from_yaml(&render(&flat)).unwrap();
        prop_assert!(directory.get(&probe).is_none());
    }
}
