//! Property tests for package identity derivation.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use proto_regen::{locate_package, RegenError};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,7}")
        .unwrap()
        .prop_filter("not the sentinel", |s| s != "proto")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: identity is the sentinel plus everything below it, joined by '_'.
    #[test]
    fn property_identity_from_segments(
        base in proptest::collection::vec(segment(), 0..=4),
        below in proptest::collection::vec(segment(), 0..=4),
        file in segment(),
    ) {
        let mut path = PathBuf::new();
        for s in &base {
            path.push(s);
        }
        path.push("proto");
        for s in &below {
            path.push(s);
        }
        path.push(format!("{file}.proto"));

        let loc = locate_package(&path, "proto").unwrap();

        let mut expected = vec!["proto".to_string()];
        expected.extend(below.iter().cloned());
        prop_assert_eq!(loc.identity, expected.join("_"));
        prop_assert_eq!(loc.base_folder, base.iter().collect::<PathBuf>());
    }

    /// PROPERTY: derivation is deterministic and independent of the file name.
    #[test]
    fn property_identity_stable_across_members(
        dirs in proptest::collection::vec(segment(), 0..=5),
        a in segment(),
        b in segment(),
    ) {
        let mut dir = PathBuf::from("root/proto");
        for s in &dirs {
            dir.push(s);
        }

        let first = locate_package(&dir.join(format!("{a}.proto")), "proto").unwrap();
        let again = locate_package(&dir.join(format!("{a}.proto")), "proto").unwrap();
        let other = locate_package(&dir.join(format!("{b}.proto")), "proto").unwrap();

        prop_assert_eq!(&first, &again);
        prop_assert_eq!(&first, &other);
    }

    /// PROPERTY: paths without the sentinel segment are always rejected.
    #[test]
    fn property_missing_sentinel_is_error(
        dirs in proptest::collection::vec(segment(), 0..=6),
        file in segment(),
    ) {
        let mut path: PathBuf = dirs.iter().collect();
        path.push(format!("{file}.proto"));

        let result = locate_package(Path::new(&path), "proto");
        let is_sentinel_error = matches!(result, Err(RegenError::SentinelNotFound { .. }));
        prop_assert!(is_sentinel_error);
    }
}
