//! Property tests for source discovery.

use std::fs;

use proptest::prelude::*;

use proto_regen::SourceScanner;
use tempfile::TempDir;

fn segment() -> impl Strategy<Value = String> {
    proptest::sample::select(vec!["a", "b", "proto", "vendor", "x"]).prop_map(String::from)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: no discovered group lives under a `vendor` directory, and every
    /// non-vendored source is discovered.
    #[test]
    fn property_vendor_subtrees_never_scanned(
        files in proptest::collection::vec(proptest::collection::vec(segment(), 1..=5), 1..=8),
    ) {
        let root = TempDir::new().unwrap();
        for (i, dirs) in files.iter().enumerate() {
            let dir = dirs.iter().fold(root.path().to_path_buf(), |p, s| p.join(s));
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join(format!("f{i}.proto")), "syntax = \"proto3\";\n").unwrap();
        }

        let groups = SourceScanner::new("vendor", "proto").scan(root.path()).unwrap();

        for (dir, members) in &groups {
            let rel = dir.strip_prefix(root.path()).unwrap();
            prop_assert!(rel.components().all(|c| c.as_os_str() != "vendor"));
            for member in members {
                prop_assert_eq!(member.parent().unwrap(), dir.as_path());
            }
        }

        let expected = files
            .iter()
            .filter(|dirs| !dirs.iter().any(|s| s == "vendor"))
            .count();
        let found: usize = groups.values().map(Vec::len).sum();
        prop_assert_eq!(found, expected);
    }
}
