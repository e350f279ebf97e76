//! Scenario: two sources in one directory form one package.

use std::fs;

use proto_regen::{build_declarations, SourceScanner};

use crate::common::*;

#[test]
fn scenario_same_directory_yields_one_declaration() {
    let tree = SourceTree::new();
    tree.add("a/proto/x/one.proto", PROTO_HEADER);
    tree.add("a/proto/x/two.proto", PROTO_HEADER);

    let groups = SourceScanner::new("vendor", "proto").scan(&tree.work()).unwrap();
    let decls = build_declarations(groups, "proto").unwrap();

    assert_eq!(decls.len(), 1);
    assert_eq!(decls[0].package_identity, "proto_x");
    assert_eq!(decls[0].base_folder, tree.work().join("a"));
    assert_eq!(decls[0].members().len(), 2);
}

#[test]
fn scenario_full_run_injects_and_generates() {
    let tree = SourceTree::new();
    let one = tree.add("a/proto/x/one.proto", PROTO_HEADER);
    tree.add("a/proto/x/two.proto", PROTO_HEADER);
    tree.add("a/proto/y/three.proto", PROTO_HEADER);
    tree.add("a/vendor/google/proto/api.proto", PROTO_HEADER);

    let compiler = CannedCompiler::new();
    let report = proto_regen::app::run_with(&tree.config(), &compiler).unwrap();

    assert_eq!(report.declarations, 2);
    assert_eq!(report.directives_injected, 3);
    assert_eq!(report.documents_kept, 3);
    assert_eq!(compiler.invocation_count(), 3);

    assert!(fs::read_to_string(&one)
        .unwrap()
        .ends_with("\noption go_package = \"/proto_x\";\n"));
    assert!(tree.output().join("a/proto/x/one.yaml").is_file());
    assert!(tree.output().join("a/proto/x/two.yaml").is_file());
    assert!(tree.output().join("a/proto/y/three.yaml").is_file());
    assert!(!tree.output().join("a/vendor").exists());
}

#[test]
fn scenario_source_outside_sentinel_aborts_before_mutation() {
    let tree = SourceTree::new();
    let good = tree.add("a/proto/x/one.proto", PROTO_HEADER);
    tree.add("b/loose/two.proto", PROTO_HEADER);

    let compiler = CannedCompiler::new();
    let err = proto_regen::app::run_with(&tree.config(), &compiler).unwrap_err();

    assert!(matches!(err, proto_regen::RegenError::SentinelNotFound { .. }));
    assert_eq!(fs::read_to_string(&good).unwrap(), PROTO_HEADER);
    assert_eq!(compiler.invocation_count(), 0);
}

#[test]
fn scenario_input_tree_is_copied_before_scanning() {
    let tree = SourceTree::new();
    let input = tree.dir.path().join("input");
    fs::create_dir_all(input.join("svc/proto/billing")).unwrap();
    fs::write(input.join("svc/proto/billing/api.proto"), PROTO_HEADER).unwrap();

    let mut config = tree.config();
    config.paths.copy_input = true;
    config.paths.input = input.clone();

    let compiler = CannedCompiler::new();
    let report = proto_regen::app::run_with(&config, &compiler).unwrap();

    assert_eq!(report.declarations, 1);
    // Input stays pristine; only the work copy is modified.
    assert_eq!(
        fs::read_to_string(input.join("svc/proto/billing/api.proto")).unwrap(),
        PROTO_HEADER
    );
    assert!(fs::read_to_string(tree.work().join("svc/proto/billing/api.proto"))
        .unwrap()
        .contains("option go_package = \"/proto_billing\";"));
    assert!(tree.output().join("svc/proto/billing/api.yaml").is_file());
}
