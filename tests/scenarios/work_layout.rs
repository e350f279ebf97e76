//! Document placement is relative to the work tree, whatever it is called.

use std::fs;

use proto_regen::app;

use crate::common::*;

#[test]
fn work_tree_not_named_generator() {
    let tree = SourceTree::with_work("protos");
    let one = tree.add("a/proto/x/one.proto", PROTO_HEADER);
    let compiler = CannedCompiler::new();

    let report = app::run_with(&tree.config(), &compiler).unwrap();

    assert_eq!(report.documents_kept, 1);
    assert_eq!(report.directives_injected, 1);
    assert!(tree.output().join("a/proto/x/one.yaml").is_file());
    assert!(fs::read_to_string(&one)
        .unwrap()
        .contains("option go_package = \"/proto_x\";"));
}

#[test]
fn generator_named_ancestor_is_not_stripped() {
    let tree = SourceTree::with_work("generator/ws/src");
    tree.add("a/proto/x/one.proto", PROTO_HEADER);
    let compiler = CannedCompiler::new();

    app::run_with(&tree.config(), &compiler).unwrap();

    assert!(tree.output().join("a/proto/x/one.yaml").is_file());
    assert!(!tree.output().join("ws").exists());
}

#[test]
fn output_root_outside_temp_layout() {
    let tree = SourceTree::new();
    tree.add("svc/proto/billing/v1/api.proto", PROTO_HEADER);
    let docs = tree.dir.path().join("published/docs");
    let mut config = tree.config();
    config.paths.output = docs.clone();

    app::run_with(&config, &CannedCompiler::new()).unwrap();

    assert!(docs.join("svc/proto/billing/v1/api.yaml").is_file());
    assert!(!tree.output().exists());
}
