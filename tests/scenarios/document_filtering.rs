//! Scenario: documents without a title are discarded.

use std::fs;

use crate::common::*;

#[test]
fn scenario_empty_title_document_is_absent() {
    let tree = SourceTree::new();
    tree.add("a/proto/x/empty.proto", PROTO_HEADER);
    tree.add("a/proto/x/widget.proto", PROTO_HEADER);

    let compiler = CannedCompiler::new();
    let report = proto_regen::app::run_with(&tree.config(), &compiler).unwrap();

    assert_eq!(report.documents_kept, 1);
    assert_eq!(report.documents_dropped, 1);
    assert!(!tree.output().join("a/proto/x/empty.yaml").exists());
    assert!(!tree.output().join("a/proto/x/openapi.yaml").exists());

    let kept = tree.output().join("a/proto/x/widget.yaml");
    let content = fs::read_to_string(kept).unwrap();
    assert!(content.contains("title: \"Widget API\""));
    assert!(content.contains("version: \"1.0\""));
}
