//! Criteria text evaluated against a generalized sample document

use caex_filter::{apply_filter, apply_filter_all, parse, SearchMode};
use caex_schema::CaexDocument;
use test_case::test_case;

const FILTER_TEST: &str = include_str!("../../caex-schema/tests/fixtures/filter_test.aml");

#[test_case("InternalElement", SearchMode::All, 10 ; "elements anywhere")]
#[test_case("InternalElement", SearchMode::Children, 0 ; "no direct internal elements")]
#[test_case("InstanceHierarchy", SearchMode::Children, 1 ; "direct hierarchy")]
#[test_case("ExternalInterface[Name='Channel_DI_.*']", SearchMode::All, 24 ; "anchored pattern")]
#[test_case("ExternalInterface[Name='Channel_D.*'][ID]", SearchMode::All, 40 ; "several predicates")]
#[test_case("ExternalInterface[Name='DI']", SearchMode::All, 0 ; "pattern must match whole value")]
#[test_case("Attribute[\"Name\"='Type']", SearchMode::All, 48 ; "quoted attribute name")]
#[test_case("Attribute[Unit]", SearchMode::All, 0 ; "absent attribute")]
#[test_case("Attribute[Name='(']", SearchMode::All, 0 ; "invalid pattern")]
#[test_case("", SearchMode::All, 0 ; "blank criteria")]
fn test_apply_filter_counts(criteria: &str, mode: SearchMode, expected: usize) {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    assert_eq!(apply_filter(tree.root(), criteria, mode).len(), expected);
}

#[test]
fn test_alternatives_concatenate_in_order() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();

    let results = apply_filter(tree.root(), "SupportedRoleClass, RefSemantic", SearchMode::All);
    assert_eq!(results.len(), 13);
    assert!(results[..10]
        .iter()
        .all(|node| node.element_name() == "SupportedRoleClass"));
    assert!(results[10..]
        .iter()
        .all(|node| node.element_name() == "RefSemantic"));
}

#[test]
fn test_element_name_is_optional() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();

    let results = apply_filter(
        tree.root(),
        "[AttributeDataType='xs:string'][Name='ProjectManufacturer']",
        SearchMode::All,
    );
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].element_name(), "Attribute");
    assert_eq!(results[0].parent().unwrap().element_name(), "InternalElement");
}

#[test]
fn test_apply_filter_all_over_several_origins() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();

    let elements = apply_filter(tree.root(), "InternalElement", SearchMode::All);
    let attributes = apply_filter_all(&elements, "Attribute", SearchMode::Children);
    assert_eq!(attributes.len(), 29);

    let project = apply_filter(tree.root(), "InternalElement[Name='Project4']", SearchMode::All);
    assert_eq!(project.len(), 1);
    let project_attributes = apply_filter(project[0], "Attribute[Name='Project.+']", SearchMode::Children);
    assert_eq!(project_attributes.len(), 4);
}

#[test]
fn test_parse_renders_canonical_form() {
    let rendered: Vec<String> = parse(r#"  InternalElement [ Name = 'Tank.*' ] , ,["ID"],Bad Name"#)
        .iter()
        .map(ToString::to_string)
        .collect();
    insta::assert_snapshot!(rendered.join(" | "), @"InternalElement[Name='Tank.*'] | [ID]");
}
