//! End-to-end filter composition tests on a sample Project4 instance document

use caex_filter::{CaexFilter, ElementFilter, FilterError, Operator, SearchMode, TextNodeFilter};
use caex_generic::GenericNode;
use caex_schema::CaexDocument;

const FILTER_TEST: &str = include_str!("../../caex-schema/tests/fixtures/filter_test.aml");

const PAIRS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<CAEXFile FileName="pairs.aml" SchemaVersion="2.15">
  <InstanceHierarchy Name="Plant">
    <InternalElement ID="a" Name="A">
      <ExternalInterface ID="x1" Name="x1" />
      <ExternalInterface ID="x2" Name="x2" />
    </InternalElement>
    <InternalElement ID="b" Name="B">
      <ExternalInterface ID="y1" Name="y1" />
    </InternalElement>
  </InstanceHierarchy>
</CAEXFile>"#;

fn names(nodes: &[GenericNode<'_>]) -> Vec<String> {
    nodes
        .iter()
        .map(|node| {
            node.attribute("Name")
                .map(ToString::to_string)
                .unwrap_or_default()
        })
        .collect()
}

fn all_named(nodes: &[GenericNode<'_>], element: &str) -> bool {
    nodes.iter().all(|node| node.element_name() == element)
}

// ============== Composition Tests ==============

#[test]
fn test_interfaces_with_two_child_conditions() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    let mut filter = CaexFilter::for_tree(&tree);

    let results = filter
        .all()
        .element("ExternalInterface")
        .unwrap()
        .having_child()
        .element_with("Attribute", ["Name='Type'"])
        .unwrap()
        .having_child()
        .text_node("Value", "Digital")
        .unwrap()
        .done()
        .done()
        .and()
        .element_with("Attribute", ["Name='IoType'"])
        .unwrap()
        .having_child()
        .text_node("Value", "Input")
        .unwrap()
        .execute();

    assert_eq!(results.len(), 24);
    assert!(all_named(&results, "ExternalInterface"));
    assert!(names(&results)
        .iter()
        .all(|name| name.starts_with("Channel_DI_")));
}

#[test]
fn test_text_filter_value_changed_between_executions() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    let mut filter = CaexFilter::for_tree(&tree);
    let signal = filter.register_text_filter(TextNodeFilter::new("Value", "Digital"));

    filter
        .all()
        .element("ExternalInterface")
        .unwrap()
        .having_child()
        .element_with("Attribute", ["Name='Type'"])
        .unwrap()
        .having_child()
        .text_node_filter(signal)
        .unwrap();

    let digital = filter.execute();
    assert_eq!(digital.len(), 40);
    assert!(all_named(&digital, "ExternalInterface"));

    filter.text_filter_mut(signal).unwrap().set_value("Analog");
    let analog = filter.execute();
    assert_eq!(analog.len(), 7);
    assert!(names(&analog)
        .iter()
        .all(|name| name.starts_with("Channel_AI_") || name.starts_with("Channel_AO_")));
    assert_eq!(filter.text_filter(signal).unwrap().value(), "Analog");
}

#[test]
fn test_filter_from_intermediate_result() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    let mut filter = CaexFilter::for_tree(&tree);

    let hierarchies = filter
        .clear()
        .children()
        .element("InstanceHierarchy")
        .unwrap()
        .execute();
    assert_eq!(hierarchies.len(), 1);

    let mut nested = CaexFilter::new(hierarchies[0]);
    let results = nested
        .children()
        .element("InternalElement")
        .unwrap()
        .having_child()
        .element_with("Attribute", ["Name='Project.+'"])
        .unwrap()
        .execute();

    assert_eq!(results.len(), 4);
    assert!(all_named(&results, "Attribute"));
    insta::assert_snapshot!(
        names(&results).join(", "),
        @"ProjectManufacturer, ProjectSign, ProjectRevision, ProjectInformation"
    );
    assert!(results
        .iter()
        .all(|attribute| attribute.parent().unwrap().element_name() == "InternalElement"));
}

#[test]
fn test_or_adds_sibling_results_in_order() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    let mut filter = CaexFilter::for_tree(&tree);

    let results = filter
        .all()
        .element("ExternalInterface")
        .unwrap()
        .having_child()
        .element_with("Attribute", ["Name='IoType'"])
        .unwrap()
        .having_child()
        .text_node("Value", "Output")
        .unwrap()
        .done()
        .or()
        .element_with("Attribute", ["Name='IoType'"])
        .unwrap()
        .having_child()
        .text_node("Value", "Input")
        .unwrap()
        .execute();

    assert_eq!(results.len(), 47);
    let names = names(&results);
    assert!(names[..18].iter().all(|name| name.contains("_DO_") || name.contains("_AO_")));
    assert!(names[18..].iter().all(|name| name.contains("_DI_") || name.contains("_AI_")));
}

#[test]
fn test_and_selects_same_members_in_either_order() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();

    let run = |first: (&str, &str), second: (&str, &str)| {
        let mut filter = CaexFilter::for_tree(&tree);
        let mut results = filter
            .all()
            .element("ExternalInterface")
            .unwrap()
            .having_child()
            .element_with("Attribute", [first.0])
            .unwrap()
            .having_child()
            .text_node("Value", first.1)
            .unwrap()
            .done()
            .and()
            .element_with("Attribute", [second.0])
            .unwrap()
            .having_child()
            .text_node("Value", second.1)
            .unwrap()
            .execute();
        results.sort_by_key(|node| node.id());
        results
    };

    let forward = run(("Name='Type'", "Digital"), ("Name='IoType'", "Input"));
    let backward = run(("Name='IoType'", "Input"), ("Name='Type'", "Digital"));
    assert_eq!(forward.len(), 24);
    assert_eq!(forward, backward);
}

#[test]
fn test_and_on_equal_lengths_keeps_both_sides() {
    let doc = CaexDocument::parse(PAIRS).unwrap();
    let tree = doc.generalize().unwrap();

    let run = |first: &str, second: &str| {
        let mut filter = CaexFilter::for_tree(&tree);
        let results = filter
            .all()
            .element("InternalElement")
            .unwrap()
            .having_child()
            .element_with("ExternalInterface", [first])
            .unwrap()
            .and()
            .element_with("ExternalInterface", [second])
            .unwrap()
            .execute();
        names(&results)
    };

    assert_eq!(run("Name='x1'", "Name='x2'"), ["x1", "x2"]);
    assert_eq!(run("Name='x2'", "Name='x1'"), ["x2", "x1"]);
    assert!(run("Name='x1'", "Name='y1'").is_empty());
}

#[test]
fn test_and_on_top_level_stage_searches_with_its_mode() {
    let doc = CaexDocument::parse(PAIRS).unwrap();
    let tree = doc.generalize().unwrap();
    let mut filter = CaexFilter::for_tree(&tree);

    // The second stage is attached below the first and inherits its mode.
    let results = filter
        .all()
        .element("InstanceHierarchy")
        .unwrap()
        .and()
        .element("ExternalInterface")
        .unwrap()
        .execute();

    assert_eq!(names(&results), ["x1", "x2", "y1"]);
}

// ============== Search Mode Tests ==============

#[test]
fn test_children_and_all_modes() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    let mut filter = CaexFilter::for_tree(&tree);

    assert!(filter.children().element("InternalElement").unwrap().execute().is_empty());
    assert_eq!(
        filter.clear().all().element("InternalElement").unwrap().execute().len(),
        10
    );
    assert_eq!(
        filter.clear().all().any_element().unwrap().execute().len(),
        tree.len() - 1
    );
}

#[test]
fn test_having_all_searches_descendants() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    let mut filter = CaexFilter::for_tree(&tree);

    // Only Project4 sits directly below the hierarchy and it has no interfaces
    // of its own. Descendant matches project to their own parents.
    let direct = filter
        .all()
        .element("InstanceHierarchy")
        .unwrap()
        .having_child()
        .element("InternalElement")
        .unwrap()
        .having_child()
        .element("ExternalInterface")
        .unwrap()
        .execute();
    assert!(direct.is_empty());

    let deep = filter
        .clear()
        .all()
        .element("InstanceHierarchy")
        .unwrap()
        .having_child()
        .element("InternalElement")
        .unwrap()
        .having_all()
        .element("ExternalInterface")
        .unwrap()
        .execute();
    assert_eq!(deep.len(), 47);
    assert!(all_named(&deep, "InternalElement"));
}

#[test]
fn test_top_level_stages_are_concatenated() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    let mut filter = CaexFilter::for_tree(&tree);

    filter.all().element("SupportedRoleClass").unwrap();
    filter.all().element("RefSemantic").unwrap();
    assert_eq!(filter.len(), 2);

    let results = filter.execute();
    assert_eq!(results.len(), 13);
    assert!(all_named(&results[..10], "SupportedRoleClass"));
    assert!(all_named(&results[10..], "RefSemantic"));
}

#[test]
fn test_execute_and_map() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    let mut filter = CaexFilter::for_tree(&tree);

    filter
        .all()
        .element_filter(ElementFilter::named("InternalElement").with_attributes(["Name='MPI.*'"]))
        .unwrap();

    let mapped = filter.execute_and_map(|node| node.child_count());
    assert_eq!(mapped.len(), 2);
}

// ============== Reuse Tests ==============

#[test]
fn test_clear_gives_same_results_as_fresh_tree() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    let mut reused = CaexFilter::for_tree(&tree);
    reused.all().element("RefSemantic").unwrap();
    assert_eq!(reused.execute().len(), 3);

    reused
        .clear()
        .all()
        .element_with("Attribute", ["Name='Type'"])
        .unwrap();
    let reused_results: Vec<_> = reused.execute().iter().map(|n| n.id()).collect();

    let fresh_doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let fresh_tree = fresh_doc.generalize().unwrap();
    let mut fresh = CaexFilter::for_tree(&fresh_tree);
    fresh.all().element_with("Attribute", ["Name='Type'"]).unwrap();
    let fresh_results: Vec<_> = fresh.execute().iter().map(|n| n.id()).collect();

    assert_eq!(reused.len(), 1);
    assert_eq!(reused_results, fresh_results);
}

#[test]
fn test_clear_detaches_text_filters() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    let mut filter = CaexFilter::for_tree(&tree);
    let signal = filter.register_text_filter(TextNodeFilter::new("Value", "Input"));

    filter.all().element("Attribute").unwrap().having_child().text_node_filter(signal).unwrap();
    filter.clear();
    assert!(filter.is_empty());

    let rebound = filter.all().element("Attribute").unwrap().having_child().text_node_filter(signal);
    assert!(rebound.is_ok());
}

#[test]
fn test_repeated_clear_does_not_accumulate_text_filters() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    let mut filter = CaexFilter::for_tree(&tree);
    let signal = filter.register_text_filter(TextNodeFilter::new("Value", "Digital"));

    for _ in 0..50 {
        filter
            .clear()
            .all()
            .element("Attribute")
            .unwrap()
            .having_child()
            .text_node("Value", "Digital")
            .unwrap();
        assert_eq!(filter.execute().len(), 40);
    }

    assert_eq!(filter.text_filter_count(), 1);
    let rebound = filter
        .clear()
        .all()
        .element("Attribute")
        .unwrap()
        .having_child()
        .text_node_filter(signal)
        .unwrap()
        .execute();
    assert_eq!(rebound.len(), 40);
}

// ============== Builder Error Tests ==============

#[test]
fn test_binding_twice_fails() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    let mut filter = CaexFilter::for_tree(&tree);

    let err = filter
        .all()
        .element("InternalElement")
        .unwrap()
        .element("Attribute")
        .err();
    assert_eq!(err, Some(FilterError::MatcherAlreadyBound { stage: 0 }));

    let err = filter
        .all()
        .any_element()
        .unwrap()
        .text_node("Value", "x")
        .err();
    assert_eq!(err, Some(FilterError::MatcherAlreadyBound { stage: 1 }));
}

#[test]
fn test_text_filter_assigned_twice_fails() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    let mut filter = CaexFilter::for_tree(&tree);
    let signal = filter.register_text_filter(TextNodeFilter::new("Value", "Digital"));

    filter.all().element("Attribute").unwrap().having_child().text_node_filter(signal).unwrap();
    let err = filter
        .all()
        .element("Attribute")
        .unwrap()
        .having_child()
        .text_node_filter(signal)
        .err();

    assert_eq!(
        err,
        Some(FilterError::AlreadyAssigned {
            filter: "Value='Digital'".to_string(),
            stage: 1,
        })
    );
}

#[test]
fn test_foreign_text_filter_handle_fails() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    let mut other = CaexFilter::for_tree(&tree);
    let foreign = other.register_text_filter(TextNodeFilter::new("Value", "Digital"));

    let mut filter = CaexFilter::for_tree(&tree);
    let err = filter.all().text_node_filter(foreign).err();
    assert_eq!(err, Some(FilterError::UnknownTextFilter(0)));
}

// ============== Degenerate Stage Tests ==============

#[test]
fn test_unbound_stage_matches_nothing() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    let mut filter = CaexFilter::for_tree(&tree);

    filter.all();
    filter.children().element("InstanceHierarchy").unwrap();

    assert_eq!(filter.len(), 2);
    assert_eq!(filter.execute().len(), 1);
}

#[test]
fn test_malformed_element_filter_matches_nothing() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    let mut filter = CaexFilter::for_tree(&tree);

    let results = filter
        .all()
        .element_with("Attribute", ["Name='('"])
        .unwrap()
        .execute();
    assert!(results.is_empty());
}

#[test]
fn test_done_on_top_level_stage_stays() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    let mut filter = CaexFilter::for_tree(&tree);

    let builder = filter.all().element("RefSemantic").unwrap();
    let id = builder.id();
    assert_eq!(builder.done().id(), id);
}

// ============== Rendering Tests ==============

#[test]
fn test_display_stage_tree() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();
    let mut filter = CaexFilter::for_tree(&tree);

    filter
        .all()
        .element("ExternalInterface")
        .unwrap()
        .having_child()
        .element_with("Attribute", ["Name='Type'"])
        .unwrap()
        .having_child()
        .text_node("Value", "Digital")
        .unwrap()
        .done()
        .done()
        .and()
        .element_with("Attribute", ["Name='IoType'"])
        .unwrap();
    filter.children();

    let expected = "\
all ExternalInterface
  children Attribute[Name='Type']
    children text Value='Digital'
  and all Attribute[Name='IoType']
children <unbound>
";
    assert_eq!(filter.to_string(), expected);
    assert_eq!(Operator::And.to_string(), "and");
}

#[test]
fn test_compiled_element_filter_selects_without_stages() {
    let doc = CaexDocument::parse(FILTER_TEST).unwrap();
    let tree = doc.generalize().unwrap();

    let criterion = ElementFilter::named("RefSemantic").compile().unwrap();
    assert_eq!(criterion.select(tree.root(), SearchMode::All).len(), 3);
    assert!(criterion.select(tree.root(), SearchMode::Children).is_empty());
}
