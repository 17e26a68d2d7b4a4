//! Tests for generalizing small hand-written schema types

use caex_generic::{
    generalize, AttributeSlot, Child, ChildSlot, Error, Generalizable, SchemaDescriptor,
    SlotValue, Value,
};
use std::any::Any;
use test_case::test_case;

static HIERARCHY: SchemaDescriptor = SchemaDescriptor {
    element: "InstanceHierarchy",
    attributes: &[
        AttributeSlot::optional("ID"),
        AttributeSlot::required("Name"),
    ],
    children: &[
        ChildSlot::simple("Description"),
        ChildSlot::simple_list("AdditionalInformation"),
        ChildSlot::object_list("InternalElement"),
    ],
};

static ELEMENT: SchemaDescriptor = SchemaDescriptor {
    element: "InternalElement",
    attributes: &[AttributeSlot::required("Name")],
    children: &[
        ChildSlot::simple("Value").required(),
        ChildSlot::object("RoleRequirements"),
        ChildSlot::object_list("InternalElement"),
    ],
};

static BLANK: SchemaDescriptor = SchemaDescriptor {
    element: "Blank",
    attributes: &[],
    children: &[
        ChildSlot::object("Object").required(),
        ChildSlot::object_list("Objects").required(),
        ChildSlot::simple("Simple").required(),
        ChildSlot::simple_list("Simples").required(),
        ChildSlot::simple("Optional"),
    ],
};

static ROLE: SchemaDescriptor = SchemaDescriptor {
    element: "RoleRequirements",
    attributes: &[AttributeSlot::optional("RefBaseRoleClassPath")],
    children: &[],
};

#[derive(Debug, Default)]
struct Hierarchy {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    additional_information: Vec<String>,
    elements: Vec<Element>,
}

#[derive(Debug, Default)]
struct Element {
    name: Option<String>,
    value: Option<String>,
    role: Option<Role>,
    elements: Vec<Element>,
}

#[derive(Debug, Default)]
struct Role {
    path: Option<String>,
}

impl Generalizable for Hierarchy {
    fn descriptor(&self) -> &'static SchemaDescriptor {
        &HIERARCHY
    }

    fn slot(&self, name: &str) -> Option<SlotValue<'_>> {
        Some(match name {
            "ID" => SlotValue::text(&self.id),
            "Name" => SlotValue::text(&self.name),
            "Description" => SlotValue::text(&self.description),
            "AdditionalInformation" => SlotValue::texts(&self.additional_information),
            "InternalElement" => SlotValue::objects(&self.elements),
            _ => return None,
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Generalizable for Element {
    fn descriptor(&self) -> &'static SchemaDescriptor {
        &ELEMENT
    }

    fn slot(&self, name: &str) -> Option<SlotValue<'_>> {
        Some(match name {
            "Name" => SlotValue::text(&self.name),
            "Value" => SlotValue::text(&self.value),
            "RoleRequirements" => SlotValue::object(&self.role),
            "InternalElement" => SlotValue::objects(&self.elements),
            _ => return None,
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Generalizable for Role {
    fn descriptor(&self) -> &'static SchemaDescriptor {
        &ROLE
    }

    fn slot(&self, name: &str) -> Option<SlotValue<'_>> {
        match name {
            "RefBaseRoleClassPath" => Some(SlotValue::text(&self.path)),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Leaves every slot empty
#[derive(Debug)]
struct Blank;

impl Generalizable for Blank {
    fn descriptor(&self) -> &'static SchemaDescriptor {
        &BLANK
    }

    fn slot(&self, name: &str) -> Option<SlotValue<'_>> {
        BLANK.has_slot(name).then_some(SlotValue::Absent)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn element(name: &str, value: Option<&str>) -> Element {
    Element {
        name: Some(name.to_string()),
        value: value.map(str::to_string),
        ..Default::default()
    }
}

fn sample() -> Hierarchy {
    let mut pump = element("Pump", Some("on"));
    pump.role = Some(Role {
        path: Some("Lib/Pump".to_string()),
    });
    pump.elements.push(element("Motor", Some("3kW")));
    Hierarchy {
        id: None,
        name: Some("Plant".to_string()),
        description: Some("  raw text  ".to_string()),
        additional_information: vec!["a".to_string(), "b".to_string()],
        elements: vec![pump, element("Valve", None)],
    }
}

// ============== Shape Tests ==============

#[test]
fn test_root_named_after_type() {
    let source = sample();
    let tree = generalize(&source).unwrap();
    let root = tree.root();
    assert_eq!(root.element_name(), "InstanceHierarchy");
    assert!(root.parent().is_none());
    assert_eq!(tree.len(), 5);
}

#[test]
fn test_attributes_present_missing_and_absent() {
    let source = Hierarchy::default();
    let tree = generalize(&source).unwrap();
    let root = tree.root();
    // Required and absent
    assert_eq!(root.attribute("Name"), Some(&Value::Missing));
    // Optional and absent
    assert!(root.attribute("ID").is_none());
    assert_eq!(root.attributes().len(), 1);
}

#[test_case("Object", None ; "single object is not recorded")]
#[test_case("Objects", Some(Child::Group(Vec::new())) ; "object list becomes an empty group")]
#[test_case("Simple", Some(Child::Value(Value::Missing)) ; "simple value becomes missing")]
#[test_case("Simples", Some(Child::Value(Value::List(Vec::new()))) ; "simple list becomes empty")]
#[test_case("Optional", None ; "optional slot is omitted")]
fn test_placeholders_for_absent_children(slot: &str, expected: Option<Child>) {
    let tree = generalize(&Blank).unwrap();
    assert_eq!(tree.root().child(slot), expected.as_ref());
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_absent_optional_children_are_omitted() {
    let source = Hierarchy {
        name: Some("Empty".to_string()),
        ..Default::default()
    };
    let tree = generalize(&source).unwrap();
    assert_eq!(tree.root().child_count(), 0);
    assert!(tree.root().child("InternalElement").is_none());
}

#[test]
fn test_simple_children_kept_raw() {
    let source = sample();
    let tree = generalize(&source).unwrap();
    let root = tree.root();
    assert_eq!(
        root.child_value("Description"),
        Some(&Value::text("  raw text  "))
    );
    assert_eq!(
        root.child("AdditionalInformation"),
        Some(&Child::Value(Value::List(vec!["a".into(), "b".into()])))
    );
}

#[test]
fn test_children_follow_schema_order() {
    let source = sample();
    let tree = generalize(&source).unwrap();
    let names: Vec<_> = tree.root().children().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        vec!["Description", "AdditionalInformation", "InternalElement"]
    );
}

#[test]
fn test_required_simple_child_missing() {
    let source = sample();
    let tree = generalize(&source).unwrap();
    let valve = tree
        .root()
        .children_named("InternalElement")
        .nth(1)
        .unwrap();
    assert_eq!(valve.attribute("Name"), Some(&Value::text("Valve")));
    assert_eq!(valve.child_value("Value"), Some(&Value::Missing));
}

// ============== Link Tests ==============

#[test]
fn test_parent_links() {
    let source = sample();
    let tree = generalize(&source).unwrap();
    let root = tree.root();
    for child in root.child_nodes() {
        assert_eq!(child.parent(), Some(root));
        for grandchild in child.child_nodes() {
            assert_eq!(grandchild.parent(), Some(child));
        }
    }
    let motor = tree.find_all("InternalElement").find(|n| {
        n.attribute("Name") == Some(&Value::text("Motor"))
    });
    let motor = motor.unwrap();
    assert_eq!(motor.ancestors().count(), 2);
}

#[test]
fn test_single_object_child_is_node() {
    let source = sample();
    let tree = generalize(&source).unwrap();
    let pump = tree.root().children_named("InternalElement").next().unwrap();
    let role = pump.children_named("RoleRequirements").next().unwrap();
    assert_eq!(role.element_name(), "RoleRequirements");
    assert_eq!(
        role.attribute("RefBaseRoleClassPath"),
        Some(&Value::text("Lib/Pump"))
    );
    assert!(matches!(pump.child("RoleRequirements"), Some(Child::Node(_))));
}

#[test]
fn test_descendants_depth_first() {
    let source = sample();
    let tree = generalize(&source).unwrap();
    let rendered: Vec<String> = tree
        .root()
        .descendants()
        .iter()
        .map(|n| n.to_string())
        .collect();
    assert_eq!(
        rendered,
        vec![
            "InternalElement[Name='Pump']",
            "RoleRequirements[RefBaseRoleClassPath='Lib/Pump']",
            "InternalElement[Name='Motor']",
            "InternalElement[Name='Valve']",
        ]
    );
}

// ============== Origin Tests ==============

#[test]
fn test_origin_is_the_source_object() {
    let source = sample();
    let tree = generalize(&source).unwrap();
    let root = tree.root();
    let origin = root.origin_as::<Hierarchy>().unwrap();
    assert!(std::ptr::eq(origin, &source));

    let pump = root.children_named("InternalElement").next().unwrap();
    let pump_origin = pump.origin_as::<Element>().unwrap();
    assert!(std::ptr::eq(pump_origin, &source.elements[0]));
    assert!(pump.origin_as::<Hierarchy>().is_none());
}

// ============== Error Tests ==============

#[derive(Debug)]
struct Broken;

static BROKEN: SchemaDescriptor = SchemaDescriptor {
    element: "Broken",
    attributes: &[AttributeSlot::optional("Name")],
    children: &[ChildSlot::object("Child")],
};

impl Generalizable for Broken {
    fn descriptor(&self) -> &'static SchemaDescriptor {
        &BROKEN
    }

    fn slot(&self, name: &str) -> Option<SlotValue<'_>> {
        match name {
            "Name" => Some(SlotValue::Texts(vec!["x"])),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct Undeclared;

impl Generalizable for Undeclared {
    fn descriptor(&self) -> &'static SchemaDescriptor {
        &BROKEN
    }

    fn slot(&self, name: &str) -> Option<SlotValue<'_>> {
        match name {
            "Name" => Some(SlotValue::Absent),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn test_kind_mismatch_is_reported() {
    let err = generalize(&Broken).unwrap_err();
    assert!(matches!(
        err,
        Error::SlotKindMismatch {
            element: "Broken",
            slot: "Name",
            ..
        }
    ));
}

#[test]
fn test_unknown_slot_is_reported() {
    let err = generalize(&Undeclared).unwrap_err();
    assert!(matches!(
        err,
        Error::UnknownSlot {
            element: "Broken",
            slot: "Child"
        }
    ));
    assert!(err.to_string().contains("'Child'"));
}
