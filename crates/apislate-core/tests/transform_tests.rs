use apislate_core::model::{
    HttpMethod, Model, OperationKey, ParameterLocation, ParameterSchema, PropertyKind, Schema,
};
use apislate_core::parse;
use apislate_core::transform;
use serde_json::json;

const STORE: &str = include_str!("fixtures/store.yaml");

fn load() -> apislate_core::model::Specification {
    let raw = parse::from_yaml(STORE).unwrap();
    transform::transform(&raw).unwrap()
}

#[test]
fn transform_info_and_tags() {
    let spec = load();
    assert_eq!(spec.info.version, "2.1");
    assert_eq!(
        spec.info.contact.as_ref().and_then(|c| c.url.as_deref()),
        Some("https://store.example.com")
    );
    assert_eq!(spec.schemes, vec!["https"]);
    let tags: Vec<&str> = spec.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tags, vec!["orders", "inventory"]);
    assert_eq!(spec.tags[1].description.as_deref(), Some("Stock levels"));
}

#[test]
fn transform_operation_order() {
    let spec = load();
    let keys: Vec<OperationKey> = spec.operations().map(|(key, _)| key).collect();
    assert_eq!(
        keys,
        vec![
            OperationKey::new("/orders", HttpMethod::Get),
            OperationKey::new("/orders", HttpMethod::Post),
            OperationKey::new("/inventory", HttpMethod::Get),
        ]
    );
    assert_eq!(spec.operation_count(), 3);
    assert_eq!(spec.operations_tagged("inventory").count(), 1);
}

#[test]
fn transform_merges_path_parameters() {
    let spec = load();
    let list = spec.paths["/orders"].get.as_ref().unwrap();
    let names: Vec<(&str, ParameterLocation)> = list
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), p.location))
        .collect();
    assert_eq!(
        names,
        vec![
            ("X-Trace", ParameterLocation::Header),
            ("size", ParameterLocation::Query),
            ("status", ParameterLocation::Query),
        ]
    );

    // The operation's referenced `size` replaced the path-level one.
    let ParameterSchema::Inline(size) = &list.parameters[1].schema else {
        panic!("expected inline size");
    };
    assert_eq!(size.format.as_deref(), Some("int32"));
    assert_eq!(size.default_value, Some(json!(20)));

    let ParameterSchema::Inline(status) = &list.parameters[2].schema else {
        panic!("expected inline status");
    };
    let PropertyKind::Array(items) = &status.kind else {
        panic!("expected array");
    };
    assert_eq!(items.enum_values, vec!["placed", "delivered"]);
}

#[test]
fn transform_security_inheritance() {
    let spec = load();
    let list = spec.paths["/orders"].get.as_ref().unwrap();
    assert_eq!(list.security.len(), 1);
    assert!(list.security[0].contains_key("api_key"));

    // An explicit empty list opts out.
    let create = spec.paths["/orders"].post.as_ref().unwrap();
    assert!(create.security.is_empty());
}

#[test]
fn transform_body_and_responses() {
    let spec = load();
    let create = spec.paths["/orders"].post.as_ref().unwrap();
    let body = create.body_parameter().expect("single body parameter");
    assert_eq!(
        body.schema,
        ParameterSchema::Body(Model::Reference("Order".to_string()))
    );
    assert!(create.has_payload());

    let created = &create.responses["201"];
    assert_eq!(created.example, Some(json!("created")));
    let not_found = &create.responses["404"];
    assert_eq!(not_found.description, "Entity not found");
    match &not_found.schema {
        Some(Schema::Property(p)) => {
            assert_eq!(p.kind, PropertyKind::Reference("Error".to_string()))
        }
        other => panic!("expected reference property, got {other:?}"),
    }
}

#[test]
fn transform_json_example_preferred() {
    let spec = load();
    let stock = spec.paths["/inventory"].get.as_ref().unwrap();
    assert!(stock.deprecated);
    let ok = &stock.responses["200"];
    assert_eq!(ok.example, Some(json!({"apple": 3})));
    match &ok.schema {
        Some(Schema::Property(p)) => assert!(matches!(p.kind, PropertyKind::Map(_))),
        other => panic!("expected map property, got {other:?}"),
    }
}

#[test]
fn transform_definitions() {
    let spec = load();

    let Model::Plain(order) = &spec.definitions["Order"] else {
        panic!("Order should be plain");
    };
    assert!(order.properties["id"].required);
    assert_eq!(order.properties["id"].kind, PropertyKind::Long);
    assert_eq!(order.properties["placed"].kind, PropertyKind::DateTime);
    assert!(matches!(order.properties["notes"].kind, PropertyKind::Map(_)));

    let Model::Composed(special) = &spec.definitions["SpecialOrder"] else {
        panic!("SpecialOrder should be composed");
    };
    assert_eq!(special.all_of.len(), 2);
    assert_eq!(special.all_of[0], Model::Reference("Order".to_string()));

    assert!(matches!(spec.definitions["Orders"], Model::Array(_)));
}

#[test]
fn transform_unknown_parameter_ref_fails() {
    let yaml = r##"
swagger: "2.0"
info:
  title: Broken
  version: "1"
paths:
  /x:
    get:
      parameters:
        - $ref: "#/parameters/missing"
      responses:
        "200":
          description: ok
"##;
    let raw = parse::from_yaml(yaml).unwrap();
    assert!(transform::transform(&raw).is_err());
}
