use std::collections::HashSet;

use apislate_core::model::{Model, Parameter, ParameterSchema, Property};
use indexmap::IndexMap;

/// The effective property list of a model.
///
/// Composed models contribute their components in order; a later component
/// replaces an earlier property of the same name while keeping its original
/// position. References are followed through `definitions`.
pub fn flatten_properties<'a>(
    model: &'a Model,
    definitions: &'a IndexMap<String, Model>,
) -> IndexMap<&'a str, &'a Property> {
    let mut out = IndexMap::new();
    collect(model, definitions, &mut HashSet::new(), &mut out);
    out
}

fn collect<'a>(
    model: &'a Model,
    definitions: &'a IndexMap<String, Model>,
    visiting: &mut HashSet<&'a str>,
    out: &mut IndexMap<&'a str, &'a Property>,
) {
    match model {
        Model::Plain(plain) => {
            for (name, property) in &plain.properties {
                out.insert(name.as_str(), property);
            }
        }
        Model::Composed(composed) => {
            for component in &composed.all_of {
                collect(component, definitions, visiting, out);
            }
        }
        Model::Reference(name) => {
            if let Some(target) = definitions.get(name)
                && visiting.insert(name.as_str())
            {
                collect(target, definitions, visiting, out);
                visiting.remove(name.as_str());
            }
        }
        Model::Array(_) => {}
    }
}

/// Rows for a body parameter table. Array bodies document their item type
/// under a single `array` row.
pub fn body_properties<'a>(
    parameter: &'a Parameter,
    definitions: &'a IndexMap<String, Model>,
) -> IndexMap<&'a str, &'a Property> {
    let ParameterSchema::Body(model) = &parameter.schema else {
        return IndexMap::new();
    };
    match resolve_alias(model, definitions) {
        Model::Array(array) => IndexMap::from([("array", &*array.items)]),
        other => flatten_properties(other, definitions),
    }
}

/// Follows a chain of references to the first non-reference model. A
/// dangling or cyclic chain stops at the last reference reached.
fn resolve_alias<'a>(model: &'a Model, definitions: &'a IndexMap<String, Model>) -> &'a Model {
    let mut current = model;
    let mut seen: HashSet<&'a str> = HashSet::new();
    while let Model::Reference(name) = current {
        if !seen.insert(name.as_str()) {
            break;
        }
        match definitions.get(name) {
            Some(target) => current = target,
            None => break,
        }
    }
    current
}
