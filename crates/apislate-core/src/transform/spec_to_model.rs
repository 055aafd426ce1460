use indexmap::IndexMap;
use log::debug;

use crate::error::TransformError;
use crate::model::*;
use crate::parse::operation::{Operation as RawOperation, PathItem as RawPathItem};
use crate::parse::parameter::ParameterOrRef;
use crate::parse::ref_resolve::RefResolver;
use crate::parse::spec::SwaggerSpec;

use super::schema_resolver::{convert_parameter, response_schema, schema_or_ref_to_model};

/// Transform a parsed Swagger document into the specification model.
pub fn transform(spec: &SwaggerSpec) -> Result<Specification, TransformError> {
    let resolver = RefResolver::new(spec);

    let definitions = spec
        .definitions
        .iter()
        .map(|(name, schema)| Ok((name.clone(), schema_or_ref_to_model(schema)?)))
        .collect::<Result<IndexMap<_, _>, TransformError>>()?;

    let global_security = spec.security.clone().unwrap_or_default();

    let mut paths = IndexMap::new();
    for (path, raw_item) in &spec.paths {
        let item = convert_path_item(&resolver, path, raw_item, &global_security)?;
        paths.insert(path.clone(), item);
    }

    let info = Info {
        title: spec.info.title.clone(),
        version: spec.info.version.clone(),
        description: spec.info.description.clone(),
        contact: spec.info.contact.as_ref().map(|c| Contact {
            name: c.name.clone(),
            url: c.url.clone(),
            email: c.email.clone(),
        }),
        license: spec.info.license.as_ref().map(|l| License {
            name: l.name.clone(),
            url: l.url.clone(),
        }),
        terms_of_service: spec.info.terms_of_service.clone(),
    };

    let tags = spec
        .tags
        .iter()
        .map(|t| Tag {
            name: t.name.clone(),
            description: t.description.clone(),
        })
        .collect();

    Ok(Specification {
        info,
        host: spec.host.clone(),
        base_path: spec.base_path.clone(),
        schemes: spec.schemes.clone(),
        tags,
        paths,
        definitions,
    })
}

fn convert_path_item(
    resolver: &RefResolver<'_>,
    path: &str,
    raw: &RawPathItem,
    global_security: &[SecurityRequirement],
) -> Result<PathItem, TransformError> {
    let mut item = PathItem::default();
    let raw_ops = [
        (HttpMethod::Get, &raw.get),
        (HttpMethod::Put, &raw.put),
        (HttpMethod::Post, &raw.post),
        (HttpMethod::Delete, &raw.delete),
        (HttpMethod::Patch, &raw.patch),
        (HttpMethod::Options, &raw.options),
    ];

    for (method, raw_op) in raw_ops {
        let Some(raw_op) = raw_op else {
            continue;
        };
        debug!("loading operation {} {}", method, path);
        *item.slot_mut(method) = Some(convert_operation(
            resolver,
            raw_op,
            &raw.parameters,
            global_security,
        )?);
    }

    Ok(item)
}

fn convert_operation(
    resolver: &RefResolver<'_>,
    op: &RawOperation,
    path_params: &[ParameterOrRef],
    global_security: &[SecurityRequirement],
) -> Result<Operation, TransformError> {
    // Operation-level parameters override path-level ones with the same
    // name and location.
    let mut parameters: Vec<Parameter> = Vec::new();
    for raw in path_params.iter().chain(op.parameters.iter()) {
        let param = convert_parameter(&resolver.resolve_parameter(raw)?)?;
        if let Some(existing) = parameters
            .iter_mut()
            .find(|p| p.name == param.name && p.location == param.location)
        {
            *existing = param;
        } else {
            parameters.push(param);
        }
    }

    let mut responses = IndexMap::new();
    for (status, raw) in &op.responses {
        let resp = resolver.resolve_response(raw)?;
        let schema = resp.schema.as_ref().map(response_schema).transpose()?;
        let example = resp
            .examples
            .get("application/json")
            .or_else(|| resp.examples.values().next())
            .cloned();
        responses.insert(
            status.clone(),
            Response {
                description: resp.description,
                schema,
                example,
            },
        );
    }

    Ok(Operation {
        operation_id: op.operation_id.clone(),
        summary: op.summary.clone(),
        description: op.description.clone(),
        tags: op.tags.clone(),
        parameters,
        responses,
        security: op
            .security
            .clone()
            .unwrap_or_else(|| global_security.to_vec()),
        deprecated: op.deprecated.unwrap_or(false),
    })
}
