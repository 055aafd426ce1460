use apislate_core::config::PackageOptions;
use apislate_core::model::{
    Operation, OperationKey, Parameter, ParameterSchema, Response, Specification,
};
use apislate_core::transform::name_normalizer::{normalize_name, route_to_name};
use minijinja::{Value, context};

use super::language::Language;
use super::type_mapper::{model_literal, model_type, property_literal, property_type, schema_type};
use crate::examples::ExampleSynthesizer;

/// Builds the template context for one operation in one language.
pub struct OperationContextBuilder<'a> {
    language: Language,
    api_package: String,
    model_package: String,
    host: Option<String>,
    base_url: Option<String>,
    synthesizer: ExampleSynthesizer<'a>,
}

impl<'a> OperationContextBuilder<'a> {
    pub fn new(spec: &'a Specification, language: Language, packages: &PackageOptions) -> Self {
        Self {
            language,
            api_package: packages
                .api_package
                .clone()
                .unwrap_or_else(|| language.default_api_package().to_string()),
            model_package: packages
                .model_package
                .clone()
                .unwrap_or_else(|| language.default_model_package().to_string()),
            host: spec.host.clone().filter(|h| !h.trim().is_empty()),
            base_url: base_url(spec),
            synthesizer: ExampleSynthesizer::new(&spec.definitions),
        }
    }

    pub fn build(&self, key: &OperationKey, op: &Operation) -> Value {
        let tag = op.tags.first().map(String::as_str).unwrap_or("default");
        let classname = format!("{}Api", normalize_name(tag).pascal_case);
        let raw_name = op
            .operation_id
            .clone()
            .unwrap_or_else(|| route_to_name(key.method.as_str(), &key.path));
        let nickname = self.language.method_name(&normalize_name(&raw_name));

        let mut ordered: Vec<&Parameter> = op.parameters.iter().collect();
        ordered.sort_by_key(|p| !p.required);

        let params: Vec<Value> = ordered.iter().map(|p| self.param_context(p)).collect();
        let arguments = ordered
            .iter()
            .map(|p| self.argument(p))
            .collect::<Vec<_>>()
            .join(", ");

        let return_type = success_response(op)
            .and_then(|r| r.schema.as_ref())
            .map(|schema| schema_type(self.language, schema));

        context! {
            classname => classname,
            nickname => nickname,
            summary => op.summary.as_deref().map(single_line),
            http_method => key.method.as_str(),
            path => key.path.clone(),
            api_package => self.api_package.clone(),
            model_package => self.model_package.clone(),
            host => self.host.clone(),
            base_url => self.base_url.clone(),
            params => params,
            has_params => !op.parameters.is_empty(),
            arguments => arguments,
            return_type => return_type,
            deprecated => op.deprecated,
        }
    }

    fn param_context(&self, param: &Parameter) -> Value {
        let (data_type, example) = match &param.schema {
            ParameterSchema::Body(model) => (
                model_type(self.language, model),
                model_literal(self.language, model, &self.model_package),
            ),
            ParameterSchema::Inline(property) => (
                property_type(self.language, property),
                property_literal(
                    self.language,
                    property,
                    &self.synthesizer.synthesize_property(property),
                    &self.model_package,
                ),
            ),
        };
        context! {
            name => self.language.variable_name(&param.name),
            original_name => param.name.clone(),
            data_type => data_type,
            example => example,
            required => param.required,
            location => param.location.as_str(),
            description => param.description.as_deref().map(single_line).unwrap_or_default(),
        }
    }

    fn argument(&self, param: &Parameter) -> String {
        let name = self.language.variable_name(&param.name);
        match self.language {
            Language::Python if !param.required => format!("{name}={name}"),
            Language::Php => format!("${name}"),
            _ => name,
        }
    }
}

/// The `200` response, else the first other 2xx response.
fn success_response(op: &Operation) -> Option<&Response> {
    op.responses.get("200").or_else(|| {
        op.responses
            .iter()
            .find(|(code, _)| code.starts_with('2'))
            .map(|(_, response)| response)
    })
}

/// `scheme://host/basePath` for client configuration; `None` without a host.
fn base_url(spec: &Specification) -> Option<String> {
    let host = spec.host.as_deref().map(str::trim).filter(|h| !h.is_empty())?;
    let scheme = spec.schemes.first().map(String::as_str).unwrap_or("http");
    let base_path = spec
        .base_path
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty() && *p != "/")
        .unwrap_or("");
    Some(format!("{scheme}://{host}{base_path}"))
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
