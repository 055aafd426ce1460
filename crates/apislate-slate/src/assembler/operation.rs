use apislate_core::markup::{BufferedSection, DocumentSink, table_cell};
use apislate_core::model::{Operation, OperationKey, Parameter, ParameterLocation, Specification};

use super::BuildContext;
use super::intro::non_blank;
use crate::error::OperationError;
use crate::examples::ExampleSynthesizer;
use crate::properties::body_properties;
use crate::snippets::language::Language;
use crate::type_resolver::{RefSet, TypeResolver, label_or_placeholder};

const PARAMETER_HEADER: &str = "Parameter|Required|Type|Description";

/// Parameter table groups, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParameterGroup {
    Body,
    Header,
    Form,
    Query,
}

impl ParameterGroup {
    const ORDER: [ParameterGroup; 4] = [
        ParameterGroup::Body,
        ParameterGroup::Header,
        ParameterGroup::Form,
        ParameterGroup::Query,
    ];

    fn title(&self) -> &'static str {
        match self {
            ParameterGroup::Body => "Body Parameters",
            ParameterGroup::Header => "Header Parameters",
            ParameterGroup::Form => "Form Parameters",
            ParameterGroup::Query => "Query Parameters",
        }
    }
}

impl TryFrom<ParameterLocation> for ParameterGroup {
    type Error = OperationError;

    fn try_from(location: ParameterLocation) -> Result<Self, Self::Error> {
        match location {
            ParameterLocation::Body => Ok(ParameterGroup::Body),
            ParameterLocation::Header => Ok(ParameterGroup::Header),
            ParameterLocation::Form => Ok(ParameterGroup::Form),
            ParameterLocation::Query => Ok(ParameterGroup::Query),
            other => Err(OperationError::UnsupportedParameterLocation(other)),
        }
    }
}

/// Writes one operation's section.
pub(super) struct OperationWriter<'a> {
    spec: &'a Specification,
    languages: &'a [Language],
    resolver: TypeResolver<'a>,
    synthesizer: ExampleSynthesizer<'a>,
}

impl<'a> OperationWriter<'a> {
    pub(super) fn new(spec: &'a Specification, languages: &'a [Language]) -> Self {
        Self {
            spec,
            languages,
            resolver: TypeResolver::new(&spec.definitions),
            synthesizer: ExampleSynthesizer::new(&spec.definitions),
        }
    }

    /// Write the section into `section`. References are merged into the
    /// build context only when the whole section succeeds.
    pub(super) fn write(
        &self,
        key: &OperationKey,
        op: &Operation,
        ctx: &mut BuildContext,
        section: &mut BufferedSection,
    ) -> Result<(), OperationError> {
        let groups = group_parameters(op)?;
        let mut refs = RefSet::new();

        let title = non_blank(op.summary.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string());
        section.section_title_level1(&title);

        section.source(&self.curl(key, op), "shell");

        if let Some(snippets) = ctx.snippets.get(key) {
            for language in self.languages {
                if let Some(code) = snippets.get(language) {
                    section.source(code, language.as_str());
                }
            }
        }

        if let Some(response) = op.responses.get("200") {
            match self.synthesizer.response_example(response) {
                Some(Ok(json)) => {
                    section.text_line("> The above command returns JSON structured like this:");
                    section.new_line();
                    section.source(&json, "json");
                }
                Some(Err(err)) => log::warn!("{key}: {err}; response example omitted"),
                None => {}
            }
        }

        section.section_title_level2("HTTP Request");
        section.paragraph(&format!("`{} {}`", key.method, key.path));

        for (group, params) in &groups {
            match group {
                ParameterGroup::Body => self.body_table(params, &mut refs, section),
                _ => self.parameter_table(*group, params, &mut refs, section),
            }
        }

        self.responses_table(op, &mut refs, section);

        if let Some(description) = non_blank(op.description.as_deref()) {
            section.paragraph(description);
        }

        ctx.refs.extend(refs);
        Ok(())
    }

    fn curl(&self, key: &OperationKey, op: &Operation) -> String {
        let mut command = format!("curl \"{}{}\"", self.base_url(), key.path);

        let mut schemes: Vec<&str> = Vec::new();
        for requirement in &op.security {
            for scheme in requirement.keys() {
                if !schemes.contains(&scheme.as_str()) {
                    schemes.push(scheme);
                }
            }
        }
        for scheme in schemes {
            command.push_str(&format!(" -H \"{scheme}: my{scheme}\""));
        }

        command.push_str(&format!(" -X {}", key.method));

        if op.has_payload() {
            match self.synthesizer.request_example(op) {
                Ok(json) => command.push_str(&format!(" -d @- << EOF\n{json}\nEOF")),
                Err(err) => log::warn!("{key}: {err}; request payload omitted"),
            }
        }
        command
    }

    /// `scheme://host/basePath`, or just the base path without a host.
    fn base_url(&self) -> String {
        let base_path = non_blank(self.spec.base_path.as_deref())
            .filter(|p| *p != "/")
            .unwrap_or("");
        match non_blank(self.spec.host.as_deref()) {
            Some(host) => {
                let scheme = self
                    .spec
                    .schemes
                    .first()
                    .map(String::as_str)
                    .unwrap_or("http");
                format!("{scheme}://{host}{base_path}")
            }
            None => base_path.to_string(),
        }
    }

    fn body_table(
        &self,
        params: &[&Parameter],
        refs: &mut RefSet,
        section: &mut BufferedSection,
    ) {
        section.section_title_level2(ParameterGroup::Body.title());
        let mut rows = vec![PARAMETER_HEADER.to_string()];
        for param in params {
            let label = label_or_placeholder(self.resolver.resolve_parameter(param, refs));
            let mut summary = format!("{} ({label})", param.name);
            if let Some(description) = non_blank(param.description.as_deref()) {
                summary.push_str(&format!(": {description}"));
            }
            section.paragraph(&summary);

            for (name, property) in body_properties(param, &self.spec.definitions) {
                rows.push(format!(
                    "{}|{}|{}|{}",
                    table_cell(name),
                    property.required,
                    table_cell(&label_or_placeholder(
                        self.resolver.resolve_property(property, refs)
                    )),
                    table_cell(property.description.as_deref().unwrap_or_default()),
                ));
            }
        }
        section.table_with_header_row(rows);
    }

    fn parameter_table(
        &self,
        group: ParameterGroup,
        params: &[&Parameter],
        refs: &mut RefSet,
        section: &mut BufferedSection,
    ) {
        section.section_title_level2(group.title());
        let mut rows = vec![PARAMETER_HEADER.to_string()];
        for param in params {
            rows.push(format!(
                "{}|{}|{}|{}",
                table_cell(&param.name),
                param.required,
                table_cell(&label_or_placeholder(
                    self.resolver.resolve_parameter(param, refs)
                )),
                table_cell(param.description.as_deref().unwrap_or_default()),
            ));
        }
        section.table_with_header_row(rows);
    }

    /// One header row of status codes and one row of their types.
    fn responses_table(
        &self,
        op: &Operation,
        refs: &mut RefSet,
        section: &mut BufferedSection,
    ) {
        if op.responses.is_empty() {
            return;
        }
        section.section_title_level2("Responses for status codes");
        let codes: Vec<&str> = op.responses.keys().map(String::as_str).collect();
        let types: Vec<String> = op
            .responses
            .values()
            .map(|response| match &response.schema {
                Some(schema) => {
                    table_cell(&label_or_placeholder(self.resolver.resolve_schema(schema, refs)))
                }
                None => "-".to_string(),
            })
            .collect();
        section.table_with_header_row(vec![codes.join("|"), types.join("|")]);
    }
}

/// Non-empty parameter groups in emission order. Fails on the first
/// parameter in a location the document has no table for.
fn group_parameters(
    op: &Operation,
) -> Result<Vec<(ParameterGroup, Vec<&Parameter>)>, OperationError> {
    let mut buckets: [Vec<&Parameter>; 4] = Default::default();
    for param in &op.parameters {
        let group = ParameterGroup::try_from(param.location)?;
        buckets[group as usize].push(param);
    }
    Ok(ParameterGroup::ORDER
        .into_iter()
        .zip(buckets)
        .filter(|(_, params)| !params.is_empty())
        .collect())
}
