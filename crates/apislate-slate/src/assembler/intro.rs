use apislate_core::config::DocumentOptions;
use apislate_core::markup::DocumentSink;
use apislate_core::model::Specification;

use crate::snippets::language::Language;

/// Slate YAML front matter.
pub(super) fn emit_front_matter(
    sink: &mut dyn DocumentSink,
    options: &DocumentOptions,
    languages: &[Language],
) {
    sink.text_line("---");
    sink.text_line(&format!("title: {}", options.title));
    sink.text_line("language_tabs:");
    sink.text_line("  - shell");
    for language in languages {
        sink.text_line(&format!("  - {language}"));
    }
    if !options.toc_footers.is_empty() {
        sink.text_line("toc_footers:");
        for footer in &options.toc_footers {
            sink.text_line(&format!(" - {footer}"));
        }
    }
    if !options.includes.is_empty() {
        sink.text_line("includes:");
        for include in &options.includes {
            sink.text_line(&format!("  - {include}"));
        }
    }
    sink.text_line(&format!("search: {}", options.search));
    sink.text_line("---");
    sink.new_line();
}

pub(super) fn emit_introduction(
    sink: &mut dyn DocumentSink,
    spec: &Specification,
    languages: &[Language],
) {
    let info = &spec.info;
    let names: Vec<&str> = languages.iter().map(Language::as_str).collect();

    sink.document_title("Introduction");
    sink.listing(&format!(
        "We have language bindings in {}! You can view code examples in the dark area to \
         the right, and you can switch the programming language of the examples with the \
         tabs in the top right.",
        names.join(", ")
    ));

    if let Some(description) = non_blank(info.description.as_deref()) {
        sink.paragraph(description);
    }

    if let Some(version) = non_blank(Some(info.version.as_str())) {
        sink.section_title_level2("Version");
        sink.paragraph(&format!("Version: {version}"));
    }

    if let Some(contact) = &info.contact {
        let lines: Vec<String> = [
            ("Contact", contact.name.as_deref()),
            ("Url", contact.url.as_deref()),
            ("Email", contact.email.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, value)| non_blank(value).map(|v| format!("{label}: {v}")))
        .collect();
        emit_group(sink, "Contact information", &lines);
    }

    if let Some(license) = &info.license {
        let lines: Vec<String> = [
            ("License", license.name.as_deref()),
            ("License url", license.url.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, value)| non_blank(value).map(|v| format!("{label}: {v}")))
        .collect();
        emit_group(sink, "License", &lines);
    }

    if let Some(terms) = non_blank(info.terms_of_service.as_deref()) {
        sink.paragraph(&format!("Terms of service: {terms}"));
    }

    let mut uri = Vec::new();
    if let Some(host) = non_blank(spec.host.as_deref()) {
        uri.push(format!("Host: {host}"));
    }
    if let Some(base_path) = non_blank(spec.base_path.as_deref()) {
        uri.push(format!("BasePath: {base_path}"));
    }
    if !spec.schemes.is_empty() {
        uri.push(format!("Schemes: {}", spec.schemes.join(", ")));
    }
    emit_group(sink, "URI scheme", &uri);
}

fn emit_group(sink: &mut dyn DocumentSink, title: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    sink.section_title_level2(title);
    for line in lines {
        sink.paragraph(line);
    }
}

pub(super) fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use apislate_core::markup::MarkdownDocument;
    use apislate_core::model::{Contact, Info};

    use super::*;

    #[test]
    fn test_front_matter() {
        let mut doc = MarkdownDocument::new();
        emit_front_matter(
            &mut doc,
            &DocumentOptions::default(),
            &[Language::Java, Language::Python],
        );
        assert_eq!(
            doc.as_str(),
            "---\n\
             title: API Reference\n\
             language_tabs:\n  - shell\n  - java\n  - python\n\
             toc_footers:\n - <a href='#'>Sign Up for a Developer Key</a>\n\
             includes:\n  - errors\n\
             search: true\n\
             ---\n\n"
        );
    }

    #[test]
    fn test_blank_fields_are_skipped() {
        let spec = Specification {
            info: Info {
                title: "Petstore".to_string(),
                version: " ".to_string(),
                contact: Some(Contact {
                    name: None,
                    url: None,
                    email: Some("apiteam@example.com".to_string()),
                }),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut doc = MarkdownDocument::new();
        emit_introduction(&mut doc, &spec, &[Language::Php]);
        let text = doc.as_str();
        assert!(text.starts_with("# Introduction\n\nWe have language bindings in php!"));
        assert!(!text.contains("### Version"));
        assert!(text.contains("### Contact information\n\nEmail: apiteam@example.com\n\n"));
        assert!(!text.contains("### License"));
        assert!(!text.contains("### URI scheme"));
    }

    #[test]
    fn test_uri_scheme() {
        let spec = Specification {
            host: Some("petstore.example.com".to_string()),
            base_path: Some("/v2".to_string()),
            schemes: vec!["https".to_string(), "http".to_string()],
            ..Default::default()
        };
        let mut doc = MarkdownDocument::new();
        emit_introduction(&mut doc, &spec, &[Language::Java]);
        assert!(doc.as_str().contains(
            "### URI scheme\n\nHost: petstore.example.com\n\nBasePath: /v2\n\nSchemes: https, http\n\n"
        ));
    }
}
