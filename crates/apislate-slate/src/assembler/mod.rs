//! Document assembly: front matter, introduction, per-tag operation
//! sections, then the definitions appendix.

mod definitions;
mod intro;
mod operation;

pub use definitions::IGNORED_DEFINITIONS;

use std::collections::HashSet;

use apislate_core::GeneratorError;
use apislate_core::config::DocumentOptions;
use apislate_core::markup::{BufferedSection, DocumentSink, MarkdownDocument};
use apislate_core::model::{OperationKey, Specification};
use apislate_core::transform::name_normalizer::normalize_name;

use self::operation::OperationWriter;
use crate::descriptions::DescriptionSource;
use crate::snippets::language::Language;
use crate::snippets::{SnippetCache, SnippetRenderer};
use crate::type_resolver::RefSet;

/// State owned by a single `build()` call.
pub(crate) struct BuildContext {
    pub(crate) refs: RefSet,
    pub(crate) snippets: SnippetCache,
}

/// What a build produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Operation sections written (an operation under two tags counts twice).
    pub documented: usize,
    /// Operations whose section was dropped.
    pub skipped: Vec<OperationKey>,
    /// Definitions written to the appendix, in order.
    pub definitions: Vec<String>,
}

pub struct DocumentAssembler<'a> {
    spec: &'a Specification,
    languages: &'a [Language],
    options: &'a DocumentOptions,
    renderer: SnippetRenderer<'a>,
    descriptions: &'a dyn DescriptionSource,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(
        spec: &'a Specification,
        languages: &'a [Language],
        options: &'a DocumentOptions,
        renderer: SnippetRenderer<'a>,
        descriptions: &'a dyn DescriptionSource,
    ) -> Self {
        Self {
            spec,
            languages,
            options,
            renderer,
            descriptions,
        }
    }

    /// Build the document into `sink`.
    ///
    /// Every build-wide failure is reported before the first block is
    /// emitted, so an `Err` leaves `sink` untouched.
    pub fn build(&self, sink: &mut dyn DocumentSink) -> Result<BuildReport, GeneratorError> {
        if self.languages.is_empty() {
            return Err(GeneratorError::NoLanguages);
        }
        if self.spec.operation_count() == 0 {
            return Err(GeneratorError::NoOperations);
        }

        let snippets = self.renderer.render_all(self.spec, self.languages)?;
        let mut ctx = BuildContext {
            refs: RefSet::new(),
            snippets,
        };
        let mut report = BuildReport::default();

        intro::emit_front_matter(sink, self.options, self.languages);
        intro::emit_introduction(sink, self.spec, self.languages);
        self.emit_tags(&mut ctx, sink, &mut report);
        report.definitions =
            definitions::emit_definitions(sink, self.spec, &ctx.refs, self.descriptions);

        log::info!(
            "assembled {} operation sections ({} skipped), {} definitions",
            report.documented,
            report.skipped.len(),
            report.definitions.len()
        );
        Ok(report)
    }

    /// Build into a fresh markdown document.
    pub fn build_markdown(&self) -> Result<(String, BuildReport), GeneratorError> {
        let mut doc = MarkdownDocument::new();
        let report = self.build(&mut doc)?;
        Ok((doc.into_string(), report))
    }

    fn emit_tags(
        &self,
        ctx: &mut BuildContext,
        sink: &mut dyn DocumentSink,
        report: &mut BuildReport,
    ) {
        let writer = OperationWriter::new(self.spec, self.languages);

        for tag in &self.spec.tags {
            sink.document_title(&normalize_name(&tag.name).title_case);
            if let Some(description) = intro::non_blank(tag.description.as_deref()) {
                sink.paragraph(description);
            }

            for (key, op) in self.spec.operations_tagged(&tag.name) {
                let mut section = BufferedSection::new();
                match writer.write(&key, op, ctx, &mut section) {
                    Ok(()) => {
                        section.replay_into(sink);
                        report.documented += 1;
                        log::info!("Operation processed: {key}");
                    }
                    Err(err) => {
                        log::error!("skipping operation {key}: {err}");
                        if !report.skipped.contains(&key) {
                            report.skipped.push(key);
                        }
                    }
                }
            }
        }

        let declared: HashSet<&str> = self.spec.tags.iter().map(|t| t.name.as_str()).collect();
        for (key, op) in self.spec.operations() {
            if !op.tags.iter().any(|t| declared.contains(t.as_str())) {
                log::warn!("operation {key} has no declared tag and is not documented");
            }
        }
    }
}
