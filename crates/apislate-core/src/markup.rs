//! Document sink primitives.
//!
//! The compiler never formats markdown itself; it emits [`Block`]s through a
//! [`DocumentSink`]. [`MarkdownDocument`] serializes them, while
//! [`BufferedSection`] records them so a section can be discarded when its
//! producer fails halfway.

/// One emission primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Top-level heading (`#`).
    DocumentTitle(String),
    /// Second-level heading (`##`).
    SectionTitleLevel1(String),
    /// Third-level heading (`###`).
    SectionTitleLevel2(String),
    Paragraph(String),
    TextLine(String),
    NewLine,
    Source { code: String, language: String },
    Listing(String),
    /// `|`-delimited rows; the first row is the header.
    Table(Vec<String>),
}

/// Receives document primitives in order.
pub trait DocumentSink {
    fn emit(&mut self, block: Block);

    fn document_title(&mut self, title: &str) {
        self.emit(Block::DocumentTitle(title.to_string()));
    }

    fn section_title_level1(&mut self, title: &str) {
        self.emit(Block::SectionTitleLevel1(title.to_string()));
    }

    fn section_title_level2(&mut self, title: &str) {
        self.emit(Block::SectionTitleLevel2(title.to_string()));
    }

    fn paragraph(&mut self, text: &str) {
        self.emit(Block::Paragraph(text.to_string()));
    }

    fn text_line(&mut self, text: &str) {
        self.emit(Block::TextLine(text.to_string()));
    }

    fn new_line(&mut self) {
        self.emit(Block::NewLine);
    }

    fn source(&mut self, code: &str, language: &str) {
        self.emit(Block::Source {
            code: code.to_string(),
            language: language.to_string(),
        });
    }

    fn listing(&mut self, text: &str) {
        self.emit(Block::Listing(text.to_string()));
    }

    fn table_with_header_row(&mut self, rows: Vec<String>) {
        self.emit(Block::Table(rows));
    }
}

/// Markdown serialization of emitted blocks.
#[derive(Debug, Default, Clone)]
pub struct MarkdownDocument {
    buf: String,
}

impl MarkdownDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

impl DocumentSink for MarkdownDocument {
    fn emit(&mut self, block: Block) {
        let buf = &mut self.buf;
        match block {
            Block::DocumentTitle(title) => {
                buf.push_str(&format!("# {title}\n\n"));
            }
            Block::SectionTitleLevel1(title) => {
                buf.push_str(&format!("## {title}\n\n"));
            }
            Block::SectionTitleLevel2(title) => {
                buf.push_str(&format!("### {title}\n\n"));
            }
            Block::Paragraph(text) => {
                buf.push_str(text.trim_end());
                buf.push_str("\n\n");
            }
            Block::TextLine(text) => {
                buf.push_str(&text);
                buf.push('\n');
            }
            Block::NewLine => buf.push('\n'),
            Block::Source { code, language } => {
                buf.push_str(&format!("```{language}\n"));
                buf.push_str(code.trim_end_matches('\n'));
                buf.push_str("\n```\n\n");
            }
            Block::Listing(text) => {
                buf.push_str(text.trim());
                buf.push_str("\n\n");
            }
            Block::Table(rows) => {
                let mut rows = rows.into_iter();
                let Some(header) = rows.next() else {
                    return;
                };
                let columns = header.split('|').count();
                buf.push_str(&header);
                buf.push('\n');
                buf.push_str(&vec!["---"; columns].join("|"));
                buf.push('\n');
                for row in rows {
                    buf.push_str(&row);
                    buf.push('\n');
                }
                buf.push('\n');
            }
        }
    }
}

/// Records blocks for later replay into another sink.
#[derive(Debug, Default, Clone)]
pub struct BufferedSection {
    blocks: Vec<Block>,
}

impl BufferedSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replay_into(self, sink: &mut dyn DocumentSink) {
        for block in self.blocks {
            sink.emit(block);
        }
    }
}

impl DocumentSink for BufferedSection {
    fn emit(&mut self, block: Block) {
        self.blocks.push(block);
    }
}

/// Make free text safe to place in a table cell.
pub fn table_cell(text: &str) -> String {
    text.trim()
        .replace("\r\n", " ")
        .replace('\n', " ")
        .replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_paragraphs() {
        let mut doc = MarkdownDocument::new();
        doc.document_title("Introduction");
        doc.section_title_level1("Pets");
        doc.section_title_level2("HTTP Request");
        doc.paragraph("Some text.  ");
        assert_eq!(
            doc.as_str(),
            "# Introduction\n\n## Pets\n\n### HTTP Request\n\nSome text.\n\n"
        );
    }

    #[test]
    fn test_source_block() {
        let mut doc = MarkdownDocument::new();
        doc.source("curl \"/pets\"\n", "shell");
        assert_eq!(doc.as_str(), "```shell\ncurl \"/pets\"\n```\n\n");
    }

    #[test]
    fn test_listing_is_plain_text() {
        let mut doc = MarkdownDocument::new();
        doc.listing("We have language bindings in shell, java!\n");
        assert_eq!(doc.as_str(), "We have language bindings in shell, java!\n\n");
    }

    #[test]
    fn test_table_separator_matches_header() {
        let mut doc = MarkdownDocument::new();
        doc.table_with_header_row(vec!["a|b|c".to_string(), "1|2|3".to_string()]);
        assert_eq!(doc.as_str(), "a|b|c\n---|---|---\n1|2|3\n\n");
    }

    #[test]
    fn test_empty_table_is_skipped() {
        let mut doc = MarkdownDocument::new();
        doc.table_with_header_row(Vec::new());
        assert!(doc.as_str().is_empty());
    }

    #[test]
    fn test_buffered_section_replays_in_order() {
        let mut section = BufferedSection::new();
        section.section_title_level1("Find pet");
        section.text_line("`GET /pets/{id}`");
        let mut doc = MarkdownDocument::new();
        section.replay_into(&mut doc);
        assert_eq!(doc.as_str(), "## Find pet\n\n`GET /pets/{id}`\n");
    }

    #[test]
    fn test_table_cell_escaping() {
        assert_eq!(table_cell(" a|b\nc "), "a\\|b c");
    }
}
