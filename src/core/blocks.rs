//! Block layout of converted Markdown
//!
//! The preview pane draws these blocks instead of parsing the document a
//! second time, so it shows exactly what the HTML conversion produced.

use std::mem;

use pulldown_cmark::{CodeBlockKind, Event, Tag, TagEnd};

/// A run of inline text sharing one style
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub strong: bool,
    pub emphasis: bool,
    pub code: bool,
    /// Link target, if the text is a link
    pub link: Option<String>,
}

impl Span {
    fn same_style(&self, other: &Span) -> bool {
        self.strong == other.strong
            && self.emphasis == other.emphasis
            && self.code == other.code
            && self.link == other.link
    }
}

/// A rendered Markdown block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Heading with level (1-6)
    Heading { level: u8, spans: Vec<Span> },
    Paragraph {
        spans: Vec<Span>,
        /// Number of enclosing block quotes
        quote_depth: usize,
    },
    /// One list item; `marker` is a bullet or "n." and empty for
    /// continuation paragraphs
    ListItem {
        depth: usize,
        marker: String,
        spans: Vec<Span>,
    },
    CodeBlock { lang: Option<String>, code: String },
    Table {
        headers: Vec<Vec<Span>>,
        rows: Vec<Vec<Vec<Span>>>,
    },
    /// Raw HTML block, shown as source
    Html(String),
    Rule,
}

#[derive(Default)]
struct TableBuilder {
    headers: Vec<Vec<Span>>,
    rows: Vec<Vec<Vec<Span>>>,
    row: Vec<Vec<Span>>,
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    spans: Vec<Span>,
    strong: usize,
    emphasis: usize,
    link: Option<String>,
    quote_depth: usize,
    /// Next number of each open list, `None` for bullet lists
    lists: Vec<Option<u64>>,
    /// Marker of the open list item whose text has not been emitted yet
    item_marker: Option<String>,
    code: Option<(Option<String>, String)>,
    html: Option<String>,
    table: Option<TableBuilder>,
}

impl BlockBuilder {
    fn push_span(&mut self, text: &str, code: bool) {
        if let Some((_, buffer)) = &mut self.code {
            buffer.push_str(text);
            return;
        }

        let span = Span {
            text: text.to_string(),
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            code,
            link: self.link.clone(),
        };
        match self.spans.last_mut() {
            Some(last) if last.same_style(&span) => last.text.push_str(&span.text),
            _ => self.spans.push(span),
        }
    }

    /// Emit pending inline text as a paragraph or list item
    fn flush(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        let spans = mem::take(&mut self.spans);
        if self.lists.is_empty() {
            self.blocks.push(Block::Paragraph {
                spans,
                quote_depth: self.quote_depth,
            });
        } else {
            self.blocks.push(Block::ListItem {
                depth: self.lists.len(),
                marker: self.item_marker.take().unwrap_or_default(),
                spans,
            });
        }
    }

    fn start(&mut self, tag: &Tag<'_>) {
        match tag {
            Tag::Heading { .. } | Tag::Table(_) | Tag::HtmlBlock => {
                self.flush();
                match tag {
                    Tag::Table(_) => self.table = Some(TableBuilder::default()),
                    Tag::HtmlBlock => self.html = Some(String::new()),
                    _ => {}
                }
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                let lang = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                };
                self.code = Some((lang, String::new()));
            }
            Tag::List(start) => {
                // A nested list follows its parent item's text
                self.flush();
                self.lists.push(*start);
            }
            Tag::Item => {
                self.flush();
                let marker = match self.lists.last_mut() {
                    Some(Some(number)) => {
                        let marker = format!("{}.", number);
                        *number += 1;
                        marker
                    }
                    _ => "•".to_string(),
                };
                self.item_marker = Some(marker);
            }
            Tag::Emphasis => self.emphasis += 1,
            Tag::Strong => self.strong += 1,
            Tag::Link { dest_url, .. } => self.link = Some(dest_url.to_string()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.flush(),
            TagEnd::Heading(level) => {
                let spans = mem::take(&mut self.spans);
                self.blocks.push(Block::Heading {
                    level: level as u8,
                    spans,
                });
            }
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::CodeBlock => {
                if let Some((lang, code)) = self.code.take() {
                    self.blocks.push(Block::CodeBlock { lang, code });
                }
            }
            TagEnd::HtmlBlock => {
                if let Some(html) = self.html.take() {
                    self.blocks.push(Block::Html(html.trim_end().to_string()));
                }
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
            }
            TagEnd::Item => {
                self.flush();
                self.item_marker = None;
            }
            TagEnd::TableCell => {
                let cell = mem::take(&mut self.spans);
                if let Some(table) = &mut self.table {
                    table.row.push(cell);
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = &mut self.table {
                    table.headers = mem::take(&mut table.row);
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = &mut self.table {
                    let row = mem::take(&mut table.row);
                    table.rows.push(row);
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.blocks.push(Block::Table {
                        headers: table.headers,
                        rows: table.rows,
                    });
                }
            }
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Link => self.link = None,
            _ => {}
        }
    }

    fn event(&mut self, event: &Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(*tag),
            Event::Text(text) => self.push_span(text, false),
            Event::Code(code) => self.push_span(code, true),
            Event::Html(html) => match &mut self.html {
                Some(buffer) => buffer.push_str(html),
                None => self.push_span(html, false),
            },
            Event::InlineHtml(html) => self.push_span(html, false),
            Event::SoftBreak => self.push_span(" ", false),
            Event::HardBreak => self.push_span("\n", false),
            Event::Rule => {
                self.flush();
                self.blocks.push(Block::Rule);
            }
            Event::TaskListMarker(checked) => {
                self.item_marker = Some(if *checked { "[x]" } else { "[ ]" }.to_string());
            }
            _ => {}
        }
    }
}

/// Lay out parser events as blocks
pub fn build(events: &[Event<'_>]) -> Vec<Block> {
    let mut builder = BlockBuilder::default();
    for event in events {
        builder.event(event);
    }
    builder.flush();
    builder.blocks
}

#[cfg(test)]
mod tests {
    use pulldown_cmark::{Options, Parser};

    use super::*;

    fn blocks(markdown: &str) -> Vec<Block> {
        let events: Vec<Event<'_>> = Parser::new_ext(markdown, Options::ENABLE_TABLES).collect();
        build(&events)
    }

    fn text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_heading_and_paragraph() {
        let blocks = blocks("## Title\n\nSome **bold** and *soft*\ntext");
        assert_eq!(blocks.len(), 2);

        let Block::Heading { level, spans } = &blocks[0] else {
            panic!("expected heading, got {:?}", blocks[0]);
        };
        assert_eq!(*level, 2);
        assert_eq!(text(spans), "Title");

        let Block::Paragraph { spans, quote_depth } = &blocks[1] else {
            panic!("expected paragraph, got {:?}", blocks[1]);
        };
        assert_eq!(*quote_depth, 0);
        assert_eq!(text(spans), "Some bold and soft text");
        assert!(spans.iter().any(|s| s.strong && s.text == "bold"));
        assert!(spans.iter().any(|s| s.emphasis && s.text == "soft"));
    }

    #[test]
    fn test_lists_number_items() {
        let blocks = blocks("3. three\n4. four\n   - nested\n");
        let items: Vec<(usize, &str, String)> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::ListItem { depth, marker, spans } => Some((*depth, marker.as_str(), text(spans))),
                _ => None,
            })
            .collect();

        assert_eq!(
            items,
            vec![
                (1, "3.", "three".to_string()),
                (1, "4.", "four".to_string()),
                (2, "•", "nested".to_string()),
            ]
        );
    }

    #[test]
    fn test_code_block_keeps_text_verbatim() {
        let blocks = blocks("```rust\nlet x = \"a\" -- b;\n```\n");
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                lang: Some("rust".to_string()),
                code: "let x = \"a\" -- b;\n".to_string(),
            }]
        );
    }

    #[test]
    fn test_table_cells() {
        let blocks = blocks("| a | b |\n|---|---|\n| 1 | `2` |\n");
        let Block::Table { headers, rows } = &blocks[0] else {
            panic!("expected table, got {:?}", blocks[0]);
        };
        assert_eq!(headers.iter().map(|c| text(c)).collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(rows.len(), 1);
        assert_eq!(text(&rows[0][0]), "1");
        assert!(rows[0][1][0].code);
    }

    #[test]
    fn test_quote_link_and_rule() {
        let blocks = blocks("> see [docs](https://example.com)\n\n---\n");
        let Block::Paragraph { spans, quote_depth } = &blocks[0] else {
            panic!("expected paragraph, got {:?}", blocks[0]);
        };
        assert_eq!(*quote_depth, 1);
        let link = spans.iter().find(|s| s.link.is_some()).unwrap();
        assert_eq!(link.text, "docs");
        assert_eq!(link.link.as_deref(), Some("https://example.com"));
        assert_eq!(blocks[1], Block::Rule);
    }

    #[test]
    fn test_empty_input() {
        assert!(blocks("").is_empty());
    }
}
