//! Markdown to HTML rendering with anchored headings.
//!
//! Uses `pulldown-cmark`. Headings are emitted as
//! `<hN class="heading-anchor" id="{anchor}">…</hN>` so the table of
//! contents can link straight to them.

use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde::Serialize;
use tracing::debug;

use crate::toc::{HeadingNode, HeadingTree};

/// Output of a single render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub html: String,
    pub toc: Vec<HeadingNode>,
}

/// Markdown renderer. Each [`render`](Self::render) call owns its own
/// heading tree; nothing is shared between passes.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_SMART_PUNCTUATION,
        }
    }
}

impl MarkdownRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    /// Render `markdown` to HTML and collect its heading tree.
    #[must_use]
    pub fn render(&self, markdown: &str) -> Rendered {
        let mut tree = HeadingTree::new();
        let mut events: Vec<Event<'_>> = Vec::new();
        let mut pending: Option<PendingHeading<'_>> = None;

        for event in Parser::new_ext(markdown, self.options) {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    pending = Some(PendingHeading::new(level));
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(heading) = pending.take() {
                        let anchor = tree.record(heading.level as u8, heading.text.trim());
                        events.push(Event::Html(CowStr::from(heading.into_html(&anchor))));
                    }
                }
                other => match pending.as_mut() {
                    Some(heading) => heading.push(other),
                    None => events.push(other),
                },
            }
        }

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());

        let toc = tree.into_nodes();
        debug!(headings = toc.len(), bytes = out.len(), "rendered markdown");
        Rendered { html: out, toc }
    }
}

/// Render with the default options.
#[must_use]
pub fn render_markdown(markdown: &str) -> Rendered {
    MarkdownRenderer::default().render(markdown)
}

/// Inline events of a heading being rendered, plus its plain text.
struct PendingHeading<'a> {
    level: HeadingLevel,
    inner: Vec<Event<'a>>,
    text: String,
}

impl<'a> PendingHeading<'a> {
    fn new(level: HeadingLevel) -> Self {
        Self {
            level,
            inner: Vec::new(),
            text: String::new(),
        }
    }

    fn push(&mut self, event: Event<'a>) {
        match &event {
            Event::Text(t) | Event::Code(t) => self.text.push_str(t),
            Event::SoftBreak | Event::HardBreak => self.text.push(' '),
            _ => {}
        }
        self.inner.push(event);
    }

    fn into_html(self, anchor: &str) -> String {
        let mut inner = String::new();
        html::push_html(&mut inner, self.inner.into_iter());
        let tag = self.level;
        format!("<{tag} class=\"heading-anchor\" id=\"{anchor}\">{inner}</{tag}>\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_carry_anchor_ids() {
        let out = render_markdown("# Hello World\n\nSome text.\n");
        assert!(
            out.html
                .contains("<h1 class=\"heading-anchor\" id=\"hello-world\">Hello World</h1>"),
            "{}",
            out.html
        );
        assert!(out.html.contains("<p>Some text.</p>"));
    }

    #[test]
    fn inline_markup_is_kept_in_heading_but_not_in_anchor() {
        let out = render_markdown("## Using `cargo` **fast**\n");
        assert!(out.html.contains("id=\"using-cargo-fast\""), "{}", out.html);
        assert!(out.html.contains("<code>cargo</code>"));
        assert!(out.html.contains("<strong>fast</strong>"));
        assert_eq!(out.toc[0].text, "Using cargo fast");
    }

    #[test]
    fn toc_follows_heading_order() {
        let out = render_markdown("# A\n\n## B\n\ntext\n\n## C\n\n# D\n");
        let roots: Vec<&str> = out.toc.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(roots, vec!["A", "D"]);
        let children: Vec<&str> = out.toc[0].children.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(children, vec!["B", "C"]);
        assert_eq!(out.toc[0].children[1].level, 2);
    }

    #[test]
    fn setext_headings_are_anchored() {
        let out = render_markdown("Title\n=====\n\nSub\n---\n");
        assert!(out.html.contains("<h1 class=\"heading-anchor\" id=\"title\">"));
        assert!(out.html.contains("<h2 class=\"heading-anchor\" id=\"sub\">"));
        assert_eq!(out.toc[0].children[0].anchor, "sub");
    }

    #[test]
    fn body_without_headings_has_empty_toc() {
        let out = render_markdown("Just a paragraph with a [link](https://example.com).");
        assert!(out.toc.is_empty());
        assert!(out.html.contains("<a href=\"https://example.com\">link</a>"));
    }

    #[test]
    fn renders_tables_and_code_blocks() {
        let out = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n\n```rust\nfn main() {}\n```\n");
        assert!(out.html.contains("<table>"));
        assert!(out.html.contains("<code class=\"language-rust\">"));
    }

    #[test]
    fn each_render_starts_with_a_fresh_tree() {
        let renderer = MarkdownRenderer::new();
        let first = renderer.render("# One\n");
        let second = renderer.render("# Two\n");
        assert_eq!(first.toc.len(), 1);
        assert_eq!(second.toc.len(), 1);
        assert_eq!(second.toc[0].text, "Two");
    }
}
