//! # quire-markdown
//!
//! Markdown to HTML rendering for quire posts.
//!
//! Rendering rewrites every heading to carry an anchor id and collects the
//! headings into a nested [`HeadingNode`] tree for the table of contents.

pub mod render;
pub mod slug;
pub mod toc;

pub use render::{render_markdown, MarkdownRenderer, Rendered};
pub use slug::slugify;
pub use toc::{HeadingNode, HeadingTree};
