//! Markdown Rendering
//!
//! Info modal bodies are written in markdown and handed to the widget as HTML.
//! The resolver only depends on the [`MarkdownRenderer`] trait; [`CmarkRenderer`]
//! is the default implementation backed by `pulldown-cmark`.

use crate::error::RenderError;
use pulldown_cmark::{html, CowStr, Event, Options, Parser};
use serde::{Deserialize, Serialize};

/// Converts a markdown string into an HTML string
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

impl<F> MarkdownRenderer for F
where
    F: Fn(&str) -> Result<String, RenderError> + Send + Sync,
{
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        self(markdown)
    }
}

/// Markdown renderer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Pass raw HTML in the source through to the output (default: escaped)
    #[serde(default)]
    pub allow_html: bool,

    /// Render single newlines as `<br />`
    #[serde(default)]
    pub soft_breaks_as_line_breaks: bool,

    #[serde(default = "default_true")]
    pub tables: bool,

    #[serde(default = "default_true")]
    pub strikethrough: bool,
}

fn default_true() -> bool {
    true
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            allow_html: false,
            soft_breaks_as_line_breaks: false,
            tables: default_true(),
            strikethrough: default_true(),
        }
    }
}

/// CommonMark renderer
#[derive(Debug, Clone, Default)]
pub struct CmarkRenderer {
    config: MarkdownConfig,
}

impl CmarkRenderer {
    pub fn new(config: MarkdownConfig) -> Self {
        Self { config }
    }

    fn options(&self) -> Options {
        let mut options = Options::empty();
        if self.config.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.config.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        options
    }
}

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let allow_html = self.config.allow_html;
        let soft_breaks = self.config.soft_breaks_as_line_breaks;

        let events = Parser::new_ext(markdown, self.options()).map(move |event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) if !allow_html => {
                Event::Text(CowStr::from(raw.into_string()))
            }
            Event::SoftBreak if soft_breaks => Event::HardBreak,
            other => other,
        });

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, events);
        Ok(output)
    }
}
