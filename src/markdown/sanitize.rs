//! HTML sanitization with ammonia.
//!
//! Everything the preview shows goes through [`Sanitizer::sanitize`]. Script
//! elements, event-handler attributes and `javascript:` URLs are stripped while
//! the layout markup common in profile READMEs (`align`, badges, tables, task
//! list checkboxes) survives.

use ammonia::Builder as AmmoniaBuilder;

const MAX_PASSES: usize = 4;

/// Allow-list HTML sanitizer.
pub struct Sanitizer {
    builder: AmmoniaBuilder<'static>,
}

impl std::fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sanitizer").finish_non_exhaustive()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer {
    pub fn new() -> Self {
        Self {
            builder: readme_builder(),
        }
    }

    /// Sanitize `html`.
    ///
    /// The result is a fixed point: sanitizing it again returns it unchanged.
    pub fn sanitize(&self, html: &str) -> String {
        let mut current = self.builder.clean(html).to_string();
        for _ in 1..MAX_PASSES {
            let next = self.builder.clean(&current).to_string();
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    /// Escape `text` so it displays literally inside a `<pre>` block.
    pub fn escape_preformatted(text: &str) -> String {
        format!("<pre>{}</pre>", ammonia::clean_text(text))
    }
}

fn readme_builder() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    builder.add_tags(&["input", "picture", "source"]);

    for tag in ["p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "img", "td", "th"] {
        builder.add_tag_attributes(tag, &["align"]);
    }
    builder.add_tag_attributes("img", &["title", "loading"]);
    builder.add_tag_attributes("input", &["type", "checked", "disabled"]);
    builder.add_tag_attributes("pre", &["lang"]);
    builder.add_tag_attributes("source", &["media", "srcset"]);
    builder.add_tag_attributes("a", &["id"]);
    builder.add_url_schemes(&["http", "https", "mailto"]);

    builder
}
