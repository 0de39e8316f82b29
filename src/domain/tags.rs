//! Tag extraction from markup-like lines.

use std::collections::HashSet;

use regex::Regex;

/// Platform elements that never map to a component file.
///
/// Sources: <https://developer.mozilla.org/en-US/docs/Web/HTML/Element>
pub const HTML_ELEMENTS: [&str; 93] = [
    "a", "abbr", "address", "audio", "b", "bdi", "bdo", "blockquote", "body", "br", "button",
    "canvas", "caption", "cite", "code", "col", "colgroup", "data", "details", "dfn", "div", "dl",
    "dt", "em", "embed", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3",
    "h4", "h5", "h6", "head", "header", "hr", "html", "iframe", "img", "input", "ins", "label",
    "legend", "li", "link", "main", "mark", "menu", "menuitem", "meta", "meter", "nav", "ol",
    "option", "p", "param", "picture", "pre", "progress", "q", "rp", "rt", "ruby", "s", "script",
    "section", "select", "slot", "small", "source", "span", "strong", "style", "sub", "summary",
    "sup", "table", "template", "textarea", "tfoot", "th", "thead", "time", "title", "track", "u",
    "ul", "var", "video", "wbr",
];

/// Pulls the first tag name out of each markup-like line.
pub struct TagExtractor {
    tag_regex: Regex,
    ignored: HashSet<String>,
}

impl Default for TagExtractor {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl TagExtractor {
    /// Create an extractor that skips HTML elements plus `extra_ignored`.
    pub fn new(extra_ignored: &[String]) -> Self {
        let ignored = HTML_ELEMENTS
            .iter()
            .map(|e| e.to_string())
            .chain(extra_ignored.iter().cloned())
            .collect();
        Self {
            tag_regex: Regex::new(r"<([a-zA-Z0-9.]+)").unwrap(),
            ignored,
        }
    }

    /// Case-sensitive check against the ignore set.
    pub fn is_builtin(&self, tag: &str) -> bool {
        self.ignored.contains(tag)
    }

    /// Tag name of the first `<Name` in the line, unless it is a built-in element.
    pub fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        let tag = self.tag_regex.captures(line)?.get(1)?.as_str();
        if self.is_builtin(tag) {
            return None;
        }
        Some(tag)
    }

    /// Extract tags from every line, keeping duplicates and line order.
    pub fn extract_all<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        lines
            .iter()
            .filter_map(|line| self.extract(line.as_ref()))
            .map(str::to_string)
            .collect()
    }
}
