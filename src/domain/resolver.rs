//! Import resolution: links a tag name to the paths quoted on matching import lines.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::error::DomainError;

/// How a tag name is looked up inside an import line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Raw substring containment. `Nav` also matches `import NavBar from ...`.
    #[default]
    Substring,
    /// Tag must be delimited by non-identifier characters.
    Word,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Substring => write!(f, "substring"),
            MatchMode::Word => write!(f, "word"),
        }
    }
}

enum TagMatcher<'a> {
    Substring(&'a str),
    Word(Regex),
}

impl TagMatcher<'_> {
    fn is_match(&self, line: &str) -> bool {
        match self {
            TagMatcher::Substring(tag) => line.contains(*tag),
            TagMatcher::Word(re) => re.is_match(line),
        }
    }
}

/// Finds the import lines that mention a tag and pulls the quoted paths out of them.
pub struct ImportResolver {
    mode: MatchMode,
    quoted_regex: Regex,
}

impl Default for ImportResolver {
    fn default() -> Self {
        Self::new(MatchMode::default())
    }
}

impl ImportResolver {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            // a segment may open and close with different quote kinds
            quoted_regex: Regex::new(r#"['"](.*?)['"]"#).unwrap(),
        }
    }

    fn matcher<'a>(&self, tag: &'a str) -> Result<TagMatcher<'a>, DomainError> {
        match self.mode {
            MatchMode::Substring => Ok(TagMatcher::Substring(tag)),
            MatchMode::Word => {
                let pattern = format!(
                    r"(?:^|[^A-Za-z0-9_$.]){}(?:$|[^A-Za-z0-9_$.])",
                    regex::escape(tag)
                );
                Regex::new(&pattern)
                    .map(TagMatcher::Word)
                    .map_err(|e| DomainError::InvalidMatcher {
                        tag: tag.to_string(),
                        reason: e.to_string(),
                    })
            }
        }
    }

    /// Every quoted segment of `line`, in order of appearance.
    pub fn quoted_segments<'l>(&self, line: &'l str) -> Vec<&'l str> {
        self.quoted_regex
            .captures_iter(line)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }

    /// Paths quoted on every import line that mentions `tag`.
    ///
    /// Ordered by import line, then by position within the line. A tag that
    /// matches several lines yields the paths of all of them.
    pub fn resolve<S: AsRef<str>>(&self, tag: &str, imports: &[S]) -> Result<Vec<String>, DomainError> {
        let matcher = self.matcher(tag)?;
        let mut paths = Vec::new();

        for line in imports.iter().map(AsRef::as_ref) {
            if !matcher.is_match(line) {
                continue;
            }
            trace!(tag, line, "import matched");
            paths.extend(self.quoted_segments(line).into_iter().map(str::to_string));
        }

        Ok(paths)
    }
}
