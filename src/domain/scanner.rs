//! Line scanner: classifies source lines as import-like and/or markup-like.

use std::io::{self, BufRead};

use regex::Regex;
use tracing::trace;

use crate::domain::error::DomainError;

/// Module extensions recognised on import lines by default.
pub const DEFAULT_EXTENSIONS: [&str; 4] = [".tsx", ".jsx", ".ts", ".js"];

const IMPORT_KEYWORD: &str = "import";
const REQUIRE_CALL: &str = "require";

/// Lines collected from one source file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedSource {
    /// Import/require lines that mention a recognised module extension
    pub imports: Vec<String>,
    /// Lines containing `<identifier`
    pub markup: Vec<String>,
}

/// How a single trimmed line was classified. Both flags may be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineKind {
    pub import: bool,
    pub markup: bool,
}

/// Classifies lines of a source file.
pub struct LineScanner {
    extensions: Vec<String>,
    markup_regex: Regex,
}

impl Default for LineScanner {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            markup_regex: markup_regex(),
        }
    }
}

fn markup_regex() -> Regex {
    Regex::new(r"<[0-9A-Za-z_]+").unwrap()
}

impl LineScanner {
    /// Create a scanner recognising the given module extensions.
    pub fn new(extensions: &[String]) -> Result<Self, DomainError> {
        for ext in extensions {
            if ext.len() < 2 || !ext.starts_with('.') {
                return Err(DomainError::InvalidExtension(ext.clone()));
            }
        }
        Ok(Self {
            extensions: extensions.to_vec(),
            markup_regex: markup_regex(),
        })
    }

    /// Classify an already trimmed, non-empty line.
    pub fn classify(&self, line: &str) -> LineKind {
        let looks_like_import = line.starts_with(IMPORT_KEYWORD) || line.contains(REQUIRE_CALL);
        let import = looks_like_import && self.extensions.iter().any(|ext| line.contains(ext.as_str()));

        LineKind {
            import,
            markup: self.markup_regex.is_match(line),
        }
    }

    /// Read all lines from `reader` and collect the classified ones.
    ///
    /// Bytes that are not valid UTF-8 are replaced, so odd source text only
    /// changes what matches. An I/O error from the reader aborts the scan.
    pub fn scan<R: BufRead>(&self, mut reader: R) -> io::Result<ScannedSource> {
        let mut scanned = ScannedSource::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let raw = String::from_utf8_lossy(&buf);
            let line = raw.trim_end_matches(['\n', '\r']).trim();
            if line.is_empty() {
                continue;
            }

            let kind = self.classify(line);
            trace!(?kind, line, "classified");
            if kind.import {
                scanned.imports.push(line.to_string());
            }
            if kind.markup {
                scanned.markup.push(line.to_string());
            }
        }

        Ok(scanned)
    }
}
