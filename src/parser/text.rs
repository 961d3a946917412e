use std::ops::Range;

use regex::Regex;

/// Working text for one record. `original` is the normalized description and
/// never changes; `remaining` shrinks as extractors claim spans of it.
#[derive(Debug, Clone)]
pub struct ExtractionState {
    code: String,
    product_base: String,
    original: String,
    remaining: String,
}

impl ExtractionState {
    pub fn new(code: &str, product_base: &str, normalized: &str) -> Self {
        ExtractionState {
            code: code.trim().to_string(),
            product_base: product_base.to_string(),
            original: normalized.to_string(),
            remaining: normalized.to_string(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn product_base(&self) -> &str {
        &self.product_base
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn remaining(&self) -> &str {
        &self.remaining
    }

    /// Removes `span` (byte offsets into `remaining`) and returns the removed
    /// text. The two sides are rejoined with a single space.
    pub fn consume(&mut self, span: Range<usize>) -> String {
        let removed = self.remaining[span.clone()].to_string();
        let before = self.remaining[..span.start].trim_end();
        let after = self.remaining[span.end..].trim_start();
        self.remaining = match (before.is_empty(), after.is_empty()) {
            (true, _) => after.to_string(),
            (_, true) => before.to_string(),
            _ => format!("{} {}", before, after),
        };
        removed
    }

    /// Removes every match of `re` from `remaining`, returning what was removed.
    pub fn remove_where(&mut self, re: &Regex) -> Vec<String> {
        let mut removed = Vec::new();
        while let Some(m) = re.find(&self.remaining) {
            if m.is_empty() {
                break;
            }
            let span = m.range();
            removed.push(self.consume(span));
        }
        removed
    }

    /// Like [`remove_where`](Self::remove_where) but leaves the leading family
    /// token alone, so a family word that doubles as a color survives.
    pub fn remove_after_family(&mut self, re: &Regex) -> Vec<String> {
        let mut removed = Vec::new();
        loop {
            let offset = family_token_end(&self.remaining);
            let Some(m) = re.find_at(&self.remaining, offset) else {
                break;
            };
            if m.is_empty() {
                break;
            }
            removed.push(self.consume(m.range()));
        }
        removed
    }
}

/// Byte offset just past the first whitespace-delimited token.
pub fn family_token_end(text: &str) -> usize {
    let start = text.len() - text.trim_start().len();
    text[start..]
        .find(char::is_whitespace)
        .map(|i| start + i)
        .unwrap_or(text.len())
}
