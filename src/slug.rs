use std::collections::HashSet;

use crate::parser::normalize::strip_accents;

pub const MAX_SLUG_LEN: usize = 50;
pub const FALLBACK_SLUG: &str = "produto";

/// URL-safe form of `text`: lowercase ASCII letters, digits and single
/// hyphens, at most [`MAX_SLUG_LEN`] characters, never empty.
pub fn slugify(text: &str) -> String {
    let folded = strip_accents(text).to_lowercase();
    let mut out = String::with_capacity(folded.len());
    let mut pending_sep = false;
    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            out.push(c);
            pending_sep = false;
        } else if c.is_whitespace() || c == '-' {
            pending_sep = true;
        }
    }

    if out.len() > MAX_SLUG_LEN {
        out.truncate(MAX_SLUG_LEN);
        while out.ends_with('-') {
            out.pop();
        }
    }
    if out.is_empty() {
        out.push_str(FALLBACK_SLUG);
    }
    out
}

/// Slugs handed out during one run. A taken slug gets `-1`, `-2`, ...
/// appended until it is free.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    used: HashSet<String>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut candidate = base.clone();
        let mut n = 0usize;
        while self.used.contains(&candidate) {
            n += 1;
            candidate = format!("{}-{}", base, n);
        }
        self.used.insert(candidate.clone());
        candidate
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.used.contains(slug)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
