//! Ordered extraction rules over the `remaining` buffer.
//!
//! A rule is a regex plus a builder. The builder sees the captures and the
//! whole haystack, and returns `None` to reject a match (the next match of the
//! same rule is then tried). The first rule that yields a value wins; its span
//! is removed from `remaining` right away so later rules never see it.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

use super::text::ExtractionState;

/// Which part of a match is removed from `remaining`.
#[derive(Debug, Clone, Copy)]
pub enum Consume {
    Whole,
    Group(usize),
    Nothing,
}

pub type Build<T> = fn(&Captures<'_>, &str) -> Option<T>;

pub struct Rule<T> {
    pub name: &'static str,
    pub pattern: &'static LazyLock<Regex>,
    pub consume: Consume,
    pub build: Build<T>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hit<T> {
    pub rule: &'static str,
    pub value: T,
    pub removed: String,
}

impl<T> Rule<T> {
    /// Finds the first accepted match in `text`, returning the value and the
    /// span to consume.
    pub fn find(&self, text: &str) -> Option<(T, Option<Range<usize>>)> {
        for caps in self.pattern.captures_iter(text) {
            let Some(value) = (self.build)(&caps, text) else {
                continue;
            };
            let span = match self.consume {
                Consume::Whole => caps.get(0).map(|m| m.range()),
                Consume::Group(i) => caps.get(i).map(|m| m.range()),
                Consume::Nothing => None,
            };
            return Some((value, span));
        }
        None
    }
}

/// Runs `rules` in order against `remaining`; the first one that matches wins.
pub fn first_match<T>(rules: &[Rule<T>], state: &mut ExtractionState) -> Option<Hit<T>> {
    for rule in rules {
        let Some((value, span)) = rule.find(state.remaining()) else {
            continue;
        };
        let removed = span.map(|s| state.consume(s)).unwrap_or_default();
        trace!(rule = rule.name, removed = %removed, "rule matched");
        return Some(Hit {
            rule: rule.name,
            value,
            removed,
        });
    }
    None
}

/// Text immediately before byte offset `at`, trimmed on the right.
pub fn preceding(text: &str, at: usize) -> &str {
    text[..at].trim_end()
}

/// Text immediately after byte offset `at`, trimmed on the left.
pub fn following(text: &str, at: usize) -> &str {
    text[at..].trim_start()
}

/// True when `text` ends with `word` as a whole token.
pub fn ends_with_token(text: &str, word: &str) -> bool {
    text.strip_suffix(word)
        .is_some_and(|rest| rest.chars().last().map_or(true, |c| !c.is_alphanumeric()))
}

/// True when byte offset `at` sits right after a decimal separator, i.e. a
/// match starting there would split a number like `2,5`.
pub fn splits_decimal(text: &str, at: usize) -> bool {
    text[..at].ends_with(['.', ','])
}

pub fn group<'t>(caps: &Captures<'t>, i: usize) -> Option<&'t str> {
    caps.get(i).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    static NUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*X\b").unwrap());
    static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(FOO)\b").unwrap());

    fn even_only(caps: &Captures<'_>, _: &str) -> Option<u32> {
        let n: u32 = caps[1].parse().ok()?;
        (n % 2 == 0).then_some(n)
    }

    fn word(caps: &Captures<'_>, _: &str) -> Option<u32> {
        Some(caps[1].len() as u32)
    }

    static RULES: &[Rule<u32>] = &[
        Rule {
            name: "even",
            pattern: &NUM_RE,
            consume: Consume::Whole,
            build: even_only,
        },
        Rule {
            name: "word",
            pattern: &WORD_RE,
            consume: Consume::Nothing,
            build: word,
        },
    ];

    #[test]
    fn rejected_match_falls_through_to_next_match() {
        let mut st = ExtractionState::new("1", "x", "A 3 X 4 X B");
        let hit = first_match(RULES, &mut st).unwrap();
        assert_eq!(hit.rule, "even");
        assert_eq!(hit.value, 4);
        assert_eq!(hit.removed, "4 X");
        assert_eq!(st.remaining(), "A 3 X B");
    }

    #[test]
    fn later_rule_used_when_earlier_misses() {
        let mut st = ExtractionState::new("1", "x", "A FOO 3 X");
        let hit = first_match(RULES, &mut st).unwrap();
        assert_eq!(hit.rule, "word");
        assert_eq!(st.remaining(), "A FOO 3 X");
    }

    #[test]
    fn no_match() {
        let mut st = ExtractionState::new("1", "x", "NOTHING HERE");
        assert!(first_match(RULES, &mut st).is_none());
    }

    #[test]
    fn token_edges() {
        assert!(ends_with_token("GERB DIAM", "DIAM"));
        assert!(!ends_with_token("GERB XDIAM", "DIAM"));
        assert!(splits_decimal("ROSA 2,5", 7));
        assert!(!splits_decimal("ROSA 2,5", 5));
    }
}
