//! Case-insensitive literal substitution
//!
//! Rules are applied one pattern at a time, longest pattern key first. Text that
//! a rule has already written is held in protected segments that no later rule
//! can match, so a shorter key such as "government" never rewrites the inside of
//! "the head of government". Neutral phrases already present in the input are
//! protected the same way, unless a pattern occurrence crosses their edge:
//! "Party a" inside "Bharatiya Janata Party and" stays open.

use regex::{Regex, RegexBuilder};

use crate::model::ReplacementRule;

/// Standalone determiner plus whitespace at the very end of a segment prefix
const TRAILING_DETERMINER: &str = r"(?i)(?:^|[^\p{L}\p{N}_])((?:the|an|a)\s+)$";

/// Replacement text that opens with its own determiner
const LEADING_DETERMINER: &str = r"(?i)^(?:the|an|a)\s";

#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Open(&'a str),
    Protected(&'a str),
}

impl<'a> Segment<'a> {
    fn as_str(&self) -> &'a str {
        match self {
            Segment::Open(s) | Segment::Protected(s) => s,
        }
    }
}

/// A rule compiled to a case-insensitive literal matcher
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub pattern: String,
    pub replacement: String,
    matcher: Regex,
    leads_with_determiner: bool,
}

/// Build a case-insensitive matcher for a literal phrase
pub fn literal_matcher(phrase: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(phrase))
        .case_insensitive(true)
        .build()
}

/// Ordered rule list plus the protected phrase matchers derived from it
#[derive(Debug, Clone)]
pub struct Substituter {
    rules: Vec<CompiledRule>,
    protected: Vec<Regex>,
    collapse_determiners: bool,
    trailing_determiner: Regex,
}

impl Substituter {
    pub fn new(rules: &[ReplacementRule], collapse_determiners: bool) -> Result<Self, regex::Error> {
        let leading_determiner = Regex::new(LEADING_DETERMINER)?;

        let mut compiled = rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    pattern: rule.pattern.clone(),
                    replacement: rule.replacement.clone(),
                    matcher: literal_matcher(&rule.pattern)?,
                    leads_with_determiner: leading_determiner.is_match(&rule.replacement),
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        // Stable: equal-length keys keep declaration order
        compiled.sort_by_key(|rule| std::cmp::Reverse(rule.pattern.chars().count()));

        let mut phrases: Vec<&str> = Vec::new();
        for rule in rules {
            let phrase = rule.replacement.as_str();
            if !phrase.trim().is_empty()
                && !phrases.iter().any(|p| p.eq_ignore_ascii_case(phrase))
            {
                phrases.push(phrase);
            }
        }
        phrases.sort_by_key(|p| std::cmp::Reverse(p.chars().count()));
        let protected = phrases
            .into_iter()
            .map(literal_matcher)
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            rules: compiled,
            protected,
            collapse_determiners,
            trailing_determiner: Regex::new(TRAILING_DETERMINER)?,
        })
    }

    /// Rules in application order
    #[cfg(test)]
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn apply(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut segments = Vec::new();
        let mut last = 0;
        for (start, end) in self.existing_phrases(text) {
            push_open(&mut segments, &text[last..start]);
            segments.push(Segment::Protected(&text[start..end]));
            last = end;
        }
        push_open(&mut segments, &text[last..]);

        for rule in &self.rules {
            let collapse = self.collapse_determiners && rule.leads_with_determiner;
            segments = split_open(segments, &rule.matcher, |prefix, _matched, out| {
                let prefix = if collapse {
                    self.strip_trailing_determiner(prefix)
                } else {
                    prefix
                };
                push_open(out, prefix);
                out.push(Segment::Protected(rule.replacement.as_str()));
            });
        }

        segments.iter().map(Segment::as_str).collect()
    }

    /// Byte spans of replacement phrases present before any rule runs, sorted
    /// and disjoint. Longer phrases claim text first. A span is kept only if
    /// every pattern occurrence touching it lies entirely inside it.
    fn existing_phrases(&self, text: &str) -> Vec<(usize, usize)> {
        let patterns: Vec<(usize, usize)> = self
            .rules
            .iter()
            .flat_map(|rule| occurrences(&rule.matcher, text))
            .collect();

        let mut spans: Vec<(usize, usize)> = Vec::new();
        for matcher in &self.protected {
            for (start, end) in occurrences(matcher, text) {
                let crossed = patterns
                    .iter()
                    .any(|&(s, e)| s < end && e > start && (s < start || e > end));
                let claimed = spans.iter().any(|&(s, e)| s < end && e > start);
                if !crossed && !claimed {
                    spans.push((start, end));
                }
            }
        }
        spans.sort_unstable();
        spans
    }

    fn strip_trailing_determiner<'a>(&self, prefix: &'a str) -> &'a str {
        match self
            .trailing_determiner
            .captures(prefix)
            .and_then(|caps| caps.get(1))
        {
            Some(det) => &prefix[..det.start()],
            None => prefix,
        }
    }
}

/// Every match of `matcher` in `text`, overlapping ones included
fn occurrences(matcher: &Regex, text: &str) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    let mut at = 0;
    while at <= text.len() {
        let Some(m) = matcher.find_at(text, at) else {
            break;
        };
        found.push((m.start(), m.end()));
        at = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
    }
    found
}

fn push_open<'a>(out: &mut Vec<Segment<'a>>, text: &'a str) {
    if !text.is_empty() {
        out.push(Segment::Open(text));
    }
}

/// Split every open segment around the matches of `matcher`; `emit` receives
/// the unmatched prefix and the matched text for each match.
fn split_open<'a, F>(segments: Vec<Segment<'a>>, matcher: &Regex, mut emit: F) -> Vec<Segment<'a>>
where
    F: FnMut(&'a str, &'a str, &mut Vec<Segment<'a>>),
{
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        let Segment::Open(text) = segment else {
            out.push(segment);
            continue;
        };

        let mut last = 0;
        for m in matcher.find_iter(text) {
            emit(&text[last..m.start()], m.as_str(), &mut out);
            last = m.end();
        }
        push_open(&mut out, &text[last..]);
    }
    out
}
