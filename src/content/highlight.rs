//! Keyword highlighting

use regex::{Captures, Regex, RegexBuilder};

/// Wraps whole-word, case-insensitive matches of search terms in markers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighter {
    open: String,
    close: String,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new("<mark>", "</mark>")
    }
}

impl Highlighter {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Marks every whole-word occurrence of each term in `text`
    ///
    /// Terms are applied one after another in the given order, each over the
    /// output of the previous one. When terms overlap, the markers of a later
    /// term therefore nest inside those of an earlier one. Matched text keeps
    /// its original casing.
    ///
    /// # Example
    ///
    /// ```
    /// use keyword_crawler::content::Highlighter;
    ///
    /// let highlighted = Highlighter::default().highlight("Cybersecurity is key", &["cybersecurity"]);
    /// assert_eq!(highlighted, "<mark>Cybersecurity</mark> is key");
    /// ```
    pub fn highlight<S: AsRef<str>>(&self, text: &str, terms: &[S]) -> String {
        let mut highlighted = text.to_string();

        for term in terms {
            let term = term.as_ref().trim();
            if term.is_empty() {
                continue;
            }

            let pattern = match word_pattern(term) {
                Ok(pattern) => pattern,
                Err(e) => {
                    tracing::warn!("Cannot highlight term '{}': {}", term, e);
                    continue;
                }
            };

            highlighted = pattern
                .replace_all(&highlighted, |caps: &Captures<'_>| {
                    format!("{}{}{}", self.open, &caps[0], self.close)
                })
                .into_owned();
        }

        highlighted
    }
}

/// Case-insensitive regex matching `term` as a whole word
fn word_pattern(term: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(term)))
        .case_insensitive(true)
        .build()
}

/// Splits a comma-separated list of search terms
///
/// Terms are trimmed and case-folded; empty entries are dropped.
///
/// ```
/// use keyword_crawler::content::parse_terms;
///
/// assert_eq!(parse_terms(" Rust, SAFETY ,, "), vec!["rust", "safety"]);
/// ```
pub fn parse_terms(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlight(text: &str, terms: &[&str]) -> String {
        Highlighter::default().highlight(text, terms)
    }

    #[test]
    fn test_preserves_original_casing() {
        assert_eq!(
            highlight("Cybersecurity is key", &["cybersecurity"]),
            "<mark>Cybersecurity</mark> is key"
        );
    }

    #[test]
    fn test_every_occurrence_marked() {
        assert_eq!(
            highlight("rust and RUST and Rust", &["rust"]),
            "<mark>rust</mark> and <mark>RUST</mark> and <mark>Rust</mark>"
        );
    }

    #[test]
    fn test_whole_words_only() {
        assert_eq!(highlight("trusted rust rusty", &["rust"]), "trusted <mark>rust</mark> rusty");
    }

    #[test]
    fn test_multiple_terms() {
        assert_eq!(
            highlight("memory safety without garbage collection", &["safety", "collection"]),
            "memory <mark>safety</mark> without garbage <mark>collection</mark>"
        );
    }

    #[test]
    fn test_multi_word_term() {
        assert_eq!(
            highlight("Zero cost abstractions matter", &["zero cost"]),
            "<mark>Zero cost</mark> abstractions matter"
        );
    }

    #[test]
    fn test_regex_metacharacters_escaped() {
        assert_eq!(highlight("version 1.0 vs 1x0", &["1.0"]), "version <mark>1.0</mark> vs 1x0");
    }

    #[test]
    fn test_overlapping_terms_nest() {
        assert_eq!(highlight("key", &["key", "KEY"]), "<mark><mark>key</mark></mark>");
    }

    #[test]
    fn test_no_terms_or_blank_terms() {
        assert_eq!(highlight("unchanged text", &[]), "unchanged text");
        assert_eq!(highlight("unchanged text", &["", "   "]), "unchanged text");
    }

    #[test]
    fn test_custom_markers() {
        let highlighter = Highlighter::new("**", "**");
        assert_eq!(highlighter.highlight("bold move", &["bold"]), "**bold** move");
    }

    #[test]
    fn test_dollar_in_text_is_literal() {
        assert_eq!(highlight("costs $5 today", &["costs"]), "<mark>costs</mark> $5 today");
    }

    #[test]
    fn test_parse_terms() {
        assert_eq!(parse_terms("Rust,  Cargo ,"), vec!["rust", "cargo"]);
        assert!(parse_terms("").is_empty());
        assert!(parse_terms(" , ,").is_empty());
    }
}
