//! Text normalization and tokenization

use crate::error::Result;
use crate::processing::vocabulary::STOP_WORDS;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

pub struct TextNormalizer {
    stop_words: HashSet<&'static str>,
    word_regex: Regex,
    sentence_split_regex: Regex,
    whitespace_regex: Regex,
    email_regex: Regex,
    phone_regex: Regex,
}

impl TextNormalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            word_regex: Regex::new(r"\w[\w+#]*")?,
            sentence_split_regex: Regex::new(r"[.•]")?,
            whitespace_regex: Regex::new(r"\s+")?,
            email_regex: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")?,
            phone_regex: Regex::new(r"(?:\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")?,
        })
    }

    pub fn normalize(&self, text: &str) -> String {
        text.to_lowercase()
    }

    /// Lower-cased word tokens, stopwords and tokens of two characters or
    /// fewer removed.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();

        self.word_regex
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| token.chars().count() > 2)
            .filter(|token| !self.stop_words.contains(*token))
            .map(str::to_string)
            .collect()
    }

    /// Split a job description into sentences on `.` and `•`.
    pub fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.sentence_split_regex
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Prose sentences, used for sentence-length statistics.
    pub fn prose_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn word_count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }

    pub fn collapse_whitespace(&self, text: &str) -> String {
        self.whitespace_regex.replace_all(text, " ").trim().to_string()
    }

    /// Whitespace-collapsed prefix of at most `max_chars` characters.
    pub fn excerpt(&self, text: &str, max_chars: usize) -> String {
        let collapsed = self.collapse_whitespace(text);
        match collapsed.char_indices().nth(max_chars) {
            Some((cut, _)) => collapsed[..cut].to_string(),
            None => collapsed,
        }
    }

    /// Most frequent tokens, ties broken alphabetically.
    pub fn top_terms(&self, text: &str, limit: usize) -> Vec<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for token in self.tokenize(text) {
            if token.chars().any(char::is_alphabetic) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.into_iter().take(limit).map(|(term, _)| term).collect()
    }

    pub fn has_email(&self, text: &str) -> bool {
        self.email_regex.is_match(text)
    }

    pub fn has_phone(&self, text: &str) -> bool {
        self.phone_regex.is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenization() {
        let normalizer = TextNormalizer::new().unwrap();
        let tokens = normalizer.tokenize("Rust programming is awesome with C++ and Go!");

        assert!(tokens.contains(&"rust".to_string()));
        assert!(tokens.contains(&"programming".to_string()));
        assert!(tokens.contains(&"awesome".to_string()));
        assert!(tokens.contains(&"c++".to_string()));

        // stopwords and short tokens
        assert!(!tokens.contains(&"with".to_string()));
        assert!(!tokens.contains(&"is".to_string()));
        assert!(!tokens.contains(&"go".to_string()));
    }

    #[test]
    fn test_sentence_split_on_bullets_and_periods() {
        let normalizer = TextNormalizer::new().unwrap();
        let sentences = normalizer.split_sentences("Intro text. • Python required • Docker a plus.");

        assert_eq!(sentences, vec!["Intro text", "Python required", "Docker a plus"]);
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        let normalizer = TextNormalizer::new().unwrap();
        let text = "Développeur   senior\n\nà Paris";

        assert_eq!(normalizer.excerpt(text, 5), "Dével");
        assert_eq!(normalizer.excerpt(text, 500), "Développeur senior à Paris");
    }

    #[test]
    fn test_top_terms_are_deterministic() {
        let normalizer = TextNormalizer::new().unwrap();
        let terms = normalizer.top_terms("rust rust python python kafka", 2);

        assert_eq!(terms, vec!["python".to_string(), "rust".to_string()]);
    }

    #[test]
    fn test_contact_patterns() {
        let normalizer = TextNormalizer::new().unwrap();

        assert!(normalizer.has_email("reach me at jane.doe@example.com"));
        assert!(normalizer.has_phone("call (555) 123-4567"));
        assert!(!normalizer.has_email("no contact here"));
        assert!(!normalizer.has_phone("graduated 2019"));
    }
}
