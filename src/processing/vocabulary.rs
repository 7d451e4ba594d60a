//! Fixed lookup tables used by the scoring pipeline
//!
//! Everything here is constant data. Matching against the tables goes through
//! [`TermMatcher`], which wraps an Aho-Corasick automaton and only accepts hits
//! that are not glued to surrounding letters or digits.

use crate::error::Result;
use aho_corasick::{AhoCorasick, MatchKind};

/// Technical skills: languages, frameworks, databases, cloud and devops tools.
pub const TECHNICAL_SKILLS: &[&str] = &[
    // Programming languages
    "python", "java", "javascript", "typescript", "c++", "c#", "php", "ruby",
    "go", "golang", "rust", "swift", "kotlin", "scala", "matlab", "sql", "perl",
    "haskell",
    // Web technologies
    "html", "css", "react", "angular", "vue", "node.js", "express", "django",
    "flask", "fastapi", "spring", "laravel", "rails", "asp.net", "next.js",
    "graphql", "rest api",
    // Databases
    "mysql", "postgresql", "mongodb", "redis", "elasticsearch", "oracle",
    "sqlite", "cassandra", "dynamodb",
    // Cloud and devops
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "terraform",
    "ansible", "puppet", "chef", "git", "gitlab", "github", "ci/cd",
    "microservices",
    // Data science and AI
    "machine learning", "deep learning", "tensorflow", "pytorch", "scikit-learn",
    "pandas", "numpy", "matplotlib", "tableau", "power bi", "spark", "hadoop",
    "kafka",
    // Mobile
    "android", "ios", "react native", "flutter", "xamarin",
    // Platforms and tooling
    "linux", "unix", "windows", "macos", "bash", "powershell", "vim", "vscode",
    "jira", "agile", "scrum",
];

/// Soft skills looked for in both documents.
pub const SOFT_SKILLS: &[&str] = &[
    "leadership", "communication", "teamwork", "problem solving", "problem-solving",
    "analytical", "creative", "adaptable", "organized", "detail-oriented",
    "collaborative", "collaboration", "innovative", "strategic", "customer-focused",
    "results-driven", "proactive", "mentoring", "coaching", "negotiation",
    "presentation", "project management", "time management",
];

/// Standard English stopword list.
pub const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your",
    "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she",
    "her", "hers", "herself", "it", "its", "itself", "they", "them", "their",
    "theirs", "themselves", "what", "which", "who", "whom", "this", "that",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of",
    "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "to", "from", "up", "down",
    "in", "out", "on", "off", "over", "under", "again", "further", "then",
    "once", "here", "there", "when", "where", "why", "how", "all", "any",
    "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor",
    "not", "only", "own", "same", "so", "than", "too", "very", "can", "will",
    "just", "don", "should", "now", "also", "etc", "per", "via", "within",
    "across", "including", "well", "must", "may", "able", "us",
];

/// Phrases that mark a job-description sentence as a requirement.
pub const REQUIREMENT_INDICATORS: &[&str] = &[
    "required", "requirements", "qualifications", "skills", "experience with",
    "knowledge of", "proficiency in", "expertise in", "familiarity with",
];

/// Action verbs that read well on a resume.
pub const POWER_VERBS: &[&str] = &[
    "achieved", "accomplished", "administered", "analyzed", "architected",
    "automated", "built", "coached", "collaborated", "completed", "conducted",
    "consolidated", "coordinated", "created", "delivered", "designed",
    "developed", "directed", "drove", "engineered", "enhanced", "established",
    "evaluated", "exceeded", "executed", "expanded", "facilitated", "founded",
    "generated", "guided", "identified", "implemented", "improved", "increased",
    "initiated", "integrated", "introduced", "launched", "led", "managed",
    "mentored", "migrated", "modernized", "negotiated", "optimized",
    "orchestrated", "organized", "oversaw", "pioneered", "planned", "produced",
    "reduced", "redesigned", "refactored", "resolved", "restructured",
    "scaled", "shipped", "simplified", "spearheaded", "streamlined",
    "strengthened", "supervised", "trained", "transformed", "upgraded",
];

/// Words suggesting hands-on, senior experience.
pub const EXPERIENCE_INDICATORS: &[&str] = &["years", "led", "managed", "developed", "created", "increased"];

/// Phrases that usually hide what the candidate actually did.
pub const PASSIVE_PHRASES: &[&str] = &["responsible for", "duties included", "tasked with"];

/// Generic description used when the caller supplies none.
pub const DEFAULT_JOB_DESCRIPTION: &str =
    "Looking for experienced professional with relevant skills and achievements";

/// Set of vocabulary terms matched as whole words or phrases.
///
/// Hits are found by substring search, so multi-word skills such as
/// "machine learning" match, but a hit is rejected when the character right
/// before or after it is alphanumeric (`go` does not match inside `good`).
pub struct TermMatcher {
    automaton: AhoCorasick,
    terms: Vec<&'static str>,
}

impl TermMatcher {
    pub fn new(terms: &[&'static str]) -> Result<Self> {
        let mut terms = terms.to_vec();
        terms.sort_unstable();
        terms.dedup();

        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&terms)?;

        Ok(Self { automaton, terms })
    }

    /// Distinct terms present in `text`, in vocabulary order.
    pub fn find_terms(&self, text: &str) -> Vec<&'static str> {
        let mut seen = vec![false; self.terms.len()];

        for mat in self.automaton.find_overlapping_iter(text) {
            if is_word_bounded(text, mat.start(), mat.end()) {
                seen[mat.pattern().as_usize()] = true;
            }
        }

        self.terms
            .iter()
            .zip(seen)
            .filter_map(|(term, hit)| hit.then_some(*term))
            .collect()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.binary_search_by(|probe| (*probe).cmp(term)).is_ok()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_word_terms_match() {
        let matcher = TermMatcher::new(TECHNICAL_SKILLS).unwrap();
        let found = matcher.find_terms("Built machine learning pipelines on AWS");

        assert!(found.contains(&"machine learning"));
        assert!(found.contains(&"aws"));
    }

    #[test]
    fn test_terms_inside_words_are_rejected() {
        let matcher = TermMatcher::new(TECHNICAL_SKILLS).unwrap();
        let found = matcher.find_terms("a good javascript developer");

        assert!(found.contains(&"javascript"));
        assert!(!found.contains(&"go"));
        assert!(!found.contains(&"java"));
    }

    #[test]
    fn test_overlapping_terms_are_all_reported() {
        let matcher = TermMatcher::new(TECHNICAL_SKILLS).unwrap();
        let found = matcher.find_terms("shipped react native apps");

        assert!(found.contains(&"react"));
        assert!(found.contains(&"react native"));
    }

    #[test]
    fn test_symbols_in_terms() {
        let matcher = TermMatcher::new(TECHNICAL_SKILLS).unwrap();
        let found = matcher.find_terms("C++, C# and Node.js");

        assert!(found.contains(&"c++"));
        assert!(found.contains(&"c#"));
        assert!(found.contains(&"node.js"));
    }

    #[test]
    fn test_vocabulary_sizes() {
        let tech = TermMatcher::new(TECHNICAL_SKILLS).unwrap();
        let soft = TermMatcher::new(SOFT_SKILLS).unwrap();

        assert!(tech.len() >= 80);
        assert!(soft.len() >= 20);
        assert!(tech.contains("kubernetes"));
        assert!(!soft.contains("kubernetes"));
    }
}
