//! Interest gate: word-boundary term matching over entry titles.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::types::{CuratorError, Result, TopicScore};

/// Load interest terms from a newline-delimited file. Blank lines and
/// surrounding whitespace are dropped.
pub fn load_terms(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let content = fs::read_to_string(&path).map_err(|e| {
        CuratorError::Config(format!(
            "cannot read interest list {}: {e}",
            path.as_ref().display()
        ))
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Matches titles against interest terms. A term hits only on word
/// boundaries: start/end of string, space, period or comma. Matching is
/// case-insensitive and literal; regex metacharacters in a term carry no
/// special meaning.
pub struct TermMatcher {
    terms: Vec<(String, Regex)>,
}

impl TermMatcher {
    pub fn new(terms: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut compiled = Vec::new();
        for term in terms {
            let pattern = format!("(?i)(?:^|[ .,]){}(?:[ .,]|$)", regex::escape(&term));
            let regex = Regex::new(&pattern).map_err(|e| {
                CuratorError::Config(format!("invalid interest term {term:?}: {e}"))
            })?;
            compiled.push((term, regex));
        }
        Ok(Self { terms: compiled })
    }

    /// Score a title. Each term contributes at most 1 regardless of how
    /// often it occurs.
    pub fn score(&self, text: &str) -> TopicScore {
        let matched_terms: Vec<String> = self
            .terms
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(term, _)| term.clone())
            .collect();

        let score = matched_terms.len() as u32;
        TopicScore {
            matched_terms,
            score,
        }
    }

    pub fn is_of_interest(&self, text: &str) -> bool {
        self.score(text).is_of_interest()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn matcher(terms: &[&str]) -> TermMatcher {
        TermMatcher::new(terms.iter().map(|t| t.to_string())).unwrap()
    }

    fn sample_matcher() -> TermMatcher {
        matcher(&["python", "open source", "open-source", "kubernetes"])
    }

    #[test]
    fn headline_calibration() {
        let m = sample_matcher();

        assert!(m.is_of_interest("Python Testing Essentials: A Comprehensive Guide"));
        assert!(m.is_of_interest("Show HN: ClimateTriage – Impactful open source contributions"));
        assert!(m.is_of_interest(
            "Notesnook – open-source and zero knowledge private note taking app"
        ));
        assert!(m.is_of_interest("Das Schiff Is a GitOps Based Kubernetes Cluster as a Service Platform"));

        assert!(!m.is_of_interest("Smart Lasers for Bone Surgery"));
        assert!(!m.is_of_interest("Hasura V3 Engine is in alpha"));
        assert!(!m.is_of_interest("Gemini: A Family of Highly Capable Multimodal Models"));
        assert!(!m.is_of_interest(
            "He Stole Hundreds of iPhones and Looted People's Life Savings. He Told Us How"
        ));
    }

    #[test]
    fn matches_only_on_word_boundaries() {
        let m = matcher(&["rust"]);

        assert!(m.is_of_interest("Rust is great."));
        assert!(m.is_of_interest("Written in rust, apparently"));
        assert!(m.is_of_interest("We rewrote it in Rust"));

        assert!(!m.is_of_interest("A matter of trust"));
        assert!(!m.is_of_interest("Robustness testing for compilers"));
        assert!(!m.is_of_interest("rustling leaves"));
    }

    #[test]
    fn each_term_counts_at_most_once() {
        let m = matcher(&["python"]);
        let scored = m.score("Python for Python developers: python everywhere");
        assert_eq!(scored.score, 1);
        assert_eq!(scored.matched_terms, vec!["python".to_string()]);
    }

    #[test]
    fn multiple_terms_accumulate() {
        let m = sample_matcher();
        let scored = m.score("Python tooling for Kubernetes operators");
        assert_eq!(scored.score, 2);
        assert!(scored.is_of_interest());
    }

    #[test]
    fn metacharacters_match_literally() {
        let m = matcher(&["c++"]);
        assert!(m.is_of_interest("Modern C++ features you missed"));
        assert!(!m.is_of_interest("Grading on a curve: from c to a"));
    }

    #[test]
    fn load_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "python\n\n  kubernetes  \nopen source").unwrap();

        let terms = load_terms(file.path()).unwrap();
        assert_eq!(terms, vec!["python", "kubernetes", "open source"]);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        assert!(load_terms("/nonexistent/interests.list").is_err());
    }
}
