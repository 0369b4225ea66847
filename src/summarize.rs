//! Extractive frequency-based summarization.
//!
//! Scores sentences by summing the document-wide frequencies of their
//! non-stopword tokens and keeps the top few. Language data (the
//! stopword set) is loaded lazily; callers see `ResourceUnavailable`
//! until `initialize` has run.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::types::{CuratorError, Result, Summary};

/// English stopwords, used when no override file is configured.
const DEFAULT_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Stopword set backing the summarizer.
pub struct LanguageData {
    stopwords: HashSet<String>,
}

impl LanguageData {
    pub fn embedded() -> Self {
        Self {
            stopwords: DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Load a stopword list from a file, one word per line.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| {
            CuratorError::Config(format!(
                "cannot read stopword list {}: {e}",
                path.as_ref().display()
            ))
        })?;

        let stopwords: HashSet<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.to_lowercase())
            .collect();

        Ok(Self { stopwords })
    }

    fn is_stop_word(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

pub struct Summarizer {
    sentence_count: usize,
    max_sentence_words: usize,
    data: Option<LanguageData>,
}

impl Summarizer {
    /// A fresh summarizer carries no language data and fails with
    /// `ResourceUnavailable` until `initialize` has run.
    pub fn new(sentence_count: usize, max_sentence_words: usize) -> Self {
        Self {
            sentence_count,
            max_sentence_words,
            data: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.data.is_some()
    }

    /// Load language data: the configured stopword file if given, the
    /// embedded list otherwise. Idempotent.
    pub fn initialize(&mut self, stopwords_file: Option<&Path>) -> Result<()> {
        if self.data.is_some() {
            return Ok(());
        }

        let data = match stopwords_file {
            Some(path) => LanguageData::from_file(path)?,
            None => LanguageData::embedded(),
        };
        debug!("Loaded language data ({} stopwords)", data.len());
        self.data = Some(data);
        Ok(())
    }

    /// Produce an extractive summary.
    ///
    /// Sentences with `max_sentence_words` or more whitespace words are
    /// never selected but still feed the frequency table. Repeated
    /// identical sentences collapse into one candidate whose score
    /// accumulates. The selected sentences are joined in the order the
    /// descending stable sort yields them, not document order.
    pub fn summarize(&self, text: &str) -> Result<Summary> {
        let data = self.data.as_ref().ok_or(CuratorError::ResourceUnavailable)?;

        let mut frequencies: HashMap<String, u64> = HashMap::new();
        for word in text.unicode_words() {
            let word = word.to_lowercase();
            if !data.is_stop_word(&word) {
                *frequencies.entry(word).or_insert(0) += 1;
            }
        }

        // Candidate sentences in first-appearance order.
        let mut candidates: Vec<(String, u64)> = Vec::new();
        let mut by_text: HashMap<String, usize> = HashMap::new();

        for sentence in text.unicode_sentences() {
            let sentence = sentence.trim();
            if sentence.is_empty() {
                continue;
            }
            if sentence.split_whitespace().count() >= self.max_sentence_words {
                continue;
            }

            let score: u64 = sentence
                .unicode_words()
                .map(|w| frequencies.get(&w.to_lowercase()).copied().unwrap_or(0))
                .sum();
            if score == 0 {
                continue;
            }

            match by_text.get(sentence) {
                Some(&i) => candidates[i].1 += score,
                None => {
                    by_text.insert(sentence.to_string(), candidates.len());
                    candidates.push((sentence.to_string(), score));
                }
            }
        }

        // Stable sort: ties keep first-appearance order.
        candidates.sort_by(|a, b| b.1.cmp(&a.1));
        candidates.truncate(self.sentence_count);

        let text = candidates
            .into_iter()
            .map(|(sentence, _)| sentence)
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Summary { text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn ready_summarizer() -> Summarizer {
        let mut summarizer = Summarizer::new(5, 30);
        summarizer.initialize(None).unwrap();
        summarizer
    }

    #[test]
    fn uninitialized_summarizer_reports_unavailable() {
        let summarizer = Summarizer::new(5, 30);
        let result = summarizer.summarize("Some text to condense.");
        assert!(matches!(result, Err(CuratorError::ResourceUnavailable)));
    }

    #[test]
    fn initialize_is_idempotent() {
        let mut summarizer = Summarizer::new(5, 30);
        summarizer.initialize(None).unwrap();
        summarizer.initialize(None).unwrap();
        assert!(summarizer.is_initialized());
    }

    #[test]
    fn orders_by_score_not_document_position() {
        let summarizer = ready_summarizer();
        let text = "Rust compilers are fast. Gardens bloom in spring. \
                    Rust compilers produce fast binaries.";

        let summary = summarizer.summarize(text).unwrap();
        assert_eq!(
            summary.text,
            "Rust compilers produce fast binaries. Rust compilers are fast. \
             Gardens bloom in spring."
        );
    }

    #[test]
    fn long_sentences_are_never_selected() {
        let summarizer = ready_summarizer();
        let long_sentence = "pine ".repeat(31).trim_end().to_string() + ".";
        let text = format!("{long_sentence} Pine trees grow.");

        let summary = summarizer.summarize(&text).unwrap();
        assert_eq!(summary.text, "Pine trees grow.");
    }

    #[test]
    fn stopword_only_sentences_never_qualify() {
        let summarizer = ready_summarizer();
        let text = "It is what it is. Compilers translate code quickly.";

        let summary = summarizer.summarize(text).unwrap();
        assert_eq!(summary.text, "Compilers translate code quickly.");
    }

    #[test]
    fn empty_input_gives_empty_summary() {
        let summarizer = ready_summarizer();
        let summary = summarizer.summarize("").unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn repeated_sentences_collapse_into_one() {
        let summarizer = ready_summarizer();
        let text = "Ships sail oceans. Ships sail oceans. Clouds drift slowly overhead.";

        let summary = summarizer.summarize(text).unwrap();
        assert_eq!(
            summary.text,
            "Ships sail oceans. Clouds drift slowly overhead."
        );
        assert_eq!(summary.text.matches("Ships sail oceans.").count(), 1);
    }

    #[test]
    fn selection_caps_at_configured_count_with_stable_ties() {
        let summarizer = ready_summarizer();
        let text = "Signal one. Signal two. Signal three. Signal four. \
                    Signal five. Signal six.";

        let summary = summarizer.summarize(text).unwrap();
        assert_eq!(
            summary.text,
            "Signal one. Signal two. Signal three. Signal four. Signal five."
        );
    }

    #[test]
    fn stopword_file_override_is_honored() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ships\nsail\noceans").unwrap();

        let mut summarizer = Summarizer::new(5, 30);
        summarizer.initialize(Some(file.path())).unwrap();

        let summary = summarizer
            .summarize("Ships sail oceans. Clouds drift slowly.")
            .unwrap();
        assert_eq!(summary.text, "Clouds drift slowly.");
    }
}
