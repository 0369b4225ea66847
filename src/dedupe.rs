use std::collections::HashSet;

/// Immutable snapshot of the backend's published post titles, taken once
/// per run. Lookups are exact string matches: no normalization, no fuzzy
/// matching, and the set never changes mid-run.
#[derive(Debug, Clone)]
pub struct PublishedTitles {
    titles: HashSet<String>,
}

impl PublishedTitles {
    pub fn new(titles: impl IntoIterator<Item = String>) -> Self {
        Self {
            titles: titles.into_iter().collect(),
        }
    }

    pub fn is_published(&self, title: &str) -> bool {
        self.titles.contains(title)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> PublishedTitles {
        PublishedTitles::new(vec![
            "Guia de testes em Python".to_string(),
            "Novidades do kernel".to_string(),
        ])
    }

    #[test]
    fn exact_titles_are_published() {
        let titles = snapshot();
        assert!(titles.is_published("Guia de testes em Python"));
        assert!(titles.is_published("Novidades do kernel"));
        assert_eq!(titles.len(), 2);
    }

    #[test]
    fn near_misses_are_not_published() {
        let titles = snapshot();
        assert!(!titles.is_published("guia de testes em python"));
        assert!(!titles.is_published("Guia de testes em Python "));
        assert!(!titles.is_published("Guia de testes"));
    }

    #[test]
    fn empty_snapshot_matches_nothing() {
        let titles = PublishedTitles::new(Vec::new());
        assert!(titles.is_empty());
        assert!(!titles.is_published("anything"));
    }
}
