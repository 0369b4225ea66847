use crate::config::Correction;

/// Applies ordered literal find/replace pairs to translated text.
///
/// Machine translation of technical prose tends to translate product
/// names that should stay untranslated; the pairs map them back.
pub struct ContentCorrector {
    pairs: Vec<Correction>,
}

impl ContentCorrector {
    pub fn new(pairs: Vec<Correction>) -> Self {
        Self { pairs }
    }

    /// Apply each pair in order, replacing every occurrence. Matching is
    /// literal and case-sensitive.
    pub fn correct(&self, text: &str) -> String {
        let mut result = text.to_string();
        for pair in &self.pairs {
            result = result.replace(&pair.find, &pair.replace);
        }
        result
    }
}
