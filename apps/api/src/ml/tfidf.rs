//! Bag-of-words TF-IDF with a capped vocabulary.
//!
//! Fitted once on the training partition and read-only afterwards. Terms
//! outside the fitted vocabulary are dropped by [`TfidfVectorizer::transform`].

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use regex::Regex;

/// Two or more word characters, matched on lowercased text.
fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("static token regex"))
}

pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    /// term -> feature index; indices follow alphabetical term order.
    vocabulary: HashMap<String, usize>,
    /// Smoothed inverse document frequency per feature index.
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Fits vocabulary and IDF weights. Keeps the `max_features` terms with
    /// the highest total count across `documents` (ties broken alphabetically).
    pub fn fit<S: AsRef<str>>(documents: &[S], max_features: usize) -> Self {
        let n_docs = documents.len();

        // term -> (total count, document frequency)
        let mut stats: BTreeMap<String, (usize, usize)> = BTreeMap::new();
        for doc in documents {
            let mut seen_in_doc: HashMap<String, usize> = HashMap::new();
            for token in tokenize(doc.as_ref()) {
                *seen_in_doc.entry(token).or_insert(0) += 1;
            }
            for (term, count) in seen_in_doc {
                let entry = stats.entry(term).or_insert((0, 0));
                entry.0 += count;
                entry.1 += 1;
            }
        }

        let mut ranked: Vec<(String, usize, usize)> = stats
            .into_iter()
            .map(|(term, (total, df))| (term, total, df))
            .collect();
        // BTreeMap iteration is alphabetical; stable sort keeps that for ties.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(max_features);
        ranked.sort_by(|a, b| a.0.cmp(&b.0));

        let mut vocabulary = HashMap::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        for (index, (term, _, df)) in ranked.into_iter().enumerate() {
            let weight = ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0;
            idf.push(weight as f32);
            vocabulary.insert(term, index);
        }

        Self { vocabulary, idf }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// Dense, L2-normalised feature vector. All-zero when no term is known.
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let mut row = vec![0.0_f32; self.idf.len()];
        for token in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                row[index] += 1.0;
            }
        }
        for (value, idf) in row.iter_mut().zip(&self.idf) {
            *value *= idf;
        }
        let norm = row.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut row {
                *value /= norm;
            }
        }
        row
    }

    pub fn transform_many<S: AsRef<str>>(&self, documents: &[S]) -> Vec<Vec<f32>> {
        documents.iter().map(|d| self.transform(d.as_ref())).collect()
    }

    #[cfg(test)]
    fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}
