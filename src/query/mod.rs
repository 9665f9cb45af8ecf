//! Query expansion: turn one raw search string into the set of exact-name
//! queries sent to the search API.

pub mod lemmatizer;
pub mod stopwords;
pub mod tokenizer;

use lemmatizer::{EnglishLemmatizer, Lemmatizer};
use serde::Serialize;
use std::collections::HashSet;
use stopwords::is_stop_word;
use tracing::debug;

/// Ordered, duplicate-free list of query strings.
/// Insertion order is kept so the merge step is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CandidateQuerySet {
    queries: Vec<String>,
}

impl CandidateQuerySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a query; returns false if it was already present
    pub fn insert(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if self.contains(&query) {
            return false;
        }
        self.queries.push(query);
        true
    }

    pub fn contains(&self, query: &str) -> bool {
        self.queries.iter().any(|q| q == query)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.queries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.queries
    }
}

impl<S: Into<String>> FromIterator<S> for CandidateQuerySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = CandidateQuerySet::new();
        for query in iter {
            set.insert(query);
        }
        set
    }
}

impl<'a> IntoIterator for &'a CandidateQuerySet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.queries.iter()
    }
}

/// Every intermediate step of one expansion
#[derive(Debug, Clone, Serialize)]
pub struct Expansion {
    pub raw: String,
    pub tokens: Vec<String>,
    pub lemmas: Vec<String>,
    pub variants: Vec<String>,
    pub candidates: CandidateQuerySet,
}

pub struct QueryExpander {
    lemmatizer: Box<dyn Lemmatizer>,
}

impl Default for QueryExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryExpander {
    /// Expander backed by the English lemmatizer
    pub fn new() -> Self {
        Self::with_lemmatizer(EnglishLemmatizer::new())
    }

    pub fn with_lemmatizer(lemmatizer: impl Lemmatizer + 'static) -> Self {
        Self {
            lemmatizer: Box::new(lemmatizer),
        }
    }

    /// Expand a raw query into the candidate queries to issue
    pub fn expand(&self, raw: &str) -> CandidateQuerySet {
        self.analyze(raw).candidates
    }

    /// Expand a raw query, keeping the intermediate tokens and variants
    pub fn analyze(&self, raw: &str) -> Expansion {
        let tokens = tokenizer::remove_stop_words(tokenizer::tokenize(raw));

        // A lemma can collapse onto a stop word ("having" style forms);
        // those are dropped like any other stop word.
        let lemmas: Vec<String> = tokens
            .iter()
            .map(|token| self.lemmatizer.lemmatize(token))
            .filter(|lemma| !lemma.is_empty() && !is_stop_word(lemma))
            .collect();

        let variants = generate_variants(&lemmas);

        let candidates: CandidateQuerySet = std::iter::once(raw.to_string())
            .chain(variants.iter().cloned())
            .chain(lemmas.iter().cloned())
            .collect();

        debug!(
            "Expanded {:?} into {} candidate queries",
            raw,
            candidates.len()
        );

        Expansion {
            raw: raw.to_string(),
            tokens,
            lemmas,
            variants,
            candidates,
        }
    }
}

/// Forward join, reverse join (two or more lemmas) and each lemma alone,
/// deduplicated in that order.
pub fn generate_variants(lemmas: &[String]) -> Vec<String> {
    let mut variants = vec![lemmas.join(" ")];

    if lemmas.len() > 1 {
        let reversed: Vec<&str> = lemmas.iter().rev().map(String::as_str).collect();
        variants.push(reversed.join(" "));
    }

    variants.extend(lemmas.iter().cloned());

    let mut seen = HashSet::new();
    variants.retain(|variant| seen.insert(variant.clone()));
    variants
}

/// Expand a raw query with the default English expander
pub fn expand(raw: &str) -> CandidateQuerySet {
    QueryExpander::new().expand(raw)
}
