use mealsearch::query::lemmatizer::{IdentityLemmatizer, Lemmatizer};
use mealsearch::query::stopwords::{is_stop_word, STOP_WORDS};
use mealsearch::query::{expand, QueryExpander};

#[test]
fn test_chicken_curry_expansion() {
    let expander = QueryExpander::with_lemmatizer(IdentityLemmatizer);
    let candidates = expander.expand("Chicken Curry!");

    assert_eq!(
        candidates.as_slice(),
        [
            "Chicken Curry!",
            "chicken curry",
            "curry chicken",
            "chicken",
            "curry"
        ]
    );

    // The default lemmatizer leaves both words alone
    assert_eq!(expand("Chicken Curry!"), candidates);
}

#[test]
fn test_all_stop_word_query_yields_empty_candidate() {
    let candidates = expand("the");
    assert_eq!(candidates.as_slice(), ["the", ""]);
}

#[test]
fn test_empty_query() {
    let candidates = expand("");
    assert_eq!(candidates.as_slice(), [""]);
}

#[test]
fn test_raw_query_is_always_first_member() {
    for raw in [
        "Beef Wellington",
        "  spaced   out  ",
        "!!!",
        "What is the best pie?",
        "a an the",
        "Tomatoes, Basil & Mozzarella",
    ] {
        let candidates = expand(raw);
        assert!(!candidates.is_empty());
        assert!(candidates.contains(raw), "{raw:?} missing from {candidates:?}");
        assert_eq!(candidates.iter().next(), Some(raw));
    }
}

#[test]
fn test_variants_never_contain_stop_words() {
    let raw = "What is the best way to cook the chicken with some rice?";
    let expansion = QueryExpander::new().analyze(raw);

    assert_eq!(expansion.lemmas, vec!["best", "way", "cook", "chicken", "rice"]);

    for candidate in expansion.candidates.iter().skip(1) {
        for word in candidate.split_whitespace() {
            assert!(!is_stop_word(word), "{word:?} leaked into {candidate:?}");
        }
    }
}

#[test]
fn test_single_token_has_no_reverse_variant() {
    let expansion = QueryExpander::new().analyze("Lasagne");
    assert_eq!(expansion.variants, vec!["lasagne"]);
    assert_eq!(expansion.candidates.as_slice(), ["Lasagne", "lasagne"]);
}

#[test]
fn test_candidates_are_unique() {
    let candidates = expand("rice rice");
    let mut seen = std::collections::HashSet::new();
    assert!(candidates.iter().all(|c| seen.insert(c)));
    assert_eq!(candidates.as_slice(), ["rice rice", "rice"]);
}

#[test]
fn test_plural_query_is_lemmatized() {
    let expansion = QueryExpander::new().analyze("Stuffed Tomatoes");
    assert_eq!(expansion.tokens, vec!["stuffed", "tomatoes"]);
    assert_eq!(expansion.lemmas, vec!["stuff", "tomato"]);
    assert!(expansion.candidates.contains("stuff tomato"));
    assert!(expansion.candidates.contains("tomato stuff"));
}

/// A lemmatizer that maps everything onto a stop word must not leak it
struct Collapsing;

impl Lemmatizer for Collapsing {
    fn lemmatize(&self, _word: &str) -> String {
        "the".to_string()
    }
}

#[test]
fn test_lemmas_collapsing_to_stop_words_are_dropped() {
    let expansion = QueryExpander::with_lemmatizer(Collapsing).analyze("Pancakes");
    assert!(expansion.lemmas.is_empty());
    assert_eq!(expansion.candidates.as_slice(), ["Pancakes", ""]);
}

#[test]
fn test_stop_word_list_size() {
    assert_eq!(STOP_WORDS.len(), 174);
}
