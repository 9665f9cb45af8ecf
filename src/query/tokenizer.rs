use super::stopwords::is_stop_word;

/// Characters removed from every word, wherever they appear
const STRIPPED_PUNCTUATION: [char; 4] = ['.', ',', '!', '?'];

/// Lower-case and split a raw query into words, stripping punctuation.
/// Words left empty by the stripping are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|word| word.replace(STRIPPED_PUNCTUATION, ""))
        .filter(|word| !word.is_empty())
        .collect()
}

/// Remove stop words, keeping the relative order of the rest
pub fn remove_stop_words(tokens: Vec<String>) -> Vec<String> {
    tokens
        .into_iter()
        .filter(|token| !is_stop_word(token))
        .collect()
}
