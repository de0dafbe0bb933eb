//! Text helpers shared by the classifiers and the compliance rules.

/// Lowercased word tokens. Apostrophes stay inside words (`don't`, `i'm`).
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .map(|w| w.trim_matches(|c| c == '\'' || c == '\u{2019}'))
        .filter(|w| !w.is_empty())
        .map(|w| w.replace('\u{2019}', "'").to_lowercase())
        .collect()
}

const INFLECTIONS: [&str; 6] = ["s", "es", "d", "ed", "ing", "ly"];

/// Whether `token` is `word` or a plain inflection of it (`guarantee` → `guaranteed`).
///
/// Words shorter than four characters only match exactly, so `hi` never matches `his`.
pub fn word_matches(token: &str, word: &str) -> bool {
    if token == word {
        return true;
    }
    if word.chars().count() < 4 {
        return false;
    }
    token
        .strip_prefix(word)
        .is_some_and(|suffix| INFLECTIONS.contains(&suffix))
}

/// Whether `tokens` contains `phrase` as a contiguous run of words.
pub fn contains_phrase(tokens: &[String], phrase: &str) -> bool {
    let words = tokenize(phrase);
    if words.is_empty() || words.len() > tokens.len() {
        return false;
    }
    tokens
        .windows(words.len())
        .any(|window| window.iter().zip(&words).all(|(t, w)| word_matches(t, w)))
}
