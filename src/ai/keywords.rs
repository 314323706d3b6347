//! Heuristic keyword fallback
//!
//! Last-resort label extraction when the model gives a degenerate answer:
//! pick the most frequent non-stopword token of the description, or the first
//! few content words for a filename.

use std::collections::HashMap;

/// Common English stopwords, enough to keep frequency counts meaningful
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "an", "and", "any", "are", "as", "at", "be",
    "because", "been", "before", "being", "below", "between", "both", "but", "by", "can", "did",
    "do", "does", "doing", "down", "during", "each", "few", "for", "from", "further", "had",
    "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how", "i", "if", "in",
    "into", "is", "it", "its", "just", "me", "more", "most", "my", "no", "nor", "not", "now",
    "of", "off", "on", "once", "only", "or", "other", "our", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "very",
    "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will",
    "with", "you", "your",
];

fn is_stopword(word: &str) -> bool {
    STOPWORDS.binary_search(&word).is_ok()
}

/// Lowercased alphabetic tokens of `text`, in order
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

/// Most frequent non-stopword token, earliest occurrence winning ties
pub fn most_frequent_keyword(text: &str) -> Option<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for word in tokenize(text) {
        if is_stopword(&word) {
            continue;
        }
        let count = counts.entry(word.clone()).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }

    let mut best: Option<(String, usize)> = None;
    for word in order {
        let count = counts[&word];
        if best.as_ref().is_none_or(|(_, best_count)| count > *best_count) {
            best = Some((word, count));
        }
    }
    best.map(|(word, _)| word)
}

/// First `n` whitespace-separated words joined with underscores, if any
pub fn first_words(text: &str, n: usize) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().take(n).collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join("_"))
    }
}
