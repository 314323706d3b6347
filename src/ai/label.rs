//! Category-label normalizer
//!
//! Turns the raw text a model emits for the grouped-filename flow into a
//! usable folder label, or rejects it. This is a content filter judging
//! whether the label means anything, not a filesystem sanitizer: it strips
//! known answer prefixes and reserved characters, then requires a readable
//! Hangul label that is not one of the model's "don't know" words.

use regex::Regex;

/// Leading answer markers the models like to prepend, most specific first.
/// Each is stripped at most once.
const PREFIX_PATTERNS: &[&str] = &[
    r"^답을 입력하세요[:：]?\s*",
    r#"^📂.*?\.docx"\s*"#,
    r"^예시 출력[:：]?\s*",
    r"^파일 이름[:：]?\s*",
    r"^답변[:：]?\s*",
    r"^출력[:：]?\s*",
];

/// Lowercased labels that mean "other/unknown" and are useless as folders
const BANNED_LABELS: &[&str] = &["기타", "알 수 없음", "모름", "unknown"];

/// Normalize raw model output into a folder label, or reject it
///
/// Only the first line is considered. Returns `None` when nothing readable is
/// left: no Hangul, empty, a banned generic word, or shorter than two
/// characters after trimming.
pub fn normalize_label(raw: &str) -> Option<String> {
    let mut line = raw.trim().lines().next().unwrap_or("").to_string();

    for pattern in PREFIX_PATTERNS {
        if let Ok(re) = Regex::new(pattern) {
            line = re.replace(&line, "").into_owned();
        }
    }

    line.retain(|c| !matches!(c, '"' | '“' | '”' | '‘' | '’'));
    line.retain(|c| !matches!(c, '\\' | '/' | ':' | '*' | '?' | '<' | '>' | '|'));

    if !line.chars().any(is_hangul) {
        return None;
    }

    let trimmed = line.trim();
    if trimmed.is_empty()
        || BANNED_LABELS.contains(&trimmed.to_lowercase().as_str())
        || trimmed.chars().count() < 2
    {
        return None;
    }

    Some(trimmed.to_string())
}

/// Hangul syllable block (the `가`-`힣` range)
fn is_hangul(c: char) -> bool {
    ('가'..='힣').contains(&c)
}
