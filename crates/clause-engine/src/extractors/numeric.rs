// Numeric extraction: percentages and currency amounts that often signal penalties
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PERCENTAGE_PATTERN: Regex = Regex::new(r"\d+(?:\.\d+)?\s*%").unwrap();

    static ref AMOUNT_PATTERN: Regex =
        Regex::new(r"(?:\$|USD)\s*(\d+(?:,\d+)*(?:\.\d+)?)").unwrap();
}

/// Every percentage literal in the text, as written, in order of appearance
pub fn extract_percentages(text: &str) -> Vec<String> {
    PERCENTAGE_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// The numeric part of every `$` or `USD` amount, in order of appearance
pub fn extract_amounts(text: &str) -> Vec<String> {
    AMOUNT_PATTERN
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
