//! Reading dictionary word lists.

use std::io::BufRead;

use crate::Result;

/// Cleans up one dictionary entry.
///
/// Surrounding whitespace and double quotes are dropped and the word is
/// lowercased. Returns `None` for empty entries and for entries containing
/// anything other than letters.
///
/// # Examples
///
/// ```rust
/// use wordly_solver::words::normalize;
///
/// assert_eq!(normalize(" \"Crane\"\n").as_deref(), Some("crane"));
/// assert_eq!(normalize("Ёжик").as_deref(), Some("ёжик"));
/// assert_eq!(normalize("x-ray"), None);
/// assert_eq!(normalize("  "), None);
/// ```
pub fn normalize(line: &str) -> Option<String> {
    let word = line.trim().replace('"', "").to_lowercase();
    if !word.is_empty() && word.chars().all(char::is_alphabetic) {
        Some(word)
    } else {
        None
    }
}

/// Reads one word per line, keeping the entries that survive
/// [`normalize()`].
pub fn read_words<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// Like [`read_words()`], keeping only words of `length` letters.
pub fn read_words_of_length<R: BufRead>(reader: R, length: usize) -> Result<Vec<String>> {
    let mut words = read_words(reader)?;
    words.retain(|w| w.chars().count() == length);
    Ok(words)
}
