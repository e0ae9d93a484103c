use std::collections::HashSet;

use crate::core::WordResult;

/// Reduce a word or transcript to bare comparable tokens: lowercase, keep
/// only word characters and whitespace, drop apostrophes ("Don't!" and
/// "dont" compare equal).
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}

/// Compare a spoken transcript against the reference sentence, word by
/// word. Output is aligned to the reference: one entry per original word,
/// verbatim and in order. The transcript is treated as a set of normalized
/// tokens, so word order and repetition in speech never penalize.
pub fn compare_pronunciation(original_text: &str, spoken_text: &str) -> Vec<WordResult> {
    let spoken_normalized = normalize(spoken_text);
    let spoken_words: HashSet<&str> = spoken_normalized.split_whitespace().collect();

    original_text
        .split_whitespace()
        .map(|word| WordResult {
            word: word.to_string(),
            is_correct: spoken_words.contains(normalize(word).as_str()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(original: &str, spoken: &str) -> Vec<bool> {
        compare_pronunciation(original, spoken).iter().map(|r| r.is_correct).collect()
    }

    #[test]
    fn test_output_aligned_to_reference() {
        let results = compare_pronunciation("The quick brown fox", "quick fox the brown");
        let words: Vec<&str> = results.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["The", "quick", "brown", "fox"]);
        assert!(results.iter().all(|r| r.is_correct));
    }

    #[test]
    fn test_order_insensitive_in_transcript() {
        assert_eq!(flags("red ball", "ball red"), flags("red ball", "red ball"));
        assert_eq!(flags("red ball", "ball red"), vec![true, true]);
    }

    #[test]
    fn test_punctuation_and_case_insensitive() {
        assert_eq!(flags("Hello, World!", "hello world"), vec![true, true]);
        assert_eq!(flags("don't stop", "dont stop"), vec![true, true]);
    }

    #[test]
    fn test_partial_match() {
        assert_eq!(flags("the quick brown fox", "the brown fox"), vec![true, false, true, true]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(compare_pronunciation("", "whatever").is_empty());
        assert!(compare_pronunciation("   ", "whatever").is_empty());
        assert_eq!(flags("cat", ""), vec![false]);
    }

    #[test]
    fn test_repetition_in_speech_is_harmless() {
        assert_eq!(flags("cat dog", "cat cat cat dog"), vec![true, true]);
    }
}
