/// Punctuation split off the end of a word into a token of its own.
const DETACHED: &[char] = &[
    '.', ',', '!', '?', ';', ':', '。', '，', '！', '？', '；', '：',
];

/// Split a sentence into the word tokens used by the click, drag and gap modes.
///
/// Words are separated on whitespace and trailing sentence punctuation becomes
/// its own token, so `"doesn't give change."` yields
/// `["doesn't", "give", "change", "."]`. Apostrophes and inner hyphens stay
/// inside the word.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    for raw in text.split_whitespace() {
        let core = raw.trim_end_matches(DETACHED);
        let tail = &raw[core.len()..];
        if !core.is_empty() {
            words.push(core.to_string());
        }
        if !tail.is_empty() {
            words.push(tail.to_string());
        }
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_trailing_period() {
        assert_eq!(
            tokenize("The driver doesn't give change."),
            vec!["The", "driver", "doesn't", "give", "change", "."]
        );
    }

    #[test]
    fn keeps_runs_of_punctuation_together() {
        assert_eq!(tokenize("Wait... what?!"), vec!["Wait", "...", "what", "?!"]);
    }

    #[test]
    fn standalone_punctuation_is_one_token() {
        assert_eq!(tokenize("yes , no"), vec!["yes", ",", "no"]);
    }

    #[test]
    fn full_width_punctuation_is_detached() {
        assert_eq!(tokenize("好的。"), vec!["好的", "。"]);
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t ").is_empty());
    }
}
