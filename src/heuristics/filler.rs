use once_cell::sync::Lazy;

use super::Rule;

/// Acknowledgements and greetings that carry no content on their own
pub const FILLER_WORDS: &[&str] = &[
    "yeah", "yep", "okay", "ok", "cool", "right", "sure", "mhm", "uh huh", "great", "alright",
    "thanks", "bye", "hello", "hi", "hey", "hmm", "huh", "wow", "oh",
];

static FILLER_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let words = FILLER_WORDS.join("|");
    // One or more filler words, separated and followed only by punctuation
    let pattern = format!(r"(?:{words})(?:[.\s!?,]+(?:{words}))*[.\s!?,]*");
    vec![Rule::filler("acknowledgement", &pattern).expect("Invalid regex")]
});

pub fn filler_rules() -> &'static [Rule] {
    &FILLER_RULES
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_filler(text: &str) -> bool {
        filler_rules().iter().any(|r| r.matches(text))
    }

    #[test]
    fn test_single_fillers() {
        for text in ["yeah", "Okay.", "Thanks!", "bye", "uh huh", "Hmm...", "OK?", "wow!!"] {
            assert!(is_filler(text), "{text:?} should be filler");
        }
    }

    #[test]
    fn test_filler_runs() {
        assert!(is_filler("yeah okay"));
        assert!(is_filler("Okay, thanks, bye!"));
        assert!(is_filler("right right right"));
    }

    #[test]
    fn test_filler_is_full_match() {
        assert!(!is_filler("yeah I'll send it"));
        assert!(!is_filler("okay so the plan"));
        assert!(!is_filler("thanksgiving"));
        assert!(!is_filler("hiyeah"));
        assert!(!is_filler(""));
    }
}
