use once_cell::sync::Lazy;

use super::Rule;

/// "I'll", "I'm going to", "I'm gonna", with either apostrophe
const FIRST_PERSON_FUTURE: &str = r"\bi['’](?:ll|m going to|m gonna)";

/// Commitment signals. The phrase rules only fire when followed by one of
/// their action verbs.
fn signal_patterns() -> Vec<(&'static str, String)> {
    vec![
        (
            "first_person_future",
            format!(
                r"{FIRST_PERSON_FUTURE}\s+(?:send|email|share|follow up|reach out|schedule|set up|finalize|work on|handle|talk to|ping|create|draft|write|build|update|put together|coordinate|own that)"
            ),
        ),
        (
            "first_person_obligation",
            r"\bi need to\s+(?:send|email|share|follow up|reach out|schedule|set up|finalize|work on|handle|talk to|figure out|check|get|do|run|update)".to_string(),
        ),
        (
            "team_obligation",
            r"\bwe need to\s+(?:send|email|share|follow up|reach out|schedule|set up|finalize|work on|handle|figure out|check|get|do|rebalance|reduce|pick|redesign|negotiate)".to_string(),
        ),
        (
            "direct_request",
            r"\bcan you\s+(?:send|email|share|follow up|reach out|schedule|set up|get us|check|do|create|draft|handle|research|put)".to_string(),
        ),
        (
            "deadline",
            r"\bby (?:end of (?:day|week)|monday|tuesday|wednesday|thursday|friday|next week|tomorrow|tonight|eod|eow)\b".to_string(),
        ),
        ("action_item_marker", r"\baction item\b".to_string()),
        (
            "next_step_marker",
            r"\bnext steps?\s+(?:is|are|on|here|for)\b".to_string(),
        ),
        ("follow_up_marker", r"\bfollow[- ]?up (?:with|on)\b".to_string()),
    ]
}

/// Phrases shaped like a commitment that describe what the speaker is doing
/// on the call rather than work to be done.
fn noise_patterns() -> Vec<(&'static str, String)> {
    vec![
        (
            "leaving_call",
            r"\bi need to (?:run|go|hop|jump|leave|mute|drop)\b".to_string(),
        ),
        (
            "thinking_aloud",
            r"\blet me (?:see|show|think|check|look|pull up|share my screen)\b".to_string(),
        ),
        (
            "hedged_intent",
            format!(r"{FIRST_PERSON_FUTURE} (?:be |try |just )"),
        ),
    ]
}

static SIGNAL_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    signal_patterns()
        .into_iter()
        .map(|(name, pattern)| Rule::signal(name, &pattern).expect("Invalid regex"))
        .collect()
});

static NOISE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    noise_patterns()
        .into_iter()
        .map(|(name, pattern)| Rule::noise(name, &pattern).expect("Invalid regex"))
        .collect()
});

pub fn signal_rules() -> &'static [Rule] {
    &SIGNAL_RULES
}

pub fn noise_rules() -> &'static [Rule] {
    &NOISE_RULES
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(text: &str) -> Option<&'static str> {
        signal_rules()
            .iter()
            .find(|r| r.matches(text))
            .map(|r| r.name())
    }

    fn noise(text: &str) -> Option<&'static str> {
        noise_rules()
            .iter()
            .find(|r| r.matches(text))
            .map(|r| r.name())
    }

    #[test]
    fn test_signal_categories() {
        assert_eq!(signal("I'll send the proposal"), Some("first_person_future"));
        assert_eq!(signal("I’m going to draft the memo"), Some("first_person_future"));
        assert_eq!(signal("I need to update the forecast"), Some("first_person_obligation"));
        assert_eq!(signal("We need to negotiate the rate"), Some("team_obligation"));
        assert_eq!(signal("Can you research the vendors?"), Some("direct_request"));
        assert_eq!(signal("let's have it done by EOD"), Some("deadline"));
        assert_eq!(signal("That's an action item for the team"), Some("action_item_marker"));
        assert_eq!(signal("Next steps are pretty clear"), Some("next_step_marker"));
        assert_eq!(signal("let's follow-up on pricing"), Some("follow_up_marker"));
    }

    #[test]
    fn test_signals_require_action_verb() {
        assert_eq!(signal("I'll think about it"), None);
        assert_eq!(signal("we need to talk more"), None);
        assert_eq!(signal("can you hear me"), None);
        assert_eq!(signal("by the way"), None);
        assert_eq!(signal("the fridays are slow"), None);
    }

    #[test]
    fn test_deadline_is_whole_word() {
        assert_eq!(signal("by fridayish"), None);
        assert_eq!(signal("by Friday."), Some("deadline"));
    }

    #[test]
    fn test_noise_patterns() {
        assert_eq!(noise("I need to run to another meeting"), Some("leaving_call"));
        assert_eq!(noise("I need to drop, sorry"), Some("leaving_call"));
        assert_eq!(noise("let me share my screen"), Some("thinking_aloud"));
        assert_eq!(noise("I'll just send it later"), Some("hedged_intent"));
        // Precision over recall: any "need to run" reads as leaving the call
        assert_eq!(noise("I need to run the numbers"), Some("leaving_call"));
        assert_eq!(noise("I need to running"), None);
        assert_eq!(noise("I'll send the deck"), None);
    }
}
