use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Identity of one checklist option, carried in the checkbox `value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValue {
    #[serde(alias = "m", default)]
    pub group_index: usize,
    #[serde(alias = "i", default)]
    pub item_index: usize,
    /// Display text of the item, byte-identical to the option label
    pub text: String,
}

impl OptionValue {
    pub fn new(group_index: usize, item_index: usize, text: impl Into<String>) -> Self {
        Self {
            group_index,
            item_index,
            text: text.into(),
        }
    }

    pub fn encode(&self) -> String {
        // A struct of two integers and a string always serializes
        serde_json::to_string(self).unwrap_or_else(|_| self.text.clone())
    }
}

/// A checkbox value as it comes back from an interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckedValue {
    Encoded(OptionValue),
    /// Value that did not decode; its raw string is the item text
    Literal(String),
}

impl CheckedValue {
    pub fn parse(value: &str) -> Self {
        match serde_json::from_str::<OptionValue>(value) {
            Ok(decoded) => CheckedValue::Encoded(decoded),
            Err(_) => CheckedValue::Literal(value.to_string()),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            CheckedValue::Encoded(value) => &value.text,
            CheckedValue::Literal(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            CheckedValue::Encoded(value) => value.text,
            CheckedValue::Literal(text) => text,
        }
    }
}

/// Item texts considered done for one reduction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckedSet {
    texts: HashSet<String>,
}

impl CheckedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode raw checkbox values into their item texts
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let texts = values
            .into_iter()
            .map(|v| CheckedValue::parse(v.as_ref()).into_text())
            .collect();
        Self { texts }
    }

    pub fn insert(&mut self, text: impl Into<String>) {
        self.texts.insert(text.into());
    }

    pub fn contains(&self, text: &str) -> bool {
        self.texts.contains(text)
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uses_named_fields() {
        let value = OptionValue::new(1, 3, "(me) I'll send it");
        let encoded = value.encode();
        let json: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(json["group_index"], 1);
        assert_eq!(json["item_index"], 3);
        assert_eq!(json["text"], "(me) I'll send it");
    }

    #[test]
    fn test_encoded_text_survives_parse() {
        let text = "(them) can you send \"the\" deck by Friday? \\ ok…";
        let value = OptionValue::new(0, 0, text);
        assert_eq!(CheckedValue::parse(&value.encode()).text(), text);
    }

    #[test]
    fn test_legacy_short_keys() {
        let parsed = CheckedValue::parse(r#"{"m": 2, "i": 0, "text": "(me) follow up with Sam"}"#);
        assert_eq!(
            parsed,
            CheckedValue::Encoded(OptionValue::new(2, 0, "(me) follow up with Sam"))
        );
    }

    #[test]
    fn test_missing_indexes_default_to_zero() {
        let parsed = CheckedValue::parse(r#"{"text":"x"}"#);
        assert_eq!(parsed.text(), "x");
        assert_eq!(parsed, CheckedValue::Encoded(OptionValue::new(0, 0, "x")));
    }

    #[test]
    fn test_unparseable_value_is_literal() {
        assert_eq!(
            CheckedValue::parse("plain item text"),
            CheckedValue::Literal("plain item text".to_string())
        );
        // Valid JSON without a text field is still literal
        assert_eq!(
            CheckedValue::parse(r#"{"group_index": 1}"#).text(),
            r#"{"group_index": 1}"#
        );
    }

    #[test]
    fn test_checked_set_from_values() {
        let set = CheckedSet::from_values([
            OptionValue::new(0, 0, "(me) a").encode(),
            "(them) b".to_string(),
        ]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("(me) a"));
        assert!(set.contains("(them) b"));
        assert!(!set.contains("(me) c"));
    }
}
