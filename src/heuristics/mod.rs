pub mod commitments;
pub mod filler;

pub use commitments::*;
pub use filler::*;

use std::borrow::Cow;

use regex::Regex;

/// Role a rule plays in the classification policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Whole utterance is an acknowledgement; never actionable
    Filler,
    /// Lexical signal of a promise, obligation, request or deadline
    Signal,
    /// Looks like a signal but is not actionable; vetoes signals
    Noise,
}

/// A named, case-insensitive pattern in the classification policy
#[derive(Debug, Clone)]
pub struct Rule {
    kind: RuleKind,
    name: Cow<'static, str>,
    pattern: Regex,
}

impl Rule {
    /// Filler rules must match the entire utterance
    pub fn filler(name: impl Into<Cow<'static, str>>, pattern: &str) -> Result<Self, regex::Error> {
        Self::compile(RuleKind::Filler, name, &format!("^(?:{pattern})$"))
    }

    pub fn signal(name: impl Into<Cow<'static, str>>, pattern: &str) -> Result<Self, regex::Error> {
        Self::compile(RuleKind::Signal, name, pattern)
    }

    pub fn noise(name: impl Into<Cow<'static, str>>, pattern: &str) -> Result<Self, regex::Error> {
        Self::compile(RuleKind::Noise, name, pattern)
    }

    fn compile(
        kind: RuleKind,
        name: impl Into<Cow<'static, str>>,
        pattern: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            kind,
            name: name.into(),
            pattern: Regex::new(&format!("(?i){pattern}"))?,
        })
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Outcome of classifying one utterance, naming the rule(s) that decided it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<'a> {
    Filler { rule: &'a str },
    Commitment { signal: &'a str },
    Suppressed { signal: &'a str, noise: &'a str },
    NoSignal,
}

impl Verdict<'_> {
    pub fn is_actionable(&self) -> bool {
        matches!(self, Verdict::Commitment { .. })
    }
}

/// Ordered policy table deciding whether an utterance is a commitment
///
/// Evaluation order:
/// 1. Any filler rule matching the whole utterance → not actionable
/// 2. No signal rule found anywhere in the utterance → not actionable
/// 3. A noise rule also matching → not actionable
/// 4. Otherwise actionable
#[derive(Debug, Clone)]
pub struct CommitmentClassifier {
    rules: Vec<Rule>,
}

impl Default for CommitmentClassifier {
    fn default() -> Self {
        let rules = filler_rules()
            .iter()
            .chain(signal_rules())
            .chain(noise_rules())
            .cloned()
            .collect();
        Self { rules }
    }
}

impl CommitmentClassifier {
    /// A classifier with no rules; nothing is actionable
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule to the policy
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    fn first_match(&self, kind: RuleKind, text: &str) -> Option<&str> {
        self.rules
            .iter()
            .filter(|r| r.kind == kind)
            .find(|r| r.matches(text))
            .map(Rule::name)
    }

    pub fn classify(&self, text: &str) -> Verdict<'_> {
        if let Some(rule) = self.first_match(RuleKind::Filler, text) {
            return Verdict::Filler { rule };
        }
        let Some(signal) = self.first_match(RuleKind::Signal, text) else {
            return Verdict::NoSignal;
        };
        match self.first_match(RuleKind::Noise, text) {
            Some(noise) => Verdict::Suppressed { signal, noise },
            None => Verdict::Commitment { signal },
        }
    }

    pub fn is_filler(&self, text: &str) -> bool {
        self.first_match(RuleKind::Filler, text).is_some()
    }

    pub fn is_actionable(&self, text: &str) -> bool {
        self.classify(text).is_actionable()
    }
}
