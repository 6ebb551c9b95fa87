//! Action rules and best-match lookup.
//!
//! A rule fires for an exact action verb and may narrow itself by acting
//! identity and by supplement text (exact or regex). When several rules
//! admit the same input the most specific one wins: an identity filter is
//! worth 2, a supplement filter is worth 1, and ties go to the rule that
//! appears first.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lenient;
use crate::player::normalize_identity;

/// A rule as written in the data file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDefinition {
    /// Action verb the rule responds to.
    #[serde(default)]
    pub action: String,
    /// Only this identity may trigger the rule.
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub identity: Option<String>,
    /// Exact supplement text required.
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub supplement: Option<String>,
    /// Regular expression the supplement must match somewhere.
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub supplement_pattern: Option<String>,
    /// MP delta.
    #[serde(default, deserialize_with = "lenient::integer")]
    pub mp: i64,
    /// CRED delta.
    #[serde(default, deserialize_with = "lenient::integer")]
    pub cred: i64,
    /// Narrative message.
    #[serde(default)]
    pub msg: String,
    /// Presentation effect name.
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub effect: Option<String>,
}

/// How a rule constrains the supplement.
#[derive(Debug, Clone)]
pub enum SupplementFilter {
    /// No constraint.
    Any,
    /// Supplement must equal this text.
    Exact(String),
    /// Supplement must contain a match of this pattern.
    Pattern(Regex),
    /// Supplement must equal `exact` and also contain a match of `pattern`.
    Both {
        /// Required text.
        exact: String,
        /// Pattern the same text must match.
        pattern: Regex,
    },
    /// The pattern failed to compile; the rule never matches.
    Broken {
        /// Source pattern.
        pattern: String,
        /// Compilation error.
        error: String,
    },
}

impl SupplementFilter {
    /// Build a filter from the data-file fields. When both are given the
    /// supplement has to pass both. A pattern that does not compile yields
    /// [`SupplementFilter::Broken`] whether or not exact text is set.
    pub fn compile(exact: Option<&str>, pattern: Option<&str>) -> Self {
        let Some(pattern) = pattern else {
            return exact.map_or(Self::Any, |text| Self::Exact(text.to_string()));
        };
        match (exact, Regex::new(pattern)) {
            (_, Err(e)) => Self::Broken {
                pattern: pattern.to_string(),
                error: e.to_string(),
            },
            (Some(text), Ok(re)) => Self::Both {
                exact: text.to_string(),
                pattern: re,
            },
            (None, Ok(re)) => Self::Pattern(re),
        }
    }

    /// Whether a (trimmed) supplement passes the filter.
    pub fn matches(&self, supplement: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(text) => text == supplement,
            Self::Pattern(re) => re.is_match(supplement),
            Self::Both { exact, pattern } => exact == supplement && pattern.is_match(supplement),
            Self::Broken { .. } => false,
        }
    }

    /// Whether the filter narrows the rule.
    pub fn is_specific(&self) -> bool {
        !matches!(self, Self::Any)
    }
}

/// A compiled, immutable action rule.
#[derive(Debug, Clone)]
pub struct ActionRule {
    /// Action verb, matched exactly.
    pub action: String,
    /// Normalized identity filter.
    pub identity: Option<String>,
    /// Supplement filter.
    pub supplement: SupplementFilter,
    /// MP delta.
    pub mp: i64,
    /// CRED delta.
    pub cred: i64,
    /// Narrative message.
    pub msg: String,
    /// Presentation effect name.
    pub effect: Option<String>,
}

impl ActionRule {
    /// Compile a definition. Returns `None` when the action is blank.
    pub fn compile(def: &RuleDefinition) -> Option<Self> {
        let action = def.action.trim();
        if action.is_empty() {
            return None;
        }
        Some(Self {
            action: action.to_string(),
            identity: def
                .identity
                .as_deref()
                .map(normalize_identity)
                .filter(|id| !id.is_empty()),
            supplement: SupplementFilter::compile(
                def.supplement.as_deref(),
                def.supplement_pattern.as_deref(),
            ),
            mp: def.mp,
            cred: def.cred,
            msg: def.msg.clone(),
            effect: def.effect.clone(),
        })
    }

    /// Whether the rule accepts this identity and supplement.
    pub fn admits(&self, identity: &str, supplement: &str) -> bool {
        self.identity.as_deref().is_none_or(|id| id == identity) && self.supplement.matches(supplement)
    }

    /// Specificity score used to rank competing rules.
    pub fn specificity(&self) -> u8 {
        let identity = if self.identity.is_some() { 2 } else { 0 };
        let supplement = u8::from(self.supplement.is_specific());
        identity + supplement
    }
}

/// Ordered list of compiled rules.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    rules: Vec<ActionRule>,
}

impl RuleStore {
    /// Create a store from compiled rules, keeping their order.
    pub fn new(rules: Vec<ActionRule>) -> Self {
        Self { rules }
    }

    /// Compile definitions, silently skipping those without an action.
    pub fn from_definitions<'a>(defs: impl IntoIterator<Item = &'a RuleDefinition>) -> Self {
        Self::new(defs.into_iter().filter_map(ActionRule::compile).collect())
    }

    /// All rules in load order.
    pub fn rules(&self) -> &[ActionRule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Distinct action verbs in first-seen order.
    pub fn actions(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !seen.contains(&rule.action.as_str()) {
                seen.push(&rule.action);
            }
        }
        seen
    }

    /// Find the most specific rule for a normalized identity, trimmed action
    /// and trimmed supplement.
    pub fn find_best(&self, identity: &str, action: &str, supplement: &str) -> Option<&ActionRule> {
        let mut best: Option<(&ActionRule, u8)> = None;
        for rule in self.rules.iter().filter(|r| r.action == action) {
            if !rule.admits(identity, supplement) {
                continue;
            }
            let score = rule.specificity();
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((rule, score));
            }
        }
        match best {
            Some((rule, score)) => {
                tracing::debug!(action, identity, score, "rule matched");
                Some(rule)
            }
            None => {
                tracing::debug!(action, identity, "no rule matched");
                None
            }
        }
    }
}
