//! Route-pair transition table.

use crate::transition::Transition;

/// Use `transition` when navigating from `from_route` to `to_route`.
#[derive(Debug, Clone)]
pub struct TransitionRule {
    pub from_route: String,
    pub to_route: String,
    pub transition: Transition,
}

impl TransitionRule {
    pub fn new(
        from_route: impl Into<String>,
        to_route: impl Into<String>,
        transition: impl Into<Transition>,
    ) -> Self {
        Self {
            from_route: from_route.into(),
            to_route: to_route.into(),
            transition: transition.into(),
        }
    }

    pub fn matches(&self, from_route: &str, to_route: &str) -> bool {
        self.from_route == from_route && self.to_route == to_route
    }
}

/// Ordered rule table. The first matching rule wins.
#[derive(Debug, Clone, Default)]
pub struct TransitionRules {
    rules: Vec<TransitionRule>,
}

impl TransitionRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, rule: TransitionRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn push(&mut self, rule: TransitionRule) {
        self.rules.push(rule);
    }

    pub fn select(&self, from_route: &str, to_route: &str) -> Option<&Transition> {
        self.rules
            .iter()
            .find(|rule| rule.matches(from_route, to_route))
            .map(|rule| &rule.transition)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<TransitionRule> for TransitionRules {
    fn from_iter<I: IntoIterator<Item = TransitionRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
