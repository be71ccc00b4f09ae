use std::fmt;

use crate::inspection::rules::status::{DefectDimension, DefectStatus};

type Predicate<M> = Box<dyn Fn(&M) -> bool + Send + Sync>;

pub struct DecisionRule<M> {
    predicate: Predicate<M>,
    status: DefectStatus,
}

impl<M> DecisionRule<M> {
    pub fn status(&self) -> DefectStatus {
        self.status
    }

    pub fn matches(&self, metrics: &M) -> bool {
        (self.predicate)(metrics)
    }
}

/// Ordered first-match-wins table over metrics `M`.
pub struct DecisionTable<M> {
    dimension: DefectDimension,
    rules: Vec<DecisionRule<M>>,
    fallback: DefectStatus,
}

impl<M> DecisionTable<M> {
    pub fn new(dimension: DefectDimension, fallback: DefectStatus) -> Self {
        Self {
            dimension,
            rules: Vec::new(),
            fallback,
        }
    }

    /// Appends a rule after the existing ones.
    pub fn rule<F>(mut self, status: DefectStatus, predicate: F) -> Self
    where
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        self.rules.push(DecisionRule {
            predicate: Box::new(predicate),
            status,
        });
        self
    }

    /// Index of the first matching rule, `None` when the fallback applies.
    pub fn matched_rule(&self, metrics: &M) -> Option<usize> {
        self.rules.iter().position(|rule| rule.matches(metrics))
    }

    pub fn evaluate(&self, metrics: &M) -> DefectStatus {
        self.matched_rule(metrics)
            .map_or(self.fallback, |index| self.rules[index].status)
    }

    pub fn dimension(&self) -> DefectDimension {
        self.dimension
    }

    pub fn rules(&self) -> &[DecisionRule<M>] {
        &self.rules
    }

    pub fn fallback(&self) -> DefectStatus {
        self.fallback
    }

    /// Every status the table can produce, rules first, fallback last.
    pub fn statuses(&self) -> impl Iterator<Item = DefectStatus> + '_ {
        self.rules
            .iter()
            .map(|rule| rule.status)
            .chain(std::iter::once(self.fallback))
    }
}

impl<M> fmt::Debug for DecisionTable<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecisionTable")
            .field("dimension", &self.dimension)
            .field(
                "rules",
                &self.rules.iter().map(|r| r.status.label).collect::<Vec<_>>(),
            )
            .field("fallback", &self.fallback.label)
            .finish()
    }
}
