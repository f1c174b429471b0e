//! Condition table for one study.

use std::collections::BTreeSet;

use escape_model::{Condition, StudyMetadata};

/// Validated conditions of one study in metadata file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionTable {
    conditions: Vec<Condition>,
}

impl ConditionTable {
    pub fn new(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.iter()
    }

    /// Identifiers of all conditions.
    pub fn ids(&self) -> BTreeSet<&str> {
        self.conditions.iter().map(|c| c.id.as_str()).collect()
    }

    /// Positions of every entry whose identifier equals `id`.
    pub fn positions(&self, id: &str) -> Vec<usize> {
        self.conditions
            .iter()
            .enumerate()
            .filter(|(_, condition)| condition.id == id)
            .map(|(position, _)| position)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Builds the ordered condition table of a validated study.
pub fn resolve_conditions(metadata: &StudyMetadata) -> ConditionTable {
    ConditionTable::new(metadata.conditions.clone())
}
