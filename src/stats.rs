#[cfg(feature = "serde")]
use serde::Serialize;

use crate::variable::{VariableDefinition, VariableKind};

/// Descriptive metrics over a template and its declared variables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Stats {
    pub variable_count: usize,
    pub text_variable_count: usize,
    pub file_variable_count: usize,
    /// Characters in the template, whitespace included
    pub character_count: usize,
    /// Maximal runs of non-whitespace characters
    pub word_count: usize,
    /// Non-whitespace characters, punctuation included
    pub letter_count: usize,
}

pub fn compute_stats(template: &str, variables: &[VariableDefinition]) -> Stats {
    let count_kind = |kind: VariableKind| variables.iter().filter(|v| v.kind == kind).count();

    Stats {
        variable_count: variables.len(),
        text_variable_count: count_kind(VariableKind::Text),
        file_variable_count: count_kind(VariableKind::File),
        character_count: template.chars().count(),
        word_count: template.split_whitespace().count(),
        letter_count: template.chars().filter(|c| !c.is_whitespace()).count(),
    }
}
