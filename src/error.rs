use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A variable draft is missing one of its required fields
    #[error("Incomplete variable definition: `{field}` is required")]
    IncompleteDefinition { field: &'static str },
    /// A variable with the same name is already declared
    #[error("Variable already declared: {0}")]
    DuplicateName(String),
    /// No variable at the given position
    #[error("No variable at index {0}")]
    UnknownVariable(usize),
    /// No variable declared under the given name
    #[error("No variable named {0}")]
    UnknownName(String),
    /// Submitted answer does not structurally match the expected shape
    #[error("Answer for `{name}` does not match: expected {expected}, found {found}")]
    ShapeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    /// Choice answer not among the declared options (strict mode only)
    #[error("Option `{option}` is not declared for `{name}`")]
    UnknownOption { name: String, option: String },
    /// Label that names no kind or response mode
    #[error("Unknown label: {0}")]
    UnknownLabel(String),
}
