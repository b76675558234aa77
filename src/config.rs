#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_DELIMITER: &str = "%%";
pub const DEFAULT_LIST_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Marker placed on both sides of a variable name (`%%name%%`). An empty
    /// delimiter falls back to `%%`.
    pub delimiter: String,
    /// Joins the selections of a multi-choice answer
    pub list_separator: String,
    /// Reject choice answers that are not among the variable's options
    pub strict_choices: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            list_separator: DEFAULT_LIST_SEPARATOR.to_string(),
            strict_choices: false,
        }
    }
}

impl Config {
    /// The delimiter in effect; bare names are never placeholders.
    pub fn effective_delimiter(&self) -> &str {
        if self.delimiter.is_empty() {
            DEFAULT_DELIMITER
        } else {
            &self.delimiter
        }
    }

    /// The literal placeholder text for `name`.
    pub fn placeholder(&self, name: &str) -> String {
        placeholder(self.effective_delimiter(), name)
    }
}

pub(crate) fn placeholder(delimiter: &str, name: &str) -> String {
    let delimiter = if delimiter.is_empty() {
        DEFAULT_DELIMITER
    } else {
        delimiter
    };
    let mut s = String::with_capacity(name.len() + delimiter.len() * 2);
    s.push_str(delimiter);
    s.push_str(name);
    s.push_str(delimiter);
    s
}
