use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;

/// How a variable's value is materialized when substituted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VariableKind {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "string", alias = "text"))]
    Text,
    #[cfg_attr(feature = "serde", serde(rename = "file"))]
    File,
}

impl VariableKind {
    pub fn label(self) -> &'static str {
        match self {
            VariableKind::Text => "string",
            VariableKind::File => "file",
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VariableKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" | "text" => Ok(VariableKind::Text),
            "file" => Ok(VariableKind::File),
            other => Err(Error::UnknownLabel(other.to_string())),
        }
    }
}

/// How a variable's value is collected from the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ResponseMode {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "free response"))]
    FreeResponse,
    /// Exactly one of the options (`multiple choice` in form labels)
    #[cfg_attr(feature = "serde", serde(rename = "multiple choice"))]
    SingleChoice,
    /// Any subset of the options, in selection order
    #[cfg_attr(feature = "serde", serde(rename = "multi choice"))]
    MultiChoice,
}

impl ResponseMode {
    pub fn label(self) -> &'static str {
        match self {
            ResponseMode::FreeResponse => "free response",
            ResponseMode::SingleChoice => "multiple choice",
            ResponseMode::MultiChoice => "multi choice",
        }
    }

    pub fn is_choice(self) -> bool {
        !matches!(self, ResponseMode::FreeResponse)
    }
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ResponseMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free response" => Ok(ResponseMode::FreeResponse),
            "multiple choice" => Ok(ResponseMode::SingleChoice),
            "multi choice" => Ok(ResponseMode::MultiChoice),
            other => Err(Error::UnknownLabel(other.to_string())),
        }
    }
}

/// A declared template variable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariableDefinition {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: VariableKind,
    #[cfg_attr(feature = "serde", serde(rename = "question"))]
    pub prompt: String,
    #[cfg_attr(feature = "serde", serde(rename = "responseType"))]
    pub response_mode: ResponseMode,
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Vec<String>,
}

impl VariableDefinition {
    /// A file variable collected through a choice list. Representable, but
    /// answers for it are collected as free text.
    pub fn is_file_choice(&self) -> bool {
        self.kind == VariableKind::File && self.response_mode.is_choice()
    }
}

/// A variable being edited before it is added to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDraft {
    pub name: String,
    pub kind: Option<VariableKind>,
    pub prompt: String,
    pub response_mode: ResponseMode,
    pub options: Vec<String>,
}

impl Default for VariableDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: Some(VariableKind::Text),
            prompt: String::new(),
            response_mode: ResponseMode::FreeResponse,
            options: Vec::new(),
        }
    }
}

impl VariableDraft {
    pub fn new(name: impl Into<String>, kind: VariableKind, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_response_mode(mut self, mode: ResponseMode) -> Self {
        self.response_mode = mode;
        self
    }

    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    fn missing_field(&self) -> Option<&'static str> {
        if self.name.is_empty() {
            Some("name")
        } else if self.kind.is_none() {
            Some("kind")
        } else if self.prompt.is_empty() {
            Some("prompt")
        } else {
            None
        }
    }
}

/// A single-field edit applied to a declared variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableUpdate {
    SetName(String),
    SetKind(VariableKind),
    SetPrompt(String),
    SetResponseMode(ResponseMode),
}

/// Ordered list of declared variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableStore {
    variables: Vec<VariableDefinition>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
        }
    }

    /// Validate `draft` and append it. On success the draft is reset to its
    /// defaults; on failure both the draft and the store are left untouched.
    pub fn add_variable(&mut self, draft: &mut VariableDraft) -> Result<(), Error> {
        if let Some(field) = draft.missing_field() {
            return Err(Error::IncompleteDefinition { field });
        }
        if self.find(&draft.name).is_some() {
            return Err(Error::DuplicateName(draft.name.clone()));
        }

        let VariableDraft {
            name,
            kind,
            prompt,
            response_mode,
            options,
        } = std::mem::take(draft);

        debug!(name = %name, kind = %kind.unwrap_or_default(), mode = %response_mode, "variable added");
        self.variables.push(VariableDefinition {
            name,
            kind: kind.unwrap_or_default(),
            prompt,
            response_mode,
            options,
        });
        Ok(())
    }

    /// Replace a single field of the variable at `index`. Nothing is
    /// re-validated, so an edit may leave the definition incomplete.
    pub fn update_variable(&mut self, index: usize, update: VariableUpdate) -> Result<(), Error> {
        let variable = self.get_mut(index)?;
        match update {
            VariableUpdate::SetName(name) => variable.name = name,
            VariableUpdate::SetKind(kind) => variable.kind = kind,
            VariableUpdate::SetPrompt(prompt) => variable.prompt = prompt,
            VariableUpdate::SetResponseMode(mode) => variable.response_mode = mode,
        }
        Ok(())
    }

    /// Append a choice to the variable at `index`. Duplicates are kept.
    pub fn append_option(&mut self, index: usize, option: impl Into<String>) -> Result<(), Error> {
        self.get_mut(index)?.options.push(option.into());
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&VariableDefinition> {
        self.variables.get(index)
    }

    /// First variable declared under `name`.
    pub fn find(&self, name: &str) -> Option<&VariableDefinition> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VariableDefinition> {
        self.variables.iter()
    }

    pub fn as_slice(&self) -> &[VariableDefinition] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut VariableDefinition, Error> {
        self.variables
            .get_mut(index)
            .ok_or(Error::UnknownVariable(index))
    }
}

impl<'a> IntoIterator for &'a VariableStore {
    type Item = &'a VariableDefinition;
    type IntoIter = std::slice::Iter<'a, VariableDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.variables.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_reports_first_gap() {
        let mut draft = VariableDraft::default();
        assert_eq!(draft.missing_field(), Some("name"));
        draft.name = "topic".into();
        draft.kind = None;
        assert_eq!(draft.missing_field(), Some("kind"));
        draft.kind = Some(VariableKind::File);
        assert_eq!(draft.missing_field(), Some("prompt"));
        draft.prompt = "Which file?".into();
        assert_eq!(draft.missing_field(), None);
    }

    #[test]
    fn labels_round_trip_through_from_str() {
        for kind in [VariableKind::Text, VariableKind::File] {
            assert_eq!(kind.label().parse::<VariableKind>().unwrap(), kind);
        }
        for mode in [
            ResponseMode::FreeResponse,
            ResponseMode::SingleChoice,
            ResponseMode::MultiChoice,
        ] {
            assert_eq!(mode.to_string().parse::<ResponseMode>().unwrap(), mode);
        }
        assert_eq!(
            "dropdown".parse::<ResponseMode>(),
            Err(Error::UnknownLabel("dropdown".into()))
        );
    }
}
