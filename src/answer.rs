use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An uploaded file as handed over by the collection surface.
///
/// Only the display name is ever substituted; the bytes are carried so two
/// handles can be told apart.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FileHandle {
    name: String,
    bytes: Vec<u8>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn display_name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// A collected answer, by structural shape.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AnswerValue {
    /// Free text, or the single selection of a single-choice variable
    Text(String),
    File(FileHandle),
    /// Multi-choice selections in the order they were picked
    Choices(Vec<String>),
}

impl AnswerValue {
    pub fn shape_name(&self) -> &'static str {
        match self {
            AnswerValue::Text(_) => "text",
            AnswerValue::File(_) => "file",
            AnswerValue::Choices(_) => "choices",
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

impl From<FileHandle> for AnswerValue {
    fn from(file: FileHandle) -> Self {
        AnswerValue::File(file)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(choices: Vec<String>) -> Self {
        AnswerValue::Choices(choices)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(choices: Vec<&str>) -> Self {
        AnswerValue::Choices(choices.into_iter().map(String::from).collect())
    }
}

/// A trait for looking up collected answers during rendering.
pub trait AnswerProvider {
    /// Retrieve the answer collected for a variable, if any.
    fn get_answer(&self, name: &str) -> Option<&AnswerValue>;
}

impl AnswerProvider for HashMap<String, AnswerValue> {
    fn get_answer(&self, name: &str) -> Option<&AnswerValue> {
        self.get(name)
    }
}

impl AnswerProvider for HashMap<&str, AnswerValue> {
    fn get_answer(&self, name: &str) -> Option<&AnswerValue> {
        self.get(name)
    }
}

/// Answers collected so far, keyed by variable name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AnswerSet {
    answers: HashMap<String, AnswerValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
        }
    }

    /// Insert or overwrite the answer for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AnswerValue>) {
        self.answers.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&AnswerValue> {
        self.answers.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<AnswerValue> {
        self.answers.remove(name)
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Check or uncheck one option of a multi-choice answer.
    ///
    /// Selecting appends to the end of the current selection; deselecting
    /// removes every entry equal to `option`. A non-list answer is replaced by
    /// a fresh selection.
    ///
    /// Selections are tracked by option text, not position: when a variable
    /// declares the same option text twice, selecting it yields a single
    /// entry rather than one per duplicate.
    pub fn toggle_choice(&mut self, name: &str, option: &str, selected: bool) {
        let choices = toggled_selection(self.answers.get(name), option, selected);
        self.answers
            .insert(name.to_string(), AnswerValue::Choices(choices));
    }
}

/// The selection that results from toggling `option` on `current`.
pub(crate) fn toggled_selection(
    current: Option<&AnswerValue>,
    option: &str,
    selected: bool,
) -> Vec<String> {
    let mut choices = match current {
        Some(AnswerValue::Choices(choices)) => choices.clone(),
        _ => Vec::new(),
    };
    if selected {
        if !choices.iter().any(|c| c == option) {
            choices.push(option.to_string());
        }
    } else {
        choices.retain(|c| c != option);
    }
    choices
}

impl AnswerProvider for AnswerSet {
    fn get_answer(&self, name: &str) -> Option<&AnswerValue> {
        self.answers.get(name)
    }
}

impl<K: Into<String>, V: Into<AnswerValue>> FromIterator<(K, V)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            answers: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
