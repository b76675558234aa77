#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::{debug, warn};

use crate::answer::AnswerValue;
use crate::config::Config;
use crate::error::Error;
use crate::variable::{ResponseMode, VariableDefinition, VariableKind};

/// The structure an answer must have to be accepted for a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ShapeDescriptor<'v> {
    FreeText,
    FileUpload,
    SingleChoiceOf(&'v [String]),
    MultiChoiceOf(&'v [String]),
}

impl ShapeDescriptor<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeDescriptor::FreeText => "free text",
            ShapeDescriptor::FileUpload => "file upload",
            ShapeDescriptor::SingleChoiceOf(_) => "single choice",
            ShapeDescriptor::MultiChoiceOf(_) => "multi choice",
        }
    }

    pub fn options(&self) -> &[String] {
        match self {
            ShapeDescriptor::SingleChoiceOf(options) | ShapeDescriptor::MultiChoiceOf(options) => {
                *options
            }
            _ => &[],
        }
    }

    fn accepts(&self, value: &AnswerValue) -> bool {
        matches!(
            (self, value),
            (ShapeDescriptor::FreeText, AnswerValue::Text(_))
                | (ShapeDescriptor::SingleChoiceOf(_), AnswerValue::Text(_))
                | (ShapeDescriptor::FileUpload, AnswerValue::File(_))
                | (ShapeDescriptor::MultiChoiceOf(_), AnswerValue::Choices(_))
        )
    }
}

/// Derive the answer shape from a variable's kind and response mode.
///
/// A file variable with a choice mode has no choice-based contract and is
/// collected as free text.
pub fn expected_shape(variable: &VariableDefinition) -> ShapeDescriptor<'_> {
    match (variable.kind, variable.response_mode) {
        (VariableKind::Text, ResponseMode::FreeResponse) => ShapeDescriptor::FreeText,
        (VariableKind::File, ResponseMode::FreeResponse) => ShapeDescriptor::FileUpload,
        (VariableKind::File, mode) => {
            warn!(name = %variable.name, mode = %mode, "file variable with a choice mode, collecting as free text");
            ShapeDescriptor::FreeText
        }
        (VariableKind::Text, ResponseMode::SingleChoice) => {
            ShapeDescriptor::SingleChoiceOf(&variable.options)
        }
        (VariableKind::Text, ResponseMode::MultiChoice) => {
            ShapeDescriptor::MultiChoiceOf(&variable.options)
        }
    }
}

/// Check that `value` has the structure `variable` expects.
///
/// Choice values are checked against the declared options only when
/// `config.strict_choices` is set.
pub fn validate_answer(
    variable: &VariableDefinition,
    value: &AnswerValue,
    config: &Config,
) -> Result<(), Error> {
    let shape = expected_shape(variable);
    if !shape.accepts(value) {
        debug!(name = %variable.name, expected = shape.name(), found = value.shape_name(), "answer rejected");
        return Err(Error::ShapeMismatch {
            name: variable.name.clone(),
            expected: shape.name(),
            found: value.shape_name(),
        });
    }

    if config.strict_choices {
        let options = shape.options();
        let picked: &[String] = match (&shape, value) {
            (ShapeDescriptor::SingleChoiceOf(_), AnswerValue::Text(s)) => std::slice::from_ref(s),
            (ShapeDescriptor::MultiChoiceOf(_), AnswerValue::Choices(c)) => c,
            _ => &[],
        };
        if let Some(unknown) = picked.iter().find(|p| !options.contains(*p)) {
            return Err(Error::UnknownOption {
                name: variable.name.clone(),
                option: unknown.clone(),
            });
        }
    }

    Ok(())
}

/// One question of the answer-collection form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FormField<'v> {
    pub name: &'v str,
    pub label: &'v str,
    pub shape: ShapeDescriptor<'v>,
}

/// The collection form for `variables`, one field per variable in
/// declaration order.
pub fn form_fields(variables: &[VariableDefinition]) -> Vec<FormField<'_>> {
    variables
        .iter()
        .map(|variable| FormField {
            name: &variable.name,
            label: &variable.prompt,
            shape: expected_shape(variable),
        })
        .collect()
}
