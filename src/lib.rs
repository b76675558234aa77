mod answer;
mod config;
mod error;
pub mod render;
pub mod scanner;
pub mod schema;
mod stats;
mod variable;

use std::borrow::Cow;
use std::ops::Range;

use tracing::debug;

pub use answer::{AnswerProvider, AnswerSet, AnswerValue, FileHandle};
pub use config::{Config, DEFAULT_DELIMITER, DEFAULT_LIST_SEPARATOR};
pub use error::Error;
pub use render::{render, Renderer};
pub use scanner::{
    find_placeholder_references, scan, undeclared_placeholders, unused_variables, Scanner, Segment,
};
pub use schema::{expected_shape, form_fields, validate_answer, FormField, ShapeDescriptor};
pub use stats::{compute_stats, Stats};
pub use variable::{
    ResponseMode, VariableDefinition, VariableDraft, VariableKind, VariableStore, VariableUpdate,
};

/// A prompt template together with its declared variables and the answers
/// collected for them.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    config: Config,
    template: String,
    variables: VariableStore,
    answers: AnswerSet,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            template: String::new(),
            variables: VariableStore::new(),
            answers: AnswerSet::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the template text.
    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    /// Declare a variable from `draft`, resetting the draft on success.
    pub fn add_variable(&mut self, draft: &mut VariableDraft) -> Result<(), Error> {
        self.variables.add_variable(draft)
    }

    pub fn update_variable(&mut self, index: usize, update: VariableUpdate) -> Result<(), Error> {
        self.variables.update_variable(index, update)
    }

    pub fn append_option(&mut self, index: usize, option: impl Into<String>) -> Result<(), Error> {
        self.variables.append_option(index, option)
    }

    pub fn expected_shape(&self, index: usize) -> Result<ShapeDescriptor<'_>, Error> {
        self.variables
            .get(index)
            .map(expected_shape)
            .ok_or(Error::UnknownVariable(index))
    }

    pub fn form_fields(&self) -> Vec<FormField<'_>> {
        form_fields(self.variables.as_slice())
    }

    /// Validate `value` against the variable declared as `name` and store it.
    /// A rejected answer leaves the previous one in place.
    pub fn set_answer(&mut self, name: &str, value: impl Into<AnswerValue>) -> Result<(), Error> {
        let variable = self
            .variables
            .find(name)
            .ok_or_else(|| Error::UnknownName(name.to_string()))?;
        let value = value.into();
        validate_answer(variable, &value, &self.config)?;
        self.answers.insert(name, value);
        Ok(())
    }

    /// Check or uncheck a multi-choice option for `name`.
    ///
    /// Only multi-choice variables accept a toggle, and the resulting
    /// selection is validated like any other answer. On error the previous
    /// answer is left in place.
    pub fn toggle_choice(&mut self, name: &str, option: &str, selected: bool) -> Result<(), Error> {
        let variable = self
            .variables
            .find(name)
            .ok_or_else(|| Error::UnknownName(name.to_string()))?;

        let shape = expected_shape(variable);
        if !matches!(shape, ShapeDescriptor::MultiChoiceOf(_)) {
            return Err(Error::ShapeMismatch {
                name: name.to_string(),
                expected: shape.name(),
                found: "choices",
            });
        }

        let value = AnswerValue::Choices(answer::toggled_selection(
            self.answers.get(name),
            option,
            selected,
        ));
        validate_answer(variable, &value, &self.config)?;
        self.answers.insert(name, value);
        Ok(())
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn clear_answer(&mut self, name: &str) -> Option<AnswerValue> {
        self.answers.remove(name)
    }

    pub fn clear_answers(&mut self) {
        debug!(count = self.answers.len(), "answers cleared");
        self.answers.clear();
    }

    /// Template segments for highlighting.
    pub fn scan(&self) -> Vec<(Segment<'_, '_>, Range<usize>)> {
        Scanner::with_delimiter(
            &self.template,
            self.variables.as_slice(),
            self.config.effective_delimiter(),
        )
            .collect()
    }

    pub fn stats(&self) -> Stats {
        compute_stats(&self.template, self.variables.as_slice())
    }

    /// Placeholder-shaped tokens in the template that name no declared variable.
    pub fn undeclared_placeholders(&self) -> Vec<String> {
        scanner::find_placeholder_references_with(&self.template, self.config.effective_delimiter())
            .into_iter()
            .filter(|name| self.variables.find(name).is_none())
            .collect()
    }

    /// Declared variables the template never mentions.
    pub fn unused_variables(&self) -> Vec<&VariableDefinition> {
        scanner::unused_variables_with(
            &self.template,
            self.variables.as_slice(),
            self.config.effective_delimiter(),
        )
    }

    /// The template with every declared placeholder replaced by its answer.
    pub fn render(&self) -> Cow<'_, str> {
        let renderer = Renderer::new(&self.answers, &self.config);
        renderer.render(&self.template, self.variables.as_slice())
    }
}
