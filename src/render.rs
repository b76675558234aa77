use std::borrow::Cow;
use std::collections::HashMap;

use memchr::memmem;
use tracing::{debug, trace};

use crate::answer::{AnswerProvider, AnswerValue};
use crate::config::Config;
use crate::variable::VariableDefinition;

struct OverlayProvider<'a, P: AnswerProvider + ?Sized> {
    base: &'a P,
    overlay: &'a HashMap<String, AnswerValue>,
}

impl<'a, P: AnswerProvider + ?Sized> AnswerProvider for OverlayProvider<'a, P> {
    fn get_answer(&self, name: &str) -> Option<&AnswerValue> {
        self.overlay.get(name).or_else(|| self.base.get_answer(name))
    }
}

/// Substitutes collected answers into a template.
pub struct Renderer<'a> {
    answers: &'a dyn AnswerProvider,
    config: &'a Config,
}

impl<'a> Renderer<'a> {
    pub fn new(answers: &'a dyn AnswerProvider, config: &'a Config) -> Self {
        Self { answers, config }
    }

    /// Replace the placeholders of `variables` in `template`.
    ///
    /// Variables are processed in declaration order, each one replacing every
    /// occurrence of its placeholder in the text produced so far. A pass never
    /// revisits its own replacements, so an answer containing placeholder
    /// syntax cannot expand recursively; it is only picked up by variables
    /// declared later.
    ///
    /// Returns `Cow::Borrowed` when no placeholder was found.
    pub fn render<'b>(&self, template: &'b str, variables: &[VariableDefinition]) -> Cow<'b, str> {
        let mut result = Cow::Borrowed(template);

        for variable in variables {
            if variable.name.is_empty() {
                continue;
            }
            let pattern = self.config.placeholder(&variable.name);
            let answer = self.answers.get_answer(&variable.name);
            let value = self.project(answer);

            if let Some(replaced) = replace_all(&result, &pattern, &value) {
                debug!(name = %variable.name, answered = answer.is_some(), "placeholder substituted");
                result = Cow::Owned(replaced);
            } else {
                trace!(name = %variable.name, "placeholder not present");
            }
        }

        result
    }

    /// Render with pending answers layered over the collected ones.
    pub fn render_with<'b>(
        &self,
        template: &'b str,
        variables: &[VariableDefinition],
        pending: &HashMap<String, AnswerValue>,
    ) -> Cow<'b, str> {
        let overlay = OverlayProvider {
            base: self.answers,
            overlay: pending,
        };

        let temp_renderer = Renderer {
            answers: &overlay,
            config: self.config,
        };

        temp_renderer.render(template, variables)
    }

    /// The text an answer contributes to the output. Missing answers
    /// contribute nothing.
    fn project<'v>(&self, answer: Option<&'v AnswerValue>) -> Cow<'v, str> {
        match answer {
            None => Cow::Borrowed(""),
            Some(AnswerValue::Text(text)) => Cow::Borrowed(text),
            Some(AnswerValue::File(file)) => Cow::Borrowed(file.display_name()),
            Some(AnswerValue::Choices(choices)) => {
                Cow::Owned(choices.join(&self.config.list_separator))
            }
        }
    }
}

/// Render `template` with the default configuration.
pub fn render(
    template: &str,
    variables: &[VariableDefinition],
    answers: &dyn AnswerProvider,
) -> String {
    let config = Config::default();
    Renderer::new(answers, &config)
        .render(template, variables)
        .into_owned()
}

/// Replace every non-overlapping occurrence of `needle`, scanning left to
/// right. `None` when there is nothing to replace.
fn replace_all(haystack: &str, needle: &str, replacement: &str) -> Option<String> {
    let finder = memmem::Finder::new(needle.as_bytes());
    let mut matches = finder.find_iter(haystack.as_bytes()).peekable();
    matches.peek()?;

    let mut out = String::with_capacity(haystack.len() + replacement.len());
    let mut last_pos = 0;
    for start in matches {
        out.push_str(&haystack[last_pos..start]);
        out.push_str(replacement);
        last_pos = start + needle.len();
    }
    out.push_str(&haystack[last_pos..]);
    Some(out)
}
