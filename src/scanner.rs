use std::collections::BTreeSet;
use std::ops::Range;

use memchr::memmem;
use regex::Regex;
use tracing::{trace, warn};

use crate::config::{placeholder, DEFAULT_DELIMITER};
use crate::variable::{VariableDefinition, VariableKind};

/// A piece of the template, either plain text or a recognised placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a, 'v> {
    Literal(&'a str),
    Placeholder {
        /// The placeholder exactly as written, delimiters included
        text: &'a str,
        /// Position of the owning variable in declaration order
        index: usize,
        variable: &'v VariableDefinition,
    },
}

impl<'a, 'v> Segment<'a, 'v> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Literal(text) | Segment::Placeholder { text, .. } => *text,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Segment::Placeholder { .. })
    }

    pub fn variable(&self) -> Option<&'v VariableDefinition> {
        match self {
            Segment::Literal(_) => None,
            Segment::Placeholder { variable, .. } => Some(*variable),
        }
    }

    /// Kind of the owning variable, for styling.
    pub fn kind(&self) -> Option<VariableKind> {
        self.variable().map(|v| v.kind)
    }
}

/// Splits a template into literal and placeholder segments.
///
/// Every declared variable's placeholder is searched for independently. When
/// matches of different variables overlap, the one declared first keeps the
/// span.
#[derive(Debug)]
pub struct Scanner<'a, 'v> {
    source: &'a str,
    variables: &'v [VariableDefinition],
    matches: Vec<(Range<usize>, usize)>,
    next_match: usize,
    byte_idx: usize,
}

impl<'a, 'v> Scanner<'a, 'v> {
    pub fn new(source: &'a str, variables: &'v [VariableDefinition]) -> Self {
        Self::with_delimiter(source, variables, DEFAULT_DELIMITER)
    }

    pub fn with_delimiter(
        source: &'a str,
        variables: &'v [VariableDefinition],
        delimiter: &str,
    ) -> Self {
        let matches = locate(source, variables, delimiter);
        trace!(placeholders = matches.len(), "template scanned");
        Self {
            source,
            variables,
            matches,
            next_match: 0,
            byte_idx: 0,
        }
    }

    pub fn scan_next(&mut self) -> Option<(Segment<'a, 'v>, Range<usize>)> {
        if self.byte_idx >= self.source.len() {
            return None;
        }

        let start = self.byte_idx;
        match self.matches.get(self.next_match) {
            Some((range, index)) if range.start == start => {
                let range = range.clone();
                let index = *index;
                self.next_match += 1;
                self.byte_idx = range.end;
                let segment = Segment::Placeholder {
                    text: &self.source[range.clone()],
                    index,
                    variable: &self.variables[index],
                };
                Some((segment, range))
            }
            Some((range, _)) => {
                // Text up to the next placeholder
                let end = range.start;
                self.byte_idx = end;
                Some((Segment::Literal(&self.source[start..end]), start..end))
            }
            None => {
                let end = self.source.len();
                self.byte_idx = end;
                Some((Segment::Literal(&self.source[start..end]), start..end))
            }
        }
    }
}

impl<'a, 'v> Iterator for Scanner<'a, 'v> {
    type Item = (Segment<'a, 'v>, Range<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        self.scan_next()
    }
}

/// Non-overlapping placeholder matches, sorted by position, tagged with the
/// index of the owning variable.
fn locate(
    source: &str,
    variables: &[VariableDefinition],
    delimiter: &str,
) -> Vec<(Range<usize>, usize)> {
    let mut accepted: Vec<(Range<usize>, usize)> = Vec::new();

    for (index, variable) in variables.iter().enumerate() {
        if variable.name.is_empty() {
            continue;
        }
        let pattern = placeholder(delimiter, &variable.name);
        let finder = memmem::Finder::new(pattern.as_bytes());

        for start in finder.find_iter(source.as_bytes()) {
            let range = start..start + pattern.len();
            let taken = accepted
                .iter()
                .any(|(r, _)| r.start < range.end && range.start < r.end);
            if !taken {
                accepted.push((range, index));
            }
        }
    }

    accepted.sort_by_key(|(range, _)| range.start);
    accepted
}

/// Scan `template` for the placeholders of `variables` using `%%` delimiters.
pub fn scan<'a, 'v>(
    template: &'a str,
    variables: &'v [VariableDefinition],
) -> Vec<(Segment<'a, 'v>, Range<usize>)> {
    Scanner::new(template, variables).collect()
}

/// Names of every `%%name%%`-shaped token in `input`, declared or not.
pub fn find_placeholder_references(input: &str) -> Vec<String> {
    find_placeholder_references_with(input, DEFAULT_DELIMITER)
}

pub fn find_placeholder_references_with(input: &str, delimiter: &str) -> Vec<String> {
    let delimiter = if delimiter.is_empty() {
        DEFAULT_DELIMITER
    } else {
        delimiter
    };
    let Some(first) = delimiter.chars().next() else {
        return Vec::new();
    };
    let escaped = regex::escape(delimiter);
    let pattern = format!(
        r"{escaped}([^\s{}]+){escaped}",
        regex::escape(first.encode_utf8(&mut [0; 4]))
    );
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(err) => {
            warn!(%delimiter, %err, "could not build placeholder pattern");
            return Vec::new();
        }
    };

    // Sorted for deterministic ordering
    let names: BTreeSet<&str> = re
        .captures_iter(input)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();
    names.into_iter().map(String::from).collect()
}

/// Placeholder references in `template` that no variable declares.
pub fn undeclared_placeholders(template: &str, variables: &[VariableDefinition]) -> Vec<String> {
    find_placeholder_references(template)
        .into_iter()
        .filter(|name| !variables.iter().any(|v| &v.name == name))
        .collect()
}

/// Declared variables whose placeholder never appears in `template`.
pub fn unused_variables<'v>(
    template: &str,
    variables: &'v [VariableDefinition],
) -> Vec<&'v VariableDefinition> {
    unused_variables_with(template, variables, DEFAULT_DELIMITER)
}

pub fn unused_variables_with<'v>(
    template: &str,
    variables: &'v [VariableDefinition],
    delimiter: &str,
) -> Vec<&'v VariableDefinition> {
    variables
        .iter()
        .filter(|v| {
            v.name.is_empty()
                || memmem::find(template.as_bytes(), placeholder(delimiter, &v.name).as_bytes())
                    .is_none()
        })
        .collect()
}
