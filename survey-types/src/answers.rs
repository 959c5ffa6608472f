use std::collections::HashMap;

use crate::{Answer, AnswerSink, Choice, WriteError};

/// Error type for answer access operations.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("Missing answer for question: {0}")]
    Missing(String),

    #[error("Type mismatch for question '{name}': expected {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Answers collected from a survey, keyed by question name.
///
/// This is the general-purpose result record: it accepts any answer under any
/// name. Iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers {
    values: HashMap<String, Answer>,
}

impl Answers {
    /// Create a new empty answers collection.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Insert an answer under the given name.
    pub fn insert(&mut self, name: impl Into<String>, answer: impl Into<Answer>) {
        self.values.insert(name.into(), answer.into());
    }

    /// Get the answer stored under the given name.
    pub fn get(&self, name: &str) -> Option<&Answer> {
        self.values.get(name)
    }

    /// Check if an answer exists for the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Get an iterator over all name-answer pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.values.iter().map(|(name, answer)| (name.as_str(), answer))
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // === Convenience accessors ===

    /// Get a string answer.
    pub fn get_string(&self, name: &str) -> Result<&str, AnswerError> {
        match self.get(name) {
            Some(Answer::String(s)) => Ok(s),
            Some(other) => Err(mismatch(name, "String", other)),
            None => Err(AnswerError::Missing(name.to_string())),
        }
    }

    /// Get a boolean answer.
    pub fn get_bool(&self, name: &str) -> Result<bool, AnswerError> {
        match self.get(name) {
            Some(Answer::Bool(b)) => Ok(*b),
            Some(other) => Err(mismatch(name, "Bool", other)),
            None => Err(AnswerError::Missing(name.to_string())),
        }
    }

    /// Get an integer answer.
    pub fn get_int(&self, name: &str) -> Result<i64, AnswerError> {
        match self.get(name) {
            Some(Answer::Int(i)) => Ok(*i),
            Some(other) => Err(mismatch(name, "Int", other)),
            None => Err(AnswerError::Missing(name.to_string())),
        }
    }

    /// Get a float answer.
    pub fn get_float(&self, name: &str) -> Result<f64, AnswerError> {
        match self.get(name) {
            Some(Answer::Float(f)) => Ok(*f),
            Some(other) => Err(mismatch(name, "Float", other)),
            None => Err(AnswerError::Missing(name.to_string())),
        }
    }

    /// Get the option picked by a select prompt.
    pub fn get_choice(&self, name: &str) -> Result<&Choice, AnswerError> {
        match self.get(name) {
            Some(Answer::Choice(choice)) => Ok(choice),
            Some(other) => Err(mismatch(name, "Choice", other)),
            None => Err(AnswerError::Missing(name.to_string())),
        }
    }

    /// Get the options picked by a multi-select prompt.
    pub fn get_choices(&self, name: &str) -> Result<&[Choice], AnswerError> {
        match self.get(name) {
            Some(Answer::Choices(choices)) => Ok(choices),
            Some(other) => Err(mismatch(name, "Choices", other)),
            None => Err(AnswerError::Missing(name.to_string())),
        }
    }
}

fn mismatch(name: &str, expected: &'static str, actual: &Answer) -> AnswerError {
    AnswerError::TypeMismatch {
        name: name.to_string(),
        expected,
        actual: actual.type_name(),
    }
}

impl AnswerSink for Answers {
    fn write_answer(&mut self, name: &str, answer: Answer) -> Result<(), WriteError> {
        self.values.insert(name.to_string(), answer);
        Ok(())
    }
}

impl IntoIterator for Answers {
    type Item = (String, Answer);
    type IntoIter = std::collections::hash_map::IntoIter<String, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl FromIterator<(String, Answer)> for Answers {
    fn from_iter<I: IntoIterator<Item = (String, Answer)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
