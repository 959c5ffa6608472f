use std::fmt;

use crate::{Answer, Prompt};

/// Checks a raw answer, returning the reason it was rejected.
///
/// Validators must be free of side effects: they run once per attempt.
pub type Validator = Box<dyn Fn(&Answer) -> Result<(), String>>;

/// A single question in a survey: a named prompt with an optional validator.
pub struct Question<S: ?Sized> {
    /// The name the answer is recorded under.
    name: String,

    /// The prompt that reads the answer.
    prompt: Box<dyn Prompt<S>>,

    /// Validation applied to every reply before it is accepted.
    validate: Option<Validator>,
}

impl<S: ?Sized> Question<S> {
    /// Create a new question without validation.
    pub fn new(name: impl Into<String>, prompt: impl Prompt<S> + 'static) -> Self {
        Self {
            name: name.into(),
            prompt: Box::new(prompt),
            validate: None,
        }
    }

    /// Attach a validator. Replaces any previous one.
    pub fn with_validator(
        mut self,
        validate: impl Fn(&Answer) -> Result<(), String> + 'static,
    ) -> Self {
        self.validate = Some(Box::new(validate));
        self
    }

    /// Get the name the answer is recorded under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the prompt.
    pub fn prompt(&self) -> &dyn Prompt<S> {
        self.prompt.as_ref()
    }

    /// Get the validator, if any.
    pub fn validator(&self) -> Option<&dyn Fn(&Answer) -> Result<(), String>> {
        self.validate.as_deref()
    }

    /// Check an answer. Always passes when no validator is attached.
    pub fn validate(&self, answer: &Answer) -> Result<(), String> {
        match &self.validate {
            Some(validate) => validate(answer),
            None => Ok(()),
        }
    }
}

impl<S: ?Sized> fmt::Debug for Question<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Question")
            .field("name", &self.name)
            .field("validated", &self.validate.is_some())
            .finish_non_exhaustive()
    }
}
