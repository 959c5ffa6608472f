//! Dialoguer implementations of the `Prompt` trait.
//!
//! Every prompt renders through dialoguer with its own report line switched
//! off; the one-line summary of the accepted answer is printed by `cleanup`
//! instead, so rejected replies never leave a summary behind.

use std::fmt;
use std::io;

use console::Term;
use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use survey::{Answer, Choice, Prompt, PromptError};

/// Map a dialoguer error to a prompt error, detecting Ctrl+C / Escape.
pub(crate) fn prompt_error(err: dialoguer::Error) -> PromptError {
    match err {
        dialoguer::Error::IO(io_err) if io_err.kind() == io::ErrorKind::Interrupted => {
            PromptError::Interrupted
        }
        dialoguer::Error::IO(io_err) => PromptError::Io(io_err),
        #[allow(unreachable_patterns)]
        other => PromptError::other(other),
    }
}

fn theme(colorful: bool) -> Box<dyn Theme> {
    if colorful {
        Box::new(ColorfulTheme::default())
    } else {
        Box::new(SimpleTheme)
    }
}

fn format_error(_: fmt::Error) -> PromptError {
    PromptError::other(anyhow::anyhow!("failed to format prompt summary"))
}

fn write_summary(term: &Term, summary: &str) -> Result<(), PromptError> {
    term.write_line(summary)?;
    Ok(())
}

/// Single-line text input.
#[derive(Debug, Clone)]
pub struct Text {
    message: String,
    default: Option<String>,
    colorful: bool,
}

impl Text {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            default: None,
            colorful: true,
        }
    }

    /// Value used when the user just presses enter.
    pub fn default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Use the plain (no color) theme.
    pub fn plain(mut self) -> Self {
        self.colorful = false;
        self
    }

    fn summary(&self, theme: &dyn Theme, answer: &Answer) -> Result<String, PromptError> {
        let mut out = String::new();
        theme
            .format_input_prompt_selection(&mut out, &self.message, &answer.to_string())
            .map_err(format_error)?;
        Ok(out)
    }
}

impl Prompt<Term> for Text {
    fn prompt(&self, term: &mut Term) -> Result<Answer, PromptError> {
        let theme = theme(self.colorful);
        let mut input = dialoguer::Input::<String>::with_theme(theme.as_ref())
            .with_prompt(&self.message)
            .allow_empty(true)
            .report(false);
        if let Some(default) = &self.default {
            input = input.default(default.clone());
        }

        let value = input.interact_text_on(term).map_err(prompt_error)?;
        Ok(Answer::String(value))
    }

    fn cleanup(&self, term: &mut Term, answer: &Answer) -> Result<(), PromptError> {
        let summary = self.summary(theme(self.colorful).as_ref(), answer)?;
        write_summary(term, &summary)
    }
}

/// Masked input for secrets.
#[derive(Debug, Clone)]
pub struct Password {
    message: String,
    confirmation: Option<(String, String)>,
    colorful: bool,
}

impl Password {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            confirmation: None,
            colorful: true,
        }
    }

    /// Ask twice; `mismatch` is shown when the two entries differ.
    pub fn with_confirmation(
        mut self,
        prompt: impl Into<String>,
        mismatch: impl Into<String>,
    ) -> Self {
        self.confirmation = Some((prompt.into(), mismatch.into()));
        self
    }

    /// Use the plain (no color) theme.
    pub fn plain(mut self) -> Self {
        self.colorful = false;
        self
    }

    fn summary(&self, theme: &dyn Theme) -> Result<String, PromptError> {
        let mut out = String::new();
        theme
            .format_password_prompt_selection(&mut out, &self.message)
            .map_err(format_error)?;
        Ok(out)
    }
}

impl Prompt<Term> for Password {
    fn prompt(&self, term: &mut Term) -> Result<Answer, PromptError> {
        let theme = theme(self.colorful);
        let mut password = dialoguer::Password::with_theme(theme.as_ref())
            .with_prompt(&self.message)
            .allow_empty_password(true)
            .report(false);
        if let Some((prompt, mismatch)) = &self.confirmation {
            password = password.with_confirmation(prompt, mismatch);
        }

        let value = password.interact_on(term).map_err(prompt_error)?;
        Ok(Answer::String(value))
    }

    fn cleanup(&self, term: &mut Term, _answer: &Answer) -> Result<(), PromptError> {
        let summary = self.summary(theme(self.colorful).as_ref())?;
        write_summary(term, &summary)
    }
}

/// Yes/no confirmation.
#[derive(Debug, Clone)]
pub struct Confirm {
    message: String,
    default: Option<bool>,
    colorful: bool,
}

impl Confirm {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            default: None,
            colorful: true,
        }
    }

    pub fn default(mut self, default: bool) -> Self {
        self.default = Some(default);
        self
    }

    /// Use the plain (no color) theme.
    pub fn plain(mut self) -> Self {
        self.colorful = false;
        self
    }

    fn summary(&self, theme: &dyn Theme, answer: &Answer) -> Result<String, PromptError> {
        let mut out = String::new();
        theme
            .format_confirm_prompt_selection(&mut out, &self.message, answer.as_bool())
            .map_err(format_error)?;
        Ok(out)
    }
}

impl Prompt<Term> for Confirm {
    fn prompt(&self, term: &mut Term) -> Result<Answer, PromptError> {
        let theme = theme(self.colorful);
        let mut confirm = dialoguer::Confirm::with_theme(theme.as_ref())
            .with_prompt(&self.message)
            .report(false);
        if let Some(default) = self.default {
            confirm = confirm.default(default);
        }

        let value = confirm.interact_on(term).map_err(prompt_error)?;
        Ok(Answer::Bool(value))
    }

    fn cleanup(&self, term: &mut Term, answer: &Answer) -> Result<(), PromptError> {
        let summary = self.summary(theme(self.colorful).as_ref(), answer)?;
        write_summary(term, &summary)
    }
}

/// Pick one option from a list.
#[derive(Debug, Clone)]
pub struct Select {
    message: String,
    options: Vec<String>,
    default: Option<usize>,
    colorful: bool,
}

impl Select {
    pub fn new<I, O>(message: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<String>,
    {
        Self {
            message: message.into(),
            options: options.into_iter().map(Into::into).collect(),
            default: None,
            colorful: true,
        }
    }

    /// Index of the option highlighted initially.
    pub fn default(mut self, index: usize) -> Self {
        self.default = Some(index);
        self
    }

    /// Use the plain (no color) theme.
    pub fn plain(mut self) -> Self {
        self.colorful = false;
        self
    }

    fn summary(&self, theme: &dyn Theme, answer: &Answer) -> Result<String, PromptError> {
        let label = answer.as_choice().map(|c| c.label.as_str()).unwrap_or("");
        let mut out = String::new();
        theme
            .format_select_prompt_selection(&mut out, &self.message, label)
            .map_err(format_error)?;
        Ok(out)
    }
}

impl Prompt<Term> for Select {
    fn prompt(&self, term: &mut Term) -> Result<Answer, PromptError> {
        if self.options.is_empty() {
            return Err(PromptError::other(anyhow::anyhow!(
                "select prompt '{}' has no options",
                self.message
            )));
        }

        let theme = theme(self.colorful);
        let mut select = dialoguer::Select::with_theme(theme.as_ref())
            .with_prompt(&self.message)
            .items(&self.options)
            .report(false);
        if let Some(index) = self.default {
            select = select.default(index);
        }

        let index = select.interact_on(term).map_err(prompt_error)?;
        let label = self.options.get(index).cloned().ok_or_else(|| {
            PromptError::other(anyhow::anyhow!("selected option {index} out of range"))
        })?;
        Ok(Answer::Choice(Choice::new(index, label)))
    }

    fn cleanup(&self, term: &mut Term, answer: &Answer) -> Result<(), PromptError> {
        let summary = self.summary(theme(self.colorful).as_ref(), answer)?;
        write_summary(term, &summary)
    }
}

/// Pick any number of options from a list.
#[derive(Debug, Clone)]
pub struct MultiSelect {
    message: String,
    options: Vec<String>,
    defaults: Vec<usize>,
    colorful: bool,
}

impl MultiSelect {
    pub fn new<I, O>(message: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<String>,
    {
        Self {
            message: message.into(),
            options: options.into_iter().map(Into::into).collect(),
            defaults: Vec::new(),
            colorful: true,
        }
    }

    /// Indices of the options checked initially.
    pub fn defaults(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.defaults = indices.into_iter().collect();
        self
    }

    /// Use the plain (no color) theme.
    pub fn plain(mut self) -> Self {
        self.colorful = false;
        self
    }

    fn summary(&self, theme: &dyn Theme, answer: &Answer) -> Result<String, PromptError> {
        let labels: Vec<&str> = answer
            .as_choices()
            .unwrap_or_default()
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        let mut out = String::new();
        theme
            .format_multi_select_prompt_selection(&mut out, &self.message, &labels)
            .map_err(format_error)?;
        Ok(out)
    }
}

impl Prompt<Term> for MultiSelect {
    fn prompt(&self, term: &mut Term) -> Result<Answer, PromptError> {
        let theme = theme(self.colorful);
        let checked: Vec<bool> = (0..self.options.len())
            .map(|i| self.defaults.contains(&i))
            .collect();

        let indices = dialoguer::MultiSelect::with_theme(theme.as_ref())
            .with_prompt(&self.message)
            .items(&self.options)
            .defaults(&checked)
            .report(false)
            .interact_on(term)
            .map_err(prompt_error)?;

        let choices = indices
            .into_iter()
            .filter_map(|i| self.options.get(i).map(|label| Choice::new(i, label.clone())))
            .collect();
        Ok(Answer::Choices(choices))
    }

    fn cleanup(&self, term: &mut Term, answer: &Answer) -> Result<(), PromptError> {
        let summary = self.summary(theme(self.colorful).as_ref(), answer)?;
        write_summary(term, &summary)
    }
}

/// Numeric input; integers by default, floating point after [`Number::decimal`].
#[derive(Debug, Clone)]
pub struct Number {
    message: String,
    default: Option<f64>,
    decimal: bool,
    colorful: bool,
}

impl Number {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            default: None,
            decimal: false,
            colorful: true,
        }
    }

    /// Value used when the user just presses enter; rounded for integer input.
    pub fn default(mut self, default: f64) -> Self {
        self.default = Some(default);
        self
    }

    /// Accept floating point numbers and answer with `Answer::Float`.
    pub fn decimal(mut self) -> Self {
        self.decimal = true;
        self
    }

    /// Use the plain (no color) theme.
    pub fn plain(mut self) -> Self {
        self.colorful = false;
        self
    }

    fn summary(&self, theme: &dyn Theme, answer: &Answer) -> Result<String, PromptError> {
        let mut out = String::new();
        theme
            .format_input_prompt_selection(&mut out, &self.message, &answer.to_string())
            .map_err(format_error)?;
        Ok(out)
    }
}

impl Prompt<Term> for Number {
    fn prompt(&self, term: &mut Term) -> Result<Answer, PromptError> {
        let theme = theme(self.colorful);
        if self.decimal {
            let mut input =
                dialoguer::Input::<f64>::with_theme(theme.as_ref()).with_prompt(&self.message);
            if let Some(default) = self.default {
                input = input.default(default);
            }
            let value = input.report(false).interact_text_on(term).map_err(prompt_error)?;
            Ok(Answer::Float(value))
        } else {
            let mut input =
                dialoguer::Input::<i64>::with_theme(theme.as_ref()).with_prompt(&self.message);
            if let Some(default) = self.default {
                input = input.default(default.round() as i64);
            }
            let value = input.report(false).interact_text_on(term).map_err(prompt_error)?;
            Ok(Answer::Int(value))
        }
    }

    fn cleanup(&self, term: &mut Term, answer: &Answer) -> Result<(), PromptError> {
        let summary = self.summary(theme(self.colorful).as_ref(), answer)?;
        write_summary(term, &summary)
    }
}

/// Multi-line text typed in the user's `$EDITOR`.
#[derive(Debug, Clone)]
pub struct Editor {
    message: String,
    default: String,
    extension: String,
    colorful: bool,
}

impl Editor {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            default: String::new(),
            extension: ".txt".to_string(),
            colorful: true,
        }
    }

    /// Text the editor opens with; also the answer when the editor is closed without saving.
    pub fn default(mut self, text: impl Into<String>) -> Self {
        self.default = text.into();
        self
    }

    /// File extension of the temporary file, e.g. `".md"`, for syntax highlighting.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Use the plain (no color) theme.
    pub fn plain(mut self) -> Self {
        self.colorful = false;
        self
    }

    fn summary(&self, theme: &dyn Theme) -> Result<String, PromptError> {
        let mut out = String::new();
        theme
            .format_input_prompt_selection(&mut out, &self.message, "<received>")
            .map_err(format_error)?;
        Ok(out)
    }
}

impl Prompt<Term> for Editor {
    fn prompt(&self, term: &mut Term) -> Result<Answer, PromptError> {
        let mut header = String::new();
        theme(self.colorful)
            .format_prompt(&mut header, &self.message)
            .map_err(format_error)?;
        term.write_line(&header)?;

        let edited = dialoguer::Editor::new()
            .extension(&self.extension)
            .edit(&self.default)
            .map_err(prompt_error)?;
        Ok(Answer::String(edited.unwrap_or_else(|| self.default.clone())))
    }

    fn cleanup(&self, term: &mut Term, _answer: &Answer) -> Result<(), PromptError> {
        let summary = self.summary(theme(self.colorful).as_ref())?;
        term.clear_last_lines(1)?;
        write_summary(term, &summary)
    }
}
