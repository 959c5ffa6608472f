//! Scripted prompts and surfaces for testing surveys without a terminal.
//!
//! [`ScriptedProvider`] hands out an in-memory [`ScriptedSurface`] that
//! captures everything written to it. [`ScriptedPrompt`] replies with
//! pre-defined answers (or errors) and records what it was asked to clean up;
//! [`LinePrompt`] reads its replies from the surface instead.
//!
//! Surfaces and scripted prompts are cheap handles over shared state, so a
//! test can keep a clone and inspect it after the survey has run.
//!
//! # Example
//!
//! ```
//! use survey::testing::{ScriptedPrompt, ScriptedProvider};
//! use survey::{Answers, Question, Survey, validators};
//!
//! let provider = ScriptedProvider::new();
//! let prompt = ScriptedPrompt::new(["green", "blue"]);
//! let questions = [Question::new("color", prompt.clone())
//!     .with_validator(validators::one_of(["red", "blue"]))];
//!
//! let survey = Survey::new(provider.clone());
//! let mut answers = Answers::new();
//! survey.ask(&questions, Some(&mut answers)).unwrap();
//!
//! assert_eq!(answers.get_string("color").unwrap(), "blue");
//! assert_eq!(prompt.prompt_count(), 2);
//! assert!(provider.surface().output().contains("Sorry, your reply was invalid"));
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::rc::Rc;

use crate::{Answer, Prompt, PromptError, SurfaceProvider};

#[derive(Debug, Default)]
struct SurfaceState {
    input: VecDeque<String>,
    output: String,
}

/// An in-memory terminal with queued input lines and captured output.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl ScriptedSurface {
    /// Create a surface with no input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface that will yield the given lines in order.
    pub fn with_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let surface = Self::new();
        surface
            .state
            .borrow_mut()
            .input
            .extend(lines.into_iter().map(Into::into));
        surface
    }

    /// Read the next input line, failing like a closed terminal when none are left.
    pub fn read_line(&self) -> Result<String, PromptError> {
        self.state.borrow_mut().input.pop_front().ok_or_else(|| {
            PromptError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no scripted input left",
            ))
        })
    }

    /// Everything written to the surface so far.
    pub fn output(&self) -> String {
        self.state.borrow().output.clone()
    }

    /// Number of input lines not yet read.
    pub fn remaining_lines(&self) -> usize {
        self.state.borrow().input.len()
    }
}

impl Write for ScriptedSurface {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.state
            .borrow_mut()
            .output
            .push_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct ProviderState {
    acquisitions: usize,
    unavailable: bool,
}

/// A surface provider for tests.
///
/// Every acquisition hands out a handle to the same [`ScriptedSurface`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    surface: ScriptedSurface,
    state: Rc<RefCell<ProviderState>>,
}

impl ScriptedProvider {
    /// Create a provider with an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider whose surface yields the given input lines.
    pub fn with_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            surface: ScriptedSurface::with_lines(lines),
            state: Rc::default(),
        }
    }

    /// Create a provider that fails to acquire, like a non-interactive session.
    pub fn unavailable() -> Self {
        let provider = Self::new();
        provider.state.borrow_mut().unavailable = true;
        provider
    }

    /// The shared surface.
    pub fn surface(&self) -> &ScriptedSurface {
        &self.surface
    }

    /// How many times a surface was acquired.
    pub fn acquisitions(&self) -> usize {
        self.state.borrow().acquisitions
    }
}

impl SurfaceProvider for ScriptedProvider {
    type Surface = ScriptedSurface;

    fn acquire(&self) -> io::Result<ScriptedSurface> {
        let mut state = self.state.borrow_mut();
        if state.unavailable {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "not an interactive terminal",
            ));
        }
        state.acquisitions += 1;
        Ok(self.surface.clone())
    }
}

#[derive(Debug, Default)]
struct PromptState {
    replies: VecDeque<Result<Answer, PromptError>>,
    prompts: usize,
    cleanups: Vec<Answer>,
    fail_cleanup: bool,
}

/// A prompt that replies with pre-defined answers, one per call.
///
/// Works with any surface. Runs out with an `UnexpectedEof` I/O error.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    state: Rc<RefCell<PromptState>>,
}

impl ScriptedPrompt {
    /// Create a prompt that replies with the given answers in order.
    pub fn new<I, A>(replies: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Answer>,
    {
        let prompt = Self::default();
        prompt
            .state
            .borrow_mut()
            .replies
            .extend(replies.into_iter().map(|a| Ok(a.into())));
        prompt
    }

    /// Create a prompt whose first call fails.
    pub fn failing(err: PromptError) -> Self {
        Self::default().then_fail(err)
    }

    /// Queue a failure after the replies queued so far.
    pub fn then_fail(self, err: PromptError) -> Self {
        self.state.borrow_mut().replies.push_back(Err(err));
        self
    }

    /// Make every cleanup call fail.
    pub fn failing_cleanup(self) -> Self {
        self.state.borrow_mut().fail_cleanup = true;
        self
    }

    /// How many times the prompt was shown.
    pub fn prompt_count(&self) -> usize {
        self.state.borrow().prompts
    }

    /// The answers the prompt was asked to clean up with, in order.
    pub fn cleanups(&self) -> Vec<Answer> {
        self.state.borrow().cleanups.clone()
    }
}

impl<S: ?Sized> Prompt<S> for ScriptedPrompt {
    fn prompt(&self, _surface: &mut S) -> Result<Answer, PromptError> {
        let mut state = self.state.borrow_mut();
        state.prompts += 1;
        state.replies.pop_front().unwrap_or_else(|| {
            Err(PromptError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no scripted reply left",
            )))
        })
    }

    fn cleanup(&self, _surface: &mut S, answer: &Answer) -> Result<(), PromptError> {
        let mut state = self.state.borrow_mut();
        state.cleanups.push(answer.clone());
        if state.fail_cleanup {
            Err(PromptError::other(anyhow::anyhow!("cleanup failed")))
        } else {
            Ok(())
        }
    }
}

/// A text prompt that reads its reply from a [`ScriptedSurface`].
///
/// Writes `? <message> ` before every read and `<message> <answer>` once the
/// answer is accepted, so the surface output shows the whole exchange.
#[derive(Debug, Clone)]
pub struct LinePrompt {
    message: String,
}

impl LinePrompt {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Prompt<ScriptedSurface> for LinePrompt {
    fn prompt(&self, surface: &mut ScriptedSurface) -> Result<Answer, PromptError> {
        write!(surface, "? {} ", self.message)?;
        let line = surface.read_line()?;
        writeln!(surface, "{line}")?;
        Ok(Answer::String(line))
    }

    fn cleanup(&self, surface: &mut ScriptedSurface, answer: &Answer) -> Result<(), PromptError> {
        writeln!(surface, "{} {answer}", self.message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_prompt_replies_in_order_then_runs_out() {
        let prompt = ScriptedPrompt::new(["a", "b"]);
        let mut surface = ();

        assert_eq!(prompt.prompt(&mut surface).unwrap(), Answer::from("a"));
        assert_eq!(prompt.prompt(&mut surface).unwrap(), Answer::from("b"));
        assert!(matches!(
            prompt.prompt(&mut surface),
            Err(PromptError::Io(err)) if err.kind() == io::ErrorKind::UnexpectedEof
        ));
        assert_eq!(prompt.prompt_count(), 3);
    }

    #[test]
    fn clones_share_state() {
        let prompt = ScriptedPrompt::new([true]);
        let clone = prompt.clone();
        let answer = clone.prompt(&mut ()).unwrap();
        clone.cleanup(&mut (), &answer).unwrap();

        assert_eq!(prompt.prompt_count(), 1);
        assert_eq!(prompt.cleanups(), vec![Answer::Bool(true)]);
    }

    #[test]
    fn surface_captures_output_and_serves_lines() {
        let mut surface = ScriptedSurface::with_lines(["one"]);
        write!(surface, "hello").unwrap();
        assert_eq!(surface.remaining_lines(), 1);

        assert_eq!(surface.read_line().unwrap(), "one");
        assert_eq!(surface.remaining_lines(), 0);
        assert!(surface.read_line().is_err());
        assert_eq!(surface.output(), "hello");
    }

    #[test]
    fn unavailable_provider_fails() {
        let provider = ScriptedProvider::unavailable();
        let err = provider.acquire().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
        assert_eq!(provider.acquisitions(), 0);
    }

    #[test]
    fn line_prompt_echoes_exchange() {
        let mut surface = ScriptedSurface::with_lines(["Ada"]);
        let prompt = LinePrompt::new("Name:");

        let answer = prompt.prompt(&mut surface).unwrap();
        prompt.cleanup(&mut surface, &answer).unwrap();

        assert_eq!(surface.output(), "? Name: Ada\nName: Ada\n");
    }
}
