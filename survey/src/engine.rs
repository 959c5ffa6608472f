//! The ask loop: prompt, validate, retry, clean up, record.

use std::io::Write;
use std::num::NonZeroUsize;

use tracing::{debug, warn};

use crate::{
    Answer, AnswerSink, ErrorRenderer, Prompt, PromptError, Question, SurfaceProvider,
    SurveyError, TemplateRenderer,
};

type ValidateFn<'a> = &'a dyn Fn(&Answer) -> Result<(), String>;

/// Runs questions against a terminal and records the answers.
///
/// A `Survey` owns the way the terminal is acquired and the way rejected
/// replies are reported. Questions and the result record are supplied per
/// call.
///
/// # Example
///
/// ```
/// use survey::testing::{ScriptedPrompt, ScriptedProvider};
/// use survey::{Answers, Question, Survey};
///
/// let survey = Survey::new(ScriptedProvider::new());
/// let questions = [Question::new("color", ScriptedPrompt::new(["red"]))];
///
/// let mut answers = Answers::new();
/// survey.ask(&questions, Some(&mut answers)).unwrap();
/// assert_eq!(answers.get_string("color").unwrap(), "red");
/// ```
#[derive(Debug, Clone)]
pub struct Survey<P, R = TemplateRenderer> {
    provider: P,
    renderer: R,
    max_attempts: Option<NonZeroUsize>,
}

impl<P: SurfaceProvider> Survey<P> {
    /// Create a survey with the default error template and unlimited retries.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            renderer: TemplateRenderer::default(),
            max_attempts: None,
        }
    }
}

impl<P, R> Survey<P, R>
where
    P: SurfaceProvider,
    P::Surface: Write,
    R: ErrorRenderer,
{
    /// Use a different renderer for rejected replies.
    pub fn with_renderer<R2: ErrorRenderer>(self, renderer: R2) -> Survey<P, R2> {
        Survey {
            provider: self.provider,
            renderer,
            max_attempts: self.max_attempts,
        }
    }

    /// Give up on a question after this many rejected replies.
    pub fn with_max_attempts(mut self, max_attempts: NonZeroUsize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Ask every question in order and record each answer in `target`.
    ///
    /// Fails with [`SurveyError::MissingTarget`] before touching the terminal
    /// when `target` is `None`. Any other error aborts the remaining
    /// questions; answers recorded before the failure are kept.
    pub fn ask<T>(
        &self,
        questions: &[Question<P::Surface>],
        target: Option<&mut T>,
    ) -> Result<(), SurveyError>
    where
        T: AnswerSink + ?Sized,
    {
        let target = target.ok_or(SurveyError::MissingTarget)?;
        let mut surface = self.provider.acquire().map_err(SurveyError::Surface)?;
        self.run(&mut surface, questions, target)
    }

    /// Ask a single prompt and record the answer under the empty name.
    ///
    /// Behaves exactly like [`Survey::ask`] with one anonymous question,
    /// which makes it a natural fit for scalar targets such as `String`.
    pub fn ask_one<T>(
        &self,
        prompt: &dyn Prompt<P::Surface>,
        target: Option<&mut T>,
        validate: Option<ValidateFn<'_>>,
    ) -> Result<(), SurveyError>
    where
        T: AnswerSink + ?Sized,
    {
        let target = target.ok_or(SurveyError::MissingTarget)?;
        let mut surface = self.provider.acquire().map_err(SurveyError::Surface)?;
        self.ask_question(&mut surface, "", prompt, validate, target)
    }

    /// Ask every question on a surface the caller already holds.
    pub fn ask_on<T>(
        &self,
        surface: &mut P::Surface,
        questions: &[Question<P::Surface>],
        target: Option<&mut T>,
    ) -> Result<(), SurveyError>
    where
        T: AnswerSink + ?Sized,
    {
        let target = target.ok_or(SurveyError::MissingTarget)?;
        self.run(surface, questions, target)
    }

    fn run<T>(
        &self,
        surface: &mut P::Surface,
        questions: &[Question<P::Surface>],
        target: &mut T,
    ) -> Result<(), SurveyError>
    where
        T: AnswerSink + ?Sized,
    {
        for question in questions {
            self.ask_question(
                surface,
                question.name(),
                question.prompt(),
                question.validator(),
                target,
            )?;
        }
        Ok(())
    }

    fn ask_question<T>(
        &self,
        surface: &mut P::Surface,
        name: &str,
        prompt: &dyn Prompt<P::Surface>,
        validate: Option<ValidateFn<'_>>,
        target: &mut T,
    ) -> Result<(), SurveyError>
    where
        T: AnswerSink + ?Sized,
    {
        debug!(question = name, "asking");
        let mut answer = prompt.prompt(surface)?;

        if let Some(validate) = validate {
            let mut attempts = 1;
            while let Err(reason) = validate(&answer) {
                debug!(question = name, attempts, %reason, "reply rejected");
                let message = self.renderer.render(&reason)?;
                surface
                    .write_all(message.as_bytes())
                    .and_then(|()| surface.flush())
                    .map_err(PromptError::Io)?;

                if self.max_attempts.is_some_and(|max| attempts >= max.get()) {
                    return Err(SurveyError::TooManyAttempts {
                        name: name.to_string(),
                        attempts,
                    });
                }

                answer = prompt.prompt(surface)?;
                attempts += 1;
            }
        }

        if let Err(err) = prompt.cleanup(surface, &answer) {
            warn!(question = name, error = %err, "prompt cleanup failed");
        }

        target.write_answer(name, answer)?;
        Ok(())
    }
}
