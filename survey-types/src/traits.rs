use std::io;

use crate::{Answer, PromptError};

/// A unit of terminal interaction that asks for and reads one answer.
///
/// Prompts are generic over the surface they read from, so the engine never
/// needs to know which terminal library sits underneath. Text inputs,
/// confirmations, selections etc. are all independent implementers.
pub trait Prompt<S: ?Sized> {
    /// Render the prompt and read a raw answer from the surface.
    ///
    /// Called again for the same question after every rejected reply.
    fn prompt(&self, surface: &mut S) -> Result<Answer, PromptError>;

    /// Finalize the on-screen representation once `answer` has been accepted.
    ///
    /// Failures here are not fatal to the survey.
    fn cleanup(&self, surface: &mut S, answer: &Answer) -> Result<(), PromptError> {
        let _ = (surface, answer);
        Ok(())
    }
}

impl<S: ?Sized, P: Prompt<S> + ?Sized> Prompt<S> for Box<P> {
    fn prompt(&self, surface: &mut S) -> Result<Answer, PromptError> {
        (**self).prompt(surface)
    }

    fn cleanup(&self, surface: &mut S, answer: &Answer) -> Result<(), PromptError> {
        (**self).cleanup(surface, answer)
    }
}

/// Acquires the line-editing surface that every prompt of a survey shares.
///
/// A survey acquires exactly one surface per `ask` call.
pub trait SurfaceProvider {
    /// The surface handed to prompts.
    type Surface;

    /// Acquire the surface, e.g. open the terminal.
    ///
    /// Fails when no interactive surface is available.
    fn acquire(&self) -> io::Result<Self::Surface>;
}

impl<S, F> SurfaceProvider for F
where
    F: Fn() -> io::Result<S>,
{
    type Surface = S;

    fn acquire(&self) -> io::Result<S> {
        self()
    }
}
