//! # survey-dialoguer
//!
//! Terminal prompts for `survey`, built on the `dialoguer` library.
//!
//! Every prompt implements `Prompt<console::Term>` and can be placed in a
//! [`Question`]. [`TermProvider`] hands the engine the process terminal, and
//! the [`ask`] / [`ask_one`] shortcuts run a survey on standard error.
//!
//! ## Example
//!
//! ```rust,ignore
//! use survey::{AnswerSink, Question, validators};
//! use survey_dialoguer::{Confirm, Text};
//!
//! #[derive(AnswerSink, Default)]
//! struct User {
//!     name: String,
//!     subscribe: bool,
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let questions = [
//!         Question::new("name", Text::new("What is your name?"))
//!             .with_validator(validators::required),
//!         Question::new("subscribe", Confirm::new("Subscribe?").default(true)),
//!     ];
//!
//!     let mut user = User::default();
//!     survey_dialoguer::ask(&questions, Some(&mut user))?;
//!     println!("Hello, {}!", user.name);
//!     Ok(())
//! }
//! ```

use console::Term;
use survey::{Answer, AnswerSink, Prompt, Question, Survey, SurveyError};

mod prompts;
mod terminal;

pub use prompts::{Confirm, Editor, MultiSelect, Number, Password, Select, Text};
pub use terminal::TermProvider;

/// Ask `questions` on standard error with the default error template.
pub fn ask<T>(questions: &[Question<Term>], target: Option<&mut T>) -> Result<(), SurveyError>
where
    T: AnswerSink + ?Sized,
{
    Survey::new(TermProvider::stderr()).ask(questions, target)
}

/// Ask a single prompt on standard error; see [`Survey::ask_one`].
pub fn ask_one<T>(
    prompt: &dyn Prompt<Term>,
    target: Option<&mut T>,
    validate: Option<&dyn Fn(&Answer) -> Result<(), String>>,
) -> Result<(), SurveyError>
where
    T: AnswerSink + ?Sized,
{
    Survey::new(TermProvider::stderr()).ask_one(prompt, target, validate)
}
