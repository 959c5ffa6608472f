//! # survey
//!
//! Ask a list of questions on the terminal, validate the replies and record
//! the answers in a record of your choosing.
//!
//! Each [`Question`] pairs a name with a [`Prompt`] (how the answer is read)
//! and an optional validator (whether it is acceptable). [`Survey::ask`] runs
//! the questions in order: a rejected reply is reported to the user and the
//! question is asked again until the reply passes, then the answer is written
//! into the target under the question's name.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use survey::{AnswerSink, Question, Survey, validators};
//! use survey_dialoguer::{Select, TermProvider, Text};
//!
//! #[derive(AnswerSink, Debug, Default)]
//! struct Profile {
//!     name: String,
//!     #[answer(rename = "favorite-color")]
//!     color: String,
//! }
//!
//! let questions = [
//!     Question::new("name", Text::new("What is your name?"))
//!         .with_validator(validators::required),
//!     Question::new("favorite-color", Select::new("Pick a color", ["red", "blue"])),
//! ];
//!
//! let mut profile = Profile::default();
//! Survey::new(TermProvider::stderr()).ask(&questions, Some(&mut profile))?;
//! ```
//!
//! ## Result records
//!
//! Anything implementing [`AnswerSink`] can receive answers:
//! - [`Answers`], `HashMap<String, V>` and `BTreeMap<String, V>` keyed by name
//! - `serde_json::Value` objects and `serde_json::Map`
//! - structs with `#[derive(AnswerSink)]`, matched by field name
//! - scalars such as `String` or `bool`, which take the whole answer
//!
//! ## Prompts
//!
//! Prompts are separate implementations of the [`Prompt`] trait:
//! - `survey-dialoguer` - terminal prompts via dialoguer
//! - [`testing`] - scripted prompts for tests

// Re-export all types from survey-types
pub use survey_types::*;

// Re-export the derive macro
pub use survey_macro::AnswerSink;

mod engine;
pub use engine::Survey;

mod render;
pub use render::{DEFAULT_ERROR_TEMPLATE, ErrorRenderer, TemplateRenderer};

pub mod testing;
pub mod validators;
