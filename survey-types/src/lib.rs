//! Core types for the survey crate.
//!
//! This crate provides the foundational types for asking questions:
//! - `Question` and `Validator` - A named prompt with optional validation
//! - `Prompt` and `SurfaceProvider` traits - The contract with terminal libraries
//! - `Answer` and `Choice` - Raw values produced by prompts
//! - `AnswerSink` and `FromAnswer` - Storing answers in caller-owned records
//! - `Answers` - A general-purpose record keyed by question name

mod answer;
pub use answer::{Answer, Choice};

mod answers;
pub use answers::{AnswerError, Answers};

mod sink;
pub use sink::{AnswerMismatch, AnswerSink, FromAnswer};

mod question;
pub use question::{Question, Validator};

mod error;
pub use error::{PromptError, RenderError, SurveyError, WriteError};

mod traits;
pub use traits::{Prompt, SurfaceProvider};
