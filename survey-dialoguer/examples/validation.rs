//! Validators, retries and a custom error template, collected into a JSON object.
//!
//! Run with `RUST_LOG=survey=debug cargo run -p survey-dialoguer --example validation`
//! to watch rejected replies being logged.

use std::num::NonZeroUsize;

use survey::{Answer, Question, Survey, TemplateRenderer, Validator, validators};
use survey_dialoguer::{Password, TermProvider, Text};

fn no_spaces(answer: &Answer) -> Result<(), String> {
    match answer.as_str() {
        Some(s) if s.contains(' ') => Err("spaces are not allowed".to_string()),
        _ => Ok(()),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let questions = [
        Question::new("username", Text::new("Username").plain()).with_validator(
            validators::compose(vec![
                Box::new(validators::required) as Validator,
                Box::new(validators::min_length(3)),
                Box::new(validators::max_length(16)),
                Box::new(no_spaces),
            ]),
        ),
        Question::new("role", Text::new("Role (admin, editor, viewer)").default("viewer"))
            .with_validator(validators::one_of(["admin", "editor", "viewer"])),
        Question::new(
            "password",
            Password::new("Password").with_confirmation("Repeat password", "Passwords differ"),
        )
        .with_validator(validators::min_length(8)),
    ];

    let renderer = TemplateRenderer::new(
        "{{color \"yellow+b\"}}! {{.Error}}, try again{{color \"reset\"}}\n",
    );
    let survey = Survey::new(TermProvider::stderr())
        .with_renderer(renderer)
        .with_max_attempts(NonZeroUsize::new(5).unwrap_or(NonZeroUsize::MIN));

    let mut record = serde_json::Value::Null;
    survey.ask(&questions, Some(&mut record))?;

    if let Some(object) = record.as_object_mut() {
        object.remove("password");
    }
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
