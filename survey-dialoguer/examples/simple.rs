//! Fill a struct from a handful of terminal prompts.
//!
//! Run with `cargo run -p survey-dialoguer --example simple`.

use survey::{AnswerSink, Question};
use survey_dialoguer::{Confirm, MultiSelect, Number, Select, Text};

#[derive(AnswerSink, Debug, Default)]
struct Profile {
    name: String,
    age: u32,
    #[answer(rename = "favorite-color")]
    color: String,
    toppings: Vec<String>,
    subscribe: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let questions = [
        Question::new("name", Text::new("What is your name?")),
        Question::new("age", Number::new("How old are you?").default(30.0)),
        Question::new(
            "favorite-color",
            Select::new("Pick a color", ["red", "green", "blue"]),
        ),
        Question::new(
            "toppings",
            MultiSelect::new("Pizza toppings", ["cheese", "ham", "mushrooms", "olives"])
                .defaults([0]),
        ),
        Question::new("subscribe", Confirm::new("Subscribe to the newsletter?").default(true)),
    ];

    let mut profile = Profile::default();
    survey_dialoguer::ask(&questions, Some(&mut profile))?;

    println!("{profile:#?}");
    Ok(())
}
