//! Ask a single question straight into a `String`.
//!
//! Run with `cargo run -p survey-dialoguer --example ask_one`.

use survey::validators;
use survey_dialoguer::Editor;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut bio = String::new();
    let prompt = Editor::new("Tell us about yourself").extension(".md");
    survey_dialoguer::ask_one(&prompt, Some(&mut bio), Some(&validators::required))?;

    println!("{} characters received", bio.chars().count());
    Ok(())
}
