//! Integration tests for survey

use std::collections::HashMap;
use std::io;
use std::num::NonZeroUsize;

use survey::testing::{LinePrompt, ScriptedPrompt, ScriptedProvider, ScriptedSurface};
use survey::{
    Answer, AnswerSink, Answers, Choice, PromptError, Question, RenderError, Survey, SurveyError,
    TemplateRenderer, WriteError, validators,
};

const SORRY: &str = "Sorry, your reply was invalid";

fn plain_survey(provider: &ScriptedProvider) -> Survey<ScriptedProvider> {
    Survey::new(provider.clone()).with_renderer(TemplateRenderer::default().colored(false))
}

/// Records every write, in order.
#[derive(Debug, Default)]
struct Recorder {
    writes: Vec<(String, Answer)>,
}

impl AnswerSink for Recorder {
    fn write_answer(&mut self, name: &str, answer: Answer) -> Result<(), WriteError> {
        self.writes.push((name.to_string(), answer));
        Ok(())
    }
}

#[test]
fn test_all_questions_answered_in_order() {
    let provider = ScriptedProvider::new();
    let questions = [
        Question::new("name", ScriptedPrompt::new(["Alice"])),
        Question::new("developer", ScriptedPrompt::new([true])),
        Question::new("age", ScriptedPrompt::new([30])),
    ];

    let mut recorder = Recorder::default();
    plain_survey(&provider)
        .ask(&questions, Some(&mut recorder))
        .unwrap();

    assert_eq!(
        recorder.writes,
        vec![
            ("name".to_string(), Answer::from("Alice")),
            ("developer".to_string(), Answer::Bool(true)),
            ("age".to_string(), Answer::Int(30)),
        ]
    );
    assert_eq!(provider.surface().output(), "");
}

#[test]
fn test_color_accepted_first_time() {
    let provider = ScriptedProvider::new();
    let questions = [Question::new("color", ScriptedPrompt::new(["red"]))
        .with_validator(validators::one_of(["red", "blue"]))];

    let mut target: HashMap<String, String> = HashMap::new();
    plain_survey(&provider)
        .ask(&questions, Some(&mut target))
        .unwrap();

    assert_eq!(target["color"], "red");
    assert_eq!(provider.surface().output().matches(SORRY).count(), 0);
}

#[test]
fn test_color_rejected_then_accepted() {
    let provider = ScriptedProvider::new();
    let prompt = ScriptedPrompt::new(["green", "blue"]);
    let questions = [Question::new("color", prompt.clone())
        .with_validator(validators::one_of(["red", "blue"]))];

    let mut target: HashMap<String, String> = HashMap::new();
    plain_survey(&provider)
        .ask(&questions, Some(&mut target))
        .unwrap();

    assert_eq!(target["color"], "blue");
    assert_eq!(
        provider.surface().output(),
        "✘ Sorry, your reply was invalid: 'green' is not one of: red, blue\n"
    );
    assert_eq!(prompt.prompt_count(), 2);
}

#[test]
fn test_one_error_line_per_rejection() {
    for k in [0usize, 1, 3, 7] {
        let provider = ScriptedProvider::new();
        let replies = std::iter::repeat_n("", k).chain(["ok"]);
        let questions =
            [Question::new("name", ScriptedPrompt::new(replies)).with_validator(validators::required)];

        let mut answers = Answers::new();
        plain_survey(&provider)
            .ask(&questions, Some(&mut answers))
            .unwrap();

        assert_eq!(provider.surface().output().matches(SORRY).count(), k);
        assert_eq!(answers.get_string("name").unwrap(), "ok");
    }
}

#[test]
fn test_cleanup_sees_only_the_accepted_answer() {
    let provider = ScriptedProvider::new();
    let prompt = ScriptedPrompt::new(["", "", "final"]);
    let questions = [Question::new("name", prompt.clone()).with_validator(validators::required)];

    let mut answers = Answers::new();
    plain_survey(&provider)
        .ask(&questions, Some(&mut answers))
        .unwrap();

    assert_eq!(prompt.cleanups(), vec![Answer::from("final")]);
}

#[test]
fn test_missing_target_fails_before_any_interaction() {
    let provider = ScriptedProvider::new();
    let prompt = ScriptedPrompt::new(["red"]);
    let questions = [Question::new("color", prompt.clone())];

    let result = plain_survey(&provider).ask(&questions, None::<&mut Answers>);

    assert!(matches!(result, Err(SurveyError::MissingTarget)));
    assert_eq!(provider.acquisitions(), 0);
    assert_eq!(prompt.prompt_count(), 0);
    assert_eq!(provider.surface().output(), "");
}

#[test]
fn test_empty_question_list_leaves_target_alone() {
    let provider = ScriptedProvider::new();
    let mut answers = Answers::new();
    answers.insert("existing", "value");
    let before = answers.clone();

    plain_survey(&provider)
        .ask(&[], Some(&mut answers))
        .unwrap();

    assert_eq!(answers, before);
}

#[test]
fn test_prompt_failure_keeps_earlier_answers_only() {
    let provider = ScriptedProvider::new();
    let third = ScriptedPrompt::new(["never"]);
    let questions = [
        Question::new("first", ScriptedPrompt::new(["a"])),
        Question::new("second", ScriptedPrompt::failing(PromptError::Interrupted)),
        Question::new("third", third.clone()),
    ];

    let mut answers = Answers::new();
    let err = plain_survey(&provider)
        .ask(&questions, Some(&mut answers))
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(answers.len(), 1);
    assert!(answers.contains("first"));
    assert!(!answers.contains("second"));
    assert_eq!(third.prompt_count(), 0);
}

#[test]
fn test_prompt_failure_during_retry_is_fatal() {
    let provider = ScriptedProvider::new();
    let prompt = ScriptedPrompt::new([""]).then_fail(PromptError::Io(io::Error::new(
        io::ErrorKind::BrokenPipe,
        "gone",
    )));
    let questions = [Question::new("name", prompt.clone()).with_validator(validators::required)];

    let mut answers = Answers::new();
    let err = plain_survey(&provider)
        .ask(&questions, Some(&mut answers))
        .unwrap_err();

    match err {
        SurveyError::Prompt(PromptError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("Expected prompt I/O error, got {other:?}"),
    }
    assert!(answers.is_empty());
    assert!(prompt.cleanups().is_empty());
    assert_eq!(provider.surface().output().matches(SORRY).count(), 1);
}

#[test]
fn test_surface_failure_is_propagated() {
    let provider = ScriptedProvider::unavailable();
    let questions = [Question::new("color", ScriptedPrompt::new(["red"]))];

    let mut answers = Answers::new();
    let err = Survey::new(provider)
        .ask(&questions, Some(&mut answers))
        .unwrap_err();

    match err {
        SurveyError::Surface(e) => assert_eq!(e.kind(), io::ErrorKind::Unsupported),
        other => panic!("Expected surface error, got {other:?}"),
    }
    assert!(answers.is_empty());
}

#[test]
fn test_surface_acquired_once_per_call() {
    let provider = ScriptedProvider::new();
    let questions = [
        Question::new("a", ScriptedPrompt::new(["1"])),
        Question::new("b", ScriptedPrompt::new(["2"])),
        Question::new("c", ScriptedPrompt::new(["3"])),
    ];

    let mut answers = Answers::new();
    plain_survey(&provider)
        .ask(&questions, Some(&mut answers))
        .unwrap();

    assert_eq!(provider.acquisitions(), 1);
}

#[test]
fn test_closure_provider() {
    let surface = ScriptedSurface::new();
    let shared = surface.clone();
    let survey = Survey::new(move || -> io::Result<ScriptedSurface> { Ok(shared.clone()) })
        .with_renderer(TemplateRenderer::default().colored(false));
    let questions =
        [Question::new("name", ScriptedPrompt::new(["", "Ada"])).with_validator(validators::required)];

    let mut answers = Answers::new();
    survey.ask(&questions, Some(&mut answers)).unwrap();

    assert_eq!(answers.get_string("name").unwrap(), "Ada");
    assert_eq!(
        surface.output(),
        "✘ Sorry, your reply was invalid: Value is required\n"
    );
}

#[test]
fn test_failing_closure_provider() {
    let survey = Survey::new(|| -> io::Result<ScriptedSurface> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "terminal locked"))
    });
    let prompt = ScriptedPrompt::new(["red"]);
    let questions = [Question::new("color", prompt.clone())];

    let mut answers = Answers::new();
    let err = survey.ask(&questions, Some(&mut answers)).unwrap_err();

    match err {
        SurveyError::Surface(e) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
        other => panic!("Expected surface error, got {other:?}"),
    }
    assert_eq!(prompt.prompt_count(), 0);
    assert!(answers.is_empty());
}

#[test]
fn test_render_failure_aborts() {
    let provider = ScriptedProvider::new();
    let first = ScriptedPrompt::new(["bad", "good"]);
    let questions = [
        Question::new("first", first.clone()).with_validator(|answer| match answer.as_str() {
            Some("good") => Ok(()),
            _ => Err("not good".to_string()),
        }),
        Question::new("second", ScriptedPrompt::new(["x"])),
    ];

    let survey =
        Survey::new(provider.clone()).with_renderer(TemplateRenderer::new("{{.Reason}}"));
    let mut answers = Answers::new();
    let err = survey.ask(&questions, Some(&mut answers)).unwrap_err();

    assert!(matches!(
        err,
        SurveyError::Render(RenderError::UnknownDirective(_))
    ));
    assert_eq!(first.prompt_count(), 1);
    assert!(answers.is_empty());
}

#[test]
fn test_custom_renderer() {
    let provider = ScriptedProvider::new();
    let questions =
        [Question::new("name", ScriptedPrompt::new(["", "Ada"])).with_validator(validators::required)];

    let survey = Survey::new(provider.clone())
        .with_renderer(|reason: &str| -> Result<String, RenderError> { Ok(format!("!! {reason}\n")) });
    let mut answers = Answers::new();
    survey.ask(&questions, Some(&mut answers)).unwrap();

    assert_eq!(provider.surface().output(), "!! Value is required\n");
}

#[test]
fn test_write_failure_stops_later_questions() {
    let provider = ScriptedProvider::new();
    let later = ScriptedPrompt::new([1]);
    let questions = [
        Question::new("age", ScriptedPrompt::new([30])),
        Question::new("name", ScriptedPrompt::new(["Alice"])),
        Question::new("height", later.clone()),
    ];

    let mut target: HashMap<String, u8> = HashMap::new();
    let err = plain_survey(&provider)
        .ask(&questions, Some(&mut target))
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "cannot store String answer for 'name' in a field of type u8"
    );
    assert_eq!(target.len(), 1);
    assert_eq!(target["age"], 30);
    assert_eq!(later.prompt_count(), 0);
}

#[test]
fn test_cleanup_failure_does_not_abort() {
    let provider = ScriptedProvider::new();
    let first = ScriptedPrompt::new(["a"]).failing_cleanup();
    let questions = [
        Question::new("first", first.clone()),
        Question::new("second", ScriptedPrompt::new(["b"])),
    ];

    let mut answers = Answers::new();
    plain_survey(&provider)
        .ask(&questions, Some(&mut answers))
        .unwrap();

    assert_eq!(first.cleanups(), vec![Answer::from("a")]);
    assert_eq!(answers.get_string("first").unwrap(), "a");
    assert_eq!(answers.get_string("second").unwrap(), "b");
}

#[test]
fn test_max_attempts() {
    let provider = ScriptedProvider::new();
    let prompt = ScriptedPrompt::new(["", "", "", "late"]);
    let questions = [Question::new("name", prompt.clone()).with_validator(validators::required)];

    let survey = plain_survey(&provider).with_max_attempts(NonZeroUsize::new(3).unwrap());
    let mut answers = Answers::new();
    let err = survey.ask(&questions, Some(&mut answers)).unwrap_err();

    assert!(matches!(
        err,
        SurveyError::TooManyAttempts { ref name, attempts: 3 } if name == "name"
    ));
    assert_eq!(prompt.prompt_count(), 3);
    assert_eq!(provider.surface().output().matches(SORRY).count(), 3);
    assert!(answers.is_empty());
}

#[test]
fn test_max_attempts_allows_success_within_limit() {
    let provider = ScriptedProvider::new();
    let questions =
        [Question::new("name", ScriptedPrompt::new(["", "Ada"])).with_validator(validators::required)];

    let survey = plain_survey(&provider).with_max_attempts(NonZeroUsize::new(2).unwrap());
    let mut answers = Answers::new();
    survey.ask(&questions, Some(&mut answers)).unwrap();

    assert_eq!(answers.get_string("name").unwrap(), "Ada");
}

#[test]
fn test_ask_one_writes_under_empty_name() {
    let provider = ScriptedProvider::new();
    let prompt = ScriptedPrompt::new(["green", "red"]);
    let validate = validators::one_of(["red", "blue"]);

    let mut answers = Answers::new();
    plain_survey(&provider)
        .ask_one(&prompt, Some(&mut answers), Some(&validate))
        .unwrap();

    assert_eq!(answers.len(), 1);
    assert_eq!(answers.get_string("").unwrap(), "red");
    assert_eq!(provider.surface().output().matches(SORRY).count(), 1);
}

#[test]
fn test_ask_one_matches_ask_with_anonymous_question() {
    let via_one = ScriptedProvider::new();
    let mut one = Answers::new();
    plain_survey(&via_one)
        .ask_one(
            &ScriptedPrompt::new(["", "x"]),
            Some(&mut one),
            Some(&validators::required),
        )
        .unwrap();

    let via_ask = ScriptedProvider::new();
    let mut many = Answers::new();
    let questions =
        [Question::new("", ScriptedPrompt::new(["", "x"])).with_validator(validators::required)];
    plain_survey(&via_ask)
        .ask(&questions, Some(&mut many))
        .unwrap();

    assert_eq!(one, many);
    assert_eq!(via_one.surface().output(), via_ask.surface().output());
}

#[test]
fn test_ask_one_into_scalar() {
    let provider = ScriptedProvider::new();
    let mut name = String::new();
    plain_survey(&provider)
        .ask_one(&ScriptedPrompt::new(["Ada"]), Some(&mut name), None)
        .unwrap();
    assert_eq!(name, "Ada");

    let mut missing: Option<&mut String> = None;
    let result = plain_survey(&provider).ask_one(
        &ScriptedPrompt::new(["Ada"]),
        missing.take(),
        None,
    );
    assert!(matches!(result, Err(SurveyError::MissingTarget)));
}

#[test]
fn test_ask_on_caller_surface_interleaves_output() {
    let provider = ScriptedProvider::new();
    let mut surface = ScriptedSurface::with_lines(["", "Ada", "blue"]);
    let questions = [
        Question::new("name", LinePrompt::new("Name:")).with_validator(validators::required),
        Question::new("color", LinePrompt::new("Color:")),
    ];

    let mut answers = Answers::new();
    plain_survey(&provider)
        .ask_on(&mut surface, &questions, Some(&mut answers))
        .unwrap();

    assert_eq!(
        surface.output(),
        "? Name: \n\
         ✘ Sorry, your reply was invalid: Value is required\n\
         ? Name: Ada\n\
         Name: Ada\n\
         ? Color: blue\n\
         Color: blue\n"
    );
    assert_eq!(provider.acquisitions(), 0);
    assert_eq!(surface.remaining_lines(), 0);
    assert_eq!(answers.get_string("color").unwrap(), "blue");
}

#[test]
fn test_json_record() {
    let provider = ScriptedProvider::new();
    let questions = [
        Question::new("name", ScriptedPrompt::new(["Ada"])),
        Question::new(
            "langs",
            ScriptedPrompt::new([Answer::Choices(vec![
                Choice::new(0, "rust"),
                Choice::new(2, "ocaml"),
            ])]),
        ),
    ];

    let mut record = serde_json::Value::Null;
    plain_survey(&provider)
        .ask(&questions, Some(&mut record))
        .unwrap();

    assert_eq!(
        record,
        serde_json::json!({"name": "Ada", "langs": ["rust", "ocaml"]})
    );
}

#[derive(AnswerSink, Debug, Default, PartialEq)]
struct Profile {
    name: String,
    #[answer(rename = "favorite-color")]
    color: String,
    size: usize,
    newsletter: Option<bool>,
}

#[test]
fn test_derived_record() {
    let provider = ScriptedProvider::new();
    let questions = [
        Question::new("Name", ScriptedPrompt::new(["Ada"])),
        Question::new(
            "favorite-color",
            ScriptedPrompt::new([Answer::Choice(Choice::new(1, "blue"))]),
        ),
        Question::new("size", ScriptedPrompt::new([Answer::Choice(Choice::new(2, "L"))])),
        Question::new("newsletter", ScriptedPrompt::new([false])),
    ];

    let mut profile = Profile::default();
    plain_survey(&provider)
        .ask(&questions, Some(&mut profile))
        .unwrap();

    assert_eq!(
        profile,
        Profile {
            name: "Ada".to_string(),
            color: "blue".to_string(),
            size: 2,
            newsletter: Some(false),
        }
    );
}

#[test]
fn test_derived_record_unknown_field() {
    let provider = ScriptedProvider::new();
    let questions = [
        Question::new("name", ScriptedPrompt::new(["Ada"])),
        Question::new("nickname", ScriptedPrompt::new(["A"])),
    ];

    let mut profile = Profile::default();
    let err = plain_survey(&provider)
        .ask(&questions, Some(&mut profile))
        .unwrap_err();

    assert!(matches!(
        err,
        SurveyError::Write(WriteError::UnknownField { ref name }) if name == "nickname"
    ));
    assert_eq!(profile.name, "Ada");
}
