//! Stock validators for common checks.
//!
//! Every validator has the shape `Fn(&Answer) -> Result<(), String>` and can
//! be passed straight to [`Question::with_validator`](crate::Question::with_validator).

use crate::{Answer, Validator};

/// Reject empty text and empty selections.
pub fn required(answer: &Answer) -> Result<(), String> {
    let empty = match answer {
        Answer::String(s) => s.is_empty(),
        Answer::Choices(choices) => choices.is_empty(),
        _ => false,
    };
    if empty {
        Err("Value is required".to_string())
    } else {
        Ok(())
    }
}

/// Number of characters in text, or number of picked options.
fn length(answer: &Answer) -> Result<usize, String> {
    match answer {
        Answer::String(s) => Ok(s.chars().count()),
        Answer::Choices(choices) => Ok(choices.len()),
        other => Err(format!(
            "cannot enforce length on response of type {}",
            other.type_name()
        )),
    }
}

/// Require at least `min` characters (or picked options).
pub fn min_length(min: usize) -> impl Fn(&Answer) -> Result<(), String> {
    move |answer| {
        if length(answer)? < min {
            Err(format!("value is too short. Min length is {min}"))
        } else {
            Ok(())
        }
    }
}

/// Allow at most `max` characters (or picked options).
pub fn max_length(max: usize) -> impl Fn(&Answer) -> Result<(), String> {
    move |answer| {
        if length(answer)? > max {
            Err(format!("value is too long. Max length is {max}"))
        } else {
            Ok(())
        }
    }
}

/// Accept only text (or a picked option label) from a fixed set.
pub fn one_of<I, S>(allowed: I) -> impl Fn(&Answer) -> Result<(), String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
    move |answer| {
        let value = match answer {
            Answer::String(s) => s.as_str(),
            Answer::Choice(choice) => choice.label.as_str(),
            other => return Err(format!("expected text, got {}", other.type_name())),
        };
        if allowed.iter().any(|a| a == value) {
            Ok(())
        } else {
            Err(format!("'{value}' is not one of: {}", allowed.join(", ")))
        }
    }
}

/// Run several validators in order; the first failure wins.
pub fn compose(validators: Vec<Validator>) -> impl Fn(&Answer) -> Result<(), String> {
    move |answer| validators.iter().try_for_each(|validate| validate(answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Choice;

    #[test]
    fn required_rejects_empty_values() {
        assert_eq!(required(&"".into()), Err("Value is required".to_string()));
        assert_eq!(
            required(&Answer::Choices(vec![])),
            Err("Value is required".to_string())
        );
        assert!(required(&"x".into()).is_ok());
        assert!(required(&Answer::Bool(false)).is_ok());
    }

    #[test]
    fn length_counts_characters() {
        let validate = max_length(3);
        assert!(validate(&"äöü".into()).is_ok());
        assert_eq!(
            validate(&"abcd".into()),
            Err("value is too long. Max length is 3".to_string())
        );

        let validate = min_length(2);
        assert_eq!(
            validate(&"a".into()),
            Err("value is too short. Min length is 2".to_string())
        );
    }

    #[test]
    fn length_counts_choices() {
        let validate = min_length(1);
        assert!(validate(&Answer::Choices(vec![Choice::new(0, "a")])).is_ok());
        assert!(validate(&Answer::Choices(vec![])).is_err());
    }

    #[test]
    fn length_rejects_other_answers() {
        assert_eq!(
            min_length(1)(&Answer::Int(5)),
            Err("cannot enforce length on response of type Int".to_string())
        );
    }

    #[test]
    fn one_of_checks_membership() {
        let validate = one_of(["red", "blue"]);
        assert!(validate(&"red".into()).is_ok());
        assert!(validate(&Answer::Choice(Choice::new(1, "blue"))).is_ok());
        assert_eq!(
            validate(&"green".into()),
            Err("'green' is not one of: red, blue".to_string())
        );
    }

    #[test]
    fn compose_stops_at_first_failure() {
        let validate = compose(vec![Box::new(required) as Validator, Box::new(min_length(3))]);
        assert_eq!(validate(&"".into()), Err("Value is required".to_string()));
        assert_eq!(
            validate(&"ab".into()),
            Err("value is too short. Min length is 3".to_string())
        );
        assert!(validate(&"abc".into()).is_ok());
    }
}
