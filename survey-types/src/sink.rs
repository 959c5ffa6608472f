//! Writing answers into caller-owned result records.
//!
//! A result record is anything implementing [`AnswerSink`]: a map keyed by
//! question name, a JSON object, a struct deriving `AnswerSink`, or a single
//! scalar that takes the whole answer (handy with `ask_one`). Each sink decides
//! how a question name addresses a slot; [`FromAnswer`] does the type
//! coercion from the raw [`Answer`] into the slot's type.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::{Map, Number, Value};

use crate::{Answer, Choice, WriteError};

/// A destination that stores answers by question name.
pub trait AnswerSink {
    /// Store `answer` under `name`.
    ///
    /// Only the slot addressed by `name` may be modified, and only when the
    /// write succeeds.
    fn write_answer(&mut self, name: &str, answer: Answer) -> Result<(), WriteError>;
}

/// An answer that could not be converted into the requested type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerMismatch {
    pub expected: &'static str,
    pub actual: &'static str,
}

impl AnswerMismatch {
    pub fn new(expected: &'static str, answer: &Answer) -> Self {
        Self {
            expected,
            actual: answer.type_name(),
        }
    }

    /// Attach the question name, producing the error a sink reports.
    pub fn at(self, name: &str) -> WriteError {
        WriteError::TypeMismatch {
            name: name.to_string(),
            expected: self.expected,
            actual: self.actual,
        }
    }
}

/// Conversion from a raw [`Answer`] into a concrete slot type.
pub trait FromAnswer: Sized {
    fn from_answer(answer: Answer) -> Result<Self, AnswerMismatch>;
}

impl FromAnswer for Answer {
    fn from_answer(answer: Answer) -> Result<Self, AnswerMismatch> {
        Ok(answer)
    }
}

impl FromAnswer for String {
    fn from_answer(answer: Answer) -> Result<Self, AnswerMismatch> {
        match answer {
            Answer::String(s) => Ok(s),
            Answer::Choice(choice) => Ok(choice.label),
            other => Err(AnswerMismatch::new("String", &other)),
        }
    }
}

impl FromAnswer for bool {
    fn from_answer(answer: Answer) -> Result<Self, AnswerMismatch> {
        match answer {
            Answer::Bool(b) => Ok(b),
            other => Err(AnswerMismatch::new("bool", &other)),
        }
    }
}

// Integers accept `Int` answers within range, and the index of a `Choice`.
macro_rules! integer_from_answer {
    ($($ty:ty),* $(,)?) => {$(
        impl FromAnswer for $ty {
            fn from_answer(answer: Answer) -> Result<Self, AnswerMismatch> {
                let converted = match &answer {
                    Answer::Int(i) => <$ty>::try_from(*i).ok(),
                    Answer::Choice(choice) => <$ty>::try_from(choice.index).ok(),
                    _ => None,
                };
                converted.ok_or_else(|| AnswerMismatch::new(stringify!($ty), &answer))
            }
        }
    )*};
}

integer_from_answer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromAnswer for f64 {
    fn from_answer(answer: Answer) -> Result<Self, AnswerMismatch> {
        answer
            .as_float()
            .ok_or_else(|| AnswerMismatch::new("f64", &answer))
    }
}

impl FromAnswer for f32 {
    fn from_answer(answer: Answer) -> Result<Self, AnswerMismatch> {
        // Finite answers beyond f32's range are rejected rather than saturated.
        answer
            .as_float()
            .map(|f| (f, f as f32))
            .filter(|(wide, narrow)| narrow.is_finite() || !wide.is_finite())
            .map(|(_, narrow)| narrow)
            .ok_or_else(|| AnswerMismatch::new("f32", &answer))
    }
}

impl FromAnswer for Choice {
    fn from_answer(answer: Answer) -> Result<Self, AnswerMismatch> {
        match answer {
            Answer::Choice(choice) => Ok(choice),
            other => Err(AnswerMismatch::new("Choice", &other)),
        }
    }
}

impl FromAnswer for Vec<Choice> {
    fn from_answer(answer: Answer) -> Result<Self, AnswerMismatch> {
        match answer {
            Answer::Choices(choices) => Ok(choices),
            other => Err(AnswerMismatch::new("Vec<Choice>", &other)),
        }
    }
}

impl FromAnswer for Vec<String> {
    fn from_answer(answer: Answer) -> Result<Self, AnswerMismatch> {
        match answer {
            Answer::Choices(choices) => Ok(choices.into_iter().map(|c| c.label).collect()),
            other => Err(AnswerMismatch::new("Vec<String>", &other)),
        }
    }
}

impl FromAnswer for Vec<usize> {
    fn from_answer(answer: Answer) -> Result<Self, AnswerMismatch> {
        match answer {
            Answer::Choices(choices) => Ok(choices.into_iter().map(|c| c.index).collect()),
            other => Err(AnswerMismatch::new("Vec<usize>", &other)),
        }
    }
}

impl<T: FromAnswer> FromAnswer for Option<T> {
    fn from_answer(answer: Answer) -> Result<Self, AnswerMismatch> {
        T::from_answer(answer).map(Some)
    }
}

/// Selections are stored by label, the way a user reads them.
impl FromAnswer for Value {
    fn from_answer(answer: Answer) -> Result<Self, AnswerMismatch> {
        match answer {
            Answer::String(s) => Ok(Value::String(s)),
            Answer::Bool(b) => Ok(Value::Bool(b)),
            Answer::Int(i) => Ok(Value::Number(i.into())),
            Answer::Float(f) => Number::from_f64(f)
                .map(Value::Number)
                .ok_or_else(|| AnswerMismatch::new("JSON number", &Answer::Float(f))),
            Answer::Choice(choice) => Ok(Value::String(choice.label)),
            Answer::Choices(choices) => Ok(Value::Array(
                choices
                    .into_iter()
                    .map(|c| Value::String(c.label))
                    .collect(),
            )),
        }
    }
}

// === Keyed sinks ===

impl<V: FromAnswer, H: BuildHasher> AnswerSink for HashMap<String, V, H> {
    fn write_answer(&mut self, name: &str, answer: Answer) -> Result<(), WriteError> {
        let value = V::from_answer(answer).map_err(|m| m.at(name))?;
        self.insert(name.to_string(), value);
        Ok(())
    }
}

impl<V: FromAnswer> AnswerSink for BTreeMap<String, V> {
    fn write_answer(&mut self, name: &str, answer: Answer) -> Result<(), WriteError> {
        let value = V::from_answer(answer).map_err(|m| m.at(name))?;
        self.insert(name.to_string(), value);
        Ok(())
    }
}

impl AnswerSink for Map<String, Value> {
    fn write_answer(&mut self, name: &str, answer: Answer) -> Result<(), WriteError> {
        let value = Value::from_answer(answer).map_err(|m| m.at(name))?;
        self.insert(name.to_string(), value);
        Ok(())
    }
}

/// Objects take the answer as a member; `null` becomes an object on first write.
impl AnswerSink for Value {
    fn write_answer(&mut self, name: &str, answer: Answer) -> Result<(), WriteError> {
        match self {
            Value::Object(map) => map.write_answer(name, answer),
            Value::Null => {
                let mut map = Map::new();
                map.write_answer(name, answer)?;
                *self = Value::Object(map);
                Ok(())
            }
            other => Err(WriteError::NotAddressable {
                kind: json_kind(other),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "JSON null",
        Value::Bool(_) => "JSON bool",
        Value::Number(_) => "JSON number",
        Value::String(_) => "JSON string",
        Value::Array(_) => "JSON array",
        Value::Object(_) => "JSON object",
    }
}

// === Whole-value sinks ===

// A scalar target has a single slot, so the question name is not consulted.
macro_rules! whole_value_sink {
    ($($ty:ty),* $(,)?) => {$(
        impl AnswerSink for $ty {
            fn write_answer(&mut self, name: &str, answer: Answer) -> Result<(), WriteError> {
                *self = <$ty as FromAnswer>::from_answer(answer).map_err(|m| m.at(name))?;
                Ok(())
            }
        }
    )*};
}

whole_value_sink!(
    Answer,
    String,
    bool,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    Choice,
    Vec<Choice>,
    Vec<String>,
    Vec<usize>,
);

impl<T: FromAnswer> AnswerSink for Option<T> {
    fn write_answer(&mut self, name: &str, answer: Answer) -> Result<(), WriteError> {
        *self = Some(T::from_answer(answer).map_err(|m| m.at(name))?);
        Ok(())
    }
}
