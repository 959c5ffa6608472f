use std::fmt;

/// An option picked from a `Select` or `MultiSelect` prompt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Choice {
    /// Position of the option in the list that was offered.
    pub index: usize,

    /// The option text as shown to the user.
    pub label: String,
}

impl Choice {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// A raw answer produced by a prompt.
///
/// The variant depends on the prompt that produced it: text-like prompts yield
/// strings, confirmations yield booleans, selections yield [`Choice`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Text from an input, password or editor prompt.
    String(String),

    /// A yes/no confirmation.
    Bool(bool),

    /// A whole number.
    Int(i64),

    /// A floating-point number.
    Float(f64),

    /// The single option picked from a select prompt.
    Choice(Choice),

    /// The options picked from a multi-select prompt, in list order.
    Choices(Vec<Choice>),
}

impl Answer {
    /// Try to get this answer as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this answer as a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this answer as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this answer as a float. Integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<&Choice> {
        match self {
            Self::Choice(choice) => Some(choice),
            _ => None,
        }
    }

    pub fn as_choices(&self) -> Option<&[Choice]> {
        match self {
            Self::Choices(choices) => Some(choices),
            _ => None,
        }
    }

    /// Get the type name of this answer for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Bool(_) => "Bool",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::Choice(_) => "Choice",
            Self::Choices(_) => "Choices",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Bool(true) => f.write_str("yes"),
            Self::Bool(false) => f.write_str("no"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Choice(choice) => f.write_str(&choice.label),
            Self::Choices(choices) => {
                for (i, choice) in choices.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(&choice.label)?;
                }
                Ok(())
            }
        }
    }
}

impl From<String> for Answer {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<bool> for Answer {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Answer {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Answer {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Answer {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Choice> for Answer {
    fn from(choice: Choice) -> Self {
        Self::Choice(choice)
    }
}

impl From<Vec<Choice>> for Answer {
    fn from(choices: Vec<Choice>) -> Self {
        Self::Choices(choices)
    }
}
