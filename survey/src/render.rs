//! Rendering of validation failures for the user.

use std::fmt;

use console::Style;
use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderErrorReason,
};
use serde_json::{Map, Value};

use crate::RenderError;

/// The template used for rejected replies unless another one is configured.
pub const DEFAULT_ERROR_TEMPLATE: &str =
    "{{color \"red\"}}✘ Sorry, your reply was invalid: {{.Error}}{{color \"reset\"}}\n";

const RESET: &str = "\u{1b}[0m";

// Template data key telling the `color` helper whether to emit escape codes.
const COLORS_KEY: &str = "__colors";

/// Turns a validation failure into the text shown to the user.
pub trait ErrorRenderer {
    fn render(&self, reason: &str) -> Result<String, RenderError>;
}

impl<F> ErrorRenderer for F
where
    F: Fn(&str) -> Result<String, RenderError>,
{
    fn render(&self, reason: &str) -> Result<String, RenderError> {
        self(reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stderr,
    Stdout,
}

/// Renders failures through a handlebars template.
///
/// Two directives are understood:
/// - `{{.Error}}` is replaced by the failure message. The leading dot is
///   optional, so `{{Error}}` works too.
/// - `{{color "name"}}` styles the text that follows. Names are the eight
///   basic terminal colors, optionally suffixed with `+b` (bold) and/or `+u`
///   (underlined); `reset` switches styling off again.
///
/// Unless forced with [`colored`](Self::colored), colors follow `console`'s
/// detection for standard error, where prompts are shown by default. Use
/// [`for_stdout`](Self::for_stdout) when the survey runs on standard output.
///
/// # Example
///
/// ```
/// use survey::{ErrorRenderer, TemplateRenderer};
///
/// let renderer = TemplateRenderer::new("[{{.Error}}]").colored(false);
/// assert_eq!(renderer.render("too short").unwrap(), "[too short]");
/// ```
pub struct TemplateRenderer {
    template: String,
    /// Forced styling; `None` leaves the decision to `console`.
    colored: Option<bool>,
    stream: Stream,
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new(template: impl AsRef<str>) -> Self {
        Self {
            template: handlebars_syntax(template.as_ref()),
            colored: None,
            stream: Stream::Stderr,
            handlebars: registry(),
        }
    }

    /// Force colors on or off regardless of the terminal.
    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = Some(colored);
        self
    }

    /// Detect color support on standard output instead of standard error.
    pub fn for_stdout(mut self) -> Self {
        self.stream = Stream::Stdout;
        self
    }

    fn colors_enabled(&self) -> bool {
        self.colored.unwrap_or_else(|| match self.stream {
            Stream::Stderr => console::colors_enabled_stderr(),
            Stream::Stdout => console::colors_enabled(),
        })
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_TEMPLATE)
    }
}

impl Clone for TemplateRenderer {
    fn clone(&self) -> Self {
        Self {
            template: self.template.clone(),
            colored: self.colored,
            stream: self.stream,
            handlebars: registry(),
        }
    }
}

impl fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateRenderer")
            .field("template", &self.template)
            .field("colored", &self.colored)
            .field("stream", &self.stream)
            .finish_non_exhaustive()
    }
}

impl ErrorRenderer for TemplateRenderer {
    fn render(&self, reason: &str) -> Result<String, RenderError> {
        let mut data = Map::new();
        data.insert("Error".into(), Value::String(reason.to_string()));
        data.insert(COLORS_KEY.into(), Value::Bool(self.colors_enabled()));

        self.handlebars
            .render_template(&self.template, &Value::Object(data))
            .map_err(render_error)
    }
}

fn registry() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.register_helper("color", Box::new(helper_color));
    handlebars
}

/// Drop the leading dot of `{{.Name}}` references.
fn handlebars_syntax(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut parts = template.split("{{");
    if let Some(head) = parts.next() {
        out.push_str(head);
    }
    for part in parts {
        out.push_str("{{");
        let trimmed = part.trim_start();
        match trimmed.strip_prefix('.') {
            Some(rest) => {
                out.push_str(&part[..part.len() - trimmed.len()]);
                out.push_str(rest);
            }
            None => out.push_str(part),
        }
    }
    out
}

fn render_error(err: handlebars::RenderError) -> RenderError {
    match err.reason() {
        RenderErrorReason::MissingVariable(Some(path)) => {
            RenderError::UnknownDirective(path.clone())
        }
        RenderErrorReason::HelperNotFound(name) => RenderError::UnknownDirective(name.clone()),
        RenderErrorReason::NestedError(inner) => match inner.downcast_ref::<RenderError>() {
            Some(own) => own.clone(),
            None => RenderError::Template(err.to_string()),
        },
        _ => RenderError::Template(err.to_string()),
    }
}

fn nested(err: RenderError) -> handlebars::RenderError {
    RenderErrorReason::NestedError(Box::new(err)).into()
}

fn helper_color(
    h: &Helper,
    _: &Handlebars,
    ctx: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let name = h
        .param(0)
        .and_then(|param| param.value().as_str())
        .ok_or_else(|| nested(RenderError::UnknownDirective("color".to_string())))?;
    let style = parse_color(name).map_err(nested)?;

    let enabled = ctx
        .data()
        .get(COLORS_KEY)
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if enabled {
        match style {
            Some(style) => out.write(&escape_codes(style))?,
            None => out.write(RESET)?,
        }
    }
    Ok(())
}

/// `None` for `reset`.
fn parse_color(name: &str) -> Result<Option<Style>, RenderError> {
    let unknown = || RenderError::UnknownColor(name.to_string());

    let mut parts = name.split('+');
    let base = parts.next().unwrap_or_default();
    let mut style = match base {
        "reset" => return Ok(None),
        "black" => Style::new().black(),
        "red" => Style::new().red(),
        "green" => Style::new().green(),
        "yellow" => Style::new().yellow(),
        "blue" => Style::new().blue(),
        "magenta" => Style::new().magenta(),
        "cyan" => Style::new().cyan(),
        "white" => Style::new().white(),
        _ => return Err(unknown()),
    };
    for modifier in parts {
        style = match modifier {
            "b" => style.bold(),
            "u" => style.underlined(),
            _ => return Err(unknown()),
        };
    }
    Ok(Some(style))
}

/// The escape sequence `console` opens a run of styled text with.
fn escape_codes(style: Style) -> String {
    const MARK: char = '\u{0}';
    let styled = style.force_styling(true).apply_to(MARK).to_string();
    styled.split(MARK).next().unwrap_or_default().to_string()
}
