//! Single-line text input with validation support.

use bon::Builder;
use log::debug;
use tui_input::{Input, InputRequest};

use super::{Prompt, PromptError, PromptResult, ValidationResult};
use crate::tui::{
    event::{Event, Key, Signal, Status},
    theme::{StyleAttr, Styler},
};

/// Construction-time settings for a [`TextInput`].
#[derive(Debug, Clone, Builder)]
pub struct InputConfig {
    /// Label drawn before the buffer
    #[builder(into)]
    pub prompt: String,
    /// Applied to the character under the edit position. Reversed video
    /// unless set, since the hardware cursor stays hidden.
    #[builder(default = default_cursor_style())]
    pub cursor_style: Styler,
}

fn default_cursor_style() -> Styler {
    Styler::from_attrs(&[StyleAttr::Reversed])
}

/// A text input prompt with optional validation.
///
/// Printable keys and pastes insert at the edit position, Enter confirms and
/// Escape or Ctrl+C cancels. Remaining editing keys follow the usual readline
/// bindings and are carried out by [`tui_input`].
pub struct TextInput<V>
where
    V: Fn(&str) -> ValidationResult,
{
    input: Input,
    config: InputConfig,
    validator: Option<V>,
    error: Option<String>,
    status: Status,
}

impl TextInput<fn(&str) -> ValidationResult> {
    /// Creates an empty input labelled with `prompt`.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self::with_config(InputConfig::builder().prompt(prompt).build())
    }

    #[must_use]
    pub fn with_config(config: InputConfig) -> Self {
        debug!("text input created with prompt '{}'", config.prompt);
        Self {
            input: Input::default(),
            config,
            validator: None,
            error: None,
            status: Status::Active,
        }
    }
}

impl<V> TextInput<V>
where
    V: Fn(&str) -> ValidationResult,
{
    /// Sets the validator function for the input.
    #[must_use]
    pub fn with_validator<NewV>(self, validator: NewV) -> TextInput<NewV>
    where
        NewV: Fn(&str) -> ValidationResult,
    {
        TextInput {
            input: self.input,
            config: self.config,
            validator: Some(validator),
            error: self.error,
            status: self.status,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.config.prompt
    }

    /// Edit position, counted in characters.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    #[must_use]
    pub fn aborted(&self) -> bool {
        self.status.is_aborted()
    }

    #[must_use]
    pub fn finished(&self) -> bool {
        self.status.is_finished()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current buffer contents. Empty once cancelled.
    #[must_use]
    pub fn value(&self) -> String {
        if self.aborted() {
            return String::new();
        }
        self.input.value().to_owned()
    }

    fn apply(&mut self, request: InputRequest) {
        self.input.handle(request);
    }

    fn confirm(&mut self) -> Signal {
        if let Some(ref validator) = self.validator
            && let ValidationResult::Invalid(msg) = validator(self.input.value())
        {
            debug!("text input rejected: {msg}");
            self.error = Some(msg);
            return Signal::Continue;
        }
        self.status = Status::Confirmed;
        debug!("text input confirmed");
        Signal::Confirmed
    }
}

/// Maps an editing key to the request `tui_input` understands.
fn edit_request(key: Key) -> Option<InputRequest> {
    let request = match key {
        Key::Char(c) => InputRequest::InsertChar(c),
        Key::Backspace | Key::Ctrl('h') => InputRequest::DeletePrevChar,
        Key::Delete | Key::Ctrl('d') => InputRequest::DeleteNextChar,
        Key::Left | Key::Ctrl('b') => InputRequest::GoToPrevChar,
        Key::Right | Key::Ctrl('f') => InputRequest::GoToNextChar,
        Key::Home | Key::Ctrl('a') => InputRequest::GoToStart,
        Key::End | Key::Ctrl('e') => InputRequest::GoToEnd,
        Key::Ctrl('u') => InputRequest::DeleteLine,
        Key::Ctrl('k') => InputRequest::DeleteTillEnd,
        Key::Ctrl('w') => InputRequest::DeletePrevWord,
        _ => return None,
    };
    Some(request)
}

impl<V> Prompt for TextInput<V>
where
    V: Fn(&str) -> ValidationResult,
{
    type Output = String;

    fn update(&mut self, event: &Event) -> Signal {
        if self.finished() {
            return self.status.signal();
        }
        self.error = None;

        match event {
            Event::Key(Key::Enter) => return self.confirm(),
            Event::Key(Key::Esc | Key::Ctrl('c')) => {
                self.cancel();
                return Signal::Cancelled;
            }
            Event::Key(key) => {
                if let Some(request) = edit_request(*key) {
                    self.apply(request);
                }
            }
            Event::Paste(text) => {
                // Single line: pasted line breaks are dropped.
                for c in text.chars().filter(|c| *c != '\n' && *c != '\r') {
                    self.apply(InputRequest::InsertChar(c));
                }
            }
            Event::Resize { .. } => {}
        }
        Signal::Continue
    }

    fn view(&self) -> String {
        if self.finished() {
            return String::new();
        }

        let value = self.input.value();
        let cursor = self.input.cursor();
        let before: String = value.chars().take(cursor).collect();
        let mut rest = value.chars().skip(cursor);
        let under = rest.next().map_or_else(|| " ".to_owned(), String::from);
        let after: String = rest.collect();

        let mut view = format!(
            "{}{before}{}{after}",
            self.config.prompt,
            self.config.cursor_style.paint(&under)
        );
        if let Some(err) = &self.error {
            view.push('\n');
            view.push_str(err);
        }
        view
    }

    fn cancel(&mut self) {
        if !self.finished() {
            debug!("text input cancelled");
            self.status = Status::Cancelled;
        }
    }

    fn into_result(self) -> PromptResult<String> {
        if self.aborted() {
            return Err(PromptError::Cancelled);
        }
        Ok(self.value())
    }
}
