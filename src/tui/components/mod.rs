//! Prompt components and the contract they share with drivers.

mod chooser;
mod text_input;

use std::io;

use derive_more::{Display, Error, From};

pub use chooser::{Chooser, ChooserConfig, ChooserOption, DEFAULT_CURSOR, DEFAULT_PAGE_SIZE};
pub use text_input::{InputConfig, TextInput};

use super::event::{Event, Signal};

/// Result of input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Input is valid
    Valid,
    /// Input is invalid with an error message
    Invalid(String),
}

impl ValidationResult {
    /// Returns true if the validation passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Everything that can go wrong while prompting.
#[derive(Debug, Display, Error, From)]
pub enum PromptError {
    /// The user aborted, or the driver stopped delivering events.
    #[display("user cancelled operation")]
    #[from(ignore)]
    Cancelled,
    /// The prompt was configured with values it cannot work with.
    #[display("invalid prompt configuration: {reason}")]
    #[from(ignore)]
    InvalidConfig { reason: String },
    /// The terminal driver failed.
    #[display("terminal I/O failed: {_0}")]
    Io(#[error(source)] io::Error),
}

impl PromptError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Returns true when the error is a user (or driver) cancellation.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type for prompt operations.
///
/// - `Ok(value)` - User confirmed
/// - `Err(PromptError::Cancelled)` - User cancelled (Escape or Ctrl+C)
/// - `Err(_)` - Configuration or terminal error
pub type PromptResult<T> = Result<T, PromptError>;

/// A prompt that a driver can feed events to and draw.
pub trait Prompt {
    /// Value produced on confirmation.
    type Output;

    /// Applies one event and reports whether the prompt reached a final state.
    fn update(&mut self, event: &Event) -> Signal;

    /// Renders the current frame. Empty once the prompt has finished.
    fn view(&self) -> String;

    /// Cancels the prompt without an explicit user event.
    fn cancel(&mut self);

    /// Consumes the prompt, yielding its value or the cancellation error.
    fn into_result(self) -> PromptResult<Self::Output>;
}
