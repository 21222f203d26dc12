//! Interactive terminal prompts.
//!
//! This module provides two prompt components and the plumbing to run them:
//! - `Chooser` - Paged multi-selection with toggle
//! - `TextInput` - Single-line text input
//!
//! Components are plain state machines fed with [`Event`]s. A [`Driver`]
//! supplies the events and draws the frames; [`run`] ties the two together.

mod app;
pub mod components;
pub mod event;
mod prompts;
mod text;
mod theme;

pub use app::{Driver, ScriptedDriver, TerminalDriver, run};
pub use components::{
    Chooser, ChooserConfig, ChooserOption, InputConfig, Prompt, PromptError, PromptResult,
    TextInput, ValidationResult,
};
pub use event::{Event, Key, Signal};
pub use prompts::{choose, choose_with_timeout, input, input_with, input_with_timeout};
pub use theme::{StyleAttr, Styler, Styles};
