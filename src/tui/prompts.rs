//! High-level prompt functions for common use cases.

use std::time::Duration;

use super::{
    app::{TerminalDriver, run},
    components::{Chooser, ChooserConfig, InputConfig, PromptResult, TextInput},
};

/// Lets the user pick any number of `options` on the terminal.
///
/// The configuration is checked before the terminal is touched, so a bad
/// page size fails without any screen output.
///
/// # Returns
///
/// - `Ok(values)` - The selected values, in list order
/// - `Err(PromptError::Cancelled)` - User cancelled (Escape or Ctrl+C)
/// - `Err(_)` - Invalid configuration or terminal error
///
/// # Example
///
/// ```ignore
/// let colors = choose(["red", "green", "blue"], ChooserConfig::default())?;
/// ```
pub fn choose<I, S>(options: I, config: ChooserConfig) -> PromptResult<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let chooser = Chooser::new(options, config)?;
    run(chooser, &mut TerminalDriver::new()?)
}

/// Like [`choose`], but gives up (as a cancellation) after `timeout`.
pub fn choose_with_timeout<I, S>(
    options: I,
    config: ChooserConfig,
    timeout: Duration,
) -> PromptResult<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let chooser = Chooser::new(options, config)?;
    run(chooser, &mut TerminalDriver::new()?.with_timeout(timeout))
}

/// Prompts for, well, input!
///
/// # Example
///
/// ```ignore
/// let color = input("What's your favorite color? > ")?;
/// ```
pub fn input(prompt: &str) -> PromptResult<String> {
    input_with(InputConfig::builder().prompt(prompt).build())
}

/// Prompts for input with a custom cursor style.
pub fn input_with(config: InputConfig) -> PromptResult<String> {
    run(TextInput::with_config(config), &mut TerminalDriver::new()?)
}

/// Like [`input_with`], but gives up (as a cancellation) after `timeout`.
pub fn input_with_timeout(config: InputConfig, timeout: Duration) -> PromptResult<String> {
    let mut driver = TerminalDriver::new()?.with_timeout(timeout);
    run(TextInput::with_config(config), &mut driver)
}
