mod common;
pub mod config;
mod logging;
pub mod tui;

pub use common::{ENV_CONFIG_DIR_OVERRIDE, PROJECT_NAME, PROJECT_VERSION};
pub use config::Settings;
pub use logging::Logging;
pub use tui::{PromptError, PromptResult, choose, input};
