mod loader;
pub use loader::{CONFIG_FILE_NAME, Settings, StyleSettings};
