//! Ask for a favorite color.
//!
//! Run with `cargo run --example input`.

use anyhow::{Context, Result};
use bubblewrap::tui::{InputConfig, StyleAttr, Styler, input_with};

fn main() -> Result<()> {
    let config = InputConfig::builder()
        .prompt("What's your favorite color? > ")
        .cursor_style(Styler::from_attrs(&[StyleAttr::Reversed]))
        .build();

    let color = input_with(config).context("error getting input")?;
    println!("favorite color was: {color}");
    Ok(())
}
