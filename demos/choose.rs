//! Pick some colors with custom styles.
//!
//! Run with `cargo run --example choose`.

use anyhow::Result;
use bubblewrap::{
    PromptError,
    tui::{ChooserConfig, StyleAttr, Styler, Styles, choose},
};

fn styler(attr: &str) -> Result<Styler> {
    let attr: StyleAttr = attr.parse().map_err(anyhow::Error::msg)?;
    Ok(Styler::from_attrs(&[attr]))
}

fn main() -> Result<()> {
    let options = ["red", "green", "blue"];
    let styles = Styles {
        cursor: styler("#3170a9")?,
        item: styler("#fff000")?,
        selected_item: styler("#43aa3d")?,
    };

    match choose(options, ChooserConfig::builder().styles(styles).build()) {
        Ok(choice) => println!("your choices are: {choice:?}"),
        Err(PromptError::Cancelled) => eprintln!("[warn] user canceled"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
