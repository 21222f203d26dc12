//! Style classes applied by the prompt renderers.
//!
//! Components only decide which class a piece of text belongs to. What a class
//! looks like is up to the [`Styler`] configured for it, which defaults to
//! leaving the text untouched.
//!
//! `colored` decides on its own whether to emit escapes by looking at stdout.
//! Prompts draw on stderr, so the terminal driver settles it with
//! `enable_styling` instead.

use std::{fmt, str::FromStr, sync::Arc};

use colored::{Color, ColoredString, Colorize};
use serde::Deserialize;

/// A function from plain text to decorated text.
#[derive(Clone)]
pub struct Styler(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl Styler {
    /// Wraps an arbitrary decoration function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Returns text unchanged.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(|text| text.to_owned())
    }

    /// Builds a styler from named attributes, rendered with `colored`.
    ///
    /// An empty list yields the identity styler.
    #[must_use]
    pub fn from_attrs(attrs: &[StyleAttr]) -> Self {
        if attrs.is_empty() {
            return Self::identity();
        }
        let attrs = attrs.to_vec();
        Self::new(move |text| {
            attrs
                .iter()
                .fold(text.normal(), |styled, attr| attr.apply(styled))
                .to_string()
        })
    }

    #[must_use]
    pub fn paint(&self, text: &str) -> String {
        (self.0)(text)
    }
}

/// Forces styled output on or off regardless of where stdout points.
pub(crate) fn enable_styling(enabled: bool) {
    colored::control::set_override(enabled);
}

impl Default for Styler {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Styler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Styler(..)")
    }
}

/// The three style classes a chooser renders with.
#[derive(Debug, Clone, Default)]
pub struct Styles {
    /// Applied to the cursor glyph; the blank placeholder on other lines is left plain
    pub cursor: Styler,
    /// Applied to the checkbox and value of unselected options
    pub item: Styler,
    /// Applied to the checkbox and value of selected options
    pub selected_item: Styler,
}

/// A single named text attribute, as written in the settings file.
///
/// Accepts `bold`, `dimmed`, `italic`, `underline` and `reversed`, plus any
/// foreground color `colored` can parse: the eight ANSI names (and `purple`),
/// their `bright_` variants, `#rrggbb` and `#rgb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum StyleAttr {
    Bold,
    Dimmed,
    Italic,
    Underline,
    Reversed,
    Fg(Color),
}

impl StyleAttr {
    fn apply(self, styled: ColoredString) -> ColoredString {
        match self {
            Self::Bold => styled.bold(),
            Self::Dimmed => styled.dimmed(),
            Self::Italic => styled.italic(),
            Self::Underline => styled.underline(),
            Self::Reversed => styled.reversed(),
            Self::Fg(color) => styled.color(color),
        }
    }
}

impl FromStr for StyleAttr {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let attr = match name.trim().to_ascii_lowercase().as_str() {
            "bold" => Self::Bold,
            "dimmed" | "dim" => Self::Dimmed,
            "italic" => Self::Italic,
            "underline" => Self::Underline,
            "reversed" | "reverse" => Self::Reversed,
            color => Self::Fg(parse_color(color)?),
        };
        Ok(attr)
    }
}

impl TryFrom<String> for StyleAttr {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn parse_color(name: &str) -> Result<Color, String> {
    // colored slices hex digits by byte offset
    if !name.is_ascii() {
        return Err(format!("unknown style attribute: {name}"));
    }
    name.replace('_', " ")
        .parse::<Color>()
        .map_err(|()| format!("unknown style attribute: {name}"))
}
