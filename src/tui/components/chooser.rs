//! Multi-selection chooser with paging.

use bon::Builder;
use log::debug;

use super::{Prompt, PromptError, PromptResult, ValidationResult};
use crate::tui::{
    event::{Event, Key, Signal, Status},
    text::display_width,
    theme::Styles,
};

/// Options shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Glyph drawn in front of the option under the cursor.
pub const DEFAULT_CURSOR: &str = ">";

const CHECKED: &str = "[X] ";
const UNCHECKED: &str = "[ ] ";

/// Construction-time settings for a [`Chooser`].
#[derive(Debug, Clone, Builder)]
pub struct ChooserConfig {
    /// Number of options visible at once. Must be positive.
    #[builder(default = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
    /// Cursor glyph. Must not be empty. Other lines are padded to its
    /// display width.
    #[builder(default = DEFAULT_CURSOR.to_owned(), into)]
    pub cursor: String,
    #[builder(default)]
    pub styles: Styles,
}

impl Default for ChooserConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ChooserConfig {
    fn validate(&self) -> PromptResult<()> {
        if self.page_size == 0 {
            return Err(PromptError::invalid_config("page size must be positive"));
        }
        if self.cursor.is_empty() {
            return Err(PromptError::invalid_config("cursor glyph must not be empty"));
        }
        Ok(())
    }
}

/// An entry in the chooser list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChooserOption {
    pub value: String,
    pub selected: bool,
}

impl ChooserOption {
    fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            selected: false,
        }
    }
}

/// A paged multi-select list.
///
/// Space toggles the option under the cursor, the arrow keys move, Enter
/// confirms and Escape or Ctrl+C cancels. The visible page is always the one
/// containing the cursor.
pub struct Chooser<V>
where
    V: Fn(&[&str]) -> ValidationResult,
{
    options: Vec<ChooserOption>,
    cursor: usize,
    config: ChooserConfig,
    validator: Option<V>,
    error: Option<String>,
    status: Status,
}

impl Chooser<fn(&[&str]) -> ValidationResult> {
    /// Creates a chooser over `options` with nothing selected.
    ///
    /// An empty list is accepted; only an invalid `config` is an error.
    pub fn new<I, S>(options: I, config: ChooserConfig) -> PromptResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        config.validate()?;
        let options: Vec<ChooserOption> = options.into_iter().map(ChooserOption::new).collect();
        debug!(
            "chooser created with {} options, page size {}",
            options.len(),
            config.page_size
        );

        Ok(Self {
            options,
            cursor: 0,
            config,
            validator: None,
            error: None,
            status: Status::Active,
        })
    }
}

impl<V> Chooser<V>
where
    V: Fn(&[&str]) -> ValidationResult,
{
    /// Sets a validator that runs against the selected values on confirm.
    #[must_use]
    pub fn with_validator<NewV>(self, validator: NewV) -> Chooser<NewV>
    where
        NewV: Fn(&[&str]) -> ValidationResult,
    {
        Chooser {
            options: self.options,
            cursor: self.cursor,
            config: self.config,
            validator: Some(validator),
            error: self.error,
            status: self.status,
        }
    }

    #[must_use]
    pub fn options(&self) -> &[ChooserOption] {
        &self.options
    }

    /// Index of the option under the cursor.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Zero-based index of the visible page, derived from the cursor.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn page(&self) -> usize {
        self.cursor / self.config.page_size
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    /// Half-open range of option indices on the visible page.
    #[must_use]
    pub fn page_bounds(&self) -> (usize, usize) {
        let len = self.options.len();
        let first = self.page().saturating_mul(self.config.page_size).min(len);
        let last = first.saturating_add(self.config.page_size).min(len);
        (first, last)
    }

    #[must_use]
    pub fn aborted(&self) -> bool {
        self.status.is_aborted()
    }

    #[must_use]
    pub fn finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Pending validation message, if the last confirm was rejected.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Values of the selected options, in list order. Empty once cancelled.
    #[must_use]
    pub fn selected(&self) -> Vec<String> {
        if self.aborted() {
            return Vec::new();
        }
        self.selected_values().map(str::to_owned).collect()
    }

    fn selected_values(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.value.as_str())
    }

    fn toggle(&mut self) {
        if let Some(option) = self.options.get_mut(self.cursor) {
            option.selected = !option.selected;
        }
    }

    fn move_down(&mut self) {
        if self.cursor.saturating_add(1) < self.options.len() {
            self.cursor = self.cursor.saturating_add(1);
        }
    }

    fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.cursor.saturating_sub(1);
        }
    }

    fn confirm(&mut self) -> Signal {
        if let Some(ref validator) = self.validator {
            let selected: Vec<&str> = self.selected_values().collect();
            if let ValidationResult::Invalid(msg) = validator(&selected) {
                debug!("chooser selection rejected: {msg}");
                self.error = Some(msg);
                return Signal::Continue;
            }
        }
        self.status = Status::Confirmed;
        debug!("chooser confirmed with {} selected", self.selected_values().count());
        Signal::Confirmed
    }
}

impl<V> Prompt for Chooser<V>
where
    V: Fn(&[&str]) -> ValidationResult,
{
    type Output = Vec<String>;

    fn update(&mut self, event: &Event) -> Signal {
        if self.finished() {
            return self.status.signal();
        }
        self.error = None;
        let Event::Key(key) = event else {
            return Signal::Continue;
        };

        match key {
            Key::Char(' ') => self.toggle(),
            Key::Down => self.move_down(),
            Key::Up => self.move_up(),
            Key::Enter => return self.confirm(),
            Key::Esc | Key::Ctrl('c') => {
                self.cancel();
                return Signal::Cancelled;
            }
            _ => {}
        }
        Signal::Continue
    }

    fn view(&self) -> String {
        if self.finished() {
            return String::new();
        }

        let styles = &self.config.styles;
        let blank = " ".repeat(display_width(&self.config.cursor));
        let (first, _) = self.page_bounds();
        let mut view = String::new();

        for (idx, option) in self
            .options
            .iter()
            .enumerate()
            .skip(first)
            .take(self.config.page_size)
        {
            if idx == self.cursor {
                view.push_str(&styles.cursor.paint(&self.config.cursor));
            } else {
                view.push_str(&blank);
            }

            let (class, checkbox) = if option.selected {
                (&styles.selected_item, CHECKED)
            } else {
                (&styles.item, UNCHECKED)
            };
            view.push_str(&class.paint(&format!("{checkbox}{}", option.value)));
            view.push('\n');
        }

        if let Some(err) = &self.error {
            view.push_str(err);
            view.push('\n');
        }

        view
    }

    fn cancel(&mut self) {
        if !self.finished() {
            debug!("chooser cancelled");
            self.status = Status::Cancelled;
        }
    }

    fn into_result(self) -> PromptResult<Vec<String>> {
        if self.aborted() {
            return Err(PromptError::Cancelled);
        }
        Ok(self.selected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::theme::Styler;

    fn chooser(options: &[&str], page_size: usize) -> Chooser<fn(&[&str]) -> ValidationResult> {
        let config = ChooserConfig::builder().page_size(page_size).build();
        Chooser::new(options.iter().copied(), config).unwrap()
    }

    fn feed<P: Prompt>(prompt: &mut P, keys: &[Key]) -> Vec<Signal> {
        keys.iter().map(|&k| prompt.update(&Event::Key(k))).collect()
    }

    fn assert_page_invariant<V: Fn(&[&str]) -> ValidationResult>(c: &Chooser<V>) {
        if c.options().is_empty() {
            return;
        }
        assert!(c.cursor() < c.options().len());
        assert!(c.page() * c.page_size() <= c.cursor());
        assert!(c.cursor() < (c.page() + 1) * c.page_size());
    }

    #[test]
    fn test_defaults() {
        let config = ChooserConfig::default();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.cursor, DEFAULT_CURSOR);

        let c = chooser(&["one", "two"], DEFAULT_PAGE_SIZE);
        assert_eq!(c.cursor(), 0);
        assert_eq!(c.page(), 0);
        assert!(c.options().iter().all(|o| !o.selected));
        assert!(!c.finished());
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let config = ChooserConfig::builder().page_size(0).build();
        let err = Chooser::new(["one"], config).err().unwrap();
        assert!(matches!(err, PromptError::InvalidConfig { .. }));
    }

    #[test]
    fn test_empty_cursor_is_rejected() {
        let config = ChooserConfig::builder().cursor("").build();
        assert!(Chooser::new(["one"], config).is_err());
    }

    #[test]
    fn test_empty_list_is_valid() {
        let mut c = chooser(&[], 3);
        let signals = feed(&mut c, &[Key::Down, Key::Char(' '), Key::Up]);
        assert!(signals.iter().all(|s| *s == Signal::Continue));
        assert_eq!(c.cursor(), 0);
        assert_eq!(c.view(), "");
        assert_eq!(c.update(&Key::Enter.into()), Signal::Confirmed);
        assert_eq!(c.into_result().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_select_one() {
        let mut c = chooser(&["one", "two", "three"], 10);
        let signals = feed(&mut c, &[Key::Down, Key::Char(' '), Key::Enter]);
        assert_eq!(
            signals,
            vec![Signal::Continue, Signal::Continue, Signal::Confirmed]
        );
        assert!(c.finished());
        assert!(!c.aborted());
        assert_eq!(c.selected(), vec!["two"]);
    }

    #[test]
    fn test_select_two() {
        let mut c = chooser(&["one", "two", "three"], 10);
        feed(
            &mut c,
            &[Key::Down, Key::Char(' '), Key::Down, Key::Char(' '), Key::Enter],
        );
        assert_eq!(c.into_result().unwrap(), vec!["two", "three"]);
    }

    #[test]
    fn test_confirm_without_toggles_is_empty() {
        let mut c = chooser(&["one", "two", "three"], 10);
        assert_eq!(c.update(&Key::Enter.into()), Signal::Confirmed);
        assert!(c.selected().is_empty());
    }

    #[test]
    fn test_cancel_with_ctrl_c() {
        let mut c = chooser(&["one", "two", "three"], 10);
        feed(&mut c, &[Key::Char(' ')]);
        assert_eq!(c.update(&Key::Ctrl('c').into()), Signal::Cancelled);
        assert!(c.aborted());
        assert!(c.finished());
        assert!(c.selected().is_empty());
        assert_eq!(c.view(), "");
        assert!(c.into_result().unwrap_err().is_cancelled());
    }

    #[test]
    fn test_cancel_with_escape() {
        let mut c = chooser(&["one"], 10);
        assert_eq!(c.update(&Key::Esc.into()), Signal::Cancelled);
        assert!(c.aborted());
    }

    #[test]
    fn test_events_after_finish_are_ignored() {
        let mut c = chooser(&["one", "two"], 10);
        c.update(&Key::Enter.into());
        assert_eq!(c.update(&Key::Down.into()), Signal::Confirmed);
        assert_eq!(c.update(&Key::Esc.into()), Signal::Confirmed);
        assert_eq!(c.cursor(), 0);
        assert!(!c.aborted());
    }

    #[test]
    fn test_unknown_events_are_noops() {
        let mut c = chooser(&["one", "two"], 10);
        let before = c.view();
        assert_eq!(c.update(&Key::Char('x').into()), Signal::Continue);
        assert_eq!(c.update(&Key::Tab.into()), Signal::Continue);
        assert_eq!(c.update(&Event::Paste("two".into())), Signal::Continue);
        assert_eq!(
            c.update(&Event::Resize {
                width: 10,
                height: 10
            }),
            Signal::Continue
        );
        assert_eq!(c.view(), before);
    }

    #[test]
    fn test_cursor_stops_at_edges() {
        let mut c = chooser(&["one", "two"], 10);
        feed(&mut c, &[Key::Up, Key::Up]);
        assert_eq!(c.cursor(), 0);
        feed(&mut c, &[Key::Down, Key::Down, Key::Down]);
        assert_eq!(c.cursor(), 1);
    }

    #[test]
    fn test_double_toggle_restores() {
        let mut c = chooser(&["one", "two"], 10);
        feed(&mut c, &[Key::Char(' ')]);
        assert!(c.options()[0].selected);
        feed(&mut c, &[Key::Char(' ')]);
        assert!(!c.options()[0].selected);
    }

    #[test]
    fn test_page_invariant_holds_for_all_short_walks() {
        // Every up/down sequence of length 7, across list and page sizes.
        for len in 1..=6 {
            let names: Vec<String> = (0..len).map(|i| format!("opt{i}")).collect();
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            for page_size in 1..=4 {
                for walk in 0u32..(1 << 7) {
                    let mut c = chooser(&names, page_size);
                    for step in 0..7 {
                        let key = if walk & (1 << step) == 0 {
                            Key::Down
                        } else {
                            Key::Up
                        };
                        c.update(&key.into());
                        assert_page_invariant(&c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_result_matches_odd_toggle_counts() {
        let names = ["a", "b", "c", "d", "e"];
        // Each position toggled (pos + 1) times: a once, b twice, ...
        let mut c = chooser(&names, 2);
        for pos in 0..names.len() {
            for _ in 0..=pos {
                c.update(&Key::Char(' ').into());
            }
            c.update(&Key::Down.into());
        }
        c.update(&Key::Enter.into());
        assert_eq!(c.selected(), vec!["a", "c", "e"]);
    }

    #[test]
    fn test_result_keeps_list_order_not_selection_order() {
        let mut c = chooser(&["one", "two", "three"], 10);
        feed(
            &mut c,
            &[Key::Down, Key::Down, Key::Char(' '), Key::Up, Key::Up, Key::Char(' ')],
        );
        assert_eq!(c.selected(), vec!["one", "three"]);
    }

    #[test]
    fn test_view_basic_list() {
        let c = chooser(&["one", "two", "three"], 10);
        assert_eq!(c.view(), ">[ ] one\n [ ] two\n [ ] three\n");
    }

    #[test]
    fn test_view_with_selected() {
        let mut c = chooser(&["one", "two", "three"], 10);
        feed(&mut c, &[Key::Char(' ')]);
        assert_eq!(c.view(), ">[X] one\n [ ] two\n [ ] three\n");
    }

    #[test]
    fn test_view_paged_list() {
        let mut c = chooser(&["one", "two", "three", "four"], 2);
        feed(&mut c, &[Key::Down, Key::Down]);
        assert_eq!(c.page(), 1);
        assert_eq!(c.view(), ">[ ] three\n [ ] four\n");
    }

    #[test]
    fn test_view_paged_list_backwards() {
        let mut c = chooser(&["one", "two", "three", "four"], 2);
        feed(&mut c, &[Key::Down, Key::Down, Key::Up]);
        assert_eq!(c.page(), 0);
        assert_eq!(c.view(), " [ ] one\n>[ ] two\n");
    }

    #[test]
    fn test_view_paged_list_backwards_with_selected() {
        let mut c = chooser(&["one", "two", "three", "four"], 2);
        feed(
            &mut c,
            &[Key::Down, Key::Char(' '), Key::Down, Key::Char(' '), Key::Up],
        );
        assert_eq!(c.view(), " [ ] one\n>[X] two\n");
    }

    #[test]
    fn test_view_list_smaller_than_page() {
        let mut c = chooser(&["one", "two", "three", "four"], 10);
        feed(&mut c, &[Key::Down, Key::Down, Key::Up]);
        assert_eq!(c.view(), " [ ] one\n>[ ] two\n [ ] three\n [ ] four\n");
    }

    #[test]
    fn test_view_last_partial_page() {
        let mut c = chooser(&["one", "two", "three"], 2);
        feed(&mut c, &[Key::Down, Key::Down]);
        assert_eq!(c.page_bounds(), (2, 3));
        assert_eq!(c.view(), ">[ ] three\n");
    }

    #[test]
    fn test_view_applies_style_classes() {
        let styles = Styles {
            cursor: Styler::new(|s| format!("<c>{s}</c>")),
            item: Styler::new(|s| format!("<i>{s}</i>")),
            selected_item: Styler::new(|s| format!("<s>{s}</s>")),
        };
        let config = ChooserConfig::builder().styles(styles).build();
        let mut c = Chooser::new(["one", "two"], config).unwrap();
        feed(&mut c, &[Key::Down, Key::Char(' ')]);
        assert_eq!(c.view(), " <i>[ ] one</i>\n<c>></c><s>[X] two</s>\n");
    }

    #[test]
    fn test_view_wide_cursor_pads_other_lines() {
        let config = ChooserConfig::builder().cursor("->").build();
        let c = Chooser::new(["one", "two"], config).unwrap();
        assert_eq!(c.view(), "->[ ] one\n  [ ] two\n");
    }

    #[test]
    fn test_view_double_width_cursor_pads_by_cells() {
        let config = ChooserConfig::builder().cursor("👉").build();
        let c = Chooser::new(["one", "two"], config).unwrap();
        assert_eq!(c.view(), "👉[ ] one\n  [ ] two\n");
    }

    #[test]
    fn test_any_event_clears_validation_message() {
        let mut c = chooser(&["one", "two"], 10).with_validator(|_: &[&str]| {
            ValidationResult::Invalid("never valid".into())
        });
        let events = [
            Event::Key(Key::Up),
            Event::Key(Key::Tab),
            Event::Paste("one".into()),
            Event::Resize {
                width: 80,
                height: 24,
            },
        ];

        for event in events {
            c.update(&Key::Enter.into());
            assert_eq!(c.error(), Some("never valid"));
            assert_eq!(c.update(&event), Signal::Continue);
            assert_eq!(c.error(), None);
            assert_eq!(c.view(), ">[ ] one\n [ ] two\n");
        }
    }

    #[test]
    fn test_validator_blocks_confirm() {
        let mut c = chooser(&["one", "two"], 10).with_validator(|selected: &[&str]| {
            if selected.is_empty() {
                ValidationResult::Invalid("Select at least one".into())
            } else {
                ValidationResult::Valid
            }
        });

        assert_eq!(c.update(&Key::Enter.into()), Signal::Continue);
        assert!(!c.finished());
        assert_eq!(c.error(), Some("Select at least one"));
        assert_eq!(c.view(), ">[ ] one\n [ ] two\nSelect at least one\n");

        c.update(&Key::Char(' ').into());
        assert_eq!(c.error(), None);
        assert_eq!(c.update(&Key::Enter.into()), Signal::Confirmed);
        assert_eq!(c.into_result().unwrap(), vec!["one"]);
    }
}
