//! Event-loop drivers and the loop that connects them to a prompt.

use std::{
    collections::VecDeque,
    io::{self, IsTerminal, Stderr, Write},
    time::{Duration, Instant},
};

use crossterm::{
    QueueableCommand,
    cursor::{Hide, MoveToColumn, MoveUp, Show},
    event::{self as term, DisableBracketedPaste, EnableBracketedPaste},
    execute,
    style::Print,
    terminal::{self, Clear, ClearType, disable_raw_mode, enable_raw_mode},
};
use log::{debug, warn};

use super::{
    components::{Prompt, PromptResult},
    event::{Event, Signal},
    text::wrapped_rows,
    theme,
};

/// Source of events and sink of frames for a running prompt.
pub trait Driver {
    /// Blocks until the next event. `Ok(None)` means no more events will
    /// arrive, which the prompt treats as a cancellation.
    fn next_event(&mut self) -> io::Result<Option<Event>>;

    /// Replaces the previously drawn frame with `frame`.
    fn draw(&mut self, frame: &str) -> io::Result<()>;
}

/// Runs `prompt` until it confirms or cancels.
///
/// The first frame is drawn before any event is read, every non-final event is
/// followed by a redraw, and the final (empty) frame clears the surface.
pub fn run<P, D>(mut prompt: P, driver: &mut D) -> PromptResult<P::Output>
where
    P: Prompt,
    D: Driver + ?Sized,
{
    driver.draw(&prompt.view())?;

    loop {
        let Some(event) = driver.next_event()? else {
            debug!("event stream ended before the prompt finished");
            prompt.cancel();
            break;
        };

        let signal = prompt.update(&event);
        if signal.is_terminal() {
            debug!("prompt {signal}");
            break;
        }
        driver.draw(&prompt.view())?;
    }

    driver.draw(&prompt.view())?;
    prompt.into_result()
}

/// Drives a prompt on the real terminal.
///
/// Frames are drawn inline on stderr, below the current cursor line, so the
/// caller's stdout stays free for the result. Raw mode, bracketed paste and a
/// hidden cursor are set up on creation and restored on drop (even on panic).
/// Styling follows whether stderr is a terminal, not stdout, so piping the
/// result elsewhere keeps the prompt styled.
pub struct TerminalDriver {
    out: Stderr,
    /// Physical rows between the top of the last frame and the cursor
    rows: usize,
    deadline: Option<Instant>,
}

impl TerminalDriver {
    /// Takes over the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails, e.g. when stdin is not a TTY.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stderr();
        if let Err(e) = execute!(out, EnableBracketedPaste, Hide) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        theme::enable_styling(out.is_terminal());
        debug!("terminal driver started");
        Ok(Self {
            out,
            rows: 0,
            deadline: None,
        })
    }

    /// Stops delivering events once `timeout` has elapsed.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    fn read_event(&self) -> io::Result<Option<term::Event>> {
        let Some(deadline) = self.deadline else {
            return term::read().map(Some);
        };
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() || !term::poll(remaining)? {
            return Ok(None);
        }
        term::read().map(Some)
    }
}

impl Driver for TerminalDriver {
    fn next_event(&mut self) -> io::Result<Option<Event>> {
        loop {
            let Some(raw) = self.read_event()? else {
                warn!("prompt deadline elapsed");
                return Ok(None);
            };
            if let Some(event) = Event::from_terminal(raw) {
                return Ok(Some(event));
            }
        }
    }

    fn draw(&mut self, frame: &str) -> io::Result<()> {
        if self.rows > 0 {
            self.out
                .queue(MoveUp(u16::try_from(self.rows).unwrap_or(u16::MAX)))?;
        }
        self.out.queue(MoveToColumn(0))?;
        self.out.queue(Clear(ClearType::FromCursorDown))?;

        let body = frame.trim_end_matches('\n');
        for (idx, line) in body.split('\n').enumerate() {
            if idx > 0 {
                self.out.queue(Print("\r\n"))?;
            }
            self.out.queue(Print(line))?;
        }

        let (columns, _) = terminal::size()?;
        self.rows = rows_above_cursor(body, columns);
        self.out.flush()
    }
}

/// Rows the cursor sits below the first row of `body` once it is drawn in a
/// terminal `columns` wide. Long lines wrap, so one line can take several rows.
fn rows_above_cursor(body: &str, columns: u16) -> usize {
    if body.is_empty() {
        return 0;
    }
    body.split('\n')
        .map(|line| wrapped_rows(line, columns))
        .sum::<usize>()
        .saturating_sub(1)
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        // Attempt to restore terminal state, ignoring errors during cleanup
        let _ = execute!(self.out, DisableBracketedPaste, Show);
        let _ = disable_raw_mode();
        debug!("terminal driver stopped");
    }
}

/// Replays a fixed list of events and records every frame drawn.
///
/// Once the script runs out the driver reports end of input, so a script
/// without a confirm or cancel ends in cancellation.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    events: VecDeque<Event>,
    frames: Vec<String>,
}

impl ScriptedDriver {
    #[must_use]
    pub fn new<I>(events: I) -> Self
    where
        I: IntoIterator<Item = Event>,
    {
        Self {
            events: events.into_iter().collect(),
            frames: Vec::new(),
        }
    }

    /// Frames drawn so far, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// Events not consumed by the prompt.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl Driver for ScriptedDriver {
    fn next_event(&mut self) -> io::Result<Option<Event>> {
        Ok(self.events.pop_front())
    }

    fn draw(&mut self, frame: &str) -> io::Result<()> {
        self.frames.push(frame.to_owned());
        Ok(())
    }
}
