//! Line-based terminal I/O.
//!
//! [`Console`] wraps any `BufRead`/`Write` pair, so the interactive menu
//! runs the same way against stdin/stdout and against in-memory buffers in
//! tests. A closed input stream surfaces as [`CliError::EndOfInput`].
//!
//! For a live terminal, [`ChannelInput`] reads stdin on a helper thread and
//! receives Ctrl-C through the same channel, so an interrupt ends the waiting
//! prompt with [`CliError::Interrupted`] instead of killing the process.

use crate::error::{CliError, CliResult};
use std::fmt::Display;
use std::io::{self, BufRead, Read, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use thiserror::Error;
use tracing::debug;
use unireg_core::{MAX_GRADE, MIN_GRADE};

/// Carried inside the `io::Error` that [`ChannelInput`] returns on Ctrl-C.
#[derive(Debug, Error)]
#[error("interrupted by user")]
struct InterruptSignal;

fn is_interrupt(err: &io::Error) -> bool {
    err.get_ref()
        .is_some_and(|inner| inner.is::<InterruptSignal>())
}

/// One event delivered to a [`ChannelInput`].
#[derive(Debug)]
pub enum InputEvent {
    /// Raw bytes of one line, including its newline.
    Line(Vec<u8>),
    /// Ctrl-C was pressed.
    Interrupt,
    /// Reading the terminal failed.
    Failed(io::Error),
    /// The terminal reached end of input.
    Closed,
}

/// Line input received over a channel.
pub struct ChannelInput {
    events: Receiver<InputEvent>,
    line: Vec<u8>,
    pos: usize,
    closed: bool,
}

impl ChannelInput {
    /// Creates an input fed by `events`. A disconnected channel reads as end of input.
    pub fn new(events: Receiver<InputEvent>) -> Self {
        Self {
            events,
            line: Vec::new(),
            pos: 0,
            closed: false,
        }
    }

    /// Reads stdin on a helper thread and installs a Ctrl-C handler that
    /// sends [`InputEvent::Interrupt`].
    ///
    /// # Errors
    ///
    /// Returns an error if the handler is already installed or the thread
    /// cannot be spawned.
    pub fn stdin() -> CliResult<Self> {
        let (events, receiver) = mpsc::channel();
        let interrupts = events.clone();
        ctrlc::set_handler(move || {
            let _ = interrupts.send(InputEvent::Interrupt);
        })?;
        thread::Builder::new()
            .name("stdin-reader".to_string())
            .spawn(move || forward_stdin(&events))?;
        Ok(Self::new(receiver))
    }
}

fn forward_stdin(events: &Sender<InputEvent>) {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        let mut line = Vec::new();
        let event = match input.read_until(b'\n', &mut line) {
            Ok(0) => InputEvent::Closed,
            Ok(_) => InputEvent::Line(line),
            Err(err) => InputEvent::Failed(err),
        };
        let last = !matches!(event, InputEvent::Line(_));
        if events.send(event).is_err() || last {
            debug!("stdin reader stopped");
            return;
        }
    }
}

impl Read for ChannelInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for ChannelInput {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos >= self.line.len() && !self.closed {
            match self.events.recv() {
                Ok(InputEvent::Line(line)) => {
                    self.line = line;
                    self.pos = 0;
                }
                Ok(InputEvent::Interrupt) => return Err(io::Error::other(InterruptSignal)),
                Ok(InputEvent::Failed(err)) => {
                    self.closed = true;
                    return Err(err);
                }
                Ok(InputEvent::Closed) | Err(_) => self.closed = true,
            }
        }
        Ok(&self.line[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.line.len());
    }
}

/// Prompting reader and line writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the output stream.
    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Writes one line.
    pub fn line(&mut self, text: impl Display) -> CliResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Writes an empty line.
    pub fn blank(&mut self) -> CliResult<()> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Writes a success line.
    pub fn ok(&mut self, text: impl Display) -> CliResult<()> {
        self.line(format_args!("✓ {text}"))
    }

    /// Writes a failure line.
    pub fn fail(&mut self, text: impl Display) -> CliResult<()> {
        self.line(format_args!("✗ {text}"))
    }

    /// Writes a titled menu and reads the choice.
    pub fn menu(&mut self, title: &str, items: &[(&str, &str)]) -> CliResult<String> {
        self.blank()?;
        self.line(format_args!("=== {title} ==="))?;
        for (key, label) in items {
            self.line(format_args!("{key}. {label}"))?;
        }
        self.ask("Enter your choice: ")
    }

    /// Prints `prompt` and reads one trimmed line.
    pub fn ask(&mut self, prompt: &str) -> CliResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        let read = match self.input.read_line(&mut buf) {
            Err(err) if is_interrupt(&err) => {
                writeln!(self.output)?;
                return Err(CliError::Interrupted);
            }
            other => other?,
        };
        if read == 0 {
            writeln!(self.output)?;
            return Err(CliError::EndOfInput);
        }
        Ok(buf.trim().to_string())
    }

    /// Reads a line and upper-cases it, for course and department codes.
    pub fn ask_code(&mut self, prompt: &str) -> CliResult<String> {
        Ok(self.ask(prompt)?.to_uppercase())
    }

    /// Reads lines until `parse` accepts one, reporting each rejection.
    pub fn ask_until<T>(
        &mut self,
        prompt: &str,
        mut parse: impl FnMut(&str) -> Result<T, String>,
    ) -> CliResult<T> {
        loop {
            let raw = self.ask(prompt)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(message) => self.fail(message)?,
            }
        }
    }

    /// Asks a yes/no question. Only `yes` counts as yes.
    pub fn confirm(&mut self, prompt: &str) -> CliResult<bool> {
        Ok(self.ask(prompt)?.eq_ignore_ascii_case("yes"))
    }
}

/// Accepts any non-empty text.
pub fn non_empty(raw: &str) -> Result<String, String> {
    if raw.is_empty() {
        return Err("This field cannot be empty.".to_string());
    }
    Ok(raw.to_string())
}

/// Accepts a positive whole number.
pub fn positive_number(raw: &str) -> Result<u32, String> {
    match raw.parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err("Please enter a positive whole number.".to_string()),
    }
}

/// Accepts a grade within the allowed range.
pub fn grade(raw: &str) -> Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(value) if (MIN_GRADE..=MAX_GRADE).contains(&value) => Ok(value),
        _ => Err(format!(
            "Grade must be a number between {MIN_GRADE:.1} and {MAX_GRADE:.1}."
        )),
    }
}

/// Returns `None` for a blank answer, keeping the current value.
pub fn keep_if_blank(raw: String) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw)
    }
}
