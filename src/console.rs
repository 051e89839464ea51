//! Console commands and the line-oriented loop that feeds them.

use core::fmt::{self, Write as _};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Timer};
use embedded_io_async::{Read, Write};
use heapless::{String, Vec};

use crate::delay::{BlinkDelay, ParseDelayError};
use crate::log::{error, info, warn};
use crate::mailbox::{Mailbox, MailboxError, Wait};
use crate::{MAX_COMMAND_ARGS, MAX_COMMAND_LINE_LENGTH, PROMPT, SEND_TIMEOUT_MS};

pub const STATUS_OK: i32 = 0;
pub const STATUS_INVALID_ARG: i32 = 0x102;
pub const STATUS_NOT_FOUND: i32 = 0x105;
pub const STATUS_TIMEOUT: i32 = 0x107;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub enum CommandError {
    /// Wrong number of arguments; carries the usage line to show.
    Usage(&'static str),
    InvalidDelay(ParseDelayError),
    UnknownCommand,
    TooManyArguments,
    Timeout,
}

impl CommandError {
    /// Non-zero status reported back to the user.
    pub fn code(&self) -> i32 {
        match self {
            CommandError::Usage(_)
            | CommandError::InvalidDelay(_)
            | CommandError::TooManyArguments => STATUS_INVALID_ARG,
            CommandError::UnknownCommand => STATUS_NOT_FOUND,
            CommandError::Timeout => STATUS_TIMEOUT,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Usage(usage) => write!(f, "Usage: {}", usage),
            CommandError::InvalidDelay(err) => {
                write!(f, "Invalid delay ({}). Usage: {}", err, DELAY_USAGE)
            }
            CommandError::UnknownCommand => write!(f, "Unknown command"),
            CommandError::TooManyArguments => write!(f, "Too many arguments"),
            CommandError::Timeout => write!(f, "Blink task busy, delay not applied"),
        }
    }
}

impl From<MailboxError> for CommandError {
    fn from(_: MailboxError) -> Self {
        CommandError::Timeout
    }
}

const DELAY_USAGE: &str = "delay <delay in milliseconds>";
const SEND_USAGE: &str = "send <text>";

/// Validates console commands and forwards delay updates to the mailbox.
pub struct Dispatcher<'a, M: RawMutex, const N: usize> {
    mailbox: &'a Mailbox<M, N>,
    wait: Wait,
}

impl<'a, M: RawMutex, const N: usize> Dispatcher<'a, M, N> {
    pub fn new(mailbox: &'a Mailbox<M, N>) -> Self {
        Self {
            mailbox,
            wait: Wait::Bounded(Duration::from_millis(SEND_TIMEOUT_MS)),
        }
    }

    pub fn with_wait(mut self, wait: Wait) -> Self {
        self.wait = wait;
        self
    }

    /// Split `line` on whitespace and dispatch it. Blank lines are a no-op.
    pub async fn execute(&self, line: &str) -> Result<(), CommandError> {
        let mut args: Vec<&str, MAX_COMMAND_ARGS> = Vec::new();
        for token in line.split_whitespace() {
            args.push(token).map_err(|_| CommandError::TooManyArguments)?;
        }
        if args.is_empty() {
            return Ok(());
        }
        self.dispatch(&args).await
    }

    /// `args[0]` is the command name.
    pub async fn dispatch(&self, args: &[&str]) -> Result<(), CommandError> {
        let result = match args.first() {
            Some(&"delay") => self.delay_command(&args[1..]).await,
            Some(&"send") => send_command(&args[1..]),
            Some(_) => Err(CommandError::UnknownCommand),
            None => Ok(()),
        };
        if let Err(err) = &result {
            warn!("Command rejected: {}", err);
        }
        result
    }

    async fn delay_command(&self, args: &[&str]) -> Result<(), CommandError> {
        let [value] = args else {
            return Err(CommandError::Usage(DELAY_USAGE));
        };
        let delay: BlinkDelay = value.parse().map_err(CommandError::InvalidDelay)?;
        self.mailbox.send(delay, self.wait).await?;
        info!("Queued blink delay of {} ms", delay.as_millis());
        Ok(())
    }
}

fn send_command(args: &[&str]) -> Result<(), CommandError> {
    if args.is_empty() {
        return Err(CommandError::Usage(SEND_USAGE));
    }
    let mut text: String<MAX_COMMAND_LINE_LENGTH> = String::new();
    for (i, word) in args.iter().enumerate() {
        if i > 0 {
            let _ = text.push(' ');
        }
        if text.push_str(word).is_err() {
            break;
        }
    }
    info!("{}", text.as_str());
    Ok(())
}

/// Map a command result to the status shown to the user.
pub fn status(result: &Result<(), CommandError>) -> i32 {
    match result {
        Ok(()) => STATUS_OK,
        Err(err) => err.code(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    Pending,
    Complete,
    Overflow,
}

/// Accumulates console bytes until a line terminator.
#[derive(Default)]
pub struct LineBuffer {
    line: String<MAX_COMMAND_LINE_LENGTH>,
    overflowed: bool,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, byte: u8) -> LineEvent {
        match byte {
            b'\r' | b'\n' => {
                if self.overflowed {
                    self.clear();
                    LineEvent::Overflow
                } else if self.line.trim().is_empty() {
                    self.clear();
                    LineEvent::Pending
                } else {
                    LineEvent::Complete
                }
            }
            // backspace / delete
            0x08 | 0x7f => {
                self.line.pop();
                LineEvent::Pending
            }
            b if b.is_ascii() && !b.is_ascii_control() => {
                if !self.overflowed && self.line.push(b as char).is_err() {
                    self.overflowed = true;
                }
                LineEvent::Pending
            }
            _ => LineEvent::Pending,
        }
    }

    pub fn as_str(&self) -> &str {
        self.line.as_str()
    }

    pub fn clear(&mut self) {
        self.line.clear();
        self.overflowed = false;
    }
}

/// Read commands from `reader` forever, replying on `writer`.
pub async fn run_console<R, W, M, const N: usize>(
    mut reader: R,
    mut writer: W,
    dispatcher: Dispatcher<'_, M, N>,
) -> !
where
    R: Read,
    W: Write,
    M: RawMutex,
{
    let mut line = LineBuffer::new();
    let mut buf = [0u8; 64];
    let mut reply: String<{ MAX_COMMAND_LINE_LENGTH + 32 }> = String::new();

    info!("Console ready, type 'delay <ms>' to change the blink period");
    write_out(&mut writer, PROMPT).await;

    loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) => {
                Timer::after_millis(100).await;
                continue;
            }
            Ok(n) => n,
            Err(_) => {
                error!("Console read failed");
                Timer::after_millis(100).await;
                continue;
            }
        };

        for &byte in &buf[..n] {
            reply.clear();
            match line.push(byte) {
                LineEvent::Pending => continue,
                LineEvent::Complete => {
                    let result = dispatcher.execute(line.as_str()).await;
                    if let Err(err) = &result {
                        let _ = writeln!(reply, "{}", err);
                        let _ = writeln!(
                            reply,
                            "Command returned non-zero error code: 0x{:x}",
                            status(&result)
                        );
                    }
                    line.clear();
                }
                LineEvent::Overflow => {
                    let _ = writeln!(
                        reply,
                        "Command line too long (max {} characters)",
                        MAX_COMMAND_LINE_LENGTH
                    );
                }
            }
            let _ = reply.push_str(PROMPT);
            write_out(&mut writer, reply.as_str()).await;
        }
    }
}

async fn write_out<W: Write>(writer: &mut W, text: &str) {
    if writer.write_all(text.as_bytes()).await.is_err() || writer.flush().await.is_err() {
        error!("Console write failed");
    }
}
