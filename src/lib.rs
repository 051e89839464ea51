#![cfg_attr(not(test), no_std)]

#[cfg(feature = "rp2040")]
pub use defmt as log;

#[cfg(feature = "std")]
pub use log;

#[cfg(feature = "rp2040")]
pub mod outputs_rp2040;
#[cfg(feature = "rp2040")]
pub use outputs_rp2040 as outputs;

#[cfg(feature = "std")]
pub mod outputs_std;
#[cfg(feature = "std")]
pub use outputs_std as outputs;

#[cfg(feature = "rp2040")]
pub mod console_rp2040;
#[cfg(feature = "rp2040")]
pub use console_rp2040 as console_io;

#[cfg(feature = "std")]
pub mod console_std;
#[cfg(feature = "std")]
pub use console_std as console_io;

#[cfg(feature = "rp2040")]
pub mod resources_rp2040;
#[cfg(feature = "rp2040")]
pub use resources_rp2040 as resources;

pub mod blinker;
pub mod console;
pub mod delay;
pub mod mailbox;

pub static VERSION: &str = "v0.1";

/// Blink period used until the first `delay` command arrives.
pub static DEFAULT_BLINK_DELAY_MS: u32 = 1000;
/// How long a console command may wait for room in the mailbox.
pub static SEND_TIMEOUT_MS: u64 = 5000;

pub const MAILBOX_CAPACITY: usize = 5;
pub const MAX_COMMAND_LINE_LENGTH: usize = 256;
pub const MAX_COMMAND_ARGS: usize = 8;
pub static PROMPT: &str = "blink> ";

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Mailbox shared between the console and the blink task.
pub type DelayMailbox = mailbox::Mailbox<CriticalSectionRawMutex, MAILBOX_CAPACITY>;
pub type AppDispatcher = console::Dispatcher<'static, CriticalSectionRawMutex, MAILBOX_CAPACITY>;
