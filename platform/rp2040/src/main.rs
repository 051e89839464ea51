#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use blink_console::console::Dispatcher;
use blink_console::console_io::console_task;
use blink_console::delay::BlinkDelay;
use blink_console::mailbox::Mailbox;
use blink_console::outputs::blink_task;
use blink_console::resources::{AssignedResources, ConsoleResources, LedResources};
use blink_console::{split_resources, DelayMailbox, VERSION};

static MAILBOX: StaticCell<DelayMailbox> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    let r = split_resources!(p);
    info!("blink-console {}", VERSION);

    let mailbox: &'static DelayMailbox = MAILBOX.init(Mailbox::new());

    unwrap!(spawner.spawn(blink_task(r.led, mailbox, BlinkDelay::default())));
    unwrap!(spawner.spawn(console_task(r.console, Dispatcher::new(mailbox))));
}
