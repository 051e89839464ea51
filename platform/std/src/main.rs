use blink_console::console::Dispatcher;
use blink_console::console_io::console_task;
use blink_console::delay::BlinkDelay;
use blink_console::mailbox::{Mailbox, Wait};
use blink_console::outputs::blink_task;
use blink_console::{DelayMailbox, DEFAULT_BLINK_DELAY_MS, SEND_TIMEOUT_MS, VERSION};
use clap::Parser;
use embassy_executor::Spawner;
use log::*;
use static_cell::StaticCell;

#[derive(Parser, Debug)]
#[clap(name = "blink-console", about = "Blink an LED at a period set from the console")]
struct Args {
    /// Initial blink delay in milliseconds
    #[clap(long, default_value_t = DEFAULT_BLINK_DELAY_MS)]
    delay: u32,

    /// How long `delay` may wait for mailbox space, in milliseconds (0 = forever)
    #[clap(long, default_value_t = SEND_TIMEOUT_MS)]
    send_timeout: u64,

    #[clap(long, default_value = "info")]
    log_level: LevelFilter,
}

static MAILBOX: StaticCell<DelayMailbox> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(args.log_level)
        .format_timestamp_nanos()
        .init();

    info!("blink-console {}", VERSION);

    let mailbox: &'static DelayMailbox = MAILBOX.init(Mailbox::new());
    let dispatcher = Dispatcher::new(mailbox).with_wait(Wait::from_millis(args.send_timeout));

    spawner
        .spawn(blink_task(mailbox, BlinkDelay::from_millis(args.delay)))
        .unwrap();
    spawner.spawn(console_task(dispatcher)).unwrap();
}
