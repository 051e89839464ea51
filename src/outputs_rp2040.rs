use defmt::*;
use embassy_rp::gpio::{Level, Output};

use crate::blinker::Blinker;
use crate::delay::BlinkDelay;
use crate::resources::LedResources;
use crate::DelayMailbox;

#[embassy_executor::task]
pub async fn blink_task(r: LedResources, mailbox: &'static DelayMailbox, initial_delay: BlinkDelay) {
    let led = Output::new(r.led, Level::Low);
    info!("Driving onboard LED");

    let mut blinker = Blinker::new(led, mailbox, initial_delay);
    blinker.run().await;
}
