use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::blinker::Blinker;
use crate::delay::BlinkDelay;
use crate::log::trace;
use crate::DelayMailbox;

/// Stand-in for the board LED; reports level changes through the logger.
pub struct SimulatedLed {
    lit: bool,
}

impl SimulatedLed {
    pub fn new() -> Self {
        Self { lit: false }
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

impl Default for SimulatedLed {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorType for SimulatedLed {
    type Error = Infallible;
}

impl OutputPin for SimulatedLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.lit = false;
        trace!("LED pin low");
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.lit = true;
        trace!("LED pin high");
        Ok(())
    }
}

#[embassy_executor::task]
pub async fn blink_task(mailbox: &'static DelayMailbox, initial_delay: BlinkDelay) {
    let mut blinker = Blinker::new(SimulatedLed::new(), mailbox, initial_delay);
    blinker.run().await;
}
