use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Timer;
use embedded_hal::digital::{OutputPin, PinState};

use crate::delay::BlinkDelay;
use crate::log::{debug, info};
use crate::mailbox::Mailbox;

/// State owned by the blink loop. Nothing else reads or writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkState {
    pub delay: BlinkDelay,
    pub level: bool,
}

pub struct Blinker<'a, P, M: RawMutex, const N: usize> {
    pin: P,
    mailbox: &'a Mailbox<M, N>,
    state: BlinkState,
}

impl<'a, P, M, const N: usize> Blinker<'a, P, M, N>
where
    P: OutputPin<Error = Infallible>,
    M: RawMutex,
{
    pub fn new(pin: P, mailbox: &'a Mailbox<M, N>, initial_delay: BlinkDelay) -> Self {
        Self {
            pin,
            mailbox,
            state: BlinkState {
                delay: initial_delay,
                level: true,
            },
        }
    }

    pub fn state(&self) -> BlinkState {
        self.state
    }

    #[cfg(test)]
    fn pin(&self) -> &P {
        &self.pin
    }

    /// Apply at most one pending delay. Returns whether the delay changed hands.
    pub fn poll_update(&mut self) -> bool {
        match self.mailbox.try_receive() {
            Some(delay) => {
                if delay != self.state.delay {
                    info!("Blink delay updated to {} ms", delay.as_millis());
                }
                self.state.delay = delay;
                true
            }
            None => false,
        }
    }

    /// One loop iteration minus the sleep; returns how long to sleep.
    pub fn step(&mut self) -> BlinkDelay {
        self.poll_update();

        let level = self.state.level;
        self.pin
            .set_state(PinState::from(level))
            .unwrap_or_else(|never| match never {});
        debug!("LED {}", if level { "on" } else { "off" });
        self.state.level = !level;

        self.state.delay
    }

    pub async fn tick(&mut self) {
        let delay = self.step();
        Timer::after(delay.as_duration()).await;
    }

    pub async fn run(&mut self) -> ! {
        info!(
            "Blink loop started with {} ms delay",
            self.state.delay.as_millis()
        );
        loop {
            self.tick().await;
        }
    }
}
