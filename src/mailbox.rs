//! Bounded hand-off of blink delays from the console to the blink task.
//!
//! Sending suspends the caller while the mailbox is full, optionally with a
//! deadline. Receiving never suspends: the blink task polls once per
//! iteration and keeps its current delay when nothing is pending.

use core::fmt;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{with_timeout, Duration};

use crate::delay::BlinkDelay;

/// How long a sender is prepared to wait for a free slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    Forever,
    Bounded(Duration),
}

impl Wait {
    /// `0` means wait forever.
    pub fn from_millis(millis: u64) -> Self {
        if millis == 0 {
            Wait::Forever
        } else {
            Wait::Bounded(Duration::from_millis(millis))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub enum MailboxError {
    /// No slot freed up before the wait bound elapsed.
    Timeout,
    /// Mailbox full on a non-waiting send.
    Full,
}

impl fmt::Display for MailboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailboxError::Timeout => write!(f, "timed out waiting for mailbox space"),
            MailboxError::Full => write!(f, "mailbox full"),
        }
    }
}

pub struct Mailbox<M: RawMutex, const N: usize> {
    channel: Channel<M, BlinkDelay, N>,
}

impl<M: RawMutex, const N: usize> Mailbox<M, N> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Append `delay`, suspending while the mailbox is full.
    ///
    /// On timeout nothing has been enqueued.
    pub async fn send(&self, delay: BlinkDelay, wait: Wait) -> Result<(), MailboxError> {
        match wait {
            Wait::Forever => {
                self.channel.send(delay).await;
                Ok(())
            }
            Wait::Bounded(timeout) => with_timeout(timeout, self.channel.send(delay))
                .await
                .map_err(|_| MailboxError::Timeout),
        }
    }

    pub fn try_send(&self, delay: BlinkDelay) -> Result<(), MailboxError> {
        self.channel
            .try_send(delay)
            .map_err(|_| MailboxError::Full)
    }

    /// Take the oldest pending delay, if any. Never suspends.
    pub fn try_receive(&self) -> Option<BlinkDelay> {
        self.channel.try_receive().ok()
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.channel.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<M: RawMutex, const N: usize> Default for Mailbox<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DelayMailbox;
    use embassy_futures::{block_on, join::join};
    use embassy_time::{Instant, Timer};

    fn ms(millis: u32) -> BlinkDelay {
        BlinkDelay::from_millis(millis)
    }

    #[test]
    fn receives_in_send_order() {
        let mailbox = DelayMailbox::new();
        let values = [500, 20, 20, 0, 1000];
        block_on(async {
            for v in values {
                mailbox.send(ms(v), Wait::Forever).await.unwrap();
            }
        });
        assert!(mailbox.is_full());
        for v in values {
            assert_eq!(mailbox.try_receive(), Some(ms(v)));
        }
        assert_eq!(mailbox.try_receive(), None);
    }

    #[test]
    fn try_receive_on_empty_returns_none() {
        let mailbox = DelayMailbox::new();
        assert!(mailbox.is_empty());
        assert_eq!(mailbox.try_receive(), None);
        assert_eq!(mailbox.capacity(), crate::MAILBOX_CAPACITY);
    }

    #[test]
    fn bounded_send_times_out_when_full() {
        let mailbox = DelayMailbox::new();
        for v in 1..=5 {
            mailbox.try_send(ms(v)).unwrap();
        }
        assert_eq!(mailbox.try_send(ms(6)), Err(MailboxError::Full));

        let started = Instant::now();
        let result = block_on(mailbox.send(ms(6), Wait::Bounded(Duration::from_millis(30))));
        assert_eq!(result, Err(MailboxError::Timeout));
        assert!(started.elapsed() >= Duration::from_millis(30));

        // the rejected value never made it in, nothing was dropped either
        assert_eq!(mailbox.len(), 5);
        for v in 1..=5 {
            assert_eq!(mailbox.try_receive(), Some(ms(v)));
        }
        assert!(mailbox.is_empty());
    }

    #[test]
    fn blocked_send_resumes_after_drain() {
        let mailbox = DelayMailbox::new();
        for v in 1..=5 {
            mailbox.try_send(ms(v)).unwrap();
        }

        let (sent, drained) = block_on(join(
            mailbox.send(ms(6), Wait::Forever),
            async {
                Timer::after_millis(20).await;
                // sender must still be parked on the full mailbox
                assert_eq!(mailbox.len(), 5);
                mailbox.try_receive()
            },
        ));
        assert_eq!(sent, Ok(()));
        assert_eq!(drained, Some(ms(1)));

        for v in 2..=6 {
            assert_eq!(mailbox.try_receive(), Some(ms(v)));
        }
        assert_eq!(mailbox.try_receive(), None);
    }

    #[test]
    fn bounded_send_succeeds_when_space_frees_in_time() {
        let mailbox = DelayMailbox::new();
        for v in 1..=5 {
            mailbox.try_send(ms(v)).unwrap();
        }
        let (sent, _) = block_on(join(
            mailbox.send(ms(6), Wait::Bounded(Duration::from_millis(500))),
            async {
                Timer::after_millis(10).await;
                mailbox.try_receive()
            },
        ));
        assert_eq!(sent, Ok(()));
        assert_eq!(mailbox.len(), 5);
    }

    #[test]
    fn zero_wait_means_forever() {
        assert_eq!(Wait::from_millis(0), Wait::Forever);
        assert_eq!(
            Wait::from_millis(250),
            Wait::Bounded(Duration::from_millis(250))
        );
    }
}
