use core::fmt;
use core::str::FromStr;

use embassy_time::Duration;

/// Blink half-period in milliseconds.
///
/// Only non-negative whole numbers parse, so anything sitting in the
/// mailbox is already valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub struct BlinkDelay(u32);

impl BlinkDelay {
    pub const fn from_millis(millis: u32) -> Self {
        Self(millis)
    }

    pub const fn as_millis(&self) -> u32 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(self.0.into())
    }
}

impl Default for BlinkDelay {
    fn default() -> Self {
        Self(crate::DEFAULT_BLINK_DELAY_MS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub enum ParseDelayError {
    Empty,
    NotANumber,
    OutOfRange,
}

impl fmt::Display for ParseDelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseDelayError::Empty => write!(f, "empty delay"),
            ParseDelayError::NotANumber => write!(f, "delay is not a whole number"),
            ParseDelayError::OutOfRange => write!(f, "delay out of range"),
        }
    }
}

impl FromStr for BlinkDelay {
    type Err = ParseDelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseDelayError::Empty);
        }
        // u32::from_str accepts a leading '+', a sign of any kind is rejected here
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseDelayError::NotANumber);
        }
        s.parse::<u32>()
            .map(BlinkDelay)
            .map_err(|_| ParseDelayError::OutOfRange)
    }
}

impl fmt::Display for BlinkDelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_milliseconds() {
        assert_eq!("250".parse::<BlinkDelay>(), Ok(BlinkDelay::from_millis(250)));
        assert_eq!(" 0 ".parse::<BlinkDelay>(), Ok(BlinkDelay::from_millis(0)));
    }

    #[test]
    fn rejects_signs_and_garbage() {
        assert_eq!("-5".parse::<BlinkDelay>(), Err(ParseDelayError::NotANumber));
        assert_eq!("+5".parse::<BlinkDelay>(), Err(ParseDelayError::NotANumber));
        assert_eq!("12ms".parse::<BlinkDelay>(), Err(ParseDelayError::NotANumber));
        assert_eq!("abc".parse::<BlinkDelay>(), Err(ParseDelayError::NotANumber));
        assert_eq!("".parse::<BlinkDelay>(), Err(ParseDelayError::Empty));
    }

    #[test]
    fn rejects_overflow() {
        assert_eq!(
            "99999999999".parse::<BlinkDelay>(),
            Err(ParseDelayError::OutOfRange)
        );
    }

    #[test]
    fn default_is_one_second() {
        assert_eq!(BlinkDelay::default().as_millis(), 1000);
        assert_eq!(BlinkDelay::default().as_duration(), Duration::from_millis(1000));
    }
}
