use std::collections::VecDeque;

use thiserror::Error;

use crate::{ClockReading, TimeSource};

/// Error when parsing a clock script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid time: '{0}'")]
pub struct ParseError(String);

/// A scriptable time source.
///
/// Each call to [`TimeSource::now`] consumes one queued reading; once the
/// queue is empty the last reading repeats. New readings can be appended
/// at any time.
#[derive(Debug, Clone, Default)]
pub struct ScriptedClock {
    current: ClockReading,
    pending: VecDeque<ClockReading>,
}

impl ScriptedClock {
    /// Create a clock stopped at midnight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock stopped at `reading`.
    pub fn at(reading: ClockReading) -> Self {
        Self {
            current: reading,
            pending: VecDeque::new(),
        }
    }

    /// Queue a single reading.
    pub fn push(&mut self, reading: ClockReading) {
        self.pending.push_back(reading);
    }

    /// Parse and queue readings.
    ///
    /// Format: whitespace-separated `HH:MM` or `HH:MM:SS` times, e.g.
    /// `"07:05 07:05:30 12:00"`. Nothing is queued if any time is invalid.
    pub fn push_script(&mut self, script: &str) -> Result<(), ParseError> {
        let readings = script
            .split_whitespace()
            .map(parse_reading)
            .collect::<Result<Vec<_>, _>>()?;
        self.pending.extend(readings);
        Ok(())
    }

    /// Number of readings not yet consumed.
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl TimeSource for ScriptedClock {
    fn now(&mut self) -> ClockReading {
        if let Some(next) = self.pending.pop_front() {
            self.current = next;
        }
        self.current
    }
}

/// Parse one `HH:MM[:SS]` token.
fn parse_reading(token: &str) -> Result<ClockReading, ParseError> {
    let error = || ParseError(token.to_string());

    let fields = token
        .split(':')
        .map(|field| field.parse::<u32>().map_err(|_| error()))
        .collect::<Result<Vec<_>, _>>()?;

    let (hour, minute, second) = match fields.as_slice() {
        [hour, minute] => (*hour, *minute, 0),
        [hour, minute, second] => (*hour, *minute, *second),
        _ => return Err(error()),
    };

    if hour >= 24 || minute >= 60 || second >= 60 {
        return Err(error());
    }
    Ok(ClockReading::new(hour, minute, second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_new_clock_reads_midnight() {
        let mut clock = ScriptedClock::new();
        assert_eq!(clock.now(), ClockReading::new(0, 0, 0));
    }

    #[test]
    fn test_readings_consumed_in_order() {
        let mut clock = ScriptedClock::new();
        clock.push_script("07:05 12:30:15").unwrap();

        assert_eq!(clock.now(), ClockReading::new(7, 5, 0));
        assert_eq!(clock.now(), ClockReading::new(12, 30, 15));
    }

    #[test]
    fn test_last_reading_repeats() {
        let mut clock = ScriptedClock::at(ClockReading::new(1, 2, 3));
        clock.push(ClockReading::new(4, 5, 6));

        assert_eq!(clock.now(), ClockReading::new(4, 5, 6));
        assert_eq!(clock.now(), ClockReading::new(4, 5, 6));
        assert_eq!(clock.pending(), 0);
    }

    #[test_case("24:00"; "hour out of range")]
    #[test_case("12:60"; "minute out of range")]
    #[test_case("12:00:60"; "second out of range")]
    #[test_case("noon"; "not a time")]
    #[test_case("12"; "missing minute")]
    #[test_case("1:2:3:4"; "too many fields")]
    fn test_parse_error(token: &str) {
        let mut clock = ScriptedClock::new();
        let result = clock.push_script(token);
        assert_eq!(result, Err(ParseError(token.to_string())));
    }

    #[test]
    fn test_parse_error_does_not_modify_state() {
        let mut clock = ScriptedClock::new();
        clock.push_script("07:05").unwrap();

        let result = clock.push_script("08:00 xx");
        assert!(result.is_err());

        assert_eq!(clock.pending(), 1);
        assert_eq!(clock.now(), ClockReading::new(7, 5, 0));
    }
}
