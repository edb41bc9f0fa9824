use embedded_time::duration::{Extensions, Microseconds};
use embedded_time::timer::param::{OneShot, Running};
use embedded_time::{Clock, Timer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeoutError {
    /// A positive timeout was requested, but no clock is available to measure it
    #[error("timeout requested without a clock")]
    MissingClock,
    #[error("failed starting timer")]
    TimerStartFailed,
    #[error("timer failure")]
    TimerError,
}

/// Read deadline of a single blocking call.
///
/// A new deadline is started for every call, so time spent in previous calls never counts
/// against the current one.
#[derive(Debug)]
pub(crate) struct Deadline<'a, C: Clock> {
    timer: Option<Timer<'a, OneShot, Running, C, Microseconds>>,
}

impl<'a, C: Clock> Deadline<'a, C> {
    /// Deadline which never expires
    pub fn unbounded() -> Self {
        Self { timer: None }
    }

    /// Starts a deadline expiring after `duration`. Zero duration means no deadline at all.
    pub fn start(clock: Option<&'a C>, duration: Microseconds) -> Result<Self, TimeoutError> {
        if duration == 0.microseconds() {
            return Ok(Self::unbounded());
        }

        let clock = clock.ok_or(TimeoutError::MissingClock)?;
        let timer = clock
            .new_timer(duration)
            .start()
            .map_err(|_| TimeoutError::TimerStartFailed)?;

        Ok(Self { timer: Some(timer) })
    }

    pub fn expired(&self) -> Result<bool, TimeoutError> {
        match &self.timer {
            None => Ok(false),
            Some(timer) => timer.is_expired().map_err(|_| TimeoutError::TimerError),
        }
    }
}
