use crate::commands::Command;
use crate::network::connection::Connection;
use crate::network::protocol;
use crate::network::timeout::{Deadline, TimeoutError};
use alloc::string::String;
use core::fmt::{Debug, Formatter};
use embedded_nal::TcpClientStack;
use embedded_time::duration::Microseconds;
use embedded_time::Clock;
use log::warn;
use thiserror::Error;

/// Error handling for command execution
#[derive(Debug, Eq, PartialEq, Clone, Error)]
pub enum CommandErrors {
    /// No response within expected time frame
    #[error("no response within time limit")]
    Timeout,
    /// Failed encoding TX command
    #[error("failed encoding command")]
    EncodingCommandFailed,
    /// Received an invalid response violating the RESP protocol. Ideally this should never happen.
    /// The following causes are conceivable
    /// * Bug in this library (e.g. incomplete implementation of RESP protocol)
    /// * Redis server bug
    /// * Network failure. As we are using TCP, only a network stack bug or other exotic causes (e.g. bit flip) is reasonable.
    #[error("received data violating the RESP protocol")]
    ProtocolViolation,
    /// Low level network error
    #[error("network error")]
    TcpError,
    /// Upstream timer/clock failure, or a timeout was configured without providing a clock
    #[error("timer failure")]
    TimerError,
    /// Received an unexpected response incompatible with the command specification
    #[error("response incompatible with command")]
    CommandResponseViolation,
    /// Redis error response. Inner value is the error message received.
    #[error("redis error response: {0}")]
    ErrorResponse(String),
    /// Received data exceeds the configured buffer size
    #[error("receive buffer full")]
    MemoryFull,
}

impl CommandErrors {
    /// True if the position in the response stream can no longer be trusted
    pub(crate) fn is_fatal(&self) -> bool {
        matches!(
            self,
            CommandErrors::Timeout
                | CommandErrors::ProtocolViolation
                | CommandErrors::TcpError
                | CommandErrors::MemoryFull
        )
    }
}

/// Client to execute regular (non Pub/Sub) Redis commands on the shared connection
///
/// Each command is sent and its response is awaited blocking, so exactly one command is in flight
/// at any time.
pub struct Client<'a, N: TcpClientStack, C: Clock> {
    pub(crate) connection: Connection<'a, N, &'a mut N::TcpSocket>,
    pub(crate) clock: Option<&'a C>,

    /// Max. time waiting for response
    pub(crate) timeout_duration: Microseconds,

    /// A previous command failed fatally, so pending data gets dropped before sending the next one
    pub(crate) faulty: bool,
}

impl<'a, N: TcpClientStack, C: Clock> Client<'a, N, C> {
    /// Sends the given command and blocks until its response is received
    pub fn send<Cmd: Command>(&mut self, command: Cmd) -> Result<Cmd::Response, CommandErrors> {
        if self.faulty {
            self.connection.discard_pending();
            self.faulty = false;
        }

        let result = self.execute(&command);
        if let Err(error) = &result {
            if error.is_fatal() {
                warn!("Command failed, discarding pending data before next command: error={error}");
                self.faulty = true;
            }
        }

        result
    }

    fn execute<Cmd: Command>(&mut self, command: &Cmd) -> Result<Cmd::Response, CommandErrors> {
        let deadline = Deadline::start(self.clock, self.timeout_duration)?;
        self.connection.write_frame(&command.encode())?;

        let frame = self.connection.read_frame(&deadline)?;
        protocol::assert_error(&frame)?;

        command
            .eval_response(frame)
            .map_err(|_| CommandErrors::CommandResponseViolation)
    }
}

impl From<TimeoutError> for CommandErrors {
    fn from(_: TimeoutError) -> Self {
        CommandErrors::TimerError
    }
}

impl<N: TcpClientStack, C: Clock> Debug for Client<'_, N, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Client")
            .field("connection", &self.connection)
            .field("timeout_duration", &self.timeout_duration)
            .field("faulty", &self.faulty)
            .finish()
    }
}
