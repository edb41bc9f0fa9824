use crate::commands::subscribe::{SubscriptionCommand, SubscriptionVerb};
use crate::network::client::CommandErrors;
use crate::network::connection::Connection;
use crate::network::protocol;
use crate::network::timeout::Deadline;
use crate::subscription::decoder::{DecodeError, ToPushMessage};
use crate::subscription::messages::Event;
use alloc::string::String;
use bytes::Bytes;
use core::fmt::{Debug, Formatter};
use embedded_nal::TcpClientStack;
use embedded_time::duration::{Extensions, Microseconds};
use embedded_time::Clock;
use log::{debug, trace, warn};
use thiserror::Error;

/// Subscription errors
#[derive(Debug, Eq, PartialEq, Clone, Error)]
pub enum Error {
    /// SUBSCRIBE or PSUBSCRIBE was called without any channel or pattern. Nothing was sent.
    #[error("{0} requires at least one channel or pattern")]
    MissingTargets(SubscriptionVerb),
    /// Failed encoding the subscription command. Nothing was sent.
    #[error("failed encoding subscription command")]
    EncodingCommandFailed,
    /// Network error receiving or sending data. The session is closed.
    #[error("network error")]
    TcpError,
    /// No message received within the given time limit. The session stays usable.
    #[error("no message received within time limit")]
    Timeout,
    /// Upstream time error, or a timeout was requested without providing a clock
    #[error("clock failure")]
    ClockError,
    /// Received bytes violating the RESP protocol. The session is closed.
    #[error("received data violating the RESP protocol")]
    ProtocolViolation,
    /// Received a frame which is not a valid Pub/Sub message. The session is closed.
    #[error("invalid push message: {0}")]
    DecodeError(#[from] DecodeError),
    /// Received data exceeds the configured buffer size. The session is closed.
    #[error("receive buffer full")]
    MemoryFull,
    /// Redis rejected a command, e.g. a command not allowed in subscribed state.
    /// Inner value is the error message received. The session stays usable.
    #[error("redis error response: {0}")]
    ErrorResponse(String),
    /// The session was closed, either explicitly or caused by a previous fatal error
    #[error("session closed")]
    Closed,
}

impl Error {
    /// True if the connection can no longer be used
    fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::TcpError | Error::ProtocolViolation | Error::DecodeError(_) | Error::MemoryFull
        )
    }
}

impl From<CommandErrors> for Error {
    fn from(error: CommandErrors) -> Self {
        match error {
            CommandErrors::Timeout => Error::Timeout,
            CommandErrors::EncodingCommandFailed => Error::EncodingCommandFailed,
            CommandErrors::ProtocolViolation | CommandErrors::CommandResponseViolation => Error::ProtocolViolation,
            CommandErrors::TcpError => Error::TcpError,
            CommandErrors::TimerError => Error::ClockError,
            CommandErrors::ErrorResponse(message) => Error::ErrorResponse(message),
            CommandErrors::MemoryFull => Error::MemoryFull,
        }
    }
}

/// Lifecycle state of a [Session]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No subscription issued yet
    Idle,
    /// At least one SUBSCRIBE or PSUBSCRIBE was sent
    Active,
    /// Connection released, no further operations possible
    Closed,
}

/// Pub/Sub session on a dedicated connection
///
/// Subscription commands are written without waiting for confirmation. Redis confirms each channel
/// or pattern by a separate acknowledgement, which is returned by [receive](Session::receive) like
/// any published message.
///
/// All operations require exclusive access (`&mut self`). Sharing a session between execution
/// contexts requires external synchronization.
pub struct Session<'a, N: TcpClientStack, C: Clock> {
    /// Dedicated connection. None once closed.
    connection: Option<Connection<'a, N, N::TcpSocket>>,
    clock: Option<&'a C>,
    state: SessionState,
}

impl<'a, N: TcpClientStack, C: Clock> Session<'a, N, C> {
    pub(crate) fn new(connection: Connection<'a, N, N::TcpSocket>, clock: Option<&'a C>) -> Self {
        Self {
            connection: Some(connection),
            clock,
            state: SessionState::Idle,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Subscribes to the given channels. At least one channel is required.
    pub fn subscribe<I, T>(&mut self, channels: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        Bytes: From<T>,
    {
        self.send(SubscriptionCommand::new(SubscriptionVerb::Subscribe, channels))
    }

    /// Subscribes to the given glob-style patterns. At least one pattern is required.
    pub fn psubscribe<I, T>(&mut self, patterns: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        Bytes: From<T>,
    {
        self.send(SubscriptionCommand::new(SubscriptionVerb::PSubscribe, patterns))
    }

    /// Unsubscribes from the given channels. Without any channel, all channels are unsubscribed.
    pub fn unsubscribe<I, T>(&mut self, channels: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        Bytes: From<T>,
    {
        self.send(SubscriptionCommand::new(SubscriptionVerb::Unsubscribe, channels))
    }

    /// Unsubscribes from the given patterns. Without any pattern, all patterns are unsubscribed.
    pub fn punsubscribe<I, T>(&mut self, patterns: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        Bytes: From<T>,
    {
        self.send(SubscriptionCommand::new(SubscriptionVerb::PUnsubscribe, patterns))
    }

    /// Unsubscribes from all channels
    pub fn unsubscribe_all(&mut self) -> Result<(), Error> {
        self.unsubscribe(core::iter::empty::<Bytes>())
    }

    /// Unsubscribes from all patterns
    pub fn punsubscribe_all(&mut self) -> Result<(), Error> {
        self.punsubscribe(core::iter::empty::<Bytes>())
    }

    /// Writes the subscription command. Does not wait for any acknowledgement.
    pub fn send(&mut self, command: SubscriptionCommand) -> Result<(), Error> {
        let verb = command.verb();
        if verb.requires_targets() && command.targets().is_empty() {
            return Err(Error::MissingTargets(verb));
        }

        let connection = self.connection.as_mut().ok_or(Error::Closed)?;
        if let Err(error) = connection.write_frame(&command.encode()) {
            return Err(self.handle_error(error.into()));
        }

        debug!("{} sent: targets={}", verb, command.targets().len());
        if verb.requires_targets() {
            self.state = SessionState::Active;
        }

        Ok(())
    }

    /// Blocks until the next message is received
    pub fn receive(&mut self) -> Result<Event, Error> {
        self.receive_with_timeout(0.microseconds())
    }

    /// Blocks until the next message is received or the timeout elapses.
    ///
    /// Zero timeout blocks indefinitely. A positive timeout requires a clock.
    /// The timeout applies to this call only. On [Error::Timeout] the session stays usable.
    pub fn receive_with_timeout(&mut self, timeout: Microseconds) -> Result<Event, Error> {
        let connection = self.connection.as_mut().ok_or(Error::Closed)?;
        let deadline = Deadline::start(self.clock, timeout).map_err(|_| Error::ClockError)?;

        let result = connection
            .read_frame(&deadline)
            .and_then(|frame| protocol::assert_error(&frame).map(|_| frame))
            .map_err(Error::from)
            .and_then(|frame| frame.decode_push().map_err(Error::from));

        match result {
            Ok(event) => {
                trace!("Pub/Sub event received: {event}");
                Ok(event)
            }
            Err(error) => Err(self.handle_error(error)),
        }
    }

    /// Releases the dedicated connection. Further operations fail with [Error::Closed].
    pub fn close(&mut self) -> Result<(), Error> {
        self.state = SessionState::Closed;

        match self.connection.take() {
            None => Ok(()),
            Some(connection) => {
                debug!("Closing dedicated Pub/Sub connection");
                connection.close().map_err(|_| Error::TcpError)
            }
        }
    }

    /// Closes the session on fatal errors
    fn handle_error(&mut self, error: Error) -> Error {
        if error.is_fatal() {
            warn!("Pub/Sub session failed, closing connection: error={error}");
            let _ = self.close();
        }

        error
    }
}

impl<N: TcpClientStack, C: Clock> Drop for Session<'_, N, C> {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

impl<N: TcpClientStack, C: Clock> Debug for Session<'_, N, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("connection", &self.connection)
            .field("state", &self.state)
            .finish()
    }
}
