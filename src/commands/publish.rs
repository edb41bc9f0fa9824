//! Abstraction of PUBLISH command.
//!
//! For general information about this command, see the [Redis documentation](<https://redis.io/commands/publish/>).
//!
//! PUBLISH is a regular request/response command, so it's executed by the shared [Client] and
//! not by a subscription [Session](crate::subscription::Session).
//!
//! # Using command object
//! ```no_run
//!# use core::str::FromStr;
//!# use embedded_nal::SocketAddr;
//!# use std_embedded_nal::Stack;
//!# use std_embedded_time::StandardClock;
//!# use embedded_redis_pubsub::commands::publish::PublishCommand;
//!# use embedded_redis_pubsub::network::{ConnectionHandler, RedisConnectionHandler};
//!#
//! let mut stack = Stack::default();
//! let clock = StandardClock::default();
//!
//! let mut connection_handler = ConnectionHandler::resp2(SocketAddr::from_str("127.0.0.1:6379").unwrap());
//! let mut client = connection_handler.connect(&mut stack, Some(&clock)).unwrap();
//!
//! let command = PublishCommand::new("channel", "message");
//! let receivers = client.send(command).unwrap();
//!
//! // Returns the number of clients that received the message
//! assert_eq!(0, receivers)
//! ```
//! # Shorthand
//! [Client](Client#method.publish) provides a shorthand method.
//! ```no_run
//!# use core::str::FromStr;
//!# use embedded_nal::SocketAddr;
//!# use std_embedded_nal::Stack;
//!# use std_embedded_time::StandardClock;
//!# use embedded_redis_pubsub::network::{ConnectionHandler, RedisConnectionHandler};
//!#
//!# let mut stack = Stack::default();
//!# let clock = StandardClock::default();
//!#
//!# let mut connection_handler = ConnectionHandler::resp2(SocketAddr::from_str("127.0.0.1:6379").unwrap());
//!# let mut client = connection_handler.connect(&mut stack, Some(&clock)).unwrap();
//!#
//! let _ = client.publish("channel", "message");
//! ```
use crate::commands::builder::CommandBuilder;
use crate::commands::{Command, ResponseTypeError};
use crate::network::client::{Client, CommandErrors};
use bytes::Bytes;
use embedded_nal::TcpClientStack;
use embedded_time::Clock;
use redis_protocol::resp2::types::Frame;

/// Abstraction for PUBLISH command
#[derive(Debug, Clone)]
pub struct PublishCommand {
    channel: Bytes,
    message: Bytes,
}

impl PublishCommand {
    pub fn new<C, M>(channel: C, message: M) -> Self
    where
        Bytes: From<C>,
        Bytes: From<M>,
    {
        PublishCommand {
            channel: channel.into(),
            message: message.into(),
        }
    }
}

impl Command for PublishCommand {
    /// the number of clients that received the message
    type Response = i64;

    fn encode(&self) -> Frame {
        CommandBuilder::new("PUBLISH").arg(&self.channel).arg(&self.message).into()
    }

    fn eval_response(&self, frame: Frame) -> Result<Self::Response, ResponseTypeError> {
        match frame {
            Frame::Integer(receivers) => Ok(receivers),
            _ => Err(ResponseTypeError {}),
        }
    }
}

impl<N: TcpClientStack, C: Clock> Client<'_, N, C> {
    /// Shorthand for [PublishCommand]
    pub fn publish<K, V>(&mut self, channel: K, message: V) -> Result<i64, CommandErrors>
    where
        Bytes: From<K>,
        Bytes: From<V>,
    {
        self.send(PublishCommand::new(channel, message))
    }
}
