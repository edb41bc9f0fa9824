//! # Pub/Sub sessions
//!
//! Subscribing to channels or patterns (s. [Redis Pub/Sub](https://redis.io/docs/manual/pubsub/))
//! is done by a [Session] on a dedicated connection, opened by the connection handler.
//!
//! ```no_run
//!# use core::str::FromStr;
//!# use core::net::SocketAddr;
//!# use std_embedded_nal::Stack;
//!# use std_embedded_time::StandardClock;
//!# use embedded_redis_pubsub::network::{ConnectionHandler, RedisConnectionHandler};
//!#
//!# let mut stack = Stack::default();
//!# let clock = StandardClock::default();
//!#
//!# let server_address = SocketAddr::from_str("127.0.0.1:6379").unwrap();
//! let connection_handler = ConnectionHandler::resp2(server_address);
//! let mut session = connection_handler.open_session(&mut stack, Some(&clock)).unwrap();
//!
//! session.subscribe(["first_channel", "second_channel"]).unwrap();
//! session.psubscribe(["sensor.*"]).unwrap();
//! ```
//!
//! ## Receiving messages
//!
//! Subscription commands are not confirmed synchronously. Redis acknowledges every channel and
//! pattern with a separate [SubscriptionEvent], which is received like any published message.
//! So a typical session receives the acknowledgements first and then loops over the messages.
//!
//! ```no_run
//!# use core::str::FromStr;
//!# use core::net::SocketAddr;
//!# use std_embedded_nal::Stack;
//!# use std_embedded_time::StandardClock;
//!# use embedded_redis_pubsub::network::{ConnectionHandler, RedisConnectionHandler};
//!# use embedded_redis_pubsub::subscription::{Error, Event};
//!# use embedded_time::duration::Extensions;
//!#
//!# let mut stack = Stack::default();
//!# let clock = StandardClock::default();
//!#
//!# let server_address = SocketAddr::from_str("127.0.0.1:6379").unwrap();
//!# let connection_handler = ConnectionHandler::resp2(server_address);
//!# let mut session = connection_handler.open_session(&mut stack, Some(&clock)).unwrap();
//! session.subscribe(["first_channel"]).unwrap();
//!
//! loop {
//!     match session.receive_with_timeout(500_000.microseconds()) {
//!         Ok(Event::Subscription(ack)) => println!("{ack}"),
//!         Ok(Event::Message(message)) => println!("{message}"),
//!         Ok(Event::PatternMessage(message)) => println!("{message}"),
//!         // Session stays usable after timeouts
//!         Err(Error::Timeout) => continue,
//!         Err(error) => panic!("{error}"),
//!     }
//! }
//! ```
//!
//! ## Errors
//!
//! Network errors and invalid messages are fatal, as the position in the message stream can no
//! longer be trusted. In this case the dedicated connection is closed and all further operations
//! fail with [Error::Closed].
//!
//! ## Unsubscribing
//!
//! Unsubscribing without arguments unsubscribes from all channels, respectively all patterns.
//!
//! ```no_run
//!# use core::str::FromStr;
//!# use core::net::SocketAddr;
//!# use std_embedded_nal::Stack;
//!# use std_embedded_time::StandardClock;
//!# use embedded_redis_pubsub::network::{ConnectionHandler, RedisConnectionHandler};
//!#
//!# let mut stack = Stack::default();
//!# let clock = StandardClock::default();
//!#
//!# let server_address = SocketAddr::from_str("127.0.0.1:6379").unwrap();
//!# let connection_handler = ConnectionHandler::resp2(server_address);
//!# let mut session = connection_handler.open_session(&mut stack, Some(&clock)).unwrap();
//! session.unsubscribe(["first_channel"]).unwrap();
//! session.unsubscribe_all().unwrap();
//! session.punsubscribe_all().unwrap();
//! session.close().unwrap();
//! ```
//!
//! *Note: The dedicated connection is closed automatically when the session is dropped*
pub use decoder::{DecodeError, ToPushMessage};
pub use messages::{ChannelMessage, Event, PatternMessage, SubscriptionEvent, SubscriptionKind};
pub use session::{Error, Session, SessionState};

pub(crate) mod decoder;
pub(crate) mod messages;
pub(crate) mod session;
