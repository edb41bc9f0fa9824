//! This crate offers a blocking Redis Pub/Sub client for no_std targets, based on the RESP2 protocol.
//!
//! This crate consists of three parts:
//! * [network module](crate::network) for network details (connection handling, shared client, timeouts)
//! * [subscription module](crate::subscription) for Pub/Sub sessions and decoding of push messages
//! * [commands module](crate::commands) for command abstractions (PUBLISH and subscription management)
//!
//! ```no_run
//!# use core::str::FromStr;
//!# use embedded_nal::SocketAddr;
//!# use std_embedded_nal::Stack;
//!# use std_embedded_time::StandardClock;
//!# use embedded_redis_pubsub::network::{ConnectionHandler, RedisConnectionHandler};
//!# use embedded_redis_pubsub::subscription::Event;
//!#
//! let mut session_stack = Stack::default();
//! let mut publish_stack = Stack::default();
//! let clock = StandardClock::default();
//!
//! let server_address = SocketAddr::from_str("127.0.0.1:6379").unwrap();
//! let mut connection_handler = ConnectionHandler::resp2(server_address);
//!
//! // Dedicated connection for subscriptions
//! let mut session = connection_handler.open_session(&mut session_stack, Some(&clock)).unwrap();
//! session.subscribe(["news"]).unwrap();
//! let acknowledgement = session.receive().unwrap();
//!
//! // Shared connection for regular commands
//! let mut client = connection_handler.connect(&mut publish_stack, Some(&clock)).unwrap();
//! let receivers = client.publish("news", "hello").unwrap();
//! assert_eq!(1, receivers);
//!
//! if let Event::Message(message) = session.receive().unwrap() {
//!     assert_eq!("hello", core::str::from_utf8(&message.payload).unwrap());
//! }
//! ```
#![cfg_attr(all(not(test), not(feature = "mock")), no_std)]
#![cfg_attr(feature = "strict", deny(warnings))]

extern crate alloc;

/// # Command abstractions
///
/// [PUBLISH](crate::commands::publish) is executed as regular request/response command by
/// [Client](crate::network::Client) and implements the [Command](crate::commands::Command) trait.
///
/// [Subscription commands](crate::commands::subscribe) are written by a
/// [Session](crate::subscription::Session) and confirmed asynchronously by push messages.
pub mod commands;

/// # Connection and Client logic
///
/// ## Connection handling
///
/// Redis connections are managed by [ConnectionHandler](crate::network::ConnectionHandler).
///
/// Creating a new connection requires the following two things:
/// * A network stack implementing [embedded-nal](<https://docs.rs/embedded-nal/latest/embedded_nal/>)
/// * A clock implementing [embedded-time](<https://docs.rs/embedded-time/latest/embedded_time/>). Optional if no timeout is used.
///
/// The handler distinguishes two kinds of connections:
/// * `connect()` returns a [Client](crate::network::Client) on a shared connection, which is cached for later reuse.
/// * `open_session()` opens a new connection, reserved exclusively for one Pub/Sub [Session](crate::subscription::Session).
///
/// ### Timeout
///
/// The max. duration waiting for responses on the shared connection is configured on the handler.
/// Zero means waiting indefinitely. Pub/Sub sessions use a timeout per receive call instead.
///
/// ```no_run
///# use core::str::FromStr;
///# use embedded_nal::SocketAddr;
///# use std_embedded_nal::Stack;
///# use std_embedded_time::StandardClock;
///# use embedded_redis_pubsub::network::{ConnectionHandler, RedisConnectionHandler};
///# use embedded_time::duration::Extensions;
///#
///# let mut network_stack = Stack::default();
///# let clock = StandardClock::default();
///#
///# let server_address = SocketAddr::from_str("127.0.0.1:6379").unwrap();
/// let mut connection_handler = ConnectionHandler::resp2(server_address);
/// connection_handler.timeout(500_000.microseconds());
/// # let _client = connection_handler.connect(&mut network_stack, Some(&clock)).unwrap();
/// ```
///
/// ### Memory
///
/// By default the receive buffer grows as needed. An upper limit can be set, exceeding data results
/// in a [MemoryFull](crate::network::CommandErrors::MemoryFull) error.
///
/// ```no_run
///# use core::str::FromStr;
///# use embedded_nal::SocketAddr;
///# use std_embedded_nal::Stack;
///# use embedded_redis_pubsub::network::{ConnectionHandler, MemoryParameters, RedisConnectionHandler};
///#
///# let server_address = SocketAddr::from_str("127.0.0.1:6379").unwrap();
/// let mut connection_handler: ConnectionHandler<Stack> = ConnectionHandler::resp2(server_address);
/// connection_handler.memory(MemoryParameters { buffer_size: Some(4096) });
/// ```
///
/// ### Concurrency
///
/// Clients and sessions are not meant to be shared, every operation requires exclusive access.
/// Concurrent use from multiple execution contexts must be serialized by the caller.
pub mod network;

/// # Pub/Sub
///
/// See [Session](crate::subscription::Session) for details.
pub mod subscription;
