pub use buffer::MemoryParameters;
pub use client::{Client, CommandErrors};
pub use handler::{ConnectionError, ConnectionHandler, RedisConnectionHandler};
pub use timeout::TimeoutError;

pub(crate) mod buffer;
pub(crate) mod client;
pub(crate) mod connection;
pub(crate) mod handler;
pub(crate) mod protocol;
pub(crate) mod timeout;

#[cfg(any(test, feature = "mock"))]
pub mod tests;
