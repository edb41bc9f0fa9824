//! Builder for constructing RESP2 command frames
//!
//! Commands are sent as arrays of bulk strings, the first element being the command keyword.
//! ```
//! use bytes::Bytes;
//! use embedded_redis_pubsub::commands::builder::CommandBuilder;
//! use redis_protocol::resp2::types::Frame;
//!
//! // Using Bytes avoids data copy, as clone() is shallow
//! let channel = Bytes::from_static(b"news");
//!
//! let frame: Frame = CommandBuilder::new("SUBSCRIBE").arg(&channel).into();
//! assert_eq!(Frame::Array(vec![
//!     Frame::BulkString(Bytes::from_static(b"SUBSCRIBE")),
//!     Frame::BulkString(Bytes::from_static(b"news")),
//! ]), frame);
//! ```
use alloc::vec;
use alloc::vec::Vec;
use bytes::Bytes;
use redis_protocol::resp2::types::Frame;

/// Builder for constructing RESP2 frames
#[derive(Clone, Default, Debug)]
pub struct CommandBuilder {
    pub(crate) elements: Vec<Bytes>,
}

impl CommandBuilder {
    pub fn new(keyword: &'static str) -> Self {
        CommandBuilder {
            elements: vec![Bytes::from_static(keyword.as_bytes())],
        }
    }

    /// Adds a byte argument
    /// Note: Besides static, the most efficient way caused by the nature how Bytes cloning is working
    pub fn arg(mut self, arg: &Bytes) -> Self {
        self.elements.push(arg.clone());
        self
    }

    /// Adds all given arguments in order
    pub fn args<'b, I>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = &'b Bytes>,
    {
        self.elements.extend(args.into_iter().cloned());
        self
    }
}

impl From<CommandBuilder> for Frame {
    fn from(builder: CommandBuilder) -> Self {
        Frame::Array(builder.elements.into_iter().map(Frame::BulkString).collect())
    }
}
