//! Abstraction of SUBSCRIBE, PSUBSCRIBE, UNSUBSCRIBE and PUNSUBSCRIBE commands.
//!
//! For general information about these commands, see the [Redis documentation](<https://redis.io/docs/manual/pubsub/>).
//!
//! Unlike regular commands, subscription commands are not answered by a single response. Redis
//! confirms each channel or pattern with a separate push message, which is received later on by
//! [Session](crate::subscription::Session). Therefore, these commands are not implementing the
//! [Command](crate::commands::Command) trait.
//!
//! ```
//! use bytes::Bytes;
//! use embedded_redis_pubsub::commands::subscribe::{SubscriptionCommand, SubscriptionVerb};
//! use redis_protocol::resp2::types::Frame;
//!
//! // Unsubscribing without any channel unsubscribes from all channels
//! let command = SubscriptionCommand::new(SubscriptionVerb::Unsubscribe, Vec::<Bytes>::new());
//! assert_eq!(Frame::Array(vec![Frame::BulkString("UNSUBSCRIBE".into())]), command.encode());
//! ```
use crate::commands::builder::CommandBuilder;
use alloc::vec::Vec;
use bytes::Bytes;
use core::fmt::{Display, Formatter};
use redis_protocol::resp2::types::Frame;

/// Subscription management verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionVerb {
    Subscribe,
    PSubscribe,
    Unsubscribe,
    PUnsubscribe,
}

impl SubscriptionVerb {
    /// Command keyword sent to Redis
    pub fn keyword(&self) -> &'static str {
        match self {
            SubscriptionVerb::Subscribe => "SUBSCRIBE",
            SubscriptionVerb::PSubscribe => "PSUBSCRIBE",
            SubscriptionVerb::Unsubscribe => "UNSUBSCRIBE",
            SubscriptionVerb::PUnsubscribe => "PUNSUBSCRIBE",
        }
    }

    /// Subscribing requires at least one channel or pattern.
    /// Unsubscribing without any target applies to all channels or patterns.
    pub fn requires_targets(&self) -> bool {
        matches!(self, SubscriptionVerb::Subscribe | SubscriptionVerb::PSubscribe)
    }
}

impl Display for SubscriptionVerb {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Subscription management command
#[derive(Debug, Clone)]
pub struct SubscriptionCommand {
    verb: SubscriptionVerb,

    /// Channels or patterns, depending on verb
    targets: Vec<Bytes>,
}

impl SubscriptionCommand {
    /// Creates a command for the given verb and channels or patterns
    pub fn new<I, T>(verb: SubscriptionVerb, targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        Bytes: From<T>,
    {
        SubscriptionCommand {
            verb,
            targets: targets.into_iter().map(Bytes::from).collect(),
        }
    }

    /// Subscription verb of this command
    pub fn verb(&self) -> SubscriptionVerb {
        self.verb
    }

    /// Channels or patterns in the order given
    pub fn targets(&self) -> &[Bytes] {
        &self.targets
    }

    /// Encodes the command to a RESP2 array, the verb followed by all targets
    pub fn encode(&self) -> Frame {
        CommandBuilder::new(self.verb.keyword()).args(&self.targets).into()
    }
}
