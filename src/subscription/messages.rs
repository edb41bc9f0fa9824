use alloc::string::String;
use bytes::Bytes;
use core::fmt::{Display, Formatter};

/// Kind of a subscription acknowledgement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionKind {
    Subscribe,
    Unsubscribe,
    PSubscribe,
    PUnsubscribe,
}

impl SubscriptionKind {
    /// Discriminator used by Redis for this kind of acknowledgement
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionKind::Subscribe => "subscribe",
            SubscriptionKind::Unsubscribe => "unsubscribe",
            SubscriptionKind::PSubscribe => "psubscribe",
            SubscriptionKind::PUnsubscribe => "punsubscribe",
        }
    }

    pub(crate) fn from_discriminator(discriminator: &[u8]) -> Option<Self> {
        match discriminator {
            b"subscribe" => Some(SubscriptionKind::Subscribe),
            b"unsubscribe" => Some(SubscriptionKind::Unsubscribe),
            b"psubscribe" => Some(SubscriptionKind::PSubscribe),
            b"punsubscribe" => Some(SubscriptionKind::PUnsubscribe),
            _ => None,
        }
    }

    /// True for unsubscribe and punsubscribe
    pub fn is_unsubscribe(&self) -> bool {
        matches!(self, SubscriptionKind::Unsubscribe | SubscriptionKind::PUnsubscribe)
    }
}

impl Display for SubscriptionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acknowledgement of a subscription management command. Redis sends one per channel or pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionEvent {
    pub kind: SubscriptionKind,

    /// Channel or pattern the acknowledgement refers to.
    ///
    /// None only for unsubscribe/punsubscribe without any targets while nothing was subscribed.
    pub channel: Option<Bytes>,

    /// Total number of channels and patterns this connection is subscribed to after the operation
    pub count: usize,
}

/// Message published to a directly subscribed channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessage {
    /// The channel the message has been published to
    pub channel: Bytes,

    /// The actual payload
    pub payload: Bytes,
}

/// Message published to a channel matching a pattern subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMessage {
    /// The subscribed pattern
    pub pattern: Bytes,

    /// The concrete channel the message has been published to
    pub channel: Bytes,

    /// The actual payload
    pub payload: Bytes,
}

/// A decoded Pub/Sub push message. Each received frame results in exactly one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Subscription(SubscriptionEvent),
    Message(ChannelMessage),
    PatternMessage(PatternMessage),
}

impl Event {
    /// Channel the event refers to. For subscription acknowledgements this may also be a pattern.
    pub fn channel(&self) -> Option<&Bytes> {
        match self {
            Event::Subscription(event) => event.channel.as_ref(),
            Event::Message(message) => Some(&message.channel),
            Event::PatternMessage(message) => Some(&message.channel),
        }
    }

    /// Published payload, None for subscription acknowledgements
    pub fn payload(&self) -> Option<&Bytes> {
        match self {
            Event::Subscription(_) => None,
            Event::Message(message) => Some(&message.payload),
            Event::PatternMessage(message) => Some(&message.payload),
        }
    }
}

impl From<SubscriptionEvent> for Event {
    fn from(event: SubscriptionEvent) -> Self {
        Event::Subscription(event)
    }
}

impl From<ChannelMessage> for Event {
    fn from(message: ChannelMessage) -> Self {
        Event::Message(message)
    }
}

impl From<PatternMessage> for Event {
    fn from(message: PatternMessage) -> Self {
        Event::PatternMessage(message)
    }
}

impl Display for SubscriptionEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match &self.channel {
            Some(channel) => write!(f, "{}: {}", self.kind, lossy(channel)),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl Display for ChannelMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Message<{}: {}>", lossy(&self.channel), lossy(&self.payload))
    }
}

impl Display for PatternMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "PMessage<{}: {}>", lossy(&self.channel), lossy(&self.payload))
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Event::Subscription(event) => Display::fmt(event, f),
            Event::Message(message) => Display::fmt(message, f),
            Event::PatternMessage(message) => Display::fmt(message, f),
        }
    }
}

fn lossy(bytes: &Bytes) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
