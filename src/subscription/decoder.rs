use crate::subscription::messages::{ChannelMessage, Event, PatternMessage, SubscriptionEvent, SubscriptionKind};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use bytes::Bytes;
use redis_protocol::resp2::types::Frame;
use thiserror::Error;

/// Errors related for decoding push messages
///
/// Every variant is fatal for the connection, as the position in the message stream can no
/// longer be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The given frame is not an array
    #[error("frame is not a push message")]
    NoPushMessage,
    /// Empty array, or first element is not a string. Inner value describes the element found.
    #[error("push message without message kind, found {0}")]
    MissingKind(String),
    /// Unknown message kind (neither message, pmessage nor a subscription acknowledgement)
    #[error("unsupported message kind {0:?}")]
    UnknownKind(String),
    /// Number of elements does not match the message kind
    #[error("{kind:?} message requires {expected} elements, received {actual}")]
    Arity {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
    /// The element at the given index has the wrong type
    #[error("element {index} of {kind:?} message has an invalid type")]
    ElementType { kind: &'static str, index: usize },
    /// Subscription count is negative
    #[error("negative subscription count {count} in {kind:?} message")]
    NegativeCount { kind: &'static str, count: i64 },
    /// The given subscription count overflows usize
    #[error("subscription count {count} in {kind:?} message overflows usize")]
    IntegerOverflow { kind: &'static str, count: i64 },
}

/// Decodes frames to Pub/Sub events
pub trait ToPushMessage {
    /// Tries to decode the frame to a push message
    fn decode_push(self) -> Result<Event, DecodeError>;
}

impl ToPushMessage for Frame {
    fn decode_push(self) -> Result<Event, DecodeError> {
        match self {
            Frame::Array(data) => Decoder::new(data).decode(),
            _ => Err(DecodeError::NoPushMessage),
        }
    }
}

/// Push message decoder
///
/// The message kind is matched once, afterwards the concrete event is constructed from the
/// positional elements. Elements are never coerced to other types.
struct Decoder {
    data: Vec<Frame>,
}

impl Decoder {
    fn new(data: Vec<Frame>) -> Self {
        Self { data }
    }

    fn decode(self) -> Result<Event, DecodeError> {
        let discriminator = match self.data.first() {
            Some(frame) => as_string(frame).ok_or_else(|| DecodeError::MissingKind(format!("{:?}", frame)))?,
            None => return Err(DecodeError::MissingKind(String::from("empty array"))),
        };

        if let Some(kind) = SubscriptionKind::from_discriminator(&discriminator) {
            return self.decode_subscription(kind);
        }

        match &discriminator[..] {
            b"message" => self.decode_message(),
            b"pmessage" => self.decode_pattern_message(),
            other => Err(DecodeError::UnknownKind(String::from_utf8_lossy(other).into_owned())),
        }
    }

    /// Decodes and validates a [kind, channel, count] acknowledgement
    fn decode_subscription(&self, kind: SubscriptionKind) -> Result<Event, DecodeError> {
        let name = kind.as_str();
        self.expect_arity(name, 3)?;

        // Redis answers (p)unsubscribe without targets by a null channel, if nothing was subscribed
        let channel = match &self.data[1] {
            Frame::Null if kind.is_unsubscribe() => None,
            _ => Some(self.string_at(name, 1)?),
        };

        let count = self.integer_at(name, 2)?;
        if count.is_negative() {
            return Err(DecodeError::NegativeCount { kind: name, count });
        }

        let count = usize::try_from(count).map_err(|_| DecodeError::IntegerOverflow { kind: name, count })?;
        Ok(SubscriptionEvent { kind, channel, count }.into())
    }

    /// Decodes and validates a [message, channel, payload] message
    fn decode_message(&self) -> Result<Event, DecodeError> {
        let name = "message";
        self.expect_arity(name, 3)?;

        Ok(ChannelMessage {
            channel: self.string_at(name, 1)?,
            payload: self.string_at(name, 2)?,
        }
        .into())
    }

    /// Decodes and validates a [pmessage, pattern, channel, payload] message
    fn decode_pattern_message(&self) -> Result<Event, DecodeError> {
        let name = "pmessage";
        self.expect_arity(name, 4)?;

        Ok(PatternMessage {
            pattern: self.string_at(name, 1)?,
            channel: self.string_at(name, 2)?,
            payload: self.string_at(name, 3)?,
        }
        .into())
    }

    fn expect_arity(&self, kind: &'static str, expected: usize) -> Result<(), DecodeError> {
        if self.data.len() != expected {
            return Err(DecodeError::Arity {
                kind,
                expected,
                actual: self.data.len(),
            });
        }

        Ok(())
    }

    fn string_at(&self, kind: &'static str, index: usize) -> Result<Bytes, DecodeError> {
        as_string(&self.data[index]).ok_or(DecodeError::ElementType { kind, index })
    }

    fn integer_at(&self, kind: &'static str, index: usize) -> Result<i64, DecodeError> {
        match &self.data[index] {
            Frame::Integer(number) => Ok(*number),
            _ => Err(DecodeError::ElementType { kind, index }),
        }
    }
}

/// Clones the inner value of simple and bulk strings
fn as_string(frame: &Frame) -> Option<Bytes> {
    match frame {
        Frame::SimpleString(data) | Frame::BulkString(data) => Some(data.clone()),
        _ => None,
    }
}
