//! RESP2 wire helpers
//!
//! RESP3 is not offered, as switching protocols requires a `HELLO` handshake on every new connection.
use crate::network::client::CommandErrors;
use alloc::string::ToString;
use bytes::{Bytes, BytesMut};
use redis_protocol::resp2;
use redis_protocol::resp2::types::Frame;
use redis_protocol::types::RedisProtocolError;

/// Decodes the first complete frame of the given bytes.
/// Returns the frame and the number of consumed bytes, or None if the frame is not complete yet.
pub(crate) fn decode(data: &Bytes) -> Result<Option<(Frame, usize)>, RedisProtocolError> {
    resp2::decode::decode(data)
}

/// Encodes the frame and appends it to the given buffer
pub(crate) fn encode_bytes(buf: &mut BytesMut, frame: &Frame) -> Result<usize, RedisProtocolError> {
    resp2::encode::encode_bytes(buf, frame)
}

/// Wraps Redis error replies to CommandErrors
pub(crate) fn assert_error(frame: &Frame) -> Result<(), CommandErrors> {
    match frame {
        Frame::Error(message) => Err(CommandErrors::ErrorResponse(message.to_string())),
        _ => Ok(()),
    }
}
