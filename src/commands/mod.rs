pub mod builder;
pub mod publish;
pub mod subscribe;

use redis_protocol::resp2::types::Frame;
use thiserror::Error;

/// Error in case Redis response type does not match specification
#[derive(Debug, Error)]
#[error("response type does not match command specification")]
pub struct ResponseTypeError {}

/// Generic command structure for request/response commands executed by [Client](crate::network::Client)
pub trait Command {
    /// Response type, either a custom evaluated "high-level" response or the original RESP frame
    type Response;

    /// Encodes the command to RESP2 frame
    fn encode(&self) -> Frame;

    /// The command has the ability to evaluate the response frame and craft its own high level
    /// response from that.
    ///
    /// Error responses are captured upfront and converted to CommandErrors::ErrorResponse.
    /// So error responses never reach that method.
    ///
    /// Returns Error only in case of protocol violation (e.g. received an array for an command
    /// that only returns integers)
    fn eval_response(&self, frame: Frame) -> Result<Self::Response, ResponseTypeError>;
}
