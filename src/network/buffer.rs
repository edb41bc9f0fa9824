use crate::network::client::CommandErrors;
use crate::network::protocol;
use bytes::BytesMut;
use redis_protocol::resp2::types::Frame;

/// Memory limits of the receive buffer
#[derive(Debug, Clone, Default)]
pub struct MemoryParameters {
    /// Max. number of received but not yet decoded bytes. None means unlimited.
    pub buffer_size: Option<usize>,
}

/// Buffer for received data, which is not decoded to frames yet
///
/// Frames are decoded lazily one at a time, so the read position advances by exactly one frame
/// per [take_frame](FrameBuffer::take_frame) call. Incomplete data is decoded again only after
/// new bytes have been appended.
#[derive(Debug)]
pub(crate) struct FrameBuffer {
    pending: BytesMut,
    memory: MemoryParameters,

    /// Pending data may contain a complete frame
    dirty: bool,
}

impl FrameBuffer {
    pub fn new(memory: MemoryParameters) -> Self {
        Self {
            pending: BytesMut::new(),
            memory,
            dirty: false,
        }
    }

    /// Appends received data
    pub fn append(&mut self, data: &[u8]) -> Result<(), CommandErrors> {
        if let Some(limit) = self.memory.buffer_size {
            if self.pending.len() + data.len() > limit {
                return Err(CommandErrors::MemoryFull);
            }
        }

        self.pending.extend_from_slice(data);
        self.dirty = true;
        Ok(())
    }

    /// Decodes and removes the next frame. Returns None if no complete frame is buffered.
    pub fn take_frame(&mut self) -> Result<Option<Frame>, CommandErrors> {
        if !self.dirty || self.pending.is_empty() {
            return Ok(None);
        }

        // Frames reference the received bytes without copying
        let bytes = self.pending.split().freeze();
        match protocol::decode(&bytes) {
            Ok(Some((frame, size))) => {
                self.pending = BytesMut::from(bytes.slice(size..));
                self.dirty = !self.pending.is_empty();
                Ok(Some(frame))
            }
            Ok(None) => {
                self.pending = BytesMut::from(bytes);
                self.dirty = false;
                Ok(None)
            }
            Err(_) => {
                self.pending = BytesMut::from(bytes);
                Err(CommandErrors::ProtocolViolation)
            }
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.dirty = false;
    }

    /// Number of buffered bytes not decoded yet
    #[cfg(test)]
    pub fn pending_bytes(&self) -> usize {
        self.pending.len()
    }

    /// True if the next take_frame call decodes again
    #[cfg(test)]
    pub fn needs_decode(&self) -> bool {
        self.dirty
    }
}
