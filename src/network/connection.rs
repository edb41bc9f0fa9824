use crate::network::buffer::{FrameBuffer, MemoryParameters};
use crate::network::client::CommandErrors;
use crate::network::protocol;
use crate::network::timeout::Deadline;
use bytes::BytesMut;
use core::borrow::BorrowMut;
use core::fmt::{Debug, Formatter};
use embedded_nal::TcpClientStack;
use embedded_time::Clock;
use redis_protocol::resp2::types::Frame;

/// Number of bytes fetched from the network stack at once
const CHUNK_SIZE: usize = 64;

/// Frame level access to a TCP socket
///
/// S is either the socket itself (dedicated connection owned by a subscription session) or a
/// mutable borrow of a socket cached by the [ConnectionHandler](crate::network::ConnectionHandler).
pub(crate) struct Connection<'a, N: TcpClientStack, S: BorrowMut<N::TcpSocket>> {
    stack: &'a mut N,
    socket: S,
    buffer: FrameBuffer,
}

impl<'a, N: TcpClientStack, S: BorrowMut<N::TcpSocket>> Connection<'a, N, S> {
    pub fn new(stack: &'a mut N, socket: S, memory: MemoryParameters) -> Self {
        Self {
            stack,
            socket,
            buffer: FrameBuffer::new(memory),
        }
    }

    /// Encodes the frame and sends it completely
    pub fn write_frame(&mut self, frame: &Frame) -> Result<(), CommandErrors> {
        let mut buffer = BytesMut::new();
        if protocol::encode_bytes(&mut buffer, frame).is_err() {
            return Err(CommandErrors::EncodingCommandFailed);
        }

        let mut sent = 0;
        while sent < buffer.len() {
            match self.stack.send(socket_of::<N, S>(&mut self.socket), &buffer[sent..]) {
                Ok(0) => return Err(CommandErrors::TcpError),
                Ok(count) => sent += count,
                Err(nb::Error::WouldBlock) => {}
                Err(nb::Error::Other(_)) => return Err(CommandErrors::TcpError),
            }
        }

        Ok(())
    }

    /// Blocks until the next frame is complete or the deadline expires
    ///
    /// On timeout, partially received data stays buffered, so the next call continues at the same
    /// position.
    pub fn read_frame<C: Clock>(&mut self, deadline: &Deadline<'_, C>) -> Result<Frame, CommandErrors> {
        loop {
            if let Some(frame) = self.buffer.take_frame()? {
                return Ok(frame);
            }

            let mut chunk: [u8; CHUNK_SIZE] = [0; CHUNK_SIZE];
            match self.stack.receive(socket_of::<N, S>(&mut self.socket), &mut chunk) {
                // End of stream, remote closed the connection
                Ok(0) => return Err(CommandErrors::TcpError),
                Ok(count) => self.buffer.append(&chunk[..count])?,
                Err(nb::Error::WouldBlock) => {
                    if deadline.expired()? {
                        return Err(CommandErrors::Timeout);
                    }
                }
                Err(nb::Error::Other(_)) => return Err(CommandErrors::TcpError),
            }
        }
    }

    /// Drops buffered data and all data pending on the socket
    pub fn discard_pending(&mut self) {
        let mut chunk: [u8; CHUNK_SIZE] = [0; CHUNK_SIZE];
        while let Ok(count) = self.stack.receive(socket_of::<N, S>(&mut self.socket), &mut chunk) {
            if count == 0 {
                break;
            }
        }

        self.buffer.clear();
    }

    #[cfg(test)]
    pub fn pending_bytes(&self) -> usize {
        self.buffer.pending_bytes()
    }
}

impl<'a, N: TcpClientStack> Connection<'a, N, N::TcpSocket> {
    /// Releases the dedicated socket
    pub fn close(self) -> Result<(), N::Error> {
        let Connection { stack, socket, .. } = self;
        stack.close(socket)
    }
}

fn socket_of<N: TcpClientStack, S: BorrowMut<N::TcpSocket>>(socket: &mut S) -> &mut N::TcpSocket {
    <S as BorrowMut<N::TcpSocket>>::borrow_mut(socket)
}

impl<N: TcpClientStack, S: BorrowMut<N::TcpSocket>> Debug for Connection<'_, N, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Connection").field("buffer", &self.buffer).finish()
    }
}
