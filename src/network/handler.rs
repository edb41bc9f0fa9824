use crate::network::buffer::MemoryParameters;
use crate::network::client::Client;
use crate::network::connection::Connection;
use crate::subscription::Session;
use embedded_nal::{SocketAddr, TcpClientStack};
use embedded_time::duration::Extensions;
use embedded_time::duration::Microseconds;
use embedded_time::Clock;
use log::debug;
use thiserror::Error;

/// Error handling for connection management
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// Unable to get a socket from network layer
    #[error("unable to get a socket from network layer")]
    TcpSocketError,

    /// TCP Connect failed
    #[error("tcp connect failed")]
    TcpConnectionFailed,
}

/// Trait for Redis connection handler.
///
/// Exists mainly to facilitate use in other crates, especially in relation to unit tests.
pub trait RedisConnectionHandler<N: TcpClientStack> {
    /// See [ConnectionHandler#method.connect]
    fn connect<'a, C: Clock>(
        &'a mut self,
        network: &'a mut N,
        clock: Option<&'a C>,
    ) -> Result<Client<'a, N, C>, ConnectionError>;

    /// See [ConnectionHandler#method.open_session]
    fn open_session<'a, C: Clock>(
        &self,
        network: &'a mut N,
        clock: Option<&'a C>,
    ) -> Result<Session<'a, N, C>, ConnectionError>;

    /// See [ConnectionHandler#method.disconnect]
    fn disconnect(&mut self, network: &mut N);

    /// See [ConnectionHandler#method.timeout]
    fn timeout(&mut self, timeout: Microseconds) -> &mut Self;

    /// See [ConnectionHandler#method.memory]
    fn memory(&mut self, memory: MemoryParameters) -> &mut Self;
}

/// Connection handler for Redis client
///
/// Manages two kinds of connections:
/// * A cached, shared connection used by [Client] for regular commands like PUBLISH
/// * Dedicated connections, one per Pub/Sub [Session]. Once subscribed, Redis only allows
///   Pub/Sub commands on a connection, so these are never shared or cached.
pub struct ConnectionHandler<N: TcpClientStack> {
    /// Network details of Redis server
    remote: SocketAddr,

    /// Cached socket of the shared connection
    socket: Option<N::TcpSocket>,

    /// Optional timeout
    /// Max. duration waiting for Redis responses on the shared connection
    timeout: Microseconds,

    /// Receive buffer limits, applied to shared and dedicated connections
    memory: MemoryParameters,
}

impl<N: TcpClientStack> ConnectionHandler<N> {
    /// Creates a new connection handler using RESP2 protocol
    pub fn resp2(remote: SocketAddr) -> ConnectionHandler<N> {
        ConnectionHandler {
            remote,
            socket: None,
            timeout: 0.microseconds(),
            memory: MemoryParameters::default(),
        }
    }
}

impl<N: TcpClientStack> RedisConnectionHandler<N> for ConnectionHandler<N> {
    /// Returns a client on the shared connection. Caches the connection for future reuse.
    /// The client has the same lifetime as the network reference.
    ///
    /// As the connection is cached, later calls are cheap.
    ///
    /// # Arguments
    ///
    /// * `network`: Mutable borrow of embedded-nal network stack
    /// * `clock`: Borrow of embedded-time clock. Required if a timeout is configured.
    fn connect<'a, C: Clock>(
        &'a mut self,
        network: &'a mut N,
        clock: Option<&'a C>,
    ) -> Result<Client<'a, N, C>, ConnectionError> {
        // Check if cached socket is still connected
        self.test_socket(network);

        if self.socket.is_none() {
            self.socket = Some(self.connect_socket(network)?);
            debug!("Shared connection established: remote={}", self.remote);
        }

        let timeout_duration = self.timeout;
        let memory = self.memory.clone();
        let socket = self.socket.as_mut().ok_or(ConnectionError::TcpSocketError)?;

        Ok(Client {
            connection: Connection::new(network, socket, memory),
            clock,
            timeout_duration,
            faulty: false,
        })
    }

    /// Opens a new connection reserved exclusively for a Pub/Sub session.
    ///
    /// The cached shared connection is neither used nor affected. The session owns the socket
    /// until it's closed or dropped.
    fn open_session<'a, C: Clock>(
        &self,
        network: &'a mut N,
        clock: Option<&'a C>,
    ) -> Result<Session<'a, N, C>, ConnectionError> {
        let socket = self.connect_socket(network)?;
        debug!("Dedicated Pub/Sub connection established: remote={}", self.remote);

        Ok(Session::new(
            Connection::new(network, socket, self.memory.clone()),
            clock,
        ))
    }

    /// Disconnects the shared connection
    fn disconnect(&mut self, network: &mut N) {
        if let Some(socket) = self.socket.take() {
            let _ = network.close(socket);
            debug!("Shared connection closed: remote={}", self.remote);
        }
    }

    /// Sets the max. duration waiting for Redis responses on the shared connection
    fn timeout(&mut self, timeout: Microseconds) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Sets the receive buffer limits
    fn memory(&mut self, memory: MemoryParameters) -> &mut Self {
        self.memory = memory;
        self
    }
}

impl<N: TcpClientStack> ConnectionHandler<N> {
    /// Tests if the cached socket is still connected, if not it's closed
    fn test_socket(&mut self, network: &mut N) {
        let connected = match &self.socket {
            None => return,
            Some(socket) => network.is_connected(socket).unwrap_or(false),
        };

        if !connected {
            self.disconnect(network);
        }
    }

    /// Creates a new TCP connection
    fn connect_socket(&self, network: &mut N) -> Result<N::TcpSocket, ConnectionError> {
        let mut socket = network.socket().map_err(|_| ConnectionError::TcpSocketError)?;

        if nb::block!(network.connect(&mut socket, self.remote)).is_err() {
            let _ = network.close(socket);
            return Err(ConnectionError::TcpConnectionFailed);
        }

        Ok(socket)
    }
}
