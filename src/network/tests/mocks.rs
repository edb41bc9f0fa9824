use crate::network::buffer::MemoryParameters;
use crate::network::client::Client;
use crate::network::connection::Connection;
use crate::network::tests::mocks::MockTcpError::Error1;
use crate::subscription::Session;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use embedded_nal::SocketAddr;
use embedded_nal::TcpClientStack;
use embedded_time::clock::Error;
use embedded_time::duration::{Duration, Microseconds};
use embedded_time::fixed_point::FixedPoint;
use embedded_time::fraction::Fraction;
use embedded_time::timer::param::{Armed, OneShot};
use embedded_time::{Clock, Instant, Timer};
use mockall::mock;
use std::io::Write;

#[derive(Debug)]
pub struct SocketMock {
    pub id: i32,
}

impl SocketMock {
    pub fn new(id: i32) -> Self {
        SocketMock { id }
    }
}

#[derive(Debug, Eq, PartialEq)]
pub enum MockTcpError {
    Error1,
}

mock! {
    #[derive(Debug)]
    pub NetworkStack {}

    impl TcpClientStack for NetworkStack {
        type TcpSocket = SocketMock;
        type Error = MockTcpError;

        fn socket(&mut self) -> Result<<Self as TcpClientStack>::TcpSocket, <Self as TcpClientStack>::Error>;

        fn connect(
            &mut self,
            socket: &mut SocketMock,
            remote: SocketAddr,
        ) -> nb::Result<(), <Self as TcpClientStack>::Error>;

        fn is_connected(&mut self, socket: &SocketMock) -> Result<bool, <Self as TcpClientStack>::Error>;

        fn send(
            &mut self,
            socket: &mut SocketMock,
            buffer: &[u8],
        ) -> nb::Result<usize, <Self as TcpClientStack>::Error>;

        fn receive(
            &mut self,
            socket: &mut SocketMock,
            buffer: &mut [u8],
        ) -> nb::Result<usize, <Self as TcpClientStack>::Error>;

        fn close(&mut self, socket: SocketMock) -> Result<(), <Self as TcpClientStack>::Error>;
    }
}

/// Helper for constructing network layer mock
///
/// Expectations are consumed in the order they are defined.
pub struct NetworkMockBuilder {
    stack: MockNetworkStack,
}

impl NetworkMockBuilder {
    /// Simulates a error while fetching socket
    pub fn socket_error(mut self) -> Self {
        self.stack.expect_socket().times(1).returning(move || Err(Error1));
        self
    }

    /// Expects to return a socket with the given ID
    pub fn socket(mut self, socket_id: i32) -> Self {
        self.stack
            .expect_socket()
            .times(1)
            .returning(move || Ok(SocketMock::new(socket_id)));
        self
    }

    /// Asserts that connect is called
    pub fn connect(mut self, socket_id: i32) -> Self {
        self.stack.expect_connect().times(1).returning(move |socket, _| {
            assert_eq!(socket_id, socket.id);
            nb::Result::Ok(())
        });
        self
    }

    /// Simulates a connect call, which is still in progress
    pub fn connect_would_block(mut self, socket_id: i32) -> Self {
        self.stack.expect_connect().times(1).returning(move |socket, _| {
            assert_eq!(socket_id, socket.id);
            nb::Result::Err(nb::Error::WouldBlock)
        });
        self
    }

    /// Simulates a TCP error while connecting
    pub fn connect_error(mut self, socket_id: i32) -> Self {
        self.stack.expect_connect().times(1).returning(move |socket, _| {
            assert_eq!(socket_id, socket.id);
            nb::Result::Err(nb::Error::Other(Error1))
        });
        self
    }

    /// Asserts that is_connected is called
    pub fn expect_is_connected(mut self, socket_id: i32, is_connected: bool) -> Self {
        self.stack.expect_is_connected().times(1).returning(move |socket| {
            assert_eq!(socket_id, socket.id);
            Ok(is_connected)
        });
        self
    }

    /// Simulates an error on is_connected call
    pub fn expect_is_connected_error(mut self, socket_id: i32) -> Self {
        self.stack.expect_is_connected().times(1).returning(move |socket| {
            assert_eq!(socket_id, socket.id);
            Err(Error1)
        });
        self
    }

    /// Asserts that close is called
    pub fn close(mut self, socket_id: i32) -> Self {
        self.stack.expect_close().times(1).returning(move |socket| {
            assert_eq!(socket_id, socket.id);
            Ok(())
        });
        self
    }

    /// Simulates a TCP error while closing
    pub fn close_error(mut self, socket_id: i32) -> Self {
        self.stack.expect_close().times(1).returning(move |socket| {
            assert_eq!(socket_id, socket.id);
            Err(Error1)
        });
        self
    }

    /// Expect to send the given buffer. Empty data skips the assertion.
    pub fn send(mut self, socket_id: i32, data: &'static str) -> Self {
        self.stack.expect_send().times(1).returning(move |socket, buffer| {
            assert_eq!(socket_id, socket.id);
            if !data.is_empty() {
                assert_eq!(data, String::from_utf8(buffer.to_vec()).unwrap());
            }

            nb::Result::Ok(buffer.len())
        });
        self
    }

    /// Accepts only the given number of bytes
    pub fn send_partial(mut self, socket_id: i32, count: usize) -> Self {
        self.stack.expect_send().times(1).returning(move |socket, _| {
            assert_eq!(socket_id, socket.id);
            nb::Result::Ok(count)
        });
        self
    }

    /// Simulates a full TX buffer
    pub fn send_would_block(mut self) -> Self {
        self.stack
            .expect_send()
            .times(1)
            .returning(move |_, _| nb::Result::Err(nb::Error::WouldBlock));
        self
    }

    /// Prepares TCP TX error
    pub fn send_error(mut self) -> Self {
        self.stack
            .expect_send()
            .times(1)
            .returning(move |_, _| nb::Result::Err(nb::Error::Other(Error1)));
        self
    }

    /// Simulates a Redis error response
    pub fn response_error(self) -> Self {
        self.response("-Error\r\n")
    }

    /// Simulates a TCP RX error
    pub fn receive_tcp_error(mut self) -> Self {
        self.stack
            .expect_receive()
            .times(1)
            .returning(move |_, _| nb::Result::Err(nb::Error::Other(MockTcpError::Error1)));
        self
    }

    /// Prepares custom response data
    pub fn response(mut self, data: &'static str) -> Self {
        self.stack.expect_receive().times(1).returning(move |_, mut buffer: &mut [u8]| {
            let _ = buffer.write(data.as_bytes()).unwrap();
            nb::Result::Ok(data.len())
        });
        self
    }

    /// Prepares custom response data
    pub fn response_owned(mut self, data: String) -> Self {
        self.stack.expect_receive().times(1).returning(move |_, mut buffer: &mut [u8]| {
            let _ = buffer.write(data.as_bytes()).unwrap();
            nb::Result::Ok(data.len())
        });
        self
    }

    /// Prepares a bulk string response
    pub fn response_string(self, data: &'static str) -> Self {
        self.response_owned(format!("${}\r\n{}\r\n", data.len(), data))
    }

    /// Prepares an integer response
    pub fn response_integer(self, number: i64) -> Self {
        self.response_owned(format!(":{}\r\n", number))
    }

    /// Simulates a subscription acknowledgement, split in two chunks
    pub fn sub_confirmation(self, kind: &'static str, channel: &'static str, channel_count: usize) -> Self {
        self.response_owned(format!("*3\r\n${}\r\n{}\r\n", kind.len(), kind))
            .response_owned(format!("${}\r\n{}\r\n:{}\r\n", channel.len(), channel, channel_count))
    }

    /// Simulates a published message, split in two chunks
    pub fn sub_message(self, channel: &'static str, payload: &'static str) -> Self {
        self.response("*3\r\n$7\r\nmessage\r\n").response_owned(format!(
            "${}\r\n{}\r\n${}\r\n{}\r\n",
            channel.len(),
            channel,
            payload.len(),
            payload
        ))
    }

    /// Simulates a message published to a channel matching a pattern, split in two chunks
    pub fn sub_pmessage(self, pattern: &'static str, channel: &'static str, payload: &'static str) -> Self {
        self.response_owned(format!("*4\r\n$8\r\npmessage\r\n${}\r\n{}\r\n", pattern.len(), pattern))
            .response_owned(format!(
                "${}\r\n{}\r\n${}\r\n{}\r\n",
                channel.len(),
                channel,
                payload.len(),
                payload
            ))
    }

    /// Simulates a connection closed by remote (end of stream)
    pub fn response_closed(mut self) -> Self {
        self.stack
            .expect_receive()
            .times(1)
            .returning(move |_, _| nb::Result::Ok(0));
        self
    }

    /// Simulates no pending data (in nb context => WouldBlock)
    pub fn response_no_data(mut self) -> Self {
        self.stack
            .expect_receive()
            .times(1)
            .returning(move |_, _| nb::Result::Err(nb::Error::WouldBlock));
        self
    }

    pub fn into_mock(self) -> MockNetworkStack {
        self.stack
    }
}

impl Default for NetworkMockBuilder {
    fn default() -> Self {
        Self {
            stack: MockNetworkStack::new(),
        }
    }
}

#[derive(Debug)]
pub struct TestClock {
    pub next_instants: RefCell<Vec<u64>>,
}

impl Clock for TestClock {
    type T = u64;
    const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000_000);

    fn try_now(&self) -> Result<Instant<Self>, Error> {
        if self.next_instants.borrow().is_empty() {
            return Err(Error::Unspecified);
        }

        Ok(Instant::new(self.next_instants.borrow_mut().remove(0)))
    }

    fn new_timer<Dur: Duration>(&self, duration: Dur) -> Timer<OneShot, Armed, Self, Dur>
    where
        Dur: FixedPoint,
    {
        Timer::new(self, duration)
    }
}

impl TestClock {
    pub fn new(next_instants: Vec<u64>) -> Self {
        TestClock {
            next_instants: RefCell::new(next_instants),
        }
    }

    /// Number of instants not consumed yet
    pub fn remaining_instants(&self) -> usize {
        self.next_instants.borrow().len()
    }
}

/// Creates a client on the given (shared) socket
pub fn create_mocked_client<'a>(
    network_stack: &'a mut MockNetworkStack,
    socket: &'a mut SocketMock,
    clock: &'a TestClock,
    timeout: Microseconds,
) -> Client<'a, MockNetworkStack, TestClock> {
    Client {
        connection: Connection::new(network_stack, socket, MemoryParameters::default()),
        clock: Some(clock),
        timeout_duration: timeout,
        faulty: false,
    }
}

/// Creates a session owning a socket with the given ID.
/// The socket gets closed when the session is dropped, so a close() expectation is required.
pub fn create_mocked_session<'a>(
    network_stack: &'a mut MockNetworkStack,
    socket_id: i32,
    clock: Option<&'a TestClock>,
) -> Session<'a, MockNetworkStack, TestClock> {
    create_limited_session(network_stack, socket_id, clock, MemoryParameters::default())
}

/// Creates a session with the given receive buffer limits
pub fn create_limited_session<'a>(
    network_stack: &'a mut MockNetworkStack,
    socket_id: i32,
    clock: Option<&'a TestClock>,
    memory: MemoryParameters,
) -> Session<'a, MockNetworkStack, TestClock> {
    Session::new(
        Connection::new(network_stack, SocketMock::new(socket_id), memory),
        clock,
    )
}
