use crate::network::handler::ConnectionError::{TcpConnectionFailed, TcpSocketError};
use crate::network::handler::{ConnectionHandler, RedisConnectionHandler};
use crate::network::tests::mocks::{MockNetworkStack, NetworkMockBuilder, TestClock};
use crate::subscription::SessionState;
use alloc::vec;
use core::str::FromStr;
use embedded_nal::SocketAddr;

fn create_handler() -> ConnectionHandler<MockNetworkStack> {
    ConnectionHandler::resp2(SocketAddr::from_str("127.0.0.1:6379").unwrap())
}

#[test]
fn test_connect_new_socket_fails() {
    let clock = TestClock::new(vec![]);
    let mut stack = NetworkMockBuilder::default().socket_error().into_mock();

    let mut handler = create_handler();
    let result = handler.connect(&mut stack, Some(&clock));

    assert_eq!(TcpSocketError, result.unwrap_err());
}

#[test]
fn test_connect_new_connection_fail() {
    let clock = TestClock::new(vec![]);
    let mut stack = NetworkMockBuilder::default()
        .socket(167)
        .connect_error(167)
        .close(167)
        .into_mock();

    let mut handler = create_handler();
    let result = handler.connect(&mut stack, Some(&clock));

    assert_eq!(TcpConnectionFailed, result.unwrap_err());
}

#[test]
fn test_connect_blocks_until_connected() {
    let clock = TestClock::new(vec![]);
    let mut stack = NetworkMockBuilder::default()
        .socket(167)
        .connect_would_block(167)
        .connect(167)
        .into_mock();

    let mut handler = create_handler();
    handler.connect(&mut stack, Some(&clock)).unwrap();
}

#[test]
fn test_connect_socket_reused() {
    let clock = TestClock::new(vec![]);
    let mut stack = NetworkMockBuilder::default()
        .socket(167)
        .connect(167)
        .expect_is_connected(167, true)
        .into_mock();

    let mut handler = create_handler();
    handler.connect(&mut stack, Some(&clock)).unwrap();
    handler.connect(&mut stack, Some(&clock)).unwrap();
}

#[test]
fn test_connect_socket_is_connected_error() {
    let clock = TestClock::new(vec![]);
    let mut stack = NetworkMockBuilder::default()
        .socket(167)
        .connect(167)
        .expect_is_connected_error(167)
        .close(167)
        .socket(297)
        .connect(297)
        .into_mock();

    let mut handler = create_handler();
    handler.connect(&mut stack, Some(&clock)).unwrap();
    handler.connect(&mut stack, Some(&clock)).unwrap();
}

#[test]
fn test_connect_cached_socket_not_connected() {
    let clock = TestClock::new(vec![]);
    let mut stack = NetworkMockBuilder::default()
        .socket(167)
        .connect(167)
        .expect_is_connected(167, false)
        .close(167)
        .socket(297)
        .connect(297)
        .into_mock();

    let mut handler = create_handler();
    handler.connect(&mut stack, Some(&clock)).unwrap();
    handler.connect(&mut stack, Some(&clock)).unwrap();
}

#[test]
fn test_disconnect_closes_cached_socket() {
    let clock = TestClock::new(vec![]);
    let mut stack = NetworkMockBuilder::default()
        .socket(167)
        .connect(167)
        .close(167)
        .socket(297)
        .connect(297)
        .into_mock();

    let mut handler = create_handler();
    handler.connect(&mut stack, Some(&clock)).unwrap();
    handler.disconnect(&mut stack);

    // Nothing cached, so no further close call expected
    handler.disconnect(&mut stack);

    handler.connect(&mut stack, Some(&clock)).unwrap();
}

#[test]
fn test_open_session_uses_new_socket() {
    let clock = TestClock::new(vec![]);
    let mut stack = NetworkMockBuilder::default().socket(412).connect(412).close(412).into_mock();

    let handler = create_handler();
    let session = handler.open_session(&mut stack, Some(&clock)).unwrap();

    assert_eq!(SessionState::Idle, session.state());
}

#[test]
fn test_open_session_does_not_touch_shared_socket() {
    let clock = TestClock::new(vec![]);
    let mut shared_stack = NetworkMockBuilder::default()
        .socket(167)
        .connect(167)
        .expect_is_connected(167, true)
        .into_mock();
    let mut session_stack = NetworkMockBuilder::default()
        .socket(412)
        .connect(412)
        .close(412)
        .socket(413)
        .connect(413)
        .close(413)
        .into_mock();

    let mut handler = create_handler();
    handler.connect(&mut shared_stack, Some(&clock)).unwrap();

    // Sessions are never cached, so every call opens a new connection
    handler.open_session(&mut session_stack, Some(&clock)).unwrap();
    handler.open_session(&mut session_stack, Some(&clock)).unwrap();

    handler.connect(&mut shared_stack, Some(&clock)).unwrap();
}

#[test]
fn test_open_session_socket_fails() {
    let clock = TestClock::new(vec![]);
    let mut stack = NetworkMockBuilder::default().socket_error().into_mock();

    let handler = create_handler();
    let result = handler.open_session(&mut stack, Some(&clock));

    assert_eq!(TcpSocketError, result.unwrap_err());
}

#[test]
fn test_open_session_connection_fail() {
    let clock = TestClock::new(vec![]);
    let mut stack = NetworkMockBuilder::default()
        .socket(412)
        .connect_error(412)
        .close(412)
        .into_mock();

    let handler = create_handler();
    let result = handler.open_session(&mut stack, Some(&clock));

    assert_eq!(TcpConnectionFailed, result.unwrap_err());
}
