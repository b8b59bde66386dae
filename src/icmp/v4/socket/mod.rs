use std::io;
use std::net::Ipv4Addr;
use std::time::Duration;

pub(crate) mod raw_socket;

/// Smallest timeout a socket can express. `SO_RCVTIMEO`/`SO_SNDTIMEO` have
/// microsecond resolution and a zero value disables the timeout.
pub(crate) const MIN_SOCKET_TIMEOUT: Duration = Duration::from_micros(1);

/// A connected ICMPv4 socket. Every call blocks for at most `timeout`; an expired
/// deadline is reported as `WouldBlock` or `TimedOut`. The socket is closed on drop.
pub trait TSocket {
    fn send(&self, buf: &[u8], timeout: Duration) -> io::Result<usize>;

    /// Reads one IPv4 packet (header included) into `buf`.
    fn recv(&self, buf: &mut [u8], timeout: Duration) -> io::Result<usize>;

    fn remote_addr(&self) -> Ipv4Addr;
}

pub(crate) fn is_timeout(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}

/// Timeout to hand to the socket; never rounds down to "block forever".
pub(crate) fn socket_timeout(timeout: Duration) -> Duration {
    timeout.max(MIN_SOCKET_TIMEOUT)
}
