use super::{socket_timeout, TSocket};
use socket2::{Domain, Protocol, SockAddr, Type};
use std::io::{self, Read};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Raw ICMPv4 socket connected to a single destination. Reads return whole IPv4
/// packets. Opening it usually needs root privileges or `CAP_NET_RAW`.
pub struct RawSocket {
    socket: socket2::Socket,
    remote_addr: Ipv4Addr,
}

impl RawSocket {
    pub fn connect(remote_addr: Ipv4Addr, timeout: Duration) -> io::Result<Self> {
        tracing::trace!("creating RawSocket connected to {remote_addr}");
        let socket = socket2::Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4))?;
        let addr: SockAddr = SocketAddr::new(IpAddr::V4(remote_addr), 0).into();
        socket.connect_timeout(&addr, socket_timeout(timeout))?;
        Ok(RawSocket {
            socket,
            remote_addr,
        })
    }
}

impl TSocket for RawSocket {
    fn send(&self, buf: &[u8], timeout: Duration) -> io::Result<usize> {
        self.socket.set_write_timeout(Some(socket_timeout(timeout)))?;
        self.socket.send(buf)
    }

    fn recv(&self, buf: &mut [u8], timeout: Duration) -> io::Result<usize> {
        self.socket.set_read_timeout(Some(socket_timeout(timeout)))?;
        (&self.socket).read(buf)
    }

    fn remote_addr(&self) -> Ipv4Addr {
        self.remote_addr
    }
}
