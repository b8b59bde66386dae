mod checksum;
mod echo_reply;
mod echo_request;
mod sequence_number;
pub(crate) mod socket;
mod ttl;

pub use checksum::checksum;
pub use echo_reply::{decode, match_reply, EchoReply, MalformedReply, ReplyMatch};
pub use echo_request::{encode, EchoRequest};
pub use sequence_number::SequenceNumber;
pub use socket::raw_socket::RawSocket;
pub use socket::TSocket;
pub use ttl::Ttl;

pub const ICMP_HEADER_SIZE: usize = 8;

// Replies are assumed to carry an IPv4 header without options.
pub const IPV4_HEADER_SIZE: usize = 20;

pub const MIN_REPLY_SIZE: usize = IPV4_HEADER_SIZE + ICMP_HEADER_SIZE;

pub const MAX_PACKET_SIZE: usize = 65535;

pub const MAX_PAYLOAD_SIZE: usize = MAX_PACKET_SIZE - MIN_REPLY_SIZE;

pub const ECHO_REQUEST_TYPE: u8 = 8;
pub const ECHO_REQUEST_CODE: u8 = 0;
pub const ECHO_REPLY_TYPE: u8 = 0;
