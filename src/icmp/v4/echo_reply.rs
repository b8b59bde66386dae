use super::{SequenceNumber, Ttl, ECHO_REPLY_TYPE, IPV4_HEADER_SIZE, MIN_REPLY_SIZE};
use pnet_packet::icmp::echo_reply::EchoReplyPacket;
use pnet_packet::ipv4::Ipv4Packet;
use std::fmt;
use std::net::Ipv4Addr;

/// Fields of a received IPv4 packet carrying an ICMP message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EchoReply {
    pub source: Ipv4Addr,
    pub ttl: Ttl,
    /// Received bytes after the IPv4 and ICMP headers.
    pub icmp_payload_len: usize,
    pub icmp_type: u8,
    pub identifier: u16,
    pub sequence_number: SequenceNumber,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MalformedReply {
    pub len: usize,
}

impl fmt::Display for MalformedReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "malformed reply: {} bytes received, at least {} expected",
            self.len, MIN_REPLY_SIZE
        )
    }
}

impl std::error::Error for MalformedReply {}

/// Outcome of checking a received packet against the outstanding request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyMatch {
    Matched(EchoReply),
    Unmatched(EchoReply),
    Malformed(MalformedReply),
}

/// Decodes a raw IPv4 packet. The IPv4 header is taken to be 20 bytes long.
pub fn decode(raw: &[u8]) -> Result<EchoReply, MalformedReply> {
    let malformed = MalformedReply { len: raw.len() };
    if raw.len() < MIN_REPLY_SIZE {
        return Err(malformed);
    }
    let ipv4_packet = Ipv4Packet::new(raw).ok_or(malformed)?;
    let icmp_packet =
        EchoReplyPacket::new(&raw[IPV4_HEADER_SIZE..]).ok_or(malformed)?;

    Ok(EchoReply {
        source: ipv4_packet.get_source(),
        ttl: ipv4_packet.get_ttl().into(),
        icmp_payload_len: raw.len() - MIN_REPLY_SIZE,
        icmp_type: icmp_packet.get_icmp_type().0,
        identifier: icmp_packet.get_identifier(),
        sequence_number: icmp_packet.get_sequence_number().into(),
    })
}

/// Decodes `raw` and checks that it is the echo reply to the request with the given
/// identifier and sequence number.
pub fn match_reply(
    raw: &[u8],
    identifier: u16,
    sequence_number: SequenceNumber,
) -> ReplyMatch {
    match decode(raw) {
        Err(malformed) => ReplyMatch::Malformed(malformed),
        Ok(reply)
            if reply.icmp_type == ECHO_REPLY_TYPE
                && reply.identifier == identifier
                && reply.sequence_number == sequence_number =>
        {
            ReplyMatch::Matched(reply)
        }
        Ok(reply) => ReplyMatch::Unmatched(reply),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::icmp::v4::checksum;
    use pnet_packet::icmp::echo_reply::MutableEchoReplyPacket;
    use pnet_packet::icmp::IcmpType;
    use pnet_packet::ipv4::MutableIpv4Packet;
    use pnet_packet::Packet;

    fn localhost_package(icmp_type: u8, identifier: u16, sequence_number: u16) -> Vec<u8> {
        let source = Ipv4Addr::LOCALHOST;
        new_ipv4_echo_package(source, 64, icmp_type, identifier, sequence_number, &[])
    }

    /// Builds an IPv4 packet (20-byte header) carrying an ICMP echo message.
    pub(crate) fn new_ipv4_echo_package(
        source: Ipv4Addr,
        ttl: u8,
        icmp_type: u8,
        identifier: u16,
        sequence_number: u16,
        payload: &[u8],
    ) -> Vec<u8> {
        let icmp_len = EchoReplyPacket::minimum_packet_size() + payload.len();
        let mut icmp_buf = vec![0u8; icmp_len];
        let mut echo_reply = MutableEchoReplyPacket::new(&mut icmp_buf).unwrap();
        echo_reply.set_icmp_type(IcmpType::new(icmp_type));
        echo_reply.set_identifier(identifier);
        echo_reply.set_sequence_number(sequence_number);
        echo_reply.set_payload(payload);
        echo_reply.set_checksum(0);
        let sum = checksum(echo_reply.packet());
        echo_reply.set_checksum(sum);

        let total_len = IPV4_HEADER_SIZE + icmp_len;
        let mut buf = vec![0u8; total_len];
        let mut ipv4 = MutableIpv4Packet::new(&mut buf).unwrap();
        ipv4.set_version(4);
        ipv4.set_header_length(5);
        ipv4.set_total_length(u16::try_from(total_len).unwrap());
        ipv4.set_ttl(ttl);
        ipv4.set_source(source);
        ipv4.set_destination(Ipv4Addr::new(192, 168, 0, 2));
        ipv4.set_payload(&icmp_buf);
        buf
    }

    #[test]
    fn decode_rejects_short_input() {
        assert_eq!(Err(MalformedReply { len: 10 }), decode(&[0u8; 10]));
        assert_eq!(Err(MalformedReply { len: 27 }), decode(&[0u8; 27]));
    }

    #[test]
    fn decode_reads_fixed_offsets() {
        let mut raw = [0u8; 28];
        raw[8] = 57;
        raw[12..16].copy_from_slice(&[10, 1, 2, 3]);

        let reply = decode(&raw).unwrap();

        assert_eq!(Ipv4Addr::new(10, 1, 2, 3), reply.source);
        assert_eq!(Ttl(57), reply.ttl);
        assert_eq!(0, reply.icmp_payload_len);
    }

    #[test]
    fn decode_echo_reply_package() {
        let source = Ipv4Addr::new(8, 8, 4, 4);
        let payload = [0u8; 32];
        let raw = new_ipv4_echo_package(source, 64, ECHO_REPLY_TYPE, 0xABCD, 9, &payload);

        let reply = decode(&raw).unwrap();

        assert_eq!(
            EchoReply {
                source,
                ttl: Ttl(64),
                icmp_payload_len: 32,
                icmp_type: ECHO_REPLY_TYPE,
                identifier: 0xABCD,
                sequence_number: SequenceNumber::from(9),
            },
            reply
        );
    }

    #[test]
    fn match_reply_with_same_identifier_and_sequence_number() {
        let raw = localhost_package(ECHO_REPLY_TYPE, 7, 3);
        let result = match_reply(&raw, 7, SequenceNumber::from(3));
        assert!(matches!(result, ReplyMatch::Matched(_)));
    }

    #[test]
    fn match_reply_with_other_identifier_is_unmatched() {
        let raw = localhost_package(ECHO_REPLY_TYPE, 8, 3);
        let result = match_reply(&raw, 7, SequenceNumber::from(3));
        assert!(matches!(result, ReplyMatch::Unmatched(_)));
    }

    #[test]
    fn match_reply_with_other_sequence_number_is_unmatched() {
        let raw = localhost_package(ECHO_REPLY_TYPE, 7, 2);
        let result = match_reply(&raw, 7, SequenceNumber::from(3));
        assert!(matches!(result, ReplyMatch::Unmatched(_)));
    }

    #[test]
    fn echo_request_is_unmatched() {
        // On loopback a raw socket also sees the outgoing request.
        let raw = localhost_package(8, 7, 3);
        let result = match_reply(&raw, 7, SequenceNumber::from(3));
        assert!(matches!(result, ReplyMatch::Unmatched(_)));
    }

    #[test]
    fn match_reply_short_input_is_malformed() {
        assert_eq!(
            ReplyMatch::Malformed(MalformedReply { len: 10 }),
            match_reply(&[0u8; 10], 7, SequenceNumber::start_value())
        );
    }
}
