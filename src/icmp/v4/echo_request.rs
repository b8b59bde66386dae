use super::{
    checksum, SequenceNumber, ECHO_REQUEST_CODE, ECHO_REQUEST_TYPE, ICMP_HEADER_SIZE,
};

/// An ICMPv4 echo request with a zero-filled payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EchoRequest {
    pub identifier: u16,
    pub sequence_number: SequenceNumber,
    pub payload_size: usize,
}

impl EchoRequest {
    pub fn new(identifier: u16, sequence_number: SequenceNumber, payload_size: usize) -> Self {
        EchoRequest {
            identifier,
            sequence_number,
            payload_size,
        }
    }

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        encode(
            ECHO_REQUEST_TYPE,
            ECHO_REQUEST_CODE,
            self.identifier,
            self.sequence_number.into(),
            self.payload_size,
        )
    }
}

/// Serializes an ICMP header followed by `payload_size` zero bytes and fills in the
/// checksum.
#[must_use]
pub fn encode(
    icmp_type: u8,
    code: u8,
    identifier: u16,
    sequence: u16,
    payload_size: usize,
) -> Vec<u8> {
    let mut package = Vec::with_capacity(ICMP_HEADER_SIZE + payload_size);
    package.extend_from_slice(&[icmp_type, code, 0, 0]);
    package.extend_from_slice(&identifier.to_be_bytes());
    package.extend_from_slice(&sequence.to_be_bytes());
    package.resize(ICMP_HEADER_SIZE + payload_size, 0);

    let checksum = checksum(&package);
    package[2..4].copy_from_slice(&checksum.to_be_bytes());
    package
}
