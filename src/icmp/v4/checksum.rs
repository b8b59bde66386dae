/// Internet checksum (RFC 1071) over `bytes`.
///
/// Bytes are summed as big-endian 16-bit words into a 32-bit accumulator. A trailing
/// odd byte is added as its plain value, not as the high byte of a padded word, so
/// odd-length buffers differ from a strict RFC 1071 implementation.
#[must_use]
pub fn checksum(bytes: &[u8]) -> u16 {
    let mut sum: u32 = 0;

    let mut words = bytes.chunks_exact(2);
    for word in &mut words {
        sum = sum.wrapping_add(u32::from(u16::from_be_bytes([word[0], word[1]])));
    }
    if let [last] = words.remainder() {
        sum = sum.wrapping_add(u32::from(*last));
    }

    while sum >> 16 != 0 {
        sum = (sum >> 16) + (sum & 0xFFFF);
    }

    #[allow(clippy::cast_possible_truncation)]
    let folded = sum as u16;
    !folded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_request_header_golden_vector() {
        let header = [8, 0, 0, 0, 0, 1, 0, 1];
        assert_eq!(0xF7FD, checksum(&header));
    }

    #[test]
    fn ipv4_header_golden_vector() {
        let header = [
            0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11, 0x00, 0x00, 0xc0, 0xa8,
            0x00, 0x01, 0xc0, 0xa8, 0x00, 0xc7,
        ];
        assert_eq!(0xB861, checksum(&header));
    }

    #[test]
    fn checksum_over_checksummed_packet_is_zero() {
        let mut packet = [8, 0, 0, 0, 0x12, 0x34, 0x00, 0x07, 0xde, 0xad, 0xbe, 0xef];
        let value = checksum(&packet);
        packet[2..4].copy_from_slice(&value.to_be_bytes());
        assert_eq!(0, checksum(&packet));
    }

    #[test]
    fn empty_buffer() {
        assert_eq!(0xFFFF, checksum(&[]));
    }

    #[test]
    fn trailing_odd_byte_is_added_unshifted() {
        assert_eq!(!0x0001, checksum(&[0x01]));
        assert_eq!(
            !0x0102_u16.wrapping_add(0x03),
            checksum(&[0x01, 0x02, 0x03])
        );
    }

    #[test]
    fn carries_are_folded() {
        assert_eq!(0x0000, checksum(&[0xFF, 0xFF, 0xFF, 0xFF]));
        // 0xFFFF + 0x0001 = 0x1_0000, folds to 0x0001
        assert_eq!(0xFFFE, checksum(&[0xFF, 0xFF, 0x00, 0x01]));
    }

    #[test]
    fn depends_on_bytes_only() {
        let whole: Vec<u8> = (0..64_u8).collect();
        let (head, tail) = whole.split_at(22);
        let reassembled: Vec<u8> = head.iter().chain(tail.iter()).copied().collect();
        assert_eq!(checksum(&whole), checksum(&reassembled));
        assert_eq!(checksum(&whole), checksum(&whole.clone()));
    }
}
