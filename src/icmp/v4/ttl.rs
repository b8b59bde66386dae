use std::fmt;

/// Time-to-live field of a received IPv4 header.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Ttl(pub u8);

impl From<u8> for Ttl {
    fn from(hops: u8) -> Self {
        Ttl(hops)
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_header_byte() {
        assert_eq!(Ttl(128), Ttl::from(128));
    }

    #[test]
    fn fmt() {
        assert_eq!("64", Ttl(64).to_string());
    }
}
