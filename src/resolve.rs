use crate::ping_error::{PingError, PingResult};
use std::net::{IpAddr, Ipv4Addr};

/// Resolves `destination` to an IPv4 address. Dotted-quad literals are taken as they
/// are; anything else is looked up and the first IPv4 result wins.
pub fn resolve(destination: &str) -> PingResult<Ipv4Addr> {
    if let Ok(ip) = destination.parse::<Ipv4Addr>() {
        return Ok(ip);
    }
    if destination.parse::<IpAddr>().is_ok() {
        return Err(PingError::new(format!(
            "{destination} is not an IPv4 address"
        )));
    }

    let ips: Vec<IpAddr> = dns_lookup::lookup_host(destination).map_err(|e| {
        PingError::with_source(format!("could not resolve hostname {destination}"), e)
    })?;
    ips.into_iter()
        .find_map(|ip| match ip {
            IpAddr::V4(ipv4) => Some(ipv4),
            IpAddr::V6(_) => None,
        })
        .ok_or_else(|| {
            PingError::new(format!(
                "could not resolve hostname {destination} to IPv4"
            ))
        })
}
