#![warn(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub use icmp::v4::{EchoReply, EchoRequest, MalformedReply, ReplyMatch, SequenceNumber, Ttl};
pub use ping_error::{GenericError, PingError, PingResult};
pub use pinger::{PingConfig, Pinger, MIN_TIMEOUT};
pub use probe::{ProbeFailure, ProbeResult, ProbeState};
pub use resolve::resolve;
pub use statistics::{RoundTripSummary, RunStatistics, RunSummary, StatisticsError};

pub mod icmp;
mod ping_error;
mod pinger;
mod probe;
mod resolve;
mod statistics;
