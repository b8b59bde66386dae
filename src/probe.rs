use crate::icmp::v4::socket::is_timeout;
use crate::icmp::v4::{EchoReply, MalformedReply};
use std::fmt;
use std::io;
use std::time::Duration;

/// States of a single probe. `Succeeded`, `SendFailed` and `ReceiveFailed` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeState {
    Idle,
    Sending,
    AwaitingReply,
    Succeeded,
    SendFailed,
    ReceiveFailed,
}

impl ProbeState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ProbeState::Succeeded | ProbeState::SendFailed | ProbeState::ReceiveFailed
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeFailure {
    SendTimeout,
    SendFailed(String),
    ReceiveTimeout,
    ReceiveFailed(String),
    MalformedReply(MalformedReply),
}

impl ProbeFailure {
    pub(crate) fn from_send_error(error: &io::Error) -> Self {
        if is_timeout(error) {
            ProbeFailure::SendTimeout
        } else {
            ProbeFailure::SendFailed(error.to_string())
        }
    }

    pub(crate) fn from_receive_error(error: &io::Error) -> Self {
        if is_timeout(error) {
            ProbeFailure::ReceiveTimeout
        } else {
            ProbeFailure::ReceiveFailed(error.to_string())
        }
    }

    pub fn is_send_failure(&self) -> bool {
        matches!(
            self,
            ProbeFailure::SendTimeout | ProbeFailure::SendFailed(_)
        )
    }
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeFailure::SendTimeout => write!(f, "request timed out"),
            ProbeFailure::SendFailed(message) => write!(f, "request failed: {message}"),
            ProbeFailure::ReceiveTimeout => write!(f, "reply timed out"),
            ProbeFailure::ReceiveFailed(message) => write!(f, "reply failed: {message}"),
            ProbeFailure::MalformedReply(malformed) => write!(f, "{malformed}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeResult {
    Success {
        round_trip: Duration,
        reply: EchoReply,
    },
    Failure(ProbeFailure),
}

impl ProbeResult {
    /// Terminal state the probe ended in.
    pub fn state(&self) -> ProbeState {
        match self {
            ProbeResult::Success { .. } => ProbeState::Succeeded,
            ProbeResult::Failure(failure) if failure.is_send_failure() => ProbeState::SendFailed,
            ProbeResult::Failure(_) => ProbeState::ReceiveFailed,
        }
    }

    /// Round-trip time in whole milliseconds, `None` for failed probes.
    pub fn round_trip_millis(&self) -> Option<u64> {
        match self {
            ProbeResult::Success { round_trip, .. } => {
                Some(u64::try_from(round_trip.as_millis()).unwrap_or(u64::MAX))
            }
            ProbeResult::Failure(_) => None,
        }
    }
}
