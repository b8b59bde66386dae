use crate::icmp::v4::socket::MIN_SOCKET_TIMEOUT;
use crate::icmp::v4::{
    match_reply, EchoRequest, RawSocket, ReplyMatch, SequenceNumber, TSocket, MAX_PACKET_SIZE,
    MAX_PAYLOAD_SIZE,
};
use crate::ping_error::{PingError, PingResult};
use crate::probe::{ProbeFailure, ProbeResult, ProbeState};
use crate::resolve::resolve;
use crate::statistics::RunStatistics;
use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

const PROBE_INTERVAL: Duration = Duration::from_secs(1);

/// Timeouts are given in whole milliseconds on the command line.
pub const MIN_TIMEOUT: Duration = Duration::from_millis(1);

#[derive(Clone, Debug)]
pub struct PingConfig {
    /// Deadline for each send and for each receive.
    pub timeout: Duration,
    pub payload_size: usize,
    pub count: u32,
    /// Echo identifier of the run; random when `None`.
    pub identifier: Option<u16>,
}

impl Default for PingConfig {
    fn default() -> Self {
        PingConfig {
            timeout: Duration::from_millis(1000),
            payload_size: 32,
            count: 4,
            identifier: None,
        }
    }
}

impl PingConfig {
    pub fn validate(&self) -> PingResult<()> {
        if self.timeout < MIN_TIMEOUT {
            return Err(PingError::new(format!(
                "timeout must be at least {} ms",
                MIN_TIMEOUT.as_millis()
            )));
        }
        if self.payload_size > MAX_PAYLOAD_SIZE {
            return Err(PingError::new(format!(
                "payload size {} exceeds the maximum of {MAX_PAYLOAD_SIZE} bytes",
                self.payload_size
            )));
        }
        Ok(())
    }
}

/// Time left until `deadline`, or `None` once it is too short to wait on a socket.
fn remaining_until(deadline: Instant, now: Instant) -> Option<Duration> {
    let remaining = deadline.saturating_duration_since(now);
    (remaining >= MIN_SOCKET_TIMEOUT).then_some(remaining)
}

/// Sends echo requests to one destination, one probe at a time.
pub struct Pinger<S> {
    socket: S,
    config: PingConfig,
    identifier: u16,
    sequence_number: SequenceNumber,
    interval: Duration,
    recv_buf: Vec<u8>,
}

impl Pinger<RawSocket> {
    /// Resolves `destination` and opens a raw socket to it. Failing here is fatal for
    /// the run.
    pub fn connect(destination: &str, config: PingConfig) -> PingResult<Self> {
        config.validate()?;
        let ip = resolve(destination)?;
        let socket = RawSocket::connect(ip, config.timeout).map_err(|e| {
            PingError::with_source(format!("could not connect to {ip}"), e)
        })?;
        Pinger::with_socket(socket, config)
    }
}

impl<S> Pinger<S>
where
    S: TSocket,
{
    pub fn with_socket(socket: S, config: PingConfig) -> PingResult<Self> {
        config.validate()?;
        let identifier = config.identifier.unwrap_or_else(rand::random);
        Ok(Pinger {
            socket,
            config,
            identifier,
            sequence_number: SequenceNumber::start_value(),
            interval: PROBE_INTERVAL,
            recv_buf: vec![0u8; MAX_PACKET_SIZE],
        })
    }

    #[cfg(test)]
    pub(crate) fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn remote_addr(&self) -> Ipv4Addr {
        self.socket.remote_addr()
    }

    /// Echo identifier carried by every request of this run.
    pub fn identifier(&self) -> u16 {
        self.identifier
    }

    pub fn config(&self) -> &PingConfig {
        &self.config
    }

    /// Runs `config.count` probes, recording each outcome into `statistics` and handing
    /// it to `on_probe`. Failed probes never end the run early.
    pub fn run<F>(&mut self, statistics: &mut RunStatistics, mut on_probe: F)
    where
        F: FnMut(SequenceNumber, &ProbeResult),
    {
        for i in 0..self.config.count {
            let sequence_number = self.sequence_number;
            let result = self.probe();
            statistics.record(&result);
            on_probe(sequence_number, &result);

            let is_last = i + 1 == self.config.count;
            if result.state() != ProbeState::SendFailed && !is_last {
                std::thread::sleep(self.interval);
            }
        }
    }

    /// One send/receive cycle with the next sequence number.
    pub fn probe(&mut self) -> ProbeResult {
        let sequence_number = self.sequence_number;
        self.sequence_number = sequence_number.next();
        tracing::trace!("probe {sequence_number}: {:?}", ProbeState::Idle);

        let result = self.probe_details(sequence_number);
        match &result {
            ProbeResult::Success { .. } => {
                tracing::trace!("probe {sequence_number}: {:?}", result.state());
            }
            ProbeResult::Failure(failure) => {
                tracing::warn!("probe {sequence_number}: {:?}: {failure}", result.state());
            }
        }
        result
    }

    fn probe_details(&mut self, sequence_number: SequenceNumber) -> ProbeResult {
        let timeout = self.config.timeout;

        // (1) Send request.
        tracing::trace!("probe {sequence_number}: {:?}", ProbeState::Sending);
        let start_time = Instant::now();
        let request = EchoRequest::new(self.identifier, sequence_number, self.config.payload_size);
        if let Err(e) = self.socket.send(&request.encode(), timeout) {
            return ProbeResult::Failure(ProbeFailure::from_send_error(&e));
        }

        // (2) Wait for the matching reply; other ICMP traffic is skipped until the
        // deadline passes.
        tracing::trace!("probe {sequence_number}: {:?}", ProbeState::AwaitingReply);
        let deadline = Instant::now() + timeout;
        loop {
            let Some(remaining) = remaining_until(deadline, Instant::now()) else {
                return ProbeResult::Failure(ProbeFailure::ReceiveTimeout);
            };
            let n = match self.socket.recv(&mut self.recv_buf, remaining) {
                Ok(n) => n,
                Err(e) => return ProbeResult::Failure(ProbeFailure::from_receive_error(&e)),
            };
            match match_reply(&self.recv_buf[..n], self.identifier, sequence_number) {
                ReplyMatch::Matched(reply) => {
                    return ProbeResult::Success {
                        round_trip: start_time.elapsed(),
                        reply,
                    };
                }
                ReplyMatch::Unmatched(reply) => {
                    tracing::debug!(
                        "probe {sequence_number}: skipping ICMP type {} from {} (id {}, seq {})",
                        reply.icmp_type,
                        reply.source,
                        reply.identifier,
                        reply.sequence_number
                    );
                }
                ReplyMatch::Malformed(malformed) => {
                    return ProbeResult::Failure(ProbeFailure::MalformedReply(malformed));
                }
            }
        }
    }
}
