use crate::probe::ProbeResult;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatisticsError {
    /// The mean round-trip time is undefined while no probe has succeeded.
    DivisionUndefined,
}

impl fmt::Display for StatisticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatisticsError::DivisionUndefined => {
                write!(f, "no successful probe, mean round-trip time undefined")
            }
        }
    }
}

impl std::error::Error for StatisticsError {}

/// Counters and round-trip times of one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunStatistics {
    sent: u64,
    succeeded: u64,
    failed: u64,
    min_millis: u64,
    max_millis: u64,
    total_millis: u64,
}

impl Default for RunStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStatistics {
    pub fn new() -> Self {
        RunStatistics {
            sent: 0,
            succeeded: 0,
            failed: 0,
            min_millis: u64::MAX,
            max_millis: 0,
            total_millis: 0,
        }
    }

    pub fn record(&mut self, result: &ProbeResult) {
        match result {
            ProbeResult::Success { .. } => {
                self.record_success(result.round_trip_millis().unwrap_or_default());
            }
            ProbeResult::Failure(failure) if failure.is_send_failure() => {
                self.record_send_failure();
            }
            ProbeResult::Failure(_) => self.record_receive_failure(),
        }
    }

    pub fn record_success(&mut self, round_trip_millis: u64) {
        self.sent += 1;
        self.succeeded += 1;
        self.min_millis = self.min_millis.min(round_trip_millis);
        self.max_millis = self.max_millis.max(round_trip_millis);
        self.total_millis = self.total_millis.saturating_add(round_trip_millis);
    }

    pub fn record_send_failure(&mut self) {
        self.sent += 1;
        self.failed += 1;
    }

    pub fn record_receive_failure(&mut self) {
        self.sent += 1;
        self.failed += 1;
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }

    pub fn succeeded(&self) -> u64 {
        self.succeeded
    }

    pub fn failed(&self) -> u64 {
        self.failed
    }

    pub fn mean_millis(&self) -> Result<u64, StatisticsError> {
        if self.succeeded == 0 {
            return Err(StatisticsError::DivisionUndefined);
        }
        Ok(self.total_millis / self.succeeded)
    }

    pub fn summarize(&self) -> RunSummary {
        let loss_percent = if self.sent == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let ratio = self.failed as f64 / self.sent as f64;
            ratio * 100.0
        };
        let round_trip = self.mean_millis().ok().map(|mean_millis| RoundTripSummary {
            min_millis: self.min_millis,
            max_millis: self.max_millis,
            mean_millis,
        });
        RunSummary {
            sent: self.sent,
            succeeded: self.succeeded,
            failed: self.failed,
            loss_percent,
            round_trip,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundTripSummary {
    pub min_millis: u64,
    pub max_millis: u64,
    pub mean_millis: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    pub sent: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub loss_percent: f64,
    /// `None` when no probe succeeded.
    pub round_trip: Option<RoundTripSummary>,
}
