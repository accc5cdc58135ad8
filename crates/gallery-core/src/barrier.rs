//! Readiness barrier: an AND-join over named asynchronous signals (web fonts,
//! image decodes) with an explicit failure and timeout policy.
//!
//! A failed signal counts as settled; the scene proceeds without that asset.
//! When a timeout is configured, signals still pending at the deadline are
//! skipped the same way.

use crate::error::BarrierError;
use instant::Instant;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignalOutcome {
    Resolved,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum SignalState {
    Pending,
    Settled(SignalOutcome),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadinessReport {
    pub resolved: Vec<String>,
    /// Failed or timed-out signals.
    pub skipped: Vec<String>,
    pub timed_out: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BarrierStatus {
    Pending { remaining: usize },
    Ready(ReadinessReport),
}

#[derive(Clone, Debug)]
pub struct ReadinessBarrier {
    signals: Vec<(String, SignalState)>,
    timeout: Option<Duration>,
    started: Option<Instant>,
}

impl ReadinessBarrier {
    pub fn new<I, S>(signals: I, timeout: Option<Duration>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            signals: signals
                .into_iter()
                .map(|s| (s.into(), SignalState::Pending))
                .collect(),
            timeout,
            started: None,
        }
    }

    /// A barrier with no signals is ready on its first poll.
    pub fn empty() -> Self {
        Self::new(Vec::<String>::new(), None)
    }

    pub fn remaining(&self) -> usize {
        self.signals
            .iter()
            .filter(|(_, s)| *s == SignalState::Pending)
            .count()
    }

    /// Record one signal's completion. Repeat reports for a settled signal
    /// are ignored.
    pub fn record(&mut self, name: &str, outcome: SignalOutcome) -> Result<(), BarrierError> {
        let slot = self
            .signals
            .iter_mut()
            .find(|(n, _)| n == name)
            .ok_or_else(|| BarrierError::UnknownSignal(name.to_string()))?;
        if slot.1 == SignalState::Pending {
            if let SignalOutcome::Failed(reason) = &outcome {
                log::warn!("[ready] {} failed: {}; continuing without it", name, reason);
            }
            slot.1 = SignalState::Settled(outcome);
        }
        Ok(())
    }

    /// The deadline clock starts on the first poll.
    pub fn poll(&mut self, now: Instant) -> BarrierStatus {
        let started = *self.started.get_or_insert(now);
        let remaining = self.remaining();
        let waited = if now > started {
            now.duration_since(started)
        } else {
            Duration::ZERO
        };
        let expired = self.timeout.is_some_and(|t| waited >= t);
        if remaining > 0 && !expired {
            return BarrierStatus::Pending { remaining };
        }

        let mut report = ReadinessReport {
            timed_out: remaining > 0,
            ..ReadinessReport::default()
        };
        for (name, state) in &self.signals {
            match state {
                SignalState::Settled(SignalOutcome::Resolved) => report.resolved.push(name.clone()),
                SignalState::Settled(SignalOutcome::Failed(_)) => report.skipped.push(name.clone()),
                SignalState::Pending => {
                    log::warn!("[ready] {} timed out; continuing without it", name);
                    report.skipped.push(name.clone());
                }
            }
        }
        BarrierStatus::Ready(report)
    }
}
