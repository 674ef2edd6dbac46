use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::editor::EditorError;

use super::{SubmissionPayload, sink::SubmissionSink};

pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Submitting,
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Delivered(SubmissionPayload),
    Failed(String),
}

#[derive(Debug)]
struct Pending {
    payload: SubmissionPayload,
    due: Instant,
}

/// One submission cycle at a time. The sink is called from `poll` once the delay has passed,
/// so the event loop never blocks on it.
#[derive(Debug)]
pub struct Submission {
    phase: SubmitPhase,
    pending: Option<Pending>,
    delay: Duration,
}

impl Default for Submission {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

impl Submission {
    pub fn new(delay: Duration) -> Self {
        Self {
            phase: SubmitPhase::Idle,
            pending: None,
            delay,
        }
    }

    pub fn phase(&self) -> &SubmitPhase {
        &self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.phase, SubmitPhase::Submitting)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Starts a cycle. Allowed from `Idle` and `Failed`.
    pub fn begin(&mut self, payload: SubmissionPayload, now: Instant) -> Result<(), EditorError> {
        if self.is_in_flight() {
            return Err(EditorError::SubmissionInFlight);
        }
        info!(fields = payload.len(), "submission started");
        self.pending = Some(Pending {
            payload,
            due: now + self.delay,
        });
        self.phase = SubmitPhase::Submitting;
        Ok(())
    }

    /// Hands the payload to `sink` once due; `None` while waiting or idle.
    pub fn poll(&mut self, now: Instant, sink: &mut dyn SubmissionSink) -> Option<SubmitOutcome> {
        if self.pending.as_ref().is_none_or(|pending| now < pending.due) {
            return None;
        }
        let Pending { payload, .. } = self.pending.take()?;
        match sink.submit(&payload) {
            Ok(()) => {
                info!(fields = payload.len(), "submission delivered");
                self.phase = SubmitPhase::Idle;
                Some(SubmitOutcome::Delivered(payload))
            }
            Err(err) => {
                let message = format!("{err:#}");
                warn!(error = %message, "submission failed");
                self.phase = SubmitPhase::Failed {
                    message: message.clone(),
                };
                Some(SubmitOutcome::Failed(message))
            }
        }
    }

    /// Clears a failure banner. No effect in other phases.
    pub fn dismiss_error(&mut self) -> bool {
        if matches!(self.phase, SubmitPhase::Failed { .. }) {
            self.phase = SubmitPhase::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submit::MemorySink;

    fn payload() -> SubmissionPayload {
        SubmissionPayload::from([("email".to_string(), "a@b.com".to_string())])
    }

    #[test]
    fn delivers_after_the_delay() {
        let start = Instant::now();
        let mut submission = Submission::new(Duration::from_millis(400));
        let mut sink = MemorySink::default();
        submission.begin(payload(), start).unwrap();
        assert!(submission.is_in_flight());
        assert!(submission.poll(start + Duration::from_millis(100), &mut sink).is_none());
        assert!(sink.payloads().is_empty());
        let outcome = submission.poll(start + Duration::from_millis(400), &mut sink);
        assert_eq!(outcome, Some(SubmitOutcome::Delivered(payload())));
        assert_eq!(submission.phase(), &SubmitPhase::Idle);
        assert_eq!(sink.payloads(), &[payload()]);
        assert!(submission.poll(start + Duration::from_secs(5), &mut sink).is_none());
    }

    #[test]
    fn refuses_a_second_cycle_while_in_flight() {
        let start = Instant::now();
        let mut submission = Submission::default();
        submission.begin(payload(), start).unwrap();
        assert!(matches!(
            submission.begin(payload(), start),
            Err(EditorError::SubmissionInFlight)
        ));
    }

    #[test]
    fn failure_is_surfaced_then_dismissed() {
        let start = Instant::now();
        let mut submission = Submission::new(Duration::ZERO);
        let mut sink = MemorySink::failing("sink offline");
        submission.begin(payload(), start).unwrap();
        let outcome = submission.poll(start, &mut sink);
        assert_eq!(outcome, Some(SubmitOutcome::Failed("sink offline".to_string())));
        assert_eq!(
            submission.phase(),
            &SubmitPhase::Failed {
                message: "sink offline".to_string()
            }
        );
        assert!(submission.dismiss_error());
        assert_eq!(submission.phase(), &SubmitPhase::Idle);
        assert!(!submission.dismiss_error());
    }

    #[test]
    fn can_resubmit_from_failed() {
        let start = Instant::now();
        let mut submission = Submission::new(Duration::ZERO);
        let mut failing = MemorySink::failing("nope");
        submission.begin(payload(), start).unwrap();
        submission.poll(start, &mut failing);
        assert!(submission.begin(payload(), start).is_ok());
        let mut sink = MemorySink::default();
        assert!(matches!(
            submission.poll(start, &mut sink),
            Some(SubmitOutcome::Delivered(_))
        ));
    }
}
