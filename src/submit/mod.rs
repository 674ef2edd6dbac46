mod phase;
mod sink;

use indexmap::IndexMap;

pub use phase::{DEFAULT_SUBMIT_DELAY, SubmitOutcome, SubmitPhase, Submission};
pub use sink::{FanoutSink, LogSink, MemorySink, OutputSink, SubmissionSink};

/// Submitted values keyed by field name, in field order.
pub type SubmissionPayload = IndexMap<String, String>;
