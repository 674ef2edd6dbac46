use anyhow::{Result, anyhow};
use tracing::info;

use crate::io::{OutputOptions, output::emit};

use super::SubmissionPayload;

/// Receives a validated submission. Errors are surfaced to the user, who may resubmit.
pub trait SubmissionSink {
    fn submit(&mut self, payload: &SubmissionPayload) -> Result<()>;
}

impl<F> SubmissionSink for F
where
    F: FnMut(&SubmissionPayload) -> Result<()>,
{
    fn submit(&mut self, payload: &SubmissionPayload) -> Result<()> {
        self(payload)
    }
}

/// Reports each submission through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn submit(&mut self, payload: &SubmissionPayload) -> Result<()> {
        let data = serde_json::to_string(payload)?;
        info!(form_data = %data, "form submitted");
        Ok(())
    }
}

/// Keeps submissions in memory; optionally fails every call.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    payloads: Vec<SubmissionPayload>,
    failure: Option<String>,
}

impl MemorySink {
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            payloads: Vec::new(),
            failure: Some(message.into()),
        }
    }

    pub fn payloads(&self) -> &[SubmissionPayload] {
        &self.payloads
    }
}

impl SubmissionSink for MemorySink {
    fn submit(&mut self, payload: &SubmissionPayload) -> Result<()> {
        if let Some(message) = &self.failure {
            return Err(anyhow!(message.clone()));
        }
        self.payloads.push(payload.clone());
        Ok(())
    }
}

/// Serializes each submission to the configured destinations.
#[derive(Debug, Clone)]
pub struct OutputSink {
    options: OutputOptions,
}

impl OutputSink {
    pub fn new(options: OutputOptions) -> Self {
        Self { options }
    }
}

impl SubmissionSink for OutputSink {
    fn submit(&mut self, payload: &SubmissionPayload) -> Result<()> {
        emit(payload, &self.options)
    }
}

/// Forwards to every inner sink in order, stopping at the first failure.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn SubmissionSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl SubmissionSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl SubmissionSink for FanoutSink {
    fn submit(&mut self, payload: &SubmissionPayload) -> Result<()> {
        for sink in &mut self.sinks {
            sink.submit(payload)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{DocumentFormat, OutputDestination};
    use std::{cell::RefCell, fs, rc::Rc};

    fn payload() -> SubmissionPayload {
        SubmissionPayload::from([("text".to_string(), "hi".to_string())])
    }

    #[test]
    fn closures_are_sinks() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let captured = Rc::clone(&seen);
        let mut sink = move |payload: &SubmissionPayload| -> Result<()> {
            captured.borrow_mut().push(payload.clone());
            Ok(())
        };
        sink.submit(&payload()).unwrap();
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn fanout_stops_at_first_failure() {
        let seen = Rc::new(RefCell::new(0usize));
        let counter = Rc::clone(&seen);
        let mut sink = FanoutSink::new()
            .with(MemorySink::failing("down"))
            .with(move |_: &SubmissionPayload| -> Result<()> {
                *counter.borrow_mut() += 1;
                Ok(())
            });
        assert_eq!(sink.len(), 2);
        let err = sink.submit(&payload()).unwrap_err();
        assert_eq!(err.to_string(), "down");
        assert_eq!(*seen.borrow(), 0);
    }

    #[test]
    fn output_sink_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        let options = OutputOptions::new(DocumentFormat::Json)
            .with_destinations(vec![OutputDestination::file(&path)]);
        let mut sink = OutputSink::new(options);
        sink.submit(&payload()).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!({"text": "hi"}));
    }

    #[test]
    fn log_sink_accepts_everything() {
        assert!(LogSink.submit(&payload()).is_ok());
    }
}
