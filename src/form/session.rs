use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::debug;

use crate::{
    domain::{FieldDefinition, FieldId, FieldTemplate, Theme},
    editor::{EditorError, EditorState, FileId, RawFile},
    submit::{SubmissionPayload, SubmissionSink, SubmitOutcome, SubmitPhase, Submission},
    validation::{SchemaCache, ValidationReport, ValidationSchema},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    Started,
    Blocked(ValidationReport),
}

/// The running editor: arranged form plus the values typed into it and the submission
/// cycle. Structural edits are refused while a submission is in flight.
#[derive(Debug)]
pub struct FormSession {
    state: EditorState,
    values: HashMap<FieldId, String>,
    touched: HashSet<FieldId>,
    submit_attempted: bool,
    dirty: bool,
    schema_cache: SchemaCache,
    submission: Submission,
    delivered: Vec<SubmissionPayload>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(EditorState::new())
    }
}

impl FormSession {
    pub fn new(state: EditorState) -> Self {
        let values = state
            .fields()
            .iter()
            .map(|field| (field.id, String::new()))
            .collect();
        Self {
            state,
            values,
            touched: HashSet::new(),
            submit_attempted: false,
            dirty: false,
            schema_cache: SchemaCache::new(),
            submission: Submission::default(),
            delivered: Vec::new(),
        }
    }

    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submission = Submission::new(delay);
        self
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        self.state.fields()
    }

    pub fn set_welcome_text(&mut self, text: impl Into<String>) {
        self.state.set_welcome_text(text);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.state.set_theme(theme);
    }

    fn ensure_idle(&self) -> Result<(), EditorError> {
        if self.submission.is_in_flight() {
            Err(EditorError::SubmissionInFlight)
        } else {
            Ok(())
        }
    }

    pub fn add_field(&mut self, template: &FieldTemplate) -> Result<FieldId, EditorError> {
        self.ensure_idle()?;
        let id = self.state.add_field(template);
        self.values.insert(id, String::new());
        Ok(id)
    }

    pub fn insert_field(&mut self, field: FieldDefinition) -> Result<FieldId, EditorError> {
        self.ensure_idle()?;
        let id = self.state.insert_field(field)?;
        self.values.insert(id, String::new());
        Ok(id)
    }

    pub fn remove_field(&mut self, id: FieldId) -> Result<bool, EditorError> {
        self.ensure_idle()?;
        let removed = self.state.remove_field(id);
        if removed {
            self.values.remove(&id);
            self.touched.remove(&id);
        }
        Ok(removed)
    }

    pub fn reorder(&mut self, source: usize, destination: Option<usize>) -> Result<bool, EditorError> {
        self.ensure_idle()?;
        Ok(self.state.reorder(source, destination))
    }

    pub fn add_files(&mut self, files: impl IntoIterator<Item = RawFile>) -> Vec<FileId> {
        self.state.files_mut().add_files(files)
    }

    pub fn remove_file(&mut self, id: FileId) -> bool {
        self.state.files_mut().remove_file(id)
    }

    pub fn value(&self, id: FieldId) -> &str {
        self.values.get(&id).map(String::as_str).unwrap_or_default()
    }

    /// Replaces a field's value and marks it touched. Unknown ids are ignored.
    pub fn set_value(&mut self, id: FieldId, value: impl Into<String>) -> bool {
        let Some(slot) = self.values.get_mut(&id) else {
            return false;
        };
        *slot = value.into();
        self.touched.insert(id);
        self.dirty = true;
        true
    }

    pub fn touch(&mut self, id: FieldId) {
        if self.values.contains_key(&id) {
            self.touched.insert(id);
        }
    }

    pub fn is_touched(&self, id: FieldId) -> bool {
        self.touched.contains(&id)
    }

    /// Values were edited since the last delivered submission.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn schema(&mut self) -> Arc<ValidationSchema> {
        self.schema_cache.schema_for(self.state.fields())
    }

    pub fn schema_builds(&self) -> usize {
        self.schema_cache.builds()
    }

    /// Values keyed by field name, in field order.
    pub fn payload(&self) -> SubmissionPayload {
        self.state
            .fields()
            .iter()
            .map(|field| (field.name.clone(), self.value(field.id).to_string()))
            .collect()
    }

    pub fn validate(&mut self) -> ValidationReport {
        let payload = self.payload();
        self.schema().validate(&payload)
    }

    /// Error shown next to a field: only once it was touched or a submit was attempted.
    pub fn visible_error(&mut self, id: FieldId) -> Option<String> {
        if !self.submit_attempted && !self.touched.contains(&id) {
            return None;
        }
        let field = self.state.field(id)?;
        let name = field.name.clone();
        let value = self.value(id).to_string();
        self.schema().validate_field(&name, &value).err()
    }

    pub fn submit(&mut self, now: Instant) -> Result<SubmitAttempt, EditorError> {
        self.ensure_idle()?;
        self.submit_attempted = true;
        let report = self.validate();
        if !report.is_valid() {
            debug!(errors = report.error_count(), "submission blocked by validation");
            return Ok(SubmitAttempt::Blocked(report));
        }
        self.submission.begin(self.payload(), now)?;
        Ok(SubmitAttempt::Started)
    }

    pub fn poll_submission(
        &mut self,
        now: Instant,
        sink: &mut dyn SubmissionSink,
    ) -> Option<SubmitOutcome> {
        let outcome = self.submission.poll(now, sink)?;
        if let SubmitOutcome::Delivered(payload) = &outcome {
            self.dirty = false;
            self.delivered.push(payload.clone());
        }
        Some(outcome)
    }

    pub fn dismiss_error(&mut self) -> bool {
        self.submission.dismiss_error()
    }

    pub fn phase(&self) -> &SubmitPhase {
        self.submission.phase()
    }

    pub fn is_submitting(&self) -> bool {
        self.submission.is_in_flight()
    }

    pub fn submit_delay(&self) -> Duration {
        self.submission.delay()
    }

    pub fn delivered(&self) -> &[SubmissionPayload] {
        &self.delivered
    }

    pub(crate) fn take_delivered(&mut self) -> Vec<SubmissionPayload> {
        std::mem::take(&mut self.delivered)
    }
}
