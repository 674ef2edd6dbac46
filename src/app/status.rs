#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready. Press Ctrl+S to submit.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn editing(&mut self, label: &str) {
        self.message = format!("Editing {label}");
    }

    pub fn field_added(&mut self, label: &str) {
        self.message = format!("Added {label} field");
    }

    pub fn field_removed(&mut self, label: &str) {
        self.message = format!("Removed {label} field");
    }

    pub fn field_moved(&mut self, label: &str, position: usize) {
        self.message = format!("Moved {label} to position {}", position + 1);
    }

    pub fn files_attached(&mut self, count: usize) {
        self.message = format!("Attached {count} file(s)");
    }

    pub fn issues_remaining(&mut self, count: usize) {
        self.message = format!("{count} issue(s) remaining");
    }

    pub fn submitting(&mut self) {
        self.message = "Submitting…".to_string();
    }

    pub fn submitted(&mut self) {
        self.message = "Form submitted. Press Ctrl+Q to exit.".to_string();
    }

    pub fn busy(&mut self) {
        self.message = "Wait for the submission to finish".to_string();
    }

    pub fn pending_exit(&mut self) {
        self.message = "Unsubmitted changes. Press Ctrl+Q again to quit.".to_string();
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
