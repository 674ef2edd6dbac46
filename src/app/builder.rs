use std::fmt;

use anyhow::Result;
use tracing::info;

use crate::{
    domain::Theme,
    editor::EditorState,
    form::FormSession,
    submit::{LogSink, SubmissionPayload, SubmissionSink},
};

use super::{options::UiOptions, runtime::App};

/// What happened during one editor session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    /// Every payload the sink accepted, oldest first.
    pub submissions: Vec<SubmissionPayload>,
    pub welcome_text: String,
    pub theme: Theme,
}

impl SessionSummary {
    pub fn last_submission(&self) -> Option<&SubmissionPayload> {
        self.submissions.last()
    }
}

/// Entry point for the terminal form editor.
///
/// ```no_run
/// use formdeck::{FormDeck, Theme};
///
/// let summary = FormDeck::new()
///     .with_title("Signup")
///     .with_theme(Theme::Dark)
///     .run()?;
/// println!("{} submission(s)", summary.submissions.len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct FormDeck {
    state: EditorState,
    title: Option<String>,
    options: UiOptions,
    sink: Box<dyn SubmissionSink>,
}

impl fmt::Debug for FormDeck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormDeck")
            .field("state", &self.state)
            .field("title", &self.title)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for FormDeck {
    fn default() -> Self {
        Self::new()
    }
}

impl FormDeck {
    pub fn new() -> Self {
        Self {
            state: EditorState::new(),
            title: None,
            options: UiOptions::default(),
            sink: Box::new(LogSink),
        }
    }

    /// Starts from an arranged form instead of the seeded email field.
    pub fn with_state(mut self, state: EditorState) -> Self {
        self.state = state;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_welcome_text(mut self, text: impl Into<String>) -> Self {
        self.state.set_welcome_text(text);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.state.set_theme(theme);
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the default sink, which only logs submissions.
    pub fn with_sink(mut self, sink: impl SubmissionSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn run(self) -> Result<SessionSummary> {
        let FormDeck {
            state,
            title,
            options,
            sink,
        } = self;

        let session = FormSession::new(state).with_submit_delay(options.submit_delay);
        let mut app = App::new(session, sink, options, title);
        app.run()?;

        let mut session = app.into_session();
        let summary = SessionSummary {
            submissions: session.take_delivered(),
            welcome_text: session.state().welcome_text().to_string(),
            theme: session.state().theme(),
        };
        info!(submissions = summary.submissions.len(), "editor closed");
        Ok(summary)
    }
}
