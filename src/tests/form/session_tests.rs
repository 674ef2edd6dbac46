use std::time::{Duration, Instant};

use crate::{
    domain::{FieldKind, template_for},
    editor::{EditorError, EditorState},
    form::{FormSession, SubmitAttempt},
    submit::{MemorySink, SubmitOutcome, SubmitPhase},
};

fn session() -> FormSession {
    FormSession::new(EditorState::new()).with_submit_delay(Duration::from_millis(50))
}

fn email_id(session: &FormSession) -> crate::domain::FieldId {
    session.fields()[0].id
}

#[test]
fn email_field_walks_required_invalid_valid() {
    let mut session = session();
    let id = email_id(&session);
    assert_eq!(session.visible_error(id), None, "untouched fields stay quiet");

    session.touch(id);
    assert_eq!(session.visible_error(id).as_deref(), Some("Email is required"));

    session.set_value(id, "not-an-email");
    assert_eq!(session.visible_error(id).as_deref(), Some("Invalid email"));

    session.set_value(id, "user@example.com");
    assert_eq!(session.visible_error(id), None);
}

#[test]
fn blocked_submit_reveals_every_error() {
    let mut session = session();
    let text = session.add_field(&template_for(FieldKind::Text)).expect("idle");
    let attempt = session.submit(Instant::now()).expect("idle");
    let SubmitAttempt::Blocked(report) = attempt else {
        panic!("empty form must not submit");
    };
    assert_eq!(report.error_count(), 2);
    assert_eq!(report.error("text"), Some("Text is required"));
    assert_eq!(session.visible_error(text).as_deref(), Some("Text is required"));
    assert_eq!(session.phase(), &SubmitPhase::Idle);
}

#[test]
fn password_length_gates_submission() {
    let mut session = FormSession::new(EditorState::empty()).with_submit_delay(Duration::ZERO);
    let text = session.add_field(&template_for(FieldKind::Text)).expect("idle");
    let password = session
        .add_field(&template_for(FieldKind::Password))
        .expect("idle");
    session.set_value(text, "hello");
    session.set_value(password, "abc");

    let attempt = session.submit(Instant::now()).expect("idle");
    assert!(
        matches!(&attempt, SubmitAttempt::Blocked(report) if report.error("password") == Some("Too short"))
    );

    session.set_value(password, "abcdefgh");
    assert_eq!(
        session.submit(Instant::now()).expect("idle"),
        SubmitAttempt::Started
    );
    let mut sink = MemorySink::default();
    let outcome = session.poll_submission(Instant::now(), &mut sink);
    assert!(matches!(outcome, Some(SubmitOutcome::Delivered(_))));
    assert_eq!(sink.payloads().len(), 1);
    let payload = &sink.payloads()[0];
    assert_eq!(payload.keys().collect::<Vec<_>>(), ["text", "password"]);
    assert_eq!(payload["password"], "abcdefgh");
}

#[test]
fn structural_edits_wait_for_submission() {
    let mut session = session();
    let id = email_id(&session);
    session.set_value(id, "user@example.com");
    let start = Instant::now();
    assert_eq!(session.submit(start).expect("idle"), SubmitAttempt::Started);
    assert!(session.is_submitting());

    assert!(matches!(
        session.add_field(&template_for(FieldKind::Text)),
        Err(EditorError::SubmissionInFlight)
    ));
    assert!(matches!(
        session.remove_field(id),
        Err(EditorError::SubmissionInFlight)
    ));
    assert!(matches!(
        session.reorder(0, Some(0)),
        Err(EditorError::SubmissionInFlight)
    ));
    assert!(matches!(
        session.submit(start),
        Err(EditorError::SubmissionInFlight)
    ));

    let mut sink = MemorySink::default();
    assert!(session.poll_submission(start, &mut sink).is_none(), "not due yet");
    let due = start + session.submit_delay();
    assert!(session.poll_submission(due, &mut sink).is_some());
    assert!(!session.is_submitting());
    assert!(session.add_field(&template_for(FieldKind::Text)).is_ok());
}

#[test]
fn failed_delivery_can_be_dismissed_and_retried() {
    let mut session = session();
    let id = email_id(&session);
    session.set_value(id, "user@example.com");
    let start = Instant::now();
    session.submit(start).expect("idle");

    let mut failing = MemorySink::failing("network unreachable");
    let due = start + session.submit_delay();
    let outcome = session.poll_submission(due, &mut failing);
    assert_eq!(
        outcome,
        Some(SubmitOutcome::Failed("network unreachable".into()))
    );
    assert!(matches!(session.phase(), SubmitPhase::Failed { .. }));
    assert!(session.is_dirty(), "failed delivery keeps edits pending");

    assert!(session.dismiss_error());
    assert_eq!(session.phase(), &SubmitPhase::Idle);
    assert!(!session.dismiss_error());

    let retry = Instant::now();
    assert_eq!(session.submit(retry).expect("idle"), SubmitAttempt::Started);
    let mut sink = MemorySink::default();
    session.poll_submission(retry + session.submit_delay(), &mut sink);
    assert_eq!(session.delivered().len(), 1);
    assert!(!session.is_dirty());
}

#[test]
fn schema_is_rebuilt_only_when_fields_change() {
    let mut session = session();
    let id = email_id(&session);
    session.schema();
    session.set_value(id, "a");
    session.validate();
    session.visible_error(id);
    assert_eq!(session.schema_builds(), 1);

    session.add_field(&template_for(FieldKind::Number)).expect("idle");
    let schema = session.schema();
    assert_eq!(session.schema_builds(), 2);
    assert_eq!(schema.names().collect::<Vec<_>>(), ["email", "number"]);

    session.reorder(1, Some(0)).expect("idle");
    session.schema();
    assert_eq!(session.schema_builds(), 3, "order is part of the schema");
}

#[test]
fn removed_fields_drop_their_values() {
    let mut session = session();
    let text = session.add_field(&template_for(FieldKind::Text)).expect("idle");
    session.set_value(text, "kept?");
    assert!(session.remove_field(text).expect("idle"));
    assert!(!session.remove_field(text).expect("idle"));
    assert_eq!(session.value(text), "");
    assert!(!session.set_value(text, "ghost"));
    assert_eq!(session.payload().len(), 1);
}
