use std::time::{Duration, Instant};

use crate::{
    domain::{FieldKind, Theme},
    editor::{EditorError, EditorState, RawFile},
    form::{CommandEffect, FormCommand, FormEngine, FormSession},
};

fn dispatch(session: &mut FormSession, command: FormCommand) -> Result<CommandEffect, EditorError> {
    FormEngine::new(session, Instant::now()).dispatch(command)
}

#[test]
fn adding_fields_reports_suffixed_labels() {
    let mut session = FormSession::new(EditorState::empty());
    let first = dispatch(&mut session, FormCommand::AddField(FieldKind::Text)).expect("idle");
    let second = dispatch(&mut session, FormCommand::AddField(FieldKind::Text)).expect("idle");
    assert_eq!(first, CommandEffect::FieldAdded { label: "Text".into() });
    assert_eq!(second, CommandEffect::FieldAdded { label: "Text 2".into() });
    let names = session
        .fields()
        .iter()
        .map(|field| field.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, ["text", "text_2"]);
}

#[test]
fn reorder_reports_the_landing_slot() {
    let mut session = FormSession::new(EditorState::empty());
    for kind in [FieldKind::Text, FieldKind::Number, FieldKind::Password, FieldKind::Email] {
        dispatch(&mut session, FormCommand::AddField(kind)).expect("idle");
    }
    let effect = dispatch(
        &mut session,
        FormCommand::Reorder {
            source: 0,
            destination: Some(2),
        },
    )
    .expect("idle");
    assert_eq!(
        effect,
        CommandEffect::Reordered {
            label: "Text".into(),
            position: 2
        }
    );
    let labels = session
        .fields()
        .iter()
        .map(|field| field.label.as_str())
        .collect::<Vec<_>>();
    assert_eq!(labels, ["Number", "Password", "Text", "Email"]);

    let cancelled = dispatch(
        &mut session,
        FormCommand::Reorder {
            source: 1,
            destination: None,
        },
    )
    .expect("idle");
    assert_eq!(cancelled, CommandEffect::Unchanged);
}

#[test]
fn files_attach_and_remove_through_commands() {
    let mut session = FormSession::default();
    let effect = dispatch(
        &mut session,
        FormCommand::AttachFiles(vec![
            RawFile::new("a.png", "image/png", b"a".to_vec()),
            RawFile::new("b.pdf", "application/pdf", b"b".to_vec()),
        ]),
    )
    .expect("idle");
    assert_eq!(effect, CommandEffect::FilesAttached(2));
    assert_eq!(
        dispatch(&mut session, FormCommand::AttachFiles(Vec::new())).expect("idle"),
        CommandEffect::Unchanged
    );

    let first = session.state().files().entries()[0].id;
    assert_eq!(
        dispatch(&mut session, FormCommand::RemoveFile(first)).expect("idle"),
        CommandEffect::FileRemoved
    );
    assert_eq!(
        dispatch(&mut session, FormCommand::RemoveFile(first)).expect("idle"),
        CommandEffect::Unchanged
    );
    assert_eq!(session.state().files().len(), 1);
    assert_eq!(session.state().files().previews().live_count(), 0);
}

#[test]
fn theme_and_banner_edits_stay_available_while_submitting() {
    let mut session = FormSession::default().with_submit_delay(Duration::from_secs(60));
    let id = session.fields()[0].id;
    dispatch(
        &mut session,
        FormCommand::SetValue {
            id,
            value: "user@example.com".into(),
        },
    )
    .expect("idle");
    assert_eq!(
        dispatch(&mut session, FormCommand::Submit).expect("idle"),
        CommandEffect::SubmitStarted
    );

    assert_eq!(
        dispatch(&mut session, FormCommand::SetTheme(Theme::Dark)).expect("theme"),
        CommandEffect::Updated
    );
    dispatch(&mut session, FormCommand::SetWelcomeText("Hi".into())).expect("banner");
    assert_eq!(session.state().welcome_text(), "Hi");
    assert!(matches!(
        dispatch(&mut session, FormCommand::RemoveField(id)),
        Err(EditorError::SubmissionInFlight)
    ));
}

#[test]
fn blocked_submit_carries_the_report() {
    let mut session = FormSession::default();
    let effect = dispatch(&mut session, FormCommand::Submit).expect("idle");
    let CommandEffect::SubmitBlocked(report) = effect else {
        panic!("expected a blocked submit");
    };
    assert_eq!(report.error("email"), Some("Email is required"));
    assert_eq!(
        dispatch(&mut session, FormCommand::DismissError).expect("idle"),
        CommandEffect::Unchanged
    );
}
