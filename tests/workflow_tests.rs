use spot::api::Backend;
use spot::core::{EditHandoff, EditorContent, ReportController, ReportWorkflow, Stage};
use spot::errors::AppError;
use spot::models::{NoticeKind, ReportId};
use std::time::{Duration, Instant};

mod common;
use common::{DUPLICATE_REPORT, FakeBackend, TTL, student};

fn workflow() -> ReportWorkflow {
    ReportWorkflow::new("Weekly report - ", TTL)
}

/// Workflow sitting in the editor with a fresh draft for `identifier`.
fn editing(wf: &mut ReportWorkflow, identifier: &str) {
    if !matches!(wf.stage(), Stage::ChooseAction { .. }) {
        wf.back_to_actions().unwrap();
    }
    wf.choose_create().unwrap();
    wf.submit_identifier(identifier).unwrap();
}

#[test]
fn identifier_is_required_and_the_stage_is_kept() {
    let mut wf = workflow();
    wf.select_student(Some(student(1, "Ali", "A001")));
    wf.choose_create().unwrap();

    let err = wf.submit_identifier("   ").unwrap_err();
    assert!(matches!(err, AppError::Validation(ref m) if m == "report identifier required"));
    assert!(matches!(wf.stage(), Stage::PromptIdentifier { .. }));
}

#[test]
fn draft_is_seeded_clean_with_a_prefixed_title() {
    let mut wf = workflow();
    wf.select_student(Some(student(1, "Ali", "A001")));
    editing(&mut wf, "  Week 1 ");

    let doc = wf.document().unwrap();
    assert!(doc.is_draft());
    assert_eq!(doc.report_identifier, "Week 1");
    assert_eq!(doc.title, "Weekly report - Week 1");
    assert!(doc.grid.is_empty());
    assert!(!wf.is_dirty());
    assert!(!wf.can_save());
}

#[test]
fn cancel_identifier_goes_back_to_the_action_choice() {
    let mut wf = workflow();
    wf.select_student(Some(student(1, "Ali", "A001")));
    wf.choose_create().unwrap();
    wf.cancel_identifier().unwrap();
    assert!(matches!(wf.stage(), Stage::ChooseAction { .. }));
}

#[test]
fn saving_a_draft_without_rows_makes_no_network_call() {
    let api = FakeBackend::with_students(vec![student(1, "Ali", "A001")]);
    let mut wf = workflow();
    wf.select_student(Some(student(1, "Ali", "A001")));
    editing(&mut wf, "Week 1");
    wf.set_title("Weekly report - Week 1 (draft)").unwrap();
    assert!(wf.can_save());

    let err = ReportController::new(&api).save(&mut wf).unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(api.total_calls(), 0);
    assert!(wf.is_dirty());
    let n = wf.last_notification().unwrap();
    assert_eq!(n.kind, NoticeKind::Warning);
}

#[test]
fn blank_title_blocks_the_save_locally() {
    let api = FakeBackend::new();
    let mut wf = workflow();
    wf.select_student(Some(student(1, "Ali", "A001")));
    editing(&mut wf, "Week 1");
    wf.add_row("Homework").unwrap();
    wf.set_title("  ").unwrap();

    let err = ReportController::new(&api).save(&mut wf).unwrap_err();
    assert!(matches!(err, AppError::Validation(ref m) if m == "report title required"));
    assert_eq!(api.calls("save_report"), 0);
}

#[test]
fn clean_document_has_nothing_to_save() {
    let api = FakeBackend::new();
    let mut wf = workflow();
    wf.select_student(Some(student(1, "Ali", "A001")));
    editing(&mut wf, "Week 1");

    assert!(!ReportController::new(&api).save(&mut wf).unwrap());
    assert_eq!(api.total_calls(), 0);
}

#[test]
fn first_save_adopts_the_persisted_id_and_later_saves_update_in_place() {
    let api = FakeBackend::new();
    let controller = ReportController::new(&api);
    let mut wf = workflow();
    wf.select_student(Some(student(1, "Ali", "A001")));
    editing(&mut wf, "Week 1");
    wf.add_row("Homework").unwrap();
    wf.set_cell(0, 2, "p. 12-14").unwrap();

    assert!(controller.save(&mut wf).unwrap());
    let id = wf.document().unwrap().persisted_id.clone().unwrap();
    assert!(!wf.is_dirty());
    assert_eq!(wf.last_notification().unwrap().kind, NoticeKind::Success);

    wf.add_row("Reading").unwrap();
    assert!(controller.save(&mut wf).unwrap());

    assert_eq!(wf.document().unwrap().persisted_id.as_ref(), Some(&id));
    assert_eq!(api.state.borrow().reports.len(), 1);
    assert_eq!(api.get_report(&id).unwrap().grid.rows().len(), 2);
}

#[test]
fn save_answered_with_only_an_id_still_updates_in_place() {
    let api = FakeBackend::new();
    api.state.borrow_mut().bare_save_ack = true;
    let controller = ReportController::new(&api);
    let mut wf = workflow();
    wf.select_student(Some(student(1, "Ali", "A001")));
    editing(&mut wf, "Week 1");
    wf.add_row("Homework").unwrap();

    assert!(controller.save(&mut wf).unwrap());
    let doc = wf.document().unwrap();
    let id = doc.persisted_id.clone().unwrap();
    assert_eq!(doc.report_identifier, "Week 1");
    assert!(!wf.is_dirty());

    wf.add_row("Reading").unwrap();
    let ticket = wf.begin_save().unwrap().unwrap();
    assert_eq!(ticket.request.report_id.as_ref(), Some(&id));
    let result = api.save_report(&ticket.request);
    assert!(wf.complete_save(ticket, result).unwrap());

    assert_eq!(api.state.borrow().reports.len(), 1);
    assert_eq!(api.calls("save_report"), 2);
}

#[test]
fn duplicate_identifier_shows_the_server_message_and_keeps_the_first_report() {
    let api = FakeBackend::with_students(vec![student(1, "X", "X01")]);
    let controller = ReportController::new(&api);
    let mut wf = workflow();
    wf.select_student(Some(student(1, "X", "X01")));

    editing(&mut wf, "Week 1");
    wf.add_row("Homework").unwrap();
    wf.set_cell(0, 0, "Exercises 1-5").unwrap();
    controller.save(&mut wf).unwrap();
    let first_id = wf.document().unwrap().persisted_id.clone().unwrap();
    let first = api.get_report(&first_id).unwrap();

    editing(&mut wf, "Week 1");
    wf.add_row("Reading").unwrap();
    let err = controller.save(&mut wf).unwrap_err();

    assert!(matches!(err, AppError::Server { status: 409, .. }));
    let n = wf.last_notification().unwrap();
    assert_eq!(n.kind, NoticeKind::Error);
    assert_eq!(n.message, DUPLICATE_REPORT);
    assert!(wf.is_dirty());
    assert!(wf.document().unwrap().is_draft());

    assert_eq!(api.get_report(&first_id).unwrap(), first);
    assert_eq!(api.state.borrow().reports.len(), 1);
}

#[test]
fn server_error_without_message_falls_back_to_a_generic_text() {
    let api = FakeBackend::new();
    api.fail_next("save_report", common::Failure::Server(500, None));
    let mut wf = workflow();
    wf.select_student(Some(student(1, "Ali", "A001")));
    editing(&mut wf, "Week 1");
    wf.add_row("Homework").unwrap();

    assert!(ReportController::new(&api).save(&mut wf).is_err());
    assert_eq!(
        wf.last_notification().unwrap().message,
        "Failed to save the report"
    );
    assert!(wf.is_dirty());
    assert!(wf.can_save());
}

#[test]
fn switching_student_while_dirty_discards_the_draft() {
    let mut wf = workflow();
    wf.select_student(Some(student(1, "Ali", "A001")));
    editing(&mut wf, "Week 1");
    wf.add_row("Homework").unwrap();
    assert!(wf.is_dirty());

    wf.select_student(Some(student(2, "Mona", "M002")));
    assert!(matches!(wf.stage(), Stage::ChooseAction { student } if student.code == "M002"));
    assert!(!wf.is_dirty());
    assert!(wf.document().is_none());
    assert!(wf.last_notification().is_none());

    editing(&mut wf, "Week 2");
    wf.add_row("Homework").unwrap();
    wf.select_student(None);
    assert!(matches!(wf.stage(), Stage::SelectStudent));
    assert!(!wf.is_dirty());
}

#[test]
fn late_save_result_for_a_replaced_session_is_ignored() {
    let api = FakeBackend::new();
    let mut wf = workflow();
    wf.select_student(Some(student(1, "Ali", "A001")));
    editing(&mut wf, "Week 1");
    wf.add_row("Homework").unwrap();

    let ticket = wf.begin_save().unwrap().unwrap();
    assert!(!wf.can_save());
    let result = api.save_report(&ticket.request);

    wf.select_student(Some(student(2, "Mona", "M002")));
    assert!(!wf.complete_save(ticket, result).unwrap());
    assert!(matches!(wf.stage(), Stage::ChooseAction { student } if student.code == "M002"));
    assert!(wf.last_notification().is_none());
}

#[test]
fn edits_made_during_a_save_stay_unsaved() {
    let api = FakeBackend::new();
    let mut wf = workflow();
    wf.select_student(Some(student(1, "Ali", "A001")));
    editing(&mut wf, "Week 1");
    wf.add_row("Homework").unwrap();

    let ticket = wf.begin_save().unwrap().unwrap();
    wf.add_row("Reading").unwrap();
    let result = api.save_report(&ticket.request);
    assert!(wf.complete_save(ticket, result).unwrap());

    assert!(wf.is_dirty());
    assert!(!wf.document().unwrap().is_draft());
}

#[test]
fn opening_an_existing_report_fetches_it_and_starts_clean() {
    let api = FakeBackend::new();
    let owner = student(1, "Ali", "A001");
    let saved = api.add_report(&owner.id, "Week 3", &["Homework", "Quiz"]);

    let mut wf = workflow();
    wf.select_student(Some(owner.clone()));
    let handoff = EditHandoff {
        student: owner,
        persisted_id: saved.id.clone(),
        report_identifier: saved.report_identifier.clone(),
        report: None,
    };
    assert!(ReportController::new(&api).open(&mut wf, handoff).unwrap());

    assert_eq!(api.calls("get_report"), 1);
    let doc = wf.document().unwrap();
    assert_eq!(doc.persisted_id.as_ref(), Some(&saved.id));
    assert_eq!(doc.grid.rows().len(), 2);
    assert!(!wf.is_dirty());
}

#[test]
fn attached_report_is_used_without_a_fetch() {
    let api = FakeBackend::new();
    let owner = student(1, "Ali", "A001");
    let saved = api.add_report(&owner.id, "Week 3", &["Homework"]);

    let mut wf = workflow();
    let handoff = EditHandoff {
        student: owner,
        persisted_id: saved.id.clone(),
        report_identifier: saved.report_identifier.clone(),
        report: Some(saved),
    };
    assert!(ReportController::new(&api).open(&mut wf, handoff).unwrap());
    assert_eq!(api.total_calls(), 0);
    assert!(wf.document().is_some());
}

#[test]
fn missing_report_leaves_the_editor_blank_with_the_message() {
    let api = FakeBackend::new();
    let owner = student(1, "Ali", "A001");
    let mut wf = workflow();
    let handoff = EditHandoff {
        student: owner,
        persisted_id: ReportId::from(999),
        report_identifier: "Week 9".into(),
        report: None,
    };

    let err = ReportController::new(&api).open(&mut wf, handoff).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let session = wf.session().unwrap();
    assert!(matches!(session.content, EditorContent::Unavailable { .. }));
    assert!(!session.is_dirty());
    assert_eq!(wf.last_notification().unwrap().message, "Report not found");
    assert!(wf.set_title("x").is_err());
}

#[test]
fn late_load_after_a_student_switch_is_dropped() {
    let api = FakeBackend::new();
    let owner = student(1, "Ali", "A001");
    let saved = api.add_report(&owner.id, "Week 3", &["Homework"]);

    let mut wf = workflow();
    let ticket = wf
        .open_existing(EditHandoff {
            student: owner,
            persisted_id: saved.id.clone(),
            report_identifier: saved.report_identifier.clone(),
            report: None,
        })
        .unwrap();

    wf.select_student(Some(student(2, "Mona", "M002")));
    let result = api.get_report(&ticket.persisted_id);
    assert!(!wf.complete_load(ticket, result).unwrap());
    assert!(wf.session().is_none());
}

#[test]
fn notifications_clear_after_the_delay() {
    let api = FakeBackend::new();
    let mut wf = ReportWorkflow::new("Weekly report - ", Duration::from_millis(50));
    wf.select_student(Some(student(1, "Ali", "A001")));
    editing(&mut wf, "Week 1");
    wf.add_row("Homework").unwrap();
    ReportController::new(&api).save(&mut wf).unwrap();

    assert!(wf.notification(Instant::now()).is_some());
    let later = Instant::now() + Duration::from_millis(60);
    assert!(wf.notification(later).is_none());
    assert!(wf.last_notification().is_none());
}

#[test]
fn actions_outside_their_stage_are_refused() {
    let mut wf = workflow();
    assert!(wf.choose_create().is_err());
    let err = wf.add_row("Homework").unwrap_err();
    assert!(matches!(err, AppError::Validation(ref m) if m == "cannot edit at stage 'select-student'"));
    assert!(wf.submit_identifier("Week 1").is_err());
    assert!(matches!(wf.stage(), Stage::SelectStudent));

    wf.select_student(Some(student(1, "Ali", "A001")));
    let err = wf.set_cell(0, 0, "x").unwrap_err();
    assert!(matches!(err, AppError::Validation(ref m) if m.starts_with("cannot edit at stage 'choose-action'")));
    assert!(!wf.is_dirty());
}
