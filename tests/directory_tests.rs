use spot::core::{StudentDirectory, roster};
use spot::errors::AppError;
use spot::models::StudentId;

mod common;
use common::{Failure, FakeBackend, student};

fn roster_fixture() -> FakeBackend {
    FakeBackend::with_students(vec![
        student(1, "Ali Hassan", "A001"),
        student(2, "Mona Said", "M002"),
        student(3, "Omar Ali", "O003"),
    ])
}

#[test]
fn load_fetches_once_and_lookups_use_the_cache() {
    let api = roster_fixture();
    let mut dir = StudentDirectory::new();
    assert!(!dir.is_loaded());

    assert_eq!(dir.load(&api).unwrap().len(), 3);
    assert!(dir.is_loaded());
    assert!(!dir.is_loading());

    assert_eq!(dir.get(&StudentId::from(2)).unwrap().name, "Mona Said");
    assert_eq!(dir.find_by_code(" a001 ").unwrap().id, StudentId::from(1));
    assert!(dir.find_by_code("Z999").is_none());
    assert_eq!(api.calls("list_students"), 1);
}

#[test]
fn search_matches_name_or_code_case_insensitively() {
    let api = roster_fixture();
    let mut dir = StudentDirectory::new();
    dir.load(&api).unwrap();

    let names: Vec<&str> = dir.search("ali").iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Ali Hassan", "Omar Ali"]);
    assert_eq!(dir.search("m002").len(), 1);
    assert_eq!(dir.search("").len(), 3);
}

#[test]
fn failed_refresh_keeps_the_previous_roster() {
    let api = roster_fixture();
    let mut dir = StudentDirectory::new();
    dir.load(&api).unwrap();

    api.fail_next("list_students", Failure::Network);
    assert!(dir.refresh(&api).is_err());
    assert_eq!(dir.students().len(), 3);
    assert_eq!(dir.last_error(), Some("Failed to load the student list"));

    dir.refresh(&api).unwrap();
    assert!(dir.last_error().is_none());
}

#[test]
fn overlapping_refreshes_last_write_wins() {
    let mut dir = StudentDirectory::new();
    dir.begin_refresh();
    dir.begin_refresh();
    assert!(dir.is_loading());

    dir.complete_refresh(Ok(vec![student(1, "Ali", "A001")])).unwrap();
    assert!(dir.is_loading());
    dir.complete_refresh(Ok(vec![student(2, "Mona", "M002")])).unwrap();

    assert!(!dir.is_loading());
    assert_eq!(dir.students().len(), 1);
    assert_eq!(dir.students()[0].code, "M002");
}

#[test]
fn roster_validation_happens_before_any_call() {
    let api = roster_fixture();
    let mut dir = StudentDirectory::new();
    dir.load(&api).unwrap();

    let err = roster::create_student(&api, &mut dir, "  ", "B010").unwrap_err();
    assert!(matches!(err, AppError::Validation(ref m) if m == "student name required"));
    let err = roster::create_student(&api, &mut dir, "Badr", "").unwrap_err();
    assert!(matches!(err, AppError::Validation(ref m) if m == "student code required"));

    assert_eq!(api.calls("create_student"), 0);
}

#[test]
fn create_update_delete_refresh_the_directory() {
    let api = roster_fixture();
    let mut dir = StudentDirectory::new();
    dir.load(&api).unwrap();

    roster::create_student(&api, &mut dir, " Badr ", " B010 ").unwrap();
    let badr = dir.find_by_code("B010").unwrap().clone();
    assert_eq!(badr.name, "Badr");

    roster::update_student(&api, &mut dir, &badr.id, Some("Badr Nabil"), None).unwrap();
    let updated = dir.get(&badr.id).unwrap();
    assert_eq!(updated.name, "Badr Nabil");
    assert_eq!(updated.code, "B010");

    roster::delete_student(&api, &mut dir, &badr.id).unwrap();
    assert!(dir.get(&badr.id).is_none());
    assert_eq!(api.calls("list_students"), 4);
}

#[test]
fn duplicate_code_comes_back_verbatim() {
    let api = roster_fixture();
    let mut dir = StudentDirectory::new();
    dir.load(&api).unwrap();

    let err = roster::create_student(&api, &mut dir, "Another", "A001").unwrap_err();
    assert_eq!(err.user_message("Failed"), "Student code already in use");
    assert_eq!(dir.students().len(), 3);
}

#[test]
fn updating_an_unknown_student_fails_locally() {
    let api = roster_fixture();
    let mut dir = StudentDirectory::new();
    dir.load(&api).unwrap();

    let err = roster::update_student(&api, &mut dir, &StudentId::from(77), Some("X"), None)
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(api.calls("update_student"), 0);
}
