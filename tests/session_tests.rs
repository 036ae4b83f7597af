use chrono::{Duration, Utc};
use spot::core::session::{self, TokenStore};
use spot::errors::AppError;
use spot::models::Role;

mod common;
use common::{FakeBackend, make_token, teacher_profile, temp_config_dir};

fn store(name: &str) -> TokenStore {
    TokenStore::new(temp_config_dir(name).join("spot_token"))
}

fn logged_in_backend(token: &str) -> FakeBackend {
    let api = FakeBackend::new();
    {
        let mut st = api.state.borrow_mut();
        st.profile = Some(teacher_profile());
        st.credentials = Some(("sara@example.com".into(), "secret".into()));
        st.token = token.to_string();
    }
    api
}

#[test]
fn expiry_comes_from_the_exp_claim() {
    let now = Utc::now();
    let fresh = make_token((now + Duration::hours(1)).timestamp());
    let stale = make_token((now - Duration::minutes(1)).timestamp());

    assert!(!session::is_expired(&fresh, now));
    assert!(session::is_expired(&stale, now));
    assert!(session::is_expired("not-a-jwt", now));
}

#[test]
fn login_validates_locally_then_stores_the_token() {
    let token = make_token((Utc::now() + Duration::hours(1)).timestamp());
    let api = logged_in_backend(&token);
    let store = store("login_stores");

    assert!(matches!(
        session::login(&api, &store, "  ", "secret"),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        session::login(&api, &store, "sara@example.com", ""),
        Err(AppError::Validation(_))
    ));
    assert_eq!(api.calls("login"), 0);

    let user = session::login(&api, &store, "sara@example.com", "secret").unwrap();
    assert_eq!(user.role, Role::Teacher);
    assert_eq!(store.read().unwrap(), Some(token));
}

#[test]
fn wrong_password_keeps_no_token() {
    let api = logged_in_backend("unused");
    let store = store("login_wrong_password");

    let err = session::login(&api, &store, "sara@example.com", "nope").unwrap_err();
    assert!(err.to_string().contains("Login failed"));
    assert_eq!(store.read().unwrap(), None);
}

#[test]
fn expired_token_is_removed_without_asking_the_server() {
    let token = make_token((Utc::now() - Duration::hours(2)).timestamp());
    let api = logged_in_backend(&token);
    let store = store("expired_token");
    store.write(&token).unwrap();

    let err = session::current_user(&api, &store).unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));
    assert!(!store.path().exists());
    assert_eq!(api.calls("me"), 0);
}

#[test]
fn token_rejected_by_the_server_is_removed() {
    let token = make_token((Utc::now() + Duration::hours(1)).timestamp());
    let api = FakeBackend::new();
    let store = store("rejected_token");
    store.write(&token).unwrap();

    let err = session::current_user(&api, &store).unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));
    assert!(!store.path().exists());
    assert_eq!(api.calls("me"), 1);
}

#[test]
fn valid_token_returns_the_profile() {
    let token = make_token((Utc::now() + Duration::hours(1)).timestamp());
    let api = logged_in_backend(&token);
    let store = store("valid_token");
    store.write(&token).unwrap();

    let user = session::current_user(&api, &store).unwrap();
    assert_eq!(user.name, "Sara");
    assert!(session::require_role(&user, Role::Teacher).is_ok());
    assert!(matches!(
        session::require_role(&user, Role::Admin),
        Err(AppError::Forbidden(ref r)) if r == "admin"
    ));
}

#[test]
fn logout_reports_whether_a_session_existed() {
    let store = store("logout");
    assert!(!session::logout(&store).unwrap());
    store.write("abc").unwrap();
    assert!(session::logout(&store).unwrap());
    assert_eq!(store.read().unwrap(), None);
}
