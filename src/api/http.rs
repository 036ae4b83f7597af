use super::Backend;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{
    LoginResponse, Report, ReportId, ReportSummary, SaveReport, SavedReport, Student, StudentId,
    StudentInput, Teacher, TeacherCard, TeacherId, TeacherInput, UserProfile,
};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Shape of the backend's error bodies.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Blocking JSON client for the SPOT API.
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration, token: Option<String>) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Network(format!("HTTP client setup failed: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(cfg: &Config, token: Option<String>) -> AppResult<Self> {
        Self::new(
            &cfg.api_base_url,
            Duration::from_secs(cfg.request_timeout_secs),
            token,
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    fn send(&self, req: RequestBuilder, what: &str) -> AppResult<Response> {
        let resp = self.authorized(req).send().map_err(|e| {
            warn!(target: "spot::api", "{what}: transport failure: {e}");
            AppError::Network(e.to_string())
        })?;
        debug!(target: "spot::api", "{what}: HTTP {}", resp.status());
        check_status(resp, what)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, what: &str) -> AppResult<T> {
        let resp = self.send(self.client.get(self.url(path)), what)?;
        decode(resp, what)
    }

    fn delete(&self, path: &str, what: &str) -> AppResult<()> {
        self.send(self.client.delete(self.url(path)), what)?;
        Ok(())
    }
}

/// Maps a non-2xx response onto the error taxonomy, keeping the backend's
/// `message` field when the body carries one.
fn check_status(resp: Response, what: &str) -> AppResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp
        .text()
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());

    warn!(target: "spot::api", "{what}: rejected with {status} ({message:?})");

    Err(match status {
        StatusCode::UNAUTHORIZED => AppError::Unauthorized,
        StatusCode::NOT_FOUND => {
            AppError::NotFound(message.unwrap_or_else(|| format!("{what} not found")))
        }
        // 403 keeps the backend's reason
        _ => AppError::Server {
            status: status.as_u16(),
            message,
        },
    })
}

fn decode<T: DeserializeOwned>(resp: Response, what: &str) -> AppResult<T> {
    resp.json::<T>()
        .map_err(|e| AppError::Network(format!("{what}: unexpected response: {e}")))
}

impl Backend for HttpBackend {
    fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let req = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }));
        // the login call never carries an old token
        let resp = req.send().map_err(AppError::from)?;
        let resp = check_status(resp, "login").map_err(|e| match e {
            AppError::Unauthorized => AppError::Server {
                status: 401,
                message: Some("Login failed: check your email and password".into()),
            },
            other => other,
        })?;
        decode(resp, "login")
    }

    fn me(&self) -> AppResult<UserProfile> {
        self.get("/auth/me", "current user")
    }

    fn list_students(&self) -> AppResult<Vec<Student>> {
        self.get("/teacher/students", "list students")
    }

    fn create_student(&self, input: &StudentInput) -> AppResult<()> {
        let req = self.client.post(self.url("/teacher/students")).json(input);
        self.send(req, "create student")?;
        Ok(())
    }

    fn update_student(&self, id: &StudentId, input: &StudentInput) -> AppResult<()> {
        let req = self
            .client
            .put(self.url(&format!("/teacher/students/{id}")))
            .json(input);
        self.send(req, "update student")?;
        Ok(())
    }

    fn delete_student(&self, id: &StudentId) -> AppResult<()> {
        self.delete(&format!("/teacher/students/{id}"), "delete student")
    }

    fn list_reports(&self, student: &StudentId) -> AppResult<Vec<ReportSummary>> {
        let req = self
            .client
            .get(self.url("/teacher/reports/list"))
            .query(&[("student_id", student.to_string())]);
        let resp = self.send(req, "list reports")?;
        decode(resp, "list reports")
    }

    fn get_report(&self, id: &ReportId) -> AppResult<Report> {
        self.get(&format!("/teacher/reports/{id}"), "report")
    }

    fn save_report(&self, body: &SaveReport) -> AppResult<SavedReport> {
        let req = self.client.post(self.url("/teacher/reports")).json(body);
        let resp = self.send(req, "save report")?;
        decode(resp, "save report")
    }

    fn delete_report(&self, id: &ReportId) -> AppResult<()> {
        self.delete(&format!("/teacher/reports/{id}"), "delete report")
    }

    fn public_teachers(&self) -> AppResult<Vec<TeacherCard>> {
        self.get("/public/teachers", "teacher list")
    }

    fn query_reports(&self, teacher: &TeacherId, student_code: &str) -> AppResult<Vec<Report>> {
        let req = self
            .client
            .post(self.url("/public/query-report"))
            .json(&json!({ "teacher_id": teacher, "student_code": student_code }));
        let resp = self.send(req, "report query")?;
        decode(resp, "report query")
    }

    fn list_teachers(&self) -> AppResult<Vec<Teacher>> {
        self.get("/admin/teachers", "list teachers")
    }

    fn create_teacher(&self, input: &TeacherInput) -> AppResult<()> {
        let req = self.client.post(self.url("/admin/teachers")).json(input);
        self.send(req, "create teacher")?;
        Ok(())
    }

    fn update_teacher(&self, id: &TeacherId, input: &TeacherInput) -> AppResult<()> {
        let req = self
            .client
            .put(self.url(&format!("/admin/teachers/{id}")))
            .json(input);
        self.send(req, "update teacher")?;
        Ok(())
    }

    fn delete_teacher(&self, id: &TeacherId) -> AppResult<()> {
        self.delete(&format!("/admin/teachers/{id}"), "delete teacher")
    }
}
