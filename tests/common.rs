#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use spot::api::Backend;
use spot::errors::{AppError, AppResult};
use spot::models::{
    LoginResponse, Report, ReportId, ReportSummary, Role, SaveReport, Student, StudentId,
    SavedReport, StudentInput, Teacher, TeacherCard, TeacherId, TeacherInput, UserId, UserProfile,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const DUPLICATE_REPORT: &str = "A report with this identifier already exists for this student";
pub const TTL: Duration = Duration::from_secs(3);

pub fn spot() -> Command {
    cargo_bin_cmd!("spot")
}

/// Fresh, empty config directory inside the system temp dir
pub fn temp_config_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("spot_test_{name}"));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).ok();
    path
}

/// Output file path inside the temp dir, removed if present
pub fn temp_out(name: &str, ext: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("spot_{name}_out.{ext}"));
    fs::remove_file(&path).ok();
    path
}

pub fn student(id: i64, name: &str, code: &str) -> Student {
    Student {
        id: StudentId::from(id),
        name: name.to_string(),
        code: code.to_string(),
        created_at: None,
    }
}

pub fn card(id: i64, name: &str) -> TeacherCard {
    TeacherCard {
        id: TeacherId::from(id),
        name: name.to_string(),
        specialty: Some("Mathematics".to_string()),
        avatar_url: None,
    }
}

pub fn teacher_profile() -> UserProfile {
    UserProfile {
        id: UserId::from(7),
        name: "Sara".to_string(),
        email: Some("sara@example.com".to_string()),
        role: Role::Teacher,
    }
}

/// Signed with a throwaway key; the client never checks signatures.
pub fn make_token(exp: i64) -> String {
    use jsonwebtoken::{EncodingKey, Header, encode};
    let claims = serde_json::json!({ "sub": "7", "role": "teacher", "exp": exp });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap()
}

/// How the next call of an endpoint should fail.
#[derive(Debug, Clone)]
pub enum Failure {
    Server(u16, Option<&'static str>),
    Network,
    Unauthorized,
    NotFound,
}

impl Failure {
    fn to_error(&self, what: &str) -> AppError {
        match self {
            Failure::Server(status, message) => AppError::Server {
                status: *status,
                message: message.map(str::to_string),
            },
            Failure::Network => AppError::Network("connection refused".into()),
            Failure::Unauthorized => AppError::Unauthorized,
            Failure::NotFound => AppError::NotFound(format!("{what} not found")),
        }
    }
}

#[derive(Default)]
pub struct FakeState {
    pub students: Vec<Student>,
    pub reports: Vec<Report>,
    pub cards: Vec<TeacherCard>,
    pub teachers: Vec<Teacher>,
    pub profile: Option<UserProfile>,
    pub credentials: Option<(String, String)>,
    pub token: String,
    pub next_id: i64,
    pub clock: i64,
    /// Body of the last teacher update, as sent
    pub last_teacher_update: Option<TeacherInput>,
    /// Answer saves with `{id}` only, like the real backend may
    pub bare_save_ack: bool,
    /// Endpoint name -> failure served on its next call
    pub failures: HashMap<&'static str, Failure>,
}

/// In-memory backend that counts every call per endpoint.
#[derive(Default)]
pub struct FakeBackend {
    pub state: RefCell<FakeState>,
    calls: RefCell<HashMap<&'static str, usize>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        let fake = Self::default();
        fake.state.borrow_mut().next_id = 100;
        fake
    }

    pub fn with_students(students: Vec<Student>) -> Self {
        let fake = Self::new();
        fake.state.borrow_mut().students = students;
        fake
    }

    pub fn calls(&self, endpoint: &str) -> usize {
        self.calls.borrow().get(endpoint).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().values().sum()
    }

    pub fn fail_next(&self, endpoint: &'static str, failure: Failure) {
        self.state.borrow_mut().failures.insert(endpoint, failure);
    }

    pub fn add_report(&self, student: &StudentId, identifier: &str, rows: &[&str]) -> Report {
        let mut grid = spot::models::Grid::empty();
        for r in rows {
            grid = grid.add_row(r).unwrap();
        }
        let mut st = self.state.borrow_mut();
        st.next_id += 1;
        st.clock += 1;
        let report = Report {
            id: ReportId::from(st.next_id),
            student_id: Some(student.clone()),
            report_identifier: identifier.to_string(),
            title: format!("Weekly report - {identifier}"),
            updated_at: Some(at(st.clock)),
            grid,
        };
        st.reports.push(report.clone());
        report
    }

    fn hit(&self, endpoint: &'static str) -> AppResult<()> {
        *self.calls.borrow_mut().entry(endpoint).or_insert(0) += 1;
        match self.state.borrow_mut().failures.remove(endpoint) {
            Some(f) => Err(f.to_error(endpoint)),
            None => Ok(()),
        }
    }
}

fn at(tick: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 4, 8, 0, 0).unwrap() + ChronoDuration::minutes(tick)
}

impl Backend for FakeBackend {
    fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        self.hit("login")?;
        let st = self.state.borrow();
        match (&st.credentials, &st.profile) {
            (Some((e, p)), Some(user)) if e == email && p == password => Ok(LoginResponse {
                token: st.token.clone(),
                user: user.clone(),
            }),
            _ => Err(AppError::Server {
                status: 401,
                message: Some("Login failed: check your email and password".into()),
            }),
        }
    }

    fn me(&self) -> AppResult<UserProfile> {
        self.hit("me")?;
        self.state
            .borrow()
            .profile
            .clone()
            .ok_or(AppError::Unauthorized)
    }

    fn list_students(&self) -> AppResult<Vec<Student>> {
        self.hit("list_students")?;
        Ok(self.state.borrow().students.clone())
    }

    fn create_student(&self, input: &StudentInput) -> AppResult<()> {
        self.hit("create_student")?;
        let mut st = self.state.borrow_mut();
        if st.students.iter().any(|s| s.code == input.code) {
            return Err(AppError::Server {
                status: 409,
                message: Some("Student code already in use".into()),
            });
        }
        st.next_id += 1;
        let id = st.next_id;
        st.students.push(student(id, &input.name, &input.code));
        Ok(())
    }

    fn update_student(&self, id: &StudentId, input: &StudentInput) -> AppResult<()> {
        self.hit("update_student")?;
        let mut st = self.state.borrow_mut();
        let s = st
            .students
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| AppError::NotFound("student".into()))?;
        s.name = input.name.clone();
        s.code = input.code.clone();
        Ok(())
    }

    fn delete_student(&self, id: &StudentId) -> AppResult<()> {
        self.hit("delete_student")?;
        let mut st = self.state.borrow_mut();
        st.students.retain(|s| &s.id != id);
        st.reports.retain(|r| r.student_id.as_ref() != Some(id));
        Ok(())
    }

    fn list_reports(&self, student: &StudentId) -> AppResult<Vec<ReportSummary>> {
        self.hit("list_reports")?;
        Ok(self
            .state
            .borrow()
            .reports
            .iter()
            .filter(|r| r.student_id.as_ref() == Some(student))
            .map(ReportSummary::from)
            .collect())
    }

    fn get_report(&self, id: &ReportId) -> AppResult<Report> {
        self.hit("get_report")?;
        self.state
            .borrow()
            .reports
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Report not found".into()))
    }

    fn save_report(&self, req: &SaveReport) -> AppResult<SavedReport> {
        self.hit("save_report")?;
        let mut st = self.state.borrow_mut();

        let clash = st.reports.iter().any(|r| {
            r.student_id.as_ref() == Some(&req.student_id)
                && r.report_identifier == req.report_identifier
                && Some(&r.id) != req.report_id.as_ref()
        });
        if clash {
            return Err(AppError::Server {
                status: 409,
                message: Some(DUPLICATE_REPORT.into()),
            });
        }

        st.clock += 1;
        let now = at(st.clock);
        let saved = match &req.report_id {
            Some(id) => {
                let r = st
                    .reports
                    .iter_mut()
                    .find(|r| &r.id == id)
                    .ok_or_else(|| AppError::NotFound("Report not found".into()))?;
                r.report_identifier = req.report_identifier.clone();
                r.title = req.title.clone();
                r.grid = req.grid.clone();
                r.updated_at = Some(now);
                r.clone()
            }
            None => {
                st.next_id += 1;
                let report = Report {
                    id: ReportId::from(st.next_id),
                    student_id: Some(req.student_id.clone()),
                    report_identifier: req.report_identifier.clone(),
                    title: req.title.clone(),
                    updated_at: Some(now),
                    grid: req.grid.clone(),
                };
                st.reports.push(report.clone());
                report
            }
        };

        if st.bare_save_ack {
            return Ok(SavedReport {
                id: saved.id,
                report_identifier: None,
            });
        }
        Ok(SavedReport::from(&saved))
    }

    fn delete_report(&self, id: &ReportId) -> AppResult<()> {
        self.hit("delete_report")?;
        self.state.borrow_mut().reports.retain(|r| &r.id != id);
        Ok(())
    }

    fn public_teachers(&self) -> AppResult<Vec<TeacherCard>> {
        self.hit("public_teachers")?;
        Ok(self.state.borrow().cards.clone())
    }

    fn query_reports(&self, _teacher: &TeacherId, student_code: &str) -> AppResult<Vec<Report>> {
        self.hit("query_reports")?;
        let st = self.state.borrow();
        let Some(owner) = st.students.iter().find(|s| s.code == student_code) else {
            return Ok(Vec::new());
        };
        Ok(st
            .reports
            .iter()
            .filter(|r| r.student_id.as_ref() == Some(&owner.id))
            .cloned()
            .collect())
    }

    fn list_teachers(&self) -> AppResult<Vec<Teacher>> {
        self.hit("list_teachers")?;
        Ok(self.state.borrow().teachers.clone())
    }

    fn create_teacher(&self, input: &TeacherInput) -> AppResult<()> {
        self.hit("create_teacher")?;
        let mut st = self.state.borrow_mut();
        st.next_id += 1;
        let id = st.next_id;
        st.teachers.push(Teacher {
            id: TeacherId::from(id),
            name: input.name.clone(),
            specialty: input.specialty.clone(),
            email: input.email.clone(),
            avatar_url: input.avatar_url.clone(),
        });
        Ok(())
    }

    fn update_teacher(&self, id: &TeacherId, input: &TeacherInput) -> AppResult<()> {
        self.hit("update_teacher")?;
        let mut st = self.state.borrow_mut();
        st.last_teacher_update = Some(input.clone());
        let t = st
            .teachers
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| AppError::NotFound("teacher".into()))?;
        t.name = input.name.clone();
        t.email = input.email.clone();
        t.specialty = input.specialty.clone();
        t.avatar_url = input.avatar_url.clone();
        Ok(())
    }

    fn delete_teacher(&self, id: &TeacherId) -> AppResult<()> {
        self.hit("delete_teacher")?;
        self.state.borrow_mut().teachers.retain(|t| &t.id != id);
        Ok(())
    }
}
