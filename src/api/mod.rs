//! Seam to the SPOT REST backend.
//!
//! Views and controllers only see [`Backend`]; [`HttpBackend`] is the real
//! client, tests plug an in-memory implementation in its place.

mod http;

pub use http::HttpBackend;

use crate::errors::AppResult;
use crate::models::{
    LoginResponse, Report, ReportId, ReportSummary, SaveReport, SavedReport, Student, StudentId, StudentInput,
    Teacher, TeacherCard, TeacherId, TeacherInput, UserProfile,
};

pub trait Backend {
    // ---- auth ----
    fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse>;
    fn me(&self) -> AppResult<UserProfile>;

    // ---- teacher: students ----
    fn list_students(&self) -> AppResult<Vec<Student>>;
    fn create_student(&self, input: &StudentInput) -> AppResult<()>;
    fn update_student(&self, id: &StudentId, input: &StudentInput) -> AppResult<()>;
    fn delete_student(&self, id: &StudentId) -> AppResult<()>;

    // ---- teacher: reports ----
    fn list_reports(&self, student: &StudentId) -> AppResult<Vec<ReportSummary>>;
    fn get_report(&self, id: &ReportId) -> AppResult<Report>;
    /// Creates when `req.report_id` is `None`, updates in place otherwise.
    fn save_report(&self, req: &SaveReport) -> AppResult<SavedReport>;
    fn delete_report(&self, id: &ReportId) -> AppResult<()>;

    // ---- public ----
    fn public_teachers(&self) -> AppResult<Vec<TeacherCard>>;
    fn query_reports(&self, teacher: &TeacherId, student_code: &str) -> AppResult<Vec<Report>>;

    // ---- admin ----
    fn list_teachers(&self) -> AppResult<Vec<Teacher>>;
    fn create_teacher(&self, input: &TeacherInput) -> AppResult<()>;
    fn update_teacher(&self, id: &TeacherId, input: &TeacherInput) -> AppResult<()>;
    fn delete_teacher(&self, id: &TeacherId) -> AppResult<()>;
}
