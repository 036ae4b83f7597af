pub mod grid;
pub mod id;
pub mod notification;
pub mod report;
pub mod student;
pub mod teacher;
pub mod user;

pub use grid::{Grid, GridRow, create_empty_grid};
pub use id::{RawId, ReportId, StudentId, TeacherId, UserId};
pub use notification::{NoticeKind, NoticeSlot, Notification};
pub use report::{Report, ReportDocument, ReportSummary, SaveReport, SavedReport, latest_first};
pub use student::{Student, StudentInput};
pub use teacher::{Teacher, TeacherCard, TeacherInput};
pub use user::{LoginResponse, Role, UserProfile};
