//! Rendering-free view logic: each view is a plain state machine, network
//! calls happen outside it and are fed back through `complete_*` methods.

pub mod controller;
pub mod directory;
pub mod manage;
pub mod query;
pub mod roster;
pub mod session;
pub mod teachers;
pub mod workflow;

pub use controller::{ManageController, QueryController, ReportController};
pub use directory::StudentDirectory;
pub use manage::{ListState, ReportList};
pub use query::{PublicQuery, QueryOutcome};
pub use workflow::{EditHandoff, EditSession, EditorContent, ReportWorkflow, Stage};
