use super::{ask_confirmation, print_report, signed_in};
use crate::api::Backend;
use crate::cli::parser::{Commands, ReportsCmd};
use crate::config::Config;
use crate::core::{ListState, ManageController, ReportList, StudentDirectory};
use crate::errors::{AppError, AppResult};
use crate::models::{ReportSummary, Role, Student};
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Reports { action } = cmd else {
        return Ok(());
    };
    let (api, _user) = signed_in(cfg, Role::Teacher)?;

    match action {
        ReportsCmd::List { student } => {
            let mut directory = StudentDirectory::new();
            directory.load(&api)?;
            let student = student_by_code(&directory, student)?;

            let mut list = ReportList::new();
            ManageController::new(&api).select(&mut list, Some(student.clone()))?;
            print_list(&student, &list);
        }
        ReportsCmd::Show { id } => {
            let report = api.get_report(id)?;
            print_report(&report);
        }
        ReportsCmd::Del { id, yes } => {
            // Goes through the list view so the id is checked against the
            // owner's reports before anything is deleted.
            let report = api.get_report(id)?;
            let mut directory = StudentDirectory::new();
            directory.load(&api)?;
            let student = report
                .student_id
                .as_ref()
                .and_then(|sid| directory.get(sid))
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("owner of report {id}")))?;

            let controller = ManageController::new(&api);
            let mut list = ReportList::new();
            controller.select(&mut list, Some(student.clone()))?;
            list.request_delete(id)?;

            let prompt = format!(
                "Delete report '{}' of {}? This action is irreversible.",
                report.report_identifier,
                student.label()
            );
            if !*yes && !ask_confirmation(&prompt) {
                list.cancel_delete();
                info("Operation cancelled.");
                return Ok(());
            }

            controller.delete_confirmed(&mut list)?;
            success(format!("Report '{}' deleted.", report.report_identifier));
            print_list(&student, &list);
        }
    }
    Ok(())
}

pub(crate) fn student_by_code(directory: &StudentDirectory, code: &str) -> AppResult<Student> {
    directory
        .find_by_code(code)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("no student with code '{}'", code.trim())))
}

pub(crate) fn print_list(student: &Student, list: &ReportList) {
    match list.state() {
        ListState::NoStudent => info("No student selected."),
        ListState::Loading => info("Loading…"),
        ListState::Empty => info(format!("{} has no reports yet.", student.label())),
        ListState::Reports(reports) => {
            println!("📚 Reports of {}\n", student.label());
            print!("{}", summaries_table(reports).render());
        }
    }
}

fn summaries_table(reports: &[ReportSummary]) -> Table {
    let mut table = Table::new(vec![
        Column::new("ID", 10),
        Column::new("Identifier", 24),
        Column::new("Title", 40),
        Column::new("Updated", 16),
    ]);
    for r in reports {
        table.add_row(vec![
            r.id.to_string(),
            r.report_identifier.clone(),
            r.title.clone(),
            r.updated_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        ]);
    }
    table
}
