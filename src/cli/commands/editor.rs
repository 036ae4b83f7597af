//! `spot report --student CODE`: line-oriented front-end over the report
//! workflow and the report list.

use super::reports::{print_list, student_by_code};
use super::{print_grid, signed_in};
use crate::api::Backend;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{
    ManageController, ReportController, ReportList, ReportWorkflow, Stage, StudentDirectory,
};
use crate::errors::{AppError, AppResult};
use crate::models::{ReportId, Role};
use crate::ui::messages::{error, info, notice, success, warning};
use crate::utils::colors::status_tag;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tracing::debug;

const HELP: &str = "\
Commands:
  new <identifier>            start a new report
  manage                      list this student's reports
  open <id>                   edit a listed report
  del <id>                    delete a listed report (answer yes/no)
  title <text>                set the report title
  row add <label>             append a row
  row rename <row> <label>    rename a row
  row del <row>               remove a row
  cell <row> <col> <text>     set a cell (col: index or weekday)
  show                        print the report being edited
  save                        save the report
  student <code>              switch student (unsaved changes are dropped)
  students                    list your students
  cancel                      back to the action choice
  help                        this text
  quit                        leave the editor";

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Report { student } = cmd else {
        return Ok(());
    };
    let (api, _user) = signed_in(cfg, Role::Teacher)?;
    let stdin = io::stdin();
    run_session(&api, cfg, student, stdin.lock())
}

/// Everything one editing session holds.
struct Editor<'a> {
    api: &'a dyn Backend,
    directory: StudentDirectory,
    workflow: ReportWorkflow,
    list: ReportList,
    last_notice: Option<Instant>,
}

/// Reads commands from `input` until `quit` or end of input.
pub fn run_session<R: BufRead>(
    api: &dyn Backend,
    cfg: &Config,
    student_code: &str,
    input: R,
) -> AppResult<()> {
    let mut ed = Editor {
        api,
        directory: StudentDirectory::new(),
        workflow: ReportWorkflow::from_config(cfg),
        list: ReportList::new(),
        last_notice: None,
    };
    ed.directory.load(api)?;
    ed.switch_student(student_code)?;
    println!("Type `help` for the list of commands.");

    let mut lines = input.lines();
    loop {
        print!("spot [{}]> ", ed.workflow.stage().name());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        let result = ed.execute(line);
        let shown = ed.flush_notice();
        if let Err(e) = result {
            debug!("command '{line}' failed: {e}");
            // a notification raised by the failing step already said it
            if !shown {
                error(&e);
            }
        }
    }

    if ed.workflow.is_dirty() {
        warning("Unsaved changes were discarded.");
    }
    Ok(())
}

impl<'a> Editor<'a> {
    fn execute(&mut self, line: &str) -> AppResult<()> {
        let (verb, rest) = split_word(line);

        match verb {
            "help" => println!("{HELP}"),
            "students" => self.print_students(),
            "student" => self.switch_student(rest)?,
            "new" => self.new_report(rest)?,
            "manage" => self.manage()?,
            "open" => self.open(rest)?,
            "del" => self.delete(rest)?,
            "yes" | "y" => self.answer_delete(true)?,
            "no" | "n" => self.answer_delete(false)?,
            "title" => self.workflow.set_title(rest)?,
            "row" => self.row(rest)?,
            "cell" => self.cell(rest)?,
            "show" => self.show(),
            "save" => {
                if !ReportController::new(self.api).save(&mut self.workflow)? {
                    info("Nothing to save.");
                }
            }
            "cancel" => self.cancel()?,
            other => {
                return Err(AppError::validation(format!(
                    "unknown command '{other}' (try `help`)"
                )));
            }
        }
        Ok(())
    }

    /// Shows a notification once, the first time it is seen.
    fn flush_notice(&mut self) -> bool {
        let Some(n) = self.workflow.notification(Instant::now()) else {
            return false;
        };
        if self.last_notice == Some(n.raised_at()) {
            return false;
        }
        self.last_notice = Some(n.raised_at());
        notice(n);
        true
    }

    fn switch_student(&mut self, code: &str) -> AppResult<()> {
        if code.trim().is_empty() {
            self.workflow.select_student(None);
            self.list.select_student(None);
            return Err(AppError::validation("student code required"));
        }
        match student_by_code(&self.directory, code) {
            Ok(student) => {
                info(format!("Student: {}", student.label()));
                self.workflow.select_student(Some(student));
                self.list.select_student(None);
                Ok(())
            }
            Err(e) => {
                self.workflow.select_student(None);
                self.list.select_student(None);
                Err(e)
            }
        }
    }

    fn print_students(&self) {
        for s in self.directory.students() {
            println!("  {}", s.label());
        }
    }

    fn new_report(&mut self, identifier: &str) -> AppResult<()> {
        if self.workflow.is_dirty() {
            return Err(AppError::validation(
                "unsaved changes: `save` or `cancel` first",
            ));
        }
        if matches!(
            self.workflow.stage(),
            Stage::EditReport(_) | Stage::ManageReports { .. }
        ) {
            self.workflow.back_to_actions()?;
        }
        if matches!(self.workflow.stage(), Stage::ChooseAction { .. }) {
            self.workflow.choose_create()?;
        }
        self.workflow.submit_identifier(identifier)?;
        self.show();
        Ok(())
    }

    /// Enters the list view, loading it the first time.
    fn manage(&mut self) -> AppResult<()> {
        if self.workflow.is_dirty() {
            return Err(AppError::validation(
                "unsaved changes: `save` or `cancel` first",
            ));
        }
        if matches!(self.workflow.stage(), Stage::EditReport(_)) {
            self.workflow.back_to_actions()?;
        }
        if matches!(self.workflow.stage(), Stage::ChooseAction { .. }) {
            let student = self.workflow.choose_manage()?;
            ManageController::new(self.api).select(&mut self.list, Some(student))?;
        } else if let Stage::ManageReports { .. } = self.workflow.stage() {
            let ticket = self.list.refresh();
            ManageController::new(self.api).load(&mut self.list, ticket)?;
        } else {
            return Err(AppError::validation(format!(
                "cannot manage reports at stage '{}'",
                self.workflow.stage().name()
            )));
        }
        self.print_list();
        Ok(())
    }

    fn print_list(&self) {
        if let Some(student) = self.list.student() {
            print_list(student, &self.list);
        }
    }

    fn report_id(&self, arg: &str) -> AppResult<ReportId> {
        let arg = arg.trim();
        if arg.is_empty() {
            return Err(AppError::validation("report id required"));
        }
        // non-numeric ids stay text, parsing cannot fail
        let Ok(id) = arg.parse::<ReportId>();
        Ok(id)
    }

    fn ensure_list(&mut self) -> AppResult<()> {
        if !matches!(self.workflow.stage(), Stage::ManageReports { .. }) {
            self.manage()?;
        }
        Ok(())
    }

    fn open(&mut self, arg: &str) -> AppResult<()> {
        let id = self.report_id(arg)?;
        self.ensure_list()?;
        let handoff = self.list.edit(&id)?;
        if ReportController::new(self.api).open(&mut self.workflow, handoff)? {
            self.show();
        }
        Ok(())
    }

    /// Opens the confirmation; `yes` or `no` answers it.
    fn delete(&mut self, arg: &str) -> AppResult<()> {
        let id = self.report_id(arg)?;
        self.ensure_list()?;
        self.list.request_delete(&id)?;
        warning(format!(
            "Delete report {id}? This action is irreversible. Type `yes` or `no`."
        ));
        Ok(())
    }

    fn answer_delete(&mut self, confirmed: bool) -> AppResult<()> {
        if self.list.pending_confirmation().is_none() {
            return Err(AppError::validation("nothing to confirm"));
        }
        if !confirmed {
            self.list.cancel_delete();
            info("Operation cancelled.");
            return Ok(());
        }
        let result = ManageController::new(self.api).delete_confirmed(&mut self.list);
        if matches!(result, Ok(true)) {
            success("Report deleted.");
        }
        self.print_list();
        result.map(|_| ())
    }

    fn row(&mut self, rest: &str) -> AppResult<()> {
        let (sub, args) = split_word(rest);
        match sub {
            "add" => self.workflow.add_row(args)?,
            "rename" => {
                let (row, label) = split_word(args);
                self.workflow.rename_row(parse_index(row, "row")?, label)?;
            }
            "del" => self.workflow.remove_row(parse_index(args, "row")?)?,
            _ => return Err(AppError::validation("usage: row add|rename|del ...")),
        }
        self.show();
        Ok(())
    }

    fn cell(&mut self, rest: &str) -> AppResult<()> {
        let (row, rest) = split_word(rest);
        let (col, text) = split_word(rest);
        let row = parse_index(row, "row")?;
        let col = self.column_index(col)?;
        self.workflow.set_cell(row, col, &text.replace("\\n", "\n"))?;
        self.show();
        Ok(())
    }

    /// Column by index or by (the start of) its weekday name.
    fn column_index(&self, arg: &str) -> AppResult<usize> {
        if let Ok(i) = arg.parse::<usize>() {
            return Ok(i);
        }
        let wanted = arg.to_lowercase();
        self.workflow
            .document()
            .and_then(|doc| {
                doc.grid
                    .columns()
                    .iter()
                    .position(|c| !wanted.is_empty() && c.to_lowercase().starts_with(&wanted))
            })
            .ok_or_else(|| AppError::validation(format!("unknown column '{arg}'")))
    }

    fn show(&self) {
        let Some(session) = self.workflow.session() else {
            info(format!(
                "Stage: {}{}",
                self.workflow.stage().name(),
                self.workflow
                    .student()
                    .map(|s| format!(" ({})", s.label()))
                    .unwrap_or_default()
            ));
            return;
        };
        let Some(doc) = session.document() else {
            warning("No report to show.");
            return;
        };

        println!(
            "\n📄 {}  {}",
            doc.title,
            status_tag(session.is_dirty(), doc.is_draft())
        );
        println!(
            "   Report: {}  |  Student: {}\n",
            doc.report_identifier,
            session.student.label()
        );
        print_grid(&doc.grid);
    }

    fn cancel(&mut self) -> AppResult<()> {
        if self.workflow.session().is_some_and(|s| s.is_saving()) {
            return Err(AppError::validation("a save is in progress"));
        }
        if matches!(self.workflow.stage(), Stage::PromptIdentifier { .. }) {
            self.workflow.cancel_identifier()
        } else {
            self.workflow.back_to_actions()
        }
    }
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (s, ""),
    }
}

fn parse_index(s: &str, what: &str) -> AppResult<usize> {
    s.trim()
        .parse()
        .map_err(|_| AppError::validation(format!("{what} number expected, got '{s}'")))
}
