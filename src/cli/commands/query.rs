use super::{print_report, public_backend};
use crate::api::Backend;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{PublicQuery, QueryController, QueryOutcome};
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, PdfRenderer};
use crate::ui::messages::{info, warning};
use crate::utils::path::expand_tilde;

/// Handle `query`: look up a student's reports with one teacher
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Query {
        teacher,
        code,
        report,
        export,
        format,
        force,
    } = cmd
    else {
        return Ok(());
    };

    let api = public_backend(cfg)?;
    let card = api
        .public_teachers()?
        .into_iter()
        .find(|t| &t.id == teacher)
        .ok_or_else(|| AppError::NotFound(format!("no teacher with id {teacher}")))?;

    let controller = QueryController::new(&api);
    let mut view = PublicQuery::new(card, cfg.notification_ttl());
    controller.run(&mut view, code)?;

    if *view.outcome() == QueryOutcome::NoMatch {
        warning(format!(
            "No reports match the code '{}' for {}.",
            view.code(),
            view.teacher().name
        ));
        return Ok(());
    }

    if let Some(identifier) = report {
        view.select_by_identifier(identifier)?;
    }

    println!("👩‍🏫 {}", view.teacher().name);
    if let Some(s) = &view.teacher().specialty {
        println!("   {s}");
    }
    println!("   Student code: {}\n", view.code());

    if let Some(shown) = view.selected() {
        print_report(shown);
    }

    let others: Vec<&str> = view
        .reports()
        .iter()
        .filter(|r| Some(&r.id) != view.selected().map(|s| &s.id))
        .map(|r| r.report_identifier.as_str())
        .collect();
    if !others.is_empty() {
        info(format!(
            "Other reports: {} (use --report to show one)",
            others.join(", ")
        ));
    }

    if let Some(file) = export {
        let path = expand_tilde(file);
        let format = format.unwrap_or_else(|| ExportFormat::from_path(&path));
        controller.export(&mut view, &PdfRenderer, format, &path, *force)?;
    }

    Ok(())
}
