/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

pub fn dim(value: &str) -> String {
    format!("{GREY}{value}{RESET}")
}

/// Editor status tag: unsaved changes in yellow, a draft in cyan.
pub fn status_tag(dirty: bool, draft: bool) -> String {
    match (dirty, draft) {
        (true, _) => format!("{YELLOW}[unsaved]{RESET}"),
        (false, true) => format!("{CYAN}[draft]{RESET}"),
        (false, false) => format!("{GREEN}[saved]{RESET}"),
    }
}
