use crate::export::ExportFormat;
use crate::models::{ReportId, StudentId, TeacherId};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for spot
/// Client for the SPOT weekly student report service
#[derive(Parser)]
#[command(
    name = "spot",
    version = env!("CARGO_PKG_VERSION"),
    about = "Weekly student reports: teachers write them, parents look them up by student code",
    long_about = None
)]
pub struct Cli {
    /// Override the configuration directory (useful for tests or several accounts)
    #[arg(
        global = true,
        long = "config-dir",
        env = "SPOT_CONFIG_DIR",
        value_name = "DIR"
    )]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration directory and file
    Init {
        /// Backend base URL written to the new file
        #[arg(long = "api-url", value_name = "URL")]
        api_url: Option<String>,

        /// Replace an existing configuration file with the defaults
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "migrate",
            help = "Add missing fields to the configuration file with their defaults"
        )]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,

        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show the logged-in account
    Whoami,

    /// Manage your students (teacher)
    Students {
        #[command(subcommand)]
        action: StudentsCmd,
    },

    /// List, show or delete a student's reports (teacher)
    Reports {
        #[command(subcommand)]
        action: ReportsCmd,
    },

    /// Interactive report editor for one student (teacher)
    Report {
        /// Student code
        #[arg(long, value_name = "CODE")]
        student: String,
    },

    /// List the teachers parents can query
    Teachers,

    /// Look up a student's reports by code (public)
    Query {
        #[arg(long, value_name = "ID")]
        teacher: TeacherId,

        /// Student code given by the teacher
        #[arg(long, value_name = "CODE")]
        code: String,

        /// Show this report identifier instead of the latest one
        #[arg(long, value_name = "IDENTIFIER")]
        report: Option<String>,

        /// Write the shown report to FILE
        #[arg(long, value_name = "FILE")]
        export: Option<String>,

        /// Export format; guessed from the file extension when omitted
        #[arg(long, value_enum, requires = "export")]
        format: Option<ExportFormat>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f', requires = "export")]
        force: bool,
    },

    /// Manage teacher accounts (admin)
    Admin {
        #[command(subcommand)]
        action: AdminCmd,
    },
}

#[derive(Subcommand)]
pub enum StudentsCmd {
    /// List students, optionally filtered by name or code
    List {
        #[arg(long, short = 's')]
        search: Option<String>,
    },
    /// Add a student
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
    },
    /// Change a student's name or code
    Edit {
        id: StudentId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        code: Option<String>,
    },
    /// Delete a student and all of their reports
    Del {
        id: StudentId,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ReportsCmd {
    /// Reports of one student
    List {
        /// Student code
        #[arg(long, value_name = "CODE")]
        student: String,
    },
    /// Print one report with its grid
    Show { id: ReportId },
    /// Delete a report
    Del {
        id: ReportId,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum AdminCmd {
    /// List teacher accounts
    List,
    /// Create a teacher account
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        specialty: Option<String>,
        #[arg(long = "avatar-url")]
        avatar_url: Option<String>,
    },
    /// Update a teacher account (the password is never changed here)
    Edit {
        id: TeacherId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        specialty: Option<String>,
        #[arg(long = "avatar-url")]
        avatar_url: Option<String>,
    },
    /// Delete a teacher account
    Del {
        id: TeacherId,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
