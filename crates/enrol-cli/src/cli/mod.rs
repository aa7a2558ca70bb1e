//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "enrol",
    bin_name = "enrol",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{270e} Student registration form, validated",
    long_about = "Enrol validates student registration entries field by field, \
                  submits complete forms, and listens for live-reload signals \
                  from a local dev server.",
    after_help = "EXAMPLES:\n\
        \x20 enrol register --name 'Ada Lovelace' --id S1 --email ada@x.io \\\n\
        \x20      --dob 1815-12-10 --gender Female --course Maths\n\
        \x20 enrol register --interactive\n\
        \x20 enrol check email ada@x.io\n\
        \x20 enrol watch --url http://127.0.0.1:5500/index.html",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fill in and submit a registration.
    #[command(
        visible_alias = "r",
        about = "Submit a student registration",
        after_help = "EXAMPLES:\n\
            \x20 enrol register --name 'Grace Hopper' --id S12345 --email grace@navy.mil \\\n\
            \x20      --dob 1906-12-09 --gender Female --course 'Computer Science'\n\
            \x20 enrol register -i\n\
            \x20 enrol --output-format json register ..."
    )]
    Register(RegisterArgs),

    /// Run a single field rule.
    #[command(
        visible_alias = "c",
        about = "Validate one field value",
        after_help = "EXAMPLES:\n\
            \x20 enrol check name 'Al'\n\
            \x20 enrol check studentId S-1\n\
            \x20 enrol check dob 2999-01-01"
    )]
    Check(CheckArgs),

    /// Listen for live-reload signals.
    #[command(
        visible_alias = "w",
        about = "Listen to a live-reload dev server",
        after_help = "EXAMPLES:\n\
            \x20 enrol watch\n\
            \x20 enrol watch --url http://localhost:8080/form.html --stylesheet style.css"
    )]
    Watch(WatchArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 enrol completions bash > ~/.local/share/bash-completion/completions/enrol\n\
            \x20 enrol completions zsh  > ~/.zfunc/_enrol\n\
            \x20 enrol completions fish > ~/.config/fish/completions/enrol.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Enrol configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 enrol config get form.banner_hide_ms\n\
            \x20 enrol config list\n\
            \x20 enrol config path"
    )]
    Config(ConfigCommands),
}

// ── register ──────────────────────────────────────────────────────────────────

/// Arguments for `enrol register`.
///
/// Omitted fields are submitted empty, so the matching rule reports them.
#[derive(Debug, Default, Args)]
pub struct RegisterArgs {
    #[arg(long = "name", value_name = "NAME", help = "Student name")]
    pub name: Option<String>,

    #[arg(long = "id", value_name = "ID", help = "Student ID (letters and digits)")]
    pub student_id: Option<String>,

    #[arg(long, value_name = "EMAIL", help = "Email address")]
    pub email: Option<String>,

    #[arg(long, value_name = "PHONE", help = "Phone number (optional)")]
    pub phone: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Date of birth")]
    pub dob: Option<String>,

    #[arg(long, value_name = "GENDER", help = "Gender")]
    pub gender: Option<String>,

    #[arg(long, value_name = "COURSE", help = "Course enrolled")]
    pub course: Option<String>,

    /// Prompt for each field, validating as you type.
    #[arg(
        short = 'i',
        long = "interactive",
        help = "Prompt for each field",
        conflicts_with_all = ["name", "student_id", "email", "phone", "dob", "gender", "course"]
    )]
    pub interactive: bool,
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `enrol check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Field to check, e.g. `name`, `studentId`, `email`, `dob`.
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// Value to run the rule against.
    #[arg(value_name = "VALUE", default_value = "", allow_hyphen_values = true)]
    pub value: String,
}

// ── watch ─────────────────────────────────────────────────────────────────────

/// Arguments for `enrol watch`.
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Page served by the dev server; the socket lives at `<page>/ws`.
    #[arg(long, value_name = "URL", help = "Page URL (defaults to live_reload.url)")]
    pub url: Option<String>,

    /// Stylesheet hrefs to re-stamp on `refreshcss`.
    #[arg(
        short = 's',
        long = "stylesheet",
        value_name = "HREF",
        help = "Stylesheet href to refresh (repeatable)"
    )]
    pub stylesheets: Vec<String>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `enrol completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `enrol config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `form.banner_hide_ms`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
