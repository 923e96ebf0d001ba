#![forbid(unsafe_code)]

mod cmd;
mod identity;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use encosta_core::model::Status;
use output::OutputMode;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "encosta: landslide risk report tracker",
    long_about = None
)]
struct Cli {
    /// Act as this registered user id (skips env and config resolution).
    #[arg(long = "as", value_name = "USER_ID", global = true)]
    caller: Option<String>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Project root holding the .encosta/ data directory.
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// The caller flag as a borrowed id, for identity resolution.
    fn caller_flag(&self) -> Option<&str> {
        self.caller.as_deref()
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Lifecycle",
        about = "Initialize an encosta project",
        long_about = "Initialize an encosta project in the current directory.",
        after_help = "EXAMPLES:\n    # Initialize a project in the current directory\n    enc init\n\n    # Emit machine-readable output\n    enc init --json"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Submit a new risk report",
        long_about = "Submit a new risk report for a catalog location. The report starts pending.",
        after_help = "EXAMPLES:\n    # Submit a report\n    enc --as p1 report --date 10/05/2024 --time 14:30 --moisture humid --slope steep --location 3\n\n    # Emit machine-readable output\n    enc --as p1 report --date 10/05/2024 --moisture dry --slope flat --location 1 --json"
    )]
    Report(cmd::report::ReportArgs),

    #[command(
        next_help_heading = "Read",
        about = "List risk reports",
        long_about = "List risk reports. Reporters see their own submissions; reviewing roles see everything.",
        after_help = "EXAMPLES:\n    # List the reports you may see\n    enc --as p1 list\n\n    # List every report (reviewing roles only)\n    enc --as a1 list --all\n\n    # Emit machine-readable output\n    enc --as a1 list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Confirm a pending report",
        long_about = "Confirm a pending report. Only admin and reviewer identities may confirm.",
        after_help = "EXAMPLES:\n    # Confirm a report\n    enc --as a1 confirm 1714763897000\n\n    # Emit machine-readable output\n    enc --as a1 confirm 1714763897000 --json"
    )]
    Confirm(cmd::review::ReviewArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Cancel a pending report",
        long_about = "Cancel a pending report. Only admin and reviewer identities may cancel.",
        after_help = "EXAMPLES:\n    # Cancel a report\n    enc --as a1 cancel 1714763897000\n\n    # Emit machine-readable output\n    enc --as a1 cancel 1714763897000 --json"
    )]
    Cancel(cmd::review::ReviewArgs),

    #[command(
        next_help_heading = "Read",
        about = "List the reporting location catalog",
        long_about = "List the locations reports can be filed against. Needs no identity.",
        after_help = "EXAMPLES:\n    # Show the catalog\n    enc locations\n\n    # Emit machine-readable output\n    enc locations --json"
    )]
    Locations,

    #[command(next_help_heading = "Accounts", about = "Manage registered users")]
    User {
        #[command(subcommand)]
        command: UserCommand,
    },

    #[command(
        next_help_heading = "Project Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    enc completions bash\n\n    # Generate zsh completions\n    enc completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    #[command(
        about = "Register a user",
        after_help = "EXAMPLES:\n    # Register an admin\n    enc user add --id a1 --name \"Ana\" --email ana@example.com --role admin"
    )]
    Add(cmd::user::AddArgs),

    #[command(
        about = "List registered users (reviewing roles only)",
        after_help = "EXAMPLES:\n    # List users\n    enc --as a1 user list"
    )]
    List,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ENCOSTA_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "encosta=debug,info"
        } else {
            "encosta=info,warn"
        })
    });

    let format = env::var("ENCOSTA_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let project_root = match cli.root.clone() {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let output = output::resolve_output_mode(cli.format, cli.json);

    match cli.command {
        Commands::Init(ref args) => cmd::init::run_init(args, &project_root, output, cli.quiet),
        Commands::Report(ref args) => {
            cmd::report::run_report(args, cli.caller_flag(), output, &project_root)
        }
        Commands::List(ref args) => {
            cmd::list::run_list(args, cli.caller_flag(), output, &project_root)
        }
        Commands::Confirm(ref args) => cmd::review::run_review(
            args,
            Status::Confirmed,
            cli.caller_flag(),
            output,
            &project_root,
        ),
        Commands::Cancel(ref args) => cmd::review::run_review(
            args,
            Status::Cancelled,
            cli.caller_flag(),
            output,
            &project_root,
        ),
        Commands::Locations => cmd::locations::run_locations(output, &project_root),
        Commands::User { ref command } => match command {
            UserCommand::Add(args) => cmd::user::run_add(args, output, &project_root),
            UserCommand::List => cmd::user::run_list(cli.caller_flag(), output, &project_root),
        },
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_flag_parses_before_subcommand() {
        let cli = Cli::parse_from(["enc", "--as", "p1", "list"]);
        assert_eq!(cli.caller_flag(), Some("p1"));
    }

    #[test]
    fn caller_flag_parses_after_subcommand() {
        let cli = Cli::parse_from(["enc", "list", "--as", "p1"]);
        assert_eq!(cli.caller_flag(), Some("p1"));
    }

    #[test]
    fn caller_flag_none_by_default() {
        let cli = Cli::parse_from(["enc", "list"]);
        assert!(cli.caller_flag().is_none());
    }

    #[test]
    fn json_flag_parses_globally() {
        let cli = Cli::parse_from(["enc", "list", "--json"]);
        assert!(cli.json);

        let cli = Cli::parse_from(["enc", "--json", "list"]);
        assert!(cli.json);
    }

    #[test]
    fn format_flag_parses() {
        let cli = Cli::parse_from(["enc", "--format", "text", "list"]);
        assert_eq!(cli.format, Some(OutputMode::Text));
    }

    #[test]
    fn quiet_flag_parses() {
        let cli = Cli::parse_from(["enc", "-q", "init"]);
        assert!(cli.quiet);
    }

    #[test]
    fn root_flag_parses() {
        let cli = Cli::parse_from(["enc", "--root", "/tmp/project", "list"]);
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/project")));
    }

    #[test]
    fn report_subcommand_parses() {
        let cli = Cli::parse_from([
            "enc", "report", "--date", "10/05/2024", "--moisture", "humid", "--slope", "steep",
            "--location", "3",
        ]);
        assert!(matches!(cli.command, Commands::Report(_)));
    }

    #[test]
    fn confirm_and_cancel_take_an_id() {
        let cli = Cli::parse_from(["enc", "confirm", "1714763897000"]);
        match cli.command {
            Commands::Confirm(args) => assert_eq!(args.id, "1714763897000"),
            other => panic!("expected confirm, got {other:?}"),
        }

        let cli = Cli::parse_from(["enc", "cancel", "1714763897000"]);
        assert!(matches!(cli.command, Commands::Cancel(_)));
    }

    #[test]
    fn user_subcommands_parse() {
        let cli = Cli::parse_from([
            "enc", "user", "add", "--id", "a1", "--name", "Ana", "--email", "ana@example.com",
            "--role", "admin",
        ]);
        assert!(matches!(
            cli.command,
            Commands::User {
                command: UserCommand::Add(_)
            }
        ));

        let cli = Cli::parse_from(["enc", "user", "list"]);
        assert!(matches!(
            cli.command,
            Commands::User {
                command: UserCommand::List
            }
        ));
    }

    #[test]
    fn completions_subcommand_parses() {
        let cli = Cli::parse_from(["enc", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Commands::Completions(cmd::completions::CompletionsArgs {
                shell: clap_complete::Shell::Bash,
            })
        ));
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["enc", "init"],
            vec![
                "enc",
                "report",
                "--date",
                "10/05/2024",
                "--moisture",
                "humid",
                "--slope",
                "steep",
                "--location",
                "3",
            ],
            vec!["enc", "list"],
            vec!["enc", "confirm", "x"],
            vec!["enc", "cancel", "x"],
            vec!["enc", "locations"],
            vec![
                "enc",
                "user",
                "add",
                "--id",
                "a1",
                "--name",
                "n",
                "--email",
                "e@example.com",
                "--role",
                "admin",
            ],
            vec!["enc", "user", "list"],
            vec!["enc", "completions", "bash"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(
                result.is_ok(),
                "Failed to parse {:?}: {:?}",
                args,
                result.err()
            );
        }
    }

    #[test]
    fn locations_works_without_caller() {
        let cli = Cli::parse_from(["enc", "locations"]);
        assert!(cli.caller_flag().is_none());
        assert!(matches!(cli.command, Commands::Locations));
    }
}
