pub mod api_client;
mod commands;
pub mod error;
mod utils;


use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::controllers::SortDirection;
use crate::models::{AccountSort, ActivitySort, ParticipantSort};
use api_client::ApiClient;
use commands::PageParams;
use commands::activity::ActivityQuery;
use commands::participant::ParticipantQuery;
use error::CliResult;
use utils::{StdinConfirm, parse_date};

#[derive(Parser)]
#[command(name = "ahub")]
#[command(author, version, about = "Activity hub CLI", long_about = None)]
pub struct Cli {
    /// Override the API URL (default: AHUB_API_URL env or http://localhost:8080/api)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session file (default: $XDG_DATA_HOME/activity-hub/session.json)
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and out
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Activity management commands
    Activity {
        #[command(subcommand)]
        command: ActivityCommands,
    },
    /// Participants of an activity
    Participant {
        #[command(subcommand)]
        command: ParticipantCommands,
    },
    /// Account listing
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },
}

#[derive(Subcommand)]
enum AuthCommands {
    /// Log in with credentials or an existing token
    Login {
        /// Access token issued elsewhere
        #[arg(long, conflicts_with_all = ["email", "password"])]
        token: Option<String>,
        #[arg(long, requires = "password")]
        email: Option<String>,
        #[arg(long, requires = "email")]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in account
    Whoami {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

/// Paging flags shared by the list commands
#[derive(Args, Debug, Clone, Copy)]
struct PageArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
    /// Rows per page
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    size: u32,
    /// Sort direction
    #[arg(long, value_enum, default_value_t = SortDirection::Desc)]
    direction: SortDirection,
}

impl From<PageArgs> for PageParams {
    fn from(args: PageArgs) -> Self {
        Self {
            page: args.page,
            size: args.size,
            direction: args.direction,
        }
    }
}

#[derive(Subcommand)]
enum ActivityCommands {
    /// List activities
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Sort field
        #[arg(long, value_enum)]
        sort: Option<ActivitySort>,
        /// Free-text search
        #[arg(long)]
        search: Option<String>,
        /// Activity status (e.g. IN_FUTURE, ONGOING, ENDED)
        #[arg(long)]
        status: Option<String>,
        /// Starting on or after (YYYY-MM-DD or RFC 3339)
        #[arg(long, value_parser = parse_date)]
        from: Option<DateTime<Utc>>,
        /// Ending on or before (YYYY-MM-DD or RFC 3339)
        #[arg(long, value_parser = parse_date)]
        to: Option<DateTime<Utc>>,
        /// Only approved activities
        #[arg(long)]
        approved: bool,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Create an activity from a JSON file
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Update an activity from a JSON file
    Update {
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete an activity
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Change the status of an activity
    Status { id: String, status: String },
}

#[derive(Subcommand)]
enum ParticipantCommands {
    /// List participants of an activity
    List {
        activity_id: String,
        #[command(flatten)]
        page: PageArgs,
        /// Sort field
        #[arg(long, value_enum)]
        sort: Option<ParticipantSort>,
        #[arg(long)]
        search: Option<String>,
        /// PARTICIPANT or CONTRIBUTOR
        #[arg(long)]
        role: Option<String>,
        /// Only verified (true) or unverified (false) participants
        #[arg(long)]
        verified: Option<bool>,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Verify a participant and show the refreshed list
    Verify {
        activity_id: String,
        participant_id: String,
        #[command(flatten)]
        page: PageArgs,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Subcommand)]
enum AccountCommands {
    /// List accounts
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Sort field
        #[arg(long, value_enum)]
        sort: Option<AccountSort>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        search: Option<String>,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

/// Logs go to stderr so table and JSON output stay clean on stdout.
fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "activity_hub=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

pub async fn run() -> miette::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        // Show help when no command provided
        let _ = Cli::parse_from(["ahub", "--help"]);
        return Ok(());
    };

    let api_client = ApiClient::new(cli.api_url, cli.session_file)?;
    let output = dispatch(&api_client, command).await?;
    println!("{}", output);
    Ok(())
}

async fn dispatch(api_client: &ApiClient, command: Commands) -> CliResult<String> {
    match command {
        Commands::Auth { command } => match command {
            AuthCommands::Login {
                token: Some(token), ..
            } => commands::auth::login_with_token(api_client, &token),
            AuthCommands::Login {
                email: Some(email),
                password: Some(password),
                ..
            } => commands::auth::login(api_client, &email, &password).await,
            AuthCommands::Login { .. } => Err(error::CliError::InvalidInput {
                message: "pass either --token or --email with --password".to_string(),
            }),
            AuthCommands::Logout => commands::auth::logout(api_client),
            AuthCommands::Whoami { format } => commands::auth::whoami(api_client, &format),
        },
        Commands::Activity { command } => match command {
            ActivityCommands::List {
                page,
                sort,
                search,
                status,
                from,
                to,
                approved,
                format,
            } => {
                let query = ActivityQuery {
                    search,
                    status,
                    from,
                    to,
                    approved,
                    sort,
                };
                commands::activity::list_activities(api_client, query, page.into(), &format).await
            }
            ActivityCommands::Create { file } => {
                commands::activity::create_activity(api_client, &file).await
            }
            ActivityCommands::Update { id, file } => {
                commands::activity::update_activity(api_client, &id, &file).await
            }
            ActivityCommands::Delete { id, force } => {
                commands::activity::delete_activity(api_client, &id, force, StdinConfirm).await
            }
            ActivityCommands::Status { id, status } => {
                commands::activity::change_status(api_client, &id, &status).await
            }
        },
        Commands::Participant { command } => match command {
            ParticipantCommands::List {
                activity_id,
                page,
                sort,
                search,
                role,
                verified,
                format,
            } => {
                let query = ParticipantQuery {
                    search,
                    role,
                    verified,
                    sort,
                };
                commands::participant::list_participants(
                    api_client,
                    &activity_id,
                    query,
                    page.into(),
                    &format,
                )
                .await
            }
            ParticipantCommands::Verify {
                activity_id,
                participant_id,
                page,
                format,
            } => {
                commands::participant::verify_participant(
                    api_client,
                    &activity_id,
                    &participant_id,
                    page.into(),
                    &format,
                )
                .await
            }
        },
        Commands::Account { command } => match command {
            AccountCommands::List {
                page,
                sort,
                role,
                search,
                format,
            } => {
                commands::account::list_accounts(api_client, role, search, sort, page.into(), &format)
                    .await
            }
        },
    }
}
