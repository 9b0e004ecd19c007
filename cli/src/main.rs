use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inventra_client::api::{Outcome, RequestDispatcher};
use inventra_client::auth::{FileSessionStore, SessionManager, SessionStore};
use inventra_client::config::ApiConfig;
use inventra_client::model::UserCreate;
use inventra_client::services::{
    AdminUserService, AlarmService, ChatService, DashboardService, DetailReportService,
    FileManagerService, UserService,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod logger;

#[derive(Parser)]
#[command(name = "inventra", about = "Terminal client for the Inventra dashboard API")]
struct Cli {
    /// API base URL; falls back to the INVENTRA_API_URL environment variable
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and persist the session credential
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// End the session and clear the stored credential
    Logout,
    /// Exchange the stored credential for a fresh one
    Refresh,
    /// Show whether a session credential is stored
    Status,
    /// Register a new account
    Register {
        username: String,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show the current account profile
    Profile,
    /// Ask the chat assistant a question about the dashboard data
    Ask { question: String },
    /// Manage imported tables
    #[command(subcommand)]
    Tables(TablesCommand),
    /// Manage threshold alarms
    #[command(subcommand)]
    Alarms(AlarmsCommand),
    /// Administer dashboard accounts
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Dashboard overview endpoints
    #[command(subcommand)]
    Dashboard(DashboardCommand),
    /// Drill-down inventory reports
    #[command(subcommand)]
    Report(ReportCommand),
}

#[derive(Subcommand)]
enum TablesCommand {
    /// List all imported tables
    List,
    /// Show column metadata for a table
    Info { name: String },
    /// Dump the rows of a table
    Data { name: String },
    /// Drop a table
    Delete { name: String },
    /// Import a CSV file as a new table
    UploadCsv {
        file: PathBuf,
        #[arg(long)]
        table: String,
    },
    /// Import an Excel workbook as a new table
    UploadExcel {
        file: PathBuf,
        #[arg(long)]
        table: String,
    },
    /// Replace or append to an existing table from a CSV file
    Update {
        name: String,
        file: PathBuf,
        #[arg(long)]
        replace: bool,
    },
}

#[derive(Subcommand)]
enum AlarmsCommand {
    List,
    /// Create an alarm from a natural-language description
    Create { description: String },
    Delete { id: i64 },
    /// Evaluate the alarms configured for a table
    Check { table: String },
}

#[derive(Subcommand)]
enum AdminCommand {
    /// List all accounts with usage metrics
    List,
    /// Show one account in full
    Show { id: i64 },
    /// Grant the admin role to an account
    Promote { id: i64 },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum DashboardCommand {
    Schema,
    Analysis,
}

#[derive(Subcommand)]
enum ReportCommand {
    InventorySummary,
    Turnover,
    Restock,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    logger::setup_logger(cli.verbose)?;

    let config = match &cli.api_url {
        Some(url) => ApiConfig::new(url.clone()),
        None => ApiConfig::from_env().context("no API base URL configured")?,
    };

    let store: Arc<dyn SessionStore> = Arc::new(
        FileSessionStore::default_location().context("no user config directory available")?,
    );
    let dispatcher = Arc::new(
        RequestDispatcher::new(reqwest::Client::new(), store.clone()).with_auth_expired_hook(
            Arc::new(|| {
                eprintln!("Your session has expired. Please run `inventra login` again.");
            }),
        ),
    );
    let session = SessionManager::new(dispatcher.clone(), store, config.clone());

    match cli.command {
        Command::Login { username, password } => {
            if session.login(&username, &password).await {
                println!("Logged in as {username}.");
            } else {
                bail!("Login failed.");
            }
        }
        Command::Logout => {
            let acknowledged = session.logout().await;
            if acknowledged {
                println!("Logged out.");
            } else {
                println!("Session cleared locally; the server did not acknowledge the logout.");
            }
        }
        Command::Refresh => {
            if session.refresh().await {
                println!("Session refreshed.");
            } else {
                bail!("Refresh failed.");
            }
        }
        Command::Status => {
            if session.is_authenticated() {
                println!("Authenticated (credential stored).");
            } else {
                println!("Anonymous (no credential stored).");
            }
        }
        Command::Register {
            username,
            full_name,
            email,
            password,
        } => {
            let service = UserService::new(dispatcher, config);
            render(
                service
                    .register(&UserCreate {
                        full_name,
                        username,
                        email,
                        password,
                    })
                    .await,
            )?;
        }
        Command::Profile => {
            let service = UserService::new(dispatcher, config);
            render(service.my_profile().await)?;
        }
        Command::Ask { question } => {
            let service = ChatService::new(dispatcher, config);
            render(service.ask_question(&question).await)?;
        }
        Command::Tables(command) => {
            let service = FileManagerService::new(dispatcher, config);
            match command {
                TablesCommand::List => render(service.tables().await)?,
                TablesCommand::Info { name } => render(service.table_info(&name).await)?,
                TablesCommand::Data { name } => render(service.table_data(&name).await)?,
                TablesCommand::Delete { name } => render(service.delete_table(&name).await)?,
                TablesCommand::UploadCsv { file, table } => {
                    let (file_name, bytes) = read_upload(&file)?;
                    render(service.upload_csv(&table, &file_name, bytes).await)?;
                }
                TablesCommand::UploadExcel { file, table } => {
                    let (file_name, bytes) = read_upload(&file)?;
                    render(service.upload_excel(&table, &file_name, bytes).await)?;
                }
                TablesCommand::Update {
                    name,
                    file,
                    replace,
                } => {
                    let (file_name, bytes) = read_upload(&file)?;
                    render(service.update_table(&name, &file_name, bytes, replace).await)?;
                }
            }
        }
        Command::Alarms(command) => {
            let service = AlarmService::new(dispatcher, config);
            match command {
                AlarmsCommand::List => render(service.list().await)?,
                AlarmsCommand::Create { description } => render(service.create(&description).await)?,
                AlarmsCommand::Delete { id } => render(service.delete(id).await)?,
                AlarmsCommand::Check { table } => render(service.check(&table).await)?,
            }
        }
        Command::Admin(command) => {
            let service = AdminUserService::new(dispatcher, config);
            match command {
                AdminCommand::List => render(service.list_all().await)?,
                AdminCommand::Show { id } => render(service.details(id).await)?,
                AdminCommand::Promote { id } => render(service.promote_to_admin(id).await)?,
                AdminCommand::Delete { id } => render(service.delete(id).await)?,
            }
        }
        Command::Dashboard(command) => {
            let service = DashboardService::new(dispatcher, config);
            match command {
                DashboardCommand::Schema => render(service.schema().await)?,
                DashboardCommand::Analysis => render(service.analysis().await)?,
            }
        }
        Command::Report(command) => {
            let service = DetailReportService::new(dispatcher, config);
            match command {
                ReportCommand::InventorySummary => render(service.inventory_summary().await)?,
                ReportCommand::Turnover => render(service.turnover_analysis_by_region().await)?,
                ReportCommand::Restock => render(service.restock_recommendations().await)?,
            }
        }
    }

    Ok(())
}

/// Print a successful payload as pretty JSON on stdout; turn any failure
/// into the user-facing message from the outcome.
fn render<T: Serialize>(outcome: Outcome<T>) -> Result<()> {
    match outcome {
        Outcome::Success(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        other => {
            bail!(
                "{}",
                other
                    .user_message()
                    .unwrap_or_else(|| "Request failed.".to_string())
            )
        }
    }
}

fn read_upload(file: &Path) -> Result<(String, Vec<u8>)> {
    let bytes =
        std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.bin".to_string());
    Ok((file_name, bytes))
}
