use anyhow::Context;
use chrono::{NaiveDate, Utc};
use chronos_ledger::{
    count_working_days, utils::parse_iso_date, SessionContext, UserId, VacationRequest,
    VacationRequestId,
};
use clap::{Args, Parser, Subcommand};
use std::fmt::Write as _;
use std::sync::Arc;

use crate::{
    api::{ApiClient, LoginRequest},
    config::ClientConfig,
    state::SessionStore,
    store::VacationStore,
    views::{AdminViewModel, EmployeeViewModel, ViewError},
};

#[derive(Parser, Debug)]
#[command(
    name = "chronos",
    about = "Submit and decide vacation requests against a Chronos server",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session locally
    Login(LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show the signed-in user and session state
    Whoami,
    /// Count Monday-to-Friday days in an inclusive range
    WorkingDays {
        #[arg(value_parser = parse_date)]
        start: NaiveDate,
        #[arg(value_parser = parse_date)]
        end: NaiveDate,
    },
    /// Show your vacation balance
    Balance,
    /// Your own vacation requests
    Requests {
        #[command(subcommand)]
        command: RequestsCommand,
    },
    /// Decide on requests assigned to you
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
    /// List employees visible to an administrator
    Employees,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "CHRONOS_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Subcommand, Debug)]
pub enum RequestsCommand {
    List,
    Submit {
        /// First day off (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        start: NaiveDate,
        /// Last day off (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        end: NaiveDate,
        /// Administrator to send the request to (defaults to your own)
        #[arg(long)]
        administrator: Option<i64>,
    },
    Cancel {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    Board,
    Approve { id: i64 },
    Reject { id: i64 },
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_iso_date(raw).ok_or_else(|| format!("failed to parse '{raw}' as YYYY-MM-DD"))
}

pub async fn run(cli: Cli, config: ClientConfig) -> anyhow::Result<()> {
    let session_store = SessionStore::new(&config.session_path);
    let client = ApiClient::new(&config);

    match cli.command {
        Command::Login(args) => {
            let session = client
                .login(LoginRequest {
                    email: args.email,
                    password: args.password,
                })
                .await
                .map_err(ViewError::from)?;
            println!(
                "Signed in as {} ({}); session valid until {}",
                session_label(&session),
                session.role,
                session.expires_at
            );
        }
        Command::Logout => {
            client.logout();
            println!("Signed out");
        }
        Command::Whoami => {
            let session = require_session(&session_store)?;
            println!("{}", render_session(&session));
        }
        Command::WorkingDays { start, end } => {
            println!("{}", count_working_days(start, end));
        }
        Command::Balance => {
            let mut view = employee_view(client, &session_store, &config)?;
            view.load().await?;
            let balance = view.balance()?;
            println!(
                "Remaining: {} ({} used)",
                balance,
                balance.days_used()
            );
        }
        Command::Requests { command } => {
            let mut view = employee_view(client, &session_store, &config)?;
            match command {
                RequestsCommand::List => {
                    view.load().await?;
                    print!("{}", render_requests(view.requests()));
                }
                RequestsCommand::Submit {
                    start,
                    end,
                    administrator,
                } => {
                    let created = view
                        .submit(start, end, administrator.map(UserId::new))
                        .await?;
                    println!(
                        "Submitted request {} for {} working day(s)",
                        created.id,
                        created.working_days()
                    );
                }
                RequestsCommand::Cancel { id } => {
                    let updated = view.cancel(VacationRequestId::new(id)).await?;
                    println!("Request {} is now {}", updated.id, updated.status);
                }
            }
        }
        Command::Admin { command } => {
            let mut view = admin_view(client, &session_store)?;
            view.refresh().await?;
            match command {
                AdminCommand::Board => print!("{}", render_board(&view)),
                AdminCommand::Approve { id } => {
                    let updated = view.approve(VacationRequestId::new(id)).await?;
                    println!("Request {} is now {}", updated.id, updated.status);
                    print!("{}", render_board(&view));
                }
                AdminCommand::Reject { id } => {
                    let updated = view.reject(VacationRequestId::new(id)).await?;
                    println!("Request {} is now {}", updated.id, updated.status);
                    print!("{}", render_board(&view));
                }
            }
        }
        Command::Employees => {
            let view = admin_view(client, &session_store)?;
            for user in view.employees().await? {
                let balance = user
                    .vacation_balance()
                    .map(|b| b.to_string())
                    .unwrap_or_else(|_| "no balance".to_string());
                println!("{:>6}  {:<30}  {}", user.id, user.display_name(), balance);
            }
        }
    }
    Ok(())
}

fn require_session(store: &SessionStore) -> anyhow::Result<SessionContext> {
    let now = Utc::now();
    let session = store
        .load_valid(now)
        .with_context(|| format!("reading {}", store.path().display()))?
        .map_err(ViewError::Session)?;
    if session.expires_soon(now) {
        tracing::warn!(expires_at = %session.expires_at, "Session expires soon; sign in again to extend it");
    }
    Ok(session)
}

fn signed_in_store(client: ApiClient, session: SessionContext) -> Arc<dyn VacationStore> {
    Arc::new(client.with_session(session))
}

fn employee_view(
    client: ApiClient,
    store: &SessionStore,
    config: &ClientConfig,
) -> anyhow::Result<EmployeeViewModel> {
    let session = require_session(store)?;
    let view = EmployeeViewModel::new(
        signed_in_store(client, session.clone()),
        session,
        config.time_zone,
    )?;
    Ok(view)
}

fn admin_view(client: ApiClient, store: &SessionStore) -> anyhow::Result<AdminViewModel> {
    let session = require_session(store)?;
    Ok(AdminViewModel::new(
        signed_in_store(client, session.clone()),
        session,
    )?)
}

fn session_label(session: &SessionContext) -> String {
    session
        .name
        .clone()
        .or_else(|| session.email.clone())
        .unwrap_or_else(|| format!("user #{}", session.user_id))
}

pub fn render_session(session: &SessionContext) -> String {
    let now = Utc::now();
    let mut out = format!(
        "{} <{}>\nrole: {}\nuser id: {}\nsession: {} until {}",
        session_label(session),
        session.email.as_deref().unwrap_or("-"),
        session.role,
        session.user_id,
        session.status(now),
        session.expires_at
    );
    if session.expires_soon(now) {
        out.push_str(" (expires soon)");
    }
    out
}

pub fn render_requests(requests: &[VacationRequest]) -> String {
    if requests.is_empty() {
        return "No vacation requests\n".to_string();
    }
    let mut out = String::new();
    for request in requests {
        let _ = write!(
            out,
            "{:>6}  {} .. {}  {:>3}d  {:<11}",
            request.id,
            request.start_date,
            request.end_date,
            request.working_days(),
            request.status
        );
        if let Some(pdf) = request.approval_document() {
            let _ = write!(out, "  {}", pdf);
        }
        out.push('\n');
    }
    out
}

pub fn render_board(view: &AdminViewModel) -> String {
    let board = view.board();
    let mut out = String::from("Awaiting decision\n");
    if board.actionable().is_empty() {
        out.push_str("  (none)\n");
    }
    for request in board.actionable() {
        let balance = view
            .balance_of(request.employee_id)
            .map(|b| format!("{} left", b.remaining()))
            .unwrap_or_else(|| "balance unknown".to_string());
        let _ = writeln!(
            out,
            "{:>6}  {:<24}  {} .. {}  {:>3}d  {}",
            request.id,
            view.display_name(request.employee_id),
            request.start_date,
            request.end_date,
            request.working_days(),
            balance
        );
    }
    out.push_str("Processed\n");
    if board.processed().is_empty() {
        out.push_str("  (none)\n");
    }
    for request in board.processed() {
        let _ = writeln!(
            out,
            "{:>6}  {:<24}  {} .. {}  {}",
            request.id,
            view.display_name(request.employee_id),
            request.start_date,
            request.end_date,
            request.status
        );
    }
    out
}
