use std::{error::Error, io::Write};

use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::{Engine, EngineError};
use migration::MigratorTrait;
use sea_orm::Database;

type CliResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

#[derive(Parser, Debug)]
#[command(name = "predictions_admin")]
#[command(about = "Admin utilities for the predictions service (accounts, events)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./predictions.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Event(EventCmd),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Register an account, prompting for its password.
    Create(UserCreateArgs),
    /// Grant superuser rights.
    Promote(EmailArg),
    /// Revoke superuser rights.
    Demote(EmailArg),
    Activate(EmailArg),
    /// Block logins without deleting the account.
    Deactivate(EmailArg),
    /// Delete the account and its predictions.
    Delete(EmailArg),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    superuser: bool,
}

#[derive(Args, Debug)]
struct EmailArg {
    #[arg(long)]
    email: String,
}

#[derive(Args, Debug)]
struct EventCmd {
    #[command(subcommand)]
    command: EventCommand,
}

#[derive(Subcommand, Debug)]
enum EventCommand {
    /// Print every event, `created` ones included.
    List,
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> CliResult<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn notice(message: &str) -> CliResult<()> {
    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(message),
        Print("\r\n")
    )?;
    Ok(())
}

/// Read a line without echoing it, printing `*` for each character.
fn read_secret(prompt: &str) -> CliResult<String> {
    let _raw = RawModeGuard::enter()?;
    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(prompt)
    )?;
    out.flush()?;

    let mut secret = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        match code {
            KeyCode::Enter => break,
            KeyCode::Backspace => {
                if secret.pop().is_some() {
                    execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
                }
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                execute!(out, Print("\r\n"))?;
                return Err("interrupted".into());
            }
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
                secret.push(ch);
                execute!(out, Print("*"))?;
            }
            _ => continue,
        }
        out.flush()?;
    }
    execute!(out, Print("\r\n"))?;
    out.flush()?;

    Ok(secret)
}

fn ask_new_password() -> CliResult<String> {
    for _ in 0..3 {
        let password = read_secret("Password: ")?;
        if password.is_empty() {
            notice("Password must not be empty.")?;
            continue;
        }
        if read_secret("Confirm password: ")? == password {
            return Ok(password);
        }
        notice("Passwords do not match. Try again.")?;
    }
    Err("too many attempts".into())
}

async fn connect_engine(database_url: &str) -> CliResult<Engine> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Engine::builder().database(db).build().await?)
}

enum Flag {
    Superuser(bool),
    Active(bool),
}

async fn set_flag(engine: &Engine, email: &str, flag: Flag) -> CliResult<()> {
    let user = engine.user_by_email(email).await?;
    let user = match flag {
        Flag::Superuser(value) => engine.set_superuser(user.id, value).await?,
        Flag::Active(value) => engine.set_active(user.id, value).await?,
    };
    println!(
        "{}: superuser={} active={}",
        user.email, user.is_superuser, user.is_active
    );
    Ok(())
}

async fn run_user(engine: &Engine, command: UserCommand) -> CliResult<()> {
    match command {
        UserCommand::Create(args) => {
            let password = ask_new_password()?;
            let mut user = engine.register(&args.email, &password).await?;
            if args.superuser {
                user = engine.set_superuser(user.id, true).await?;
            }
            println!(
                "created user: {} ({}){}",
                user.email,
                user.id,
                if user.is_superuser { " [superuser]" } else { "" }
            );
            Ok(())
        }
        UserCommand::Delete(EmailArg { email }) => {
            let user = engine.user_by_email(&email).await?;
            engine.delete_user(user.id).await?;
            println!("deleted user: {}", user.email);
            Ok(())
        }
        UserCommand::Promote(EmailArg { email }) => {
            set_flag(engine, &email, Flag::Superuser(true)).await
        }
        UserCommand::Demote(EmailArg { email }) => {
            set_flag(engine, &email, Flag::Superuser(false)).await
        }
        UserCommand::Activate(EmailArg { email }) => {
            set_flag(engine, &email, Flag::Active(true)).await
        }
        UserCommand::Deactivate(EmailArg { email }) => {
            set_flag(engine, &email, Flag::Active(false)).await
        }
    }
}

async fn run_event(engine: &Engine, command: EventCommand) -> CliResult<()> {
    match command {
        EventCommand::List => {
            let mut offset = 0;
            loop {
                let page = engine.events(true, offset, 100).await?;
                if page.is_empty() {
                    break;
                }
                for event in &page {
                    println!(
                        "{:>5}  {:<10} {}  {} ({} matches)",
                        event.id,
                        event.status,
                        event.deadline.format("%Y-%m-%d %H:%M"),
                        event.name,
                        event.matches.len()
                    );
                }
                offset += page.len() as u64;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    let engine = connect_engine(&cli.database_url).await?;

    let result = match cli.command {
        Command::User(User { command }) => run_user(&engine, command).await,
        Command::Event(EventCmd { command }) => run_event(&engine, command).await,
    };

    if let Err(err) = result {
        match err.downcast_ref::<EngineError>() {
            Some(EngineError::UserNotFound(_)) | Some(EngineError::UserAlreadyExists(_)) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
            _ => return Err(err),
        }
    }

    Ok(())
}
