
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use client::config::{
    BASE_URL_VAR, CONNECT_TIMEOUT_VAR, ConfigError, REQUEST_TIMEOUT_VAR, SESSION_FILE_VAR, normalize_base_url,
};
use client::net::types::{LogInCredentials, Photo, Role, SignUpForm, Trip};
use client::pages::{driver_detail, log_in, rider_request, sign_up};
use client::{ActionError, ApiError, App, ClientConfig, NavigationError};
use serde::Serialize;
use serde_json::{Value, json};

/// Used when neither `--session-file` nor `RIDESHARE_SESSION_FILE` is set.
const DEFAULT_SESSION_FILE: &str = ".rideshare-session.json";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("failed to read {path}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "rideshare", about = "Ride-sharing API client")]
struct Cli {
    #[arg(long, env = BASE_URL_VAR)]
    base_url: Option<String>,

    #[arg(long, env = SESSION_FILE_VAR)]
    session_file: Option<PathBuf>,

    #[arg(long, env = REQUEST_TIMEOUT_VAR)]
    request_timeout_secs: Option<u64>,

    #[arg(long, env = CONNECT_TIMEOUT_VAR)]
    connect_timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account. Does not log in.
    SignUp(SignUpArgs),
    LogIn {
        username: String,
        #[arg(long)]
        password: String,
    },
    LogOut,
    /// Print the logged-in user, or `null`.
    Whoami,
    /// Navigate to a client route and print the resulting page.
    Open { path: String },
    Trips(TripsCommand),
}

#[derive(Args, Debug)]
struct SignUpArgs {
    username: String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    password: String,
    #[arg(long, help = "Defaults to --password")]
    password_confirm: Option<String>,
    #[arg(long)]
    group: Role,
    #[arg(long)]
    photo: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TripsCommand {
    #[command(subcommand)]
    command: TripsSubcommand,
}

#[derive(Subcommand, Debug)]
enum TripsSubcommand {
    List,
    Get {
        trip_id: String,
    },
    /// Request a ride as the logged-in rider.
    Request {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    Accept {
        trip_id: String,
    },
    Start {
        trip_id: String,
    },
    Complete {
        trip_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    let mut app = App::new(&config)?;

    match cli.command {
        Command::SignUp(args) => run_sign_up(&mut app, args).await,
        Command::LogIn { username, password } => {
            let user = log_in::submit(&mut app, &LogInCredentials { username, password }).await?;
            print_json(&user)
        }
        Command::LogOut => {
            let had_session = app.auth().is_logged_in();
            app.auth().log_out().await;
            print_json(&log_out_report(had_session))
        }
        Command::Whoami => print_json(&app.auth().current_user()),
        Command::Open { path } => {
            let page = app.navigate(&path).await?;
            print_json(page)
        }
        Command::Trips(trips) => run_trips(&mut app, trips).await,
    }
}

fn build_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = normalize_base_url(base_url)?;
    }
    if let Some(secs) = cli.request_timeout_secs {
        config.timeouts.request_secs = secs;
    }
    if let Some(secs) = cli.connect_timeout_secs {
        config.timeouts.connect_secs = secs;
    }
    config.session_file = cli
        .session_file
        .clone()
        .or(config.session_file)
        .or_else(|| Some(PathBuf::from(DEFAULT_SESSION_FILE)));
    Ok(config)
}

async fn run_sign_up(app: &mut App, args: SignUpArgs) -> Result<(), CliError> {
    let photo = match args.photo {
        Some(path) => {
            let bytes = std::fs::read(&path).map_err(|source| CliError::ReadFile { path: path.clone(), source })?;
            let file_name = path.file_name().map_or_else(|| "photo".to_owned(), |n| n.to_string_lossy().into_owned());
            Some(Photo::new(file_name, bytes))
        }
        None => None,
    };
    let form = SignUpForm {
        username: args.username,
        first_name: args.first_name,
        last_name: args.last_name,
        password2: args.password_confirm.unwrap_or_else(|| args.password.clone()),
        password1: args.password,
        group: args.group,
        photo,
    };
    let user = sign_up::submit(app, &form).await?;
    print_json(&user)
}

async fn run_trips(app: &mut App, trips: TripsCommand) -> Result<(), CliError> {
    match trips.command {
        TripsSubcommand::List => print_json(&app.trips().get_trips().await?),
        TripsSubcommand::Get { trip_id } => print_json(&app.trips().get_trip(&trip_id).await?),
        TripsSubcommand::Request { from, to } => print_json(&saved_trip(rider_request::submit(app, &from, &to).await)?),
        TripsSubcommand::Accept { trip_id } => print_json(&saved_trip(driver_detail::accept(app, &trip_id).await)?),
        TripsSubcommand::Start { trip_id } => print_json(&saved_trip(driver_detail::start(app, &trip_id).await)?),
        TripsSubcommand::Complete { trip_id } => {
            print_json(&saved_trip(driver_detail::complete(app, &trip_id).await)?)
        }
    }
}

/// A trip the server stored is printed even if the page reload after it
/// failed. The reload failure is only logged.
fn saved_trip(result: Result<Trip, ActionError>) -> Result<Trip, CliError> {
    match result {
        Ok(trip) => Ok(trip),
        Err(ActionError::TripSaved { trip, source }) => {
            tracing::warn!(trip_id = %trip.id, error = %source, "trip saved; page reload failed");
            Ok(*trip)
        }
        Err(e) => Err(e.into()),
    }
}

fn log_out_report(had_session: bool) -> Value {
    json!({ "logged_out": true, "had_session": had_session })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
