//! Command-line boundary for car shop core.
//!
//! # Responsibility
//! - Parse commands, open the configured database and call observed services.
//! - Print results as JSON on stdout and failures on stderr.
//!
//! # Invariants
//! - No business rules live here; every operation goes through a service.

use carshop_core::{
    car_service, init_from_config, init_stderr_logging, order_service, user_service, Car,
    CarService, CoreConfig, Interceptor, Order, OrderService, Role, SqliteCarRepository,
    SqliteOrderRepository, SqliteUserRepository, User, UserService,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rusqlite::Connection;
use serde_json::Value;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Stderr fallback level: `service_error` records only, no per-call audit.
const STDERR_LOG_LEVEL: &str = "warn";

#[derive(Debug, Parser)]
#[command(name = "carshop", version, about = "Car shop records")]
struct Cli {
    /// TOML config file. Without `[logging] dir`, service errors and
    /// warnings are logged to stderr.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database path (overrides config); `:memory:` for a scratch DB.
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Car records.
    Cars {
        #[command(subcommand)]
        action: CarAction,
    },
    /// Order records.
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// User records.
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Debug, Subcommand)]
enum CarAction {
    List,
    Get { id: i64 },
    Delete { id: i64 },
    /// Filter by brand | condition | price.
    Filter { key: String, value: String },
    Add(CarArgs),
}

#[derive(Debug, Args)]
struct CarArgs {
    #[arg(long)]
    id: Option<i64>,
    #[arg(long)]
    brand: String,
    #[arg(long)]
    model: String,
    #[arg(long)]
    year: i32,
    #[arg(long)]
    price: f64,
    #[arg(long)]
    condition: String,
}

#[derive(Debug, Subcommand)]
enum OrderAction {
    List,
    Get { id: i64 },
    Delete { id: i64 },
    /// Filter by date (YYYY-MM-DD) | status.
    Filter { key: String, value: String },
    Add(OrderArgs),
    /// Replace the status of an order.
    Status { id: i64, status: String },
    /// Mark an order cancelled.
    Cancel { id: i64 },
}

#[derive(Debug, Args)]
struct OrderArgs {
    #[arg(long)]
    id: Option<i64>,
    #[arg(long)]
    user_id: i64,
    #[arg(long)]
    car_id: i64,
    /// Order date, YYYY-MM-DD.
    #[arg(long)]
    date: NaiveDate,
    #[arg(long)]
    status: String,
}

#[derive(Debug, Subcommand)]
enum UserAction {
    List,
    Get { id: i64 },
    Delete { id: i64 },
    /// Filter by name | age | city.
    Filter { key: String, value: String },
    /// Sort ascending by name | age | city.
    Sort { key: String },
    Add(UserArgs),
}

#[derive(Debug, Args)]
struct UserArgs {
    #[arg(long)]
    id: Option<i64>,
    #[arg(long)]
    login: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    age: i32,
    #[arg(long)]
    city: String,
    #[arg(long = "role", value_enum)]
    roles: Vec<RoleArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    Administrator,
    Manager,
    Client,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Administrator => Role::Administrator,
            RoleArg::Manager => Role::Manager,
            RoleArg::Client => Role::Client,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig::default(),
    };
    if let Some(db) = cli.db {
        config.database.path = db;
    }
    config.validate()?;
    if !init_from_config(&config.logging)? {
        init_stderr_logging(STDERR_LOG_LEVEL)?;
    }

    let conn = config.open_database()?;
    let value = dispatch(&conn, cli.command, Interceptor::logging())?;
    Ok(serde_json::to_string_pretty(&value)?)
}

fn dispatch(
    conn: &Connection,
    command: Command,
    interceptor: Interceptor,
) -> Result<Value, Box<dyn Error>> {
    let value = match command {
        Command::Cars { action } => {
            let service = car_service(SqliteCarRepository::try_new(conn)?, interceptor);
            match action {
                CarAction::List => serde_json::to_value(service.get_all()?)?,
                CarAction::Get { id } => serde_json::to_value(service.get_by_id(id)?)?,
                CarAction::Delete { id } => {
                    service.delete(id)?;
                    deleted(id)
                }
                CarAction::Filter { key, value } => {
                    serde_json::to_value(service.filter(&key, &value)?)?
                }
                CarAction::Add(args) => {
                    let car = Car {
                        car_id: args.id,
                        ..Car::new(args.brand, args.model, args.year, args.price, args.condition)
                    };
                    serde_json::to_value(service.save_or_update(&car)?)?
                }
            }
        }
        Command::Orders { action } => {
            let service = order_service(SqliteOrderRepository::try_new(conn)?, interceptor);
            match action {
                OrderAction::List => serde_json::to_value(service.get_all()?)?,
                OrderAction::Get { id } => serde_json::to_value(service.get_by_id(id)?)?,
                OrderAction::Delete { id } => {
                    service.delete(id)?;
                    deleted(id)
                }
                OrderAction::Filter { key, value } => {
                    serde_json::to_value(service.filter(&key, &value)?)?
                }
                OrderAction::Add(args) => {
                    let order = Order {
                        order_id: args.id,
                        ..Order::new(args.user_id, args.car_id, args.date, args.status)
                    };
                    serde_json::to_value(service.save_or_update(&order)?)?
                }
                OrderAction::Status { id, status } => {
                    serde_json::to_value(service.change_status(id, &status)?)?
                }
                OrderAction::Cancel { id } => serde_json::to_value(service.cancel(id)?)?,
            }
        }
        Command::Users { action } => {
            let service = user_service(SqliteUserRepository::try_new(conn)?, interceptor);
            match action {
                UserAction::List => serde_json::to_value(service.get_all()?)?,
                UserAction::Get { id } => serde_json::to_value(service.get_by_id(id)?)?,
                UserAction::Delete { id } => {
                    service.delete(id)?;
                    deleted(id)
                }
                UserAction::Filter { key, value } => {
                    serde_json::to_value(service.filter(&key, &value)?)?
                }
                UserAction::Sort { key } => serde_json::to_value(service.sort(&key)?)?,
                UserAction::Add(args) => {
                    let mut user = User {
                        user_id: args.id,
                        ..User::new(args.login, args.password, args.name, args.age, args.city)
                    };
                    user.roles = args.roles.into_iter().map(Role::from).collect();
                    serde_json::to_value(service.save_or_update(&user)?)?
                }
            }
        }
    };
    Ok(value)
}

fn deleted(id: i64) -> Value {
    serde_json::json!({ "deleted": id })
}
