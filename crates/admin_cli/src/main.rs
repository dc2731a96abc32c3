use std::{error::Error, process::ExitCode, time::Duration};

use clap::{Args, Parser, Subcommand};
use engine::{Engine, EngineError};
use importer::{ImportEvent, ImportSink, Source};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use tracing_subscriber::EnvFilter;

mod prompt;

#[derive(Parser, Debug)]
#[command(name = "hotels_admin")]
#[command(about = "Admin utilities for the hotel directory (imports, cities, superusers)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./hotels.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending migrations and exit.
    Migrate,
    Import(Import),
    City(City),
    User(User),
}

#[derive(Args, Debug)]
struct Import {
    #[command(subcommand)]
    command: ImportCommand,
}

#[derive(Subcommand, Debug)]
enum ImportCommand {
    /// Import `code;name` rows.
    Cities(CityImportArgs),
    /// Import `city_code;hotel_code;hotel_name` rows.
    Hotels(HotelImportArgs),
}

#[derive(Args, Debug)]
struct CityImportArgs {
    #[arg(long, env = "HOTELS_CITY_CSV_URL")]
    url: String,
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args, Debug)]
struct HotelImportArgs {
    #[arg(long, env = "HOTELS_HOTEL_CSV_URL")]
    url: String,
    #[command(flatten)]
    source: SourceArgs,
}

/// Credentials and limits shared by both CSV sources.
#[derive(Args, Debug)]
struct SourceArgs {
    #[arg(long, env = "HOTELS_CSV_USERNAME")]
    username: String,
    #[arg(long, env = "HOTELS_CSV_PASSWORD", hide_env_values = true)]
    password: String,
    /// Request timeout in seconds.
    #[arg(long, env = "HOTELS_CSV_TIMEOUT_SECS", default_value_t = 10)]
    timeout: u64,
}

impl SourceArgs {
    fn source(&self, url: &str) -> Source {
        Source::new(url, &self.username, &self.password).timeout(Duration::from_secs(self.timeout))
    }
}

#[derive(Args, Debug)]
struct City {
    #[command(subcommand)]
    command: CityCommand,
}

#[derive(Subcommand, Debug)]
enum CityCommand {
    Create(CityCreateArgs),
    /// Delete a city together with its hotels.
    Delete(CityDeleteArgs),
}

#[derive(Args, Debug)]
struct CityCreateArgs {
    #[arg(long)]
    code: String,
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct CityDeleteArgs {
    #[arg(long)]
    code: String,
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    CreateSuperuser(SuperuserArgs),
}

#[derive(Args, Debug)]
struct SuperuserArgs {
    #[arg(long)]
    username: String,
    #[arg(long, default_value = "")]
    email: String,
}

/// Informational events on stdout, diagnostics on stderr.
struct Console;

impl ImportSink for Console {
    fn emit(&mut self, event: ImportEvent) {
        if event.is_diagnostic() {
            eprintln!("{event}");
        } else {
            println!("{event}");
        }
    }
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::Migrate => {
            println!("migrations applied");
        }
        Command::Import(Import { command }) => {
            let result = match command {
                ImportCommand::Cities(args) => {
                    let source = args.source.source(&args.url);
                    importer::import_cities(&engine, &source, &mut Console).await
                }
                ImportCommand::Hotels(args) => {
                    let source = args.source.source(&args.url);
                    importer::import_hotels(&engine, &source, &mut Console).await
                }
            };
            match result {
                Ok(summary) => tracing::info!(?summary, "import finished"),
                Err(err) => {
                    eprintln!("{err}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::City(City {
            command: CityCommand::Create(args),
        }) => match engine.new_city(&args.code, &args.name).await {
            Ok(city) => println!("created city: {} - {}", city.code, city.name),
            Err(EngineError::ExistingKey(code)) => {
                eprintln!("city already exists: {code}");
                return Ok(ExitCode::FAILURE);
            }
            Err(err) => return Err(err.into()),
        },
        Command::City(City {
            command: CityCommand::Delete(args),
        }) => match engine.delete_city(&args.code).await {
            Ok(()) => println!("deleted city: {}", args.code),
            Err(EngineError::KeyNotFound(_)) => {
                eprintln!("city not found: {}", args.code);
                return Ok(ExitCode::FAILURE);
            }
            Err(err) => return Err(err.into()),
        },
        Command::User(User {
            command: UserCommand::CreateSuperuser(args),
        }) => {
            let password = prompt::new_password()?;

            match engine
                .create_superuser(&args.username, &args.email, &password)
                .await
            {
                Ok(user) => println!("created superuser: {}", user.username),
                Err(EngineError::ExistingKey(username)) => {
                    eprintln!("user already exists: {username}");
                    return Ok(ExitCode::FAILURE);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
