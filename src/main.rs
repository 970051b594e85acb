use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use hotel::app::{Action, Menu, rejection_message, write_missing_notices, write_stats};
use hotel::logging;
use hotel::models::{Customer, CustomerId, Hotel, Room, RoomId};
use hotel::storage::{Config, ConfigStorage, TomlConfigStorage, config_home, data_home, ensure_dir};

#[derive(Parser)]
#[command(name = "hotel")]
#[command(about = "Hotel customer and room registry", long_about = None)]
struct Cli {
    /// Directory holding customers.txt and rooms.txt (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Configuration file (default: $XDG_CONFIG_HOME/hotel/hotel.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log to stderr via RUST_LOG instead of the log file
    #[arg(long, global = true)]
    log_stderr: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu (default)
    Menu,

    /// Register a new customer
    AddCustomer {
        #[arg(long)]
        id: CustomerId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        phone: String,
    },

    /// Register a new room
    AddRoom {
        #[arg(long)]
        id: RoomId,
        #[arg(long)]
        room_type: String,
        #[arg(long)]
        price: f64,
    },

    /// Assign the first available room of a type to a customer
    Assign {
        #[arg(long)]
        customer: CustomerId,
        #[arg(long)]
        room_type: String,
    },

    /// Check a customer out of their room
    Checkout {
        #[arg(long)]
        customer: CustomerId,
    },

    /// Show all customers and rooms
    List,

    /// Show occupancy statistics
    Stats,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.log_stderr {
        env_logger::init();
    }

    // XDG directories are only resolved when no explicit path is given
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config_home()?.join("hotel.toml"),
    };
    let config = TomlConfigStorage::new(config_path).load()?;

    let data_dir = match cli.data_dir.clone().or_else(|| config.general.data_dir.clone()) {
        Some(dir) => dir,
        None => data_home()?,
    };
    ensure_dir(&data_dir)?;

    if !cli.log_stderr {
        logging::init_logger(
            &data_dir.join("hotel.log"),
            &config.general.log_level,
            &config.general.console_log_level,
        )?;
    }

    let mut hotel = open_hotel(&config, &data_dir)?;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => cmd_menu(&mut hotel),
        Commands::AddCustomer {
            id,
            name,
            age,
            phone,
        } => cmd_action(
            &mut hotel,
            Action::AddCustomer(Customer::new(id, name, age, phone)),
        ),
        Commands::AddRoom {
            id,
            room_type,
            price,
        } => cmd_action(&mut hotel, Action::AddRoom(Room::new(id, room_type, price))),
        Commands::Assign {
            customer,
            room_type,
        } => cmd_action(
            &mut hotel,
            Action::AssignRoom {
                customer_id: customer,
                room_type,
            },
        ),
        Commands::Checkout { customer } => cmd_action(
            &mut hotel,
            Action::Checkout {
                customer_id: customer,
            },
        ),
        Commands::List => cmd_list(&hotel),
        Commands::Stats => cmd_stats(&hotel),
    }
}

/// Build the registry over the configured stores and load it
fn open_hotel(config: &Config, data_dir: &std::path::Path) -> Result<Hotel> {
    let mut hotel = Hotel::with_files(
        config.general.customers_path(data_dir),
        config.general.rooms_path(data_dir),
    );

    let report = hotel.load().context("Failed to load hotel records")?;
    write_missing_notices(&mut io::stdout().lock(), &report)?;

    Ok(hotel)
}

/// Run the interactive menu on stdin/stdout
fn cmd_menu(hotel: &mut Hotel) -> Result<ExitCode> {
    log::info!("Starting interactive menu");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(stdin.lock(), stdout.lock()).run(hotel)?;

    Ok(ExitCode::SUCCESS)
}

/// Run one registry operation, exiting non-zero if it is rejected
fn cmd_action(hotel: &mut Hotel, action: Action) -> Result<ExitCode> {
    match action.execute(hotel) {
        Ok(message) => {
            println!("{}", message);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            log::warn!("Operation rejected: {}", err);
            eprintln!("{}", rejection_message(&err));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Show all customers and rooms
fn cmd_list(hotel: &Hotel) -> Result<ExitCode> {
    let mut stdout = io::stdout().lock();
    hotel.display_all(&mut stdout)?;

    if hotel.customers().is_empty() && hotel.rooms().is_empty() {
        writeln!(stdout, "\n(empty - no customers or rooms yet)")?;
    }
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}

/// Show occupancy statistics
fn cmd_stats(hotel: &Hotel) -> Result<ExitCode> {
    let mut stdout = io::stdout().lock();
    write_stats(&mut stdout, &hotel.occupancy())?;

    Ok(ExitCode::SUCCESS)
}
