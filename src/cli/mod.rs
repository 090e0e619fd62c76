mod commands;
pub mod error;
mod utils;

use clap::{Parser, Subcommand};

use crate::config::ConfigStore;
use crate::flow::FlowMode;
use crate::manager::build_manager;
use crate::remote::ApiClient;
use crate::timer::TimerControl;
use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "flowstate")]
#[command(author, version, about = "Task tracking and pomodoro timers from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task description
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },
    /// List tasks
    List {
        /// Include completed tasks
        #[arg(long)]
        all: bool,
    },
    /// Mark a task as the one being worked on
    Start {
        /// Task ID
        id: i64,
    },
    /// Complete a task (the active one when no ID is given)
    Done {
        /// Task ID
        id: Option<i64>,
    },
    /// Delete a task
    Rm {
        /// Task ID
        id: i64,
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Pomodoro timer commands
    Pom {
        #[command(subcommand)]
        command: PomCommands,
    },
    /// Push local records to the cloud
    Sync,
    /// Authentication commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Focus mode (distraction blocking) commands
    Mode {
        #[command(subcommand)]
        command: ModeCommands,
    },
    /// Show productivity statistics
    Stats,
}

#[derive(Subcommand)]
enum PomCommands {
    /// Start a focus session
    Start {
        /// Override the session length in minutes
        #[arg(long)]
        duration: Option<i64>,
    },
    /// Start a break
    Break {
        /// Break length: short or long
        #[arg(default_value = "short")]
        kind: String,
    },
    /// Pause or resume the running timer
    Pause,
    /// Stop the running timer
    Stop,
    /// Show the running timer
    Status,
    /// Timer daemon commands
    Daemon {
        #[command(subcommand)]
        command: DaemonCommands,
    },
}

#[derive(Subcommand)]
enum DaemonCommands {
    /// Start the timer daemon
    Start,
    /// Stop the timer daemon
    Stop,
    /// Show whether the timer daemon is running
    Status,
}

#[derive(Subcommand)]
enum AuthCommands {
    /// Send a magic login link to an email address
    Login {
        /// Account email
        email: String,
    },
    /// Store the API token from a magic link
    Token {
        /// API token
        token: String,
    },
    /// Forget the stored API token
    Logout,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Update a configuration key
    Set {
        /// Setting name
        key: String,
        /// New value
        value: String,
    },
    /// Switch the data mode: local, cloud or hybrid
    Mode {
        /// Mode name
        mode: String,
    },
}

#[derive(Subcommand)]
enum ModeCommands {
    /// Turn focus mode on
    On,
    /// Turn focus mode off
    Off,
    /// Show focus mode status
    Status,
    /// Add a site to the block list
    Block {
        /// Site hostname, e.g. reddit.com
        site: String,
    },
    /// Remove a site from the block list
    Unblock {
        /// Site hostname
        site: String,
    },
}

pub async fn run() {
    let cli = Cli::parse();

    let command = match cli.command {
        Some(command) => command,
        None => {
            // Show help when no command provided
            let _ = Cli::parse_from(["flowstate", "--help"]);
            return;
        }
    };

    let store = match ConfigStore::open_default() {
        Ok(store) => store,
        Err(e) => {
            print_error(e.into());
            return;
        }
    };

    match dispatch(command, &store).await {
        Ok(output) => println!("{}", output),
        Err(e) => print_error(e),
    }
}

async fn dispatch(command: Commands, store: &ConfigStore) -> CliResult<String> {
    let settings = store.load();
    let control = TimerControl::from_store(store);
    let flow = FlowMode::new();

    match command {
        Commands::Add { description } => {
            let manager = build_manager(&settings, store).await?;
            commands::task::add(&manager, &description.join(" ")).await
        }
        Commands::List { all } => {
            let manager = build_manager(&settings, store).await?;
            commands::task::list(&manager, all).await
        }
        Commands::Start { id } => {
            let manager = build_manager(&settings, store).await?;
            commands::task::start(&manager, id).await
        }
        Commands::Done { id } => {
            let manager = build_manager(&settings, store).await?;
            commands::task::done(&manager, id).await
        }
        Commands::Rm { id, yes } => {
            let manager = build_manager(&settings, store).await?;
            commands::task::remove(&manager, id, yes).await
        }
        Commands::Pom { command } => match command {
            PomCommands::Start { duration } => {
                let manager = build_manager(&settings, store).await?;
                commands::pom::start(&manager, &control, duration).await
            }
            PomCommands::Break { kind } => {
                let manager = build_manager(&settings, store).await?;
                commands::pom::take_break(&manager, &control, &kind).await
            }
            PomCommands::Pause => commands::pom::pause(&control),
            PomCommands::Stop => commands::pom::stop(&control),
            PomCommands::Status => commands::pom::status(&control),
            PomCommands::Daemon { command } => match command {
                DaemonCommands::Start => commands::pom::daemon_start(&control).await,
                DaemonCommands::Stop => commands::pom::daemon_stop(&control),
                DaemonCommands::Status => commands::pom::daemon_status(&control),
            },
        },
        Commands::Sync => commands::sync::run(store).await,
        Commands::Auth { command } => match command {
            AuthCommands::Login { email } => {
                let api = ApiClient::from_settings(&settings);
                commands::auth::login(&api, &email).await
            }
            AuthCommands::Token { token } => {
                // Verify with the candidate token before persisting it.
                let mut candidate = settings.clone();
                candidate.auth_token = Some(token.clone());
                let api = ApiClient::from_settings(&candidate);
                commands::auth::token(store, &api, &token).await
            }
            AuthCommands::Logout => commands::auth::logout(store),
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::show(store),
            ConfigCommands::Set { key, value } => {
                let manager = build_manager(&settings, store).await?;
                commands::config::set(&manager, store, &key, &value).await
            }
            ConfigCommands::Mode { mode } => commands::config::mode(store, &mode),
        },
        Commands::Mode { command } => match command {
            ModeCommands::On => commands::flow::on(store, &flow),
            ModeCommands::Off => commands::flow::off(&flow),
            ModeCommands::Status => commands::flow::status(store, &flow),
            ModeCommands::Block { site } => commands::flow::block(store, &flow, &site),
            ModeCommands::Unblock { site } => commands::flow::unblock(store, &flow, &site),
        },
        Commands::Stats => {
            let manager = build_manager(&settings, store).await?;
            commands::stats::run(&manager).await
        }
    }
}

fn print_error(e: CliError) {
    eprintln!("{:?}", miette::Report::new(e));
}
