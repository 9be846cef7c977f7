use std::{io, process::ExitCode};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use inquire::{CustomType, InquireError, Text};
use weather_core::{Config, SearchController, clients_from_config};

use crate::surface::{OutputMode, TerminalSurface};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for a city")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    Show {
        /// City name, e.g. "Berlin" or "New York".
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search repeatedly from a prompt. Esc or Ctrl-C quits.
    Interactive,

    /// Edit the endpoints, language and timeout.
    Configure {
        /// Print the config file path and current values instead of prompting.
        #[arg(long)]
        show: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Show { city, json } => show(&city.join(" "), json).await,
            Command::Interactive => interactive().await,
            Command::Configure { show } => {
                if show {
                    print_config()?;
                } else {
                    configure()?;
                }
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn controller_from_config() -> anyhow::Result<SearchController> {
    let config = Config::load()?;
    let (geocoder, weather) = clients_from_config(&config)?;
    Ok(SearchController::new(geocoder, weather))
}

async fn show(city: &str, json: bool) -> anyhow::Result<ExitCode> {
    let mut controller = controller_from_config()?;
    let mode = if json { OutputMode::Json } else { OutputMode::Text };
    let mut surface = TerminalSurface::new(io::stdout(), mode);

    controller.submit(city, &mut surface).await;

    if surface.showing_error() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

async fn interactive() -> anyhow::Result<ExitCode> {
    let mut controller = controller_from_config()?;
    let mut surface = TerminalSurface::new(io::stdout(), OutputMode::Text);

    loop {
        let input = Text::new("City:")
            .with_help_message("Enter to search, Esc to quit")
            .prompt();

        match input {
            Ok(input) => {
                controller.submit(&input, &mut surface).await;
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read city from prompt"),
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_config() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let config = Config::load()?;

    println!("# {}", path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let current = Config::load()?;

    let geocoding_url = Text::new("Geocoding endpoint:")
        .with_default(&current.geocoding_url)
        .prompt()?;
    let forecast_url = Text::new("Forecast endpoint:")
        .with_default(&current.forecast_url)
        .prompt()?;
    let language = Text::new("Language for place names:")
        .with_default(&current.language)
        .prompt()?;
    let request_timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(current.request_timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;

    let config = Config {
        geocoding_url: geocoding_url.trim().to_string(),
        forecast_url: forecast_url.trim().to_string(),
        language: language.trim().to_string(),
        request_timeout_secs,
    };

    config.validate()?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
