use anyhow::Context;
use clap::{Parser, Subcommand};
use dashboard_core::{Config, Dashboard, DashboardState, Router, firestore};
use inquire::{Password, Text};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "dashboard", version, about = "Dashboard weather and state CLI")]
pub struct Cli {
    /// Log at debug level regardless of RUST_LOG.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively store the OpenWeather key and document-database project.
    Configure,

    /// Refresh and print current weather and forecasts.
    Weather,

    /// Resolve and print the user's location.
    Locate,

    /// Walk the router through the given paths.
    Visit {
        /// Paths such as "/profile" or "/weather".
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Show configuration status.
    Status,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Weather => {
                let dash = Dashboard::from_config(&Config::load()?)?;
                dash.refresh_weather().await;
                print_weather(&dash.store().snapshot());
            }
            Command::Locate => {
                let dash = Dashboard::from_config(&Config::load()?)?;
                dash.fetch_user_location().await;
                let state = dash.store().snapshot();
                if let Some(coords) = state.current_user_location {
                    println!("Location: {coords}");
                }
                if let Some(message) = state.location_error {
                    println!("Note: {message}");
                }
            }
            Command::Visit { paths } => {
                let dash = Dashboard::from_config(&Config::load()?)?;
                let mut router = Router::new(dash.store().clone());
                for path in &paths {
                    match router.navigate(path) {
                        Ok(route) => println!(
                            "{path:<12} -> {route:<10} (view key {})",
                            dash.store().snapshot().view_key
                        ),
                        Err(err) => println!("{path:<12} -> {err}"),
                    }
                }
            }
            Command::Status => status()?,
        }

        Ok(())
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if !key.trim().is_empty() {
        cfg.set_openweather_api_key(key.trim().to_string());
    }

    let project = Text::new("Firebase project id (leave empty to skip):")
        .prompt()
        .context("Failed to read project id")?;
    if !project.trim().is_empty() {
        cfg.firebase.project_id = Some(project.trim().to_string());
    }

    cfg.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn status() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    println!("Config file:     {}", Config::config_file_path()?.display());
    println!(
        "OpenWeather key: {}",
        if cfg.openweather_api_key().is_some() { "configured" } else { "missing" }
    );
    match cfg.location.fixed_position() {
        Some(coords) if cfg.location.enabled => println!("Location:        fixed at {coords}"),
        _ if cfg.location.enabled => {
            println!("Location:        lookup via {}", cfg.location.lookup_url)
        }
        _ => println!("Location:        disabled"),
    }
    match firestore::document_db(&cfg.firebase) {
        Some(db) => println!("Document DB:     {}", db.documents_url()),
        None => println!("Document DB:     not configured"),
    }
    Ok(())
}

fn print_weather(state: &DashboardState) {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M");

    if state.weather_revision == 0 {
        println!("No weather data available (see log output).");
        return;
    }

    let current = &state.current_weather;
    println!("{} ({now})", current.city);
    println!("  {}°C, {} [{}]", current.temperature_c, current.condition, current.icon);

    if let Some(message) = &state.location_error {
        println!("  Note: {message}");
    }

    println!();
    println!("Hourly:");
    for h in &state.hourly_forecast {
        println!(
            "  {:<8} {:>4}°C  humidity {:>3}%  wind {:.1} m/s  [{}]",
            h.time_label, h.temperature_c, h.humidity_pct, h.wind_speed, h.icon
        );
    }

    println!();
    println!("Daily:");
    for d in &state.weekly_forecast {
        println!("  {:<3} {:>4}°C  {} [{}]", d.day_label, d.temperature_c, d.condition, d.icon);
    }
}
