use anyhow::{bail, Context, Result};
use clap::Parser;
use skyplan_app::cli::{Cli, Command};
use skyplan_app::logging::{self, LoggingConfig};
use skyplan_app::{App, ListOptions};
use skyplan_core::NotificationLevel;
use skyplan_settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging_config = if cli.verbose {
        LoggingConfig::development()
    } else {
        LoggingConfig::production()
    };
    if let Err(err) = logging::init(logging_config) {
        eprintln!("Failed to initialize logging: {err:#}");
    }

    let settings = Settings::load().context("Failed to load settings")?;

    if let Command::Config { init } = cli.command {
        if init {
            init_config()?;
        }
        return print_config(&settings);
    }

    let app = App::from_settings(settings)?;
    let result = run(&app, cli.command).await;

    for notification in app.notifications().active() {
        match notification.level {
            NotificationLevel::Success => eprintln!("✓ {}", notification.message),
            NotificationLevel::Error => eprintln!("✗ {}", notification.message),
        }
    }
    app.notifications().clear();

    result
}

async fn run(app: &App, command: Command) -> Result<()> {
    match command {
        Command::List {
            resource,
            search,
            filters,
            sort,
            page,
        } => {
            let options = ListOptions {
                search,
                filters,
                sort,
                page,
            };
            print!("{}", app.list(resource, &options).await?);
        }
        Command::Show { resource, id } => println!("{}", app.show(resource, id).await?),
        Command::Create { resource, data } => {
            println!("{}", app.create(resource, &data).await?)
        }
        Command::Update { resource, id, data } => {
            println!("{}", app.update(resource, id, &data).await?)
        }
        Command::Delete { resource, id } => app.delete(resource, id).await?,
        Command::WeightBalance { flight_id } => {
            println!("{}", app.weight_balance(flight_id).await?)
        }
        Command::Config { .. } => {}
    }
    Ok(())
}

fn init_config() -> Result<()> {
    let path = Settings::settings_path()?;
    if path.exists() {
        bail!("Settings file already exists: {}", path.display());
    }
    Settings::default().save()?;
    eprintln!("Wrote default settings to {}", path.display());
    Ok(())
}

fn print_config(settings: &Settings) -> Result<()> {
    let mut shown = settings.clone();
    if shown.auth.token.is_some() {
        shown.auth.token = Some("********".to_string());
    }
    println!("{}", Settings::settings_path()?.display());
    println!("{}", serde_json::to_string_pretty(&shown)?);
    Ok(())
}
