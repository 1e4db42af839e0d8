use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use std::time::Duration;

use meditrak::{Config, Database, Profile, ReminderStore, Status, Tracker, chime, cli::{Cli, Commands}};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let profile = if cli.dev {
        Profile::Dev
    } else {
        Profile::Prod
    };

    let config = match cli.config {
        Some(ref path) => Config::load_from_path(path)
            .wrap_err_with(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_with_profile(profile)?,
    };

    let _log_guard = meditrak::logging::init(&config.get_log_dir(), &config.log_level)
        .wrap_err("Failed to set up logging")?;
    tracing::info!(profile = ?profile, version = env!("CARGO_PKG_VERSION"), "starting");

    let db_path = config.get_database_path();
    let db = Database::open(&db_path)
        .wrap_err_with(|| format!("Failed to open database at {}", db_path.display()))?;

    let store = ReminderStore::load(Box::new(db));
    let mut tracker = Tracker::new(store, chime::from_config(&config))
        .with_sound_enabled(config.sound_enabled)
        .with_snooze_minutes(config.snooze_minutes);

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = meditrak::tui::App::new(config, profile, cli.config.clone(), tracker);
            meditrak::tui::run_event_loop(app)?;
        }
        Commands::Add { name, time, dosage, no_sound } => {
            meditrak::cli::handle_add(name, time, dosage, no_sound, &mut tracker)?;
        }
        Commands::List { json } => {
            meditrak::cli::handle_list(json, &tracker)?;
        }
        Commands::Edit { id, name, time, dosage, sound } => {
            meditrak::cli::handle_edit(id, name, time, dosage, sound, &mut tracker)?;
        }
        Commands::Delete { id } => {
            meditrak::cli::handle_delete(id, &mut tracker)?;
        }
        Commands::Take { id } => {
            meditrak::cli::handle_mark(id, Status::Taken, &mut tracker)?;
        }
        Commands::Miss { id } => {
            meditrak::cli::handle_mark(id, Status::Missed, &mut tracker)?;
        }
        Commands::Snooze { id, minutes } => {
            meditrak::cli::handle_snooze(id, minutes, &mut tracker)?;
        }
        Commands::Clear { yes } => {
            meditrak::cli::handle_clear(yes, &mut tracker)?;
        }
        Commands::Watch => {
            let interval = Duration::from_secs(config.check_interval_secs);
            meditrak::cli::handle_watch(interval, &mut tracker)?;
        }
        Commands::Export { path } => {
            meditrak::cli::handle_export(path, &tracker)?;
        }
        Commands::Import { path } => {
            meditrak::cli::handle_import(path, &mut tracker)?;
        }
    }

    Ok(())
}
