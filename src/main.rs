use color_eyre::Result;
use clap::Parser;
use journal::{
    cli::{Cli, Commands},
    logging, utils, Config, JournalStore, KeyValueStore, MemoryStorage, Profile, SqliteStorage,
    SystemClock,
};
use log::info;

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev {
        Profile::Dev
    } else {
        Profile::Prod
    };

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from_path(&utils::expand_path(path), profile)?,
        None => Config::load_with_profile(profile)?,
    };

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    // Dropping the handle stops the logger, so it lives until main returns
    let _logger = logging::init_logging(level, &config.get_log_dir())?;

    let storage: Box<dyn KeyValueStore> = if cli.ephemeral {
        info!("event=storage_open kind=memory");
        Box::new(MemoryStorage::new())
    } else {
        let path = config.get_storage_path();
        info!("event=storage_open kind=sqlite path={}", path.display());
        Box::new(SqliteStorage::open(&path)?)
    };

    let mut store = JournalStore::new(storage, SystemClock, config.store_options());

    match cli.command {
        None | Some(Commands::Tui) => {
            let app = journal::tui::App::new(config, store);
            journal::tui::run_event_loop(app)?;
        }
        Some(command) => {
            let mut stdout = std::io::stdout().lock();
            journal::cli::run_command(&command, &mut store, &mut stdout)?;
        }
    }

    Ok(())
}
