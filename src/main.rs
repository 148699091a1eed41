use clap::Parser;
use log::{debug, info};

use notebook::{App, Cli, Config, FileStore};

fn initialize_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();
}

fn main() {
    let cli = Cli::parse();

    initialize_logger(cli.verbose);

    let result = Config::resolve(cli.data_dir)
        .and_then(|config| {
            debug!("Using data directory: {}", config.data_dir.display());
            FileStore::new(&config.data_dir)
        })
        .and_then(|store| App::new(store, cli.verbose).run(cli.command));

    if let Err(e) = result {
        eprintln!("{} {}", console::style("Ошибка:").red().bold(), e);
        std::process::exit(1);
    }

    info!("Done");
}
