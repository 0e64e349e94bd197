mod cli;
mod config;
mod dispatch;
mod error;
mod logging;
mod session;

use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use cli::Cli;
use session::Session;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_secs()
}

fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("lit {}", env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    let root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("fatal: cannot read current directory: {e}");
            process::exit(128);
        }
    };

    let now = now_secs();

    let code = if cli.init {
        let config = Session::load_config(&root).unwrap_or_default();
        logging::init(&cli, &config);
        match lit_repository::Repository::initialize(&root, now) {
            Ok(_) => 0,
            Err(e) => {
                log::error!("{e}");
                eprintln!("fatal: {e}");
                128
            }
        }
    } else {
        match Session::open(&root) {
            Ok(mut session) => {
                logging::init(&cli, &session.config);
                match dispatch::dispatch(&mut session, &cli, now) {
                    Ok(code) => code,
                    Err(e) => {
                        log::error!("{e}");
                        eprintln!("fatal: {e}");
                        1
                    }
                }
            }
            Err(e) => {
                let config = Session::load_config(&root).unwrap_or_default();
                logging::init(&cli, &config);
                log::error!("{e}");
                eprintln!("fatal: {e}");
                128
            }
        }
    };

    process::exit(code);
}
