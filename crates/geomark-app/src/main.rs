//! Main application entry point.

use std::io;

use geomark_app::Shell;
use geomark_core::LocationDirectory;

fn main() {
    env_logger::init();
    log::info!("Starting Geomark");

    let directory = match std::env::args().nth(1) {
        Some(path) => match load_directory(&path) {
            Ok(directory) => directory,
            Err(err) => {
                log::error!("Cannot load locations from {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => LocationDirectory::builtin(),
    };

    let stdin = io::stdin();
    let mut shell = Shell::new(directory);
    if let Err(err) = shell.run(stdin.lock(), io::stdout()) {
        log::error!("Shell error: {}", err);
        std::process::exit(1);
    }
}

fn load_directory(path: &str) -> Result<LocationDirectory, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(LocationDirectory::from_json(&json)?)
}
