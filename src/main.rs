use std::process;
use log::{error, LevelFilter};

use rasterscan::utils::logger::Logger;
use rasterscan::commands::{build_cli, CommandFactory, RasterscanCommandFactory};

fn main() {
    let matches = build_cli().get_matches();

    let level = if matches.get_flag("verbose") { LevelFilter::Debug } else { LevelFilter::Info };

    let logger = match matches.get_one::<String>("log-file") {
        Some(log_file) => {
            if let Err(e) = Logger::init_global_logger(&format!("{}.global", log_file), level) {
                eprintln!("Error setting up global logger: {}", e);
                process::exit(1);
            }
            match Logger::new(log_file) {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Error initializing logger: {}", e);
                    process::exit(1);
                }
            }
        },
        None => {
            env_logger::Builder::new().filter_level(level).parse_default_env().init();
            Logger::disabled()
        },
    };

    let factory = RasterscanCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
