//! Astrum - Entry Point
//!
//! Filesystem navigation engine of the Astrum file manager, driven from a
//! line-oriented shell.

use log::{error, info};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use astrum::EngineConfig;
use astrum::shell::{CommandStatus, Session, parse_command};
use astrum::utils::logging::setup_logging;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    setup_logging();

    let config = match EngineConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut session = match Session::new(&config) {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Astrum {} ready (type `help`)", VERSION);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        let _ = write!(stdout, "{}", session.prompt());
        let _ = stdout.flush();

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                let command = parse_command(line.trim_end_matches(['\r', '\n']));
                let result = session.handle_command(command);

                if let Some(msg) = result.message {
                    let _ = writeln!(stdout, "{}", msg);
                }
                if result.status == CommandStatus::Exit {
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        }
    }

    ExitCode::SUCCESS
}
