//! Habit tracker host
//!
//! Serves the tracker core to an out-of-process UI shell over stdin/stdout
//! using length-prefixed JSON messages.

use habit_tracker_lib::{config::AppConfig, host::Host, open_session};

fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Logger is not up yet; fall back to the default level.
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .init();
            log::error!("Initialization error: {e}");
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let session = match open_session(&config) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let mut host = Host::new(session);
    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();

    // Serve until the shell closes the pipe
    if let Err(e) = host.run(&mut stdin, &mut stdout) {
        // EOF is expected when the shell closes the connection
        if e.kind() != std::io::ErrorKind::UnexpectedEof {
            log::error!("Host error: {e}");
            std::process::exit(1);
        }
    }
    log::info!("Host shut down");
}
