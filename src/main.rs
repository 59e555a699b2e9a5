use std::process::ExitCode;

use tokio::net::TcpListener;
use wordblitz::config::Config;
use wordblitz::startup;

#[tokio::main]
async fn main() -> ExitCode {
    std_logger::Config::logfmt().init();

    let config = match Config::get() {
        Ok(config) => config,
        Err(error) => {
            log::error!("Unable to get the Config. Error: '{error}'.");
            return ExitCode::FAILURE;
        }
    };

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(error) => {
            log::error!("Failed to bind address. Address: '{address}', Error: '{error}'.");
            return ExitCode::FAILURE;
        }
    };

    match startup::create_web_server(config, listener).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
