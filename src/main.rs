use std::process::ExitCode;

use clap::Parser;

use oasis_fortune_lib::config::ServerConfig;

#[tokio::main]
async fn main() -> ExitCode {
    oasis_fortune_lib::init_tracing();

    let config = ServerConfig::parse();
    match oasis_fortune_lib::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
