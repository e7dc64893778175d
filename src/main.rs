use dotenv::dotenv;
use log::{error, info};
use std::process::ExitCode;

use rewards_export::config::Config;
use rewards_export::services::export::run_export;

fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init();

    info!("Starting validator rewards export");
    let result = Config::from_env().and_then(|config| run_export(&config));

    match result {
        Ok(path) => {
            info!("Export complete. Rewards written to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Export failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
