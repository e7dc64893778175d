use crate::error::Result;
use crate::models::{PriceSeries, RewardsResponse};
use log::info;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

fn load_json<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let raw_data = fs::read_to_string(file_path)?;
    let value = serde_json::from_str(&raw_data)?;
    Ok(value)
}

pub fn load_rewards(file_path: &Path) -> Result<RewardsResponse> {
    let rewards: RewardsResponse = load_json(file_path)?;
    info!(
        "Loaded rewards for {} validators and {} rocket pool node rewards from {}",
        rewards.validator_rewards.len(),
        rewards.rocket_pool_node_rewards.len(),
        file_path.display()
    );
    Ok(rewards)
}

pub fn load_prices(file_path: &Path) -> Result<PriceSeries> {
    let prices: PriceSeries = load_json(file_path)?;
    info!(
        "Loaded {} {} prices from {}",
        prices.prices.len(),
        prices.currency,
        file_path.display()
    );
    Ok(prices)
}

pub fn save_report(file_path: &Path, contents: &str) -> Result<()> {
    fs::write(file_path, contents)?;
    info!("Saved report to {}", file_path.display());
    Ok(())
}
