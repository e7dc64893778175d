use log::info;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::services::aggregation::build_report;
use crate::utils::helpers::{load_prices, load_rewards, save_report};

/// Reads the API responses named in `config`, builds the report and writes
/// it to the output file. Returns the path written.
pub fn run_export(config: &Config) -> Result<PathBuf> {
    let rewards = load_rewards(&config.rewards_file)?;
    let eth_prices = load_prices(&config.eth_prices_file)?;
    let rpl_prices = config
        .rpl_prices_file
        .as_deref()
        .map(load_prices)
        .transpose()?;

    info!("Building report...");
    let report = build_report(
        &rewards.validator_rewards,
        &rewards.rocket_pool_node_rewards,
        &eth_prices,
        rpl_prices.as_ref(),
        &config.request,
    )?;

    save_report(&config.output_file, &report)?;
    Ok(config.output_file.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AggregationRequest;
    use crate::RewardsError;
    use std::fs;

    const REWARDS: &str = r#"{
        "validator_rewards": [{
            "validator_index": 100,
            "consensus_layer_rewards": [{"date": "2023-01-01", "amount_wei": 32000000000}],
            "execution_layer_rewards": [],
            "withdrawals": []
        }]
    }"#;

    fn write_inputs(dir: &tempfile::TempDir, prices: &str) -> Config {
        let rewards_file = dir.path().join("rewards.json");
        let eth_prices_file = dir.path().join("eth.json");
        fs::write(&rewards_file, REWARDS).unwrap();
        fs::write(&eth_prices_file, prices).unwrap();
        Config {
            rewards_file,
            eth_prices_file,
            rpl_prices_file: None,
            output_file: dir.path().join("rewards_data.csv"),
            request: AggregationRequest::default(),
        }
    }

    #[test]
    fn writes_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_inputs(
            &dir,
            r#"{"currency": "USD", "prices": [{"date": "2023-01-01", "price": 2000}]}"#,
        );
        let written = run_export(&config).unwrap();
        let text = fs::read_to_string(written).unwrap();
        assert_eq!(
            text,
            "Date;Validator Index;Price [USD/ETH];Consensus Layer Income [ETH];\
             Execution Layer Income [ETH]\n2023-01-01;100;2000;32;0"
        );
    }

    #[test]
    fn missing_price_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_inputs(&dir, r#"{"currency": "USD", "prices": []}"#);
        assert!(matches!(
            run_export(&config),
            Err(RewardsError::PriceNotFound { .. })
        ));
        assert!(!config.output_file.exists());
    }
}
